//! Colors and preset styles for the Verolix screens.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::{BmiCategory, RecordType};

/// Palette shared by every view.
pub struct MedicalTheme;

impl MedicalTheme {
    /// Brand teal: focused borders, progress gauge
    pub const PRIMARY: Color = Color::Rgb(13, 148, 136);
    /// Active tab, cursor, key hints
    pub const PRIMARY_LIGHT: Color = Color::Rgb(45, 212, 191);
    /// Header bar
    pub const PRIMARY_DARK: Color = Color::Rgb(15, 118, 110);

    /// Idle borders
    pub const BORDER: Color = Color::Rgb(148, 163, 184);

    /// Lab results, saved forms, normal BMI
    pub const SUCCESS: Color = Color::Rgb(16, 185, 129);
    /// Doctor notes, borderline BMI
    pub const WARNING: Color = Color::Rgb(251, 191, 36);
    /// Rejected input, obese BMI
    pub const DANGER: Color = Color::Rgb(244, 63, 94);
    /// Prescriptions, informational toasts
    pub const INFO: Color = Color::Rgb(59, 130, 246);

    pub const BG_DARK: Color = Color::Rgb(15, 23, 42);
    pub const BG_SURFACE: Color = Color::Rgb(30, 41, 59);

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252);
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184);
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139);

    // === Preset Styles ===

    /// Style for titles
    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for subtitles
    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for normal text
    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    /// Style for secondary text
    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Style for muted text
    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    /// Style for success messages
    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    /// Style for warning messages
    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    /// Style for danger/error messages
    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    /// Style for info messages
    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    /// Style for selected items
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for focused elements
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Style for focused borders
    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Style for the header
    #[must_use]
    pub fn header() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY_DARK)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key hints
    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for key descriptions
    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Style for the text cursor in focused inputs
    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }

    /// Badge style per record type
    #[must_use]
    pub fn record_type(kind: RecordType) -> Style {
        let color = match kind {
            RecordType::Prescription => Self::INFO,
            RecordType::LabResult => Self::SUCCESS,
            RecordType::DoctorNote => Self::WARNING,
            RecordType::PersonalInfo => Self::PRIMARY_LIGHT,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Style per BMI band
    #[must_use]
    pub fn bmi(category: BmiCategory) -> Style {
        match category {
            BmiCategory::Normal => Self::success(),
            BmiCategory::Underweight | BmiCategory::Overweight => Self::warning(),
            BmiCategory::Obese => Self::danger(),
        }
    }

    /// Gauge style for a pending submission
    #[must_use]
    pub fn progress() -> Style {
        Style::default().fg(Self::PRIMARY).bg(Self::BG_SURFACE)
    }
}

/// Wordmark shown in the header
pub const LOGO_SMALL: &str = "Verolix MedBot";
