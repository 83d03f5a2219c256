//! UI module: View components for the TUI.

pub mod doctor;
pub mod form;
pub mod landing;
pub mod pages;
pub mod patient;
pub mod records;

use std::time::{Duration, Instant};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::domain::User;
use crate::tui::router::Route;
use crate::tui::styles::{MedicalTheme, LOGO_SMALL};

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// Transient notification shown in the footer.
#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub shown_at: Instant,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= TOAST_TTL
    }
}

/// A key hint pair for the footer.
pub type KeyHint = (&'static str, &'static str);

const NAV_ITEMS: [(&str, Route); 5] = [
    ("F1", Route::Home),
    ("F3", Route::MyRecords),
    ("F4", Route::About),
    ("F5", Route::Contact),
    ("F6", Route::Download),
];

/// Top bar: wordmark, navigation and session.
pub fn render_header(f: &mut Frame, area: Rect, route: &Route, session: Option<&User>) {
    let mut spans = vec![
        Span::styled(format!(" {LOGO_SMALL} "), MedicalTheme::header()),
        Span::raw("  "),
    ];

    for (key, target) in &NAV_ITEMS {
        let style = if target == route {
            MedicalTheme::selected()
        } else {
            MedicalTheme::text_secondary()
        };
        spans.push(Span::styled(format!("[{key}]"), MedicalTheme::key_hint()));
        spans.push(Span::styled(format!("{} ", nav_label(target)), style));
    }

    match session {
        Some(user) => {
            let dashboard = Route::dashboard_for(user.role);
            let style = if &dashboard == route {
                MedicalTheme::selected()
            } else {
                MedicalTheme::text_secondary()
            };
            spans.push(Span::styled("[F2]", MedicalTheme::key_hint()));
            spans.push(Span::styled("Dashboard ", style));
            spans.push(Span::styled("│ ", MedicalTheme::border()));
            spans.push(Span::styled(user.name.clone(), MedicalTheme::text()));
            spans.push(Span::styled(
                format!(" ({}) ", user.role),
                MedicalTheme::text_muted(),
            ));
            spans.push(Span::styled("[F10]", MedicalTheme::key_hint()));
            spans.push(Span::styled("Logout", MedicalTheme::key_desc()));
        }
        None => {
            spans.push(Span::styled("│ ", MedicalTheme::border()));
            spans.push(Span::styled("Not signed in", MedicalTheme::text_muted()));
        }
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(header, area);
}

fn nav_label(route: &Route) -> &'static str {
    match route {
        Route::Home => "Home",
        Route::MyRecords => "My Records",
        Route::About => "About",
        Route::Contact => "Contact",
        Route::Download => "Download",
        Route::PatientDashboard | Route::DoctorDashboard => "Dashboard",
        Route::NotFound(_) => "",
    }
}

/// Bottom bar: progress of a pending submission, the current toast, or key
/// hints for the active screen.
pub fn render_footer(
    f: &mut Frame,
    area: Rect,
    toast: Option<&Toast>,
    progress: Option<f64>,
    hints: &[KeyHint],
) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    if let Some(ratio) = progress {
        let gauge = Gauge::default()
            .gauge_style(MedicalTheme::progress())
            .ratio(ratio.clamp(0.0, 1.0))
            .label(Span::styled("Please wait…", MedicalTheme::text()));
        f.render_widget(gauge, rows[0]);
    } else if let Some(toast) = toast {
        let (marker, style) = match toast.kind {
            ToastKind::Success => ("✓ ", MedicalTheme::success()),
            ToastKind::Error => ("! ", MedicalTheme::danger()),
            ToastKind::Info => ("i ", MedicalTheme::info()),
        };
        let line = Line::from(vec![
            Span::styled(marker, style),
            Span::styled(toast.message.clone(), style),
        ]);
        f.render_widget(Paragraph::new(line), rows[0]);
    }

    let mut spans = Vec::with_capacity(hints.len() * 2 + 4);
    for (key, desc) in hints {
        spans.push(Span::styled(format!("[{key}] "), MedicalTheme::key_hint()));
        spans.push(Span::styled(format!("{desc} "), MedicalTheme::key_desc()));
    }
    spans.push(Span::styled("[Ctrl+G] ", MedicalTheme::key_hint()));
    spans.push(Span::styled("Go to path ", MedicalTheme::key_desc()));
    spans.push(Span::styled("[Ctrl+Q] ", MedicalTheme::key_hint()));
    spans.push(Span::styled("Quit", MedicalTheme::key_desc()));
    f.render_widget(Paragraph::new(Line::from(spans)), rows[1]);
}

/// One-line path prompt overlaid on the footer.
pub fn render_path_prompt(f: &mut Frame, area: Rect, input: &str) {
    let block = Block::default()
        .title(Span::styled(" Go to path ", MedicalTheme::focused()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border_focused());
    let line = Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(input.to_string(), MedicalTheme::text()),
        Span::styled("▌", MedicalTheme::cursor()),
    ]);
    f.render_widget(Paragraph::new(line).block(block), area);
}

/// Section title with a subtitle, as used at the top of each screen.
pub fn render_title(f: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled(title.to_string(), MedicalTheme::title()),
        Span::styled(format!(" │ {subtitle}"), MedicalTheme::text_secondary()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(header, area);
}

/// Tab strip; the active tab is highlighted.
pub fn render_tabs(f: &mut Frame, area: Rect, labels: &[&str], active: usize) {
    let mut spans = vec![Span::raw(" ")];
    for (i, label) in labels.iter().enumerate() {
        let style = if i == active {
            MedicalTheme::selected()
        } else {
            MedicalTheme::text_secondary()
        };
        spans.push(Span::styled(format!(" {label} "), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("[Tab] ", MedicalTheme::key_hint()));
    spans.push(Span::styled("Switch", MedicalTheme::key_desc()));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
