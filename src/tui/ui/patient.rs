//! Patient dashboard: records, upload form and profile form.

use std::path::Path;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{MedicalRecord, PatientProfile, ProfileField, RecordDraft, RecordType, User};
use crate::tui::styles::MedicalTheme;

use super::form::{render_form_fields, FormField, FormState};
use super::records::{render_record_detail, render_record_list};
use super::{render_tabs, render_title};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatientTab {
    #[default]
    Records,
    Upload,
    Profile,
}

impl PatientTab {
    const ALL: [PatientTab; 3] = [Self::Records, Self::Upload, Self::Profile];

    fn label(self) -> &'static str {
        match self {
            Self::Records => "Medical Records",
            Self::Upload => "Upload Record",
            Self::Profile => "My Profile",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }
}

const UPLOAD_TITLE: usize = 0;
const UPLOAD_DATE: usize = 1;
const UPLOAD_DOCTOR: usize = 2;
const UPLOAD_DETAILS: usize = 3;
const UPLOAD_FILE: usize = 4;

/// Upload form: a document type selector plus text fields.
#[derive(Debug, Clone)]
pub struct UploadForm {
    pub kind: RecordType,
    pub form: FormState,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self {
            kind: RecordType::default(),
            form: FormState::new(vec![
                FormField::new("Title", "e.g. Blood Test Results"),
                FormField::new("Date", "YYYY-MM-DD"),
                FormField::new("Doctor", "optional"),
                FormField::new("Details", "optional"),
                FormField::new("File", "path to the document"),
            ]),
        }
    }
}

impl UploadForm {
    /// Snapshot the form as a draft. Only the file's name is kept.
    #[must_use]
    pub fn draft(&self) -> RecordDraft {
        let path = self.form.trimmed(UPLOAD_FILE);
        let file_name = Path::new(&path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty());

        RecordDraft {
            kind: self.kind,
            title: self.form.trimmed(UPLOAD_TITLE),
            date: self.form.trimmed(UPLOAD_DATE),
            doctor: self.form.trimmed(UPLOAD_DOCTOR),
            details: self.form.trimmed(UPLOAD_DETAILS),
            file_name,
        }
    }

    pub fn next_kind(&mut self) {
        if !self.form.is_submitting() {
            self.kind = self.kind.next();
        }
    }

    pub fn prev_kind(&mut self) {
        if !self.form.is_submitting() {
            self.kind = self.kind.prev();
        }
    }
}

fn profile_form(profile: &PatientProfile) -> FormState {
    let fields = ProfileField::ALL
        .iter()
        .map(|&field| {
            let input = FormField::new(field.label(), "").with_value(profile.field(field));
            if field.is_read_only() {
                input.read_only()
            } else {
                input
            }
        })
        .collect();
    FormState::new(fields)
}

/// Patient dashboard state
#[derive(Debug, Clone)]
pub struct PatientDashboardState {
    pub user: User,
    pub tab: PatientTab,
    pub records: Vec<MedicalRecord>,
    pub selected: usize,
    pub upload: UploadForm,
    pub profile: PatientProfile,
    pub profile_form: FormState,
}

impl PatientDashboardState {
    #[must_use]
    pub fn new(user: User, records: Vec<MedicalRecord>, profile: PatientProfile) -> Self {
        Self {
            user,
            tab: PatientTab::default(),
            records,
            selected: 0,
            upload: UploadForm::default(),
            profile_form: profile_form(&profile),
            profile,
        }
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.upload.form.is_submitting() || self.profile_form.is_submitting()
    }

    pub fn next_tab(&mut self) {
        if !self.is_submitting() {
            self.tab = self.tab.next();
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.records.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// The profile as currently edited.
    #[must_use]
    pub fn edited_profile(&self) -> PatientProfile {
        let mut profile = self.profile.clone();
        for (field, input) in ProfileField::ALL.iter().zip(&self.profile_form.fields) {
            if let Some(slot) = profile.field_mut(*field) {
                slot.clone_from(&input.value);
            }
        }
        profile
    }

    /// Show a freshly appended record and reset the upload form.
    pub fn record_uploaded(&mut self, records: Vec<MedicalRecord>) {
        self.records = records;
        self.selected = self.records.len().saturating_sub(1);
        self.upload = UploadForm::default();
        self.tab = PatientTab::Records;
    }

    pub fn profile_saved(&mut self, profile: PatientProfile) {
        self.profile_form = profile_form(&profile);
        self.profile = profile;
    }
}

/// Render the patient dashboard
pub fn render_patient_dashboard(f: &mut Frame, area: Rect, state: &PatientDashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let patient_id = state
        .user
        .patient_id
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string);
    render_title(
        f,
        chunks[0],
        &format!("Welcome, {}", state.user.name),
        &format!(
            "Patient ID: {patient_id} │ Total records: {}",
            state.records.len()
        ),
    );

    let labels: Vec<&str> = PatientTab::ALL.iter().map(|t| t.label()).collect();
    render_tabs(f, chunks[1], &labels, state.tab.index());

    match state.tab {
        PatientTab::Records => render_records_tab(f, chunks[2], state),
        PatientTab::Upload => render_upload_tab(f, chunks[2], &state.upload),
        PatientTab::Profile => render_profile_tab(f, chunks[2], &state.profile_form),
    }
}

fn render_records_tab(f: &mut Frame, area: Rect, state: &PatientDashboardState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_record_list(
        f,
        columns[0],
        &state.records,
        Some(state.selected),
        " Your Medical Records ",
    );
    render_record_detail(f, columns[1], state.records.get(state.selected));
}

fn render_upload_tab(f: &mut Frame, area: Rect, upload: &UploadForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    let mut kinds = vec![Span::raw(" ")];
    for kind in RecordType::ALL {
        let style = if kind == upload.kind {
            MedicalTheme::selected()
        } else {
            MedicalTheme::text_secondary()
        };
        kinds.push(Span::styled(format!(" {} ", kind.label()), style));
        kinds.push(Span::raw(" "));
    }
    kinds.push(Span::styled("[←→] ", MedicalTheme::key_hint()));
    kinds.push(Span::styled("Change", MedicalTheme::key_desc()));

    let selector = Paragraph::new(Line::from(kinds)).block(
        Block::default()
            .title(Span::styled(" Document Type ", MedicalTheme::text_secondary()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(selector, chunks[0]);

    render_form_fields(f, chunks[1], &upload.form, 2);
    render_form_status(f, chunks[2], &upload.form, "Upload", "Uploading…");
}

fn render_profile_tab(f: &mut Frame, area: Rect, form: &FormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)])
        .split(area);

    render_form_fields(f, chunks[0], form, 2);
    render_form_status(f, chunks[1], form, "Save Changes", "Saving…");
}

fn render_form_status(f: &mut Frame, area: Rect, form: &FormState, action: &str, busy: &str) {
    let content = if form.is_submitting() {
        Line::from(Span::styled(format!(" {busy}"), MedicalTheme::info()))
    } else if let Some(err) = &form.error_message {
        Line::from(vec![
            Span::styled(" ! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled(" [↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Navigate ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled(action.to_string(), MedicalTheme::key_desc()),
        ])
    };
    f.render_widget(Paragraph::new(content), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::sample_records;
    use crate::domain::Role;
    use ratatui::{backend::TestBackend, Terminal};

    fn create_state() -> PatientDashboardState {
        let user = User::new("jane@clinic.org", "jane", Role::Patient);
        let profile = PatientProfile::for_user(&user);
        PatientDashboardState::new(user, sample_records(), profile)
    }

    #[test]
    fn test_draft_keeps_file_name_only() {
        let mut upload = UploadForm::default();
        upload.form.fields[UPLOAD_TITLE].value = "X-Ray".to_string();
        upload.form.fields[UPLOAD_DATE].value = "2024-02-01".to_string();
        upload.form.fields[UPLOAD_FILE].value = "/tmp/scans/chest.png".to_string();
        upload.next_kind();

        let draft = upload.draft();
        assert_eq!(draft.kind, RecordType::LabResult);
        assert_eq!(draft.file_name.as_deref(), Some("chest.png"));
        assert!(draft.doctor.is_empty());
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_draft_without_file_fails_validation() {
        let mut upload = UploadForm::default();
        upload.form.fields[UPLOAD_TITLE].value = "X-Ray".to_string();
        upload.form.fields[UPLOAD_DATE].value = "2024-02-01".to_string();
        assert!(upload.draft().file_name.is_none());
        assert!(upload.draft().validate().is_err());
    }

    #[test]
    fn test_edited_profile_skips_email() {
        let mut state = create_state();
        state.tab = PatientTab::Profile;
        let email_index = ProfileField::ALL
            .iter()
            .position(|f| *f == ProfileField::Email)
            .expect("Email field");
        state.profile_form.fields[email_index].value = "other@x.io".to_string();
        state.profile_form.fields[0].value = "Jane Doe".to_string();

        let edited = state.edited_profile();
        assert_eq!(edited.full_name, "Jane Doe");
        assert_eq!(edited.email, "jane@clinic.org");
    }

    #[test]
    fn test_record_uploaded_selects_newest() {
        let mut state = create_state();
        state.tab = PatientTab::Upload;
        let mut records = sample_records();
        records.push(records[0].clone());

        state.record_uploaded(records);
        assert_eq!(state.selected, 3);
        assert_eq!(state.tab, PatientTab::Records);
    }

    #[test]
    fn test_render_each_tab() {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).expect("Should create terminal");
        let mut state = create_state();

        for _ in 0..3 {
            terminal
                .draw(|f| render_patient_dashboard(f, f.area(), &state))
                .expect("Should draw");
            state.next_tab();
        }

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Total records: 3"));
    }
}
