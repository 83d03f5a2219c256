//! Doctor dashboard: patient lookup, recent patients, records and timeline.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::domain::record::timeline;
use crate::domain::{PatientSnapshot, User};
use crate::tui::styles::MedicalTheme;

use super::form::FormStatus;
use super::records::{render_record_detail, render_record_list};
use super::{render_tabs, render_title};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoctorTab {
    #[default]
    Records,
    Timeline,
}

impl DoctorTab {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Records => Self::Timeline,
            Self::Timeline => Self::Records,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Records => 0,
            Self::Timeline => 1,
        }
    }
}

/// Which pane receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoctorFocus {
    #[default]
    Search,
    Recent,
}

/// Doctor dashboard state
#[derive(Debug, Clone)]
pub struct DoctorDashboardState {
    pub user: User,
    pub input: String,
    pub status: FormStatus,
    pub focus: DoctorFocus,
    pub recent: Vec<PatientSnapshot>,
    pub recent_selected: usize,
    pub current: Option<PatientSnapshot>,
    pub tab: DoctorTab,
    pub record_selected: usize,
}

impl DoctorDashboardState {
    #[must_use]
    pub fn new(user: User, recent: Vec<PatientSnapshot>) -> Self {
        Self {
            user,
            input: String::new(),
            status: FormStatus::Idle,
            focus: DoctorFocus::Search,
            recent,
            recent_selected: 0,
            current: None,
            tab: DoctorTab::default(),
            record_selected: 0,
        }
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub fn input_char(&mut self, c: char) {
        if !self.is_searching() && !c.is_control() {
            self.input.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        if !self.is_searching() {
            self.input.pop();
        }
    }

    pub fn focus_down(&mut self) {
        match self.focus {
            DoctorFocus::Search if !self.recent.is_empty() => {
                self.focus = DoctorFocus::Recent;
                self.recent_selected = 0;
            }
            DoctorFocus::Recent if self.recent_selected + 1 < self.recent.len() => {
                self.recent_selected += 1;
            }
            DoctorFocus::Search | DoctorFocus::Recent => {}
        }
    }

    pub fn focus_up(&mut self) {
        if self.focus == DoctorFocus::Recent {
            if self.recent_selected == 0 {
                self.focus = DoctorFocus::Search;
            } else {
                self.recent_selected -= 1;
            }
        }
    }

    /// Jump between the search box and the recent list.
    pub fn toggle_focus(&mut self) {
        match self.focus {
            DoctorFocus::Search if !self.recent.is_empty() => {
                self.focus = DoctorFocus::Recent;
                self.recent_selected = self.recent_selected.min(self.recent.len() - 1);
            }
            DoctorFocus::Search => {}
            DoctorFocus::Recent => self.focus = DoctorFocus::Search,
        }
    }

    /// Show `snapshot` as the current patient.
    pub fn open(&mut self, snapshot: PatientSnapshot) {
        self.current = Some(snapshot);
        self.tab = DoctorTab::Records;
        self.record_selected = 0;
    }

    /// Re-open the highlighted recent patient from its stored snapshot.
    pub fn open_selected_recent(&mut self) {
        if let Some(snapshot) = self.recent.get(self.recent_selected).cloned() {
            self.open(snapshot);
        }
    }

    pub fn close(&mut self) {
        self.current = None;
        self.focus = DoctorFocus::Search;
    }

    pub fn select_next_record(&mut self) {
        let len = self.current.as_ref().map_or(0, |p| p.records.len());
        if self.record_selected + 1 < len {
            self.record_selected += 1;
        }
    }

    pub fn select_prev_record(&mut self) {
        self.record_selected = self.record_selected.saturating_sub(1);
    }
}

/// Render the doctor dashboard
pub fn render_doctor_dashboard(f: &mut Frame, area: Rect, state: &DoctorDashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_title(
        f,
        chunks[0],
        "Doctor Dashboard",
        &format!("Signed in as Dr. {}", state.user.name),
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    render_lookup_pane(f, columns[0], state);

    match &state.current {
        Some(patient) => render_patient_view(f, columns[1], state, patient),
        None => {
            let placeholder = Paragraph::new(vec![
                Line::raw(""),
                Line::from(Span::styled(
                    " Search for a patient by ID to view their records",
                    MedicalTheme::text_muted(),
                )),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(MedicalTheme::border()),
            );
            f.render_widget(placeholder, columns[1]);
        }
    }
}

fn render_lookup_pane(f: &mut Frame, area: Rect, state: &DoctorDashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let search_focused = state.focus == DoctorFocus::Search;
    let mut spans = vec![Span::raw(" ")];
    if state.input.is_empty() {
        spans.push(Span::styled("PID-12345", MedicalTheme::text_muted()));
    } else {
        spans.push(Span::styled(state.input.clone(), MedicalTheme::text()));
    }
    if search_focused && !state.is_searching() {
        spans.push(Span::styled("▌", MedicalTheme::cursor()));
    }
    let search = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(Span::styled(
                " Patient ID ",
                if search_focused {
                    MedicalTheme::focused()
                } else {
                    MedicalTheme::text_secondary()
                },
            ))
            .borders(Borders::ALL)
            .border_style(if search_focused {
                MedicalTheme::border_focused()
            } else {
                MedicalTheme::border()
            }),
    );
    f.render_widget(search, chunks[0]);

    let status = if state.is_searching() {
        Line::from(Span::styled(" Searching…", MedicalTheme::info()))
    } else {
        Line::from(vec![
            Span::styled(" [Enter] ", MedicalTheme::key_hint()),
            Span::styled("Search ", MedicalTheme::key_desc()),
            Span::styled("[↓] ", MedicalTheme::key_hint()),
            Span::styled("Recent", MedicalTheme::key_desc()),
        ])
    };
    f.render_widget(Paragraph::new(status), chunks[1]);

    let block = Block::default()
        .title(Span::styled(" Recent Patients ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(if search_focused {
            MedicalTheme::border()
        } else {
            MedicalTheme::border_focused()
        });

    if state.recent.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            " No recent patients",
            MedicalTheme::text_muted(),
        )))
        .block(block);
        f.render_widget(empty, chunks[2]);
        return;
    }

    let items: Vec<ListItem> = state
        .recent
        .iter()
        .map(|p| {
            ListItem::new(vec![
                Line::from(Span::styled(format!(" {}", p.name), MedicalTheme::text())),
                Line::from(Span::styled(
                    format!(" {} · {} records", p.patient_id, p.records.len()),
                    MedicalTheme::text_muted(),
                )),
            ])
        })
        .collect();

    let selected = (!search_focused).then_some(state.recent_selected);
    let list = List::new(items)
        .block(block)
        .highlight_style(MedicalTheme::selected());
    let mut list_state = ListState::default().with_selected(selected);
    f.render_stateful_widget(list, chunks[2], &mut list_state);
}

fn render_patient_view(
    f: &mut Frame,
    area: Rect,
    state: &DoctorDashboardState,
    patient: &PatientSnapshot,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let or_dash = |s: &str| {
        if s.is_empty() {
            "-".to_string()
        } else {
            s.to_string()
        }
    };
    let row = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!(" {label:<20}"), MedicalTheme::text_secondary()),
            Span::styled(value, MedicalTheme::text()),
        ])
    };
    let info = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(format!(" {}", patient.name), MedicalTheme::title()),
            Span::styled(format!("  {}", patient.patient_id), MedicalTheme::text_muted()),
        ]),
        row(
            "Date of Birth",
            or_dash(&patient.profile.date_of_birth),
        ),
        row("Gender", or_dash(&patient.profile.gender)),
        row(
            "Medical Conditions",
            or_dash(&patient.profile.medical_conditions),
        ),
        row("Allergies", or_dash(&patient.profile.allergies)),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(info, chunks[0]);

    render_tabs(f, chunks[1], &["Medical Records", "Timeline"], state.tab.index());

    match state.tab {
        DoctorTab::Records => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(chunks[2]);
            render_record_list(
                f,
                columns[0],
                &patient.records,
                Some(state.record_selected),
                " Medical Records ",
            );
            render_record_detail(f, columns[1], patient.records.get(state.record_selected));
        }
        DoctorTab::Timeline => render_timeline(f, chunks[2], patient),
    }
}

fn render_timeline(f: &mut Frame, area: Rect, patient: &PatientSnapshot) {
    let mut lines = Vec::new();
    for record in timeline(&patient.records) {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<11}", record.date), MedicalTheme::text_secondary()),
            Span::styled("● ", MedicalTheme::record_type(record.kind)),
            Span::styled(
                format!("{:<15}", record.kind.label()),
                MedicalTheme::record_type(record.kind),
            ),
            Span::styled(record.title.clone(), MedicalTheme::text()),
        ]));
        if let Some(doctor) = &record.doctor {
            lines.push(Line::from(Span::styled(
                format!("             │ {doctor}"),
                MedicalTheme::text_muted(),
            )));
        }
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            " No records yet",
            MedicalTheme::text_muted(),
        )));
    }

    let block = Block::default()
        .title(Span::styled(" Medical Timeline ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    f.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::sample_records;
    use crate::domain::{PatientId, Role};
    use ratatui::{backend::TestBackend, Terminal};

    fn snapshot(id: &str) -> PatientSnapshot {
        let pid = PatientId::parse(id).expect("Valid id");
        PatientSnapshot::compose(pid, sample_records(), None)
    }

    fn create_state() -> DoctorDashboardState {
        let user = User::new("house@clinic.org", "house", Role::Doctor);
        DoctorDashboardState::new(user, vec![snapshot("PID-11111"), snapshot("PID-22222")])
    }

    #[test]
    fn test_toggle_focus_keeps_open_patient() {
        let mut state = create_state();
        state.open(snapshot("PID-33333"));
        state.toggle_focus();
        assert_eq!(state.focus, DoctorFocus::Recent);
        assert!(state.current.is_some());
        state.toggle_focus();
        assert_eq!(state.focus, DoctorFocus::Search);

        let user = User::new("house@clinic.org", "house", Role::Doctor);
        let mut empty = DoctorDashboardState::new(user, Vec::new());
        empty.toggle_focus();
        assert_eq!(empty.focus, DoctorFocus::Search);
    }

    #[test]
    fn test_focus_moves_through_recent() {
        let mut state = create_state();
        state.focus_down();
        assert_eq!(state.focus, DoctorFocus::Recent);
        state.focus_down();
        state.focus_down();
        assert_eq!(state.recent_selected, 1);
        state.focus_up();
        state.focus_up();
        assert_eq!(state.focus, DoctorFocus::Search);
    }

    #[test]
    fn test_open_selected_recent() {
        let mut state = create_state();
        state.focus_down();
        state.focus_down();
        state.open_selected_recent();
        let current = state.current.as_ref().expect("Should open");
        assert_eq!(current.patient_id.as_str(), "PID-22222");
    }

    #[test]
    fn test_input_locked_while_searching() {
        let mut state = create_state();
        state.input_char('P');
        state.status = FormStatus::Submitting;
        state.input_char('I');
        state.delete_char();
        assert_eq!(state.input, "P");
    }

    #[test]
    fn test_render_timeline_newest_first() {
        let backend = TestBackend::new(140, 40);
        let mut terminal = Terminal::new(backend).expect("Should create terminal");
        let mut state = create_state();
        state.open(snapshot("PID-33333"));
        state.tab = state.tab.toggle();

        terminal
            .draw(|f| render_doctor_dashboard(f, f.area(), &state))
            .expect("Should draw");

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Patient 33333"));
        assert!(text.contains("Medical Timeline"));
        let first = text.find("Blood Test Results").expect("Lab result shown");
        let last = text.find("Annual Checkup Notes").expect("Note shown");
        // Sample notes predate the lab result.
        assert!(first < last);
    }
}
