//! Landing page: sign-in tabs and the BMI calculator.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::{BmiReading, Credentials, Registration, Role};
use crate::tui::styles::MedicalTheme;

use super::form::{render_form_fields, FormField, FormState};
use super::{render_tabs, render_title};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LandingTab {
    #[default]
    PatientLogin,
    DoctorLogin,
    Register,
    Bmi,
}

impl LandingTab {
    const ALL: [LandingTab; 4] = [
        Self::PatientLogin,
        Self::DoctorLogin,
        Self::Register,
        Self::Bmi,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::PatientLogin => "Patient Login",
            Self::DoctorLogin => "Doctor Login",
            Self::Register => "Register",
            Self::Bmi => "BMI Calculator",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Role a login from this tab signs in as.
    #[must_use]
    pub fn login_role(self) -> Option<Role> {
        match self {
            Self::PatientLogin => Some(Role::Patient),
            Self::DoctorLogin => Some(Role::Doctor),
            Self::Register | Self::Bmi => None,
        }
    }
}

const LOGIN_EMAIL: usize = 0;
const LOGIN_PASSWORD: usize = 1;
const REGISTER_NAME: usize = 0;
const REGISTER_EMAIL: usize = 1;
const REGISTER_PASSWORD: usize = 2;
const BMI_HEIGHT: usize = 0;
const BMI_WEIGHT: usize = 1;

/// Landing screen state
#[derive(Debug, Clone)]
pub struct LandingState {
    pub tab: LandingTab,
    pub login: FormState,
    pub register: FormState,
    pub bmi: FormState,
    pub bmi_result: Option<BmiReading>,
}

impl Default for LandingState {
    fn default() -> Self {
        Self {
            tab: LandingTab::default(),
            login: FormState::new(vec![
                FormField::new("Email", "you@example.com"),
                FormField::new("Password", "your password").masked(),
            ]),
            register: FormState::new(vec![
                FormField::new("Full Name", "Jane Doe"),
                FormField::new("Email", "you@example.com"),
                FormField::new("Password", "at least 6 characters").masked(),
            ]),
            bmi: FormState::new(vec![
                FormField::new("Height", "cm"),
                FormField::new("Weight", "kg"),
            ]),
            bmi_result: None,
        }
    }
}

impl LandingState {
    /// The form behind the active tab.
    pub fn active_form_mut(&mut self) -> &mut FormState {
        match self.tab {
            LandingTab::PatientLogin | LandingTab::DoctorLogin => &mut self.login,
            LandingTab::Register => &mut self.register,
            LandingTab::Bmi => &mut self.bmi,
        }
    }

    #[must_use]
    pub fn active_form(&self) -> &FormState {
        match self.tab {
            LandingTab::PatientLogin | LandingTab::DoctorLogin => &self.login,
            LandingTab::Register => &self.register,
            LandingTab::Bmi => &self.bmi,
        }
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.login.is_submitting() || self.register.is_submitting()
    }

    /// Switch tabs unless a submission is in flight.
    pub fn next_tab(&mut self) {
        if !self.is_submitting() {
            self.tab = self.tab.next();
        }
    }

    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.login.trimmed(LOGIN_EMAIL),
            self.login.value(LOGIN_PASSWORD),
        )
    }

    #[must_use]
    pub fn registration(&self) -> Registration {
        Registration::new(
            self.register.trimmed(REGISTER_NAME),
            self.register.trimmed(REGISTER_EMAIL),
            self.register.value(REGISTER_PASSWORD),
        )
    }

    /// Compute the BMI from the calculator fields.
    pub fn calculate_bmi(&mut self) {
        let height = self.bmi.trimmed(BMI_HEIGHT).parse::<f64>().ok();
        let weight = self.bmi.trimmed(BMI_WEIGHT).parse::<f64>().ok();

        self.bmi_result = height
            .zip(weight)
            .and_then(|(h, w)| BmiReading::compute(h, w));
        self.bmi.error_message = self
            .bmi_result
            .is_none()
            .then(|| "Please enter a valid height and weight".to_string());
    }
}

/// Render the landing page
pub fn render_landing(f: &mut Frame, area: Rect, state: &LandingState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_title(
        f,
        chunks[0],
        "Welcome to Verolix",
        "Your personal health companion",
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .margin(1)
        .split(chunks[1]);

    render_features(f, columns[0]);
    render_auth_panel(f, columns[1], state);
}

fn render_features(f: &mut Frame, area: Rect) {
    let features = [
        ("Schedule Appointments", "Book and manage your medical appointments with ease."),
        ("Access Medical Records", "View and share your complete medical history securely."),
        ("Connect with Doctors", "Communicate directly with your healthcare providers."),
        ("BMI Calculator", "Instantly calculate your Body Mass Index."),
    ];

    let mut lines = vec![Line::from(Span::styled(
        "Your health, in one place",
        MedicalTheme::subtitle(),
    ))];
    for (title, desc) in features {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(title, MedicalTheme::text())));
        lines.push(Line::from(Span::styled(desc, MedicalTheme::text_secondary())));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_auth_panel(f: &mut Frame, area: Rect, state: &LandingState) {
    let form = state.active_form();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3 * form.fields.len() as u16),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(area);

    let labels: Vec<&str> = LandingTab::ALL.iter().map(|t| t.label()).collect();
    render_tabs(f, chunks[0], &labels, state.tab.index());

    render_form_fields(f, chunks[2], form, 1);

    let status = if form.is_submitting() {
        Line::from(Span::styled(" Submitting…", MedicalTheme::info()))
    } else if let Some(err) = &form.error_message {
        Line::from(vec![
            Span::styled(" ! ", MedicalTheme::danger()),
            Span::styled(err.clone(), MedicalTheme::danger()),
        ])
    } else {
        let action = match state.tab {
            LandingTab::PatientLogin | LandingTab::DoctorLogin => "Sign in",
            LandingTab::Register => "Create account",
            LandingTab::Bmi => "Calculate",
        };
        Line::from(vec![
            Span::styled(" [Enter] ", MedicalTheme::key_hint()),
            Span::styled(action, MedicalTheme::key_desc()),
        ])
    };
    f.render_widget(Paragraph::new(status), chunks[3]);

    if state.tab == LandingTab::Bmi {
        if let Some(reading) = state.bmi_result {
            let category = reading.category();
            let result = Paragraph::new(vec![
                Line::from(vec![
                    Span::styled(" Your BMI: ", MedicalTheme::text_secondary()),
                    Span::styled(format!("{:.1}", reading.value), MedicalTheme::title()),
                ]),
                Line::from(vec![
                    Span::styled(" Category: ", MedicalTheme::text_secondary()),
                    Span::styled(category.to_string(), MedicalTheme::bmi(category)),
                ]),
            ]);
            f.render_widget(result, chunks[4]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BmiCategory;
    use ratatui::{backend::TestBackend, Terminal};

    fn type_into(form: &mut FormState, text: &str) {
        for c in text.chars() {
            form.input_char(c);
        }
    }

    #[test]
    fn test_tabs_cycle_and_role() {
        let mut state = LandingState::default();
        assert_eq!(state.tab.login_role(), Some(Role::Patient));
        state.next_tab();
        assert_eq!(state.tab.login_role(), Some(Role::Doctor));
        state.next_tab();
        assert_eq!(state.tab, LandingTab::Register);
        state.next_tab();
        state.next_tab();
        assert_eq!(state.tab, LandingTab::PatientLogin);
    }

    #[test]
    fn test_tab_locked_while_submitting() {
        let mut state = LandingState::default();
        state.login.begin_submit();
        state.next_tab();
        assert_eq!(state.tab, LandingTab::PatientLogin);
    }

    #[test]
    fn test_credentials_trim_email() {
        let mut state = LandingState::default();
        type_into(&mut state.login, " jane@clinic.org ");
        state.login.next_field();
        type_into(&mut state.login, "secret1");

        let credentials = state.credentials();
        assert_eq!(credentials.email, "jane@clinic.org");
        assert_eq!(credentials.password.as_str(), "secret1");
    }

    #[test]
    fn test_bmi_calculation() {
        let mut state = LandingState::default();
        state.tab = LandingTab::Bmi;
        type_into(state.active_form_mut(), "180");
        state.active_form_mut().next_field();
        type_into(state.active_form_mut(), "81");
        state.calculate_bmi();

        let reading = state.bmi_result.expect("Should compute");
        assert!((reading.value - 25.0).abs() < f64::EPSILON);
        assert_eq!(reading.category(), BmiCategory::Overweight);
    }

    #[test]
    fn test_bmi_rejects_garbage() {
        let mut state = LandingState::default();
        state.tab = LandingTab::Bmi;
        type_into(state.active_form_mut(), "abc");
        state.calculate_bmi();
        assert!(state.bmi_result.is_none());
        assert!(state.bmi.error_message.is_some());
    }

    #[test]
    fn test_render_smoke() {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).expect("Should create terminal");
        let state = LandingState::default();
        terminal
            .draw(|f| render_landing(f, f.area(), &state))
            .expect("Should draw");

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Welcome to Verolix"));
        assert!(text.contains("Patient Login"));
    }
}
