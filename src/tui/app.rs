//! Main TUI application state machine.
//!
//! Handles:
//! - Route navigation and role guards
//! - Input event handling
//! - Delayed submissions that are cancelled when their view goes away

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::sqlite::SqliteStore;
use crate::application::{AppState, Operation};
use crate::config::AppConfig;
use crate::domain::{
    Credentials, PatientProfile, RecordDraft, Registration, Role, User, ValidationError,
};
use crate::VerolixError;

use super::router::Route;
use super::ui::{
    doctor::{render_doctor_dashboard, DoctorDashboardState, DoctorFocus},
    form::{FormState, FormStatus},
    landing::{render_landing, LandingState, LandingTab},
    pages::{render_about, render_contact, render_download, render_not_found, ContactState},
    patient::{render_patient_dashboard, PatientDashboardState, PatientTab},
    records::{render_my_records, MyRecordsState},
    render_footer, render_header, render_path_prompt, KeyHint, Toast,
};
use super::worker::{DelayedTask, DelayedTaskHandle, TaskPoll};

/// A form submit waiting out its simulated latency.
enum Submission {
    Login { role: Role, credentials: Credentials },
    Register(Registration),
    Upload(RecordDraft),
    SaveProfile(PatientProfile),
    FindPatient(String),
}

impl Submission {
    fn operation(&self) -> Operation {
        match self {
            Self::Login { .. } => Operation::Login,
            Self::Register(_) => Operation::Register,
            Self::Upload(_) => Operation::UploadRecord,
            Self::SaveProfile(_) => Operation::SaveProfile,
            Self::FindPatient(_) => Operation::FindPatient,
        }
    }
}

/// Main application state
pub struct App {
    /// Stores shared by every view
    state: AppState<SqliteStore>,

    /// Current route
    route: Route,

    /// Session as of the last navigation
    session: Option<User>,

    /// Whether the app should quit
    should_quit: bool,

    landing: LandingState,
    patient: Option<PatientDashboardState>,
    doctor: Option<DoctorDashboardState>,
    my_records: MyRecordsState,
    contact: ContactState,

    /// Current notification
    toast: Option<Toast>,

    /// Pending delayed submission (if any)
    pending: Option<DelayedTaskHandle<Submission>>,

    /// Path being typed into the go-to prompt
    path_prompt: Option<String>,
}

impl App {
    /// Create the application over the configured database.
    ///
    /// # Errors
    /// Returns error if storage cannot be opened.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let state = AppState::open(config)
            .with_context(|| format!("Failed to open database at {:?}", config.db_path))?;
        Ok(Self::with_state(state))
    }

    /// Create application with an injected state context (Composition Root pattern).
    #[must_use]
    pub fn with_state(state: AppState<SqliteStore>) -> Self {
        let mut app = Self {
            state,
            route: Route::Home,
            session: None,
            should_quit: false,
            landing: LandingState::default(),
            patient: None,
            doctor: None,
            my_records: MyRecordsState::default(),
            contact: ContactState::default(),
            toast: None,
            pending: None,
            path_prompt: None,
        };
        app.session = app.load_session();
        app
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        // Leaving the app tears down every view.
        self.cancel_pending();

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.tick();

            terminal.draw(|f| self.render(f))?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Current route.
    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Whether a delayed submission is in flight.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deliver elapsed submissions and expire the toast.
    pub fn tick(&mut self) {
        self.poll_pending();
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// Draw the whole screen.
    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(f.area());

        render_header(f, chunks[0], &self.route, self.session.as_ref());

        let content = chunks[1];
        match &self.route {
            Route::Home => render_landing(f, content, &self.landing),
            Route::PatientDashboard => {
                if let Some(patient) = &self.patient {
                    render_patient_dashboard(f, content, patient);
                }
            }
            Route::DoctorDashboard => {
                if let Some(doctor) = &self.doctor {
                    render_doctor_dashboard(f, content, doctor);
                }
            }
            Route::MyRecords => render_my_records(f, content, &self.my_records),
            Route::About => render_about(f, content),
            Route::Contact => render_contact(f, content, &self.contact),
            Route::Download => render_download(f, content),
            Route::NotFound(path) => render_not_found(f, content, path),
        }

        match &self.path_prompt {
            Some(input) => render_path_prompt(f, chunks[2], input),
            None => render_footer(
                f,
                chunks[2],
                self.toast.as_ref(),
                self.pending.as_ref().map(DelayedTaskHandle::progress),
                self.key_hints(),
            ),
        }
    }

    fn key_hints(&self) -> &'static [KeyHint] {
        match self.route {
            Route::Home => &[("Tab", "Switch tab"), ("↑↓", "Field"), ("Enter", "Submit")],
            Route::PatientDashboard => &[
                ("Tab", "Switch tab"),
                ("↑↓", "Navigate"),
                ("Enter", "Submit"),
            ],
            Route::DoctorDashboard => &[
                ("Enter", "Search/Open"),
                ("↑↓", "Navigate"),
                ("←→", "Search/Recent"),
                ("Tab", "Records/Timeline"),
                ("Esc", "Close patient"),
            ],
            Route::MyRecords => &[("↑↓", "Select"), ("Esc", "Clear search")],
            Route::Contact => &[("↑↓", "Field"), ("Enter", "Send")],
            Route::About | Route::Download | Route::NotFound(_) => &[("F1", "Home")],
        }
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    fn load_session(&self) -> Option<User> {
        match self.state.sessions.current() {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read session");
                None
            }
        }
    }

    /// Go to `route`, tearing down the current view.
    ///
    /// Any pending submission is cancelled first. Dashboards without a
    /// matching session redirect home.
    pub fn navigate(&mut self, route: Route) {
        self.cancel_pending();
        self.session = self.load_session();

        let target = route.clone().guard(self.session.as_ref());
        if target != route {
            tracing::info!(requested = %route, "Redirected by role guard");
        }

        self.patient = None;
        self.doctor = None;

        let entered = match &target {
            Route::Home => {
                self.landing = LandingState::default();
                Ok(())
            }
            Route::PatientDashboard => self.enter_patient_dashboard(),
            Route::DoctorDashboard => self.enter_doctor_dashboard(),
            Route::MyRecords => {
                self.my_records = MyRecordsState::default();
                self.refresh_search();
                Ok(())
            }
            Route::Contact => {
                self.contact = ContactState::default();
                Ok(())
            }
            Route::About | Route::Download | Route::NotFound(_) => Ok(()),
        };

        match entered {
            Ok(()) => {
                tracing::debug!(route = %target, "Navigated");
                self.route = target;
            }
            Err(e) => {
                self.show_error(&e);
                self.landing = LandingState::default();
                self.route = Route::Home;
            }
        }
    }

    fn enter_patient_dashboard(&mut self) -> Result<(), VerolixError> {
        let Some(user) = self.session.clone() else {
            return Ok(());
        };
        let records = self.state.records.ensure_seeded()?;
        let profile = self.state.profiles.load(&user)?;
        self.patient = Some(PatientDashboardState::new(user, records, profile));
        Ok(())
    }

    fn enter_doctor_dashboard(&mut self) -> Result<(), VerolixError> {
        let Some(user) = self.session.clone() else {
            return Ok(());
        };
        let recent = self.state.lookup.recent()?;
        self.doctor = Some(DoctorDashboardState::new(user, recent));
        Ok(())
    }

    fn logout(&mut self) {
        if self.session.is_none() {
            return;
        }
        match self.state.sessions.logout() {
            Ok(()) => self.toast = Some(Toast::info("You have been signed out")),
            Err(e) => {
                self.show_error(&e);
            }
        }
        self.navigate(Route::Home);
    }

    // ---------------------------------------------------------------------
    // Delayed submissions
    // ---------------------------------------------------------------------

    fn submit(&mut self, submission: Submission) {
        let operation = submission.operation();
        let delay = self.state.latency(operation);
        tracing::debug!(
            ?operation,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "Submission scheduled"
        );
        self.pending = Some(DelayedTask::spawn(delay, submission));
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
            tracing::debug!("Pending submission cancelled");
            self.reset_submitting();
        }
    }

    fn poll_pending(&mut self) {
        let Some(handle) = self.pending.as_ref() else {
            return;
        };

        match handle.poll() {
            TaskPoll::Pending => {}
            TaskPoll::Elapsed(submission) => {
                self.pending = None;
                self.apply(submission);
            }
            TaskPoll::Gone => {
                self.pending = None;
                self.reset_submitting();
            }
        }
    }

    fn reset_submitting(&mut self) {
        for form in [&mut self.landing.login, &mut self.landing.register] {
            unlock(form);
        }
        if let Some(patient) = self.patient.as_mut() {
            unlock(&mut patient.upload.form);
            unlock(&mut patient.profile_form);
        }
        if let Some(doctor) = self.doctor.as_mut() {
            doctor.status = FormStatus::Idle;
        }
    }

    /// Run the store operation for an elapsed submission.
    fn apply(&mut self, submission: Submission) {
        match submission {
            Submission::Login { role, credentials } => {
                match self.state.sessions.login(role, &credentials) {
                    Ok(user) => {
                        self.landing.login.clear_sensitive();
                        self.toast = Some(Toast::success(
                            "Login successful! Welcome to Verolix Health.",
                        ));
                        self.navigate(Route::dashboard_for(user.role));
                    }
                    Err(e) => {
                        let message = self.show_error(&e);
                        self.landing.login.finish_submit(Some(message));
                    }
                }
            }
            Submission::Register(registration) => {
                match self.state.sessions.register(&registration) {
                    Ok(user) => {
                        self.landing.register.clear_sensitive();
                        let patient_id = user
                            .patient_id
                            .as_ref()
                            .map(ToString::to_string)
                            .unwrap_or_default();
                        self.toast = Some(Toast::success(format!(
                            "Account created! Your Patient ID is {patient_id}"
                        )));
                        self.navigate(Route::PatientDashboard);
                    }
                    Err(e) => {
                        let message = self.show_error(&e);
                        self.landing.register.finish_submit(Some(message));
                    }
                }
            }
            Submission::Upload(draft) => {
                let result = self
                    .state
                    .records
                    .add(draft)
                    .and_then(|_| self.state.records.list());
                match result {
                    Ok(records) => {
                        if let Some(patient) = self.patient.as_mut() {
                            patient.upload.form.finish_submit(None);
                            patient.record_uploaded(records);
                        }
                        self.toast = Some(Toast::success("Record uploaded successfully!"));
                    }
                    Err(e) => {
                        let message = self.show_error(&e);
                        if let Some(patient) = self.patient.as_mut() {
                            patient.upload.form.finish_submit(Some(message));
                        }
                    }
                }
            }
            Submission::SaveProfile(profile) => {
                let Some(user) = self.session.clone() else {
                    return;
                };
                match self.state.profiles.save(&user, profile) {
                    Ok(saved) => {
                        if let Some(patient) = self.patient.as_mut() {
                            patient.profile_saved(saved);
                        }
                        self.toast = Some(Toast::success("Profile updated successfully!"));
                    }
                    Err(e) => {
                        let message = self.show_error(&e);
                        if let Some(patient) = self.patient.as_mut() {
                            patient.profile_form.finish_submit(Some(message));
                        }
                    }
                }
            }
            Submission::FindPatient(raw) => {
                let result = self
                    .state
                    .lookup
                    .find_patient(&raw)
                    .and_then(|snapshot| Ok((snapshot, self.state.lookup.recent()?)));
                match result {
                    Ok((snapshot, recent)) => {
                        if let Some(doctor) = self.doctor.as_mut() {
                            doctor.status = FormStatus::Idle;
                            doctor.recent = recent;
                            doctor.open(snapshot);
                        }
                        self.toast = Some(Toast::success(format!("Patient {raw} found")));
                    }
                    Err(e) => {
                        self.show_error(&e);
                        if let Some(doctor) = self.doctor.as_mut() {
                            doctor.status = FormStatus::Idle;
                        }
                    }
                }
            }
        }
    }

    /// Log `err`, raise a toast and return the text shown.
    fn show_error(&mut self, err: &VerolixError) -> String {
        let message = if err.is_user_facing() {
            tracing::info!(error = %err, "Request rejected");
            err.to_string()
        } else {
            tracing::error!(error = %err, "Operation failed");
            "Something went wrong. Please try again.".to_string()
        };
        self.toast = Some(Toast::error(message.clone()));
        message
    }

    fn reject(&mut self, err: ValidationError) -> String {
        self.show_error(&VerolixError::from(err))
    }

    // ---------------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------------

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.path_prompt.is_some() {
            self.handle_path_prompt_key(key);
            return;
        }

        if key == KeyCode::Char('g') && modifiers.contains(KeyModifiers::CONTROL) {
            self.path_prompt = Some(String::new());
            return;
        }

        match key {
            KeyCode::F(1) => self.navigate(Route::Home),
            KeyCode::F(2) => match self.session.as_ref().map(|u| u.role) {
                Some(role) => self.navigate(Route::dashboard_for(role)),
                None => self.toast = Some(Toast::info("Sign in to open your dashboard")),
            },
            KeyCode::F(3) => self.navigate(Route::MyRecords),
            KeyCode::F(4) => self.navigate(Route::About),
            KeyCode::F(5) => self.navigate(Route::Contact),
            KeyCode::F(6) => self.navigate(Route::Download),
            KeyCode::F(10) => self.logout(),
            _ => match self.route {
                Route::Home => self.handle_landing_key(key),
                Route::PatientDashboard => self.handle_patient_key(key),
                Route::DoctorDashboard => self.handle_doctor_key(key),
                Route::MyRecords => self.handle_my_records_key(key),
                Route::Contact => self.handle_contact_key(key),
                Route::About | Route::Download | Route::NotFound(_) => {}
            },
        }
    }

    fn handle_path_prompt_key(&mut self, key: KeyCode) {
        let Some(input) = self.path_prompt.as_mut() else {
            return;
        };
        match key {
            KeyCode::Esc => self.path_prompt = None,
            KeyCode::Enter => {
                let path = std::mem::take(input);
                self.path_prompt = None;
                self.navigate(Route::parse(&path));
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) => input.push(c),
            _ => {}
        }
    }

    fn handle_landing_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Tab => self.landing.next_tab(),
            KeyCode::Enter => self.submit_landing(),
            other => edit_form(self.landing.active_form_mut(), other),
        }
    }

    fn submit_landing(&mut self) {
        if self.pending.is_some() {
            return;
        }
        match self.landing.tab {
            LandingTab::PatientLogin | LandingTab::DoctorLogin => {
                let role = self.landing.tab.login_role().unwrap_or(Role::Patient);
                let credentials = self.landing.credentials();
                if let Err(e) = credentials.validate() {
                    let message = self.reject(e);
                    self.landing.login.error_message = Some(message);
                    return;
                }
                self.landing.login.begin_submit();
                self.submit(Submission::Login { role, credentials });
            }
            LandingTab::Register => {
                let registration = self.landing.registration();
                if let Err(e) = registration.validate() {
                    let message = self.reject(e);
                    self.landing.register.error_message = Some(message);
                    return;
                }
                self.landing.register.begin_submit();
                self.submit(Submission::Register(registration));
            }
            LandingTab::Bmi => self.landing.calculate_bmi(),
        }
    }

    fn handle_patient_key(&mut self, key: KeyCode) {
        let Some(patient) = self.patient.as_mut() else {
            return;
        };

        match (patient.tab, key) {
            (_, KeyCode::Tab) => patient.next_tab(),
            (PatientTab::Records, KeyCode::Down) => patient.select_next(),
            (PatientTab::Records, KeyCode::Up) => patient.select_prev(),
            (PatientTab::Records, _) => {}
            (PatientTab::Upload, KeyCode::Left) => patient.upload.prev_kind(),
            (PatientTab::Upload, KeyCode::Right) => patient.upload.next_kind(),
            (PatientTab::Upload, KeyCode::Enter) => self.submit_upload(),
            (PatientTab::Upload, other) => edit_form(&mut patient.upload.form, other),
            (PatientTab::Profile, KeyCode::Enter) => self.submit_profile(),
            (PatientTab::Profile, other) => edit_form(&mut patient.profile_form, other),
        }
    }

    fn submit_upload(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let Some(draft) = self.patient.as_ref().map(|p| p.upload.draft()) else {
            return;
        };
        if let Err(e) = draft.validate() {
            let message = self.reject(e);
            if let Some(patient) = self.patient.as_mut() {
                patient.upload.form.error_message = Some(message);
            }
            return;
        }
        if let Some(patient) = self.patient.as_mut() {
            patient.upload.form.begin_submit();
        }
        self.submit(Submission::Upload(draft));
    }

    fn submit_profile(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let Some(patient) = self.patient.as_mut() else {
            return;
        };
        let profile = patient.edited_profile();
        patient.profile_form.begin_submit();
        self.submit(Submission::SaveProfile(profile));
    }

    fn handle_doctor_key(&mut self, key: KeyCode) {
        let Some(doctor) = self.doctor.as_mut() else {
            return;
        };

        match key {
            KeyCode::Esc => doctor.close(),
            KeyCode::Left | KeyCode::Right | KeyCode::BackTab => doctor.toggle_focus(),
            KeyCode::Tab if doctor.current.is_some() => doctor.tab = doctor.tab.toggle(),
            KeyCode::Down if doctor.focus == DoctorFocus::Search && doctor.current.is_some() => {
                doctor.select_next_record();
            }
            KeyCode::Up if doctor.focus == DoctorFocus::Search && doctor.current.is_some() => {
                doctor.select_prev_record();
            }
            KeyCode::Down => doctor.focus_down(),
            KeyCode::Up => doctor.focus_up(),
            KeyCode::Enter => match doctor.focus {
                DoctorFocus::Recent => doctor.open_selected_recent(),
                DoctorFocus::Search => self.submit_lookup(),
            },
            KeyCode::Backspace if doctor.focus == DoctorFocus::Search => doctor.delete_char(),
            KeyCode::Char(c) if doctor.focus == DoctorFocus::Search => doctor.input_char(c),
            _ => {}
        }
    }

    fn submit_lookup(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let Some(raw) = self.doctor.as_ref().map(|d| d.input.trim().to_string()) else {
            return;
        };
        if raw.is_empty() {
            self.reject(ValidationError::EmptyPatientId);
            return;
        }
        if let Some(doctor) = self.doctor.as_mut() {
            doctor.status = FormStatus::Submitting;
        }
        self.submit(Submission::FindPatient(raw));
    }

    fn handle_my_records_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Down => self.my_records.select_next(),
            KeyCode::Up => self.my_records.select_prev(),
            KeyCode::Esc => {
                self.my_records.query.clear();
                self.refresh_search();
            }
            KeyCode::Backspace => {
                self.my_records.query.pop();
                self.refresh_search();
            }
            KeyCode::Char(c) => {
                self.my_records.query.push(c);
                self.refresh_search();
            }
            _ => {}
        }
    }

    fn refresh_search(&mut self) {
        match self.state.records.search(&self.my_records.query) {
            Ok(results) => self.my_records.set_results(results),
            Err(e) => {
                self.show_error(&e);
            }
        }
    }

    fn handle_contact_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                if let Some(message) = self.contact.submit() {
                    tracing::info!(
                        length = message.message.chars().count(),
                        "Contact message submitted"
                    );
                }
            }
            other => edit_form(&mut self.contact.form, other),
        }
    }
}

/// Shared text-editing keys for forms.
fn edit_form(form: &mut FormState, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::BackTab => form.prev_field(),
        KeyCode::Down => form.next_field(),
        KeyCode::Char(c) => form.input_char(c),
        KeyCode::Backspace => form.delete_char(),
        KeyCode::Delete => form.clear_field(),
        _ => {}
    }
}

fn unlock(form: &mut FormState) {
    if form.is_submitting() {
        form.finish_submit(None);
    }
}
