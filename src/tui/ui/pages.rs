//! Informational pages: about, contact, download and not-found.

use std::time::{Duration, Instant};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::{ContactErrors, ContactMessage};
use crate::tui::styles::MedicalTheme;

use super::form::{FormField, FormState};
use super::render_title;

/// How long the "Message Sent" notice stays up.
pub const CONTACT_SENT_TTL: Duration = Duration::from_secs(5);

const TEAM: [(&str, &str); 5] = [
    (
        "Lakshya Raj Malviya",
        "UI/UX Designer & Team Leader, App Developer",
    ),
    ("Mitali Mehra", "UI/UX, Frontend Specialist"),
    ("Kaushik Barnwal", "Backend Developer"),
    ("Himang Sahu", "Database Engineer"),
    ("Krishna Katiyar", "Frontend Developer"),
];

fn boxed(title: &str) -> Block<'static> {
    Block::default()
        .title(Span::styled(format!(" {title} "), MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border())
}

fn split_title(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);
    (chunks[0], chunks[1])
}

pub fn render_about(f: &mut Frame, area: Rect) {
    let (title, body) = split_title(area);
    render_title(f, title, "About Verolix", "AI-powered healthcare tech");

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .margin(1)
        .split(body);

    let story = vec![
        Line::from(Span::styled("Who We Are", MedicalTheme::title())),
        Line::from(Span::styled(
            "Verolix is a personalized health companion designed to help you prevent \
             chronic conditions before they start, combining health insights, \
             real-time feedback and coaching.",
            MedicalTheme::text(),
        )),
        Line::raw(""),
        Line::from(Span::styled("Vision", MedicalTheme::title())),
        Line::from(Span::styled(
            "A society where preventive care is a daily habit, with a personal \
             health coach that evolves with everyone.",
            MedicalTheme::text(),
        )),
    ];
    f.render_widget(
        Paragraph::new(story)
            .block(boxed("Our Story"))
            .wrap(Wrap { trim: true }),
        columns[0],
    );

    let team: Vec<Line> = TEAM
        .iter()
        .flat_map(|(name, role)| {
            [
                Line::from(Span::styled(*name, MedicalTheme::text())),
                Line::from(Span::styled(*role, MedicalTheme::text_muted())),
            ]
        })
        .collect();
    f.render_widget(
        Paragraph::new(team)
            .block(boxed("Our Team"))
            .wrap(Wrap { trim: true }),
        columns[1],
    );
}

pub fn render_download(f: &mut Frame, area: Rect) {
    let (title, body) = split_title(area);
    render_title(
        f,
        title,
        "Download Verolix Mobile App",
        "Access your health records on the go",
    );

    let lines = vec![
        Line::from(vec![
            Span::styled(" Easy Access    ", MedicalTheme::title()),
            Span::styled(
                "View your medical records anytime, anywhere.",
                MedicalTheme::text_secondary(),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Secure Storage ", MedicalTheme::title()),
            Span::styled(
                "Your health data stays protected.",
                MedicalTheme::text_secondary(),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Quick Share    ", MedicalTheme::title()),
            Span::styled(
                "Share your records with healthcare providers instantly.",
                MedicalTheme::text_secondary(),
            ),
        ]),
        Line::raw(""),
        Line::from(Span::styled(
            " Available for iOS and Android.",
            MedicalTheme::info(),
        )),
    ];
    f.render_widget(Paragraph::new(lines).block(boxed("Features")), body);
}

pub fn render_not_found(f: &mut Frame, area: Rect, path: &str) {
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(" 404", MedicalTheme::danger())),
        Line::from(Span::styled(" Oops! Page not found", MedicalTheme::title())),
        Line::from(Span::styled(
            format!(" No page exists at {path}"),
            MedicalTheme::text_secondary(),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled(" [F1] ", MedicalTheme::key_hint()),
            Span::styled("Return to Home", MedicalTheme::key_desc()),
        ]),
    ];
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border()),
        ),
        area,
    );
}

const CONTACT_NAME: usize = 0;
const CONTACT_EMAIL: usize = 1;
const CONTACT_MESSAGE: usize = 2;

/// Contact page state
#[derive(Debug, Clone)]
pub struct ContactState {
    pub form: FormState,
    pub errors: ContactErrors,
    pub sent_at: Option<Instant>,
}

impl Default for ContactState {
    fn default() -> Self {
        Self {
            form: FormState::new(vec![
                FormField::new("Name", "Your name"),
                FormField::new("Email", "you@example.com"),
                FormField::new("Message", "How can we help?"),
            ]),
            errors: ContactErrors::default(),
            sent_at: None,
        }
    }
}

impl ContactState {
    #[must_use]
    pub fn message(&self) -> ContactMessage {
        ContactMessage {
            name: self.form.trimmed(CONTACT_NAME),
            email: self.form.trimmed(CONTACT_EMAIL),
            message: self.form.trimmed(CONTACT_MESSAGE),
        }
    }

    /// Validate and "send". Returns the accepted message.
    pub fn submit(&mut self) -> Option<ContactMessage> {
        let message = self.message();
        match message.validate() {
            Ok(()) => {
                self.errors = ContactErrors::default();
                self.form.clear_sensitive();
                self.sent_at = Some(Instant::now());
                Some(message)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    #[must_use]
    pub fn recently_sent(&self) -> bool {
        self.sent_at
            .is_some_and(|at| at.elapsed() < CONTACT_SENT_TTL)
    }

    fn error_for(&self, index: usize) -> Option<&'static str> {
        match index {
            CONTACT_NAME => self.errors.name,
            CONTACT_EMAIL => self.errors.email,
            CONTACT_MESSAGE => self.errors.message,
            _ => None,
        }
    }
}

pub fn render_contact(f: &mut Frame, area: Rect, state: &ContactState) {
    let (title, body) = split_title(area);
    render_title(
        f,
        title,
        "Contact Us",
        "Get in touch with our team for support or inquiries",
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .margin(1)
        .split(body);

    let details = vec![
        Line::from(Span::styled("Email", MedicalTheme::title())),
        Line::from(Span::styled("support@verolix.com", MedicalTheme::text_secondary())),
        Line::raw(""),
        Line::from(Span::styled("Phone", MedicalTheme::title())),
        Line::from(Span::styled("+91 123-456-7890", MedicalTheme::text_secondary())),
        Line::raw(""),
        Line::from(Span::styled("Address", MedicalTheme::title())),
        Line::from(Span::styled(
            "Acropolis Institute Of Technology And Research, Indore, Madhya Pradesh",
            MedicalTheme::text_secondary(),
        )),
    ];
    f.render_widget(
        Paragraph::new(details)
            .block(boxed("Reach Us"))
            .wrap(Wrap { trim: true }),
        columns[0],
    );

    if state.recently_sent() {
        let sent = Paragraph::new(vec![
            Line::from(Span::styled("Message Sent!", MedicalTheme::success())),
            Line::from(Span::styled(
                "Thank you for contacting us. We'll get back to you soon.",
                MedicalTheme::text(),
            )),
        ])
        .block(boxed("Send a Message"))
        .wrap(Wrap { trim: true });
        f.render_widget(sent, columns[1]);
        return;
    }

    render_contact_form(f, columns[1], state);
}

fn render_contact_form(f: &mut Frame, area: Rect, state: &ContactState) {
    // Each field gets its input box plus one line for its error.
    let constraints: Vec<Constraint> = state
        .form
        .fields
        .iter()
        .flat_map(|_| [Constraint::Length(3), Constraint::Length(1)])
        .chain([Constraint::Length(1), Constraint::Min(0)])
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in state.form.fields.iter().enumerate() {
        let focused = i == state.form.selected_field;
        let mut spans = vec![Span::raw(" ")];
        if field.value.is_empty() {
            spans.push(Span::styled(field.hint, MedicalTheme::text_muted()));
        } else {
            spans.push(Span::styled(field.value.clone(), MedicalTheme::text()));
        }
        if focused {
            spans.push(Span::styled("▌", MedicalTheme::cursor()));
        }
        let input = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title(Span::styled(
                    format!(" {} ", field.label),
                    if focused {
                        MedicalTheme::focused()
                    } else {
                        MedicalTheme::text_secondary()
                    },
                ))
                .borders(Borders::ALL)
                .border_style(if focused {
                    MedicalTheme::border_focused()
                } else {
                    MedicalTheme::border()
                }),
        );
        f.render_widget(input, rows[i * 2]);

        if let Some(err) = state.error_for(i) {
            f.render_widget(
                Paragraph::new(Span::styled(format!(" {err}"), MedicalTheme::danger())),
                rows[i * 2 + 1],
            );
        }
    }

    let hint = Line::from(vec![
        Span::styled(" [↑↓] ", MedicalTheme::key_hint()),
        Span::styled("Navigate ", MedicalTheme::key_desc()),
        Span::styled("[Enter] ", MedicalTheme::key_hint()),
        Span::styled("Send Message", MedicalTheme::key_desc()),
    ]);
    f.render_widget(Paragraph::new(hint), rows[state.form.fields.len() * 2]);
}
