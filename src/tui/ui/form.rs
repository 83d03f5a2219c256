//! Text form state and rendering shared by every input screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::tui::styles::MedicalTheme;

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub hint: &'static str,
    pub value: String,
    /// Rendered as bullets (passwords).
    pub masked: bool,
    pub read_only: bool,
}

impl FormField {
    #[must_use]
    pub fn new(label: &'static str, hint: &'static str) -> Self {
        Self {
            label,
            hint,
            value: String::new(),
            masked: false,
            read_only: false,
        }
    }

    #[must_use]
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    fn display_value(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// Submit lifecycle of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    /// A delayed submission is in flight; input is locked.
    Submitting,
}

/// Editable form state
#[derive(Debug, Clone)]
pub struct FormState {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
    pub status: FormStatus,
}

impl FormState {
    #[must_use]
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            selected_field: 0,
            error_message: None,
            status: FormStatus::Idle,
        }
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.selected_field = (self.selected_field + 1) % self.fields.len();
        }
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    fn editable_field(&mut self) -> Option<&mut FormField> {
        if self.is_submitting() {
            return None;
        }
        self.fields
            .get_mut(self.selected_field)
            .filter(|field| !field.read_only)
    }

    /// Add a character to the current field
    pub fn input_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        if let Some(field) = self.editable_field() {
            field.value.push(c);
            self.error_message = None;
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        if let Some(field) = self.editable_field() {
            field.value.pop();
        }
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        if let Some(field) = self.editable_field() {
            field.value.clear();
        }
    }

    #[must_use]
    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", |f| f.value.as_str())
    }

    /// Trimmed value, the way submitted text is read.
    #[must_use]
    pub fn trimmed(&self, index: usize) -> String {
        self.value(index).trim().to_string()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub fn begin_submit(&mut self) {
        self.status = FormStatus::Submitting;
        self.error_message = None;
    }

    pub fn finish_submit(&mut self, error: Option<String>) {
        self.status = FormStatus::Idle;
        self.error_message = error;
    }

    /// Wipe all field buffers from memory and clear values.
    pub fn clear_sensitive(&mut self) {
        for field in &mut self.fields {
            field.value.zeroize();
        }
        self.error_message = None;
        self.selected_field = 0;
        self.status = FormStatus::Idle;
    }
}

/// Render fields stacked in `columns` columns.
pub fn render_form_fields(f: &mut Frame, area: Rect, state: &FormState, columns: usize) {
    let columns = columns.max(1);
    let per_column = state.fields.len().div_ceil(columns);
    if per_column == 0 {
        return;
    }

    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
        .split(area);

    for (col, chunk) in state.fields.chunks(per_column).enumerate() {
        render_field_column(f, areas[col], chunk, col * per_column, state);
    }
}

fn render_field_column(
    f: &mut Frame,
    area: Rect,
    fields: &[FormField],
    offset: usize,
    state: &FormState,
) {
    let field_height = 3;
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        let is_selected = offset + i == state.selected_field;
        let border_style = if is_selected {
            MedicalTheme::border_focused()
        } else {
            MedicalTheme::border()
        };

        let title_style = if is_selected {
            MedicalTheme::focused()
        } else {
            MedicalTheme::text_secondary()
        };

        let title = if field.read_only {
            format!(" {} (read-only) ", field.label)
        } else {
            format!(" {} ", field.label)
        };

        let block = Block::default()
            .title(Span::styled(title, title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value_display = if field.value.is_empty() {
            Span::styled(field.hint, MedicalTheme::text_muted())
        } else if field.read_only {
            Span::styled(field.display_value(), MedicalTheme::text_secondary())
        } else {
            Span::styled(field.display_value(), MedicalTheme::text())
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            value_display,
            if is_selected && !field.read_only && !state.is_submitting() {
                Span::styled("▌", MedicalTheme::cursor())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, chunks[i]);
    }
}
