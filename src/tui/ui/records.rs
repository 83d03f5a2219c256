//! Record list widgets and the searchable "My Records" page.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::domain::MedicalRecord;
use crate::tui::styles::MedicalTheme;

use super::render_title;

/// "My Records" page state
#[derive(Debug, Clone, Default)]
pub struct MyRecordsState {
    pub query: String,
    /// Current search results.
    pub results: Vec<MedicalRecord>,
    pub selected: usize,
}

impl MyRecordsState {
    pub fn set_results(&mut self, results: Vec<MedicalRecord>) {
        self.results = results;
        self.selected = self.selected.min(self.results.len().saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.results.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    #[must_use]
    pub fn selected_record(&self) -> Option<&MedicalRecord> {
        self.results.get(self.selected)
    }
}

/// Render the "My Records" page
pub fn render_my_records(f: &mut Frame, area: Rect, state: &MyRecordsState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    render_title(
        f,
        chunks[0],
        "My Records",
        "Search your medical history",
    );

    let search = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        if state.query.is_empty() {
            Span::styled("title, doctor, details or file name", MedicalTheme::text_muted())
        } else {
            Span::styled(state.query.clone(), MedicalTheme::text())
        },
        Span::styled("▌", MedicalTheme::cursor()),
    ]))
    .block(
        Block::default()
            .title(Span::styled(" Search ", MedicalTheme::focused()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border_focused()),
    );
    f.render_widget(search, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    let title = format!(" Results ({}) ", state.results.len());
    render_record_list(f, body[0], &state.results, Some(state.selected), &title);
    render_record_detail(f, body[1], state.selected_record());
}

/// One line per record: type badge, title and date.
pub fn render_record_list(
    f: &mut Frame,
    area: Rect,
    records: &[MedicalRecord],
    selected: Option<usize>,
    title: &str,
) {
    let block = Block::default()
        .title(Span::styled(title.to_string(), MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    if records.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            " No records found",
            MedicalTheme::text_muted(),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = records
        .iter()
        .map(|record| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:<15}", record.kind.label()),
                    MedicalTheme::record_type(record.kind),
                ),
                Span::styled(record.title.clone(), MedicalTheme::text()),
                Span::styled(format!("  {}", record.date), MedicalTheme::text_muted()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(MedicalTheme::selected());
    let mut list_state = ListState::default().with_selected(selected);
    f.render_stateful_widget(list, area, &mut list_state);
}

/// Full detail of one record.
pub fn render_record_detail(f: &mut Frame, area: Rect, record: Option<&MedicalRecord>) {
    let block = Block::default()
        .title(Span::styled(" Details ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let Some(record) = record else {
        f.render_widget(block, area);
        return;
    };

    let row = |label: &'static str, value: &str| {
        Line::from(vec![
            Span::styled(format!(" {label:<10}"), MedicalTheme::text_secondary()),
            Span::styled(value.to_string(), MedicalTheme::text()),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", record.title),
            MedicalTheme::title(),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled(format!(" {:<10}", "Type"), MedicalTheme::text_secondary()),
            Span::styled(record.kind.label(), MedicalTheme::record_type(record.kind)),
        ]),
        row("Date", &record.date),
        row("Doctor", record.doctor.as_deref().unwrap_or("-")),
        row("File", record.file_name.as_deref().unwrap_or("-")),
        Line::raw(""),
        Line::from(Span::styled(
            format!(" {}", record.details.as_deref().unwrap_or("")),
            MedicalTheme::text(),
        )),
    ];

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::sample_records;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_selection_clamped_to_results() {
        let mut state = MyRecordsState::default();
        state.set_results(sample_records());
        state.select_next();
        state.select_next();
        state.select_next();
        assert_eq!(state.selected, 2);

        state.set_results(sample_records().into_iter().take(1).collect());
        assert_eq!(state.selected, 0);
        state.select_prev();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_render_smoke() {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).expect("Should create terminal");
        let mut state = MyRecordsState::default();
        state.set_results(sample_records());

        terminal
            .draw(|f| render_my_records(f, f.area(), &state))
            .expect("Should draw");

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Results (3)"));
        assert!(text.contains("Amoxicillin Prescription"));
    }
}
