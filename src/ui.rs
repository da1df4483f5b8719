use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use expense_tracker::tracker::CLEAR_CONFIRM_PROMPT;
use expense_tracker::{Category, ClearOutcome, ExpenseForm, ExpenseId, ExpenseTracker, ViewModel};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Adding,
    ConfirmClear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Description,
    Amount,
    Category,
    Date,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Description => FormField::Amount,
            FormField::Amount => FormField::Category,
            FormField::Category => FormField::Date,
            FormField::Date => FormField::Description,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            FormField::Description => FormField::Date,
            FormField::Amount => FormField::Description,
            FormField::Category => FormField::Amount,
            FormField::Date => FormField::Category,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FormField::Description => "Description",
            FormField::Amount => "Amount",
            FormField::Category => "Category",
            FormField::Date => "Date (YYYY-MM-DD)",
        }
    }
}

pub struct App {
    pub tracker: ExpenseTracker,
    pub view: ViewModel,
    pub state: TableState,
    pub mode: Mode,
    pub form: ExpenseForm,
    pub form_field: FormField,
    pub form_category: Category,
    pub show_detail: bool,
    pub message: Option<String>,
    today: NaiveDate,
}

impl App {
    pub fn new(tracker: ExpenseTracker, today: NaiveDate) -> Self {
        let view = tracker.view();
        let mut app = Self {
            tracker,
            view,
            state: TableState::default(),
            mode: Mode::Browse,
            form: ExpenseForm::with_date(today),
            form_field: FormField::Description,
            form_category: Category::Food,
            show_detail: false,
            message: None,
            today,
        };
        app.reset_form();
        app.refresh();
        app
    }

    /// Recompute the view after a mutation and keep the selection in range
    fn refresh(&mut self) {
        self.view = self.tracker.view();
        let len = self.view.expenses.len();
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            None => self.state.select(Some(0)),
            Some(_) => {}
        }
    }

    fn reset_form(&mut self) {
        self.form.reset(self.today);
        self.form_field = FormField::Description;
        self.form_category = Category::Food;
        self.form.category = self.form_category.as_str().to_string();
    }

    pub fn selected_id(&self) -> Option<ExpenseId> {
        self.state
            .selected()
            .and_then(|i| self.view.expenses.get(i))
            .map(|item| item.id)
    }

    /// Apply one key press; returns true when the app should exit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.mode {
            Mode::Browse => return self.handle_browse_key(key),
            Mode::Adding => self.handle_form_key(key),
            Mode::ConfirmClear => self.handle_confirm_key(key),
        }
        false
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('a') => {
                self.message = None;
                self.mode = Mode::Adding;
            }
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('C') => self.request_clear(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.request_clear()
            }
            KeyCode::Enter => self.show_detail = !self.show_detail,
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::Home => {
                if !self.view.expenses.is_empty() {
                    self.state.select(Some(0));
                }
            }
            KeyCode::End => {
                if !self.view.expenses.is_empty() {
                    self.state.select(Some(self.view.expenses.len() - 1));
                }
            }
            _ => {}
        }
        false
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.reset_form();
                self.message = None;
                self.mode = Mode::Browse;
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => self.form_field = self.form_field.next(),
            KeyCode::BackTab | KeyCode::Up => self.form_field = self.form_field.previous(),
            KeyCode::Left if self.form_field == FormField::Category => {
                self.form_category = self.form_category.previous();
                self.form.category = self.form_category.as_str().to_string();
            }
            KeyCode::Right if self.form_field == FormField::Category => {
                self.form_category = self.form_category.next();
                self.form.category = self.form_category.as_str().to_string();
            }
            KeyCode::Backspace => {
                if let Some(field) = self.form_text_mut() {
                    field.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.form_text_mut() {
                    field.push(c);
                }
            }
            _ => {}
        }
    }

    fn form_text_mut(&mut self) -> Option<&mut String> {
        match self.form_field {
            FormField::Description => Some(&mut self.form.description),
            FormField::Amount => Some(&mut self.form.amount),
            FormField::Date => Some(&mut self.form.date),
            FormField::Category => None,
        }
    }

    fn submit_form(&mut self) {
        match self.tracker.submit(&self.form) {
            Ok(record) => {
                self.message = Some(format!("Added '{}'", record.description()));
                self.reset_form();
                self.mode = Mode::Browse;
                self.refresh();
            }
            Err(e) => {
                self.message = Some(e.user_message());
            }
        }
    }

    fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            if self.tracker.delete(id) {
                self.message = Some("Expense deleted".to_string());
            }
            self.refresh();
        }
    }

    fn request_clear(&mut self) {
        // Empty ledger short-circuits without asking
        if self.tracker.ledger().is_empty() {
            self.message = ClearOutcome::NothingToClear.message().map(str::to_string);
        } else {
            self.message = None;
            self.mode = Mode::ConfirmClear;
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let answer = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => true,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
            _ => return,
        };

        let outcome = self.tracker.clear_all(&mut |_: &str| answer);
        self.message = match outcome {
            ClearOutcome::Cleared(n) => Some(format!("Cleared {} expense(s)", n)),
            ClearOutcome::Declined => None,
            ClearOutcome::NothingToClear => outcome.message().map(str::to_string),
        };
        self.mode = Mode::Browse;
        self.refresh();
    }

    pub fn next(&mut self) {
        let len = self.view.expenses.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.view.expenses.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.view.expenses.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + 20).min(len - 1),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        if self.view.expenses.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => i.saturating_sub(20),
            None => 0,
        };
        self.state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Summary
            Constraint::Min(0),    // Categories + expenses
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[1]);

    render_categories(f, content_chunks[0], app);

    if app.show_detail {
        let right = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(content_chunks[1]);
        render_table(f, right[0], app);
        render_detail_panel(f, right[1], app);
    } else {
        render_table(f, content_chunks[1], app);
    }

    render_status_bar(f, chunks[2], app);

    match app.mode {
        Mode::Adding => render_form(f, app),
        Mode::ConfirmClear => render_confirm(f),
        Mode::Browse => {}
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let summary = &app.view.summary;
    let label = Style::default().fg(Color::DarkGray);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Expense Tracker",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled("Total ", label),
        Span::styled(summary.total.clone(), Style::default().fg(Color::Red)),
        Span::raw("  |  "),
        Span::styled("Expenses ", label),
        Span::styled(summary.count.to_string(), Style::default().fg(Color::White)),
        Span::raw("  |  "),
        Span::styled("Average ", label),
        Span::styled(summary.average.clone(), Style::default().fg(Color::Cyan)),
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_categories(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = match &app.view.categories_empty_message {
        Some(msg) => vec![Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))],
        None => app
            .view
            .categories
            .iter()
            .map(|card| {
                Line::from(vec![
                    Span::raw(format!("{} ", card.emoji)),
                    Span::styled(format!("{:<14}", card.category), Style::default().fg(Color::White)),
                    Span::styled(card.total.clone(), Style::default().fg(Color::Green)),
                ])
            })
            .collect(),
    };

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" By Category "),
    );

    f.render_widget(paragraph, area);
}

fn render_table(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(" Expenses ");

    if let Some(msg) = &app.view.expenses_empty_message {
        let empty = Paragraph::new(Span::styled(
            msg.clone(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header_cells = ["Date", "Description", "Category", "Amount"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.view.expenses.iter().map(|item| {
        Row::new(vec![
            Cell::from(item.date.clone()),
            Cell::from(format!("{} {}", item.emoji, truncate(&item.description, 28))),
            Cell::from(item.category.clone()),
            Cell::from(item.amount.clone()).style(Style::default().fg(Color::Red)),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(block)
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Expense Details ");

    let item = match app.state.selected().and_then(|i| app.view.expenses.get(i)) {
        Some(item) => item,
        None => {
            f.render_widget(Paragraph::new("No expense selected").block(block), area);
            return;
        }
    };

    let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let content = vec![
        Line::from(""),
        Line::from(vec![Span::styled("  Description: ", key), Span::raw(&item.description)]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Category: ", key),
            Span::raw(format!("{} {}", item.emoji, item.category)),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled("  Date: ", key), Span::raw(&item.date)]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Amount: ", key),
            Span::styled(&item.amount, Style::default().fg(Color::Red)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Id: ", key),
            Span::styled(item.id.to_string(), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Enter to close",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];

    f.render_widget(Paragraph::new(content).block(block), area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.view.expenses.len();
    let key = Style::default().fg(Color::Yellow);

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    if let Some(msg) = &app.message {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(msg.clone(), Style::default().fg(Color::Green)));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("a", key));
    status_spans.push(Span::raw(" Add | "));
    status_spans.push(Span::styled("d", key));
    status_spans.push(Span::raw(" Delete | "));
    status_spans.push(Span::styled("C", key));
    status_spans.push(Span::raw(" Clear all | "));
    status_spans.push(Span::styled("Enter", key));
    status_spans.push(Span::raw(" Details | "));
    status_spans.push(Span::styled("↑/↓", key));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_form(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 14, f.size());
    f.render_widget(Clear, area);

    let fields = [
        (FormField::Description, app.form.description.clone()),
        (FormField::Amount, app.form.amount.clone()),
        (
            FormField::Category,
            format!("◀ {} {} ▶", app.form_category.emoji(), app.form_category.as_str()),
        ),
        (FormField::Date, app.form.date.clone()),
    ];

    let mut content = vec![Line::from("")];
    for (field, value) in fields {
        let focused = field == app.form_field;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let cursor = if focused && field != FormField::Category { "▏" } else { "" };
        content.push(Line::from(vec![
            Span::styled(format!("  {:<20}", field.label()), label_style),
            Span::raw(value),
            Span::styled(cursor, Style::default().fg(Color::Yellow)),
        ]));
        content.push(Line::from(""));
    }

    if let Some(msg) = &app.message {
        content.push(Line::from(Span::styled(
            format!("  {}", msg),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        content.push(Line::from(""));
    }

    content.push(Line::from(Span::styled(
        "  Tab next field | ←/→ category | Enter save | Esc cancel",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    )));

    let form = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Add Expense "),
    );

    f.render_widget(form, area);
}

fn render_confirm(f: &mut Frame) {
    let area = centered_rect(60, 7, f.size());
    f.render_widget(Clear, area);

    let content = vec![
        Line::from(""),
        Line::from(format!("  {}", CLEAR_CONFIRM_PROMPT)),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("y", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" delete everything   "),
            Span::styled("n", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" keep"),
        ]),
    ];

    let dialog = Paragraph::new(content).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Clear All Expenses "),
    );

    f.render_widget(dialog, area);
}

/// Rectangle `percent_x` wide and `height` rows tall, centred in `r`
fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let height = height.min(r.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expense_tracker::tracker::NOTHING_TO_CLEAR_MESSAGE;
    use expense_tracker::validation::MSG_FILL_ALL_FIELDS;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    }

    fn new_app() -> App {
        App::new(ExpenseTracker::default(), today())
    }

    fn add_expense(app: &mut App, description: &str, amount: &str) {
        app.handle_key(press(KeyCode::Char('a')));
        type_text(app, description);
        app.handle_key(press(KeyCode::Tab));
        type_text(app, amount);
        app.handle_key(press(KeyCode::Enter));
    }

    #[test]
    fn test_form_starts_with_today() {
        let app = new_app();
        assert_eq!(app.form.date, "2024-05-02");
        assert_eq!(app.form.category, "Food");
    }

    #[test]
    fn test_add_through_form() {
        let mut app = new_app();
        add_expense(&mut app, "Lunch", "250");

        assert_eq!(app.mode, Mode::Browse);
        assert_eq!(app.tracker.ledger().len(), 1);
        assert_eq!(app.view.summary.total, "₹250.00");
        assert_eq!(app.state.selected(), Some(0));
        // Form is reset for the next entry
        assert!(app.form.description.is_empty());
        assert_eq!(app.form.date, "2024-05-02");
    }

    #[test]
    fn test_category_picker_cycles() {
        let mut app = new_app();
        app.handle_key(press(KeyCode::Char('a')));
        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.form_field, FormField::Category);

        app.handle_key(press(KeyCode::Right));
        assert_eq!(app.form.category, "Transport");
        app.handle_key(press(KeyCode::Left));
        app.handle_key(press(KeyCode::Left));
        assert_eq!(app.form.category, "Other");
    }

    #[test]
    fn test_invalid_form_stays_open_with_message() {
        let mut app = new_app();
        app.handle_key(press(KeyCode::Char('a')));
        type_text(&mut app, "Lunch");
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(app.mode, Mode::Adding);
        assert_eq!(app.message.as_deref(), Some(MSG_FILL_ALL_FIELDS));
        assert!(app.tracker.ledger().is_empty());
    }

    #[test]
    fn test_typing_q_in_form_does_not_quit() {
        let mut app = new_app();
        app.handle_key(press(KeyCode::Char('a')));
        assert!(!app.handle_key(press(KeyCode::Char('q'))));
        assert_eq!(app.form.description, "q");
    }

    #[test]
    fn test_delete_selected() {
        let mut app = new_app();
        add_expense(&mut app, "Lunch", "250");
        add_expense(&mut app, "Tea", "20");

        app.handle_key(press(KeyCode::Char('d')));

        assert_eq!(app.tracker.ledger().len(), 1);
        assert_eq!(app.view.expenses.len(), 1);
        assert_eq!(app.state.selected(), Some(0));
    }

    #[test]
    fn test_clear_on_empty_shows_message() {
        let mut app = new_app();
        app.handle_key(press(KeyCode::Char('C')));

        assert_eq!(app.mode, Mode::Browse);
        assert_eq!(app.message.as_deref(), Some(NOTHING_TO_CLEAR_MESSAGE));
    }

    #[test]
    fn test_clear_asks_then_clears() {
        let mut app = new_app();
        add_expense(&mut app, "Lunch", "250");

        app.handle_key(press(KeyCode::Char('C')));
        assert_eq!(app.mode, Mode::ConfirmClear);

        app.handle_key(press(KeyCode::Char('n')));
        assert_eq!(app.tracker.ledger().len(), 1);

        app.handle_key(press(KeyCode::Char('C')));
        app.handle_key(press(KeyCode::Char('y')));
        assert!(app.tracker.ledger().is_empty());
        assert_eq!(app.state.selected(), None);
        assert_eq!(app.message.as_deref(), Some("Cleared 1 expense(s)"));
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = new_app();
        add_expense(&mut app, "a", "1");
        add_expense(&mut app, "b", "2");

        app.state.select(Some(1));
        app.handle_key(press(KeyCode::Down));
        assert_eq!(app.state.selected(), Some(0));
        app.handle_key(press(KeyCode::Up));
        assert_eq!(app.state.selected(), Some(1));
    }

    #[test]
    fn test_truncate_handles_multibyte() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("₹₹₹₹₹₹₹₹₹₹", 6), "₹₹₹...");
    }
}
