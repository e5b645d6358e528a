//! Main screen logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the task store, the
//! entry form, the clock, and the view-mode toggle, dispatches key events,
//! and renders the single task screen.

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};

use crate::store::{format_schedule, TaskStore};
use crate::task::Task;
use crate::tui::{
    clock::Clock,
    colors::{CYAN, GREEN, PALE_CYAN},
    enums::{Focus, Screen, ViewMode},
    form::{EntryForm, DATE_FIELD, TEXT_FIELD, TIME_FIELD},
};

/// Clock refresh interval; also the upper bound on event-poll latency.
const TICK_RATE: Duration = Duration::from_millis(1000);

/// Main application state for the terminal user interface.
///
/// The store is the only authoritative state; the view keeps transient
/// input-field values, the view-mode toggle, and the list selection.
pub struct App {
    store: TaskStore,
    screen: Screen,
    view: ViewMode,
    focus: Focus,
    form: EntryForm,
    clock: Clock,
    list_state: TableState,
    status_message: String,
}

impl App {
    /// Create a new App, loading the store from the given snapshot path.
    ///
    /// A failed load falls back to an empty list; its warning becomes the
    /// initial status-bar message.
    pub fn new(store_path: &Path) -> Self {
        let mut store = TaskStore::load(store_path);
        let status_message = store.take_load_warning().unwrap_or_default();
        let mut app = App {
            store,
            screen: Screen::Main,
            view: ViewMode::Remaining,
            focus: Focus::Input,
            form: EntryForm::new(),
            clock: Clock::new(),
            list_state: TableState::default(),
            status_message,
        };
        app.clamp_selection();
        app
    }

    /// Ids of the tasks in the active projection, in insertion order.
    fn visible_tasks(&self) -> Vec<u64> {
        let tasks = match self.view {
            ViewMode::Remaining => self.store.remaining(),
            ViewMode::Completed => self.store.completed(),
        };
        tasks.iter().map(|t| t.id).collect()
    }

    fn selected_id(&self) -> Option<u64> {
        self.list_state
            .selected()
            .and_then(|i| self.visible_tasks().get(i).copied())
    }

    /// Keep the selection inside the active projection after mutations.
    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        match self.list_state.selected() {
            Some(_) if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            None if len > 0 => self.list_state.select(Some(0)),
            _ => {}
        }
    }

    fn set_status(&mut self, msg: String) {
        self.status_message = msg;
    }

    /// Dispatch a key event based on the current screen and focus.
    ///
    /// Returns true if the application should quit.
    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> io::Result<bool> {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }
        match self.screen {
            Screen::Help => Ok(self.handle_help_key(key)),
            Screen::Main => match self.focus {
                Focus::List => self.handle_list_key(key),
                Focus::Input => self.handle_input_key(key),
            },
        }
    }

    /// Handle keyboard input when the task list has focus.
    fn handle_list_key(&mut self, key: KeyCode) -> io::Result<bool> {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
                self.view = self.view.toggled();
                self.clamp_selection();
            }
            KeyCode::Up => {
                if let Some(selected) = self.list_state.selected() {
                    if selected > 0 {
                        self.list_state.select(Some(selected - 1));
                    }
                } else if !self.visible_tasks().is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            KeyCode::Down => {
                if let Some(selected) = self.list_state.selected() {
                    if selected + 1 < self.visible_tasks().len() {
                        self.list_state.select(Some(selected + 1));
                    }
                } else if !self.visible_tasks().is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            KeyCode::Char('a') | KeyCode::Char('i') => {
                self.focus = Focus::Input;
            }
            KeyCode::Char('c') | KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    // In the remaining view the action completes the task;
                    // in the completed view it undoes the completion.
                    let value = self.view == ViewMode::Remaining;
                    match self.store.set_completed(id, value) {
                        Ok(()) => self.set_status(
                            if value {
                                "Task completed"
                            } else {
                                "Task moved back to remaining"
                            }
                            .to_string(),
                        ),
                        Err(e) => self.set_status(format!("Error saving: {}", e)),
                    }
                    self.clamp_selection();
                }
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_id() {
                    match self.store.take(id) {
                        Ok(Some(task)) => {
                            self.form.stage(&task);
                            self.focus = Focus::Input;
                            self.set_status("Editing task - Enter resubmits it".to_string());
                        }
                        Ok(None) => {}
                        Err(e) => self.set_status(format!("Error saving: {}", e)),
                    }
                    self.clamp_selection();
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_id() {
                    match self.store.remove(id) {
                        Ok(()) => self.set_status("Task deleted".to_string()),
                        Err(e) => self.set_status(format!("Error saving: {}", e)),
                    }
                    self.clamp_selection();
                }
            }
            KeyCode::Char('h') => {
                self.screen = Screen::Help;
            }
            _ => {}
        }
        Ok(false)
    }

    /// Handle keyboard input when the input section has focus.
    fn handle_input_key(&mut self, key: KeyCode) -> io::Result<bool> {
        match key {
            KeyCode::Esc => {
                self.focus = Focus::List;
                self.clamp_selection();
            }
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Left => self.form.move_cursor(false),
            KeyCode::Right => self.form.move_cursor(true),
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Delete => self.form.handle_delete(),
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => self.form.handle_char(c),
            _ => {}
        }
        Ok(false)
    }

    /// Handle keyboard input on the help screen.
    fn handle_help_key(&mut self, key: KeyCode) -> bool {
        if matches!(key, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h')) {
            self.screen = Screen::Main;
        }
        false
    }

    /// Submit the entry form through the store's add operation.
    ///
    /// Blank text is ignored without comment, matching the add contract.
    fn submit(&mut self) {
        match self.store.add(
            &self.form.text.value,
            &self.form.date.value,
            &self.form.time.value,
        ) {
            Ok(Some(_)) => {
                self.form.reset();
                self.clamp_selection();
                self.set_status("Task added".to_string());
            }
            Ok(None) => {}
            Err(e) => self.set_status(format!("Error saving: {}", e)),
        }
    }

    /// Render the title bar.
    fn render_title(&mut self, f: &mut Frame, area: Rect) {
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "TASKBLITZ",
                Style::default().fg(CYAN).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                "personal task list",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(title, area);
    }

    /// Render the text/date/time input fields and place the cursor.
    fn render_input_section(&mut self, f: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3)].as_ref())
            .split(area);
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
            .split(rows[1]);

        let field_style = |field: usize| {
            if self.focus == Focus::Input && self.form.current_field == field {
                Style::default().fg(CYAN)
            } else {
                Style::default()
            }
        };

        let text_input = Paragraph::new(self.form.text.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Add Tasks here!")
                .border_style(field_style(TEXT_FIELD)),
        );
        f.render_widget(text_input, rows[0]);

        let date_input = Paragraph::new(self.form.date.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Date (YYYY-MM-DD)")
                .border_style(field_style(DATE_FIELD)),
        );
        f.render_widget(date_input, halves[0]);

        let time_input = Paragraph::new(self.form.time.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Time (HH:MM)")
                .border_style(field_style(TIME_FIELD)),
        );
        f.render_widget(time_input, halves[1]);

        if self.focus == Focus::Input {
            let (chunk, field) = match self.form.current_field {
                DATE_FIELD => (halves[0], &self.form.date),
                TIME_FIELD => (halves[1], &self.form.time),
                _ => (rows[0], &self.form.text),
            };
            f.set_cursor_position((chunk.x + field.cursor as u16 + 1, chunk.y + 1));
        }
    }

    /// Render the view-mode tabs with live counts.
    fn render_tabs(&mut self, f: &mut Frame, area: Rect) {
        let remaining = self.store.remaining().len();
        let completed = self.store.completed().len();

        let tab = |label: String, active: bool| {
            if active {
                Span::styled(
                    format!("  {}  ", label),
                    Style::default()
                        .fg(Color::Black)
                        .bg(CYAN)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(format!("  {}  ", label), Style::default().fg(Color::DarkGray))
            }
        };

        let line = Line::from(vec![
            tab(
                format!("Remaining Tasks ({})", remaining),
                self.view == ViewMode::Remaining,
            ),
            Span::raw("   "),
            tab(
                format!("Completed Tasks ({})", completed),
                self.view == ViewMode::Completed,
            ),
        ]);

        let tabs = Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(tabs, area);
    }

    /// Render the active projection as a table, or its empty-state message.
    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let tasks: Vec<&Task> = match self.view {
            ViewMode::Remaining => self.store.remaining(),
            ViewMode::Completed => self.store.completed(),
        };

        if tasks.is_empty() {
            let (message, style) = match self.view {
                ViewMode::Remaining => (
                    "No remaining tasks. Good job!",
                    Style::default().fg(GREEN).add_modifier(Modifier::ITALIC),
                ),
                ViewMode::Completed => (
                    "No completed tasks yet.",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ),
            };
            let empty = Paragraph::new(Line::from(Span::styled(message, style)))
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center);
            f.render_widget(empty, area);
            return;
        }

        let rows: Vec<Row> = tasks
            .iter()
            .map(|task| {
                let text_style = if task.is_completed {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(Color::White)
                };
                Row::new(vec![
                    Cell::from(Span::styled(task.text.clone(), text_style)),
                    Cell::from(Span::styled(
                        format_schedule(task.scheduled_at.as_deref()),
                        Style::default().fg(PALE_CYAN).add_modifier(Modifier::ITALIC),
                    )),
                ])
            })
            .collect();

        let action_hint = match self.view {
            ViewMode::Remaining => "c: complete  e: edit  d: delete",
            ViewMode::Completed => "c: undo  e: edit  d: delete",
        };

        let header = Row::new(vec![
            Cell::from(Span::styled(
                "Task",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Cell::from(Span::styled(
                "Scheduled",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ]);

        let widths = [Constraint::Min(25), Constraint::Length(22)];
        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(action_hint),
            )
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, area, &mut self.list_state);
    }

    /// Render the help screen with the key reference.
    fn render_help(&mut self, f: &mut Frame, area: Rect) {
        let help_text = vec![
            Line::from(Span::styled(
                "TaskBlitz Help",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Task List:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("  Up/Down         Select task"),
            Line::from("  Tab or Left/Right  Switch remaining/completed view"),
            Line::from("  c/Space/Enter   Complete (or undo) the selected task"),
            Line::from("  e               Edit the selected task, Enter resubmits"),
            Line::from("  d               Delete the selected task"),
            Line::from("  a/i             Jump to the input fields"),
            Line::from("  h               Show this help"),
            Line::from("  q/Esc/Ctrl+C    Quit"),
            Line::from(""),
            Line::from(Span::styled(
                "Input Fields:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("  Tab/Up/Down     Move between text, date, and time"),
            Line::from("  Enter           Add the task"),
            Line::from("  Esc             Back to the task list"),
            Line::from(""),
            Line::from("  Dates are YYYY-MM-DD. An empty time defaults to 00:00."),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Help - Esc to return"),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.focus {
                Focus::List => format!(
                    "{} remaining / {} completed | Press 'h' for help",
                    self.store.remaining().len(),
                    self.store.completed().len()
                ),
                Focus::Input => "Enter: add task  Tab: next field  Esc: task list".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(CYAN).fg(Color::Black))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Render the main screen regions top to bottom.
    fn render_main(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // title
                Constraint::Length(4), // clock
                Constraint::Length(6), // input section
                Constraint::Length(3), // view tabs
                Constraint::Min(0),    // task list
            ])
            .split(area);

        self.render_title(f, chunks[0]);
        self.clock.render(f, chunks[1]);
        self.render_input_section(f, chunks[2]);
        self.render_tabs(f, chunks[3]);
        self.render_task_list(f, chunks[4]);
    }

    /// Main render function that dispatches to the active screen.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
            .split(f.area());

        match self.screen {
            Screen::Main => self.render_main(f, chunks[0]),
            Screen::Help => self.render_help(f, chunks[0]),
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop: draw, wait for input up to the next clock tick,
    /// refresh the clock once per second.
    ///
    /// The tick lives and dies with this loop; returning from it is the
    /// teardown that stops the clock.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let mut last_tick = Instant::now();
        loop {
            terminal.draw(|f| self.render(f))?;

            let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    self.status_message.clear();
                    if self.handle_key(key.code, key.modifiers)? {
                        break;
                    }
                }
            }
            if last_tick.elapsed() >= TICK_RATE {
                self.clock.tick();
                last_tick = Instant::now();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("taskblitz-app-{nanos}-{file_name}"))
    }

    fn press(app: &mut App, key: KeyCode) -> bool {
        app.status_message.clear();
        app.handle_key(key, KeyModifiers::NONE).unwrap()
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn add_task(app: &mut App, text: &str, date: &str, time: &str) {
        type_str(app, text);
        press(app, KeyCode::Tab);
        type_str(app, date);
        press(app, KeyCode::Tab);
        type_str(app, time);
        press(app, KeyCode::Enter);
    }

    #[test]
    fn enter_submits_and_clears_the_fields() {
        let path = temp_path("submit.json");
        let mut app = App::new(&path);

        add_task(&mut app, "Buy milk", "2024-05-01", "");

        assert_eq!(app.store.remaining().len(), 1);
        assert_eq!(
            app.store.tasks()[0].scheduled_at.as_deref(),
            Some("2024-05-01T00:00")
        );
        assert_eq!(app.form.text.value, "");
        assert_eq!(app.form.date.value, "");
        assert_eq!(app.form.time.value, "");
        assert_eq!(app.status_message, "Task added");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn blank_submit_is_silently_ignored() {
        let path = temp_path("blank.json");
        let mut app = App::new(&path);

        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert!(app.store.tasks().is_empty());
        assert_eq!(app.status_message, "");
        assert_eq!(app.form.text.value, "   ");
    }

    #[test]
    fn completing_a_task_moves_it_to_the_other_view() {
        let path = temp_path("complete.json");
        let mut app = App::new(&path);
        add_task(&mut app, "A", "", "");
        add_task(&mut app, "B", "", "");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.list_state.selected(), Some(0));
        press(&mut app, KeyCode::Char('c'));

        let remaining: Vec<&str> = app.store.remaining().iter().map(|t| t.text.as_str()).collect();
        let completed: Vec<&str> = app.store.completed().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(remaining, vec!["B"]);
        assert_eq!(completed, vec!["A"]);

        // Undo from the completed view sends it back untouched.
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, ViewMode::Completed);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.store.remaining().len(), 2);
        assert!(app.store.completed().is_empty());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn editing_stages_the_task_and_removes_it_everywhere() {
        let path = temp_path("edit.json");
        let mut app = App::new(&path);
        add_task(&mut app, "Dentist", "2024-06-10", "14:30");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('e'));

        assert_eq!(app.form.text.value, "Dentist");
        assert_eq!(app.form.date.value, "2024-06-10");
        assert_eq!(app.form.time.value, "14:30");
        assert!(matches!(app.focus, Focus::Input));

        // Gone from both projections and from disk until resubmitted.
        assert!(app.store.remaining().is_empty());
        assert!(app.store.completed().is_empty());
        assert!(TaskStore::load(&path).tasks().is_empty());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn delete_has_no_confirmation_step() {
        let path = temp_path("delete.json");
        let mut app = App::new(&path);
        add_task(&mut app, "X", "", "");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('d'));

        assert!(app.store.remaining().is_empty());
        assert!(app.store.completed().is_empty());
        assert_eq!(app.list_state.selected(), None);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn tab_toggles_the_view_mode() {
        let path = temp_path("tabs.json");
        let mut app = App::new(&path);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.view, ViewMode::Remaining);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, ViewMode::Completed);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, ViewMode::Remaining);
    }

    #[test]
    fn quit_comes_from_the_list_focus_only() {
        let path = temp_path("quit.json");
        let mut app = App::new(&path);
        // 'q' while typing is just a character.
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.form.text.value, "q");

        assert!(!press(&mut app, KeyCode::Esc));
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn load_warning_becomes_the_first_status_message() {
        let path = temp_path("warn.json");
        std::fs::write(&path, "definitely not json").unwrap();
        let app = App::new(&path);
        assert!(app.status_message.contains("starting fresh"));
        assert!(app.store.tasks().is_empty());
        std::fs::remove_file(&path).ok();
    }
}
