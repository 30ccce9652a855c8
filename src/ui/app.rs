use std::mem;

use crossterm::event::KeyCode;
use log::error;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use rusqlite::Connection;

use crate::models::Collection;
use crate::store::{create_collection, create_entry, fetch_entries};

use super::forms::{ConfirmDelete, DeleteTarget, SearchState, TextPrompt};
use super::helpers::centered_rect;
use super::screens::{CollectionsScreen, EntriesScreen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// High-level navigation states. The collections screen keeps its state on
/// the `App` so the selection survives a round trip into a list's entries.
enum Screen {
    Collections,
    Entries(EntriesScreen),
}

/// Fine-grained modes scoped to the current screen.
enum Mode {
    Normal,
    AddingCollection(TextPrompt),
    AddingEntry(TextPrompt),
    ConfirmDelete(ConfirmDelete),
    Searching(SearchState),
}

/// Holds the footer message text plus its severity. Only user-action
/// feedback lands here; persistence failures go to the log file instead.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    conn: Connection,
    collections: CollectionsScreen,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(conn: Connection, collections: Vec<Collection>) -> Self {
        Self {
            conn,
            collections: CollectionsScreen::new(collections),
            screen: Screen::Collections,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Dispatch one key press. Returns true when the app should exit.
    ///
    /// Store failures never propagate out of here: reads leave the previous
    /// rows on screen, writes are dropped, and both get a log line. The
    /// event loop itself has nothing to recover from.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::AddingCollection(prompt) => self.handle_add_collection(code, prompt),
            Mode::AddingEntry(prompt) => self.handle_add_entry(code, prompt),
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm),
            Mode::Searching(state) => self.handle_search(code, state),
        };

        exit
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match self.screen {
            Screen::Collections => self.collections_key(code, exit),
            Screen::Entries(_) => self.entries_key(code, exit),
        }
    }

    fn collections_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.collections.pane.move_selection(-1),
            KeyCode::Down => self.collections.pane.move_selection(1),
            KeyCode::PageUp => self.collections.pane.move_selection(-5),
            KeyCode::PageDown => self.collections.pane.move_selection(5),
            KeyCode::Home => self.collections.pane.select_first(),
            KeyCode::End => self.collections.pane.select_last(),
            KeyCode::Enter => {
                if let Some(collection) = self.collections.current().cloned() {
                    self.open_entries(collection);
                } else {
                    self.set_status("No list selected.", StatusKind::Error);
                }
            }
            KeyCode::Char('+') | KeyCode::Char('a') => {
                self.clear_status();
                return Mode::AddingCollection(TextPrompt::default());
            }
            KeyCode::Char('-') | KeyCode::Char('d') => {
                if let Some(name) = self.collections.current().map(|c| c.name.clone()) {
                    self.clear_status();
                    return Mode::ConfirmDelete(ConfirmDelete::new(DeleteTarget::Collection, name));
                } else {
                    self.set_status("No list selected to delete.", StatusKind::Error);
                }
            }
            _ => {}
        }
        Mode::Normal
    }

    fn entries_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') => {
                *exit = true;
            }
            KeyCode::Esc => {
                self.clear_status();
                self.screen = Screen::Collections;
            }
            KeyCode::Up => self.with_entries(|e| e.pane.move_selection(-1)),
            KeyCode::Down => self.with_entries(|e| e.pane.move_selection(1)),
            KeyCode::PageUp => self.with_entries(|e| e.pane.move_selection(-5)),
            KeyCode::PageDown => self.with_entries(|e| e.pane.move_selection(5)),
            KeyCode::Home => self.with_entries(|e| e.pane.select_first()),
            KeyCode::End => self.with_entries(|e| e.pane.select_last()),
            KeyCode::Enter => self.toggle_current_entry(),
            KeyCode::Char('f') | KeyCode::Char('/') => {
                self.clear_status();
                return Mode::Searching(SearchState::default());
            }
            KeyCode::Char('+') | KeyCode::Char('a') => {
                self.clear_status();
                return Mode::AddingEntry(TextPrompt::default());
            }
            KeyCode::Char('-') | KeyCode::Char('d') => {
                let selected = match &self.screen {
                    Screen::Entries(entries) => entries.current().map(|e| e.title.clone()),
                    Screen::Collections => None,
                };
                if let Some(title) = selected {
                    self.clear_status();
                    return Mode::ConfirmDelete(ConfirmDelete::new(DeleteTarget::Entry, title));
                } else {
                    self.set_status("No to-do selected to delete.", StatusKind::Error);
                }
            }
            KeyCode::Tab => self.open_relative_collection(1),
            KeyCode::BackTab => self.open_relative_collection(-1),
            _ => {}
        }
        Mode::Normal
    }

    fn handle_add_collection(&mut self, code: KeyCode, mut prompt: TextPrompt) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Add list cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter => {
                match create_collection(&self.conn, &prompt.value) {
                    Ok(collection) => {
                        if let Err(err) = self.collections.reload(&self.conn, Some(collection.id)) {
                            error!("reload after adding list failed: {err}");
                        }
                        self.set_status(
                            format!("Added \"{}\".", collection.name),
                            StatusKind::Info,
                        );
                    }
                    Err(err) => error!("adding list failed: {err}"),
                }
                Mode::Normal
            }
            KeyCode::Backspace => {
                prompt.backspace();
                Mode::AddingCollection(prompt)
            }
            KeyCode::Char(ch) => {
                prompt.push_char(ch);
                Mode::AddingCollection(prompt)
            }
            _ => Mode::AddingCollection(prompt),
        }
    }

    fn handle_add_entry(&mut self, code: KeyCode, mut prompt: TextPrompt) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Add to-do cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter => {
                // No-op unless a collection is active; the prompt can only be
                // reached from the entries screen, so the else arm is a guard
                // against state drift rather than a user-visible path.
                let added = match &mut self.screen {
                    Screen::Entries(entries) => {
                        match create_entry(&self.conn, entries.collection.id, &prompt.value) {
                            Ok(entry) => {
                                if let Err(err) = entries.reload(&self.conn) {
                                    error!("reload after adding to-do failed: {err}");
                                }
                                Some(entry.title)
                            }
                            Err(err) => {
                                error!("adding to-do failed: {err}");
                                None
                            }
                        }
                    }
                    Screen::Collections => None,
                };
                if let Some(title) = added {
                    self.set_status(format!("Added \"{title}\"."), StatusKind::Info);
                }
                Mode::Normal
            }
            KeyCode::Backspace => {
                prompt.backspace();
                Mode::AddingEntry(prompt)
            }
            KeyCode::Char(ch) => {
                prompt.push_char(ch);
                Mode::AddingEntry(prompt)
            }
            _ => Mode::AddingEntry(prompt),
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmDelete) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match confirm.target {
                    DeleteTarget::Collection => self.delete_selected_collection(&confirm),
                    DeleteTarget::Entry => self.delete_selected_entry(&confirm),
                }
                Mode::Normal
            }
            _ => Mode::ConfirmDelete(confirm),
        }
    }

    fn delete_selected_collection(&mut self, confirm: &ConfirmDelete) {
        match self.collections.delete_selected(&self.conn) {
            Ok(true) => {
                if let Err(err) = self.collections.reload(&self.conn, None) {
                    error!("reload after deleting list failed: {err}");
                }
                self.set_status(format!("Deleted \"{}\".", confirm.label), StatusKind::Info);
            }
            Ok(false) => {}
            Err(err) => error!("deleting list failed: {err}"),
        }
    }

    fn delete_selected_entry(&mut self, confirm: &ConfirmDelete) {
        let deleted = match &mut self.screen {
            Screen::Entries(entries) => match entries.delete_selected(&self.conn) {
                Ok(deleted) => {
                    if deleted {
                        if let Err(err) = entries.reload(&self.conn) {
                            error!("reload after deleting to-do failed: {err}");
                        }
                    }
                    deleted
                }
                Err(err) => {
                    error!("deleting to-do failed: {err}");
                    false
                }
            },
            Screen::Collections => false,
        };
        if deleted {
            self.set_status(format!("Deleted \"{}\".", confirm.label), StatusKind::Info);
        }
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Mode {
        if !matches!(self.screen, Screen::Entries(_)) {
            return Mode::Normal;
        }

        match code {
            KeyCode::Esc => {
                self.apply_filter(None);
                return Mode::Normal;
            }
            KeyCode::Up => {
                self.with_entries(|e| e.pane.move_selection(-1));
                return Mode::Searching(state);
            }
            KeyCode::Down => {
                self.with_entries(|e| e.pane.move_selection(1));
                return Mode::Searching(state);
            }
            KeyCode::PageUp => {
                self.with_entries(|e| e.pane.move_selection(-5));
                return Mode::Searching(state);
            }
            KeyCode::PageDown => {
                self.with_entries(|e| e.pane.move_selection(5));
                return Mode::Searching(state);
            }
            KeyCode::Home => {
                self.with_entries(|e| e.pane.select_first());
                return Mode::Searching(state);
            }
            KeyCode::End => {
                self.with_entries(|e| e.pane.select_last());
                return Mode::Searching(state);
            }
            KeyCode::Enter => {
                self.toggle_current_entry();
                return Mode::Searching(state);
            }
            KeyCode::Backspace => {
                state.query.pop();
            }
            KeyCode::Char(ch) => {
                if !ch.is_control() {
                    state.query.push(ch);
                }
            }
            _ => {}
        }

        // A blanked-out query restores the unfiltered list; the screen treats
        // whitespace-only filters as none.
        if state.query.trim().is_empty() {
            self.apply_filter(None);
        } else {
            self.apply_filter(Some(state.query.clone()));
        }

        Mode::Searching(state)
    }

    /// Flip the selected to-do and report the new state in the footer.
    fn toggle_current_entry(&mut self) {
        let outcome = match &mut self.screen {
            Screen::Entries(entries) => {
                let title = entries.current().map(|e| e.title.clone());
                match entries.toggle_selected(&self.conn) {
                    Ok(Some(done)) => title.map(|t| (t, done)),
                    Ok(None) => None,
                    Err(err) => {
                        error!("toggling to-do failed: {err}");
                        None
                    }
                }
            }
            Screen::Collections => None,
        };

        if let Some((title, done)) = outcome {
            let message = if done {
                format!("Checked off \"{title}\".")
            } else {
                format!("Reopened \"{title}\".")
            };
            self.set_status(message, StatusKind::Info);
        }
    }

    /// Replace the entries filter, logging instead of surfacing failures.
    fn apply_filter(&mut self, filter: Option<String>) {
        if let Screen::Entries(entries) = &mut self.screen {
            if let Err(err) = entries.set_filter(&self.conn, filter) {
                error!("search failed: {err}");
            }
        }
    }

    /// Load a collection's entries and switch to its screen. A read failure
    /// is logged and the current screen stays up unchanged.
    fn open_entries(&mut self, collection: Collection) {
        match fetch_entries(&self.conn, collection.id) {
            Ok(entries) => {
                self.clear_status();
                self.screen = Screen::Entries(EntriesScreen::new(collection, entries));
            }
            Err(err) => error!("loading to-dos for \"{}\" failed: {err}", collection.name),
        }
    }

    /// Hop to the previous/next collection without going back up, wrapping
    /// at either end of the list.
    fn open_relative_collection(&mut self, offset: isize) {
        let current_id = match &self.screen {
            Screen::Entries(entries) => entries.collection.id,
            Screen::Collections => return,
        };
        let collections = &self.collections.collections;
        if collections.len() < 2 {
            return;
        }
        let Some(current_idx) = collections.iter().position(|c| c.id == current_id) else {
            return;
        };
        let len = collections.len() as isize;
        let next_idx = (current_idx as isize + offset).rem_euclid(len) as usize;
        let next = collections[next_idx].clone();
        self.collections.pane.select(next_idx);
        self.clear_status();
        self.open_entries(next);
    }

    fn with_entries(&mut self, f: impl FnOnce(&mut EntriesScreen)) {
        if let Screen::Entries(entries) = &mut self.screen {
            f(entries);
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Collections => self.collections.pane.draw(frame, content_area, "Lists"),
            Screen::Entries(entries) => self.draw_entries(frame, content_area, entries),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingCollection(prompt) => {
                self.draw_prompt(frame, area, "New List", "Name your list", prompt)
            }
            Mode::AddingEntry(prompt) => {
                self.draw_prompt(frame, area, "New To-Do", "What needs doing?", prompt)
            }
            Mode::ConfirmDelete(confirm) => self.draw_confirm(frame, area, confirm),
            Mode::Searching(state) => self.draw_search_bar(frame, area, state),
            Mode::Normal => {}
        }
    }

    fn draw_entries(&self, frame: &mut Frame, area: Rect, entries: &EntriesScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let count = entries.pane.row_count();
        let noun = if count == 1 { "to-do" } else { "to-dos" };
        let mut summary = vec![Span::raw(format!("{count} {noun}"))];
        if let Some(filter) = &entries.filter {
            summary.push(Span::styled(
                format!("  matching \"{filter}\""),
                Style::default().fg(Color::Yellow),
            ));
        }

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                entries.collection.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(summary),
        ])
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL).title("List"));
        frame.render_widget(header, chunks[0]);

        // The pane's placeholder covers the truly empty list; an exhausted
        // search filter needs its own wording.
        if entries.filter.is_some() && entries.entries.is_empty() {
            let message = Paragraph::new("No to-dos match the search.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("To-Dos"));
            frame.render_widget(message, chunks[1]);
            return;
        }

        entries.pane.draw(frame, chunks[1], "To-Dos");
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = match (&self.screen, &self.mode) {
            (_, Mode::AddingCollection(_)) | (_, Mode::AddingEntry(_)) => {
                &[("[Enter]", " Save   "), ("[Esc]", " Cancel")]
            }
            (_, Mode::ConfirmDelete(_)) => {
                &[("[y/Enter]", " Delete   "), ("[n/Esc]", " Keep")]
            }
            (_, Mode::Searching(_)) => &[
                ("[Type]", " Filter   "),
                ("[↑↓]", " Navigate   "),
                ("[Enter]", " Toggle done   "),
                ("[Esc]", " Clear search"),
            ],
            (Screen::Collections, _) => &[
                ("[↑↓]", " Navigate   "),
                ("[Enter]", " Open   "),
                ("[+]", " New list   "),
                ("[-]", " Delete   "),
                ("[q]", " Quit"),
            ],
            (Screen::Entries(_), _) => &[
                ("[↑↓]", " Navigate   "),
                ("[Enter]", " Toggle done   "),
                ("[+]", " New to-do   "),
                ("[-]", " Delete   "),
                ("[f]", " Search   "),
                ("[Esc]", " Back"),
            ],
        };

        let mut spans = Vec::with_capacity(hints.len() * 2);
        for (key, label) in hints {
            spans.push(Span::styled(*key, key_style));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    }

    fn draw_prompt(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        placeholder: &str,
        prompt: &TextPrompt,
    ) {
        let popup_area = centered_rect(50, 20, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title(title.to_string());
        let paragraph = Paragraph::new(prompt.build_line(placeholder))
            .block(block.clone())
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + prompt.value_len() as u16;
        frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
    }

    fn draw_confirm(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmDelete) {
        let popup_area = centered_rect(50, 25, area);
        frame.render_widget(Clear, popup_area);

        let label = if confirm.label.is_empty() {
            "(unnamed)".to_string()
        } else {
            confirm.label.clone()
        };
        let lines = vec![
            Line::from(Span::raw(format!("Delete \"{label}\"?"))),
            Line::from(""),
            Line::from(vec![
                Span::styled("[y]", Style::default().fg(Color::Red)),
                Span::raw(" delete   "),
                Span::styled("[n]", Style::default().fg(Color::Green)),
                Span::raw(" keep"),
            ]),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(confirm.title()),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title("Search");
        let paragraph = Paragraph::new(Span::raw(format!("Search: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + "Search: ".len() as u16 + state.query.chars().count() as u16;
        let cursor_y = inner.y;
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}
