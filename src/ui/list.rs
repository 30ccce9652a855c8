//! The reusable list pane shared by both screens.
//!
//! The pane renders an ordered sequence of opaque rows, tracks the selected
//! position, and forwards delete requests through the [`DeleteAt`]
//! capability. It never sees a domain type: screens translate their records
//! into [`RowItem`]s and supply a `DeleteAt` adapter over their own data, so
//! all domain knowledge stays on the screen side.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::store::StoreError;

/// Opaque row descriptor. `checked` drives the trailing check mark:
/// `None` for rows without a done state, `Some(done)` for to-dos.
#[derive(Debug, Clone)]
pub(crate) struct RowItem {
    pub(crate) text: String,
    pub(crate) checked: Option<bool>,
}

impl RowItem {
    pub(crate) fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            checked: None,
        }
    }

    pub(crate) fn checkable(text: impl Into<String>, done: bool) -> Self {
        Self {
            text: text.into(),
            checked: Some(done),
        }
    }
}

/// The one capability a screen must provide for row deletion: remove the
/// record behind `position` from the backing store. The pane calls it and
/// only drops its local row when the removal succeeded.
pub(crate) trait DeleteAt {
    fn delete_at(&mut self, position: usize) -> Result<(), StoreError>;
}

/// Selection-tracking list state. Owned by each screen; rebuilt rows come in
/// through [`set_rows`](ListPane::set_rows) after every store round-trip.
pub(crate) struct ListPane {
    rows: Vec<RowItem>,
    selected: usize,
    placeholder: &'static str,
}

impl ListPane {
    pub(crate) fn new(placeholder: &'static str) -> Self {
        Self {
            rows: Vec::new(),
            selected: 0,
            placeholder,
        }
    }

    pub(crate) fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    /// Replace all rows, clamping the selection so it stays on a real row.
    pub(crate) fn set_rows(&mut self, rows: Vec<RowItem>) {
        self.rows = rows;
        self.ensure_in_bounds();
    }

    /// Jump the selection to an absolute index. Out-of-range values clamp to
    /// the last row.
    pub(crate) fn select(&mut self, index: usize) {
        self.selected = index;
        self.ensure_in_bounds();
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.rows.is_empty() {
            return;
        }
        let len = self.rows.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        if !self.rows.is_empty() {
            self.selected = 0;
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.rows.is_empty() {
            self.selected = self.rows.len() - 1;
        }
    }

    /// Forward a delete request for the selected row to the owning screen's
    /// capability. On success the row is removed locally too, so subsequent
    /// positions shift down by one even before the next reload. Returns
    /// `Ok(false)` when there was nothing to delete.
    pub(crate) fn delete_current(&mut self, target: &mut dyn DeleteAt) -> Result<bool, StoreError> {
        if self.rows.is_empty() {
            return Ok(false);
        }
        target.delete_at(self.selected)?;
        self.rows.remove(self.selected);
        self.ensure_in_bounds();
        Ok(true)
    }

    fn ensure_in_bounds(&mut self) {
        if self.rows.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.rows.len() {
            self.selected = self.rows.len() - 1;
        }
    }

    /// Render the rows into `area`, or the placeholder when there are none.
    pub(crate) fn draw(&self, frame: &mut Frame, area: Rect, title: &str) {
        let block = Block::default().borders(Borders::ALL).title(title.to_string());

        if self.rows.is_empty() {
            let message = Paragraph::new(self.placeholder)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = self.rows.iter().map(row_line).map(ListItem::new).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Build the display line for one row: the text plus a trailing check mark
/// when the row is done.
fn row_line(row: &RowItem) -> Line<'static> {
    let mut spans = vec![Span::raw(row.text.clone())];
    if row.checked == Some(true) {
        spans.push(Span::styled("  ✓", Style::default().fg(Color::Green)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::{DeleteAt, ListPane, RowItem};
    use crate::store::StoreError;

    struct Recorder {
        deleted: Vec<usize>,
        fail: bool,
    }

    impl DeleteAt for Recorder {
        fn delete_at(&mut self, position: usize) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::NotFound("row"));
            }
            self.deleted.push(position);
            Ok(())
        }
    }

    fn pane_with(n: usize) -> ListPane {
        let mut pane = ListPane::new("empty");
        pane.set_rows((0..n).map(|i| RowItem::plain(format!("row {i}"))).collect());
        pane
    }

    #[test]
    fn selection_clamps_at_both_ends() {
        let mut pane = pane_with(3);
        pane.move_selection(-5);
        assert_eq!(pane.selected(), 0);
        pane.move_selection(10);
        assert_eq!(pane.selected(), 2);
        pane.select_first();
        assert_eq!(pane.selected(), 0);
        pane.select_last();
        assert_eq!(pane.selected(), 2);
    }

    #[test]
    fn delete_forwards_position_and_shifts_rows() {
        let mut pane = pane_with(3);
        pane.select(1);
        let mut recorder = Recorder {
            deleted: Vec::new(),
            fail: false,
        };
        assert!(pane.delete_current(&mut recorder).unwrap());
        assert_eq!(recorder.deleted, vec![1]);
        assert_eq!(pane.row_count(), 2);
        assert_eq!(pane.selected(), 1);
    }

    #[test]
    fn delete_on_last_row_moves_selection_up() {
        let mut pane = pane_with(2);
        pane.select_last();
        let mut recorder = Recorder {
            deleted: Vec::new(),
            fail: false,
        };
        assert!(pane.delete_current(&mut recorder).unwrap());
        assert_eq!(pane.selected(), 0);
        assert_eq!(pane.row_count(), 1);
    }

    #[test]
    fn failed_delete_leaves_rows_untouched() {
        let mut pane = pane_with(2);
        let mut recorder = Recorder {
            deleted: Vec::new(),
            fail: true,
        };
        assert!(pane.delete_current(&mut recorder).is_err());
        assert_eq!(pane.row_count(), 2);
    }

    #[test]
    fn delete_on_empty_pane_is_a_no_op() {
        let mut pane = ListPane::new("empty");
        let mut recorder = Recorder {
            deleted: Vec::new(),
            fail: false,
        };
        assert!(!pane.delete_current(&mut recorder).unwrap());
        assert!(recorder.deleted.is_empty());
    }
}
