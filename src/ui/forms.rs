//! Modal state carried by the input modes: the single-field text prompt used
//! for both "add" flows, the delete confirmation, and the live search query.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// One text field plus a cursor. Both record types are created from a single
/// user-entered string, so this prompt serves the add-collection and
/// add-entry flows alike. There is deliberately no validation: empty input
/// is accepted and persisted as-is.
#[derive(Default, Clone)]
pub(crate) struct TextPrompt {
    pub(crate) value: String,
}

impl TextPrompt {
    /// Append a printable character.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value.push(ch);
        true
    }

    /// Remove the last character.
    pub(crate) fn backspace(&mut self) {
        self.value.pop();
    }

    /// Character count, used to place the terminal cursor.
    pub(crate) fn value_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Render the input line with a dimmed placeholder when empty.
    pub(crate) fn build_line(&self, placeholder: &str) -> Line<'static> {
        if self.value.is_empty() {
            Line::from(Span::styled(
                placeholder.to_string(),
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(Span::raw(self.value.clone()))
        }
    }
}

/// What the pending delete confirmation points at. The id is not carried
/// here: confirmation always acts on the selected row of the current screen,
/// the same row the user was looking at when they pressed delete.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum DeleteTarget {
    Collection,
    Entry,
}

/// State for the delete confirmation dialog. Deletion always goes through
/// this extra step; there is no single-key destructive path.
#[derive(Clone)]
pub(crate) struct ConfirmDelete {
    pub(crate) target: DeleteTarget,
    pub(crate) label: String,
}

impl ConfirmDelete {
    pub(crate) fn new(target: DeleteTarget, label: impl Into<String>) -> Self {
        Self {
            target,
            label: label.into(),
        }
    }

    /// Dialog headline naming the kind of record about to go away.
    pub(crate) fn title(&self) -> &'static str {
        match self.target {
            DeleteTarget::Collection => "Delete List",
            DeleteTarget::Entry => "Delete To-Do",
        }
    }
}

/// State for an active inline search over the entries screen.
#[derive(Default, Clone)]
pub(crate) struct SearchState {
    pub(crate) query: String,
}
