use serde::{Deserialize, Serialize};
use std::fmt;

use super::TextAreaWrapper;
use crate::text::{utf16_len, utf16_to_byte_offset};

/// Immutable snapshot of a native text widget
///
/// Captures the widget's full value and its selection at one instant.
/// Selection offsets are UTF-16 code units and always satisfy
/// `selection_start <= selection_end <= utf16_len(value)`; the widget
/// wrapper clamps whatever the platform reports before a snapshot is built.
///
/// Snapshots are never changed in place: transformations such as
/// [`collapse_selection`](Self::collapse_selection) return a new value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextAreaState {
    pub value: String,
    pub selection_start: usize,
    pub selection_end: usize,
}

impl TextAreaState {
    /// Nothing observed yet
    pub const EMPTY: TextAreaState = TextAreaState {
        value: String::new(),
        selection_start: 0,
        selection_end: 0,
    };

    pub fn new(value: impl Into<String>, selection_start: usize, selection_end: usize) -> Self {
        let value = value.into();
        debug_assert!(
            selection_start <= selection_end && selection_end <= utf16_len(&value),
            "selection {selection_start}..{selection_end} out of bounds for {value:?}"
        );
        Self {
            value,
            selection_start,
            selection_end,
        }
    }

    /// Snapshot the widget's current value and selection
    pub fn read_from<W: TextAreaWrapper + ?Sized>(widget: &W) -> Self {
        Self::new(
            widget.get_value(),
            widget.get_selection_start(),
            widget.get_selection_end(),
        )
    }

    /// Push this snapshot into the widget
    ///
    /// The value is only written when it differs from the widget's, so an
    /// in-progress composition or scroll position is left alone. With
    /// `select` the full selection is restored, otherwise the caret is
    /// collapsed to `selection_end`. The selection is only written when it
    /// differs as well.
    pub fn write_to<W: TextAreaWrapper + ?Sized>(&self, widget: &mut W, reason: &str, select: bool) {
        if widget.get_value() != self.value {
            log::trace!("writing textarea value ({reason}): {:?}", self.value);
            widget.set_value(reason, &self.value);
        }

        let (start, end) = if select {
            (self.selection_start, self.selection_end)
        } else {
            (self.selection_end, self.selection_end)
        };
        if widget.get_selection_start() != start || widget.get_selection_end() != end {
            log::trace!("writing textarea selection ({reason}): {start}..{end}");
            widget.set_selection_range(reason, start, end);
        }
    }

    #[must_use]
    pub fn collapse_selection(&self) -> Self {
        Self {
            value: self.value.clone(),
            selection_start: self.selection_end,
            selection_end: self.selection_end,
        }
    }

    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.selection_start == self.selection_end
    }

    /// Length of the value in UTF-16 code units
    #[must_use]
    pub fn utf16_len(&self) -> usize {
        utf16_len(&self.value)
    }

    /// The highlighted part of the value
    #[must_use]
    pub fn selected_text(&self) -> &str {
        let start = utf16_to_byte_offset(&self.value, self.selection_start);
        let end = utf16_to_byte_offset(&self.value, self.selection_end).max(start);
        &self.value[start..end]
    }
}

impl fmt::Display for TextAreaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ <{}>, selectionStart: {}, selectionEnd: {}]",
            self.value, self.selection_start, self.selection_end
        )
    }
}
