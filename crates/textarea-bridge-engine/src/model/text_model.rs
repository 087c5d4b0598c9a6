use std::fmt;
use std::ops::Range;

use xi_rope::Rope;

use super::{EndOfLinePreference, LineModel, Patch, Position, Selection};
use crate::input::InputDelta;
use crate::text::{utf16_len, utf16_tail, utf16_to_byte_offset};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// Structured text buffer receiving deduced input
///
/// Holds the whole document in a single `xi_rope::Rope` together with the
/// current selection (as byte offsets) and a version counter bumped on every
/// edit. Line endings are kept verbatim; the separator found on the first
/// line break is remembered as the document's own convention.
#[derive(Clone)]
pub struct TextModel {
    pub(crate) buffer: Rope,
    /// Current selection/cursor position as byte offsets in buffer
    pub(crate) selection: Range<usize>,
    pub(crate) version: u64,
    pub(crate) eol: &'static str,
}

impl TextModel {
    /// Create a model from text, with the cursor at the end
    pub fn new(text: &str) -> Self {
        let buffer = Rope::from(text);
        let len = buffer.len();
        let eol = detect_eol(&buffer);
        Self {
            buffer,
            selection: len..len,
            version: 0,
            eol,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ModelError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::new(text))
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// The line separator this document uses
    pub fn eol(&self) -> &'static str {
        self.eol
    }

    /// Byte offset of `position`, clamped into the document
    pub fn offset_at(&self, position: Position) -> usize {
        if position.line_number == 0 {
            return 0;
        }
        if position.line_number > self.line_count() {
            return self.buffer.len();
        }
        let bounds = self.line_bounds(position.line_number);
        let content = self.buffer.slice_to_cow(bounds.clone());
        bounds.start + utf16_to_byte_offset(&content, position.column.saturating_sub(1))
    }

    /// Position of the byte `offset`, clamped into the document
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.buffer.len());
        let line_number = self.buffer.line_of_offset(offset) + 1;
        let bounds = self.line_bounds(line_number);
        let end = offset.clamp(bounds.start, bounds.end);
        let before = self.buffer.slice_to_cow(bounds.start..end);
        Position::new(line_number, utf16_len(&before) + 1)
    }

    pub fn selection(&self) -> Selection {
        Selection::new(
            self.position_at(self.selection.start),
            self.position_at(self.selection.end),
        )
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = self.offset_at(selection.start)..self.offset_at(selection.end);
    }

    /// Apply a deduced input delta at the current selection
    ///
    /// Removes the selection plus `replace_char_cnt` UTF-16 code units before
    /// it, inserts the delta text and leaves a caret right after the insert.
    pub fn apply_input(&mut self, delta: &InputDelta) -> Patch {
        let caret = self.selection.start;
        let before = self.buffer.slice_to_cow(0..caret);
        let delete_start = caret - utf16_tail(&before, delta.replace_char_cnt).len();

        let replaced = delete_start..self.selection.end;
        self.buffer.edit(replaced.clone(), delta.text.as_str());

        let new_caret = delete_start + delta.text.len();
        self.selection = new_caret..new_caret;
        self.version += 1;

        log::debug!(
            "applied input {:?} over bytes {:?} (version {})",
            delta.text,
            replaced,
            self.version
        );

        Patch {
            changed: delete_start..new_caret,
            replaced,
            new_selection: self.selection.clone(),
            version: self.version,
        }
    }

    /// Byte range of a line's content, line separator excluded
    fn line_bounds(&self, line_number: usize) -> Range<usize> {
        let line_count = self.line_count();
        let line = line_number.clamp(1, line_count);
        let start = self.buffer.offset_of_line(line - 1);
        let raw_end = if line < line_count {
            self.buffer.offset_of_line(line)
        } else {
            self.buffer.len()
        };
        let raw = self.buffer.slice_to_cow(start..raw_end);
        start..start + strip_eol(&raw).len()
    }
}

impl LineModel for TextModel {
    fn line_count(&self) -> usize {
        self.buffer.line_of_offset(self.buffer.len()) + 1
    }

    fn line_max_column(&self, line_number: usize) -> usize {
        let bounds = self.line_bounds(line_number);
        utf16_len(&self.buffer.slice_to_cow(bounds)) + 1
    }

    fn value_in_range(&self, range: Selection, eol: EndOfLinePreference) -> String {
        let start = self.offset_at(range.start);
        let end = self.offset_at(range.end).max(start);
        let raw = self.buffer.slice_to_cow(start..end);

        let separator = match eol {
            EndOfLinePreference::TextDefined => self.eol,
            EndOfLinePreference::Lf => "\n",
            EndOfLinePreference::CrLf => "\r\n",
        };

        let segments: Vec<&str> = raw.split('\n').collect();
        let last = segments.len() - 1;
        let mut out = String::with_capacity(raw.len());
        for (i, segment) in segments.iter().enumerate() {
            if i < last {
                out.push_str(segment.strip_suffix('\r').unwrap_or(segment));
                out.push_str(separator);
            } else {
                out.push_str(segment);
            }
        }
        out
    }
}

impl fmt::Debug for TextModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextModel")
            .field("text", &self.buffer.to_string())
            .field("selection", &self.selection)
            .field("version", &self.version)
            .finish()
    }
}

fn detect_eol(buffer: &Rope) -> &'static str {
    match buffer.lines_raw(..).next() {
        Some(line) if line.ends_with("\r\n") => "\r\n",
        _ => "\n",
    }
}

fn strip_eol(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(line) => line.strip_suffix('\r').unwrap_or(line),
        None => line,
    }
}
