/*!
 * # Line Model
 *
 * The structured side of the bridge. The screen reader pager only needs a
 * read-only, line-oriented view of the document, expressed by [`LineModel`].
 * [`TextModel`] is the xi-rope backed implementation used by the tracker,
 * the CLI and the tests; it also consumes [`InputDelta`](crate::InputDelta)s
 * produced by the differ.
 *
 * Positions are 1-based and columns count UTF-16 code units so that they
 * line up with the offsets a native widget reports.
 */

pub mod patch;
pub mod position;
pub mod text_model;

pub use patch::Patch;
pub use position::{Position, Selection};
pub use text_model::{ModelError, TextModel};

/// Line separator used when a range spanning several lines is read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndOfLinePreference {
    /// Use the separator the model detected in its own text.
    #[default]
    TextDefined,
    Lf,
    CrLf,
}

/// Read-only, line-oriented access to a structured document.
pub trait LineModel {
    /// Number of lines; an empty document has one empty line.
    fn line_count(&self) -> usize;

    /// `1 + utf16_len(line)`; the column just past the last character.
    fn line_max_column(&self, line_number: usize) -> usize;

    /// Text between `range.start` and `range.end`, with line breaks rendered
    /// according to `eol`.
    fn value_in_range(&self, range: Selection, eol: EndOfLinePreference) -> String;
}
