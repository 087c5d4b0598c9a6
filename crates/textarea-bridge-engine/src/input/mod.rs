/*!
 * # Native Input Bridge
 *
 * Browsers and operating systems do not report keystrokes for a native text
 * widget; they only let us poll "the widget now contains this string with
 * this selection". This module rebuilds the user's edits from those polls.
 *
 * ## Data Flow
 *
 * 1. **Snapshot**: [`TextAreaState::read_from`] captures the widget through
 *    the [`TextAreaWrapper`] capability.
 * 2. **Deduce**: [`deduce_input`] compares it with the last known snapshot
 *    and yields an [`InputDelta`] (text to insert, characters to replace).
 * 3. **Apply**: the structured buffer applies the delta
 *    ([`TextModel::apply_input`](crate::model::TextModel::apply_input)).
 * 4. **Remember**: the new snapshot becomes the last known one.
 *
 * [`InputTracker`] bundles steps 1, 2 and 4, and also writes screen reader
 * pages back into the widget so the next diff starts from what the widget
 * really shows.
 *
 * Diffing is pure: it only ever sees two snapshot values, never the widget.
 */

pub mod deduce;
pub mod state;
pub mod tracker;
pub mod wrapper;

pub use deduce::{
    DeduceOptions, InputDelta, TextDiff, capped_diff, deduce_input, deduce_input_with,
    uncapped_diff,
};
pub use state::TextAreaState;
pub use tracker::InputTracker;
pub use wrapper::{MemoryTextArea, TextAreaWrapper};
