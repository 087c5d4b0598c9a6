//! Deduce typed input from two consecutive widget snapshots.
//!
//! The widget never tells us which keys were pressed, only what it contains
//! afterwards. [`deduce_input`] compares the last known snapshot with a fresh
//! one and produces the smallest edit that explains the change:
//!
//! 1. **No-op**: value unchanged and caret collapsed (caret moves, accepted
//!    compositions).
//! 2. **Capped diff**: common prefix and suffix, clamped so that nothing at or
//!    inside the previous selection is ever trusted as unchanged.
//! 3. **Replace count**: with a collapsed caret, the characters before the
//!    previous selection that must go; with a live selection (composition in
//!    progress), the whole superseded span.
//! 4. **Stray insertion**: an OS inserting a single grapheme (emoji picker)
//!    somewhere unrelated to the caret is reported as a pure insertion.
//!
//! All counts are UTF-16 code units.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use super::TextAreaState;
use crate::text::{is_high_surrogate, is_low_surrogate};

/// Edit to apply to the structured buffer
///
/// Delete `replace_char_cnt` UTF-16 code units ending at the caret (on top of
/// whatever the buffer's own selection removes), then insert `text`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputDelta {
    pub text: String,
    pub replace_char_cnt: usize,
}

impl InputDelta {
    pub const EMPTY: InputDelta = InputDelta {
        text: String::new(),
        replace_char_cnt: 0,
    };

    pub fn new(text: impl Into<String>, replace_char_cnt: usize) -> Self {
        Self {
            text: text.into(),
            replace_char_cnt,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.replace_char_cnt == 0
    }
}

/// Tunables for [`deduce_input_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeduceOptions {
    /// Report lone graphemes inserted away from the caret as pure insertions
    pub stray_insertion_fallback: bool,
}

impl Default for DeduceOptions {
    fn default() -> Self {
        Self {
            stray_insertion_fallback: true,
        }
    }
}

/// Prefix/suffix comparison of two widget values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDiff {
    /// Code units shared at the start of both values
    pub prefix_len: usize,
    /// Code units shared at the end of both values
    pub suffix_len: usize,
    /// Old text between prefix and suffix
    pub deleted: String,
    /// Length of `deleted` in code units
    pub deleted_len: usize,
    /// New text between prefix and suffix
    pub inserted: String,
}

/// Deduce the edit between `previous` and `current` with default options
pub fn deduce_input(previous: &TextAreaState, current: &TextAreaState) -> InputDelta {
    deduce_input_with(previous, current, &DeduceOptions::default())
}

pub fn deduce_input_with(
    previous: &TextAreaState,
    current: &TextAreaState,
    options: &DeduceOptions,
) -> InputDelta {
    if is_unchanged(previous, current) {
        log::trace!("deduce_input: no change between {previous} and {current}");
        return InputDelta::EMPTY;
    }

    let capped = capped_diff(previous, current);

    if options.stray_insertion_fallback
        && let Some(text) = stray_insertion(previous, current, &capped)
    {
        log::trace!("deduce_input: stray insertion {text:?} away from the caret");
        return InputDelta::new(text, 0);
    }

    let replace_char_cnt = if current.is_collapsed() {
        previous.selection_start.saturating_sub(capped.prefix_len)
    } else {
        capped.deleted_len
    };

    log::trace!(
        "deduce_input: prefix {} suffix {} -> {:?} replacing {}",
        capped.prefix_len,
        capped.suffix_len,
        capped.inserted,
        replace_char_cnt
    );

    InputDelta {
        text: capped.inserted,
        replace_char_cnt,
    }
}

/// Diff whose prefix stops at `previous.selection_start` and whose suffix
/// stops at `previous.selection_end`.
pub fn capped_diff(previous: &TextAreaState, current: &TextAreaState) -> TextDiff {
    let prev: Vec<u16> = previous.value.encode_utf16().collect();
    let curr: Vec<u16> = current.value.encode_utf16().collect();
    let suffix_cap = prev.len().saturating_sub(previous.selection_end);
    diff_units(&prev, &curr, previous.selection_start, suffix_cap)
}

/// Diff using the natural common prefix and suffix, ignoring selections.
pub fn uncapped_diff(previous: &str, current: &str) -> TextDiff {
    let prev: Vec<u16> = previous.encode_utf16().collect();
    let curr: Vec<u16> = current.encode_utf16().collect();
    diff_units(&prev, &curr, usize::MAX, usize::MAX)
}

fn diff_units(prev: &[u16], curr: &[u16], prefix_cap: usize, suffix_cap: usize) -> TextDiff {
    let mut prefix_len = common_prefix_len(prev, curr).min(prefix_cap);
    if prefix_len > 0 && is_high_surrogate(prev[prefix_len - 1]) {
        prefix_len -= 1;
    }

    let mut suffix_len =
        common_suffix_len(&prev[prefix_len..], &curr[prefix_len..]).min(suffix_cap);
    if suffix_len > 0 && is_low_surrogate(prev[prev.len() - suffix_len]) {
        suffix_len -= 1;
    }

    let deleted = &prev[prefix_len..prev.len() - suffix_len];
    let inserted = &curr[prefix_len..curr.len() - suffix_len];

    TextDiff {
        prefix_len,
        suffix_len,
        deleted: String::from_utf16_lossy(deleted),
        deleted_len: deleted.len(),
        inserted: String::from_utf16_lossy(inserted),
    }
}

fn common_prefix_len(a: &[u16], b: &[u16]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix_len(a: &[u16], b: &[u16]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Same value and a collapsed caret: either the caret just moved, or an IME
/// composition spanning the whole value was accepted as-is.
fn is_unchanged(previous: &TextAreaState, current: &TextAreaState) -> bool {
    if current.value != previous.value || !current.is_collapsed() {
        return false;
    }
    if previous.is_collapsed() {
        return true;
    }

    let len = previous.utf16_len();
    previous.selection_start == 0
        && previous.selection_end == len
        && current.selection_end == len
        && !current.value.contains('\n')
        && contains_full_width(&current.value)
}

fn contains_full_width(text: &str) -> bool {
    text.chars().any(|c| c.width() == Some(2))
}

/// An OS service (emoji picker, dictation) dropped a single grapheme into the
/// text without going through the caret.
///
/// Only engages when the capped diff would throw old text away, the uncapped
/// diff shows nothing was actually removed, the insert is one grapheme
/// cluster, and it landed outside the previous selection.
fn stray_insertion(
    previous: &TextAreaState,
    current: &TextAreaState,
    capped: &TextDiff,
) -> Option<String> {
    if !current.is_collapsed() || capped.deleted_len == 0 {
        return None;
    }

    let uncapped = uncapped_diff(&previous.value, &current.value);
    if uncapped.deleted_len != 0 || uncapped.inserted.graphemes(true).count() != 1 {
        return None;
    }

    let at = uncapped.prefix_len;
    if (previous.selection_start..=previous.selection_end).contains(&at) {
        return None;
    }

    Some(uncapped.inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state(value: &str, start: usize, end: usize) -> TextAreaState {
        TextAreaState::new(value, start, end)
    }

    #[test]
    fn test_capped_diff_respects_previous_selection() {
        let diff = capped_diff(&state("]\n", 1, 2), &state("]\n", 2, 2));
        assert_eq!(diff.prefix_len, 1);
        assert_eq!(diff.suffix_len, 0);
        assert_eq!(diff.deleted, "\n");
        assert_eq!(diff.inserted, "\n");
    }

    #[test]
    fn test_uncapped_diff_isolates_insert() {
        let diff = uncapped_diff("some1  text", "some💊1  text");
        assert_eq!(diff.prefix_len, 4);
        assert_eq!(diff.suffix_len, 7);
        assert_eq!(diff.deleted_len, 0);
        assert_eq!(diff.inserted, "💊");
    }

    #[test]
    fn test_diff_never_splits_surrogate_pair() {
        // both emoji share the same high surrogate
        let diff = uncapped_diff("😀", "😁");
        assert_eq!(diff.prefix_len, 0);
        assert_eq!(diff.deleted, "😀");
        assert_eq!(diff.inserted, "😁");

        let diff = uncapped_diff("x😀", "y😀");
        assert_eq!(diff.suffix_len, 2);
        assert_eq!(diff.inserted, "y");
    }

    #[test]
    fn test_suffix_snaps_off_low_surrogate() {
        // shared trailing low surrogate, different high surrogates
        let a = String::from_utf16(&[0xD83D, 0xDE00]).unwrap();
        let b = String::from_utf16(&[0xD83E, 0xDE00]).unwrap();
        let diff = uncapped_diff(&a, &b);
        assert_eq!(diff.suffix_len, 0);
        assert_eq!(diff.deleted, a);
        assert_eq!(diff.inserted, b);
    }

    #[test]
    fn test_unchanged_caret_move() {
        let delta = deduce_input(&state("Hello", 1, 1), &state("Hello", 4, 4));
        assert!(delta.is_empty());
    }

    #[test]
    fn test_unchanged_requires_full_width_for_composition_accept() {
        // Typing "a" over a selected "a" is real input
        let delta = deduce_input(&state("a", 0, 1), &state("a", 1, 1));
        assert_eq!(delta, InputDelta::new("a", 0));
    }

    #[test]
    fn test_stray_insertion_disabled() {
        let options = DeduceOptions {
            stray_insertion_fallback: false,
        };
        let delta = deduce_input_with(
            &state("abc def", 7, 7),
            &state("abc❤\u{fe0f} def", 9, 9),
            &options,
        );
        assert_eq!(delta, InputDelta::new("❤\u{fe0f} def", 4));
    }

    #[test]
    fn test_stray_insertion_requires_single_grapheme() {
        let delta = deduce_input(&state("hello", 5, 5), &state("abhello", 7, 7));
        assert_eq!(delta, InputDelta::new("abhello", 5));
    }

    #[test]
    fn test_stray_insertion_ignored_at_previous_selection() {
        // pasting "ab" over a selected "a"
        let delta = deduce_input(&state("a", 0, 1), &state("ab", 2, 2));
        assert_eq!(delta, InputDelta::new("ab", 0));
    }

    #[test]
    fn test_full_width_detection() {
        assert!(contains_full_width("せんせい"));
        assert!(contains_full_width("ｓ"));
        assert!(!contains_full_width("hello"));
        assert!(!contains_full_width("Hellö"));
    }
}
