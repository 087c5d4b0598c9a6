use crate::input::TextAreaState;
use crate::model::{EndOfLinePreference, LineModel, Position, Selection};
use crate::text::{utf16_head, utf16_len, utf16_tail};

pub const DEFAULT_LINES_PER_PAGE: usize = 10;
pub const DEFAULT_MAX_CHARS: usize = 500;

const ELLIPSIS: char = '\u{2026}';

/// Bounded excerpt of the document for assistive technology
///
/// Screen readers read whatever the native widget contains, so the widget is
/// filled with the page of lines around the selection instead of the whole
/// document. Pages are fixed runs of `lines_per_page` lines; every page but
/// the last ends with a line feed. Text before and after the selection is cut
/// to `max_chars` UTF-16 code units each, and a selection spanning more than
/// two pages is shown as its first and last page joined by an ellipsis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagedScreenReaderStrategy {
    lines_per_page: usize,
    max_chars: usize,
}

impl Default for PagedScreenReaderStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_LINES_PER_PAGE, DEFAULT_MAX_CHARS)
    }
}

impl PagedScreenReaderStrategy {
    pub fn new(lines_per_page: usize, max_chars: usize) -> Self {
        Self {
            lines_per_page: lines_per_page.max(1),
            max_chars,
        }
    }

    pub fn lines_per_page(&self) -> usize {
        self.lines_per_page
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Zero-based page containing `line_number`
    pub fn page_of_line(&self, line_number: usize) -> usize {
        line_number.saturating_sub(1) / self.lines_per_page
    }

    /// Range covering `page` from its first column up to the start of the
    /// following page's first line
    pub fn range_for_page(&self, page: usize) -> Selection {
        let start_line = page * self.lines_per_page + 1;
        let end_line = start_line + self.lines_per_page;
        Selection::from_coords(start_line, 1, end_line, 1)
    }

    /// Build the widget snapshot for `selection`
    ///
    /// `previous` is the snapshot currently in the widget; the page does not
    /// depend on it.
    pub fn from_editor_selection<M: LineModel + ?Sized>(
        &self,
        _previous: &TextAreaState,
        model: &M,
        selection: Selection,
    ) -> TextAreaState {
        let start_page = self.page_of_line(selection.start.line_number);
        let start_page_range = self.range_for_page(start_page);
        let end_page = self.page_of_line(selection.end.line_number);
        let end_page_range = self.range_for_page(end_page);

        let last_line = model.line_count();
        let document_end = Position::new(last_line, model.line_max_column(last_line));

        let read = |range: Option<Selection>| {
            range.map_or_else(String::new, |range| {
                model.value_in_range(range, EndOfLinePreference::Lf)
            })
        };

        let pretext = read(
            start_page_range.intersect(&Selection::new(Position::new(1, 1), selection.start)),
        );
        let posttext =
            read(end_page_range.intersect(&Selection::new(selection.end, document_end)));

        let text = if end_page <= start_page + 1 {
            model.value_in_range(selection, EndOfLinePreference::Lf)
        } else {
            let head = read(start_page_range.intersect(&selection));
            let tail = read(end_page_range.intersect(&selection));
            format!("{head}{ELLIPSIS}{tail}")
        };

        let pretext = utf16_tail(&pretext, self.max_chars);
        let posttext = utf16_head(&posttext, self.max_chars);
        let text = if utf16_len(&text) > 2 * self.max_chars {
            format!(
                "{}{ELLIPSIS}{}",
                utf16_head(&text, self.max_chars),
                utf16_tail(&text, self.max_chars)
            )
        } else {
            text
        };

        let selection_start = utf16_len(pretext);
        let selection_end = selection_start + utf16_len(&text);
        log::trace!(
            "screen reader page {start_page}..={end_page} for {selection}: {selection_start}..{selection_end}"
        );

        TextAreaState::new(
            format!("{pretext}{text}{posttext}"),
            selection_start,
            selection_end,
        )
    }
}
