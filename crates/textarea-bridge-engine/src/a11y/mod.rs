//! Screen reader support.

pub mod pager;

pub use pager::{DEFAULT_LINES_PER_PAGE, DEFAULT_MAX_CHARS, PagedScreenReaderStrategy};
