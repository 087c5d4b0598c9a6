pub mod a11y;
pub mod input;
pub mod model;
pub mod text;

// Re-export key types for easier usage
pub use a11y::PagedScreenReaderStrategy;
pub use input::{
    DeduceOptions, InputDelta, InputTracker, MemoryTextArea, TextAreaState, TextAreaWrapper,
    deduce_input, deduce_input_with,
};
pub use model::{EndOfLinePreference, LineModel, Patch, Position, Selection, TextModel};
