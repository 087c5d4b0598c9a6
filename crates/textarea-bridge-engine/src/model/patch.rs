/// Result of applying an input delta to a [`TextModel`](super::TextModel)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Byte range of the inserted text in the updated buffer
    pub changed: std::ops::Range<usize>,
    /// Byte range of the replaced text in the buffer before the edit
    pub replaced: std::ops::Range<usize>,
    pub new_selection: std::ops::Range<usize>,
    pub version: u64,
}
