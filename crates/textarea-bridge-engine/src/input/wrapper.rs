use crate::text::utf16_len;

/// The native text widget as seen by the bridge.
///
/// Offsets are UTF-16 code units. `reason` arguments are free-form
/// diagnostics describing why a write happened; they never change behaviour.
pub trait TextAreaWrapper {
    fn get_value(&self) -> String;
    fn set_value(&mut self, reason: &str, value: &str);
    fn get_selection_start(&self) -> usize;
    fn get_selection_end(&self) -> usize;
    /// Selects `start..end`, clamping both offsets into the current value.
    fn set_selection_range(&mut self, reason: &str, start: usize, end: usize);
}

/// In-memory widget that behaves like a browser `<textarea>`.
///
/// Setting the value moves the caret to the end, and selection offsets are
/// clamped into the value. Write counters let callers check that unchanged
/// state is never written back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTextArea {
    value: String,
    selection_start: usize,
    selection_end: usize,
    pub value_writes: usize,
    pub selection_writes: usize,
    pub last_reason: Option<String>,
}

impl MemoryTextArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the user or the OS changing the widget. Not counted as a
    /// write from the bridge.
    pub fn simulate(&mut self, value: &str, selection_start: usize, selection_end: usize) {
        self.value = value.to_string();
        let (start, end) = clamp_range(&self.value, selection_start, selection_end);
        self.selection_start = start;
        self.selection_end = end;
    }
}

impl TextAreaWrapper for MemoryTextArea {
    fn get_value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, reason: &str, value: &str) {
        self.value = value.to_string();
        let len = utf16_len(&self.value);
        self.selection_start = len;
        self.selection_end = len;
        self.value_writes += 1;
        self.last_reason = Some(reason.to_string());
    }

    fn get_selection_start(&self) -> usize {
        self.selection_start
    }

    fn get_selection_end(&self) -> usize {
        self.selection_end
    }

    fn set_selection_range(&mut self, reason: &str, start: usize, end: usize) {
        let (start, end) = clamp_range(&self.value, start, end);
        self.selection_start = start;
        self.selection_end = end;
        self.selection_writes += 1;
        self.last_reason = Some(reason.to_string());
    }
}

fn clamp_range(value: &str, start: usize, end: usize) -> (usize, usize) {
    let len = utf16_len(value);
    let end = end.min(len);
    (start.min(end), end)
}
