use super::{DeduceOptions, InputDelta, TextAreaState, TextAreaWrapper, deduce_input_with};
use crate::a11y::PagedScreenReaderStrategy;
use crate::model::{LineModel, Selection};

/// Owns the last known widget snapshot and turns widget changes into deltas.
///
/// Every call to [`on_input`](Self::on_input) must see the widget state that
/// directly follows the one stored from the previous call; writing screen
/// reader content through the tracker keeps that pairing intact.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    state: TextAreaState,
    options: DeduceOptions,
    pager: PagedScreenReaderStrategy,
}

impl InputTracker {
    pub fn new(options: DeduceOptions, pager: PagedScreenReaderStrategy) -> Self {
        Self {
            state: TextAreaState::EMPTY,
            options,
            pager,
        }
    }

    pub fn last_state(&self) -> &TextAreaState {
        &self.state
    }

    /// Forget the last snapshot, e.g. after the widget lost focus
    pub fn reset(&mut self) {
        self.state = TextAreaState::EMPTY;
    }

    /// Read the widget and deduce what changed since the last snapshot
    pub fn on_input<W: TextAreaWrapper + ?Sized>(&mut self, widget: &W) -> InputDelta {
        let current = TextAreaState::read_from(widget);
        let delta = deduce_input_with(&self.state, &current, &self.options);
        log::debug!("{} -> {}: {:?}", self.state, current, delta);
        self.state = current;
        delta
    }

    /// Page the model around `selection` and push the page into the widget
    pub fn write_screen_reader_content<W, M>(
        &mut self,
        widget: &mut W,
        model: &M,
        selection: Selection,
        reason: &str,
    ) -> &TextAreaState
    where
        W: TextAreaWrapper + ?Sized,
        M: LineModel + ?Sized,
    {
        let page = self.pager.from_editor_selection(&self.state, model, selection);
        page.write_to(widget, reason, true);
        self.state = page;
        &self.state
    }
}
