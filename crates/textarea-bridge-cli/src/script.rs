use serde::Deserialize;
use std::fmt;
use textarea_bridge_engine::text::utf16_len;
use textarea_bridge_engine::{
    InputDelta, InputTracker, MemoryTextArea, Selection, TextAreaState, TextModel,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Step {step}: expected either `value` or `page`")]
    EmptyStep { step: usize },

    #[error("Step {step}: `value` and `page` cannot be combined")]
    AmbiguousStep { step: usize },

    #[error("Step {step}: selection {start}..{end} is outside a value of length {len}")]
    SelectionOutOfBounds {
        step: usize,
        start: usize,
        end: usize,
        len: usize,
    },
}

/// A recorded editing session
#[derive(Debug, Deserialize)]
pub struct Script {
    /// Initial content of the structured document
    #[serde(default)]
    pub document: String,
    #[serde(default, rename = "step")]
    pub steps: Vec<RawStep>,
}

/// One `[[step]]` table: a widget observation or a paging request
#[derive(Debug, Deserialize)]
pub struct RawStep {
    pub value: Option<String>,
    pub selection_start: Option<usize>,
    pub selection_end: Option<usize>,
    pub page: Option<PageRequest>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageRequest {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: Option<usize>,
    pub end_column: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The widget was seen in this state
    Observe(TextAreaState),
    /// The editor selection moved; refresh the screen reader page
    Page(Selection),
}

impl RawStep {
    fn into_action(self, step: usize) -> Result<Action, ScriptError> {
        match (self.value, self.page) {
            (Some(_), Some(_)) => Err(ScriptError::AmbiguousStep { step }),
            (None, None) => Err(ScriptError::EmptyStep { step }),
            (None, Some(page)) => Ok(Action::Page(Selection::from_coords(
                page.start_line,
                page.start_column,
                page.end_line.unwrap_or(page.start_line),
                page.end_column.unwrap_or(page.start_column),
            ))),
            (Some(value), None) => {
                let len = utf16_len(&value);
                let end = self.selection_end.unwrap_or(len);
                let start = self.selection_start.unwrap_or(end);
                if start > end || end > len {
                    return Err(ScriptError::SelectionOutOfBounds {
                        step,
                        start,
                        end,
                        len,
                    });
                }
                Ok(Action::Observe(TextAreaState::new(value, start, end)))
            }
        }
    }
}

impl Script {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Validate every step, numbering them from 1
    pub fn actions(self) -> Result<Vec<Action>, ScriptError> {
        self.steps
            .into_iter()
            .enumerate()
            .map(|(i, step)| step.into_action(i + 1))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayEvent {
    Input {
        step: usize,
        observed: TextAreaState,
        delta: InputDelta,
    },
    Page {
        step: usize,
        selection: Selection,
        state: TextAreaState,
    },
}

impl fmt::Display for ReplayEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayEvent::Input {
                step,
                observed,
                delta,
            } => write!(
                f,
                "#{step} observed {observed}: type {:?}, replace {}",
                delta.text, delta.replace_char_cnt
            ),
            ReplayEvent::Page {
                step,
                selection,
                state,
            } => write!(f, "#{step} page for {selection}: {state}"),
        }
    }
}

/// Feed `actions` through a tracker and a model holding `document`
///
/// Returns the events in order together with the final document text.
pub fn replay(
    document: &str,
    actions: Vec<Action>,
    mut tracker: InputTracker,
) -> (Vec<ReplayEvent>, String) {
    let mut model = TextModel::new(document);
    let mut widget = MemoryTextArea::new();
    let mut events = Vec::with_capacity(actions.len());

    for (i, action) in actions.into_iter().enumerate() {
        let step = i + 1;
        match action {
            Action::Observe(observed) => {
                widget.simulate(
                    &observed.value,
                    observed.selection_start,
                    observed.selection_end,
                );
                let delta = tracker.on_input(&widget);
                model.apply_input(&delta);
                events.push(ReplayEvent::Input {
                    step,
                    observed,
                    delta,
                });
            }
            Action::Page(selection) => {
                model.set_selection(selection);
                let state = tracker
                    .write_screen_reader_content(&mut widget, &model, selection, "replay")
                    .clone();
                events.push(ReplayEvent::Page {
                    step,
                    selection,
                    state,
                });
            }
        }
    }

    (events, model.text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const IME_SCRIPT: &str = r#"
document = ""

[[step]]
value = "ｓ"
selection_start = 0
selection_end = 1

[[step]]
value = "せ"
selection_start = 0
selection_end = 1

[[step]]
value = "せ"
"#;

    #[test]
    fn test_parse_and_replay_ime() {
        let script = Script::parse(IME_SCRIPT).unwrap();
        let document = script.document.clone();
        let actions = script.actions().unwrap();

        let (events, text) = replay(&document, actions, InputTracker::default());

        assert_eq!(text, "せ");
        assert_eq!(
            events.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec![
                "#1 observed [ <ｓ>, selectionStart: 0, selectionEnd: 1]: type \"ｓ\", replace 0",
                "#2 observed [ <せ>, selectionStart: 0, selectionEnd: 1]: type \"せ\", replace 1",
                "#3 observed [ <せ>, selectionStart: 1, selectionEnd: 1]: type \"\", replace 0",
            ]
        );
    }

    #[test]
    fn test_bundled_script() {
        let script = Script::parse(include_str!("../scripts/ime_and_emoji.toml")).unwrap();
        let document = script.document.clone();

        let (events, text) = replay(&document, script.actions().unwrap(), InputTracker::default());

        assert_eq!(text, "せん sensei📅");
        assert_eq!(
            events.last(),
            Some(&ReplayEvent::Page {
                step: 8,
                selection: Selection::from_coords(1, 1, 1, 1),
                state: TextAreaState::new("せん sensei📅", 0, 0),
            })
        );
    }

    #[test]
    fn test_selection_defaults_to_caret_at_end() {
        let script = Script::parse("[[step]]\nvalue = \"abc\"\n").unwrap();
        assert_eq!(
            script.actions().unwrap(),
            vec![Action::Observe(TextAreaState::new("abc", 3, 3))]
        );
    }

    #[test]
    fn test_page_then_type() {
        let document = (1..=21)
            .map(|n| format!("L{n}"))
            .collect::<Vec<_>>()
            .join("\n");
        let script = Script::parse(
            r#"
[[step]]
page = { start_line = 12, start_column = 2 }

[[step]]
value = "L11\nLx12\nL13\nL14\nL15\nL16\nL17\nL18\nL19\nL20\n"
selection_start = 6
selection_end = 6
"#,
        )
        .unwrap();

        let (events, text) = replay(
            &document,
            script.actions().unwrap(),
            InputTracker::default(),
        );

        assert!(matches!(
            &events[0],
            ReplayEvent::Page { state, .. } if state.selection_start == 5
        ));
        assert!(matches!(
            &events[1],
            ReplayEvent::Input { delta, .. } if *delta == InputDelta::new("x", 0)
        ));
        assert!(text.contains("\nLx12\n"));
    }

    #[test]
    fn test_invalid_steps() {
        let script = Script::parse("[[step]]\nselection_start = 1\n").unwrap();
        assert_eq!(
            script.actions().unwrap_err(),
            ScriptError::EmptyStep { step: 1 }
        );

        let script = Script::parse(
            "[[step]]\nvalue = \"a\"\n[[step]]\nvalue = \"a\"\npage = { start_line = 1, start_column = 1 }\n",
        )
        .unwrap();
        assert_eq!(
            script.actions().unwrap_err(),
            ScriptError::AmbiguousStep { step: 2 }
        );

        let script =
            Script::parse("[[step]]\nvalue = \"ab\"\nselection_start = 1\nselection_end = 5\n")
                .unwrap();
        assert_eq!(
            script.actions().unwrap_err(),
            ScriptError::SelectionOutOfBounds {
                step: 1,
                start: 1,
                end: 5,
                len: 2
            }
        );
    }
}
