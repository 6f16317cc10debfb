// Builds the text sent to the model from the chosen excerpts and the question.

use serde::{Deserialize, Serialize};

const PREAMBLE: &str = "I have some reading clippings. Please analyze them and answer my question.";

/// What to send when the reader picked no clippings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptySelection {
    /// Send the question as typed.
    #[default]
    BareQuestion,
    /// Use the clippings template anyway, with an empty clippings block.
    Template,
}

pub fn compose(selections: &[String], question: &str, empty: EmptySelection) -> String {
    if selections.is_empty() && empty == EmptySelection::BareQuestion {
        return question.to_string();
    }
    let clippings = selections
        .iter()
        .map(|clip| format!("- {clip}"))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("{PREAMBLE}\n\nClippings:\n{clippings}\n\nQuestion:\n{question}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_sends_bare_question() {
        assert_eq!(compose(&[], "Q", EmptySelection::BareQuestion), "Q");
    }

    #[test]
    fn empty_selection_with_template_policy_still_wraps() {
        assert_eq!(
            compose(&[], "Q", EmptySelection::Template),
            format!("{PREAMBLE}\n\nClippings:\n\n\nQuestion:\nQ\n")
        );
    }

    #[test]
    fn selections_become_bullets() {
        let selections = vec!["a".to_string(), "b".to_string()];
        let prompt = compose(&selections, "Q", EmptySelection::BareQuestion);
        assert_eq!(prompt, format!("{PREAMBLE}\n\nClippings:\n- a\n\n- b\n\nQuestion:\nQ\n"));
    }

    #[test]
    fn policy_does_not_matter_once_something_is_selected() {
        let selections = vec!["a".to_string()];
        assert_eq!(
            compose(&selections, "Why?", EmptySelection::BareQuestion),
            compose(&selections, "Why?", EmptySelection::Template)
        );
    }
}
