// UI layer: the top-level question loop. Each round reads a question, runs a
// selection session over the clippings, sends the composed prompt and prints
// the answer between two rules.

use crate::api::Assistant;
use crate::clippings::Clipping;
use crate::input::Prompter;
use crate::prompt::{compose, EmptySelection};
use crate::selection::SelectionSession;
use crate::style::{Role, Theme};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct UiOptions {
    pub theme: Theme,
    pub empty_selection: EmptySelection,
}

/// Run rounds until the reader types `exit` or input ends.
pub fn main_loop<A, P, W>(
    clippings: &[Clipping],
    assistant: &A,
    prompter: &mut P,
    out: &mut W,
    options: UiOptions,
) -> io::Result<()>
where
    A: Assistant,
    P: Prompter,
    W: Write,
{
    let theme = options.theme;
    print_banner(theme, out)?;
    if clippings.is_empty() {
        writeln!(out, "{}", theme.apply(Role::Notice, "No clippings/highlights found."))?;
    }

    loop {
        writeln!(out)?;
        let question = match prompter.read_line(&theme.apply(Role::Prompt, "Question"))? {
            Some(q) if !q.trim().eq_ignore_ascii_case("exit") => q,
            _ => {
                writeln!(out, "{}", theme.apply(Role::Success, "Bye."))?;
                return Ok(());
            }
        };

        let selected = SelectionSession::new(clippings, theme).run(prompter, out)?;
        if selected.is_empty() {
            writeln!(
                out,
                "{}",
                theme.apply(Role::Info, "No clippings selected. Proceeding with question only.")
            )?;
        }
        tracing::info!("asking with {} clipping(s)", selected.len());

        let prompt = compose(&selected, &question, options.empty_selection);
        let answer = ask_with_spinner(assistant, &prompt);

        writeln!(out)?;
        writeln!(out, "{}", theme.apply(Role::ResponseHeader, "AI Response:"))?;
        writeln!(out, "{}", theme.response_rule())?;
        writeln!(out, "{answer}")?;
        writeln!(out, "{}", theme.response_rule())?;
    }
}

fn print_banner<W: Write>(theme: Theme, out: &mut W) -> io::Result<()> {
    if let Some(rule) = theme.banner_rule() {
        writeln!(out, "{rule}")?;
    }
    writeln!(out, "{}", theme.apply(Role::Banner, "KINDLE CLIPPINGS AI ASSISTANT"))?;
    writeln!(out, "{}", theme.apply(Role::Hint, "Type 'exit' to quit."))?;
    if let Some(rule) = theme.banner_rule() {
        writeln!(out, "{rule}")?;
    }
    Ok(())
}

/// indicatif hides the spinner by itself when stderr is not a terminal.
fn ask_with_spinner<A: Assistant>(assistant: &A, prompt: &str) -> String {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Thinking...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let answer = assistant.ask(prompt);
    spinner.finish_and_clear();
    answer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::LinePrompter;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingAssistant {
        prompts: RefCell<Vec<String>>,
    }

    impl Assistant for RecordingAssistant {
        fn ask(&self, prompt: &str) -> String {
            self.prompts.borrow_mut().push(prompt.to_string());
            "  • stub answer".to_string()
        }
    }

    fn store() -> Vec<Clipping> {
        vec![
            Clipping { title: "Title1".into(), excerpt: "Highlight A".into() },
            Clipping { title: "Title2".into(), excerpt: "Highlight B".into() },
        ]
    }

    fn run(clippings: &[Clipping], script: &str, options: UiOptions) -> (Vec<String>, String) {
        let assistant = RecordingAssistant::default();
        let mut prompter = LinePrompter::new(script.as_bytes(), Vec::new());
        let mut out = Vec::new();
        main_loop(clippings, &assistant, &mut prompter, &mut out, options).unwrap();
        (assistant.prompts.into_inner(), String::from_utf8(out).unwrap())
    }

    fn plain() -> UiOptions {
        UiOptions { theme: Theme::Plain, ..UiOptions::default() }
    }

    #[test]
    fn question_with_selected_clipping_uses_template() {
        let (prompts, out) = run(&store(), "What is A?\n1\ndone\nexit\n", plain());
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Clippings:\n- Highlight A\n\nQuestion:\nWhat is A?\n"));
        let framed = format!("AI Response:\n{rule}\n  • stub answer\n{rule}\n", rule = "-".repeat(40));
        assert!(out.contains(&framed));
        assert!(out.trim_end().ends_with("Bye."));
    }

    #[test]
    fn no_selection_sends_the_bare_question() {
        let (prompts, out) = run(&store(), "Why?\ndone\nEXIT\n", plain());
        assert_eq!(prompts, vec!["Why?".to_string()]);
        assert!(out.contains("No clippings selected. Proceeding with question only."));
    }

    #[test]
    fn template_policy_wraps_empty_selection() {
        let options = UiOptions { theme: Theme::Plain, empty_selection: EmptySelection::Template };
        let (prompts, _) = run(&store(), "Why?\nexit\nexit\n", options);
        assert!(prompts[0].contains("Clippings:\n\n\nQuestion:\nWhy?"));
    }

    #[test]
    fn each_round_starts_a_fresh_selection() {
        let (prompts, _) = run(&store(), "Q1\n1\ndone\nQ2\n2\ndone\nexit\n", plain());
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("- Highlight A"));
        assert!(!prompts[1].contains("- Highlight A"));
        assert!(prompts[1].contains("- Highlight B"));
    }

    #[test]
    fn empty_store_is_announced_but_not_fatal() {
        let (prompts, out) = run(&[], "Anything?\ndone\nexit\n", plain());
        assert!(out.contains("No clippings/highlights found."));
        assert_eq!(prompts, vec!["Anything?".to_string()]);
    }

    #[test]
    fn closed_input_says_goodbye() {
        let (prompts, out) = run(&store(), "", plain());
        assert!(prompts.is_empty());
        assert!(out.contains("KINDLE CLIPPINGS AI ASSISTANT"));
        assert!(out.contains("Bye."));
    }

    #[test]
    fn mono_theme_frames_the_banner() {
        let options = UiOptions { theme: Theme::Mono, ..UiOptions::default() };
        let (_, out) = run(&store(), "exit\n", options);
        assert!(out.starts_with(&"█".repeat(42)));
    }
}
