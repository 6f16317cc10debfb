// Selection session: pages through the clippings three at a time and
// collects the excerpts the reader wants to send along with a question.

use crate::clippings::Clipping;
use crate::input::Prompter;
use crate::style::{Role, Theme};
use std::io::{self, Write};

pub const PAGE_SIZE: usize = 3;
const EXCERPT_PREVIEW_CHARS: usize = 100;
const TITLE_PREVIEW_CHARS: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Browsing(usize),
    Done,
    Cancelled,
}

/// Result of feeding one line of input to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    PageChanged(usize),
    NoMorePages,
    Added(String),
    InvalidChoice,
    InvalidInput,
    Finished,
    Cancelled,
}

pub struct SelectionSession<'a> {
    clippings: &'a [Clipping],
    theme: Theme,
    state: SessionState,
    selected: Vec<String>,
}

impl<'a> SelectionSession<'a> {
    pub fn new(clippings: &'a [Clipping], theme: Theme) -> Self {
        Self {
            clippings,
            theme,
            state: SessionState::Browsing(0),
            selected: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn page_count(&self) -> usize {
        self.clippings.len().div_ceil(PAGE_SIZE)
    }

    /// Items visible on the current page; empty once the session is over.
    pub fn current_page(&self) -> &'a [Clipping] {
        match self.state {
            SessionState::Browsing(page) => {
                let clippings = self.clippings;
                let start = (page * PAGE_SIZE).min(clippings.len());
                let end = (start + PAGE_SIZE).min(clippings.len());
                &clippings[start..end]
            }
            SessionState::Done | SessionState::Cancelled => &[],
        }
    }

    /// Apply one line of input. Commands are case-insensitive and numbers
    /// are 1-based positions on the current page.
    pub fn apply(&mut self, input: &str) -> Event {
        let SessionState::Browsing(page) = self.state else {
            return Event::Finished;
        };
        let command = input.trim().to_lowercase();
        match command.as_str() {
            "next" => {
                if (page + 1) * PAGE_SIZE >= self.clippings.len() {
                    Event::NoMorePages
                } else {
                    self.state = SessionState::Browsing(page + 1);
                    Event::PageChanged(page + 1)
                }
            }
            "exit" => {
                self.state = SessionState::Cancelled;
                Event::Cancelled
            }
            "done" => {
                self.state = SessionState::Done;
                Event::Finished
            }
            other => match other.parse::<i64>() {
                Ok(n) => {
                    let items = self.current_page();
                    if n >= 1 && (n as usize) <= items.len() {
                        let excerpt = items[n as usize - 1].excerpt.clone();
                        self.selected.push(excerpt.clone());
                        Event::Added(excerpt)
                    } else {
                        Event::InvalidChoice
                    }
                }
                Err(_) => Event::InvalidInput,
            },
        }
    }

    /// Drive the session until `done`, `exit` or end of input and return
    /// the excerpts picked along the way.
    pub fn run<P: Prompter, W: Write>(mut self, prompter: &mut P, out: &mut W) -> io::Result<Vec<String>> {
        while let SessionState::Browsing(page) = self.state {
            self.render_page(out)?;
            let Some(line) = prompter.read_line(&self.theme.apply(Role::Prompt, "Your choice"))? else {
                tracing::debug!("input closed during selection");
                self.state = SessionState::Cancelled;
                break;
            };
            let event = self.apply(&line);
            tracing::debug!(page, ?event, "selection input");
            self.render_event(&event, out)?;
        }
        Ok(self.selected)
    }

    fn render_page<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let theme = self.theme;
        writeln!(out)?;
        writeln!(out, "{}", theme.apply(Role::Instructions, "Select a clipping to include (type the number):"))?;
        for (idx, clipping) in self.current_page().iter().enumerate() {
            let title = preview(&clipping.title, TITLE_PREVIEW_CHARS, false);
            let excerpt = preview(&clipping.excerpt, EXCERPT_PREVIEW_CHARS, true);
            writeln!(out, "{}. {}", idx + 1, theme.apply(Role::Title, &title))?;
            writeln!(out, "   {}", theme.apply(Role::Excerpt, &excerpt))?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "{}",
            theme.apply(Role::Hint, "Type 'next' for more, 'done' to finish, or 'exit' to quit.")
        )
    }

    fn render_event<W: Write>(&self, event: &Event, out: &mut W) -> io::Result<()> {
        let (role, message) = match event {
            Event::PageChanged(_) | Event::Finished => return Ok(()),
            Event::NoMorePages => (Role::Notice, "No more clippings to show."),
            Event::Added(_) => (Role::Success, "Clipping added to prompt."),
            Event::InvalidChoice => (Role::Notice, "Invalid choice. Try again."),
            Event::InvalidInput => (Role::Notice, "Invalid input. Try again."),
            Event::Cancelled => (Role::Notice, "Exiting selection."),
        };
        writeln!(out, "{}", self.theme.apply(role, message))
    }
}

/// First `max` characters of `text`. Excerpts always get an ellipsis,
/// titles only when cut.
fn preview(text: &str, max: usize, always_ellipsis: bool) -> String {
    let cut = text.chars().count() > max;
    let mut shown: String = text.chars().take(max).collect();
    if cut || always_ellipsis {
        shown.push_str("...");
    }
    shown
}
