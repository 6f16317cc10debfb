// Presentation layer: one `Theme` value is created at startup and handed to
// every renderer, so nothing reads styling from global state.

use crossterm::style::{style, Attribute, Color, Stylize};
use serde::{Deserialize, Serialize};

/// What a piece of text is, independent of how it looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Banner,
    Instructions,
    Title,
    Excerpt,
    Hint,
    Prompt,
    Success,
    Notice,
    Info,
    Bullet,
    Heading,
    ResponseHeader,
    Error,
}

/// Available style sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// ANSI colors.
    #[default]
    Color,
    /// Bold, dim, underline and reverse video, no hues.
    Mono,
    /// No escape codes at all.
    Plain,
}

struct Paint {
    fg: Option<Color>,
    attrs: &'static [Attribute],
}

const fn fg(color: Color) -> Paint {
    Paint { fg: Some(color), attrs: &[] }
}

const fn attr(attrs: &'static [Attribute]) -> Paint {
    Paint { fg: None, attrs }
}

impl Theme {
    /// Plain when `NO_COLOR` is set to anything non-empty.
    pub fn or_no_color(self, no_color: Option<&str>) -> Self {
        match no_color {
            Some(v) if !v.is_empty() => Theme::Plain,
            _ => self,
        }
    }

    fn paint(self, role: Role) -> Option<Paint> {
        let paint = match self {
            Theme::Plain => return None,
            Theme::Color => match role {
                Role::Banner | Role::Instructions => attr(&[Attribute::Bold]),
                Role::Title | Role::Heading | Role::ResponseHeader => fg(Color::Cyan),
                Role::Excerpt | Role::Info => fg(Color::Yellow),
                Role::Hint => fg(Color::Magenta),
                Role::Prompt => fg(Color::Blue),
                Role::Success | Role::Bullet => fg(Color::Green),
                Role::Notice | Role::Error => fg(Color::Red),
            },
            Theme::Mono => match role {
                Role::Banner | Role::Instructions | Role::Title => attr(&[Attribute::Bold]),
                Role::Success | Role::Bullet => attr(&[Attribute::Bold]),
                Role::Excerpt | Role::Hint | Role::Info => fg(Color::DarkGrey),
                Role::Prompt | Role::ResponseHeader => attr(&[Attribute::Reverse]),
                Role::Notice | Role::Error => attr(&[Attribute::Dim]),
                Role::Heading => attr(&[Attribute::Underlined]),
            },
        };
        Some(paint)
    }

    /// Style `text` for `role`.
    pub fn apply(self, role: Role, text: &str) -> String {
        let Some(paint) = self.paint(role) else {
            return text.to_string();
        };
        let mut styled = style(text);
        if let Some(color) = paint.fg {
            styled = styled.with(color);
        }
        for a in paint.attrs {
            styled = styled.attribute(*a);
        }
        styled.to_string()
    }

    /// Rule printed above and below the startup banner, if any.
    pub fn banner_rule(self) -> Option<String> {
        match self {
            Theme::Mono => Some("█".repeat(42)),
            Theme::Color | Theme::Plain => None,
        }
    }

    /// Rule framing the assistant's answer.
    pub fn response_rule(self) -> String {
        match self {
            Theme::Mono => "★".repeat(42),
            Theme::Color | Theme::Plain => "-".repeat(40),
        }
    }

    /// Display transform for a raw model answer: `- ` lines become bullets,
    /// `#` lines become headings, everything else passes through.
    pub fn format_response(self, raw: &str) -> String {
        raw.lines()
            .map(|line| {
                if let Some(rest) = line.strip_prefix("- ") {
                    format!("  {} {}", self.apply(Role::Bullet, "•"), rest)
                } else if line.starts_with('#') {
                    self.apply(Role::Heading, line)
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
