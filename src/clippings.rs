// Clippings store: turns an e-reader "My Clippings.txt" export into a list
// of (title, excerpt) records. Loading never fails; a missing or unreadable
// file simply means there are no highlights to show.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Line separating two clippings in the export file.
pub const DELIMITER: &str = "==========";

/// Where a Kindle keeps its export.
pub const DEFAULT_CLIPPINGS_PATH: &str = "/mnt/us/documents/My Clippings.txt";

/// One highlighted passage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clipping {
    pub title: String,
    pub excerpt: String,
}

/// How much of a segment ends up in the excerpt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExcerptMode {
    /// Last non-blank line only.
    #[default]
    LastLine,
    /// Every line after the title, minus the Kindle metadata line.
    Full,
}

/// Read and parse the export at `path`.
pub fn load(path: &Path, mode: ExcerptMode) -> Vec<Clipping> {
    if !path.is_file() {
        tracing::debug!("no clippings file at {}", path.display());
        return Vec::new();
    }
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let clippings = parse(&content, mode);
            tracing::debug!("loaded {} clippings from {}", clippings.len(), path.display());
            clippings
        }
        Err(e) => {
            tracing::warn!("could not read {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Parse export text. Segments with fewer than two non-blank lines are dropped.
pub fn parse(content: &str, mode: ExcerptMode) -> Vec<Clipping> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    content
        .split(DELIMITER)
        .filter_map(|segment| parse_segment(segment, mode))
        .collect()
}

fn parse_segment(segment: &str, mode: ExcerptMode) -> Option<Clipping> {
    let lines: Vec<&str> = segment
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() < 2 {
        tracing::trace!("skipping segment with {} line(s)", lines.len());
        return None;
    }

    let excerpt = match mode {
        ExcerptMode::LastLine => lines[lines.len() - 1].to_string(),
        ExcerptMode::Full => {
            let mut body = &lines[1..];
            // "- Your Highlight on page 12 | Added on ..." sits right under the title
            if body.len() > 1 && body[0].starts_with("- ") {
                body = &body[1..];
            }
            body.join("\n")
        }
    };

    Some(Clipping {
        title: lines[0].to_string(),
        excerpt,
    })
}
