// Library root
// -----------
// The binary (`main.rs`) wires these modules into the interactive CLI.
//
// - `clippings`: parses the e-reader export into (title, excerpt) records.
// - `selection`: paged browsing and picking of clippings for one question.
// - `prompt`: builds the text sent to the model.
// - `api`: blocking Gemini client behind the `Assistant` trait.
// - `style`: themes and the answer display transform.
// - `input`: line prompters for terminals and piped input.
// - `config`, `error`: configuration layering and the crate error type.
// - `ui`: the top-level question loop.
pub mod api;
pub mod clippings;
pub mod config;
pub mod error;
pub mod input;
pub mod prompt;
pub mod selection;
pub mod style;
pub mod ui;
