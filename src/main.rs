// Entrypoint for the CLI application.
// Parses flags, loads config, builds the client and hands everything to the
// interactive loop in `ui`.

use anyhow::Context;
use clap::Parser;
use clippings_ai::{
    api::AssistantClient,
    clippings,
    config::{Config, Overrides},
    input::{LinePrompter, TerminalPrompter},
    style::Theme,
    ui::{main_loop, UiOptions},
};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Ask an LLM about your e-reader highlights.
#[derive(Parser, Debug)]
#[command(name = "clippings-ai", version, about)]
struct Cli {
    /// Clippings export to read (default: the Kindle documents folder)
    #[arg(long, value_name = "PATH")]
    clippings: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output style
    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// Gemini model name
    #[arg(long)]
    model: Option<String>,

    /// Use every highlight line as the excerpt, not just the last one
    #[arg(long)]
    full_excerpts: bool,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            clippings: self.clippings.clone(),
            theme: self.theme,
            model: self.model.clone(),
            full_excerpts: self.full_excerpts,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .apply_overrides(cli.overrides());

    // escape codes only make sense on a terminal
    let mut theme = config.display.theme.or_no_color(std::env::var("NO_COLOR").ok().as_deref());
    if !io::stdout().is_terminal() {
        theme = Theme::Plain;
    }

    let api_key = config.api_key()?;
    let assistant = AssistantClient::new(config.api.clone(), api_key, theme)?;
    let clippings = clippings::load(&config.clippings.path, config.clippings.excerpt);

    let options = UiOptions {
        theme,
        empty_selection: config.prompt.empty_selection,
    };
    let mut out = io::stdout();
    if io::stdin().is_terminal() {
        main_loop(&clippings, &assistant, &mut TerminalPrompter, &mut out, options)?;
    } else {
        let mut prompter = LinePrompter::new(io::stdin().lock(), io::stdout());
        main_loop(&clippings, &assistant, &mut prompter, &mut out, options)?;
    }
    Ok(())
}
