//! CLI - Command Line Interface for omdbtui
//!
//! Every search the TUI can do is scriptable. Output is JSON when `--json` is
//! given or stdout is not a terminal.
//!
//! # Examples
//!
//! ```bash
//! omdbtui search "the batman" --json
//! omdbtui poster https://m.media-amazon.com/images/M/poster.jpg
//! ```

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::models::SearchError;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    Error = 1,
    InvalidArgs = 2,
    NetworkError = 3,
    NotFound = 4,
    TooManyResults = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

impl From<SearchError> for ExitCode {
    fn from(e: SearchError) -> ExitCode {
        match e {
            SearchError::NotFound => ExitCode::NotFound,
            SearchError::TooManyResults => ExitCode::TooManyResults,
            SearchError::General => ExitCode::NetworkError,
        }
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// omdbtui - search the OMDb movie database from your terminal
///
/// Run without arguments to launch the interactive TUI.
#[derive(Parser, Debug)]
#[command(
    name = "omdbtui",
    version,
    about = "Search the OMDb movie database from your terminal",
    long_about = "Type a title, browse matching movies and series, preview posters.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for scripting.",
    after_help = "EXAMPLES:\n\
                  omdbtui                          Launch interactive TUI\n\
                  omdbtui search \"blade runner\"    Search by title\n\
                  omdbtui poster <url>             Fetch and inspect a poster"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search movies and series by title
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Fetch a poster image and report its size
    #[command(visible_alias = "p")]
    Poster(PosterCmd),
}

/// Search by title
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Title to search for
    #[arg(required = true)]
    pub title: String,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "10")]
    pub limit: usize,
}

/// Fetch a poster through the image cache
#[derive(Args, Debug)]
pub struct PosterCmd {
    /// Poster URL (as returned in search results)
    #[arg(required = true)]
    pub url: String,
}

// =============================================================================
// Output
// =============================================================================

/// JSON envelope for CLI output
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

#[derive(Debug, Serialize)]
pub struct JsonError {
    pub code: i32,
    pub message: String,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error_msg(msg: &str, code: ExitCode) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(JsonError {
                code: code.into(),
                message: msg.to_string(),
            }),
        }
    }
}

/// Output helper for CLI commands
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print JSON data (enveloped in JSON mode)
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&JsonOutput::success(data))?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print plain lines for humans, JSON data otherwise
    pub fn print_lines<T: Serialize>(&self, data: T, lines: &[String]) -> anyhow::Result<()> {
        if self.json {
            return self.print(data);
        }
        for line in lines {
            println!("{}", line);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            if let Ok(json) = serde_json::to_string_pretty(&JsonOutput::<()>::error_msg(&msg, code)) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet and JSON modes)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from(["omdbtui"]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_search_command() {
        let cli = Cli::parse_from(["omdbtui", "search", "batman"]);
        match cli.command {
            Some(Command::Search(cmd)) => {
                assert_eq!(cmd.title, "batman");
                assert_eq!(cmd.limit, 10);
            }
            other => panic!("Expected Search command, got {:?}", other),
        }
    }

    #[test]
    fn test_exit_code_from_search_error() {
        assert_eq!(ExitCode::from(SearchError::NotFound), ExitCode::NotFound);
        assert_eq!(ExitCode::from(SearchError::TooManyResults), ExitCode::TooManyResults);
        assert_eq!(ExitCode::from(SearchError::General), ExitCode::NetworkError);
        assert_eq!(i32::from(ExitCode::TooManyResults), 5);
    }

    #[test]
    fn test_json_error_envelope() {
        let out = JsonOutput::<()>::error_msg("Too many results", ExitCode::TooManyResults);
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], 5);
        assert!(json.get("data").is_none());
    }
}
