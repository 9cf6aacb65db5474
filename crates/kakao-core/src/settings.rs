use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Rank KakaoTalk chat participants by message count
#[derive(Parser, Debug, Clone)]
#[command(
    name = "kakao-analyzer",
    about = "Rank KakaoTalk chat participants by message count",
    version
)]
pub struct Settings {
    /// Directory holding KakaoTalk_Chat_<YYYY-MM-DD-HH-MM-SS>.csv exports
    #[arg(allow_hyphen_values = true)]
    pub chat_dir: PathBuf,

    /// First day to count (YYYY-MM-DD)
    #[arg(allow_hyphen_values = true)]
    pub start_date: String,

    /// Last day to count (YYYY-MM-DD)
    #[arg(allow_hyphen_values = true)]
    pub end_date: String,

    /// Directory the report is written to
    #[arg(allow_hyphen_values = true)]
    pub output_dir: String,

    /// Anything after the output directory is ignored.
    #[arg(hide = true, allow_hyphen_values = true)]
    pub ignored: Vec<String>,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,
}

/// Result of reading the command line.
#[derive(Debug)]
pub enum ParsedArgs {
    /// Arguments are usable.
    Run(Settings),
    /// `--help` or `--version`; clap's rendered text is carried along.
    Display(String),
    /// Missing positionals or a malformed `--log-level`.
    Invalid(clap::Error),
}

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> ParsedArgs {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but with an explicit argument list, so tests
    /// can run without spawning a process.
    pub fn load_from_args<I, T>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Settings::try_parse_from(args) {
            Ok(settings) => ParsedArgs::Run(settings),
            Err(e) => match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    ParsedArgs::Display(e.render().to_string())
                }
                _ => ParsedArgs::Invalid(e),
            },
        }
    }

    /// Map the log-level name to a `tracing` filter directive.
    pub fn tracing_level(&self) -> &'static str {
        match self.log_level.to_uppercase().as_str() {
            "DEBUG" => "debug",
            "INFO" => "info",
            "ERROR" | "CRITICAL" => "error",
            _ => "warn",
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
