mod bootstrap;

use anyhow::Result;
use kakao_core::settings::{ParsedArgs, Settings};
use kakao_data::analysis::{analyze, AnalysisOutcome};

fn main() {
    let settings = match Settings::load() {
        ParsedArgs::Run(settings) => settings,
        ParsedArgs::Display(text) => {
            print!("{}", text);
            return;
        }
        ParsedArgs::Invalid(_) => {
            println!("Invalid arguments");
            return;
        }
    };

    if let Err(e) = bootstrap::setup_logging(settings.tracing_level()) {
        eprintln!("Logging disabled: {}", e);
    }

    tracing::info!("KakaoTalk analyzer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Chats: {}, window: {} .. {}, output: {}",
        settings.chat_dir.display(),
        settings.start_date,
        settings.end_date,
        settings.output_dir
    );

    let result = run(&settings);
    if let Ok(AnalysisOutcome::Written {
        senders, messages, ..
    }) = &result
    {
        tracing::info!("Ranked {} senders over {} messages", senders, messages);
    }

    for line in outcome_messages(&result) {
        println!("{}", line);
    }
}

fn run(settings: &Settings) -> Result<AnalysisOutcome> {
    let outcome = analyze(
        &settings.chat_dir,
        &settings.start_date,
        &settings.end_date,
        &settings.output_dir,
    )?;
    Ok(outcome)
}

/// Lines printed to stdout for a finished run.
fn outcome_messages(result: &Result<AnalysisOutcome>) -> Vec<String> {
    match result {
        Ok(AnalysisOutcome::NoChatFiles) => {
            vec!["There are no saved kakaotalk chat files.".to_string()]
        }
        Ok(AnalysisOutcome::WriteFailed) => vec!["KakaoTalk analysis failed.".to_string()],
        Ok(AnalysisOutcome::Written { path, .. }) => vec![
            format!("Create KakaoTalk analysis file. :: {}", path.display()),
            "KakaoTalk analysis success.".to_string(),
        ],
        Err(e) => vec![format!("Process error {}", e)],
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
