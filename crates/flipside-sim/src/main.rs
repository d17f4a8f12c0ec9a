mod replay;
mod tape;

use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use flipside_platformer::config::PlatformerConfig;

use tape::Tape;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        tracing::error!("Usage: flipside-sim <tape.toml>");
        return ExitCode::from(2);
    };

    let tape = match Tape::load(&path) {
        Ok(tape) => tape,
        Err(e) => {
            tracing::error!(path = %path.display(), "{e}");
            return ExitCode::FAILURE;
        },
    };

    let config = PlatformerConfig::load();
    tracing::info!(
        path = %path.display(),
        frames = tape.frame_count(),
        "Replaying tape"
    );

    let summary = replay::replay(config, &tape);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            tracing::error!("Failed to encode summary: {e}");
            ExitCode::FAILURE
        },
    }
}
