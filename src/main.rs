use std::path::PathBuf;
use std::process::ExitCode;

use squares::config::GameConfig;
use squares::engine;

/// `--config <path>` from the command line, if given.
fn config_path_arg() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(PathBuf::from(path));
        }
    }
    None
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match GameConfig::load_or_default(config_path_arg().as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}: {}", error_chain(&e));
            return ExitCode::FAILURE;
        }
    };

    match engine::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}: {}", error_chain(&e));
            ExitCode::FAILURE
        }
    }
}

/// Render the `source()` chain below `error` as `a: b: c`.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut parts = Vec::new();
    let mut source = error.source();
    while let Some(e) = source {
        parts.push(e.to_string());
        source = e.source();
    }
    if parts.is_empty() {
        "no further detail".to_string()
    } else {
        parts.join(": ")
    }
}
