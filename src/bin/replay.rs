//! Replays a raw HTTP request from a file or stdin.
//!
//! ```text
//! replay [--http] [--policy first-wins|last-wins] <raw-request-file|->
//! ```
//!
//! The raw response is printed to stdout. Failures print the diagnostic to
//! stderr and exit with status 1; usage errors exit with status 2. Logging
//! goes to stderr and is controlled by `RUST_LOG`.

use http_replay::codec::{decode_with, DuplicateHeaderPolicy};
use http_replay::config::get_config;
use http_replay::executor::ReplayEngine;
use http_replay::formatter::ResponseView;
use http_replay::models::{ReplayResponse, Scheme};
use std::io::Read;
use std::process::ExitCode;

const USAGE: &str = "usage: replay [--http] [--policy first-wins|last-wins] <raw-request-file|->";

struct Args {
    scheme: Scheme,
    policy: DuplicateHeaderPolicy,
    source: String,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut scheme = Scheme::Https;
    let mut policy = get_config().duplicate_header_policy;
    let mut source = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--http" => scheme = Scheme::Http,
            "--policy" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --policy".to_string())?;
                policy = match value.as_str() {
                    "first-wins" => DuplicateHeaderPolicy::FirstWins,
                    "last-wins" => DuplicateHeaderPolicy::LastWins,
                    other => return Err(format!("unknown policy `{}`", other)),
                };
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option `{}`", flag)),
            _ if source.is_some() => return Err("only one request source is accepted".to_string()),
            _ => source = Some(arg),
        }
    }

    let source = source.ok_or_else(|| "missing request source".to_string())?;
    Ok(Args {
        scheme,
        policy,
        source,
    })
}

fn read_source(source: &str) -> std::io::Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(source)
    }
}

async fn replay(args: &Args) -> Result<ReplayResponse, String> {
    let text = read_source(&args.source)
        .map_err(|e| format!("Error: cannot read {}: {}\n", args.source, e))?;

    let request =
        decode_with(&text, args.policy).map_err(|e| ResponseView::from_error(&e).raw_text)?;
    let engine = ReplayEngine::new().map_err(|e| ResponseView::from_error(&e).raw_text)?;
    engine
        .send(&request, args.scheme)
        .await
        .map_err(|e| ResponseView::from_error(&e).raw_text)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("replay: {}\n{}", e, USAGE);
            return ExitCode::from(2);
        }
    };

    match replay(&args).await {
        Ok(response) => {
            let view = ResponseView::from_response(&response);
            log::info!("{} in {}", view.status_label, view.elapsed_label);
            println!("{}", view.raw_text);
            ExitCode::SUCCESS
        }
        Err(diagnostic) => {
            eprint!("{}", diagnostic);
            ExitCode::from(1)
        }
    }
}
