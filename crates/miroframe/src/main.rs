mod exit;
mod logging;

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use miroframe::api::{HttpTransport, ItemsClient};
use miroframe::{Config, FrameWalker, DEFAULT_DEPTH};
use tracing::{debug, info};

use crate::exit::{
    config_error, fetch_error, io_error, walk_error, CliError, CliResult, SUCCESS, USAGE,
};
use crate::logging::{init_logging, LogFormat, LogLevel};

#[derive(Parser, Debug)]
#[command(
    name = "miroframe",
    version,
    about = "Print the text content of a Miro frame and its nested frames",
    after_help = "Environment: MIRO_TOKEN (required), MIRO_BOARD_ID and MIRO_FRAME_ID \
                  (override the positional arguments), MIRO_API_URL (optional API base URL)."
)]
struct Cli {
    /// Board id, used when MIRO_BOARD_ID is not set.
    board_id: Option<String>,

    /// Root frame id, used when MIRO_FRAME_ID is not set.
    frame_id: Option<String>,

    /// Frame levels to render, root included.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_DEPTH as u8,
          value_parser = clap::value_parser!(u8).range(1..=8))]
    depth: u8,

    /// Per-request timeout (e.g. 30s, 500ms). Defaults to the HTTP client's own.
    #[arg(long, value_name = "DURATION")]
    timeout: Option<String>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: LogLevel,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

fn run(cli: Cli) -> CliResult<i32> {
    let config =
        Config::from_env(cli.board_id.as_deref(), cli.frame_id.as_deref()).map_err(config_error)?;
    let timeout = cli.timeout.as_deref().map(parse_timeout).transpose()?;
    debug!(?config, ?timeout, depth = cli.depth, "resolved configuration");

    let transport =
        HttpTransport::new(timeout).map_err(|err| fetch_error("HTTP client setup failed", err))?;
    let client = ItemsClient::new(transport, &config.client_config())
        .map_err(|err| fetch_error("invalid configuration", err))?;
    let walker = FrameWalker::new(&client, &config.board_id);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = walker
        .walk(&config.frame_id, usize::from(cli.depth), &mut out)
        .map_err(walk_error)?;
    out.flush()
        .map_err(|err| io_error("failed writing output", err))?;

    info!(
        items = summary.items,
        fetches = summary.fetches,
        nested_frames = summary.child_frames.len(),
        "frame rendered"
    );
    Ok(SUCCESS)
}

fn parse_timeout(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "timeout must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid timeout value: {input}")))?;

    if value == 0 {
        return Err(CliError::new(USAGE, "timeout must be greater than zero"));
    }

    Ok(match unit {
        "ms" => Duration::from_millis(value),
        _ => Duration::from_secs(value),
    })
}
