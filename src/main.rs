// SPDX-License-Identifier: MPL-2.0
use quick_notify::app::{self, Flags};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: quick_notify [OPTIONS]

Options:
  --config PATH       Read toast options from PATH
  --position NAME     top-left | top-center | top-right | bottom-left | bottom-center | bottom-right
  --duration MS       Default toast lifetime in milliseconds (0 = never expire)
  --max N             Maximum number of active toasts
  --newest-first      Show newest toasts first
  -h, --help          Print this help
";

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        config_path: args.opt_value_from_str("--config")?,
        position: args.opt_value_from_str("--position")?,
        duration: args.opt_value_from_str("--duration")?,
        max_toasts: args.opt_value_from_str("--max")?,
        newest_first: args.contains("--newest-first"),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        eprintln!("Warning: unused arguments {remaining:?}");
    }
    Ok(Some(flags))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("Error: {err}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match app::run(flags).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
