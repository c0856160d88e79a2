// src/cli.rs
use tracing::Level;

use crate::{cache::Store, params::Params, runner, BoxError};

pub fn run() -> Result<(), BoxError> {
    let mut params = Params::new();
    parse_cli(&mut params)?;
    init_logging(params.verbose);

    let store = Store::new(".");
    if params.list {
        runner::list_events(&store, &params)?;
    }
    if params.update {
        runner::update_events(&store, &params)?;
    }
    Ok(())
}

fn parse_cli(params: &mut Params) -> Result<(), BoxError> {
    let mut args = std::env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "--list" => params.list = true,
            "--update" => params.update = true,
            "--no-html-cache" => params.html_cache = false,
            "--no-result-cache" => params.result_cache = false,
            "-v" | "--verbose" => params.verbose = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::INFO } else { Level::ERROR };
    // Logs go to stderr; stdout is reserved for the listing output
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
