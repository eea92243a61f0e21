mod replay;
pub use replay::{Session, cmd_replay};

use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::logging::{LogTarget, init_logging};
use crate::io::options_io::{self, OptionsError};
use crate::model::{OptionItem, PickerConfig};
use crate::ops::filter::filter_items;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    // The picker owns the terminal, so it only ever logs to a file
    let target = match (&cli.command, cli.log_file.as_deref()) {
        (_, Some(path)) => LogTarget::File(path),
        (None, None) => LogTarget::Off,
        (Some(_), None) => LogTarget::Stderr,
    };
    init_logging(target)?;

    let cwd = std::env::current_dir()?;
    let config = config_io::load_config(cli.config.as_deref(), &cwd)?;
    let options = cli.options.as_deref();

    match cli.command {
        None => cmd_pick(options, &config, json),
        Some(cmd) => match cmd {
            Commands::List(args) => cmd_list(args, options, json),
            Commands::Check => cmd_check(options, json),
            Commands::Replay(args) => {
                let items = options_io::load_options_or_mock(options)?;
                cmd_replay(args, &items, &config, json)
            }
        },
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Interactive picker; prints the final selection once the user quits
fn cmd_pick(
    options: Option<&Path>,
    config: &PickerConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let items = options_io::load_options_or_mock(options)?;
    let selected = crate::tui::run(&items, config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
    } else {
        for item in &selected {
            println!("{}", item.label);
        }
    }
    Ok(())
}

fn cmd_list(
    args: ListArgs,
    options: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let items = options_io::load_options_or_mock(options)?;
    let query = args.query.as_deref().unwrap_or("");
    let matches = filter_items(&items, query);

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }
    if matches.is_empty() {
        println!("no options match {:?}", query);
        return Ok(());
    }
    for row in format_option_rows(&matches) {
        println!("{}", row);
    }
    Ok(())
}

fn check_report(result: &Result<Vec<OptionItem>, OptionsError>) -> CheckJson {
    match result {
        Ok(items) => CheckJson {
            ok: true,
            count: items.len(),
            error: None,
        },
        Err(e) => CheckJson {
            ok: false,
            count: 0,
            error: Some(e.to_string()),
        },
    }
}

fn cmd_check(options: Option<&Path>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let result = options_io::load_options_or_mock(options);
    if json {
        let report = check_report(&result);
        println!("{}", serde_json::to_string_pretty(&report)?);
        // Report already printed; the error still sets the exit status
        result?;
        return Ok(());
    }
    let items = result?;
    println!("ok: {} options, labels unique", items.len());
    Ok(())
}
