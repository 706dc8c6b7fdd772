// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use recordesk_app::Store;
use runtime::{Script, ScriptRuntime};
use std::env;
use std::path::PathBuf;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `recordesk --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;
    logging::init_logging(&config.log_config()?)?;

    let script_path = options
        .script_path
        .ok_or_else(|| anyhow!("--script is required; run with --help to see supported options"))?;
    let script = Script::load(&script_path)?;
    let store = Store::with_config(&config.store_config())
        .with_context(|| format!("invalid [store] config in {}", options.config_path.display()))?;
    if options.check_only {
        info!(steps = script.steps.len(), "config and script are valid");
        return Ok(());
    }

    let mut runtime = ScriptRuntime::new(store);
    runtime.run(script);
    let report = runtime.report();
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("encode session report")?
    );
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    script_path: Option<PathBuf>,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        script_path: None,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--script" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--script requires a file path"))?;
                options.script_path = Some(PathBuf::from(value.as_ref()));
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("recordesk");
    println!("  --script <path>          Replay a TOML session script and print the report");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config + script without replaying");
    println!("  --help                   Show this help");
}
