//! Command-line interface for pto
//! Parses a Hugin panorama project script and prints the projected document.
//!
//! Usage:
//!   pto `<path>` [--format `<format>`] [--config `<file>`] [--strict] [-v...]
//!   pto formats                                  - List the output formats

use clap::{Arg, ArgAction, ArgMatches, Command};
use pto::logger;
use pto::pto::config::{Loader, PtoConfig};
use pto::pto::processor::{process_file, OutputFormat, ProcessingError};
use pto::Parser;

fn cli() -> Command {
    Command::new("pto")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read Hugin panorama project scripts")
        .arg_required_else_help(true)
        .args_conflicts_with_subcommands(true)
        .arg(
            Arg::new("path")
                .help("Path to the .pto script")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (json, yaml, summary)")
                .value_parser(["json", "yaml", "summary"]),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in settings"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail on image references past the end of the image list")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more, repeat for more detail")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(Command::new("formats").about("List the available output formats"))
}

fn main() {
    let matches = cli().get_matches();
    logger::init(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("formats", _)) => handle_formats_command(),
        _ => match matches.get_one::<String>("path") {
            Some(path) => handle_parse_command(path, &matches),
            None => {
                eprintln!("Error: a script path is required");
                std::process::exit(2);
            }
        },
    }
}

fn load_config(matches: &ArgMatches) -> Result<PtoConfig, ProcessingError> {
    let config_error = |e: config::ConfigError| ProcessingError::Config(e.to_string());
    let mut loader = Loader::new();
    if let Some(file) = matches.get_one::<String>("config") {
        loader = loader.with_file(file);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader
            .set_override("output.format", format.as_str())
            .map_err(config_error)?;
    }
    if matches.get_flag("strict") {
        loader = loader
            .set_override("parser.validate_references", true)
            .map_err(config_error)?;
    }
    loader.build().map_err(config_error)
}

/// Handle the default command: parse and print
fn handle_parse_command(path: &str, matches: &ArgMatches) {
    let config = load_config(matches).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });

    let parser = Parser::new(config.parser);
    let output = process_file(path, &parser, config.output.format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    print!("{}", output);
}

/// Handle the formats command
fn handle_formats_command() {
    println!("Available output formats:\n");
    for format in OutputFormat::available_formats() {
        println!("  {}", format.name());
        println!("    {}", format.description());
    }
}
