// src/bin/fpcl.rs

//! The `fpcl` binary: parses its own argv into a built-in command and runs it.

use clap::Parser;
use colored::*;
use fpcl::{
    cli::{
        self, Cli,
        render::{Rendered, Status},
    },
    constants, t,
};

/// Entry point of the `fpcl` binary.
/// It sets up logging, runs the command line and maps the outcome to an exit code.
fn main() {
    env_logger::init();
    log::debug!("Console language: {}", constants::LANGUAGE);

    let cli = Cli::parse();
    log::debug!("CLI args parsed: {:?}", cli);

    match cli::run(&cli) {
        Ok(rendered) => {
            print_rendered(&rendered, cli.json);
            std::process::exit(rendered.status.exit_code());
        }
        Err(e) => {
            // Configuration and rendering failures, not rejected commands.
            eprintln!("\n{}: {:#}", t!("cli.error.header").red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// JSON always goes to stdout so it can be piped; a rejected command in text
/// mode goes to stderr.
fn print_rendered(rendered: &Rendered, json: bool) {
    match rendered.status {
        Status::Invalid if !json => eprintln!("{}", rendered.text.red()),
        _ => println!("{}", rendered.text),
    }
}
