// fbxbatch-cli/src/main.rs
//
// Entry point of the fbxbatch binary: parses arguments, sets up logging,
// runs the selected command and maps failures to exit code 1.

use clap::Parser;
use fbxbatch_cli::error::render_error;
use fbxbatch_cli::{Cli, logging, run};
use std::process;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        log::debug!("Command failed: {:?}", e);
        eprintln!("{}", render_error(&e));
        process::exit(1);
    }
}
