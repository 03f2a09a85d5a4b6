use clap::Parser;
use colour::{green_ln, red_ln};
use eggdrop_rs::{init_log, solve, Arguments, SolveError};
use human_panic::setup_panic;

#[tokio::main]
async fn main() {
    setup_panic!();
    let has_args = std::env::args_os().count() > 1;
    let mut has_errors = false;
    let conf = Arguments::parse();
    init_log(&conf.logging);
    loop {
        match solve(&conf).await {
            Ok(()) => {
                green_ln!("Done!");
            }
            // Standard input was closed
            Err(SolveError::EmptyInput) if !has_args => break,
            Err(err) => {
                red_ln!("ERROR {}", err);
                has_errors = true;
            }
        }
        if has_args {
            // Command-line invocation
            break;
        }
    }
    if has_errors {
        std::process::exit(1);
    }
}
