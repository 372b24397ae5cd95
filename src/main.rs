//! roster CLI entry point
//!
//! Parses arguments, dispatches to the CLI module, and on failure prints a
//! JSON error document and exits non-zero.

use roster::cli;

fn main() {
    if let Err(e) = cli::run() {
        let _ = cli::write_error(e.code(), &e.to_string());
        std::process::exit(1);
    }
}
