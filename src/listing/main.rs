//! # Listing CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, while this file only
//! invokes `cli::run()` and handles process termination.
//!
//! The CLI is a harness around the library. It loads a listing config (TOML) and
//! JSON datasets, binds them as in-memory sources, and prints either the rendered
//! view model as JSON or a templated terminal rendering. It also exposes the pure
//! address reducers (`listing patch`) and the page window math (`listing window`)
//! so that addresses can be computed from shell scripts.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
