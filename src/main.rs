//! Parking Lots CLI
//!
//! An interactive menu for reserving and cancelling parking spaces. State is
//! kept in `parqueos.csv` in the working directory unless another path is
//! given.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- [data.csv]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity

use parking_lots::{Config, Result, Session};
use std::env;
use std::io;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::from_args(env::args().skip(1))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::start(config, stdin.lock(), stdout.lock())?;
    session.run()
}
