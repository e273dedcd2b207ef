use std::io::{self, Write};

use anyhow::Result;
use parity_scenarios::library;

pub fn run() -> Result<i32> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for scenario in library::all() {
        writeln!(out, "{:<16} {}", scenario.name, scenario.description)?;
    }
    Ok(0)
}
