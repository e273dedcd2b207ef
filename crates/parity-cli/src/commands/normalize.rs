use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use parity_compare::normalize;

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Files to normalize (stdin if none)
    pub files: Vec<PathBuf>,
}

pub fn run(args: &NormalizeArgs) -> Result<i32> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.files.is_empty() {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        out.write_all(normalize(&text).as_str().as_bytes())?;
        return Ok(0);
    }

    for path in &args.files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read '{}'", path.display()))?;
        out.write_all(normalize(&text).as_str().as_bytes())?;
    }
    Ok(0)
}
