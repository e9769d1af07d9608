// Copyright 2016 Martin Grabmueller. See the LICENSE file at the
// top-level directory of this distribution for license information.

use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::Serialize;
use simple_logger::SimpleLogger;

use wadfile::Wad;

/// What gets printed for each WAD file.
#[derive(Serialize)]
struct Info {
    #[serde(rename = "Type")]
    wad_type: &'static str,
    #[serde(rename = "Lumps")]
    lumps: Vec<String>,
}

fn info(path: &str) -> Result<Info> {
    let wad = Wad::open(path).with_context(|| format!("failed to read WAD file `{path}`"))?;
    Ok(Info {
        wad_type: wad.wad_type().label(),
        lumps: wad.lump_names(),
    })
}

/// Print one JSON object per path, stopping at the first failure.
fn run<W: Write>(paths: &[String], out: &mut W) -> Result<()> {
    for path in paths {
        let info = info(path)?;
        let json = serde_json::to_string_pretty(&info).context("failed to encode JSON")?;
        writeln!(out, "{json}")?;
    }
    Ok(())
}

pub fn main() {
    // RUST_LOG overrides the default level.
    if let Err(err) = SimpleLogger::new().with_level(LevelFilter::Warn).env().init() {
        eprintln!("could not initialise logging: {err}");
    }

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: wadinfo <FILE>...");
        process::exit(2);
    }

    let stdout = io::stdout();
    if let Err(err) = run(&paths, &mut stdout.lock()) {
        eprintln!("{err:#}");
        process::exit(1);
    }
}
