//! Subcommand implementations.
//!
//! Every command writes its result to `out` and reports whether it
//! succeeded; `main` turns a failure into a non-zero exit code.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use build_id_core::resolve::{self, NamedBuild};
use build_id_core::{BuildCodec, BuildId};
use tracing::{info, warn};

use crate::cli::Commands;

/// Runs `command`, returning `false` if any input was rejected.
pub fn run(codec: &BuildCodec, command: Commands, out: &mut impl Write) -> Result<bool> {
    match command {
        Commands::Decode { id, raw } => decode(codec, &id, raw, out),
        Commands::Encode { file } => encode(codec, &file, out),
        Commands::Upgrade { id, json } => upgrade(codec, &id, json, out),
        Commands::Validate { ids } => validate(codec, &ids, out),
        Commands::Inspect { id } => inspect(codec, &id, out),
        Commands::Batch { file, sequential } => batch(codec, &file, sequential, out),
    }
}

fn parse_id(input: &str) -> Result<BuildId> {
    input
        .parse()
        .with_context(|| format!("Not a build id or /b/ URL: {}", input))
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        Ok(content)
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn decode(codec: &BuildCodec, input: &str, raw: bool, out: &mut impl Write) -> Result<bool> {
    let id = parse_id(input)?;
    let record = codec
        .deserialize(id.as_str())
        .with_context(|| format!("Failed to decode {}", id))?;
    if record.is_upgraded() {
        warn!("build was changed by a migration");
    }

    let json = if raw {
        serde_json::to_string_pretty(&record)?
    } else {
        serde_json::to_string_pretty(&resolve::describe(&record, codec.registry()))?
    };
    writeln!(out, "{}", json)?;
    Ok(!record.is_invalid())
}

fn encode(codec: &BuildCodec, file: &Path, out: &mut impl Write) -> Result<bool> {
    let named: NamedBuild = serde_json::from_str(&read_input(file)?)
        .with_context(|| format!("Invalid loadout JSON in {}", file.display()))?;
    let id = codec.serialize_named(&named)?;
    writeln!(out, "{}", id)?;
    Ok(true)
}

fn upgrade(codec: &BuildCodec, input: &str, json: bool, out: &mut impl Write) -> Result<bool> {
    let id = parse_id(input)?;
    let outcome = codec
        .upgrade_outcome(id.as_str())
        .with_context(|| format!("Failed to upgrade {}", id))?;
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&outcome)?)?;
    } else {
        writeln!(out, "{}", outcome.id)?;
    }
    Ok(true)
}

fn validate(codec: &BuildCodec, inputs: &[String], out: &mut impl Write) -> Result<bool> {
    let mut all_valid = true;
    for input in inputs {
        let valid = parse_id(input).is_ok_and(|id| codec.is_valid(id.as_str()));
        all_valid &= valid;
        writeln!(out, "{}\t{}", if valid { "valid" } else { "invalid" }, input)?;
    }
    Ok(all_valid)
}

fn inspect(codec: &BuildCodec, input: &str, out: &mut impl Write) -> Result<bool> {
    let id = parse_id(input)?;
    let diagnostics = codec
        .inspect(id.as_str())
        .with_context(|| format!("Failed to decode {}", id))?;
    writeln!(out, "{}", serde_json::to_string_pretty(&diagnostics)?)?;
    Ok(diagnostics.valid_layout)
}

fn upgrade_line(codec: &BuildCodec, line: &str) -> std::result::Result<String, String> {
    let id = parse_id(line).map_err(|e| format!("{:#}", e))?;
    codec.upgrade(id.as_str()).map_err(|e| e.to_string())
}

fn batch(codec: &BuildCodec, file: &Path, sequential: bool, out: &mut impl Write) -> Result<bool> {
    let content = read_input(file)?;
    let inputs: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    let results = upgrade_all(codec, &inputs, sequential);
    let failed = results.iter().filter(|result| result.is_err()).count();
    for (input, result) in inputs.iter().zip(&results) {
        match result {
            Ok(upgraded) => writeln!(out, "{}\t{}", input, upgraded)?,
            Err(e) => writeln!(out, "{}\terror: {}", input, e)?,
        }
    }

    info!(total = inputs.len(), failed, "batch upgrade finished");
    Ok(failed == 0)
}

#[cfg(feature = "parallel")]
fn upgrade_all(
    codec: &BuildCodec,
    inputs: &[&str],
    sequential: bool,
) -> Vec<std::result::Result<String, String>> {
    use rayon::prelude::*;

    if sequential {
        inputs.iter().map(|line| upgrade_line(codec, line)).collect()
    } else {
        inputs.par_iter().map(|line| upgrade_line(codec, line)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn upgrade_all(
    codec: &BuildCodec,
    inputs: &[&str],
    _sequential: bool,
) -> Vec<std::result::Result<String, String>> {
    inputs.iter().map(|line| upgrade_line(codec, line)).collect()
}
