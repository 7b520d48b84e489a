use anyhow::Result;
use chrono::TimeZone;
use std::env;
use std::fs;
use std::process::Command;
use vergen_gitcl::{Emitter, GitclBuilder};

fn main() -> Result<()> {
    // Generate git information
    let gitcl = GitclBuilder::default()
        .describe(true, true, Some("[0-9]*"))
        .build()?;

    let gitcl_res = Emitter::default()
        .idempotent()
        .fail_on_error()
        .add_instructions(&gitcl)
        .and_then(|emitter| emitter.emit());

    if let Err(e) = gitcl_res {
        eprintln!("error occurred while generating instructions: {e:?}");
        Emitter::default().idempotent().fail_on_error().emit()?;
    }

    // Add build timestamp
    let now = match env::var("SOURCE_DATE_EPOCH") {
        Ok(val) => chrono::Utc
            .timestamp_opt(val.parse::<i64>()?, 0)
            .single()
            .ok_or_else(|| anyhow::anyhow!("SOURCE_DATE_EPOCH out of range: {val}"))?,
        Err(_) => chrono::Utc::now(),
    };

    println!(
        "cargo:rustc-env=BUILD_TIMESTAMP={}",
        now.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let av3a_version = av3a_version().unwrap_or_else(|e| {
        println!("cargo:warning=could not determine av3a version: {e}");
        "unknown".to_string()
    });
    println!("cargo:rustc-env=AV3A_VERSION={av3a_version}");

    println!("cargo:rerun-if-changed=av3a/Cargo.toml");

    Ok(())
}

/// Version of the av3a workspace member, from `cargo metadata`, falling back
/// to its manifest when cargo is unavailable.
fn av3a_version() -> Result<String> {
    metadata_version().or_else(|_| manifest_version("av3a/Cargo.toml"))
}

fn metadata_version() -> Result<String> {
    let cargo = env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    let output = Command::new(cargo)
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed");
    }

    let metadata: serde_json::Value = serde_json::from_slice(&output.stdout)?;

    metadata["packages"]
        .as_array()
        .into_iter()
        .flatten()
        .find(|package| package["name"] == "av3a")
        .and_then(|package| package["version"].as_str())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("av3a package not found in metadata"))
}

fn manifest_version(path: &str) -> Result<String> {
    let manifest = fs::read_to_string(path)?;

    manifest
        .lines()
        .map(str::trim)
        .skip_while(|line| *line != "[package]")
        .take_while(|line| !line.starts_with('[') || *line == "[package]")
        .filter_map(|line| line.strip_prefix("version"))
        .filter_map(|rest| rest.trim_start().strip_prefix('='))
        .map(|value| value.trim().trim_matches('"').to_string())
        .next()
        .ok_or_else(|| anyhow::anyhow!("no package version in {path}"))
}
