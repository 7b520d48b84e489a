use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::info;

use super::command::{Cli, FramesArgs};
use super::scan::FrameScanner;
use crate::timestamp::time_str;

pub fn cmd_frames(args: &FramesArgs, cli: &Cli, multi: Option<&MultiProgress>) -> Result<()> {
    let mut writer = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Some(BufWriter::new(file))
        }
        None => None,
    };

    let pb = match multi {
        Some(multi) => {
            let pb = multi.add(ProgressBar::new_spinner());
            pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(pb)
        }
        None => None,
    };

    if !args.quiet {
        println!(
            "{:>8}  {:>12}  {:>6}  {:>8}  {:>5}  {:>12}",
            "frame", "offset", "size", "kbps", "ch", "time"
        );
    }

    let mut index = 0usize;
    let mut elapsed = 0f64;

    let stats = FrameScanner::new(cli.strict).run(&args.input, |frame| {
        if args.limit.is_some_and(|limit| index >= limit) {
            return Ok(false);
        }

        if let Some(writer) = writer.as_mut() {
            writer.write_all(&frame.data)?;
        }

        if !args.quiet {
            let line = format!(
                "{index:>8}  {:>12}  {:>6}  {:>8}  {:>5}  {:>12}",
                frame.offset,
                frame.data.len(),
                frame.header.total_bitrate / 1000,
                frame.header.total_channels(),
                time_str(elapsed),
            );
            match pb {
                Some(ref pb) => pb.suspend(|| println!("{line}")),
                None => println!("{line}"),
            }
        }

        index += 1;
        elapsed += frame.duration();

        if let Some(ref pb) = pb {
            pb.set_message(format!("Frames: {index}"));
        }

        Ok(true)
    })?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if let Some(mut writer) = writer {
        writer.flush()?;
    }

    info!(
        "{index} frames, {} ({} bytes skipped, {} invalid headers)",
        time_str(elapsed),
        stats.skipped_bytes,
        stats.errors
    );

    Ok(())
}
