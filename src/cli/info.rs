use anyhow::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use serde::Serialize;

use super::command::{Cli, InfoArgs, ReportFormat};
use super::scan::{FrameScanner, ScanStats};
use crate::timestamp::time_str;
use av3a::process::{CodecConfig, FRAME_LENGTH};
use av3a::process::extract::Frame;
use av3a::structs::header::{Content, HeaderInfo};

pub fn cmd_info(args: &InfoArgs, cli: &Cli, multi: Option<&MultiProgress>) -> Result<()> {
    log::info!("Analyzing Audio Vivid stream: {}", args.input.display());

    let mut context = AnalysisContext {
        immediate: args.format == ReportFormat::Plain,
        ..Default::default()
    };

    if let Some(multi) = multi {
        let pb = multi.add(ProgressBar::new_spinner());
        pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb.set_message("Analyzing frames...");
        context.pb = Some(pb);
    }

    let stats = FrameScanner::new(cli.strict).run(&args.input, |frame| {
        context.process_frame(frame);
        Ok(true)
    })?;

    if let Some(ref pb) = context.pb {
        pb.finish_and_clear();
    }

    let Some(stream) = context.stream.take() else {
        println!("No Audio Vivid frame header found in the file.");
        println!("This doesn't appear to be a valid Audio Vivid stream.");
        return Ok(());
    };

    let report = Report {
        summary: Summary::new(&stats, &context),
        stream,
    };

    match args.format {
        ReportFormat::Plain => display_summary(&report.summary),
        ReportFormat::Yaml => print!("{}", serde_yaml_ng::to_string(&report)?),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

#[derive(Default)]
struct AnalysisContext {
    previous: Option<HeaderInfo>,
    stream: Option<StreamInfo>,
    frame_count: usize,
    frame_bytes: usize,
    duration_secs: f64,
    parameter_changes: usize,
    immediate: bool,
    pb: Option<ProgressBar>,
}

impl AnalysisContext {
    fn process_frame(&mut self, frame: &Frame) {
        let header = &frame.header;

        match &self.previous {
            None => {
                let stream = StreamInfo::from_header(header);
                if self.immediate {
                    self.suspend(|| display_stream_info(&stream));
                }
                self.stream = Some(stream);
            }
            Some(previous) if changes_stream(previous, header) => {
                self.parameter_changes += 1;
                log::warn!(
                    "Stream parameters change at frame {} (offset {}): {} -> {}",
                    self.frame_count,
                    frame.offset,
                    describe(previous),
                    describe(header)
                );
            }
            Some(_) => {}
        }

        self.previous = Some(header.clone());
        self.frame_count += 1;
        self.frame_bytes += frame.data.len();
        self.duration_secs += frame.duration();

        if self.frame_count.is_multiple_of(100) {
            if let Some(ref pb) = self.pb {
                pb.set_message(format!("Analyzing frames...       {}", self.frame_count));
                pb.tick();
            }
        }
    }

    // Temporarily pause the progress bar for clean output
    fn suspend<F: FnOnce()>(&self, f: F) {
        match self.pb {
            Some(ref pb) => pb.suspend(f),
            None => f(),
        }
    }
}

/// Fields that alter decoder setup or frame size.
fn changes_stream(previous: &HeaderInfo, header: &HeaderInfo) -> bool {
    previous.sampling_rate != header.sampling_rate
        || previous.content != header.content
        || previous.resolution != header.resolution
        || previous.total_bitrate != header.total_bitrate
}

fn describe(header: &HeaderInfo) -> String {
    let content = match (header.channel_config(), header.objects()) {
        (Some(config), 0) => config.to_string(),
        (Some(config), objects) => format!("{config} + {objects} objects"),
        (None, objects) => format!("{objects} objects"),
    };

    format!(
        "{} Hz, {}-bit, {content}, {} kbps",
        header.sampling_rate,
        header.bitdepth(),
        header.total_bitrate / 1000
    )
}

#[derive(Serialize)]
struct Report {
    stream: StreamInfo,
    summary: Summary,
}

#[derive(Serialize)]
struct StreamInfo {
    codec_id: u8,
    nn_type: u8,
    content_type: String,
    sampling_rate: u32,
    bit_depth: u8,
    channels: u16,
    objects: u16,
    total_channels: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel_config: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel_layout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hoa_order: Option<u8>,
    total_bitrate: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    bed_bitrate: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    object_bitrate: Option<u64>,
    frame_size: Option<usize>,
    codec_config: String,
}

impl StreamInfo {
    fn from_header(header: &HeaderInfo) -> Self {
        let (bed_bitrate, object_bitrate) = match header.content {
            Content::ChannelObjects {
                bed_bitrate,
                object_bitrate,
                ..
            } => (Some(bed_bitrate), Some(object_bitrate)),
            Content::Objects { object_bitrate, .. } => (None, Some(object_bitrate)),
            _ => (None, None),
        };

        let codec_config = CodecConfig::from_header(header)
            .to_bytes()
            .iter()
            .map(|b| format!("{b:02X}"))
            .collect::<String>();

        Self {
            codec_id: header.codec_id,
            nn_type: header.nn_type,
            content_type: header.content_type().to_string(),
            sampling_rate: header.sampling_rate,
            bit_depth: header.bitdepth(),
            channels: header.channels(),
            objects: header.objects(),
            total_channels: header.total_channels(),
            channel_config: header.channel_config().map(|c| c.to_string()),
            channel_layout: header.channel_layout().map(|l| l.to_string()),
            hoa_order: header.hoa_order(),
            total_bitrate: header.total_bitrate,
            bed_bitrate,
            object_bitrate,
            frame_size: header.payload_size().ok(),
            codec_config,
        }
    }
}

fn display_stream_info(info: &StreamInfo) {
    println!();
    println!("Audio Vivid Stream Information");
    println!("==============================");
    println!();

    println!("Stream Information");
    println!("  Codec id                  {}", info.codec_id);
    println!("  NN type                   {}", info.nn_type);
    println!("  Content type              {}", info.content_type);
    println!("  Sampling rate             {} Hz", info.sampling_rate);
    println!("  Bit depth                 {}", info.bit_depth);
    println!("  Frame length              {FRAME_LENGTH} samples");
    println!();

    println!("Channel Information");
    if let Some(config) = &info.channel_config {
        println!("  Channel configuration     {config}");
    }
    if let Some(layout) = &info.channel_layout {
        println!("  Channel layout            {layout}");
    }
    if let Some(order) = info.hoa_order {
        println!("  HOA order                 {order}");
    }
    println!("  Channels                  {}", info.channels);
    println!("  Objects                   {}", info.objects);
    println!("  Total channels            {}", info.total_channels);
    println!();

    println!("Bitrate Information");
    println!("  Total bitrate             {} kbps", info.total_bitrate / 1000);
    if let Some(bed) = info.bed_bitrate {
        println!("  Bed bitrate               {} kbps", bed / 1000);
    }
    if let Some(object) = info.object_bitrate {
        println!("  Bitrate per object        {} kbps", object / 1000);
    }
    if let Some(size) = info.frame_size {
        println!("  Frame size                {size} bytes");
    }
    println!("  Codec configuration       {}", info.codec_config);
    println!();
}

#[derive(Serialize)]
struct Summary {
    frames: usize,
    total_bytes: usize,
    frame_bytes: usize,
    skipped_bytes: usize,
    trailing_bytes: usize,
    header_errors: usize,
    parameter_changes: usize,
    duration: String,
    duration_secs: f64,
    average_data_rate_kbps: Option<f64>,
}

impl Summary {
    fn new(stats: &ScanStats, context: &AnalysisContext) -> Self {
        let frame_bytes = context.frame_bytes;
        let duration_secs = context.duration_secs;

        let average_data_rate_kbps =
            (duration_secs > 0.0).then(|| (frame_bytes as f64 * 8.0) / (duration_secs * 1000.0));

        Self {
            frames: stats.frames,
            total_bytes: stats.total_bytes,
            frame_bytes,
            skipped_bytes: stats.skipped_bytes,
            trailing_bytes: stats.trailing_bytes,
            header_errors: stats.errors,
            parameter_changes: context.parameter_changes,
            duration: time_str(duration_secs),
            duration_secs,
            average_data_rate_kbps,
        }
    }
}

fn display_summary(summary: &Summary) {
    println!("Analysis Summary");
    println!("  Frames processed          {}", summary.frames);

    let size_mb = summary.total_bytes as f64 / 1_000_000.0;
    println!(
        "  Size                      {size_mb:.2} MB ({} bytes)",
        summary.total_bytes
    );
    println!("  Duration                  {}", summary.duration);

    if let Some(rate) = summary.average_data_rate_kbps {
        println!("  Average data rate         {rate:.1} kbps");
    }

    if summary.header_errors > 0 {
        println!(
            "  Invalid headers           {} ({} bytes skipped)",
            summary.header_errors, summary.skipped_bytes
        );
    }

    if summary.trailing_bytes > 0 {
        println!("  Trailing bytes            {}", summary.trailing_bytes);
    }

    if summary.parameter_changes > 0 {
        println!("  Parameter changes         {}", summary.parameter_changes);
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use av3a::process::EXAMPLE_HEADER;
    use std::sync::Arc;

    // Mono, 48 kHz, 16-bit, 64 kbps.
    const MONO_HEADER: [u8; 9] = [0xFF, 0xF2, 0x00, 0x40, 0x00, 0x14, 0x00, 0x00, 0x00];

    fn frame(header: &[u8], offset: u64) -> Frame {
        let header = HeaderInfo::from_bytes(header).unwrap();
        let size = header.payload_size().unwrap();
        Frame {
            header,
            offset,
            data: Arc::from(vec![0u8; size]),
        }
    }

    fn analyze(headers: &[[u8; 9]]) -> AnalysisContext {
        let mut context = AnalysisContext::default();
        let mut offset = 0;
        for header in headers {
            let frame = frame(header, offset);
            offset += frame.data.len() as u64;
            context.process_frame(&frame);
        }
        context
    }

    #[test]
    fn counts_transitions_not_differing_frames() {
        let context = analyze(&[EXAMPLE_HEADER, MONO_HEADER, MONO_HEADER, MONO_HEADER]);
        assert_eq!(context.frame_count, 4);
        assert_eq!(context.parameter_changes, 1);

        let context = analyze(&[EXAMPLE_HEADER, MONO_HEADER, EXAMPLE_HEADER, EXAMPLE_HEADER]);
        assert_eq!(context.parameter_changes, 2);

        let context = analyze(&[EXAMPLE_HEADER; 3]);
        assert_eq!(context.parameter_changes, 0);
    }

    #[test]
    fn bitrate_change_is_a_parameter_change() {
        // Same stereo layout at 192 kbps.
        let mut faster = EXAMPLE_HEADER;
        faster[5] = 0x58;

        let context = analyze(&[EXAMPLE_HEADER, faster]);
        assert_eq!(context.parameter_changes, 1);
        assert_eq!(context.frame_bytes, 171 + 512);
    }

    #[test]
    fn describe_names_the_configuration() {
        let stereo = HeaderInfo::from_bytes(&EXAMPLE_HEADER).unwrap();
        let mono = HeaderInfo::from_bytes(&MONO_HEADER).unwrap();

        assert_eq!(describe(&stereo), "48000 Hz, 16-bit, STEREO, 64 kbps");
        assert_eq!(describe(&mono), "48000 Hz, 16-bit, MONO, 64 kbps");
    }

    #[test]
    fn duration_sums_each_frame() {
        // 48 kHz frame, then the same frame at 24 kHz.
        let mut slower = EXAMPLE_HEADER;
        slower[3] = 0xA0;

        let context = analyze(&[EXAMPLE_HEADER, slower]);
        assert_eq!(context.parameter_changes, 1);

        let expected = FRAME_LENGTH as f64 / 48000.0 + FRAME_LENGTH as f64 / 24000.0;
        assert!((context.duration_secs - expected).abs() < 1e-12);

        let stats = ScanStats {
            frames: 2,
            ..Default::default()
        };
        let summary = Summary::new(&stats, &context);
        assert_eq!(summary.duration, "00:00:00.064");
    }
}
