/// Formats a duration in seconds as `HH:MM:SS.mmm`, rounded to the nearest
/// millisecond. Hours widen past two digits when needed.
pub fn time_str(sec: f64) -> String {
    let total_ms = (sec.max(0.0) * 1000.0).round() as u64;

    let hours = total_ms / 3_600_000;
    let minutes = total_ms / 60_000 % 60;
    let seconds = total_ms / 1000 % 60;
    let milliseconds = total_ms % 1000;

    format!("{hours:02}:{minutes:02}:{seconds:02}.{milliseconds:03}")
}

#[test]
fn formats_frame_durations() {
    assert_eq!(time_str(0.0), "00:00:00.000");
    // One 1024-sample frame at 48 kHz.
    assert_eq!(time_str(1024.0 / 48000.0), "00:00:00.021");
    assert_eq!(time_str(61.5), "00:01:01.500");
    assert_eq!(time_str(3723.004), "01:02:03.004");
}

#[test]
fn rounds_instead_of_truncating() {
    // 1000 frames at 48 kHz is 21.333... s; 3 frames of 0.1 s sum to 0.30000000000000004.
    assert_eq!(time_str(1000.0 * 1024.0 / 48000.0), "00:00:21.333");
    assert_eq!(time_str(0.1 + 0.1 + 0.1), "00:00:00.300");
    assert_eq!(time_str(0.9999), "00:00:01.000");
}

#[test]
fn long_durations_widen_hours() {
    assert_eq!(time_str(100.0 * 3600.0), "100:00:00.000");
    assert_eq!(time_str(-1.0), "00:00:00.000");
}
