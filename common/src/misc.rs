use std::time::Duration;

/// Formats a duration for log output, picking the largest sensible unit.
pub fn human_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.2}s")
    } else {
        let minutes = (secs / 60.0).floor();
        format!("{minutes:.0}m {:.2}s", secs - minutes * 60.0)
    }
}
