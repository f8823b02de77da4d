//! Human-readable byte sizes for the traffic header and chart axis.

const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// 1024-based size with up to two decimals, trailing zeros dropped
/// (`0 Bytes`, `512 Bytes`, `1.5 KB`, `2 MB`). Values past the terabyte
/// range stay in TB.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}
