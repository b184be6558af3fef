//! Human-readable byte sizes.
//!
//! Sizes are expressed in powers of 1024 with the units below, rounded
//! half-up to two decimal places and printed without trailing zeros:
//! `1536` bytes becomes `"1.5 KB"`.

use thiserror::Error;

/// Unit suffixes indexed by power of 1024.
pub const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

const STEP: f64 = 1024.0;

/// Errors that can occur when formatting a size.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SizeError {
    /// Sizes cannot be negative.
    #[error("Invalid size {0}: must be non-negative")]
    Negative(f64),

    /// NaN has no magnitude.
    #[error("Invalid size: not a number")]
    NotANumber,
}

/// Format a byte count as `"<value> <unit>"`.
///
/// Zero yields `"0 B"`. Values past the terabyte range stay in `TB`. A
/// magnitude that rounds up to 1024 carries into the next unit, so
/// 1023.999 KB prints as `"1 MB"` rather than `"1024 KB"`.
///
/// # Errors
///
/// Returns `SizeError` for negative or NaN input.
pub fn format_size(bytes: f64) -> Result<String, SizeError> {
    if bytes.is_nan() {
        return Err(SizeError::NotANumber);
    }
    if bytes < 0.0 {
        return Err(SizeError::Negative(bytes));
    }
    Ok(render(bytes))
}

/// Format a byte length. Never fails.
pub fn format_bytes(len: u64) -> String {
    render(len as f64)
}

fn render(bytes: f64) -> String {
    if bytes == 0.0 {
        return format!("0 {}", UNITS[0]);
    }

    // floor(log1024(bytes)) clamped to the unit table, computed by division
    // so exact powers of 1024 never land one unit short.
    let mut index = 0;
    let mut magnitude = bytes;
    while magnitude >= STEP && index < UNITS.len() - 1 {
        magnitude /= STEP;
        index += 1;
    }

    let mut rounded = round_half_up(magnitude, 2);
    if rounded >= STEP && index < UNITS.len() - 1 {
        rounded = round_half_up(rounded / STEP, 2);
        index += 1;
    }

    format!("{} {}", rounded, UNITS[index])
}

/// Round to `places` decimals, with ties going up.
fn round_half_up(value: f64, places: i32) -> f64 {
    let pow = 10f64.powi(places);
    let digit = value * pow;
    let fraction = digit - digit.floor();
    let rounded = if fraction >= 0.5 {
        digit.ceil()
    } else {
        digit.floor()
    };
    rounded / pow
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_special_cased() {
        assert_eq!(format_size(0.0).unwrap(), "0 B");
        assert_eq!(format_bytes(0), "0 B");
    }

    #[test]
    fn test_exact_powers() {
        assert_eq!(format_size(1.0).unwrap(), "1 B");
        assert_eq!(format_size(1024.0).unwrap(), "1 KB");
        assert_eq!(format_size(1_048_576.0).unwrap(), "1 MB");
        assert_eq!(format_size(1_073_741_824.0).unwrap(), "1 GB");
        assert_eq!(format_size(1_099_511_627_776.0).unwrap(), "1 TB");
    }

    #[test]
    fn test_fractional_magnitudes() {
        assert_eq!(format_size(1536.0).unwrap(), "1.5 KB");
        assert_eq!(format_size(1023.0).unwrap(), "1023 B");
        assert_eq!(format_bytes(2_621_440), "2.5 MB");
        assert_eq!(format_bytes(1_234_567), "1.18 MB");
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.125, 2), 2.13);
        assert_eq!(round_half_up(2.124, 2), 2.12);
        assert_eq!(round_half_up(0.5, 0), 1.0);
    }

    #[test]
    fn test_rounding_carries_into_next_unit() {
        // 1023.999 KB rounds to 1024 KB, reported as 1 MB
        assert_eq!(format_size(1024.0 * 1023.999).unwrap(), "1 MB");
    }

    #[test]
    fn test_beyond_terabytes_stays_in_tb() {
        let two_pb = 2.0 * 1024f64.powi(5);
        assert_eq!(format_size(two_pb).unwrap(), "2048 TB");
    }

    #[test]
    fn test_sub_byte_values() {
        assert_eq!(format_size(0.5).unwrap(), "0.5 B");
    }

    #[test]
    fn test_negative_and_nan_rejected() {
        assert_eq!(format_size(-1.0), Err(SizeError::Negative(-1.0)));
        assert_eq!(format_size(f64::NAN), Err(SizeError::NotANumber));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            SizeError::Negative(-3.0).to_string(),
            "Invalid size -3: must be non-negative"
        );
    }
}
