// Float32 post-processing for firmware constants
//
// Devices store round configuration values (0.1, 12.34, ...) as IEEE-754 singles, which read
// back as 0.10000000149011612 and friends. The thresholded decode snaps such values back to
// the 2-decimal number the firmware was configured with.

use super::elements::{read_f32_be, Result};

/// Minimum absolute distance still treated as float noise
pub const THRESHOLD_EPSILON: f64 = 1e-4;

/// Upper bound of the tolerance, strictly below half the 0.01 spacing of 2-decimal values
pub const MAX_THRESHOLD: f64 = 0.004_999;

/// Snap @value to the nearest 2-decimal number when it lies within float32 noise of it
///
/// The tolerance is half an f32 ulp at the magnitude of the value, never below
/// [`THRESHOLD_EPSILON`] and never above [`MAX_THRESHOLD`].
pub fn snap_to_two_decimals(value: f32) -> f64 {
    let wide = f64::from(value);
    if !wide.is_finite() {
        return wide;
    }

    let candidate = (wide * 100.0).round() / 100.0;
    let tolerance = THRESHOLD_EPSILON
        .max(wide.abs() * f64::from(f32::EPSILON) / 2.0)
        .min(MAX_THRESHOLD);

    if (wide - candidate).abs() <= tolerance {
        candidate
    } else {
        wide
    }
}

/// Decode a big-endian float32 without any rounding
pub fn decode_float32(data: &[u8]) -> Result<f64> {
    Ok(f64::from(read_f32_be(data)?))
}

/// Decode a big-endian float32 and snap it to a clean 2-decimal value when close enough
pub fn decode_float32_thresholded(data: &[u8]) -> Result<f64> {
    Ok(snap_to_two_decimals(read_f32_be(data)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_values_snap_exactly() {
        for v in [0.1, 0.2, 0.3, 1.23, 12.34, -7.77, 99.99, 250.5, 1000.01, 0.0, -0.01] {
            let encoded = (v as f32).to_be_bytes();
            assert_eq!(decode_float32_thresholded(&encoded).unwrap(), v, "value {}", v);
        }
    }

    #[test]
    fn test_noisy_value_passes_through() {
        let raw = 1.23456_f32;
        let encoded = raw.to_be_bytes();
        assert_eq!(decode_float32_thresholded(&encoded).unwrap(), f64::from(raw));
        assert_eq!(decode_float32(&encoded).unwrap(), f64::from(raw));

        // exactly representable and 0.005 away from both 2-decimal neighbours
        for raw in [50000.125_f32, -50000.125, 65000.375] {
            let encoded = raw.to_be_bytes();
            assert_eq!(
                decode_float32_thresholded(&encoded).unwrap(),
                f64::from(raw),
                "value {}",
                raw
            );
        }
    }

    #[test]
    fn test_large_clean_value_snaps() {
        // nearest f32 is 12345.6796875
        assert_eq!(decode_float32_thresholded(&12345.68f32.to_be_bytes()).unwrap(), 12345.68);
    }

    #[test]
    fn test_tolerance_is_capped() {
        // f32 spacing here is 0.0625, so half an ulp would swallow every 2-decimal gap
        let raw = 1_000_000.125_f32;
        assert_eq!(snap_to_two_decimals(raw), f64::from(raw));
        assert_eq!(snap_to_two_decimals(1_000_000.0), 1_000_000.0);
    }

    #[test]
    fn test_plain_decode_keeps_noise() {
        let encoded = 0.1f32.to_be_bytes();
        let plain = decode_float32(&encoded).unwrap();
        assert_ne!(plain, 0.1);
        assert!((plain - 0.1).abs() < 1e-7);
    }

    #[test]
    fn test_snapping_is_idempotent() {
        for raw in [0.1f32, 3.3333333, 42.004999, -17.25, 1e6, 1.23456] {
            let once = snap_to_two_decimals(raw);
            assert_eq!(snap_to_two_decimals(once as f32), once, "value {}", raw);
        }
    }

    #[test]
    fn test_non_finite() {
        assert!(snap_to_two_decimals(f32::NAN).is_nan());
        assert_eq!(snap_to_two_decimals(f32::INFINITY), f64::INFINITY);
    }
}
