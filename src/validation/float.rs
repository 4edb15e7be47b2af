// Tue Jan 13 2026 - Alex

use crate::validation::{dword, ValidationResult};

/// Viewport depth bound. The standard range is `[0, 1]`; some titles use
/// custom ranges, which score lower the wider they get.
pub fn validate_z_depth(bytes: &[u8], expected_size: usize) -> ValidationResult {
    let Some(raw) = dword(bytes, expected_size) else {
        return ValidationResult::invalid("Invalid field size for float Z depth", 0);
    };
    let z = f32::from_bits(raw);

    if z.is_nan() {
        return ValidationResult::invalid("Z depth is NaN", -5);
    }
    if z.is_infinite() {
        return ValidationResult::invalid("Z depth is infinite", -5);
    }

    if z == 0.0 {
        ValidationResult::valid("MinZ = 0.0 (standard near plane)", 95)
    } else if z == 1.0 {
        ValidationResult::valid("MaxZ = 1.0 (standard far plane)", 95)
    } else if (0.0..=1.0).contains(&z) {
        ValidationResult::valid("Valid Z depth in standard range", 90)
    } else if z > -10.0 && z < 10.0 {
        ValidationResult::valid("Z depth in plausible custom range", 60)
    } else if z > -1000.0 && z < 1000.0 {
        ValidationResult::valid("Z depth in extended range", 50)
    } else {
        ValidationResult::invalid("Z depth outside reasonable range", -10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn le(v: f32) -> [u8; 4] {
        v.to_le_bytes()
    }

    #[test]
    fn test_standard_range() {
        assert_eq!(validate_z_depth(&le(0.0), 4).confidence, 95);
        assert_eq!(validate_z_depth(&le(1.0), 4).confidence, 95);
        assert_eq!(validate_z_depth(&le(0.5), 4).confidence, 90);
    }

    #[test]
    fn test_custom_ranges() {
        assert_eq!(validate_z_depth(&le(-2.5), 4).confidence, 60);
        assert_eq!(validate_z_depth(&le(500.0), 4).confidence, 50);

        let far = validate_z_depth(&le(5000.0), 4);
        assert!(!far.is_valid);
        assert_eq!(far.confidence, -10);
    }

    #[test]
    fn test_non_finite() {
        for v in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let r = validate_z_depth(&le(v), 4);
            assert!(!r.is_valid);
            assert_eq!(r.confidence, -5);
        }
    }
}
