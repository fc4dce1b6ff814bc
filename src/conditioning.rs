// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Methods to turn raw generator output into more constrained data types.

use crate::pixels::Color;

/// Maps an i32 to the 0..1 range in f64.
/// Scales by the smallest positive subnormal f64 and drops the sign.
/// The product is exact for every i32, so distinct magnitudes stay distinct
/// and the ordering of magnitudes is preserved.
pub fn i32_to_unit_double(int: i32) -> f64 {
    let smallest_positive = f64::from_bits(1);
    (int as f64 * smallest_positive).abs()
}

/// Reinterprets the bit pattern of an i32 as an ARGB color.
/// Every bit pattern is a valid color.
pub fn i32_to_color(int: i32) -> Color {
    Color::from_argb(int as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_double_bounds() {
        for v in [0, 1, -1, i32::MAX, i32::MIN, 2147483587, -2147482550] {
            let d = i32_to_unit_double(v);
            assert!((0.0..1.0).contains(&d), "{v} -> {d}");
        }
        assert_eq!(i32_to_unit_double(0), 0.0);
    }

    #[test]
    fn unit_double_preserves_magnitude_order() {
        assert!(i32_to_unit_double(10) < i32_to_unit_double(11));
        assert_eq!(i32_to_unit_double(-10), i32_to_unit_double(10));
        assert!(i32_to_unit_double(i32::MAX) > i32_to_unit_double(i32::MAX - 1));
    }

    #[test]
    fn color_is_bit_reinterpretation() {
        assert_eq!(i32_to_color(-1).argb(), 0xffff_ffff);
        assert_eq!(i32_to_color(0).argb(), 0);
        let c = i32_to_color(0x7f12_3456);
        assert_eq!(c.alpha(), 0x7f);
        assert_eq!(c.rgb(), [0x12, 0x34, 0x56]);
        assert_eq!(i32_to_color(i32::MIN).alpha(), 0x80);
    }
}
