//! HSL color model for the vizwave engine.
//!
//! Scenes describe particle color procedurally as hue/saturation/lightness and
//! project it to [`Rgba`] in the frame snapshot via the pure [`hsl_to_rgba`]
//! conversion. All channels use `f64` in [0, 1]; hue is in degrees.

use crate::error::EngineError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An RGBA color with all four components in [0, 1].
///
/// Serializes as a hex string `"#rrggbbaa"` for human-readable formats.
/// The hex round-trip has 8-bit quantization (1/255 precision loss),
/// which is acceptable since hex colors are inherently 8-bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Parses a hex color string like "#22aaffcc" or "22aaff" (case
    /// insensitive). Six digits imply an alpha of 1.0.
    ///
    /// Returns `EngineError::InvalidColor` for anything else.
    pub fn from_hex(hex: &str) -> Result<Rgba, EngineError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 && hex.len() != 8 {
            return Err(EngineError::InvalidColor(format!(
                "expected 6 or 8 hex digits, got {}",
                hex.len()
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|e| EngineError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Rgba {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
            a: if hex.len() == 8 {
                channel(6..8, "alpha")?
            } else {
                1.0
            },
        })
    }

    /// Converts the color to a hex string like `"#rrggbbaa"`.
    ///
    /// Components are clamped to [0, 1] and quantized to 8-bit with rounding.
    pub fn to_hex(self) -> String {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            q(self.r),
            q(self.g),
            q(self.b),
            q(self.a)
        )
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Normalizes a hue in degrees into [0, 360).
pub fn wrap_hue(h: f64) -> f64 {
    h.rem_euclid(360.0)
}

/// Converts an HSL color to RGBA.
///
/// `h` is in degrees and must already lie in [0, 360) — callers pre-wrap with
/// [`wrap_hue`]; the function does not defend against out-of-range hue.
/// `s`, `l`, and `a` are in [0, 1]. Uses the standard chroma/sextant
/// algorithm with sextant boundaries at 60, 120, 180, 240, and 300 degrees.
pub fn hsl_to_rgba(h: f64, s: f64, l: f64, a: f64) -> Rgba {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgba {
        r: r + m,
        g: g + m,
        b: b + m,
        a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn assert_rgb(color: Rgba, r: f64, g: f64, b: f64) {
        assert!(approx_eq(color.r, r), "r: {} vs {r}", color.r);
        assert!(approx_eq(color.g, g), "g: {} vs {g}", color.g);
        assert!(approx_eq(color.b, b), "b: {} vs {b}", color.b);
    }

    // -- Primary hues at full saturation, half lightness --

    #[test]
    fn hue_zero_is_pure_red() {
        let c = hsl_to_rgba(0.0, 1.0, 0.5, 1.0);
        assert_rgb(c, 1.0, 0.0, 0.0);
        assert!(approx_eq(c.a, 1.0));
    }

    #[test]
    fn hue_120_is_pure_green() {
        assert_rgb(hsl_to_rgba(120.0, 1.0, 0.5, 1.0), 0.0, 1.0, 0.0);
    }

    #[test]
    fn hue_240_is_pure_blue() {
        assert_rgb(hsl_to_rgba(240.0, 1.0, 0.5, 1.0), 0.0, 0.0, 1.0);
    }

    // -- Sextant boundaries --

    #[test]
    fn hue_60_is_yellow() {
        assert_rgb(hsl_to_rgba(60.0, 1.0, 0.5, 1.0), 1.0, 1.0, 0.0);
    }

    #[test]
    fn hue_180_is_cyan() {
        assert_rgb(hsl_to_rgba(180.0, 1.0, 0.5, 1.0), 0.0, 1.0, 1.0);
    }

    #[test]
    fn hue_300_is_magenta() {
        assert_rgb(hsl_to_rgba(300.0, 1.0, 0.5, 1.0), 1.0, 0.0, 1.0);
    }

    // -- Saturation and lightness extremes --

    #[test]
    fn zero_saturation_is_gray_regardless_of_hue() {
        for h in [0.0, 47.0, 133.0, 275.0, 359.0] {
            let c = hsl_to_rgba(h, 0.0, 0.3, 1.0);
            assert_rgb(c, 0.3, 0.3, 0.3);
        }
    }

    #[test]
    fn zero_lightness_is_black() {
        assert_rgb(hsl_to_rgba(200.0, 1.0, 0.0, 1.0), 0.0, 0.0, 0.0);
    }

    #[test]
    fn full_lightness_is_white() {
        assert_rgb(hsl_to_rgba(200.0, 1.0, 1.0, 1.0), 1.0, 1.0, 1.0);
    }

    #[test]
    fn alpha_passes_through_unchanged() {
        let c = hsl_to_rgba(210.0, 1.0, 0.6, 0.25);
        assert!(approx_eq(c.a, 0.25));
    }

    // -- wrap_hue --

    #[test]
    fn wrap_hue_leaves_in_range_values_alone() {
        assert!(approx_eq(wrap_hue(42.0), 42.0));
        assert!(approx_eq(wrap_hue(0.0), 0.0));
    }

    #[test]
    fn wrap_hue_wraps_360_to_zero() {
        assert!(approx_eq(wrap_hue(360.0), 0.0));
    }

    #[test]
    fn wrap_hue_wraps_negative_values() {
        assert!(approx_eq(wrap_hue(-30.0), 330.0));
        assert!(approx_eq(wrap_hue(-720.0), 0.0));
    }

    #[test]
    fn wrap_hue_wraps_large_values() {
        assert!(approx_eq(wrap_hue(725.0), 5.0));
    }

    // -- Hex parsing --

    #[test]
    fn from_hex_parses_six_digits_with_full_alpha() {
        let c = Rgba::from_hex("#3b82f6").unwrap();
        assert!(approx_eq(c.r, 0x3b as f64 / 255.0));
        assert!(approx_eq(c.g, 0x82 as f64 / 255.0));
        assert!(approx_eq(c.b, 0xf6 as f64 / 255.0));
        assert!(approx_eq(c.a, 1.0));
    }

    #[test]
    fn from_hex_parses_eight_digits_with_alpha() {
        let c = Rgba::from_hex("ff000080").unwrap();
        assert!(approx_eq(c.r, 1.0));
        assert!(approx_eq(c.a, 0x80 as f64 / 255.0));
    }

    #[test]
    fn from_hex_is_case_insensitive() {
        let upper = Rgba::from_hex("#FF00AA").unwrap();
        let lower = Rgba::from_hex("#ff00aa").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn from_hex_rejects_invalid_input() {
        assert!(Rgba::from_hex("#gggggg").is_err());
        assert!(Rgba::from_hex("#fff").is_err());
        assert!(Rgba::from_hex("").is_err());
        assert!(Rgba::from_hex("#ff00ff00ff").is_err());
    }

    // -- Hex formatting and serde --

    #[test]
    fn to_hex_pure_red_opaque() {
        let red = Rgba {
            r: 1.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        };
        assert_eq!(red.to_hex(), "#ff0000ff");
    }

    #[test]
    fn to_hex_clamps_out_of_range() {
        let c = Rgba {
            r: 1.5,
            g: -0.1,
            b: 0.5,
            a: 2.0,
        };
        assert_eq!(c.to_hex(), "#ff0080ff");
    }

    #[test]
    fn from_hex_to_hex_round_trip() {
        let original = "#c0ffee42";
        let color = Rgba::from_hex(original).unwrap();
        assert_eq!(color.to_hex(), original);
    }

    #[test]
    fn rgba_serializes_as_hex_string() {
        let c = Rgba {
            r: 0.0,
            g: 1.0,
            b: 0.0,
            a: 1.0,
        };
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#00ff00ff\"");
    }

    #[test]
    fn rgba_deserializes_from_hex_string() {
        let c: Rgba = serde_json::from_str("\"#0000ff\"").unwrap();
        assert!(approx_eq(c.b, 1.0));
        assert!(approx_eq(c.a, 1.0));
    }

    #[test]
    fn rgba_deserialize_rejects_invalid_hex() {
        let result: Result<Rgba, _> = serde_json::from_str("\"not-a-color\"");
        assert!(result.is_err());
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn channels_stay_in_unit_interval_for_valid_input(
                h in 0.0_f64..360.0,
                s in 0.0_f64..=1.0,
                l in 0.0_f64..=1.0,
                a in 0.0_f64..=1.0,
            ) {
                let c = hsl_to_rgba(h, s, l, a);
                for (name, v) in [("r", c.r), ("g", c.g), ("b", c.b), ("a", c.a)] {
                    prop_assert!(
                        (0.0..=1.0).contains(&v),
                        "{name} = {v} out of [0, 1] for h={h} s={s} l={l}"
                    );
                }
            }

            #[test]
            fn wrap_hue_always_lands_in_range(h in -1e6_f64..1e6) {
                let wrapped = wrap_hue(h);
                prop_assert!(
                    (0.0..360.0).contains(&wrapped),
                    "wrap_hue({h}) = {wrapped}"
                );
            }

            #[test]
            fn hex_round_trip_within_quantization(
                r in 0.0_f64..=1.0,
                g in 0.0_f64..=1.0,
                b in 0.0_f64..=1.0,
                a in 0.0_f64..=1.0,
            ) {
                let original = Rgba { r, g, b, a };
                let round_tripped = Rgba::from_hex(&original.to_hex()).unwrap();
                let max_err = 0.5 / 255.0 + 1e-10;
                prop_assert!((round_tripped.r - r).abs() < max_err);
                prop_assert!((round_tripped.g - g).abs() < max_err);
                prop_assert!((round_tripped.b - b).abs() < max_err);
                prop_assert!((round_tripped.a - a).abs() < max_err);
            }
        }
    }
}
