//! Color derivation.
//!
//! Every secondary color in a composed scene (highlights, shadows, blush,
//! iris gradient stops) is derived from the configured base colors through
//! the two adjustment operations here. The vector backend adjusts in
//! per-channel 0–255 space; the polygonal backend adjusts lightness in HSL
//! space. Both conventions are held consistent per backend.

use crate::config::Configuration;
use crate::foundation::core::BackendKind;

/// Packed RGB color, channels 0–255.
///
/// Serializes as `#rrggbb`, the form the drawing hosts consume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Universal accent colors, deliberately not user-configurable.
pub const ACCENT_WHITE: Rgb8 = Rgb8::new(255, 255, 255);
pub const ACCENT_RIBBON_RED: Rgb8 = Rgb8::new(224, 70, 70);
pub const ACCENT_PUPIL_NAVY: Rgb8 = Rgb8::new(21, 21, 40);

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (leading `#` optional, case-insensitive).
    pub fn parse_hex(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> Result<u8, String> {
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
        }

        if s.len() != 6 {
            return Err("hex color must be #RRGGBB (case-insensitive)".to_owned());
        }
        Ok(Self {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Vector-backend brightness adjustment: signed per-channel offset in
    /// 0–255 space, each channel clamped.
    pub fn offset(self, amount: i16) -> Self {
        fn shift(c: u8, amount: i16) -> u8 {
            (i16::from(c) + amount).clamp(0, 255) as u8
        }

        Self {
            r: shift(self.r, amount),
            g: shift(self.g, amount),
            b: shift(self.b, amount),
        }
    }

    /// Polygonal-backend brightness adjustment: fractional lightness offset
    /// applied in HSL space, lightness clamped to [0, 1].
    pub fn lighten(self, amount: f64) -> Self {
        let (h, s, l) = self.to_hsl();
        Self::from_hsl(h, s, (l + amount).clamp(0.0, 1.0))
    }

    /// Channel-wise blend toward `other` by `t` in [0, 1].
    pub fn mix(self, other: Self, t: f64) -> Self {
        fn mix_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        let t = t.clamp(0.0, 1.0);
        Self {
            r: mix_u8(self.r, other.r, t),
            g: mix_u8(self.g, other.g, t),
            b: mix_u8(self.b, other.b, t),
        }
    }

    fn to_hsl(self) -> (f64, f64, f64) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return (0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
        } else if max == g {
            ((b - r) / d + 2.0) / 6.0
        } else {
            ((r - g) / d + 4.0) / 6.0
        };
        (h, s, l)
    }

    fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            if t < 1.0 / 6.0 {
                return p + (q - p) * 6.0 * t;
            }
            if t < 1.0 / 2.0 {
                return q;
            }
            if t < 2.0 / 3.0 {
                return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
            }
            p
        }

        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        if s == 0.0 {
            let v = to_u8(l);
            return Self { r: v, g: v, b: v };
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self {
            r: to_u8(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            g: to_u8(hue_to_rgb(p, q, h)),
            b: to_u8(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        }
    }
}

impl serde::Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr([u8; 3]),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Rgb8::parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr([r, g, b]) => Ok(Rgb8 { r, g, b }),
        }
    }
}

/// Base color plus its derived highlight and shadow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ShadeSet {
    pub base: Rgb8,
    pub highlight: Rgb8,
    pub shadow: Rgb8,
}

impl ShadeSet {
    fn derive(base: Rgb8, backend: BackendKind) -> Self {
        match backend {
            BackendKind::Vector => Self {
                base,
                highlight: base.offset(24),
                shadow: base.offset(-28),
            },
            BackendKind::Polygonal => Self {
                base,
                highlight: base.lighten(0.08),
                shadow: base.lighten(-0.10),
            },
        }
    }
}

/// Full derived shade palette for one render pass.
///
/// A pure function of [`Configuration`]; recomputed per render, never cached
/// across configuration changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Palette {
    pub skin: ShadeSet,
    pub hair: ShadeSet,
    pub eye: ShadeSet,
    pub clothes: ShadeSet,
    pub clothes_secondary: ShadeSet,
    /// Skin blended toward the fixed ribbon red.
    pub blush: Rgb8,
    /// Dark mouth line derived from skin.
    pub mouth: Rgb8,
}

impl Palette {
    pub fn derive(cfg: &Configuration) -> Self {
        let backend = cfg.backend;
        let mouth = match backend {
            BackendKind::Vector => cfg.skin_color.offset(-96),
            BackendKind::Polygonal => cfg.skin_color.lighten(-0.35),
        };
        Self {
            skin: ShadeSet::derive(cfg.skin_color, backend),
            hair: ShadeSet::derive(cfg.hair_color, backend),
            eye: ShadeSet::derive(cfg.eye_color, backend),
            clothes: ShadeSet::derive(cfg.clothes_color, backend),
            clothes_secondary: ShadeSet::derive(cfg.clothes_secondary_color, backend),
            blush: cfg.skin_color.mix(ACCENT_RIBBON_RED, 0.35),
            mouth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let c = Rgb8::parse_hex("#A1B2C3").unwrap();
        assert_eq!(c, Rgb8::new(0xA1, 0xB2, 0xC3));
        assert_eq!(c.to_hex(), "#a1b2c3");
        assert_eq!(Rgb8::parse_hex("a1b2c3").unwrap(), c);
    }

    #[test]
    fn hex_rejects_malformed() {
        assert!(Rgb8::parse_hex("#12345").is_err());
        assert!(Rgb8::parse_hex("#gg0000").is_err());
    }

    #[test]
    fn offset_zero_is_identity() {
        let c = Rgb8::new(120, 80, 200);
        assert_eq!(c.offset(0), c);
    }

    #[test]
    fn offset_inverse_within_unclamped_range() {
        let c = Rgb8::new(120, 80, 200);
        for k in [5i16, 20, 50] {
            assert_eq!(c.offset(k).offset(-k), c);
        }
    }

    #[test]
    fn offset_clamps_channels() {
        assert_eq!(Rgb8::new(250, 10, 128).offset(20).r, 255);
        assert_eq!(Rgb8::new(250, 10, 128).offset(-20).g, 0);
    }

    #[test]
    fn lighten_zero_is_near_identity() {
        // HSL roundtrip introduces at most 1/255 of rounding per channel.
        let c = Rgb8::new(120, 80, 200);
        let d = c.lighten(0.0);
        assert!((i16::from(c.r) - i16::from(d.r)).abs() <= 1);
        assert!((i16::from(c.g) - i16::from(d.g)).abs() <= 1);
        assert!((i16::from(c.b) - i16::from(d.b)).abs() <= 1);
    }

    #[test]
    fn lighten_moves_toward_white_and_black() {
        let c = Rgb8::new(120, 80, 200);
        let hi = c.lighten(0.3);
        let lo = c.lighten(-0.3);
        assert!(u32::from(hi.r) + u32::from(hi.g) + u32::from(hi.b) > 400);
        assert!(u32::from(lo.r) + u32::from(lo.g) + u32::from(lo.b) < 400);
        assert_eq!(c.lighten(1.0), Rgb8::new(255, 255, 255));
        assert_eq!(c.lighten(-1.0), Rgb8::new(0, 0, 0));
    }

    #[test]
    fn palette_derives_from_bases() {
        let cfg = Configuration::default();
        let p = Palette::derive(&cfg);
        assert_eq!(p.skin.base, cfg.skin_color);
        assert_ne!(p.skin.highlight, p.skin.shadow);
        assert_ne!(p.blush, cfg.skin_color);
    }

    #[test]
    fn serde_color_accepts_hex_and_array() {
        let a: Rgb8 = serde_json::from_str("\"#ff0080\"").unwrap();
        let b: Rgb8 = serde_json::from_str("[255, 0, 128]").unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"#ff0080\"");
    }
}
