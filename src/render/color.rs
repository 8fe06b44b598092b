use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{PulselineError, Result};

/// Mid-gray substituted for malformed hex values and missing theme tokens.
pub const NEUTRAL_FALLBACK: Color = Color::rgb(0x80, 0x80, 0x80);

/// 24-bit RGB color. Serialized as lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb`, `#rrggbb`, or either form without the leading `#`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(PulselineError::invalid_color(input));
        }

        let channel = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|_| PulselineError::invalid_color(input))
        };

        match hex.len() {
            3 => {
                let expand = |idx: usize| channel(&hex[idx..=idx].repeat(2));
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(PulselineError::invalid_color(input)),
        }
    }

    /// Parse, logging and substituting [`NEUTRAL_FALLBACK`] on failure.
    pub fn parse_or_fallback(input: &str) -> Self {
        Self::parse(input).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "substituting neutral fallback color");
            NEUTRAL_FALLBACK
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Perceptual luminance `0.299R + 0.587G + 0.114B`, normalized to `[0, 1]`.
    pub fn luminance(self) -> f64 {
        self.luminance_milli() as f64 / 255_000.0
    }

    /// Integer luminance score in `[0, 255_000]`.
    pub fn luminance_milli(self) -> u32 {
        299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b)
    }

    pub fn lighten(self, percent: u8) -> Self {
        self.mix_toward(Color::WHITE, percent)
    }

    pub fn darken(self, percent: u8) -> Self {
        self.mix_toward(Color::BLACK, percent)
    }

    pub fn shift(self, direction: ShiftDirection, percent: u8) -> Self {
        match direction {
            ShiftDirection::Lighten => self.lighten(percent),
            ShiftDirection::Darken => self.darken(percent),
        }
    }

    fn mix_toward(self, target: Color, percent: u8) -> Self {
        let p = u32::from(percent.min(100));
        Self::rgb(
            mix_channel(self.r, target.r, p),
            mix_channel(self.g, target.g, p),
            mix_channel(self.b, target.b, p),
        )
    }
}

/// `round(c + (t - c) * p / 100)` with round-half-up, in integers.
///
/// `c*100 + (t-c)*p == c*(100-p) + t*p`, which is never negative.
fn mix_channel(channel: u8, target: u8, p: u32) -> u8 {
    let numerator = u32::from(channel) * (100 - p) + u32::from(target) * p;
    ((numerator + 50) / 100).min(255) as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = PulselineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = PulselineError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShiftDirection {
    Lighten,
    Darken,
}

/// The six derived variants of a base color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variant {
    Light10,
    Light20,
    Light55,
    Dark10,
    Dark20,
    Dark55,
}

impl Variant {
    pub const ALL: [Variant; 6] = [
        Variant::Light10,
        Variant::Light20,
        Variant::Light55,
        Variant::Dark10,
        Variant::Dark20,
        Variant::Dark55,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Light10 => "light10",
            Variant::Light20 => "light20",
            Variant::Light55 => "light55",
            Variant::Dark10 => "dark10",
            Variant::Dark20 => "dark20",
            Variant::Dark55 => "dark55",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|variant| variant.as_str() == name)
    }

    pub fn direction(self) -> ShiftDirection {
        match self {
            Variant::Light10 | Variant::Light20 | Variant::Light55 => ShiftDirection::Lighten,
            Variant::Dark10 | Variant::Dark20 | Variant::Dark55 => ShiftDirection::Darken,
        }
    }

    pub fn percent(self) -> u8 {
        match self {
            Variant::Light10 | Variant::Dark10 => 10,
            Variant::Light20 | Variant::Dark20 => 20,
            Variant::Light55 | Variant::Dark55 => 55,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariantSet {
    pub light10: Color,
    pub light20: Color,
    pub light55: Color,
    pub dark10: Color,
    pub dark20: Color,
    pub dark55: Color,
}

impl VariantSet {
    pub fn get(&self, variant: Variant) -> Color {
        match variant {
            Variant::Light10 => self.light10,
            Variant::Light20 => self.light20,
            Variant::Light55 => self.light55,
            Variant::Dark10 => self.dark10,
            Variant::Dark20 => self.dark20,
            Variant::Dark55 => self.dark55,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variant, Color)> + '_ {
        Variant::ALL.into_iter().map(|variant| (variant, self.get(variant)))
    }

    /// Rebuild a set from exactly one color per variant.
    pub fn from_entries(entries: &[(Variant, Color)]) -> Option<Self> {
        if entries.len() != Variant::ALL.len() {
            return None;
        }
        let find = |wanted: Variant| {
            entries
                .iter()
                .find(|(variant, _)| *variant == wanted)
                .map(|(_, color)| *color)
        };
        Some(Self {
            light10: find(Variant::Light10)?,
            light20: find(Variant::Light20)?,
            light55: find(Variant::Light55)?,
            dark10: find(Variant::Dark10)?,
            dark20: find(Variant::Dark20)?,
            dark55: find(Variant::Dark55)?,
        })
    }
}

pub fn generate_variants(base: Color) -> VariantSet {
    let derive = |variant: Variant| base.shift(variant.direction(), variant.percent());
    VariantSet {
        light10: derive(Variant::Light10),
        light20: derive(Variant::Light20),
        light55: derive(Variant::Light55),
        dark10: derive(Variant::Dark10),
        dark20: derive(Variant::Dark20),
        dark55: derive(Variant::Dark55),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKYO_BLUE: Color = Color::rgb(0x7a, 0xa2, 0xf7);

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(Color::parse("#7aa2f7").unwrap(), TOKYO_BLUE);
        assert_eq!(Color::parse("7AA2F7").unwrap(), TOKYO_BLUE);
    }

    #[test]
    fn parses_three_digit_hex() {
        assert_eq!(Color::parse("#fa0").unwrap(), Color::rgb(0xff, 0xaa, 0x00));
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#", "#12345", "#1234567", "#ggg", "blue", "#12 456"] {
            assert!(
                matches!(
                    Color::parse(bad),
                    Err(PulselineError::InvalidColorFormat { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn malformed_hex_falls_back_to_mid_gray() {
        assert_eq!(Color::parse_or_fallback("#nothex"), NEUTRAL_FALLBACK);
        assert_eq!(NEUTRAL_FALLBACK.to_hex(), "#808080");
    }

    #[test]
    fn hex_output_is_lowercase() {
        assert_eq!(Color::parse("#ABCDEF").unwrap().to_hex(), "#abcdef");
    }

    #[test]
    fn zero_percent_is_identity() {
        assert_eq!(TOKYO_BLUE.lighten(0), TOKYO_BLUE);
        assert_eq!(TOKYO_BLUE.darken(0), TOKYO_BLUE);
    }

    #[test]
    fn full_percent_reaches_extremes() {
        assert_eq!(TOKYO_BLUE.lighten(100), Color::WHITE);
        assert_eq!(TOKYO_BLUE.darken(100), Color::BLACK);
    }

    #[test]
    fn percent_above_hundred_clamps() {
        assert_eq!(TOKYO_BLUE.lighten(250), Color::WHITE);
    }

    #[test]
    fn rounds_half_up() {
        // 1 * 50% toward black = 0.5 -> 1
        assert_eq!(Color::rgb(1, 1, 1).darken(50), Color::rgb(1, 1, 1));
        // 3 * 50% = 1.5 -> 2
        assert_eq!(Color::rgb(3, 3, 3).darken(50), Color::rgb(2, 2, 2));
    }

    #[test]
    fn tokyo_blue_variants_golden() {
        let set = generate_variants(TOKYO_BLUE);
        assert_eq!(set.light10.to_hex(), "#87abf8");
        assert_eq!(set.light20.to_hex(), "#95b5f9");
        assert_eq!(set.light55.to_hex(), "#c3d5fb");
        assert_eq!(set.dark10.to_hex(), "#6e92de");
        assert_eq!(set.dark20.to_hex(), "#6282c6");
        assert_eq!(set.dark55.to_hex(), "#37496f");
    }

    #[test]
    fn variant_names_round_trip() {
        for variant in Variant::ALL {
            assert_eq!(Variant::parse(variant.as_str()), Some(variant));
        }
        assert_eq!(Variant::parse("light30"), None);
    }

    #[test]
    fn from_entries_requires_all_six() {
        let set = generate_variants(TOKYO_BLUE);
        let entries: Vec<_> = set.iter().collect();
        assert_eq!(VariantSet::from_entries(&entries), Some(set));
        assert_eq!(VariantSet::from_entries(&entries[..5]), None);

        let mut duplicated = entries.clone();
        duplicated[5] = duplicated[0];
        assert_eq!(VariantSet::from_entries(&duplicated), None);
    }

    #[test]
    fn luminance_of_extremes() {
        assert_eq!(Color::WHITE.luminance(), 1.0);
        assert_eq!(Color::BLACK.luminance(), 0.0);
        assert!(NEUTRAL_FALLBACK.luminance() > 0.5);
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&TOKYO_BLUE).unwrap();
        assert_eq!(json, "\"#7aa2f7\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TOKYO_BLUE);
        assert!(serde_json::from_str::<Color>("\"#xyz\"").is_err());
    }
}
