use std::{fmt, str::FromStr};

use crate::error::{PulselineError, Result};

/// Which way a separator's tip points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SeparatorStyle {
    #[default]
    Normal,
    Rounded,
    Slant,
    Flame,
    Pixel,
    Honeycomb,
    Trapezoid,
    None,
}

/// Style used when a configured name is not recognized.
pub const DEFAULT_STYLE: SeparatorStyle = SeparatorStyle::Normal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparatorGlyphs {
    pub left: &'static str,
    pub right: &'static str,
}

impl SeparatorStyle {
    pub const ALL: [SeparatorStyle; 8] = [
        SeparatorStyle::Normal,
        SeparatorStyle::Rounded,
        SeparatorStyle::Slant,
        SeparatorStyle::Flame,
        SeparatorStyle::Pixel,
        SeparatorStyle::Honeycomb,
        SeparatorStyle::Trapezoid,
        SeparatorStyle::None,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SeparatorStyle::Normal => "normal",
            SeparatorStyle::Rounded => "rounded",
            SeparatorStyle::Slant => "slant",
            SeparatorStyle::Flame => "flame",
            SeparatorStyle::Pixel => "pixel",
            SeparatorStyle::Honeycomb => "honeycomb",
            SeparatorStyle::Trapezoid => "trapezoid",
            SeparatorStyle::None => "none",
        }
    }

    pub fn glyphs(self) -> SeparatorGlyphs {
        let (right, left) = match self {
            SeparatorStyle::Normal => ("\u{e0b0}", "\u{e0b2}"),
            SeparatorStyle::Rounded => ("\u{e0b4}", "\u{e0b6}"),
            SeparatorStyle::Slant => ("\u{e0bc}", "\u{e0be}"),
            SeparatorStyle::Flame => ("\u{e0c0}", "\u{e0c2}"),
            SeparatorStyle::Pixel => ("\u{e0c4}", "\u{e0c6}"),
            SeparatorStyle::Honeycomb => ("\u{e0cc}", "\u{e0cd}"),
            SeparatorStyle::Trapezoid => ("\u{e0d2}", "\u{e0d4}"),
            SeparatorStyle::None => ("", ""),
        };
        SeparatorGlyphs { left, right }
    }

    pub fn glyph(self, direction: Direction) -> &'static str {
        let glyphs = self.glyphs();
        match direction {
            Direction::Left => glyphs.left,
            Direction::Right => glyphs.right,
        }
    }

    pub fn is_none(self) -> bool {
        self == SeparatorStyle::None
    }

    pub fn parse(name: &str) -> Result<Self> {
        let wanted = name.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|style| style.name() == wanted)
            .ok_or_else(|| PulselineError::UnknownSeparatorStyle {
                name: name.to_string(),
            })
    }

    /// Lenient lookup: unknown names log and resolve to [`DEFAULT_STYLE`].
    pub fn from_name_or_default(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|err| {
            tracing::warn!(
                error = %err,
                fallback = DEFAULT_STYLE.name(),
                "unknown separator style"
            );
            DEFAULT_STYLE
        })
    }
}

impl fmt::Display for SeparatorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SeparatorStyle {
    type Err = PulselineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Glyph lookup for a style name. Unknown names use the default style.
pub fn glyph(style: &str, direction: Direction) -> &'static str {
    SeparatorStyle::from_name_or_default(style).glyph(direction)
}

/// Edge style plus its `:all` modifier, e.g. `rounded:all`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EdgeStyle {
    pub style: SeparatorStyle,
    pub all: bool,
}

impl EdgeStyle {
    pub fn parse(value: &str) -> Self {
        let mut parts = value.split(':');
        let style = SeparatorStyle::from_name_or_default(parts.next().unwrap_or_default());
        let mut all = false;
        for modifier in parts {
            match modifier.trim() {
                "all" => all = true,
                "" => {}
                other => tracing::warn!(modifier = other, "ignoring unknown edge modifier"),
            }
        }
        Self { style, all }
    }
}

/// Where a separator sits relative to the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// Between two adjacent segments.
    Inner,
    /// Between a segment's icon and content sections.
    Internal,
    /// Outer end of the list facing the rest of the status bar.
    BarEdge,
    /// Outer end of the list facing the screen border.
    ScreenEdge,
    /// Next to a spacing gap.
    Gap,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SeparatorConfig {
    pub main: SeparatorStyle,
    pub edge: EdgeStyle,
    pub initial: Option<SeparatorStyle>,
}

impl SeparatorConfig {
    pub fn uniform(style: SeparatorStyle) -> Self {
        Self {
            main: style,
            edge: EdgeStyle { style, all: false },
            initial: None,
        }
    }

    pub fn style_for(&self, boundary: Boundary) -> SeparatorStyle {
        match boundary {
            Boundary::Inner | Boundary::Internal => self.main,
            Boundary::BarEdge => self.edge.style,
            Boundary::ScreenEdge => match self.initial {
                Some(style) => style,
                None if self.edge.all => self.edge.style,
                None => SeparatorStyle::None,
            },
            Boundary::Gap if self.edge.all => self.edge.style,
            Boundary::Gap => self.main,
        }
    }
}
