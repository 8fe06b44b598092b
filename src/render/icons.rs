use crate::config::GlyphMode;

pub const ICON_SESSION: &str = "\u{f489}";
pub const ICON_PREFIX: &str = "\u{f11c}";
pub const ICON_COPY_MODE: &str = "\u{f0c5}";
pub const ICON_ZOOM: &str = "\u{f002}";

pub fn glyph(mode: GlyphMode, icon: &str, ascii: &str) -> String {
    match mode {
        GlyphMode::Icon => icon.to_string(),
        GlyphMode::Ascii => ascii.to_string(),
    }
}
