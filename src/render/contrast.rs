use super::color::{Color, VariantSet};

/// Luminance at or above which a background counts as light.
pub const DEFAULT_CONTRAST_THRESHOLD: f64 = 0.5;

/// Picks a legible foreground for `background` out of the same hue's variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastResolver {
    threshold: f64,
}

impl Default for ContrastResolver {
    fn default() -> Self {
        Self::new(DEFAULT_CONTRAST_THRESHOLD)
    }
}

impl ContrastResolver {
    /// Thresholds outside `[0, 1]` (or NaN) are clamped to the nearest valid value.
    pub fn new(threshold: f64) -> Self {
        let threshold = if threshold.is_nan() {
            DEFAULT_CONTRAST_THRESHOLD
        } else {
            threshold.clamp(0.0, 1.0)
        };
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_light(&self, background: Color) -> bool {
        background.luminance() >= self.threshold
    }

    pub fn readable_foreground(&self, background: Color, variants: &VariantSet) -> Color {
        if self.is_light(background) {
            variants.dark55
        } else {
            variants.light55
        }
    }
}

/// [`ContrastResolver::readable_foreground`] with the default threshold.
pub fn resolve_readable_foreground(background: Color, variants: &VariantSet) -> Color {
    ContrastResolver::default().readable_foreground(background, variants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::color::generate_variants;

    #[test]
    fn white_background_gets_darkest_variant() {
        let variants = generate_variants(Color::WHITE);
        assert_eq!(
            resolve_readable_foreground(Color::WHITE, &variants),
            variants.dark55
        );
        assert_eq!(variants.dark55.to_hex(), "#737373");
    }

    #[test]
    fn black_background_gets_lightest_variant() {
        let variants = generate_variants(Color::BLACK);
        assert_eq!(
            resolve_readable_foreground(Color::BLACK, &variants),
            variants.light55
        );
        assert_eq!(variants.light55.to_hex(), "#8c8c8c");
    }

    #[test]
    fn mid_gray_sits_on_light_side() {
        let gray = Color::rgb(0x80, 0x80, 0x80);
        let variants = generate_variants(gray);
        assert_eq!(resolve_readable_foreground(gray, &variants), variants.dark55);
        assert_eq!(variants.dark55.to_hex(), "#3a3a3a");
    }

    #[test]
    fn just_below_threshold_is_dark() {
        let gray = Color::rgb(0x7f, 0x7f, 0x7f);
        let variants = generate_variants(gray);
        assert_eq!(
            resolve_readable_foreground(gray, &variants),
            variants.light55
        );
    }

    #[test]
    fn custom_threshold_shifts_the_boundary() {
        let gray = Color::rgb(0x80, 0x80, 0x80);
        let variants = generate_variants(gray);
        let strict = ContrastResolver::new(0.75);
        assert_eq!(strict.readable_foreground(gray, &variants), variants.light55);
    }

    #[test]
    fn threshold_is_clamped() {
        assert_eq!(ContrastResolver::new(7.0).threshold(), 1.0);
        assert_eq!(ContrastResolver::new(-1.0).threshold(), 0.0);
        assert_eq!(
            ContrastResolver::new(f64::NAN).threshold(),
            DEFAULT_CONTRAST_THRESHOLD
        );
    }
}
