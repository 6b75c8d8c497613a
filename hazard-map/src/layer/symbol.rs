//! Symbols define how hazard features are drawn.

use crate::color::Color;
use crate::hazard::SusceptibilityLevel;
use crate::layer::feature::HazardFeature;

/// Fill color of low susceptibility areas.
pub const LOW_COLOR: Color = Color::from_hex("#FFEDA0");
/// Fill color of moderate susceptibility areas.
pub const MODERATE_COLOR: Color = Color::from_hex("#FEB24C");
/// Fill color of high susceptibility areas.
pub const HIGH_COLOR: Color = Color::from_hex("#F03B20");
/// Fill color of very high susceptibility areas.
pub const VERY_HIGH_COLOR: Color = Color::from_hex("#800026");
/// Fill color of areas with unknown or missing classification.
pub const FALLBACK_COLOR: Color = Color::from_hex("#808080");

const STROKE_COLOR: Color = Color::from_hex("#333333");
const STROKE_WIDTH: f64 = 1.0;
const FILL_OPACITY: f32 = 0.6;
const STROKE_OPACITY: f32 = 0.8;

/// Drawing parameters of a polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonStyle {
    /// Color of the inner area of the polygon, including opacity.
    pub fill_color: Color,
    /// Color of the outline, including opacity.
    pub stroke_color: Color,
    /// Width of the outline in pixels.
    pub stroke_width: f64,
}

/// Symbol is used to choose a style for a feature `F`.
pub trait Symbol<F> {
    /// Returns the style the feature should be drawn with.
    fn style(&self, feature: &F) -> PolygonStyle;
}

/// Default symbol of hazard features: fill color by susceptibility level with a thin dark outline.
#[derive(Debug, Clone, Copy, Default)]
pub struct HazardSymbol;

impl HazardSymbol {
    /// Opaque fill color of the given level. Unknown and missing levels get [`FALLBACK_COLOR`].
    pub fn fill_color(level: Option<&SusceptibilityLevel>) -> Color {
        match level {
            Some(SusceptibilityLevel::Low) => LOW_COLOR,
            Some(SusceptibilityLevel::Moderate) => MODERATE_COLOR,
            Some(SusceptibilityLevel::High) => HIGH_COLOR,
            Some(SusceptibilityLevel::VeryHigh) => VERY_HIGH_COLOR,
            Some(SusceptibilityLevel::Other(_)) | None => FALLBACK_COLOR,
        }
    }

    /// Style of a polygon with the given susceptibility level.
    pub fn style_for_level(level: Option<&SusceptibilityLevel>) -> PolygonStyle {
        PolygonStyle {
            fill_color: Self::fill_color(level).with_opacity(FILL_OPACITY),
            stroke_color: STROKE_COLOR.with_opacity(STROKE_OPACITY),
            stroke_width: STROKE_WIDTH,
        }
    }
}

impl Symbol<HazardFeature> for HazardSymbol {
    fn style(&self, feature: &HazardFeature) -> PolygonStyle {
        Self::style_for_level(feature.susceptibility())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_color_table() {
        let cases = [
            ("LS", "#FFEDA0FF"),
            ("MS", "#FEB24CFF"),
            ("HS", "#F03B20FF"),
            ("VHS", "#800026FF"),
            ("DF", "#808080FF"),
            ("", "#808080FF"),
        ];

        for (code, expected) in cases {
            let level = SusceptibilityLevel::from_code(code);
            assert_eq!(HazardSymbol::fill_color(Some(&level)).to_hex(), expected, "{code}");
        }

        assert_eq!(HazardSymbol::fill_color(None), FALLBACK_COLOR);
    }

    #[test]
    fn fill_and_stroke_opacity_differ() {
        let style = HazardSymbol::style_for_level(Some(&SusceptibilityLevel::High));
        assert_eq!(style.fill_color.a(), 153);
        assert_eq!(style.stroke_color.a(), 204);
        assert_eq!(style.stroke_width, 1.0);
        assert_eq!(
            style.stroke_color,
            HazardSymbol::style_for_level(None).stroke_color
        );
    }
}
