//! Popups with the attributes of a clicked hazard feature.

use std::fmt::{Display, Formatter};

use crate::hazard::HazardKind;
use crate::layer::feature::HazardFeature;

/// Information popup of a rendered hazard feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    title: String,
    lines: Vec<PopupLine>,
}

/// A labeled value in a [`Popup`].
#[derive(Debug, Clone, PartialEq)]
pub struct PopupLine {
    /// Name of the value.
    pub label: &'static str,
    /// Formatted value.
    pub value: String,
}

impl Popup {
    /// Builds the popup summarizing the feature: hazard type, susceptibility level, source code and, if known, the
    /// area of the polygon.
    pub fn for_feature(kind: HazardKind, feature: &HazardFeature) -> Self {
        let mut lines = vec![
            PopupLine {
                label: "Level",
                value: feature
                    .susceptibility()
                    .map(|level| level.to_string())
                    .unwrap_or_else(|| "Unknown".to_string()),
            },
            PopupLine {
                label: "Original Code",
                value: feature.original_code().to_string(),
            },
        ];

        if let Some(area) = feature.shape_area() {
            lines.push(PopupLine {
                label: "Area",
                value: format_area(area),
            });
        }

        Self {
            title: format!("{} Susceptibility", kind.label()),
            lines,
        }
    }

    /// Title of the popup.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Content lines of the popup.
    pub fn lines(&self) -> &[PopupLine] {
        &self.lines
    }

    /// Value of the line with the given label.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value.as_str())
    }
}

impl Display for Popup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)?;
        for line in &self.lines {
            write!(f, "\n{}: {}", line.label, line.value)?;
        }

        Ok(())
    }
}

/// Formats an area in square meters with thousands separators and two decimal places.
pub fn format_area(area: f64) -> String {
    if !area.is_finite() {
        return format!("{area} sq m");
    }

    let formatted = format!("{:.2}", area.abs());
    let (integer, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if area < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction} sq m")
}
