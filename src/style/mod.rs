//! # Style
//!
//! Every tunable layout constant lives here: page geometry derived from the
//! target device, spacing, and the three grays the templates are drawn in.
//! A `Style` is passed into the layout engine explicitly, and can be
//! overridden field by field from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FolioError;

/// Points per inch in PDF user space.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Largest page side a PDF viewer has to accept (200 inches).
pub const MAX_PAGE_POINTS: f64 = 14_400.0;

/// An RGB color with components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub const fn gray(level: f64) -> Self {
        Self {
            r: level,
            g: level,
            b: level,
        }
    }
}

/// The display the templates are sized for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Device {
    pub name: String,
    pub width_px: u32,
    pub height_px: u32,
    pub dpi: u32,
}

impl Default for Device {
    fn default() -> Self {
        Self::remarkable2()
    }
}

impl Device {
    /// reMarkable 2: 1404 x 1872 pixels at 226 DPI.
    pub fn remarkable2() -> Self {
        Self {
            name: "reMarkable 2".to_string(),
            width_px: 1404,
            height_px: 1872,
            dpi: 226,
        }
    }

    /// Physical page size in points: pixels / DPI * 72.
    pub fn page_size(&self) -> (f64, f64) {
        let to_points = |px: u32| px as f64 * POINTS_PER_INCH / self.dpi as f64;
        (to_points(self.width_px), to_points(self.height_px))
    }
}

/// Page dimensions with the margin box applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl PageGeometry {
    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    /// The y coordinate of the top margin edge.
    pub fn top(&self) -> f64 {
        self.height - self.margin
    }

    /// The lowest y coordinate content may reach.
    pub fn floor(&self) -> f64 {
        self.margin
    }
}

/// Layout configuration for the whole engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Style {
    pub device: Device,
    pub margin: f64,
    /// Spacing of full-size writing lines.
    pub line_height: f64,
    /// Spacing of the dotted ruled lines most sections use.
    pub small_line_height: f64,
    /// Space between side-by-side columns.
    pub gutter: f64,
    /// Section header size for every template. Unset, each template uses
    /// its own.
    pub header_font_size: Option<f64>,
    /// Writing lines and column captions.
    pub light: Color,
    /// Ornaments, frames and field labels.
    pub medium: Color,
    /// Headers and the current navigation entry.
    pub dark: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            device: Device::default(),
            margin: 20.0,
            line_height: 14.0,
            small_line_height: 12.0,
            gutter: 10.0,
            header_font_size: None,
            light: Color::gray(0.8),
            medium: Color::gray(0.6),
            dark: Color::gray(0.3),
        }
    }
}

impl Style {
    /// Load a style from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, FolioError> {
        let text = std::fs::read_to_string(path).map_err(|source| FolioError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let style: Style = serde_json::from_str(&text).map_err(|e| FolioError::config(path, e))?;
        style.validate()?;
        Ok(style)
    }

    /// Reject values that leave no drawable page: zero or huge page sizes,
    /// non-positive spacing, margins that swallow the page.
    pub fn validate(&self) -> Result<(), FolioError> {
        let device = &self.device;
        positive("device.dpi", device.dpi as f64)?;
        positive("device.widthPx", device.width_px as f64)?;
        positive("device.heightPx", device.height_px as f64)?;

        let (width, height) = device.page_size();
        for (field, side) in [("device.widthPx", width), ("device.heightPx", height)] {
            if side > MAX_PAGE_POINTS {
                return Err(FolioError::InvalidStyle {
                    field,
                    value: side,
                    reason: "page side exceeds 14400pt",
                });
            }
        }

        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(FolioError::InvalidStyle {
                field: "margin",
                value: self.margin,
                reason: "must be zero or positive",
            });
        }
        if 2.0 * self.margin >= width.min(height) {
            return Err(FolioError::InvalidStyle {
                field: "margin",
                value: self.margin,
                reason: "leaves no room for content",
            });
        }
        if !self.gutter.is_finite() || self.gutter < 0.0 {
            return Err(FolioError::InvalidStyle {
                field: "gutter",
                value: self.gutter,
                reason: "must be zero or positive",
            });
        }

        positive("lineHeight", self.line_height)?;
        positive("smallLineHeight", self.small_line_height)?;
        if let Some(size) = self.header_font_size {
            positive("headerFontSize", size)?;
        }

        for (field, color) in [("light", self.light), ("medium", self.medium), ("dark", self.dark)] {
            for value in [color.r, color.g, color.b] {
                if !(0.0..=1.0).contains(&value) {
                    return Err(FolioError::InvalidStyle {
                        field,
                        value,
                        reason: "color components must be within 0 and 1",
                    });
                }
            }
        }
        Ok(())
    }

    pub fn geometry(&self) -> PageGeometry {
        let (width, height) = self.device.page_size();
        PageGeometry {
            width,
            height,
            margin: self.margin,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), FolioError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FolioError::InvalidStyle {
            field,
            value,
            reason: "must be positive",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remarkable2_page_size_in_points() {
        let (w, h) = Device::remarkable2().page_size();
        assert!((w - 1404.0 * 72.0 / 226.0).abs() < 1e-9);
        assert!((h - 1872.0 * 72.0 / 226.0).abs() < 1e-9);
        assert!((w - 447.29).abs() < 0.01);
        assert!((h - 596.39).abs() < 0.01);
    }

    #[test]
    fn content_width_subtracts_both_margins() {
        let geometry = Style::default().geometry();
        assert!((geometry.content_width() - (geometry.width - 40.0)).abs() < 1e-9);
        assert!((geometry.top() - (geometry.height - 20.0)).abs() < 1e-9);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let style: Style = serde_json::from_str(r#"{ "margin": 24, "dark": { "r": 0, "g": 0, "b": 0 } }"#)
            .unwrap();
        assert_eq!(style.margin, 24.0);
        assert_eq!(style.dark, Color::BLACK);
        assert_eq!(style.small_line_height, 12.0);
        assert_eq!(style.device, Device::remarkable2());
    }

    #[test]
    fn default_style_is_valid() {
        assert!(Style::default().validate().is_ok());
    }

    fn invalid_field(style: Style) -> &'static str {
        match style.validate() {
            Err(FolioError::InvalidStyle { field, .. }) => field,
            other => panic!("expected an invalid style, got {:?}", other),
        }
    }

    #[test]
    fn zero_dpi_is_rejected() {
        let mut style = Style::default();
        style.device.dpi = 0;
        assert_eq!(invalid_field(style), "device.dpi");
    }

    #[test]
    fn oversized_page_is_rejected() {
        let mut style = Style::default();
        style.device.height_px = 1_000_000;
        assert_eq!(invalid_field(style), "device.heightPx");
    }

    #[test]
    fn spacing_must_be_positive() {
        let style = Style {
            small_line_height: -12.0,
            ..Style::default()
        };
        assert_eq!(invalid_field(style), "smallLineHeight");

        let style = Style {
            line_height: f64::NAN,
            ..Style::default()
        };
        assert_eq!(invalid_field(style), "lineHeight");

        let style = Style {
            header_font_size: Some(0.0),
            ..Style::default()
        };
        assert_eq!(invalid_field(style), "headerFontSize");
    }

    #[test]
    fn margin_must_leave_content_room() {
        let style = Style {
            margin: -1.0,
            ..Style::default()
        };
        assert_eq!(invalid_field(style), "margin");

        let style = Style {
            margin: 230.0,
            ..Style::default()
        };
        assert_eq!(invalid_field(style), "margin");
    }

    #[test]
    fn color_components_stay_in_range() {
        let style = Style {
            dark: Color::gray(1.5),
            ..Style::default()
        };
        assert_eq!(invalid_field(style), "dark");
    }

    #[test]
    fn partial_device_keeps_remaining_fields() {
        let style: Style = serde_json::from_str(r#"{ "device": { "dpi": 300 } }"#).unwrap();
        assert_eq!(style.device.dpi, 300);
        assert_eq!(style.device.width_px, 1404);
    }
}
