//! # Layout Engine
//!
//! Page composers are straight-line scripts: draw a section, move the
//! cursor past it, draw the next. This module holds the two pieces every
//! composer threads through those scripts:
//!
//! - [`Cursor`]: the running vertical position on the current page. It only
//!   moves down unless explicitly reset, and debug builds assert that.
//! - [`Painter`]: a borrow of the canvas plus the active [`Style`], with the
//!   reusable widgets (frames, headers, ruled lines, scales) as methods.
//!
//! Coordinates are PDF points with y growing upward, so "advancing" the
//! cursor means decreasing y.

pub mod columns;
pub mod fill;
pub mod widgets;

use crate::canvas::Canvas;
use crate::font::StandardFont;
use crate::style::{Color, PageGeometry, Style};

/// Tolerance for floating-point comparisons of layout positions.
pub const EPSILON: f64 = 1e-6;

/// Section header size when neither the style nor the template sets one.
pub const DEFAULT_HEADER_SIZE: f64 = 11.0;

/// The writable vertical position on the current page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    y: f64,
}

impl Cursor {
    pub fn new(y: f64) -> Self {
        Self { y }
    }

    pub fn current(&self) -> f64 {
        self.y
    }

    /// Move down by `amount` points and return the new position.
    pub fn advance(&mut self, amount: f64) -> f64 {
        debug_assert!(amount >= 0.0, "cursor advanced upward by {}", -amount);
        self.y -= amount;
        self.y
    }

    /// Move to a position a widget returned. It must not be above the
    /// current one; use [`Cursor::reset`] to jump back up.
    pub fn seek(&mut self, y: f64) -> f64 {
        debug_assert!(
            y <= self.y + EPSILON,
            "cursor moved upward from {} to {}",
            self.y,
            y
        );
        self.y = y;
        self.y
    }

    /// Jump to an arbitrary position, e.g. back to the top of a column row.
    pub fn reset(&mut self, y: f64) {
        self.y = y;
    }
}

/// Draws widgets onto a canvas with a given style.
pub struct Painter<'a> {
    canvas: &'a mut Canvas,
    style: &'a Style,
    geometry: PageGeometry,
    header_size: f64,
}

impl<'a> Painter<'a> {
    pub fn new(canvas: &'a mut Canvas, style: &'a Style) -> Self {
        let geometry = PageGeometry {
            width: canvas.width(),
            height: canvas.height(),
            margin: style.margin,
        };
        Self {
            canvas,
            style,
            geometry,
            header_size: style.header_font_size.unwrap_or(DEFAULT_HEADER_SIZE),
        }
    }

    /// Use `size` for section headers unless the style overrides it.
    pub fn with_header_size(mut self, size: f64) -> Self {
        if self.style.header_font_size.is_none() {
            self.header_size = size;
        }
        self
    }

    pub fn header_size(&self) -> f64 {
        self.header_size
    }

    pub fn canvas(&mut self) -> &mut Canvas {
        self.canvas
    }

    pub fn style(&self) -> &Style {
        self.style
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Set stroke color and width together, the way every widget starts.
    pub fn stroke(&mut self, color: Color, width: f64) {
        self.canvas.set_stroke_color(color);
        self.canvas.set_line_width(width);
    }

    /// Draw a text run in the given font, size and fill color.
    pub fn label(&mut self, x: f64, y: f64, text: &str, font: StandardFont, size: f64, color: Color) {
        self.canvas.set_font(font, size);
        self.canvas.set_fill_color(color);
        self.canvas.text(x, y, text);
    }

    /// A light dashed writing line from `x1` to `x2` at `y`.
    pub fn dashed_line(&mut self, x1: f64, x2: f64, y: f64) {
        self.stroke(self.style.light, 0.5);
        self.canvas.set_dash(&[2.0, 2.0]);
        self.canvas.line(x1, y, x2, y);
        self.canvas.set_dash(&[]);
    }

    /// A light solid underline from `x1` to `x2` at `y`.
    pub fn underline(&mut self, x1: f64, x2: f64, y: f64) {
        self.stroke(self.style.light, 0.5);
        self.canvas.line(x1, y, x2, y);
    }
}
