//! # Canvas
//!
//! The drawing surface the layout engine paints on. A `Canvas` records
//! primitive drawing operations into pages, the same graphics-state model
//! PDF content streams use: colors, line width, dash and font are state
//! changes that apply to every following shape until changed again.
//!
//! Coordinates are PDF user space: points, origin at the bottom-left of the
//! page, y growing upward. Recorded pages are handed to [`crate::pdf`] for
//! serialization, and are plain data so tests can inspect what was drawn.

use crate::font::StandardFont;
use crate::style::Color;

/// A single recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    StrokeColor(Color),
    FillColor(Color),
    LineWidth(f64),
    /// Dash pattern in points. Empty means solid.
    Dash(Vec<f64>),
    Font {
        font: StandardFont,
        size: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    /// Stroked rectangle outline with its bottom-left corner at (x, y).
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Elliptical arc inscribed in the box (x1, y1)-(x2, y2), starting at
    /// `start` degrees (counter-clockwise from 3 o'clock) and sweeping `extent`.
    Arc {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        start: f64,
        extent: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
    },
    /// Text with its baseline starting at (x, y), in the current font and fill.
    Text {
        x: f64,
        y: f64,
        text: String,
    },
}

/// A clickable rectangle that jumps to a named bookmark.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub destination: String,
}

/// One finished page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
    /// Named anchor for this page, if any.
    pub bookmark: Option<String>,
    pub links: Vec<Link>,
}

impl Page {
    fn blank(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            bookmark: None,
            links: Vec::new(),
        }
    }

    fn is_blank(&self) -> bool {
        self.ops.is_empty() && self.bookmark.is_none() && self.links.is_empty()
    }

    /// All text runs on the page, in drawing order, with the font each was set in.
    pub fn texts(&self) -> Vec<(StandardFont, Color, &str)> {
        let mut font = StandardFont::Helvetica;
        let mut fill = Color::BLACK;
        let mut out = Vec::new();
        for op in &self.ops {
            match op {
                DrawOp::Font { font: f, .. } => font = *f,
                DrawOp::FillColor(c) => fill = *c,
                DrawOp::Text { text, .. } => out.push((font, fill, text.as_str())),
                _ => {}
            }
        }
        out
    }
}

/// Records drawing operations page by page.
pub struct Canvas {
    width: f64,
    height: f64,
    pages: Vec<Page>,
    current: Page,
    font: StandardFont,
    font_size: f64,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pages: Vec::new(),
            current: Page::blank(width, height),
            font: StandardFont::Helvetica,
            font_size: 12.0,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Number of pages started so far, including the one being drawn.
    pub fn page_number(&self) -> usize {
        self.pages.len() + 1
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.current.ops.push(DrawOp::StrokeColor(color));
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.current.ops.push(DrawOp::FillColor(color));
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.current.ops.push(DrawOp::LineWidth(width));
    }

    pub fn set_dash(&mut self, pattern: &[f64]) {
        self.current.ops.push(DrawOp::Dash(pattern.to_vec()));
    }

    pub fn set_font(&mut self, font: StandardFont, size: f64) {
        self.font = font;
        self.font_size = size;
        self.current.ops.push(DrawOp::Font { font, size });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.current.ops.push(DrawOp::Line { x1, y1, x2, y2 });
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.current.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
        });
    }

    pub fn arc(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, start: f64, extent: f64) {
        self.current.ops.push(DrawOp::Arc {
            x1,
            y1,
            x2,
            y2,
            start,
            extent,
        });
    }

    pub fn circle(&mut self, cx: f64, cy: f64, radius: f64) {
        self.current.ops.push(DrawOp::Circle { cx, cy, radius });
    }

    pub fn text(&mut self, x: f64, y: f64, text: &str) {
        self.current.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
        });
    }

    /// Draw text horizontally centred on `x`, measured in the current font.
    pub fn text_centred(&mut self, x: f64, y: f64, text: &str) {
        let width = self.string_width(text);
        self.text(x - width / 2.0, y, text);
    }

    /// Width of `text` in the current font and size.
    pub fn string_width(&self, text: &str) -> f64 {
        self.font.string_width(text, self.font_size)
    }

    /// Name the current page so links can target it.
    pub fn bookmark(&mut self, name: &str) {
        self.current.bookmark = Some(name.to_string());
    }

    pub fn link(&mut self, rect: (f64, f64, f64, f64), destination: &str) {
        let (x1, y1, x2, y2) = rect;
        self.current.links.push(Link {
            x1,
            y1,
            x2,
            y2,
            destination: destination.to_string(),
        });
    }

    /// Close the current page and start a new one. Graphics state resets.
    pub fn show_page(&mut self) {
        let page = std::mem::replace(&mut self.current, Page::blank(self.width, self.height));
        self.pages.push(page);
        self.font = StandardFont::Helvetica;
        self.font_size = 12.0;
    }

    /// Finish the document. A trailing blank page is dropped unless it
    /// would be the only page.
    pub fn finish(mut self) -> Vec<Page> {
        if !self.current.is_blank() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_page_starts_a_new_page() {
        let mut canvas = Canvas::new(100.0, 200.0);
        canvas.line(0.0, 0.0, 10.0, 10.0);
        canvas.show_page();
        assert_eq!(canvas.page_number(), 2);
        canvas.rect(1.0, 1.0, 5.0, 5.0);
        let pages = canvas.finish();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].ops.len(), 1);
        assert!(matches!(pages[1].ops[0], DrawOp::Rect { .. }));
        assert_eq!(pages[1].width, 100.0);
        assert_eq!(pages[1].height, 200.0);
    }

    #[test]
    fn trailing_blank_page_is_dropped() {
        let mut canvas = Canvas::new(100.0, 200.0);
        canvas.line(0.0, 0.0, 10.0, 10.0);
        canvas.show_page();
        assert_eq!(canvas.finish().len(), 1);
    }

    #[test]
    fn empty_canvas_still_has_one_page() {
        assert_eq!(Canvas::new(100.0, 200.0).finish().len(), 1);
    }

    #[test]
    fn centred_text_uses_current_font() {
        let mut canvas = Canvas::new(100.0, 200.0);
        canvas.set_font(StandardFont::Helvetica, 10.0);
        canvas.text_centred(50.0, 10.0, "Wary");
        let expected = StandardFont::Helvetica.string_width("Wary", 10.0);
        let pages = canvas.finish();
        match &pages[0].ops[1] {
            DrawOp::Text { x, .. } => assert!((x - (50.0 - expected / 2.0)).abs() < 1e-9),
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn texts_track_font_and_fill() {
        let mut canvas = Canvas::new(100.0, 200.0);
        canvas.set_font(StandardFont::HelveticaBold, 10.0);
        canvas.set_fill_color(Color::gray(0.3));
        canvas.text(0.0, 0.0, "Bold");
        canvas.set_font(StandardFont::Helvetica, 10.0);
        canvas.text(0.0, 0.0, "Plain");
        let pages = canvas.finish();
        let texts = pages[0].texts();
        assert_eq!(texts[0], (StandardFont::HelveticaBold, Color::gray(0.3), "Bold"));
        assert_eq!(texts[1].0, StandardFont::Helvetica);
    }
}
