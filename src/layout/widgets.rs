//! Reusable decorative widgets.
//!
//! Each widget draws at an explicit origin. Widgets that occupy vertical
//! space return the cursor position just past what they drew; callers use
//! that value instead of computing their own.

use super::Painter;
use crate::error::FolioError;
use crate::font::StandardFont;

/// Length of each arm of a corner flourish.
pub const FLOURISH_SIZE: f64 = 8.0;

/// Fixed distance `section_header` moves the cursor.
pub const HEADER_ADVANCE: f64 = 15.0;

/// Unlabeled ticks between two labeled ticks on a scale.
pub const MINOR_TICKS: usize = 3;

pub const PROGRESS_LABELS: [&str; 5] = ["Nascent", "Emerging", "Advancing", "Imminent", "Complete"];
pub const DISPOSITION_LABELS: [&str; 5] = ["Hostile", "Wary", "Neutral", "Friendly", "Allied"];

/// Which corner of a box a flourish decorates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Horizontal and vertical direction the arms extend from the corner.
    fn arms(self) -> (f64, f64) {
        match self {
            Corner::TopLeft => (1.0, -1.0),
            Corner::TopRight => (-1.0, -1.0),
            Corner::BottomLeft => (1.0, 1.0),
            Corner::BottomRight => (-1.0, 1.0),
        }
    }

    /// Start angle of the quarter arc, in degrees.
    fn arc_start(self) -> f64 {
        match self {
            Corner::TopRight => 0.0,
            Corner::TopLeft => 90.0,
            Corner::BottomLeft => 180.0,
            Corner::BottomRight => 270.0,
        }
    }
}

/// Positions of the ticks on a scale axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleTicks {
    pub major: Vec<f64>,
    pub minor: Vec<f64>,
}

/// Compute tick positions for an axis starting at `start` of `length`
/// points with `labels` labeled ticks and `minor` ticks per segment.
pub fn scale_ticks(start: f64, length: f64, labels: usize, minor: usize) -> Result<ScaleTicks, FolioError> {
    if labels < 2 {
        return Err(FolioError::DegenerateScale { labels });
    }
    let segment = length / (labels - 1) as f64;
    let major = (0..labels).map(|i| start + i as f64 * segment).collect();
    let step = segment / (minor + 1) as f64;
    let minor = (0..labels - 1)
        .flat_map(|i| (1..=minor).map(move |j| start + i as f64 * segment + j as f64 * step))
        .collect();
    Ok(ScaleTicks { major, minor })
}

impl Painter<'_> {
    /// An L-shaped pair of arms with a quarter arc tucked into the corner.
    pub fn corner_flourish(&mut self, x: f64, y: f64, corner: Corner) {
        let medium = self.style().medium;
        self.stroke(medium, 0.75);

        let (dx, dy) = corner.arms();
        let size = FLOURISH_SIZE;
        let canvas = self.canvas();
        canvas.line(x, y, x + dx * size, y);
        canvas.line(x, y, x, y + dy * size);

        let (x1, x2) = if dx > 0.0 { (x, x + size) } else { (x - size, x) };
        let (y1, y2) = if dy > 0.0 { (y, y + size) } else { (y - size, y) };
        canvas.arc(x1, y1, x2, y2, corner.arc_start(), 90.0);
    }

    /// A rectangle hanging down from `y`, with a flourish on each corner.
    pub fn decorative_frame(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let medium = self.style().medium;
        self.stroke(medium, 1.0);
        self.canvas().rect(x, y - height, width, height);

        self.corner_flourish(x, y, Corner::TopLeft);
        self.corner_flourish(x + width, y, Corner::TopRight);
        self.corner_flourish(x, y - height, Corner::BottomLeft);
        self.corner_flourish(x + width, y - height, Corner::BottomRight);
    }

    /// Bold title, a rule beneath it, and flourishes above both ends.
    /// Always returns `y - 15`.
    pub fn section_header(&mut self, x: f64, y: f64, width: f64, title: &str) -> f64 {
        let (dark, medium) = (self.style().dark, self.style().medium);
        let size = self.header_size();
        // Indented to clear the flourish.
        self.label(x + 12.0, y, title, StandardFont::HelveticaBold, size, dark);

        self.stroke(medium, 1.5);
        self.canvas().line(x, y - 5.0, x + width, y - 5.0);

        self.corner_flourish(x, y + 5.0, Corner::TopLeft);
        self.corner_flourish(x + width, y + 5.0, Corner::TopRight);

        y - HEADER_ADVANCE
    }

    /// `count` dashed writing lines, the first at `y`. Returns
    /// `y - count * line_height`.
    pub fn ruled_lines(&mut self, x: f64, y: f64, width: f64, count: usize, line_height: f64) -> f64 {
        if count == 0 {
            return y;
        }
        let light = self.style().light;
        self.stroke(light, 0.5);
        let canvas = self.canvas();
        canvas.set_dash(&[2.0, 2.0]);
        for i in 0..count {
            let line_y = y - i as f64 * line_height;
            canvas.line(x, line_y, x + width, line_y);
        }
        canvas.set_dash(&[]);
        y - count as f64 * line_height
    }

    /// A small label with a dashed underline from `line_start` to `line_end`.
    pub fn labeled_field(&mut self, x: f64, y: f64, label: &str, line_start: f64, line_end: f64) {
        let medium = self.style().medium;
        self.label(x, y, label, StandardFont::Helvetica, 9.0, medium);
        self.dashed_line(line_start, line_end, y - 3.0);
    }

    pub fn checkbox(&mut self, x: f64, y: f64, size: f64) {
        let medium = self.style().medium;
        self.stroke(medium, 0.75);
        self.canvas().rect(x, y - size + 2.0, size, size);
    }

    /// A row of `count` tracker boxes, sitting 2pt below the baseline `y`.
    pub fn box_row(&mut self, x: f64, y: f64, count: usize, size: f64, spacing: f64) {
        let medium = self.style().medium;
        self.stroke(medium, 0.75);
        for j in 0..count {
            self.canvas()
                .rect(x + j as f64 * (size + spacing), y - 2.0, size, size);
        }
    }

    /// A horizontal rule broken in the middle by a small sword.
    pub fn sword_divider(&mut self, x: f64, y: f64, width: f64) {
        let medium = self.style().medium;
        self.stroke(medium, 0.75);

        let mid = x + width / 2.0;
        let canvas = self.canvas();
        canvas.line(x + 20.0, y, mid - 15.0, y);
        canvas.line(mid + 15.0, y, x + width - 20.0, y);

        // blade, guard, pommel
        canvas.line(mid - 12.0, y, mid + 12.0, y);
        canvas.line(mid - 3.0, y - 3.0, mid - 3.0, y + 3.0);
        canvas.line(mid + 3.0, y - 3.0, mid + 3.0, y + 3.0);
        canvas.circle(mid, y, 2.0);
    }

    /// A horizontal axis with a labeled tick per entry in `labels` and
    /// [`MINOR_TICKS`] unlabeled ticks inside each segment.
    pub fn scale(&mut self, x: f64, y: f64, width: f64, labels: &[&str]) -> Result<(), FolioError> {
        let start = x + 10.0;
        let length = width - 20.0;
        let ticks = scale_ticks(start, length, labels.len(), MINOR_TICKS)?;

        let (medium, light) = (self.style().medium, self.style().light);
        self.stroke(medium, 1.0);
        self.canvas().line(start, y, start + length, y);

        self.canvas().set_font(StandardFont::Helvetica, 8.0);
        self.canvas().set_fill_color(medium);
        for (tick_x, label) in ticks.major.iter().zip(labels) {
            let canvas = self.canvas();
            canvas.line(*tick_x, y - 5.0, *tick_x, y + 5.0);
            canvas.text_centred(*tick_x, y - 16.0, label);
        }

        self.stroke(light, 0.5);
        for tick_x in &ticks.minor {
            self.canvas().line(*tick_x, y - 3.0, *tick_x, y + 3.0);
        }
        Ok(())
    }

    /// Progress toward a faction's goal, Nascent through Complete.
    pub fn progress_scale(&mut self, x: f64, y: f64, width: f64) -> Result<(), FolioError> {
        self.scale(x, y, width, &PROGRESS_LABELS)
    }

    /// Attitude toward the party, Hostile through Allied.
    pub fn disposition_scale(&mut self, x: f64, y: f64, width: f64) -> Result<(), FolioError> {
        self.scale(x, y, width, &DISPOSITION_LABELS)
    }
}
