//! Two-page faction tracker: identity and resources on the first page,
//! relationships and intelligence on the second.

use crate::error::FolioError;
use crate::font::StandardFont;
use crate::layout::columns::{self, Columns};
use crate::layout::fill::rows_that_fit;
use crate::layout::{Cursor, Painter};

const BOX_SIZE: f64 = 10.0;
const BOX_SPACING: f64 = 3.0;
const BOXES_PER_RESOURCE: usize = 5;

/// Resource trackers, laid out two per row.
const RESOURCES: [(&str, &str); 2] = [("Troops:", "Magic:"), ("Money:", "Influence:")];

/// Page 1: faction name, core identity, current activity, progress clock.
pub fn identity_page(p: &mut Painter<'_>) -> Result<f64, FolioError> {
    let g = p.geometry();
    let (light, medium, dark) = (p.style().light, p.style().medium, p.style().dark);
    let small = p.style().small_line_height;
    let (m, cw) = (g.margin, g.content_width());
    let right = m + cw;
    let mut cursor = Cursor::new(g.top());

    // Name banner
    let y = cursor.current();
    let banner_height = 35.0;
    p.decorative_frame(m, y, cw, banner_height);
    p.label(m + 10.0, y - 15.0, "FACTION:", StandardFont::HelveticaBold, 14.0, dark);
    p.dashed_line(m + 75.0, right - 120.0, y - 19.0);
    p.label(right - 105.0, y - 15.0, "Alignment:", StandardFont::Helvetica, 9.0, medium);
    p.dashed_line(right - 50.0, right - 10.0, y - 19.0);
    cursor.advance(banner_height + 15.0);

    // Core identity
    cursor.seek(p.section_header(m, cursor.current(), cw, "Core Identity"));
    let y = cursor.advance(5.0);
    p.labeled_field(m + 5.0, y, "Leader/Key Figure:", m + 100.0, right - 5.0);
    let y = cursor.advance(18.0);
    p.labeled_field(m + 5.0, y, "Primary Location:", m + 95.0, right - 5.0);
    let y = cursor.advance(18.0);

    p.label(m + 5.0, y, "Goal (What They Want):", StandardFont::Helvetica, 9.0, medium);
    let y = cursor.advance(12.0);
    cursor.seek(p.ruled_lines(m + 10.0, y, cw - 15.0, 4, small));

    let y = cursor.advance(8.0);
    p.label(m + 5.0, y, "Resources:", StandardFont::Helvetica, 9.0, medium);
    cursor.advance(15.0);

    let cols = Columns::split(m, cw, 2, p.style().gutter)?;
    for (left, right_label) in RESOURCES {
        let y = cursor.current();
        p.label(m + 10.0, y, left, StandardFont::Helvetica, 8.0, medium);
        p.box_row(m + 55.0, y, BOXES_PER_RESOURCE, BOX_SIZE, BOX_SPACING);
        p.label(cols.x(1), y, right_label, StandardFont::Helvetica, 8.0, medium);
        p.box_row(cols.x(1) + 40.0, y, BOXES_PER_RESOURCE, BOX_SIZE, BOX_SPACING);
        cursor.advance(16.0);
    }

    let y = cursor.advance(5.0);
    p.label(m + 10.0, y, "Notes:", StandardFont::Helvetica, 8.0, light);
    let y = cursor.advance(10.0);
    cursor.seek(p.ruled_lines(m + 10.0, y, cw - 15.0, 3, small));
    cursor.advance(10.0);

    // Current activity
    cursor.seek(p.section_header(m, cursor.current(), cw, "Current Activity"));
    let y = cursor.advance(5.0);
    let frame_height = 65.0;
    p.decorative_frame(m, y, cw, frame_height);
    p.label(m + 8.0, y - 12.0, "Current Plan/Front:", StandardFont::Helvetica, 9.0, medium);
    p.ruled_lines(m + 10.0, y - 22.0, cw - 20.0, 3, small);
    let y = cursor.advance(frame_height + 12.0);

    p.label(m + 5.0, y, "Progress Clock:", StandardFont::Helvetica, 9.0, medium);
    let y = cursor.advance(22.0);
    p.progress_scale(m, y, cw)?;
    cursor.advance(38.0);

    cursor.seek(p.section_header(m, cursor.current(), cw, "Notes"));
    let y = cursor.advance(5.0);
    cursor.seek(p.ruled_lines(m + 5.0, y, cw - 10.0, 5, small));

    Ok(cursor.current())
}

/// Page 2: disposition, faction ties, agents, strengths and weaknesses.
pub fn relations_page(p: &mut Painter<'_>) -> Result<f64, FolioError> {
    let g = p.geometry();
    let (light, medium) = (p.style().light, p.style().medium);
    let (line_height, small) = (p.style().line_height, p.style().small_line_height);
    let (m, cw) = (g.margin, g.content_width());
    let right = m + cw;
    let cols = Columns::split(m, cw, 2, p.style().gutter)?;
    let mut cursor = Cursor::new(g.top());

    // Relationships
    cursor.seek(p.section_header(m, cursor.current(), cw, "Relationships"));
    let y = cursor.advance(5.0);
    p.label(m + 5.0, y, "Disposition Toward PCs:", StandardFont::Helvetica, 9.0, medium);
    let y = cursor.advance(25.0);
    p.disposition_scale(m, y, cw)?;
    let y = cursor.advance(35.0);

    p.label(m + 5.0, y, "Connections to Other Factions:", StandardFont::Helvetica, 9.0, medium);
    cursor.advance(15.0);
    for _ in 0..4 {
        let y = cursor.current();
        p.label(m + 10.0, y, "Faction:", StandardFont::Helvetica, 8.0, light);
        p.label(cols.x(1), y, "Relationship:", StandardFont::Helvetica, 8.0, light);
        p.dashed_line(m + 50.0, cols.right(0), y - 3.0);
        p.dashed_line(cols.x(1) + 60.0, right - 5.0, y - 3.0);
        cursor.advance(line_height);
    }
    let y = cursor.advance(6.0);
    p.sword_divider(m, y, cw);
    cursor.advance(12.0);

    // Intelligence
    cursor.seek(p.section_header(m, cursor.current(), cw, "Intelligence"));
    let y = cursor.advance(5.0);
    p.label(m + 5.0, y, "Known Agents/NPCs:", StandardFont::Helvetica, 9.0, medium);
    cursor.advance(15.0);
    let split = cols.right(0);
    for _ in 0..5 {
        let y = cursor.current();
        p.label(m + 10.0, y, "Name:", StandardFont::Helvetica, 8.0, light);
        p.label(split - 20.0, y, "Role:", StandardFont::Helvetica, 8.0, light);
        p.dashed_line(m + 45.0, split - 30.0, y - 3.0);
        p.dashed_line(split + 5.0, right - 5.0, y - 3.0);
        cursor.advance(line_height);
    }
    let y = cursor.advance(10.0);

    p.label(m + 5.0, y, "Strengths:", StandardFont::Helvetica, 9.0, medium);
    p.label(cols.x(1) + 5.0, y, "Weaknesses:", StandardFont::Helvetica, 9.0, medium);
    let y = cursor.advance(12.0);
    let strengths = p.ruled_lines(m + 10.0, y, cols.width() - 10.0, 5, small);
    let weaknesses = p.ruled_lines(cols.x(1) + 5.0, y, cols.width() - 10.0, 5, small);
    cursor.seek(columns::merge(&[strengths, weaknesses]));
    cursor.advance(10.0);

    // Notes take whatever is left.
    cursor.seek(p.section_header(m, cursor.current(), cw, "Notes"));
    let y = cursor.advance(5.0);
    let rows = rows_that_fit(y, g.floor(), small);
    cursor.seek(p.ruled_lines(m + 5.0, y, cw - 10.0, rows, small));

    Ok(cursor.current())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, DrawOp, Page};
    use crate::style::Style;

    fn compose(page: fn(&mut Painter<'_>) -> Result<f64, FolioError>) -> (f64, Page) {
        let style = Style::default();
        let g = style.geometry();
        let mut canvas = Canvas::new(g.width, g.height);
        let end = {
            let mut painter = Painter::new(&mut canvas, &style);
            page(&mut painter).unwrap()
        };
        (end, canvas.finish().remove(0))
    }

    #[test]
    fn identity_page_ends_above_margin() {
        let (end, _) = compose(identity_page);
        // 576.39 top, 519pt of content
        assert!((end - 57.39).abs() < 0.01, "ended at {}", end);
    }

    #[test]
    fn identity_page_has_four_resource_trackers() {
        let (_, page) = compose(identity_page);
        let boxes = page
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { width, .. } if *width == BOX_SIZE))
            .count();
        assert_eq!(boxes, 4 * BOXES_PER_RESOURCE);
        let labels: Vec<&str> = page.texts().iter().map(|t| t.2).collect();
        for name in ["Troops:", "Magic:", "Money:", "Influence:"] {
            assert!(labels.contains(&name), "missing {}", name);
        }
    }

    #[test]
    fn identity_page_has_progress_clock() {
        let (_, page) = compose(identity_page);
        let labels: Vec<&str> = page.texts().iter().map(|t| t.2).collect();
        assert!(labels.contains(&"Nascent"));
        assert!(labels.contains(&"Complete"));
    }

    #[test]
    fn relations_page_fills_to_bottom() {
        let style = Style::default();
        let (end, _) = compose(relations_page);
        assert!(end >= style.margin);
        // Less than one more row would have fit.
        assert!(end - style.small_line_height < style.margin + 10.0);
    }

    #[test]
    fn relations_page_has_disposition_scale() {
        let (_, page) = compose(relations_page);
        let labels: Vec<&str> = page.texts().iter().map(|t| t.2).collect();
        assert!(labels.contains(&"Hostile"));
        assert!(labels.contains(&"Allied"));
        assert_eq!(labels.iter().filter(|l| **l == "Faction:").count(), 4);
        assert_eq!(labels.iter().filter(|l| **l == "Name:").count(), 5);
    }

    #[test]
    fn relations_sections_are_divided_by_a_sword() {
        let (_, page) = compose(relations_page);
        let pommels: Vec<f64> = page
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Circle { cy, .. } => Some(*cy),
                _ => None,
            })
            .collect();
        assert_eq!(pommels.len(), 1);

        let heading = |title: &str| {
            page.ops.iter().find_map(|op| match op {
                DrawOp::Text { y, text, .. } if text == title => Some(*y),
                _ => None,
            })
        };
        let (above, below) = (heading("Relationships").unwrap(), heading("Intelligence").unwrap());
        assert!(pommels[0] < above && pommels[0] > below);
    }
}
