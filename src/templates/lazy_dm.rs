//! Seven-page session prep sheet following the "lazy dungeon master"
//! checklist. Every page opens with a navigation bar linking to the others.

use log::debug;

use crate::error::FolioError;
use crate::font::StandardFont;
use crate::layout::columns::{self, Columns};
use crate::layout::fill::rows_that_fit;
use crate::layout::{Cursor, Painter};

/// Navigation labels, one per page, in page order.
pub const PAGES: [&str; 7] = ["Overview", "Scenes", "Locations", "Secrets", "NPCs", "Combat", "Notes"];

/// Bookmark name of the page at `index` (0-based): `page1`, `page2`, ...
pub fn bookmark_name(index: usize) -> String {
    format!("page{}", index + 1)
}

/// Draw the navigation bar for page `current` and return the cursor below it.
pub fn nav_bar(p: &mut Painter<'_>, current: usize) -> f64 {
    let g = p.geometry();
    let (medium, dark) = (p.style().medium, p.style().dark);
    let y = g.top() - 15.0;

    p.stroke(medium, 1.0);
    p.canvas().line(g.margin, y - 8.0, g.width - g.margin, y - 8.0);
    p.canvas().line(g.margin, y + 12.0, g.width - g.margin, y + 12.0);

    let link_width = g.content_width() / PAGES.len() as f64;
    for (i, name) in PAGES.iter().enumerate() {
        let x = g.margin + i as f64 * link_width + link_width / 2.0;
        let canvas = p.canvas();
        if i == current {
            canvas.set_fill_color(dark);
            canvas.set_font(StandardFont::HelveticaBold, 10.0);
        } else {
            canvas.set_fill_color(medium);
            canvas.set_font(StandardFont::Helvetica, 10.0);
        }
        canvas.text_centred(x, y, name);

        let rect = (x - link_width / 2.0 + 5.0, y - 5.0, x + link_width / 2.0 - 5.0, y + 12.0);
        canvas.link(rect, &bookmark_name(i));
    }
    debug!("page {}: {} navigation links", current + 1, PAGES.len());

    y - 20.0
}

/// Anchor the page, draw its navigation bar, and leave the cursor where
/// page content starts.
fn page_start(p: &mut Painter<'_>, index: usize) -> Cursor {
    p.canvas().bookmark(&bookmark_name(index));
    let mut cursor = Cursor::new(nav_bar(p, index));
    cursor.advance(10.0);
    cursor
}

/// Page 1: campaign banner, characters and recap, strong start, story beats.
pub fn overview_page(p: &mut Painter<'_>) -> Result<f64, FolioError> {
    let g = p.geometry();
    let style = p.style();
    let (dark, small, gutter) = (style.dark, style.small_line_height, style.gutter);
    let medium = style.medium;
    let (m, cw) = (g.margin, g.content_width());
    let right = m + cw;
    let mut cursor = page_start(p, 0);

    // Banner
    let y = cursor.current();
    p.decorative_frame(m, y, cw, 45.0);
    p.label(m + 10.0, y - 12.0, "Campaign:", StandardFont::HelveticaBold, 11.0, dark);
    p.underline(m + 70.0, right - 10.0, y - 16.0);
    p.label(m + 10.0, y - 35.0, "Session #", StandardFont::HelveticaBold, 10.0, dark);
    p.label(m + 150.0, y - 35.0, "Date:", StandardFont::HelveticaBold, 10.0, dark);
    p.underline(m + 65.0, m + 130.0, y - 39.0);
    p.underline(m + 180.0, m + 280.0, y - 39.0);
    cursor.advance(60.0);

    // Characters beside the recap
    let cols = Columns::split(m, cw, 2, gutter)?;
    let top = cursor.current();

    let mut left = Cursor::new(top);
    left.seek(p.section_header(cols.x(0), top, cols.width(), "Review the Characters"));
    left.advance(5.0);
    for i in 0..4 {
        if i > 0 {
            left.advance(5.0);
        }
        let y = left.current();
        p.label(m + 5.0, y, &format!("PC {}:", i + 1), StandardFont::Helvetica, 9.0, medium);
        left.seek(p.ruled_lines(m + 35.0, y, cols.width() - 35.0, 2, small));
    }

    let mut recap = Cursor::new(top);
    recap.seek(p.section_header(cols.x(1), top, cols.width(), "Session Recap"));
    let y = recap.advance(5.0);
    recap.seek(p.ruled_lines(cols.x(1) + 5.0, y, cols.width() - 10.0, 9, small));

    cursor.seek(columns::merge(&[left.current(), recap.current()]));
    cursor.advance(10.0);

    // Strong start
    cursor.seek(p.section_header(m, cursor.current(), cw, "Strong Start"));
    let y = cursor.advance(5.0);
    let frame_height = 140.0;
    p.decorative_frame(m, y, cw, frame_height);
    p.ruled_lines(m + 10.0, y - 15.0, cw - 20.0, 10, small);
    cursor.advance(frame_height + 15.0);

    // Story beats fill the rest in three columns.
    cursor.seek(p.section_header(m, cursor.current(), cw, "Story Beats"));
    let y = cursor.advance(5.0);
    let rows = rows_that_fit(y, g.floor(), small);
    let beats = Columns::split(m, cw, 3, gutter)?;
    let ends: Vec<f64> = (0..beats.count())
        .map(|i| p.ruled_lines(beats.x(i) + 5.0, y, beats.width() - 10.0, rows, small))
        .collect();
    cursor.seek(columns::merge(&ends));

    Ok(cursor.current())
}

/// Page 2: seven scene prompts.
pub fn scenes_page(p: &mut Painter<'_>) -> Result<f64, FolioError> {
    let g = p.geometry();
    let (medium, small) = (p.style().medium, p.style().small_line_height);
    let (m, cw) = (g.margin, g.content_width());
    let mut cursor = page_start(p, 1);

    cursor.seek(p.section_header(m, cursor.current(), cw, "Potential Scenes"));
    cursor.advance(5.0);
    for i in 0..7 {
        if i > 0 {
            cursor.advance(8.0);
        }
        let y = cursor.current();
        p.label(m + 5.0, y, &format!("Scene {}:", i + 1), StandardFont::HelveticaBold, 9.0, medium);
        p.underline(m + 50.0, m + cw, y - 3.0);
        let y = cursor.advance(15.0);
        cursor.seek(p.ruled_lines(m + 10.0, y, cw - 10.0, 4, small));
    }

    Ok(cursor.current())
}

/// Page 3: eight locations with their notable features.
pub fn locations_page(p: &mut Painter<'_>) -> Result<f64, FolioError> {
    let g = p.geometry();
    let (light, medium, small) = (p.style().light, p.style().medium, p.style().small_line_height);
    let (m, cw) = (g.margin, g.content_width());
    let mut cursor = page_start(p, 2);

    cursor.seek(p.section_header(m, cursor.current(), cw, "Fantastic Locations"));
    cursor.advance(5.0);
    for i in 0..8 {
        if i > 0 {
            cursor.advance(8.0);
        }
        let y = cursor.current();
        p.label(m + 5.0, y, &format!("Location {}:", i + 1), StandardFont::HelveticaBold, 9.0, medium);
        p.underline(m + 65.0, m + cw, y - 3.0);
        let y = cursor.advance(15.0);
        p.label(m + 10.0, y, "Features:", StandardFont::Helvetica, 8.0, light);
        cursor.seek(p.ruled_lines(m + 55.0, y, cw - 55.0, 3, small));
    }

    Ok(cursor.current())
}

/// Page 4: ten secrets to tick off, then loot in two columns.
pub fn secrets_page(p: &mut Painter<'_>) -> Result<f64, FolioError> {
    let g = p.geometry();
    let (medium, small, gutter) = (p.style().medium, p.style().small_line_height, p.style().gutter);
    let (m, cw) = (g.margin, g.content_width());
    let mut cursor = page_start(p, 3);

    cursor.seek(p.section_header(m, cursor.current(), cw, "Secrets and Clues"));
    cursor.advance(5.0);
    for i in 0..10 {
        if i > 0 {
            cursor.advance(5.0);
        }
        let y = cursor.current();
        p.checkbox(m + 5.0, y, 8.0);
        p.label(m + 18.0, y - 6.0, &format!("{}.", i + 1), StandardFont::Helvetica, 9.0, medium);
        cursor.seek(p.ruled_lines(m + 30.0, y - 6.0, cw - 30.0, 2, small));
    }
    cursor.advance(10.0);

    cursor.seek(p.section_header(m, cursor.current(), cw, "Loot & Rewards"));
    let y = cursor.advance(5.0);
    let cols = Columns::split(m, cw, 2, gutter)?;
    let rows = rows_that_fit(y, g.floor(), small);
    let ends: Vec<f64> = (0..cols.count())
        .map(|i| p.ruled_lines(cols.x(i) + 5.0, y, cols.width() - 10.0, rows, small))
        .collect();
    cursor.seek(columns::merge(&ends));

    Ok(cursor.current())
}

const NPC_CARD_HEIGHT: f64 = 105.0;

/// Fields below the name row of an NPC card, with where each underline starts.
const NPC_FIELDS: [(&str, f64); 4] = [
    ("Appearance:", 60.0),
    ("Motivation:", 55.0),
    ("Voice/Quirk:", 58.0),
    ("Notes:", 40.0),
];

fn npc_card(p: &mut Painter<'_>, y: f64) {
    let g = p.geometry();
    let medium = p.style().medium;
    let (m, cw) = (g.margin, g.content_width());
    let right = m + cw;

    p.decorative_frame(m, y, cw, NPC_CARD_HEIGHT);

    let mut inner = y - 14.0;
    p.label(m + 8.0, inner, "Name:", StandardFont::HelveticaBold, 9.0, medium);
    p.dashed_line(m + 40.0, m + 200.0, inner - 3.0);
    p.label(m + 210.0, inner, "Faction:", StandardFont::Helvetica, 8.0, medium);
    p.dashed_line(m + 250.0, right - 10.0, inner - 3.0);

    for (field, line_start) in NPC_FIELDS {
        inner -= 16.0;
        p.label(m + 8.0, inner, field, StandardFont::Helvetica, 8.0, medium);
        p.dashed_line(m + line_start, right - 10.0, inner - 3.0);
    }
    // second notes line
    inner -= 12.0;
    p.dashed_line(m + 10.0, right - 10.0, inner - 3.0);
}

/// Page 5: four NPC cards.
pub fn npcs_page(p: &mut Painter<'_>) -> Result<f64, FolioError> {
    let g = p.geometry();
    let (m, cw) = (g.margin, g.content_width());
    let mut cursor = page_start(p, 4);

    cursor.seek(p.section_header(m, cursor.current(), cw, "Important NPCs"));
    cursor.advance(5.0);
    for i in 0..4 {
        if i > 0 {
            cursor.advance(12.0);
        }
        npc_card(p, cursor.current());
        cursor.advance(NPC_CARD_HEIGHT);
    }

    Ok(cursor.current())
}

const TRACKER_HEIGHT: f64 = 195.0;
const TRACKER_ROWS: usize = 12;
const HP_BOXES: usize = 5;

/// One initiative tracker box: encounter name, column captions, and a row
/// per combatant with an initiative box, name line, HP boxes and notes.
pub fn initiative_tracker(p: &mut Painter<'_>, x: f64, y: f64, width: f64, height: f64, number: usize) {
    let (light, medium) = (p.style().light, p.style().medium);
    p.decorative_frame(x, y, width, height);

    let mut inner = y - 12.0;
    p.label(x + 5.0, inner, &format!("Encounter {}:", number), StandardFont::HelveticaBold, 9.0, medium);
    p.underline(x + 70.0, x + width - 10.0, inner - 3.0);
    inner -= 18.0;

    for (caption, offset) in [("Init", 5.0), ("Name", 30.0)] {
        p.label(x + offset, inner, caption, StandardFont::Helvetica, 7.0, light);
    }
    for (caption, inset) in [("HP", 70.0), ("Notes", 30.0)] {
        p.label(x + width - inset, inner, caption, StandardFont::Helvetica, 7.0, light);
    }
    inner -= 10.0;

    p.stroke(light, 0.5);
    let canvas = p.canvas();
    canvas.set_dash(&[1.0, 2.0]);
    for _ in 0..TRACKER_ROWS {
        canvas.rect(x + 5.0, inner - 10.0, 18.0, 12.0);
        canvas.line(x + 28.0, inner - 8.0, x + width - 75.0, inner - 8.0);
        for j in 0..HP_BOXES {
            canvas.rect(x + width - 70.0 + j as f64 * 10.0, inner - 10.0, 8.0, 10.0);
        }
        canvas.line(x + width - 18.0, inner - 8.0, x + width - 5.0, inner - 8.0);
        inner -= 12.0;
    }
    canvas.set_dash(&[]);
}

/// Page 6: four initiative trackers in a 2x2 grid and a monster index.
pub fn combat_page(p: &mut Painter<'_>) -> Result<f64, FolioError> {
    let g = p.geometry();
    let (light, small, gutter) = (p.style().light, p.style().small_line_height, p.style().gutter);
    let (m, cw) = (g.margin, g.content_width());
    let right = m + cw;
    let mut cursor = page_start(p, 5);

    cursor.seek(p.section_header(m, cursor.current(), cw, "Initiative Trackers"));
    cursor.advance(5.0);
    let cols = Columns::split(m, cw, 2, gutter)?;
    for row in 0..2 {
        let y = cursor.current();
        for col in 0..2 {
            let number = row * 2 + col + 1;
            initiative_tracker(p, cols.x(col), y, cols.width(), TRACKER_HEIGHT, number);
        }
        cursor.advance(TRACKER_HEIGHT + 10.0);
    }

    cursor.seek(p.section_header(m, cursor.current(), cw, "Monsters Reference"));
    let y = cursor.advance(5.0);
    let split = cols.right(0);
    for (caption, x) in [
        ("Monster", m + 5.0),
        ("Page", split - 40.0),
        ("Monster", cols.x(1) + 5.0),
        ("Page", right - 35.0),
    ] {
        p.label(x, y, caption, StandardFont::Helvetica, 8.0, light);
    }
    cursor.advance(12.0);

    for _ in 0..4 {
        let y = cursor.current();
        p.dashed_line(m + 5.0, split - 50.0, y);
        p.dashed_line(split - 45.0, split - 5.0, y);
        p.dashed_line(cols.x(1) + 5.0, right - 45.0, y);
        p.dashed_line(right - 40.0, right - 5.0, y);
        cursor.advance(small);
    }

    Ok(cursor.current())
}

/// Page 7: ruled lines to the bottom of the page.
pub fn notes_page(p: &mut Painter<'_>) -> Result<f64, FolioError> {
    let g = p.geometry();
    let small = p.style().small_line_height;
    let (m, cw) = (g.margin, g.content_width());
    let mut cursor = page_start(p, 6);

    cursor.seek(p.section_header(m, cursor.current(), cw, "Session Notes"));
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
    fn bookmark_names_are_one_based() {
        assert_eq!(bookmark_name(0), "page1");
        assert_eq!(bookmark_name(6), "page7");
    }

    #[test]
    fn nav_bar_highlights_current_page() {
        let (_, page) = compose(secrets_page);
        let nav: Vec<_> = page.texts().into_iter().take(PAGES.len()).collect();
        for (i, (font, color, text)) in nav.iter().enumerate() {
            assert_eq!(*text, PAGES[i]);
            if i == 3 {
                assert_eq!(*font, StandardFont::HelveticaBold);
                assert_eq!(*color, Style::default().dark);
            } else {
                assert_eq!(*font, StandardFont::Helvetica);
                assert_eq!(*color, Style::default().medium);
            }
        }
    }

    #[test]
    fn nav_bar_links_every_page() {
        let (_, page) = compose(scenes_page);
        let targets: Vec<&str> = page.links.iter().map(|l| l.destination.as_str()).collect();
        assert_eq!(
            targets,
            vec!["page1", "page2", "page3", "page4", "page5", "page6", "page7"]
        );
        assert_eq!(page.bookmark.as_deref(), Some("page2"));
        for link in &page.links {
            assert!(link.x1 < link.x2 && link.y1 < link.y2);
        }
    }

    #[test]
    fn overview_columns_do_not_overlap_strong_start() {
        let (end, page) = compose(overview_page);
        assert!(end >= 20.0);
        let strong_start_y = page
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, y, .. } if text == "Strong Start" => Some(*y),
                _ => None,
            })
            .next()
            .unwrap();
        let lowest_pc_line = page
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line { x1, y1, .. } if (*x1 - 55.0).abs() < 1e-9 => Some(*y1),
                _ => None,
            })
            .fold(f64::INFINITY, f64::min);
        assert!(strong_start_y < lowest_pc_line);
    }

    #[test]
    fn scenes_and_locations_fit_their_blocks() {
        let (scenes_end, scenes) = compose(scenes_page);
        let (locations_end, locations) = compose(locations_page);
        assert!(scenes_end >= 20.0, "scenes ended at {}", scenes_end);
        assert!(locations_end >= 20.0, "locations ended at {}", locations_end);
        let count = |page: &Page, prefix: &str| page.texts().iter().filter(|t| t.2.starts_with(prefix)).count();
        assert_eq!(count(&scenes, "Scene "), 7);
        assert_eq!(count(&locations, "Location "), 8);
    }

    #[test]
    fn secrets_have_ten_checkboxes() {
        let (_, page) = compose(secrets_page);
        let boxes = page
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { width, height, .. } if *width == 8.0 && *height == 8.0))
            .count();
        assert_eq!(boxes, 10);
    }

    #[test]
    fn npc_page_has_four_cards() {
        let (end, page) = compose(npcs_page);
        assert!(end >= 20.0);
        let frames = page
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { height, .. } if *height == NPC_CARD_HEIGHT))
            .count();
        assert_eq!(frames, 4);
    }

    #[test]
    fn combat_page_has_four_trackers_with_twelve_rows() {
        let (end, page) = compose(combat_page);
        assert!(end >= 20.0, "combat ended at {}", end);
        let encounters = page.texts().iter().filter(|t| t.2.starts_with("Encounter")).count();
        assert_eq!(encounters, 4);
        let init_boxes = page
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { width, .. } if *width == 18.0))
            .count();
        assert_eq!(init_boxes, 4 * TRACKER_ROWS);
        let hp_boxes = page
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { width, .. } if *width == 8.0))
            .count();
        assert_eq!(hp_boxes, 4 * TRACKER_ROWS * HP_BOXES);
    }

    #[test]
    fn notes_page_fills_to_the_margin() {
        let (end, _) = compose(notes_page);
        assert!(end >= 20.0);
        assert!(end < 20.0 + 10.0 + 12.0);
    }
}
