//! # Templates
//!
//! A template is a fixed sequence of page composers. Assembly runs them in
//! order on one canvas, breaking the page between them, and checks that
//! each page finished above the bottom margin.

pub mod faction;
pub mod lazy_dm;

use log::debug;

use crate::canvas::{Canvas, Page};
use crate::error::FolioError;
use crate::layout::fill::check_floor;
use crate::layout::Painter;
use crate::style::Style;

/// Draws one full page and returns the final cursor position.
pub type Composer = fn(&mut Painter<'_>) -> Result<f64, FolioError>;

static FACTION_PAGES: [Composer; 2] = [faction::identity_page, faction::relations_page];

static LAZY_DM_PAGES: [Composer; 7] = [
    lazy_dm::overview_page,
    lazy_dm::scenes_page,
    lazy_dm::locations_page,
    lazy_dm::secrets_page,
    lazy_dm::npcs_page,
    lazy_dm::combat_page,
    lazy_dm::notes_page,
];

/// The printable documents this crate knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// One faction over two pages.
    Faction,
    /// Seven linked session-prep pages.
    LazyDm,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 2] = [TemplateKind::Faction, TemplateKind::LazyDm];

    pub fn title(&self) -> &'static str {
        match self {
            TemplateKind::Faction => "Faction Tracking Template",
            TemplateKind::LazyDm => "Lazy DM Session Prep Template",
        }
    }

    pub fn default_file_name(&self) -> &'static str {
        match self {
            TemplateKind::Faction => "faction_tracking_template.pdf",
            TemplateKind::LazyDm => "lazy_dm_session_template.pdf",
        }
    }

    /// Section header size the template was designed with.
    pub fn header_font_size(&self) -> f64 {
        match self {
            TemplateKind::Faction => 11.0,
            TemplateKind::LazyDm => 12.0,
        }
    }

    pub fn composers(&self) -> &'static [Composer] {
        match self {
            TemplateKind::Faction => &FACTION_PAGES,
            TemplateKind::LazyDm => &LAZY_DM_PAGES,
        }
    }

    pub fn page_count(&self) -> usize {
        self.composers().len()
    }
}

/// Lay out every page of `kind` with `style`.
pub fn compose(kind: TemplateKind, style: &Style) -> Result<Vec<Page>, FolioError> {
    style.validate()?;
    let geometry = style.geometry();
    let mut canvas = Canvas::new(geometry.width, geometry.height);

    for (index, composer) in kind.composers().iter().enumerate() {
        if index > 0 {
            canvas.show_page();
        }
        let page = canvas.page_number();
        let mut painter = Painter::new(&mut canvas, style).with_header_size(kind.header_font_size());
        let end = composer(&mut painter)?;
        check_floor(page, end, geometry.floor())?;
        debug!("{:?} page {}: cursor ended at {:.2}pt", kind, page, end);
    }

    Ok(canvas.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawOp;

    #[test]
    fn every_page_ends_above_the_bottom_margin() {
        let style = Style::default();
        for kind in TemplateKind::ALL {
            let pages = compose(kind, &style).unwrap();
            assert_eq!(pages.len(), kind.page_count());
        }
    }

    #[test]
    fn tall_margin_overflows() {
        let style = Style {
            margin: 60.0,
            ..Style::default()
        };
        let err = compose(TemplateKind::LazyDm, &style).unwrap_err();
        assert!(matches!(err, FolioError::Overflow { .. }), "{}", err);
    }

    /// Font size in effect when `title` is drawn.
    fn size_of(pages: &[Page], title: &str) -> Option<f64> {
        let mut size = None;
        for op in pages.iter().flat_map(|p| &p.ops) {
            match op {
                DrawOp::Font { size: s, .. } => size = Some(*s),
                DrawOp::Text { text, .. } if text == title => return size,
                _ => {}
            }
        }
        None
    }

    #[test]
    fn each_template_keeps_its_header_size() {
        let style = Style::default();
        let faction = compose(TemplateKind::Faction, &style).unwrap();
        let lazy = compose(TemplateKind::LazyDm, &style).unwrap();
        assert_eq!(size_of(&faction, "Core Identity"), Some(11.0));
        assert_eq!(size_of(&lazy, "Strong Start"), Some(12.0));
        assert_eq!(size_of(&lazy, "Potential Scenes"), Some(12.0));

        let style = Style {
            header_font_size: Some(13.0),
            ..Style::default()
        };
        let lazy = compose(TemplateKind::LazyDm, &style).unwrap();
        assert_eq!(size_of(&lazy, "Strong Start"), Some(13.0));
    }

    #[test]
    fn invalid_style_is_rejected_before_layout() {
        let style = Style {
            small_line_height: -12.0,
            ..Style::default()
        };
        let err = compose(TemplateKind::Faction, &style).unwrap_err();
        assert!(matches!(err, FolioError::InvalidStyle { field: "smallLineHeight", .. }));
    }

    #[test]
    fn lazy_dm_bookmarks_in_page_order() {
        let pages = compose(TemplateKind::LazyDm, &Style::default()).unwrap();
        let names: Vec<_> = pages.iter().map(|p| p.bookmark.clone().unwrap()).collect();
        let expected: Vec<_> = (1..=7).map(|i| format!("page{}", i)).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn faction_pages_have_no_navigation() {
        let pages = compose(TemplateKind::Faction, &Style::default()).unwrap();
        assert!(pages.iter().all(|p| p.links.is_empty() && p.bookmark.is_none()));
    }
}
