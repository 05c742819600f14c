//! # Folio
//!
//! Printable session-prep templates for tabletop games, laid out for the
//! reMarkable 2 page.
//!
//! Every template is a fixed script of drawing calls: decorative frames,
//! section headers, labeled fields, ruled writing lines and small tracking
//! grids. Page composers thread a vertical cursor down each page, and the
//! recorded drawing is serialized into a PDF whose pages match the tablet's
//! physical display size, so nothing is scaled when it is opened there.
//!
//! ## Architecture
//!
//! ```text
//!   [style]      Page geometry from the device, spacing, colors
//!       ↓
//!   [templates]  Page composers for each document
//!       ↓
//!   [layout]     Cursor, widgets, columns, space allocation
//!       ↓
//!   [canvas]     Recorded drawing primitives, bookmarks, links
//!       ↓
//!   [pdf]        Serialize to PDF bytes
//! ```

pub mod canvas;
pub mod error;
pub mod font;
pub mod layout;
pub mod pdf;
pub mod style;
pub mod templates;

use std::fmt;
use std::path::{Path, PathBuf};

use log::info;

pub use error::FolioError;
pub use style::Style;
pub use templates::TemplateKind;

use pdf::{Metadata, PdfWriter};

/// A rendered template, ready to be written out.
#[derive(Debug, Clone)]
pub struct RenderedTemplate {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub width: f64,
    pub height: f64,
}

/// Render a template to PDF bytes.
///
/// This is the primary entry point. Fails if the style produces a page that
/// runs below its bottom margin.
pub fn render(kind: TemplateKind, style: &Style) -> Result<RenderedTemplate, FolioError> {
    let pages = templates::compose(kind, style)?;
    let metadata = Metadata {
        title: Some(kind.title().to_string()),
        subject: Some(format!("Optimized for {}", style.device.name)),
        ..Metadata::default()
    };
    let bytes = PdfWriter::new().write(&pages, &metadata);
    let geometry = style.geometry();
    Ok(RenderedTemplate {
        bytes,
        page_count: pages.len(),
        width: geometry.width,
        height: geometry.height,
    })
}

/// What was written, for the console report.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub path: PathBuf,
    pub width: f64,
    pub height: f64,
    pub page_count: usize,
    pub device: style::Device,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created: {}", self.path.display())?;
        writeln!(f, "Page size: {:.1} x {:.1} points", self.width, self.height)?;
        writeln!(f, "Pages: {}", self.page_count)?;
        write!(
            f,
            "Optimized for {} ({} x {} pixels)",
            self.device.name, self.device.width_px, self.device.height_px
        )
    }
}

/// Render a template and write it to `path`.
///
/// The document is fully serialized before the file is touched, so a failed
/// render never leaves a partial file behind.
pub fn write_template(kind: TemplateKind, path: &Path, style: &Style) -> Result<Summary, FolioError> {
    let rendered = render(kind, style)?;
    std::fs::write(path, &rendered.bytes).map_err(|source| FolioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "wrote {} bytes ({} pages) to {}",
        rendered.bytes.len(),
        rendered.page_count,
        path.display()
    );
    Ok(Summary {
        path: path.to_path_buf(),
        width: rendered.width,
        height: rendered.height,
        page_count: rendered.page_count,
        device: style.device.clone(),
    })
}
