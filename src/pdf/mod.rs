//! # PDF Serializer
//!
//! Takes the recorded canvas pages and writes a valid PDF file.
//!
//! This is a from-scratch PDF 1.7 writer. The subset the templates need is
//! small: stroked paths, Helvetica text, named destinations and link
//! annotations, so we write the raw bytes ourselves.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- catalog (with /Dests for bookmarks)
//! 2 0 obj ... endobj  <- page tree
//! ...                 <- fonts, then per page: content, link annots, page
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```

use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::canvas::{DrawOp, Link, Page};
use crate::font::StandardFont;

/// Document information dictionary entries.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
}

pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
}

struct PdfObject {
    data: Vec<u8>,
}

impl PdfBuilder {
    /// Append an object and return its id.
    fn push(&mut self, data: Vec<u8>) -> usize {
        let id = self.objects.len();
        self.objects.push(PdfObject { data });
        id
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write recorded pages to a PDF byte vector.
    pub fn write(&self, pages: &[Page], metadata: &Metadata) -> Vec<u8> {
        let mut builder = PdfBuilder { objects: Vec::new() };

        // Reserve object IDs:
        // 0 = placeholder (PDF objects are 1-indexed)
        // 1 = Catalog
        // 2 = Pages (page tree root)
        // 3+ = fonts, then per page: content stream, link annotations, page
        builder.push(vec![]);
        builder.push(vec![]);
        builder.push(vec![]);

        let font_ids: Vec<usize> = StandardFont::ALL
            .iter()
            .map(|font| {
                builder.push(
                    format!(
                        "<< /Type /Font /Subtype /Type1 /BaseFont /{} \
                         /Encoding /WinAnsiEncoding >>",
                        font.pdf_name()
                    )
                    .into_bytes(),
                )
            })
            .collect();
        let font_resources = font_ids
            .iter()
            .enumerate()
            .map(|(i, id)| format!("/F{} {} 0 R", i, id))
            .collect::<Vec<_>>()
            .join(" ");

        let mut page_obj_ids: Vec<usize> = Vec::new();
        // (bookmark name, page object id, page height)
        let mut dests: Vec<(String, usize, f64)> = Vec::new();

        for page in pages {
            let content = self.build_content_stream(page);
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let mut content_data: Vec<u8> = Vec::new();
            let _ = write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            let content_obj_id = builder.push(content_data);

            let annot_ids: Vec<usize> = page
                .links
                .iter()
                .map(|link| builder.push(Self::link_annotation(link).into_bytes()))
                .collect();

            let mut page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << /Font << {} >> >>",
                page.width, page.height, content_obj_id, font_resources
            );
            if !annot_ids.is_empty() {
                let refs = annot_ids
                    .iter()
                    .map(|id| format!("{} 0 R", id))
                    .collect::<Vec<_>>()
                    .join(" ");
                let _ = write!(page_dict, " /Annots [{}]", refs);
            }
            page_dict.push_str(" >>");
            let page_obj_id = builder.push(page_dict.into_bytes());
            page_obj_ids.push(page_obj_id);

            if let Some(ref name) = page.bookmark {
                dests.push((name.clone(), page_obj_id, page.height));
            }
        }

        // Write Catalog (object 1)
        let mut catalog = String::from("<< /Type /Catalog /Pages 2 0 R");
        if !dests.is_empty() {
            catalog.push_str(" /Dests <<");
            for (name, page_id, height) in &dests {
                let _ = write!(
                    catalog,
                    " /{} [{} 0 R /XYZ 0 {:.2} 0]",
                    Self::pdf_name(name),
                    page_id,
                    height
                );
            }
            catalog.push_str(" >>");
        }
        catalog.push_str(" >>");
        builder.objects[1].data = catalog.into_bytes();

        // Write Pages tree (object 2)
        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        // Info dictionary (metadata)
        let mut info = String::from("<< ");
        if let Some(ref title) = metadata.title {
            let _ = write!(info, "/Title {} ", Self::text_string(title));
        }
        if let Some(ref author) = metadata.author {
            let _ = write!(info, "/Author {} ", Self::text_string(author));
        }
        if let Some(ref subject) = metadata.subject {
            let _ = write!(info, "/Subject {} ", Self::text_string(subject));
        }
        let _ = write!(
            info,
            "/Producer (folio {}) /Creator (folio) >>",
            env!("CARGO_PKG_VERSION")
        );
        let info_obj_id = builder.push(info.into_bytes());

        self.serialize(&builder, info_obj_id)
    }

    /// Build the PDF content stream for a single page.
    fn build_content_stream(&self, page: &Page) -> String {
        let mut stream = String::new();
        let mut font = (StandardFont::Helvetica, 12.0);

        for op in &page.ops {
            match op {
                DrawOp::StrokeColor(c) => {
                    let _ = writeln!(stream, "{:.3} {:.3} {:.3} RG", c.r, c.g, c.b);
                }
                DrawOp::FillColor(c) => {
                    let _ = writeln!(stream, "{:.3} {:.3} {:.3} rg", c.r, c.g, c.b);
                }
                DrawOp::LineWidth(w) => {
                    let _ = writeln!(stream, "{:.2} w", w);
                }
                DrawOp::Dash(pattern) => {
                    let dashes = pattern
                        .iter()
                        .map(|d| format!("{:.2}", d))
                        .collect::<Vec<_>>()
                        .join(" ");
                    let _ = writeln!(stream, "[{}] 0 d", dashes);
                }
                DrawOp::Font { font: f, size } => font = (*f, *size),
                DrawOp::Line { x1, y1, x2, y2 } => {
                    let _ = writeln!(stream, "{:.2} {:.2} m\n{:.2} {:.2} l\nS", x1, y1, x2, y2);
                }
                DrawOp::Rect {
                    x,
                    y,
                    width,
                    height,
                } => {
                    let _ = writeln!(stream, "{:.2} {:.2} {:.2} {:.2} re\nS", x, y, width, height);
                }
                DrawOp::Arc {
                    x1,
                    y1,
                    x2,
                    y2,
                    start,
                    extent,
                } => {
                    let curves = arc_curves(*x1, *y1, *x2, *y2, *start, *extent);
                    Self::write_curves(&mut stream, &curves);
                    stream.push_str("S\n");
                }
                DrawOp::Circle { cx, cy, radius } => {
                    let curves = arc_curves(cx - radius, cy - radius, cx + radius, cy + radius, 0.0, 360.0);
                    Self::write_curves(&mut stream, &curves);
                    stream.push_str("h\nS\n");
                }
                DrawOp::Text { x, y, text } => {
                    let _ = write!(
                        stream,
                        "BT\n/F{} {:.1} Tf\n{:.2} {:.2} Td\n({}) Tj\nET\n",
                        font.0.resource_index(),
                        font.1,
                        x,
                        y,
                        Self::winansi_string(text)
                    );
                }
            }
        }

        stream
    }

    /// Write a connected run of Bézier segments as one subpath.
    fn write_curves(stream: &mut String, curves: &[[(f64, f64); 4]]) {
        if let Some(first) = curves.first() {
            let _ = writeln!(stream, "{:.2} {:.2} m", first[0].0, first[0].1);
        }
        for [_, c1, c2, end] in curves {
            let _ = writeln!(
                stream,
                "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} c",
                c1.0, c1.1, c2.0, c2.1, end.0, end.1
            );
        }
    }

    fn link_annotation(link: &Link) -> String {
        format!(
            "<< /Type /Annot /Subtype /Link /Rect [{:.2} {:.2} {:.2} {:.2}] \
             /Border [0 0 0] /Dest /{} >>",
            link.x1,
            link.y1,
            link.x2,
            link.y2,
            Self::pdf_name(&link.destination)
        )
    }

    /// Escape special characters in a PDF string.
    fn escape_pdf_string(s: &str) -> String {
        s.replace('\\', "\\\\")
            .replace('(', "\\(")
            .replace(')', "\\)")
    }

    /// Body of a literal string shown with a WinAnsi-encoded standard font.
    /// Bytes outside printable ASCII are octal escapes; characters with no
    /// WinAnsi code become `?`.
    fn winansi_string(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for ch in s.chars() {
            match unicode_to_winansi(ch).unwrap_or(b'?') {
                b'\\' => out.push_str("\\\\"),
                b'(' => out.push_str("\\("),
                b')' => out.push_str("\\)"),
                b @ 0x20..=0x7E => out.push(b as char),
                b => {
                    let _ = write!(out, "\\{:03o}", b);
                }
            }
        }
        out
    }

    /// A complete text string token for the Info dictionary: a literal when
    /// the text is printable ASCII, otherwise UTF-16BE hex with a byte order mark.
    fn text_string(s: &str) -> String {
        if s.bytes().all(|b| (0x20..=0x7E).contains(&b)) {
            return format!("({})", Self::escape_pdf_string(s));
        }
        let mut hex = String::from("<FEFF");
        for unit in s.encode_utf16() {
            let _ = write!(hex, "{:04X}", unit);
        }
        hex.push('>');
        hex
    }

    /// Encode a name object body: delimiters and non-regular bytes become #xx.
    fn pdf_name(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for b in s.bytes() {
            let regular = b.is_ascii_graphic()
                && !matches!(b, b'#' | b'/' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'%');
            if regular {
                out.push(b as char);
            } else {
                let _ = write!(out, "#{:02X}", b);
            }
        }
        out
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        // Header
        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let header = format!("{} 0 obj\n", i);
            output.extend_from_slice(header.as_bytes());
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{:010} 00000 n \n", offset);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            info_obj_id,
            xref_offset
        );

        output
    }
}

/// Windows-1252 codes in 0x80..=0x9F that differ from Latin-1.
const WINANSI_HIGH: [(char, u8); 27] = [
    ('\u{20AC}', 0x80),
    ('\u{201A}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201E}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017E}', 0x9E),
    ('\u{0178}', 0x9F),
];

/// Map a character to its WinAnsiEncoding byte, if it has one.
pub fn unicode_to_winansi(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    WINANSI_HIGH
        .iter()
        .find(|(c, _)| *c == ch)
        .map(|(_, b)| *b)
}

/// Approximate an elliptical arc with cubic Bézier segments of at most 90°.
///
/// The ellipse is inscribed in the box (x1, y1)-(x2, y2). Angles are in
/// degrees, counter-clockwise from the positive x axis. Each segment is
/// `[start, control1, control2, end]`.
pub fn arc_curves(x1: f64, y1: f64, x2: f64, y2: f64, start: f64, extent: f64) -> Vec<[(f64, f64); 4]> {
    let (cx, cy) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
    let (rx, ry) = ((x2 - x1).abs() / 2.0, (y2 - y1).abs() / 2.0);

    let pieces = (extent.abs() / 90.0).ceil().max(1.0) as usize;
    let step = extent / pieces as f64;
    let point = |deg: f64| {
        let a = deg.to_radians();
        (cx + rx * a.cos(), cy + ry * a.sin())
    };
    // Tangent scaled by the control-point distance for this sweep.
    let k = 4.0 / 3.0 * (step.to_radians() / 4.0).tan();
    let tangent = |deg: f64| {
        let a = deg.to_radians();
        (-rx * a.sin() * k, ry * a.cos() * k)
    };

    (0..pieces)
        .map(|i| {
            let a0 = start + i as f64 * step;
            let a1 = a0 + step;
            let p0 = point(a0);
            let p3 = point(a1);
            let t0 = tangent(a0);
            let t1 = tangent(a1);
            [p0, (p0.0 + t0.0, p0.1 + t0.1), (p3.0 - t1.0, p3.1 - t1.1), p3]
        })
        .collect()
}
