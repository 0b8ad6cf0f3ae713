/*!
 * Minimal PDF 1.4 writer for validation reports.
 *
 * Uses the built-in Helvetica fonts with WinAnsi encoding and uncompressed
 * content streams. Characters the encoding cannot represent become `?`.
 */

use std::io::Write;

use crate::errors::RenderError;
use crate::validation::sections::SectionedReport;

use super::NO_FINDINGS;

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 50.0;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 11.0;

// Wrap widths in characters for Helvetica at the sizes above
const TITLE_WRAP: usize = 50;
const BODY_WRAP: usize = 85;

const BULLET_INDENT: f32 = 10.0;
const CONTINUATION_INDENT: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(&self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }
}

/// One positioned line of text before pagination
#[derive(Debug, Clone)]
struct Line {
    font: Font,
    size: f32,
    indent: f32,
    /// Extra space above the line, in points
    space_before: f32,
    text: String,
}

impl Line {
    fn height(&self) -> f32 {
        self.space_before + self.size * 1.4
    }
}

/// Render the report as PDF bytes
pub fn render(title: &str, report: &SectionedReport) -> Result<Vec<u8>, RenderError> {
    let lines = layout(title, report);
    let pages = paginate(&lines);
    write_document(&pages).map_err(|e| RenderError::Pdf(e.to_string()))
}

fn layout(title: &str, report: &SectionedReport) -> Vec<Line> {
    let mut lines = Vec::new();

    for text in wrap(title, TITLE_WRAP) {
        lines.push(Line { font: Font::Bold, size: TITLE_SIZE, indent: 0.0, space_before: 0.0, text });
    }

    for (category, findings) in report.iter() {
        lines.push(Line {
            font: Font::Bold,
            size: HEADING_SIZE,
            indent: 0.0,
            space_before: 10.0,
            text: category.title().to_string(),
        });

        if findings.is_empty() {
            lines.push(Line {
                font: Font::Regular,
                size: BODY_SIZE,
                indent: BULLET_INDENT,
                space_before: 0.0,
                text: NO_FINDINGS.to_string(),
            });
            continue;
        }

        for finding in findings {
            for (i, text) in wrap(finding, BODY_WRAP).into_iter().enumerate() {
                let (indent, text) = if i == 0 {
                    (BULLET_INDENT, format!("• {}", text))
                } else {
                    (CONTINUATION_INDENT, text)
                };
                lines.push(Line { font: Font::Regular, size: BODY_SIZE, indent, space_before: 0.0, text });
            }
        }
    }

    lines
}

/// Greedy word wrap by character count; over-long words are hard-split
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let split = word.char_indices().nth(width).map(|(i, _)| i).unwrap_or(word.len());
            lines.push(word[..split].to_string());
            word = &word[split..];
        }

        let word_len = word.chars().count();
        if word_len == 0 {
            continue;
        }
        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Build one content stream per page
fn paginate(lines: &[Line]) -> Vec<Vec<u8>> {
    let mut pages = Vec::new();
    let mut content = Vec::new();
    let mut y = PAGE_HEIGHT - MARGIN;

    for line in lines {
        let height = line.height();
        if y - height < MARGIN && !content.is_empty() {
            pages.push(std::mem::take(&mut content));
            y = PAGE_HEIGHT - MARGIN;
        }
        y -= height;

        content.extend_from_slice(
            format!(
                "BT /{} {} Tf {:.1} {:.1} Td ",
                line.font.resource(),
                line.size,
                MARGIN + line.indent,
                y
            )
            .as_bytes(),
        );
        content.extend(encode_string(&line.text));
        content.extend_from_slice(b" Tj ET\n");
    }

    if !content.is_empty() || pages.is_empty() {
        pages.push(content);
    }
    pages
}

/// PDF literal string in WinAnsi encoding, parentheses included
fn encode_string(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() + 2);
    out.push(b'(');
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            // emoji presentation selector has no glyph
            '\u{FE0F}' => {}
            _ => out.push(win_ansi_byte(c)),
        }
    }
    out.push(b')');
    out
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\t' => b' ',
        '€' => 0x80,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        _ => b'?',
    }
}

/// Serializes numbered objects and the cross-reference table
struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self { buf, offsets: Vec::new() }
    }

    fn object(&mut self, body: &[u8]) -> std::io::Result<()> {
        self.offsets.push(self.buf.len());
        write!(self.buf, "{} 0 obj\n", self.offsets.len())?;
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
        Ok(())
    }

    fn stream(&mut self, data: &[u8]) -> std::io::Result<()> {
        let mut body = Vec::with_capacity(data.len() + 64);
        write!(body, "<< /Length {} >>\nstream\n", data.len())?;
        body.extend_from_slice(data);
        body.extend_from_slice(b"\nendstream");
        self.object(&body)
    }

    fn finish(mut self) -> std::io::Result<Vec<u8>> {
        let xref_offset = self.buf.len();
        let count = self.offsets.len() + 1;
        write!(self.buf, "xref\n0 {}\n0000000000 65535 f \n", count)?;
        for offset in &self.offsets {
            write!(self.buf, "{:010} 00000 n \n", offset)?;
        }
        write!(
            self.buf,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            count, xref_offset
        )?;
        Ok(self.buf)
    }
}

fn write_document(pages: &[Vec<u8>]) -> std::io::Result<Vec<u8>> {
    // 1 catalog, 2 page tree, 3-4 fonts, then a (page, content) pair per page
    const FIRST_PAGE_OBJECT: usize = 5;
    let page_ids: Vec<usize> = (0..pages.len()).map(|i| FIRST_PAGE_OBJECT + 2 * i).collect();

    let mut writer = PdfWriter::new();
    writer.object(b"<< /Type /Catalog /Pages 2 0 R >>")?;

    let kids = page_ids.iter().map(|id| format!("{} 0 R", id)).collect::<Vec<_>>().join(" ");
    writer.object(format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, pages.len()).as_bytes())?;

    writer.object(b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>")?;
    writer.object(b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>")?;

    for (content, page_id) in pages.iter().zip(&page_ids) {
        writer.object(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                PAGE_WIDTH, PAGE_HEIGHT, page_id + 1
            )
            .as_bytes(),
        )?;
        writer.stream(content)?;
    }

    writer.finish()
}
