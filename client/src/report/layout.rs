//! Paginated report layout with manual height accounting.
//!
//! All coordinates are millimetres measured from the top-left corner of an A4
//! page. Text width is estimated from an average Helvetica glyph width, and the
//! same estimate drives both measuring and placing a section, so a section that
//! was measured to fit always fits.

use chrono::NaiveDate;
use market_lens_core::AnalysisSection;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 20.0;
pub const FOOTER_RESERVE_MM: f32 = 20.0;
pub const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

const PT_TO_MM: f32 = 0.3528;
const AVG_GLYPH_WIDTH: f32 = 0.5;
const LINE_SPACING: f32 = 1.4;

const HEADER_SIZE: f32 = 18.0;
const SUBHEADER_SIZE: f32 = 10.0;
const TITLE_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 11.0;
const FOOTER_SIZE: f32 = 8.0;

const HEADER_GAP_MM: f32 = 8.0;
const SECTION_GAP_MM: f32 = 6.0;

pub const FIELD_LABELS: [&str; 4] = ["Target Users", "Market Size", "Entry Barriers", "Key Features"];

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub size_pt: f32,
    pub bold: bool,
    pub x_mm: f32,
    /// Baseline, from the top edge.
    pub y_mm: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub body: Vec<TextLine>,
    pub footer: Vec<TextLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub pages: Vec<Page>,
}

impl ReportLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every placed line, page by page, joined with single spaces.
    pub fn text_content(&self) -> String {
        self.pages
            .iter()
            .flat_map(|p| p.body.iter().chain(p.footer.iter()))
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn line_height_mm(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * LINE_SPACING
}

/// Characters that fit across the content width at `size_pt`.
pub fn chars_per_line(size_pt: f32) -> usize {
    ((CONTENT_WIDTH_MM / (size_pt * PT_TO_MM * AVG_GLYPH_WIDTH)).floor() as usize).max(1)
}

/// Greedy word wrap on single spaces. Words longer than a line are split.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    let mut started = false;

    for word in text.split(' ') {
        let word_len = word.chars().count();
        if started && current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
            continue;
        }
        if started {
            lines.push(std::mem::take(&mut current));
        }

        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > max_chars {
            lines.push(chars.drain(..max_chars).collect());
        }
        current = chars.into_iter().collect();
        current_len = current.chars().count();
        started = true;
    }

    if started {
        lines.push(current);
    }
    lines
}

/// A section's lines before placement.
struct Block {
    rows: Vec<(String, f32, bool)>,
}

impl Block {
    fn for_section(section: &AnalysisSection) -> Self {
        let mut rows = Vec::new();
        push_wrapped(&mut rows, &section.title, TITLE_SIZE, true);
        if !section.description.trim().is_empty() {
            push_wrapped(&mut rows, &section.description, BODY_SIZE, false);
        }
        for (label, value) in FIELD_LABELS.iter().zip(field_values(section)) {
            push_wrapped(&mut rows, &format!("{label}: {value}"), BODY_SIZE, false);
        }
        Self { rows }
    }

    fn height(&self) -> f32 {
        self.rows
            .iter()
            .map(|(_, size, _)| line_height_mm(*size))
            .sum::<f32>()
            + SECTION_GAP_MM
    }
}

fn push_wrapped(rows: &mut Vec<(String, f32, bool)>, text: &str, size: f32, bold: bool) {
    let flat = text.replace(['\r', '\n'], " ");
    for line in wrap(&flat, chars_per_line(size)) {
        rows.push((line, size, bold));
    }
}

/// Field values in label order, sequences joined with ", ".
pub fn field_values(section: &AnalysisSection) -> [String; 4] {
    let data = &section.market_data;
    [
        data.target_users.join(", "),
        data.market_size.clone(),
        data.entry_barriers.join(", "),
        data.key_features.join(", "),
    ]
}

struct Cursor {
    pages: Vec<Page>,
    y: f32,
    sections_on_page: usize,
}

impl Cursor {
    fn current(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = MARGIN_MM;
        self.sections_on_page = 0;
    }

    fn place(&mut self, text: String, size_pt: f32, bold: bool) {
        self.y += line_height_mm(size_pt);
        let y_mm = self.y;
        self.current().body.push(TextLine {
            text,
            size_pt,
            bold,
            x_mm: MARGIN_MM,
            y_mm,
        });
    }
}

/// Lay out the header, every section in order, then stamp footers.
pub fn layout_report(
    company_name: &str,
    sections: &[AnalysisSection],
    generated_on: NaiveDate,
) -> ReportLayout {
    let limit = PAGE_HEIGHT_MM - FOOTER_RESERVE_MM - MARGIN_MM;
    let mut cursor = Cursor {
        pages: vec![Page::default()],
        y: MARGIN_MM,
        sections_on_page: 0,
    };

    let mut header = Vec::new();
    push_wrapped(&mut header, &format!("Market Analysis: {company_name}"), HEADER_SIZE, true);
    push_wrapped(
        &mut header,
        "Overview, competition and opportunity assessment",
        SUBHEADER_SIZE,
        false,
    );
    for (text, size, bold) in header {
        cursor.place(text, size, bold);
    }
    cursor.y += HEADER_GAP_MM;

    for section in sections {
        let block = Block::for_section(section);
        // The report header does not count as content
        if cursor.y + block.height() > limit && cursor.sections_on_page > 0 {
            cursor.new_page();
        }
        for (text, size, bold) in block.rows {
            cursor.place(text, size, bold);
        }
        cursor.y += SECTION_GAP_MM;
        cursor.sections_on_page += 1;
    }

    let total = cursor.pages.len();
    let date = generated_on.format("%B %-d, %Y").to_string();
    for (i, page) in cursor.pages.iter_mut().enumerate() {
        page.footer = footer_lines(&date, i + 1, total);
    }

    ReportLayout {
        pages: cursor.pages,
    }
}

fn footer_lines(date: &str, page: usize, total: usize) -> Vec<TextLine> {
    let first_row = PAGE_HEIGHT_MM - 12.0;
    vec![
        TextLine {
            text: format!("Generated on {date}"),
            size_pt: FOOTER_SIZE,
            bold: false,
            x_mm: MARGIN_MM,
            y_mm: first_row,
        },
        TextLine {
            text: format!("Page {page} of {total}"),
            size_pt: FOOTER_SIZE,
            bold: false,
            x_mm: PAGE_WIDTH_MM - MARGIN_MM - 20.0,
            y_mm: first_row,
        },
        TextLine {
            text: "Market Lens | AI-generated market analysis".to_string(),
            size_pt: FOOTER_SIZE,
            bold: false,
            x_mm: MARGIN_MM,
            y_mm: first_row + line_height_mm(FOOTER_SIZE),
        },
    ]
}
