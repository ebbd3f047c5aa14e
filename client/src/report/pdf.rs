use anyhow::{anyhow, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument};

use super::layout::{ReportLayout, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

/// Draw a laid-out report with the builtin Helvetica faces.
pub fn render_pdf(layout: &ReportLayout, title: &str) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow!("Load Helvetica: {e}"))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| anyhow!("Load Helvetica-Bold: {e}"))?;

    for (i, page) in layout.pages.iter().enumerate() {
        let (page_idx, layer_idx) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), format!("Layer {}", i + 1))
        };
        let layer = doc.get_page(page_idx).get_layer(layer_idx);

        for line in page.body.iter().chain(page.footer.iter()) {
            let font = if line.bold { &bold } else { &regular };
            // PDF origin is bottom-left
            layer.use_text(
                line.text.clone(),
                line.size_pt,
                Mm(line.x_mm),
                Mm(PAGE_HEIGHT_MM - line.y_mm),
                font,
            );
        }
    }

    doc.save_to_bytes().map_err(|e| anyhow!("Serialize PDF: {e}"))
}
