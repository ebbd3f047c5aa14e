//! PDF report export.

pub mod layout;
pub mod pdf;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use market_lens_core::AnalysisSection;
use tracing::info;

use layout::layout_report;
use pdf::render_pdf;

/// `market-analysis-<slug>.pdf`
pub fn file_name(company_name: &str) -> String {
    format!("market-analysis-{}.pdf", slugify(company_name))
}

/// Lowercase ASCII alphanumerics with single dashes between runs.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "company".to_string()
    } else {
        slug
    }
}

/// Lay out, render and write the report into `dir`. Returns the written path.
pub fn export_report(
    dir: &Path,
    company_name: &str,
    sections: &[AnalysisSection],
    generated_on: NaiveDate,
) -> Result<PathBuf> {
    let layout = layout_report(company_name, sections, generated_on);
    let bytes = render_pdf(&layout, &format!("Market Analysis: {company_name}"))?;

    std::fs::create_dir_all(dir).with_context(|| format!("Create report dir {}", dir.display()))?;
    let path = dir.join(file_name(company_name));
    std::fs::write(&path, &bytes).with_context(|| format!("Write {}", path.display()))?;

    info!(
        "Report for {company_name}: {} ({} pages, {} bytes)",
        path.display(),
        layout.page_count(),
        bytes.len()
    );
    Ok(path)
}
