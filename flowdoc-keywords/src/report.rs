use std::path::Path;

use colored::Colorize;

use crate::extract::Extraction;
use crate::record::KeywordRecord;

/// Record counts for one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionStats {
    pub section: String,
    pub records: usize,
    pub missing_long_description: usize,
}

/// Count records per section, in the order `sections` lists them.
///
/// Sections with no records are still listed.
pub fn summarize_by_section<'a>(
    records: &[KeywordRecord],
    sections: impl IntoIterator<Item = &'a str>,
) -> Vec<SectionStats> {
    sections
        .into_iter()
        .map(|section| {
            let rows = records.iter().filter(|r| r.section == section);
            SectionStats {
                section: section.to_string(),
                records: rows.clone().count(),
                missing_long_description: rows.filter(|r| r.long_description.is_none()).count(),
            }
        })
        .collect()
}

/// One-line run status.
pub fn render_status(extraction: &Extraction, output: &Path) -> String {
    let line = format!(
        "wrote {} keyword records to {} (descriptions={} skipped_entries={})",
        extraction.records.len(),
        output.display(),
        extraction.resolved,
        extraction.issues.len()
    );
    line.cyan().to_string()
}

/// Render per-section record counts.
pub fn render_section_stats(rows: &[SectionStats]) -> String {
    let mut out = Vec::new();
    out.push("section_summary".to_string());
    for row in rows {
        let line = format!(
            "- {}: records={} missing_long_description={}",
            row.section, row.records, row.missing_long_description
        );
        let line = if row.records == 0 {
            line.yellow().to_string()
        } else if row.missing_long_description > 0 {
            line.magenta().to_string()
        } else {
            line.green().to_string()
        };
        out.push(line);
    }
    out.join("\n")
}
