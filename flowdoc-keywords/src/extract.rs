use std::path::Path;

use odf_xml_core::{parse_file, ParseError, XmlNode};
use thiserror::Error;
use tracing::info;

use crate::harvest::{harvest_toc, TocIssue};
use crate::record::KeywordRecord;
use crate::resolve::{resolve_descriptions, ResolveError};
use crate::section::SectionMatcher;

/// Errors that abort an extraction run.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to parse {path}: {source}")]
    Parse { path: String, source: ParseError },
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Result of one extraction run.
#[derive(Debug)]
pub struct Extraction {
    /// Records in table of contents order.
    pub records: Vec<KeywordRecord>,
    /// Table of contents entries that were skipped.
    pub issues: Vec<TocIssue>,
    /// Number of bookmarks that produced a long description.
    pub resolved: usize,
}

/// Harvest the table of contents, then resolve long descriptions.
pub fn extract(root: &XmlNode, matcher: &SectionMatcher) -> Result<Extraction, ResolveError> {
    extract_reporting(root, matcher, |_| {})
}

/// Like [`extract`], handing each skipped entry to `on_issue` before the
/// description walk starts, so they are seen even when the walk fails.
pub fn extract_reporting(
    root: &XmlNode,
    matcher: &SectionMatcher,
    mut on_issue: impl FnMut(&TocIssue),
) -> Result<Extraction, ResolveError> {
    let mut harvest = harvest_toc(root, matcher);
    info!(
        records = harvest.index.len(),
        skipped = harvest.issues.len(),
        "harvested table of contents"
    );
    harvest.issues.iter().for_each(&mut on_issue);

    let resolved = resolve_descriptions(root, &mut harvest.index)?;
    info!(resolved, "resolved long descriptions");

    Ok(Extraction {
        records: harvest.index.into_records(),
        issues: harvest.issues,
        resolved,
    })
}

/// Parse `path` and run [`extract_reporting`] on it.
pub fn extract_file(
    path: &Path,
    matcher: &SectionMatcher,
    on_issue: impl FnMut(&TocIssue),
) -> Result<Extraction, ExtractError> {
    let root = parse_file(path).map_err(|source| ExtractError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(extract_reporting(&root, matcher, on_issue)?)
}
