//! Table of contents harvesting.
//!
//! Every `text:a` anchor whose leading text starts with a keyword section's
//! chapter number (`"5.2.3 WELSPECS – Well specification data"`) becomes a
//! [`KeywordRecord`], keyed by the anchor's link target.

use std::fmt::{self, Display, Formatter};

use odf_xml_core::odf::{TEXT_NS, XLINK_NS};
use odf_xml_core::XmlNode;
use tracing::debug;

use crate::record::{KeywordIndex, KeywordRecord};
use crate::section::SectionMatcher;

/// Number, keyword, separator, description.
const TOC_TOKENS: usize = 4;

/// Why a section-numbered entry could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TocIssueKind {
    TooFewTokens { found: usize },
    MissingHref,
}

/// A table of contents entry that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocIssue {
    /// Anchor text as it appears in the document.
    pub entry: String,
    pub kind: TocIssueKind,
}

impl Display for TocIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ERROR parsing following table of content entry: {}",
            self.entry
        )
    }
}

/// Records and skipped entries from one table of contents scan.
#[derive(Debug, Default)]
pub struct Harvest {
    pub index: KeywordIndex,
    pub issues: Vec<TocIssue>,
}

/// Scan every anchor in `root` and collect keyword records.
pub fn harvest_toc(root: &XmlNode, matcher: &SectionMatcher) -> Harvest {
    let mut harvest = Harvest::default();

    for anchor in root.descendants(TEXT_NS, "a") {
        let Some(text) = anchor.leading_text() else {
            continue;
        };
        let Some(section) = matcher.section_of(text) else {
            continue;
        };

        let parsed = parse_toc_entry(text, section).and_then(|record| {
            let link = link_target(anchor).ok_or(TocIssueKind::MissingHref)?;
            Ok((link, record))
        });

        match parsed {
            Ok((link, record)) => {
                debug!(link, keyword = %record.keyword, section, "harvested toc entry");
                harvest.index.insert(link.to_string(), record);
            }
            Err(kind) => harvest.issues.push(TocIssue {
                entry: text.to_string(),
                kind,
            }),
        }
    }

    harvest
}

/// Split a section-numbered entry into a record.
pub fn parse_toc_entry(text: &str, section: &str) -> Result<KeywordRecord, TocIssueKind> {
    let tokens = split_max(text, TOC_TOKENS);
    let [_, keyword, _, short_description] = tokens.as_slice() else {
        return Err(TocIssueKind::TooFewTokens {
            found: tokens.len(),
        });
    };

    Ok(KeywordRecord {
        keyword: keyword.to_string(),
        section: section.to_string(),
        short_description: short_description.to_string(),
        long_description: None,
    })
}

fn link_target(anchor: &XmlNode) -> Option<&str> {
    anchor
        .attribute(XLINK_NS, "href")
        .map(|href| href.trim_start_matches('#'))
}

/// Split on whitespace into at most `max` tokens; the last keeps the remainder.
fn split_max(text: &str, max: usize) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = text.trim();

    while !rest.is_empty() {
        if tokens.len() + 1 == max {
            tokens.push(rest);
            break;
        }
        match rest.find(char::is_whitespace) {
            Some(end) => {
                tokens.push(&rest[..end]);
                rest = rest[end..].trim_start();
            }
            None => {
                tokens.push(rest);
                break;
            }
        }
    }

    tokens
}
