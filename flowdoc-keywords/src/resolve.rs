//! Long description lookup.
//!
//! Each keyword heading carries a `text:bookmark-start` named after the link
//! target used by its table of contents entry. The description is the first
//! paragraph after the heading, past an optional table and an optional
//! paragraph that only reads "Description".

use odf_xml_core::odf::TEXT_NS;
use odf_xml_core::XmlNode;
use thiserror::Error;
use tracing::debug;

use crate::record::KeywordIndex;

const DESCRIPTION_TITLE: &str = "Description";

/// Document shapes the description walk cannot handle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("bookmark at {path:?} has no text:name attribute")]
    UnnamedBookmark { path: Vec<usize> },
    #[error("bookmark '{link}' is not inside an element with siblings")]
    NoEnclosingNode { link: String },
    #[error("ran out of siblings looking for the description of '{link}'")]
    MissingDescription { link: String },
}

/// Attach long descriptions to every record with a matching bookmark.
///
/// Returns how many bookmarks were resolved. Bookmarks without a harvested
/// link are ignored.
pub fn resolve_descriptions(
    root: &XmlNode,
    index: &mut KeywordIndex,
) -> Result<usize, ResolveError> {
    let mut resolved = 0;

    for path in root.descendant_paths(TEXT_NS, "bookmark-start") {
        let Some(bookmark) = root.node_at(&path) else {
            continue;
        };
        let link = bookmark
            .attribute(TEXT_NS, "name")
            .ok_or_else(|| ResolveError::UnnamedBookmark { path: path.clone() })?;

        if !index.contains(link) {
            continue;
        }

        let description = find_description(root, &path, link)?.text_content();
        debug!(link, chars = description.len(), "resolved description");
        if let Some(record) = index.get_mut(link) {
            record.long_description = Some(description);
            resolved += 1;
        }
    }

    Ok(resolved)
}

/// Walk forward from the bookmark's enclosing node to the description paragraph.
pub fn find_description<'a>(
    root: &'a XmlNode,
    bookmark: &[usize],
    link: &str,
) -> Result<&'a XmlNode, ResolveError> {
    let missing = || ResolveError::MissingDescription {
        link: link.to_string(),
    };

    let (_, enclosing) = bookmark
        .split_last()
        .filter(|(_, enclosing)| !enclosing.is_empty())
        .ok_or_else(|| ResolveError::NoEnclosingNode {
            link: link.to_string(),
        })?;

    let mut path = root.next_sibling_path(enclosing).ok_or_else(missing)?;
    let mut node = root.node_at(&path).ok_or_else(missing)?;

    if !node.is(TEXT_NS, "p") {
        path = root.next_sibling_path(&path).ok_or_else(missing)?;
        node = root.node_at(&path).ok_or_else(missing)?;
    }

    if node.text_content() == DESCRIPTION_TITLE {
        path = root.next_sibling_path(&path).ok_or_else(missing)?;
        node = root.node_at(&path).ok_or_else(missing)?;
    }

    Ok(node)
}

#[cfg(test)]
mod tests {
    use odf_xml_core::parse;
    use pretty_assertions::assert_eq;

    use super::{resolve_descriptions, ResolveError};
    use crate::record::{KeywordIndex, KeywordRecord};

    fn document(body: &str) -> String {
        format!(
            r#"<office:text xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0">{body}</office:text>"#
        )
    }

    fn index_with(links: &[&str]) -> KeywordIndex {
        let mut index = KeywordIndex::new();
        for link in links {
            index.insert(
                link.to_string(),
                KeywordRecord {
                    keyword: link.to_uppercase(),
                    section: "GRID".to_string(),
                    short_description: "short".to_string(),
                    long_description: None,
                },
            );
        }
        index
    }

    fn resolve(body: &str, links: &[&str]) -> Result<KeywordIndex, ResolveError> {
        let root = parse(document(body).as_bytes()).expect("parse");
        let mut index = index_with(links);
        resolve_descriptions(&root, &mut index)?;
        Ok(index)
    }

    fn long(index: &KeywordIndex, link: &str) -> Option<String> {
        index.get(link).and_then(|r| r.long_description.clone())
    }

    #[test]
    fn plain_paragraph_follows_heading() {
        let index = resolve(
            r#"<text:h><text:bookmark-start text:name="poro"/>PORO</text:h>
               <text:p>Grid block <text:span>porosities</text:span>.</text:p>"#,
            &["poro"],
        )
        .expect("resolve");

        assert_eq!(long(&index, "poro").as_deref(), Some("Grid block porosities."));
    }

    #[test]
    fn table_before_paragraph_is_skipped() {
        let index = resolve(
            r#"<text:h><text:bookmark-start text:name="poro"/>PORO</text:h>
               <table:table><table:table-row><table:table-cell><text:p>GRID</text:p></table:table-cell></table:table-row></table:table>
               <text:p>After the table.</text:p>"#,
            &["poro"],
        )
        .expect("resolve");

        assert_eq!(long(&index, "poro").as_deref(), Some("After the table."));
    }

    #[test]
    fn description_title_paragraph_is_skipped() {
        let index = resolve(
            r#"<text:h><text:bookmark-start text:name="poro"/>PORO</text:h>
               <text:p><text:span>Description</text:span></text:p>
               <text:p>The real text.</text:p>"#,
            &["poro"],
        )
        .expect("resolve");

        assert_eq!(long(&index, "poro").as_deref(), Some("The real text."));
    }

    #[test]
    fn table_then_description_title_is_skipped() {
        let index = resolve(
            r#"<text:h><text:bookmark-start text:name="poro"/>PORO</text:h>
               <table:table/>
               <text:p>Description</text:p>
               <text:p>Past both.</text:p>"#,
            &["poro"],
        )
        .expect("resolve");

        assert_eq!(long(&index, "poro").as_deref(), Some("Past both."));
    }

    #[test]
    fn description_title_must_match_exactly() {
        let index = resolve(
            r#"<text:h><text:bookmark-start text:name="poro"/>PORO</text:h>
               <text:p>Description of porosity.</text:p>
               <text:p>Unused.</text:p>"#,
            &["poro"],
        )
        .expect("resolve");

        assert_eq!(
            long(&index, "poro").as_deref(),
            Some("Description of porosity.")
        );
    }

    #[test]
    fn unknown_bookmarks_are_ignored() {
        let index = resolve(
            r#"<text:h><text:bookmark-start text:name="orphan"/>Orphan</text:h>
               <text:h><text:bookmark-start text:name="poro"/>PORO</text:h>
               <text:p>Porosity.</text:p>"#,
            &["poro"],
        )
        .expect("resolve");

        assert_eq!(index.len(), 1);
        assert_eq!(long(&index, "poro").as_deref(), Some("Porosity."));
    }

    #[test]
    fn unknown_bookmark_without_siblings_is_not_an_error() {
        let index = resolve(
            r#"<text:h><text:bookmark-start text:name="orphan"/>Orphan</text:h>"#,
            &["poro"],
        )
        .expect("resolve");

        assert_eq!(long(&index, "poro"), None);
    }

    #[test]
    fn missing_description_is_fatal() {
        let err = resolve(
            r#"<text:h><text:bookmark-start text:name="poro"/>PORO</text:h>"#,
            &["poro"],
        )
        .expect_err("no sibling follows the heading");

        assert_eq!(
            err,
            ResolveError::MissingDescription {
                link: "poro".to_string()
            }
        );
    }

    #[test]
    fn bookmark_directly_under_root_is_fatal() {
        let err = resolve(r#"<text:bookmark-start text:name="poro"/>"#, &["poro"])
            .expect_err("no enclosing node");

        assert_eq!(
            err,
            ResolveError::NoEnclosingNode {
                link: "poro".to_string()
            }
        );
    }
}
