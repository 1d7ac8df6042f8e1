//! Namespace URIs used by OpenDocument text exports.

/// `text:` elements and attributes (paragraphs, links, bookmarks).
pub const TEXT_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:text:1.0";
/// `table:` elements.
pub const TABLE_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:table:1.0";
/// `office:` document wrapper elements.
pub const OFFICE_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:office:1.0";
/// `xlink:` attributes, notably `xlink:href` on `text:a`.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
