use std::fs;
use std::path::Path;

use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::name::{LocalName, ResolveResult};
use quick_xml::NsReader;
use thiserror::Error;

use crate::tree::{QualifiedName, XmlChild, XmlNode};

/// Errors that can occur while parsing XML into an [`XmlNode`] tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input XML could not be decoded or tokenized.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Input bytes were not valid UTF-8 for name/text extraction.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to decode text entity or bytes.
    #[error("failed to decode XML text: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// Failed to read input file.
    #[error("failed to read XML file: {0}")]
    Io(#[from] std::io::Error),
    /// A prefix was used without a matching `xmlns` declaration.
    #[error("unbound namespace prefix '{0}'")]
    UnknownPrefix(String),
    /// Structural issue in XML document.
    #[error("malformed XML: {0}")]
    Malformed(String),
}

/// Parse XML bytes into an [`XmlNode`] tree with resolved namespaces.
///
/// Text is kept verbatim, whitespace included, so mixed content such as
/// `<p>a <span>b</span></p>` concatenates back to `"a b"`.
pub fn parse(xml: &[u8]) -> Result<XmlNode, ParseError> {
    let mut reader = NsReader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let node = build_node_start(&e, &reader)?;
                stack.push(node);
            }
            Event::Empty(e) => {
                let node = build_node_start(&e, &reader)?;
                attach(node, &mut stack, &mut root)?;
            }
            Event::Text(e) => {
                if let Some(current) = stack.last_mut() {
                    push_text(current, &e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    push_text(current, std::str::from_utf8(e.as_ref())?);
                }
            }
            Event::End(_) => {
                let node = stack.pop().ok_or_else(|| {
                    ParseError::Malformed("encountered closing tag without open tag".to_string())
                })?;
                attach(node, &mut stack, &mut root)?;
            }
            Event::Comment(e) => {
                if let Some(current) = stack.last_mut() {
                    let comment = std::str::from_utf8(&e)?.to_string();
                    current.children.push(XmlChild::Comment(comment));
                }
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(ParseError::Malformed(
            "unclosed element(s) at end of document".to_string(),
        ));
    }

    root.ok_or_else(|| ParseError::Malformed("no root element found".to_string()))
}

/// Parse an XML file into an [`XmlNode`] tree.
pub fn parse_file(path: &Path) -> Result<XmlNode, ParseError> {
    let bytes = fs::read(path)?;
    parse(&bytes)
}

fn attach(
    node: XmlNode,
    stack: &mut [XmlNode],
    root: &mut Option<XmlNode>,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlChild::Element(node));
    } else if root.is_none() {
        *root = Some(node);
    } else {
        return Err(ParseError::Malformed(
            "multiple top-level elements found".to_string(),
        ));
    }
    Ok(())
}

// Adjacent text and CDATA runs merge into one text child.
fn push_text(node: &mut XmlNode, text: &str) {
    if text.is_empty() {
        return;
    }
    match node.children.last_mut() {
        Some(XmlChild::Text(existing)) => existing.push_str(text),
        _ => node.children.push(XmlChild::Text(text.to_string())),
    }
}

fn build_node_start(e: &BytesStart<'_>, reader: &NsReader<&[u8]>) -> Result<XmlNode, ParseError> {
    let (ns, local) = reader.resolve_element(e.name());
    let mut node = XmlNode::new(qualified(ns, local)?);

    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let (ns, local) = reader.resolve_attribute(attr.key);
        let key = qualified(ns, local)?;
        let value = attr
            .decode_and_unescape_value(reader.decoder())?
            .into_owned();
        node.attributes.insert(key, value);
    }

    Ok(node)
}

fn qualified(ns: ResolveResult<'_>, local: LocalName<'_>) -> Result<QualifiedName, ParseError> {
    let local = std::str::from_utf8(local.as_ref())?.to_string();
    match ns {
        ResolveResult::Bound(namespace) => Ok(QualifiedName {
            namespace: Some(std::str::from_utf8(namespace.as_ref())?.to_string()),
            local,
        }),
        ResolveResult::Unbound => Ok(QualifiedName::local(local)),
        ResolveResult::Unknown(prefix) => Err(ParseError::UnknownPrefix(
            String::from_utf8_lossy(&prefix).into_owned(),
        )),
    }
}
