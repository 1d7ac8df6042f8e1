//! Namespace-aware XML tree primitives for reading OpenDocument exports.

pub mod odf;
pub mod parser;
pub mod tree;

pub use parser::{parse, parse_file, ParseError};
pub use tree::{NodePath, QualifiedName, XmlChild, XmlNode};
