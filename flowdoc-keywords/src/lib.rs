//! Keyword documentation extraction for the OPM Flow reference manual.
//!
//! The manual's OpenDocument XML export lists every keyword in its table of
//! contents as `"<chapter>.<subchapter>.<n> KEYWORD – short description"`,
//! linked to a bookmark on the keyword's heading. This crate turns those two
//! halves into one JSON record per keyword.
//!
//! # Pipeline
//!
//! 1. [`section`] matches table of contents lines to keyword sections
//!    (GLOBAL, RUNSPEC, GRID, ...).
//! 2. [`harvest`] collects a [`record::KeywordRecord`] per section entry,
//!    keyed by link target.
//! 3. [`resolve`] follows each matching bookmark to its description
//!    paragraph.
//! 4. [`output`] writes the records as indented JSON.
//!
//! [`extract`] runs steps 2 and 3 over a parsed document; [`report`] renders
//! the terminal summary.
//!
//! # Examples
//!
//! ```ignore
//! use flowdoc_keywords::extract::extract_file;
//! use flowdoc_keywords::output::{write_json, Encoding};
//! use flowdoc_keywords::section::SectionMatcher;
//!
//! let matcher = SectionMatcher::with_defaults()?;
//! let extraction = extract_file("manual.xml".as_ref(), &matcher, |issue| println!("{issue}"))?;
//! write_json(&extraction.records, "keywords.json".as_ref(), Encoding::Ascii)?;
//! ```

pub mod extract;
pub mod harvest;
pub mod output;
pub mod record;
pub mod report;
pub mod resolve;
pub mod section;
