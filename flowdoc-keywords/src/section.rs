use std::fs;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

/// A keyword section and the chapter numbering its table of contents entries use.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionDef {
    pub name: String,
    pub chapter: u32,
    pub subchapter: u32,
}

impl SectionDef {
    fn new(name: &str, chapter: u32, subchapter: u32) -> Self {
        Self {
            name: name.to_string(),
            chapter,
            subchapter,
        }
    }

    /// Pattern matching `"<chapter>.<subchapter>.<n> "` at the start of a line.
    pub fn pattern(&self) -> String {
        format!(r"^{}\.{}\.[0-9]+ ", self.chapter, self.subchapter)
    }
}

#[derive(Debug, Deserialize)]
struct SectionFile {
    section: Vec<SectionDef>,
}

/// Errors returned when loading section tables.
#[derive(Debug, Error)]
pub enum SectionLoadError {
    #[error("failed to read sections file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse sections file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("sections file {path} defines no sections")]
    Empty { path: String },
    #[error("invalid pattern for section {section}: {source}")]
    Pattern {
        section: String,
        source: regex::Error,
    },
}

/// Load a section table from a TOML file.
pub fn load_sections(path: &Path) -> Result<Vec<SectionDef>, SectionLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| SectionLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let sections = parse_sections(&raw, path.display().to_string())?;
    if sections.is_empty() {
        return Err(SectionLoadError::Empty {
            path: path.display().to_string(),
        });
    }
    Ok(sections)
}

/// Built-in section table.
pub fn default_sections() -> Vec<SectionDef> {
    let embedded = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/sections/sections.toml"
    ));
    match parse_sections(embedded, "embedded sections".to_string()) {
        Ok(sections) if !sections.is_empty() => sections,
        _ => fallback_sections(),
    }
}

fn parse_sections(raw: &str, path: String) -> Result<Vec<SectionDef>, SectionLoadError> {
    let parsed: SectionFile =
        toml::from_str(raw).map_err(|source| SectionLoadError::Parse { path, source })?;
    Ok(parsed.section)
}

fn fallback_sections() -> Vec<SectionDef> {
    vec![
        SectionDef::new("GLOBAL", 4, 2),
        SectionDef::new("RUNSPEC", 5, 2),
        SectionDef::new("GRID", 6, 3),
        SectionDef::new("EDIT", 7, 3),
        SectionDef::new("PROPS", 8, 3),
        SectionDef::new("REGIONS", 9, 3),
        SectionDef::new("SOLUTION", 10, 3),
        SectionDef::new("SUMMARY", 11, 3),
        SectionDef::new("SCHEDULE", 12, 3),
    ]
}

/// Precompiled section patterns, checked in table order.
#[derive(Debug, Clone)]
pub struct SectionMatcher {
    patterns: Vec<(String, Regex)>,
}

impl SectionMatcher {
    /// Compile one pattern per section.
    pub fn new(sections: &[SectionDef]) -> Result<Self, SectionLoadError> {
        let patterns = sections
            .iter()
            .map(|section| {
                Regex::new(&section.pattern())
                    .map(|re| (section.name.clone(), re))
                    .map_err(|source| SectionLoadError::Pattern {
                        section: section.name.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Matcher over the built-in table.
    pub fn with_defaults() -> Result<Self, SectionLoadError> {
        Self::new(&default_sections())
    }

    /// Section whose pattern matches the start of `toc_entry`. First match wins.
    pub fn section_of(&self, toc_entry: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|(_, re)| re.is_match(toc_entry))
            .map(|(name, _)| name.as_str())
    }

    /// Section names in table order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(name, _)| name.as_str())
    }
}
