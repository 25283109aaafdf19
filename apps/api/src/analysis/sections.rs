//! Section slicing — Experience, Achievements, Skills and Projects.
//!
//! Each section is one row of `SECTION_TABLE`: the labels that open it and the
//! sibling labels that close it. Rows are evaluated independently over the
//! same text, so a section's span may overlap another's. A section never lists
//! its own labels as terminators.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Experience,
    Achievements,
    Skills,
    Projects,
}

impl SectionKind {
    /// Placeholder rendered when the section label never appears.
    pub fn sentinel(self) -> &'static str {
        match self {
            SectionKind::Experience => "No experience found.",
            SectionKind::Achievements => "No achievements found.",
            SectionKind::Skills => "No skills found.",
            SectionKind::Projects => "No projects found.",
        }
    }
}

/// Outcome of slicing one section out of the resume text.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionMatch<'a> {
    Found(&'a str),
    NotFound,
}

impl<'a> SectionMatch<'a> {
    /// Non-empty trimmed lines of the captured span, in order.
    pub fn lines(&self) -> Vec<&'a str> {
        match self {
            SectionMatch::Found(span) => span
                .split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect(),
            SectionMatch::NotFound => Vec::new(),
        }
    }
}

struct SectionRule {
    kind: SectionKind,
    labels: &'static [&'static str],
    terminators: &'static [&'static str],
}

const SECTION_TABLE: &[SectionRule] = &[
    SectionRule {
        kind: SectionKind::Experience,
        labels: &["Experience", "Work Experience", "Professional Experience"],
        terminators: &["Skills", "Achievements", "Projects"],
    },
    SectionRule {
        kind: SectionKind::Achievements,
        labels: &["Achievements", "Key Achievements"],
        terminators: &["Skills", "Experience", "Projects"],
    },
    SectionRule {
        kind: SectionKind::Skills,
        labels: &["Skills", "Technical Skills"],
        terminators: &["Experience", "Achievements", "Projects"],
    },
    SectionRule {
        kind: SectionKind::Projects,
        labels: &["Projects", "Personal Projects", "Side Projects"],
        terminators: &["Experience", "Achievements", "Skills"],
    },
];

struct CompiledSection {
    kind: SectionKind,
    header: Regex,
    terminator: Regex,
}

static COMPILED: Lazy<Vec<CompiledSection>> = Lazy::new(|| {
    SECTION_TABLE
        .iter()
        .map(|rule| CompiledSection {
            kind: rule.kind,
            header: Regex::new(&format!(r"(?i)(?:{})[:\s]+", rule.labels.join("|")))
                .expect("valid section header regex"),
            terminator: Regex::new(&format!(r"(?i)\n\n|{}", rule.terminators.join("|")))
                .expect("valid section terminator regex"),
        })
        .collect()
});

fn compiled(kind: SectionKind) -> &'static CompiledSection {
    COMPILED
        .iter()
        .find(|section| section.kind == kind)
        .expect("every SectionKind has a table row")
}

/// Locates `kind` in `text`: the first label followed by `:` or whitespace,
/// spanning to the first blank line, sibling label, or end of text.
pub fn extract_section(text: &str, kind: SectionKind) -> SectionMatch<'_> {
    let section = compiled(kind);
    let Some(header) = section.header.find(text) else {
        return SectionMatch::NotFound;
    };
    let rest = &text[header.end()..];
    let end = section
        .terminator
        .find(rest)
        .map_or(rest.len(), |m| m.start());
    SectionMatch::Found(&rest[..end])
}

/// Experience lines joined with `" | "`, in document order.
pub fn extract_experience(text: &str) -> String {
    match extract_section(text, SectionKind::Experience) {
        SectionMatch::NotFound => SectionKind::Experience.sentinel().to_string(),
        found => found.lines().join(" | "),
    }
}

pub fn extract_achievements(text: &str) -> BTreeSet<String> {
    extract_line_set(text, SectionKind::Achievements)
}

pub fn extract_skills(text: &str) -> BTreeSet<String> {
    extract_line_set(text, SectionKind::Skills)
}

pub fn extract_projects(text: &str) -> BTreeSet<String> {
    extract_line_set(text, SectionKind::Projects)
}

/// Deduplicated lines of a section. Input order is not kept.
fn extract_line_set(text: &str, kind: SectionKind) -> BTreeSet<String> {
    match extract_section(text, kind) {
        SectionMatch::NotFound => BTreeSet::from([kind.sentinel().to_string()]),
        found => found.lines().into_iter().map(str::to_string).collect(),
    }
}
