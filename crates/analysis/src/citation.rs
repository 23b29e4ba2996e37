//! Citation export
//!
//! Renders a paper as a bibliography entry in BibTeX or RIS. Pure string
//! building; what happens to the text (download, clipboard) is the
//! caller's concern.

use literatus_common::model::Paper;
use serde::{Deserialize, Serialize};

/// Supported citation formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationFormat {
    Bibtex,
    Ris,
}

impl CitationFormat {
    /// Conventional file extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            CitationFormat::Bibtex => "bib",
            CitationFormat::Ris => "ris",
        }
    }
}

impl std::str::FromStr for CitationFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bibtex" | "bib" => Ok(CitationFormat::Bibtex),
            "ris" => Ok(CitationFormat::Ris),
            other => Err(format!("Unknown citation format: {other}")),
        }
    }
}

/// BibTeX citation key: first author's surname + year + first title word,
/// lowercased, with literal fallbacks for missing parts.
pub fn citation_key(paper: &Paper) -> String {
    let surname = paper
        .first_author_surname()
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "unknown".to_string());
    let title_word = paper
        .first_title_word()
        .map(|w| w.to_lowercase())
        .unwrap_or_else(|| "paper".to_string());
    format!("{}{}{}", surname, paper.year, title_word)
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

fn year_or_na(year: i32) -> String {
    if year == 0 {
        "N/A".to_string()
    } else {
        year.to_string()
    }
}

/// Render a paper as a single BibTeX `@article` block.
///
/// Absent title and journal render as the literal `N/A`; doi renders empty.
/// Fields are never omitted.
pub fn to_bibtex(paper: &Paper) -> String {
    format!(
        "@article{{{key},\n  title={{{title}}},\n  author={{{author}}},\n  journal={{{journal}}},\n  year={{{year}}},\n  doi={{{doi}}},\n  abstract={{{abstract_text}}}\n}}",
        key = citation_key(paper),
        title = or_na(&paper.title),
        author = paper.authors.join(" and "),
        journal = or_na(&paper.journal),
        year = year_or_na(paper.year),
        doi = paper.doi.as_deref().unwrap_or(""),
        abstract_text = paper.abstract_text,
    )
}

/// Render a paper as a RIS record with a fixed tag order:
/// TY, TI, one AU per author, JO, PY, DO, AB, ER.
pub fn to_ris(paper: &Paper) -> String {
    let mut lines = Vec::with_capacity(paper.authors.len() + 7);
    lines.push("TY  - JOUR".to_string());
    lines.push(format!("TI  - {}", or_na(&paper.title)));
    for author in &paper.authors {
        lines.push(format!("AU  - {}", author));
    }
    lines.push(format!("JO  - {}", or_na(&paper.journal)));
    lines.push(format!("PY  - {}", year_or_na(paper.year)));
    lines.push(format!("DO  - {}", paper.doi.as_deref().unwrap_or("")));
    lines.push(format!("AB  - {}", paper.abstract_text));
    lines.push("ER  -".to_string());
    lines.join("\n")
}

/// Render a paper in the requested format
pub fn render_citation(paper: &Paper, format: CitationFormat) -> String {
    match format {
        CitationFormat::Bibtex => to_bibtex(paper),
        CitationFormat::Ris => to_ris(paper),
    }
}

/// Suggested file name for an exported citation:
/// `Surname_Year_FirstTitleWord.ext`.
pub fn export_file_name(paper: &Paper, format: CitationFormat) -> String {
    let surname = paper.first_author_surname().unwrap_or("Author");
    let title_word = paper.first_title_word().unwrap_or("Paper");
    format!(
        "{}_{}_{}.{}",
        surname,
        paper.year,
        title_word,
        format.extension()
    )
}
