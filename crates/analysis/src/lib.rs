//! Literatus analysis core
//!
//! The deterministic heart of the catalogue:
//! - Lexical similarity scoring between papers (Jaccard over tokens)
//! - Relation graph construction (radial layout + similarity/authorship edges)
//! - Citation export (BibTeX and RIS)
//! - Related-paper ranking
//!
//! Everything here is synchronous, pure and free of I/O; identical inputs
//! always produce identical outputs, and all functions are safe to call
//! concurrently.

mod citation;
mod graph;
mod ranking;
mod similarity;

pub use citation::{citation_key, export_file_name, render_citation, to_bibtex, to_ris, CitationFormat};
pub use graph::{GraphEdge, GraphNode, RelationGraph, RelationGraphBuilder};
pub use ranking::rank_related;
pub use similarity::{similarity, tokenize};
