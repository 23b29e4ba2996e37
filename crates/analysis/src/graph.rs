//! Relation graph construction
//!
//! Derives a renderable graph over a paper collection: one positioned node
//! per paper on a circle, and an undirected edge for every pair that is
//! "related" - sharing an author or scoring above the similarity threshold.
//!
//! Edge construction is O(n^2) over the collection. That is a known limit,
//! accepted because the library is an interactive, human-scale collection
//! (tens to low hundreds of papers), not a bulk corpus.

use crate::similarity::similarity;
use literatus_common::errors::{AppError, Result};
use literatus_common::model::Paper;
use serde::Serialize;
use std::f64::consts::TAU;
use uuid::Uuid;

/// A positioned node in the relation graph
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub id: Uuid,
    pub title: String,
    pub year: i32,
    pub x: f64,
    pub y: f64,
}

/// An undirected edge between two related papers
#[derive(Debug, Clone, Serialize)]
pub struct GraphEdge {
    pub source: Uuid,
    pub target: Uuid,

    /// Similarity score of the pair, unclamped. Shared-author-only edges
    /// may carry zero strength.
    pub strength: f64,
}

impl GraphEdge {
    /// Line width for rendering, scaling with strength
    pub fn stroke_width(&self) -> f64 {
        1.0 + self.strength * 5.0
    }

    /// Line opacity for rendering. The floor keeps zero-strength
    /// shared-author edges visible.
    pub fn opacity(&self) -> f64 {
        0.3 + self.strength
    }
}

/// A renderable relation graph
#[derive(Debug, Clone, Serialize)]
pub struct RelationGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Builds relation graphs with a fixed radial layout
#[derive(Debug, Clone)]
pub struct RelationGraphBuilder {
    /// Canvas origin the circle is centred on
    pub center: (f64, f64),

    /// Radius gained per paper
    pub radius_step: f64,

    /// Radius cap
    pub max_radius: f64,

    /// Similarity above which (strictly) a pair is related
    pub similarity_threshold: f64,
}

impl Default for RelationGraphBuilder {
    fn default() -> Self {
        Self {
            center: (400.0, 300.0),
            radius_step: 30.0,
            max_radius: 200.0,
            similarity_threshold: 0.1,
        }
    }
}

impl RelationGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph for an ordered paper collection.
    ///
    /// The layout is a deterministic function of input order alone: node i
    /// sits at angle (i / n) * 2pi on a circle of radius min(max, n * step).
    /// Fewer than two papers is a distinguished error, not an empty graph.
    pub fn build(&self, papers: &[Paper]) -> Result<RelationGraph> {
        if papers.len() < 2 {
            return Err(AppError::InsufficientPapers {
                count: papers.len(),
            });
        }

        let n = papers.len();
        let radius = self.max_radius.min(n as f64 * self.radius_step);
        let (cx, cy) = self.center;

        let nodes: Vec<GraphNode> = papers
            .iter()
            .enumerate()
            .map(|(i, paper)| {
                let angle = (i as f64 / n as f64) * TAU;
                GraphNode {
                    id: paper.id,
                    title: paper.title.clone(),
                    year: paper.year,
                    x: cx + radius * angle.cos(),
                    y: cy + radius * angle.sin(),
                }
            })
            .collect();

        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let shared_authors = papers[i]
                    .authors
                    .iter()
                    .any(|author| papers[j].authors.contains(author));
                let sim = similarity(&papers[i], &papers[j]);

                if shared_authors || sim > self.similarity_threshold {
                    edges.push(GraphEdge {
                        source: papers[i].id,
                        target: papers[j].id,
                        strength: sim,
                    });
                }
            }
        }

        Ok(RelationGraph { nodes, edges })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use literatus_common::model::Paper;

    fn paper(title: &str, authors: &[&str], keywords: &[&str]) -> Paper {
        let mut p = Paper::new(title);
        p.authors = authors.iter().map(|s| s.to_string()).collect();
        p.keywords = keywords.iter().map(|s| s.to_string()).collect();
        p
    }

    #[test]
    fn test_insufficient_papers() {
        let builder = RelationGraphBuilder::new();

        let err = builder.build(&[]).unwrap_err();
        assert!(matches!(err, AppError::InsufficientPapers { count: 0 }));

        let err = builder.build(&[paper("Solo", &[], &[])]).unwrap_err();
        assert!(matches!(err, AppError::InsufficientPapers { count: 1 }));
    }

    #[test]
    fn test_four_paper_angular_layout() {
        let builder = RelationGraphBuilder::new();
        let papers: Vec<Paper> = (0..4).map(|i| paper(&format!("P{i}"), &[], &[])).collect();

        let graph = builder.build(&papers).unwrap();
        assert_eq!(graph.nodes.len(), 4);

        // radius = min(200, 4 * 30) = 120; angles 0, pi/2, pi, 3pi/2
        let (cx, cy) = (400.0, 300.0);
        let r = 120.0;
        let expected = [
            (cx + r, cy),
            (cx, cy + r),
            (cx - r, cy),
            (cx, cy - r),
        ];
        for (node, (ex, ey)) in graph.nodes.iter().zip(expected) {
            assert!((node.x - ex).abs() < 1e-9, "x: {} vs {}", node.x, ex);
            assert!((node.y - ey).abs() < 1e-9, "y: {} vs {}", node.y, ey);
        }
    }

    #[test]
    fn test_radius_caps_for_large_collections() {
        let builder = RelationGraphBuilder::new();
        let papers: Vec<Paper> = (0..10).map(|i| paper(&format!("P{i}"), &[], &[])).collect();

        let graph = builder.build(&papers).unwrap();
        for node in &graph.nodes {
            let dx = node.x - 400.0;
            let dy = node.y - 300.0;
            let r = (dx * dx + dy * dy).sqrt();
            assert!((r - 200.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_layout_is_deterministic_in_input_order() {
        let builder = RelationGraphBuilder::new();
        let papers: Vec<Paper> = (0..5).map(|i| paper(&format!("P{i}"), &[], &[])).collect();

        let first = builder.build(&papers).unwrap();
        let second = builder.build(&papers).unwrap();
        for (a, b) in first.nodes.iter().zip(&second.nodes) {
            assert_eq!((a.x, a.y), (b.x, b.y));
        }
    }

    #[test]
    fn test_shared_author_alone_emits_edge() {
        // Titles share no qualifying tokens, so sim == 0; the shared author
        // string is sufficient on its own.
        let a = paper("Alpha", &["Chen, L."], &[]);
        let b = paper("Beta", &["Chen, L.", "Park, J."], &[]);

        let graph = RelationGraphBuilder::new().build(&[a, b]).unwrap();
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].strength, 0.0);
    }

    #[test]
    fn test_threshold_is_strict() {
        // 1 shared term out of 10 in the union: sim == 0.1 exactly -> no edge
        let a = paper("", &[], &["shared", "a1", "a2", "a3", "a4", "a5"]);
        let b = paper("", &[], &["shared", "b1", "b2", "b3", "b4"]);
        let graph = RelationGraphBuilder::new()
            .build(&[a.clone(), b.clone()])
            .unwrap();
        assert!(graph.edges.is_empty());

        // 1 shared of 9: sim just above 0.1 -> edge
        let c = paper("", &[], &["shared", "a1", "a2", "a3", "a4"]);
        let graph = RelationGraphBuilder::new().build(&[c, b]).unwrap();
        assert_eq!(graph.edges.len(), 1);
        assert!(graph.edges[0].strength > 0.1);
    }

    #[test]
    fn test_edge_rendering_floor() {
        let edge = GraphEdge {
            source: Uuid::from_u128(1),
            target: Uuid::from_u128(2),
            strength: 0.0,
        };
        assert_eq!(edge.stroke_width(), 1.0);
        assert!(edge.opacity() > 0.0);
    }

    #[test]
    fn test_sample_papers_connect_by_overlap() {
        let graph = RelationGraphBuilder::new()
            .build(&Paper::samples())
            .unwrap();
        assert_eq!(graph.nodes.len(), 3);
        // The samples share no authors; any edges present come from lexical
        // overlap and must clear the strict threshold.
        for edge in &graph.edges {
            assert!(edge.strength > 0.1);
        }
    }
}
