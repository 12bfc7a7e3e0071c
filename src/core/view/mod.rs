//! Page generation module for family tree views
//!
//! This module provides functionality to render a family tree as an interactive
//! HTML page (vis-network) or as a Markdown document with a Mermaid diagram.

pub mod formats;
pub mod graph_data;
pub mod visualization;

use crate::core::generations::GenerationLevels;
use crate::core::models::{FamilyTree, KinGraph};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlRenderer, MarkdownRenderer, PageFormat};
pub use graph_data::{VisDataset, VisEdge, VisNode};
pub use visualization::MermaidGenerator;

/// Data context for page rendering
///
/// This struct aggregates all data needed to render a family tree view,
/// providing a single source of truth for templates.
#[derive(Debug, Clone)]
pub struct ViewContext<'a> {
    /// Family tree being rendered
    pub tree: &'a FamilyTree,
    /// Kinship graph derived from the tree
    pub graph: &'a KinGraph,
    /// Generation level assigned to every person
    pub levels: &'a GenerationLevels,
    /// Page title
    pub title: &'a str,
}

impl<'a> ViewContext<'a> {
    /// Create a new view context
    #[must_use]
    pub const fn new(
        tree: &'a FamilyTree,
        graph: &'a KinGraph,
        levels: &'a GenerationLevels,
        title: &'a str,
    ) -> Self {
        Self {
            tree,
            graph,
            levels,
            title,
        }
    }

    /// Get the number of people in the tree
    #[must_use]
    pub const fn person_count(&self) -> usize {
        self.graph.person_count()
    }

    /// Get the number of reciprocal marriages
    #[must_use]
    pub const fn couple_count(&self) -> usize {
        self.graph.couples.len()
    }

    /// Get the number of distinct generation levels
    #[must_use]
    pub fn generation_count(&self) -> usize {
        let distinct: std::collections::HashSet<i32> = self.levels.values().copied().collect();
        distinct.len()
    }
}

/// Trait for page renderers
pub trait PageRenderer {
    /// Render a page to a file
    ///
    /// # Errors
    /// Returns an error if rendering or file writing fails
    fn generate(&self, ctx: &ViewContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Render page content as a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, ctx: &ViewContext) -> Result<String, Box<dyn Error>>;
}
