//! Visualization generation for family tree graphs
//!
//! Provides generators for Mermaid diagrams that can be embedded in
//! Markdown views.

pub mod mermaid;

pub use mermaid::MermaidGenerator;
