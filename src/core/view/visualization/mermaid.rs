//! Mermaid diagram generator for family trees
//!
//! Generates Mermaid flowchart syntax that can be embedded in Markdown files
//! and rendered by GitHub, GitLab, and other Markdown viewers.

use crate::core::models::{FamilyTree, RelationshipKind};
use std::fmt::Write;

/// Generator for Mermaid diagram syntax
pub struct MermaidGenerator;

impl MermaidGenerator {
    /// Generate a Mermaid flowchart from a family tree
    ///
    /// Creates a top-down flowchart with one node per person. Parent-child
    /// links are drawn as arrows and marriages as dashed lines; divorce
    /// links are never drawn.
    #[must_use]
    pub fn generate_tree(tree: &FamilyTree) -> String {
        let mut output = String::from("```mermaid\nflowchart TD\n");

        for id in tree.sorted_ids() {
            let Some(person) = tree.get_person(&id) else {
                continue;
            };
            let safe_id = Self::sanitize_id(&id);
            let label = Self::escape_label(&person.display_name());
            let _ = writeln!(output, "    {safe_id}[\"{label}\"]");
        }

        output.push('\n');

        for relationship in tree.relationships() {
            let from_id = Self::sanitize_id(&relationship.from);
            let to_id = Self::sanitize_id(&relationship.to);
            match relationship.kind {
                RelationshipKind::ParentOf => {
                    let _ = writeln!(output, "    {from_id} --> {to_id}");
                }
                RelationshipKind::MarriedTo => {
                    let _ = writeln!(output, "    {from_id} -.- {to_id}");
                }
                RelationshipKind::DivorcedFrom => {}
            }
        }

        output.push_str("```\n");
        output
    }

    /// Escape characters Mermaid treats as markup inside a node label
    fn escape_label(label: &str) -> String {
        label.replace('"', "#quot;")
    }

    /// Sanitize a person id for use as a Mermaid node ID
    fn sanitize_id(id: &str) -> String {
        id.chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Person;

    #[test]
    fn test_mermaid_generation() {
        let mut tree = FamilyTree::new();
        tree.add_person("alice".to_string(), Person::new("Alice"));
        tree.add_person("bob".to_string(), Person::new("Bob"));
        tree.set_children("alice", vec!["bob".to_string()])
            .unwrap();

        let diagram = MermaidGenerator::generate_tree(&tree);

        assert!(diagram.contains("```mermaid"));
        assert!(diagram.contains("flowchart TD"));
        assert!(diagram.contains("alice[\"Alice\"]"));
        assert!(diagram.contains("alice --> bob"));
    }

    #[test]
    fn test_mermaid_marriage_is_dashed() {
        let mut tree = FamilyTree::new();
        tree.add_person("a".to_string(), Person::new("Ann"));
        tree.add_person("b".to_string(), Person::new("Ben"));
        tree.set_spouse("a", Some("b".to_string())).unwrap();

        let diagram = MermaidGenerator::generate_tree(&tree);
        assert!(diagram.contains("a -.- b"));
        assert!(!diagram.contains("-->"));
    }

    #[test]
    fn test_sanitize_id() {
        assert_eq!(MermaidGenerator::sanitize_id("some uuid-4"), "some_uuid_4");
        assert_eq!(MermaidGenerator::sanitize_id("abc123"), "abc123");
    }
}
