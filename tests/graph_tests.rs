//! End-to-end tests for the registry-to-graph translation pipeline

use kintree::core::generations::assign_levels;
use kintree::core::models::{FamilyTree, Person, RelationshipKind};
use kintree::core::view::graph_data::{self, VisDataset};

/// Run the full pipeline the page uses: registry -> kinship graph ->
/// generation levels -> renderable dataset
fn render_dataset(tree: &FamilyTree) -> VisDataset {
    let graph = tree.build_graph();
    let levels = assign_levels(&graph).expect("Level assignment failed");
    graph_data::translate(tree, &levels)
}

fn named(name: &str) -> Person {
    Person::new(name)
}

#[test]
fn test_three_person_family_renders_three_nodes_one_edge() {
    let mut tree = FamilyTree::new();
    tree.add_person("alice".to_string(), named("Alice"));
    tree.add_person("bob".to_string(), named("Bob"));
    tree.add_person("carol".to_string(), named("Carol"));
    tree.set_children("alice", vec!["bob".to_string()])
        .expect("Failed to link parent and child");

    assert!(tree.validate().is_ok());
    let dataset = render_dataset(&tree);

    assert_eq!(dataset.nodes.len(), 3);
    assert_eq!(dataset.edges.len(), 1);

    let edge = &dataset.edges[0];
    assert_eq!(edge.from, "alice");
    assert_eq!(edge.to, "bob");
    assert!(!edge.dashes);

    // Carol stays in the picture as a node no edge touches
    assert!(dataset.nodes.iter().any(|n| n.id == "carol"));
    assert!(dataset
        .edges
        .iter()
        .all(|e| e.from != "carol" && e.to != "carol"));

    // The relationship listing names the link explicitly
    let relationships = tree.relationships();
    assert_eq!(relationships.len(), 1);
    assert_eq!(relationships[0].kind, RelationshipKind::ParentOf);
    assert_eq!(relationships[0].to_string(), "alice parent-of bob");
}

#[test]
fn test_translation_is_deterministic() {
    let mut tree = FamilyTree::new();
    tree.add_person("dana".to_string(), named("Dana"));
    tree.add_person("eli".to_string(), named("Eli"));
    tree.add_person("finn".to_string(), named("Finn"));
    tree.set_spouse("dana", Some("eli".to_string()))
        .expect("Failed to set spouse");
    tree.set_children("dana", vec!["finn".to_string()])
        .expect("Failed to set children");
    tree.set_children("eli", vec!["finn".to_string()])
        .expect("Failed to set children");

    assert_eq!(render_dataset(&tree), render_dataset(&tree));
}

#[test]
fn test_insertion_order_does_not_change_output() {
    let mut forward = FamilyTree::new();
    forward.add_person("alice".to_string(), named("Alice"));
    forward.add_person("bob".to_string(), named("Bob"));
    forward.set_children("alice", vec!["bob".to_string()])
        .expect("Failed to set children");

    let mut reversed = FamilyTree::new();
    reversed.add_person("bob".to_string(), named("Bob"));
    reversed.add_person("alice".to_string(), named("Alice"));
    reversed.set_children("alice", vec!["bob".to_string()])
        .expect("Failed to set children");

    assert_eq!(render_dataset(&forward), render_dataset(&reversed));
}

#[test]
fn test_every_edge_endpoint_resolves_to_a_node() {
    let mut tree = FamilyTree::new();
    tree.add_person("gran".to_string(), named("Gran"));
    tree.add_person("pa".to_string(), named("Pa"));
    tree.add_person("mum".to_string(), named("Mum"));
    tree.add_person("kid".to_string(), named("Kid"));
    tree.add_person("ex".to_string(), named("Ex"));
    tree.set_children("gran", vec!["pa".to_string()])
        .expect("Failed to set children");
    tree.set_spouse("pa", Some("mum".to_string()))
        .expect("Failed to set spouse");
    tree.set_former_spouse("pa", Some("ex".to_string()))
        .expect("Failed to set former spouse");
    tree.set_children("pa", vec!["kid".to_string()])
        .expect("Failed to set children");
    tree.set_children("mum", vec!["kid".to_string()])
        .expect("Failed to set children");

    assert!(tree.validate().is_ok());
    let dataset = render_dataset(&tree);

    let node_ids: Vec<&str> = dataset.nodes.iter().map(|n| n.id.as_str()).collect();
    for edge in &dataset.edges {
        assert!(
            node_ids.contains(&edge.from.as_str()),
            "edge source '{}' has no node",
            edge.from
        );
        assert!(
            node_ids.contains(&edge.to.as_str()),
            "edge target '{}' has no node",
            edge.to
        );
    }

    // Reciprocal marriage collapses to a single dashed edge
    let dashed: Vec<_> = dataset.edges.iter().filter(|e| e.dashes).collect();
    assert_eq!(dashed.len(), 1);

    // Divorce links never become edges
    assert!(dataset
        .edges
        .iter()
        .all(|e| e.from != "ex" && e.to != "ex"));
}

#[test]
fn test_unknown_parent_reference_is_a_validation_issue() {
    let mut tree = FamilyTree::new();
    tree.add_person("bob".to_string(), named("Bob"));
    tree.get_person_mut("bob")
        .expect("Bob should be present")
        .add_parent("ghost");

    let issues = tree.validate().expect_err("Dangling link should not validate");
    assert_eq!(issues.len(), 1);
    assert!(issues[0].contains("Person 'Bob'"));
    assert!(issues[0].contains("unknown parent id 'ghost'"));
}

#[test]
fn test_one_sided_link_is_a_validation_issue() {
    let mut tree = FamilyTree::new();
    tree.add_person("alice".to_string(), named("Alice"));
    tree.add_person("bob".to_string(), named("Bob"));
    tree.get_person_mut("alice")
        .expect("Alice should be present")
        .add_child("bob");

    let issues = tree.validate().expect_err("One-sided link should not validate");
    assert!(issues
        .iter()
        .any(|i| i.contains("child 'Bob' does not list them as a parent")));
}

#[test]
fn test_validation_collects_every_issue() {
    let mut tree = FamilyTree::new();
    tree.add_person("alice".to_string(), named("Alice"));
    let alice = tree.get_person_mut("alice").expect("Alice should be present");
    alice.add_parent("ghost");
    alice.married_to = Some("phantom".to_string());

    let issues = tree.validate().expect_err("Broken links should not validate");
    assert_eq!(issues.len(), 2);
    assert!(issues.iter().any(|i| i.contains("unknown parent id 'ghost'")));
    assert!(issues
        .iter()
        .any(|i| i.contains("unknown spouse id 'phantom'")));
}

#[test]
fn test_duplicate_id_is_rejected() {
    let mut tree = FamilyTree::new();
    assert!(tree.add_person("alice".to_string(), named("Alice")));
    assert!(!tree.add_person("alice".to_string(), named("Alicia")));

    // The original record wins
    assert_eq!(tree.len(), 1);
    let person = tree.get_person("alice").expect("Alice should be present");
    assert_eq!(person.display_name(), "Alice");
}

#[test]
fn test_nodes_carry_generation_levels() {
    let mut tree = FamilyTree::new();
    tree.add_person("gran".to_string(), named("Gran"));
    tree.add_person("pa".to_string(), named("Pa"));
    tree.add_person("kid".to_string(), named("Kid"));
    tree.set_children("gran", vec!["pa".to_string()])
        .expect("Failed to set children");
    tree.set_children("pa", vec!["kid".to_string()])
        .expect("Failed to set children");

    let dataset = render_dataset(&tree);
    let level_of = |id: &str| {
        dataset
            .nodes
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.level)
            .expect("node missing")
    };

    assert_eq!(level_of("gran"), 0);
    assert_eq!(level_of("pa"), 1);
    assert_eq!(level_of("kid"), 2);
}

#[test]
fn test_parent_cycle_blocks_level_assignment() {
    // Mirrored both ways, so the registry validates but the hierarchy
    // cannot be levelled
    let mut tree = FamilyTree::new();
    tree.add_person("alice".to_string(), named("Alice"));
    tree.add_person("bob".to_string(), named("Bob"));
    tree.set_children("alice", vec!["bob".to_string()])
        .expect("Failed to set children");
    tree.set_children("bob", vec!["alice".to_string()])
        .expect("Failed to set children");

    assert!(tree.validate().is_ok());

    let graph = tree.build_graph();
    let err = assign_levels(&graph).expect_err("Cycle should not level");
    assert!(err.contains("Cycle detected in parent-child links"));
}

#[test]
fn test_empty_tree_renders_empty_dataset() {
    let tree = FamilyTree::new();
    let dataset = render_dataset(&tree);
    assert!(dataset.nodes.is_empty());
    assert!(dataset.edges.is_empty());
}
