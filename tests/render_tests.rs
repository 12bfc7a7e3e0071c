//! Integration tests for the generated HTML page and Markdown document

use kintree::core::generations::assign_levels;
use kintree::core::models::{FamilyTree, Person};
use kintree::core::view::{HtmlRenderer, MarkdownRenderer, PageRenderer, ViewContext};

fn parent_child_tree() -> FamilyTree {
    let mut tree = FamilyTree::new();
    tree.add_person("alice".to_string(), Person::new("Alice"));
    tree.add_person("bob".to_string(), Person::new("Bob"));
    tree.set_children("alice", vec!["bob".to_string()])
        .expect("Failed to set children");
    tree
}

fn render_html(tree: &FamilyTree, editable: bool) -> String {
    let graph = tree.build_graph();
    let levels = assign_levels(&graph).expect("Level assignment failed");
    let ctx = ViewContext::new(tree, &graph, &levels, "Test Tree");
    let renderer = if editable {
        HtmlRenderer::editable()
    } else {
        HtmlRenderer::new()
    };
    renderer.render(&ctx).expect("Failed to render page")
}

fn render_markdown(tree: &FamilyTree) -> String {
    let graph = tree.build_graph();
    let levels = assign_levels(&graph).expect("Level assignment failed");
    let ctx = ViewContext::new(tree, &graph, &levels, "Test Tree");
    MarkdownRenderer::new()
        .render(&ctx)
        .expect("Failed to render document")
}

#[test]
fn test_page_embeds_translated_graph() {
    let page = render_html(&parent_child_tree(), false);

    // The translated records are inlined as JSON
    assert!(page.contains("\"label\":\"Alice\""));
    assert!(page.contains("\"from\":\"alice\""));
    assert!(page.contains("\"to\":\"bob\""));
    assert!(page.contains("circularImage"));

    // Widget options travel with the page
    assert!(page.contains("\"direction\":\"UD\""));

    assert!(page.contains("<title>Test Tree</title>"));
    assert!(page.contains("vis-network"));
}

#[test]
fn test_served_page_includes_editor_panel() {
    let editable = render_html(&parent_child_tree(), true);
    let exported = render_html(&parent_child_tree(), false);

    assert!(editable.contains("id=\"person-form\""));
    assert!(!exported.contains("id=\"person-form\""));
}

#[test]
fn test_empty_tree_notice() {
    let tree = FamilyTree::new();

    let editable = render_html(&tree, true);
    assert!(editable.contains("Use the add form below"));

    let exported = render_html(&tree, false);
    assert!(exported.contains("The family tree is currently empty."));
    assert!(!exported.contains("Use the add form below"));
}

#[test]
fn test_error_page_lists_issues() {
    let issues = vec![
        "Person 'Bob': unknown parent id 'ghost'".to_string(),
        "Person 'Ann': marriage to 'Ben' is not reciprocal".to_string(),
    ];
    let page = HtmlRenderer::editable().render_error_page("Test Tree", &issues);

    assert!(page.contains("cannot be rendered until the input is corrected"));
    assert!(page.contains("unknown parent id 'ghost'"));
    assert!(page.contains("is not reciprocal"));

    // No graph data in place of the broken tree
    assert!(page.contains("new vis.DataSet([])"));
}

#[test]
fn test_markdown_document_structure() {
    let doc = render_markdown(&parent_child_tree());

    assert!(doc.starts_with("# Test Tree"));
    assert!(doc.contains("```mermaid"));
    assert!(doc.contains("alice --> bob"));
    assert!(doc.contains("| Name | Born | Died | Generation | Parents | Children |"));
    assert!(doc.contains("| Alice | - | - | 0 | - | Bob |"));
    assert!(doc.contains("| Bob | - | - | 1 | Alice | - |"));
}

#[test]
fn test_markdown_marriage_is_dashed() {
    let mut tree = parent_child_tree();
    tree.add_person("carol".to_string(), Person::new("Carol"));
    tree.set_spouse("alice", Some("carol".to_string()))
        .expect("Failed to set spouse");

    let doc = render_markdown(&tree);
    assert!(doc.contains("alice -.- carol"));
}
