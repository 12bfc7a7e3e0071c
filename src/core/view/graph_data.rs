//! Graph dataset translation for the interactive family tree view
//!
//! Translates a family tree into the node and edge records consumed by the
//! vis-network widget. Translation is pure and deterministic: the same tree
//! always produces the same dataset, record for record, in the same order.

use crate::core::generations::GenerationLevels;
use crate::core::models::{FamilyTree, Person, RelationshipKind};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt::Write;

/// Node shape understood by vis-network
const NODE_SHAPE: &str = "circularImage";
/// Node diameter in pixels
const NODE_SIZE: u32 = 55;
/// Colour of parent-child edges
const PARENT_EDGE_COLOR: &str = "#999999";
/// Stroke width of parent-child edges
const PARENT_EDGE_WIDTH: f32 = 1.7;
/// Colour of marriage edges
const SPOUSE_EDGE_COLOR: &str = "#bbbbbb";
/// Stroke width of marriage edges
const SPOUSE_EDGE_WIDTH: f32 = 2.0;

/// A single node in the rendered network
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisNode {
    /// Stable person id
    pub id: String,
    /// Display name shown under the node
    pub label: String,
    /// Hover tooltip with the person's profile details
    pub title: String,
    /// Generation level controlling vertical placement
    pub level: i32,
    /// Node shape
    pub shape: &'static str,
    /// Avatar image URL
    pub image: String,
    /// Node diameter in pixels
    pub size: u32,
}

/// A single edge in the rendered network
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisEdge {
    /// Source person id
    pub from: String,
    /// Target person id
    pub to: String,
    /// Edge colour
    pub color: &'static str,
    /// Stroke width
    pub width: f32,
    /// Whether the edge is drawn dashed
    pub dashes: bool,
}

/// Complete dataset consumed by the vis-network widget
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisDataset {
    /// Node records in display-name order
    pub nodes: Vec<VisNode>,
    /// Edge records, parent links before marriage links
    pub edges: Vec<VisEdge>,
}

/// Translate a family tree into a renderable dataset
///
/// Every person becomes a node, ordered by display name with ties broken by
/// id. Parent-child links become solid edges and reciprocal marriages become
/// dashed edges, each drawn once. Divorce links are tracked in the data but
/// never drawn. Links that point at ids missing from the tree are skipped.
#[must_use]
pub fn translate(tree: &FamilyTree, levels: &GenerationLevels) -> VisDataset {
    let mut dataset = VisDataset::default();

    for id in tree.sorted_ids() {
        let Some(person) = tree.get_person(&id) else {
            continue;
        };
        let level = levels.get(&id).copied().unwrap_or(0);
        dataset.nodes.push(VisNode {
            id: id.clone(),
            label: person.display_name(),
            title: tooltip(tree, person),
            level,
            shape: NODE_SHAPE,
            image: person.avatar().to_string(),
            size: NODE_SIZE,
        });
    }

    for relationship in tree.relationships() {
        match relationship.kind {
            RelationshipKind::ParentOf => dataset.edges.push(VisEdge {
                from: relationship.from,
                to: relationship.to,
                color: PARENT_EDGE_COLOR,
                width: PARENT_EDGE_WIDTH,
                dashes: false,
            }),
            RelationshipKind::MarriedTo => dataset.edges.push(VisEdge {
                from: relationship.from,
                to: relationship.to,
                color: SPOUSE_EDGE_COLOR,
                width: SPOUSE_EDGE_WIDTH,
                dashes: true,
            }),
            RelationshipKind::DivorcedFrom => {}
        }
    }

    dataset
}

/// Fixed vis-network options for the hierarchical family layout
///
/// The layout runs top-down with physics disabled, so vertical placement
/// follows generation levels exactly.
#[must_use]
pub fn widget_options() -> Value {
    json!({
        "layout": {
            "hierarchical": {
                "enabled": true,
                "levelSeparation": 150,
                "nodeSpacing": 120,
                "treeSpacing": 220,
                "direction": "UD",
                "sortMethod": "directed"
            }
        },
        "physics": { "enabled": false },
        "nodes": {
            "font": { "size": 14, "color": "#333333" },
            "color": {
                "border": "#666666",
                "background": "#ffffff",
                "highlight": { "border": "#0057b7", "background": "#cce5ff" },
                "hover": { "border": "#003d80", "background": "#99ccff" }
            }
        },
        "edges": {
            "color": { "inherit": "from" },
            "smooth": { "enabled": true, "type": "cubicBezier", "roundness": 0.6 },
            "arrows": { "to": { "enabled": false } }
        },
        "interaction": { "hover": true }
    })
}

/// Build the multi-line hover tooltip for a person's node
fn tooltip(tree: &FamilyTree, person: &Person) -> String {
    let spouse_name = person
        .spouse()
        .and_then(|id| tree.get_person(id))
        .map_or_else(|| String::from("N/A"), Person::display_name);
    let former_name = person
        .former_spouse()
        .and_then(|id| tree.get_person(id))
        .map_or_else(|| String::from("N/A"), Person::display_name);
    let born = person
        .dob
        .map_or_else(|| String::from("N/A"), |d| d.to_string());
    let died = person
        .dod
        .map_or_else(|| String::from("N/A"), |d| d.to_string());

    let mut text = String::new();
    let _ = writeln!(text, "Full Name: {}", person.display_name());
    let _ = writeln!(text, "Given Name: {}", person.given().unwrap_or("N/A"));
    let _ = writeln!(text, "Family Name: {}", person.family().unwrap_or("N/A"));
    let _ = writeln!(text, "Maiden Name: {}", person.maiden().unwrap_or("N/A"));
    let _ = writeln!(text, "Other Names: {}", person.other().unwrap_or("N/A"));
    let _ = writeln!(text, "Nickname: {}", person.nick().unwrap_or("N/A"));
    let _ = writeln!(text, "Born: {born}");
    let _ = writeln!(text, "Died: {died}");
    let _ = writeln!(text, "Married To: {spouse_name}");
    let _ = write!(text, "Divorced From: {former_name}");
    text
}
