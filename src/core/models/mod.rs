//! Data models for `kintree`

pub mod graph;
pub mod person;
pub mod relationship;
pub mod tree;

pub use graph::KinGraph;
pub use person::{Gender, Person};
pub use relationship::{Relationship, RelationshipKind};
pub use tree::FamilyTree;
