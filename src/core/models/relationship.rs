//! Relationship model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of relationships between two people
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipKind {
    /// Directed parent-to-child link
    #[serde(rename = "parent-of")]
    ParentOf,
    /// Current marriage (undirected, stored reciprocally)
    #[serde(rename = "married-to")]
    MarriedTo,
    /// Former marriage (undirected, stored reciprocally)
    #[serde(rename = "divorced-from")]
    DivorcedFrom,
}

impl RelationshipKind {
    /// Get the label used in graph output and data files
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ParentOf => "parent-of",
            Self::MarriedTo => "married-to",
            Self::DivorcedFrom => "divorced-from",
        }
    }

    /// Whether the relationship direction is meaningful
    ///
    /// Parent-child links point from parent to child. Marriage and divorce
    /// links connect a pair with no direction.
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        matches!(self, Self::ParentOf)
    }
}

impl FromStr for RelationshipKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "parent-of" | "parent" => Ok(Self::ParentOf),
            "married-to" | "married" | "spouse" => Ok(Self::MarriedTo),
            "divorced-from" | "divorced" => Ok(Self::DivorcedFrom),
            _ => Err(format!("Unknown relationship kind: {s}")),
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single relationship between two people, referenced by id
///
/// For undirected kinds the endpoints are stored in a canonical order so
/// each pair appears exactly once in relationship listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Source person id (the parent for parent-child links)
    pub from: String,
    /// Target person id (the child for parent-child links)
    pub to: String,
    /// Kind of relationship
    pub kind: RelationshipKind,
}

impl Relationship {
    /// Create a new relationship
    ///
    /// Undirected kinds have their endpoints swapped into ascending id order.
    #[must_use]
    pub fn new(from: String, to: String, kind: RelationshipKind) -> Self {
        if !kind.is_directed() && to < from {
            return Self {
                from: to,
                to: from,
                kind,
            };
        }
        Self { from, to, kind }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.from, self.kind, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!(
            "parent-of".parse::<RelationshipKind>().unwrap(),
            RelationshipKind::ParentOf
        );
        assert_eq!(
            "Married-To".parse::<RelationshipKind>().unwrap(),
            RelationshipKind::MarriedTo
        );
        assert_eq!(
            "divorced".parse::<RelationshipKind>().unwrap(),
            RelationshipKind::DivorcedFrom
        );
        assert!("sibling".parse::<RelationshipKind>().is_err());
    }

    #[test]
    fn test_kind_direction() {
        assert!(RelationshipKind::ParentOf.is_directed());
        assert!(!RelationshipKind::MarriedTo.is_directed());
        assert!(!RelationshipKind::DivorcedFrom.is_directed());
    }

    #[test]
    fn test_directed_endpoints_keep_order() {
        let rel = Relationship::new(
            "z".to_string(),
            "a".to_string(),
            RelationshipKind::ParentOf,
        );
        assert_eq!(rel.from, "z");
        assert_eq!(rel.to, "a");
    }

    #[test]
    fn test_undirected_endpoints_are_canonical() {
        let rel = Relationship::new(
            "z".to_string(),
            "a".to_string(),
            RelationshipKind::MarriedTo,
        );
        assert_eq!(rel.from, "a");
        assert_eq!(rel.to, "z");
    }

    #[test]
    fn test_display() {
        let rel = Relationship::new(
            "alice".to_string(),
            "bob".to_string(),
            RelationshipKind::ParentOf,
        );
        assert_eq!(rel.to_string(), "alice parent-of bob");
    }
}
