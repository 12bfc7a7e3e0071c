//! Kinship graph derived from the family registry

use std::collections::HashMap;

/// Represents the kinship structure of a family as adjacency lists
///
/// The graph uses two association lists for the parent-child hierarchy:
/// - `children`: maps each person to the people they are a parent of
/// - `parents`: maps each person to their parents (reverse graph)
///
/// plus a list of `couples` for the undirected marriage links. The
/// bidirectional parent-child structure enables traversal both down and up
/// the generations.
#[derive(Debug, Clone)]
pub struct KinGraph {
    /// Maps person id -> ids of their children
    pub children: HashMap<String, Vec<String>>,

    /// Maps person id -> ids of their parents
    pub parents: HashMap<String, Vec<String>>,

    /// Married pairs in canonical (ascending id) order
    pub couples: Vec<(String, String)>,

    /// All person ids in the graph, in insertion order
    pub people: Vec<String>,
}

impl KinGraph {
    /// Create a new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self {
            children: HashMap::new(),
            parents: HashMap::new(),
            couples: Vec::new(),
            people: Vec::new(),
        }
    }

    /// Add a person to the graph
    ///
    /// # Arguments
    /// * `person_id` - The unique person id
    pub fn add_person(&mut self, person_id: String) {
        if !self.people.contains(&person_id) {
            self.people.push(person_id.clone());
            self.children.entry(person_id.clone()).or_default();
            self.parents.entry(person_id).or_default();
        }
    }

    /// Add a parent-child link
    ///
    /// # Arguments
    /// * `parent_id` - The parent
    /// * `child_id` - The child
    pub fn add_parent_child(&mut self, parent_id: String, child_id: &str) {
        // Ensure both people exist in the graph
        self.add_person(parent_id.clone());
        self.add_person(child_id.to_string());

        // Add to children (parent -> child)
        if let Some(kids) = self.children.get_mut(&parent_id) {
            if !kids.contains(&child_id.to_string()) {
                kids.push(child_id.to_string());
            }
        }

        // Add to parents (child -> parent)
        if let Some(folks) = self.parents.get_mut(child_id) {
            if !folks.contains(&parent_id) {
                folks.push(parent_id);
            }
        }
    }

    /// Add a married couple
    ///
    /// The pair is stored in ascending id order and duplicates are ignored,
    /// so reciprocal links produce a single couple.
    pub fn add_couple(&mut self, a: String, b: String) {
        self.add_person(a.clone());
        self.add_person(b.clone());

        let pair = if a <= b { (a, b) } else { (b, a) };
        if !self.couples.contains(&pair) {
            self.couples.push(pair);
        }
    }

    /// Get the children of a person
    ///
    /// # Returns
    /// A reference to the list of child ids, or None if the person is not in the graph
    #[must_use]
    pub fn get_children(&self, person_id: &str) -> Option<&Vec<String>> {
        self.children.get(person_id)
    }

    /// Get the parents of a person
    ///
    /// # Returns
    /// A reference to the list of parent ids, or None if the person is not in the graph
    #[must_use]
    pub fn get_parents(&self, person_id: &str) -> Option<&Vec<String>> {
        self.parents.get(person_id)
    }

    /// Get the people with no parents in the graph
    ///
    /// These are the oldest known generation and seed the level assignment.
    #[must_use]
    pub fn roots(&self) -> Vec<&String> {
        self.people
            .iter()
            .filter(|p| self.parents.get(*p).map_or(true, Vec::is_empty))
            .collect()
    }

    /// Get the number of people in the graph
    #[must_use]
    pub const fn person_count(&self) -> usize {
        self.people.len()
    }

    /// Check if a person exists in the graph
    #[must_use]
    pub fn contains_person(&self, person_id: &str) -> bool {
        self.people.contains(&person_id.to_string())
    }
}

impl Default for KinGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for KinGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Kinship graph ({} people, {} couples):",
            self.people.len(),
            self.couples.len()
        )?;
        writeln!(f)?;

        // Sort people for consistent output
        let mut sorted_people = self.people.clone();
        sorted_people.sort();

        for person_id in sorted_people {
            if let Some(kids) = self.children.get(&person_id) {
                if kids.is_empty() {
                    writeln!(f, "  {person_id} → (no children)")?;
                } else {
                    let kids_str = kids.join(", ");
                    writeln!(f, "  {person_id} → {kids_str}")?;
                }
            }
        }

        Ok(())
    }
}
