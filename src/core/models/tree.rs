//! Family tree registry

use super::{KinGraph, Person, Relationship, RelationshipKind};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Represents a family: people keyed by id, with relationship links stored
/// on each person's record
///
/// Serializes transparently as a bare id → person map, which is the layout
/// of family data files. Mutations that touch links go through the setter
/// methods so reciprocal links stay consistent: a parent's `children` list
/// mirrors the child's `parents` list, and marriage/divorce links point
/// both ways.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FamilyTree {
    people: HashMap<String, Person>,
}

impl FamilyTree {
    /// Create a new empty family tree
    #[must_use]
    pub fn new() -> Self {
        Self {
            people: HashMap::new(),
        }
    }

    /// Create a family tree from an existing id → person map
    #[must_use]
    pub fn from_people(people: HashMap<String, Person>) -> Self {
        Self { people }
    }

    /// Add a person under a new id
    ///
    /// # Returns
    /// `true` if the person was added, `false` if the id is already taken
    /// (the existing record is left untouched)
    pub fn add_person(&mut self, id: String, person: Person) -> bool {
        match self.people.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(person);
                true
            }
        }
    }

    /// Get a person by id
    #[must_use]
    pub fn get_person(&self, person_id: &str) -> Option<&Person> {
        self.people.get(person_id)
    }

    /// Get a mutable reference to a person by id
    pub fn get_person_mut(&mut self, person_id: &str) -> Option<&mut Person> {
        self.people.get_mut(person_id)
    }

    /// Check if a person exists
    #[must_use]
    pub fn contains(&self, person_id: &str) -> bool {
        self.people.contains_key(person_id)
    }

    /// Get the number of people in the tree
    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Check whether the tree has no people
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Iterate over all (id, person) pairs in arbitrary order
    pub fn people(&self) -> impl Iterator<Item = (&String, &Person)> {
        self.people.iter()
    }

    /// Get every person id ordered by (display name, id)
    ///
    /// This ordering drives all graph output, so repeated translations of
    /// the same tree produce identical results.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<String> {
        let mut keyed: Vec<(String, String)> = self
            .people
            .iter()
            .map(|(id, person)| (person.display_name(), id.clone()))
            .collect();
        keyed.sort();
        keyed.into_iter().map(|(_, id)| id).collect()
    }

    /// Remove a person and every link referencing them
    ///
    /// Other people lose the removed id from their `parents` and `children`
    /// lists, and marriage/divorce links pointing at the removed person are
    /// cleared.
    ///
    /// # Returns
    /// The removed person, or `None` if the id was unknown
    pub fn remove_person(&mut self, person_id: &str) -> Option<Person> {
        let removed = self.people.remove(person_id)?;

        for person in self.people.values_mut() {
            person.remove_child(person_id);
            person.remove_parent(person_id);
            if person.married_to.as_deref() == Some(person_id) {
                person.married_to = None;
            }
            if person.divorced_from.as_deref() == Some(person_id) {
                person.divorced_from = None;
            }
        }

        Some(removed)
    }

    /// Set (or clear) a person's spouse, keeping the link reciprocal
    ///
    /// The old spouse's back-link is cleared if it still points here, and
    /// the new spouse's link is pointed back at this person.
    ///
    /// # Errors
    /// Returns an error if either id is unknown or the person would be
    /// married to themselves.
    pub fn set_spouse(&mut self, person_id: &str, spouse: Option<String>) -> Result<(), String> {
        let spouse = spouse.filter(|s| !s.is_empty());
        if !self.contains(person_id) {
            return Err(format!("Unknown person id '{person_id}'"));
        }
        if let Some(spouse_id) = &spouse {
            if spouse_id == person_id {
                return Err("A person cannot be married to themselves".to_string());
            }
            if !self.contains(spouse_id) {
                return Err(format!("Unknown person id '{spouse_id}'"));
            }
        }

        let old = self
            .people
            .get(person_id)
            .and_then(|p| p.spouse().map(String::from));
        if let Some(old_id) = old {
            if let Some(former) = self.people.get_mut(&old_id) {
                if former.spouse() == Some(person_id) {
                    former.married_to = None;
                }
            }
        }

        if let Some(spouse_id) = spouse {
            if let Some(partner) = self.people.get_mut(&spouse_id) {
                partner.married_to = Some(person_id.to_string());
            }
            if let Some(person) = self.people.get_mut(person_id) {
                person.married_to = Some(spouse_id);
            }
        } else if let Some(person) = self.people.get_mut(person_id) {
            person.married_to = None;
        }

        Ok(())
    }

    /// Set (or clear) a person's former spouse, keeping the link reciprocal
    ///
    /// # Errors
    /// Returns an error if either id is unknown or the person would be
    /// divorced from themselves.
    pub fn set_former_spouse(
        &mut self,
        person_id: &str,
        former: Option<String>,
    ) -> Result<(), String> {
        let former = former.filter(|s| !s.is_empty());
        if !self.contains(person_id) {
            return Err(format!("Unknown person id '{person_id}'"));
        }
        if let Some(former_id) = &former {
            if former_id == person_id {
                return Err("A person cannot be divorced from themselves".to_string());
            }
            if !self.contains(former_id) {
                return Err(format!("Unknown person id '{former_id}'"));
            }
        }

        let old = self
            .people
            .get(person_id)
            .and_then(|p| p.former_spouse().map(String::from));
        if let Some(old_id) = old {
            if let Some(previous) = self.people.get_mut(&old_id) {
                if previous.former_spouse() == Some(person_id) {
                    previous.divorced_from = None;
                }
            }
        }

        if let Some(former_id) = former {
            if let Some(partner) = self.people.get_mut(&former_id) {
                partner.divorced_from = Some(person_id.to_string());
            }
            if let Some(person) = self.people.get_mut(person_id) {
                person.divorced_from = Some(former_id);
            }
        } else if let Some(person) = self.people.get_mut(person_id) {
            person.divorced_from = None;
        }

        Ok(())
    }

    /// Replace a person's parents, updating the parents' `children` lists
    ///
    /// Dropped parents lose this person from their `children` list and new
    /// parents gain them.
    ///
    /// # Errors
    /// Returns an error if any id is unknown or the person would be their
    /// own parent.
    pub fn set_parents(&mut self, person_id: &str, parents: Vec<String>) -> Result<(), String> {
        if !self.contains(person_id) {
            return Err(format!("Unknown person id '{person_id}'"));
        }
        for parent_id in &parents {
            if parent_id == person_id {
                return Err("A person cannot be their own parent".to_string());
            }
            if !self.contains(parent_id) {
                return Err(format!("Unknown person id '{parent_id}'"));
            }
        }

        let old = self
            .people
            .get(person_id)
            .map(|p| p.parents.clone())
            .unwrap_or_default();

        for parent_id in &old {
            if !parents.contains(parent_id) {
                if let Some(parent) = self.people.get_mut(parent_id) {
                    parent.remove_child(person_id);
                }
            }
        }
        for parent_id in &parents {
            if !old.contains(parent_id) {
                if let Some(parent) = self.people.get_mut(parent_id) {
                    parent.add_child(person_id);
                }
            }
        }

        if let Some(person) = self.people.get_mut(person_id) {
            person.parents = dedup(parents);
        }

        Ok(())
    }

    /// Replace a person's children, updating the children's `parents` lists
    ///
    /// # Errors
    /// Returns an error if any id is unknown or the person would be their
    /// own child.
    pub fn set_children(&mut self, person_id: &str, children: Vec<String>) -> Result<(), String> {
        if !self.contains(person_id) {
            return Err(format!("Unknown person id '{person_id}'"));
        }
        for child_id in &children {
            if child_id == person_id {
                return Err("A person cannot be their own child".to_string());
            }
            if !self.contains(child_id) {
                return Err(format!("Unknown person id '{child_id}'"));
            }
        }

        let old = self
            .people
            .get(person_id)
            .map(|p| p.children.clone())
            .unwrap_or_default();

        for child_id in &old {
            if !children.contains(child_id) {
                if let Some(child) = self.people.get_mut(child_id) {
                    child.remove_parent(person_id);
                }
            }
        }
        for child_id in &children {
            if !old.contains(child_id) {
                if let Some(child) = self.people.get_mut(child_id) {
                    child.add_parent(person_id);
                }
            }
        }

        if let Some(person) = self.people.get_mut(person_id) {
            person.children = dedup(children);
        }

        Ok(())
    }

    /// Validate every relationship link in the tree
    ///
    /// Checks that every referenced id exists, that nobody is linked to
    /// themselves, that parent/child lists mirror each other, and that
    /// marriage and divorce links are reciprocal. All problems are
    /// collected so they can be corrected in one pass.
    ///
    /// # Returns
    /// `Ok(())` if the tree is consistent, `Err(Vec<String>)` with one
    /// message per problem otherwise
    ///
    /// # Errors
    /// Returns `Err` with a list of messages describing every broken link
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut issues = Vec::new();

        for id in self.sorted_ids() {
            let Some(person) = self.people.get(&id) else {
                continue;
            };
            let name = person.display_name();

            for parent_id in &person.parents {
                if parent_id == &id {
                    issues.push(format!("Person '{name}': listed as their own parent"));
                } else if let Some(parent) = self.people.get(parent_id) {
                    if !parent.children.contains(&id) {
                        issues.push(format!(
                            "Person '{name}': parent '{}' does not list them as a child",
                            parent.display_name()
                        ));
                    }
                } else {
                    issues.push(format!("Person '{name}': unknown parent id '{parent_id}'"));
                }
            }

            for child_id in &person.children {
                if child_id == &id {
                    issues.push(format!("Person '{name}': listed as their own child"));
                } else if let Some(child) = self.people.get(child_id) {
                    if !child.parents.contains(&id) {
                        issues.push(format!(
                            "Person '{name}': child '{}' does not list them as a parent",
                            child.display_name()
                        ));
                    }
                } else {
                    issues.push(format!("Person '{name}': unknown child id '{child_id}'"));
                }
            }

            if let Some(spouse_id) = person.spouse() {
                if spouse_id == id {
                    issues.push(format!("Person '{name}': married to themselves"));
                } else if let Some(partner) = self.people.get(spouse_id) {
                    if partner.spouse() != Some(id.as_str()) {
                        issues.push(format!(
                            "Person '{name}': marriage to '{}' is not reciprocal",
                            partner.display_name()
                        ));
                    }
                } else {
                    issues.push(format!("Person '{name}': unknown spouse id '{spouse_id}'"));
                }
            }

            if let Some(former_id) = person.former_spouse() {
                if former_id == id {
                    issues.push(format!("Person '{name}': divorced from themselves"));
                } else if let Some(previous) = self.people.get(former_id) {
                    if previous.former_spouse() != Some(id.as_str()) {
                        issues.push(format!(
                            "Person '{name}': divorce from '{}' is not reciprocal",
                            previous.display_name()
                        ));
                    }
                } else {
                    issues.push(format!(
                        "Person '{name}': unknown former spouse id '{former_id}'"
                    ));
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    /// Enumerate every relationship in the tree in a stable order
    ///
    /// Parent-child links come first (one per parent → child pairing),
    /// followed by marriages and divorces. Undirected pairs appear once in
    /// canonical order and only when the link is reciprocal. Links to
    /// unknown ids are skipped; run [`validate`](Self::validate) to surface
    /// those.
    #[must_use]
    pub fn relationships(&self) -> Vec<Relationship> {
        let ordered = self.sorted_ids();
        let mut rels = Vec::new();

        for id in &ordered {
            if let Some(person) = self.people.get(id) {
                for child_id in &person.children {
                    if self.people.contains_key(child_id) {
                        rels.push(Relationship::new(
                            id.clone(),
                            child_id.clone(),
                            RelationshipKind::ParentOf,
                        ));
                    }
                }
            }
        }

        let mut seen: HashSet<(String, String)> = HashSet::new();
        for id in &ordered {
            if let Some(spouse_id) = self.reciprocal_spouse(id) {
                let rel = Relationship::new(id.clone(), spouse_id, RelationshipKind::MarriedTo);
                if seen.insert((rel.from.clone(), rel.to.clone())) {
                    rels.push(rel);
                }
            }
        }

        let mut seen: HashSet<(String, String)> = HashSet::new();
        for id in &ordered {
            if let Some(former_id) = self.reciprocal_former_spouse(id) {
                let rel = Relationship::new(id.clone(), former_id, RelationshipKind::DivorcedFrom);
                if seen.insert((rel.from.clone(), rel.to.clone())) {
                    rels.push(rel);
                }
            }
        }

        rels
    }

    /// Build the kinship graph from the registry
    ///
    /// People are added in display order, then parent-child links and
    /// reciprocal marriages. Links to ids with no record are skipped, the
    /// same as in [`relationships`](Self::relationships).
    #[must_use]
    pub fn build_graph(&self) -> KinGraph {
        let mut graph = KinGraph::new();
        let ordered = self.sorted_ids();

        for id in &ordered {
            graph.add_person(id.clone());
        }

        for id in &ordered {
            if let Some(person) = self.people.get(id) {
                for child_id in &person.children {
                    if self.people.contains_key(child_id) {
                        graph.add_parent_child(id.clone(), child_id);
                    }
                }
            }
            if let Some(spouse_id) = self.reciprocal_spouse(id) {
                graph.add_couple(id.clone(), spouse_id);
            }
        }

        graph
    }

    /// Get the spouse id if the marriage link is present and reciprocal
    fn reciprocal_spouse(&self, person_id: &str) -> Option<String> {
        let spouse_id = self.people.get(person_id)?.spouse()?;
        let partner = self.people.get(spouse_id)?;
        if partner.spouse() == Some(person_id) {
            Some(spouse_id.to_string())
        } else {
            None
        }
    }

    /// Get the former spouse id if the divorce link is present and reciprocal
    fn reciprocal_former_spouse(&self, person_id: &str) -> Option<String> {
        let former_id = self.people.get(person_id)?.former_spouse()?;
        let previous = self.people.get(former_id)?;
        if previous.former_spouse() == Some(person_id) {
            Some(former_id.to_string())
        } else {
            None
        }
    }
}

/// Drop repeated ids while preserving order
fn dedup(ids: Vec<String>) -> Vec<String> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}
