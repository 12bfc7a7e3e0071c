//! Generation level assignment for the hierarchical layout

use crate::core::models::KinGraph;
use std::collections::{HashMap, VecDeque};

/// Generation level for each person id, with 0 at the oldest generation
pub type GenerationLevels = HashMap<String, i32>;

/// Starting level for the oldest generation before normalization
const BASE_LEVEL: i32 = 2;

/// Assign a generation level to every person in the graph
///
/// Levels drive vertical placement in the hierarchical layout: parents sit
/// one level above their children. People with no recorded parents seed the
/// traversal at the base level, which then spreads down through children
/// (level + 1) and up through parents (level - 1). When several paths reach
/// the same person, a child keeps the smallest proposed level and a parent
/// the largest. Anyone untouched by the traversal gets the base level, and
/// the result is shifted so the minimum level is zero.
///
/// # Errors
/// Returns an error if the parent-child links contain a cycle.
pub fn assign_levels(graph: &KinGraph) -> Result<GenerationLevels, String> {
    if graph.people.is_empty() {
        return Ok(HashMap::new());
    }

    check_acyclic(graph)?;

    let mut levels: HashMap<String, Option<i32>> = graph
        .people
        .iter()
        .map(|id| (id.clone(), None))
        .collect();
    let mut queue: VecDeque<String> = VecDeque::new();

    for person_id in graph.roots() {
        levels.insert(person_id.clone(), Some(BASE_LEVEL));
        queue.push_back(person_id.clone());
    }

    while let Some(current) = queue.pop_front() {
        let current_level = match levels.get(&current) {
            Some(Some(level)) => *level,
            _ => continue,
        };

        if let Some(kids) = graph.children.get(&current) {
            for child_id in kids {
                if let Some(slot) = levels.get_mut(child_id) {
                    if let Some(existing) = slot {
                        *existing = (*existing).min(current_level + 1);
                    } else {
                        *slot = Some(current_level + 1);
                        queue.push_back(child_id.clone());
                    }
                }
            }
        }

        if let Some(folks) = graph.parents.get(&current) {
            for parent_id in folks {
                if let Some(slot) = levels.get_mut(parent_id) {
                    if let Some(existing) = slot {
                        *existing = (*existing).max(current_level - 1);
                    } else {
                        *slot = Some(current_level - 1);
                        queue.push_back(parent_id.clone());
                    }
                }
            }
        }
    }

    // Anyone the traversal never reached keeps the base level
    let mut resolved: GenerationLevels = levels
        .into_iter()
        .map(|(id, level)| (id, level.unwrap_or(BASE_LEVEL)))
        .collect();

    // Shift so the oldest generation sits at level zero
    if let Some(min_level) = resolved.values().copied().min() {
        for level in resolved.values_mut() {
            *level -= min_level;
        }
    }

    Ok(resolved)
}

/// Verify the parent-child links form a DAG using Kahn's algorithm
fn check_acyclic(graph: &KinGraph) -> Result<(), String> {
    let mut indegree: HashMap<String, usize> = graph
        .people
        .iter()
        .map(|id| (id.clone(), graph.parents.get(id).map_or(0, Vec::len)))
        .collect();

    let mut queue: VecDeque<String> = graph
        .people
        .iter()
        .filter(|id| indegree.get(*id).copied().unwrap_or(0) == 0)
        .cloned()
        .collect();

    let mut visited = 0_usize;

    while let Some(person_id) = queue.pop_front() {
        visited += 1;

        if let Some(kids) = graph.children.get(&person_id) {
            for child_id in kids {
                if let Some(entry) = indegree.get_mut(child_id) {
                    if *entry > 0 {
                        *entry -= 1;
                    }
                    if *entry == 0 {
                        queue.push_back(child_id.clone());
                    }
                }
            }
        }
    }

    if visited != graph.people.len() {
        return Err(
            "Cycle detected in parent-child links; generation levels cannot be assigned"
                .to_string(),
        );
    }

    Ok(())
}
