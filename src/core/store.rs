//! Family data file storage

use crate::core::models::FamilyTree;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Load a family tree from a JSON data file
///
/// The file holds a single object mapping person ids to person records.
/// Unknown fields on a record (such as a stored `level`) are ignored.
///
/// # Arguments
/// * `path` - Path to the family data JSON file
///
/// # Returns
/// A `FamilyTree` with every person record from the file
///
/// # Errors
/// Returns an error if the file cannot be read or does not contain a valid
/// family data map
pub fn load_family_file<P: AsRef<Path>>(path: P) -> Result<FamilyTree, Box<dyn Error>> {
    let path = path.as_ref();
    let content =
        fs::read_to_string(path).map_err(|e| format!("Cannot read '{}': {e}", path.display()))?;
    let tree: FamilyTree = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid family data in '{}': {e}", path.display()))?;
    Ok(tree)
}

/// Save a family tree to a JSON data file
///
/// Writes the id → person map pretty-printed, creating the parent directory
/// if needed.
///
/// # Arguments
/// * `path` - Path to the family data JSON file
/// * `tree` - The family tree to write
///
/// # Errors
/// Returns an error if the directory cannot be created or the file cannot
/// be written
pub fn save_family_file<P: AsRef<Path>>(path: P, tree: &FamilyTree) -> Result<(), Box<dyn Error>> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(tree)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a family tree, creating an empty data file when none exists
///
/// A missing file is a normal first run: an empty tree is written so later
/// saves have a file to update. A file that exists but cannot be parsed is
/// an error; it is never overwritten.
///
/// # Errors
/// Returns an error if an existing file cannot be read or parsed, or if
/// the empty file cannot be created
pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<FamilyTree, Box<dyn Error>> {
    let path = path.as_ref();
    if path.exists() {
        load_family_file(path)
    } else {
        let tree = FamilyTree::new();
        save_family_file(path, &tree)?;
        Ok(tree)
    }
}
