//! Search over keys and leaf values
//!
//! Matching is a case-insensitive substring test. The tree view highlights
//! the paths returned by [`search`]; the table view shows the rows returned
//! by [`filter_rows`].

use super::{Path, PathSegment, Value};

/// Paths of every node whose key or leaf text contains `query`
///
/// Results are in depth-first document order. An empty query matches nothing.
pub fn search(value: &Value, query: &str) -> Vec<Path> {
    let needle = query.trim().to_lowercase();
    let mut hits = Vec::new();
    if needle.is_empty() {
        return hits;
    }
    walk(value, &mut Vec::new(), &needle, &mut hits);
    hits
}

fn walk(value: &Value, trail: &mut Vec<PathSegment>, needle: &str, hits: &mut Vec<Path>) {
    let key_hit = matches!(
        trail.last(),
        Some(PathSegment::Key(key)) if key.to_lowercase().contains(needle)
    );
    let leaf_hit = value
        .leaf_text()
        .is_some_and(|text| leaf_display(value, text).to_lowercase().contains(needle));
    if key_hit || leaf_hit {
        hits.push(Path(trail.clone()));
    }

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                trail.push(PathSegment::Key(key.clone()));
                walk(child, trail, needle, hits);
                trail.pop();
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                trail.push(PathSegment::Index(index));
                walk(child, trail, needle, hits);
                trail.pop();
            }
        }
        _ => {}
    }
}

// Null shows as "null" in the tree even though it is blank in a CSV cell
fn leaf_display(value: &Value, text: String) -> String {
    if value.is_null() {
        "null".to_string()
    } else {
        text
    }
}

/// Indexes of the rows of a tabular value that contain `query` in any field
///
/// Non-array values have no rows. An empty query keeps every row.
pub fn filter_rows(value: &Value, query: &str) -> Vec<usize> {
    let Some(rows) = value.as_array() else {
        return Vec::new();
    };
    let needle = query.trim().to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| needle.is_empty() || row_matches(row, &needle))
        .map(|(index, _)| index)
        .collect()
}

fn row_matches(row: &Value, needle: &str) -> bool {
    match row {
        Value::Object(map) => map.values().any(|cell| cell_matches(cell, needle)),
        other => cell_matches(other, needle),
    }
}

fn cell_matches(cell: &Value, needle: &str) -> bool {
    match cell.leaf_text() {
        Some(text) => leaf_display(cell, text).to_lowercase().contains(needle),
        None => serde_json::to_string(cell)
            .map(|json| json.to_lowercase().contains(needle))
            .unwrap_or(false),
    }
}
