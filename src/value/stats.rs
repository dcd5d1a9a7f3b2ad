//! Tree statistics shown in the status bar

use serde::Serialize;

use super::Value;

/// Node counts and depth of a value tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_nodes: usize,
    /// Depth of the deepest node; the root is at depth 0
    pub max_depth: usize,
    pub object_count: usize,
    pub array_count: usize,
    pub primitive_count: usize,
}

/// Count nodes by kind in a single traversal
pub fn compute_stats(value: &Value) -> Stats {
    let mut stats = Stats::default();
    visit(value, 0, &mut stats);
    stats
}

fn visit(value: &Value, depth: usize, stats: &mut Stats) {
    stats.total_nodes += 1;
    stats.max_depth = stats.max_depth.max(depth);
    match value {
        Value::Object(map) => {
            stats.object_count += 1;
            for child in map.values() {
                visit(child, depth + 1, stats);
            }
        }
        Value::Array(items) => {
            stats.array_count += 1;
            for child in items {
                visit(child, depth + 1, stats);
            }
        }
        _ => stats.primitive_count += 1,
    }
}
