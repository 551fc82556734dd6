// Dotted-path writer for nested decode results

use serde_json::{Map, Value};

/// Write @value at the dotted @path inside @root, creating intermediate objects
///
/// An intermediate key holding a non-object value is replaced by an object, and an existing
/// leaf is overwritten (last write wins).
pub fn set_at_path(root: &mut Map<String, Value>, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    set_segments(root, &segments, value);
}

fn set_segments(map: &mut Map<String, Value>, segments: &[&str], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        map.insert(head.to_string(), value);
        return;
    }

    let slot = map
        .entry(head.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(child) = &mut *slot {
        set_segments(child, rest, value);
    } else {
        let mut child = Map::new();
        set_segments(&mut child, rest, value);
        *slot = Value::Object(child);
    }
}

/// Read the value at the dotted @path, if every segment exists
pub fn get_at_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |node, segment| node.get(segment))
}
