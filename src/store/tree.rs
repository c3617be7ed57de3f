//! Pure operations on the JSON data tree. Nulls and empty objects are never
//! stored: writing either removes the node, and parents left empty are pruned.

use serde_json::{Map, Value};

use super::error::StoreError;
use super::path::{is_valid_key, DbPath};

pub fn read(root: &Value, path: &DbPath) -> Value {
    let mut node = root;
    for segment in path.segments() {
        match node.get(segment) {
            Some(child) => node = child,
            None => return Value::Null,
        }
    }
    node.clone()
}

pub fn write(root: &mut Value, path: &DbPath, value: Value) {
    let value = prune(value);
    if path.is_root() {
        *root = match value {
            Value::Object(_) => value,
            _ => Value::Object(Map::new()),
        };
        return;
    }
    write_at(root, path.segments(), value);
}

/// Shallow merge of `fields` into the object at `path`. A null field deletes
/// that child.
pub fn merge(root: &mut Value, path: &DbPath, fields: Map<String, Value>) -> Result<(), StoreError> {
    match read(root, path) {
        Value::Null | Value::Object(_) => {}
        _ => return Err(StoreError::NotAnObject(path.to_string())),
    }
    if let Some(key) = fields.keys().find(|key| !is_valid_key(key)) {
        return Err(StoreError::InvalidPath(format!("{}/{}", path, key)));
    }

    for (key, value) in fields {
        let child = path.child(&key)?;
        write(root, &child, value);
    }
    Ok(())
}

fn write_at(node: &mut Value, segments: &[String], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };

    if !node.is_object() {
        if value.is_null() {
            return;
        }
        *node = Value::Object(Map::new());
    }
    let Value::Object(children) = node else {
        return;
    };

    if rest.is_empty() {
        if value.is_null() {
            children.remove(head);
        } else {
            children.insert(head.clone(), value);
        }
        return;
    }

    let emptied = {
        let child = children.entry(head.clone()).or_insert(Value::Null);
        write_at(child, rest, value);
        is_empty(child)
    };
    if emptied {
        children.remove(head);
    }
}

fn prune(value: Value) -> Value {
    match value {
        Value::Object(children) => {
            let kept: Map<String, Value> = children
                .into_iter()
                .map(|(key, child)| (key, prune(child)))
                .filter(|(_, child)| !child.is_null())
                .collect();
            if kept.is_empty() {
                Value::Null
            } else {
                Value::Object(kept)
            }
        }
        other => other,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(children) => children.is_empty(),
        _ => false,
    }
}
