//! TypeScript interface generation
//!
//! The value is first reduced to a [`Shape`]; array elements are merged so
//! that one interface describes every element, with keys that some elements
//! lack marked optional. Each object shape becomes an `export interface`,
//! named after the key that holds it.

use std::collections::HashSet;
use std::fmt::Write;

use indexmap::IndexMap;

use super::path::is_identifier;
use super::Value;

type Fields = IndexMap<String, Field>;

#[derive(Debug, Clone, PartialEq)]
enum Shape {
    /// No information, e.g. the elements of an empty array
    Unknown,
    Null,
    Boolean,
    Number,
    String,
    Array(Box<Shape>),
    Object(Fields),
    Union(Vec<Shape>),
}

#[derive(Debug, Clone, PartialEq)]
struct Field {
    shape: Shape,
    optional: bool,
}

fn infer(value: &Value) -> Shape {
    match value {
        Value::Null => Shape::Null,
        Value::Bool(_) => Shape::Boolean,
        Value::Number(_) => Shape::Number,
        Value::String(_) => Shape::String,
        Value::Array(items) => {
            let item = items.iter().map(infer).fold(Shape::Unknown, merge);
            Shape::Array(Box::new(item))
        }
        Value::Object(map) => Shape::Object(
            map.iter()
                .map(|(key, child)| {
                    let field = Field {
                        shape: infer(child),
                        optional: false,
                    };
                    (key.clone(), field)
                })
                .collect(),
        ),
    }
}

fn variants(shape: Shape) -> Vec<Shape> {
    match shape {
        Shape::Unknown => Vec::new(),
        Shape::Union(variants) => variants,
        other => vec![other],
    }
}

/// Least shape covering both; one variant per kind
fn merge(a: Shape, b: Shape) -> Shape {
    let mut merged = variants(a);
    for shape in variants(b) {
        let kind = std::mem::discriminant(&shape);
        match merged.iter().position(|v| std::mem::discriminant(v) == kind) {
            Some(idx) => {
                let existing = std::mem::replace(&mut merged[idx], Shape::Unknown);
                merged[idx] = combine(existing, shape);
            }
            None => merged.push(shape),
        }
    }
    match merged.len() {
        0 => Shape::Unknown,
        1 => merged.swap_remove(0),
        _ => Shape::Union(merged),
    }
}

/// Merge two shapes of the same kind
fn combine(a: Shape, b: Shape) -> Shape {
    match (a, b) {
        (Shape::Array(x), Shape::Array(y)) => Shape::Array(Box::new(merge(*x, *y))),
        (Shape::Object(x), Shape::Object(y)) => Shape::Object(merge_fields(x, y)),
        (a, _) => a,
    }
}

fn merge_fields(mut left: Fields, right: Fields) -> Fields {
    for (key, field) in left.iter_mut() {
        if !right.contains_key(key) {
            field.optional = true;
        }
    }
    for (key, field) in right {
        match left.get_mut(&key) {
            Some(existing) => {
                let shape = std::mem::replace(&mut existing.shape, Shape::Unknown);
                existing.shape = merge(shape, field.shape);
                existing.optional |= field.optional;
            }
            None => {
                left.insert(
                    key,
                    Field {
                        optional: true,
                        ..field
                    },
                );
            }
        }
    }
    left
}

/// `first name` → `FirstName`, `userId` → `UserId`
fn pascal_case(raw: &str) -> String {
    raw.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars
                .next()
                .map_or_else(String::new, |c| c.to_uppercase().chain(chars).collect())
        })
        .collect()
}

/// A usable type name for `raw`, or `fallback` when nothing usable remains
fn type_name(raw: &str, fallback: &str) -> String {
    let name = pascal_case(raw);
    if name.is_empty() {
        fallback.to_string()
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", name)
    } else {
        name
    }
}

fn property_name(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        serde_json::to_string(key).unwrap_or_else(|_| format!("{:?}", key))
    }
}

#[derive(Default)]
struct Emitter {
    /// Declarations in output order; slots are reserved before nested types
    blocks: Vec<String>,
    names: HashSet<String>,
}

impl Emitter {
    fn unique(&mut self, base: &str) -> String {
        let mut name = base.to_string();
        let mut n = 2;
        while !self.names.insert(name.clone()) {
            name = format!("{}{}", base, n);
            n += 1;
        }
        name
    }

    fn type_of(&mut self, shape: &Shape, hint: &str) -> String {
        match shape {
            Shape::Unknown => "unknown".to_string(),
            Shape::Null => "null".to_string(),
            Shape::Boolean => "boolean".to_string(),
            Shape::Number => "number".to_string(),
            Shape::String => "string".to_string(),
            Shape::Array(item) => {
                let inner = self.type_of(item, &format!("{}Item", hint));
                if matches!(**item, Shape::Union(_)) {
                    format!("({})[]", inner)
                } else {
                    format!("{}[]", inner)
                }
            }
            Shape::Object(fields) => self.interface(fields, hint),
            Shape::Union(variants) => variants
                .iter()
                .map(|v| self.type_of(v, hint))
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }

    fn interface(&mut self, fields: &Fields, hint: &str) -> String {
        let name = self.unique(hint);
        let slot = self.blocks.len();
        self.blocks.push(String::new());

        let mut body = format!("export interface {} {{", name);
        if fields.is_empty() {
            body.push('}');
        } else {
            body.push('\n');
            for (key, field) in fields {
                let ty = self.type_of(&field.shape, &type_name(key, "Field"));
                let optional = if field.optional { "?" } else { "" };
                let _ = writeln!(body, "  {}{}: {};", property_name(key), optional, ty);
            }
            body.push('}');
        }
        self.blocks[slot] = body;
        name
    }
}

/// TypeScript declarations describing `value`
///
/// `root` names the top-level type (typically the file stem); it is
/// converted to PascalCase and falls back to `Root`. Objects become
/// interfaces; any other root becomes a `type` alias.
pub fn typescript_interfaces(value: &Value, root: &str) -> String {
    let root = type_name(root, "Root");
    let mut emitter = Emitter::default();
    match infer(value) {
        Shape::Object(fields) => {
            emitter.interface(&fields, &root);
        }
        other => {
            let name = emitter.unique(&root);
            let slot = emitter.blocks.len();
            emitter.blocks.push(String::new());
            let ty = emitter.type_of(&other, &root);
            emitter.blocks[slot] = format!("export type {} = {};", name, ty);
        }
    }
    let mut out = emitter.blocks.join("\n\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_flat_object() {
        let value = json(r#"{"id":1,"name":"a","ok":true,"none":null}"#);
        assert_eq!(
            typescript_interfaces(&value, "user"),
            "export interface User {\n  id: number;\n  name: string;\n  \
             ok: boolean;\n  none: null;\n}\n"
        );
    }

    #[test]
    fn test_nested_objects_get_their_own_interface() {
        let value = json(r#"{"owner":{"first name":"Ann"},"tags":["a"]}"#);
        let ts = typescript_interfaces(&value, "data");
        assert_eq!(
            ts,
            "export interface Data {\n  owner: Owner;\n  tags: string[];\n}\n\n\
             export interface Owner {\n  \"first name\": string;\n}\n"
        );
    }

    #[test]
    fn test_array_elements_merge_with_optional_keys() {
        let value = json(r#"[{"id":1,"coupon":null},{"id":2,"coupon":"X","note":"n"}]"#);
        let ts = typescript_interfaces(&value, "orders");
        assert_eq!(
            ts,
            "export type Orders = OrdersItem[];\n\n\
             export interface OrdersItem {\n  id: number;\n  \
             coupon: null | string;\n  note?: string;\n}\n"
        );
    }

    #[test]
    fn test_mixed_and_empty_arrays() {
        let value = json(r#"{"mixed":[1,"a",2],"empty":[],"nested":[[1],[]]}"#);
        let ts = typescript_interfaces(&value, "");
        assert!(ts.starts_with("export interface Root {"));
        assert!(ts.contains("  mixed: (number | string)[];"));
        assert!(ts.contains("  empty: unknown[];"));
        assert!(ts.contains("  nested: number[][];"));
    }

    #[test]
    fn test_name_collisions_are_numbered() {
        let value = json(r#"{"a":{"item":{"x":1}},"b":{"item":{"y":2}}}"#);
        let ts = typescript_interfaces(&value, "doc");
        assert!(ts.contains("export interface Item {\n  x: number;\n}"));
        assert!(ts.contains("export interface Item2 {\n  y: number;\n}"));
        assert!(ts.contains("  item: Item2;"));
    }

    #[test]
    fn test_primitive_root_and_empty_object() {
        assert_eq!(typescript_interfaces(&Value::from(3), "n"), "export type N = number;\n");
        assert_eq!(
            typescript_interfaces(&Value::empty_object(), "9 lives"),
            "export interface _9Lives {}\n"
        );
    }
}
