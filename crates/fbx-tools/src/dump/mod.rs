//! JSON view of a decoded document.
//!
//! Nodes keep their field order (`name`, `properties`, `children`) and absent
//! lists are left out, so the output reads like the tree the decoder built.

use fbx_binary::{Document, Long, Node, Property};
use serde_json::{json, Map, Value};

/// Converts a document to a JSON value: `{ "version", "children" }`.
pub fn document_to_json(doc: &Document) -> Value {
    json!({
        "version": doc.version,
        "children": doc.children.iter().map(node_to_json).collect::<Vec<_>>(),
    })
}

/// Serializes `doc` to a JSON string, indented when `pretty` is set.
pub fn dump_json(doc: &Document, pretty: bool) -> String {
    let value = document_to_json(doc);
    let out = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    };
    // Serializing a `Value` only fails for non-string map keys.
    out.unwrap_or_default()
}

fn node_to_json(node: &Node) -> Value {
    let mut obj = Map::new();
    obj.insert(
        "name".into(),
        Value::String(String::from_utf8_lossy(&node.name).into_owned()),
    );
    if let Some(properties) = &node.properties {
        obj.insert(
            "properties".into(),
            properties.iter().map(property_to_json).collect(),
        );
    }
    if let Some(children) = &node.children {
        obj.insert("children".into(), children.iter().map(node_to_json).collect());
    }
    Value::Object(obj)
}

fn property_to_json(prop: &Property) -> Value {
    let tag = (prop.tag() as char).to_string();
    match prop {
        Property::Short(v) => json!({ "type": tag, "value": v }),
        Property::Bool(v) => json!({ "type": tag, "value": v }),
        Property::Int(v) => json!({ "type": tag, "value": v }),
        Property::Float(v) => json!({ "type": tag, "value": float(f64::from(*v)) }),
        Property::Double(v) => json!({ "type": tag, "value": float(*v) }),
        Property::Long(v) => json!({ "type": tag, "value": long(*v) }),
        Property::String(bytes) => {
            json!({ "type": tag, "value": String::from_utf8_lossy(bytes) })
        }
        Property::Raw(bytes) => json!({ "type": tag, "value": signed_bytes(bytes) }),
        Property::IntArray(values) => json!({ "type": tag, "values": values }),
        Property::FloatArray(values) => json!({
            "type": tag,
            "values": values.iter().map(|v| float(f64::from(*v))).collect::<Vec<_>>(),
        }),
        Property::DoubleArray(values) => json!({
            "type": tag,
            "values": values.iter().map(|v| float(*v)).collect::<Vec<_>>(),
        }),
        Property::LongArray(values) => json!({
            "type": tag,
            "values": values.iter().map(|v| long(*v)).collect::<Vec<_>>(),
        }),
    }
}

fn long(v: Long) -> Value {
    json!({ "low": v.low, "high": v.high })
}

/// JSON has no NaN or infinity; those become `null`.
fn float(v: f64) -> Value {
    serde_json::Number::from_f64(v)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// `[0xff, 0x02]` → `"-1 2 "`.
fn signed_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 4);
    for &b in bytes {
        out.push_str(&(b as i8).to_string());
        out.push(' ');
    }
    out
}
