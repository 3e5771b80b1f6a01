use crate::error::{CoinPackerError, Result};
use crate::model::{Layout, Placement, Shape};
use serde_json::{Value, json};

fn placement_fields<K>(p: &Placement<K>) -> serde_json::Map<String, Value> {
    let b = p.bounds();
    let mut obj = serde_json::Map::new();
    match p.shape {
        Shape::Circle { radius } => {
            obj.insert("shape".into(), json!("circle"));
            obj.insert("radius".into(), json!(radius));
        }
        Shape::Rectangle { .. } => {
            obj.insert("shape".into(), json!("rectangle"));
        }
    }
    obj.insert("center".into(), json!({"x": p.x, "y": p.y}));
    obj.insert(
        "frame".into(),
        json!({"x": b.left, "y": b.top, "w": b.width(), "h": b.height()}),
    );
    obj
}

/// Serialize a `Layout` as `{ items: [...], meta, report }` in packing order.
/// Each item carries its key, shape, centre and top-left `frame` box, ready for
/// absolutely positioned drawing.
pub fn to_json_array<K: ToString>(layout: &Layout<K>) -> Value {
    let items: Vec<Value> = layout
        .placements
        .iter()
        .map(|p| {
            let mut obj = placement_fields(p);
            obj.insert("key".into(), json!(p.key.to_string()));
            Value::Object(obj)
        })
        .collect();
    json!({"items": items, "meta": &layout.meta, "report": &layout.report})
}

/// Items keyed by name, with their packing index.
/// Shape: `{ items: { key: { shape, radius?, center, frame, index } }, meta, report }`.
pub fn to_json_hash<K: ToString>(layout: &Layout<K>) -> Value {
    let mut items = serde_json::Map::new();
    for (index, p) in layout.placements.iter().enumerate() {
        let mut obj = placement_fields(p);
        obj.insert("index".into(), json!(index));
        items.insert(p.key.to_string(), Value::Object(obj));
    }
    json!({"items": items, "meta": &layout.meta, "report": &layout.report})
}

/// Pretty-printed text of an exported value.
pub fn render_json(value: &Value) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| CoinPackerError::Encode(e.to_string()))
}
