//! A recursive tagged union built with a deferred format.
//!
//! Run with: cargo run --example recursive

use json_formats::{
    format_fn, from_str, merge_results, object, primitive, seq, to_string, BindError, Deferred,
    Format, FormatExt, Result, SharedFormat, TaggedUnion,
};
use serde_json::{Map, Value};
use std::error::Error;

#[derive(Debug, Clone, PartialEq)]
enum Json {
    Text(String),
    Number(f64),
    List(Vec<Json>),
    Tagged(Labeled),
}

#[derive(Debug, Clone, PartialEq)]
struct Labeled {
    label: String,
    inner: Box<Json>,
}

fn json_format() -> std::result::Result<SharedFormat<Json>, BindError> {
    let node = Deferred::<Json>::new();

    // The inner node has its own "kind", so it goes under a field.
    let labeled = {
        let read_node = node.clone();
        let write_node = node.clone();
        format_fn(
            move |json: &Value| -> Result<Labeled> {
                let obj = object::as_object(json)?;
                merge_results!(
                    label = object::read_field(obj, "label", &primitive::string()),
                    inner = object::read_field(obj, "inner", &read_node),
                    => Labeled { label, inner: Box::new(inner) }
                )
            },
            move |l: &Labeled| {
                let mut obj = Map::new();
                obj.insert("label".to_string(), Value::String(l.label.clone()));
                obj.insert("inner".to_string(), write_node.write(&l.inner));
                Value::Object(obj)
            },
        )
    };

    let union = TaggedUnion::new("kind")
        .variant("text", primitive::string(), Json::Text, |j: &Json| match j {
            Json::Text(s) => Some(s),
            _ => None,
        })
        .variant("number", primitive::number(), Json::Number, |j: &Json| match j {
            Json::Number(n) => Some(n),
            _ => None,
        })
        .variant("list", seq(node.clone()), Json::List, |j: &Json| match j {
            Json::List(items) => Some(items),
            _ => None,
        })
        .variant("tagged", labeled, Json::Tagged, |j: &Json| match j {
            Json::Tagged(l) => Some(l),
            _ => None,
        });

    node.bind(union)?;
    Ok(node.shared())
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    // Built once and reused: a recursive format is never freed.
    let format = json_format()?;

    let doc = Json::List(vec![
        Json::Text("hello".to_string()),
        Json::Tagged(Labeled {
            label: "answer".to_string(),
            inner: Box::new(Json::Number(42.0)),
        }),
    ]);

    let text = to_string(&doc, &format)?;
    println!("Encoded:\n{}\n", text);

    let back: Json = from_str(&text, &format)?;
    assert_eq!(doc, back);
    println!("✓ Round-trip successful\n");

    let bad = r#"{"kind": "list", "value": [{"kind": "bool", "value": true}, {"kind": "number", "value": "x"}]}"#;
    if let Err(e) = from_str::<Json, _>(bad, &format) {
        println!("{}", e);
    }

    Ok(())
}
