//! Reading and writing a record, with every bad field reported at once.
//!
//! Run with: cargo run --example simple

use json_formats::{
    enum_value, enumeration, format_fn, from_str, merge_results, object, optional_array,
    primitive, to_string_pretty, Error, Format, FormatExt, Result,
};
use serde_json::{Map, Value};

enumeration! {
    pub enum Plan {
        Free => "free",
        Pro => "pro",
    }
}

#[derive(Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    plan: Plan,
    manager: Option<u32>,
}

fn user_format() -> impl Format<User> {
    format_fn(
        |json: &Value| -> Result<User> {
            let obj = object::as_object(json)?;
            merge_results!(
                id = object::read_field(obj, "id", &primitive::number()),
                name = object::read_field(
                    obj,
                    "name",
                    &primitive::string().filter("must not be empty", |s: &String| !s.is_empty()),
                ),
                plan = object::read_field(obj, "plan", &enum_value()),
                manager = object::read_field(obj, "manager", &optional_array(primitive::number())),
                => User { id, name, plan, manager }
            )
        },
        |user: &User| {
            let mut obj = Map::new();
            obj.insert("id".to_string(), primitive::number().write(&user.id));
            obj.insert("name".to_string(), primitive::string().write(&user.name));
            obj.insert("plan".to_string(), enum_value().write(&user.plan));
            obj.insert(
                "manager".to_string(),
                optional_array(primitive::number()).write(&user.manager),
            );
            Value::Object(obj)
        },
    )
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let format = user_format();
    let user = User {
        id: 42,
        name: "Alice Johnson".to_string(),
        plan: Plan::Pro,
        manager: Some(7),
    };

    // Write to JSON text
    let text = to_string_pretty(&user, &format)?;
    println!("JSON output:\n{}\n", text);

    // Read back into the record
    let back: User = from_str(&text, &format)?;
    assert_eq!(user, back);
    println!("✓ Round-trip successful\n");

    // A document with several problems reports all of them
    let bad = r#"{"id": -1, "name": "", "plan": "enterprise", "manager": [1, 2]}"#;
    match from_str::<User, _>(bad, &format) {
        Err(Error::Invalid(report)) => {
            println!("Rejected with {} violations:\n{}", report.len(), report);
            println!("\nAs JSON:\n{}", serde_json::to_string_pretty(&report)?);
        }
        other => println!("unexpected result: {:?}", other),
    }

    Ok(())
}
