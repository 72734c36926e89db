//! Customizing text output with WriteOptions.
//!
//! Run with: cargo run --example custom_options

use indexmap::IndexMap;
use json_formats::{map, primitive, seq, to_string_with_options, StringKey, WriteOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let format = map(StringKey, seq(primitive::number()));
    let mut scores: IndexMap<String, Vec<u32>> = IndexMap::new();
    scores.insert("alice".to_string(), vec![90, 85]);
    scores.insert("bob".to_string(), vec![72]);

    // Default format (compact)
    println!("Compact:");
    let compact = to_string_with_options(&scores, &format, WriteOptions::new())?;
    println!("{}\n", compact);

    // Pretty-printed with the default 2-space indent
    println!("Pretty:");
    let pretty = to_string_with_options(&scores, &format, WriteOptions::pretty())?;
    println!("{}\n", pretty);

    // Pretty-printed with a wider indent
    println!("Pretty, 4-space indent:");
    let wide = to_string_with_options(&scores, &format, WriteOptions::pretty().with_indent(4))?;
    println!("{}", wide);

    Ok(())
}
