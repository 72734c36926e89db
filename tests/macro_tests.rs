use json_formats::{
    enum_value, enumeration, merge_errors, merge_results, Enumeration, Format, Result,
    ValidationError,
};
use serde_json::json;
use std::cell::Cell;

enumeration! {
    /// Compass directions.
    pub enum Direction {
        North => "N",
        East => "E",
        South => "S",
        West => "W",
    }
}

fn failure(msg: &str) -> Result<u8> {
    Err(ValidationError::custom(msg))
}

#[test]
fn test_enumeration_members_in_declaration_order() {
    assert_eq!(
        Direction::MEMBERS,
        &[
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West
        ]
    );
}

#[test]
fn test_enumeration_strings() {
    for member in Direction::MEMBERS {
        assert_eq!(Direction::parse(member.as_str()), Some(*member));
        assert_eq!(member.to_string(), member.as_str());
    }
    assert_eq!(Direction::parse("north"), None);
}

#[test]
fn test_enumeration_derives() {
    let mut sorted = vec![Direction::West, Direction::North];
    sorted.sort();
    assert_eq!(sorted, vec![Direction::North, Direction::West]);
}

#[test]
fn test_enumeration_with_value_format() {
    let format = enum_value::<Direction>();
    assert_eq!(format.read(&json!("S")).unwrap(), Direction::South);
    assert_eq!(format.write(&Direction::East), json!("E"));
}

#[test]
fn test_merge_errors_macro_mixed_types() {
    let a: Result<String> = Err(ValidationError::custom("a").at_key("x"));
    let b: Result<bool> = Ok(true);
    let c: Result<Vec<u8>> = Err(ValidationError::missing_field().at_key("y"));

    let merged = merge_errors!(a, b, c);
    let paths: Vec<String> = merged.violations().iter().map(|v| v.path.to_string()).collect();
    assert_eq!(paths, vec!["/x", "/y"]);
}

#[test]
fn test_merge_errors_macro_trailing_comma() {
    let a = failure("only");
    assert_eq!(merge_errors!(a,).len(), 1);
}

#[test]
fn test_merge_results_first_and_third_fail() {
    let evaluated = Cell::new(false);
    let merged: Result<u32> = merge_results!(
        first = failure("E1"),
        second = Ok::<u8, ValidationError>(2),
        third = failure("E3"),
        => {
            evaluated.set(true);
            u32::from(first) + u32::from(second) + u32::from(third)
        }
    );

    assert!(!evaluated.get());
    assert_eq!(
        merged.unwrap_err(),
        ValidationError::custom("E1").concat(ValidationError::custom("E3"))
    );
}

#[test]
fn test_merge_results_all_succeed() {
    let merged: Result<String> = merge_results!(
        greeting = Ok::<&str, ValidationError>("hello"),
        count = Ok::<usize, ValidationError>(2),
        => greeting.repeat(count)
    );
    assert_eq!(merged.unwrap(), "hellohello");
}

#[test]
fn test_merge_results_single_result() {
    let merged: Result<u8> = merge_results!(only = failure("x") => only);
    assert_eq!(merged.unwrap_err().len(), 1);
}
