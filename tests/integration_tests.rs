use indexmap::{IndexMap, IndexSet};
use json_formats::{
    enum_set, enum_value, enumeration, format_fn, from_str, map, merge_results, object,
    optional_array, primitive, seq, to_string, to_string_pretty, Deferred, ErrorKind, Format,
    FormatExt, ParsedKey, Result, SharedFormat, StringKey, TaggedUnion, ValidationError,
};
use serde_json::{json, Map, Value};

enumeration! {
    pub enum Status {
        Active => "active",
        Suspended => "suspended",
        Closed => "closed",
    }
}

enumeration! {
    pub enum Feature {
        Search => "search",
        Export => "export",
        Audit => "audit",
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Account {
    id: u64,
    owner: String,
    status: Status,
    features: IndexSet<Feature>,
    limits: IndexMap<String, u32>,
    parent: Option<u64>,
}

fn account_format() -> impl Format<Account> {
    format_fn(
        |json: &Value| -> Result<Account> {
            let obj = object::as_object(json)?;
            merge_results!(
                id = object::read_field(obj, "id", &primitive::number()),
                owner = object::read_field(
                    obj,
                    "owner",
                    &primitive::string().filter("must not be empty", |s: &String| !s.is_empty()),
                ),
                status = object::read_field(obj, "status", &enum_value()),
                features = object::read_field(obj, "features", &enum_set()),
                limits = object::read_field(obj, "limits", &map(StringKey, primitive::number())),
                parent = object::read_field(obj, "parent", &optional_array(primitive::number())),
                => Account { id, owner, status, features, limits, parent }
            )
        },
        |account: &Account| {
            let mut obj = Map::new();
            obj.insert("id".to_string(), primitive::number().write(&account.id));
            obj.insert("owner".to_string(), primitive::string().write(&account.owner));
            obj.insert("status".to_string(), enum_value().write(&account.status));
            obj.insert("features".to_string(), enum_set().write(&account.features));
            obj.insert(
                "limits".to_string(),
                map(StringKey, primitive::number()).write(&account.limits),
            );
            obj.insert(
                "parent".to_string(),
                optional_array(primitive::number()).write(&account.parent),
            );
            Value::Object(obj)
        },
    )
}

fn sample_account() -> Account {
    let mut limits = IndexMap::new();
    limits.insert("requests".to_string(), 1000);
    limits.insert("storage".to_string(), 50);
    Account {
        id: 42,
        owner: "Alice".to_string(),
        status: Status::Active,
        features: [Feature::Search, Feature::Audit].into_iter().collect(),
        limits,
        parent: None,
    }
}

#[test]
fn test_record_write_shape() {
    let json = account_format().write(&sample_account());
    assert_eq!(
        json,
        json!({
            "id": 42,
            "owner": "Alice",
            "status": "active",
            "features": ["search", "audit"],
            "limits": {"requests": 1000, "storage": 50},
            "parent": []
        })
    );
}

#[test]
fn test_record_roundtrip() {
    let format = account_format();
    let mut account = sample_account();
    account.parent = Some(7);

    let back = format.read(&format.write(&account)).unwrap();
    assert_eq!(back, account);
}

#[test]
fn test_record_reports_every_bad_field_in_order() {
    let doc = json!({
        "id": "forty-two",
        "owner": "",
        "status": "deleted",
        "features": ["search", 1, "teleport"],
        "limits": {"requests": -1},
        "parent": [1, 2]
    });

    let err = account_format().read(&doc).unwrap_err();
    let report: Vec<(String, ErrorKind)> = err
        .violations()
        .iter()
        .map(|v| (v.path.to_string(), v.kind.clone()))
        .collect();

    let paths: Vec<&str> = report.iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "/id",
            "/owner",
            "/status",
            "/features[1]",
            "/features[2]",
            "/limits/requests",
            "/parent",
        ]
    );
    assert_eq!(
        report[2].1,
        ErrorKind::UndefinedValue {
            value: "deleted".to_string()
        }
    );
    assert!(matches!(report[6].1, ErrorKind::UnexpectedShape { .. }));
}

#[test]
fn test_record_missing_fields() {
    let err = account_format().read(&json!({"id": 1})).unwrap_err();
    assert_eq!(err.len(), 5);
    assert!(err
        .violations()
        .iter()
        .all(|v| v.kind == ErrorKind::MissingField));
}

#[test]
fn test_report_serializes_to_json() {
    let err = account_format()
        .read(&json!({
            "id": 1, "owner": "Bob", "status": "closed",
            "features": ["teleport"], "limits": {}, "parent": []
        }))
        .unwrap_err();
    assert_eq!(
        serde_json::to_value(&err).unwrap(),
        json!([{"path": "/features[0]", "kind": "undefined_value", "value": "teleport"}])
    );
}

#[test]
fn test_text_roundtrip() {
    let format = account_format();
    let account = sample_account();
    let text = to_string_pretty(&account, &format).unwrap();
    let back: Account = from_str(&text, &format).unwrap();
    assert_eq!(back, account);
}

// A recursive expression language: numbers, negation, sums and let-bound names.

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Num(f64),
    Var(String),
    Neg(Box<Expr>),
    Sum(Vec<Expr>),
    Let(Binding),
}

#[derive(Debug, Clone, PartialEq)]
struct Binding {
    name: String,
    value: Box<Expr>,
    body: Box<Expr>,
}

fn expr_format() -> SharedFormat<Expr> {
    let expr = Deferred::<Expr>::new();

    // A nested expression carries its own "op", so it must sit under a field
    // of the payload rather than be the payload itself.
    let negated = {
        let read_expr = expr.clone();
        let write_expr = expr.clone();
        format_fn(
            move |json: &Value| -> Result<Box<Expr>> {
                let obj = object::as_object(json)?;
                object::read_field(obj, "arg", &read_expr).map(Box::new)
            },
            move |arg: &Box<Expr>| {
                let mut obj = Map::new();
                obj.insert("arg".to_string(), write_expr.write(&**arg));
                Value::Object(obj)
            },
        )
    };

    let binding = {
        let read_expr = expr.clone();
        let write_expr = expr.clone();
        format_fn(
            move |json: &Value| -> Result<Binding> {
                let obj = object::as_object(json)?;
                merge_results!(
                    name = object::read_field(obj, "name", &primitive::string()),
                    value = object::read_field(obj, "value", &read_expr),
                    body = object::read_field(obj, "body", &read_expr),
                    => Binding { name, value: Box::new(value), body: Box::new(body) }
                )
            },
            move |b: &Binding| {
                let mut obj = Map::new();
                obj.insert("name".to_string(), Value::String(b.name.clone()));
                obj.insert("value".to_string(), write_expr.write(&b.value));
                obj.insert("body".to_string(), write_expr.write(&b.body));
                Value::Object(obj)
            },
        )
    };

    let union = TaggedUnion::new("op")
        .variant("num", primitive::number(), Expr::Num, |e: &Expr| match e {
            Expr::Num(n) => Some(n),
            _ => None,
        })
        .variant("var", primitive::string(), Expr::Var, |e: &Expr| match e {
            Expr::Var(name) => Some(name),
            _ => None,
        })
        .variant("neg", negated, Expr::Neg, |e: &Expr| match e {
            Expr::Neg(inner) => Some(inner),
            _ => None,
        })
        .variant("sum", seq(expr.clone()), Expr::Sum, |e: &Expr| match e {
            Expr::Sum(terms) => Some(terms),
            _ => None,
        })
        .variant("let", binding, Expr::Let, |e: &Expr| match e {
            Expr::Let(b) => Some(b),
            _ => None,
        });

    expr.bind(union).unwrap();
    expr.shared()
}

fn sample_expr() -> Expr {
    Expr::Let(Binding {
        name: "x".to_string(),
        value: Box::new(Expr::Num(2.0)),
        body: Box::new(Expr::Sum(vec![
            Expr::Var("x".to_string()),
            Expr::Neg(Box::new(Expr::Num(0.5))),
        ])),
    })
}

#[test]
fn test_recursive_union_wire_shape() {
    let json = expr_format().write(&sample_expr());
    assert_eq!(
        json,
        json!({
            "name": "x",
            "value": {"op": "num", "value": 2.0},
            "body": {
                "op": "sum",
                "value": [
                    {"op": "var", "value": "x"},
                    {"arg": {"op": "num", "value": 0.5}, "op": "neg"}
                ]
            },
            "op": "let"
        })
    );
}

#[test]
fn test_recursive_union_roundtrip() {
    let format = expr_format();
    let expr = sample_expr();
    assert_eq!(format.read(&format.write(&expr)).unwrap(), expr);

    let text = to_string(&expr, &format).unwrap();
    let back: Expr = from_str(&text, &format).unwrap();
    assert_eq!(back, expr);
}

#[test]
fn test_recursive_union_deep_error_paths() {
    let doc = json!({
        "op": "sum",
        "value": [
            {"op": "num", "value": 1},
            {"op": "neg", "arg": {"op": "num", "value": "two"}},
            {"op": "mul", "value": []},
            {"op": "let", "name": 3, "value": {"op": "var", "value": "y"}}
        ]
    });

    let err = expr_format().read(&doc).unwrap_err();
    let paths: Vec<String> = err.violations().iter().map(|v| v.path.to_string()).collect();
    assert_eq!(
        paths,
        vec![
            "/value[1]/arg/value",
            "/value[2]/op",
            "/value[3]/name",
            "/value[3]/body",
        ]
    );
}

#[test]
fn test_shared_format_across_threads() {
    let format = expr_format();
    let expr = sample_expr();
    let expected = format.write(&expr);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let format = format.clone();
            let expr = expr.clone();
            std::thread::spawn(move || format.write(&expr))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_map_with_enum_and_parsed_keys() {
    let by_status = map(enum_value::<Status>(), seq(primitive::number()));
    let doc = json!({"active": [1, 2], "closed": []});
    let read: IndexMap<Status, Vec<u32>> = by_status.read(&doc).unwrap();
    assert_eq!(read[&Status::Active], vec![1, 2]);
    assert_eq!(by_status.write(&read), doc);

    let err = Format::<IndexMap<Status, Vec<u32>>>::read(&by_status, &json!({"open": [1]}))
        .unwrap_err();
    assert_eq!(err.violations()[0].path.to_string(), "/open");

    let by_id = map(ParsedKey, primitive::string());
    let ids: IndexMap<u16, String> = by_id.read(&json!({"1": "one", "20": "twenty"})).unwrap();
    assert_eq!(ids.keys().copied().collect::<Vec<_>>(), vec![1, 20]);
}

#[test]
fn test_nested_containers() {
    let format = map(StringKey, optional_array(seq(enum_value::<Feature>())));
    let doc = json!({"team-a": [["search", "export"]], "team-b": []});
    let read: IndexMap<String, Option<Vec<Feature>>> = format.read(&doc).unwrap();
    assert_eq!(
        read["team-a"],
        Some(vec![Feature::Search, Feature::Export])
    );
    assert_eq!(read["team-b"], None);
    assert_eq!(format.write(&read), doc);

    let bad = json!({"team-a": [["search", "fly"]]});
    let err = Format::<IndexMap<String, Option<Vec<Feature>>>>::read(&format, &bad).unwrap_err();
    assert_eq!(err.violations()[0].path.to_string(), "/team-a[0][1]");
}

#[test]
fn test_custom_validation_error_kind() {
    let err = ValidationError::custom("boom").at_index(3).at_key("rows");
    assert_eq!(err.to_string(), "/rows[3]: boom");
}
