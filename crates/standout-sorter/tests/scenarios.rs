//! End-to-end sorting scenarios through the public API.

use standout_sorter::{
    Args, Dir, Extract, Key, Nils, Pipeline, PipelineConfig, SortError, Sortable, Sorter, Stage,
    Step, Value,
};

fn person(name: Option<&str>, age: i64) -> Value {
    Value::map([
        (Key::sym("name"), Value::from(name)),
        (Key::sym("age"), Value::from(age)),
    ])
}

// ============================================================================
// Core scenarios
// ============================================================================

#[test]
fn fold_lower_then_sort() {
    let words = vec!["banana", "Apple", "cherry"];
    let sorted = Sorter::new(&words).downcase().sort().unwrap();
    assert_eq!(sorted, vec![&"Apple", &"banana", &"cherry"]);
}

#[test]
fn extract_path_then_sort() {
    let people = vec![
        Value::map([(Key::sym("name"), "Bob")]),
        Value::map([(Key::sym("name"), "Alice")]),
    ];
    let sorted = Sorter::new(&people).dig([Key::sym("name")]).sort().unwrap();
    assert_eq!(sorted, vec![&people[1], &people[0]]);
}

#[test]
fn nils_last_by_default() {
    let people = vec![person(None, 30), person(Some("Charlie"), 25)];
    let sorted = Sorter::new(&people)
        .dig([Key::sym("name")])
        .nils_last()
        .sort()
        .unwrap();
    assert_eq!(sorted, vec![&people[1], &people[0]]);
}

#[test]
fn nils_stay_last_when_descending() {
    let people = vec![person(Some("Charlie"), 25), person(None, 30)];
    let sorted = Sorter::new(&people)
        .dig([Key::sym("name")])
        .nils_last()
        .descending()
        .sort()
        .unwrap();
    assert_eq!(sorted, vec![&people[0], &people[1]]);
}

#[test]
fn indifferent_dig_matches_both_key_forms() {
    let people = vec![
        Value::map([(Key::sym("name"), "Bob")]),
        Value::map([(Key::str("name"), "Alice")]),
    ];
    let sorted = Sorter::new(&people)
        .dig_indifferent([Key::sym("name")])
        .sort()
        .unwrap();
    assert_eq!(sorted, vec![&people[1], &people[0]]);
}

#[test]
fn plain_sort_of_mixed_types_fails() {
    let items = vec![Value::from("string"), Value::from(42)];
    let err = Sorter::new(&items).sort().unwrap_err();

    match &err {
        SortError::Incomparable {
            left_type,
            right_type,
            stage,
            ..
        } => {
            let mut types = [*left_type, *right_type];
            types.sort();
            assert_eq!(types, ["integer", "string"]);
            assert_eq!(*stage, Stage::RawItems);
        }
        other => panic!("unexpected error: {other}"),
    }

    let message = err.to_string();
    assert!(message.contains("\"string\""), "{message}");
    assert!(message.contains("42"), "{message}");
}

// ============================================================================
// Extraction fallbacks
// ============================================================================

#[test]
fn missing_key_falls_back_to_text_form() {
    let people = vec![
        Value::map([(Key::sym("name"), "Zed")]),
        Value::map([(Key::sym("name"), "Amy")]),
    ];
    let by_missing = Sorter::new(&people).key("nickname").sort().unwrap();
    // Text forms are `{name: "Zed"}` and `{name: "Amy"}`.
    assert_eq!(by_missing, vec![&people[1], &people[0]]);
}

#[test]
fn symbol_key_does_not_match_text_key_without_indifference() {
    let people = vec![
        Value::map([(Key::str("name"), "Bob")]),
        Value::map([(Key::str("name"), "Alice")]),
    ];
    let pipeline = Pipeline::new().push(Step::dig([Key::sym("name")], false).unwrap());
    assert_eq!(
        pipeline.derive(&people[0]),
        Value::from(r#"{"name" => "Bob"}"#)
    );
}

#[test]
fn nested_nil_short_circuits() {
    let items = vec![
        Value::map([(Key::sym("user"), Value::Nil)]),
        Value::map([(Key::sym("user"), Value::map([(Key::sym("name"), "Ann")]))]),
    ];
    let sorted = Sorter::new(&items)
        .dig([Key::sym("user"), Key::sym("name")])
        .sort()
        .unwrap();
    assert_eq!(sorted, vec![&items[1], &items[0]]);
}

#[test]
fn list_index_segments() {
    let scores = vec![
        Value::list([3, 9]),
        Value::list([7, 1]),
        Value::list([5, 5]),
    ];
    let by_last = Sorter::new(&scores).key(-1i64).sort().unwrap();
    assert_eq!(by_last, vec![&scores[1], &scores[2], &scores[0]]);
}

#[test]
fn builtin_calls_with_arguments() {
    let rows = vec![
        Value::map([(Key::str("tags"), Value::list(["a", "b", "c"]))]),
        Value::map([(Key::str("other"), Value::from(1))]),
        Value::map([(Key::str("tags"), Value::list(["x"]))]),
    ];
    let sorted = Sorter::new(&rows)
        .call(
            "fetch",
            Args::new()
                .arg("tags")
                .kwarg("default", Value::list(Vec::<Value>::new())),
        )
        .attribute("size")
        .sort()
        .unwrap();
    assert_eq!(sorted, vec![&rows[1], &rows[2], &rows[0]]);
}

#[test]
fn json_items() {
    let doc = serde_json::json!([
        {"user": {"name": "carol", "score": 7}},
        {"user": {"name": "alice", "score": 9}},
        {"user": null},
        {"user": {"name": "Bob", "score": 8}},
    ]);
    let items = doc.as_array().unwrap();

    let by_name = Sorter::new(items)
        .dig(["user", "name"])
        .case_insensitive()
        .sort()
        .unwrap();
    let names: Vec<&serde_json::Value> = by_name.iter().map(|v| &v["user"]["name"]).collect();
    assert_eq!(
        names,
        vec![
            &serde_json::json!("alice"),
            &serde_json::json!("Bob"),
            &serde_json::json!("carol"),
            &serde_json::Value::Null,
        ]
    );

    let top = Sorter::new(items)
        .dig(["user", "score"])
        .descending()
        .first()
        .unwrap()
        .unwrap();
    assert_eq!(top["user"]["name"], "alice");
}

// ============================================================================
// Derive
// ============================================================================

#[derive(Debug, Clone, Extract)]
#[extract(call = Ticket::computed)]
struct Ticket {
    title: String,
    #[extract(rename = "prio")]
    priority: Option<u8>,
    tags: Vec<String>,
    #[extract(skip)]
    #[allow(dead_code)]
    internal: u64,
}

impl Ticket {
    fn new(title: &str, priority: Option<u8>, tags: &[&str]) -> Self {
        Ticket {
            title: title.to_string(),
            priority,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            internal: 0,
        }
    }

    fn computed(&self, name: &str, _args: &Args) -> Option<Value> {
        match name {
            "tag_count" => Some(Value::from(self.tags.len())),
            _ => None,
        }
    }
}

fn tickets() -> Vec<Ticket> {
    vec![
        Ticket::new("crash on start", Some(1), &["bug", "urgent"]),
        Ticket::new("Add docs", None, &[]),
        Ticket::new("bump deps", Some(3), &["chore"]),
    ]
}

fn titles(sorted: &[&Ticket]) -> Vec<String> {
    sorted.iter().map(|t| t.title.clone()).collect()
}

#[test]
fn derive_generates_constants() {
    assert_eq!(Ticket::TITLE, "title");
    assert_eq!(Ticket::PRIO, "prio");
    assert_eq!(Ticket::TAGS, "tags");
}

#[test]
fn derive_exposes_fields_as_calls() {
    let items = tickets();
    let ticket = &items[0];
    assert_eq!(
        ticket.call("title", &Args::new()),
        Some(Value::from("crash on start"))
    );
    assert_eq!(ticket.call("prio", &Args::new()), Some(Value::from(1u8)));
    assert_eq!(ticket.call("priority", &Args::new()), None);
    assert_eq!(ticket.call("internal", &Args::new()), None);
    assert_eq!(ticket.call("tag_count", &Args::new()), Some(Value::from(2usize)));
}

#[test]
fn derive_value_is_symbol_keyed_map() {
    let ticket = Ticket::new("x", None, &["a"]);
    assert_eq!(
        ticket.to_value(),
        Value::map([
            (Key::sym("title"), Value::from("x")),
            (Key::sym("prio"), Value::Nil),
            (Key::sym("tags"), Value::list(["a"])),
        ])
    );
}

#[test]
fn sort_derived_structs() {
    let items = tickets();

    let by_prio = Sorter::new(&items).attribute(Ticket::PRIO).sort().unwrap();
    assert_eq!(titles(&by_prio), ["crash on start", "bump deps", "Add docs"]);

    let by_title = Sorter::new(&items)
        .attribute(Ticket::TITLE)
        .insensitive()
        .sort()
        .unwrap();
    assert_eq!(titles(&by_title), ["Add docs", "bump deps", "crash on start"]);

    let by_tags = Sorter::new(&items)
        .attribute("tag_count")
        .descending()
        .sort()
        .unwrap();
    assert_eq!(titles(&by_tags), ["crash on start", "bump deps", "Add docs"]);

    let by_first_tag = Sorter::new(&items)
        .dig([Ticket::TAGS])
        .attribute("first")
        .nils_first()
        .sort()
        .unwrap();
    assert_eq!(titles(&by_first_tag), ["Add docs", "crash on start", "bump deps"]);
}

#[test]
fn sort_derived_structs_in_place() {
    let mut items = tickets();
    items
        .sorter_mut()
        .attribute(Ticket::PRIO)
        .reverse_sort_in_place()
        .unwrap();
    let order: Vec<&str> = items.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(order, ["bump deps", "crash on start", "Add docs"]);
}

// ============================================================================
// Delegated accessors
// ============================================================================

#[test]
fn delegated_accessors_sort_first() {
    let numbers = vec![40, 10, 30, 20];
    let sorter = numbers.sorter();

    assert_eq!(sorter.first().unwrap(), Some(&10));
    assert_eq!(sorter.last().unwrap(), Some(&40));
    assert_eq!(sorter.first_n(2).unwrap(), vec![&10, &20]);
    assert_eq!(sorter.last_n(2).unwrap(), vec![&30, &40]);
    assert_eq!(sorter.skip(1).unwrap(), vec![&20, &30, &40]);
    assert_eq!(sorter.get(1).unwrap(), Some(&20));
    assert_eq!(sorter.count().unwrap(), 4);
    assert_eq!(sorter.iter().unwrap().copied().sum::<i32>(), 100);
}

#[test]
fn delegated_accessors_propagate_errors() {
    let items = vec![Value::from(1), Value::from("one")];
    let sorter = items.sorter();
    assert!(sorter.first().is_err());
    assert!(sorter.count().is_err());
    assert!(sorter.iter().is_err());
}

#[test]
fn empty_collection() {
    let empty: Vec<Value> = Vec::new();
    let sorter = Sorter::new(&empty).dig([Key::sym("name")]).descending();
    assert!(sorter.sort().unwrap().is_empty());
    assert_eq!(sorter.first().unwrap(), None);
    assert_eq!(sorter.count().unwrap(), 0);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn sort_from_yaml_config() {
    let yaml = r#"
steps:
  - dig: { path: [":user", "name"], indifferent: true }
  - fold: lower
direction: desc
nils: first
"#;
    let config = PipelineConfig::from_yaml(yaml).unwrap();
    let pipeline = Pipeline::try_from(config).unwrap();
    assert_eq!(pipeline.dir(), Dir::Desc);
    assert_eq!(pipeline.nils(), Nils::First);

    let items = vec![
        Value::map([(Key::sym("user"), Value::map([(Key::sym("name"), "amy")]))]),
        Value::map([(Key::str("user"), Value::map([(Key::str("name"), "Cy")]))]),
        Value::map([(Key::sym("user"), Value::Nil)]),
        Value::map([(Key::sym("user"), Value::map([(Key::sym("name"), "Bea")]))]),
    ];

    let sorted = Sorter::new(&items).with_pipeline(pipeline).sort().unwrap();
    assert_eq!(sorted, vec![&items[2], &items[1], &items[3], &items[0]]);
}

#[test]
fn sort_from_json_config() {
    let json = r#"{"steps": [{"call": {"name": "abs"}}], "direction": "descending"}"#;
    let pipeline = Pipeline::try_from(PipelineConfig::from_json(json).unwrap()).unwrap();

    let mut numbers = vec![-3i64, 1, -7, 5];
    pipeline.sort_in_place(&mut numbers).unwrap();
    assert_eq!(numbers, vec![-7, 5, -3, 1]);
}
