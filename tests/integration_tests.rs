//! Integration tests for parsing, matching and formatting templates

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use unformat::{parse, BraceMismatch, Bindings, FormatError, Part, Template, TemplateError, Value};

fn bindings(pairs: &[(&str, &str)]) -> Bindings {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_parse_literal_parameter_literal() {
    let template = parse("category/delete/{Id}/QWErty").expect("Should parse");

    assert_eq!(
        template.parts(),
        &[
            Part::literal("category/delete/").unwrap(),
            Part::parameter("Id").unwrap(),
            Part::literal("/QWErty").unwrap(),
        ]
    );
    assert_eq!(template.parameter_count(), 1);
}

#[test]
fn test_parse_format_specs() {
    let template = parse("category/delete/{id:X}/{number:C2}/{text}").expect("Should parse");

    let specs: Vec<_> = template
        .parts()
        .iter()
        .filter_map(|part| match part {
            Part::Parameter(p) => Some((p.name(), p.format_spec())),
            Part::Literal(_) => None,
        })
        .collect();

    assert_eq!(
        specs,
        vec![("id", Some("X")), ("number", Some("C2")), ("text", None)]
    );
}

#[test]
fn test_blank_template_rejected() {
    assert_eq!(parse(" "), Err(TemplateError::BlankTemplate));
    assert_eq!(parse(""), Err(TemplateError::BlankTemplate));
}

#[test]
fn test_consecutive_parameters_rejected() {
    for source in [
        "{A}{B}/x",
        "{Group}{XYZ}/category/delete/{Id}/{Value}",
        "{XYZ}/category/delete/{Id}{Value}{XYZ}",
    ] {
        assert!(
            matches!(parse(source), Err(TemplateError::ConsecutiveParameters { .. })),
            "{source}"
        );
    }
}

#[test]
fn test_empty_parameters_rejected() {
    for source in [
        "{}/x",
        "{}/category/delete/{Id}/",
        "/cate{}gory/delete/{Id}/{}",
        "/category/delete/{Id}/{}",
        "/category/delete/{Arg}/{}/",
        "a/{   }/b",
    ] {
        assert!(
            matches!(parse(source), Err(TemplateError::EmptyParameter { .. })),
            "{source}"
        );
    }
}

#[test]
fn test_missing_brackets_rejected() {
    let opened = [
        "{A/x",
        "{Group{XYZ}/category/delete/{Id}/{Value}",
        "{XYZ/category/delete/{Id}/{Value}",
    ];
    let closed = [
        "A}/x",
        "{{XYZ}/category/delete/{Id}/{Value}",
        "{XYZ}}/category/delete/{Id}/{Value}",
        "XYZ}/category/delete/{Id}/{XYZ}",
        "XYZ}/category/delete/{Id}/{{XYZ}",
        "XYZ}/category/delete/{Id}/{XYZ}}",
    ];

    for source in opened {
        assert!(
            matches!(
                parse(source),
                Err(TemplateError::UnbalancedBrace {
                    mismatch: BraceMismatch::OpenedNeverClosed,
                    ..
                })
            ),
            "{source}"
        );
    }
    for source in closed {
        assert!(
            matches!(
                parse(source),
                Err(TemplateError::UnbalancedBrace {
                    mismatch: BraceMismatch::ClosedNeverOpened,
                    ..
                })
            ),
            "{source}"
        );
    }
}

#[test]
fn test_malformed_format_spec_rejected() {
    for source in ["a/{:X}", "a/{id:}"] {
        assert!(
            matches!(parse(source), Err(TemplateError::MalformedFormatSpec { .. })),
            "{source}"
        );
    }
}

#[test]
fn test_escaped_braces_collapse() {
    let template = parse("/category/{{V}}/delete/{Id}/").expect("Should parse");

    assert_eq!(
        template.parts(),
        &[
            Part::literal("/category/{V}/delete/").unwrap(),
            Part::parameter("Id").unwrap(),
            Part::literal("/").unwrap(),
        ]
    );
}

#[test]
fn test_round_trip_through_parts() {
    for source in [
        "category/delete/{Id}/QWErty",
        "{Group}/category/delete/{Id}/{Value}",
        "category/get-all",
        "category/delete/{Id}/{date:d}",
        "{Id}",
    ] {
        let template = parse(source).expect("Should parse");
        let rebuilt = Template::from_parts(template.parts().to_vec()).expect("Should build");

        assert_eq!(rebuilt.source(), source);
        assert_eq!(parse(rebuilt.source()).unwrap(), template);
        assert!(rebuilt.structurally_eq(&template));
    }
}

#[test]
fn test_matches_table() {
    let cases = [
        ("category/get-all", "category/get-all"),
        ("category/delete/{Id}/", "category/delete/00-000/"),
        ("category/delete/{Id}/ABC", "category/delete/00-000/ABC"),
        ("category/delete/{Id}/ABC{X}/QWERTY", "category/delete/00-000/ABC/str/QWERTY"),
        ("category/delete/{Id}/{Value}", "category/delete/00-000/test"),
        ("{Id}/{Value}", "category/delete"),
    ];

    for (source, candidate) in cases {
        let template = parse(source).expect("Should parse");
        assert!(template.matches(candidate), "{source} ~ {candidate}");
    }
}

#[test]
fn test_non_matches_table() {
    let cases = [
        ("category/get-all", "category/delete/00-000/test"),
        ("category/get-all", "category/get-all/00-000/test"),
        ("category/delete/{Id}/{Value}", "category//00-000/test"),
        ("category/delete/{Id}/{Value}", "category/delet/00-000/test"),
        ("category/delete/{Id}/{Value}", "category/deletx/00-000/test"),
        ("category/delete/{Id}/{Value}", "category/delete/00-000"),
        ("category/delete/{Id}/{Value}", "category/delete///"),
        ("category/delete/{Id}/{Value}", "category/delete//"),
        ("category/delete/{Id}/{Value}", "/delete///"),
        ("category/delete/{Id}/{Value}", "category/00-000/test"),
    ];

    for (source, candidate) in cases {
        let template = parse(source).expect("Should parse");
        assert!(!template.matches(candidate), "{source} !~ {candidate}");
    }
}

#[test]
fn test_unformat_binds_values() {
    let template = parse("category/delete/{Id}/{Value}").unwrap();
    assert_eq!(
        template.unformat("category/delete/00-000/test"),
        Some(bindings(&[("Id", "00-000"), ("Value", "test")]))
    );
}

#[test]
fn test_unformat_without_parameters() {
    let template = parse("a/b").unwrap();
    assert_eq!(template.unformat("a/b"), Some(Bindings::new()));
    assert_eq!(template.unformat("a/c"), None);
}

#[test]
fn test_unformat_escaped_template() {
    let template = parse("{{{Id}}}/{Value}").unwrap();
    assert_eq!(
        template.unformat("{42}/x"),
        Some(bindings(&[("Id", "42"), ("Value", "x")]))
    );
}

#[test]
fn test_format_then_unformat() {
    let template = parse("orders/{Id:D6}/items/{Sku}").unwrap();
    let values = HashMap::from([
        ("Id".to_string(), Value::from(42)),
        ("Sku".to_string(), Value::from("AB-1")),
    ]);

    let formatted = template.format(&values).unwrap();
    assert_eq!(formatted, "orders/000042/items/AB-1");
    assert_eq!(
        template.unformat(&formatted),
        Some(bindings(&[("Id", "000042"), ("Sku", "AB-1")]))
    );
}

#[test]
fn test_format_missing_value() {
    let template = parse("a/{Id}").unwrap();
    let values: HashMap<String, Value> = HashMap::new();
    assert_eq!(
        template.format(&values),
        Err(FormatError::MissingValue {
            name: "Id".to_string()
        })
    );
}

#[test]
fn test_format_without_parameters_ignores_values() {
    let template = parse("category/get-all").unwrap();
    let values = HashMap::from([("unused".to_string(), Value::from(1))]);
    assert_eq!(template.format(&values).unwrap(), "category/get-all");
}

#[test]
fn test_templates_dedupe_by_source() {
    use std::collections::HashSet;

    let set: HashSet<Template> = ["a/{b}", "a/{b}", "a/{c}"]
        .iter()
        .map(|s| parse(s).unwrap())
        .collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_shared_across_threads() {
    let template = std::sync::Arc::new(parse("jobs/{Id}/status").unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let template = std::sync::Arc::clone(&template);
            std::thread::spawn(move || template.unformat(&format!("jobs/{i}/status")))
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.join().unwrap();
        let expected = i.to_string();
        assert_eq!(result, Some(bindings(&[("Id", expected.as_str())])));
    }
}
