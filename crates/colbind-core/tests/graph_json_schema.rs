use colbind_core::TypeGraph;
use schemars::schema_for;

#[test]
fn json_schema_describes_graph_model() {
    let generated = schema_for!(TypeGraph);
    let json = serde_json::to_value(&generated).expect("serialize generated schema");

    let required = json["required"].as_array().expect("required list");
    assert!(required.iter().any(|value| value == "graph_version"));
    assert!(required.iter().any(|value| value == "classes"));

    let definitions = json["definitions"].as_object().expect("definitions");
    for name in [
        "ClassDecl",
        "MemberDecl",
        "FieldMarker",
        "ColumnMarker",
        "ObjectInfo",
        "Modifier",
    ] {
        assert!(definitions.contains_key(name), "missing definition {name}");
    }

    let version = &definitions["ObjectInfo"]["properties"]["version"];
    assert_eq!(version["minimum"], serde_json::json!(f64::from(i32::MIN)));
    assert_eq!(version["maximum"], serde_json::json!(f64::from(i32::MAX)));
}
