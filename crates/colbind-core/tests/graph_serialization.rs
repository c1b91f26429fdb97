use std::collections::BTreeSet;

use colbind_core::{ClassDecl, ClassKind, Modifier, TypeGraph};

#[test]
fn serializes_graph_deterministically() {
    let graph = TypeGraph {
        graph_version: "0.1".to_string(),
        classes: vec![ClassDecl {
            name: "com.example.Person".to_string(),
            kind: ClassKind::Class,
            modifiers: BTreeSet::from([Modifier::Public]),
            superclass: Some("DbObject".to_string()),
            interfaces: Vec::new(),
            object_info: None,
            codec: None,
            location: None,
            members: Vec::new(),
        }],
    };

    let json = serde_json::to_string_pretty(&graph).expect("serialize graph");
    let expected = r#"{
  "graph_version": "0.1",
  "classes": [
    {
      "name": "com.example.Person",
      "kind": "class",
      "modifiers": [
        "public"
      ],
      "superclass": "DbObject",
      "members": []
    }
  ]
}"#;
    assert_eq!(json, expected);
}

#[test]
fn deserializes_sparse_graph_with_defaults() {
    let json = serde_json::json!({
        "graph_version": "0.1",
        "classes": [
            {
                "name": "com.example.Base",
                "modifiers": ["public", "abstract"],
                "members": [
                    {
                        "name": "NAME",
                        "declared_type": "DbObjectColumn",
                        "modifiers": ["static"],
                        "column": { "value": "Name" }
                    }
                ]
            }
        ]
    });

    let graph: TypeGraph = serde_json::from_value(json).expect("parse graph");
    let class = &graph.classes[0];
    assert_eq!(class.kind, ClassKind::Class);
    assert!(class.is_abstract());
    assert!(class.is_annotated());
    assert!(class.object_info.is_none());
    assert_eq!(class.supertypes().count(), 0);

    let member = &class.members[0];
    assert!(member.has_modifier(Modifier::Static));
    assert_eq!(member.column.as_ref().map(|c| c.value.as_str()), Some("Name"));
    assert!(member.field.is_none());
}
