#![allow(dead_code)]

use std::collections::BTreeSet;

use colbind_check::{CheckSettings, ValidationContext, ValidationReport, validate_class};
use colbind_core::{
    ClassDecl, ClassKind, ColumnMarker, FieldMarker, MemberDecl, Modifier, ObjectInfo,
    SourceLocation, TypeGraph,
};

pub fn location(line: u32) -> Option<SourceLocation> {
    Some(SourceLocation {
        file: "Person.java".to_string(),
        line,
        column: 5,
    })
}

pub fn modifiers(mods: &[Modifier]) -> BTreeSet<Modifier> {
    mods.iter().copied().collect()
}

/// Concrete, correctly based class with `@DbObjectInfo(version = 1)`.
pub fn object_class(name: &str, members: Vec<MemberDecl>) -> ClassDecl {
    ClassDecl {
        name: name.to_string(),
        kind: ClassKind::Class,
        modifiers: modifiers(&[Modifier::Public]),
        superclass: Some("DbObject".to_string()),
        interfaces: Vec::new(),
        object_info: Some(ObjectInfo { version: 1 }),
        codec: None,
        location: location(1),
        members,
    }
}

/// Abstract class under `DbObject` without `@DbObjectInfo`.
pub fn abstract_class(name: &str, members: Vec<MemberDecl>) -> ClassDecl {
    ClassDecl {
        modifiers: modifiers(&[Modifier::Public, Modifier::Abstract]),
        object_info: None,
        ..object_class(name, members)
    }
}

pub fn field(name: &str, column: &str, mods: &[Modifier]) -> MemberDecl {
    MemberDecl {
        name: name.to_string(),
        declared_type: "int".to_string(),
        modifiers: modifiers(mods),
        field: Some(FieldMarker {
            column: column.to_string(),
            codec: None,
            indexed: false,
            sparse: false,
        }),
        column: None,
        location: location(10),
    }
}

pub fn column(name: &str, value: &str, mods: &[Modifier]) -> MemberDecl {
    let mut all = modifiers(mods);
    all.insert(Modifier::Static);
    MemberDecl {
        name: name.to_string(),
        declared_type: "DbObjectColumn".to_string(),
        modifiers: all,
        field: None,
        column: Some(ColumnMarker {
            value: value.to_string(),
        }),
        location: location(20),
    }
}

pub fn graph(classes: Vec<ClassDecl>) -> TypeGraph {
    TypeGraph {
        graph_version: "0.1".to_string(),
        classes,
    }
}

/// Validate the first class of `graph` with default settings.
pub fn check_first(graph: &TypeGraph) -> ValidationReport {
    let settings = CheckSettings::default();
    let ctx = ValidationContext::new(graph, &settings);
    let mut report = ValidationReport::default();
    validate_class(&ctx, &graph.classes[0], &mut report).expect("validate class");
    report
}

pub fn codes(report: &ValidationReport) -> Vec<&str> {
    report.iter().map(|diagnostic| diagnostic.code.as_str()).collect()
}
