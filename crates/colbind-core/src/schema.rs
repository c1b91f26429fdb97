use std::collections::BTreeSet;

use schemars::JsonSchema;
use schemars::r#gen::SchemaGenerator;
use schemars::schema::Schema;
use serde::{Deserialize, Serialize};

use crate::types::{ClassKind, CodecDescriptor, Modifier, SourceLocation};

/// Resolved type graph handed over by the host.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TypeGraph {
    /// Contract version for this graph format.
    pub graph_version: String,
    /// Declared classes, interfaces and enums.
    pub classes: Vec<ClassDecl>,
}

/// A declared type and its members.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClassDecl {
    /// Fully qualified name, unique within the graph.
    pub name: String,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default)]
    pub modifiers: BTreeSet<Modifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    /// `@DbObjectInfo` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_info: Option<ObjectInfo>,
    /// Present when this class is a field codec.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<CodecDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
}

impl ClassDecl {
    /// Interfaces count as abstract, matching the host model.
    pub fn is_abstract(&self) -> bool {
        self.kind == ClassKind::Interface || self.modifiers.contains(&Modifier::Abstract)
    }

    /// Direct supertypes, superclass first.
    pub fn supertypes(&self) -> impl Iterator<Item = &str> {
        self.superclass
            .as_deref()
            .into_iter()
            .chain(self.interfaces.iter().map(String::as_str))
    }

    /// Whether this class takes part in object-to-column mapping at all.
    pub fn is_annotated(&self) -> bool {
        self.object_info.is_some()
            || self
                .members
                .iter()
                .any(|member| member.field.is_some() || member.column.is_some())
    }
}

/// `@DbObjectInfo` schema metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ObjectInfo {
    #[schemars(schema_with = "version_schema")]
    pub version: i32,
}

/// Bound `version` to the i32 range so oversized values fail schema checks.
fn version_schema(generator: &mut SchemaGenerator) -> Schema {
    let mut schema = i32::json_schema(generator).into_object();
    schema.number().minimum = Some(f64::from(i32::MIN));
    schema.number().maximum = Some(f64::from(i32::MAX));
    Schema::Object(schema)
}

/// A variable member of a class.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MemberDecl {
    pub name: String,
    /// Declared type name, e.g. `int`, `String`, `byte[]`.
    pub declared_type: String,
    #[serde(default)]
    pub modifiers: BTreeSet<Modifier>,
    /// `@DbField` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldMarker>,
    /// `@DbColumn` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnMarker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

impl MemberDecl {
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

/// `@DbField`: binds a member to a named column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldMarker {
    pub column: String,
    /// Codec class name; the default codec applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    #[serde(default)]
    pub indexed: bool,
    #[serde(default)]
    pub sparse: bool,
}

/// `@DbColumn`: marks the descriptor constant for a named column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnMarker {
    pub value: String,
}
