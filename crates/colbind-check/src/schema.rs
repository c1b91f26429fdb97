use colbind_core::TypeGraph;
use schemars::schema::RootSchema;
use schemars::schema_for;

/// Emit the JSON Schema for type graph documents.
pub fn graph_json_schema() -> RootSchema {
    schema_for!(TypeGraph)
}
