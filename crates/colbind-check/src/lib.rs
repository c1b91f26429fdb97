//! Annotation checks for colbind object-to-column mappings.
//!
//! A class declares persistent fields with `@DbField(column = ...)` and the
//! matching column descriptors with `@DbColumn(...)`; concrete classes carry
//! `@DbObjectInfo(version = ...)`. This crate checks those declarations for
//! consistency and reports diagnostics through a [`DiagnosticSink`].

pub mod access;
pub mod column;
pub mod context;
pub mod declaration;
pub mod errors;
pub mod field;
pub mod object;
pub mod processor;
pub mod registry;
pub mod schema;
pub mod settings;
pub mod sink;

pub use access::AccessSpec;
pub use column::ColumnValidator;
pub use context::ValidationContext;
pub use declaration::{COLUMN_MARKER, DeclarationCheck, FIELD_MARKER, OBJECT_INFO_MARKER};
pub use errors::{CheckError, Diagnostic, Result, Severity, ValidationReport};
pub use field::FieldValidator;
pub use object::ObjectValidator;
pub use processor::{
    ProcessSummary, check_graph, check_graph_json, process_graph, validate_class,
    validate_graph_json,
};
pub use registry::NamedRegistry;
pub use schema::graph_json_schema;
pub use settings::CheckSettings;
pub use sink::{CountingSink, DiagnosticSink};
