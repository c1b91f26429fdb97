//! Core contracts and helpers for colbind.
//!
//! This crate defines the type graph model handed over by the host, the
//! inheritance helpers used for subtype queries, and structural validation of
//! graphs before any annotation checks run.

pub mod error;
pub mod graph;
pub mod schema;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use graph::{HierarchyReport, HierarchySummary, TypeIndex, build_hierarchy_report};
pub use schema::{ClassDecl, ColumnMarker, FieldMarker, MemberDecl, ObjectInfo, TypeGraph};
pub use types::{ClassKind, CodecDescriptor, Modifier, SourceLocation};
pub use validation::validate_graph;

/// Current contract version for type graph documents.
pub const GRAPH_VERSION: &str = "0.1";
