use colbind_core::{ClassDecl, GRAPH_VERSION, TypeGraph, build_hierarchy_report, validate_graph};
use jsonschema::JSONSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::ValidationContext;
use crate::errors::{CheckError, Diagnostic, Result, Severity, ValidationReport};
use crate::object::ObjectValidator;
use crate::schema::graph_json_schema;
use crate::settings::CheckSettings;
use crate::sink::{CountingSink, DiagnosticSink};

/// Totals for one pass over a type graph.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessSummary {
    pub classes_analyzed: usize,
    pub errors: usize,
    pub warnings: usize,
}

/// Validate every annotated class of the context's graph.
///
/// Classes are visited supertypes first, ties broken by name.
pub fn process_graph(
    ctx: &ValidationContext<'_>,
    sink: &mut dyn DiagnosticSink,
) -> Result<ProcessSummary> {
    let mut summary = ProcessSummary::default();

    for class in analysis_order(ctx)? {
        let mut counting = CountingSink::new(&mut *sink);
        validate_class(ctx, class, &mut counting)?;

        tracing::debug!(
            event = "class_validated",
            class = %class.name,
            errors = counting.errors(),
            warnings = counting.warnings()
        );

        summary.classes_analyzed += 1;
        summary.errors += counting.errors();
        summary.warnings += counting.warnings();
    }

    Ok(summary)
}

/// Register the annotated members of `class` and run its object validator.
pub fn validate_class(
    ctx: &ValidationContext<'_>,
    class: &ClassDecl,
    sink: &mut dyn DiagnosticSink,
) -> Result<()> {
    let mut validator = ObjectValidator::new(ctx, class);

    for member in class.members.iter().filter(|member| member.field.is_some()) {
        validator.register_field(member)?;
    }
    for member in class.members.iter().filter(|member| member.column.is_some()) {
        validator.register_column(member)?;
    }

    tracing::trace!(
        event = "class_registered",
        class = %class.name,
        fields = validator.field_count(),
        columns = validator.column_count()
    );

    validator.validate(sink);
    Ok(())
}

fn analysis_order<'g>(ctx: &ValidationContext<'g>) -> Result<Vec<&'g ClassDecl>> {
    let report = build_hierarchy_report(ctx.graph());
    let order = report.topo_order.ok_or_else(|| {
        colbind_core::Error::InvalidGraph(format!(
            "inheritance cycle through: {}",
            report.cycle.unwrap_or_default().join(", ")
        ))
    })?;

    Ok(order
        .iter()
        .filter_map(|name| ctx.lookup(name))
        .filter(|class| class.is_annotated())
        .collect())
}

/// Validate a type graph JSON document against the graph JSON Schema.
pub fn validate_graph_json(graph_json: &Value) -> Result<ValidationReport> {
    let schema = serde_json::to_value(graph_json_schema())?;
    let compiled =
        JSONSchema::compile(&schema).map_err(|err| CheckError::Schema(err.to_string()))?;

    let mut report = ValidationReport::default();

    if let Err(errors) = compiled.validate(graph_json) {
        for error in errors {
            let path = normalized_json_pointer(&error.instance_path.to_string());
            report.push_error(Diagnostic::new(
                Severity::Error,
                "schema_violation",
                path,
                error.to_string(),
                None,
            ));
        }
    }

    Ok(report)
}

/// Check a type graph document end to end.
///
/// Schema violations come back as report errors with an empty summary. A graph
/// that parses but is structurally broken (duplicate names, inheritance
/// cycles) is an `Err`.
pub fn check_graph_json(
    graph_json: &Value,
    settings: &CheckSettings,
) -> Result<(ProcessSummary, ValidationReport)> {
    let structural = validate_graph_json(graph_json)?;
    if !structural.is_ok() {
        tracing::warn!(event = "graph_rejected", errors = structural.errors.len());
        return Ok((ProcessSummary::default(), structural));
    }

    let graph = TypeGraph::deserialize(graph_json)?;
    check_graph(&graph, settings)
}

/// Check an already parsed type graph.
pub fn check_graph(
    graph: &TypeGraph,
    settings: &CheckSettings,
) -> Result<(ProcessSummary, ValidationReport)> {
    if graph.graph_version != GRAPH_VERSION {
        tracing::warn!(
            event = "graph_version_mismatch",
            expected = GRAPH_VERSION,
            found = %graph.graph_version
        );
    }
    validate_graph(graph)?;
    tracing::debug!(event = "graph_loaded", classes = graph.classes.len());

    let ctx = ValidationContext::new(graph, settings);
    let mut report = ValidationReport::default();
    let summary = process_graph(&ctx, &mut report)?;

    tracing::info!(
        event = "graph_checked",
        classes = summary.classes_analyzed,
        errors = summary.errors,
        warnings = summary.warnings
    );

    Ok((summary, report))
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}
