use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::graph::build_hierarchy_report;
use crate::schema::TypeGraph;

/// Validate internal consistency of a type graph.
///
/// This checks:
/// - duplicate class names
/// - duplicate member names within a class
/// - empty class or member names
/// - inheritance cycles
pub fn validate_graph(graph: &TypeGraph) -> Result<()> {
    let mut classes = BTreeSet::new();

    for class in &graph.classes {
        if class.name.is_empty() {
            return Err(Error::InvalidGraph("class with empty name".to_string()));
        }
        if !classes.insert(class.name.as_str()) {
            return Err(Error::InvalidGraph(format!(
                "duplicate class name: {}",
                class.name
            )));
        }

        let mut members = BTreeSet::new();
        for member in &class.members {
            if member.name.is_empty() {
                return Err(Error::InvalidGraph(format!(
                    "member with empty name in {}",
                    class.name
                )));
            }
            if !members.insert(member.name.as_str()) {
                return Err(Error::InvalidGraph(format!(
                    "duplicate member name: {}.{}",
                    class.name, member.name
                )));
            }
        }
    }

    let report = build_hierarchy_report(graph);
    if let Some(cycle) = report.cycle {
        return Err(Error::InvalidGraph(format!(
            "inheritance cycle through: {}",
            cycle.join(", ")
        )));
    }

    Ok(())
}
