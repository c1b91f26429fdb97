use colbind_core::{ClassDecl, MemberDecl};

use crate::context::ValidationContext;
use crate::sink::DiagnosticSink;

/// Field marker name used in diagnostics.
pub const FIELD_MARKER: &str = "DbField";
/// Column marker name used in diagnostics.
pub const COLUMN_MARKER: &str = "DbColumn";
/// Schema metadata marker name used in diagnostics.
pub const OBJECT_INFO_MARKER: &str = "DbObjectInfo";

/// A single annotated declaration that can check itself in isolation.
pub trait DeclarationCheck {
    fn check(&self, ctx: &ValidationContext<'_>, sink: &mut dyn DiagnosticSink);
}

pub(crate) fn member_path(class: &ClassDecl, member: &MemberDecl) -> String {
    format!("{}.{}", class.name, member.name)
}
