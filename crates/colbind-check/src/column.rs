use colbind_core::{ClassDecl, ColumnMarker, MemberDecl, Modifier};

use crate::context::ValidationContext;
use crate::declaration::{COLUMN_MARKER, DeclarationCheck, member_path};
use crate::errors::{CheckError, Diagnostic, Result, Severity};
use crate::sink::DiagnosticSink;

/// Validates one `@DbColumn` member.
#[derive(Debug, Clone, Copy)]
pub struct ColumnValidator<'a> {
    class: &'a ClassDecl,
    member: &'a MemberDecl,
    marker: &'a ColumnMarker,
}

impl<'a> ColumnValidator<'a> {
    pub fn new(class: &'a ClassDecl, member: &'a MemberDecl) -> Result<Self> {
        let marker = member
            .column
            .as_ref()
            .ok_or_else(|| CheckError::MissingMarker {
                class: class.name.clone(),
                member: member.name.clone(),
                marker: COLUMN_MARKER,
            })?;
        Ok(Self {
            class,
            member,
            marker,
        })
    }

    pub fn member(&self) -> &'a MemberDecl {
        self.member
    }

    pub fn column_name(&self) -> &'a str {
        &self.marker.value
    }

    fn error(&self, code: &str, message: String) -> Diagnostic {
        Diagnostic::new(
            Severity::Error,
            code,
            member_path(self.class, self.member),
            message,
            None,
        )
        .at(self.member.location.as_ref())
    }
}

impl DeclarationCheck for ColumnValidator<'_> {
    fn check(&self, ctx: &ValidationContext<'_>, sink: &mut dyn DiagnosticSink) {
        if !ctx.is_subclass(&self.member.declared_type, ctx.column_type()) {
            sink.emit(self.error(
                "column_wrong_type",
                format!(
                    "@{COLUMN_MARKER} can only be applied to fields of type {}",
                    ctx.column_type()
                ),
            ));
        }
        // The store assigns descriptors once the table is opened.
        if self.member.has_modifier(Modifier::Final) {
            sink.emit(self.error(
                "column_final",
                format!("@{COLUMN_MARKER} cannot be applied to a final field"),
            ));
        }
        if !self.member.has_modifier(Modifier::Static) {
            sink.emit(self.error(
                "column_not_static",
                format!("@{COLUMN_MARKER} must be applied to a static field"),
            ));
        }
        if self.marker.value.is_empty() {
            sink.emit(self.error(
                "column_name_empty",
                format!("@{COLUMN_MARKER} requires a non-empty column name"),
            ));
        }
    }
}
