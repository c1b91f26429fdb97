use colbind_core::{ClassDecl, ClassKind, MemberDecl};

use crate::access::AccessSpec;
use crate::column::ColumnValidator;
use crate::context::ValidationContext;
use crate::declaration::{
    COLUMN_MARKER, DeclarationCheck, FIELD_MARKER, OBJECT_INFO_MARKER, member_path,
};
use crate::errors::{Diagnostic, Result, Severity};
use crate::field::FieldValidator;
use crate::registry::NamedRegistry;
use crate::sink::DiagnosticSink;

/// Validates the annotated fields, columns, and class-level metadata of one class.
///
/// Fields and columns are keyed by column name in two independent registries.
/// Registering a name twice replaces the earlier declaration.
#[derive(Debug)]
pub struct ObjectValidator<'a> {
    ctx: &'a ValidationContext<'a>,
    class: &'a ClassDecl,
    fields_by_name: NamedRegistry<FieldValidator<'a>>,
    columns_by_name: NamedRegistry<ColumnValidator<'a>>,
}

impl<'a> ObjectValidator<'a> {
    pub fn new(ctx: &'a ValidationContext<'a>, class: &'a ClassDecl) -> Self {
        Self {
            ctx,
            class,
            fields_by_name: NamedRegistry::default(),
            columns_by_name: NamedRegistry::default(),
        }
    }

    /// Add a member carrying `@DbField`, keyed by the column it binds to.
    pub fn register_field(&mut self, member: &'a MemberDecl) -> Result<()> {
        let field = FieldValidator::new(self.class, member)?;
        self.fields_by_name.insert(field.column_name(), field);
        Ok(())
    }

    /// Add a member carrying `@DbColumn`, keyed by its own column name.
    pub fn register_column(&mut self, member: &'a MemberDecl) -> Result<()> {
        let column = ColumnValidator::new(self.class, member)?;
        self.columns_by_name.insert(column.column_name(), column);
        Ok(())
    }

    pub fn field_count(&self) -> usize {
        self.fields_by_name.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns_by_name.len()
    }

    /// Run class-level checks, per-declaration checks, then pairing checks.
    ///
    /// Every applicable diagnostic is emitted; nothing stops early.
    pub fn validate(&self, sink: &mut dyn DiagnosticSink) {
        self.validate_class(sink);
        self.validate_fields(sink);
        self.validate_columns(sink);
        self.check_missing(sink);
    }

    fn class_error(&self, code: &str, message: String) -> Diagnostic {
        Diagnostic::new(Severity::Error, code, self.class.name.as_str(), message, None)
            .at(self.class.location.as_ref())
    }

    fn validate_class(&self, sink: &mut dyn DiagnosticSink) {
        let info = self.class.object_info.as_ref();
        let is_abstract = self.class.is_abstract();

        if info.is_some() && self.class.kind != ClassKind::Class {
            let shape = match self.class.kind {
                ClassKind::Enum => "an enum",
                _ => "an interface",
            };
            sink.emit(self.class_error(
                "object_info_on_non_class",
                format!("@{OBJECT_INFO_MARKER} cannot be applied to {shape}"),
            ));
        } else if info.is_some() && is_abstract {
            sink.emit(self.class_error(
                "object_info_on_abstract",
                format!("@{OBJECT_INFO_MARKER} cannot be applied to an abstract class"),
            ));
        }

        if info.is_some() && !self.ctx.is_object_type(&self.class.name) {
            sink.emit(self.class_error(
                "object_info_not_subclass",
                format!(
                    "@{OBJECT_INFO_MARKER} can only be applied to subclasses of {}",
                    self.ctx.base_type()
                ),
            ));
        }

        if info.is_none() && !is_abstract {
            sink.emit(
                self.class_error(
                    "object_info_missing",
                    format!(
                        "Non-abstract subclasses of {} must have @{OBJECT_INFO_MARKER} annotation",
                        self.ctx.base_type()
                    ),
                )
                .with_hint("add @DbObjectInfo(version = ...) or declare the class abstract"),
            );
        }

        if let Some(info) = info {
            if info.version < 0 {
                sink.emit(self.class_error(
                    "object_info_negative_version",
                    format!(
                        "@{OBJECT_INFO_MARKER}.version cannot be negative (found {})",
                        info.version
                    ),
                ));
            }
        }
    }

    fn validate_fields(&self, sink: &mut dyn DiagnosticSink) {
        for field in self.fields_by_name.values() {
            field.check(self.ctx, sink);
        }
    }

    fn validate_columns(&self, sink: &mut dyn DiagnosticSink) {
        for column in self.columns_by_name.values() {
            column.check(self.ctx, sink);
        }
    }

    /// Pair fields with columns by name over the union of both registries.
    fn check_missing(&self, sink: &mut dyn DiagnosticSink) {
        if self.fields_by_name.is_empty() && self.columns_by_name.is_empty() {
            return;
        }

        let is_abstract = self.class.is_abstract();
        let names = self.fields_by_name.names().chain(
            self.columns_by_name
                .names()
                .filter(|name| !self.fields_by_name.contains(name)),
        );

        for name in names {
            match (self.fields_by_name.get(name), self.columns_by_name.get(name)) {
                (None, Some(column)) if !is_abstract => {
                    let member = column.member();
                    sink.emit(
                        Diagnostic::new(
                            Severity::Error,
                            "column_without_field",
                            member_path(self.class, member),
                            format!(
                                "@{COLUMN_MARKER} is missing corresponding @{FIELD_MARKER} \
                                 of the same column name: {name}"
                            ),
                            None,
                        )
                        .at(member.location.as_ref()),
                    );
                }
                (Some(field), None) if !is_abstract => {
                    let member = field.member();
                    sink.emit(
                        Diagnostic::new(
                            Severity::Warning,
                            "field_without_column",
                            member_path(self.class, member),
                            format!(
                                "@{FIELD_MARKER} is missing corresponding @{COLUMN_MARKER} \
                                 of the same column name: {name}"
                            ),
                            None,
                        )
                        .at(member.location.as_ref()),
                    );
                }
                (Some(field), Some(column)) => {
                    self.check_access(field.member(), column.member(), name, sink);
                }
                _ => {}
            }
        }
    }

    fn check_access(
        &self,
        field: &MemberDecl,
        column: &MemberDecl,
        name: &str,
        sink: &mut dyn DiagnosticSink,
    ) {
        let field_spec = AccessSpec::get(&field.modifiers);
        let column_spec = AccessSpec::get(&column.modifiers);
        if !AccessSpec::is_same_or_more_permissive(field_spec, column_spec) {
            sink.emit(
                Diagnostic::new(
                    Severity::Warning,
                    "access_mismatch",
                    member_path(self.class, column),
                    format!(
                        "field with @{FIELD_MARKER} should have same or greater access than field \
                         with corresponding @{COLUMN_MARKER} for column name: {name}"
                    ),
                    Some(format!(
                        "field is {}, column is {}",
                        field_spec.as_str(),
                        column_spec.as_str()
                    )),
                )
                .at(column.location.as_ref()),
            );
        }
    }
}
