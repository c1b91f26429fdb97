use colbind_core::{ClassDecl, FieldMarker, MemberDecl, Modifier};

use crate::context::ValidationContext;
use crate::declaration::{DeclarationCheck, FIELD_MARKER, member_path};
use crate::errors::{CheckError, Diagnostic, Result, Severity};
use crate::sink::DiagnosticSink;

/// Validates one `@DbField` member.
#[derive(Debug, Clone, Copy)]
pub struct FieldValidator<'a> {
    class: &'a ClassDecl,
    member: &'a MemberDecl,
    marker: &'a FieldMarker,
}

impl<'a> FieldValidator<'a> {
    pub fn new(class: &'a ClassDecl, member: &'a MemberDecl) -> Result<Self> {
        let marker = member
            .field
            .as_ref()
            .ok_or_else(|| CheckError::MissingMarker {
                class: class.name.clone(),
                member: member.name.clone(),
                marker: FIELD_MARKER,
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

    /// The column name this field claims to bind to.
    pub fn column_name(&self) -> &'a str {
        &self.marker.column
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

    fn check_codec(&self, ctx: &ValidationContext<'_>, sink: &mut dyn DiagnosticSink) {
        let declared = self.member.declared_type.as_str();

        let Some(codec_name) = self.marker.codec.as_deref() else {
            if !ctx.has_default_codec(declared) {
                sink.emit(
                    self.error(
                        "field_no_default_codec",
                        format!("field type {declared} has no default codec"),
                    )
                    .with_hint("name a codec with @DbField(codec = ...)"),
                );
            }
            return;
        };

        let Some(codec) = ctx.lookup(codec_name).and_then(|class| class.codec.as_ref()) else {
            sink.emit(self.error(
                "codec_unknown",
                format!("{codec_name} is not a known field codec"),
            ));
            return;
        };

        if !ctx.is_subclass(declared, &codec.value_type) {
            sink.emit(self.error(
                "codec_value_type_mismatch",
                format!(
                    "codec {codec_name} can only be used with fields of type {}",
                    codec.value_type
                ),
            ));
        }

        if let Some(object_type) = codec.object_type.as_deref() {
            if !ctx.is_subclass(&self.class.name, object_type) {
                sink.emit(self.error(
                    "codec_object_type_mismatch",
                    format!(
                        "codec {codec_name} requires the containing object \
                         to conform to {object_type}"
                    ),
                ));
            }
        }
    }
}

impl DeclarationCheck for FieldValidator<'_> {
    fn check(&self, ctx: &ValidationContext<'_>, sink: &mut dyn DiagnosticSink) {
        if self.member.has_modifier(Modifier::Final) {
            sink.emit(self.error(
                "field_final",
                format!("@{FIELD_MARKER} cannot be applied to a final field"),
            ));
        }
        if self.member.has_modifier(Modifier::Static) {
            sink.emit(self.error(
                "field_static",
                format!("@{FIELD_MARKER} cannot be applied to a static field"),
            ));
        }
        if !ctx.is_object_type(&self.class.name) {
            sink.emit(self.error(
                "field_outside_object",
                format!(
                    "@{FIELD_MARKER} can only be applied to fields of subclasses of {}",
                    ctx.base_type()
                ),
            ));
        }

        self.check_codec(ctx, sink);
    }
}
