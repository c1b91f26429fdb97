use colbind_core::{ClassDecl, ClassKind, TypeGraph, TypeIndex};

use crate::settings::CheckSettings;

/// Read-only collaborators shared by every validator of one run.
#[derive(Debug, Clone)]
pub struct ValidationContext<'g> {
    graph: &'g TypeGraph,
    index: TypeIndex<'g>,
    settings: &'g CheckSettings,
}

impl<'g> ValidationContext<'g> {
    pub fn new(graph: &'g TypeGraph, settings: &'g CheckSettings) -> Self {
        Self {
            graph,
            index: TypeIndex::new(graph),
            settings,
        }
    }

    pub fn graph(&self) -> &'g TypeGraph {
        self.graph
    }

    pub fn lookup(&self, name: &str) -> Option<&'g ClassDecl> {
        self.index.get(name)
    }

    /// Identity of the base persistent-object type.
    pub fn base_type(&self) -> &'g str {
        &self.settings.base_type
    }

    /// Identity of the column descriptor type.
    pub fn column_type(&self) -> &'g str {
        &self.settings.column_type
    }

    pub fn is_subclass(&self, name: &str, supertype: &str) -> bool {
        self.index.is_subtype(name, supertype)
    }

    pub fn is_object_type(&self, name: &str) -> bool {
        self.is_subclass(name, self.base_type())
    }

    /// Enum classes in the graph are always storable by the default codec.
    pub fn has_default_codec(&self, declared_type: &str) -> bool {
        self.settings
            .default_codec_types
            .iter()
            .any(|ty| ty == declared_type)
            || self
                .lookup(declared_type)
                .is_some_and(|class| class.kind == ClassKind::Enum)
    }
}
