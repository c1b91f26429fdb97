use std::collections::BTreeSet;

use colbind_core::Modifier;

/// Visibility of a declaration, ordered from least to most permissive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccessSpec {
    Private,
    Package,
    Protected,
    Public,
}

impl AccessSpec {
    /// Absence of an explicit access modifier means package access.
    pub fn get(modifiers: &BTreeSet<Modifier>) -> Self {
        if modifiers.contains(&Modifier::Public) {
            AccessSpec::Public
        } else if modifiers.contains(&Modifier::Protected) {
            AccessSpec::Protected
        } else if modifiers.contains(&Modifier::Private) {
            AccessSpec::Private
        } else {
            AccessSpec::Package
        }
    }

    pub fn is_same_or_more_permissive(a: AccessSpec, b: AccessSpec) -> bool {
        a >= b
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessSpec::Private => "private",
            AccessSpec::Package => "package",
            AccessSpec::Protected => "protected",
            AccessSpec::Public => "public",
        }
    }
}
