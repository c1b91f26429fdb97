use serde::{Deserialize, Serialize};

/// Settings that parameterize annotation checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckSettings {
    /// Required supertype of every class carrying `@DbObjectInfo`.
    pub base_type: String,
    /// Required declared type of every `@DbColumn` member.
    pub column_type: String,
    /// Field types the default codec can store.
    pub default_codec_types: Vec<String>,
    /// Treat warnings as failures.
    pub deny_warnings: bool,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            base_type: "DbObject".to_string(),
            column_type: "DbObjectColumn".to_string(),
            default_codec_types: [
                "boolean", "Boolean", "byte", "Byte", "short", "Short", "int", "Integer", "long",
                "Long", "String", "byte[]", "long[]",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            deny_warnings: false,
        }
    }
}
