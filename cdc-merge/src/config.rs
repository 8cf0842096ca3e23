//! Destination naming configuration.

use serde::{Deserialize, Serialize};

/// Name templates for the staging and replica destinations of consolidated tables.
///
/// Each template may reference any field present in the change row with a
/// `{field}` placeholder, so destinations can be routed per stream or per source
/// table, e.g. `"{_metadata_schema}_staging"`. Whatever the templates expand to,
/// the final references are sanitized into valid destination table identifiers by
/// the resolver.
///
/// Loading this configuration from files or the environment is the host binary's
/// concern; the resolver only consumes the resolved struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DestinationConfig {
    /// Dataset template for the staging table holding raw change events.
    pub staging_dataset: String,

    /// Table name template for the staging table.
    pub staging_table: String,

    /// Dataset template for the replica table holding consolidated rows.
    pub replica_dataset: String,

    /// Table name template for the replica table.
    pub replica_table: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_json() {
        let config: DestinationConfig = serde_json::from_str(
            r#"{
                "staging_dataset": "{_metadata_schema}_staging",
                "staging_table": "{_metadata_table}_log",
                "replica_dataset": "{_metadata_schema}",
                "replica_table": "{_metadata_table}"
            }"#,
        )
        .unwrap();

        assert_eq!(config.staging_dataset, "{_metadata_schema}_staging");
        assert_eq!(config.replica_table, "{_metadata_table}");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<DestinationConfig>(
            r#"{
                "staging_dataset": "a",
                "staging_table": "b",
                "replica_dataset": "c",
                "replica_table": "d",
                "extra": true
            }"#,
        );

        assert!(result.is_err());
    }
}
