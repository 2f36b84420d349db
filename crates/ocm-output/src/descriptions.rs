//! Column metadata for well known tables.
//!
//! Tables can ship a description with the header text and seed width of
//! their columns. Descriptions are YAML documents bundled in the binary and
//! looked up by table name; tables without one get synthesized headers and
//! widths.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{OutputError, Result};

/// Bundled descriptions as `(table_name, yaml)` pairs.
const BUNDLED_TABLES: &[(&str, &str)] = &[
    ("clusters", include_str!("tables/clusters.yaml")),
    ("idps", include_str!("tables/idps.yaml")),
    ("ingresses", include_str!("tables/ingresses.yaml")),
    ("machine_pools", include_str!("tables/machine_pools.yaml")),
    ("upgrade_policies", include_str!("tables/upgrade_policies.yaml")),
];

static REGISTRY: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| BUNDLED_TABLES.iter().copied().collect());

/// Metadata for one column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescription {
    /// Column name, as used in column specs.
    pub name: String,
    /// Header text; synthesized from the name when missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Seed width; the length of the name when missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
}

/// Metadata for the columns of a table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescription {
    #[serde(default)]
    pub columns: Vec<ColumnDescription>,
}

impl TableDescription {
    /// Parses a description from YAML.
    pub fn from_yaml(table: &str, yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|source| OutputError::InvalidDescription {
            table: table.to_string(),
            source,
        })
    }

    /// Finds the description of a column.
    pub fn column(&self, name: &str) -> Option<&ColumnDescription> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of all described columns, in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Looks up the bundled description of a table.
///
/// Returns `Ok(None)` for tables without a bundled description.
pub fn lookup(table: &str) -> Result<Option<TableDescription>> {
    REGISTRY
        .get(table)
        .map(|yaml| TableDescription::from_yaml(table, yaml))
        .transpose()
}

/// Names of all tables with a bundled description.
pub fn bundled() -> Vec<&'static str> {
    let mut names: Vec<_> = REGISTRY.keys().copied().collect();
    names.sort_unstable();
    names
}
