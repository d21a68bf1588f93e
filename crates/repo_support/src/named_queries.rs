//! Externally defined named queries
//!
//! A named-queries file maps query names to chaincode function names in
//! properties/INI form. Section headers scope entries to one repository:
//!
//! ```ini
//! countAll = countAllAssets
//!
//! [AssetRepository]
//! findById = readAsset
//! ```
//!
//! becomes `countAll` plus `AssetRepository.findById`. Resolution tries the
//! repository-scoped name first, then the bare name. Query names are
//! case-insensitive: the configuration layer does not preserve key case, so
//! names are normalized to lowercase on load and on lookup.

use std::collections::BTreeMap;

use crate::error::SupportError;

/// Named queries loaded from a configured location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedQueries {
    queries: BTreeMap<String, String>,
}

impl NamedQueries {
    /// No queries defined; the state when no location is configured
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds queries from pairs, mostly for tests
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            queries: pairs
                .into_iter()
                .map(|(key, value)| (key.into().to_lowercase(), value.into()))
                .collect(),
        }
    }

    /// Loads a properties/INI file from `location`.
    ///
    /// A configured location that is missing or unreadable is a bootstrap
    /// error, never silently empty.
    pub fn load(location: &str) -> Result<Self, SupportError> {
        let raw = config::Config::builder()
            .add_source(config::File::new(location, config::FileFormat::Ini))
            .build()
            .map_err(|e| SupportError::named_queries(location, e.to_string()))?;
        let table: serde_json::Map<String, serde_json::Value> = raw
            .try_deserialize()
            .map_err(|e| SupportError::named_queries(location, e.to_string()))?;

        let mut queries = BTreeMap::new();
        for (key, value) in table {
            match value {
                serde_json::Value::Object(section) => {
                    for (name, function) in section {
                        queries.insert(
                            format!("{key}.{name}").to_lowercase(),
                            scalar_to_string(function),
                        );
                    }
                }
                scalar => {
                    queries.insert(key.to_lowercase(), scalar_to_string(scalar));
                }
            }
        }
        Ok(Self { queries })
    }

    /// Looks up a query by name, ignoring case
    pub fn get(&self, name: &str) -> Option<&str> {
        self.queries.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Resolves a query for one repository: `{scope}.{name}` first, bare
    /// `name` second.
    pub fn resolve(&self, scope: &str, name: &str) -> Option<&str> {
        self.get(&format!("{scope}.{name}")).or_else(|| self.get(name))
    }

    /// Defined query names, normalized and sorted
    pub fn names(&self) -> Vec<&str> {
        self.queries.keys().map(String::as_str).collect()
    }

    /// Number of defined queries
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Returns true when no queries are defined
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

fn scalar_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}
