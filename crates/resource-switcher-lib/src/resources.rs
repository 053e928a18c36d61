//! Resource definitions and the catalog used to resolve them.
//!
//! A [`ResourceCatalog`] is loaded from a CSV file and implements the
//! [`ResourceLibrary`] lookup that loadout metadata depends on.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};

/// Everything the switcher needs to know about one resource type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub name: String,
    pub display_name: String,
    /// Container volume occupied by a single unit.
    pub volume_per_unit: f64,
    pub unit_cost: f64,
}

impl ResourceDefinition {
    /// Validate a resource definition for correctness.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::InvalidResourceDefinition {
                message: "resource name must not be empty".to_string(),
            });
        }
        if !self.volume_per_unit.is_finite() || self.volume_per_unit <= 0.0 {
            return Err(ConfigError::InvalidResourceDefinition {
                message: format!(
                    "{}: volume_per_unit must be a finite positive number",
                    self.name
                ),
            });
        }
        if !self.unit_cost.is_finite() || self.unit_cost < 0.0 {
            return Err(ConfigError::InvalidResourceDefinition {
                message: format!("{}: unit_cost must be finite and non-negative", self.name),
            });
        }
        Ok(())
    }
}

/// Resolves resource identifiers to their definitions.
pub trait ResourceLibrary {
    /// Look up a resource by identifier. Returns `None` for unknown ids.
    fn resolve(&self, resource: &str) -> Option<&ResourceDefinition>;

    /// Known resource names, used for "did you mean" hints.
    fn names(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// Collection of resource definitions loaded from a CSV file.
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
    resources: HashMap<String, ResourceDefinition>,
    source: Option<PathBuf>,
}

impl ResourceCatalog {
    /// Build a catalog from already-constructed definitions.
    pub fn from_definitions<I>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = ResourceDefinition>,
    {
        let mut catalog = Self::default();
        for definition in definitions {
            catalog.insert(definition)?;
        }
        Ok(catalog)
    }

    /// Load a resource catalog from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let mut catalog = Self::from_reader(file)?;
        catalog.source = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Load a resource catalog from a reader (e.g., file or in-memory buffer).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|err| Error::ResourceData {
                message: format!("failed to read resource catalog headers: {err}"),
            })?
            .clone();

        let normalize = |s: &str| {
            s.to_ascii_lowercase()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect::<String>()
        };

        let normalized_headers: Vec<String> = headers.iter().map(&normalize).collect();

        // Canonical field name -> accepted header spellings
        let synonyms: &[(&str, &[&str])] = &[
            ("name", &["name", "resource", "resource_name", "resourcename"]),
            (
                "display_name",
                &["display_name", "displayname", "title", "label"],
            ),
            (
                "volume_per_unit",
                &[
                    "volume_per_unit",
                    "volume",
                    "unit_volume",
                    "unitvolume",
                    "volumeperunit",
                ],
            ),
            ("unit_cost", &["unit_cost", "unitcost", "cost"]),
        ];

        let mut index_map: BTreeMap<&str, usize> = BTreeMap::new();
        for (canon, alts) in synonyms {
            'outer: for alt in *alts {
                let alt_n = normalize(alt);
                for (i, h) in normalized_headers.iter().enumerate() {
                    if h == &alt_n {
                        index_map.insert(*canon, i);
                        break 'outer;
                    }
                }
            }
        }

        // display_name is optional and falls back to the resource name
        let missing: Vec<&str> = ["name", "volume_per_unit", "unit_cost"]
            .into_iter()
            .filter(|c| !index_map.contains_key(c))
            .collect();
        if !missing.is_empty() {
            return Err(Error::ResourceData {
                message: format!(
                    "resource catalog missing required columns: {}. Available: {}",
                    missing.join(", "),
                    headers
                        .iter()
                        .map(|h| h.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            });
        }

        let mut catalog = Self::default();
        let mut row: usize = 1;
        for result in csv_reader.records() {
            row += 1;
            let record = result.map_err(|e| Error::ResourceData {
                message: e.to_string(),
            })?;

            let get = |field: &str| -> Option<String> {
                index_map
                    .get(field)
                    .and_then(|&i| record.get(i))
                    .map(|s| s.trim().to_string())
            };
            let parse = |field: &str, name: &str| -> Result<f64> {
                get(field)
                    .filter(|value| !value.is_empty())
                    .ok_or_else(|| Error::ResourceData {
                        message: format!("missing {field} for resource '{name}' at row {row}"),
                    })?
                    .parse::<f64>()
                    .map_err(|e| Error::ResourceData {
                        message: format!("invalid {field} for resource '{name}' at row {row}: {e}"),
                    })
            };

            let name = get("name").unwrap_or_default();
            let display_name = get("display_name")
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| name.clone());
            let definition = ResourceDefinition {
                volume_per_unit: parse("volume_per_unit", &name)?,
                unit_cost: parse("unit_cost", &name)?,
                name,
                display_name,
            };
            catalog.insert(definition)?;
        }

        Ok(catalog)
    }

    /// Add a definition, rejecting invalid data and case-insensitive duplicates.
    pub fn insert(&mut self, definition: ResourceDefinition) -> Result<()> {
        definition.validate()?;
        let key = normalize_name(&definition.name);
        if self.resources.contains_key(&key) {
            return Err(Error::DuplicateResource { name: key });
        }
        self.resources.insert(key, definition);
        Ok(())
    }

    /// Get a resource by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&ResourceDefinition> {
        self.resources.get(&normalize_name(name))
    }

    /// Get all resources sorted by name.
    pub fn resources_sorted(&self) -> Vec<&ResourceDefinition> {
        let mut resources: Vec<&ResourceDefinition> = self.resources.values().collect();
        resources.sort_by(|a, b| a.name.cmp(&b.name));
        resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Get the source path if the catalog was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl ResourceLibrary for ResourceCatalog {
    fn resolve(&self, resource: &str) -> Option<&ResourceDefinition> {
        self.get(resource)
    }

    fn names(&self) -> Vec<&str> {
        self.resources.values().map(|r| r.name.as_str()).collect()
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// An amount of a named resource, as used by swap-cost declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRatio {
    pub resource: String,
    pub amount: f64,
}

/// Parse swap-cost text of the form `"Name,Amount,Name,Amount"`.
///
/// Empty text yields an empty list.
pub fn parse_resource_ratios(text: &str) -> Result<Vec<ResourceRatio>> {
    let invalid = |message: String| Error::InvalidResourceRatios {
        text: text.to_string(),
        message,
    };

    let tokens: Vec<&str> = text
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.len() % 2 != 0 {
        return Err(invalid(
            "expected alternating resource names and amounts".to_string(),
        ));
    }

    tokens
        .chunks(2)
        .map(|pair| {
            let amount = pair[1]
                .parse::<f64>()
                .map_err(|e| invalid(format!("amount for {}: {e}", pair[0])))?;
            if !amount.is_finite() || amount < 0.0 {
                return Err(invalid(format!(
                    "amount for {} must be finite and non-negative",
                    pair[0]
                )));
            }
            Ok(ResourceRatio {
                resource: pair[0].to_string(),
                amount,
            })
        })
        .collect()
}
