use crate::config::Config;
use crate::errors::AppError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Logical reference of the HaalCentraal BRP source.
pub const SOURCE_REF: &str = "stuf.haalcentraal.source";
/// Logical reference of the HaalCentraal-to-La01 mapping definition.
pub const MAPPING_REF: &str = "stuf.haalCentraalToLa01.mapping";

/// A configured upstream source.
#[derive(Debug, Clone, Deserialize)]
pub struct Source {
    /// Base location; fetch endpoints are paths relative to this.
    pub location: String,
    /// Optional `X-API-KEY` value for authenticated sources.
    pub api_key: Option<String>,
}

/// A declarative mapping definition resolved by logical reference.
///
/// The definition is a JSON tree in the shape of the target document; leaf
/// strings are dotted paths into the input record (or `const:` literals).
#[derive(Debug, Clone)]
pub struct Mapping {
    pub reference: String,
    pub definition: Value,
}

/// Registry of sources and mappings, resolved by logical reference string.
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    sources: HashMap<String, Source>,
    mappings: HashMap<String, Mapping>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the store from configuration: registers the BRP source and
    /// loads the La01 mapping definition from disk.
    pub fn bootstrap(config: &Config) -> Result<Self, AppError> {
        let mut store = Self::new();

        store.register_source(
            SOURCE_REF,
            Source {
                location: config.brp_base_url.clone(),
                api_key: config.brp_api_key.clone(),
            },
        );

        let raw = std::fs::read_to_string(&config.mapping_file).map_err(|e| {
            AppError::ConfigMissing(format!(
                "cannot read mapping definition {}: {}",
                config.mapping_file, e
            ))
        })?;
        let definition: Value = serde_json::from_str(&raw).map_err(|e| {
            AppError::ConfigMissing(format!(
                "mapping definition {} is not valid JSON: {}",
                config.mapping_file, e
            ))
        })?;
        store.register_mapping(
            MAPPING_REF,
            Mapping {
                reference: MAPPING_REF.to_string(),
                definition,
            },
        );

        Ok(store)
    }

    pub fn register_source(&mut self, reference: &str, source: Source) {
        self.sources.insert(reference.to_string(), source);
    }

    pub fn register_mapping(&mut self, reference: &str, mapping: Mapping) {
        self.mappings.insert(reference.to_string(), mapping);
    }

    pub fn get_source(&self, reference: &str) -> Option<&Source> {
        self.sources.get(reference)
    }

    pub fn get_mapping(&self, reference: &str) -> Option<&Mapping> {
        self.mappings.get(reference)
    }
}
