//! Static location lookup tables
//!
//! Three JSON maps drive canonicalization: bed wildcard → unit, unit →
//! (hospital, unit), and hospital alias → canonical hospital. The tables are
//! read once at startup and shared as `Arc<LocationTables>`.

use super::wildcard::bed_wildcard;
use crate::constants::DEFAULT_LOCATION_TABLES_JSON;
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, info};

/// On-disk layout of the lookup tables
#[derive(Debug, Deserialize)]
struct TableFile {
    bed_wildcard_to_unit: HashMap<String, String>,
    unit_to_canonical: HashMap<String, (String, String)>,
    hospital_to_canonical: HashMap<String, String>,
}

/// Read-only lookup tables for location canonicalization
#[derive(Debug, Clone)]
pub struct LocationTables {
    pub(crate) bed_wildcard_to_unit: HashMap<String, String>,
    pub(crate) unit_to_canonical: HashMap<String, (String, String)>,
    pub(crate) hospital_to_canonical: HashMap<String, String>,
    pub(crate) canonical_hospitals: BTreeSet<String>,
    pub(crate) canonical_units: BTreeSet<String>,
}

impl LocationTables {
    /// Build tables from JSON text
    ///
    /// Canonical hospitals and units are derived from the unit table, and
    /// every canonical hospital is added as an alias of itself.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: TableFile = serde_json::from_str(json).map_err(|e| {
            Error::configuration(format!("Invalid location table JSON: {}", e))
        })?;

        let canonical_hospitals: BTreeSet<String> = file
            .unit_to_canonical
            .values()
            .map(|(hospital, _)| hospital.clone())
            .collect();
        let canonical_units = file
            .unit_to_canonical
            .values()
            .map(|(_, unit)| unit.clone())
            .collect();

        let mut hospital_to_canonical = file.hospital_to_canonical;
        for hospital in &canonical_hospitals {
            hospital_to_canonical.insert(hospital.clone(), hospital.clone());
        }

        debug!(
            "Loaded location tables: {} bed wildcards, {} units, {} hospital aliases",
            file.bed_wildcard_to_unit.len(),
            file.unit_to_canonical.len(),
            hospital_to_canonical.len()
        );

        Ok(Self {
            bed_wildcard_to_unit: file.bed_wildcard_to_unit,
            unit_to_canonical: file.unit_to_canonical,
            hospital_to_canonical,
            canonical_hospitals,
            canonical_units,
        })
    }

    /// Tables compiled into the crate
    pub fn embedded() -> Result<Self> {
        Self::from_json(DEFAULT_LOCATION_TABLES_JSON)
    }

    /// Load tables from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read location tables {}", path.display()),
                e,
            )
        })?;
        let tables = Self::from_json(&json)?;
        info!("Using location tables from {}", path.display());
        Ok(tables)
    }

    /// Load from a file when given, else the embedded tables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    /// Canonical name for a hospital alias
    pub fn canonical_hospital(&self, name: &str) -> Option<&str> {
        self.hospital_to_canonical.get(name).map(String::as_str)
    }

    /// Canonical (hospital, unit) for a unit name
    pub fn canonical_unit(&self, unit: &str) -> Option<(&str, &str)> {
        self.unit_to_canonical
            .get(unit)
            .map(|(hospital, unit)| (hospital.as_str(), unit.as_str()))
    }

    /// Unit name for a bed id, matched through its wildcard form
    pub fn unit_for_bed(&self, bed: &str) -> Option<&str> {
        let wildcard = bed_wildcard(bed)?;
        self.bed_wildcard_to_unit.get(&wildcard).map(String::as_str)
    }

    pub fn is_canonical_hospital(&self, name: &str) -> bool {
        self.canonical_hospitals.contains(name)
    }

    pub fn is_canonical_unit(&self, unit: &str) -> bool {
        self.canonical_units.contains(unit)
    }

    pub fn canonical_hospitals(&self) -> impl Iterator<Item = &str> {
        self.canonical_hospitals.iter().map(String::as_str)
    }
}
