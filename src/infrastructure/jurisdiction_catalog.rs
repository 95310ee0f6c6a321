// Jurisdiction catalog - immutable snapshot of the country/region hierarchy
use crate::application::jurisdiction_directory::JurisdictionDirectory;
use crate::domain::jurisdiction::{Jurisdiction, JurisdictionId};
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct RegionEntry {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "alpha-2", default)]
    alpha2: String,
    #[serde(rename = "alpha-3", default)]
    alpha3: String,
    #[serde(rename = "Alias", default)]
    alias: Option<Vec<String>>,
    #[serde(rename = "Regions", default)]
    regions: Option<Vec<RegionEntry>>,
    #[serde(rename = "Population", default)]
    population: i64,
    #[serde(rename = "MedianAge", default)]
    median_age: f64,
    #[serde(rename = "GDPPerCapPPP", default)]
    gdp_per_cap_ppp: f64,
}

#[derive(Debug, Default)]
pub struct JurisdictionCatalog {
    by_id: HashMap<JurisdictionId, Arc<Jurisdiction>>,
    countries: HashMap<String, JurisdictionId>,
    children: HashMap<JurisdictionId, Vec<JurisdictionId>>,
    region_names: HashMap<JurisdictionId, HashMap<String, JurisdictionId>>,
}

impl JurisdictionCatalog {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read jurisdictions from {}", path.display()))?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            "Loaded {} jurisdictions ({} countries) from {}",
            catalog.by_id.len(),
            catalog.countries_len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let entries: Vec<RegionEntry> =
            serde_json::from_str(json).context("Failed to parse jurisdiction data")?;
        let mut catalog = Self::default();
        for entry in entries {
            catalog.insert(entry, None);
        }
        Ok(catalog)
    }

    fn countries_len(&self) -> usize {
        self.by_id.values().filter(|j| j.is_root()).count()
    }

    fn insert(&mut self, entry: RegionEntry, parent: Option<JurisdictionId>) {
        let id = self.by_id.len() as JurisdictionId + 1;
        let mut jurisdiction = Jurisdiction::new(id, entry.name, parent);
        jurisdiction.alpha2 = entry.alpha2;
        jurisdiction.alpha3 = entry.alpha3;
        jurisdiction.aliases = entry.alias.unwrap_or_default();
        jurisdiction.population = entry.population;
        jurisdiction.median_age = entry.median_age;
        jurisdiction.gdp_per_cap_ppp = entry.gdp_per_cap_ppp;

        let names = match parent {
            Some(pid) => {
                self.children.entry(pid).or_default().push(id);
                self.region_names.entry(pid).or_default()
            }
            None => &mut self.countries,
        };
        let keys = [&jurisdiction.name, &jurisdiction.alpha2, &jurisdiction.alpha3]
            .into_iter()
            .chain(jurisdiction.aliases.iter())
            .filter(|k| !k.is_empty());
        for key in keys {
            names.entry(key.clone()).or_insert(id);
        }
        self.by_id.insert(id, Arc::new(jurisdiction));

        for sub in entry.regions.unwrap_or_default() {
            self.insert(sub, Some(id));
        }
    }
}

impl JurisdictionDirectory for JurisdictionCatalog {
    fn resolve(&self, name: &str) -> Option<Arc<Jurisdiction>> {
        let id = match name.parse::<JurisdictionId>() {
            Ok(id) => id,
            Err(_) => *self.countries.get(name)?,
        };
        self.by_id.get(&id).cloned()
    }

    fn region(&self, parent: &Jurisdiction, name: &str) -> Option<Arc<Jurisdiction>> {
        self.region_names
            .get(&parent.id)
            .and_then(|names| names.get(name))
            .and_then(|id| self.by_id.get(id).cloned())
            .or_else(|| self.resolve(name))
    }

    fn regions(&self, parent: &Jurisdiction) -> Vec<Arc<Jurisdiction>> {
        self.children
            .get(&parent.id)
            .map(|ids| ids.iter().filter_map(|id| self.by_id.get(id).cloned()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const COUNTRIES: &str = r#"[
        {
            "Name": "Canada", "alpha-2": "CA", "alpha-3": "CAN", "Population": 37000000,
            "MedianAge": 41.1, "GDPPerCapPPP": 48000,
            "Regions": [
                {"Name": "Ontario", "alpha-2": "ON", "Population": 14500000},
                {"Name": "Quebec", "alpha-2": "QC", "Population": 8500000},
                {"Name": "Alberta", "alpha-2": "AB", "Population": 4400000}
            ]
        },
        {
            "Name": "Netherlands", "alpha-2": "NL", "alpha-3": "NLD", "Alias": ["Holland"],
            "Population": 17000000, "Regions": null
        },
        {"Name": "Belgium", "alpha-2": "BE", "alpha-3": "BEL", "Population": 11500000, "Alias": null},
        {"Name": "Georgia", "alpha-2": "GE", "alpha-3": "GEO", "Population": 3700000}
    ]"#;

    pub(crate) fn catalog() -> JurisdictionCatalog {
        JurisdictionCatalog::from_json(COUNTRIES).unwrap()
    }

    #[test]
    fn test_resolve_by_name_code_alias_and_id() {
        let catalog = catalog();
        assert_eq!(catalog.by_id.len(), 7);

        let canada = catalog.resolve("Canada").unwrap();
        assert_eq!(canada.code(), "CAN");
        assert_eq!(catalog.resolve("CA").unwrap().id, canada.id);
        assert_eq!(catalog.resolve(&canada.id.to_string()).unwrap().name, "Canada");
        assert_eq!(catalog.resolve("Holland").unwrap().name, "Netherlands");
        assert!(catalog.resolve("Atlantis").is_none());
        // regions are not countries
        assert!(catalog.resolve("Ontario").is_none());
    }

    #[test]
    fn test_regions_keep_file_order() {
        let catalog = catalog();
        let canada = catalog.resolve("CAN").unwrap();

        let names: Vec<_> = catalog.regions(&canada).iter().map(|r| r.name.clone()).collect();
        assert_eq!(names, vec!["Ontario", "Quebec", "Alberta"]);
        let ontario = catalog.region(&canada, "ON").unwrap();
        assert_eq!(ontario.parent, Some(canada.id));
        assert_eq!(ontario.population, 14_500_000);

        let belgium = catalog.resolve("Belgium").unwrap();
        assert!(catalog.regions(&belgium).is_empty());
    }

    #[test]
    fn test_region_lookup_falls_back_to_countries() {
        let catalog = catalog();
        let canada = catalog.resolve("Canada").unwrap();
        assert_eq!(catalog.region(&canada, "Georgia").unwrap().code(), "GEO");
        assert!(catalog.region(&canada, "Yukon").is_none());
    }
}
