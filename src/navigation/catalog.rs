use log::info;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use super::error::{NavError, NavResult};
use super::models::{Category, MapLocation};

/// Where the point-of-interest list comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum CatalogSource {
    Builtin,
    File(PathBuf),
    Url(Url),
}

impl CatalogSource {
    /// Interprets `s` as an http(s) URL when it parses as one, otherwise as a file path.
    pub fn parse(s: &str) -> Self {
        match Url::parse(s) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => CatalogSource::Url(url),
            _ => CatalogSource::File(PathBuf::from(s)),
        }
    }
}

/// Fixed registry of the airport's points of interest.
#[derive(Clone, Debug)]
pub struct LocationCatalog {
    source: CatalogSource,
}

impl Default for LocationCatalog {
    fn default() -> Self {
        Self { source: CatalogSource::Builtin }
    }
}

impl LocationCatalog {
    pub fn new(source: CatalogSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Produces the full location list. Always yields the same list for a given source.
    pub fn initialize(&self) -> NavResult<Vec<MapLocation>> {
        let locations = match &self.source {
            CatalogSource::Builtin => builtin_layout(),
            CatalogSource::File(path) => load_file(path)?,
            CatalogSource::Url(url) => fetch_url(url)?,
        };
        validate(&locations)?;
        info!("catalog ready: {} locations from {:?}", locations.len(), self.source);
        Ok(locations)
    }
}

pub fn validate(locations: &[MapLocation]) -> NavResult<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(locations.len());
    for loc in locations {
        if !seen.insert(loc.id.as_str()) {
            return Err(NavError::DuplicateLocationId(loc.id.clone()));
        }
        if !loc.position.is_finite() {
            return Err(NavError::NonFinitePosition(loc.id.clone()));
        }
    }
    Ok(())
}

fn load_file(path: &Path) -> NavResult<Vec<MapLocation>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn fetch_url(url: &Url) -> NavResult<Vec<MapLocation>> {
    let resp = reqwest::blocking::get(url.as_str()).map_err(|e| NavError::Fetch(e.to_string()))?;
    if !resp.status().is_success() {
        return Err(NavError::Fetch(format!("HTTP {} from {}", resp.status(), url)));
    }
    let body = resp.text().map_err(|e| NavError::Fetch(e.to_string()))?;
    Ok(serde_json::from_str(&body)?)
}

/// Three-terminal layout: A to the west, B to the east, C to the south.
pub fn builtin_layout() -> Vec<MapLocation> {
    use Category::*;
    vec![
        // Terminal A gates
        MapLocation::new("A1", "Porte A1", Gate, [-50.0, 0.0, -30.0]).with_terminal("A").with_description("Vol AF1234 vers Paris"),
        MapLocation::new("A5", "Porte A5", Gate, [-40.0, 0.0, -30.0]).with_terminal("A").with_description("Vol BA567 vers London"),
        MapLocation::new("A10", "Porte A10", Gate, [-30.0, 0.0, -30.0]).with_terminal("A").with_description("Vol LH890 vers Frankfurt"),
        // Terminal B gates
        MapLocation::new("B12", "Porte B12", Gate, [30.0, 0.0, -30.0]).with_terminal("B").with_description("Vol EK123 vers Dubai"),
        MapLocation::new("B15", "Porte B15", Gate, [40.0, 0.0, -30.0]).with_terminal("B").with_description("Vol AA456 vers New York"),
        MapLocation::new("B20", "Porte B20", Gate, [50.0, 0.0, -30.0]).with_terminal("B").with_description("Vol QR789 vers Doha"),
        // Terminal C gates
        MapLocation::new("C5", "Porte C5", Gate, [0.0, 0.0, 50.0]).with_terminal("C").with_description("Vol TK111 vers Istanbul"),
        MapLocation::new("C10", "Porte C10", Gate, [10.0, 0.0, 50.0]).with_terminal("C").with_description("Vol SV222 vers Riyadh"),
        // Shops
        MapLocation::new("duty1", "Duty Free Central", Shop, [0.0, 0.0, 0.0]).with_open(true).with_description("Parfums, alcools, souvenirs"),
        MapLocation::new("shop1", "Boutique Mode", Shop, [-20.0, 0.0, 10.0]).with_open(true).with_description("Vêtements et accessoires"),
        MapLocation::new("shop2", "Électronique", Shop, [20.0, 0.0, 10.0]).with_open(true).with_description("Téléphones, écouteurs, gadgets"),
        // Restaurants
        MapLocation::new("rest1", "Café Central", Restaurant, [-10.0, 0.0, 5.0]).with_open(true).with_description("Café, sandwichs, pâtisseries"),
        MapLocation::new("rest2", "Restaurant Méditerranéen", Restaurant, [15.0, 0.0, 5.0]).with_open(true).with_description("Cuisine méditerranéenne"),
        MapLocation::new("rest3", "Fast Food", Restaurant, [0.0, 0.0, 20.0]).with_open(true).with_description("Burgers, pizzas"),
        // Security and baggage
        MapLocation::new("security1", "Contrôle Sécurité A", Security, [-40.0, 0.0, 0.0]).with_wait_time(15).with_description("Point de contrôle principal Terminal A"),
        MapLocation::new("security2", "Contrôle Sécurité B", Security, [40.0, 0.0, 0.0]).with_wait_time(8).with_description("Point de contrôle principal Terminal B"),
        MapLocation::new("baggage1", "Récupération Bagages 1", Baggage, [-30.0, 0.0, 30.0]).with_description("Vols européens"),
        MapLocation::new("baggage2", "Récupération Bagages 2", Baggage, [30.0, 0.0, 30.0]).with_description("Vols internationaux"),
        // Parking
        MapLocation::new("parking1", "Parking P1", Parking, [-70.0, 0.0, 70.0]).with_description("Parking courte durée"),
        MapLocation::new("parking2", "Parking P2", Parking, [70.0, 0.0, 70.0]).with_description("Parking longue durée"),
        // Customer service
        MapLocation::new("info1", "Information Central", Service, [0.0, 0.0, -10.0]).with_open(true).with_description("Renseignements et assistance"),
        MapLocation::new("lost1", "Objets Perdus", Service, [-25.0, 0.0, 20.0]).with_open(true).with_description("Service objets perdus"),
        // Emergency exits
        MapLocation::new("exit1", "Sortie Urgence A", Exit, [-60.0, 0.0, -20.0]).with_description("Sortie de secours Terminal A"),
        MapLocation::new("exit2", "Sortie Urgence B", Exit, [60.0, 0.0, -20.0]).with_description("Sortie de secours Terminal B"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn builtin_ids_are_unique() {
        let locs = LocationCatalog::default().initialize().unwrap();
        assert_eq!(locs.len(), 24);
        let ids: HashSet<&str> = locs.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids.len(), locs.len());
    }

    #[test]
    fn initialize_is_repeatable() {
        let cat = LocationCatalog::default();
        assert_eq!(cat.initialize().unwrap(), cat.initialize().unwrap());
    }

    #[test]
    fn source_parse_distinguishes_urls_from_paths() {
        assert!(matches!(CatalogSource::parse("https://example.org/pois.json"), CatalogSource::Url(_)));
        assert_eq!(CatalogSource::parse("data/pois.json"), CatalogSource::File(PathBuf::from("data/pois.json")));
    }

    #[test]
    fn file_catalog_rejects_duplicate_ids() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"[{{"id":"g1","name":"G","category":"gate","position":[0,0,0]}},
               {{"id":"g1","name":"G again","category":"gate","position":[1,0,1]}}]"#
        )
        .unwrap();
        let err = LocationCatalog::new(CatalogSource::File(tmp.path().to_path_buf())).initialize().unwrap_err();
        assert!(matches!(err, NavError::DuplicateLocationId(id) if id == "g1"));
    }

    #[test]
    fn file_catalog_loads_in_order() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(
            tmp,
            r#"[{{"id":"b","name":"Bag","category":"baggage","position":[2,0,2]}},
               {{"id":"a","name":"Gate","category":"gate","position":[1,0,1],"terminal":"A"}}]"#
        )
        .unwrap();
        let locs = LocationCatalog::new(CatalogSource::File(tmp.path().to_path_buf())).initialize().unwrap();
        assert_eq!(locs.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(locs[1].terminal.as_deref(), Some("A"));
    }

    #[test]
    fn validate_rejects_non_finite_positions() {
        let bad = vec![MapLocation::new("x", "X", Category::Exit, [f64::NAN, 0.0, 0.0])];
        assert!(matches!(validate(&bad), Err(NavError::NonFinitePosition(_))));
    }
}
