// src/domain/geojson.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use crate::domain::slot::SlotState;
use crate::domain::spot::{Occupancy, Spot};
use crate::domain::style::FeatureStyle;
use crate::domain::ParseError;

// FeatureCollection
//  └── features[]
//       ├── geometry        (opaque)
//       └── properties
//            ├── nombre
//            ├── tipo
//            ├── precio
//            └── estado      "bloqueado" | {"AM": .., "PM": .., "Completo": ..}

#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Value,
    pub properties: SpotProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotProperties {
    pub nombre: String,
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub precio: f64,
    pub estado: Occupancy,
}

impl From<Feature> for Spot {
    fn from(f: Feature) -> Self {
        Spot {
            name: f.properties.nombre,
            kind: f.properties.tipo,
            price: f.properties.precio,
            occupancy: f.properties.estado,
            geometry: f.geometry,
        }
    }
}

/// Parse a feature collection into spots, rejecting duplicate names.
pub fn parse_spots(raw: &str) -> Result<Vec<Spot>, ParseError> {
    let collection: FeatureCollection =
        serde_json::from_str(raw).map_err(|e| ParseError::Json(e.to_string()))?;
    spots_from_collection(collection)
}

pub fn spots_from_collection(collection: FeatureCollection) -> Result<Vec<Spot>, ParseError> {
    let mut seen = HashSet::new();
    let mut spots = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        if !seen.insert(feature.properties.nombre.clone()) {
            return Err(ParseError::DuplicateSpot(feature.properties.nombre));
        }
        spots.push(Spot::from(feature));
    }
    Ok(spots)
}

// Outgoing features for the map widget.

#[derive(Debug, Serialize)]
pub struct StyledCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub features: Vec<StyledFeature>,
}

#[derive(Debug, Serialize)]
pub struct StyledFeature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub geometry: Value,
    pub properties: StyledProperties,
}

#[derive(Debug, Serialize)]
pub struct StyledProperties {
    #[serde(flatten)]
    pub spot: SpotProperties,
    pub aggregate: SlotState,
    pub style: FeatureStyle,
    pub popup: String,
}

impl StyledCollection {
    pub fn new(features: Vec<StyledFeature>) -> Self {
        Self {
            kind: "FeatureCollection",
            features,
        }
    }
}

impl StyledFeature {
    pub fn new(spot: &Spot, style: FeatureStyle, popup: String) -> Self {
        Self {
            kind: "Feature",
            geometry: spot.geometry.clone(),
            properties: StyledProperties {
                spot: SpotProperties {
                    nombre: spot.name.clone(),
                    tipo: spot.kind.clone(),
                    precio: spot.price,
                    estado: spot.occupancy.clone(),
                },
                aggregate: spot.aggregate_state(),
                style,
                popup,
            },
        }
    }
}
