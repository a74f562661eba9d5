use std::sync::Arc;
use std::time::Duration;

use encadre_common::config::{ApurConfig, Config, EstEnsembleConfig, ParisConfig};
use encadre_core::resolver::EstEnsembleDataset;
use encadre_core::service::RentControlService;
use encadre_core::transport::{DatasetTransport, HttpTransport};
use serde_json::{Value, json};

pub const PARIS_PATH: &str = "/paris/records";
pub const RENTS_PATH: &str = "/est-ensemble/rents.json";
pub const ZONES_PATH: &str = "/est-ensemble/zones.json";
pub const APUR_PATH: &str = "/apur/query";

/// Every dataset URL points at the mock server.
pub fn config(base: &str) -> Config {
    Config {
        paris: ParisConfig {
            records_url: format!("{base}{PARIS_PATH}"),
            ..ParisConfig::default()
        },
        est_ensemble: EstEnsembleConfig {
            rent_table_url: format!("{base}{RENTS_PATH}"),
            zones_url: format!("{base}{ZONES_PATH}"),
            ..EstEnsembleConfig::default()
        },
        apur: ApurConfig {
            query_url: format!("{base}{APUR_PATH}"),
            ..ApurConfig::default()
        },
        http_timeout_secs: 5,
        ..Config::default()
    }
}

pub fn transport() -> Arc<dyn DatasetTransport> {
    Arc::new(HttpTransport::new(Duration::from_secs(5)).unwrap())
}

pub fn service(base: &str) -> RentControlService {
    let dataset = Arc::new(EstEnsembleDataset::new());
    RentControlService::new(transport(), &config(base), dataset).unwrap()
}

/// One Paris quartier around La Chapelle, shaped like the Opendatasoft export.
pub fn paris_records() -> Value {
    json!({
        "total_count": 1,
        "results": [{
            "id_zone": 4,
            "id_quartier": 72,
            "nom_quartier": "La Chapelle",
            "piece": 2,
            "epoque": "Avant 1946",
            "meuble_txt": "non meublé",
            "ref": 25.0,
            "max": 30.0,
            "min": 17.5,
            "annee": "2025",
            "ville": "PARIS",
            "code_grand_quartier": "7511872",
            "geo_shape": {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [2.355, 48.880], [2.365, 48.880], [2.365, 48.895],
                        [2.355, 48.895], [2.355, 48.880]
                    ]]
                },
                "properties": {}
            },
            "geo_point_2d": { "lon": 2.360, "lat": 48.8875 }
        }]
    })
}

pub fn zones() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": { "zone": 312 },
            "geometry": { "type": "Polygon", "coordinates": [[
                [2.42, 48.85], [2.48, 48.85], [2.48, 48.87], [2.42, 48.87], [2.42, 48.85]
            ]] }
        }]
    })
}

pub fn rents() -> Value {
    json!([
        { "zone": 312, "nombre_de_piece": 2, "annee_de_construction": "avant 1946",
          "meuble": false, "maison": false,
          "prix_med": "16,9", "prix_max": "20,3", "prix_min": "11,8" },
        { "zone": 312, "nombre_de_piece": 3, "annee_de_construction": "apres 1990",
          "meuble": true, "maison": true,
          "prix_med": "15", "prix_max": "18", "prix_min": "10,5" }
    ])
}
