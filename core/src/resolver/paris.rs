//! Paris resolver, backed by the `logement-encadrement-des-loyers` records API.
//!
//! The API is filtered down to the requested category, which leaves one record per
//! quartier. The quartier whose polygon contains the point wins; when none does
//! (gaps between polygons, precision artifacts) the quartier with the closest
//! centroid is used and the match is flagged as degraded.

use std::sync::Arc;

use encadre_common::category::RegulationCategory;
use encadre_common::config::ParisConfig;
use encadre_common::error::LookupError;
use encadre_common::geo::{AxisOrder, GeoPoint, Geometry, ZonePolygon, ZoneShape};
use encadre_common::rates::{MatchQuality, RateSchedule};
use encadre_common::utils::decimal;
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::transport::{self, DatasetTransport};
use crate::vocabulary;

#[derive(Debug, Deserialize)]
struct RecordsPage {
    #[serde(default)]
    results: Vec<RentRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct RentRecord {
    nom_quartier: String,
    #[serde(rename = "ref", default, deserialize_with = "decimal::deserialize_lenient")]
    reference: Option<f64>,
    #[serde(default, deserialize_with = "decimal::deserialize_lenient")]
    max: Option<f64>,
    #[serde(default, deserialize_with = "decimal::deserialize_lenient")]
    min: Option<f64>,
    #[serde(default, deserialize_with = "decimal::deserialize_text")]
    annee: String,
    #[serde(default, deserialize_with = "decimal::deserialize_text")]
    piece: String,
    #[serde(default)]
    epoque: String,
    #[serde(default)]
    meuble_txt: String,
    #[serde(default)]
    geo_shape: Option<GeoShape>,
    #[serde(default)]
    geo_point_2d: Option<LatLon>,
}

impl RentRecord {
    /// `None` when any of the three rates is missing or unreadable.
    fn schedule(&self) -> Option<RateSchedule> {
        Some(RateSchedule::new(self.reference?, self.max?, self.min?))
    }
}

#[derive(Debug, Clone, Deserialize)]
struct GeoShape {
    geometry: Option<Geometry>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct LatLon {
    lat: f64,
    lon: f64,
}

/// A Paris quartier and its rates, with the category echoed in dataset vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct ParisMatch {
    pub quartier: String,
    pub schedule: RateSchedule,
    pub annee: String,
    pub piece: String,
    pub epoque: String,
    pub meuble_txt: String,
    pub quality: MatchQuality,
}

pub struct ParisResolver {
    transport: Arc<dyn DatasetTransport>,
    records_url: Url,
    reference_year: String,
    record_limit: u32,
    axis_order: AxisOrder,
}

impl ParisResolver {
    pub fn new(
        transport: Arc<dyn DatasetTransport>,
        config: &ParisConfig,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            transport,
            records_url: Url::parse(&config.records_url)?,
            reference_year: config.reference_year.clone(),
            record_limit: config.record_limit,
            axis_order: config.axis_order,
        })
    }

    /// Finds the quartier containing `point` and its rates for `category`.
    ///
    /// `Ok(None)` means the filtered record set was empty, or the quartier found has
    /// unreadable rates. Transport failures are returned as errors and never
    /// retried here.
    pub async fn resolve(
        &self,
        point: &GeoPoint,
        category: &RegulationCategory,
    ) -> Result<Option<ParisMatch>, LookupError> {
        let url = self.query_url(category);
        debug!("Paris lookup at {point} with {}", url.query().unwrap_or_default());

        let page: RecordsPage = transport::get_json(self.transport.as_ref(), &url).await?;
        debug!("Paris dataset returned {} records", page.results.len());

        if page.results.is_empty() {
            warn!("No Paris record matches this category");
            return Ok(None);
        }

        let unreadable = page.results.iter().filter(|r| r.schedule().is_none()).count();
        if unreadable > 0 {
            warn!("{unreadable} Paris records have unreadable rates");
        }

        let Some((record, schedule, quality)) = locate(page.results, point, self.axis_order)
        else {
            warn!("No Paris quartier could be matched to {point}");
            return Ok(None);
        };

        super::check_schedule(&record.nom_quartier, &schedule);

        Ok(Some(ParisMatch {
            quartier: record.nom_quartier,
            schedule,
            annee: if record.annee.is_empty() {
                self.reference_year.clone()
            } else {
                record.annee
            },
            piece: record.piece,
            epoque: record.epoque,
            meuble_txt: record.meuble_txt,
            quality,
        }))
    }

    fn query_url(&self, category: &RegulationCategory) -> Url {
        let where_clause = format!(
            "piece=\"{}\" AND epoque=\"{}\" AND meuble_txt=\"{}\" AND annee=\"{}\"",
            vocabulary::paris::piece(category.room_count),
            vocabulary::paris::epoque(category.construction_period),
            vocabulary::paris::meuble_txt(category.is_furnished),
            self.reference_year,
        );

        let mut url = self.records_url.clone();
        url.query_pairs_mut()
            .append_pair("where", &where_clause)
            .append_pair("limit", &self.record_limit.to_string());
        url
    }
}

/// Picks the record for `point`: first containing polygon, else nearest centroid.
///
/// A containing quartier with unreadable rates yields nothing rather than a
/// neighbour's rates. The centroid fallback only ranks records with readable rates.
fn locate(
    records: Vec<RentRecord>,
    point: &GeoPoint,
    axis_order: AxisOrder,
) -> Option<(RentRecord, RateSchedule, MatchQuality)> {
    let containing = records.iter().position(|record| {
        zone_of(record, point, axis_order).is_some_and(|zone| zone.contains(point))
    });

    if let Some(idx) = containing {
        let record = records.into_iter().nth(idx)?;
        info!("Point {point} is inside quartier {}", record.nom_quartier);
        let Some(schedule) = record.schedule() else {
            warn!("Quartier {} has unreadable rates", record.nom_quartier);
            return None;
        };
        return Some((record, schedule, MatchQuality::Exact));
    }

    warn!("No quartier polygon contains {point}, falling back to the nearest centroid");

    let (record, schedule, distance_km) = records
        .into_iter()
        .filter_map(|record| {
            let schedule = record.schedule()?;
            let centre = record.geo_point_2d?;
            let distance = point.distance_km(&GeoPoint::new(centre.lat, centre.lon));
            debug!("Quartier {}: {distance:.3} km from centroid", record.nom_quartier);
            Some((record, schedule, distance))
        })
        .min_by(|a, b| a.2.total_cmp(&b.2))?;

    warn!(
        "Degraded match: nearest quartier is {} ({distance_km:.3} km)",
        record.nom_quartier
    );
    Some((record, schedule, MatchQuality::NearestCentroid { distance_km }))
}

fn zone_of(record: &RentRecord, point: &GeoPoint, axis_order: AxisOrder) -> Option<ZonePolygon> {
    let geometry = record.geo_shape.as_ref()?.geometry.as_ref()?;
    let shape = ZoneShape::from_geometry(geometry)?;
    let centroid = record
        .geo_point_2d
        .map(|centre| GeoPoint::new(centre.lat, centre.lon));
    Some(ZonePolygon::new(
        record.nom_quartier.clone(),
        shape,
        axis_order,
        centroid,
        Some(point),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::fake::FakeTransport;
    use encadre_common::category::{BuildingType, ConstructionPeriod, RoomCount};
    use serde_json::{Value, json};

    const URL: &str = "https://paris.test/records";

    fn category() -> RegulationCategory {
        RegulationCategory::new(
            RoomCount::Two,
            ConstructionPeriod::Before1946,
            false,
            BuildingType::Apartment,
        )
    }

    fn config() -> ParisConfig {
        ParisConfig {
            records_url: URL.to_string(),
            ..ParisConfig::default()
        }
    }

    /// Axis-aligned box in `[lon, lat]`, with the centroid at its centre.
    fn record(name: &str, lon: (f64, f64), lat: (f64, f64), rates: (f64, f64, f64)) -> Value {
        json!({
            "nom_quartier": name,
            "ref": rates.0.to_string(),
            "max": rates.1.to_string(),
            "min": rates.2.to_string(),
            "annee": "2025",
            "piece": 2,
            "epoque": "Avant 1946",
            "meuble_txt": "non meublé",
            "geo_shape": {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [lon.0, lat.0], [lon.1, lat.0], [lon.1, lat.1],
                        [lon.0, lat.1], [lon.0, lat.0]
                    ]]
                },
                "properties": {}
            },
            "geo_point_2d": { "lat": (lat.0 + lat.1) / 2.0, "lon": (lon.0 + lon.1) / 2.0 }
        })
    }

    /// Two quartiers side by side with a thin unclaimed strip between them.
    fn two_quartiers() -> Value {
        json!({
            "results": [
                record("Villette", (2.370, 2.380), (48.880, 48.890), (28.0, 33.6, 19.6)),
                record("Chapelle", (2.355, 2.3649), (48.880, 48.890), (27.0, 32.4, 18.9)),
            ]
        })
    }

    fn resolver(transport: Arc<FakeTransport>) -> ParisResolver {
        ParisResolver::new(transport, &config()).unwrap()
    }

    #[test]
    fn test_query_url_filters_category_and_year() {
        let r = resolver(Arc::new(FakeTransport::new()));
        let url = r.query_url(&category());
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs[0],
            (
                "where".to_string(),
                "piece=\"2\" AND epoque=\"Avant 1946\" AND meuble_txt=\"non meublé\" AND annee=\"2025\""
                    .to_string()
            )
        );
        assert_eq!(pairs[1], ("limit".to_string(), "100".to_string()));
    }

    #[tokio::test]
    async fn test_point_inside_polygon() {
        let t = Arc::new(FakeTransport::new().with_json(URL, two_quartiers()));
        let r = resolver(t.clone());

        let found = r
            .resolve(&GeoPoint::new(48.885, 2.360), &category())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.quartier, "Chapelle");
        assert_eq!(found.schedule, RateSchedule::new(27.0, 32.4, 18.9));
        assert_eq!(found.quality, MatchQuality::Exact);
        assert_eq!(found.piece, "2");
        assert_eq!(found.annee, "2025");
        assert_eq!(t.calls(), 1);
    }

    #[tokio::test]
    async fn test_lat_lon_polygons_are_pinned_by_auto_detection() {
        // Same geometry, stored as [lat, lon].
        let mut body = two_quartiers();
        for rec in body["results"].as_array_mut().unwrap() {
            let ring = rec["geo_shape"]["geometry"]["coordinates"][0]
                .as_array_mut()
                .unwrap();
            for pos in ring.iter_mut() {
                let pair = pos.as_array().unwrap().clone();
                *pos = json!([pair[1], pair[0]]);
            }
        }
        let t = Arc::new(FakeTransport::new().with_json(URL, body));
        let r = resolver(t);

        let found = r
            .resolve(&GeoPoint::new(48.885, 2.375), &category())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.quartier, "Villette");
        assert_eq!(found.quality, MatchQuality::Exact);
    }

    #[tokio::test]
    async fn test_wrongly_pinned_order_misses_every_polygon() {
        let t = Arc::new(FakeTransport::new().with_json(URL, two_quartiers()));
        let cfg = ParisConfig {
            axis_order: AxisOrder::LatLon,
            ..config()
        };
        let r = ParisResolver::new(t, &cfg).unwrap();

        let found = r
            .resolve(&GeoPoint::new(48.885, 2.375), &category())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(found.quality, MatchQuality::NearestCentroid { .. }));
    }

    #[tokio::test]
    async fn test_seam_between_quartiers_falls_back_to_nearest_centroid() {
        let t = Arc::new(FakeTransport::new().with_json(URL, two_quartiers()));
        let r = resolver(t);

        // Inside the unclaimed strip; Villette's centroid (2.375) is nearer than
        // Chapelle's (2.35995).
        let point = GeoPoint::new(48.885, 2.3690);
        let found = r.resolve(&point, &category()).await.unwrap().unwrap();

        assert_eq!(found.quartier, "Villette");
        match found.quality {
            MatchQuality::NearestCentroid { distance_km } => {
                assert!(distance_km > 0.0 && distance_km < 1.0);
            }
            other => panic!("expected a centroid fallback, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_result_set_is_no_data() {
        let t = Arc::new(FakeTransport::new().with_json(URL, json!({ "results": [] })));
        let r = resolver(t);
        let found = r.resolve(&GeoPoint::new(48.885, 2.36), &category()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_records_without_geometry_or_centroid_are_no_data() {
        let t = Arc::new(FakeTransport::new().with_json(
            URL,
            json!({ "results": [{ "nom_quartier": "X", "ref": 1, "max": 2, "min": 0.5 }] }),
        ));
        let r = resolver(t);
        let found = r.resolve(&GeoPoint::new(48.885, 2.36), &category()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_http_error_propagates() {
        let t = Arc::new(FakeTransport::new().with_status(URL, 503));
        let r = resolver(t);
        let err = r
            .resolve(&GeoPoint::new(48.885, 2.36), &category())
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Status { status: 503, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_resolution_is_idempotent() {
        let t = Arc::new(FakeTransport::new().with_json(URL, two_quartiers()));
        let r = resolver(t.clone());
        let point = GeoPoint::new(48.885, 2.375);

        let first = r.resolve(&point, &category()).await.unwrap();
        let second = r.resolve(&point, &category()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(t.calls(), 2);
    }

    #[tokio::test]
    async fn test_multipolygon_second_part_matches() {
        let body = json!({
            "results": [{
                "nom_quartier": "Ile Saint-Louis",
                "ref": "30.1", "max": "36.1", "min": "21.1",
                "geo_shape": { "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[2.340, 48.850], [2.345, 48.850], [2.345, 48.855],
                          [2.340, 48.855], [2.340, 48.850]]],
                        [[[2.350, 48.850], [2.360, 48.850], [2.360, 48.855],
                          [2.350, 48.855], [2.350, 48.850]]]
                    ]
                }},
                "geo_point_2d": { "lat": 48.8525, "lon": 2.35 }
            }]
        });
        let t = Arc::new(FakeTransport::new().with_json(URL, body));
        let r = resolver(t);

        let found = r
            .resolve(&GeoPoint::new(48.852, 2.355), &category())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.quartier, "Ile Saint-Louis");
        assert_eq!(found.quality, MatchQuality::Exact);
        assert_eq!(found.schedule.majored_rate, 36.1);
    }

    /// Villette with a null `ref` and an unreadable `max`; Chapelle intact.
    fn villette_unreadable() -> Value {
        let mut body = two_quartiers();
        body["results"][0]["ref"] = Value::Null;
        body["results"][0]["max"] = json!("n/a");
        body
    }

    #[tokio::test]
    async fn test_unreadable_neighbour_does_not_fail_the_page() {
        let t = Arc::new(FakeTransport::new().with_json(URL, villette_unreadable()));
        let r = resolver(t);

        let found = r
            .resolve(&GeoPoint::new(48.885, 2.36), &category())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.quartier, "Chapelle");
        assert_eq!(found.quality, MatchQuality::Exact);
        assert_eq!(found.schedule, RateSchedule::new(27.0, 32.4, 18.9));
    }

    #[tokio::test]
    async fn test_containing_quartier_with_unreadable_rates_is_no_data() {
        let t = Arc::new(FakeTransport::new().with_json(URL, villette_unreadable()));
        let r = resolver(t);

        let found = r.resolve(&GeoPoint::new(48.885, 2.375), &category()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_centroid_fallback_skips_unreadable_records() {
        let t = Arc::new(FakeTransport::new().with_json(URL, villette_unreadable()));
        let r = resolver(t);

        // Villette's centroid is nearer, but only Chapelle has usable rates.
        let found = r
            .resolve(&GeoPoint::new(48.885, 2.3690), &category())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.quartier, "Chapelle");
        assert!(matches!(found.quality, MatchQuality::NearestCentroid { .. }));
    }
}
