#![cfg(test)]
use encadre_common::category::{BuildingType, ConstructionPeriod, RegulationCategory, RoomCount};
use encadre_common::error::LookupError;
use encadre_common::geo::GeoPoint;
use encadre_common::rates::MatchQuality;
use encadre_common::territory::Territory;
use encadre_core::compliance;
use encadre_core::service::LookupRequest;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::{self, PARIS_PATH, RENTS_PATH, ZONES_PATH};

fn request(lat: f64, lon: f64, postcode: &str, category: RegulationCategory) -> LookupRequest {
    LookupRequest {
        point: GeoPoint::new(lat, lon),
        postcode: postcode.to_string(),
        category,
    }
}

fn two_rooms_pre_1946() -> RegulationCategory {
    RegulationCategory::new(
        RoomCount::Two,
        ConstructionPeriod::Before1946,
        false,
        BuildingType::Apartment,
    )
}

async fn mount_est_ensemble(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(ZONES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::zones()))
        .expect(expected_calls)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(RENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::rents()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn paris_lookup_and_verdict() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PARIS_PATH))
        .and(query_param(
            "where",
            "piece=\"2\" AND epoque=\"Avant 1946\" AND meuble_txt=\"non meublé\" AND annee=\"2025\"",
        ))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::paris_records()))
        .expect(1)
        .mount(&server)
        .await;

    let service = fixtures::service(&server.uri());
    let found = service
        .lookup(&request(48.8867, 2.3601, "75018", two_rooms_pre_1946()))
        .await
        .unwrap();

    assert_eq!(found.territory, Territory::Paris);
    assert_eq!(found.zone_name, "La Chapelle");
    assert_eq!(found.quality, MatchQuality::Exact);
    assert_eq!(found.reference_year, "2025");

    let over = compliance::assess(found.clone(), 50.0, 1600.0);
    assert_eq!(over.compliance.majored_amount, 1500.0);
    assert!(!over.compliance.is_compliant);
    assert_eq!(over.compliance.deviation_amount, 100.0);

    let at_ceiling = compliance::assess(found, 50.0, 1500.0);
    assert!(at_ceiling.compliance.is_compliant);
}

#[tokio::test]
async fn est_ensemble_snapshots_fetched_once() {
    let server = MockServer::start().await;
    mount_est_ensemble(&server, 1).await;

    let service = fixtures::service(&server.uri());
    let req = request(48.86, 2.44, "93100", two_rooms_pre_1946());

    let first = service.lookup(&req).await.unwrap();
    let second = service.lookup(&req).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.territory, Territory::EstEnsemble);
    assert_eq!(first.zone_name, "Montreuil");
    assert_eq!(first.reference_year, "2023");
    assert!((first.schedule.majored_rate - 20.3).abs() < 1e-9);
    assert!((first.schedule.reference_rate - 16.9).abs() < 1e-9);
    assert!((first.schedule.minored_rate - 11.8).abs() < 1e-9);
}

#[tokio::test]
async fn est_ensemble_house_row() {
    let server = MockServer::start().await;
    mount_est_ensemble(&server, 1).await;

    let category = RegulationCategory::new(
        RoomCount::Three,
        ConstructionPeriod::After1990,
        true,
        BuildingType::House,
    );
    let found = fixtures::service(&server.uri())
        .lookup(&request(48.86, 2.44, "93100", category))
        .await
        .unwrap();

    assert_eq!(found.quality, MatchQuality::Exact);
    assert_eq!(found.category.building_type, Some(BuildingType::House));
    assert_eq!(found.schedule.majored_rate, 18.0);
}

#[tokio::test]
async fn unsupported_postcode_makes_no_request() {
    let server = MockServer::start().await;
    let service = fixtures::service(&server.uri());

    let err = service
        .lookup(&request(45.76, 4.83, "69001", two_rooms_pre_1946()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        LookupError::UnsupportedTerritory { ref postcode } if postcode == "69001"
    ));
    assert!(!err.is_retryable());
    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[tokio::test]
async fn paris_server_error_is_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PARIS_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = fixtures::service(&server.uri())
        .lookup(&request(48.8867, 2.3601, "75018", two_rooms_pre_1946()))
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Status { status: 500, .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn paris_garbage_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PARIS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = fixtures::service(&server.uri())
        .lookup(&request(48.8867, 2.3601, "75018", two_rooms_pre_1946()))
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Decode { .. }));
}

#[tokio::test]
async fn paris_empty_results_is_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PARIS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "total_count": 0, "results": [] })),
        )
        .mount(&server)
        .await;

    let err = fixtures::service(&server.uri())
        .lookup(&request(48.8867, 2.3601, "75018", two_rooms_pre_1946()))
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::NoData { territory: Territory::Paris }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn failed_snapshot_load_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ZONES_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ZONES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::zones()))
        .expect(1)
        .mount(&server)
        .await;
    // The rent table may or may not be fetched alongside the failing zones.
    Mock::given(method("GET"))
        .and(path(RENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::rents()))
        .expect(1..=2)
        .mount(&server)
        .await;

    let service = fixtures::service(&server.uri());
    let req = request(48.86, 2.44, "93100", two_rooms_pre_1946());

    let err = service.lookup(&req).await.unwrap_err();
    assert!(err.is_retryable());

    let found = service.lookup(&req).await.unwrap();
    assert_eq!(found.zone_name, "Montreuil");
}
