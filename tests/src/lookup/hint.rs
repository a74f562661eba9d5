#![cfg(test)]
use encadre_common::category::ConstructionPeriod;
use encadre_common::geo::GeoPoint;
use encadre_core::hint::{ApurHintProvider, ConstructionPeriodHint};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::{self, APUR_PATH};

fn provider(server: &MockServer) -> ApurHintProvider {
    ApurHintProvider::new(fixtures::transport(), &fixtures::config(&server.uri()).apur).unwrap()
}

#[tokio::test]
async fn registry_code_becomes_a_period() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(APUR_PATH))
        .and(query_param("outFields", "c_perconst"))
        .and(query_param("geometryType", "esriGeometryEnvelope"))
        .and(query_param("f", "json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "features": [{ "attributes": { "c_perconst": 7 } }] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let hint = provider(&server)
        .construction_period(&GeoPoint::new(48.8867, 2.3601))
        .await
        .unwrap();

    assert_eq!(hint.period, ConstructionPeriod::From1971To1990);
    assert_eq!(hint.registry_code, 7);
    assert_eq!(hint.registry_label, "1968-1975");
}

#[tokio::test]
async fn registry_outage_gives_no_hint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(APUR_PATH))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let hint = provider(&server)
        .construction_period(&GeoPoint::new(48.8867, 2.3601))
        .await;
    assert!(hint.is_none());
}
