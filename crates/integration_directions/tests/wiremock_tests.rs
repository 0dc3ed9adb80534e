//! Integration tests for the directions and geocoding clients (wiremock-based)

use domain::value_objects::GeoLocation;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_directions::{
    DirectionsClient, DirectionsConfig, DirectionsError, GeocodingClient, GeocodingError,
    MapboxDirectionsClient, NominatimConfig, NominatimGeocodingClient,
};

const ROUTE_PATH: &str = "/directions/v5/mapbox/driving/2.3522,48.8566;4.3517,50.8503";

fn directions_config(base_url: &str) -> DirectionsConfig {
    DirectionsConfig {
        base_url: base_url.to_string(),
        ..DirectionsConfig::for_testing()
    }
}

fn geocoding_config(base_url: &str) -> NominatimConfig {
    NominatimConfig {
        base_url: base_url.to_string(),
        ..NominatimConfig::for_testing()
    }
}

fn paris() -> GeoLocation {
    GeoLocation::new(48.8566, 2.3522).unwrap()
}

fn brussels() -> GeoLocation {
    GeoLocation::new(50.8503, 4.3517).unwrap()
}

const fn sample_route_json() -> &'static str {
    r#"{
        "code": "Ok",
        "routes": [{
            "geometry": {
                "type": "LineString",
                "coordinates": [[2.3522, 48.8566], [3.0575, 50.6292], [4.3517, 50.8503]]
            },
            "distance": 312450.0,
            "duration": 11400.0
        }],
        "waypoints": []
    }"#
}

#[tokio::test]
async fn test_get_route_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .and(query_param("geometries", "geojson"))
        .and(query_param("overview", "full"))
        .and(query_param("access_token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_route_json()))
        .mount(&server)
        .await;

    let client = MapboxDirectionsClient::new(&directions_config(&server.uri())).unwrap();

    let route = client
        .get_route(&paris(), &brussels())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(route.point_count(), 3);
    assert!((route.distance_km.unwrap() - 312.45).abs() < 1e-9);
    assert!((route.geometry.0[0].x - 2.3522).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_get_route_no_route_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"code": "NoRoute", "routes": []}"#),
        )
        .mount(&server)
        .await;

    let client = MapboxDirectionsClient::new(&directions_config(&server.uri())).unwrap();
    let route = client
        .get_route(&paris(), &brussels())
        .await
        .unwrap();

    assert!(route.is_none());
}

#[tokio::test]
async fn test_get_route_no_segment_422() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .respond_with(ResponseTemplate::new(422).set_body_string(
            r#"{"code": "NoSegment", "message": "No suitable edges near location"}"#,
        ))
        .mount(&server)
        .await;

    let client = MapboxDirectionsClient::new(&directions_config(&server.uri())).unwrap();
    let route = client
        .get_route(&paris(), &brussels())
        .await
        .unwrap();

    assert!(route.is_none());
}

#[tokio::test]
async fn test_get_route_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let client = MapboxDirectionsClient::new(&directions_config(&server.uri())).unwrap();
    let err = client
        .get_route(&paris(), &brussels())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DirectionsError::RateLimitExceeded {
            retry_after_secs: Some(30)
        }
    ));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_get_route_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let client = MapboxDirectionsClient::new(&directions_config(&server.uri())).unwrap();
    let err = client
        .get_route(&paris(), &brussels())
        .await
        .unwrap_err();

    assert!(matches!(err, DirectionsError::RequestFailed(_)));
}

#[tokio::test]
async fn test_get_route_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = MapboxDirectionsClient::new(&directions_config(&server.uri())).unwrap();
    let err = client
        .get_route(&paris(), &brussels())
        .await
        .unwrap_err();

    assert!(matches!(err, DirectionsError::Unauthorized(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_get_route_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ROUTE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_route_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config = DirectionsConfig {
        cache_ttl_minutes: 5,
        ..directions_config(&server.uri())
    };
    let client = MapboxDirectionsClient::new(&config).unwrap();

    let first = client
        .get_route(&paris(), &brussels())
        .await
        .unwrap();
    let second = client
        .get_route(&paris(), &brussels())
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_search_places() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Lisbon"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[
                {"lat": "38.7077", "lon": "-9.1365", "name": "Lisboa",
                 "display_name": "Lisboa, Portugal",
                 "address": {"city": "Lisboa", "country": "Portugal"}},
                {"lat": "43.8", "lon": "-70.1", "name": "Lisbon",
                 "display_name": "Lisbon, Maine, United States",
                 "address": {"town": "Lisbon", "country": "United States"}}
            ]"#,
        ))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&geocoding_config(&server.uri())).unwrap();
    let places = tokio_test::assert_ok!(client.search("Lisbon", 2).await);

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].name, "Lisboa");
    assert_eq!(places[0].country, "Portugal");
    assert_eq!(places[1].name, "Lisbon");
}

#[tokio::test]
async fn test_search_empty_query() {
    let client = NominatimGeocodingClient::new(&NominatimConfig::for_testing()).unwrap();
    let err = client.search("  ", 5).await.unwrap_err();
    assert!(matches!(err, GeocodingError::InvalidQuery(_)));
}

#[tokio::test]
async fn test_reverse_geocode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("format", "jsonv2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"lat": "48.8566", "lon": "2.3522", "name": "Paris",
                "display_name": "Paris, Île-de-France, France",
                "address": {"city": "Paris", "country": "France"}}"#,
        ))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&geocoding_config(&server.uri())).unwrap();
    let place = client.reverse_geocode(&paris()).await.unwrap().unwrap();

    assert_eq!(place.name, "Paris");
    assert_eq!(place.country, "France");
    assert!(place.display_name.contains("Île-de-France"));
}

#[tokio::test]
async fn test_reverse_geocode_nothing_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"error": "Unable to geocode"}"#),
        )
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&geocoding_config(&server.uri())).unwrap();
    let place = client
        .reverse_geocode(&GeoLocation::new(0.0, -30.0).unwrap())
        .await
        .unwrap();

    assert!(place.is_none());
}

#[tokio::test]
async fn test_country_for_place() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Porto"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"lat": "41.15", "lon": "-8.61", "name": "Porto",
                 "display_name": "Porto, Portugal",
                 "address": {"city": "Porto", "country": "Portugal"}}]"#,
        ))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&geocoding_config(&server.uri())).unwrap();

    assert_eq!(
        client.country_for_place("Porto").await.unwrap().as_deref(),
        Some("Portugal")
    );
}

#[tokio::test]
async fn test_geocoding_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&geocoding_config(&server.uri())).unwrap();
    let err = client.search("Berlin", 1).await.unwrap_err();

    assert!(matches!(err, GeocodingError::RequestFailed(_)));
}
