//! Lookup clients against a local mock upstream.

use std::time::Duration;

use cep_weather_core::{
    CepClient, CepLookup, ClassifiedError, ConversionError, ErrorKind, LookupError, Namespace,
    RequestContext, WeatherClient, WeatherLookup, convert_observation, transport,
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn viacep_body() -> Value {
    json!({
        "cep": "01310-100",
        "logradouro": "Avenida Paulista",
        "complemento": "de 612 a 1510 - lado par",
        "unidade": "",
        "bairro": "Bela Vista",
        "localidade": "São Paulo",
        "uf": "SP",
        "estado": "São Paulo",
        "regiao": "Sudeste",
        "ibge": "3550308",
        "gia": "1004",
        "ddd": "11",
        "siafi": "7107"
    })
}

fn weatherapi_body(temp_c: f64, temp_f: f64) -> Value {
    json!({
        "location": {
            "name": "Sao Paulo",
            "region": "Sao Paulo",
            "country": "Brazil",
            "lat": -23.5333,
            "lon": -46.6167,
            "tz_id": "America/Sao_Paulo",
            "localtime_epoch": 1735689600,
            "localtime": "2025-01-01 00:00"
        },
        "current": {
            "last_updated_epoch": 1735689300,
            "last_updated": "2024-12-31 23:55",
            "temp_c": temp_c,
            "temp_f": temp_f,
            "is_day": 0,
            "condition": {
                "text": "Partly cloudy",
                "icon": "//cdn.weatherapi.com/weather/64x64/night/116.png",
                "code": 1003
            },
            "wind_mph": 6.9,
            "wind_kph": 11.2,
            "wind_degree": 140,
            "wind_dir": "SE",
            "pressure_mb": 1016.0,
            "pressure_in": 30.0,
            "precip_mm": 0.0,
            "precip_in": 0.0,
            "humidity": 65,
            "cloud": 50,
            "feelslike_c": 25.1,
            "feelslike_f": 77.2,
            "windchill_c": 24.0,
            "windchill_f": 75.2,
            "heatindex_c": 25.0,
            "heatindex_f": 77.0,
            "dewpoint_c": 17.0,
            "dewpoint_f": 62.6,
            "vis_km": 10.0,
            "vis_miles": 6.0,
            "uv": 0.0,
            "gust_mph": 8.1,
            "gust_kph": 13.0
        }
    })
}

fn cep_client(server: &MockServer) -> CepClient {
    let template = format!("{}/ws/{{cep}}/json/", server.uri());
    CepClient::new(template, transport::http_client().unwrap()).unwrap()
}

fn weather_client(server: &MockServer) -> WeatherClient {
    let base = format!("{}/v1/current.json", server.uri());
    WeatherClient::new(&base, "test-key", transport::http_client().unwrap()).unwrap()
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map(|r| r.len()).unwrap_or_default()
}

#[tokio::test]
async fn cep_lookup_decodes_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ws/01310100/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(viacep_body()))
        .expect(1)
        .mount(&server)
        .await;

    let addr = cep_client(&server)
        .lookup(&RequestContext::background(), "01310100")
        .await
        .unwrap();

    assert_eq!(addr.cep, "01310-100");
    assert_eq!(addr.street, "Avenida Paulista");
    assert_eq!(addr.city, "São Paulo");
    assert_eq!(addr.ddd, "11");
    assert!(!addr.is_not_found());
}

#[tokio::test]
async fn cep_lookup_keeps_body_level_not_found_unclassified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ws/99999999/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"erro": "true"})))
        .mount(&server)
        .await;

    let addr = cep_client(&server)
        .lookup(&RequestContext::background(), "99999999")
        .await
        .unwrap();

    assert!(addr.is_not_found());
}

#[tokio::test]
async fn cep_error_statuses_are_classified_in_postal_namespace() {
    let cases = [
        (400, ErrorKind::BadRequest),
        (404, ErrorKind::NotFound),
        (500, ErrorKind::ServerError),
        (502, ErrorKind::ServerError),
        (503, ErrorKind::ServerError),
        (504, ErrorKind::ServerError),
        (418, ErrorKind::Unexpected),
        (201, ErrorKind::Unexpected),
        (204, ErrorKind::Unexpected),
    ];

    for (status, kind) in cases {
        let server = MockServer::start().await;
        // 204 may not carry a body.
        let template = match status {
            204 => ResponseTemplate::new(204),
            _ => ResponseTemplate::new(status).set_body_string("{not json"),
        };
        Mock::given(method("GET")).respond_with(template).mount(&server).await;

        let err = cep_client(&server)
            .lookup(&RequestContext::background(), "01310100")
            .await
            .unwrap_err();

        let classified = err.classified().copied().expect("classified error");
        assert!(classified.is(Namespace::Postal, kind), "status {status}");
        assert_eq!(classified.status(), status);
    }
}

#[tokio::test]
async fn success_status_other_than_200_is_classified_not_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(201).set_body_json(weatherapi_body(20.0, 68.0)))
        .mount(&server)
        .await;

    let err = weather_client(&server)
        .lookup(&RequestContext::background(), "Rio")
        .await
        .unwrap_err();

    let classified = *err.classified().expect("classified error");
    assert_eq!(classified, ClassifiedError::WEATHER_UNEXPECTED);
    assert!(classified.to_string().contains("201"));
}

#[tokio::test]
async fn cep_malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = cep_client(&server)
        .lookup(&RequestContext::background(), "01310100")
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Decode(_)));
    assert!(err.classified().is_none());
}

#[tokio::test]
async fn weather_lookup_sends_key_and_escaped_place() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", "São Paulo"))
        .and(query_param("aqi", "no"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weatherapi_body(32.2, 90.0)))
        .expect(1)
        .mount(&server)
        .await;

    let weather = weather_client(&server)
        .lookup(&RequestContext::background(), "São Paulo")
        .await
        .unwrap();

    assert_eq!(weather.location.name, "Sao Paulo");
    assert_eq!(weather.current.temp_c, Decimal::new(322, 1));
    assert_eq!(weather.current.humidity, 65);
    assert_eq!(weather.location.local_time().map(|t| t.timestamp()), Some(1_735_689_600));

    let temp = convert_observation(&weather).unwrap();
    assert_eq!(temp.celsius.to_string(), "32.20");
    assert_eq!(temp.fahrenheit.to_string(), "89.96");
    assert_eq!(temp.kelvin.to_string(), "305.35");
}

#[tokio::test]
async fn weather_404_never_matches_postal_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = weather_client(&server)
        .lookup(&RequestContext::background(), "Atlantis")
        .await
        .unwrap_err();

    let classified = *err.classified().unwrap();
    assert_eq!(classified, ClassifiedError::WEATHER_NOT_FOUND);
    assert_ne!(classified, ClassifiedError::POSTAL_NOT_FOUND);
}

#[tokio::test]
async fn weather_schema_mismatch_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"location": {}})))
        .mount(&server)
        .await;

    let err = weather_client(&server)
        .lookup(&RequestContext::background(), "Rio")
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Decode(_)));
}

#[tokio::test]
async fn cancelled_context_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(viacep_body()))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = RequestContext::background();
    ctx.cancel();

    let cep_err = cep_client(&server).lookup(&ctx, "01310100").await.unwrap_err();
    let weather_err = weather_client(&server).lookup(&ctx, "Rio").await.unwrap_err();

    assert!(matches!(cep_err, LookupError::Cancelled));
    assert!(matches!(weather_err, LookupError::Cancelled));
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn expired_deadline_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(viacep_body()))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = RequestContext::background().with_deadline(tokio::time::Instant::now());

    let err = cep_client(&server).lookup(&ctx, "01310100").await.unwrap_err();

    assert!(matches!(err, LookupError::DeadlineExceeded));
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn deadline_aborts_slow_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(weatherapi_body(20.0, 68.0))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let ctx = RequestContext::background().with_timeout(Duration::from_millis(100));
    let err = weather_client(&server).lookup(&ctx, "Rio").await.unwrap_err();

    assert!(err.is_cancellation());
    assert!(matches!(err, LookupError::DeadlineExceeded));
}

#[tokio::test]
async fn unreachable_upstream_is_a_transport_error() {
    // Nothing listens on the discard port.
    let client = CepClient::new("http://127.0.0.1:9/ws/{cep}/json/", transport::http_client().unwrap())
        .unwrap();

    let err = client.lookup(&RequestContext::background(), "01310100").await.unwrap_err();

    assert!(matches!(err, LookupError::Transport(_)));
    assert!(!err.is_cancellation());
}

#[tokio::test]
async fn repeated_lookups_decode_equal_values() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weatherapi_body(28.5, 83.3)))
        .expect(2)
        .mount(&server)
        .await;

    let client = weather_client(&server);
    let ctx = RequestContext::background();

    let first = client.lookup(&ctx, "Curitiba").await.unwrap();
    let second = client.lookup(&ctx, "Curitiba").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn absurd_temperature_is_returned_as_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(weatherapi_body(7e28, 0.0)))
        .mount(&server)
        .await;

    let weather = weather_client(&server)
        .lookup(&RequestContext::background(), "Rio")
        .await
        .unwrap();

    let err = convert_observation(&weather).unwrap_err();
    assert!(matches!(err, ConversionError::OutOfRange(c) if c == weather.current.temp_c));
}
