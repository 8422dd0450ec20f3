//! Integration tests for the batch lookup pipeline with Wiremock
//!
//! Runs the lookup service against a mock ip-api.com batch endpoint.

use ip_geo_batch::adapters::outbound::LOOKUP_FIELDS;
use ip_geo_batch::{IpApiLookup, LookupService, LookupStatus, PipelineLimits, RawInput, ServiceError};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// Answers every address in the request body with a success record.
struct EchoResponder;

impl Respond for EchoResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let addresses: Vec<String> = serde_json::from_slice(&request.body).unwrap();
        let records: Vec<serde_json::Value> = addresses
            .iter()
            .map(|ip| {
                serde_json::json!({
                    "status": "success",
                    "country": "Testland",
                    "regionName": "Test Region",
                    "city": "Test City",
                    "isp": "Test ISP",
                    "org": "Test Org",
                    "lat": 1.5,
                    "lon": -2.5,
                    "query": ip
                })
            })
            .collect();
        ResponseTemplate::new(200).set_body_json(records)
    }
}

fn addresses(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("198.51.{}.{}", i / 256, i % 256)).collect()
}

fn service_for(server: &MockServer) -> LookupService {
    let lookup = IpApiLookup::new(format!("{}/batch", server.uri()), Duration::from_secs(5)).unwrap();
    LookupService::new(
        Arc::new(lookup),
        PipelineLimits {
            batch_delay: Duration::from_millis(20),
            ..PipelineLimits::default()
        },
    )
}

/// 250 addresses go out as three calls of 100, 100 and 50
#[tokio::test]
async fn test_250_addresses_three_upstream_calls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/batch"))
        .and(query_param("fields", LOOKUP_FIELDS))
        .respond_with(EchoResponder)
        .expect(3)
        .mount(&mock_server)
        .await;

    let addrs = addresses(250);
    let envelope = service_for(&mock_server)
        .submit(RawInput::List(addrs.clone()))
        .await
        .unwrap();

    assert_eq!(envelope.total, 250);
    assert!(envelope.rejected.is_empty());
    assert_eq!(envelope.results.len(), 250);
    assert!(envelope.results.iter().all(|r| r.is_success()));

    let queries: Vec<String> = envelope.results.iter().map(|r| r.query.clone()).collect();
    assert_eq!(queries, addrs);

    let requests = mock_server.received_requests().await.unwrap();
    let sizes: Vec<usize> = requests
        .iter()
        .map(|r| serde_json::from_slice::<Vec<String>>(&r.body).unwrap().len())
        .collect();
    assert_eq!(sizes, vec![100, 100, 50]);
}

/// A failing second batch yields placeholders for entries 101-200 only
#[tokio::test]
async fn test_second_batch_http_500() {
    let mock_server = MockServer::start().await;
    let addrs = addresses(250);

    // Mounted first, so it takes precedence for the second chunk
    Mock::given(method("POST"))
        .and(path("/batch"))
        .and(body_json(&addrs[100..200]))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/batch"))
        .respond_with(EchoResponder)
        .expect(2)
        .mount(&mock_server)
        .await;

    let envelope = service_for(&mock_server)
        .submit(RawInput::List(addrs.clone()))
        .await
        .unwrap();

    assert_eq!(envelope.total, 250);
    assert_eq!(envelope.results.len(), 250);

    for (i, record) in envelope.results.iter().enumerate() {
        assert_eq!(record.query, addrs[i]);
        if (100..200).contains(&i) {
            assert_eq!(record.status, LookupStatus::Fail);
            assert_eq!(record.message.as_deref(), Some("HTTP 500"));
            assert!(record.country.is_none());
        } else {
            assert_eq!(record.status, LookupStatus::Success);
        }
    }
}

/// Upstream unreachable: every address still gets a record
#[tokio::test]
async fn test_unreachable_upstream_preserves_length() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let lookup = IpApiLookup::new(format!("http://{}/batch", addr), Duration::from_secs(2)).unwrap();
    let service = LookupService::new(
        Arc::new(lookup),
        PipelineLimits {
            batch_delay: Duration::from_millis(1),
            ..PipelineLimits::default()
        },
    );

    let envelope = service.submit(RawInput::List(addresses(150))).await.unwrap();

    assert_eq!(envelope.results.len(), 150);
    assert!(envelope
        .results
        .iter()
        .all(|r| r.message.as_deref().unwrap_or("").starts_with("request failed")));
}

/// Pacing delays the second call by at least the configured interval
#[tokio::test]
async fn test_batches_are_paced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/batch"))
        .respond_with(EchoResponder)
        .mount(&mock_server)
        .await;

    let lookup = IpApiLookup::new(format!("{}/batch", mock_server.uri()), Duration::from_secs(5)).unwrap();
    let service = LookupService::new(
        Arc::new(lookup),
        PipelineLimits {
            max_addresses: 1000,
            batch_size: 10,
            batch_delay: Duration::from_millis(100),
        },
    );

    let start = std::time::Instant::now();
    let envelope = service.submit(RawInput::List(addresses(30))).await.unwrap();

    assert_eq!(envelope.results.len(), 30);
    assert!(start.elapsed() >= Duration::from_millis(200));
}

/// Validation failures never reach the upstream
#[tokio::test]
async fn test_validation_errors_make_no_calls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(EchoResponder)
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);

    let err = service.submit(RawInput::from("")).await.unwrap_err();
    assert_eq!(err, ServiceError::NoValidAddresses { rejected: vec![] });

    let err = service.submit(RawInput::List(addresses(6001))).await.unwrap_err();
    assert_eq!(err, ServiceError::TooManyAddresses { max: 6000, count: 6001 });
}
