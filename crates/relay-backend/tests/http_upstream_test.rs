//! Tests del cliente upstream contra un servidor wiremock.

use std::time::Duration;

use relay_backend::{HttpUpstream, Upstream, UpstreamConfig, UpstreamError};
use relay_core::{HttpMethod, UpstreamTarget};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> HttpUpstream {
    HttpUpstream::new(UpstreamConfig::default()).unwrap()
}

fn target(server: &MockServer) -> UpstreamTarget {
    UpstreamTarget::new(server.uri()).unwrap()
}

#[tokio::test]
async fn get_returns_body_as_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
        .expect(1)
        .mount(&server)
        .await;

    let body = client()
        .send(&target(&server).request(HttpMethod::Get, "get"))
        .await
        .unwrap();

    assert_eq!(body, r#"{"ok":true}"#);
}

#[tokio::test]
async fn each_method_is_forwarded_with_its_own_verb() {
    let server = MockServer::start().await;
    for verb in HttpMethod::ALL {
        Mock::given(method(verb.as_str()))
            .and(path("/anything"))
            .respond_with(ResponseTemplate::new(200).set_body_string(verb.as_str()))
            .expect(1)
            .mount(&server)
            .await;
    }

    let upstream = client();
    for verb in HttpMethod::ALL {
        let body = upstream
            .send(&target(&server).request(verb, "anything"))
            .await
            .unwrap();
        assert_eq!(body, verb.as_str());
    }
}

#[tokio::test]
async fn non_success_status_is_forwarded_as_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;

    let body = client()
        .send(&target(&server).request(HttpMethod::Get, "status/404"))
        .await
        .unwrap();

    assert_eq!(body, "not here");
}

#[tokio::test]
async fn empty_path_targets_host_root() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("root"))
        .expect(1)
        .mount(&server)
        .await;

    let body = client()
        .send(&target(&server).request(HttpMethod::Get, ""))
        .await
        .unwrap();

    assert_eq!(body, "root");
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/delay"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let upstream = HttpUpstream::new(
        UpstreamConfig::builder()
            .timeout(Duration::from_millis(100))
            .build(),
    )
    .unwrap();

    let err = upstream
        .send(&target(&server).request(HttpMethod::Get, "delay"))
        .await
        .unwrap_err();

    assert!(matches!(err, UpstreamError::Timeout { .. }), "got {err:?}");
    assert!(err.is_transient());
}

#[tokio::test]
async fn closed_port_is_unreachable() {
    // Reservar un puerto y cerrarlo para garantizar connection refused
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let target = UpstreamTarget::new(format!("127.0.0.1:{port}")).unwrap();
    let err = client()
        .send(&target.request(HttpMethod::Get, "get"))
        .await
        .unwrap_err();

    assert!(
        matches!(err, UpstreamError::Unreachable { .. }),
        "got {err:?}"
    );
    assert!(err.to_string().contains(&format!("127.0.0.1:{port}/get")));
}
