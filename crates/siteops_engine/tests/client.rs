use std::time::Duration;

use pretty_assertions::assert_eq;
use siteops_engine::{
    decode_site_op_response, site_op_url, ClientSettings, FailureKind, ReqwestSiteOpClient,
    SiteOpClient, SiteOpRequest,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(site: &str) -> SiteOpRequest {
    SiteOpRequest {
        site: site.to_string(),
        op: "remote_backup".to_string(),
        verbose: true,
        dry_run: false,
    }
}

fn client_for(server: &MockServer) -> ReqwestSiteOpClient {
    ReqwestSiteOpClient::new(ClientSettings {
        script_root: server.uri(),
        ..ClientSettings::default()
    })
    .expect("client")
}

#[test]
fn url_carries_all_query_parameters() {
    let url = site_op_url("http://ops.example.com/manage/", &request("lnba")).unwrap();
    assert_eq!(
        url.as_str(),
        "http://ops.example.com/manage/site-op?site=lnba&op=remote_backup&verbose=true&dry_run=false"
    );
}

#[test]
fn url_escapes_site_names() {
    let url = site_op_url("http://ops.example.com", &request("a b&c")).unwrap();
    assert_eq!(url.query(), Some("site=a+b%26c&op=remote_backup&verbose=true&dry_run=false"));
}

#[test]
fn invalid_script_root_is_rejected() {
    let err = ReqwestSiteOpClient::new(ClientSettings {
        script_root: "not a url".to_string(),
        ..ClientSettings::default()
    })
    .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidScriptRoot);
}

#[test]
fn decode_requires_msgs_field() {
    let ok = decode_site_op_response(br#"{"msgs":["a","b"]}"#).unwrap();
    assert_eq!(ok.msgs, vec!["a", "b"]);

    let err = decode_site_op_response(br#"{"messages":[]}"#).unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn perform_returns_messages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/site-op"))
        .and(query_param("site", "lnba"))
        .and(query_param("op", "remote_backup"))
        .and(query_param("verbose", "true"))
        .and(query_param("dry_run", "false"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"msgs":["Starting","Ending"]}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).perform(&request("lnba")).await.expect("ok");
    assert_eq!(response.msgs, vec!["Starting", "Ending"]);
}

#[tokio::test]
async fn perform_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/site-op"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).perform(&request("lnba")).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn perform_fails_on_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/site-op"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).perform(&request("lnba")).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn perform_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/site-op"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string(r#"{"msgs":[]}"#),
        )
        .mount(&server)
        .await;

    let client = ReqwestSiteOpClient::new(ClientSettings {
        script_root: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    })
    .unwrap();

    let err = client.perform(&request("lnba")).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn perform_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/site-op"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"msgs":["abcd"]}"#),
        )
        .mount(&server)
        .await;

    let client = ReqwestSiteOpClient::new(ClientSettings {
        script_root: server.uri(),
        max_bytes: 8,
        ..ClientSettings::default()
    })
    .unwrap();

    let err = client.perform(&request("lnba")).await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::TooLarge { max_bytes: 8, .. }));
}
