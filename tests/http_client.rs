//! HttpJobClient against the in-process mock API

mod common;

use axum::http::StatusCode;
use serde_json::json;

use channelscout::api::{
    ClientError, DownloadKind, HttpConfig, HttpJobClient, JobClient, JobStatus,
};
use channelscout::controller::validate_search;
use common::{MockApi, StatusReply, completed, failed, processing, raw_channel};

fn client_for(base_url: &str) -> HttpJobClient {
    HttpJobClient::new(HttpConfig {
        base_url: base_url.to_string(),
        ..HttpConfig::default()
    })
    .expect("client builds")
}

#[tokio::test]
async fn test_submit_sends_query_and_limit() {
    let api = MockApi::default();
    let client = client_for(&api.serve().await);

    let request = validate_search("lofi beats", "15").unwrap();
    let job_id = client.submit(&request).await.unwrap();

    assert!(!job_id.is_empty());
    let submissions = api.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].search_query, "lofi beats");
    assert_eq!(submissions[0].max_channel_links, 15);

    let headers = &api.submit_headers()[0];
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(headers["accept"], "application/json");
}

#[tokio::test]
async fn test_submit_rejection_carries_server_detail() {
    let api = MockApi::default();
    api.reject_submissions(StatusCode::UNPROCESSABLE_ENTITY, Some("max_channel_links must be <= 50"));
    let client = client_for(&api.serve().await);

    let request = validate_search("lofi beats", "500").unwrap();
    let err = client.submit(&request).await.unwrap_err();

    match err {
        ClientError::Submission(detail) => assert_eq!(detail, "max_channel_links must be <= 50"),
        other => panic!("expected submission error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_submit_rejection_without_detail_uses_generic_message() {
    let api = MockApi::default();
    api.reject_submissions(StatusCode::SERVICE_UNAVAILABLE, None);
    let client = client_for(&api.serve().await);

    let request = validate_search("lofi beats", "5").unwrap();
    let err = client.submit(&request).await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to queue scrape job");
}

#[tokio::test]
async fn test_fetch_status_reads_completed_payload() {
    let api = MockApi::default();
    api.plan(
        "cats",
        vec![completed(json!([raw_channel("tabby", "Norway", "31 videos")]))],
    );
    let client = client_for(&api.serve().await);

    let job_id = client.submit(&validate_search("cats", "1").unwrap()).await.unwrap();
    let snapshot = client.fetch_status(&job_id).await.unwrap().unwrap();

    assert_eq!(snapshot.status, JobStatus::Completed);
    let channels = snapshot.channel_details.unwrap();
    assert_eq!(channels[0].channel_url, "https://www.youtube.com/@tabby");
    assert_eq!(channels[0].videos_count, "31 videos");
    assert_eq!(channels[0].total_views, "Not found");
}

#[tokio::test]
async fn test_fetch_status_reads_failure_message() {
    let api = MockApi::default();
    api.plan("cats", vec![failed("quota exceeded")]);
    let client = client_for(&api.serve().await);

    let job_id = client.submit(&validate_search("cats", "1").unwrap()).await.unwrap();
    let snapshot = client.fetch_status(&job_id).await.unwrap().unwrap();

    assert_eq!(snapshot.status, JobStatus::Failed);
    assert_eq!(snapshot.error.as_deref(), Some("quota exceeded"));
}

#[tokio::test]
async fn test_fetch_status_non_success_is_no_update() {
    let api = MockApi::default();
    api.plan(
        "cats",
        vec![StatusReply::Http(StatusCode::SERVICE_UNAVAILABLE), processing()],
    );
    let client = client_for(&api.serve().await);

    let job_id = client.submit(&validate_search("cats", "1").unwrap()).await.unwrap();

    assert!(client.fetch_status(&job_id).await.unwrap().is_none());
    let snapshot = client.fetch_status(&job_id).await.unwrap().unwrap();
    assert_eq!(snapshot.status, JobStatus::Processing);

    // Unknown job ids answer 404, which is also just "no update"
    assert!(client.fetch_status("missing-job").await.unwrap().is_none());
}

#[tokio::test]
async fn test_fetch_status_invalid_json_is_decode_error() {
    let api = MockApi::default();
    api.plan("cats", vec![StatusReply::Garbage]);
    let client = client_for(&api.serve().await);

    let job_id = client.submit(&validate_search("cats", "1").unwrap()).await.unwrap();
    let err = client.fetch_status(&job_id).await.unwrap_err();

    assert!(matches!(err, ClientError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Reserve a port, then close it so nothing listens there
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}", addr));
    let err = client.fetch_status("job-1").await.unwrap_err();

    assert!(matches!(err, ClientError::Network(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_download_returns_csv_bytes() {
    let api = MockApi::default();
    let client = client_for(&api.serve().await);
    let job_id = client.submit(&validate_search("cats", "1").unwrap()).await.unwrap();

    let file = client.download(&job_id, DownloadKind::Urls).await.unwrap();

    assert_eq!(file.file_name, "youtube_channels_urls.csv");
    assert_eq!(file.content_type.as_ref().map(|m| m.essence_str()), Some("text/csv"));
    assert!(file.bytes.starts_with(b"Channel URL\n"));
}

#[tokio::test]
async fn test_download_unknown_job_fails() {
    let api = MockApi::default();
    let client = client_for(&api.serve().await);

    let err = client.download("missing-job", DownloadKind::Details).await.unwrap_err();

    assert!(matches!(err, ClientError::Download { status: 404 }));
}
