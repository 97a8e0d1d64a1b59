use nextcloud_upload::{Error, ResolvedEndpoint, ShareClient, UploadOptions};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_bytes, header, method, path},
};

/// base64("TOKEN:secret")
const AUTH_WITH_PASSWORD: &str = "Basic VE9LRU46c2VjcmV0";
/// base64("TOKEN:")
const AUTH_WITHOUT_PASSWORD: &str = "Basic VE9LRU46";

fn share_client(server_uri: &str, password: Option<&str>) -> ShareClient {
    let endpoint = ResolvedEndpoint::resolve(&format!("{server_uri}/nextcloud/s/TOKEN")).unwrap();
    ShareClient::new(endpoint, password.map(str::to_string))
}

/// Address nothing listens on; the listener is closed before returning
fn unused_local_uri() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    format!("http://127.0.0.1:{port}")
}

fn temp_file_with(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_put_sends_file_with_basic_auth() {
    let server = MockServer::start().await;
    let contents = b"hello nextcloud".to_vec();
    let file = temp_file_with(&contents);

    Mock::given(method("PUT"))
        .and(path("/nextcloud/public.php/webdav/report.txt"))
        .and(header("authorization", AUTH_WITH_PASSWORD))
        .and(header("content-type", "application/octet-stream"))
        .and(body_bytes(contents.clone()))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = share_client(&server.uri(), Some("secret"));
    let uploaded = client
        .upload(file.path(), UploadOptions::default().with_remote_name("report.txt"))
        .await
        .unwrap();

    assert!(uploaded);
}

#[tokio::test]
async fn test_put_streams_file_with_progress() {
    let server = MockServer::start().await;
    let contents: Vec<u8> = (0..100_000u32).map(|i| (i % 256) as u8).collect();
    let file = temp_file_with(&contents);

    Mock::given(method("PUT"))
        .and(path("/nextcloud/public.php/webdav/big%20file.bin"))
        .and(header("authorization", AUTH_WITHOUT_PASSWORD))
        .and(body_bytes(contents.clone()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let reports = Arc::new(Mutex::new(Vec::<u64>::new()));
    let sink_reports = Arc::clone(&reports);
    let options = UploadOptions::default()
        .with_remote_name("big file.bin")
        .with_progress(Arc::new(move |n: u64| sink_reports.lock().unwrap().push(n)));

    let client = share_client(&server.uri(), None);
    assert!(client.upload(file.path(), options).await.unwrap());

    let reports = reports.lock().unwrap();
    assert!(reports.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(reports.last().copied(), Some(contents.len() as u64));
}

#[tokio::test]
async fn test_put_rejected_returns_false() {
    let server = MockServer::start().await;
    let file = temp_file_with(b"payload");

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .expect(1)
        .mount(&server)
        .await;

    let client = share_client(&server.uri(), Some("wrong"));
    let uploaded = client.upload(file.path(), UploadOptions::default()).await.unwrap();

    assert!(!uploaded);
}

#[tokio::test]
async fn test_put_to_unreachable_server_raises_transport_error() {
    let uri = unused_local_uri();

    let file = temp_file_with(b"payload");
    let client = share_client(&uri, None);
    let result = client.upload(file.path(), UploadOptions::default()).await;

    assert!(matches!(result, Err(Error::TransportError(_))));
}

#[tokio::test]
async fn test_missing_local_file_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = share_client(&server.uri(), None);
    let result = client
        .upload("/nonexistent/dir/missing.txt", UploadOptions::default())
        .await;

    assert!(matches!(result, Err(Error::LocalFileNotFound { .. })));
}

#[tokio::test]
async fn test_propfind_multistatus_is_success() {
    let server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .and(path("/nextcloud/public.php/webdav/"))
        .and(header("authorization", AUTH_WITH_PASSWORD))
        .respond_with(
            ResponseTemplate::new(207)
                .set_body_string(r#"<?xml version="1.0"?><d:multistatus xmlns:d="DAV:"/>"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = share_client(&server.uri(), Some("secret"));
    assert!(client.test_connection().await);
}

#[tokio::test]
async fn test_propfind_unauthorized_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("PROPFIND"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = share_client(&server.uri(), None);
    assert!(!client.test_connection().await);
}

#[tokio::test]
async fn test_propfind_unreachable_server_is_failure() {
    let uri = unused_local_uri();

    let client = share_client(&uri, None);
    assert!(!client.test_connection().await);
}
