//! Integration tests for the fetch pipeline
//!
//! These tests run the coordinator end to end against a local mock archive
//! laid out like the mainline kernel listing.

use std::path::Path;

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kernel_fetcher::app::{
    select_latest, ArchiveClient, ClientConfig, Coordinator, RunOutcome, Variant, Version,
};
use kernel_fetcher::config::FetchConfig;
use kernel_fetcher::AppError;

const GENERIC_DEB: &str = "linux-image-unsigned-5.10.4-051004-generic_5.10.4-051004.202012301142_amd64.deb";
const LOWLATENCY_DEB: &str = "linux-image-unsigned-5.10.4-051004-lowlatency_5.10.4-051004.202012301142_amd64.deb";
const ALL_DEB: &str = "linux-headers-5.10.4-051004_5.10.4-051004.202012301142_all.deb";

fn index_page() -> String {
    r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 3.2 Final//EN">
<html><head><title>Index of /~kernel-ppa/mainline</title></head>
<body>
<h1>Index of /~kernel-ppa/mainline</h1>
<table>
<tr><th><a href="?C=N;O=D">Name</a></th><th><a href="?C=M;O=A">Last modified</a></th></tr>
<tr><td><a href="/~kernel-ppa/">Parent Directory</a></td></tr>
<tr><td><a href="daily/">daily/</a></td></tr>
<tr><td><a href="v5.9.0/">v5.9.0/</a></td></tr>
<tr><td><a href="v5.10.4/">v5.10.4/</a></td></tr>
<tr><td><a href="v5.11-rc1/">v5.11-rc1/</a></td></tr>
<tr><td><a href="v5.4.86/">v5.4.86/</a></td></tr>
</table>
</body></html>"#
        .to_string()
}

fn arch_page() -> String {
    format!(
        r#"<html><body><table>
<tr><td><a href="/~kernel-ppa/mainline/v5.10.4/">Parent Directory</a></td></tr>
<tr><td><a href="CHECKSUMS">CHECKSUMS</a></td></tr>
<tr><td><a href="{generic}">{generic}</a></td></tr>
<tr><td><a href="{lowlatency}">{lowlatency}</a></td></tr>
<tr><td><a href="{all}">{all}</a></td></tr>
</table></body></html>"#,
        generic = GENERIC_DEB,
        lowlatency = LOWLATENCY_DEB,
        all = ALL_DEB,
    )
}

/// Create a configuration pointing at the mock archive
fn create_test_config(server: &MockServer, output_root: &Path) -> FetchConfig {
    FetchConfig {
        repository: format!("{}/mainline/", server.uri()),
        arch: "amd64".to_string(),
        min_version: Version::parse("5.0").unwrap(),
        include_rc: false,
        variant: Variant::Generic,
        output_root: output_root.to_path_buf(),
        dry_run: false,
        client: ClientConfig::default(),
    }
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_file(server: &MockServer, name: &str, body: &[u8], expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/mainline/v5.10.4/amd64/{}", name)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

/// Fail the test if anything outside the mounted routes is requested
async fn forbid_other_requests(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .with_priority(10)
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_pipeline_downloads_generic_packages() {
    let server = MockServer::start().await;
    mount_page(&server, "/mainline/", index_page()).await;
    mount_page(&server, "/mainline/v5.10.4/amd64/", arch_page()).await;
    mount_file(&server, GENERIC_DEB, b"generic image", 1).await;
    mount_file(&server, ALL_DEB, b"headers", 1).await;
    mount_file(&server, LOWLATENCY_DEB, b"lowlatency image", 0).await;

    let output = TempDir::new().unwrap();
    let coordinator = Coordinator::new(
        ArchiveClient::new().unwrap(),
        create_test_config(&server, output.path()),
    );

    let outcome = coordinator.run().await.unwrap();

    let (selection, summary) = match outcome {
        RunOutcome::Downloaded { selection, summary } => (selection, summary),
        other => panic!("Expected RunOutcome::Downloaded, got {:?}", other),
    };
    assert_eq!(selection.folder, "v5.10.4/");
    assert_eq!(summary.files, 2);

    let version_dir = output.path().join("v5.10.4");
    assert_eq!(summary.output_dir, version_dir);
    assert_eq!(
        std::fs::read(version_dir.join(GENERIC_DEB)).unwrap(),
        b"generic image"
    );
    assert_eq!(std::fs::read(version_dir.join(ALL_DEB)).unwrap(), b"headers");
    assert!(!version_dir.join(LOWLATENCY_DEB).exists());
}

#[tokio::test]
async fn test_low_latency_variant() {
    let server = MockServer::start().await;
    mount_page(&server, "/mainline/", index_page()).await;
    mount_page(&server, "/mainline/v5.10.4/amd64/", arch_page()).await;
    mount_file(&server, LOWLATENCY_DEB, b"lowlatency image", 1).await;
    mount_file(&server, ALL_DEB, b"headers", 1).await;
    mount_file(&server, GENERIC_DEB, b"generic image", 0).await;

    let output = TempDir::new().unwrap();
    let mut config = create_test_config(&server, output.path());
    config.variant = Variant::LowLatency;

    let outcome = Coordinator::new(ArchiveClient::new().unwrap(), config)
        .run()
        .await
        .unwrap();

    assert!(matches!(outcome, RunOutcome::Downloaded { .. }));
    assert!(output.path().join("v5.10.4").join(LOWLATENCY_DEB).exists());
}

/// An index without version folders ends the run before any other request
#[tokio::test]
async fn test_no_version_folders() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mainline/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><a href="../">Parent</a><a href="daily/">daily/</a></body></html>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    forbid_other_requests(&server).await;

    let output = TempDir::new().unwrap();
    let coordinator = Coordinator::new(
        ArchiveClient::new().unwrap(),
        create_test_config(&server, output.path()),
    );

    let outcome = coordinator.run().await.unwrap();
    assert_eq!(outcome, RunOutcome::NoFolder);
    assert_eq!(std::fs::read_dir(output.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_minimum_above_every_folder() {
    let server = MockServer::start().await;
    mount_page(&server, "/mainline/", index_page()).await;
    forbid_other_requests(&server).await;

    let output = TempDir::new().unwrap();
    let mut config = create_test_config(&server, output.path());
    config.min_version = Version::parse("6.0").unwrap();
    config.include_rc = true;

    let outcome = Coordinator::new(ArchiveClient::new().unwrap(), config)
        .run()
        .await
        .unwrap();
    assert_eq!(outcome, RunOutcome::NoFolder);
}

#[tokio::test]
async fn test_release_candidate_selected_when_included() {
    let server = MockServer::start().await;
    mount_page(&server, "/mainline/", index_page()).await;
    mount_page(
        &server,
        "/mainline/v5.11-rc1/amd64/",
        "<html><body></body></html>".to_string(),
    )
    .await;
    forbid_other_requests(&server).await;

    let output = TempDir::new().unwrap();
    let mut config = create_test_config(&server, output.path());
    config.include_rc = true;

    let outcome = Coordinator::new(ArchiveClient::new().unwrap(), config)
        .run()
        .await
        .unwrap();

    match outcome {
        RunOutcome::NoFiles { selection } => assert_eq!(selection.folder, "v5.11-rc1/"),
        other => panic!("Expected RunOutcome::NoFiles, got {:?}", other),
    }
    assert!(!output.path().join("v5.11-rc1").exists());
}

#[tokio::test]
async fn test_existing_output_directory_aborts_download() {
    let server = MockServer::start().await;
    mount_page(&server, "/mainline/", index_page()).await;
    mount_page(&server, "/mainline/v5.10.4/amd64/", arch_page()).await;
    forbid_other_requests(&server).await;

    let output = TempDir::new().unwrap();
    let previous = output.path().join("v5.10.4");
    std::fs::create_dir(&previous).unwrap();
    std::fs::write(previous.join(GENERIC_DEB), b"from last run").unwrap();

    let coordinator = Coordinator::new(
        ArchiveClient::new().unwrap(),
        create_test_config(&server, output.path()),
    );
    let outcome = coordinator.run().await.unwrap();

    match outcome {
        RunOutcome::DownloadAborted { output_dir, .. } => assert_eq!(output_dir, previous),
        other => panic!("Expected RunOutcome::DownloadAborted, got {:?}", other),
    }
    assert_eq!(
        std::fs::read(previous.join(GENERIC_DEB)).unwrap(),
        b"from last run"
    );
}

#[tokio::test]
async fn test_uncreatable_output_directory_aborts_download() {
    let server = MockServer::start().await;
    mount_page(&server, "/mainline/", index_page()).await;
    mount_page(&server, "/mainline/v5.10.4/amd64/", arch_page()).await;
    forbid_other_requests(&server).await;

    let output = TempDir::new().unwrap();
    let missing_root = output.path().join("nope").join("deeper");

    let coordinator = Coordinator::new(
        ArchiveClient::new().unwrap(),
        create_test_config(&server, &missing_root),
    );
    let outcome = coordinator.run().await.unwrap();

    match outcome {
        RunOutcome::DownloadAborted {
            output_dir, reason, ..
        } => {
            assert_eq!(output_dir, missing_root.join("v5.10.4"));
            assert!(reason.starts_with("Unable to create output folder"));
        }
        other => panic!("Expected RunOutcome::DownloadAborted, got {:?}", other),
    }
    assert!(!output.path().join("nope").exists());
}

#[tokio::test]
async fn test_dry_run_lists_without_downloading() {
    let server = MockServer::start().await;
    mount_page(&server, "/mainline/", index_page()).await;
    mount_page(&server, "/mainline/v5.10.4/amd64/", arch_page()).await;
    forbid_other_requests(&server).await;

    let output = TempDir::new().unwrap();
    let mut config = create_test_config(&server, output.path());
    config.dry_run = true;

    let outcome = Coordinator::new(ArchiveClient::new().unwrap(), config)
        .run()
        .await
        .unwrap();

    match outcome {
        RunOutcome::DryRun { files, .. } => {
            assert_eq!(files, vec![GENERIC_DEB.to_string(), ALL_DEB.to_string()])
        }
        other => panic!("Expected RunOutcome::DryRun, got {:?}", other),
    }
    assert!(!output.path().join("v5.10.4").exists());
}

#[tokio::test]
async fn test_index_server_error_fails_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mainline/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let coordinator = Coordinator::new(
        ArchiveClient::new().unwrap(),
        create_test_config(&server, output.path()),
    );

    let result = coordinator.run().await;
    assert!(matches!(result, Err(AppError::Download(_))));
}

#[tokio::test]
async fn test_selection_is_idempotent_against_static_page() {
    let server = MockServer::start().await;
    mount_page(&server, "/mainline/", index_page()).await;

    let output = TempDir::new().unwrap();
    let config = create_test_config(&server, output.path());
    let client = ArchiveClient::new().unwrap();

    let first = select_latest(&client, &config).await.unwrap();
    let second = select_latest(&client, &config).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.unwrap().version, Version::parse("5.10.4").unwrap());
}

/// Repository roots with and without a trailing slash reach the same URLs
#[tokio::test]
async fn test_repository_without_trailing_slash() {
    let server = MockServer::start().await;
    mount_page(&server, "/mainline/", index_page()).await;
    mount_page(&server, "/mainline/v5.10.4/amd64/", arch_page()).await;
    forbid_other_requests(&server).await;

    let output = TempDir::new().unwrap();
    let mut config = create_test_config(&server, output.path());
    config.repository = format!("{}/mainline", server.uri());
    config.dry_run = true;

    let outcome = Coordinator::new(ArchiveClient::new().unwrap(), config)
        .run()
        .await
        .unwrap();
    assert!(matches!(outcome, RunOutcome::DryRun { .. }));
}
