/// Blob store adapter tests
/// Local files in a temp dir, Supabase against a mock HTTP server
use melodia_core::{BlobStore, MelodiaError};
use melodia_server::services::{LocalBlobStore, SupabaseBlobStore};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Local Blob Store
// =============================================================================

/// Deleting a stored file removes it from disk
#[tokio::test]
async fn test_local_delete_removes_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = LocalBlobStore::new(temp_dir.path().to_path_buf());
    store.initialize().await.unwrap();

    let stored = store.put("uploads/song.mp3", b"ID3 fake").await.unwrap();
    assert!(stored.exists());

    store.delete("uploads/song.mp3").await.unwrap();
    assert!(!stored.exists(), "File should be gone after delete");
}

/// A missing file counts as already deleted
#[tokio::test]
async fn test_local_delete_missing_file_is_ok() {
    let temp_dir = TempDir::new().unwrap();
    let store = LocalBlobStore::new(temp_dir.path().to_path_buf());
    store.initialize().await.unwrap();

    store.delete("never-uploaded.mp3").await.unwrap();
}

#[tokio::test]
async fn test_local_delete_rejects_empty_path() {
    let temp_dir = TempDir::new().unwrap();
    let store = LocalBlobStore::new(temp_dir.path().to_path_buf());
    store.initialize().await.unwrap();

    let result = store.delete("").await;
    assert!(matches!(result, Err(MelodiaError::InvalidInput(_))));

    let result = store.delete("//").await;
    assert!(matches!(result, Err(MelodiaError::InvalidInput(_))));
}

/// Files outside the base directory are never touched
#[tokio::test]
async fn test_local_delete_rejects_traversal() {
    let outer = TempDir::new().unwrap();
    let base = outer.path().join("blobs");
    std::fs::create_dir_all(&base).unwrap();
    let victim = outer.path().join("victim.mp3");
    std::fs::write(&victim, b"keep me").unwrap();

    let store = LocalBlobStore::new(base);

    let result = store.delete("../victim.mp3").await;
    assert!(matches!(result, Err(MelodiaError::InvalidInput(_))));
    assert!(victim.exists(), "File outside base must survive");
}

/// Escaping paths are refused even when nothing exists there
#[tokio::test]
async fn test_local_delete_rejects_traversal_to_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = LocalBlobStore::new(temp_dir.path().join("blobs"));
    store.initialize().await.unwrap();

    let result = store.delete("../nothing-here.mp3").await;
    assert!(matches!(result, Err(MelodiaError::InvalidInput(_))));

    let result = store.delete("/tmp/elsewhere.mp3").await;
    assert!(matches!(result, Err(MelodiaError::InvalidInput(_))));
}

/// A path that cannot be inspected is a failure, not "already deleted"
#[cfg(unix)]
#[tokio::test]
async fn test_local_delete_reports_unreadable_path() {
    let temp_dir = TempDir::new().unwrap();
    let store = LocalBlobStore::new(temp_dir.path().to_path_buf());
    store.initialize().await.unwrap();

    // A regular file used as a directory component fails with ENOTDIR
    let file = store.put("plain.mp3", b"audio").await.unwrap();

    let result = store.delete("plain.mp3/inner.mp3").await;
    assert!(matches!(result, Err(MelodiaError::StorageDeleteFailed { .. })));
    assert!(file.exists());
}

// =============================================================================
// Supabase Blob Store
// =============================================================================

#[tokio::test]
async fn test_supabase_delete_sends_authenticated_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/songs/uploads/song.mp3"))
        .and(header("Authorization", "Bearer service-key"))
        .and(header("apikey", "service-key"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = SupabaseBlobStore::new(mock_server.uri(), "songs", "service-key").unwrap();

    store.delete("uploads/song.mp3").await.unwrap();
}

/// Reserved URL characters stay part of the object key
#[tokio::test]
async fn test_supabase_percent_encodes_object_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/songs/live%232.mp3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/songs/albums/a%3Fb.mp3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = SupabaseBlobStore::new(mock_server.uri(), "songs", "service-key").unwrap();

    store.delete("live#2.mp3").await.unwrap();
    store.delete("albums/a?b.mp3").await.unwrap();

    let received = mock_server.received_requests().await.unwrap();
    let paths: Vec<&str> = received.iter().map(|r| r.url.path()).collect();
    assert_eq!(
        paths,
        vec![
            "/storage/v1/object/songs/live%232.mp3",
            "/storage/v1/object/songs/albums/a%3Fb.mp3",
        ]
    );
    assert!(received.iter().all(|r| r.url.query().is_none()));
}

#[tokio::test]
async fn test_supabase_not_found_counts_as_deleted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let store = SupabaseBlobStore::new(mock_server.uri(), "songs", "service-key").unwrap();

    store.delete("gone.mp3").await.unwrap();
}

#[tokio::test]
async fn test_supabase_server_error_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(500).set_body_string("storage unavailable"))
        .mount(&mock_server)
        .await;

    let store = SupabaseBlobStore::new(mock_server.uri(), "songs", "service-key").unwrap();

    let err = store.delete("song.mp3").await.unwrap_err();
    match err {
        MelodiaError::StorageDeleteFailed { path, reason } => {
            assert_eq!(path, "song.mp3");
            assert!(reason.contains("500"));
        }
        other => panic!("Expected StorageDeleteFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_supabase_unreachable_fails() {
    // Nothing listens on port 9 (discard)
    let store = SupabaseBlobStore::new("http://127.0.0.1:9", "songs", "service-key").unwrap();

    let result = store.delete("song.mp3").await;
    assert!(matches!(result, Err(MelodiaError::StorageDeleteFailed { .. })));
}

#[test]
fn test_supabase_rejects_bad_url() {
    let result = SupabaseBlobStore::new("project.supabase.co", "songs", "key");
    assert!(matches!(result, Err(MelodiaError::InvalidInput(_))));
}

#[tokio::test]
async fn test_supabase_empty_path_is_rejected_locally() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let store = SupabaseBlobStore::new(mock_server.uri(), "songs", "service-key").unwrap();

    let result = store.delete("").await;
    assert!(matches!(result, Err(MelodiaError::InvalidInput(_))));

    let result = store.delete("//").await;
    assert!(matches!(result, Err(MelodiaError::InvalidInput(_))));
}
