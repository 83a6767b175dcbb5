//! File-backed storage tests.
//!
//! Tests verify:
//! - Loading a missing file reports nothing stored
//! - Saved documents reload identically, embedded images included
//! - Saves replace the file without leaving temporary files behind
//! - Broken files surface as errors

use portfolio_exif::{
    annotate_years, FileStore, MemoryStore, Portfolio, PortfolioStore, StoreError,
    DEFAULT_PORTFOLIO_FILE,
};

use super::test_utils::{jpeg_data_url_with_date, plain_jpeg_data_url};

#[tokio::test]
async fn test_missing_file_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join(DEFAULT_PORTFOLIO_FILE));
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folio.json");
    let store = FileStore::new(&path);

    let mut portfolio = Portfolio::new();
    portfolio.user_info.name = "Robin".to_string();
    portfolio.add_image_page(jpeg_data_url_with_date(b"2008:04:01 09:30:00\0"));
    portfolio.add_series("Nights", "2011", "", 2).unwrap();

    store.save(&portfolio).await.unwrap();
    assert!(path.exists());

    let loaded = store.load().await.unwrap().unwrap();
    assert_eq!(loaded, portfolio);
    assert_eq!(loaded.pages[1].data.year.as_deref(), Some("2008"));

    // Only the document itself remains in the directory
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("folio.json")]);
}

#[tokio::test]
async fn test_save_overwrites_previous_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("folio.json"));

    let mut portfolio = Portfolio::new();
    store.save(&portfolio).await.unwrap();

    portfolio.add_image_page(plain_jpeg_data_url());
    store.save(&portfolio).await.unwrap();

    let loaded = store.load().await.unwrap().unwrap();
    assert_eq!(loaded.pages.len(), 2);
}

#[tokio::test]
async fn test_invalid_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folio.json");
    std::fs::write(&path, "{ \"pages\": 3 }").unwrap();

    let result = FileStore::new(&path).load().await;
    assert!(matches!(result, Err(StoreError::Json(_))));
}

#[tokio::test]
async fn test_save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("missing").join("folio.json"));

    let result = store.save(&Portfolio::new()).await;
    assert!(matches!(result, Err(StoreError::Io { .. })));
}

#[tokio::test]
async fn test_annotate_between_stores() {
    let source = MemoryStore::new();
    let mut portfolio = Portfolio::new();
    let index = portfolio.add_image_page(plain_jpeg_data_url());
    portfolio.pages[index].image = Some(jpeg_data_url_with_date(b"1995:10:10 10:10:10\0"));
    source.save(&portfolio).await.unwrap();

    let mut loaded = source.load().await.unwrap().unwrap();
    let report = annotate_years(&mut loaded, false);
    assert_eq!(report.annotated, 1);

    let dir = tempfile::tempdir().unwrap();
    let target = FileStore::new(dir.path().join("annotated.json"));
    target.save(&loaded).await.unwrap();

    let reloaded = target.load().await.unwrap().unwrap();
    assert_eq!(reloaded.pages[index].data.year.as_deref(), Some("1995"));
}

#[tokio::test]
async fn test_failed_rename_removes_temporary_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folio.json");
    // A non-empty directory in the way makes the final rename fail
    std::fs::create_dir(&path).unwrap();
    std::fs::write(path.join("keep"), "x").unwrap();

    let store = FileStore::new(&path);
    let result = store.save(&Portfolio::new()).await;

    assert!(matches!(result, Err(StoreError::Io { .. })));
    assert!(!dir.path().join("folio.json.tmp").exists());
    assert!(path.join("keep").exists());
}
