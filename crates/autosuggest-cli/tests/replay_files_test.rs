use autosuggest_cli::{replay, CatalogBackend};
use autosuggest_config::ConfigLoader;
use autosuggest_core::{Category, InputOutcome, MemoryHost, Rect, SearchController};
use std::rc::Rc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::LocalSet;

#[tokio::test(start_paused = true)]
async fn replays_with_config_and_catalog_from_disk() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("popup.toml");
    std::fs::write(
        &config_path,
        r#"
[popup]
enabled_blocks = ["Product"]
popup_class_name = "dark"

[popup.product]
child_class_name = "tile"
"#,
    )
    .unwrap();
    let catalog_path = dir.path().join("catalog.json");
    std::fs::write(
        &catalog_path,
        r#"{"Product": [{"url": "/p/1", "title": "Desk Lamp", "image": "/i/1.png", "brand": "Lumen", "price": 42}]}"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_path).await.unwrap();
    let backend = CatalogBackend::load(&catalog_path, Duration::from_millis(50))
        .await
        .unwrap();
    let controller = SearchController::new(
        Rc::new(MemoryHost::new(Rect::new(0.0, 0.0, 100.0, 20.0))),
        Rc::new(backend),
        config.popup,
    );

    let result = LocalSet::new()
        .run_until(replay(
            &controller,
            &["la".to_string(), "lamp".to_string()],
            Duration::from_millis(5),
        ))
        .await
        .unwrap();

    assert_eq!(result.keystrokes[1].outcome, InputOutcome::Shown);
    assert_eq!(controller.result_set().items(Category::Product).len(), 1);
    assert!(result.markup.contains("suggestion-popup dark"));
    assert!(result.markup.contains("tile"));
    assert!(result.markup.contains("42$"));
    assert!(!result.markup.contains("SUGGESTION"));
}

#[tokio::test]
async fn missing_catalog_reports_path() {
    let err = CatalogBackend::load(
        std::path::Path::new("/nonexistent/catalog.json"),
        Duration::ZERO,
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("/nonexistent/catalog.json"));
}
