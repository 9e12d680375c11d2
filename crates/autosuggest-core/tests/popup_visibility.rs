mod common;

use autosuggest_core::{Anchor, InputOutcome, Rect, SearchState};
use common::Harness;
use test_case::test_case;

#[tokio::test(start_paused = true)]
async fn resize_repositions_without_rendering() {
    let harness = Harness::new();
    harness.controller.on_input("boots").await.unwrap();
    assert_eq!(
        harness.controller.anchor(),
        Some(Anchor { top: 40.0, right: 120.0 })
    );

    harness.host.resize(Rect::new(20.0, 200.0, 300.0, 24.0));

    assert_eq!(
        harness.controller.anchor(),
        Some(Anchor { top: 224.0, right: 20.0 })
    );
    assert_eq!(harness.rendered(), vec!["boots"]);
}

#[tokio::test(start_paused = true)]
async fn hide_then_show_keeps_surface_mounted_once() {
    let harness = Harness::new();

    assert_eq!(harness.controller.on_input("boots").await.unwrap(), InputOutcome::Shown);
    assert_eq!(harness.controller.on_input("").await.unwrap(), InputOutcome::Hidden);
    assert!(harness.host.is_mounted(&harness.controller.surface()));
    assert_eq!(harness.controller.on_input("boot").await.unwrap(), InputOutcome::Shown);

    assert_eq!(harness.host.mount_calls(), 1);
    assert_eq!(harness.rendered(), vec!["boots", "boot"]);
}

#[test_case("", InputOutcome::Hidden ; "empty query")]
#[test_case("bo", InputOutcome::Hidden ; "short query")]
#[test_case("boots", InputOutcome::Shown ; "long query")]
fn policy_gates_search(query: &str, expected: InputOutcome) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap();
    let harness = Harness::with(|builder| {
        builder.policy(|state: &SearchState| state.query().chars().count() >= 3)
    });

    let outcome = runtime
        .block_on(harness.controller.on_input(query))
        .unwrap();

    assert_eq!(outcome, expected);
    assert_eq!(harness.controller.is_visible(), expected == InputOutcome::Shown);
    let searched = usize::from(expected == InputOutcome::Shown);
    assert_eq!(harness.issued.get(), searched);
}

#[tokio::test(start_paused = true)]
async fn unmount_after_teardown_detaches_surface() {
    let harness = Harness::new();
    harness.controller.on_input("boots").await.unwrap();

    harness.controller.teardown();
    assert!(harness.host.is_mounted(&harness.controller.surface()));

    harness.controller.unmount();
    assert!(harness.host.body().is_empty());
}

#[tokio::test(start_paused = true)]
async fn refresh_redraws_current_results() {
    let harness = Harness::new();
    harness.controller.on_input("boots").await.unwrap();

    assert_eq!(harness.controller.refresh(), InputOutcome::Shown);
    assert_eq!(harness.rendered(), vec!["boots", "boots"]);
}
