//! DesktopActor integration tests
//!
//! These tests drive a spawned DesktopActor the way the launcher and the
//! browser host would:
//! - launcher navigation opens one panel per page
//! - real timers settle `Opening` and remove `Closing` panels
//! - a close racing an opening timer still ends in removal
//!
//! The tokio clock starts paused, so sleeps jump straight to the next due
//! timer and the animation timers fire in a fixed order.

use std::time::Duration;

use ractor::ActorRef;
use shared_types::{LifecycleState, SurfaceGeometry};
use window_manager::actors::desktop::{
    close_panel, get_snapshot, get_taskbar, minimize_panel, navigate, open_panel, spawn_desktop,
    DesktopArguments, DesktopMsg,
};
use window_manager::navigation::Page;
use window_manager::Config;

const OPEN_MS: u64 = 60;
const CLOSE_MS: u64 = 60;

async fn spawn_launcher_desktop() -> ActorRef<DesktopMsg<String>> {
    let config = Config {
        open_duration: Duration::from_millis(OPEN_MS),
        close_duration: Duration::from_millis(CLOSE_MS),
        ..Config::default()
    };
    let (desktop, _handle) = spawn_desktop(DesktopArguments {
        desktop_id: "overlay-test".to_string(),
        surface: SurfaceGeometry {
            width: 1920,
            height: 1080,
            sidebar_band: config.sidebar_band,
        },
        config,
        content_for: Some(Box::new(|page: Page| page.title().to_lowercase())),
    })
    .await
    .expect("Failed to spawn DesktopActor");
    desktop
}

#[tokio::test(start_paused = true)]
async fn test_launcher_opens_one_panel_per_page() {
    let desktop = spawn_launcher_desktop().await;

    for page in Page::ALL {
        navigate(&desktop, page).unwrap();
    }
    navigate(&desktop, Page::Config).unwrap();

    let snapshot = get_snapshot(&desktop).await.unwrap();
    let ids: Vec<_> = snapshot.panels.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["paradox", "config", "network"]);
    assert_eq!(snapshot.focused.as_deref(), Some("config"));

    // cascaded, not stacked
    let xs: Vec<_> = snapshot.panels.iter().map(|p| p.position.x).collect();
    assert!(xs[0] < xs[1] && xs[1] < xs[2]);

    desktop.stop(None);
}

#[tokio::test(start_paused = true)]
async fn test_panels_settle_after_open_duration() {
    let desktop = spawn_launcher_desktop().await;

    navigate(&desktop, Page::Paradox).unwrap();
    tokio::time::sleep(Duration::from_millis(OPEN_MS * 4)).await;

    let snapshot = get_snapshot(&desktop).await.unwrap();
    assert_eq!(snapshot.panels[0].lifecycle, LifecycleState::Stable);
    assert_eq!(snapshot.panels[0].content, "paradox control center");

    desktop.stop(None);
}

#[tokio::test(start_paused = true)]
async fn test_open_timer_fires_at_open_duration() {
    let desktop = spawn_launcher_desktop().await;

    navigate(&desktop, Page::Config).unwrap();
    tokio::time::sleep(Duration::from_millis(OPEN_MS - 1)).await;
    let snapshot = get_snapshot(&desktop).await.unwrap();
    assert_eq!(snapshot.panels[0].lifecycle, LifecycleState::Opening);

    tokio::time::sleep(Duration::from_millis(2)).await;
    let snapshot = get_snapshot(&desktop).await.unwrap();
    assert_eq!(snapshot.panels[0].lifecycle, LifecycleState::Stable);

    desktop.stop(None);
}

#[tokio::test(start_paused = true)]
async fn test_close_racing_open_timer_still_removes() {
    let desktop = spawn_launcher_desktop().await;

    open_panel(&desktop, "net", "NETWORK STATUS", "status".to_string()).unwrap();
    close_panel(&desktop, "net").unwrap();
    tokio::time::sleep(Duration::from_millis((OPEN_MS + CLOSE_MS) * 3)).await;

    let snapshot = get_snapshot(&desktop).await.unwrap();
    assert!(snapshot.panels.is_empty());
    assert!(snapshot.taskbar.is_empty());
    assert_eq!(snapshot.focused, None);

    desktop.stop(None);
}

#[tokio::test(start_paused = true)]
async fn test_minimized_panel_survives_timers() {
    let desktop = spawn_launcher_desktop().await;

    navigate(&desktop, Page::Network).unwrap();
    minimize_panel(&desktop, "network").unwrap();
    tokio::time::sleep(Duration::from_millis(OPEN_MS * 3)).await;

    let taskbar = get_taskbar(&desktop).await.unwrap();
    assert_eq!(taskbar.len(), 1);
    assert_eq!(taskbar[0].title, "NETWORK STATUS");

    desktop.stop(None);
}
