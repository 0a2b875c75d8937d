//! # Page Verification Tests
//!
//! End-to-end checks of a whole page: settings in, both engines wired,
//! host events and frames routed.
//!
//! 1. **Effects**: pool sizing through settings, idempotent reconfiguration
//! 2. **Paging**: one section per wheel step, walls at both ends, nested
//!    regions left alone
//! 3. **Lifecycle**: teardown twice, nothing fires afterwards
//!
//! Run with: cargo test -p folio --test page_verification

use folio::effects::{EffectConfig, EffectType, Intensity, StartOutcome};
use folio::scroll::{EventOutcome, NodeId, Overflow, PageTree, ScrollMetrics, SmoothScroll};
use folio::ui::{FrameStatus, Key, ManualClock, RecordingSurface, Viewport, WheelDelta};
use folio::{HostEvent, Page, SiteSettings};

const FRAME_MS: f64 = 1000.0 / 60.0;
const VIEWPORT: Viewport = Viewport::new(1280.0, 720.0);

const SETTINGS: &str = r#"
seed = 2024
user_agent = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0)"

[effects]
effectType = "snowfall"
intensity = "high"
"#;

struct Fixture {
    page: Page<RecordingSurface, ManualClock>,
    clock: ManualClock,
    gallery: NodeId,
}

fn fixture(settings: &SiteSettings) -> Fixture {
    let mut tree = PageTree::new();
    let body = tree.add_root();
    for (i, id) in ["hero", "projects", "library", "about", "contact"].iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let top = i as f32 * VIEWPORT.height;
        tree.add_block(body, id, &["snap-section"], top, VIEWPORT.height);
    }
    let gallery = tree.add_child(body);
    tree.set_metrics(
        gallery,
        ScrollMetrics {
            overflow: Overflow::Scroll,
            scroll_top: 300.0,
            scroll_height: 3_000.0,
            client_height: 500.0,
        },
    );

    let clock = ManualClock::new();
    let page = Page::new(settings, Some(RecordingSurface::new()), tree, VIEWPORT, clock.clone());
    Fixture { page, clock, gallery }
}

fn run_frames(fixture: &mut Fixture, frames: u32) {
    for _ in 0..frames {
        fixture.clock.advance(FRAME_MS);
        let frame = fixture.page.frame();
        fixture.page.handle(HostEvent::Scroll(frame.scroll.position));
    }
}

fn wheel(fixture: &mut Fixture, dy: f32, target: Option<NodeId>) -> EventOutcome {
    fixture.page.handle(HostEvent::Wheel {
        delta: WheelDelta::vertical(dy),
        target,
    })
}

// ============================================================================
// MISSION 1: EFFECTS
// ============================================================================

#[test]
fn verify_settings_drive_the_pool() {
    let settings = SiteSettings::from_toml_str(SETTINGS).expect("valid settings");
    let mut fixture = fixture(&settings);

    // 60 × 1.5 on desktop
    assert_eq!(fixture.page.effects().pool_size(), 90);
    run_frames(&mut fixture, 30);
    assert_eq!(fixture.page.effects().stats().frames, 30);

    let surface = fixture.page.effects().surface().expect("surface attached");
    assert_eq!(surface.commands().len(), 90);
    assert_eq!(surface.size(), Some(VIEWPORT));
}

#[test]
fn verify_reconfiguration_round_trip() {
    let settings = SiteSettings::from_toml_str(SETTINGS).expect("valid settings");
    let mut fixture = fixture(&settings);
    let original = fixture.page.effects().pool_size();

    assert_eq!(
        fixture.page.set_effect_config(EffectConfig::default()),
        StartOutcome::Disabled
    );
    assert_eq!(fixture.page.effects().pool_size(), 0);
    assert_eq!(fixture.page.frame().effects, FrameStatus::Stopped);

    let snow = EffectConfig::new(EffectType::Snowfall, Intensity::High);
    assert_eq!(
        fixture.page.set_effect_config(snow),
        StartOutcome::Running { pool_size: original }
    );
}

// ============================================================================
// MISSION 2: PAGING
// ============================================================================

#[test]
fn verify_one_section_per_wheel_and_walls() {
    let mut fixture = fixture(&SiteSettings::default());
    assert!(fixture.page.jump_to_section("library"));
    run_frames(&mut fixture, 120);
    assert_eq!(fixture.page.snap().current_index(), 2);

    assert_eq!(wheel(&mut fixture, 40.0, None), EventOutcome::Consumed);
    assert_eq!(fixture.page.snap().current_index(), 3);
    run_frames(&mut fixture, 120);

    wheel(&mut fixture, 40.0, None);
    run_frames(&mut fixture, 120);
    assert_eq!(fixture.page.snap().current_index(), 4);

    for _ in 0..4 {
        wheel(&mut fixture, 40.0, None);
        run_frames(&mut fixture, 30);
    }
    assert_eq!(fixture.page.snap().current_index(), 4);
    assert_eq!(fixture.page.snap().driver().position(), 4.0 * VIEWPORT.height);
}

#[test]
fn verify_nested_gallery_is_not_hijacked() {
    let mut fixture = fixture(&SiteSettings::default());
    let gallery = Some(fixture.gallery);

    assert_eq!(wheel(&mut fixture, 40.0, gallery), EventOutcome::Passthrough);
    assert_eq!(wheel(&mut fixture, -40.0, gallery), EventOutcome::Passthrough);
    assert_eq!(fixture.page.snap().current_index(), 0);

    // At the gallery's top edge, upward input falls through to the page,
    // which is already at its first section.
    let node = fixture.gallery;
    fixture.page.tree_mut().set_scroll_top(node, 0.0);
    assert_eq!(wheel(&mut fixture, -40.0, gallery), EventOutcome::Consumed);
    assert_eq!(fixture.page.snap().current_index(), 0);
}

#[test]
fn verify_back_to_top_and_modal_lock() {
    let mut fixture = fixture(&SiteSettings::default());
    fixture.page.jump_to_section("about");
    run_frames(&mut fixture, 120);
    assert!(fixture.page.back_to_top_visible());

    fixture.page.open_modal();
    assert_eq!(fixture.page.handle(HostEvent::Key(Key::ArrowUp)), EventOutcome::Ignored);
    assert!(!fixture.page.scroll_to_top());
    fixture.page.close_modal();

    assert!(fixture.page.scroll_to_top());
    run_frames(&mut fixture, 120);
    assert_eq!(fixture.page.snap().current_index(), 0);
    assert!(!fixture.page.back_to_top_visible());
}

// ============================================================================
// MISSION 3: LIFECYCLE
// ============================================================================

#[test]
fn verify_teardown_twice_leaves_nothing_running() {
    let settings = SiteSettings::from_toml_str(SETTINGS).expect("valid settings");
    let mut fixture = fixture(&settings);
    run_frames(&mut fixture, 5);

    fixture.page.teardown();
    fixture.page.teardown();

    assert!(!fixture.page.effects().is_running());
    assert!(!fixture.page.effects().has_resize_listener());
    assert!(!fixture.page.snap().is_attached());

    assert_eq!(wheel(&mut fixture, 40.0, None), EventOutcome::Unhandled);
    assert_eq!(fixture.page.handle(HostEvent::Key(Key::ArrowDown)), EventOutcome::Unhandled);
    assert_eq!(fixture.page.frame().effects, FrameStatus::Stopped);
    assert_eq!(fixture.page.snap().current_index(), 0);
}
