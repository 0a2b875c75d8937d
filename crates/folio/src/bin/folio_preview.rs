//! # FOLIO Preview
//!
//! Headless run of a page: the configured effect on a recording surface and
//! a five-section page paged by a simulated wheel, on a manual clock.
//!
//! ```bash
//! # Default settings (effects off)
//! ./folio_preview
//!
//! # With a settings file and engine logs
//! RUST_LOG=folio_effects=debug,folio_scroll=debug ./folio_preview site.toml
//! ```

use folio::{HostEvent, Page, SiteSettings};
use folio_scroll::PageTree;
use folio_ui::{ManualClock, RecordingSurface, Viewport, WheelDelta};
use tracing_subscriber::EnvFilter;

const FRAME_MS: f64 = 1000.0 / 60.0;
const SECONDS: u32 = 10;
const SECTIONS: [&str; 5] = ["hero", "projects", "library", "about", "contact"];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings = match std::env::args().nth(1) {
        Some(path) => match SiteSettings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("   ✗ FATAL: {e}");
                std::process::exit(1);
            }
        },
        None => SiteSettings::default(),
    };

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                    FOLIO PREVIEW (headless)");
    println!("═══════════════════════════════════════════════════════════════════");
    println!();
    println!("  Effect:    {} / {}", settings.effects.effect_type, settings.effects.intensity);
    println!("  Device:    {:?}", settings.device());
    println!("  Sections:  {}", SECTIONS.len());
    println!();

    let viewport = Viewport::new(1440.0, 900.0);
    let mut tree = PageTree::new();
    let body = tree.add_root();
    for (i, id) in SECTIONS.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let top = i as f32 * viewport.height;
        tree.add_block(body, id, &[settings.scroll.section_marker.as_str()], top, viewport.height);
    }

    let clock = ManualClock::new();
    let mut page = Page::new(&settings, Some(RecordingSurface::new()), tree, viewport, clock.clone());
    println!("  Pool:      {} particles", page.effects().pool_size());

    let total_frames = SECONDS * 60;
    for frame in 0..total_frames {
        if frame % 120 == 0 {
            let outcome = page.handle(HostEvent::Wheel {
                delta: WheelDelta::vertical(120.0),
                target: None,
            });
            tracing::info!("t={:.1}s wheel down: {:?}", clock_secs(frame), outcome);
        }
        clock.advance(FRAME_MS);
        let result = page.frame();
        page.handle(HostEvent::Scroll(result.scroll.position));
    }

    let stats = page.effects().stats();
    let snap = page.snap().stats();
    println!();
    println!("  Frames drawn:     {}", stats.frames);
    println!("  Live sparks:      {}", stats.active_sub_particles);
    println!("  Snaps:            {}", snap.snaps);
    println!("  Boundary hits:    {}", snap.boundary_hits);
    println!(
        "  Final section:    {} ({})",
        page.snap().current_index(),
        page.snap()
            .sections()
            .get(page.snap().current_index())
            .map_or("-", |s| s.id.as_str())
    );
    println!("  Back-to-top:      {}", page.back_to_top_visible());

    page.teardown();
    println!();
    println!("═══════════════════════════════════════════════════════════════════");
}

fn clock_secs(frame: u32) -> f64 {
    f64::from(frame) * FRAME_MS / 1000.0
}
