//! Integration tests for the particle engine.

use folio_effects::particle::{FireworkPhase, StarPhase};
use folio_effects::{DeviceClass, EffectConfig, EffectType, Intensity, Particle, ParticleEngine, StartOutcome};
use folio_ui::{Clock, FrameStatus, ManualClock, RecordingSurface, Viewport};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn engine_with_clock(seed: u64) -> (ParticleEngine<RecordingSurface, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let mut engine = ParticleEngine::new(clock.clone(), Some(seed));
    engine.attach_surface(RecordingSurface::new());
    (engine, clock)
}

fn viewport() -> Viewport {
    Viewport::new(1280.0, 720.0)
}

#[test]
fn test_pool_size_for_every_effect_intensity_and_device() {
    let bases = [
        (EffectType::Snowfall, 60),
        (EffectType::Fireworks, 3),
        (EffectType::Sakura, 40),
        (EffectType::Leaves, 50),
        (EffectType::Particles, 100),
        (EffectType::Fog, 10),
        (EffectType::Hearts, 30),
        (EffectType::Stars, 5),
        (EffectType::Rain, 150),
        (EffectType::Butterflies, 15),
    ];
    let intensities = [(Intensity::Low, 60), (Intensity::Medium, 100), (Intensity::High, 150)];
    let devices = [(DeviceClass::Desktop, 100), (DeviceClass::Handheld, 40)];

    for (effect, base) in bases {
        for (intensity, multiplier) in intensities {
            for (device, reduction) in devices {
                let (mut engine, _) = engine_with_clock(5);
                engine.set_device(device);
                let expected = base * multiplier * reduction / 10_000;

                let outcome = engine.start(EffectConfig::new(effect, intensity), viewport());
                assert_eq!(
                    outcome,
                    StartOutcome::Running { pool_size: expected },
                    "{effect} {intensity} {device:?}"
                );
                assert_eq!(engine.pool_size(), expected);
                assert!(engine.particles().iter().all(|p| p.kind() == effect));
            }
        }
    }
}

#[test]
fn test_none_allocates_and_draws_nothing() {
    let (mut engine, _) = engine_with_clock(6);
    let outcome = engine.start(EffectConfig::default(), viewport());

    assert_eq!(outcome, StartOutcome::Disabled);
    assert_eq!(engine.pool_size(), 0);
    assert!(!engine.has_resize_listener());
    assert_eq!(engine.frame(), FrameStatus::Stopped);

    let surface = engine.surface().expect("attached");
    assert_eq!(surface.resize_count(), 0);
    assert_eq!(surface.clear_count(), 0);
    assert!(surface.commands().is_empty());
}

#[test]
fn test_reconfigure_round_trip() {
    let (mut engine, _) = engine_with_clock(7);
    let snow = EffectConfig::new(EffectType::Snowfall, Intensity::Medium);

    engine.start(snow, viewport());
    let first_size = engine.pool_size();
    let first_token = engine.cancel_token().expect("running");
    engine.frame();

    engine.start(EffectConfig::default(), viewport());
    assert!(first_token.is_cancelled());
    assert_eq!(engine.pool_size(), 0);
    assert_eq!(engine.frame(), FrameStatus::Stopped);

    engine.start(snow, viewport());
    assert_eq!(engine.pool_size(), first_size);
    assert_eq!(engine.frame(), FrameStatus::Continue);
    assert_eq!(engine.stats().frames, 1);
}

#[test]
fn test_fireworks_burst_once_per_ascent() {
    let (mut engine, clock) = engine_with_clock(8);
    engine.start(EffectConfig::new(EffectType::Fireworks, Intensity::High), viewport());
    assert_eq!(engine.pool_size(), 4);

    let mut last: Vec<(FireworkPhase, u64)> = Vec::new();
    let mut completed_cycles = 0;

    for _ in 0..3_000 {
        clock.advance(FRAME_MS);
        engine.frame();

        let now: Vec<(FireworkPhase, u64, usize)> = engine
            .particles()
            .iter()
            .map(|p| match p {
                Particle::Firework(f) => (f.phase(), f.bursts(), f.spark_count()),
                other => panic!("unexpected particle {:?}", other.kind()),
            })
            .collect();

        for (i, &(phase, bursts, sparks)) in now.iter().enumerate() {
            if let Some(&(prev_phase, prev_bursts)) = last.get(i) {
                assert!(bursts - prev_bursts <= 1);
                if bursts > prev_bursts {
                    assert_eq!(prev_phase, FireworkPhase::Ascending);
                    assert_eq!(phase, FireworkPhase::Exploded);
                    assert!((40..=70).contains(&sparks), "burst of {sparks}");
                }
                if prev_phase == FireworkPhase::Exploded && phase == FireworkPhase::Ascending {
                    completed_cycles += 1;
                    assert_eq!(sparks, 0);
                }
            }
        }
        last = now.into_iter().map(|(phase, bursts, _)| (phase, bursts)).collect();
    }

    assert!(completed_cycles > 0, "no firework finished a full cycle");
}

#[test]
fn test_shooting_star_gap_never_below_interval() {
    for intensity in [Intensity::Low, Intensity::Medium, Intensity::High] {
        let (mut engine, clock) = engine_with_clock(9);
        engine.start(EffectConfig::new(EffectType::Stars, intensity), viewport());
        let interval = intensity.star_interval_ms();

        let mut went_dormant_at: Vec<f64> = vec![0.0; engine.pool_size()];
        let mut was_active: Vec<bool> = vec![false; engine.pool_size()];
        let mut launches = 0;

        // Two simulated minutes.
        for _ in 0..7_200 {
            clock.advance(FRAME_MS);
            engine.frame();
            let now = clock.now_ms();

            for (i, particle) in engine.particles().iter().enumerate() {
                let Particle::ShootingStar(star) = particle else {
                    panic!("unexpected particle");
                };
                let active = star.is_active();
                if active && !was_active[i] {
                    launches += 1;
                    assert!(
                        now - went_dormant_at[i] >= interval,
                        "{intensity}: relaunched after {} ms",
                        now - went_dormant_at[i]
                    );
                }
                if !active && was_active[i] {
                    assert!(matches!(star.phase(), StarPhase::Dormant { .. }));
                    went_dormant_at[i] = now;
                }
                was_active[i] = active;
            }
        }

        assert!(launches > 0, "{intensity}: no star ever launched");
    }
}

#[test]
fn test_recycled_particles_stay_in_bounds() {
    let bounded = [
        (EffectType::Snowfall, 20.0),
        (EffectType::Sakura, 20.0),
        (EffectType::Leaves, 20.0),
        (EffectType::Particles, 100.0),
        (EffectType::Butterflies, 100.0),
    ];

    for (effect, margin) in bounded {
        let (mut engine, clock) = engine_with_clock(10);
        engine.start(EffectConfig::new(effect, Intensity::Medium), viewport());

        for _ in 0..2_000 {
            clock.advance(FRAME_MS);
            engine.frame();
            for particle in engine.particles() {
                let (x, y) = particle.position();
                assert!(
                    !viewport().is_beyond(x, y, margin),
                    "{effect} particle escaped to ({x}, {y})"
                );
            }
        }
    }
}

#[test]
fn test_rain_drifts_left_and_recycles_only_at_bottom() {
    let (mut engine, clock) = engine_with_clock(11);
    engine.start(EffectConfig::new(EffectType::Rain, Intensity::Low), viewport());

    for _ in 0..200 {
        let before: Vec<(f32, f32)> = engine.particles().iter().map(Particle::position).collect();
        clock.advance(FRAME_MS);
        engine.frame();

        for (&(x0, y0), particle) in before.iter().zip(engine.particles()) {
            let (x1, y1) = particle.position();
            if y1 > y0 {
                assert!((x0 - x1 - 1.0).abs() < 1e-3, "drop moved sideways by {}", x0 - x1);
            } else {
                assert_eq!(y1, -20.0, "drop recycled somewhere other than the top");
            }
        }
    }
}

#[test]
fn test_teardown_is_idempotent() {
    let (mut engine, _) = engine_with_clock(12);
    engine.start(EffectConfig::new(EffectType::Hearts, Intensity::Medium), viewport());
    engine.frame();

    engine.teardown();
    engine.teardown();
    engine.teardown();

    assert!(!engine.is_running());
    assert!(engine.cancel_token().is_none());
    assert!(!engine.has_resize_listener());
    assert_eq!(engine.pool_size(), 0);
    assert_eq!(engine.frame(), FrameStatus::Stopped);
}

#[test]
fn test_detached_surface_stops_the_run() {
    let (mut engine, _) = engine_with_clock(13);
    engine.start(EffectConfig::new(EffectType::Fog, Intensity::Low), viewport());
    engine.frame();

    let surface = engine.detach_surface().expect("surface was attached");
    assert_eq!(surface.clear_count(), 1);
    assert_eq!(surface.commands().len(), 6);
    assert!(!engine.is_running());

    assert_eq!(
        engine.start(EffectConfig::new(EffectType::Fog, Intensity::Low), viewport()),
        StartOutcome::NoSurface
    );
}

#[test]
fn test_same_seed_replays_identically() {
    let positions = |seed| {
        let (mut engine, clock) = engine_with_clock(seed);
        engine.start(EffectConfig::new(EffectType::Butterflies, Intensity::High), viewport());
        for _ in 0..100 {
            clock.advance(FRAME_MS);
            engine.frame();
        }
        engine.particles().iter().map(Particle::position).collect::<Vec<_>>()
    };

    assert_eq!(positions(77), positions(77));
    assert_ne!(positions(77), positions(78));
}

#[test]
fn test_lossy_record_drives_engine() {
    let (mut engine, _) = engine_with_clock(13);
    engine.set_device(DeviceClass::from_user_agent("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)"));

    let config = EffectConfig::from_json_lossy(r#"{"effectType":"snowfall","intensity":"high"}"#);
    assert_eq!(engine.start(config, viewport()), StartOutcome::Running { pool_size: 36 });

    let garbage = EffectConfig::from_json_lossy("{effectType: snowfall");
    assert_eq!(engine.start(garbage, viewport()), StartOutcome::Disabled);
}
