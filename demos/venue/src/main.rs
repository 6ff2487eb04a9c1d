//! venue — simulated event venue driving the position sampler.
//!
//! Six visitors random-walk between three zones for a simulated ten minutes.
//! The sampler records their positions every few seconds of sim time and
//! writes a dwell-time summary at exit.
//!
//! ```text
//! cargo run -p venue                      # default config, output under the data dir
//! cargo run -p venue -- venue.json        # config from a JSON file
//! RUST_LOG=debug cargo run -p venue       # per-entity identity events too
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use vt_core::{AppPaths, Clock, ManualClock, Quat, SamplerConfig, Vec3};
use vt_sampler::{LifecycleTracker, PositionSampler, SamplerSlot, TrackedEntity};
use vt_zone::{Transform, Zone, ZoneSet, ZoneSetBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const VISITOR_COUNT: usize = 6;
const SEED:          u64   = 42;
const FRAME_SECS:    f64   = 0.5;
const SESSION_SECS:  f64   = 600.0;
const WALK_SPEED:    f32   = 3.0;  // metres per second
const LEAVER_AT:     f64   = 240.0; // one visitor goes home early

// ── Venue ─────────────────────────────────────────────────────────────────────

fn build_zones() -> Result<ZoneSet> {
    let mut builder = ZoneSetBuilder::new();
    // Stage sits inside the arena and is loaded first, so it wins there.
    builder.add(Zone::from_size(
        Some("Stage"),
        Transform::from_position(Vec3::new(0.0, 0.0, 15.0)),
        Vec3::new(20.0, 10.0, 8.0),
    )?);
    builder.add(Zone::from_size(Some("Arena"), Transform::IDENTITY, Vec3::new(60.0, 20.0, 40.0))?);
    builder.add(Zone::from_size(
        Some("Lobby"),
        Transform::new(Vec3::new(55.0, 0.0, -30.0), Quat::from_rotation_y(std::f32::consts::FRAC_PI_4)),
        Vec3::new(30.0, 10.0, 20.0),
    )?);
    Ok(builder.build())
}

fn spawn_visitors(rng: &mut SmallRng) -> Vec<TrackedEntity> {
    let mut visitors: Vec<TrackedEntity> = (0..VISITOR_COUNT as u64)
        .map(|i| {
            let pos = Vec3::new(rng.gen_range(-25.0..25.0), 0.0, rng.gen_range(-15.0..15.0));
            TrackedEntity::new(100 + i, "Visitor(Clone)", pos)
        })
        .collect();
    // Host bookkeeping object; the sampler's exclusion policy skips it.
    visitors.push(TrackedEntity::new(1u64, "EventSystem", Vec3::ZERO));
    visitors
}

fn walk(visitors: &mut [TrackedEntity], rng: &mut SmallRng, dt: f32) {
    for v in visitors.iter_mut().filter(|v| v.name != "EventSystem") {
        let step = Vec3::new(rng.gen_range(-1.0..1.0), 0.0, rng.gen_range(-1.0..1.0));
        v.position += step.normalize_or_zero() * WALK_SPEED * dt;
        v.position = v.position.clamp(Vec3::new(-40.0, 0.0, -60.0), Vec3::new(80.0, 0.0, 40.0));
    }
}

fn load_config(arg: Option<&str>) -> Result<SamplerConfig> {
    match arg {
        Some(path) => SamplerConfig::from_json_file(Path::new(path))
            .with_context(|| format!("failed to load sampler config from {path}")),
        None => Ok(SamplerConfig::default()),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let arg = std::env::args().nth(1);
    let config = load_config(arg.as_deref())?;
    let zones = build_zones()?;
    println!("=== venue — position sampler demo ===");
    println!(
        "Visitors: {VISITOR_COUNT}  |  Zones: {}  |  Session: {SESSION_SECS}s  |  Interval: {}s",
        zones.len(),
        config.sampling_interval_secs
    );

    // Sim time runs as fast as the loop; wall time starts now.
    let clock = ManualClock::new(chrono::Local::now().naive_local());
    let mut sampler = PositionSampler::new(config, AppPaths::from_env("venue"), clock.clone());
    sampler.start()?;

    let slot = SamplerSlot::new();
    if slot.install(sampler).is_err() {
        anyhow::bail!("sampler slot already occupied");
    }

    let tracker = LifecycleTracker::new(slot.clone());
    let mut rng = SmallRng::seed_from_u64(SEED);
    let mut visitors = spawn_visitors(&mut rng);
    let mut presences: Vec<_> = visitors
        .iter()
        .filter(|v| v.name != "EventSystem")
        .map(|v| (v.handle, tracker.attach(format!("{}#{}", v.name, v.handle))))
        .collect();

    let mut ticks = 0usize;
    let mut rows = 0usize;
    while clock.sim_secs() < SESSION_SECS {
        walk(&mut visitors, &mut rng, FRAME_SECS as f32);

        if clock.sim_secs() >= LEAVER_AT && visitors.len() > VISITOR_COUNT {
            let gone = visitors.remove(0);
            slot.with(|s| s.forget_entity(gone.handle));
            presences.retain(|(handle, _)| *handle != gone.handle);
        }

        if let Some(report) = slot.pump(&visitors, &zones) {
            ticks += 1;
            rows += report.rows_written;
        }
        clock.advance(FRAME_SECS);
    }

    let raw = slot.with(|s| s.raw_log_path().map(Path::to_path_buf)).flatten();
    let summary = slot.shutdown();
    drop(presences);

    println!();
    println!("Ticks: {ticks}  |  Rows: {rows}");
    if let Some(raw) = raw {
        let samples = vt_output::load_samples_csv(&raw)?;
        println!("Raw log:  {} ({} samples)", raw.display(), samples.len());
    }
    match summary {
        Some(path) => println!("Summary:  {}", path.display()),
        None => println!("Summary:  (not written)"),
    }
    Ok(())
}
