//! melt_shop: smallest end-to-end run of the spatial engine.
//!
//! Lays out three bays in a row (EAF, ladle furnace, caster), places one
//! unit of equipment in each, routes a ladle car between them and sweeps
//! two overhead cranes per bay looking for near misses.
//!
//! Run with:
//!   cargo run -p melt_shop
//!   cargo run -p melt_shop -- path/to/layout.json
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ms_core::{ActorId, LayoutConfig, Point};
use ms_spatial::{SpatialEngineBuilder, Zone};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Simulated minutes swept by the crane collision check.
const SWEEP_MINUTES: u32 = 12;

/// Crane shuttle period along the rail, in minutes.
const CRANE_PERIOD: f64 = 8.0;

const LAYOUT_JSON: &str = r#"{
    "ladle_car_speed": 150.0,
    "zone_order": ["eaf_bay", "lmf_bay", "caster_bay"],
    "transport_classes": {
        "tapping":   { "anchor": { "kind": "corner" } },
        "treatment": { "anchor": { "kind": "fixed", "x": 450.0, "y": 160.0 } },
        "rh":        { "anchor": { "kind": "direct" } }
    },
    "zones": {
        "eaf_bay": {
            "x": 0, "y": 0, "width": 300, "height": 120,
            "routes": ["tapping"],
            "crane_rails": [{ "start_x": 10, "end_x": 290, "y": 110 }]
        },
        "lmf_bay": {
            "x_offset": 300, "y_offset": 0, "width": 300, "height": 120,
            "routes": ["tapping", "treatment"],
            "crane_rails": [{ "start_x": 310, "end_x": 590, "y": 110 }]
        },
        "caster_bay": {
            "x": 600, "y": 0, "width": 400, "height": 200,
            "routes": ["treatment", "rh"],
            "actor_slots": 3,
            "crane_rails": [{ "start_x": 610, "end_x": 990, "y": 190 }]
        },
        "scrap_yard": { "x": "north", "y": 400 }
    }
}"#;

// ── Crane model ───────────────────────────────────────────────────────────────

/// Cranes shuttle along the zone's first rail, each slot a quarter period
/// behind the previous one.
fn crane_position(zone: &Zone, crane: &ActorId, minute: f64) -> Option<Point> {
    let rail = zone.rails.first()?;
    let slot: f64 = crane.as_str().rsplit('_').next()?.parse().ok()?;
    let phase = (minute / CRANE_PERIOD + slot / 4.0) * std::f64::consts::TAU;
    let t = 0.5 + 0.5 * phase.sin();
    Some(Point::new(rail.start_x + t * (rail.end_x - rail.start_x), rail.y))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => LayoutConfig::from_json_file(Path::new(&path))?,
        None => LayoutConfig::from_json_str(LAYOUT_JSON)?,
    };

    let t0 = Instant::now();
    let mut engine = SpatialEngineBuilder::new(config)
        .actors(crane_position)
        .build();
    info!(elapsed = ?t0.elapsed(), zones = engine.zones().len(), "engine ready");

    println!("=== melt_shop ===");
    for zone in engine.zones().iter() {
        println!(
            "  {:<12} {} .. {}  center {}",
            zone.id.as_str(),
            zone.top_left,
            zone.bottom_right,
            zone.center
        );
    }
    println!();

    // 1. Equipment.
    engine.place("eaf1", "EAF", "eaf_bay", Point::new(60.0, 40.0))?;
    engine.place("lmf1", "LMF", "lmf_bay", Point::new(420.0, 60.0))?;
    engine.place("caster1", "Caster", "caster_bay", Point::new(900.0, 100.0))?;
    if let Err(e) = engine.place("caster2", "Caster", "caster_bay", Point::new(1200.0, 100.0)) {
        println!("rejected placement: {e}");
    }

    // 2. Ladle-car routes.
    for (from, to) in [("eaf1", "lmf1"), ("lmf1", "caster1"), ("caster1", "lmf1"), ("eaf1", "eaf1")] {
        let path = engine.route(from, to)?;
        println!(
            "route {from:>7} -> {to:<7} {:>3} segments  {:>8.2} units  {:>6.3} min",
            path.segments().len(),
            path.distance(),
            path.travel_time()
        );
    }
    match engine.route("eaf1", "caster1") {
        Ok(path) => println!("route eaf1 -> caster1 {:.2} units", path.distance()),
        Err(e) => println!("route eaf1 -> caster1 unavailable: {e}"),
    }

    for class in [Some("tapping"), Some("treatment"), Some("rh"), None] {
        let path = engine.route_between_zones("eaf_bay", "caster_bay", class)?;
        println!(
            "bay route eaf_bay -> caster_bay [{}]: {}",
            class.unwrap_or("direct"),
            serde_json::to_string(&path.waypoints())?
        );
    }
    println!();

    // 3. Crane collisions.
    for minute in 0..SWEEP_MINUTES {
        let flagged: Vec<String> = engine
            .collisions_at(f64::from(minute))
            .into_iter()
            .filter(|(_, hit)| *hit)
            .map(|(zone, _)| zone.to_string())
            .collect();
        if !flagged.is_empty() {
            println!("minute {minute:>2}: crane conflict in {}", flagged.join(", "));
        }
    }

    println!();
    println!("caches: {}", engine.cache_stats());
    Ok(())
}
