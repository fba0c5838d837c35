//! Dollypath playback demo: builds a spiral path and plays it at 30 fps.
//!
//! Usage:
//! ```text
//! cargo run --example playback                  # linear easing
//! cargo run --example playback -- in-out-cubic  # any easing name
//! ```

use std::time::{Duration, Instant};

use dollypath::easing::Ease;
use dollypath::math::Point3;
use dollypath::operations::creation::GenerateCircle;
use dollypath::session::Session;
use dollypath::settings::{LoopMode, PathType, PlaybackSettings};
use dollypath::DollyError;
use tracing::info;

const FRAME: f64 = 1.0 / 30.0;

fn main() -> Result<(), DollyError> {
    // Default: WARN for everything, INFO for dollypath.
    // Override with RUST_LOG env var (e.g. RUST_LOG=dollypath=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("playback=info".parse().unwrap_or_default())
        .add_directive("dollypath=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let easing = match std::env::args().nth(1) {
        Some(name) => name.parse::<Ease>()?,
        None => Ease::Linear,
    };
    let settings = PlaybackSettings {
        path_type: PathType::Fitted,
        loop_mode: LoopMode::None,
        easing,
        ..PlaybackSettings::default()
    };

    let mut session = Session::new(settings);
    let spiral = GenerateCircle::new(0, Point3::new(0.0, 1.5, 0.0), 4.0, 8)
        .with_radius_step(-0.25)
        .with_height_step(0.2)
        .execute();
    session.add_points(spiral);

    let mut now = Instant::now();
    session.frame(now, 0.0);
    if let Some(snapshot) = session.engine().snapshot(0) {
        info!(
            length = snapshot.length,
            duration = snapshot.duration,
            range_start = snapshot.range.start,
            range_end = snapshot.range.end,
            "path built"
        );
    }

    session.play(0)?;
    let mut frame = 0_u32;
    while session.engine().is_playing() {
        now += Duration::from_secs_f64(FRAME);
        if let Some(sample) = session.frame(now, FRAME) {
            if frame % 15 == 0 {
                let p = sample.position;
                println!(
                    "{:>6.3}  pos=({:>7.3}, {:>7.3}, {:>7.3})  fov={:>5.1}",
                    sample.progress, p.x, p.y, p.z, sample.fov
                );
            }
        }
        frame += 1;
    }
    info!(frames = frame, "playback finished");
    Ok(())
}
