//! Headless CLI: runs the animation loop on tokio and logs what would be drawn
//!
//! Run with: cargo run --bin trips-cli --features cli

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::path::PathBuf;
    use std::time::Duration;
    use tracing::{info, warn};
    use tracing_subscriber::{fmt, EnvFilter};
    use trips_vis::core::{compose_frame, AnimationLoop, Config, Dataset, FrameSettings, Snapshot};
    use trips_vis::scheduler_native::TokioScheduler;
    use trips_vis::time::epoch_seconds;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,trips_vis=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let mut config = match std::env::var("TRIPS_CONFIG") {
        Ok(path) => Config::load(&PathBuf::from(path))?,
        Err(_) => Config::default(),
    };
    config.apply_env()?;

    let run_for = match std::env::var("TRIPS_RUN_SECS") {
        Ok(secs) => Some(Duration::from_secs_f64(secs.trim().parse::<f64>()?.max(0.0))),
        Err(_) => None,
    };
    let snapshot_path = std::env::var("TRIPS_SNAPSHOT").ok().map(PathBuf::from);

    let dataset = Dataset::from_config(&config)?;
    let clock = config.clock()?;
    info!(
        trips = dataset.trips.len(),
        markers = dataset.markers.len(),
        skipped_trips = dataset.report.skipped_trips,
        skipped_markers = dataset.report.skipped_markers,
        trip_range = ?dataset.trip_time_range(),
        loop_secs = clock.loop_duration_secs(),
        style = %config.basemap.style,
        "Datasets loaded"
    );

    let (scheduler, mut rx) = TokioScheduler::new(config.frame_rate);
    let mut animation = AnimationLoop::new(clock, scheduler);
    let settings = FrameSettings::from(&config);
    let mut frame = animation
        .on_frame(epoch_seconds())
        .map(|time| compose_frame(&dataset, time, settings));

    let deadline = async {
        match run_for {
            Some(d) => tokio::time::sleep(d).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(deadline);
    let mut stats_interval = tokio::time::interval(Duration::from_secs(5));
    let mut frames_last_interval = 0u64;

    info!("Animation running, Ctrl-C to stop");

    loop {
        tokio::select! {
            tick = rx.recv() => {
                if tick.is_none() {
                    warn!("Frame scheduler closed");
                    break;
                }
                if let Some(time) = animation.on_frame(epoch_seconds()) {
                    frame = Some(compose_frame(&dataset, time, settings));
                    frames_last_interval += 1;
                }
            }
            _ = &mut deadline => {
                info!("Run time elapsed");
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
            _ = stats_interval.tick() => {
                if let Some(frame) = &frame {
                    info!(
                        clock = %frame.time,
                        trails = frame.trails.len(),
                        markers = frame.markers.len(),
                        frames = animation.frames(),
                        "fps" = format!("{:.1}", frames_last_interval as f64 / 5.0),
                        "stats"
                    );
                }
                frames_last_interval = 0;
            }
        }
    }

    animation.cancel();

    if let (Some(path), Some(frame)) = (snapshot_path, &frame) {
        let snapshot = Snapshot::new(frame, &config);
        std::fs::write(&path, serde_json::to_string_pretty(&snapshot)?)?;
        info!(path = %path.display(), clock = %frame.time, "Snapshot written");
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
