//! matrix-fx - Main Entry Point
//!
//! Runs the render loop on the main thread and the control API on its own
//! thread until Ctrl+C.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use matrix_fx::effects::builtin::register_builtin_effects;
use matrix_fx::telemetry::init_logging;
use matrix_fx::{
    ControlServer, EffectCatalog, FrameSink, NullSink, PlaybackScheduler, Settings, Surface,
    TerminalSink,
};

/// Longest frame delta handed to effects, so a stall does not teleport them
const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Sets the returned flag to false when Ctrl+C arrives
fn install_shutdown_handler() -> anyhow::Result<Arc<AtomicBool>> {
    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build signal runtime")?;

    thread::Builder::new()
        .name("signal".into())
        .spawn(move || {
            runtime.block_on(async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => tracing::info!("Ctrl+C received, shutting down"),
                    Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl+C"),
                }
            });
            flag.store(false, Ordering::Release);
        })
        .context("Failed to spawn signal thread")?;

    Ok(running)
}

fn load_settings() -> anyhow::Result<Settings> {
    match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => Settings::load_from_file(&path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(Settings::load()),
    }
}

fn main() -> anyhow::Result<()> {
    let settings = load_settings()?;
    let _log_guard = init_logging(&settings.log_config()).context("Failed to initialize logging")?;

    tracing::info!(
        width = settings.matrix_width,
        height = settings.matrix_height,
        fps = settings.target_fps,
        "Starting matrix-fx"
    );

    let mut catalog = EffectCatalog::new();
    register_builtin_effects(&mut catalog, settings.matrix_width, settings.matrix_height)
        .context("Failed to register built-in effects")?;
    tracing::info!(effects = ?catalog.names(), "Effects registered");

    let mut scheduler = PlaybackScheduler::new(catalog);

    let server = ControlServer::new(scheduler.handle(), settings.server_config());
    if settings.api_server_enabled {
        server.start().context("Failed to start control API")?;
    } else {
        tracing::info!("Control API disabled");
    }

    let mut sink: Box<dyn FrameSink> = if settings.preview_enabled {
        // Full rate preview floods most terminals
        Box::new(TerminalSink::stdout((settings.target_fps / 15).max(1)))
    } else {
        Box::new(NullSink)
    };

    let running = install_shutdown_handler()?;
    let mut surface = Surface::new(settings.matrix_width, settings.matrix_height);
    let frame_time = Duration::from_secs_f64(1.0 / f64::from(settings.target_fps.max(1)));
    let mut last = Instant::now();

    while running.load(Ordering::Acquire) {
        let frame_start = Instant::now();
        let delta = frame_start.duration_since(last).min(MAX_FRAME_DELTA);
        last = frame_start;

        scheduler.tick(delta);
        scheduler.render(&mut surface);

        if let Err(e) = sink.present(&surface) {
            tracing::warn!(error = %e, "Frame output failed, disabling preview");
            sink = Box::new(NullSink);
        }

        if let Some(rest) = frame_time.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    server.stop();
    tracing::info!("matrix-fx stopped");
    Ok(())
}
