//! ScopeVis-RS - Headless Demo
//!
//! Simulates a producer appending three synthetic signals while the scope
//! worker reloads in the background, and logs what each published frame
//! contains.
//!
//! Usage: `scopevis-rs [config.toml]`

use anyhow::{anyhow, Context};
use scopevis_rs::{
    config::ScopeConfig,
    source::{generator::fill_container, write_shared},
    AxisConnection, ContainerStatus, CurveKind, DataContainer, HiLoData, Scope, ScopeFrame,
    ScopeHandle, ScopeWorker, SignalGenerator, SignalPattern,
};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Simulated seconds
const DURATION: f64 = 10.0;
/// Sample step in simulated seconds
const SAMPLE_DT: f64 = 1e-4;
/// Samples appended per producer block
const BLOCK_SAMPLES: usize = 2_000;
/// Wall-clock pause between blocks
const BLOCK_PAUSE: Duration = Duration::from_millis(20);

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,scopevis_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ScopeVis-RS demo");

    let config = match std::env::args().nth(1) {
        Some(path) => ScopeConfig::load(&path).with_context(|| format!("loading {}", path))?,
        None => ScopeConfig::load_or_default(),
    };

    let container = Arc::new(RwLock::new(DataContainer::with_signal_names(
        ["sine", "noisy sawtooth", "square"],
        config.series,
    )));
    let scope = build_scope(config)?;
    let handle = ScopeWorker::spawn(scope, Some(Arc::clone(&container)))
        .context("starting scope worker")?;

    let mut generators = vec![
        SignalGenerator::new(SignalPattern::Sine {
            frequency: 0.5,
            amplitude: 1.0,
            offset: 0.0,
        }),
        SignalGenerator::new(SignalPattern::Sawtooth {
            period: 2.0,
            amplitude: 10.0,
        })
        .with_noise(0.5),
        SignalGenerator::new(SignalPattern::Square {
            period: 0.8,
            amplitude: 1.0,
        }),
    ];

    let total = (DURATION / SAMPLE_DT) as usize;
    let mut produced = 0;
    let mut last_logged = 0;
    while produced < total {
        let count = BLOCK_SAMPLES.min(total - produced);
        {
            let mut c = write_shared(&container)?;
            fill_container(&mut c, &mut generators, produced as f64 * SAMPLE_DT, SAMPLE_DT, count)
                .context("appending samples")?;
        }
        produced += count;

        let frame = handle.latest_frame();
        if frame.sequence >= last_logged + 10 {
            log_frame(&frame, produced);
            last_logged = frame.sequence;
        }
        std::thread::sleep(BLOCK_PAUSE);
    }

    write_shared(&container)?.set_status(ContainerStatus::Paused);
    wait_for_new_frame(&handle, Duration::from_secs(2));
    log_frame(&handle.latest_frame(), produced);

    handle.shutdown().context("stopping scope worker")?;
    tracing::info!("Demo finished");
    Ok(())
}

/// Two diagrams: analog signals on y1 and y2, the square wave as a digital curve
fn build_scope(config: ScopeConfig) -> anyhow::Result<Scope> {
    let mut scope = Scope::new(config);

    let analog = scope.add_diagram();
    scope.add_curve(analog, 0, AxisConnection::Y1);
    scope.add_curve(analog, 1, AxisConnection::Y2);

    let digital = scope.add_diagram();
    let square = scope
        .add_curve(digital, 2, AxisConnection::Y1)
        .ok_or_else(|| anyhow!("diagram {} missing", digital))?;

    scope.set_size(1200, 300);
    scope.set_simulation_time_boundaries(0.0, DURATION, true);

    if let Some(d) = scope.diagram_mut(analog) {
        d.y1_axis
            .axis_limits_mut()
            .set_global_auto_scale_values(HiLoData::new(-1.2, 1.2));
        d.y2_axis
            .axis_limits_mut()
            .set_global_auto_scale_values(HiLoData::new(-1.0, 11.0));
        d.y2_axis.set_nice_scale(true);
    }
    if let Some(d) = scope.diagram_mut(digital) {
        d.y1_axis
            .axis_limits_mut()
            .set_global_auto_scale_values(HiLoData::new(-0.2, 1.2));
        let curve = &mut d.curves_mut()[square];
        let settings = curve.painter.settings().clone().with_kind(CurveKind::Signal);
        curve.painter.set_settings(settings);
    }
    Ok(scope)
}

fn wait_for_new_frame(handle: &ScopeHandle, timeout: Duration) {
    let seen = handle.latest_frame().sequence;
    let deadline = std::time::Instant::now() + timeout;
    while handle.latest_frame().sequence == seen && std::time::Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }
}

fn log_frame(frame: &ScopeFrame, samples: usize) {
    for (i, diagram) in frame.diagrams.iter().enumerate() {
        for curve in &diagram.curves {
            tracing::info!(
                "frame {} diagram {} row {}: {} samples -> {} nodes, {} vertices, {} bars",
                frame.sequence,
                i,
                curve.row,
                samples,
                curve.geometry.node_count,
                curve.geometry.vertex_count(),
                curve.geometry.bars.len()
            );
        }
    }
}
