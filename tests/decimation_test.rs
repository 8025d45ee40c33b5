//! Node count of the per-pixel chain is bounded by the axis width

mod common;

use common::builders::{AxisBuilder, ContainerBuilder};
use scopevis_rs::config::RenderSettings;
use scopevis_rs::render::LoadRequest;
use scopevis_rs::{CurvePainter, CurveSettings, SignalPattern};

const WIDTH: u32 = 800;

fn painter() -> CurvePainter {
    CurvePainter::new(0, CurveSettings::default(), RenderSettings::default())
}

fn noisy_sine() -> SignalPattern {
    SignalPattern::Sine {
        frequency: 3.0,
        amplitude: 1.0,
        offset: 0.0,
    }
}

#[test]
fn test_few_samples_stay_below_bound() {
    let container = ContainerBuilder::new().row(noisy_sine()).dt(0.1).samples(10).build();
    let x = AxisBuilder::x().length(WIDTH).limits(0.0, 1.0).build();
    let y = AxisBuilder::y().limits(-1.5, 1.5).build();

    let mut p = painter();
    assert!(matches!(p.load_required_data(&container, &x, &y, false), LoadRequest::Full(_)));
    let nodes = p.chain().len();
    assert!(nodes >= 10, "every sample has its own column, got {}", nodes);
    assert!(nodes <= WIDTH as usize + 3);
}

#[test]
fn test_million_samples_stay_below_bound() {
    let container = ContainerBuilder::new()
        .row(SignalPattern::Random {
            min: -1.0,
            max: 1.0,
        })
        .dt(1e-6)
        .samples(1_000_000)
        .build();
    let x = AxisBuilder::x().length(WIDTH).limits(0.0, 1.0).build();
    let y = AxisBuilder::y().limits(-1.5, 1.5).build();

    let mut p = painter();
    p.load_required_data(&container, &x, &y, false);
    assert!(p.chain().len() <= WIDTH as usize + 3);

    let geometry = p.geometry();
    assert!(geometry.vertex_count() <= 2 * (WIDTH as usize + 3));
    // random data fills every column from -1 to 1: overlapping bars
    assert!(geometry.bars.len() > WIDTH as usize / 2);
}

#[test]
fn test_zoomed_view_uses_both_anchors() {
    let container = ContainerBuilder::new()
        .row(noisy_sine())
        .dt(1e-5)
        .samples(100_000)
        .build();
    let mut x = AxisBuilder::x().length(WIDTH).limits(0.0, 1.0).build();
    x.zoom_to_pixel_range(200.0, 600.0, false);
    let y = AxisBuilder::y().limits(-1.5, 1.5).build();

    let mut p = painter();
    p.load_required_data(&container, &x, &y, false);
    let nodes = p.chain().nodes();
    assert!(nodes.len() <= WIDTH as usize + 3);
    assert_eq!(nodes.first().map(|n| n.column), Some(-1));
    assert_eq!(nodes.last().map(|n| n.column), Some(WIDTH as i64));
}

#[test]
fn test_smooth_data_simplifies() {
    let container = ContainerBuilder::new()
        .row(SignalPattern::Sawtooth {
            period: 10.0,
            amplitude: 1.0,
        })
        .dt(1e-3)
        .samples(5_000)
        .build();
    let x = AxisBuilder::x().length(WIDTH).limits(0.0, 5.0).build();
    let y = AxisBuilder::y().limits(0.0, 1.0).build();

    let mut p = painter();
    p.load_required_data(&container, &x, &y, false);
    let geometry = p.geometry();
    assert_eq!(geometry.polylines.len(), 1);
    // a straight ramp needs far fewer vertices than columns
    assert!(geometry.vertex_count() < 50, "got {}", geometry.vertex_count());
}
