//! Incremental reloads produce the same chain as a reload from scratch

mod common;

use common::assert_chains_eq;
use common::builders::{AxisBuilder, ContainerBuilder};
use scopevis_rs::config::RenderSettings;
use scopevis_rs::render::LoadRequest;
use scopevis_rs::source::generator::fill_container;
use scopevis_rs::{CurvePainter, CurveSettings, DataContainer, SignalPattern, TimeSeriesKind};

const DT: f64 = 1e-3;
const BATCH: usize = 1_500;

fn painter() -> CurvePainter {
    CurvePainter::new(0, CurveSettings::default(), RenderSettings::default())
}

fn assert_matches_fresh_load(painter: &CurvePainter, container: &DataContainer) {
    let x = AxisBuilder::x().length(800).limits(0.0, 10.0).build();
    let y = AxisBuilder::y().limits(-2.0, 2.0).build();
    let mut fresh = self::painter();
    fresh.load_required_data(container, &x, &y, false);
    assert_chains_eq(painter.chain().nodes(), fresh.chain().nodes(), 1e-9);
    assert_eq!(painter.geometry().polylines.len(), fresh.geometry().polylines.len());
    assert_eq!(painter.geometry().bars.len(), fresh.geometry().bars.len());
}

fn append_while_loading(kind: TimeSeriesKind) {
    let builder = ContainerBuilder::new()
        .kind(kind)
        .row(SignalPattern::Sine {
            frequency: 0.7,
            amplitude: 1.5,
            offset: 0.0,
        })
        .dt(DT);
    let mut generators = builder.generators();
    let mut container = builder.build();

    let x = AxisBuilder::x().length(800).limits(0.0, 10.0).build();
    let y = AxisBuilder::y().limits(-2.0, 2.0).build();
    let mut live = painter();

    let mut requests = Vec::new();
    for batch in 0..8 {
        fill_container(&mut container, &mut generators, (batch * BATCH) as f64 * DT, DT, BATCH)
            .unwrap();
        requests.push(live.load_required_data(&container, &x, &y, false));
        assert_matches_fresh_load(&live, &container);
    }

    assert!(matches!(requests[0], LoadRequest::Full(_)));
    assert!(requests[1..6]
        .iter()
        .all(|r| matches!(r, LoadRequest::Extend { .. })));
    // batch 6 crosses t = 10; afterwards only invisible samples arrive
    assert!(matches!(requests[7], LoadRequest::Unchanged));
}

#[test]
fn test_block_series_incremental_equals_full() {
    append_while_loading(TimeSeriesKind::Block);
}

#[test]
fn test_array_series_incremental_equals_full() {
    append_while_loading(TimeSeriesKind::Array);
}

#[test]
fn test_view_change_forces_full_reload() {
    let container = ContainerBuilder::new()
        .row(SignalPattern::Triangle {
            period: 1.0,
            amplitude: 1.0,
        })
        .dt(DT)
        .samples(5_000)
        .build();
    let mut x = AxisBuilder::x().length(800).limits(0.0, 10.0).build();
    let y = AxisBuilder::y().limits(-2.0, 2.0).build();
    let mut live = painter();

    live.load_required_data(&container, &x, &y, false);
    assert!(matches!(
        live.load_required_data(&container, &x, &y, false),
        LoadRequest::Unchanged
    ));

    x.do_mouse_wheel_zoom(400.0, 1);
    assert!(matches!(
        live.load_required_data(&container, &x, &y, false),
        LoadRequest::Full(_)
    ));

    x.pop_history_stack();
    assert!(matches!(
        live.load_required_data(&container, &x, &y, false),
        LoadRequest::Full(_)
    ));
    assert_matches_fresh_load(&live, &container);
}

#[test]
fn test_cleared_container_reloads_from_scratch() {
    let builder = ContainerBuilder::new()
        .row(SignalPattern::Counter {
            step: 1.0,
            min: 0.0,
            max: 9.0,
        })
        .dt(DT)
        .samples(3_000);
    let mut generators = builder.generators();
    let mut container = builder.build();
    let x = AxisBuilder::x().length(800).limits(0.0, 10.0).build();
    let y = AxisBuilder::y().limits(-2.0, 2.0).build();
    let mut live = painter();
    live.load_required_data(&container, &x, &y, false);

    container.clear();
    fill_container(&mut container, &mut generators, 0.0, DT, 1_000).unwrap();
    assert!(matches!(
        live.load_required_data(&container, &x, &y, false),
        LoadRequest::Full(_)
    ));
    assert_matches_fresh_load(&live, &container);
}
