//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use scopevis_rs::render::{NodeKind, PixelNode};
use std::time::Duration;

/// Upper bound for waiting on the background worker
pub fn test_timeout() -> Duration {
    Duration::from_secs(5)
}

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// Compare two pixel chains node by node, allowing `epsilon` pixels of difference
pub fn assert_chains_eq(a: &[PixelNode], b: &[PixelNode], epsilon: f64) {
    assert_eq!(a.len(), b.len(), "chain lengths differ");
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        assert_eq!(x.column, y.column, "column of node {}", i);
        assert_eq!(x.joins_prev, y.joins_prev, "join flag of node {}", i);
        assert_float_eq(x.x, y.x, epsilon);
        match (x.kind, y.kind) {
            (NodeKind::Point { y: ya }, NodeKind::Point { y: yb }) => {
                assert_float_eq(ya, yb, epsilon)
            }
            (
                NodeKind::Envelope { top: ta, bottom: ba },
                NodeKind::Envelope { top: tb, bottom: bb },
            ) => {
                assert_float_eq(ta, tb, epsilon);
                assert_float_eq(ba, bb, epsilon);
            }
            (NodeKind::Gap, NodeKind::Gap) => {}
            (ka, kb) => panic!("node {} differs: {:?} vs {:?}", i, ka, kb),
        }
    }
}
