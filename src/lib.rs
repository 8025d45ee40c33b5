//! # ScopeVis-RS: Windowed Time-Series Scope Engine
//!
//! A rendering engine for oscilloscope-style plots of long, growing time
//! series. Each curve is decimated to at most one node per pixel column, so
//! drawing cost depends on the plot width and not on the number of samples.
//! While data is being appended, only the columns right of the previous data
//! end are reloaded.
//!
//! ## Architecture
//!
//! - **Axis**: value ↔ pixel transforms (linear and logarithmic), nice-scaled
//!   limits, ticks, zoom/pan with undo history
//! - **Series / Source**: time axes per row and the data containers built on them
//! - **Render**: viewport-diff loading, per-pixel decimation chains, polyline
//!   simplification and a painter-agnostic drawing surface
//! - **Scope**: diagrams with one x and two y axes, and a background worker
//!   that reloads while data arrives
//! - **Communication**: Crossbeam channels between the UI and the worker
//!
//! ## Configuration
//!
//! Engine defaults are stored as TOML in the platform-appropriate data
//! directory under `dev.scopevis` (see [`config`]).
//!
//! ## Example
//!
//! ```ignore
//! use scopevis_rs::{AxisConnection, DataContainer, Scope, ScopeConfig, ScopeWorker};
//! use std::sync::{Arc, RwLock};
//!
//! let config = ScopeConfig::load_or_default();
//! let container = Arc::new(RwLock::new(DataContainer::new(2, config.series)));
//!
//! let mut scope = Scope::new(config);
//! let d = scope.add_diagram();
//! scope.add_curve(d, 0, AxisConnection::Y1);
//! scope.add_curve(d, 1, AxisConnection::Y2);
//! scope.set_simulation_time_boundaries(0.0, 10.0, true);
//!
//! let handle = ScopeWorker::spawn(scope, Some(container.clone()))?;
//! // producer appends to `container`, UI paints `handle.latest_frame()`
//! ```

pub mod axis;
pub mod config;
pub mod error;
pub mod render;
pub mod scope;
pub mod series;
pub mod source;
pub mod types;

// Re-export commonly used types
pub use axis::{Axis, AxisLimits, AxisScale, Direction, NiceScale};
pub use config::{CurveKind, CurveSettings, ScopeConfig};
pub use error::{Result, ScopeError};
pub use render::{CurveGeometry, CurvePainter, EguiSurface, RenderSurface};
pub use scope::{AxisConnection, Diagram, Scope, ScopeCommand, ScopeFrame, ScopeHandle, ScopeWorker};
pub use series::{TimeSeries, TimeSeriesKind};
pub use source::{DataContainer, DataSource, SignalGenerator, SignalPattern};
pub use types::{ContainerStatus, DataValue, HiLoData, PixelPoint};
