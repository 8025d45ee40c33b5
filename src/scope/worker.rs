//! Background update worker
//!
//! The worker owns a [`Scope`] on its own thread. Every poll interval it looks
//! at the shared data container and reloads the curves when there is
//! something new to show. It communicates with the UI thread through a
//! crossbeam command channel and publishes an immutable [`ScopeFrame`] the UI
//! can paint at any time.
//!
//! # Update Rules
//!
//! A cycle reloads when:
//!
//! - the container is `Running` (new samples may have arrived)
//! - the container has just switched to `Paused`; the x axis is first fitted
//!   to the nice-scaled time range
//! - a command changed the view (zoom, pan, resize, fit, undo)
//! - a reload was forced or the container was replaced
//!
//! The container is only read-locked. A poisoned lock skips the cycle.

use super::{Scope, ScopeFrame};
use crate::error::{Result, ScopeError};
use crate::source::{read_shared, DataContainer, DataSource, SharedContainer};
use crate::types::{ContainerStatus, PixelPoint};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Name of the worker thread
pub const WORKER_THREAD_NAME: &str = "scope-worker";

/// Capacity of the command channel
const COMMAND_CAPACITY: usize = 256;

/// Latest published frame, swapped as a whole
pub type FrameSlot = Arc<RwLock<Arc<ScopeFrame>>>;

/// Commands sent from the UI to the worker.
///
/// Pixel positions are diagram-local, as laid out by
/// [`Diagram::set_axis_positions`](super::Diagram::set_axis_positions).
#[derive(Debug, Clone)]
pub enum ScopeCommand {
    /// Mouse wheel zoom of the x axis around `pixel`
    Zoom {
        diagram: usize,
        pixel: PixelPoint,
        rotation: i32,
    },
    /// Start of a pan gesture
    PanStart { diagram: usize },
    /// Pan by the distance between the gesture start and the current pointer
    PanMove {
        diagram: usize,
        start: PixelPoint,
        current: PixelPoint,
    },
    PanEnd { diagram: usize },
    /// Zoom all axes of a diagram to a dragged rectangle
    ZoomRect {
        diagram: usize,
        from: PixelPoint,
        to: PixelPoint,
    },
    /// New diagram size in pixels
    Resize { width: u32, height: u32 },
    /// Fit x to the time range and y to the data
    Fit,
    /// Undo the last zoom of a diagram
    Undo { diagram: usize },
    /// Show another container
    SetContainer(SharedContainer),
    ForceReload,
    Shutdown,
}

/// The worker loop; runs on the thread started by [`ScopeWorker::spawn`]
pub struct ScopeWorker {
    scope: Scope,
    container: Option<SharedContainer>,
    command_rx: Receiver<ScopeCommand>,
    frame: FrameSlot,
    running: Arc<AtomicBool>,
    interval: Duration,
    nice_fit_on_pause: bool,
    last_update: Instant,
    last_status: ContainerStatus,
    view_changed: bool,
    fit_requested: bool,
    force: bool,
    sequence: u64,
}

impl ScopeWorker {
    pub fn new(
        scope: Scope,
        container: Option<SharedContainer>,
        command_rx: Receiver<ScopeCommand>,
        frame: FrameSlot,
        running: Arc<AtomicBool>,
    ) -> Self {
        let update = &scope.config().update;
        let (interval, nice_fit_on_pause) = (update.interval(), update.nice_fit_on_pause);
        Self {
            scope,
            container,
            command_rx,
            frame,
            running,
            interval,
            nice_fit_on_pause,
            last_update: Instant::now(),
            last_status: ContainerStatus::NotStarted,
            view_changed: true,
            fit_requested: false,
            force: false,
            sequence: 0,
        }
    }

    /// Start the worker on a named thread
    pub fn spawn(scope: Scope, container: Option<SharedContainer>) -> Result<ScopeHandle> {
        let (command_tx, command_rx) = bounded(COMMAND_CAPACITY);
        let frame: FrameSlot = Arc::new(RwLock::new(Arc::new(scope.frame(0))));
        let running = Arc::new(AtomicBool::new(true));

        let mut worker = ScopeWorker::new(
            scope,
            container,
            command_rx,
            Arc::clone(&frame),
            Arc::clone(&running),
        );
        let thread = std::thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || worker.run())
            .map_err(|e| ScopeError::from(e).with_context("Failed to spawn scope worker"))?;

        Ok(ScopeHandle {
            command_tx,
            frame,
            running,
            thread: Some(thread),
        })
    }

    /// Main loop
    pub fn run(&mut self) {
        tracing::info!("Scope worker started");

        while self.running.load(Ordering::SeqCst) {
            self.process_commands();
            if !self.running.load(Ordering::SeqCst) {
                break;
            }
            self.update();
            self.wait_for_next_cycle();
        }

        tracing::info!("Scope worker stopped");
    }

    /// Handle all pending commands without blocking
    fn process_commands(&mut self) {
        loop {
            match self.command_rx.try_recv() {
                Ok(cmd) => self.handle_command(cmd),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::debug!("Command channel closed, stopping scope worker");
                    self.running.store(false, Ordering::SeqCst);
                    break;
                }
            }
        }
    }

    fn handle_command(&mut self, cmd: ScopeCommand) {
        tracing::trace!("Scope command: {:?}", cmd);
        match cmd {
            ScopeCommand::Zoom {
                diagram,
                pixel,
                rotation,
            } => {
                if let Some(d) = self.scope.diagram_mut(diagram) {
                    if d.contains(pixel) {
                        d.x_axis.do_mouse_wheel_zoom(pixel.x, rotation);
                    }
                }
            }
            ScopeCommand::PanStart { diagram } => {
                if let Some(d) = self.scope.diagram_mut(diagram) {
                    for axis in [&mut d.x_axis, &mut d.y1_axis, &mut d.y2_axis] {
                        axis.set_panning_origin_limits();
                    }
                }
            }
            ScopeCommand::PanMove {
                diagram,
                start,
                current,
            } => {
                if let Some(d) = self.scope.diagram_mut(diagram) {
                    d.x_axis.do_panning(current.x, start.x);
                    d.y1_axis.do_panning(current.y, start.y);
                    d.y2_axis.do_panning(current.y, start.y);
                }
            }
            ScopeCommand::PanEnd { diagram } => {
                if let Some(d) = self.scope.diagram_mut(diagram) {
                    for axis in [&mut d.x_axis, &mut d.y1_axis, &mut d.y2_axis] {
                        axis.finish_panning();
                    }
                }
            }
            ScopeCommand::ZoomRect { diagram, from, to } => {
                if let Some(d) = self.scope.diagram_mut(diagram) {
                    d.x_axis.zoom_to_pixel_range(from.x, to.x, false);
                    d.y1_axis.zoom_to_pixel_range(from.y, to.y, false);
                    d.y2_axis.zoom_to_pixel_range(from.y, to.y, false);
                }
            }
            ScopeCommand::Resize { width, height } => self.scope.set_size(width, height),
            ScopeCommand::Fit => self.fit_requested = true,
            ScopeCommand::Undo { diagram } => {
                if let Some(d) = self.scope.diagram_mut(diagram) {
                    d.pop_history_stack();
                }
            }
            ScopeCommand::SetContainer(container) => {
                tracing::debug!("Scope worker switched container");
                self.container = Some(container);
                self.last_status = ContainerStatus::NotStarted;
                self.force = true;
            }
            ScopeCommand::ForceReload => self.force = true,
            ScopeCommand::Shutdown => {
                self.running.store(false, Ordering::SeqCst);
                return;
            }
        }
        self.view_changed = true;
    }

    /// One update cycle
    fn update(&mut self) {
        self.last_update = Instant::now();
        let Some(container) = self.container.clone() else {
            if std::mem::take(&mut self.view_changed) {
                self.publish();
            }
            return;
        };
        let guard = match read_shared(&container) {
            Ok(guard) => guard,
            Err(e) => {
                tracing::warn!("{}, skipping update", e);
                return;
            }
        };
        let source: &DataContainer = &guard;

        let status = source.status();
        let freshly_paused =
            status == ContainerStatus::Paused && self.last_status != ContainerStatus::Paused;
        self.last_status = status;

        if std::mem::take(&mut self.fit_requested) {
            self.fit_time_range(source, false);
            self.scope.fit_y_ranges(source, true);
        } else if freshly_paused && self.nice_fit_on_pause {
            tracing::debug!("Container paused, fitting x axis");
            self.fit_time_range(source, true);
        }

        let view_changed = std::mem::take(&mut self.view_changed);
        if !(status.is_running() || freshly_paused || view_changed || self.force) {
            return;
        }
        let loaded = self.scope.load(source, std::mem::take(&mut self.force));
        drop(guard);

        tracing::trace!("Update cycle reloaded {} curves", loaded);
        self.publish();
    }

    fn fit_time_range(&mut self, source: &DataContainer, nice: bool) {
        let Some(range) = source.time_range() else {
            return;
        };
        let end = if nice {
            source.nice_maximum_x_value().unwrap_or(range.hi())
        } else {
            range.hi()
        };
        self.scope.set_simulation_time_boundaries(range.lo(), end, nice);
    }

    fn publish(&mut self) {
        self.sequence += 1;
        let frame = Arc::new(self.scope.frame(self.sequence));
        match self.frame.write() {
            Ok(mut slot) => *slot = frame,
            Err(poisoned) => {
                tracing::warn!("Frame slot was poisoned, replacing");
                *poisoned.into_inner() = frame;
            }
        }
    }

    /// Sleep until the next cycle, waking early for commands
    fn wait_for_next_cycle(&mut self) {
        let elapsed = self.last_update.elapsed();
        let Some(remaining) = self.interval.checked_sub(elapsed) else {
            return;
        };
        match self.command_rx.recv_timeout(remaining) {
            Ok(cmd) => self.handle_command(cmd),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                tracing::debug!("Command channel closed, stopping scope worker");
                self.running.store(false, Ordering::SeqCst);
            }
        }
    }
}

/// UI-side handle to a running [`ScopeWorker`]
#[derive(Debug)]
pub struct ScopeHandle {
    command_tx: Sender<ScopeCommand>,
    frame: FrameSlot,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl ScopeHandle {
    /// Send a command to the worker
    pub fn send_command(&self, cmd: ScopeCommand) -> Result<()> {
        self.command_tx
            .send(cmd)
            .map_err(|_| ScopeError::Channel("scope worker is gone".to_string()))
    }

    /// The most recently published frame
    pub fn latest_frame(&self) -> Arc<ScopeFrame> {
        Arc::clone(&self.frame.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the worker and wait for its thread to exit
    pub fn shutdown(mut self) -> Result<()> {
        self.stop()
    }

    fn stop(&mut self) -> Result<()> {
        let _ = self.command_tx.send(ScopeCommand::Shutdown);
        self.running.store(false, Ordering::SeqCst);
        match self.thread.take() {
            Some(thread) => thread
                .join()
                .map_err(|_| ScopeError::Channel("scope worker panicked".to_string())),
            None => Ok(()),
        }
    }
}

impl Drop for ScopeHandle {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            tracing::error!("Failed to stop scope worker: {}", e);
        }
    }
}
