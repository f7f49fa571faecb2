//! Asynchronous actor loading.
//!
//! A loader is fire-and-forget: it reports progress, then exactly one of
//! success or failure, through a [`LoadSink`]. The sink is a channel, and the
//! receiving [`LoadTracker`] is pumped at the start of a tick, so results are
//! always applied on the tick thread and never in the middle of a tick.

use crate::actor::{Actor, ActorSlot};
use crate::error::LoadFailure;
use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;
use trackline_core::{Quat, Transform, Vec3};

/// The opaque scene-graph node an actor drives.
pub trait SceneNode {
    fn set_position(&mut self, position: Vec3);
    fn set_orientation(&mut self, orientation: Quat);
}

/// One message from a running load.
#[derive(Debug)]
pub enum LoadEvent<H> {
    /// Fraction loaded, in [0, 1]
    Progress(f32),
    Loaded(H),
    Failed(String),
}

/// Sending half handed to a loader.
pub struct LoadSink<H> {
    tx: Sender<LoadEvent<H>>,
}

impl<H> LoadSink<H> {
    pub fn progress(&self, fraction: f32) {
        self.send(LoadEvent::Progress(fraction));
    }

    pub fn succeed(self, handle: H) {
        self.send(LoadEvent::Loaded(handle));
    }

    pub fn fail(self, reason: impl Into<String>) {
        self.send(LoadEvent::Failed(reason.into()));
    }

    /// Returns false when the tracker is gone and the event was dropped.
    fn send(&self, event: LoadEvent<H>) -> bool {
        match self.tx.send(event) {
            Ok(()) => true,
            Err(_) => {
                tracing::debug!("load tracker dropped, discarding load event");
                false
            }
        }
    }
}

/// Starts loading the asset at `path`.
pub trait AssetLoader {
    type Handle: SceneNode;

    fn load(&self, path: &str, sink: LoadSink<Self::Handle>);
}

/// Receiving half, owned by whoever owns the [`ActorSlot`].
pub struct LoadTracker<H> {
    path: String,
    rx: Receiver<LoadEvent<H>>,
    finished: bool,
}

impl<H> LoadTracker<H> {
    /// Start a load and return the tracker plus a pending slot for it.
    pub fn start<L>(loader: &L, path: &str) -> (Self, ActorSlot<H>)
    where
        L: AssetLoader<Handle = H>,
    {
        let (tx, rx) = channel::unbounded();
        tracing::info!("loading actor asset '{}'", path);
        loader.load(path, LoadSink { tx });
        let tracker = Self {
            path: path.to_string(),
            rx,
            finished: false,
        };
        (tracker, ActorSlot::pending(path))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Apply every queued load event to `slot`.
    ///
    /// `spawn` builds the actor from the loaded handle; the slot switches from
    /// pending to ready in one step, so no tick ever sees a half-built actor.
    /// A loader that goes away without a result counts as a failure.
    pub fn pump(&mut self, slot: &mut ActorSlot<H>, mut spawn: impl FnMut(H) -> Actor<H>) {
        while !self.finished {
            match self.rx.try_recv() {
                Ok(LoadEvent::Progress(fraction)) => {
                    if let ActorSlot::Pending { progress, .. } = slot {
                        *progress = fraction.clamp(0.0, 1.0);
                        tracing::debug!("{}: {:.0}% loaded", self.path, *progress * 100.0);
                    }
                }
                Ok(LoadEvent::Loaded(handle)) => {
                    *slot = ActorSlot::Ready(spawn(handle));
                    self.finished = true;
                    tracing::info!("actor asset '{}' loaded", self.path);
                }
                Ok(LoadEvent::Failed(reason)) => self.fail(slot, reason),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.fail(slot, "loader finished without a result".to_string())
                }
            }
        }
    }

    fn fail(&mut self, slot: &mut ActorSlot<H>, reason: String) {
        let failure = LoadFailure {
            path: self.path.clone(),
            reason,
        };
        tracing::error!("{}", failure);
        *slot = ActorSlot::Failed(failure);
        self.finished = true;
    }
}

/// In-memory scene node, standing in for a renderer's object handle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeHandle {
    pub name: String,
    pub transform: Transform,
}

impl NodeHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
        }
    }
}

impl SceneNode for NodeHandle {
    fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    fn set_orientation(&mut self, orientation: Quat) {
        self.transform.rotation = orientation;
    }
}

/// Completes on the loader's side straight away; the result is applied on
/// the next pump.
#[derive(Debug, Default)]
pub struct ImmediateLoader;

impl AssetLoader for ImmediateLoader {
    type Handle = NodeHandle;

    fn load(&self, path: &str, sink: LoadSink<NodeHandle>) {
        sink.progress(1.0);
        sink.succeed(NodeHandle::new(path));
    }
}

/// Loads on a worker thread, reporting progress in `steps` increments spread
/// over `duration`.
#[derive(Debug, Clone)]
pub struct ThreadedLoader {
    pub duration: Duration,
    pub steps: u32,
}

impl Default for ThreadedLoader {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(50),
            steps: 4,
        }
    }
}

impl AssetLoader for ThreadedLoader {
    type Handle = NodeHandle;

    fn load(&self, path: &str, sink: LoadSink<NodeHandle>) {
        let path = path.to_string();
        let steps = self.steps.max(1);
        let pause = self.duration / steps;
        thread::spawn(move || {
            for i in 1..=steps {
                thread::sleep(pause);
                sink.progress(i as f32 / steps as f32);
            }
            sink.succeed(NodeHandle::new(path));
        });
    }
}

/// Always fails; for exercising the failure path.
#[derive(Debug, Clone)]
pub struct FailingLoader {
    pub reason: String,
}

impl AssetLoader for FailingLoader {
    type Handle = NodeHandle;

    fn load(&self, path: &str, sink: LoadSink<NodeHandle>) {
        sink.progress(0.0);
        sink.fail(format!("{} ({})", self.reason, path));
    }
}
