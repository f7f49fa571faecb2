//! The per-tick update loop

use crate::build::{build_track, Track};
use crate::loader::load_scenario;
use std::path::Path;
use trackline_camera::{Camera, CameraRig};
use trackline_core::Result;
use trackline_motion::{
    Actor, ActorSlot, AdvanceReport, AssetLoader, CurveId, CurveSet, JunctionError,
    JunctionGraph, LoadTracker, MotionController, SceneNode,
};
use trackline_runtime::{EventBus, GameClock, InputEvent, InputState};
use winit::keyboard::KeyCode;

/// What happened during one tick.
#[derive(Debug, Default)]
pub struct TickReport {
    pub frame: u64,
    /// Frame time actually simulated, after clamping
    pub dt: f32,
    /// Motion events; `None` while the actor is not loaded
    pub motion: Option<AdvanceReport>,
    /// Accepted triggers and the branch each one switched to
    pub switched: Vec<(String, CurveId)>,
    /// Triggers a junction turned down
    pub rejected: Vec<JunctionError>,
}

/// A running scenario: one actor on a track, a chase camera, and the input
/// that steers both.
pub struct Scenario<H> {
    name: String,
    curves: CurveSet,
    junctions: JunctionGraph,
    home: CurveId,
    controller: MotionController,
    rig: CameraRig,
    camera: Camera,
    slot: ActorSlot<H>,
    tracker: LoadTracker<H>,
    bus: EventBus,
    input: InputState,
    clock: GameClock,
}

impl<H: SceneNode> Scenario<H> {
    /// Start loading the actor and set up everything around it.
    pub fn start<L>(track: Track, loader: &L) -> Self
    where
        L: AssetLoader<Handle = H>,
    {
        let input = track.input_state();
        let (tracker, slot) = LoadTracker::start(loader, &track.model);
        tracing::info!("scenario '{}' started", track.name);
        Self {
            name: track.name,
            curves: track.curves,
            junctions: track.junctions,
            home: track.home,
            controller: MotionController::new(track.motion),
            rig: CameraRig::new(track.rig),
            camera: Camera::new(),
            slot,
            tracker,
            bus: EventBus::new(),
            input,
            clock: GameClock::new(),
        }
    }

    /// Load, build and start the scenario file at `path`.
    pub fn load<P, L>(path: P, loader: &L) -> Result<Self>
    where
        P: AsRef<Path>,
        L: AssetLoader<Handle = H>,
    {
        let file = load_scenario(path)?;
        let track = build_track(&file)?;
        Ok(Self::start(track, loader))
    }

    /// Run one tick with an explicit frame time in seconds.
    pub fn tick(&mut self, dt: f64) -> TickReport {
        let dt = self.clock.advance(dt);
        self.update(dt as f32)
    }

    /// Run one tick timed by the wall clock.
    pub fn tick_realtime(&mut self) -> TickReport {
        let dt = self.clock.tick();
        self.update(dt as f32)
    }

    fn update(&mut self, dt: f32) -> TickReport {
        let mut report = TickReport {
            frame: self.clock.frame,
            dt,
            ..Default::default()
        };

        // Finished loads land before anything reads the actor
        let home = self.home;
        if let Some(home_curve) = self.curves.get(home) {
            self.tracker.pump(&mut self.slot, |handle| Actor::spawn(handle, home, home_curve));
        }

        for event in self.bus.drain() {
            match event {
                InputEvent::KeyTrigger(trigger) => {
                    let Some(actor) = self.slot.actor_mut() else {
                        tracing::debug!("trigger '{}' ignored, actor not loaded", trigger);
                        continue;
                    };
                    match self.controller.apply_trigger(
                        actor,
                        &trigger,
                        &self.curves,
                        &mut self.junctions,
                    ) {
                        Ok(curve) => report.switched.push((trigger, curve)),
                        Err(err) => {
                            tracing::warn!("{}", err);
                            report.rejected.push(err);
                        }
                    }
                }
                InputEvent::InteractionStart => self.rig.interaction_start(),
                InputEvent::InteractionEnd => self.rig.interaction_end(),
                InputEvent::Orbit { yaw, pitch } => {
                    self.rig.apply_orbit(&mut self.camera, yaw, pitch)
                }
                InputEvent::Zoom(delta) => self.rig.apply_zoom(&mut self.camera, delta),
            }
        }

        report.motion = self
            .controller
            .step_slot(&mut self.slot, dt, &self.curves, &mut self.junctions);

        if let Some(actor) = self.slot.actor() {
            self.rig.update(actor.position(), actor.facing(), &mut self.camera);
        }
        report
    }

    pub fn key_down(&mut self, key: KeyCode) {
        self.input.process_key_down(key, &mut self.bus);
    }

    pub fn key_up(&mut self, key: KeyCode) {
        self.input.process_key_up(key);
    }

    pub fn pointer_down(&mut self) {
        self.input.process_pointer_down(&mut self.bus);
    }

    pub fn pointer_up(&mut self) {
        self.input.process_pointer_up(&mut self.bus);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.input.process_pointer_move(x, y, &mut self.bus);
    }

    pub fn scroll(&mut self, delta: f32) {
        self.input.process_scroll(delta, &mut self.bus);
    }

    /// Queue an event directly, bypassing key bindings.
    pub fn push_event(&mut self, event: InputEvent) {
        self.bus.push(event);
    }
}

impl<H> Scenario<H> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slot(&self) -> &ActorSlot<H> {
        &self.slot
    }

    pub fn actor(&self) -> Option<&Actor<H>> {
        self.slot.actor()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn curves(&self) -> &CurveSet {
        &self.curves
    }

    pub fn junctions(&self) -> &JunctionGraph {
        &self.junctions
    }

    pub fn frame(&self) -> u64 {
        self.clock.frame
    }
}
