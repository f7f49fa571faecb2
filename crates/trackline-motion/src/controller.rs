//! Per-tick advancement of an actor along its active curve

use crate::actor::{Actor, ActorSlot};
use crate::curve_set::{CurveId, CurveSet};
use crate::error::JunctionError;
use crate::junction::{JunctionGraph, JunctionId};
use crate::loader::SceneNode;

/// How frame time turns into progress along a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepMode {
    /// `per_second` of normalized arc position per second of frame time
    TimeScaled { per_second: f32 },
    /// Fixed increment per tick, independent of frame time
    PerFrame { per_tick: f32 },
}

impl StepMode {
    /// Parameter delta for a frame of `dt` seconds.
    pub fn delta(&self, dt: f32) -> f32 {
        match *self {
            StepMode::TimeScaled { per_second } => per_second * dt,
            StepMode::PerFrame { per_tick } => per_tick,
        }
    }
}

impl Default for StepMode {
    fn default() -> Self {
        // 0.022 per frame at 60 fps
        StepMode::TimeScaled { per_second: 1.32 }
    }
}

/// What happens when an open curve runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnPathEnd {
    /// Start a new traversal on the home curve
    #[default]
    Restart,
    /// Park at the end until a branch is taken
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionConfig {
    pub step: StepMode,
    pub on_path_end: OnPathEnd,
}

/// Something that happened during one advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionEvent {
    /// The actor came within range of an undecided junction
    JunctionReached(JunctionId),
    /// A looping curve wrapped past its end
    Wrapped,
    /// An open curve ended and the actor went back to its home curve
    Restarted,
    /// An open curve ended and the actor stopped
    Parked,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvanceReport {
    pub events: Vec<MotionEvent>,
}

impl AdvanceReport {
    pub fn contains(&self, event: MotionEvent) -> bool {
        self.events.contains(&event)
    }
}

/// Drives actors along curves and through junctions.
#[derive(Debug, Clone, Default)]
pub struct MotionController {
    pub config: MotionConfig,
}

impl MotionController {
    pub fn new(config: MotionConfig) -> Self {
        Self { config }
    }

    /// Parameter delta for a frame of `dt` seconds under the configured step mode.
    pub fn delta_for(&self, dt: f32) -> f32 {
        self.config.step.delta(dt)
    }

    /// Move `actor` forward by `delta` of normalized arc position.
    ///
    /// A non-positive or non-finite delta leaves `t` alone but still refreshes
    /// the pose. Junctions are never waited on: reaching one only reports it.
    pub fn advance<H: SceneNode>(
        &self,
        actor: &mut Actor<H>,
        delta: f32,
        curves: &CurveSet,
        junctions: &mut JunctionGraph,
    ) -> AdvanceReport {
        let mut report = AdvanceReport::default();
        let id = actor.curve();
        let Some(curve) = curves.get(id) else {
            tracing::warn!("actor is on unknown curve {}", id.raw());
            return report;
        };

        if !(delta.is_finite() && delta > 0.0) || actor.is_parked() {
            actor.place(id, curve, actor.t());
            return report;
        }

        let t = actor.t() + delta;
        if curve.is_looping() {
            if t >= 1.0 {
                // Each lap is a new traversal
                junctions.reset_all();
                tracing::debug!("lap finished on '{}'", curves.name(id).unwrap_or("?"));
                report.events.push(MotionEvent::Wrapped);
            }
            actor.place(id, curve, t.rem_euclid(1.0));
        } else if t > 1.0 {
            match self.config.on_path_end {
                OnPathEnd::Restart => self.restart(actor, t - 1.0, curves, junctions, &mut report),
                OnPathEnd::Stop => {
                    actor.place(id, curve, 1.0);
                    actor.set_parked(true);
                    tracing::info!("actor parked at end of '{}'", curves.name(id).unwrap_or("?"));
                    report.events.push(MotionEvent::Parked);
                }
            }
        } else {
            actor.place(id, curve, t);
        }

        for junction in junctions.approachable(actor.position()) {
            if junctions.notify_approach(junction) {
                report.events.push(MotionEvent::JunctionReached(junction));
            }
        }
        report
    }

    fn restart<H: SceneNode>(
        &self,
        actor: &mut Actor<H>,
        overflow: f32,
        curves: &CurveSet,
        junctions: &mut JunctionGraph,
        report: &mut AdvanceReport,
    ) {
        let home = actor.home();
        let Some(curve) = curves.get(home) else {
            tracing::warn!("home curve {} is missing", home.raw());
            return;
        };
        junctions.reset_all();
        actor.switch_to(home, curve);
        actor.place(home, curve, overflow);
        tracing::info!("traversal restarted on '{}'", curves.name(home).unwrap_or("?"));
        report.events.push(MotionEvent::Restarted);
    }

    /// Advance by one frame of `dt` seconds.
    pub fn step<H: SceneNode>(
        &self,
        actor: &mut Actor<H>,
        dt: f32,
        curves: &CurveSet,
        junctions: &mut JunctionGraph,
    ) -> AdvanceReport {
        self.advance(actor, self.delta_for(dt), curves, junctions)
    }

    /// [`MotionController::advance`] for an actor that may still be loading.
    ///
    /// Returns `None` without touching anything until the slot is ready.
    pub fn advance_slot<H: SceneNode>(
        &self,
        slot: &mut ActorSlot<H>,
        delta: f32,
        curves: &CurveSet,
        junctions: &mut JunctionGraph,
    ) -> Option<AdvanceReport> {
        let actor = slot.actor_mut()?;
        Some(self.advance(actor, delta, curves, junctions))
    }

    pub fn step_slot<H: SceneNode>(
        &self,
        slot: &mut ActorSlot<H>,
        dt: f32,
        curves: &CurveSet,
        junctions: &mut JunctionGraph,
    ) -> Option<AdvanceReport> {
        self.advance_slot(slot, self.delta_for(dt), curves, junctions)
    }

    /// Arm the junction nearest the actor and move onto the chosen branch.
    pub fn apply_trigger<H: SceneNode>(
        &self,
        actor: &mut Actor<H>,
        trigger: &str,
        curves: &CurveSet,
        junctions: &mut JunctionGraph,
    ) -> Result<CurveId, JunctionError> {
        let (_, branch) = junctions.arm_nearest(trigger, actor.position())?;
        let curve = curves
            .get(branch)
            .ok_or(JunctionError::UnknownCurve(branch.raw()))?;
        actor.switch_to(branch, curve);
        tracing::info!("switched to '{}'", curves.name(branch).unwrap_or("?"));
        Ok(branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::junction::Junction;
    use crate::loader::NodeHandle;
    use trackline_core::{waypoint, PathCurve, Vec3};

    const FORK: Vec3 = Vec3::new(0.0, 0.0, -100.0);

    struct Fixture {
        curves: CurveSet,
        junctions: JunctionGraph,
        main: CurveId,
        left: CurveId,
        fork: JunctionId,
    }

    fn fixture() -> Fixture {
        let mut curves = CurveSet::new();
        let main = curves
            .insert("main", PathCurve::open(waypoint::straight(Vec3::ZERO, FORK)).unwrap())
            .unwrap();
        let left = curves
            .insert(
                "left",
                PathCurve::open(waypoint::straight(FORK, Vec3::new(-50.0, 0.0, -100.0))).unwrap(),
            )
            .unwrap();
        let right = curves
            .insert(
                "right",
                PathCurve::open(waypoint::straight(FORK, Vec3::new(50.0, 0.0, -100.0))).unwrap(),
            )
            .unwrap();
        let mut junctions = JunctionGraph::new();
        let fork = junctions.add(
            Junction::new("fork", FORK, 10.0)
                .with_branch("left", left)
                .with_branch("right", right),
        );
        Fixture {
            curves,
            junctions,
            main,
            left,
            fork,
        }
    }

    fn actor(fx: &Fixture) -> Actor<NodeHandle> {
        Actor::spawn(NodeHandle::new("train"), fx.main, fx.curves.get(fx.main).unwrap())
    }

    fn per_frame(per_tick: f32, on_path_end: OnPathEnd) -> MotionController {
        MotionController::new(MotionConfig {
            step: StepMode::PerFrame { per_tick },
            on_path_end,
        })
    }

    #[test]
    fn straight_midpoint() {
        let mut fx = fixture();
        let mut a = actor(&fx);
        let ctl = per_frame(0.5, OnPathEnd::Restart);
        ctl.step(&mut a, 1.0 / 60.0, &fx.curves, &mut fx.junctions);
        assert!((a.t() - 0.5).abs() < 1e-6);
        assert!((a.position() - Vec3::new(0.0, 0.0, -50.0)).length() < 1e-3);
        assert!((a.facing() - Vec3::FORWARD).length() < 1e-4);
        assert_eq!(a.handle().transform.position, a.position());
    }

    #[test]
    fn step_modes() {
        let ctl = MotionController::default();
        assert!((ctl.delta_for(0.5) - 0.66).abs() < 1e-6);
        // One 60 fps frame matches the fixed per-frame increment
        assert!((ctl.delta_for(1.0 / 60.0) - 0.022).abs() < 1e-6);

        let fixed = per_frame(0.022, OnPathEnd::Restart);
        assert_eq!(fixed.delta_for(0.5), 0.022);
        assert_eq!(fixed.delta_for(0.0), 0.022);
    }

    #[test]
    fn non_positive_delta_keeps_t() {
        let mut fx = fixture();
        let mut a = actor(&fx);
        let ctl = MotionController::default();
        ctl.advance(&mut a, 0.25, &fx.curves, &mut fx.junctions);
        for delta in [0.0, -0.1, f32::NAN, f32::INFINITY] {
            let report = ctl.advance(&mut a, delta, &fx.curves, &mut fx.junctions);
            assert!(report.events.is_empty());
            assert!((a.t() - 0.25).abs() < 1e-6);
        }
    }

    #[test]
    fn junction_reached_once() {
        let mut fx = fixture();
        let mut a = actor(&fx);
        let ctl = per_frame(0.02, OnPathEnd::Stop);
        let mut reached = 0;
        for _ in 0..49 {
            let report = ctl.step(&mut a, 0.016, &fx.curves, &mut fx.junctions);
            if report.contains(MotionEvent::JunctionReached(fx.fork)) {
                reached += 1;
                assert!(a.position().distance(&FORK) <= 10.0);
            }
        }
        assert_eq!(reached, 1);
        assert!(fx.junctions.get(fx.fork).unwrap().is_awaiting_decision());
    }

    #[test]
    fn trigger_switches_branch_at_start() {
        let mut fx = fixture();
        let mut a = actor(&fx);
        let ctl = MotionController::default();
        ctl.advance(&mut a, 0.96, &fx.curves, &mut fx.junctions);

        let curve = ctl
            .apply_trigger(&mut a, "left", &fx.curves, &mut fx.junctions)
            .unwrap();
        assert_eq!(curve, fx.left);
        assert_eq!(a.curve(), fx.left);
        assert_eq!(a.t(), 0.0);
        assert!((a.position() - FORK).length() < 1e-4);

        // Subsequent advances follow the branch
        ctl.advance(&mut a, 0.5, &fx.curves, &mut fx.junctions);
        assert!((a.position() - Vec3::new(-25.0, 0.0, -100.0)).length() < 1e-3);

        let err = ctl
            .apply_trigger(&mut a, "right", &fx.curves, &mut fx.junctions)
            .unwrap_err();
        assert!(matches!(err, JunctionError::AlreadyDecided { .. }));
        assert_eq!(a.curve(), fx.left);
    }

    #[test]
    fn trigger_far_from_junction_is_ignored() {
        let mut fx = fixture();
        let mut a = actor(&fx);
        let ctl = MotionController::default();
        let err = ctl
            .apply_trigger(&mut a, "left", &fx.curves, &mut fx.junctions)
            .unwrap_err();
        assert!(matches!(err, JunctionError::InvalidTrigger { .. }));
        assert_eq!(a.curve(), fx.main);
        assert_eq!(a.t(), 0.0);
    }

    #[test]
    fn restart_returns_home_and_resets_junctions() {
        let mut fx = fixture();
        let mut a = actor(&fx);
        let ctl = per_frame(0.3, OnPathEnd::Restart);
        ctl.advance(&mut a, 0.96, &fx.curves, &mut fx.junctions);
        ctl.apply_trigger(&mut a, "left", &fx.curves, &mut fx.junctions)
            .unwrap();
        ctl.advance(&mut a, 0.9, &fx.curves, &mut fx.junctions);

        let report = ctl.advance(&mut a, 0.3, &fx.curves, &mut fx.junctions);
        assert!(report.contains(MotionEvent::Restarted));
        assert_eq!(a.curve(), fx.main);
        assert!((a.t() - 0.2).abs() < 1e-5);
        assert!(fx.junctions.get(fx.fork).unwrap().armed().is_none());
    }

    #[test]
    fn exact_end_does_not_restart() {
        let mut fx = fixture();
        let mut a = actor(&fx);
        let ctl = MotionController::default();
        let report = ctl.advance(&mut a, 1.0, &fx.curves, &mut fx.junctions);
        assert!(!report.contains(MotionEvent::Restarted));
        assert_eq!(a.t(), 1.0);
        assert!((a.position() - FORK).length() < 1e-3);
    }

    #[test]
    fn stop_parks_until_branch() {
        let mut fx = fixture();
        let mut a = actor(&fx);
        let ctl = per_frame(0.6, OnPathEnd::Stop);
        ctl.advance(&mut a, 0.6, &fx.curves, &mut fx.junctions);
        let report = ctl.advance(&mut a, 0.6, &fx.curves, &mut fx.junctions);
        assert!(report.contains(MotionEvent::Parked));
        assert!(a.is_parked());
        assert_eq!(a.t(), 1.0);

        ctl.advance(&mut a, 0.6, &fx.curves, &mut fx.junctions);
        assert_eq!(a.t(), 1.0);

        ctl.apply_trigger(&mut a, "left", &fx.curves, &mut fx.junctions)
            .unwrap();
        assert!(!a.is_parked());
        ctl.advance(&mut a, 0.5, &fx.curves, &mut fx.junctions);
        assert!((a.t() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn looping_curve_wraps() {
        let mut curves = CurveSet::new();
        let ring = waypoint::arc(
            Vec3::ZERO,
            50.0,
            0.0,
            std::f32::consts::TAU * 0.75,
            3,
            trackline_core::PlaneAxis::Y,
        )
        .unwrap();
        let id = curves.insert("ring", PathCurve::looping(ring).unwrap()).unwrap();
        let mut junctions = JunctionGraph::new();
        let mut a = Actor::spawn(NodeHandle::new("train"), id, curves.get(id).unwrap());
        let start = a.position();

        let ctl = MotionController::default();
        ctl.advance(&mut a, 0.7, &curves, &mut junctions);
        let report = ctl.advance(&mut a, 0.5, &curves, &mut junctions);
        assert!(report.contains(MotionEvent::Wrapped));
        assert!((a.t() - 0.2).abs() < 1e-5);

        ctl.advance(&mut a, 0.8, &curves, &mut junctions);
        assert!(a.t() < 1e-5 || a.t() > 1.0 - 1e-5);
        assert!((a.position() - start).length() < 1e-2);
    }

    #[test]
    fn every_lap_is_a_new_traversal() {
        let mut curves = CurveSet::new();
        let ring = waypoint::arc(
            Vec3::ZERO,
            50.0,
            0.0,
            std::f32::consts::TAU * 0.9,
            10,
            trackline_core::PlaneAxis::Y,
        )
        .unwrap();
        let id = curves.insert("ring", PathCurve::looping(ring).unwrap()).unwrap();
        let far_side = curves.get(id).unwrap().position_at(0.5);
        let mut junctions = JunctionGraph::new();
        let spur = junctions.add(Junction::new("spur", far_side, 10.0).with_branch("stay", id));
        let mut a = Actor::spawn(NodeHandle::new("train"), id, curves.get(id).unwrap());

        let ctl = MotionController::default();
        let mut wraps = 0;
        let mut reached = 0;
        for _ in 0..250 {
            let report = ctl.advance(&mut a, 0.01, &curves, &mut junctions);
            if report.contains(MotionEvent::Wrapped) {
                wraps += 1;
                assert!(junctions.get(spur).unwrap().armed().is_none());
            }
            if report.contains(MotionEvent::JunctionReached(spur)) {
                reached += 1;
                // Lock the junction; the next lap must unlock it
                junctions.arm(spur, "stay", a.position()).unwrap();
            }
        }
        assert_eq!(wraps, 2);
        assert_eq!(reached, wraps + 1);
    }

    #[test]
    fn pending_slot_is_untouched() {
        let mut fx = fixture();
        let mut slot: ActorSlot<NodeHandle> = ActorSlot::pending("train");
        let ctl = MotionController::default();
        assert!(ctl
            .step_slot(&mut slot, 0.016, &fx.curves, &mut fx.junctions)
            .is_none());
        assert!(slot.position().is_none());

        slot = ActorSlot::Ready(actor(&fx));
        let report = ctl.advance_slot(&mut slot, 0.5, &fx.curves, &mut fx.junctions);
        assert!(report.is_some());
        assert!((slot.actor().unwrap().t() - 0.5).abs() < 1e-6);
    }
}
