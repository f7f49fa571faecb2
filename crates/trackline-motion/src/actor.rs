//! The moving actor and its load state

use crate::curve_set::CurveId;
use crate::error::LoadFailure;
use crate::loader::SceneNode;
use trackline_core::{PathCurve, Quat, Transform, Vec3};

/// Runtime state of an actor travelling along a curve.
///
/// Every field is valid from construction on: an `Actor` only exists once its
/// asset has loaded and its first pose has been evaluated.
#[derive(Debug)]
pub struct Actor<H> {
    handle: H,
    /// Curve a new traversal starts on
    home: CurveId,
    /// Curve currently being followed
    curve: CurveId,
    t: f32,
    position: Vec3,
    /// Unit tangent of the curve at `t`
    facing: Vec3,
    orientation: Quat,
    /// Stopped at the end of an open curve
    parked: bool,
}

impl<H: SceneNode> Actor<H> {
    /// Place a freshly loaded actor at the start of its home curve.
    pub fn spawn(handle: H, home: CurveId, curve: &PathCurve) -> Self {
        let mut actor = Self {
            handle,
            home,
            curve: home,
            t: 0.0,
            position: Vec3::ZERO,
            facing: Vec3::FORWARD,
            orientation: Quat::IDENTITY,
            parked: false,
        };
        actor.place(home, curve, 0.0);
        actor
    }

    /// Move to `t` on `curve` and push the new pose to the scene handle.
    ///
    /// The actor's forward axis is aligned with the curve tangent, which is
    /// the same as looking at `position + tangent`.
    pub fn place(&mut self, id: CurveId, curve: &PathCurve, t: f32) {
        let t = curve.wrap_t(t);
        self.curve = id;
        self.t = t;
        self.position = curve.position_at(t);
        self.facing = curve.tangent_at(t);
        self.orientation = Quat::look_rotation(self.facing, Vec3::UP);
        self.handle.set_position(self.position);
        self.handle.set_orientation(self.orientation);
    }

    /// Continue on an armed branch from its start.
    pub fn switch_to(&mut self, id: CurveId, curve: &PathCurve) {
        self.parked = false;
        self.place(id, curve, 0.0);
    }

    pub(crate) fn set_parked(&mut self, parked: bool) {
        self.parked = parked;
    }
}

impl<H> Actor<H> {
    pub fn t(&self) -> f32 {
        self.t
    }

    pub fn curve(&self) -> CurveId {
        self.curve
    }

    pub fn home(&self) -> CurveId {
        self.home
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn facing(&self) -> Vec3 {
        self.facing
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.orientation,
        }
    }

    pub fn is_parked(&self) -> bool {
        self.parked
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn handle_mut(&mut self) -> &mut H {
        &mut self.handle
    }
}

/// Where the actor is in its lifecycle.
///
/// "Not loaded yet" is an ordinary state here, not an error: callers match on
/// the slot instead of null-checking an actor every frame.
#[derive(Debug)]
pub enum ActorSlot<H> {
    Pending { path: String, progress: f32 },
    Ready(Actor<H>),
    Failed(LoadFailure),
}

impl<H> ActorSlot<H> {
    pub fn pending(path: impl Into<String>) -> Self {
        ActorSlot::Pending {
            path: path.into(),
            progress: 0.0,
        }
    }

    pub fn actor(&self) -> Option<&Actor<H>> {
        match self {
            ActorSlot::Ready(actor) => Some(actor),
            _ => None,
        }
    }

    pub fn actor_mut(&mut self) -> Option<&mut Actor<H>> {
        match self {
            ActorSlot::Ready(actor) => Some(actor),
            _ => None,
        }
    }

    /// Current position, absent until the actor has loaded
    pub fn position(&self) -> Option<Vec3> {
        self.actor().map(|a| a.position())
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ActorSlot::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ActorSlot::Failed(_))
    }
}
