//! Branch points where a trigger picks the next curve.
//!
//! A junction is armed at most once per traversal. Re-arming while the actor
//! is already on a branch would teleport it, so a decided junction rejects
//! every further trigger until [`JunctionGraph::reset`] starts a new
//! traversal.

use crate::curve_set::CurveId;
use crate::error::{JunctionError, TriggerRejection};
use std::collections::BTreeMap;
use trackline_core::Vec3;

/// Handle to a junction inside a [`JunctionGraph`].
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct JunctionId(usize);

impl JunctionId {
    pub fn raw(&self) -> usize {
        self.0
    }
}

/// A decision point with its candidate continuations.
#[derive(Debug, Clone)]
pub struct Junction {
    pub name: String,
    pub position: Vec3,
    /// Radius within which the actor counts as "at" the junction
    pub tolerance: f32,
    branches: BTreeMap<String, CurveId>,
    armed: Option<String>,
    awaiting_decision: bool,
}

impl Junction {
    pub fn new(name: impl Into<String>, position: Vec3, tolerance: f32) -> Self {
        Self {
            name: name.into(),
            position,
            tolerance,
            branches: BTreeMap::new(),
            armed: None,
            awaiting_decision: false,
        }
    }

    /// Map a trigger symbol to the curve it selects.
    pub fn with_branch(mut self, trigger: impl Into<String>, curve: CurveId) -> Self {
        self.branches.insert(trigger.into(), curve);
        self
    }

    pub fn branch(&self, trigger: &str) -> Option<CurveId> {
        self.branches.get(trigger).copied()
    }

    /// Trigger symbols in sorted order
    pub fn triggers(&self) -> impl Iterator<Item = &str> {
        self.branches.keys().map(|k| k.as_str())
    }

    /// Trigger chosen this traversal, if any
    pub fn armed(&self) -> Option<&str> {
        self.armed.as_deref()
    }

    /// Whether the actor has reached this junction undecided this traversal
    pub fn is_awaiting_decision(&self) -> bool {
        self.awaiting_decision
    }

    pub fn is_near(&self, position: Vec3) -> bool {
        is_near(position, self)
    }
}

/// Euclidean proximity test against the junction's tolerance radius.
pub fn is_near(position: Vec3, junction: &Junction) -> bool {
    position.distance(&junction.position) <= junction.tolerance
}

/// All junctions of a scenario.
#[derive(Debug, Default)]
pub struct JunctionGraph {
    junctions: Vec<Junction>,
}

impl JunctionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, junction: Junction) -> JunctionId {
        self.junctions.push(junction);
        JunctionId(self.junctions.len() - 1)
    }

    pub fn get(&self, id: JunctionId) -> Option<&Junction> {
        self.junctions.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<JunctionId> {
        self.junctions.iter().position(|j| j.name == name).map(JunctionId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (JunctionId, &Junction)> {
        self.junctions.iter().enumerate().map(|(i, j)| (JunctionId(i), j))
    }

    pub fn len(&self) -> usize {
        self.junctions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.junctions.is_empty()
    }

    /// Lock in the branch for `trigger` at junction `id`.
    ///
    /// `position` is the actor's current position; the trigger only counts
    /// while the actor is within tolerance of the junction.
    pub fn arm(
        &mut self,
        id: JunctionId,
        trigger: &str,
        position: Vec3,
    ) -> Result<CurveId, JunctionError> {
        let junction = self
            .junctions
            .get_mut(id.0)
            .ok_or(JunctionError::UnknownJunction(id.0))?;

        if let Some(choice) = &junction.armed {
            return Err(JunctionError::AlreadyDecided {
                junction: junction.name.clone(),
                choice: choice.clone(),
            });
        }
        let reject = |reason| JunctionError::InvalidTrigger {
            junction: junction.name.clone(),
            trigger: trigger.to_string(),
            reason,
        };
        if !is_near(position, junction) {
            return Err(reject(TriggerRejection::NotNear));
        }
        let curve = junction
            .branch(trigger)
            .ok_or_else(|| reject(TriggerRejection::UnknownSymbol))?;

        junction.armed = Some(trigger.to_string());
        junction.awaiting_decision = false;
        tracing::info!("junction '{}' armed: '{}'", junction.name, trigger);
        Ok(curve)
    }

    /// Arm whichever junction is closest to `position`.
    ///
    /// The closest junction decides the outcome even when it is out of range,
    /// so a trigger far from every junction reports `NotNear` for it.
    pub fn arm_nearest(
        &mut self,
        trigger: &str,
        position: Vec3,
    ) -> Result<(JunctionId, CurveId), JunctionError> {
        let id = self
            .nearest(position)
            .ok_or_else(|| JunctionError::NoJunctions(trigger.to_string()))?;
        self.arm(id, trigger, position).map(|curve| (id, curve))
    }

    /// Closest junction regardless of tolerance
    pub fn nearest(&self, position: Vec3) -> Option<JunctionId> {
        self.junctions
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let da = position.distance(&a.position);
                let db = position.distance(&b.position);
                da.total_cmp(&db)
            })
            .map(|(i, _)| JunctionId(i))
    }

    /// Closest junction that `position` is within tolerance of
    pub fn nearest_within(&self, position: Vec3) -> Option<JunctionId> {
        self.nearest(position)
            .filter(|id| self.junctions[id.0].is_near(position))
    }

    /// Unarmed junctions in range that have not been announced yet this traversal
    pub fn approachable(&self, position: Vec3) -> Vec<JunctionId> {
        self.iter()
            .filter(|(_, j)| j.armed.is_none() && !j.awaiting_decision && j.is_near(position))
            .map(|(id, _)| id)
            .collect()
    }

    /// Record that the actor reached an undecided junction.
    ///
    /// Returns true only for the first notification in a traversal. Motion is
    /// never blocked; this only marks the junction as waiting for input.
    pub fn notify_approach(&mut self, id: JunctionId) -> bool {
        let Some(junction) = self.junctions.get_mut(id.0) else {
            return false;
        };
        if junction.armed.is_some() || junction.awaiting_decision {
            return false;
        }
        junction.awaiting_decision = true;
        tracing::info!(
            "reached junction '{}', awaiting one of {:?}",
            junction.name,
            junction.branches.keys().collect::<Vec<_>>()
        );
        true
    }

    /// Clear the decision for a new traversal.
    pub fn reset(&mut self, id: JunctionId) {
        if let Some(junction) = self.junctions.get_mut(id.0) {
            junction.armed = None;
            junction.awaiting_decision = false;
        }
    }

    pub fn reset_all(&mut self) {
        for junction in &mut self.junctions {
            junction.armed = None;
            junction.awaiting_decision = false;
        }
    }
}
