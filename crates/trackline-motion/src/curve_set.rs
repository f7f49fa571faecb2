//! Named registry of path curves

use std::collections::HashMap;
use trackline_core::{PathCurve, Result, TracklineError};

/// Handle to a curve inside a [`CurveSet`].
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CurveId(usize);

impl CurveId {
    pub fn raw(&self) -> usize {
        self.0
    }
}

/// Owns every curve of a scenario. Curves are immutable once inserted and
/// are shared by id between junctions and actors.
#[derive(Debug, Default)]
pub struct CurveSet {
    curves: Vec<(String, PathCurve)>,
    by_name: HashMap<String, CurveId>,
}

impl CurveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a curve under a unique name.
    pub fn insert(&mut self, name: impl Into<String>, curve: PathCurve) -> Result<CurveId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TracklineError::Config(format!("duplicate path name '{}'", name)));
        }
        let id = CurveId(self.curves.len());
        self.by_name.insert(name.clone(), id);
        self.curves.push((name, curve));
        Ok(id)
    }

    pub fn get(&self, id: CurveId) -> Option<&PathCurve> {
        self.curves.get(id.0).map(|(_, c)| c)
    }

    pub fn id(&self, name: &str) -> Option<CurveId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, id: CurveId) -> Option<&str> {
        self.curves.get(id.0).map(|(n, _)| n.as_str())
    }

    /// Curves in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (CurveId, &str, &PathCurve)> {
        self.curves
            .iter()
            .enumerate()
            .map(|(i, (n, c))| (CurveId(i), n.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}
