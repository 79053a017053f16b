use std::collections::BTreeMap;
use std::sync::Arc;

use crate::model::SurfaceState;

/// Snapshot of every live surface in a session.
///
/// Surfaces sit behind `Arc`, so cloning a snapshot is cheap and surfaces a
/// message did not touch are shared with the previous snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuntimeState {
    surfaces: BTreeMap<String, Arc<SurfaceState>>,
}

impl RuntimeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surface(&self, surface_id: &str) -> Option<&SurfaceState> {
        self.surfaces.get(surface_id).map(Arc::as_ref)
    }

    pub fn contains(&self, surface_id: &str) -> bool {
        self.surfaces.contains_key(surface_id)
    }

    pub fn surface_ids(&self) -> impl Iterator<Item = &str> {
        self.surfaces.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// True when both snapshots hold the very same surface allocations.
    ///
    /// Reductions that change nothing hand back the same `Arc`s, so this is
    /// a cheap "did anything change" check that never compares surface contents.
    pub fn shares_surfaces_with(&self, other: &RuntimeState) -> bool {
        self.surfaces.len() == other.surfaces.len()
            && self
                .surfaces
                .iter()
                .zip(&other.surfaces)
                .all(|((a_id, a), (b_id, b))| a_id == b_id && Arc::ptr_eq(a, b))
    }

    pub(crate) fn with_surface(mut self, surface: SurfaceState) -> Self {
        self.surfaces
            .insert(surface.surface_id.clone(), Arc::new(surface));
        self
    }

    pub(crate) fn without_surface(mut self, surface_id: &str) -> Self {
        self.surfaces.remove(surface_id);
        self
    }

    /// Apply `update` to a copy of the surface, if it exists.
    pub(crate) fn update_surface(
        mut self,
        surface_id: &str,
        update: impl FnOnce(&mut SurfaceState),
    ) -> Self {
        if let Some(surface) = self.surfaces.get_mut(surface_id) {
            update(Arc::make_mut(surface));
        }
        self
    }
}
