use crate::model::PackableItem;

pub mod fit;
pub mod radial;
pub mod relaxation;

/// Outcome of arranging items, before the fit step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrangement {
    pub iterations: usize,
    pub converged: bool,
    pub separation_passes: usize,
}

/// A packer positions items around the container centre.
///
/// Implementations only move items; they never resize them. Containment is
/// enforced afterwards by [`fit::fit_to_container`]. Callers pass a non-empty
/// slice and keep it exclusively borrowed for the duration of the call.
pub trait Packer {
    fn arrange(&self, items: &mut [PackableItem]) -> Arrangement;
}
