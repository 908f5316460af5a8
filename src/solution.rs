//! Results of a direct stiffness solve.

use nalgebra::{DMatrix, DVector, Vector2};
use serde::Serialize;

use crate::element::dof_x;
use crate::geometry::{Displacement, Force};

/// Global stiffness matrix, displacements, reactions and member stresses.
///
/// Every field is produced by one call to the solver and is consistent with
/// the others: `reactions == stiffness * displacements - loads`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrussSolution {
    /// Assembled global stiffness matrix before boundary conditions.
    stiffness: DMatrix<f64>,
    /// Full displacement vector, zero at fixed DOFs.
    displacements: DVector<f64>,
    /// `K q - F` over every DOF.
    reactions: DVector<f64>,
    /// Axial stress per element, tension positive.
    stresses: Vec<f64>,
    /// Axial force per element, tension positive.
    axial_forces: Vec<f64>,
    /// Restrained DOFs in ascending order.
    fixed_dofs: Vec<usize>,
    /// Unrestrained DOFs in ascending order.
    free_dofs: Vec<usize>,
}

impl TrussSolution {
    /// Bundle the outputs of a solve.
    pub(crate) fn new(
        stiffness: DMatrix<f64>,
        displacements: DVector<f64>,
        reactions: DVector<f64>,
        stresses: Vec<f64>,
        axial_forces: Vec<f64>,
        fixed_dofs: Vec<usize>,
        free_dofs: Vec<usize>,
    ) -> Self {
        Self {
            stiffness,
            displacements,
            reactions,
            stresses,
            axial_forces,
            fixed_dofs,
            free_dofs,
        }
    }

    /// Global stiffness matrix `K` (2N × 2N).
    #[must_use]
    pub fn stiffness(&self) -> &DMatrix<f64> {
        &self.stiffness
    }

    /// Displacement vector `q` (length 2N).
    #[must_use]
    pub fn displacements(&self) -> &DVector<f64> {
        &self.displacements
    }

    /// Reaction vector `R = K q - F` (length 2N).
    #[must_use]
    pub fn reactions(&self) -> &DVector<f64> {
        &self.reactions
    }

    /// Axial stress of every element in input order.
    #[must_use]
    pub fn stresses(&self) -> &[f64] {
        &self.stresses
    }

    /// Axial force (stress times area) of every element in input order.
    #[must_use]
    pub fn axial_forces(&self) -> &[f64] {
        &self.axial_forces
    }

    /// Restrained DOFs in ascending order.
    #[must_use]
    pub fn fixed_dofs(&self) -> &[usize] {
        &self.fixed_dofs
    }

    /// Unrestrained DOFs in ascending order.
    #[must_use]
    pub fn free_dofs(&self) -> &[usize] {
        &self.free_dofs
    }

    /// Number of nodes in the solved model.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.displacements.len() / 2
    }

    /// Displacement of a one-based node.
    #[must_use]
    pub fn node_displacement(&self, node: usize) -> Option<Displacement> {
        self.node_pair(&self.displacements, node).map(Displacement::from)
    }

    /// Reaction at a one-based node.
    #[must_use]
    pub fn node_reaction(&self, node: usize) -> Option<Force> {
        self.node_pair(&self.reactions, node).map(Force::from)
    }

    /// Axial stress of a one-based element.
    #[must_use]
    pub fn element_stress(&self, element: usize) -> Option<f64> {
        element
            .checked_sub(1)
            .and_then(|index| self.stresses.get(index).copied())
    }

    /// Find the one-based element with the largest stress magnitude.
    #[must_use]
    pub fn max_stress_element(&self) -> Option<(usize, f64)> {
        self.stresses
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (index, stress)| match best {
                Some((_, current)) if f64::abs(current) >= stress.abs() => best,
                _ => Some((index + 1, stress)),
            })
    }

    /// Decompose into `(K, q, R, stresses)`.
    #[must_use]
    pub fn into_parts(self) -> (DMatrix<f64>, DVector<f64>, DVector<f64>, Vec<f64>) {
        (
            self.stiffness,
            self.displacements,
            self.reactions,
            self.stresses,
        )
    }

    /// The `(x, y)` entries of `values` belonging to a one-based node.
    fn node_pair(&self, values: &DVector<f64>, node: usize) -> Option<Vector2<f64>> {
        (1..=self.node_count())
            .contains(&node)
            .then(|| values.fixed_rows::<2>(dof_x(node)).into_owned())
    }
}
