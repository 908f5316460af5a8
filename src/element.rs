//! Kinematics and stiffness of a single two-node planar truss element.

use nalgebra::{DVector, SMatrix, SVector};

use crate::geometry::Point;

// Callers validate node numbers first; node 0 has no DOFs.

/// Degree-of-freedom index of the X translation of a one-based node.
#[must_use]
pub(crate) const fn dof_x(node: usize) -> usize {
    2 * (node - 1)
}

/// Degree-of-freedom index of the Y translation of a one-based node.
#[must_use]
pub(crate) const fn dof_y(node: usize) -> usize {
    2 * (node - 1) + 1
}

/// Global DOFs of an element in local order `[start_x, start_y, end_x, end_y]`.
#[must_use]
pub(crate) const fn dof_map(start: usize, end: usize) -> [usize; 4] {
    [dof_x(start), dof_y(start), dof_x(end), dof_y(end)]
}

/// Length and orientation of an element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementGeometry {
    /// Distance between the two end nodes.
    pub length: f64,
    /// Direction cosine with the global X axis.
    pub cos: f64,
    /// Direction cosine with the global Y axis.
    pub sin: f64,
}

impl ElementGeometry {
    /// Measure the element running from `start` to `end`.
    ///
    /// Returns `None` when the nodes coincide.
    #[must_use]
    pub fn between(start: Point, end: Point) -> Option<Self> {
        let length = start.distance_to(end);
        if length == 0.0 {
            return None;
        }
        let delta = start.offset_to(end);
        Some(Self {
            length,
            cos: delta.x / length,
            sin: delta.y / length,
        })
    }

    /// Projection row `[-c, -s, c, s]` mapping end displacements to elongation.
    #[must_use]
    pub fn elongation_row(&self) -> SVector<f64, 4> {
        SVector::<f64, 4>::new(-self.cos, -self.sin, self.cos, self.sin)
    }

    /// Element stiffness in global axes for the given axial properties.
    ///
    /// The matrix is `(E A / L) * b bᵀ` with `b` the elongation row, which is
    /// the usual
    ///
    /// ```text
    /// [ c²   cs  -c²  -cs ]
    /// [ cs   s²  -cs  -s² ]
    /// [-c²  -cs   c²   cs ]
    /// [-cs  -s²   cs   s² ]
    /// ```
    #[must_use]
    pub fn stiffness(&self, area: f64, elastic_modulus: f64) -> SMatrix<f64, 4, 4> {
        let c = self.cos;
        let s = self.sin;
        let ea_over_l = elastic_modulus * area / self.length;
        ea_over_l
            * SMatrix::<f64, 4, 4>::from_row_slice(&[
                c * c,
                c * s,
                -c * c,
                -c * s,
                c * s,
                s * s,
                -c * s,
                -s * s,
                -c * c,
                -c * s,
                c * c,
                c * s,
                -c * s,
                -s * s,
                c * s,
                s * s,
            ])
    }

    /// Axial stress from the global displacement vector, tension positive.
    #[must_use]
    pub fn axial_stress(
        &self,
        elastic_modulus: f64,
        dofs: &[usize; 4],
        displacements: &DVector<f64>,
    ) -> f64 {
        let local = SVector::<f64, 4>::from_fn(|i, _| displacements[dofs[i]]);
        elastic_modulus * self.elongation_row().dot(&local) / self.length
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::point;

    #[test]
    fn dof_numbering_is_node_ordered() {
        assert_eq!(dof_map(1, 3), [0, 1, 4, 5]);
        assert_eq!(dof_map(2, 1), [2, 3, 0, 1]);
    }

    #[test]
    fn coincident_nodes_have_no_geometry() {
        assert!(ElementGeometry::between(point(2.0, 2.0), point(2.0, 2.0)).is_none());
    }

    #[test]
    fn inclined_element_has_expected_cosines() {
        let geometry =
            ElementGeometry::between(point(0.0, 0.0), point(3.0, 4.0)).expect("nonzero length");
        assert_relative_eq!(geometry.length, 5.0);
        assert_relative_eq!(geometry.cos, 0.6);
        assert_relative_eq!(geometry.sin, 0.8);
    }

    #[test]
    fn stiffness_is_symmetric_and_balanced() {
        let geometry =
            ElementGeometry::between(point(1.0, -1.0), point(4.0, 3.0)).expect("nonzero length");
        let k = geometry.stiffness(0.02, 70.0e9);
        assert_eq!(k, k.transpose());
        for row in 0..4 {
            let x_sum = k[(row, 0)] + k[(row, 2)];
            let y_sum = k[(row, 1)] + k[(row, 3)];
            assert_relative_eq!(x_sum, 0.0, epsilon = 1.0e-3);
            assert_relative_eq!(y_sum, 0.0, epsilon = 1.0e-3);
        }
        let ea_over_l = 70.0e9 * 0.02 / 5.0;
        assert_relative_eq!(k[(0, 0)], ea_over_l * 0.36, max_relative = 1.0e-12);
        assert_relative_eq!(k[(1, 3)], -ea_over_l * 0.64, max_relative = 1.0e-12);
    }

    #[test]
    fn stretching_gives_positive_stress() {
        let geometry =
            ElementGeometry::between(point(0.0, 0.0), point(2.0, 0.0)).expect("nonzero length");
        let dofs = dof_map(1, 2);
        let stretched = DVector::from_vec(vec![0.0, 0.0, 0.01, 0.0]);
        let squeezed = DVector::from_vec(vec![0.01, 0.0, 0.0, 0.0]);
        assert_relative_eq!(geometry.axial_stress(100.0, &dofs, &stretched), 0.5);
        assert_relative_eq!(geometry.axial_stress(100.0, &dofs, &squeezed), -0.5);
    }

    #[test]
    fn transverse_motion_carries_no_stress() {
        let geometry =
            ElementGeometry::between(point(0.0, 0.0), point(1.0, 0.0)).expect("nonzero length");
        let dofs = dof_map(1, 2);
        let transverse = DVector::from_vec(vec![0.0, 0.3, 0.0, -0.2]);
        assert_eq!(geometry.axial_stress(1.0, &dofs, &transverse), 0.0);
    }
}
