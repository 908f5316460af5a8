//! Direct stiffness solution of a planar truss.

use log::{debug, warn};
use nalgebra::{DMatrix, DVector};

use crate::connectivity::Connectivity;
use crate::element::{dof_map, dof_x, dof_y, ElementGeometry};
use crate::errors::{MemberPropertyError, Referrer, SolveError};
use crate::geometry::Point;
use crate::problem::{Constraint, Element, PointLoad, TrussProblem};
use crate::solution::TrussSolution;

/// Tunable behaviour of [`TrussSolver`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverSettings {
    /// Smallest accepted LU pivot, relative to the largest diagonal entry of
    /// the reduced stiffness matrix. Smaller pivots mean the structure is a
    /// mechanism or is not attached to its supports.
    ///
    /// Nearly flat geometry also ends up below the default of `1e-12`: a two-bar
    /// arch whose rise is under about `1e-6` of its span is treated as
    /// numerically singular. Lower the tolerance to solve such models anyway.
    pub singular_tolerance: f64,
    /// Reject elements whose area or elastic modulus is not strictly positive.
    pub strict_properties: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            singular_tolerance: 1.0e-12,
            strict_properties: false,
        }
    }
}

/// Linear-elastic solver for pin-jointed planar trusses.
///
/// # Examples
/// ```
/// use truss2d::{force, point, TrussProblem, TrussSolver};
///
/// let mut problem = TrussProblem::new();
/// let a = problem.add_node(point(0.0, 0.0));
/// let b = problem.add_node(point(2.0, 0.0));
/// problem.add_element(a, b, 0.01, 200.0e9);
/// problem.fix(a, true, true);
/// problem.fix(b, false, true);
/// problem.add_load(b, force(1_000.0, 0.0));
///
/// let solution = TrussSolver::new().solve(&problem).expect("bar is stable");
/// let tip = solution.node_displacement(b).expect("node exists");
/// assert!((tip.x - 1.0e-6).abs() < 1.0e-15);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TrussSolver {
    /// Settings applied to every solve.
    settings: SolverSettings,
}

impl TrussSolver {
    /// Create a solver with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with explicit settings.
    #[must_use]
    pub fn with_settings(settings: SolverSettings) -> Self {
        Self { settings }
    }

    /// Settings used by this solver.
    #[must_use]
    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Solve `problem` for displacements, reactions and member stresses.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError`] when the input refers to missing nodes, contains a
    /// zero-length element, fails strict property checks, or leaves the
    /// structure free to move without straining any member.
    pub fn solve(&self, problem: &TrussProblem) -> Result<TrussSolution, SolveError> {
        self.validate(problem)?;
        let geometries = Self::element_geometries(problem)?;
        let stiffness = Self::build_stiffness_matrix(problem, &geometries);
        let load = Self::build_load_vector(problem);
        let (fixed_dofs, free_dofs) = Self::partition_dofs(problem);
        let displacements = self.solve_displacements(problem, &stiffness, &load, &free_dofs)?;
        let reactions = &stiffness * &displacements - &load;

        let stresses: Vec<f64> = problem
            .elements
            .iter()
            .zip(&geometries)
            .map(|(element, geometry)| {
                geometry.axial_stress(
                    element.elastic_modulus,
                    &dof_map(element.start, element.end),
                    &displacements,
                )
            })
            .collect();
        let axial_forces = problem
            .elements
            .iter()
            .zip(&stresses)
            .map(|(element, stress)| stress * element.area)
            .collect();

        Ok(TrussSolution::new(
            stiffness,
            displacements,
            reactions,
            stresses,
            axial_forces,
            fixed_dofs,
            free_dofs,
        ))
    }

    /// Check node references and, when requested, element properties.
    fn validate(&self, problem: &TrussProblem) -> Result<(), SolveError> {
        let node_count = problem.node_count();
        if node_count < 2 {
            return Err(SolveError::TooFewNodes { count: node_count });
        }
        let check = |referrer: Referrer, node: usize| {
            if (1..=node_count).contains(&node) {
                Ok(())
            } else {
                Err(SolveError::InvalidReference {
                    referrer,
                    node,
                    node_count,
                })
            }
        };

        for (index, element) in problem.elements.iter().enumerate() {
            check(Referrer::Element(index), element.start)?;
            check(Referrer::Element(index), element.end)?;
            if element.start == element.end {
                return Err(SolveError::SelfConnectedElement {
                    element: index,
                    node: element.start,
                });
            }
            if let Err(source) = MemberPropertyError::check(element.area, element.elastic_modulus)
            {
                if self.settings.strict_properties {
                    return Err(SolveError::InvalidMemberProperties {
                        element: index,
                        source,
                    });
                }
                warn!("element {}: {source}; continuing with the given value", index + 1);
            }
        }
        for (index, constraint) in problem.constraints.iter().enumerate() {
            check(Referrer::Constraint(index), constraint.node)?;
        }
        for (index, load) in problem.loads.iter().enumerate() {
            check(Referrer::Load(index), load.node)?;
        }
        Ok(())
    }

    /// Measure every element, rejecting coincident end nodes.
    fn element_geometries(problem: &TrussProblem) -> Result<Vec<ElementGeometry>, SolveError> {
        problem
            .elements
            .iter()
            .enumerate()
            .map(|(index, element)| {
                let start = problem.nodes[element.start - 1];
                let end = problem.nodes[element.end - 1];
                ElementGeometry::between(start, end).ok_or(SolveError::DegenerateGeometry {
                    element: index,
                    start: element.start,
                    end: element.end,
                })
            })
            .collect()
    }

    /// Assemble the global stiffness matrix by scatter-adding element blocks.
    fn build_stiffness_matrix(
        problem: &TrussProblem,
        geometries: &[ElementGeometry],
    ) -> DMatrix<f64> {
        let dof = problem.dof_count();
        let mut matrix = DMatrix::zeros(dof, dof);
        for (element, geometry) in problem.elements.iter().zip(geometries) {
            let local = geometry.stiffness(element.area, element.elastic_modulus);
            let dofs = dof_map(element.start, element.end);
            for (row_local, &global_row) in dofs.iter().enumerate() {
                for (col_local, &global_col) in dofs.iter().enumerate() {
                    matrix[(global_row, global_col)] += local[(row_local, col_local)];
                }
            }
        }
        debug!(
            "assembled {dof}x{dof} stiffness matrix from {} elements",
            problem.element_count()
        );
        matrix
    }

    /// Assemble the global nodal load vector.
    fn build_load_vector(problem: &TrussProblem) -> DVector<f64> {
        let mut load = DVector::zeros(problem.dof_count());
        for point_load in &problem.loads {
            let mut slot = load.fixed_rows_mut::<2>(dof_x(point_load.node));
            slot += point_load.force.to_vector();
        }
        load
    }

    /// Split DOFs into restrained and unrestrained sets, both ascending.
    fn partition_dofs(problem: &TrussProblem) -> (Vec<usize>, Vec<usize>) {
        let mut fixed = vec![false; problem.dof_count()];
        for constraint in &problem.constraints {
            if constraint.fix_x {
                fixed[dof_x(constraint.node)] = true;
            }
            if constraint.fix_y {
                fixed[dof_y(constraint.node)] = true;
            }
        }
        (0..fixed.len()).partition(|&dof| fixed[dof])
    }

    /// Solve the reduced system and expand it to every DOF.
    fn solve_displacements(
        &self,
        problem: &TrussProblem,
        stiffness: &DMatrix<f64>,
        load: &DVector<f64>,
        free_dofs: &[usize],
    ) -> Result<DVector<f64>, SolveError> {
        let mut displacements = DVector::zeros(load.len());
        let free_len = free_dofs.len();
        if free_len == 0 {
            debug!("every DOF is restrained; displacements are zero");
            return Ok(displacements);
        }

        let k_ff = DMatrix::from_fn(free_len, free_len, |row, col| {
            stiffness[(free_dofs[row], free_dofs[col])]
        });
        let f_f = DVector::from_fn(free_len, |row, _| load[free_dofs[row]]);
        debug!("solving reduced system with {free_len} free DOFs");

        let scale = k_ff.diagonal().amax();
        let lu = k_ff.lu();
        let smallest_pivot = lu
            .u()
            .diagonal()
            .iter()
            .fold(f64::INFINITY, |smallest, pivot| smallest.min(pivot.abs()));
        if smallest_pivot <= self.settings.singular_tolerance * scale {
            return Err(Self::singular(problem, free_len));
        }
        let solution = lu
            .solve(&f_f)
            .filter(|solution| solution.iter().all(|value| value.is_finite()))
            .ok_or_else(|| Self::singular(problem, free_len))?;

        for (idx, &dof) in free_dofs.iter().enumerate() {
            displacements[dof] = solution[idx];
        }
        Ok(displacements)
    }

    /// Describe a singular reduced system, noting any floating pieces.
    fn singular(problem: &TrussProblem, free_dofs: usize) -> SolveError {
        let connectivity = Connectivity::of(problem);
        let components = connectivity.component_count();
        let unconnected = connectivity.unconnected_nodes();
        if !unconnected.is_empty() {
            warn!("nodes {unconnected:?} are not attached to any element");
        }
        SolveError::SingularSystem {
            free_dofs,
            components,
        }
    }
}

/// Solve a truss given its four input tables, using default settings.
///
/// Returns the assembled stiffness matrix, displacements, reactions and
/// stresses bundled in a [`TrussSolution`].
///
/// # Errors
///
/// See [`TrussSolver::solve`].
///
/// # Examples
/// ```
/// use truss2d::{force, point, solve, Constraint, Element, PointLoad};
///
/// let nodes = [point(0.0, 0.0), point(1.0, 0.0)];
/// let elements = [Element::new(1, 2, 1.0, 1.0)];
/// let constraints = [Constraint::pin(1), Constraint::new(2, false, true)];
/// let loads = [PointLoad::new(2, force(1.0, 0.0))];
///
/// let solution = solve(&nodes, &elements, &constraints, &loads).expect("stable bar");
/// assert!((solution.stresses()[0] - 1.0).abs() < 1.0e-12);
/// ```
pub fn solve(
    nodes: &[Point],
    elements: &[Element],
    constraints: &[Constraint],
    loads: &[PointLoad],
) -> Result<TrussSolution, SolveError> {
    let problem = TrussProblem {
        nodes: nodes.to_vec(),
        elements: elements.to_vec(),
        constraints: constraints.to_vec(),
        loads: loads.to_vec(),
    };
    TrussSolver::new().solve(&problem)
}
