#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use truss2d::{force, point, Constraint, SolveError, TrussProblem, TrussSolver};

#[derive(Debug, Clone, Copy)]
struct BarGeometry {
    fixed_node: usize,
    loaded_node: usize,
    member: usize,
}

#[derive(Debug, Clone, Copy)]
struct BarProperties {
    length: f64,
    area: f64,
    elastic_modulus: f64,
    axial_load: f64,
}

impl Default for BarProperties {
    fn default() -> Self {
        Self {
            length: 1.0,
            area: 1.0,
            elastic_modulus: 1.0,
            axial_load: 1.0,
        }
    }
}

fn build_bar(properties: &BarProperties) -> (TrussProblem, BarGeometry) {
    let mut problem = TrussProblem::new();
    let fixed_node = problem.add_node(point(0.0, 0.0));
    let loaded_node = problem.add_node(point(properties.length, 0.0));
    let member = problem.add_element(
        fixed_node,
        loaded_node,
        properties.area,
        properties.elastic_modulus,
    );

    (
        problem,
        BarGeometry {
            fixed_node,
            loaded_node,
            member,
        },
    )
}

fn apply_bar_conditions(
    problem: &mut TrussProblem,
    geometry: &BarGeometry,
    properties: &BarProperties,
) {
    problem.constraints.push(Constraint::pin(geometry.fixed_node));
    // The bar has no bending stiffness, so the transverse direction of the
    // loaded end needs its own restraint.
    problem
        .constraints
        .push(Constraint::from_prescribed(geometry.loaded_node, 0.0, 1.0));
    problem.add_load(geometry.loaded_node, force(properties.axial_load, 0.0));
}

#[test]
fn builds_expected_topology() {
    let (problem, geometry) = build_bar(&BarProperties::default());

    assert_eq!(problem.node_count(), 2);
    assert_eq!(problem.element_count(), 1);
    assert_eq!(geometry.fixed_node, 1);
    assert_eq!(geometry.loaded_node, 2);
    assert_eq!(geometry.member, 1);
}

#[test]
fn unit_bar_matches_closed_form_solution() {
    let properties = BarProperties::default();
    let (mut problem, geometry) = build_bar(&properties);
    apply_bar_conditions(&mut problem, &geometry, &properties);

    let solution = TrussSolver::new()
        .solve(&problem)
        .expect("bar analysis produces results");

    let displacement = solution
        .node_displacement(geometry.loaded_node)
        .expect("bar displacement available");
    assert_relative_eq!(displacement.x, 1.0, epsilon = 1.0e-12);
    assert_eq!(displacement.y, 0.0);

    let stress = solution
        .element_stress(geometry.member)
        .expect("bar stress available");
    assert_relative_eq!(stress, 1.0, epsilon = 1.0e-12);

    let reaction = solution
        .node_reaction(geometry.fixed_node)
        .expect("support reaction available");
    assert_relative_eq!(reaction.x, -1.0, epsilon = 1.0e-12);
    assert_relative_eq!(reaction.y, 0.0, epsilon = 1.0e-12);
}

#[test]
fn steel_bar_in_compression() {
    let properties = BarProperties {
        length: 1.0,
        area: 0.01,
        elastic_modulus: 200.0e9,
        axial_load: -1_000.0,
    };
    let (mut problem, geometry) = build_bar(&properties);
    apply_bar_conditions(&mut problem, &geometry, &properties);

    let solution = TrussSolver::new()
        .solve(&problem)
        .expect("bar analysis produces results");

    let expected_displacement = properties.axial_load * properties.length
        / (properties.area * properties.elastic_modulus);
    let displacement = solution
        .node_displacement(geometry.loaded_node)
        .expect("bar displacement available");
    assert_relative_eq!(displacement.x, expected_displacement, epsilon = 1.0e-15);

    let axial_force = solution.axial_forces()[geometry.member - 1];
    assert_relative_eq!(axial_force, properties.axial_load, max_relative = 1.0e-9);
    let stress = solution
        .element_stress(geometry.member)
        .expect("bar stress available");
    assert!(stress < 0.0);
    assert_relative_eq!(
        stress,
        properties.axial_load / properties.area,
        max_relative = 1.0e-9
    );
}

#[test]
fn stiffness_matrix_of_single_bar() {
    let properties = BarProperties {
        length: 2.0,
        area: 3.0,
        elastic_modulus: 4.0,
        axial_load: 0.0,
    };
    let (mut problem, geometry) = build_bar(&properties);
    apply_bar_conditions(&mut problem, &geometry, &properties);

    let solution = TrussSolver::new()
        .solve(&problem)
        .expect("unloaded bar still solves");
    let k = solution.stiffness();
    let ea_over_l = 6.0;
    let expected = [
        [ea_over_l, 0.0, -ea_over_l, 0.0],
        [0.0, 0.0, 0.0, 0.0],
        [-ea_over_l, 0.0, ea_over_l, 0.0],
        [0.0, 0.0, 0.0, 0.0],
    ];
    for (row, values) in expected.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            assert_relative_eq!(k[(row, col)], *value, epsilon = 1.0e-12);
        }
    }
    assert!(solution.displacements().iter().all(|&value| value == 0.0));
}

#[test]
fn only_pinned_end_is_under_constrained() {
    let properties = BarProperties::default();
    let (mut problem, geometry) = build_bar(&properties);
    problem.constraints.push(Constraint::pin(geometry.fixed_node));
    problem.add_load(geometry.loaded_node, force(1.0, 0.0));

    let error = TrussSolver::new()
        .solve(&problem)
        .expect_err("transverse mechanism detected");
    assert!(matches!(error, SolveError::SingularSystem { .. }));
}

#[test]
fn coincident_end_nodes_are_degenerate() {
    let properties = BarProperties {
        length: 0.0,
        ..BarProperties::default()
    };
    let (mut problem, geometry) = build_bar(&properties);
    apply_bar_conditions(&mut problem, &geometry, &properties);

    let error = TrussSolver::new()
        .solve(&problem)
        .expect_err("zero length detected");
    assert_eq!(
        error,
        SolveError::DegenerateGeometry {
            element: 0,
            start: 1,
            end: 2
        }
    );
}
