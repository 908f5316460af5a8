use truss2d::{force, point, TrussProblem};

/// Node and element numbers of the demonstration truss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreeBarGeometry {
    /// Pinned support on the left.
    pub pinned_node: usize,
    /// Roller support on the right.
    pub roller_node: usize,
    /// Loaded node at the top.
    pub apex_node: usize,
    /// Bottom chord between the supports.
    pub chord: usize,
}

/// Physical properties used for the demonstration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreeBarProperties {
    /// Half the span, which is also the rise of the apex.
    pub half_span: f64,
    /// Cross-sectional area of every member.
    pub area: f64,
    /// Elastic modulus of every member.
    pub elastic_modulus: f64,
    /// Vertical load at the apex, negative downwards.
    pub apex_load: f64,
}

impl Default for ThreeBarProperties {
    fn default() -> Self {
        Self {
            half_span: 1.0,
            area: 0.01,
            elastic_modulus: 200.0e9,
            apex_load: -10_000.0,
        }
    }
}

/// Build the nodes and members of a symmetric three-bar truss.
///
/// ```text
///          3
///        /   \
///       /     \
///      1 ----- 2
/// ```
pub fn build_three_bar_truss(properties: &ThreeBarProperties) -> (TrussProblem, ThreeBarGeometry) {
    let mut problem = TrussProblem::new();
    let half_span = properties.half_span;
    let pinned_node = problem.add_node(point(0.0, 0.0));
    let roller_node = problem.add_node(point(2.0 * half_span, 0.0));
    let apex_node = problem.add_node(point(half_span, half_span));

    let chord = problem.add_element(
        pinned_node,
        roller_node,
        properties.area,
        properties.elastic_modulus,
    );
    problem.add_element(
        pinned_node,
        apex_node,
        properties.area,
        properties.elastic_modulus,
    );
    problem.add_element(
        roller_node,
        apex_node,
        properties.area,
        properties.elastic_modulus,
    );

    (
        problem,
        ThreeBarGeometry {
            pinned_node,
            roller_node,
            apex_node,
            chord,
        },
    )
}

/// Apply supports and the apex load to the demonstration truss.
pub fn apply_three_bar_conditions(
    problem: &mut TrussProblem,
    geometry: &ThreeBarGeometry,
    properties: &ThreeBarProperties,
) {
    // A pin on the left and a roller on the right remove the three rigid-body
    // motions without over-restraining the chord.
    problem.fix(geometry.pinned_node, true, true);
    problem.fix(geometry.roller_node, false, true);
    problem.add_load(geometry.apex_node, force(0.0, properties.apex_load));
}

/// The complete demonstration problem.
pub fn three_bar_problem() -> TrussProblem {
    let properties = ThreeBarProperties::default();
    let (mut problem, geometry) = build_three_bar_truss(&properties);
    apply_three_bar_conditions(&mut problem, &geometry, &properties);
    problem
}
