//! Input tables describing a truss problem.
//!
//! Node numbers are one-based throughout this module, matching the way truss
//! problems are tabulated by hand. Conversion to zero-based degree-of-freedom
//! indices happens inside the solver.

use serde::{Deserialize, Deserializer, Serialize};

use crate::geometry::{Force, Point};

/// A straight two-force member between two nodes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// One-based start node.
    pub start: usize,
    /// One-based end node.
    pub end: usize,
    /// Cross-sectional area.
    pub area: f64,
    /// Young's modulus.
    pub elastic_modulus: f64,
}

impl Element {
    /// Create an element from its connectivity and axial properties.
    #[must_use]
    pub const fn new(start: usize, end: usize, area: f64, elastic_modulus: f64) -> Self {
        Self {
            start,
            end,
            area,
            elastic_modulus,
        }
    }

    /// Axial rigidity `E * A`.
    #[must_use]
    pub fn axial_rigidity(&self) -> f64 {
        self.elastic_modulus * self.area
    }
}

/// Zero-displacement restraint on one or both translations of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// One-based node number.
    pub node: usize,
    /// Whether the X translation is held at zero.
    #[serde(alias = "dx", deserialize_with = "restraint_flag")]
    pub fix_x: bool,
    /// Whether the Y translation is held at zero.
    #[serde(alias = "dy", deserialize_with = "restraint_flag")]
    pub fix_y: bool,
}

/// Any nonzero tabulated value, NaN included, restrains its direction.
fn is_restrained(value: f64) -> bool {
    value != 0.0
}

/// Read a restraint written either as a boolean or as a prescribed value.
fn restraint_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    /// Either spelling of a restraint.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Restraint {
        /// Explicit on/off switch.
        Flag(bool),
        /// Prescribed displacement whose truthiness decides fixity.
        Value(f64),
    }

    Ok(match Restraint::deserialize(deserializer)? {
        Restraint::Flag(fixed) => fixed,
        Restraint::Value(value) => is_restrained(value),
    })
}

impl Constraint {
    /// Create a constraint from explicit flags.
    #[must_use]
    pub const fn new(node: usize, fix_x: bool, fix_y: bool) -> Self {
        Self { node, fix_x, fix_y }
    }

    /// Restrain both translations.
    #[must_use]
    pub const fn pin(node: usize) -> Self {
        Self::new(node, true, true)
    }

    /// Build a constraint from tabulated prescribed-displacement values.
    ///
    /// Any nonzero value (including NaN) marks the direction as fixed. The value
    /// itself is not applied: fixed directions are always held at zero.
    ///
    /// # Examples
    /// ```
    /// use truss2d::Constraint;
    ///
    /// let roller = Constraint::from_prescribed(2, 0.0, 1.0);
    /// assert!(!roller.fix_x);
    /// assert!(roller.fix_y);
    /// ```
    #[must_use]
    pub fn from_prescribed(node: usize, dx: f64, dy: f64) -> Self {
        Self::new(node, is_restrained(dx), is_restrained(dy))
    }
}

/// Concentrated force applied at a node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    /// One-based node number.
    pub node: usize,
    /// Applied force.
    pub force: Force,
}

impl PointLoad {
    /// Create a point load.
    #[must_use]
    pub const fn new(node: usize, force: Force) -> Self {
        Self { node, force }
    }
}

/// Complete description of a planar truss problem.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrussProblem {
    /// Node coordinates; node `i` is `nodes[i - 1]`.
    pub nodes: Vec<Point>,
    /// Element table.
    pub elements: Vec<Element>,
    /// Prescribed-displacement table.
    #[serde(default)]
    pub constraints: Vec<Constraint>,
    /// Point load table. Loads on the same node accumulate.
    #[serde(default)]
    pub loads: Vec<PointLoad>,
}

impl TrussProblem {
    /// Create an empty problem.
    ///
    /// # Examples
    /// ```
    /// use truss2d::TrussProblem;
    ///
    /// let problem = TrussProblem::new();
    /// assert_eq!(problem.node_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Total number of degrees of freedom, two per node.
    #[must_use]
    pub fn dof_count(&self) -> usize {
        2 * self.nodes.len()
    }

    /// Append a node and return its one-based number.
    ///
    /// # Examples
    /// ```
    /// use truss2d::{point, TrussProblem};
    ///
    /// let mut problem = TrussProblem::new();
    /// assert_eq!(problem.add_node(point(0.0, 0.0)), 1);
    /// assert_eq!(problem.add_node(point(1.0, 0.0)), 2);
    /// ```
    pub fn add_node(&mut self, position: Point) -> usize {
        self.nodes.push(position);
        self.nodes.len()
    }

    /// Connect two nodes with a new element and return its one-based number.
    ///
    /// Node numbers are not checked here; the solver reports bad references.
    pub fn add_element(
        &mut self,
        start: usize,
        end: usize,
        area: f64,
        elastic_modulus: f64,
    ) -> usize {
        self.elements
            .push(Element::new(start, end, area, elastic_modulus));
        self.elements.len()
    }

    /// Hold the selected translations of `node` at zero.
    pub fn fix(&mut self, node: usize, fix_x: bool, fix_y: bool) {
        self.constraints.push(Constraint::new(node, fix_x, fix_y));
    }

    /// Apply a point load to `node`.
    pub fn add_load(&mut self, node: usize, force: Force) {
        self.loads.push(PointLoad::new(node, force));
    }
}
