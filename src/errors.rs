//! Error types produced while validating or solving a truss problem.

use std::fmt;

use thiserror::Error;

/// Kind of input record that refers to a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Referrer {
    /// An element endpoint (zero-based position in the element table).
    Element(usize),
    /// A prescribed-displacement entry (zero-based position in the constraint table).
    Constraint(usize),
    /// A point load entry (zero-based position in the load table).
    Load(usize),
}

impl fmt::Display for Referrer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(index) => write!(f, "element {}", index + 1),
            Self::Constraint(index) => write!(f, "constraint {}", index + 1),
            Self::Load(index) => write!(f, "load {}", index + 1),
        }
    }
}

/// Error returned when a truss problem cannot be solved.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SolveError {
    /// Returned when the model has fewer than two nodes.
    #[error("a truss needs at least two nodes (received {count})")]
    TooFewNodes {
        /// Number of nodes supplied.
        count: usize,
    },
    /// Returned when an input record names a node outside `1..=node_count`.
    #[error("{referrer} refers to node {node}, but the truss has {node_count} nodes")]
    InvalidReference {
        /// Record holding the bad reference.
        referrer: Referrer,
        /// One-based node number as supplied.
        node: usize,
        /// Number of nodes in the truss.
        node_count: usize,
    },
    /// Returned when an element starts and ends at the same node.
    #[error("element {} connects node {node} to itself", .element + 1)]
    SelfConnectedElement {
        /// Zero-based element index.
        element: usize,
        /// One-based node number.
        node: usize,
    },
    /// Returned when an element spans zero distance.
    #[error("element {} has zero length (nodes {start} and {end} coincide)", .element + 1)]
    DegenerateGeometry {
        /// Zero-based element index.
        element: usize,
        /// One-based start node.
        start: usize,
        /// One-based end node.
        end: usize,
    },
    /// Returned when strict property checks reject an element.
    #[error("element {} has invalid properties: {source}", .element + 1)]
    InvalidMemberProperties {
        /// Zero-based element index.
        element: usize,
        /// Description of the invalid property.
        #[source]
        source: MemberPropertyError,
    },
    /// Returned when the reduced stiffness matrix cannot be factorised.
    ///
    /// This covers numerically singular systems too: a pivot below
    /// `SolverSettings::singular_tolerance` relative to the stiffest free DOF
    /// is treated the same as an exact zero.
    #[error(
        "structure is not properly constrained: reduced stiffness matrix is singular \
         ({free_dofs} free DOFs, {components} connected component(s))"
    )]
    SingularSystem {
        /// Size of the reduced system.
        free_dofs: usize,
        /// Number of connected components in the element graph.
        components: usize,
    },
}

/// Error describing a physically meaningless element property.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum MemberPropertyError {
    /// Returned when the cross-sectional area is zero or negative.
    #[error("area must be positive (received {area})")]
    NonPositiveArea {
        /// Rejected cross-sectional area.
        area: f64,
    },
    /// Returned when the elastic modulus is zero or negative.
    #[error("elastic modulus must be positive (received {elastic_modulus})")]
    NonPositiveElasticModulus {
        /// Rejected elastic modulus.
        elastic_modulus: f64,
    },
}

impl MemberPropertyError {
    /// Check an area/modulus pair, returning the first offending property.
    ///
    /// # Errors
    ///
    /// Returns the variant naming whichever value is not strictly positive.
    pub fn check(area: f64, elastic_modulus: f64) -> Result<(), Self> {
        if area <= 0.0 || area.is_nan() {
            return Err(Self::NonPositiveArea { area });
        }
        if elastic_modulus <= 0.0 || elastic_modulus.is_nan() {
            return Err(Self::NonPositiveElasticModulus { elastic_modulus });
        }
        Ok(())
    }
}
