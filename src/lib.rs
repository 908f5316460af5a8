#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod connectivity;
pub mod element;
mod errors;
mod geometry;
mod problem;
mod solution;
mod solver;

pub use crate::errors::{MemberPropertyError, Referrer, SolveError};
pub use crate::geometry::{force, point, Displacement, Force, Point};
pub use crate::problem::{Constraint, Element, PointLoad, TrussProblem};
pub use crate::solution::TrussSolution;
pub use crate::solver::{solve, SolverSettings, TrussSolver};
