use std::error::Error;
use std::fs;
use std::path::Path;

use log::info;
use truss2d::{SolveError, SolverSettings, TrussProblem, TrussSolution, TrussSolver};

use crate::conditions::three_bar_problem;
use crate::report::render_report;

/// Read the problem tables from `path`, or fall back to the demonstration truss.
pub fn load_problem(path: Option<&Path>) -> Result<TrussProblem, Box<dyn Error>> {
    match path {
        Some(path) => {
            info!("reading truss problem from {}", path.display());
            let text = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => {
            info!("no input given; analysing the three-bar demonstration truss");
            Ok(three_bar_problem())
        }
    }
}

/// Solve the problem with the selected settings.
///
/// The truss is solved using the stiffness method described at
/// <https://en.wikipedia.org/wiki/Direct_stiffness_method>.
pub fn run_analysis(
    problem: &TrussProblem,
    settings: SolverSettings,
) -> Result<TrussSolution, SolveError> {
    info!(
        "solving truss with {} nodes, {} elements, {} constraints and {} loads",
        problem.node_count(),
        problem.element_count(),
        problem.constraints.len(),
        problem.loads.len()
    );
    let solution = TrussSolver::with_settings(settings).solve(problem)?;
    if let Some((element, stress)) = solution.max_stress_element() {
        info!("largest stress magnitude {stress:+.4e} in element {element}");
    }
    Ok(solution)
}

/// Solve `problem` and render the result as a text report or as JSON.
pub fn render_analysis(
    problem: &TrussProblem,
    settings: SolverSettings,
    json: bool,
) -> Result<String, Box<dyn Error>> {
    let solution = run_analysis(problem, settings)?;
    if json {
        Ok(serde_json::to_string_pretty(&solution)?)
    } else {
        Ok(render_report(problem, &solution))
    }
}
