use std::fmt::Write;

use truss2d::{TrussProblem, TrussSolution};

/// Render a textual report of a solved truss.
///
/// The stiffness matrix is printed in full, followed by nodal displacements and
/// reactions and the axial response of every element.
#[must_use]
pub fn render_report(problem: &TrussProblem, solution: &TrussSolution) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Planar truss: {} nodes, {} elements, {} free DOFs",
        problem.node_count(),
        problem.element_count(),
        solution.free_dofs().len()
    )
    .expect("writing to string cannot fail");

    output.push_str("\nGlobal stiffness matrix K:\n");
    for row in solution.stiffness().row_iter() {
        let line: Vec<String> = row.iter().map(|value| format!("{value:+.4e}")).collect();
        writeln!(&mut output, "  [{}]", line.join(" ")).expect("writing to string cannot fail");
    }

    output.push_str("\nNode  ux           uy           Rx           Ry\n");
    for node in 1..=solution.node_count() {
        let (Some(displacement), Some(reaction)) =
            (solution.node_displacement(node), solution.node_reaction(node))
        else {
            continue;
        };
        writeln!(
            &mut output,
            "{node:<5} {:+.4e} {:+.4e} {:+.4e} {:+.4e}",
            displacement.x, displacement.y, reaction.x, reaction.y
        )
        .expect("writing to string cannot fail");
    }

    output.push_str("\nElement  stress       axial force\n");
    for (index, (stress, axial_force)) in solution
        .stresses()
        .iter()
        .zip(solution.axial_forces())
        .enumerate()
    {
        let state = if *stress > 0.0 {
            "tension"
        } else if *stress < 0.0 {
            "compression"
        } else {
            "unloaded"
        };
        writeln!(
            &mut output,
            "{:<8} {stress:+.4e} {axial_force:+.4e} ({state})",
            index + 1
        )
        .expect("writing to string cannot fail");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::three_bar_problem;
    use truss2d::TrussSolver;

    #[test]
    fn formats_human_readable_report() {
        let problem = three_bar_problem();
        let solution = TrussSolver::new()
            .solve(&problem)
            .expect("demonstration truss is stable");
        let report = render_report(&problem, &solution);

        assert!(report.starts_with("Planar truss: 3 nodes, 3 elements, 3 free DOFs"));
        assert_eq!(
            report.lines().filter(|line| line.starts_with("  [")).count(),
            6
        );
        assert!(report.contains("(tension)"));
        assert!(report.contains("(compression)"));
    }
}
