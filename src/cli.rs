use std::path::PathBuf;

use structopt::StructOpt;
use truss2d::SolverSettings;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "truss2d",
    about = "Solves a planar pin-jointed truss with the direct stiffness method"
)]
pub struct Options {
    /// JSON file holding the nodes, elements, constraints and loads tables.
    /// The built-in three-bar truss is analysed when omitted.
    #[structopt(short, long, parse(from_os_str))]
    pub input: Option<PathBuf>,

    /// Print the solution as JSON instead of a text report
    #[structopt(long)]
    pub json: bool,

    /// Reject elements with a non-positive area or elastic modulus
    #[structopt(long)]
    pub strict: bool,

    /// Smallest accepted pivot relative to the largest stiffness diagonal
    #[structopt(long, default_value = "1e-12")]
    pub singular_tolerance: f64,
}

impl Options {
    /// Solver settings selected on the command line.
    pub fn settings(&self) -> SolverSettings {
        SolverSettings {
            singular_tolerance: self.singular_tolerance,
            strict_properties: self.strict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_library_settings() {
        let options = Options::from_iter(["truss2d"]);
        assert!(options.input.is_none());
        assert!(!options.json);
        assert_eq!(options.settings(), SolverSettings::default());
    }

    #[test]
    fn flags_map_onto_settings() {
        let options = Options::from_iter([
            "truss2d",
            "--input",
            "bridge.json",
            "--strict",
            "--singular-tolerance",
            "1e-9",
        ]);
        assert_eq!(options.input, Some(PathBuf::from("bridge.json")));
        let settings = options.settings();
        assert!(settings.strict_properties);
        assert_eq!(settings.singular_tolerance, 1.0e-9);
    }
}
