mod analysis;
mod cli;
mod conditions;
mod report;

use std::error::Error;
use std::process::ExitCode;

use analysis::{load_problem, render_analysis};
use cli::Options;
use structopt::StructOpt;

fn main() -> ExitCode {
    env_logger::init();
    let options = Options::from_args();

    match run(&options) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> Result<String, Box<dyn Error>> {
    // The input is the four tables of the problem: nodes, elements,
    // constraints and loads. Without a file we fall back to a small truss
    // whose answer can be checked by hand.
    let problem = load_problem(options.input.as_deref())?;
    render_analysis(&problem, options.settings(), options.json)
}
