#![allow(non_snake_case)]
use RustedGaussQuad::Examples::quadrature_examples::quadrature_examples;
use RustedGaussQuad::numerical::integral_task::IntegralTask;
use std::env;
use std::process::ExitCode;

/// `RustedGaussQuad [task_file]`
/// without a task file the built-in example ∫[0, 1] x*x + 2*x + 1 dx is computed with the 2-point rule
fn main() -> ExitCode {
    let Some(path) = env::args().nth(1) else {
        quadrature_examples(0);
        return ExitCode::SUCCESS;
    };
    match IntegralTask::from_task_file(&path) {
        Ok(mut task) => {
            let report = task.solve();
            println!("{}", report.display);
            if report.value.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("{}: {}", path, e);
            ExitCode::FAILURE
        }
    }
}
