// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::numerical::gauss_legendre::{
    DEFAULT_SAMPLE_POINTS, GaussOrder, format_result, integrate, sample_curve,
};
use crate::numerical::integral_task::{EXPRESSION_ERROR_MESSAGE, IntegralTask};
use crate::symbolic::normalize::normalize;
use crate::symbolic::symbolic_engine::Expr;
use simplelog::LevelFilter;
use strum::IntoEnumIterator;

pub fn quadrature_examples(example: usize) {
    match example {
        0 => {
            // the shortest way: formula, interval, default 2-point rule
            let mut task = IntegralTask::new("x*x + 2*x + 1", 0.0, 1.0);
            let report = task.solve();
            println!("∫[0, 1] x*x + 2*x + 1 dx = {}", report.display);
        }
        1 => {
            // same integrand with both rules; 3-point is exact up to degree 5
            let raw = "x^4 - 2x + 1";
            let normalized = normalize(raw);
            println!("{} normalized into {}", raw, normalized);
            for order in GaussOrder::iter() {
                match integrate(&normalized, 0.0, 2.0, order) {
                    Ok(value) => println!("{}: {}", order, format_result(value)),
                    Err(e) => println!("{}: {}", order, e),
                }
            }
            println!("exact: {}", format_result(32.0 / 5.0 - 4.0 + 2.0));
        }
        2 => {
            // sample the curve and export it as csv, txt and png
            let mut task = IntegralTask::new("sin(x) * exp(-x/3)", 0.0, 6.0)
                .with_order(GaussOrder::Three)
                .with_points(DEFAULT_SAMPLE_POINTS)
                .with_plot(true)
                .with_csv(true)
                .with_txt(true)
                .with_output("damped_sine");
            let report = task.solve();
            println!("integral = {}, {} samples", report.display, report.samples.len());
        }
        3 => {
            // a malformed formula never produces a number
            match integrate("x +* 1", 0.0, 1.0, GaussOrder::Two) {
                Ok(value) => println!("unexpected value {}", value),
                Err(e) => println!("{} ({})", EXPRESSION_ERROR_MESSAGE, e),
            }
            match sample_curve("2x + y", 0.0, 1.0, 5) {
                Ok(samples) => println!("unexpected samples {:?}", samples),
                Err(e) => println!("{} ({})", EXPRESSION_ERROR_MESSAGE, e),
            }
        }
        4 => {
            // task described by a document
            let document = r#"
            integral
              function: "(x+1)^3"
              a: 0
              b: 1
              order: 2
              points: 5
              loglevel: info
            "#;
            match document.parse::<IntegralTask>() {
                Ok(mut task) => {
                    let report = task.solve();
                    println!("{} with samples {:?}", report.display, report.samples);
                }
                Err(e) => println!("{}", e),
            }
        }
        5 => {
            // working with the expression tree directly
            match Expr::parse_expression("2x^3 - x") {
                Ok(expr) => {
                    println!("parsed: {}", expr);
                    println!("variables: {:?}", expr.extract_variables());
                    if let Ok(value) = expr.gauss_legendre("x", -1.0, 2.0, GaussOrder::Two) {
                        println!("∫[-1, 2] = {}", format_result(value));
                    }
                    let mut task = IntegralTask::new(&expr.to_string(), -1.0, 2.0)
                        .with_loglevel(LevelFilter::Off);
                    println!("from display form: {}", task.solve().display);
                }
                Err(e) => println!("{}", e),
            }
        }
        _ => {
            println!("examples 0..=5");
        }
    }
}
