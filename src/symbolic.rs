#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// rewrites caret exponents and digit-letter juxtaposition in a raw formula
///
///# Example
/// ```
/// use RustedGaussQuad::symbolic::normalize::normalize;
/// assert_eq!(normalize("2x^2 - 4x + 1"), "2*x**2 - 4*x + 1");
/// ```
pub mod normalize;
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedGaussQuad::symbolic::symbolic_engine::Expr;
/// let input = "sin(x) + 2(x+1)^2";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// assert_eq!(parsed_expression.extract_variables(), vec!["x".to_string()]);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds the expression tree of a formula of one variable
/// 2) builds expressions with ordinary operators
/// 3) turns a symbolic expression into a string expression for printing and control results
///# Example#
/// ```
/// use RustedGaussQuad::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let f = x.clone() * x.clone() + Expr::Const(2.0) * x + Expr::Const(1.0);
/// println!("{}", f);
/// let f_at_3 = f.eval_at("x", 3.0).unwrap();
/// assert_eq!(f_at_3, 16.0);
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
mod symbolic_engine_tests;
/// the single error type of parsing and binding a formula
pub mod symbolic_errors;
/// turns a symbolic expression into a Rust closure of one argument
pub mod symbolic_lambdify;
///______________________________________________________________________________________________________________________________________________
/// the collection of utility functions mainly for bracket parsing and proceeding
/// _____________________________________________________________________________________________________________________________________________
pub mod utils;
