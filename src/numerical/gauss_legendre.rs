//! Fixed-order Gauss-Legendre quadrature on a finite interval.
//!
//! The integral over [a, b] is mapped onto the reference interval [-1, 1] by the
//! affine change of variable `x = mid + half * t` with `mid = (a + b) / 2` and
//! `half = (b - a) / 2`:
//!
//! ∫ₐᵇ f(x) dx ≈ half · Σ wᵢ f(mid + half · tᵢ)
//!
//! An n-point rule is exact for polynomials of degree up to 2n - 1. Only the
//! 2- and 3-point rules are provided; [`GaussOrder`] is a closed enum, so an
//! unsupported order is rejected when it is converted from an integer and can
//! never reach the summation.
//!
//! # Example
//! ```
//! use RustedGaussQuad::numerical::gauss_legendre::{integrate, format_result, GaussOrder};
//! let value = integrate("x^2 + 2x + 1", 0.0, 1.0, GaussOrder::Two).unwrap();
//! assert_eq!(format_result(value), "2.33333333");
//! ```
use crate::symbolic::parse_expr::parse_expression_func;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::ExpressionEvaluationError;
use log::{debug, info};
use strum_macros::{Display, EnumIter};
use thiserror::Error;

/// name of the integration variable in user formulas
pub const ARGUMENT: &str = "x";
/// number of curve samples when the caller does not choose one
pub const DEFAULT_SAMPLE_POINTS: usize = 101;
/// upper bound on the number of curve samples
pub const MAX_SAMPLE_POINTS: usize = 1_000_000;

// (abscissa, weight) on [-1, 1]: ±1/√3 with unit weights
const GAUSS_LEGENDRE_2: [(f64, f64); 2] = [
    (-0.5773502691896257, 1.0),
    (0.5773502691896257, 1.0),
];
// 0 with weight 8/9, ±√(3/5) with weight 5/9
const GAUSS_LEGENDRE_3: [(f64, f64); 3] = [
    (0.0, 0.8888888888888888),
    (-0.7745966692414834, 0.5555555555555556),
    (0.7745966692414834, 0.5555555555555556),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum GaussOrder {
    #[strum(to_string = "2-point Gauss-Legendre")]
    Two,
    #[strum(to_string = "3-point Gauss-Legendre")]
    Three,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported Gauss-Legendre order {0}: only 2 and 3 point rules are available")]
pub struct UnsupportedOrder(pub usize);

impl GaussOrder {
    /// number of evaluation points n
    pub fn points(&self) -> usize {
        match self {
            GaussOrder::Two => 2,
            GaussOrder::Three => 3,
        }
    }

    /// (abscissa, weight) pairs on the reference interval, in summation order
    pub fn nodes(&self) -> &'static [(f64, f64)] {
        match self {
            GaussOrder::Two => &GAUSS_LEGENDRE_2,
            GaussOrder::Three => &GAUSS_LEGENDRE_3,
        }
    }

    /// highest polynomial degree integrated exactly, 2n - 1
    pub fn exact_degree(&self) -> usize {
        2 * self.points() - 1
    }
}

impl TryFrom<usize> for GaussOrder {
    type Error = UnsupportedOrder;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        match n {
            2 => Ok(GaussOrder::Two),
            3 => Ok(GaussOrder::Three),
            other => Err(UnsupportedOrder(other)),
        }
    }
}

/// One row of the quadrature sum, kept for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraturePoint {
    /// abscissa on [-1, 1]
    pub reference: f64,
    /// abscissa mapped onto [a, b]
    pub x: f64,
    pub weight: f64,
    pub fx: f64,
}

/// Applies the rule to an already compiled integrand.
pub fn integrate_fn<F>(f: F, a: f64, b: f64, order: GaussOrder) -> f64
where
    F: Fn(f64) -> f64,
{
    let mid = (a + b) / 2.0;
    let half = (b - a) / 2.0;
    let sum = order
        .nodes()
        .iter()
        .fold(0.0, |acc, &(t, w)| acc + w * f(mid + half * t));
    half * sum
}

/// Same sum as [`integrate_fn`], but returns every term instead of the total.
pub fn quadrature_points<F>(f: F, a: f64, b: f64, order: GaussOrder) -> Vec<QuadraturePoint>
where
    F: Fn(f64) -> f64,
{
    let mid = (a + b) / 2.0;
    let half = (b - a) / 2.0;
    order
        .nodes()
        .iter()
        .map(|&(t, w)| {
            let x = mid + half * t;
            QuadraturePoint {
                reference: t,
                x,
                weight: w,
                fx: f(x),
            }
        })
        .collect()
}

/// Integrates a formula in `x` over [a, b].
///
/// The formula is parsed and compiled once, then evaluated at the n nodes.
/// Infinite or NaN values of the integrand propagate into the result; only a
/// formula that cannot be parsed or bound is an error.
pub fn integrate(
    expression: &str,
    a: f64,
    b: f64,
    order: GaussOrder,
) -> Result<f64, ExpressionEvaluationError> {
    let expr = parse_expression_func(expression)?;
    let result = expr.gauss_legendre(ARGUMENT, a, b, order)?;
    debug!(
        "∫[{}, {}] {} dx = {} ({})",
        a, b, expression, result, order
    );
    Ok(result)
}

/// Samples the integrand for plotting with a fixed step `(b - a) / (point_count - 1)`.
///
/// The abscissa is accumulated by repeated addition of the step, starting at `a`,
/// and sampling stops once it passes `b`; half a step of slack absorbs the
/// rounding collected along the way, so ordinary intervals get exactly
/// `point_count` samples and the last abscissa can differ from `b` by a few ulps.
/// Never returns more than `point_count` samples, and never more than
/// [`MAX_SAMPLE_POINTS`].
pub fn sample_fn<F>(f: F, a: f64, b: f64, point_count: usize) -> Vec<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    match point_count {
        0 => return Vec::new(),
        1 => return vec![(a, f(a))],
        _ => {}
    }
    let step = (b - a) / (point_count as f64 - 1.0);
    let slack = step.abs() / 2.0;
    let limit = point_count.min(MAX_SAMPLE_POINTS);
    let mut samples = Vec::with_capacity(limit);
    let mut x = a;
    while samples.len() < limit {
        let past_end = if step >= 0.0 { x > b + slack } else { x < b - slack };
        if past_end {
            break;
        }
        samples.push((x, f(x)));
        x += step;
    }
    samples
}

/// Parses a formula in `x` and samples it over [a, b], see [`sample_fn`].
///
/// A formula that fails to compile yields an error and no samples at all.
pub fn sample_curve(
    expression: &str,
    a: f64,
    b: f64,
    point_count: usize,
) -> Result<Vec<(f64, f64)>, ExpressionEvaluationError> {
    let expr = parse_expression_func(expression)?;
    let f = expr.lambdify1D(ARGUMENT)?;
    let samples = sample_fn(f, a, b, point_count);
    info!(
        "sampled {} on [{}, {}]: {} points",
        expression,
        a,
        b,
        samples.len()
    );
    Ok(samples)
}

/// Fixed-point text with exactly 8 digits after the decimal point.
pub fn format_result(value: f64) -> String {
    format!("{:.8}", value)
}

impl Expr {
    /// Numerical integration of a single-variable expression over a finite interval
    /// by the fixed 2- or 3-point Gauss-Legendre rule.
    ///
    /// # Arguments
    /// * `var` - name of the integration variable
    /// * `lower`, `upper` - interval ends, in any order
    /// * `order` - rule to apply
    pub fn gauss_legendre(
        &self,
        var: &str,
        lower: f64,
        upper: f64,
        order: GaussOrder,
    ) -> Result<f64, ExpressionEvaluationError> {
        let f = self.lambdify1D(var)?;
        Ok(integrate_fn(f, lower, upper, order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_conversion() {
        assert_eq!(GaussOrder::try_from(2), Ok(GaussOrder::Two));
        assert_eq!(GaussOrder::try_from(3), Ok(GaussOrder::Three));
        assert_eq!(GaussOrder::try_from(4), Err(UnsupportedOrder(4)));
        assert_eq!(GaussOrder::try_from(0), Err(UnsupportedOrder(0)));
    }

    #[test]
    fn test_order_properties() {
        assert_eq!(GaussOrder::Two.points(), GaussOrder::Two.nodes().len());
        assert_eq!(GaussOrder::Three.points(), GaussOrder::Three.nodes().len());
        assert_eq!(GaussOrder::Two.exact_degree(), 3);
        assert_eq!(GaussOrder::Three.exact_degree(), 5);
        assert_eq!(GaussOrder::Three.to_string(), "3-point Gauss-Legendre");
    }

    #[test]
    fn test_sample_count_is_capped() {
        let samples = sample_fn(|x| x, 0.0, 1.0, usize::MAX / 8);
        assert_eq!(samples.len(), MAX_SAMPLE_POINTS);
        assert_eq!(samples[0], (0.0, 0.0));
        // a NaN bound never ends the grid on its own
        let samples = sample_fn(|x| x, 0.0, f64::NAN, 20);
        assert_eq!(samples.len(), 20);
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(1.0), "1.00000000");
        assert_eq!(format_result(-0.125), "-0.12500000");
        assert_eq!(format_result(1.0 / 3.0), "0.33333333");
        assert_eq!(format_result(123456.0), "123456.00000000");
        assert_eq!(format_result(f64::INFINITY), "inf");
    }
}
