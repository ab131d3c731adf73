use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::ExpressionEvaluationError;
use std::f64::consts::PI;

/// Compiled form of a single-variable expression.
///
/// Same shape as [`Expr`] but with the variable already bound, so evaluation is
/// a plain tree walk with no name lookups.
#[derive(Clone, Debug)]
pub enum Lambda {
    Arg,
    Const(f64),
    Add(Box<Lambda>, Box<Lambda>),
    Sub(Box<Lambda>, Box<Lambda>),
    Mul(Box<Lambda>, Box<Lambda>),
    Div(Box<Lambda>, Box<Lambda>),
    Pow(Box<Lambda>, Box<Lambda>),
    Exp(Box<Lambda>),
    Ln(Box<Lambda>),
    Sin(Box<Lambda>),
    Cos(Box<Lambda>),
    Tg(Box<Lambda>),
    Ctg(Box<Lambda>),
    ArcSin(Box<Lambda>),
    ArcCos(Box<Lambda>),
    ArcTg(Box<Lambda>),
    ArcCtg(Box<Lambda>),
    Sqrt(Box<Lambda>),
    Abs(Box<Lambda>),
}

impl Expr {
    // LAMBDIFICATION - Converting Symbolic Expressions to Executable Functions

    /// Binds `var` and compiles the tree into a [`Lambda`].
    ///
    /// # Errors
    /// `UnknownIdentifier` for the first variable (in alphabetical order) that is
    /// not `var`.
    pub fn compile(&self, var: &str) -> Result<Lambda, ExpressionEvaluationError> {
        if let Some(stranger) = self.extract_variables().into_iter().find(|name| name != var) {
            return Err(ExpressionEvaluationError::UnknownIdentifier(stranger));
        }
        Ok(self.compile_bound())
    }

    fn compile_bound(&self) -> Lambda {
        let c = |e: &Expr| Box::new(e.compile_bound());
        match self {
            Expr::Var(_) => Lambda::Arg,
            Expr::Const(v) => Lambda::Const(*v),
            Expr::Add(a, b) => Lambda::Add(c(a), c(b)),
            Expr::Sub(a, b) => Lambda::Sub(c(a), c(b)),
            Expr::Mul(a, b) => Lambda::Mul(c(a), c(b)),
            Expr::Div(a, b) => Lambda::Div(c(a), c(b)),
            Expr::Pow(a, b) => Lambda::Pow(c(a), c(b)),
            Expr::Exp(e) => Lambda::Exp(c(e)),
            Expr::Ln(e) => Lambda::Ln(c(e)),
            Expr::sin(e) => Lambda::Sin(c(e)),
            Expr::cos(e) => Lambda::Cos(c(e)),
            Expr::tg(e) => Lambda::Tg(c(e)),
            Expr::ctg(e) => Lambda::Ctg(c(e)),
            Expr::arcsin(e) => Lambda::ArcSin(c(e)),
            Expr::arccos(e) => Lambda::ArcCos(c(e)),
            Expr::arctg(e) => Lambda::ArcTg(c(e)),
            Expr::arcctg(e) => Lambda::ArcCtg(c(e)),
            Expr::sqrt(e) => Lambda::Sqrt(c(e)),
            Expr::abs(e) => Lambda::Abs(c(e)),
        }
    }

    /// Converts a single-variable symbolic expression into an executable Rust closure.
    ///
    /// The resulting closure can be called repeatedly with different input values.
    /// Non-finite results (division by zero, logarithm of a negative number) are
    /// returned as ordinary `f64` values.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::Var("x".to_string());
    /// let f = x.pow(Expr::Const(2.0)); // x^2
    /// let func = f.lambdify1D("x").unwrap();
    /// assert_eq!(func(3.0), 9.0);
    /// ```
    pub fn lambdify1D(
        &self,
        var: &str,
    ) -> Result<Box<dyn Fn(f64) -> f64 + Send + Sync>, ExpressionEvaluationError> {
        let compiled = self.compile(var)?;
        Ok(Box::new(compiled.as_closure()))
    }

    /// Evaluates the expression at `var = x` without building a closure.
    pub fn eval_at(&self, var: &str, x: f64) -> Result<f64, ExpressionEvaluationError> {
        Ok(self.compile(var)?.eval(x))
    }
}

impl Lambda {
    #[inline(always)]
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Lambda::Arg => x,
            Lambda::Const(v) => *v,
            Lambda::Add(a, b) => a.eval(x) + b.eval(x),
            Lambda::Sub(a, b) => a.eval(x) - b.eval(x),
            Lambda::Mul(a, b) => a.eval(x) * b.eval(x),
            Lambda::Div(a, b) => a.eval(x) / b.eval(x),
            Lambda::Pow(a, b) => a.eval(x).powf(b.eval(x)),
            Lambda::Exp(e) => e.eval(x).exp(),
            Lambda::Ln(e) => e.eval(x).ln(),
            Lambda::Sin(e) => e.eval(x).sin(),
            Lambda::Cos(e) => e.eval(x).cos(),
            Lambda::Tg(e) => e.eval(x).tan(),
            Lambda::Ctg(e) => 1.0 / e.eval(x).tan(),
            Lambda::ArcSin(e) => e.eval(x).asin(),
            Lambda::ArcCos(e) => e.eval(x).acos(),
            Lambda::ArcTg(e) => e.eval(x).atan(),
            Lambda::ArcCtg(e) => (PI / 2.0) - e.eval(x).atan(),
            Lambda::Sqrt(e) => e.eval(x).sqrt(),
            Lambda::Abs(e) => e.eval(x).abs(),
        }
    }

    pub fn as_closure(self) -> impl Fn(f64) -> f64 + Send + Sync {
        move |x| self.eval(x)
    }
}
