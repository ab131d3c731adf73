//___________________________________TESTS____________________________________

#[cfg(test)]
mod tests {
    use crate::symbolic::symbolic_engine::Expr;

    fn x() -> Expr {
        Expr::Var("x".to_string())
    }

    #[test]
    fn test_operator_overloading() {
        let expr = x() + Expr::Const(2.0);
        let expected = Expr::Add(Box::new(x()), Box::new(Expr::Const(2.0)));
        assert_eq!(expr, expected);

        let expr = x() / Expr::Const(2.0) - x() * x();
        let expected = Expr::Sub(
            Box::new(Expr::Div(Box::new(x()), Box::new(Expr::Const(2.0)))),
            Box::new(Expr::Mul(Box::new(x()), Box::new(x()))),
        );
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_neg() {
        let neg_expr = -x();
        let expected = Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(x()));
        assert_eq!(neg_expr, expected);
        // literals fold into the constant
        assert_eq!(-Expr::Const(2.5), Expr::Const(-2.5));
    }

    #[test]
    fn test_display() {
        let expr = (x() + Expr::Const(1.0)).pow(Expr::Const(3.0));
        assert_eq!(expr.to_string(), "((x + 1) ^ 3)");
        let expr = Expr::tg(x().boxed()) / Expr::Const(0.5);
        assert_eq!(expr.to_string(), "(tg(x) / 0.5)");
        assert_eq!(Expr::Ln(Expr::Exp(x().boxed()).boxed()).to_string(), "ln(exp(x))");
    }

    #[test]
    fn test_from_function_name_aliases() {
        for (alias, canonical) in [
            ("tan", "tg"),
            ("cot", "ctg"),
            ("asin", "arcsin"),
            ("acos", "arccos"),
            ("atan", "arctg"),
            ("arctan", "arctg"),
            ("acot", "arcctg"),
            ("log", "ln"),
        ] {
            assert_eq!(
                Expr::from_function_name(alias, x()),
                Expr::from_function_name(canonical, x()),
                "alias {}",
                alias
            );
        }
        assert_eq!(Expr::from_function_name("sinh", x()), None);
    }

    #[test]
    fn test_extract_variables() {
        let y = Expr::Var("y".to_string());
        let expr = (y.clone() + x()) * Expr::sin(y.boxed()) + Expr::Const(1.0);
        assert_eq!(expr.extract_variables(), vec!["x".to_string(), "y".to_string()]);
        assert!(Expr::Const(3.0).extract_variables().is_empty());
    }

    #[test]
    fn test_unary_argument() {
        assert_eq!(Expr::abs(x().boxed()).unary_argument(), Some(&x()));
        assert_eq!((x() + x()).unary_argument(), None);
    }
}
