//! a module turns a String expression into a symbolic expression
//!# Example
//! ```
//! use RustedGaussQuad::symbolic::symbolic_engine::Expr;
//! let parsed_expression = Expr::parse_expression("x^2 + 2x + 1").unwrap();
//! let f = parsed_expression.lambdify1D("x").unwrap();
//! assert_eq!(f(1.0), 4.0);
//! ```
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::ExpressionEvaluationError;
use crate::symbolic::utils::find_unbalanced_bracket;
use log::debug;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit0, digit1, one_of},
    combinator::{opt, recognize, value},
    multi::many0,
    sequence::pair,
};
use std::fmt;
//
// Grammar, from the loosest binding to the tightest:
//
//   sum     := product (('+' | '-') product)*
//   product := unary (('*' | '/') unary | <implicit> power)*
//   unary   := ('+' | '-') unary | power
//   power   := primary (('^' | '**') unary)?
//   primary := number | name '(' sum ')' | name | '(' sum ')'
//
// <implicit> applies when a factor is directly followed by a name or '(':
// 2x, 2(x+1), (x+1)(x-1). Exponentiation is right-associative and binds
// tighter than unary minus, so -x^2 = -(x^2) and 2^3^2 = 2^9.

/// deepest allowed nesting of brackets, function calls, signs and exponents
pub const MAX_NESTING: usize = 256;
/// tallest allowed expression tree, operator chains included
pub const MAX_TREE_HEIGHT: usize = 1024;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    /// both `^` and `**`
    Power,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(val) => write!(f, "{}", val),
            Token::Ident(name) => write!(f, "{}", name),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Power => write!(f, "^"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

/// token together with its byte offset in the source text
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub pos: usize,
}

/// 12, 1.5, 1., .5, 2e-3
fn number_literal(input: &str) -> IResult<&str, &str> {
    let mantissa = alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ));
    let exponent = opt((one_of("eE"), opt(one_of("+-")), digit1));
    recognize(pair(mantissa, exponent)).parse(input)
}

/// names start with a letter or underscore
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

fn operator(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Power, tag("**")),
        value(Token::Power, tag("^")),
        value(Token::Star, tag("*")),
        value(Token::Slash, tag("/")),
        value(Token::Plus, tag("+")),
        value(Token::Minus, tag("-")),
        value(Token::LParen, tag("(")),
        value(Token::RParen, tag(")")),
    ))
    .parse(input)
}

/// Splits the input into tokens, skipping whitespace.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, ExpressionEvaluationError> {
    let mut tokens = Vec::new();
    let mut rest = input;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        let pos = input.len() - rest.len();
        if let Ok((after, literal)) = number_literal(rest) {
            let val = literal
                .parse::<f64>()
                .map_err(|_| ExpressionEvaluationError::InvalidNumber {
                    literal: literal.to_string(),
                    pos,
                })?;
            tokens.push(Spanned {
                token: Token::Number(val),
                pos,
            });
            rest = after;
        } else if let Ok((after, name)) = identifier(rest) {
            tokens.push(Spanned {
                token: Token::Ident(name.to_string()),
                pos,
            });
            rest = after;
        } else if let Ok((after, token)) = operator(rest) {
            tokens.push(Spanned { token, pos });
            rest = after;
        } else {
            let ch = rest.chars().next().unwrap_or('\0');
            return Err(ExpressionEvaluationError::UnexpectedChar { ch, pos });
        }
    }
    Ok(tokens)
}

struct ExprParser {
    tokens: Vec<Spanned>,
    idx: usize,
    /// current recursion depth of the descent
    depth: usize,
    /// height of the tree built along the current path
    height: usize,
}

impl ExprParser {
    fn new(tokens: Vec<Spanned>) -> Self {
        ExprParser {
            tokens,
            idx: 0,
            depth: 0,
            height: 0,
        }
    }

    fn too_deep(&self) -> ExpressionEvaluationError {
        let pos = self
            .tokens
            .get(self.idx)
            .or(self.tokens.last())
            .map_or(0, |s| s.pos);
        ExpressionEvaluationError::TooDeep { pos }
    }

    /// one more level of recursion, checked before descending
    fn nest(&mut self) -> Result<(usize, usize), ExpressionEvaluationError> {
        let mark = (self.depth, self.height);
        self.depth += 1;
        self.height += 1;
        if self.depth > MAX_NESTING || self.height > MAX_TREE_HEIGHT {
            return Err(self.too_deep());
        }
        Ok(mark)
    }

    /// one more binary node on top of a left-associative chain
    fn chain(&mut self) -> Result<(), ExpressionEvaluationError> {
        self.height += 1;
        if self.height > MAX_TREE_HEIGHT {
            return Err(self.too_deep());
        }
        Ok(())
    }

    fn restore(&mut self, (depth, height): (usize, usize)) {
        self.depth = depth;
        self.height = height;
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.idx).map(|s| &s.token)
    }

    fn next(&mut self) -> Option<Spanned> {
        let spanned = self.tokens.get(self.idx).cloned();
        if spanned.is_some() {
            self.idx += 1;
        }
        spanned
    }

    fn unexpected(spanned: Option<Spanned>) -> ExpressionEvaluationError {
        match spanned {
            Some(Spanned { token, pos }) => ExpressionEvaluationError::UnexpectedToken {
                token: token.to_string(),
                pos,
            },
            None => ExpressionEvaluationError::UnexpectedEnd,
        }
    }

    fn expect_rparen(&mut self) -> Result<(), ExpressionEvaluationError> {
        match self.next() {
            Some(Spanned {
                token: Token::RParen,
                ..
            }) => Ok(()),
            other => Err(Self::unexpected(other)),
        }
    }

    fn parse_sum(&mut self) -> Result<Expr, ExpressionEvaluationError> {
        let mark = (self.depth, self.height);
        let mut lhs = self.parse_product()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.idx += 1;
                    self.chain()?;
                    lhs = lhs + self.parse_product()?;
                }
                Some(Token::Minus) => {
                    self.idx += 1;
                    self.chain()?;
                    lhs = lhs - self.parse_product()?;
                }
                _ => {
                    self.restore(mark);
                    return Ok(lhs);
                }
            }
        }
    }

    fn parse_product(&mut self) -> Result<Expr, ExpressionEvaluationError> {
        let mark = (self.depth, self.height);
        let mut lhs = self.parse_unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.idx += 1;
                    self.chain()?;
                    lhs = lhs * self.parse_unary()?;
                }
                Some(Token::Slash) => {
                    self.idx += 1;
                    self.chain()?;
                    lhs = lhs / self.parse_unary()?;
                }
                // juxtaposition: 2x, 2(x+1), (x+1)(x-1)
                Some(Token::Ident(_)) | Some(Token::LParen) => {
                    self.chain()?;
                    lhs = lhs * self.parse_power()?;
                }
                _ => {
                    self.restore(mark);
                    return Ok(lhs);
                }
            }
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, ExpressionEvaluationError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.idx += 1;
                let mark = self.nest()?;
                let operand = self.parse_unary()?;
                self.restore(mark);
                Ok(-operand)
            }
            Some(Token::Plus) => {
                self.idx += 1;
                let mark = self.nest()?;
                let operand = self.parse_unary()?;
                self.restore(mark);
                Ok(operand)
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<Expr, ExpressionEvaluationError> {
        let base = self.parse_primary()?;
        if let Some(Token::Power) = self.peek() {
            self.idx += 1;
            let mark = self.nest()?;
            let exponent = self.parse_unary()?;
            self.restore(mark);
            return Ok(base.pow(exponent));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr, ExpressionEvaluationError> {
        let spanned = self.next();
        match spanned {
            Some(Spanned {
                token: Token::Number(val),
                ..
            }) => Ok(Expr::Const(val)),
            Some(Spanned {
                token: Token::Ident(name),
                pos,
            }) => {
                if let Some(Token::LParen) = self.peek() {
                    self.idx += 1;
                    let mark = self.nest()?;
                    let arg = self.parse_sum()?;
                    self.expect_rparen()?;
                    self.restore(mark);
                    Expr::from_function_name(&name, arg)
                        .ok_or(ExpressionEvaluationError::UnknownFunction { name, pos })
                } else {
                    Ok(Expr::Var(name))
                }
            }
            Some(Spanned {
                token: Token::LParen,
                ..
            }) => {
                let mark = self.nest()?;
                let inner = self.parse_sum()?;
                self.expect_rparen()?;
                self.restore(mark);
                Ok(inner)
            }
            other => Err(Self::unexpected(other)),
        }
    }
}

/// Parses a formula into an [`Expr`].
///
/// Accepts `^` and `**` for powers, implicit multiplication (`2x`, `3(x+1)`) and
/// the functions listed in [`Expr::from_function_name`].
pub fn parse_expression_func(input: &str) -> Result<Expr, ExpressionEvaluationError> {
    if input.trim().is_empty() {
        return Err(ExpressionEvaluationError::Empty);
    }
    if let Some(pos) = find_unbalanced_bracket(input) {
        return Err(ExpressionEvaluationError::UnbalancedParen { pos });
    }
    let tokens = tokenize(input)?;
    debug!("'{}' split into {} tokens", input, tokens.len());
    let mut parser = ExprParser::new(tokens);
    let expr = parser.parse_sum()?;
    match parser.next() {
        None => Ok(expr),
        trailing => Err(ExprParser::unexpected(trailing)),
    }
}

impl Expr {
    /// Parses a formula, see [`parse_expression_func`].
    pub fn parse_expression(input: &str) -> Result<Expr, ExpressionEvaluationError> {
        parse_expression_func(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    #[test]
    fn test_tokenize() {
        let tokens: Vec<Token> = tokenize("2.5*x ** 2 - .5e1")
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::Number(2.5),
                Token::Star,
                Token::Ident("x".to_string()),
                Token::Power,
                Token::Number(2.0),
                Token::Minus,
                Token::Number(5.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_positions() {
        let tokens = tokenize("  x +  10").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|s| s.pos).collect();
        assert_eq!(positions, vec![2, 4, 7]);
    }

    #[test]
    fn test_tokenize_number_before_name() {
        // "2exp" is a number followed by a name, not a malformed exponent
        let tokens = tokenize("2exp(x)").unwrap();
        assert_eq!(tokens[0].token, Token::Number(2.0));
        assert_eq!(tokens[1].token, Token::Ident("exp".to_string()));
    }

    #[test]
    fn test_parse_constant() {
        assert_eq!(parse_expression_func("42").unwrap(), Expr::Const(42.0));
    }

    #[test]
    fn test_parse_variable() {
        assert_eq!(parse_expression_func("x").unwrap(), var("x"));
    }

    #[test]
    fn test_parse_addition() {
        let expr = parse_expression_func("x + 2").unwrap();
        assert_eq!(expr, var("x") + Expr::Const(2.0));
    }

    #[test]
    fn test_left_associativity() {
        let expr = parse_expression_func("x^2 - x - 1").unwrap();
        let x = var("x");
        let expected = x.clone().pow(Expr::Const(2.0)) - x - Expr::Const(1.0);
        assert_eq!(expr, expected);
        let expr = parse_expression_func("x / 2 / 4").unwrap();
        assert_eq!(expr, var("x") / Expr::Const(2.0) / Expr::Const(4.0));
    }

    #[test]
    fn test_precedence() {
        let expr = parse_expression_func("1 + 2 * x").unwrap();
        assert_eq!(expr, Expr::Const(1.0) + Expr::Const(2.0) * var("x"));
        let expr = parse_expression_func("(x + y) * z").unwrap();
        assert_eq!(expr, (var("x") + var("y")) * var("z"));
    }

    #[test]
    fn test_power_forms() {
        let caret = parse_expression_func("x^2").unwrap();
        let stars = parse_expression_func("x**2").unwrap();
        assert_eq!(caret, var("x").pow(Expr::Const(2.0)));
        assert_eq!(caret, stars);
        // right associative
        let expr = parse_expression_func("2^3^2").unwrap();
        assert_eq!(
            expr,
            Expr::Const(2.0).pow(Expr::Const(3.0).pow(Expr::Const(2.0)))
        );
        // parenthesised base
        let expr = parse_expression_func("(x+1)^3").unwrap();
        assert_eq!(expr, (var("x") + Expr::Const(1.0)).pow(Expr::Const(3.0)));
    }

    #[test]
    fn test_unary_minus() {
        let expr = parse_expression_func("-x^2").unwrap();
        assert_eq!(expr, -(var("x").pow(Expr::Const(2.0))));
        assert_eq!(parse_expression_func("-3").unwrap(), Expr::Const(-3.0));
        let expr = parse_expression_func("2^-1").unwrap();
        assert_eq!(expr, Expr::Const(2.0).pow(Expr::Const(-1.0)));
        let expr = parse_expression_func("x - -1").unwrap();
        assert_eq!(expr, var("x") - Expr::Const(-1.0));
    }

    #[test]
    fn test_implicit_multiplication() {
        let expr = parse_expression_func("2x").unwrap();
        assert_eq!(expr, Expr::Const(2.0) * var("x"));
        let expr = parse_expression_func("2x^2").unwrap();
        assert_eq!(expr, Expr::Const(2.0) * var("x").pow(Expr::Const(2.0)));
        let expr = parse_expression_func("(x+1)(x-1)").unwrap();
        assert_eq!(
            expr,
            (var("x") + Expr::Const(1.0)) * (var("x") - Expr::Const(1.0))
        );
        let expr = parse_expression_func("3sin(x)").unwrap();
        assert_eq!(expr, Expr::Const(3.0) * Expr::sin(var("x").boxed()));
    }

    #[test]
    fn test_parse_functions() {
        assert_eq!(
            parse_expression_func("exp(x)").unwrap(),
            Expr::Exp(var("x").boxed())
        );
        assert_eq!(
            parse_expression_func("log(x)").unwrap(),
            Expr::Ln(var("x").boxed())
        );
        assert_eq!(
            parse_expression_func("tan(x)").unwrap(),
            Expr::tg(var("x").boxed())
        );
        assert_eq!(
            parse_expression_func("sin(cos(x))").unwrap(),
            Expr::sin(Expr::cos(var("x").boxed()).boxed())
        );
    }

    #[test]
    fn test_invalid_syntax() {
        let err = parse_expression_func("x +* 1").unwrap_err();
        assert_eq!(
            err,
            ExpressionEvaluationError::UnexpectedToken {
                token: "*".to_string(),
                pos: 3
            }
        );
        assert_eq!(
            parse_expression_func("x +").unwrap_err(),
            ExpressionEvaluationError::UnexpectedEnd
        );
        assert!(parse_expression_func("x 2").is_err());
        assert!(parse_expression_func("()").is_err());
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |d: usize| format!("{}x{}", "(".repeat(d), ")".repeat(d));
        assert_eq!(parse_expression_func(&nested(200)).unwrap(), var("x"));
        for d in [600, 20_000, 200_000] {
            let err = parse_expression_func(&nested(d)).unwrap_err();
            assert!(matches!(err, ExpressionEvaluationError::TooDeep { .. }));
        }
        let signs = format!("{}x", "-".repeat(200_000));
        assert!(matches!(
            parse_expression_func(&signs).unwrap_err(),
            ExpressionEvaluationError::TooDeep { .. }
        ));
        let calls = format!("{}x{}", "sin(".repeat(5_000), ")".repeat(5_000));
        assert!(matches!(
            parse_expression_func(&calls).unwrap_err(),
            ExpressionEvaluationError::TooDeep { .. }
        ));
        let tower = vec!["2"; 5_000].join("^");
        assert!(matches!(
            parse_expression_func(&tower).unwrap_err(),
            ExpressionEvaluationError::TooDeep { .. }
        ));
    }

    #[test]
    fn test_long_chains() {
        // a long sum builds a tall left-leaning tree
        let sum = vec!["x"; 500].join(" + ");
        let f = parse_expression_func(&sum).unwrap().lambdify1D("x").unwrap();
        assert_eq!(f(2.0), 1000.0);
        let sum = vec!["x"; 100_000].join(" + ");
        assert!(matches!(
            parse_expression_func(&sum).unwrap_err(),
            ExpressionEvaluationError::TooDeep { .. }
        ));
        let product = vec!["x"; 100_000].join(" ");
        assert!(matches!(
            parse_expression_func(&product).unwrap_err(),
            ExpressionEvaluationError::TooDeep { .. }
        ));
    }

    #[test]
    fn test_unmatched_brackets() {
        assert_eq!(
            parse_expression_func("(x + y").unwrap_err(),
            ExpressionEvaluationError::UnbalancedParen { pos: 0 }
        );
        assert_eq!(
            parse_expression_func("x)").unwrap_err(),
            ExpressionEvaluationError::UnbalancedParen { pos: 1 }
        );
    }

    #[test]
    fn test_unknown_function_and_char() {
        assert_eq!(
            parse_expression_func("foo(x)").unwrap_err(),
            ExpressionEvaluationError::UnknownFunction {
                name: "foo".to_string(),
                pos: 0
            }
        );
        assert_eq!(
            parse_expression_func("x # 2").unwrap_err(),
            ExpressionEvaluationError::UnexpectedChar { ch: '#', pos: 2 }
        );
        assert_eq!(
            parse_expression_func("   ").unwrap_err(),
            ExpressionEvaluationError::Empty
        );
    }

    #[test]
    fn test_display_parses_back() {
        let expr = parse_expression_func("-2x^3 + sqrt(x)/(1 + x) - ln(x)").unwrap();
        let reparsed = parse_expression_func(&expr.to_string()).unwrap();
        assert_eq!(expr, reparsed);
    }
}
