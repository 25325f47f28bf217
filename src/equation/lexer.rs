//! Token stream for equation text.
//!
//! Function names and the `dx`/`dy` differential markers are recognised as atomic tokens, so
//! implicit multiplication can be inserted between value tokens without ever splitting `sin`
//! into `s*i*n` or `dx` into `d*x`.

use std::fmt;

use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit1, one_of, satisfy};
use nom::combinator::{map, opt, recognize, value};
use nom::sequence::pair;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    Sqrt,
    Sin,
    Cos,
    Tan,
    Exp,
    Log,
    Ln,
}

impl Function {
    pub fn name(self) -> &'static str {
        match self {
            Function::Sqrt => "sqrt",
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Exp => "exp",
            Function::Log => "log",
            Function::Ln => "ln",
        }
    }
}

/// Differential marker closing an `M dx` or `N dy` term.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Differential {
    Dx,
    Dy,
}

impl Differential {
    pub fn variable(self) -> &'static str {
        match self {
            Differential::Dx => "x",
            Differential::Dy => "y",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Number(String),
    Ident(char),
    Function(Function),
    Marker(Differential),
    /// One of `+ - * / ^`. `**` is read as `^`.
    Op(char),
    LParen,
    RParen,
    Equals,
    Other(char),
}

impl Token {
    pub fn is_marker(&self) -> bool {
        matches!(self, Token::Marker(_))
    }

    /// Tokens that can close an operand.
    pub fn ends_value(&self) -> bool {
        matches!(self, Token::Number(_) | Token::Ident(_) | Token::RParen)
    }

    /// Tokens that can open an operand. Markers count so that `x dx` becomes `x*dx`.
    pub fn starts_value(&self) -> bool {
        matches!(
            self,
            Token::Number(_) | Token::Ident(_) | Token::Function(_) | Token::LParen | Token::Marker(_)
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(digits) => f.write_str(digits),
            Token::Ident(c) | Token::Op(c) | Token::Other(c) => write!(f, "{c}"),
            Token::Function(func) => f.write_str(func.name()),
            Token::Marker(Differential::Dx) => f.write_str("dx"),
            Token::Marker(Differential::Dy) => f.write_str("dy"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Equals => f.write_str("="),
        }
    }
}

/// Split `input` into tokens. Never fails: characters outside the grammar become
/// [`Token::Other`] and are rejected later by the expression parser.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = input;
    while !rest.is_empty() {
        match token(rest) {
            Ok((next, tok)) => {
                tokens.push(tok);
                rest = next;
            }
            Err(_) => {
                let mut chars = rest.chars();
                if let Some(c) = chars.next() {
                    tokens.push(Token::Other(c));
                }
                rest = chars.as_str();
            }
        }
    }
    tokens
}

pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(ToString::to_string).collect()
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((number, marker, function, ident, operator, punctuation))(input)
}

fn number(input: &str) -> IResult<&str, Token> {
    map(recognize(pair(digit1, opt(pair(char('.'), digit1)))), |s: &str| {
        Token::Number(s.to_string())
    })(input)
}

fn marker(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Marker(Differential::Dx), tag("dx")),
        value(Token::Marker(Differential::Dy), tag("dy")),
    ))(input)
}

fn function(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Function(Function::Sqrt), tag("sqrt")),
        value(Token::Function(Function::Sin), tag("sin")),
        value(Token::Function(Function::Cos), tag("cos")),
        value(Token::Function(Function::Tan), tag("tan")),
        value(Token::Function(Function::Exp), tag("exp")),
        value(Token::Function(Function::Log), tag("log")),
        value(Token::Function(Function::Ln), tag("ln")),
    ))(input)
}

fn ident(input: &str) -> IResult<&str, Token> {
    map(satisfy(|c| c.is_ascii_alphabetic()), Token::Ident)(input)
}

fn operator(input: &str) -> IResult<&str, Token> {
    alt((value(Token::Op('^'), tag("**")), map(one_of("+-*/^"), Token::Op)))(input)
}

fn punctuation(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::LParen, char('(')),
        value(Token::RParen, char(')')),
        value(Token::Equals, char('=')),
    ))(input)
}
