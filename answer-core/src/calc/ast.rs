//! Expression tree and its post-order evaluation

use std::fmt;

use crate::error::{AnswerError, Result};

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl BinaryOp {
    pub fn symbol(&self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Rem => '%',
            BinaryOp::Pow => '^',
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Neg,
}

/// Expression node; built once per evaluation and dropped with it
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Group(Box<Expr>),
}

impl Expr {
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Post-order evaluation
    ///
    /// `/` and `%` fail with `DivisionByZero` when the right operand is 0;
    /// `%` follows `fmod` semantics (result takes the sign of the dividend).
    pub fn eval(&self) -> Result<f64> {
        match self {
            Expr::Number(v) => Ok(*v),
            Expr::Group(inner) => inner.eval(),
            Expr::Unary { op, operand } => {
                let v = operand.eval()?;
                Ok(match op {
                    UnaryOp::Plus => v,
                    UnaryOp::Neg => -v,
                })
            }
            Expr::Binary { op, lhs, rhs } => {
                let l = lhs.eval()?;
                let r = rhs.eval()?;
                match op {
                    BinaryOp::Add => Ok(l + r),
                    BinaryOp::Sub => Ok(l - r),
                    BinaryOp::Mul => Ok(l * r),
                    BinaryOp::Div if r == 0.0 => Err(AnswerError::DivisionByZero),
                    BinaryOp::Div => Ok(l / r),
                    BinaryOp::Rem if r == 0.0 => Err(AnswerError::DivisionByZero),
                    BinaryOp::Rem => Ok(l % r),
                    BinaryOp::Pow => Ok(l.powf(r)),
                }
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(v) => write!(f, "{}", v),
            Expr::Group(inner) => write!(f, "({})", inner),
            Expr::Unary { op: UnaryOp::Plus, operand } => write!(f, "+{}", operand),
            Expr::Unary { op: UnaryOp::Neg, operand } => write!(f, "-{}", operand),
            Expr::Binary { op, lhs, rhs } => write!(f, "{} {} {}", lhs, op.symbol(), rhs),
        }
    }
}
