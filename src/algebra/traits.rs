//! Operator capabilities for graph-wrapping entities.
//!
//! `+ - * /`, `& | ^`, unary `-` and `!` come from `std::ops`. The families below cover the
//! operators Rust has no overloadable syntax for. Every method emits a new node; nothing is
//! evaluated.

use crate::algebra::operand::{Combine, Entity, Operand};
use crate::algebra::ops::{BinaryOp, UnaryOp, binary, unary};

/// Floor division.
pub trait FloorDiv: Entity {
    /// `floor(self / rhs)`
    fn floor_div<R>(&self, rhs: R) -> <Self as Combine<R>>::Output
    where
        Self: Combine<R>,
        R: Into<Operand>,
    {
        binary(BinaryOp::FloorDiv, self.clone(), rhs)
    }
}

/// Exponentiation.
pub trait Exponentiate: Entity {
    /// `self ** rhs`
    fn pow<R>(&self, rhs: R) -> <Self as Combine<R>>::Output
    where
        Self: Combine<R>,
        R: Into<Operand>,
    {
        binary(BinaryOp::Pow, self.clone(), rhs)
    }
}

/// Sign manipulation.
pub trait Signed: Entity {
    /// Negation, same as unary `-`.
    fn negate(&self) -> Self {
        unary(UnaryOp::Neg, self)
    }

    /// Unary plus.
    fn positive(&self) -> Self {
        unary(UnaryOp::Pos, self)
    }

    /// Absolute value.
    fn abs(&self) -> Self {
        unary(UnaryOp::Abs, self)
    }
}

/// Element-wise comparisons producing boolean rasters.
pub trait Compare: Entity {
    /// `self > rhs`
    fn gt<R>(&self, rhs: R) -> <Self as Combine<R>>::Output
    where
        Self: Combine<R>,
        R: Into<Operand>,
    {
        binary(BinaryOp::Gt, self.clone(), rhs)
    }

    /// `self >= rhs`
    fn ge<R>(&self, rhs: R) -> <Self as Combine<R>>::Output
    where
        Self: Combine<R>,
        R: Into<Operand>,
    {
        binary(BinaryOp::Ge, self.clone(), rhs)
    }

    /// `self < rhs`
    fn lt<R>(&self, rhs: R) -> <Self as Combine<R>>::Output
    where
        Self: Combine<R>,
        R: Into<Operand>,
    {
        binary(BinaryOp::Lt, self.clone(), rhs)
    }

    /// `self <= rhs`
    fn le<R>(&self, rhs: R) -> <Self as Combine<R>>::Output
    where
        Self: Combine<R>,
        R: Into<Operand>,
    {
        binary(BinaryOp::Le, self.clone(), rhs)
    }

    /// Element-wise `self == rhs`.
    fn equal<R>(&self, rhs: R) -> <Self as Combine<R>>::Output
    where
        Self: Combine<R>,
        R: Into<Operand>,
    {
        binary(BinaryOp::Eq, self.clone(), rhs)
    }

    /// Element-wise `self != rhs`.
    fn not_equal<R>(&self, rhs: R) -> <Self as Combine<R>>::Output
    where
        Self: Combine<R>,
        R: Into<Operand>,
    {
        binary(BinaryOp::Ne, self.clone(), rhs)
    }
}

/// Logical combinators; `&`, `|`, `^` and `!` are the operator forms.
pub trait Logical: Entity {
    /// Logical and.
    fn logical_and<R>(&self, rhs: R) -> <Self as Combine<R>>::Output
    where
        Self: Combine<R>,
        R: Into<Operand>,
    {
        binary(BinaryOp::And, self.clone(), rhs)
    }

    /// Logical or.
    fn logical_or<R>(&self, rhs: R) -> <Self as Combine<R>>::Output
    where
        Self: Combine<R>,
        R: Into<Operand>,
    {
        binary(BinaryOp::Or, self.clone(), rhs)
    }

    /// Logical exclusive or.
    fn logical_xor<R>(&self, rhs: R) -> <Self as Combine<R>>::Output
    where
        Self: Combine<R>,
        R: Into<Operand>,
    {
        binary(BinaryOp::Xor, self.clone(), rhs)
    }

    /// Logical not.
    fn logical_not(&self) -> Self {
        unary(UnaryOp::Invert, self)
    }
}

impl<T: Entity> FloorDiv for T {}
impl<T: Entity> Exponentiate for T {}
impl<T: Entity> Signed for T {}
impl<T: Entity> Compare for T {}
impl<T: Entity> Logical for T {}

#[cfg(test)]
#[path = "../../tests/unit/algebra/traits.rs"]
mod tests;
