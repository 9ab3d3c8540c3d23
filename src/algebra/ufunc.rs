//! Element-wise functions that emit graft nodes.

use crate::algebra::operand::{Combine, Entity, Operand};
use crate::algebra::ops::{BinaryOp, UnaryOp, binary, unary};

/// The circle constant, folded into literals (for example `180.0 / PI`).
pub const PI: f64 = std::f64::consts::PI;

/// Element-wise square root.
pub fn sqrt<T: Entity>(x: &T) -> T {
    unary(UnaryOp::Sqrt, x)
}

/// Element-wise square.
pub fn square<T: Entity>(x: &T) -> T {
    unary(UnaryOp::Square, x)
}

/// Element-wise natural exponential.
pub fn exp<T: Entity>(x: &T) -> T {
    unary(UnaryOp::Exp, x)
}

/// Element-wise natural logarithm.
pub fn log<T: Entity>(x: &T) -> T {
    unary(UnaryOp::Log, x)
}

/// Element-wise base-10 logarithm.
pub fn log10<T: Entity>(x: &T) -> T {
    unary(UnaryOp::Log10, x)
}

/// Element-wise sine.
pub fn sin<T: Entity>(x: &T) -> T {
    unary(UnaryOp::Sin, x)
}

/// Element-wise cosine.
pub fn cos<T: Entity>(x: &T) -> T {
    unary(UnaryOp::Cos, x)
}

/// Element-wise tangent.
pub fn tan<T: Entity>(x: &T) -> T {
    unary(UnaryOp::Tan, x)
}

/// Element-wise inverse sine.
pub fn arcsin<T: Entity>(x: &T) -> T {
    unary(UnaryOp::Arcsin, x)
}

/// Element-wise inverse cosine.
pub fn arccos<T: Entity>(x: &T) -> T {
    unary(UnaryOp::Arccos, x)
}

/// Element-wise inverse tangent.
pub fn arctan<T: Entity>(x: &T) -> T {
    unary(UnaryOp::Arctan, x)
}

/// Element-wise absolute value.
pub fn absolute<T: Entity>(x: &T) -> T {
    unary(UnaryOp::Abs, x)
}

/// Quadrant-aware `arctan(y / x)`.
pub fn arctan2<Y, X>(y: Y, x: X) -> <Y as Combine<X>>::Output
where
    Y: Combine<X> + Into<Operand>,
    X: Into<Operand>,
{
    binary(BinaryOp::Arctan2, y, x)
}

/// Matrix product of two operands.
pub fn dot<A, B>(a: A, b: B) -> <A as Combine<B>>::Output
where
    A: Combine<B> + Into<Operand>,
    B: Into<Operand>,
{
    binary(BinaryOp::Dot, a, b)
}
