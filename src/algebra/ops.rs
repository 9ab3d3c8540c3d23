use crate::algebra::operand::{Combine, ComputeMap, Entity, EntityKind, Kinded, Operand};
use crate::graft::builder::GraftBuilder;
use crate::graft::graph::Graft;
use crate::graft::node::NodeKey;
use crate::mosaic::model::{Mosaic, MosaicMetadata};

/// Binary operations and their graft names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// True division `a / b`.
    TrueDiv,
    /// Floor division.
    FloorDiv,
    /// `a ** b`
    Pow,
    /// `a > b`
    Gt,
    /// `a >= b`
    Ge,
    /// `a < b`
    Lt,
    /// `a <= b`
    Le,
    /// `a == b`
    Eq,
    /// `a != b`
    Ne,
    /// Logical and.
    And,
    /// Logical or.
    Or,
    /// Logical exclusive or.
    Xor,
    /// Quadrant-aware arctangent of `a / b`.
    Arctan2,
    /// Matrix product.
    Dot,
}

impl BinaryOp {
    /// Operation name emitted into the graft.
    pub fn op_type(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::TrueDiv => "div",
            Self::FloorDiv => "floordiv",
            Self::Pow => "pow",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Arctan2 => "arctan2",
            Self::Dot => "dot",
        }
    }
}

/// Unary operations and their graft names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-a`
    Neg,
    /// `+a`
    Pos,
    /// `|a|`
    Abs,
    /// Logical not.
    Invert,
    /// Square root.
    Sqrt,
    /// `a * a`
    Square,
    /// Natural exponential.
    Exp,
    /// Natural logarithm.
    Log,
    /// Base-10 logarithm.
    Log10,
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Inverse sine.
    Arcsin,
    /// Inverse cosine.
    Arccos,
    /// Inverse tangent.
    Arctan,
}

impl UnaryOp {
    /// Operation name emitted into the graft.
    pub fn op_type(self) -> &'static str {
        match self {
            Self::Neg => "neg",
            Self::Pos => "pos",
            Self::Abs => "abs",
            Self::Invert => "invert",
            Self::Sqrt => "sqrt",
            Self::Square => "square",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Log10 => "log10",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Arcsin => "arcsin",
            Self::Arccos => "arccos",
            Self::Arctan => "arctan",
        }
    }
}

pub(crate) fn place(b: &mut GraftBuilder, operand: &Operand) -> NodeKey {
    match operand {
        Operand::Literal(v) => b.literal(v.clone()),
        Operand::Entity(e) => b.merge(&e.graft),
    }
}

/// Metadata of the operand whose kind wins the precedence table; left on ties.
fn winning_metadata(lhs: Operand, rhs: Operand) -> Option<MosaicMetadata> {
    let winner = EntityKind::resolve(lhs.kind(), rhs.kind());
    [lhs, rhs].into_iter().find_map(|o| match o {
        Operand::Entity(e) if Some(e.kind) == winner => e.metadata,
        _ => None,
    })
}

/// Build `{op_type, args: [lhs, rhs]}` over the merged operand grafts.
pub fn apply_binary(op: BinaryOp, lhs: Operand, rhs: Operand) -> (Graft, Option<MosaicMetadata>) {
    let mut b = GraftBuilder::new();
    let l = place(&mut b, &lhs);
    let r = place(&mut b, &rhs);
    let root = b.push_op(op.op_type(), vec![l, r]);
    (b.seal(root), winning_metadata(lhs, rhs))
}

/// Typed binary expression; the result type follows the precedence table.
pub fn binary<L, R>(op: BinaryOp, lhs: L, rhs: R) -> <L as Combine<R>>::Output
where
    L: Combine<R> + Into<Operand>,
    R: Into<Operand>,
{
    let (graft, metadata) = apply_binary(op, lhs.into(), rhs.into());
    <<L as Combine<R>>::Output as Entity>::from_expression(graft, metadata)
}

/// Wrap the root of `x` in `{op_type, args: [root, extra...]}`, keeping the entity type.
pub fn call<T: Entity>(op_type: &str, x: &T, extra: &[serde_json::Value]) -> T {
    let (mut b, root) = GraftBuilder::from_graft(x.graft());
    let mut args = vec![root];
    args.extend(extra.iter().map(|v| b.literal(v.clone())));
    let key = b.push_op(op_type, args);
    T::from_expression(b.seal(key), x.metadata().cloned())
}

/// Element-wise unary expression.
pub fn unary<T: Entity>(op: UnaryOp, x: &T) -> T {
    call(op.op_type(), x, &[])
}

macro_rules! binary_std_ops {
    ($(($trait:ident, $method:ident, $op:expr)),* $(,)?) => {
        binary_std_ops!(@owned Mosaic, $(($trait, $method, $op)),*);
        binary_std_ops!(@owned ComputeMap, $(($trait, $method, $op)),*);
        binary_std_ops!(@scalar f64, $(($trait, $method, $op)),*);
        binary_std_ops!(@scalar f32, $(($trait, $method, $op)),*);
        binary_std_ops!(@scalar i32, $(($trait, $method, $op)),*);
        binary_std_ops!(@scalar i64, $(($trait, $method, $op)),*);
    };
    (@owned $ty:ident, $(($trait:ident, $method:ident, $op:expr)),*) => {
        $(
            impl<R> std::ops::$trait<R> for $ty
            where
                R: Kinded + Into<Operand>,
                $ty: Combine<R>,
            {
                type Output = <$ty as Combine<R>>::Output;

                fn $method(self, rhs: R) -> Self::Output {
                    binary($op, self, rhs)
                }
            }

            impl<'a, R> std::ops::$trait<R> for &'a $ty
            where
                R: Kinded + Into<Operand>,
                &'a $ty: Combine<R>,
            {
                type Output = <&'a $ty as Combine<R>>::Output;

                fn $method(self, rhs: R) -> Self::Output {
                    binary($op, self, rhs)
                }
            }
        )*
    };
    (@scalar $ty:ty, $(($trait:ident, $method:ident, $op:expr)),*) => {
        $(
            impl std::ops::$trait<Mosaic> for $ty {
                type Output = Mosaic;

                fn $method(self, rhs: Mosaic) -> Mosaic {
                    binary($op, self, rhs)
                }
            }

            impl<'a> std::ops::$trait<&'a Mosaic> for $ty {
                type Output = Mosaic;

                fn $method(self, rhs: &'a Mosaic) -> Mosaic {
                    binary($op, self, rhs)
                }
            }

            impl std::ops::$trait<ComputeMap> for $ty {
                type Output = ComputeMap;

                fn $method(self, rhs: ComputeMap) -> ComputeMap {
                    binary($op, self, rhs)
                }
            }

            impl<'a> std::ops::$trait<&'a ComputeMap> for $ty {
                type Output = ComputeMap;

                fn $method(self, rhs: &'a ComputeMap) -> ComputeMap {
                    binary($op, self, rhs)
                }
            }
        )*
    };
}

binary_std_ops!(
    (Add, add, BinaryOp::Add),
    (Sub, sub, BinaryOp::Sub),
    (Mul, mul, BinaryOp::Mul),
    (Div, div, BinaryOp::TrueDiv),
    (BitAnd, bitand, BinaryOp::And),
    (BitOr, bitor, BinaryOp::Or),
    (BitXor, bitxor, BinaryOp::Xor),
);

macro_rules! unary_std_ops {
    ($($ty:ident),*) => {
        $(
            impl std::ops::Neg for $ty {
                type Output = $ty;

                fn neg(self) -> $ty {
                    unary(UnaryOp::Neg, &self)
                }
            }

            impl std::ops::Neg for &$ty {
                type Output = $ty;

                fn neg(self) -> $ty {
                    unary(UnaryOp::Neg, self)
                }
            }

            impl std::ops::Not for $ty {
                type Output = $ty;

                fn not(self) -> $ty {
                    unary(UnaryOp::Invert, &self)
                }
            }

            impl std::ops::Not for &$ty {
                type Output = $ty;

                fn not(self) -> $ty {
                    unary(UnaryOp::Invert, self)
                }
            }
        )*
    };
}

unary_std_ops!(Mosaic, ComputeMap);

#[cfg(test)]
#[path = "../../tests/unit/algebra/ops.rs"]
mod tests;
