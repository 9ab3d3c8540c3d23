use std::fmt;

use serde_json::Value;

use crate::graft::graph::Graft;
use crate::mosaic::model::{Mosaic, MosaicMetadata};

/// Kind of graph-wrapping entity, ordered by return precedence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    /// Untyped graph wrapper.
    ComputeMap,
    /// Raster mosaic with band metadata.
    Mosaic,
}

impl EntityKind {
    /// Return precedence; the higher one wins in mixed expressions.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::ComputeMap => 0,
            Self::Mosaic => 1,
        }
    }

    /// Result kind of combining `left` with `right`; `None` stands for a literal operand.
    ///
    /// Ties go to the left operand.
    pub fn resolve(left: Option<Self>, right: Option<Self>) -> Option<Self> {
        match (left, right) {
            (Some(l), Some(r)) if r.precedence() > l.precedence() => Some(r),
            (Some(l), _) => Some(l),
            (None, r) => r,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ComputeMap => "ComputeMap",
            Self::Mosaic => "Mosaic",
        })
    }
}

/// One side of an expression.
#[derive(Clone, Debug)]
pub enum Operand {
    /// Raw scalar or array-like value, promoted to a literal node.
    Literal(Value),
    /// A graph-wrapping entity whose graft is merged in.
    Entity(EntityOperand),
}

/// Graph-wrapping operand.
#[derive(Clone, Debug)]
pub struct EntityOperand {
    /// Entity kind, used for result precedence.
    pub kind: EntityKind,
    /// Graft of the entity.
    pub graft: Graft,
    /// Mosaic metadata carried into the result, if any.
    pub metadata: Option<MosaicMetadata>,
}

impl Operand {
    /// Entity kind, or `None` for literals.
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            Self::Literal(_) => None,
            Self::Entity(e) => Some(e.kind),
        }
    }
}

/// A value that wraps a graft and can participate in expressions.
pub trait Entity: Clone + Into<Operand> {
    /// Kind used for return precedence.
    const KIND: EntityKind;

    /// The wrapped graft.
    fn graft(&self) -> &Graft;

    /// Mosaic metadata, if this entity carries any.
    fn metadata(&self) -> Option<&MosaicMetadata> {
        None
    }

    /// Wrap an expression result.
    fn from_expression(graft: Graft, metadata: Option<MosaicMetadata>) -> Self;

    /// Owned operand view of this entity.
    fn to_operand(&self) -> Operand {
        Operand::Entity(EntityOperand {
            kind: Self::KIND,
            graft: self.graft().clone(),
            metadata: self.metadata().cloned(),
        })
    }
}

/// Generic graph wrapper with the lowest return precedence.
#[derive(Clone, Debug, PartialEq)]
pub struct ComputeMap {
    graft: Graft,
}

impl ComputeMap {
    /// Wrap a graft.
    pub fn new(graft: Graft) -> Self {
        Self { graft }
    }

    /// Unwrap into the graft.
    pub fn into_graft(self) -> Graft {
        self.graft
    }
}

impl From<Graft> for ComputeMap {
    fn from(graft: Graft) -> Self {
        Self::new(graft)
    }
}

impl Entity for ComputeMap {
    const KIND: EntityKind = EntityKind::ComputeMap;

    fn graft(&self) -> &Graft {
        &self.graft
    }

    fn from_expression(graft: Graft, _metadata: Option<MosaicMetadata>) -> Self {
        Self::new(graft)
    }
}

/// Marker for literal operands in the precedence table.
pub enum Scalar {}

/// Maps an operand type onto its entity type (or [`Scalar`]).
pub trait Kinded {
    /// Entity type, or [`Scalar`] for literals.
    type Entity;
}

/// Type-level return precedence: the entity type produced by combining `Self` with `Rhs`.
pub trait Precede<Rhs> {
    /// Result entity type.
    type Output: Entity;
}

impl Precede<Mosaic> for Mosaic {
    type Output = Mosaic;
}
impl Precede<ComputeMap> for Mosaic {
    type Output = Mosaic;
}
impl Precede<Scalar> for Mosaic {
    type Output = Mosaic;
}
impl Precede<Mosaic> for ComputeMap {
    type Output = Mosaic;
}
impl Precede<ComputeMap> for ComputeMap {
    type Output = ComputeMap;
}
impl Precede<Scalar> for ComputeMap {
    type Output = ComputeMap;
}
impl Precede<Mosaic> for Scalar {
    type Output = Mosaic;
}
impl Precede<ComputeMap> for Scalar {
    type Output = ComputeMap;
}

/// Result type of a binary expression between `Self` and `Rhs`.
pub trait Combine<Rhs> {
    /// Result entity type.
    type Output: Entity;
}

impl<L, R> Combine<R> for L
where
    L: Kinded,
    R: Kinded,
    L::Entity: Precede<R::Entity>,
{
    type Output = <L::Entity as Precede<R::Entity>>::Output;
}

macro_rules! entity_operand {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Kinded for $ty {
                type Entity = $ty;
            }

            impl<'a> Kinded for &'a $ty {
                type Entity = $ty;
            }

            impl From<$ty> for Operand {
                fn from(e: $ty) -> Self {
                    e.to_operand()
                }
            }

            impl<'a> From<&'a $ty> for Operand {
                fn from(e: &'a $ty) -> Self {
                    e.to_operand()
                }
            }
        )*
    };
}

entity_operand!(ComputeMap, Mosaic);

macro_rules! scalar_operand {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Kinded for $ty {
                type Entity = Scalar;
            }

            impl From<$ty> for Operand {
                fn from(v: $ty) -> Self {
                    Operand::Literal(Value::from(v))
                }
            }
        )*
    };
}

scalar_operand!(f64, f32, i32, i64, u32, u64, bool, Vec<f64>, Vec<i64>);

impl Kinded for Value {
    type Entity = Scalar;
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Operand::Literal(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/algebra/operand.rs"]
mod tests;
