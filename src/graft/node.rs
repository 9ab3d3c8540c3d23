use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// Key of a node inside a [`crate::Graft`].
///
/// Keys built in memory are content-addressed (see [`crate::graft::fingerprint`]); keys read
/// from external records may be arbitrary strings until the graft is reset.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct NodeKey(String);

impl NodeKey {
    /// Wrap a raw key string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Declared type of a deferred named parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ParamType {
    /// Integer parameter.
    Int,
    /// Floating point parameter.
    Float,
    /// String parameter.
    Str,
    /// Boolean parameter.
    Bool,
    /// Timestamp parameter, the only type accepted for mosaic date bounds.
    Datetime,
}

impl ParamType {
    /// Stable name used in records and fingerprints.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Str => "Str",
            Self::Bool => "Bool",
            Self::Datetime => "Datetime",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deferred named parameter, resolved by the evaluator from runtime overrides.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// Parameter name as seen by the rendering collaborator.
    pub name: String,
    /// Declared value type.
    pub param_type: ParamType,
}

impl Parameter {
    /// Declare a parameter.
    pub fn new(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
        }
    }

    /// Shorthand for a [`ParamType::Datetime`] parameter.
    pub fn datetime(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Datetime)
    }
}

/// An operation record: positional and keyword arguments are keys of other nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct OpNode {
    /// Operation name understood by the remote evaluator.
    pub op_type: String,
    /// Ordered positional argument keys.
    pub args: Vec<NodeKey>,
    /// Keyword argument keys.
    pub kwargs: BTreeMap<String, NodeKey>,
}

impl OpNode {
    /// Build an operation record with positional arguments only.
    pub fn new(op_type: impl Into<String>, args: Vec<NodeKey>) -> Self {
        Self {
            op_type: op_type.into(),
            args,
            kwargs: BTreeMap::new(),
        }
    }

    /// Attach keyword arguments.
    pub fn with_kwargs(mut self, kwargs: BTreeMap<String, NodeKey>) -> Self {
        self.kwargs = kwargs;
        self
    }
}

/// One graph entry.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Literal value (number, string, list, mapping, bool, null).
    Literal(Value),
    /// Operation over other nodes.
    Op(OpNode),
    /// Deferred named parameter.
    Param(Parameter),
}

impl Node {
    /// Operation name when this is an operation node.
    pub fn op_type(&self) -> Option<&str> {
        match self {
            Node::Op(op) => Some(op.op_type.as_str()),
            _ => None,
        }
    }

    /// `true` when this node is an operation of kind `op_type`.
    pub fn is_op(&self, op_type: &str) -> bool {
        self.op_type() == Some(op_type)
    }

    /// Borrow the operation record, if any.
    pub fn as_op(&self) -> Option<&OpNode> {
        match self {
            Node::Op(op) => Some(op),
            _ => None,
        }
    }

    /// Borrow the literal value, if any.
    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Node::Literal(v) => Some(v),
            _ => None,
        }
    }

    /// Keys referenced by this node: positional arguments first, then keyword values in
    /// name order.
    pub fn references(&self) -> Vec<&NodeKey> {
        match self {
            Node::Op(op) => op.args.iter().chain(op.kwargs.values()).collect(),
            _ => Vec::new(),
        }
    }

    /// Rewrite every referenced key through `f`.
    pub(crate) fn map_references(self, mut f: impl FnMut(&NodeKey) -> NodeKey) -> Node {
        match self {
            Node::Op(op) => Node::Op(OpNode {
                op_type: op.op_type,
                args: op.args.iter().map(&mut f).collect(),
                kwargs: op
                    .kwargs
                    .iter()
                    .map(|(name, key)| (name.clone(), f(key)))
                    .collect(),
            }),
            other => other,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct OpRecord {
    op_type: String,
    args: Vec<NodeKey>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    kwargs: BTreeMap<String, NodeKey>,
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ParamRecord {
    param: String,
    #[serde(rename = "type")]
    param_type: ParamType,
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct WrappedLiteral {
    literal: Value,
}

impl serde::Serialize for Node {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Op(op) => OpRecord {
                op_type: op.op_type.clone(),
                args: op.args.clone(),
                kwargs: op.kwargs.clone(),
            }
            .serialize(serializer),
            Node::Param(p) => ParamRecord {
                param: p.name.clone(),
                param_type: p.param_type,
            }
            .serialize(serializer),
            // Mapping literals carrying a record field would read back as a record.
            Node::Literal(v) if RecordKind::of(v).is_some() => {
                WrappedLiteral { literal: v.clone() }.serialize(serializer)
            }
            Node::Literal(v) => v.serialize(serializer),
        }
    }
}

#[derive(Clone, Copy)]
enum RecordKind {
    Op,
    Param,
    Wrapped,
}

impl RecordKind {
    /// Record shape claimed by `v`, `None` for plain literals.
    fn of(v: &Value) -> Option<Self> {
        let Value::Object(map) = v else {
            return None;
        };
        if map.contains_key("op_type") || map.contains_key("args") {
            Some(Self::Op)
        } else if map.contains_key("param") {
            Some(Self::Param)
        } else if map.contains_key("literal") {
            Some(Self::Wrapped)
        } else {
            None
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Op => "operation",
            Self::Param => "parameter",
            Self::Wrapped => "wrapped literal",
        }
    }
}

impl<'de> serde::Deserialize<'de> for Node {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let value = Value::deserialize(deserializer)?;
        // An object carrying any record field must match that record exactly.
        let Some(kind) = RecordKind::of(&value) else {
            return Ok(Node::Literal(value));
        };
        let malformed = |e: serde_json::Error| {
            D::Error::custom(format!("malformed {} record: {e}", kind.name()))
        };
        Ok(match kind {
            RecordKind::Op => {
                let r: OpRecord = serde_json::from_value(value).map_err(malformed)?;
                Node::Op(OpNode {
                    op_type: r.op_type,
                    args: r.args,
                    kwargs: r.kwargs,
                })
            }
            RecordKind::Param => {
                let r: ParamRecord = serde_json::from_value(value).map_err(malformed)?;
                Node::Param(Parameter::new(r.param, r.param_type))
            }
            RecordKind::Wrapped => {
                let w: WrappedLiteral = serde_json::from_value(value).map_err(malformed)?;
                Node::Literal(w.literal)
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graft/node.rs"]
mod tests;
