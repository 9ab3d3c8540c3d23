//! Graft constructors behind the mosaic methods.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::algebra::operand::{EntityKind, EntityOperand, Operand};
use crate::algebra::ops::place;
use crate::foundation::datetime::{DateBound, parse_timestamp};
use crate::graft::builder::GraftBuilder;
use crate::graft::graph::Graft;
use crate::graft::node::{Node, NodeKey};
use crate::graft::op_kind;
use crate::mosaic::bands::{format_bands, join_bands};
use crate::mosaic::options::MosaicOptions;

/// Product-filtered source description shared by `mosaic` and `stack_scenes` nodes.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ProductSource {
    pub product_id: String,
    pub bands: Vec<String>,
    pub start_datetime: Option<DateBound>,
    pub end_datetime: Option<DateBound>,
    pub options: MosaicOptions,
}

fn date_key(b: &mut GraftBuilder, bound: &DateBound) -> NodeKey {
    match bound.as_parameter() {
        Some(p) => b.param(&p),
        None => b.literal(bound.to_canonical_string()),
    }
}

/// `{op_type, args: [product_id, "b1 b2"], kwargs: {start_datetime, end_datetime, ..options}}`
pub(crate) fn create_source(op_type: &str, source: &ProductSource) -> Graft {
    let mut b = GraftBuilder::new();
    let product = b.literal(source.product_id.as_str());
    let bands = b.literal(join_bands(&source.bands));

    let mut kwargs = BTreeMap::new();
    for (name, value) in source.options.to_kwargs() {
        kwargs.insert(name, b.literal(value));
    }
    if let Some(start) = &source.start_datetime {
        kwargs.insert("start_datetime".to_string(), date_key(&mut b, start));
    }
    if let Some(end) = &source.end_datetime {
        kwargs.insert("end_datetime".to_string(), date_key(&mut b, end));
    }

    let root = b.push_op_with_kwargs(op_type, vec![product, bands], kwargs);
    b.seal(root)
}

pub(crate) fn create_mosaic(source: &ProductSource) -> Graft {
    create_source(op_kind::MOSAIC, source)
}

pub(crate) fn create_stack_scenes(source: &ProductSource) -> Graft {
    create_source(op_kind::STACK_SCENES, source)
}

/// `{op_type: "mosaic_image_ids", args: [[ids..], "b1 b2"]}`
pub(crate) fn create_image_ids_mosaic(image_ids: &[String], bands: &[String]) -> Graft {
    let mut b = GraftBuilder::new();
    let ids = b.literal(Value::from(image_ids.to_vec()));
    let bands = b.literal(join_bands(bands));
    let root = b.push_op(op_kind::IMAGE_IDS_MOSAIC, vec![ids, bands]);
    b.seal(root)
}

/// Recover the source description from a `mosaic` root.
///
/// `None` when the root is another kind, or when any argument is not a literal (or a
/// `Datetime` parameter for the date bounds), since the node can then not be re-derived.
pub(crate) fn product_source_of(graft: &Graft) -> Option<ProductSource> {
    let op = graft.root().as_op().filter(|op| op.op_type == op_kind::MOSAIC)?;
    let [product, bands] = op.args.as_slice() else {
        return None;
    };
    let product_id = graft
        .resolve(product.as_str())
        .ok()?
        .as_literal()?
        .as_str()?
        .to_string();
    let bands = format_bands(graft.resolve(bands.as_str()).ok()?.as_literal()?.as_str()?);

    let mut start_datetime = None;
    let mut end_datetime = None;
    let mut options = BTreeMap::new();
    for (name, key) in &op.kwargs {
        let node = graft.resolve(key.as_str()).ok()?;
        match name.as_str() {
            "start_datetime" | "end_datetime" => {
                let bound = match node {
                    Node::Param(p) => DateBound::Parameter(p.name.clone()),
                    other => DateBound::Instant(parse_timestamp(other.as_literal()?.as_str()?)?),
                };
                if name == "start_datetime" {
                    start_datetime = Some(bound);
                } else {
                    end_datetime = Some(bound);
                }
            }
            _ => {
                options.insert(name.clone(), node.as_literal()?.clone());
            }
        }
    }

    Some(ProductSource {
        product_id,
        bands,
        start_datetime,
        end_datetime,
        options: MosaicOptions::from_kwargs(options).ok()?,
    })
}

/// `{op_type, args: [root, operands..], kwargs}` over a copy of `graft`.
pub(crate) fn wrap(
    graft: &Graft,
    op_type: &str,
    operands: &[Operand],
    kwargs: &[(&str, Value)],
) -> Graft {
    let (mut b, root) = GraftBuilder::from_graft(graft);
    let mut args = vec![root];
    args.extend(operands.iter().map(|o| place(&mut b, o)));
    let kwargs = kwargs
        .iter()
        .map(|(name, value)| (name.to_string(), b.literal(value.clone())))
        .collect();
    let key = b.push_op_with_kwargs(op_type, args, kwargs);
    b.seal(key)
}

/// Band-manipulation node: `{op_type, args: [root, other?], kwargs: {bands?}}`.
pub(crate) fn band_op(
    graft: &Graft,
    op_type: &str,
    bands: Option<&[String]>,
    other: Option<&Graft>,
) -> Graft {
    let operands: Vec<Operand> = other
        .map(|g| {
            Operand::Entity(EntityOperand {
                kind: EntityKind::Mosaic,
                graft: g.clone(),
                metadata: None,
            })
        })
        .into_iter()
        .collect();
    let kwargs: Vec<(&str, Value)> = bands
        .map(|b| ("bands", Value::from(b.to_vec())))
        .into_iter()
        .collect();
    wrap(graft, op_type, &operands, &kwargs)
}

#[cfg(test)]
#[path = "../../tests/unit/mosaic/nodes.rs"]
mod tests;
