use crate::foundation::error::{GraftError, GraftResult};

/// Properties carried alongside the operands of a `dot` product.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DotProperties {
    /// Border padding in pixels; matrices have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pad: Option<u32>,
    /// Source product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    /// Product of the second operand when it differs from `product_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_product_id: Option<String>,
}

/// Properties of `dot(a, b)`.
///
/// Different non-zero paddings cannot be combined. The first product id wins and a different
/// second one is kept as `other_product_id`.
pub fn propagate_dot_properties(
    a: &DotProperties,
    b: &DotProperties,
) -> GraftResult<DotProperties> {
    let pad_a = a.pad.filter(|p| *p != 0);
    let pad_b = b.pad.filter(|p| *p != 0);
    if let (Some(pa), Some(pb)) = (pad_a, pad_b) {
        if pa != pb {
            return Err(GraftError::validation(format!(
                "cannot dot objects with different padding ({pa} and {pb})"
            )));
        }
    }

    let pid_a = a.product_id.as_deref().filter(|p| !p.is_empty());
    let pid_b = b.product_id.as_deref().filter(|p| !p.is_empty());
    let other_product_id = match (pid_a, pid_b) {
        (Some(pa), Some(pb)) if pa != pb => Some(pb.to_string()),
        _ => None,
    };

    Ok(DotProperties {
        pad: pad_a.or(pad_b),
        product_id: pid_a.or(pid_b).map(str::to_string),
        other_product_id,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/mosaic/properties.rs"]
mod tests;
