//! Boundary to the remote catalog service.
//!
//! The catalog is an external collaborator: this crate only consumes product and vector-table
//! lookups through the [`Catalog`] trait and turns absences into [`GraftError::NotFound`].

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::foundation::error::{GraftError, GraftResult};

/// A raster catalog product.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Product {
    /// Product id.
    pub id: String,
    /// Human readable name.
    #[serde(default)]
    pub name: String,
}

/// A vector table with its JSON-schema-like model.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VectorTable {
    /// Table id.
    pub id: String,
    /// Model description; `properties` maps `geometry` and each column to type info.
    pub model: Value,
    /// Column names.
    pub columns: BTreeSet<String>,
}

/// Product and table lookups. `Ok(None)` means absent or inaccessible.
///
/// Transport failures are reported through `anyhow` and surface as [`GraftError::Other`].
pub trait Catalog {
    /// Fetch a raster product.
    fn get_product(&self, id: &str) -> anyhow::Result<Option<Product>>;

    /// Fetch a vector table.
    fn get_vector_table(&self, id: &str) -> anyhow::Result<Option<VectorTable>>;
}

/// In-memory catalog, for offline use and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    products: BTreeMap<String, Product>,
    tables: BTreeMap<String, VectorTable>,
}

impl StaticCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product.
    pub fn with_product(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        self.products.insert(
            id.clone(),
            Product {
                id,
                name: name.into(),
            },
        );
        self
    }

    /// Register a vector table.
    pub fn with_vector_table(mut self, table: VectorTable) -> Self {
        self.tables.insert(table.id.clone(), table);
        self
    }
}

impl Catalog for StaticCatalog {
    fn get_product(&self, id: &str) -> anyhow::Result<Option<Product>> {
        Ok(self.products.get(id).cloned())
    }

    fn get_vector_table(&self, id: &str) -> anyhow::Result<Option<VectorTable>> {
        Ok(self.tables.get(id).cloned())
    }
}

fn inaccessible(product_id: &str) -> GraftError {
    GraftError::not_found(format!(
        "Product with id '{product_id}' either does not exist or you do not have access to it"
    ))
}

/// Fetch a product or fail with [`GraftError::NotFound`].
#[tracing::instrument(skip(catalog))]
pub fn get_product_or_fail(catalog: &dyn Catalog, product_id: &str) -> GraftResult<Product> {
    catalog
        .get_product(product_id)?
        .ok_or_else(|| inaccessible(product_id))
}

/// Check that a vector product holds POINT geometry and a numeric `drawprop` column.
#[tracing::instrument(skip(catalog))]
pub fn verify_vector_product(
    catalog: &dyn Catalog,
    product_id: &str,
    drawprop: &str,
) -> GraftResult<()> {
    let table = catalog
        .get_vector_table(product_id)?
        .ok_or_else(|| inaccessible(product_id))?;
    let properties = &table.model["properties"];

    if properties["geometry"]["geometry"] != "POINT" {
        return Err(GraftError::validation(
            "Product must be of geometry type POINT",
        ));
    }
    if !table.columns.contains(drawprop) {
        return Err(GraftError::validation(format!(
            "Property '{drawprop}' not found in product '{product_id}'"
        )));
    }

    let prop = &properties[drawprop];
    let numeric = match prop.get("anyOf").and_then(Value::as_array) {
        Some(options) => options.iter().any(|p| type_includes_number(&p["type"])),
        None => type_includes_number(&prop["type"]),
    };
    if !numeric {
        return Err(GraftError::validation(format!(
            "Property '{drawprop}' is not numeric"
        )));
    }
    Ok(())
}

// JSON-schema `type` is either a name or a list of names.
fn type_includes_number(ty: &Value) -> bool {
    match ty {
        Value::String(s) => s == "number",
        Value::Array(items) => items.iter().any(|t| t == "number"),
        _ => false,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/mod.rs"]
mod tests;
