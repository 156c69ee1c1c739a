//! Entity extractors: raw upstream nodes to DTOs.
//!
//! Each attribute is declared as a priority list of candidate paths (see
//! [`crate::fields`]). Extraction never fails; attributes with no usable
//! candidate come out as `None` or empty, and the schema validator decides
//! whether the result honours the public contract.

mod nutrition;
mod product;
mod store;

use serde_json::Value;

use crate::dto::{ProductDto, StoreDto};
use crate::fields::records;
use crate::locate::find_records;

pub use nutrition::extract_nutrition;
pub use product::{extract_product_detail, extract_product_summary};
pub use store::extract_store;

/// Key under which search responses nest their product tiles.
pub const PRODUCT_TILES_KEY: &str = "productTiles";

/// Extracts every store record from a pickup-locations response (a bare list
/// or an object with an `items` list).
#[must_use]
pub fn extract_stores(payload: &Value) -> Vec<StoreDto> {
    records(payload).into_iter().map(extract_store).collect()
}

/// Locates product tiles anywhere in a search response and extracts them in
/// document order.
#[must_use]
pub fn extract_product_tiles(payload: &Value) -> Vec<ProductDto> {
    find_records(payload, PRODUCT_TILES_KEY)
        .into_iter()
        .map(extract_product_summary)
        .collect()
}
