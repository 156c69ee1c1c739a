use serde_json::Value;

use crate::coerce;
use crate::dto::{BreadcrumbDto, PricingDto, ProductDto, PromoDto, UnitPriceDto, VariantDto};
use crate::fields::{first_match, first_object, first_of, first_record, lookup, records, FieldPath};

use super::nutrition::extract_nutrition;

const BRAND: &[FieldPath] = &[&["brand"]];
const DESCRIPTION: &[FieldPath] = &[&["description"]];
const PACKAGE_SIZE: &[FieldPath] = &[&["packageSize"]];
const UOM: &[FieldPath] = &[&["uom"]];

const TILE_CODE: &[FieldPath] = &[&["productId"], &["code"]];
const TILE_NAME: &[FieldPath] = &[&["title"], &["name"]];
const TILE_IMAGE: &[FieldPath] = &[&["productImage", "url"]];
const TILE_IMAGE_FALLBACK: &[FieldPath] = &[&["image"], &["primaryImage"]];
const TILE_CURRENT: &[FieldPath] = &[
    &["pricing", "price", "value"],
    &["pricing", "current"],
    &["currentPrice"],
];
const TILE_REGULAR: &[FieldPath] = &[
    &["pricing", "wasPrice", "value"],
    &["pricing", "regular"],
    &["regularPrice"],
];

const DETAIL_CODE: &[FieldPath] = &[&["code"], &["productId"]];
const DETAIL_NAME: &[FieldPath] = &[&["name"], &["title"]];
const IMAGE_LISTS: &[FieldPath] = &[&["imageAssets"], &["images"]];
const ASSET_URL: &[FieldPath] = &[
    &["url"],
    &["largeUrl"],
    &["mediumUrl"],
    &["smallUrl"],
    &["imageUrl"],
];
const FLAT_IMAGE: &[FieldPath] = &[&["image"]];

const OFFER_CURRENT: &[FieldPath] = &[&["price", "value"]];
const OFFER_REGULAR: &[FieldPath] = &[&["wasPrice", "value"]];
const FLAT_CURRENT: &[FieldPath] = &[&["pricing", "current"], &["pricing", "price", "value"]];
const FLAT_REGULAR: &[FieldPath] = &[&["pricing", "regular"], &["pricing", "wasPrice", "value"]];

const UNIT_VALUE: &[FieldPath] = &[&["value"], &["price"]];
const UNIT_NAME: &[FieldPath] = &[&["unit"], &["uom"]];
const UNIT_QUANTITY: &[FieldPath] = &[&["perQuantity"], &["quantity"]];

const OFFER_PROMO: &[FieldPath] = &[&["badges", "dealBadge"], &["promo"]];
const FLAT_PROMO: &[FieldPath] = &[&["pricing", "promo"], &["promo"]];
const PROMO_TEXT: &[FieldPath] = &[&["text"], &["name"]];
const PROMO_EXPIRY: &[FieldPath] = &[&["expiresAt"], &["expiryDate"]];

const NUTRITION_BLOCK: &[FieldPath] = &[&["nutritionFacts"], &["nutrition"]];

/// Missing current price on a listing or detail is reported as zero, matching
/// what the storefront renders for unpriced items.
const UNPRICED: f64 = 0.0;

/// Extracts a search-result tile.
#[must_use]
pub fn extract_product_summary(tile: &Value) -> ProductDto {
    let text = |candidates: &[FieldPath]| first_match(tile, candidates, coerce::string);

    let image = first_of(&[
        &|| first_match(tile, TILE_IMAGE, coerce::non_empty_string),
        &|| lookup(tile, &["productImage"]).and_then(first_asset_url),
        &|| first_match(tile, TILE_IMAGE_FALLBACK, coerce::non_empty_string),
    ]);

    ProductDto {
        code: first_match(tile, TILE_CODE, coerce::non_empty_string).unwrap_or_default(),
        name: first_match(tile, TILE_NAME, coerce::non_empty_string).unwrap_or_default(),
        brand: text(BRAND),
        description: text(DESCRIPTION),
        image,
        package_size: text(PACKAGE_SIZE),
        uom: None,
        pricing: Some(PricingDto {
            current: first_match(tile, TILE_CURRENT, coerce::number).unwrap_or(UNPRICED),
            regular: first_match(tile, TILE_REGULAR, coerce::number),
            unit_price: None,
            promo: None,
        }),
        nutrition: None,
        breadcrumbs: Vec::new(),
        variants: None,
    }
}

/// Extracts a product-detail payload. `requested_id` stands in for the code
/// when the payload does not carry one.
#[must_use]
pub fn extract_product_detail(record: &Value, requested_id: &str) -> ProductDto {
    let text = |candidates: &[FieldPath]| first_match(record, candidates, coerce::string);

    ProductDto {
        code: first_match(record, DETAIL_CODE, coerce::non_empty_string)
            .unwrap_or_else(|| requested_id.to_string()),
        name: first_match(record, DETAIL_NAME, coerce::non_empty_string).unwrap_or_default(),
        brand: text(BRAND),
        description: text(DESCRIPTION),
        image: primary_image(record),
        package_size: text(PACKAGE_SIZE),
        uom: text(UOM),
        pricing: Some(detail_pricing(record)),
        nutrition: NUTRITION_BLOCK
            .iter()
            .filter_map(|path| lookup(record, path).and_then(first_record))
            .find_map(extract_nutrition),
        breadcrumbs: lookup(record, &["breadcrumbs"])
            .map(extract_breadcrumbs)
            .unwrap_or_default(),
        variants: lookup(record, &["variants"]).and_then(extract_variants),
    }
}

/// First asset in a list with a usable URL.
fn first_asset_url(list: &Value) -> Option<String> {
    records(list)
        .into_iter()
        .find_map(|asset| first_match(asset, ASSET_URL, coerce::non_empty_string))
}

/// The first asset list present decides the image; the flat field is only
/// read when there is no list at all.
fn primary_image(record: &Value) -> Option<String> {
    match IMAGE_LISTS
        .iter()
        .filter_map(|path| lookup(record, path))
        .find(|list| !list.is_null())
    {
        Some(list) => first_asset_url(list),
        None => first_match(record, FLAT_IMAGE, coerce::non_empty_string),
    }
}

/// Detail pricing reads the first offer when present and falls back to the
/// flat `pricing` block attribute by attribute.
fn detail_pricing(record: &Value) -> PricingDto {
    let offer = lookup(record, &["offers"]).and_then(first_record);
    let from_offer = |candidates: &[FieldPath]| {
        offer.and_then(|offer| first_match(offer, candidates, coerce::number))
    };

    let current = first_of(&[
        &|| from_offer(OFFER_CURRENT),
        &|| first_match(record, FLAT_CURRENT, coerce::number),
    ]);
    let regular = first_of(&[
        &|| from_offer(OFFER_REGULAR),
        &|| first_match(record, FLAT_REGULAR, coerce::number),
    ]);

    let comparison = first_of(&[
        &|| lookup(record, &["comparisonPrices"]).and_then(first_record),
        &|| {
            offer
                .and_then(|offer| lookup(offer, &["comparisonPrices"]))
                .and_then(first_record)
        },
    ]);

    let promo_block = first_of(&[
        &|| offer.and_then(|offer| first_object(offer, OFFER_PROMO)),
        &|| first_object(record, FLAT_PROMO),
    ]);

    PricingDto {
        current: current.unwrap_or(UNPRICED),
        regular,
        unit_price: comparison.and_then(extract_unit_price),
        promo: promo_block.and_then(extract_promo),
    }
}

/// A comparison price without a numeric value is no unit price at all.
fn extract_unit_price(entry: &Value) -> Option<UnitPriceDto> {
    let value = first_match(entry, UNIT_VALUE, coerce::number)?;
    Some(UnitPriceDto {
        value,
        unit: first_match(entry, UNIT_NAME, coerce::string).unwrap_or_default(),
        per_quantity: first_match(entry, UNIT_QUANTITY, coerce::number).unwrap_or(1.0),
    })
}

fn extract_promo(block: &Value) -> Option<PromoDto> {
    let text = first_match(block, PROMO_TEXT, coerce::non_empty_string);
    let expires_at = first_match(block, PROMO_EXPIRY, coerce::non_empty_string);
    if text.is_none() && expires_at.is_none() {
        return None;
    }
    Some(PromoDto { text, expires_at })
}

/// Keeps entries that are objects with a non-empty `code` and `name`, in
/// order; anything else is dropped.
fn extract_breadcrumbs(list: &Value) -> Vec<BreadcrumbDto> {
    let Some(items) = list.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter(|item| item.is_object())
        .filter_map(|item| {
            Some(BreadcrumbDto {
                code: first_match(item, &[&["code"]], coerce::non_empty_string)?,
                name: first_match(item, &[&["name"]], coerce::non_empty_string)?,
            })
        })
        .collect()
}

/// Keeps entries with a non-empty `code`. `None` when the list is absent or
/// nothing survives.
fn extract_variants(list: &Value) -> Option<Vec<VariantDto>> {
    let variants: Vec<VariantDto> = list
        .as_array()?
        .iter()
        .filter(|item| item.is_object())
        .filter_map(|item| {
            Some(VariantDto {
                code: first_match(item, &[&["code"]], coerce::non_empty_string)?,
                name: first_match(item, &[&["name"]], coerce::string),
            })
        })
        .collect();
    (!variants.is_empty()).then_some(variants)
}

#[cfg(test)]
#[path = "product_test.rs"]
mod tests;
