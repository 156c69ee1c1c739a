//! Shape catalogue: DTO shapes gate the pipeline, entity shapes describe the
//! serialized public contract.

use super::{Field, Shape};

const TEXT: Shape = Shape::Nullable(&Shape::String);
const AMOUNT: Shape = Shape::Nullable(&Shape::Number);
const FREE_FORM: Shape = Shape::Map(&TEXT);
const CURRENCY: Shape = Shape::Literal("CAD");

// Stores

const ADDRESS: Shape = Shape::Object(&[
    Field { name: "line1", shape: Shape::NonEmptyString },
    Field { name: "line2", shape: TEXT },
    Field { name: "town", shape: TEXT },
    Field { name: "region", shape: TEXT },
    Field { name: "postalCode", shape: TEXT },
    Field { name: "country", shape: TEXT },
]);

const GEO: Shape = Shape::Object(&[
    Field { name: "lat", shape: Shape::Number },
    Field { name: "lon", shape: Shape::Number },
]);

pub const STORE_DTO: Shape = Shape::Object(&[
    Field { name: "id", shape: Shape::NonEmptyString },
    Field { name: "name", shape: Shape::NonEmptyString },
    Field { name: "address", shape: ADDRESS },
    Field { name: "geo", shape: Shape::Nullable(&GEO) },
    Field { name: "pickupType", shape: TEXT },
    Field { name: "openNow", shape: Shape::Nullable(&Shape::Bool) },
]);

pub const STORE_SUMMARY: Shape = Shape::Object(&[
    Field { name: "id", shape: Shape::NonEmptyString },
    Field { name: "name", shape: Shape::NonEmptyString },
    Field { name: "address", shape: ADDRESS },
    Field { name: "geo", shape: Shape::Nullable(&GEO) },
    Field { name: "pickupType", shape: Shape::NonEmptyString },
    Field { name: "openNow", shape: Shape::Nullable(&Shape::Bool) },
]);

// Product DTOs

const UNIT_PRICE: Shape = Shape::Object(&[
    Field { name: "value", shape: Shape::Number },
    Field { name: "unit", shape: Shape::String },
    Field { name: "perQuantity", shape: Shape::Number },
]);

const PROMO: Shape = Shape::Object(&[
    Field { name: "text", shape: TEXT },
    Field { name: "expiresAt", shape: TEXT },
]);

const PRICING_DTO: Shape = Shape::Object(&[
    Field { name: "current", shape: Shape::Number },
    Field { name: "regular", shape: AMOUNT },
    Field { name: "unitPrice", shape: Shape::Nullable(&UNIT_PRICE) },
    Field { name: "promo", shape: Shape::Nullable(&PROMO) },
]);

const NUTRITION_DTO: Shape = Shape::Object(&[
    Field { name: "serving", shape: TEXT },
    Field { name: "calories", shape: TEXT },
    Field { name: "fat", shape: TEXT },
    Field { name: "carbs", shape: TEXT },
    Field { name: "protein", shape: TEXT },
    Field { name: "sub", shape: FREE_FORM },
    Field { name: "micros", shape: FREE_FORM },
    Field { name: "sodium", shape: TEXT },
    Field { name: "cholesterol", shape: TEXT },
    Field { name: "disclaimer", shape: TEXT },
    Field { name: "ingredients", shape: TEXT },
]);

const BREADCRUMB: Shape = Shape::Object(&[
    Field { name: "code", shape: Shape::NonEmptyString },
    Field { name: "name", shape: Shape::NonEmptyString },
]);

const VARIANT_DTO: Shape = Shape::Object(&[
    Field { name: "code", shape: Shape::NonEmptyString },
    Field { name: "name", shape: TEXT },
]);

pub const PRODUCT_SUMMARY_DTO: Shape = Shape::Object(&[
    Field { name: "code", shape: Shape::NonEmptyString },
    Field { name: "name", shape: Shape::NonEmptyString },
    Field { name: "brand", shape: TEXT },
    Field { name: "image", shape: TEXT },
    Field { name: "packageSize", shape: TEXT },
    Field { name: "pricing", shape: PRICING_DTO },
]);

pub const PRODUCT_DETAIL_DTO: Shape = Shape::Object(&[
    Field { name: "code", shape: Shape::NonEmptyString },
    Field { name: "name", shape: Shape::NonEmptyString },
    Field { name: "brand", shape: TEXT },
    Field { name: "description", shape: TEXT },
    Field { name: "image", shape: TEXT },
    Field { name: "packageSize", shape: TEXT },
    Field { name: "uom", shape: TEXT },
    Field { name: "pricing", shape: PRICING_DTO },
    Field { name: "nutrition", shape: Shape::Nullable(&NUTRITION_DTO) },
    Field { name: "breadcrumbs", shape: Shape::Array(&BREADCRUMB) },
    Field { name: "variants", shape: Shape::Nullable(&Shape::Array(&VARIANT_DTO)) },
]);

// Public entities

const PRICE_SUMMARY: Shape = Shape::Object(&[
    Field { name: "current", shape: Shape::Number },
    Field { name: "regular", shape: AMOUNT },
    Field { name: "currency", shape: CURRENCY },
]);

const PRICING: Shape = Shape::Object(&[
    Field { name: "current", shape: Shape::Number },
    Field { name: "regular", shape: AMOUNT },
    Field { name: "currency", shape: CURRENCY },
    Field { name: "unitPrice", shape: Shape::Nullable(&UNIT_PRICE) },
    Field { name: "promo", shape: Shape::Nullable(&PROMO) },
]);

const MACROS: Shape = Shape::Object(&[
    Field { name: "fat", shape: TEXT },
    Field { name: "carbs", shape: TEXT },
    Field { name: "protein", shape: TEXT },
    Field { name: "sub", shape: FREE_FORM },
]);

const NUTRITION: Shape = Shape::Object(&[
    Field { name: "serving", shape: TEXT },
    Field { name: "calories", shape: TEXT },
    Field { name: "macros", shape: MACROS },
    Field { name: "micros", shape: FREE_FORM },
    Field { name: "sodium", shape: TEXT },
    Field { name: "cholesterol", shape: TEXT },
    Field { name: "disclaimer", shape: TEXT },
    Field { name: "ingredients", shape: TEXT },
]);

const VARIANT: Shape = Shape::Object(&[
    Field { name: "id", shape: Shape::NonEmptyString },
    Field { name: "name", shape: TEXT },
]);

pub const PRODUCT_SUMMARY: Shape = Shape::Object(&[
    Field { name: "id", shape: Shape::NonEmptyString },
    Field { name: "name", shape: Shape::NonEmptyString },
    Field { name: "brand", shape: TEXT },
    Field { name: "imageUrl", shape: TEXT },
    Field { name: "packageSize", shape: TEXT },
    Field { name: "price", shape: PRICE_SUMMARY },
]);

pub const PRODUCT_DETAIL: Shape = Shape::Object(&[
    Field { name: "id", shape: Shape::NonEmptyString },
    Field { name: "name", shape: Shape::NonEmptyString },
    Field { name: "brand", shape: TEXT },
    Field { name: "description", shape: TEXT },
    Field { name: "imageUrl", shape: TEXT },
    Field { name: "packageSize", shape: TEXT },
    Field { name: "uom", shape: TEXT },
    Field { name: "pricing", shape: PRICING },
    Field { name: "nutrition", shape: Shape::Nullable(&NUTRITION) },
    Field { name: "breadcrumbs", shape: Shape::Array(&BREADCRUMB) },
    Field { name: "variants", shape: Shape::Nullable(&Shape::Array(&VARIANT)) },
]);

pub const SEARCH_PAGE: Shape = Shape::Object(&[
    Field { name: "items", shape: Shape::Array(&PRODUCT_SUMMARY) },
    Field { name: "page", shape: Shape::Integer { min: 1 } },
    Field { name: "pageSize", shape: Shape::Integer { min: 1 } },
    Field { name: "total", shape: Shape::Nullable(&Shape::Integer { min: 0 }) },
]);

#[cfg(test)]
mod tests {
    use csapi_core::{
        Currency, Geo, PriceSummary, ProductSummary, SearchPage, StoreAddress, StoreSummary,
    };
    use serde_json::json;

    use super::*;
    use crate::extract::{extract_product_detail, extract_product_summary, extract_store};
    use crate::schema::{check, validate};

    fn summary(id: &str) -> ProductSummary {
        ProductSummary {
            id: id.to_string(),
            name: "Paper Towels".to_string(),
            brand: None,
            image_url: None,
            package_size: Some("6 rolls".to_string()),
            price: PriceSummary {
                current: 12.99,
                regular: None,
                currency: Currency::Cad,
            },
        }
    }

    #[test]
    fn extracted_store_satisfies_dto_shape() {
        let record = json!({ "storeId": "1080", "name": "Queen & Portland", "address": { "line1": "585 Queen St W" } });
        assert!(validate(extract_store(&record), &STORE_DTO).is_ok());
    }

    #[test]
    fn store_without_id_violates_dto_shape() {
        let record = json!({ "name": "Nowhere" });
        let err = validate(extract_store(&record), &STORE_DTO).unwrap_err();
        assert_eq!(err.path, "$.id");
        assert_eq!(err.found, "empty string");
    }

    #[test]
    fn extracted_tile_satisfies_dto_shape() {
        let tile = json!({ "productId": "A_EA", "title": "Milk", "pricing": { "price": { "value": 4.49 } } });
        assert!(validate(extract_product_summary(&tile), &PRODUCT_SUMMARY_DTO).is_ok());
    }

    #[test]
    fn nameless_tile_violates_dto_shape() {
        let tile = json!({ "productId": "A_EA" });
        let err = validate(extract_product_summary(&tile), &PRODUCT_SUMMARY_DTO).unwrap_err();
        assert_eq!(err.path, "$.name");
    }

    #[test]
    fn extracted_detail_satisfies_dto_shape() {
        let record = json!({
            "name": "Milk",
            "offers": [{ "price": { "value": 4.49 } }],
            "nutritionFacts": [{ "calories": 120, "micros": { "calcium": "30%" } }],
            "breadcrumbs": [{ "code": "dairy", "name": "Dairy" }],
            "variants": [{ "code": "B_EA" }]
        });
        assert!(validate(extract_product_detail(&record, "A_EA"), &PRODUCT_DETAIL_DTO).is_ok());
    }

    #[test]
    fn store_entity_matches_public_shape() {
        let store = StoreSummary {
            id: "1080".to_string(),
            name: "Queen & Portland".to_string(),
            address: StoreAddress {
                line1: "585 Queen St W".to_string(),
                line2: None,
                town: Some("Toronto".to_string()),
                region: Some("ON".to_string()),
                postal_code: None,
                country: Some("CA".to_string()),
            },
            geo: Some(Geo { lat: 43.6, lon: -79.4 }),
            pickup_type: "STORE".to_string(),
            open_now: None,
        };
        assert!(validate(store, &STORE_SUMMARY).is_ok());
    }

    #[test]
    fn search_page_matches_public_shape() {
        let page = SearchPage {
            items: vec![summary("A_EA"), summary("B_EA")],
            page: 1,
            page_size: 20,
            total: Some(2),
        };
        assert!(validate(page, &SEARCH_PAGE).is_ok());
        assert!(validate(SearchPage::empty(3, 10), &SEARCH_PAGE).is_ok());
    }

    #[test]
    fn search_page_rejects_zero_page_and_foreign_currency() {
        let value = json!({ "items": [], "page": 0, "pageSize": 10, "total": null });
        assert_eq!(check(&value, &SEARCH_PAGE).unwrap_err().path, "$.page");

        let mut item = serde_json::to_value(summary("A_EA")).unwrap();
        item["price"]["currency"] = json!("USD");
        let value = json!({ "items": [item], "page": 1, "pageSize": 10, "total": 1 });
        assert_eq!(
            check(&value, &SEARCH_PAGE).unwrap_err().path,
            "$.items[0].price.currency"
        );
    }
}
