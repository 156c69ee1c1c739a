//! Intermediate extraction results.
//!
//! DTOs carry the same information as the public entities but keep the
//! upstream's vocabulary (`code`, `image`) and loose typing. They are built by
//! [`crate::extract`], checked by [`crate::schema`] and consumed immediately
//! by [`crate::mapper`].

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreAddressDto {
    pub line1: String,
    pub line2: Option<String>,
    pub town: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoDto {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDto {
    pub id: String,
    pub name: String,
    pub address: StoreAddressDto,
    pub geo: Option<GeoDto>,
    pub pickup_type: Option<String>,
    pub open_now: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPriceDto {
    pub value: f64,
    pub unit: String,
    pub per_quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoDto {
    pub text: Option<String>,
    pub expires_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingDto {
    pub current: f64,
    pub regular: Option<f64>,
    pub unit_price: Option<UnitPriceDto>,
    pub promo: Option<PromoDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionDto {
    pub serving: Option<String>,
    pub calories: Option<String>,
    pub fat: Option<String>,
    pub carbs: Option<String>,
    pub protein: Option<String>,
    pub sub: BTreeMap<String, Option<String>>,
    pub micros: BTreeMap<String, Option<String>>,
    pub sodium: Option<String>,
    pub cholesterol: Option<String>,
    pub disclaimer: Option<String>,
    pub ingredients: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreadcrumbDto {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantDto {
    pub code: String,
    pub name: Option<String>,
}

/// Product extracted from either a search tile or a detail payload. Tiles
/// leave the detail-only fields empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub code: String,
    pub name: String,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub package_size: Option<String>,
    pub uom: Option<String>,
    pub pricing: Option<PricingDto>,
    pub nutrition: Option<NutritionDto>,
    pub breadcrumbs: Vec<BreadcrumbDto>,
    pub variants: Option<Vec<VariantDto>>,
}
