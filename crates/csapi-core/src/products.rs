use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Currency of every monetary value. The upstream only prices in Canadian
/// dollars, so this is a single-value type rather than a free-form code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "CAD")]
    Cad,
}

/// Price block attached to a search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub current: f64,
    pub regular: Option<f64>,
    pub currency: Currency,
}

/// A product as it appears in a search listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    /// Chain-wide product code, e.g. `"21053436_EA"`.
    pub id: String,
    pub name: String,
    pub brand: Option<String>,
    pub image_url: Option<String>,
    /// Free-form size label, e.g. `"6 rolls"` or `"2 l"`.
    pub package_size: Option<String>,
    pub price: PriceSummary,
}

/// Price per comparison unit, e.g. `$2.16 / 100 sheets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPrice {
    pub value: f64,
    pub unit: String,
    pub per_quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promo {
    pub text: Option<String>,
    pub expires_at: Option<String>,
}

/// Full price information for a product at one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub current: f64,
    pub regular: Option<f64>,
    pub currency: Currency,
    pub unit_price: Option<UnitPrice>,
    pub promo: Option<Promo>,
}

/// Fat/carb/protein block. `sub` holds whatever extra breakdown the upstream
/// sends (fibre, sugars, …) keyed by the upstream's own names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macros {
    pub fat: Option<String>,
    pub carbs: Option<String>,
    pub protein: Option<String>,
    pub sub: BTreeMap<String, Option<String>>,
}

/// Nutrition facts. Values are kept as the display strings the upstream
/// sends (`"4g"`, `"10%"`) since units vary per product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrition {
    pub serving: Option<String>,
    pub calories: Option<String>,
    pub macros: Macros,
    pub micros: BTreeMap<String, Option<String>>,
    pub sodium: Option<String>,
    pub cholesterol: Option<String>,
    pub disclaimer: Option<String>,
    pub ingredients: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    pub name: Option<String>,
}

/// Detailed view of a product scoped to one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub id: String,
    pub name: String,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub package_size: Option<String>,
    /// Unit of measure the product is sold by, e.g. `"EA"` or `"KG"`.
    pub uom: Option<String>,
    pub pricing: Pricing,
    pub nutrition: Option<Nutrition>,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub variants: Option<Vec<Variant>>,
}

impl ProductDetail {
    /// Returns `true` when a previous (regular) price above the current one
    /// is known.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.pricing
            .regular
            .is_some_and(|regular| regular > self.pricing.current)
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub items: Vec<ProductSummary>,
    pub page: u32,
    pub page_size: u32,
    /// Total number of matches, when known.
    pub total: Option<u64>,
}

impl SearchPage {
    /// An empty page, used when the upstream gives nothing back for a page.
    #[must_use]
    pub fn empty(page: u32, page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            page,
            page_size,
            total: Some(0),
        }
    }
}
