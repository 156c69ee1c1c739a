//! DTO to domain entity mapping.
//!
//! Every function here takes a [`Validated`] DTO, so the shape is already
//! guaranteed and mapping cannot fail. Mapping only renames fields and fills
//! literal defaults.

use csapi_core::{
    Breadcrumb, Currency, Geo, Macros, Nutrition, PriceSummary, Pricing, ProductDetail,
    ProductSummary, Promo, StoreAddress, StoreSummary, UnitPrice, Variant,
};

use crate::dto::{
    BreadcrumbDto, NutritionDto, PricingDto, ProductDto, PromoDto, StoreDto, UnitPriceDto,
    VariantDto,
};
use crate::schema::Validated;

/// Pickup mode assumed when the upstream record does not name one.
pub const DEFAULT_PICKUP_TYPE: &str = "STORE";

#[must_use]
pub fn map_store(dto: Validated<StoreDto>) -> StoreSummary {
    let StoreDto {
        id,
        name,
        address,
        geo,
        pickup_type,
        open_now,
    } = dto.into_inner();

    StoreSummary {
        id,
        name,
        address: StoreAddress {
            line1: address.line1,
            line2: address.line2,
            town: address.town,
            region: address.region,
            postal_code: address.postal_code,
            country: address.country,
        },
        geo: geo.map(|g| Geo { lat: g.lat, lon: g.lon }),
        pickup_type: pickup_type
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PICKUP_TYPE.to_string()),
        open_now,
    }
}

#[must_use]
pub fn map_product_summary(dto: Validated<ProductDto>) -> ProductSummary {
    let dto = dto.into_inner();
    let (current, regular) = dto
        .pricing
        .map_or((0.0, None), |pricing| (pricing.current, pricing.regular));

    ProductSummary {
        id: dto.code,
        name: dto.name,
        brand: dto.brand,
        image_url: dto.image,
        package_size: dto.package_size,
        price: PriceSummary {
            current,
            regular,
            currency: Currency::Cad,
        },
    }
}

#[must_use]
pub fn map_product_detail(dto: Validated<ProductDto>) -> ProductDetail {
    let dto = dto.into_inner();

    ProductDetail {
        id: dto.code,
        name: dto.name,
        brand: dto.brand,
        description: dto.description,
        image_url: dto.image,
        package_size: dto.package_size,
        uom: dto.uom,
        pricing: dto.pricing.map_or_else(unpriced, map_pricing),
        nutrition: dto.nutrition.map(map_nutrition),
        breadcrumbs: dto.breadcrumbs.into_iter().map(map_breadcrumb).collect(),
        variants: dto
            .variants
            .map(|variants| variants.into_iter().map(map_variant).collect()),
    }
}

fn unpriced() -> Pricing {
    Pricing {
        current: 0.0,
        regular: None,
        currency: Currency::Cad,
        unit_price: None,
        promo: None,
    }
}

fn map_pricing(pricing: PricingDto) -> Pricing {
    Pricing {
        current: pricing.current,
        regular: pricing.regular,
        currency: Currency::Cad,
        unit_price: pricing.unit_price.map(map_unit_price),
        promo: pricing.promo.map(map_promo),
    }
}

fn map_unit_price(unit: UnitPriceDto) -> UnitPrice {
    UnitPrice {
        value: unit.value,
        unit: unit.unit,
        per_quantity: unit.per_quantity,
    }
}

fn map_promo(promo: PromoDto) -> Promo {
    Promo {
        text: promo.text,
        expires_at: promo.expires_at,
    }
}

fn map_nutrition(nutrition: NutritionDto) -> Nutrition {
    Nutrition {
        serving: nutrition.serving,
        calories: nutrition.calories,
        macros: Macros {
            fat: nutrition.fat,
            carbs: nutrition.carbs,
            protein: nutrition.protein,
            sub: nutrition.sub,
        },
        micros: nutrition.micros,
        sodium: nutrition.sodium,
        cholesterol: nutrition.cholesterol,
        disclaimer: nutrition.disclaimer,
        ingredients: nutrition.ingredients,
    }
}

fn map_breadcrumb(crumb: BreadcrumbDto) -> Breadcrumb {
    Breadcrumb {
        code: crumb.code,
        name: crumb.name,
    }
}

fn map_variant(variant: VariantDto) -> Variant {
    Variant {
        id: variant.code,
        name: variant.name,
    }
}
