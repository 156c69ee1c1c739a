use serde_json::Value;

use crate::coerce;
use crate::dto::{GeoDto, StoreAddressDto, StoreDto};
use crate::fields::{first_match, lookup, FieldPath};

const ID: &[FieldPath] = &[&["storeId"], &["id"]];
const NAME: &[FieldPath] = &[&["name"]];
const LINE1: &[FieldPath] = &[&["address", "line1"], &["address1"], &["address"]];
const LINE2: &[FieldPath] = &[&["address", "line2"], &["address2"]];
const TOWN: &[FieldPath] = &[&["address", "city"], &["city"]];
const REGION: &[FieldPath] = &[&["address", "province"], &["province"], &["region"]];
const POSTAL_CODE: &[FieldPath] = &[&["address", "postalCode"], &["postalCode"]];
const COUNTRY: &[FieldPath] = &[&["address", "country"]];
const PICKUP_TYPE: &[FieldPath] = &[&["pickupType"]];
const OPEN_NOW: &[FieldPath] = &[&["openNow"]];
const LATITUDE: &[FieldPath] = &[&["latitude"], &["lat"]];
const LONGITUDE: &[FieldPath] = &[&["longitude"], &["lon"]];

const DEFAULT_COUNTRY: &str = "CA";

/// Extracts a pickup location record.
#[must_use]
pub fn extract_store(record: &Value) -> StoreDto {
    let text = |candidates: &[FieldPath]| first_match(record, candidates, coerce::string);

    StoreDto {
        id: first_match(record, ID, coerce::non_empty_string).unwrap_or_default(),
        name: first_match(record, NAME, coerce::non_empty_string).unwrap_or_default(),
        address: StoreAddressDto {
            line1: first_match(record, LINE1, coerce::non_empty_string).unwrap_or_default(),
            line2: text(LINE2),
            town: text(TOWN),
            region: text(REGION),
            postal_code: text(POSTAL_CODE),
            country: Some(text(COUNTRY).unwrap_or_else(|| DEFAULT_COUNTRY.to_string())),
        },
        geo: lookup(record, &["geoPoint"]).and_then(extract_geo),
        pickup_type: text(PICKUP_TYPE),
        open_now: first_match(record, OPEN_NOW, coerce::boolean),
    }
}

/// Both coordinates must resolve; half a coordinate is no coordinate.
fn extract_geo(point: &Value) -> Option<GeoDto> {
    if !point.is_object() {
        return None;
    }
    let lat = first_match(point, LATITUDE, coerce::number)?;
    let lon = first_match(point, LONGITUDE, coerce::number)?;
    Some(GeoDto { lat, lon })
}
