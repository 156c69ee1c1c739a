//! The three public operations: store listing, product search and product
//! detail.
//!
//! Each operation checks its arguments, makes one upstream call through a
//! [`Transport`], and runs the answer through extraction, shape validation and
//! mapping. Every failure comes back as a classified [`ApiError`].

use csapi_core::{
    ApiError, Banner, ClientConfig, ErrorKind, ProductDetail, SearchPage, StoreList,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{json, Value};

use crate::classify::{classify_transport, schema_defect};
use crate::error::TransportError;
use crate::extract::{extract_product_detail, extract_product_tiles, extract_stores};
use crate::fields::first_record;
use crate::mapper::{map_product_detail, map_product_summary, map_store};
use crate::schema::{
    validate, validate_all, SchemaViolation, PRODUCT_DETAIL_DTO, PRODUCT_SUMMARY_DTO, STORE_DTO,
};
use crate::transport::{HttpTransport, Transport, UpstreamRequest, UpstreamResponse};

const STORES_PATH: &str = "/api/v1/pickup-locations";
const SEARCH_PATH: &str = "/api/v2/products/search";
const PRODUCTS_PATH: &str = "/api/v1/products";

const API_KEY_HEADER: &str = "x-apikey";
const OFFER_TYPE: &str = "OG";
const PICKUP_TYPE: &str = "STORE";
const LANGUAGE: &str = "en";
/// Day the detail price is quoted for, as the upstream expects it.
const DATE_FORMAT: &str = "%d%m%Y";

/// Characters left alone when encoding a single path or query component:
/// ASCII alphanumerics plus `-_.!~*'()`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Client for the grocery API, generic over how upstream calls are made.
pub struct SuperstoreRepository<T> {
    transport: T,
    api_key: Option<String>,
    banner: Banner,
}

impl SuperstoreRepository<HttpTransport> {
    /// Builds a repository over an [`HttpTransport`] configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Ok(Self::new(HttpTransport::new(config)?, config))
    }
}

impl<T: Transport> SuperstoreRepository<T> {
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            api_key: config
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_string),
            banner: config.banner,
        }
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Lists the banner's pickup locations.
    ///
    /// # Errors
    ///
    /// - `unauthorized` when no API key is configured or the key is rejected.
    /// - `rate-limited`, `not-found`, `upstream-change` or `unknown` as
    ///   classified from the upstream answer.
    /// - `unknown` with code `schema-violation` when an extracted store breaks
    ///   the entity contract.
    pub async fn list_stores(&self) -> Result<StoreList, ApiError> {
        const OPERATION: &str = "store lookup";

        let path = format!(
            "{STORES_PATH}?bannerIds={}",
            encode(self.banner.as_str())
        );
        let response = self
            .call(UpstreamRequest::get(path))
            .await
            .map_err(|e| classify_call(&e, OPERATION))?;

        let dtos = validate_all(extract_stores(&response.data), &STORE_DTO)
            .map_err(|violation| defect(&violation, OPERATION))?;
        let items: Vec<_> = dtos.into_iter().map(map_store).collect();
        tracing::debug!(count = items.len(), "stores listed");
        Ok(StoreList { items })
    }

    /// Searches one store's catalogue. `page` is 1-based.
    ///
    /// A throttled search (HTTP 429) is not an error: it yields an empty page
    /// with `total` 0.
    ///
    /// # Errors
    ///
    /// - `invalid-params` for an empty `store_id` or `term`, or a zero `page`
    ///   or `page_size`; no upstream call is made.
    /// - `unauthorized` when no API key is configured or the key is rejected.
    /// - `upstream-change` or `unknown` for other upstream failures.
    /// - `unknown` with code `schema-violation` when an extracted tile breaks
    ///   the entity contract.
    pub async fn search_products(
        &self,
        term: &str,
        store_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<SearchPage, ApiError> {
        const OPERATION: &str = "product search";

        require_non_empty("storeId", store_id)?;
        require_non_empty("term", term)?;
        require_positive("page", page)?;
        require_positive("pageSize", page_size)?;

        let from = 1 + u64::from(page - 1) * u64::from(page_size);
        let body = json!({
            "cart": { "cartId": uuid::Uuid::new_v4().to_string() },
            "fulfillmentInfo": { "storeId": store_id.trim(), "offerType": OFFER_TYPE },
            "listingInfo": { "pagination": { "from": from } },
            "banner": self.banner.as_str(),
            "searchRelatedInfo": { "term": term.trim() },
        });

        let response = match self.call(UpstreamRequest::post(SEARCH_PATH, body)).await {
            Ok(response) => response,
            Err(e) if e.status() == Some(429) => {
                tracing::warn!(page, page_size, "product search rate limited, returning empty page");
                return Ok(SearchPage::empty(page, page_size));
            }
            Err(e) => return Err(classify_call(&e, OPERATION)),
        };

        let dtos = validate_all(extract_product_tiles(&response.data), &PRODUCT_SUMMARY_DTO)
            .map_err(|violation| defect(&violation, OPERATION))?;
        let items: Vec<_> = dtos.into_iter().map(map_product_summary).collect();
        tracing::debug!(count = items.len(), page, page_size, "product search completed");

        Ok(SearchPage {
            total: Some(items.len() as u64),
            items,
            page,
            page_size,
        })
    }

    /// Fetches one product as sold at `store_id` today.
    ///
    /// # Errors
    ///
    /// - `invalid-params` for an empty `product_id` or `store_id`; no upstream
    ///   call is made.
    /// - `unauthorized` when no API key is configured or the key is rejected.
    /// - `not-found` for HTTP 404 or an empty answer.
    /// - `rate-limited`, `upstream-change` or `unknown` for other failures.
    /// - `unknown` with code `schema-violation` when the extracted product
    ///   breaks the entity contract.
    pub async fn get_product_details(
        &self,
        product_id: &str,
        store_id: &str,
    ) -> Result<ProductDetail, ApiError> {
        const OPERATION: &str = "product detail";

        require_non_empty("storeId", store_id)?;
        require_non_empty("productId", product_id)?;
        let product_id = product_id.trim();

        let date = chrono::Local::now().format(DATE_FORMAT).to_string();
        let path = format!(
            "{PRODUCTS_PATH}/{}?lang={LANGUAGE}&date={date}&pickupType={PICKUP_TYPE}&storeId={}&banner={}",
            encode(product_id),
            encode(store_id.trim()),
            encode(self.banner.as_str()),
        );
        let response = self
            .call(UpstreamRequest::get(path))
            .await
            .map_err(|e| classify_call(&e, OPERATION))?;

        let record = match (&response.data, first_record(&response.data)) {
            (_, Some(record)) => record,
            (Value::Null, None) => {
                return Err(ApiError::not_found(format!(
                    "{OPERATION}: no product {product_id} at store {}",
                    store_id.trim()
                ))
                .with_code("no-content"));
            }
            (_, None) => {
                return Err(ApiError::new(
                    ErrorKind::UpstreamChange,
                    format!("{OPERATION}: answer is not a product record"),
                )
                .with_code("unexpected-payload")
                .with_retryable(false));
            }
        };

        let dto = validate(extract_product_detail(record, product_id), &PRODUCT_DETAIL_DTO)
            .map_err(|violation| defect(&violation, OPERATION))?;
        Ok(map_product_detail(dto))
    }

    /// Attaches the API key and performs the call. A missing key fails
    /// before the transport is touched.
    async fn call(&self, request: UpstreamRequest) -> Result<UpstreamResponse, CallError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(CallError::MissingKey);
        };
        self.transport
            .perform(request.header(API_KEY_HEADER, api_key))
            .await
            .map_err(CallError::Transport)
    }
}

/// Why a call produced no response.
enum CallError {
    MissingKey,
    Transport(TransportError),
}

impl CallError {
    fn status(&self) -> Option<u16> {
        match self {
            CallError::MissingKey => None,
            CallError::Transport(e) => e.status(),
        }
    }
}

fn classify_call(error: &CallError, operation: &str) -> ApiError {
    match error {
        CallError::MissingKey => ApiError::new(
            ErrorKind::Unauthorized,
            format!("{operation}: no API key configured (set SUPERSTORE_API_KEY)"),
        )
        .with_code("missing-key")
        .with_retryable(false),
        CallError::Transport(e) => classify_transport(e, operation),
    }
}

fn defect(violation: &SchemaViolation, operation: &str) -> ApiError {
    tracing::error!(
        operation,
        path = %violation.path,
        expected = %violation.expected,
        found = %violation.found,
        "extracted data violates entity contract"
    );
    schema_defect(violation, operation)
}

fn require_non_empty(name: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::invalid_params(format!("{name} must not be empty"))
            .with_code(format!("missing-{name}")));
    }
    Ok(())
}

fn require_positive(name: &str, value: u32) -> Result<(), ApiError> {
    if value == 0 {
        return Err(ApiError::invalid_params(format!(
            "{name} must be a positive integer, got {value}"
        ))
        .with_code(format!("invalid-{name}")));
    }
    Ok(())
}

fn encode(component: &str) -> String {
    utf8_percent_encode(component, COMPONENT).to_string()
}

#[cfg(test)]
#[path = "repository_test.rs"]
mod tests;
