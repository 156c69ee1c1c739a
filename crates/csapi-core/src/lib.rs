mod app_config;
mod config;
pub mod outcome;
pub mod products;
pub mod stores;

pub use app_config::{Banner, ClientConfig};
pub use config::{
    build_client_config, load_client_config, load_client_config_from_env, DEFAULT_BASE_URL,
};
pub use outcome::{ApiError, Envelope, ErrorKind};
pub use products::{
    Breadcrumb, Currency, Macros, Nutrition, PriceSummary, Pricing, ProductDetail, ProductSummary,
    Promo, SearchPage, UnitPrice, Variant,
};
pub use stores::{Geo, StoreAddress, StoreList, StoreSummary};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
