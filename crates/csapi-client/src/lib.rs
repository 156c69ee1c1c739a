//! Client for the PC Express grocery API serving the Real Canadian
//! Superstore banner.
//!
//! Upstream payloads are treated as untrusted JSON: entity extractors pull
//! each attribute from an ordered list of candidate fields, the schema
//! validator checks the result against the public contract, and the mapper
//! produces the typed entities from `csapi-core`. [`SuperstoreRepository`]
//! ties the pipeline to a [`Transport`].

pub mod classify;
pub mod coerce;
pub mod dto;
pub mod error;
pub mod extract;
pub mod fields;
pub mod locate;
pub mod mapper;
pub mod repository;
pub mod schema;
pub mod transport;

pub use error::TransportError;
pub use repository::SuperstoreRepository;
pub use schema::{SchemaViolation, Shape, Validated};
pub use transport::{HttpTransport, Transport, UpstreamRequest, UpstreamResponse};
