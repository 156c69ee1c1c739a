//! Subcommand handlers. Each prints the operation's result envelope as
//! pretty JSON.

use std::io::Write;

use csapi_client::{SuperstoreRepository, Transport};
use csapi_core::{ApiError, Envelope};
use serde::Serialize;

use crate::Commands;

/// Runs `command` and writes its envelope to `out`. Returns whether the
/// envelope is `ok`.
pub(crate) async fn run<T: Transport>(
    repo: &SuperstoreRepository<T>,
    command: Commands,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    match command {
        Commands::Stores => emit(out, repo.list_stores().await),
        Commands::Search {
            term,
            store,
            page,
            page_size,
        } => emit(
            out,
            repo.search_products(&term, &store, page, page_size).await,
        ),
        Commands::Detail { product_id, store } => {
            emit(out, repo.get_product_details(&product_id, &store).await)
        }
    }
}

fn emit<T: Serialize>(out: &mut impl Write, result: Result<T, ApiError>) -> anyhow::Result<bool> {
    if let Err(error) = &result {
        tracing::warn!(kind = %error.kind, code = ?error.code, "operation failed");
    }
    let envelope = Envelope::from(result);
    serde_json::to_writer_pretty(&mut *out, &envelope)?;
    writeln!(out)?;
    Ok(envelope.ok)
}
