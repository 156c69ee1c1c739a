use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreAddress {
    pub line1: String,
    pub line2: Option<String>,
    pub town: Option<String>,
    /// Province code, e.g. `"ON"`.
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: f64,
    pub lon: f64,
}

/// A pickup location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    /// Store identifier used to scope search and detail calls.
    pub id: String,
    pub name: String,
    pub address: StoreAddress,
    pub geo: Option<Geo>,
    /// Fulfilment mode, `"STORE"` unless the upstream says otherwise.
    pub pickup_type: String,
    pub open_now: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreList {
    pub items: Vec<StoreSummary>,
}

impl StoreList {
    /// Looks a store up by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&StoreSummary> {
        self.items.iter().find(|store| store.id == id)
    }
}
