//! HTTP client for the remote product store.
//!
//! The store owns persistence and mutation semantics; this module is a pure
//! consumer of its CRUD surface. Fetch results stay as raw JSON values here
//! and are shaped by `contracts::domain::product::normalize_product` at the
//! point of use.

use crate::shared::api_utils::{api_url, encode_q};
use contracts::shared::pagination::{ListResponse, SortDirection};
use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::{json, Value};

/// Itemized outcome of a batched variant deletion. A store that deletes
/// all-or-nothing simply reports every key in one of the two lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkDeleteOutcome {
    #[serde(default)]
    pub deleted: Vec<String>,
    #[serde(default)]
    pub failed: Vec<FailedDelete>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FailedDelete {
    #[serde(rename = "pluUpc")]
    pub plu_upc: String,
    #[serde(default)]
    pub error: String,
}

/// Server-paginated product listing.
#[allow(clippy::too_many_arguments)]
pub async fn list_products(
    page: usize,
    limit: usize,
    search: Option<&str>,
    sort_key: Option<&str>,
    sort_dir: Option<SortDirection>,
    store_id: Option<&str>,
    category_id: Option<&str>,
) -> Result<ListResponse, String> {
    let mut url = api_url(&format!("/api/products?page={}&limit={}", page, limit));
    if let Some(q) = search.map(str::trim).filter(|q| !q.is_empty()) {
        url.push_str(&format!("&search={}", encode_q(q)));
    }
    if let Some(key) = sort_key {
        url.push_str(&format!("&sortKey={}", encode_q(key)));
        if let Some(dir) = sort_dir {
            url.push_str(&format!("&sortDir={}", dir.as_str()));
        }
    }
    if let Some(store) = store_id {
        url.push_str(&format!("&storeId={}", encode_q(store)));
    }
    if let Some(cat) = category_id {
        url.push_str(&format!("&categoryId={}", encode_q(cat)));
    }

    let resp = Request::get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| format!("{e}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    resp.json::<ListResponse>().await.map_err(|e| format!("{e}"))
}

/// Ad-hoc full-result-set search; the caller paginates client-side.
pub async fn search_products(term: &str, store_id: Option<&str>) -> Result<Vec<Value>, String> {
    let mut url = api_url(&format!("/api/products/search?term={}", encode_q(term.trim())));
    if let Some(store) = store_id {
        url.push_str(&format!("&storeId={}", encode_q(store)));
    }

    let resp = Request::get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| format!("{e}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    resp.json::<Vec<Value>>().await.map_err(|e| format!("{e}"))
}

pub async fn update_product_quantity(product_id: &str, quantity: i64) -> Result<(), String> {
    let url = api_url(&format!(
        "/api/products/{}/quantity",
        encode_q(product_id)
    ));
    send_no_content(
        Request::patch(&url)
            .json(&json!({ "quantity": quantity }))
            .map_err(|e| format!("{e}"))?,
    )
    .await
}

/// Variant quantities are keyed by `pluUpc`, the authoritative external
/// identifier for variant-level mutation.
pub async fn update_variant_quantity_by_key(plu_upc: &str, quantity: i64) -> Result<(), String> {
    let url = api_url(&format!(
        "/api/products/variants/{}/quantity",
        encode_q(plu_upc)
    ));
    send_no_content(
        Request::patch(&url)
            .json(&json!({ "quantity": quantity }))
            .map_err(|e| format!("{e}"))?,
    )
    .await
}

pub async fn delete_product(product_id: &str) -> Result<(), String> {
    let url = api_url(&format!("/api/products/{}", encode_q(product_id)));
    send_no_content(Request::delete(&url).build().map_err(|e| format!("{e}"))?).await
}

pub async fn delete_variant(plu_upc: &str) -> Result<(), String> {
    let url = api_url(&format!("/api/products/variants/{}", encode_q(plu_upc)));
    send_no_content(Request::delete(&url).build().map_err(|e| format!("{e}"))?).await
}

/// One batched call for the whole selection. A store without itemized
/// reporting yields an empty body; that is treated as "everything deleted".
pub async fn bulk_delete_variants(plu_upc_list: &[String]) -> Result<BulkDeleteOutcome, String> {
    let url = api_url("/api/products/variants/bulk-delete");
    let resp = Request::post(&url)
        .json(&json!({ "pluUpcs": plu_upc_list }))
        .map_err(|e| format!("{e}"))?
        .send()
        .await
        .map_err(|e| format!("{e}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    match resp.json::<BulkDeleteOutcome>().await {
        Ok(outcome) => Ok(outcome),
        Err(_) => Ok(BulkDeleteOutcome {
            deleted: plu_upc_list.to_vec(),
            failed: vec![],
        }),
    }
}

async fn send_no_content(req: gloo_net::http::Request) -> Result<(), String> {
    let resp = req.send().await.map_err(|e| format!("{e}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    Ok(())
}
