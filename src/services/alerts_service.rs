use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::Utc;
use futures_util::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::FindOptions;
use regex::Regex;

use crate::error::Error;
use crate::services::binance;
use crate::{models::Alert, AppState};

static SYMBOL_RE: OnceLock<Regex> = OnceLock::new();

fn symbol_re() -> &'static Regex {
    SYMBOL_RE.get_or_init(|| Regex::new("^[A-Z0-9]{5,20}$").expect("symbol regex"))
}

/// Checks and normalizes alert input. Returns (symbol, direction) ready for
/// storage; direction defaults to "touch" when the caller gives none.
pub fn validate_alert_input(
    symbol: &str,
    strike: f64,
    direction: Option<&str>,
) -> Result<(String, String), Error> {
    let sym = binance::normalize_symbol(symbol);
    if sym.is_empty() {
        return Err(Error::Validation("symbol must not be empty".to_string()));
    }
    if !symbol_re().is_match(&sym) {
        return Err(Error::Validation(format!("malformed symbol: {sym}")));
    }

    if !strike.is_finite() || strike <= 0.0 {
        return Err(Error::Validation(
            "strike must be a positive number".to_string(),
        ));
    }

    let dir = direction.unwrap_or("touch").trim().to_lowercase();
    let dir = if dir.is_empty() { "touch".to_string() } else { dir };
    if dir != "up" && dir != "down" && dir != "touch" {
        return Err(Error::Validation(format!("invalid direction: {dir}")));
    }

    Ok((sym, dir))
}

pub async fn create_alert(
    state: &AppState,
    symbol: &str,
    strike: f64,
    direction: Option<&str>,
    note: &str,
) -> Result<Alert, Error> {
    let (sym, dir) = validate_alert_input(symbol, strike, direction)?;

    let alerts = state.db.collection::<Alert>("alerts");

    let alert = Alert {
        id: ObjectId::new(),
        symbol: sym,
        direction: dir,
        strike,
        note: note.trim().to_string(),
        created_at: Utc::now().timestamp(),
        fired: false,
        fired_at: None,
    };

    alerts
        .insert_one(&alert, None)
        .await
        .map_err(|e| Error::Persistence(e.to_string()))?;

    Ok(alert)
}

/// Unfired alerts in creation order.
pub async fn list_active(state: &AppState) -> Result<Vec<Alert>, Error> {
    let alerts = state.db.collection::<Alert>("alerts");

    let find_opts = FindOptions::builder()
        .sort(doc! { "created_at": 1, "_id": 1 })
        .build();

    let mut cursor = alerts
        .find(doc! { "fired": false }, find_opts)
        .await
        .map_err(|e| Error::Persistence(e.to_string()))?;

    let mut items: Vec<Alert> = Vec::new();
    while let Some(res) = cursor.next().await {
        items.push(res.map_err(|e| Error::Persistence(e.to_string()))?);
    }

    Ok(items)
}

pub async fn remove_alert(state: &AppState, alert_id: ObjectId) -> Result<bool, Error> {
    let alerts = state.db.collection::<Alert>("alerts");

    let res = alerts
        .delete_one(doc! { "_id": alert_id }, None)
        .await
        .map_err(|e| Error::Persistence(e.to_string()))?;

    Ok(res.deleted_count > 0)
}

/// Returns true if the alert was newly fired, false if it was already fired
/// or no longer exists. The `fired: false` filter makes the transition
/// atomic, so two callers can never both claim the same alert.
pub async fn mark_fired(state: &AppState, alert_id: ObjectId) -> Result<bool, Error> {
    let alerts = state.db.collection::<Alert>("alerts");
    let now = Utc::now().timestamp();

    let res = alerts
        .update_one(
            doc! { "_id": alert_id, "fired": false },
            doc! { "$set": { "fired": true, "fired_at": now } },
            None,
        )
        .await
        .map_err(|e| Error::Persistence(e.to_string()))?;

    Ok(res.matched_count > 0)
}

/// Unfired alerts keyed by symbol, each group in creation order. One call
/// per polling pass.
pub async fn group_by_symbol(state: &AppState) -> Result<BTreeMap<String, Vec<Alert>>, Error> {
    let alerts = state.db.collection::<Alert>("alerts");

    let find_opts = FindOptions::builder()
        .sort(doc! { "created_at": 1, "_id": 1 })
        .build();

    let mut cursor = alerts
        .find(doc! { "fired": false }, find_opts)
        .await
        .map_err(|e| Error::Persistence(e.to_string()))?;

    let mut map: BTreeMap<String, Vec<Alert>> = BTreeMap::new();
    while let Some(res) = cursor.next().await {
        let a = res.map_err(|e| Error::Persistence(e.to_string()))?;
        map.entry(a.symbol.clone()).or_default().push(a);
    }

    Ok(map)
}
