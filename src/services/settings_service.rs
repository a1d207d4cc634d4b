use mongodb::bson::{Document, doc};
use mongodb::options::UpdateOptions;

use crate::AppState;
use crate::error::Error;

const WEBHOOK_URL_KEY: &str = "webhook_url";

pub async fn set_setting(state: &AppState, key: &str, value: &str) -> Result<(), Error> {
    let col = state.db.collection::<Document>("settings");

    col.update_one(
        doc! { "key": key },
        doc! { "$set": { "key": key, "value": value } },
        UpdateOptions::builder().upsert(true).build(),
    )
    .await
    .map_err(|e| Error::Persistence(e.to_string()))?;

    Ok(())
}

pub async fn get_setting(state: &AppState, key: &str) -> Result<Option<String>, Error> {
    let col = state.db.collection::<Document>("settings");

    let row = col
        .find_one(doc! { "key": key }, None)
        .await
        .map_err(|e| Error::Persistence(e.to_string()))?;

    Ok(row.and_then(|d| d.get_str("value").ok().map(|s| s.to_string())))
}

/// Notification destination: the runtime setting wins, then the
/// WEBHOOK_URL environment default. None means nothing is configured.
pub async fn webhook_url(state: &AppState) -> Result<Option<String>, Error> {
    if let Some(url) = get_setting(state, WEBHOOK_URL_KEY).await? {
        if !url.trim().is_empty() {
            return Ok(Some(url));
        }
    }

    let fallback = state.settings.webhook_url.trim();
    if fallback.is_empty() {
        Ok(None)
    } else {
        Ok(Some(fallback.to_string()))
    }
}

pub async fn set_webhook_url(state: &AppState, url: &str) -> Result<(), Error> {
    set_setting(state, WEBHOOK_URL_KEY, url.trim()).await
}
