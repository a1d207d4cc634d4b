use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::AppState;
use crate::error::Error;
use crate::models::{Alert, Candle};
use crate::services::{alerts_service, notifier, settings_service};

/// One matched alert together with the price that satisfied it: candle high
/// for "up", candle low for "down", the strike itself for "touch".
#[derive(Debug, Clone)]
pub struct AlertHit {
    pub alert: Alert,
    pub price: f64,
}

/// Runs the polling loop until `shutdown` flips. Passes never overlap: the
/// loop awaits each tick's work before waiting for the next tick, so two
/// passes can never race over the same symbol's alerts.
pub fn spawn_price_alert_monitor(
    state: AppState,
    mut shutdown: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_secs(state.settings.poll_interval_secs));
        // A slow pass delays the next tick instead of piling catch-up ticks.
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        // close_time of the last candle evaluated, per symbol. A candle the
        // previous pass already saw is skipped, and candles that closed
        // before the process started are only ever seen once.
        let mut last_checked: HashMap<String, i64> = HashMap::new();

        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = shutdown.changed() => break,
            }

            if let Err(e) = run_tick(&state, &mut last_checked).await {
                tracing::warn!("alert monitor tick error: {}", e);
            }
        }

        tracing::info!("alert monitor stopped");
    })
}

/// One polling pass: group unfired alerts by symbol, fetch one candle per
/// symbol, evaluate, and fire the matches. A failure on one symbol never
/// stops the others; a failure of the whole pass is retried next tick.
pub async fn run_tick(
    state: &AppState,
    last_checked: &mut HashMap<String, i64>,
) -> Result<(), Error> {
    let by_symbol = alerts_service::group_by_symbol(state).await?;
    if by_symbol.is_empty() {
        return Ok(());
    }

    // Nowhere to announce fires: leave every alert untouched rather than
    // consume them silently.
    let Some(webhook_url) = settings_service::webhook_url(state).await? else {
        tracing::warn!("no webhook destination configured; skipping alert pass");
        return Ok(());
    };

    for (sym, group) in by_symbol {
        let candle = match state.binance.get_latest_candle(&sym).await {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("candle fetch failed for {}: {}", sym, e);
                continue;
            }
        };

        if last_checked.get(&sym) == Some(&candle.close_time) {
            continue;
        }
        last_checked.insert(sym, candle.close_time);

        for hit in evaluate(&candle, &group) {
            fire_alert(state, &webhook_url, &hit, &candle).await;
        }
    }

    Ok(())
}

/// Pure matching step: which of the symbol's unfired alerts does this candle
/// trigger? Alerts are judged independently, so their order never changes
/// which ones fire. An alert fires when the candle's [low, high] range
/// includes the strike; "up" and "down" narrow that to the matching side.
pub fn evaluate(candle: &Candle, alerts: &[Alert]) -> Vec<AlertHit> {
    let mut hits = Vec::new();

    for alert in alerts {
        if alert.fired {
            continue;
        }

        let touched = candle.low <= alert.strike && alert.strike <= candle.high;

        let hit = match alert.direction.as_str() {
            "up" => touched && candle.high >= alert.strike,
            "down" => touched && candle.low <= alert.strike,
            _ => touched,
        };
        if !hit {
            continue;
        }

        let price = match alert.direction.as_str() {
            "up" => candle.high,
            "down" => candle.low,
            _ => alert.strike,
        };

        hits.push(AlertHit {
            alert: alert.clone(),
            price,
        });
    }

    hits
}

// Mark first, notify second. A crash in between loses at most one
// notification; it can never fire the same alert twice.
async fn fire_alert(state: &AppState, webhook_url: &str, hit: &AlertHit, candle: &Candle) {
    let newly_fired = match alerts_service::mark_fired(state, hit.alert.id).await {
        Ok(v) => v,
        Err(e) => {
            // Alert stays unfired in the store; next pass retries it.
            tracing::warn!("mark_fired failed for alert {}: {}", hit.alert.id.to_hex(), e);
            return;
        }
    };
    if !newly_fired {
        return;
    }

    let payload = notifier::build_payload(&hit.alert, hit.price, candle);
    match state.notifier.send(webhook_url, &payload).await {
        Ok(()) => {
            tracing::info!(
                "alert {} fired: {} {} {}",
                hit.alert.id.to_hex(),
                hit.alert.symbol,
                hit.alert.direction,
                hit.alert.strike
            );
        }
        Err(e) => {
            // At-most-once delivery: the fired mark stands.
            tracing::warn!(
                "notification failed for alert {}: {}",
                hit.alert.id.to_hex(),
                e
            );
        }
    }
}
