use mongodb::bson::oid::ObjectId;
use strikewatch::models::{Alert, Candle};
use strikewatch::services::alert_monitor::evaluate;

fn alert(strike: f64, direction: &str) -> Alert {
    Alert {
        id: ObjectId::new(),
        symbol: "BTCUSDT".to_string(),
        direction: direction.to_string(),
        strike,
        note: String::new(),
        created_at: 0,
        fired: false,
        fired_at: None,
    }
}

fn candle(low: f64, high: f64) -> Candle {
    Candle {
        symbol: "BTCUSDT".to_string(),
        open_time: 1_700_000_000_000,
        close_time: 1_700_000_059_999,
        open: (low + high) / 2.0,
        high,
        low,
        close: (low + high) / 2.0,
        volume: 12.5,
    }
}

#[test]
fn touch_fires_when_range_includes_strike() {
    let hits = evaluate(&candle(99_800.0, 100_200.0), &[alert(100_000.0, "touch")]);

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].price, 100_000.0);
}

#[test]
fn touch_does_not_fire_when_candle_stays_below_strike() {
    let hits = evaluate(&candle(99_000.0, 99_900.0), &[alert(100_000.0, "touch")]);
    assert!(hits.is_empty());
}

#[test]
fn touch_does_not_fire_when_candle_stays_above_strike() {
    let hits = evaluate(&candle(100_100.0, 100_300.0), &[alert(100_000.0, "touch")]);
    assert!(hits.is_empty());
}

#[test]
fn touch_fires_on_exact_high_boundary() {
    let hits = evaluate(&candle(99_000.0, 100_000.0), &[alert(100_000.0, "touch")]);
    assert_eq!(hits.len(), 1);
}

#[test]
fn touch_fires_on_exact_low_boundary() {
    let hits = evaluate(&candle(100_000.0, 100_500.0), &[alert(100_000.0, "touch")]);
    assert_eq!(hits.len(), 1);
}

#[test]
fn up_reports_the_candle_high() {
    let hits = evaluate(&candle(99_500.0, 100_500.0), &[alert(100_000.0, "up")]);

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].price, 100_500.0);
}

#[test]
fn down_reports_the_candle_low() {
    let hits = evaluate(&candle(99_500.0, 100_500.0), &[alert(100_000.0, "down")]);

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].price, 99_500.0);
}

#[test]
fn up_does_not_fire_when_candle_never_reaches_the_strike() {
    let hits = evaluate(&candle(99_000.0, 99_900.0), &[alert(100_000.0, "up")]);
    assert!(hits.is_empty());
}

#[test]
fn down_does_not_fire_when_candle_stays_above_the_strike() {
    let hits = evaluate(&candle(100_100.0, 100_300.0), &[alert(100_000.0, "down")]);
    assert!(hits.is_empty());
}

#[test]
fn already_fired_alerts_are_skipped() {
    let mut a = alert(100_000.0, "touch");
    a.fired = true;

    let hits = evaluate(&candle(99_800.0, 100_200.0), &[a]);
    assert!(hits.is_empty());
}

#[test]
fn only_matching_alerts_in_a_group_fire() {
    let alerts = vec![
        alert(100_000.0, "touch"),
        alert(250_000.0, "touch"),
        alert(99_900.0, "up"),
    ];

    let hits = evaluate(&candle(99_800.0, 100_200.0), &alerts);

    let strikes: Vec<f64> = hits.iter().map(|h| h.alert.strike).collect();
    assert_eq!(strikes, vec![100_000.0, 99_900.0]);
}

#[test]
fn evaluation_order_does_not_change_which_alerts_fire() {
    let a = alert(100_000.0, "touch");
    let b = alert(99_900.0, "down");
    let c = alert(250_000.0, "up");

    let forward = vec![a.clone(), b.clone(), c.clone()];
    let backward = vec![c, b, a];

    let candle = candle(99_800.0, 100_200.0);

    let mut fired_fwd: Vec<String> = evaluate(&candle, &forward)
        .iter()
        .map(|h| h.alert.id.to_hex())
        .collect();
    let mut fired_bwd: Vec<String> = evaluate(&candle, &backward)
        .iter()
        .map(|h| h.alert.id.to_hex())
        .collect();

    fired_fwd.sort();
    fired_bwd.sort();
    assert_eq!(fired_fwd, fired_bwd);
    assert_eq!(fired_fwd.len(), 2);
}
