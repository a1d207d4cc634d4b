use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub symbol: String,

    // "up" | "down" | "touch"
    pub direction: String,
    pub strike: f64,
    pub note: String,

    pub created_at: i64,

    // Terminal: once true the alert is never evaluated again.
    pub fired: bool,
    pub fired_at: Option<i64>,
}
