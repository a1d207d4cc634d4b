use mongodb::{
    bson::doc,
    options::IndexOptions,
    Database, IndexModel,
};

use crate::error::Error;

pub async fn ensure_indexes(db: &Database) -> Result<(), Error> {
    // alerts: monitor scans unfired alerts grouped by symbol
    {
        let col = db.collection::<mongodb::bson::Document>("alerts");
        let model = IndexModel::builder()
            .keys(doc! { "fired": 1, "symbol": 1 })
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| Error::Persistence(e.to_string()))?;
    }

    // alerts: listing in creation order
    {
        let col = db.collection::<mongodb::bson::Document>("alerts");
        let model = IndexModel::builder()
            .keys(doc! { "created_at": 1 })
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| Error::Persistence(e.to_string()))?;
    }

    // settings: one row per key
    {
        let col = db.collection::<mongodb::bson::Document>("settings");
        let model = IndexModel::builder()
            .keys(doc! { "key": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        col.create_index(model, None)
            .await
            .map_err(|e| Error::Persistence(e.to_string()))?;
    }

    Ok(())
}
