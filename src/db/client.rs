use bson::doc;
use mongodb::{Client, Database};

pub struct MongoClient {
    db: Database,
}

impl MongoClient {
    pub async fn new(url: &str, db_name: &str) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(url).await?;
        let db = client.database(db_name);

        Ok(Self { db })
    }

    /// The driver connects lazily; this forces a round-trip so startup fails
    /// fast on a bad URI or unreachable server.
    pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
