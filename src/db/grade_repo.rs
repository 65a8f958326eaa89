use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson, Document};
use futures::TryStreamExt;
use mongodb::Collection;

use crate::db::MongoClient;

/// Upper bound on records returned by an unfiltered listing.
pub const LIST_LIMIT: i64 = 50;

/// Persistence operations the grade routes need. Implementations return the
/// store's own error type untouched; mapping to HTTP happens in the router.
#[async_trait]
pub trait GradeStore: Send + Sync {
    /// Inserts the document verbatim and returns the id the store assigned.
    async fn insert(&self, grade: Document) -> Result<Bson, mongodb::error::Error>;

    /// Up to `limit` records in the store's natural order.
    async fn list(&self, limit: i64) -> Result<Vec<Document>, mongodb::error::Error>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, mongodb::error::Error>;

    /// All records whose `student_id` is numerically equal to `student_id`.
    async fn find_by_student(
        &self,
        student_id: f64,
    ) -> Result<Vec<Document>, mongodb::error::Error>;
}

pub struct GradeRepository {
    client: MongoClient,
    collection_name: String,
}

impl GradeRepository {
    pub fn new(client: MongoClient, collection_name: impl Into<String>) -> Self {
        Self {
            client,
            collection_name: collection_name.into(),
        }
    }

    fn collection(&self) -> Collection<Document> {
        self.client.database().collection(&self.collection_name)
    }
}

#[async_trait]
impl GradeStore for GradeRepository {
    async fn insert(&self, grade: Document) -> Result<Bson, mongodb::error::Error> {
        let result = self.collection().insert_one(grade).await?;
        Ok(result.inserted_id)
    }

    async fn list(&self, limit: i64) -> Result<Vec<Document>, mongodb::error::Error> {
        self.collection()
            .find(doc! {})
            .limit(limit)
            .await?
            .try_collect()
            .await
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, mongodb::error::Error> {
        self.collection().find_one(doc! { "_id": id }).await
    }

    async fn find_by_student(
        &self,
        student_id: f64,
    ) -> Result<Vec<Document>, mongodb::error::Error> {
        // A double filter matches int32/int64/double fields with the same numeric value.
        self.collection()
            .find(doc! { "student_id": student_id })
            .await?
            .try_collect()
            .await
    }
}
