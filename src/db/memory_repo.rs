use async_trait::async_trait;
use bson::{oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;

use crate::db::GradeStore;

/// In-process stand-in for the grades collection, used by route tests.
#[derive(Default)]
pub struct MemoryGradeStore {
    grades: RwLock<Vec<Document>>,
}

impl MemoryGradeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.grades.read().await.len()
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}

#[async_trait]
impl GradeStore for MemoryGradeStore {
    async fn insert(&self, mut grade: Document) -> Result<Bson, mongodb::error::Error> {
        let mut grades = self.grades.write().await;

        let id = match grade.get("_id") {
            Some(id) => id.clone(),
            None => {
                // Mirror the driver, which puts a generated _id first.
                let id = Bson::ObjectId(ObjectId::new());
                let mut with_id = Document::new();
                with_id.insert("_id", id.clone());
                for (key, value) in grade {
                    with_id.insert(key, value);
                }
                grade = with_id;
                id
            }
        };

        if grades.iter().any(|g| g.get("_id") == Some(&id)) {
            return Err(mongodb::error::Error::custom(format!(
                "E11000 duplicate key error: _id {}",
                id
            )));
        }

        grades.push(grade);
        Ok(id)
    }

    async fn list(&self, limit: i64) -> Result<Vec<Document>, mongodb::error::Error> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let grades = self.grades.read().await;
        Ok(grades.iter().take(limit).cloned().collect())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, mongodb::error::Error> {
        let grades = self.grades.read().await;
        Ok(grades
            .iter()
            .find(|g| g.get_object_id("_id").ok() == Some(id))
            .cloned())
    }

    async fn find_by_student(
        &self,
        student_id: f64,
    ) -> Result<Vec<Document>, mongodb::error::Error> {
        let grades = self.grades.read().await;
        Ok(grades
            .iter()
            .filter(|g| g.get("student_id").and_then(as_number) == Some(student_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[tokio::test]
    async fn test_insert_assigns_object_id_first() {
        let store = MemoryGradeStore::new();
        let id = store.insert(doc! { "student_id": 1 }).await.unwrap();

        let oid = id.as_object_id().unwrap();
        let stored = store.find_by_id(oid).await.unwrap().unwrap();
        assert_eq!(stored.keys().next().map(String::as_str), Some("_id"));
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = MemoryGradeStore::new();
        let oid = ObjectId::new();
        store.insert(doc! { "_id": oid }).await.unwrap();
        assert!(store.insert(doc! { "_id": oid }).await.is_err());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_student_match_is_numeric() {
        let store = MemoryGradeStore::new();
        store.insert(doc! { "student_id": 5_i32 }).await.unwrap();
        store.insert(doc! { "student_id": 5_i64 }).await.unwrap();
        store.insert(doc! { "student_id": 5.0 }).await.unwrap();
        store.insert(doc! { "student_id": "5" }).await.unwrap();

        assert_eq!(store.find_by_student(5.0).await.unwrap().len(), 3);
        assert!(store.find_by_student(f64::NAN).await.unwrap().is_empty());
    }
}
