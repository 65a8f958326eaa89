pub mod client;
pub mod grade_repo;
#[cfg(test)]
pub mod memory_repo;

pub use client::MongoClient;
pub use grade_repo::{GradeRepository, GradeStore, LIST_LIMIT};
#[cfg(test)]
pub use memory_repo::MemoryGradeStore;
