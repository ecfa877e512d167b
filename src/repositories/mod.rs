pub mod collection_repository;

pub use collection_repository::{CollectionRepository, Record};
