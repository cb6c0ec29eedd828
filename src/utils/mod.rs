pub mod random_collection;
pub mod serialization;
