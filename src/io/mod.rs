pub mod csv;
pub mod glob;
pub mod memory;
pub mod parquet;
pub mod store;
