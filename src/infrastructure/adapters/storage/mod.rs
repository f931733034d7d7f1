//! Storage Adapter - 文件系统存储

mod file_storage;

pub use file_storage::FileSampleStorage;
