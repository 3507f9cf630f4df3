pub mod aggregate;
pub mod cleaner;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod profile;
pub mod report;
pub mod table;
