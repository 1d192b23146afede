pub mod traits;

// Rate sources
pub mod fixed;
pub mod json;
