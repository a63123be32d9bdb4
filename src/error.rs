//! Error types for world map generation

use std::fmt;

/// Errors that can occur during map generation or queries
#[derive(Debug, Clone)]
pub enum WorldGenError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// Generation failed due to geometry issues
    GenerationFailed(String),
    /// Requested region ID does not exist
    RegionNotFound(usize),
}

impl fmt::Display for WorldGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldGenError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            WorldGenError::GenerationFailed(msg) => write!(f, "generation failed: {}", msg),
            WorldGenError::RegionNotFound(id) => write!(f, "region not found: {}", id),
        }
    }
}

impl std::error::Error for WorldGenError {}

/// Result type alias for world generation operations
pub type Result<T> = std::result::Result<T, WorldGenError>;
