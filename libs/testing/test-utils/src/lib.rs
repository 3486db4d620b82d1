//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied
//!   (feature: "postgres")
//! - `TestDataBuilder`: deterministic test data generation (always available)
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! # async fn example() {
//! let db = TestDatabase::new().await;
//! let builder = TestDataBuilder::from_test_name("my_test");
//!
//! let document_id = builder.id();
//! let title = builder.name("document", "main");
//! # }
//! ```

use uuid::Uuid;

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization
///
/// Uses a seed so test data is reproducible across runs.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates the seed from the test name hash)
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a deterministic UUID for this seed
    pub fn id(&self) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..16].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes)
    }

    /// Generate a unique name for testing, e.g. `name("document", "main")`
    pub fn name(&self, kind: &str, label: &str) -> String {
        format!("{}-{}-{:08x}", kind, label, self.seed as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_is_deterministic() {
        let a = TestDataBuilder::from_test_name("some_test");
        let b = TestDataBuilder::from_test_name("some_test");

        assert_eq!(a.id(), b.id());
        assert_eq!(a.name("document", "x"), b.name("document", "x"));
    }

    #[test]
    fn test_different_names_differ() {
        let a = TestDataBuilder::from_test_name("test_one");
        let b = TestDataBuilder::from_test_name("test_two");

        assert_ne!(a.id(), b.id());
    }
}
