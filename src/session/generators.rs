use async_trait::async_trait;
use uuid::Uuid;

/// Trait for generating participant display names
#[async_trait]
pub trait NameGenerator: Send + Sync {
    async fn generate(&self) -> String;
}

/// Pet name-based display name generator
pub struct PetNameGenerator;

impl PetNameGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PetNameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NameGenerator for PetNameGenerator {
    async fn generate(&self) -> String {
        petname::Petnames::default().generate_one(2, "-")
    }
}

/// Trait for generating stable participant identifiers
#[async_trait]
pub trait IdGenerator: Send + Sync {
    async fn generate(&self) -> String;
}

pub struct UuidIdGenerator;

impl UuidIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UuidIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdGenerator for UuidIdGenerator {
    async fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_petname_generator_format() {
        let generator = PetNameGenerator::new();
        let name1 = generator.generate().await;
        let name2 = generator.generate().await;

        assert!(!name1.is_empty());
        assert!(name1.contains('-'));
        assert!(!name2.is_empty());

        let parts: Vec<&str> = name1.split('-').collect();
        assert_eq!(parts.len(), 2);
    }

    #[tokio::test]
    async fn test_uuid_generator_uniqueness() {
        let generator = UuidIdGenerator::new();
        let id1 = generator.generate().await;
        let id2 = generator.generate().await;

        assert!(!id1.is_empty());
        assert_ne!(id1, id2);
    }
}
