/// Trait for entities that can be uniquely identified by their business id
pub trait Identifiable {
    /// Returns the unique identifier of the entity
    fn get_id(&self) -> &str;
}
