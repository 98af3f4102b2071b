pub mod candidate;
pub mod company;
pub mod job;
pub mod recommendation;
pub mod user;

/// Generates an opaque identifier for a new entity.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
