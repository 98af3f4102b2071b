// Recommendation gateway: prompts built from stored entities, answered by the
// chat completion backend, parsed into strict result schemas.

pub mod gateway;
pub mod handlers;
pub mod prompts;
pub mod schema;
