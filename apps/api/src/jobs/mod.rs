// Job postings. Listing shows active jobs only; lookup by id does not filter.

pub mod handlers;
pub mod postings;
