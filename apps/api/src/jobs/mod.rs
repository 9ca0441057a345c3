// Jobs: search over active postings, job detail, and the employer-side
// posting / status / delete operations.

pub mod filter;
pub mod handlers;
pub mod posting;
pub mod repository;
