// Applications: seekers apply, employers screen applicants for their jobs.

pub mod handlers;
pub mod repository;
pub mod screening;
