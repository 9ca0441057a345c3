pub mod application;
pub mod credentials;
pub mod job;
pub mod notification;
pub mod profile;
