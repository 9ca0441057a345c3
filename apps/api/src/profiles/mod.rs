// Profiles: read and edit the caller's own profile, seeker credentials
// (skills, education, certifications) and the skill catalogue.

pub mod completion;
pub mod handlers;
pub mod repository;
