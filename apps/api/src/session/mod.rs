// Request-scoped session: bearer token -> identity -> role + profile.
// Nothing is cached between requests, so every identity change is observed
// by the next request that carries the new token.

pub mod context;
pub mod role;

pub use context::{AccessToken, MaybeSession, Session};
pub use role::{resolve_role, PgProfileDirectory, ProfileDirectory, RoleResolution};
