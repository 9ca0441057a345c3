use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::identity::IdentityProvider;
use crate::session::ProfileDirectory;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// External identity provider. Default: GoTrueClient.
    pub identity: Arc<dyn IdentityProvider>,
    /// Profile tables probed by the role resolver. Default: PgProfileDirectory over `db`.
    pub profiles: Arc<dyn ProfileDirectory>,
    pub config: Config,
}
