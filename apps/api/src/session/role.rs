//! Role Resolver: decides whether an identity is a seeker or an employer by
//! probing the two profile tables in order.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{EmployerProfile, Profile, SeekerProfile};

/// Read access to the two disjoint profile tables.
///
/// Carried in `AppState` as `Arc<dyn ProfileDirectory>`.
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    async fn seeker_profile(&self, id: Uuid) -> Result<Option<SeekerProfile>, AppError>;

    async fn employer_profile(&self, id: Uuid) -> Result<Option<EmployerProfile>, AppError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoleResolution {
    Resolved(Profile),
    /// Neither table holds a row for the identity. Sign-up always creates one,
    /// so this is a data-consistency fault rather than an anonymous user.
    Undetermined,
}

/// Seeker table first, then employer table. Errors propagate; no retries.
pub async fn resolve_role(
    directory: &dyn ProfileDirectory,
    identity_id: Uuid,
) -> Result<RoleResolution, AppError> {
    if let Some(seeker) = directory.seeker_profile(identity_id).await? {
        debug!("Identity {identity_id} resolved as seeker");
        return Ok(RoleResolution::Resolved(Profile::Seeker(seeker)));
    }

    if let Some(employer) = directory.employer_profile(identity_id).await? {
        debug!("Identity {identity_id} resolved as employer");
        return Ok(RoleResolution::Resolved(Profile::Employer(employer)));
    }

    warn!("Identity {identity_id} has no seeker or employer profile");
    Ok(RoleResolution::Undetermined)
}

/// `ProfileDirectory` backed by the `user_profiles` and `employers` tables.
pub struct PgProfileDirectory {
    pool: PgPool,
}

impl PgProfileDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileDirectory for PgProfileDirectory {
    async fn seeker_profile(&self, id: Uuid) -> Result<Option<SeekerProfile>, AppError> {
        let row = sqlx::query_as("SELECT * FROM user_profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn employer_profile(&self, id: Uuid) -> Result<Option<EmployerProfile>, AppError> {
        let row = sqlx::query_as("SELECT * FROM employers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::HashMap;

    use super::*;

    /// In-memory profile tables.
    #[derive(Default)]
    pub struct InMemoryProfiles {
        pub seekers: HashMap<Uuid, SeekerProfile>,
        pub employers: HashMap<Uuid, EmployerProfile>,
        pub fail: bool,
    }

    #[async_trait]
    impl ProfileDirectory for InMemoryProfiles {
        async fn seeker_profile(&self, id: Uuid) -> Result<Option<SeekerProfile>, AppError> {
            if self.fail {
                return Err(AppError::Database(sqlx::Error::PoolTimedOut));
            }
            Ok(self.seekers.get(&id).cloned())
        }

        async fn employer_profile(&self, id: Uuid) -> Result<Option<EmployerProfile>, AppError> {
            if self.fail {
                return Err(AppError::Database(sqlx::Error::PoolTimedOut));
            }
            Ok(self.employers.get(&id).cloned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::InMemoryProfiles;
    use super::*;
    use crate::models::profile::{fixtures, Role};

    #[tokio::test]
    async fn test_seeker_row_resolves_seeker_with_that_profile() {
        let id = Uuid::new_v4();
        let seeker = fixtures::seeker(id, "Anita Desai");
        let mut directory = InMemoryProfiles::default();
        directory.seekers.insert(id, seeker.clone());

        let resolution = resolve_role(&directory, id).await.unwrap();
        assert_eq!(resolution, RoleResolution::Resolved(Profile::Seeker(seeker)));
    }

    #[tokio::test]
    async fn test_employer_row_resolves_employer() {
        let id = Uuid::new_v4();
        let mut directory = InMemoryProfiles::default();
        directory
            .employers
            .insert(id, fixtures::employer(id, "Tata Forge"));

        match resolve_role(&directory, id).await.unwrap() {
            RoleResolution::Resolved(profile) => assert_eq!(profile.role(), Role::Employer),
            RoleResolution::Undetermined => panic!("expected employer"),
        }
    }

    #[tokio::test]
    async fn test_no_row_is_undetermined() {
        let directory = InMemoryProfiles::default();
        let resolution = resolve_role(&directory, Uuid::new_v4()).await.unwrap();
        assert_eq!(resolution, RoleResolution::Undetermined);
    }

    #[tokio::test]
    async fn test_seeker_table_wins_when_probed_first() {
        let id = Uuid::new_v4();
        let mut directory = InMemoryProfiles::default();
        directory.seekers.insert(id, fixtures::seeker(id, "A"));
        directory.employers.insert(id, fixtures::employer(id, "B"));

        match resolve_role(&directory, id).await.unwrap() {
            RoleResolution::Resolved(profile) => assert_eq!(profile.role(), Role::Seeker),
            RoleResolution::Undetermined => panic!("expected seeker"),
        }
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        let directory = InMemoryProfiles {
            fail: true,
            ..Default::default()
        };
        let result = resolve_role(&directory, Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
