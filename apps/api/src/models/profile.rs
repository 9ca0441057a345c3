use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Which side of the board an identity is on. Derived from which profile table
/// holds a row for the identity, never stored on the identity itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Seeker,
    Employer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Seeker => "seeker",
            Role::Employer => "employer",
        }
    }
}

/// Row of `user_profiles`, keyed by the identity id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SeekerProfile {
    pub id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub preferred_job_type: Option<String>,
    pub preferred_shift: Option<String>,
    pub years_experience: i32,
    pub bio: Option<String>,
    pub resume_url: Option<String>,
    pub profile_completion: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of `employers`, keyed by the identity id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EmployerProfile {
    pub id: Uuid,
    pub company_name: String,
    pub company_logo: Option<String>,
    pub company_size: Option<String>,
    pub industry_type: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A profile tagged by the role it was resolved for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Profile {
    Seeker(SeekerProfile),
    Employer(EmployerProfile),
}

impl Profile {
    pub fn role(&self) -> Role {
        match self {
            Profile::Seeker(_) => Role::Seeker,
            Profile::Employer(_) => Role::Employer,
        }
    }
}

/// Editable seeker fields. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeekerProfileUpdate {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub preferred_job_type: Option<String>,
    pub preferred_shift: Option<String>,
    pub years_experience: Option<i32>,
    pub bio: Option<String>,
    pub resume_url: Option<String>,
}

/// Editable employer fields. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployerProfileUpdate {
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
    pub company_size: Option<String>,
    pub industry_type: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_serializes_with_role_tag() {
        let profile = Profile::Employer(fixtures::employer(Uuid::nil(), "Acme Fabrication"));
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["role"], "employer");
        assert_eq!(json["company_name"], "Acme Fabrication");
    }

    #[test]
    fn test_role_follows_variant() {
        let seeker = Profile::Seeker(fixtures::seeker(Uuid::nil(), "Ravi Kumar"));
        let employer = Profile::Employer(fixtures::employer(Uuid::nil(), "Acme Fabrication"));
        assert_eq!(seeker.role(), Role::Seeker);
        assert_eq!(employer.role(), Role::Employer);
    }

    #[test]
    fn test_seeker_update_rejects_employer_fields() {
        let body = serde_json::json!({ "company_name": "Acme" });
        assert!(serde_json::from_value::<SeekerProfileUpdate>(body).is_err());
    }
}
