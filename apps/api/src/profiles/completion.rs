use serde::{Deserialize, Serialize};

use crate::models::profile::SeekerProfile;

/// How many credential rows a seeker has, alongside the profile row itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CredentialCounts {
    pub skills: usize,
    pub education: usize,
    pub certifications: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileCompletion {
    /// 0 to 100
    pub percent: i32,
    pub missing: Vec<String>,
}

/// Stored on the seeker row at sign-up, when only the name is known.
pub const SIGNUP_COMPLETION: i32 = 20;

const FIELD_WEIGHTS: &[(&str, i32)] = &[
    ("full_name", 20),
    ("phone", 10),
    ("location", 10),
    ("preferred_job_type", 5),
    ("preferred_shift", 5),
    ("years_experience", 10),
    ("bio", 5),
    ("resume_url", 10),
    ("skills", 10),
    ("education", 10),
    ("certifications", 5),
];

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn is_filled(field: &str, profile: &SeekerProfile, counts: CredentialCounts) -> bool {
    match field {
        "full_name" => !profile.full_name.trim().is_empty(),
        "phone" => filled(&profile.phone),
        "location" => filled(&profile.location),
        "preferred_job_type" => filled(&profile.preferred_job_type),
        "preferred_shift" => filled(&profile.preferred_shift),
        "years_experience" => profile.years_experience > 0,
        "bio" => filled(&profile.bio),
        "resume_url" => filled(&profile.resume_url),
        "skills" => counts.skills > 0,
        "education" => counts.education > 0,
        "certifications" => counts.certifications > 0,
        _ => false,
    }
}

pub fn compute_completion(profile: &SeekerProfile, counts: CredentialCounts) -> ProfileCompletion {
    let mut percent = 0;
    let mut missing = Vec::new();

    for (field, weight) in FIELD_WEIGHTS {
        if is_filled(field, profile, counts) {
            percent += weight;
        } else {
            missing.push(field.to_string());
        }
    }

    ProfileCompletion {
        percent: percent.clamp(0, 100),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::fixtures;
    use uuid::Uuid;

    #[test]
    fn test_weights_sum_to_one_hundred() {
        let total: i32 = FIELD_WEIGHTS.iter().map(|(_, w)| w).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_fresh_signup_scores_what_signup_stores() {
        let profile = fixtures::seeker(Uuid::nil(), "Meera Nair");
        let completion = compute_completion(&profile, CredentialCounts::default());
        assert_eq!(completion.percent, SIGNUP_COMPLETION);
        assert_eq!(completion.percent, profile.profile_completion);
        assert!(!completion.missing.contains(&"full_name".to_string()));
        assert!(completion.missing.contains(&"resume_url".to_string()));
    }

    #[test]
    fn test_complete_profile_scores_full() {
        let profile = SeekerProfile {
            phone: Some("+91 98200 00000".to_string()),
            location: Some("Vadodara".to_string()),
            preferred_job_type: Some("full-time".to_string()),
            preferred_shift: Some("day".to_string()),
            years_experience: 4,
            bio: Some("Certified welder".to_string()),
            resume_url: Some("https://files.example.com/cv.pdf".to_string()),
            ..fixtures::seeker(Uuid::nil(), "Meera Nair")
        };
        let counts = CredentialCounts {
            skills: 3,
            education: 1,
            certifications: 2,
        };
        let completion = compute_completion(&profile, counts);
        assert_eq!(completion.percent, 100);
        assert!(completion.missing.is_empty());
    }

    #[test]
    fn test_whitespace_fields_count_as_missing() {
        let profile = SeekerProfile {
            bio: Some("   ".to_string()),
            ..fixtures::seeker(Uuid::nil(), "Meera Nair")
        };
        let completion = compute_completion(&profile, CredentialCounts::default());
        assert!(completion.missing.contains(&"bio".to_string()));
    }
}
