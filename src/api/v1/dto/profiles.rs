/*
 * Responsibility
 * - request/response DTOs for /user-profile
 * - validate() checks shape and length against ProfileRules (no DB access)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repos::{ProfilePatch, ProfileRow};
use crate::validation::{ProfileRules, ValidationErrors, Violation};

// Missing fields deserialize to "" so they are reported as "is required"
// alongside every other field error instead of failing the whole body.
#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub city: String,
}

impl CreateProfileRequest {
    pub fn validate(&self, rules: &ProfileRules) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(v) = rules.first_name.check_required(&self.first_name) {
            errors.add("first_name", v);
        }
        if let Some(v) = rules.last_name.check_required(&self.last_name) {
            errors.add("last_name", v);
        }
        if let Some(v) = rules.city.check_required(&self.city) {
            errors.add("city", v);
        }
        errors.into_result()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    // None / null / "" all mean "leave unchanged"
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub city: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self, rules: &ProfileRules) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(v) = rules.first_name.check_optional(self.first_name.as_deref()) {
            errors.add("first_name", v);
        }
        if let Some(v) = rules.last_name.check_optional(self.last_name.as_deref()) {
            errors.add("last_name", v);
        }
        if let Some(v) = rules.city.check_optional(self.city.as_deref()) {
            errors.add("city", v);
        }
        errors.into_result()
    }

    /// Validated patch; an update that would change nothing is rejected.
    pub fn into_patch(self, rules: &ProfileRules) -> Result<ProfilePatch, ValidationErrors> {
        self.validate(rules)?;

        let patch = ProfilePatch {
            first_name: non_empty(self.first_name),
            last_name: non_empty(self.last_name),
            city: non_empty(self.city),
        };
        if patch.is_empty() {
            return Err(ValidationErrors::single("body", Violation::Required));
        }
        Ok(patch)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Serialize)]
pub struct ProfileIdResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for ProfileResponse {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            first_name: row.first_name,
            last_name: row.last_name,
            city: row.city,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: u16,
    pub data: &'static str,
}
