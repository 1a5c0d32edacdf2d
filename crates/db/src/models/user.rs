//! User and student profile models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fahrplan_core::types::{DbId, Timestamp};

/// Role string for instructors.
pub const ROLE_INSTRUCTOR: &str = "INSTRUCTOR";
/// Role string for students.
pub const ROLE_STUDENT: &str = "STUDENT";

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `student_data` table (pickup location for lessons).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentData {
    pub id: DbId,
    pub user_id: DbId,
    pub instructor_id: Option<DbId>,
    pub pickup_address: Option<String>,
    pub pickup_lat: Option<f64>,
    pub pickup_lng: Option<f64>,
}

/// DTO for `PATCH /api/v1/users/{id}/profile`. Only non-`None` fields
/// are applied.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
