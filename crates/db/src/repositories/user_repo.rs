//! Repository for the `users` and `student_data` tables.

use sqlx::PgPool;

use fahrplan_core::types::DbId;

use crate::models::user::{StudentData, UpdateProfile, User};

/// Column list for the `users` table.
const COLUMNS: &str = "id, role, first_name, last_name, email, phone, created_at, updated_at";

/// Column list for the `student_data` table.
const STUDENT_DATA_COLUMNS: &str =
    "id, user_id, instructor_id, pickup_address, pickup_lat, pickup_lng";

/// Reads and profile updates for user accounts.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a user's profile. Only non-`None` fields are applied.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET \
                first_name = COALESCE($2, first_name), \
                last_name = COALESCE($3, last_name), \
                email = COALESCE($4, email), \
                phone = COALESCE($5, phone), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_optional(pool)
            .await
    }

    /// Find a student's pickup data, if any.
    pub async fn find_student_data(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<StudentData>, sqlx::Error> {
        let query = format!("SELECT {STUDENT_DATA_COLUMNS} FROM student_data WHERE user_id = $1");
        sqlx::query_as::<_, StudentData>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
