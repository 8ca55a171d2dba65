/// Student profile model
///
/// A student profile is the role-specific extension of an account, keyed by
/// `account_id` (1:1). The row is created empty at signup; every descriptive
/// field is optional and filled in from the profile page later. Reads join
/// the account row so callers get the merged view the profile page renders;
/// the join is a LEFT JOIN, so a missing profile row is tolerated and its
/// fields come back unset rather than erroring.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE student_profiles (
///     account_id UUID PRIMARY KEY REFERENCES accounts(id) ON DELETE CASCADE,
///     university VARCHAR(100),
///     major VARCHAR(100),
///     graduation_year INTEGER,
///     skills VARCHAR(500),
///     description VARCHAR(1000)
/// );
/// ```
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Student profile row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StudentProfile {
    /// Owning account (1:1)
    pub account_id: Uuid,

    pub university: Option<String>,
    pub major: Option<String>,
    pub graduation_year: Option<i32>,
    pub skills: Option<String>,
    pub description: Option<String>,
}

/// Merged account + profile view returned by the profile endpoint
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StudentProfileDetails {
    pub full_name: String,
    pub email: String,
    pub university: Option<String>,
    pub major: Option<String>,
    pub graduation_year: Option<i32>,
    pub skills: Option<String>,
    pub description: Option<String>,
}

/// Profile fields accepted by upsert
#[derive(Debug, Clone, Default)]
pub struct UpsertStudentProfile {
    pub university: Option<String>,
    pub major: Option<String>,
    pub graduation_year: Option<i32>,
    pub skills: Option<String>,
    pub description: Option<String>,
}

impl StudentProfile {
    /// Creates an empty profile row for a new student account
    ///
    /// Runs on any executor so signup can include it in the account-creation
    /// transaction.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        account_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO student_profiles (account_id) VALUES ($1)")
            .bind(account_id)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Returns the merged account + profile view, or None if the account is missing
    pub async fn details(
        pool: &PgPool,
        account_id: Uuid,
    ) -> Result<Option<StudentProfileDetails>, sqlx::Error> {
        let details = sqlx::query_as::<_, StudentProfileDetails>(
            r#"
            SELECT a.full_name, a.email,
                   p.university, p.major, p.graduation_year, p.skills, p.description
            FROM accounts a
            LEFT JOIN student_profiles p ON p.account_id = a.id
            WHERE a.id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(pool)
        .await?;

        Ok(details)
    }

    /// Inserts or updates the profile row for `account_id`
    pub async fn upsert(
        pool: &PgPool,
        account_id: Uuid,
        data: UpsertStudentProfile,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO student_profiles (account_id, university, major, graduation_year, skills, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (account_id) DO UPDATE SET
                university = EXCLUDED.university,
                major = EXCLUDED.major,
                graduation_year = EXCLUDED.graduation_year,
                skills = EXCLUDED.skills,
                description = EXCLUDED.description
            "#,
        )
        .bind(account_id)
        .bind(data.university)
        .bind(data.major)
        .bind(data.graduation_year)
        .bind(data.skills)
        .bind(data.description)
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_default_is_all_unset() {
        let data = UpsertStudentProfile::default();
        assert!(data.university.is_none());
        assert!(data.major.is_none());
        assert!(data.graduation_year.is_none());
        assert!(data.skills.is_none());
        assert!(data.description.is_none());
    }
}
