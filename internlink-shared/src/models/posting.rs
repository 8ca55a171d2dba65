/// Internship posting model
///
/// Postings are owned exclusively by one company account. Mutations never
/// check ownership with a separate read: the UPDATE/DELETE carries
/// `company_id` in its WHERE clause and callers inspect rows-affected.
/// Zero affected rows means "not found" whether the posting is missing or
/// owned by someone else: existence of other companies' postings is never
/// leaked, and there is no time-of-check/time-of-use window.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE postings (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     company_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
///     title VARCHAR(255) NOT NULL,
///     description TEXT NOT NULL,
///     location VARCHAR(100) NOT NULL,
///     salary BIGINT NOT NULL CHECK (salary >= 0),
///     posting_type VARCHAR(50) NOT NULL,
///     skills VARCHAR(500) NOT NULL,
///     duration_weeks INTEGER NOT NULL CHECK (duration_weeks > 0),
///     deadline DATE NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use internlink_shared::models::posting::{Posting, PostingInput};
/// # use sqlx::PgPool;
/// # use uuid::Uuid;
/// # async fn example(pool: PgPool, company_id: Uuid, input: PostingInput) -> Result<(), sqlx::Error> {
/// let posting = Posting::create(&pool, company_id, input.clone()).await?;
///
/// // Only the owner can update; a non-owner sees `false`
/// let updated = Posting::update(&pool, posting.id, company_id, input).await?;
/// assert!(updated);
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Posting row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Posting {
    /// Unique posting ID (UUID v4)
    pub id: Uuid,

    /// Owning company account
    pub company_id: Uuid,

    pub title: String,
    pub description: String,
    pub location: String,

    /// Monthly salary; zero is a valid value (unpaid posting)
    pub salary: i64,

    /// Kind of engagement (e.g. "full-time", "remote")
    pub posting_type: String,

    pub skills: String,

    /// Duration in weeks, at least one
    pub duration_weeks: i32,

    /// Application deadline
    pub deadline: NaiveDate,

    pub created_at: DateTime<Utc>,
}

/// Fields for creating or replacing a posting; all mandatory
#[derive(Debug, Clone)]
pub struct PostingInput {
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: i64,
    pub posting_type: String,
    pub skills: String,
    pub duration_weeks: i32,
    pub deadline: NaiveDate,
}

/// Posting joined with the owning company's display fields, for search results
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostingWithCompany {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: i64,
    pub posting_type: String,
    pub skills: String,
    pub duration_weeks: i32,
    pub deadline: NaiveDate,
    pub created_at: DateTime<Utc>,

    /// Company display name (profile name, falling back to the account name)
    pub company_name: String,

    /// Company location from the profile, if set
    pub company_location: Option<String>,
}

impl Posting {
    /// Creates a posting owned by `company_id`
    pub async fn create(
        pool: &PgPool,
        company_id: Uuid,
        data: PostingInput,
    ) -> Result<Self, sqlx::Error> {
        let posting = sqlx::query_as::<_, Posting>(
            r#"
            INSERT INTO postings
                (company_id, title, description, location, salary, posting_type,
                 skills, duration_weeks, deadline)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, company_id, title, description, location, salary,
                      posting_type, skills, duration_weeks, deadline, created_at
            "#,
        )
        .bind(company_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.location)
        .bind(data.salary)
        .bind(data.posting_type)
        .bind(data.skills)
        .bind(data.duration_weeks)
        .bind(data.deadline)
        .fetch_one(pool)
        .await?;

        Ok(posting)
    }

    /// Replaces all fields of a posting, but only if `company_id` owns it
    ///
    /// Returns false when nothing was updated: the posting does not exist or
    /// belongs to another company.
    pub async fn update(
        pool: &PgPool,
        posting_id: Uuid,
        company_id: Uuid,
        data: PostingInput,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE postings
            SET title = $1, description = $2, location = $3, salary = $4,
                posting_type = $5, skills = $6, duration_weeks = $7, deadline = $8
            WHERE id = $9 AND company_id = $10
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.location)
        .bind(data.salary)
        .bind(data.posting_type)
        .bind(data.skills)
        .bind(data.duration_weeks)
        .bind(data.deadline)
        .bind(posting_id)
        .bind(company_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a posting, but only if `company_id` owns it
    pub async fn delete(
        pool: &PgPool,
        posting_id: Uuid,
        company_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM postings WHERE id = $1 AND company_id = $2")
            .bind(posting_id)
            .bind(company_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns all postings with company display fields, newest first
    ///
    /// Any authenticated role may browse; no ownership scoping applies here.
    pub async fn search_active(pool: &PgPool) -> Result<Vec<PostingWithCompany>, sqlx::Error> {
        let postings = sqlx::query_as::<_, PostingWithCompany>(
            r#"
            SELECT p.id, p.company_id, p.title, p.description, p.location, p.salary,
                   p.posting_type, p.skills, p.duration_weeks, p.deadline, p.created_at,
                   COALESCE(cp.company_name, a.full_name) AS company_name,
                   cp.location AS company_location
            FROM postings p
            JOIN accounts a ON a.id = p.company_id
            LEFT JOIN company_profiles cp ON cp.account_id = p.company_id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(postings)
    }

    /// Returns only the postings owned by `company_id`, newest first
    pub async fn list_for_company(
        pool: &PgPool,
        company_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let postings = sqlx::query_as::<_, Posting>(
            r#"
            SELECT id, company_id, title, description, location, salary,
                   posting_type, skills, duration_weeks, deadline, created_at
            FROM postings
            WHERE company_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .fetch_all(pool)
        .await?;

        Ok(postings)
    }
}
