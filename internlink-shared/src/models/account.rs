/// Account model and database operations
///
/// One account row per signup. The role is fixed at creation and decides
/// which profile table extends the account. Emails are unique; uniqueness is
/// enforced by the database constraint rather than a pre-check so concurrent
/// signups cannot race past each other.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE accounts (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     full_name VARCHAR(100) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     role TEXT NOT NULL CHECK (role IN ('student', 'company')),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use internlink_shared::models::account::{Account, CreateAccount, Role};
/// # use sqlx::PgPool;
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let account = Account::create(&pool, CreateAccount {
///     full_name: "Jane Doe".to_string(),
///     email: "jane@x.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     role: Role::Student,
/// }).await?;
///
/// let found = Account::find_by_email(&pool, "jane@x.com").await?;
/// assert_eq!(found.map(|a| a.id), Some(account.id));
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Account role, fixed at signup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Applies to postings, owns a student profile
    Student,

    /// Creates postings, owns a company profile
    Company,
}

impl Role {
    /// Converts role to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Company => "company",
        }
    }

    /// Parses role from a request field
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "student" => Some(Role::Student),
            "company" => Some(Role::Company),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account model representing a user account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    /// Unique account ID (UUID v4)
    pub id: Uuid,

    /// Display name given at signup
    pub full_name: String,

    /// Email address, stored lowercase, unique across all accounts
    pub email: String,

    /// Argon2id password hash, never serialized in responses
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Role chosen at signup
    pub role: Role,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new account
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub full_name: String,

    /// Email address; callers must normalize to lowercase first
    pub email: String,

    /// Argon2id password hash (never a plaintext password)
    pub password_hash: String,

    pub role: Role,
}

impl Account {
    /// Creates a new account
    ///
    /// Takes any executor so signup can run it inside the same transaction as
    /// the profile-row insert.
    ///
    /// # Errors
    ///
    /// A duplicate email surfaces as a unique-constraint violation on
    /// `accounts_email_key`.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        data: CreateAccount,
    ) -> Result<Self, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (full_name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, full_name, email, password_hash, role, created_at
            "#,
        )
        .bind(data.full_name)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.role)
        .fetch_one(executor)
        .await?;

        Ok(account)
    }

    /// Finds an account by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, full_name, email, password_hash, role, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }

    /// Finds an account by email address
    ///
    /// Callers must lowercase the email before lookup; storage is normalized
    /// the same way.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, full_name, email, password_hash, role, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }

    /// Updates the display name and email of an account
    ///
    /// Returns false if no such account exists. A duplicate email surfaces as
    /// a unique-constraint violation.
    pub async fn update_identity(
        pool: &PgPool,
        id: Uuid,
        full_name: &str,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET full_name = $1, email = $2
            WHERE id = $3
            "#,
        )
        .bind(full_name)
        .bind(email)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Replaces the stored password hash
    pub async fn update_password(
        pool: &PgPool,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET password_hash = $1
            WHERE id = $2
            "#,
        )
        .bind(password_hash)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
