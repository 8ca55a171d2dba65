/// Company profile model
///
/// Company counterpart of `student_profile`: a 1:1 extension of the account
/// row, created at signup (seeded with the signup name as the company name)
/// and updated from the company profile page. Same lifecycle and tolerance
/// for missing rows as the student side.
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Company profile row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CompanyProfile {
    /// Owning account (1:1)
    pub account_id: Uuid,

    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Merged account + profile view returned by the profile endpoint
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CompanyProfileDetails {
    pub full_name: String,
    pub email: String,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Profile fields accepted by upsert
#[derive(Debug, Clone, Default)]
pub struct UpsertCompanyProfile {
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl CompanyProfile {
    /// Creates the profile row for a new company account
    ///
    /// The signup name doubles as the initial company name.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        account_id: Uuid,
        company_name: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO company_profiles (account_id, company_name) VALUES ($1, $2)")
            .bind(account_id)
            .bind(company_name)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Returns the merged account + profile view, or None if the account is missing
    pub async fn details(
        pool: &PgPool,
        account_id: Uuid,
    ) -> Result<Option<CompanyProfileDetails>, sqlx::Error> {
        let details = sqlx::query_as::<_, CompanyProfileDetails>(
            r#"
            SELECT a.full_name, a.email,
                   p.company_name, p.phone, p.website, p.location, p.description
            FROM accounts a
            LEFT JOIN company_profiles p ON p.account_id = a.id
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
        data: UpsertCompanyProfile,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO company_profiles (account_id, company_name, phone, website, location, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (account_id) DO UPDATE SET
                company_name = EXCLUDED.company_name,
                phone = EXCLUDED.phone,
                website = EXCLUDED.website,
                location = EXCLUDED.location,
                description = EXCLUDED.description
            "#,
        )
        .bind(account_id)
        .bind(data.company_name)
        .bind(data.phone)
        .bind(data.website)
        .bind(data.location)
        .bind(data.description)
        .execute(pool)
        .await?;

        Ok(())
    }
}
