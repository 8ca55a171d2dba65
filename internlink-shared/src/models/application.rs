/// Application model and status workflow
///
/// An application links a student to a posting. At most one application may
/// exist per (student, posting) pair, enforced by the composite unique
/// constraint so a double-submit race cannot slip through. Applications are
/// never deleted; the only mutation is a status write by the company that
/// owns the posting.
///
/// # Status workflow
///
/// ```text
/// pending → shortlisted | accepted | rejected
/// ```
///
/// The write contract accepts any of the four enumerated values whenever
/// ownership holds. There is deliberately no transition guard beyond
/// enumeration membership, so a company may move an accepted application to
/// rejected.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE applications (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     student_id UUID NOT NULL REFERENCES accounts(id) ON DELETE CASCADE,
///     posting_id UUID NOT NULL REFERENCES postings(id) ON DELETE CASCADE,
///     cover_letter TEXT NOT NULL DEFAULT '',
///     status TEXT NOT NULL DEFAULT 'pending',
///     applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (student_id, posting_id)
/// );
/// ```
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Application status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Initial state of every application
    Pending,

    /// Marked for follow-up by the company
    Shortlisted,

    /// Offer extended
    Accepted,

    /// Turned down
    Rejected,
}

impl ApplicationStatus {
    /// Converts status to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Parses a status from a request field; None for anything outside the
    /// four enumerated values
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ApplicationStatus::Pending),
            "shortlisted" => Some(ApplicationStatus::Shortlisted),
            "accepted" => Some(ApplicationStatus::Accepted),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Application {
    /// Unique application ID (UUID v4)
    pub id: Uuid,

    /// Applying student account
    pub student_id: Uuid,

    /// Posting applied to
    pub posting_id: Uuid,

    /// Optional cover letter (empty string when omitted)
    pub cover_letter: String,

    pub status: ApplicationStatus,

    /// When the application was submitted
    pub applied_at: DateTime<Utc>,
}

/// A student's application joined with posting and company display fields
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StudentApplicationRow {
    pub id: Uuid,
    pub posting_id: Uuid,
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub posting_type: String,
    pub deadline: NaiveDate,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

/// An application received by a company, joined with student and posting fields
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CompanyApplicationRow {
    pub id: Uuid,
    pub posting_id: Uuid,
    pub title: String,
    pub student_name: String,
    pub student_email: String,
    pub university: Option<String>,
    pub skills: Option<String>,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

impl Application {
    /// Submits an application with initial status `pending`
    ///
    /// # Errors
    ///
    /// A second submission for the same (student, posting) pair surfaces as a
    /// unique-constraint violation on `applications_student_id_posting_id_key`;
    /// a missing posting surfaces as a foreign-key violation.
    pub async fn submit(
        pool: &PgPool,
        student_id: Uuid,
        posting_id: Uuid,
        cover_letter: &str,
    ) -> Result<Self, sqlx::Error> {
        let application = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (student_id, posting_id, cover_letter)
            VALUES ($1, $2, $3)
            RETURNING id, student_id, posting_id, cover_letter, status, applied_at
            "#,
        )
        .bind(student_id)
        .bind(posting_id)
        .bind(cover_letter)
        .fetch_one(pool)
        .await?;

        Ok(application)
    }

    /// Lists all applications submitted by `student_id`, newest first
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: Uuid,
    ) -> Result<Vec<StudentApplicationRow>, sqlx::Error> {
        let rows = sqlx::query_as::<_, StudentApplicationRow>(
            r#"
            SELECT app.id, app.posting_id, p.title,
                   COALESCE(cp.company_name, a.full_name) AS company_name,
                   p.location, p.posting_type, p.deadline,
                   app.status, app.applied_at
            FROM applications app
            JOIN postings p ON p.id = app.posting_id
            JOIN accounts a ON a.id = p.company_id
            LEFT JOIN company_profiles cp ON cp.account_id = p.company_id
            WHERE app.student_id = $1
            ORDER BY app.applied_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Lists all applications against postings owned by `company_id`, newest first
    pub async fn list_for_company(
        pool: &PgPool,
        company_id: Uuid,
    ) -> Result<Vec<CompanyApplicationRow>, sqlx::Error> {
        let rows = sqlx::query_as::<_, CompanyApplicationRow>(
            r#"
            SELECT app.id, app.posting_id, p.title,
                   s.full_name AS student_name, s.email AS student_email,
                   sp.university, sp.skills,
                   app.cover_letter, app.status, app.applied_at
            FROM applications app
            JOIN postings p ON p.id = app.posting_id
            JOIN accounts s ON s.id = app.student_id
            LEFT JOIN student_profiles sp ON sp.account_id = app.student_id
            WHERE p.company_id = $1
            ORDER BY app.applied_at DESC
            "#,
        )
        .bind(company_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Sets the status of an application, but only if the posting it targets
    /// is owned by `company_id`
    ///
    /// Ownership is enforced by the join condition inside the UPDATE itself,
    /// not by a separate ownership fetch. Returns false when nothing was
    /// updated: the application does not exist or the posting belongs to
    /// another company.
    pub async fn set_status(
        pool: &PgPool,
        application_id: Uuid,
        company_id: Uuid,
        status: ApplicationStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE applications AS app
            SET status = $1
            FROM postings p
            WHERE app.id = $2
              AND p.id = app.posting_id
              AND p.company_id = $3
            "#,
        )
        .bind(status)
        .bind(application_id)
        .bind(company_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Shortlisted,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        assert_eq!(ApplicationStatus::parse("withdrawn"), None);
        assert_eq!(ApplicationStatus::parse("Pending"), None);
        assert_eq!(ApplicationStatus::parse(""), None);
    }

    #[test]
    fn test_status_json_is_lowercase() {
        let json = serde_json::to_string(&ApplicationStatus::Shortlisted).unwrap();
        assert_eq!(json, "\"shortlisted\"");

        let parsed: ApplicationStatus = serde_json::from_str("\"accepted\"").unwrap();
        assert_eq!(parsed, ApplicationStatus::Accepted);
    }
}
