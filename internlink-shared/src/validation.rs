/// Field-format validation predicates
///
/// Every predicate here is a pure function of its input string, independent of
/// persistence state, so handlers can validate before touching the database
/// and tests can exercise the rules in isolation.
///
/// Optional profile fields accept `None` and empty strings as valid (the field
/// is simply unset); required fields are validated by the non-optional
/// predicates.
///
/// # Example
///
/// ```
/// use internlink_shared::validation::{is_valid_email, is_valid_name};
///
/// assert!(is_valid_name("Jane Doe"));
/// assert!(is_valid_email("jane@example.com"));
/// assert!(!is_valid_email("not-an-email"));
/// ```
use regex::Regex;
use std::sync::LazyLock;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid name pattern"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("valid email pattern")
});

static UNIVERSITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s.\-]+$").expect("valid university pattern"));

static MAJOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s&\-]+$").expect("valid major pattern"));

static SKILLS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s,.+#\-]+$").expect("valid skills pattern"));

static COMPANY_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s&.\-]+$").expect("valid company name pattern"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]+$").expect("valid phone pattern"));

static WEBSITE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b[-a-zA-Z0-9()@:%_+.~#?&/=]*$",
    )
    .expect("valid website pattern")
});

static LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s,.\-]+$").expect("valid location pattern"));

/// The special characters a complex password must draw from
const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// Validates a person or account name: letters and spaces, 2-50 characters
pub fn is_valid_name(name: &str) -> bool {
    let trimmed = name.trim();
    (2..=50).contains(&trimmed.len()) && NAME_RE.is_match(trimmed)
}

/// Validates an email address (case-insensitive)
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Validates a password
///
/// With `require_complex` (signup, password change) the password must be at
/// least 8 characters drawn entirely from letters, digits, and `@$!%*?&`,
/// with at least one lowercase letter, one uppercase letter, one digit, and
/// one special character. Without it (login) only a 6-character minimum
/// applies.
///
/// The complexity rule would normally be a lookahead regex; the `regex`
/// crate has no lookahead, so it is expressed as character-class scans.
pub fn is_valid_password(password: &str, require_complex: bool) -> bool {
    if !require_complex {
        return password.len() >= 6;
    }

    if password.len() < 8 {
        return false;
    }

    let allowed =
        |c: char| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c);
    if !password.chars().all(allowed) {
        return false;
    }

    password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// Validates an optional university name: letters, spaces, dots, hyphens, 2-100 chars
pub fn is_valid_university(university: Option<&str>) -> bool {
    validate_optional(university, 2, 100, &UNIVERSITY_RE)
}

/// Validates an optional major / field of study
pub fn is_valid_major(major: Option<&str>) -> bool {
    validate_optional(major, 2, 100, &MAJOR_RE)
}

/// Validates an optional graduation year: integer in [2020, 2035]
pub fn is_valid_graduation_year(year: Option<i32>) -> bool {
    match year {
        None => true,
        Some(y) => (2020..=2035).contains(&y),
    }
}

/// Validates an optional comma-separated skills list
pub fn is_valid_skills(skills: Option<&str>) -> bool {
    validate_optional(skills, 2, 500, &SKILLS_RE)
}

/// Validates an optional free-text description (at most 1000 characters)
pub fn is_valid_description(description: Option<&str>) -> bool {
    match description {
        None => true,
        Some(d) => d.trim().len() <= 1000,
    }
}

/// Validates an optional company display name
pub fn is_valid_company_name(company_name: Option<&str>) -> bool {
    validate_optional(company_name, 2, 100, &COMPANY_NAME_RE)
}

/// Validates an optional phone number: digits, spaces, hyphens, parentheses,
/// optional leading `+`, 7-20 characters
pub fn is_valid_phone(phone: Option<&str>) -> bool {
    validate_optional(phone, 7, 20, &PHONE_RE)
}

/// Validates an optional website URL (must start with `http://` or `https://`)
pub fn is_valid_website(website: Option<&str>) -> bool {
    match website {
        None => true,
        Some(w) if w.trim().is_empty() => true,
        Some(w) => WEBSITE_RE.is_match(w.trim()),
    }
}

/// Validates an optional location string
pub fn is_valid_location(location: Option<&str>) -> bool {
    validate_optional(location, 2, 100, &LOCATION_RE)
}

/// Normalizes an optional form field: empty and whitespace-only values become `None`
pub fn clean_optional(value: Option<&str>) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

fn validate_optional(value: Option<&str>, min: usize, max: usize, pattern: &Regex) -> bool {
    match value {
        None => true,
        Some(v) if v.trim().is_empty() => true,
        Some(v) => {
            let trimmed = v.trim();
            (min..=max).contains(&trimmed.len()) && pattern.is_match(trimmed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(is_valid_name("Jane Doe"));
        assert!(is_valid_name("Li"));
        assert!(is_valid_name("  Padded Name  "));
    }

    #[test]
    fn test_invalid_names() {
        assert!(!is_valid_name("J"));
        assert!(!is_valid_name("Jane42"));
        assert!(!is_valid_name("O'Brien"));
        assert!(!is_valid_name(&"a".repeat(51)));
        assert!(!is_valid_name(""));
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("jane@x.com"));
        assert!(is_valid_email("Jane.Doe+tag@Example.CO.UK"));
        assert!(is_valid_email("  user_1%x@sub.domain.io  "));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("jane@x"));
        assert!(!is_valid_email("jane.example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane@.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_complex_password_rules() {
        assert!(is_valid_password("Abcd123!", true));
        assert!(is_valid_password("Str0ng&Pass", true));

        // Too short
        assert!(!is_valid_password("Ab1!", true));
        // Missing uppercase
        assert!(!is_valid_password("abcd123!", true));
        // Missing lowercase
        assert!(!is_valid_password("ABCD123!", true));
        // Missing digit
        assert!(!is_valid_password("Abcdefg!", true));
        // Missing special character
        assert!(!is_valid_password("Abcd1234", true));
        // Character outside the allowed set
        assert!(!is_valid_password("Abcd123! space", true));
    }

    #[test]
    fn test_login_password_rule() {
        assert!(is_valid_password("simple", false));
        assert!(is_valid_password("abcdef", false));
        assert!(!is_valid_password("short", false));
    }

    #[test]
    fn test_optional_fields_accept_absent_values() {
        assert!(is_valid_university(None));
        assert!(is_valid_university(Some("")));
        assert!(is_valid_university(Some("   ")));
        assert!(is_valid_major(None));
        assert!(is_valid_skills(None));
        assert!(is_valid_phone(None));
        assert!(is_valid_website(None));
        assert!(is_valid_location(None));
        assert!(is_valid_graduation_year(None));
        assert!(is_valid_description(None));
    }

    #[test]
    fn test_university() {
        assert!(is_valid_university(Some("University of Wollongong")));
        assert!(is_valid_university(Some("St. Mary-le-Bow")));
        assert!(!is_valid_university(Some("U")));
        assert!(!is_valid_university(Some("Uni 42")));
    }

    #[test]
    fn test_major() {
        assert!(is_valid_major(Some("Computer Science")));
        assert!(is_valid_major(Some("Arts & Humanities")));
        assert!(!is_valid_major(Some("CS101")));
    }

    #[test]
    fn test_graduation_year_bounds() {
        assert!(is_valid_graduation_year(Some(2020)));
        assert!(is_valid_graduation_year(Some(2035)));
        assert!(!is_valid_graduation_year(Some(2019)));
        assert!(!is_valid_graduation_year(Some(2036)));
    }

    #[test]
    fn test_skills() {
        assert!(is_valid_skills(Some("Rust, C++, SQL")));
        assert!(is_valid_skills(Some("C# .NET")));
        assert!(!is_valid_skills(Some("emoji🙂")));
        assert!(!is_valid_skills(Some(&"x".repeat(501))));
    }

    #[test]
    fn test_description_length() {
        assert!(is_valid_description(Some(&"d".repeat(1000))));
        assert!(!is_valid_description(Some(&"d".repeat(1001))));
    }

    #[test]
    fn test_company_name() {
        assert!(is_valid_company_name(Some("Acme Corp.")));
        assert!(is_valid_company_name(Some("A&B Logistics 24-7")));
        assert!(!is_valid_company_name(Some("Bad/Name")));
    }

    #[test]
    fn test_phone() {
        assert!(is_valid_phone(Some("+61 (02) 9999-0000")));
        assert!(is_valid_phone(Some("1234567")));
        assert!(!is_valid_phone(Some("123456")));
        assert!(!is_valid_phone(Some("phone-number")));
        assert!(!is_valid_phone(Some(&"1".repeat(21))));
    }

    #[test]
    fn test_website() {
        assert!(is_valid_website(Some("https://example.com")));
        assert!(is_valid_website(Some("http://www.example.com/jobs?active=1")));
        assert!(!is_valid_website(Some("example.com")));
        assert!(!is_valid_website(Some("ftp://example.com")));
    }

    #[test]
    fn test_location() {
        assert!(is_valid_location(Some("Sydney, NSW")));
        assert!(!is_valid_location(Some("Sector 9!")));
    }

    #[test]
    fn test_clean_optional() {
        assert_eq!(clean_optional(Some("  value  ")), Some("value".to_string()));
        assert_eq!(clean_optional(Some("   ")), None);
        assert_eq!(clean_optional(Some("")), None);
        assert_eq!(clean_optional(None), None);
    }
}
