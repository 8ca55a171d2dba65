/// Authentication primitives
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`session`]: Server-side session store keyed by opaque cookie tokens
///
/// Passwords are always stored as Argon2id hashes; session tokens carry no
/// information themselves and resolve to an [`session::Identity`] only through
/// the store.
///
/// # Example
///
/// ```
/// use internlink_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("Abcd123!")?;
/// assert!(verify_password("Abcd123!", &hash)?);
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod session;
