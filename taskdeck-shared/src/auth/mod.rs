/// Authentication and authorization utilities
///
/// This module provides the security primitives for TaskDeck:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`flow`]: The login/logout state machine and its user-visible messages
/// - [`authorization`]: Ownership checks against the current session
/// - [`middleware`]: The `CurrentUser` extractor backed by the session store
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Session Tokens**: Secure random generation with SHA-256 hashing,
///   server-side revocation on logout
/// - **Constant-time Comparison**: Password verification uses Argon2's
///   constant-time check
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod flow;
pub mod middleware;
pub mod password;
