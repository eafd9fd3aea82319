/// Authorization checks
///
/// TaskDeck's permission model is plain ownership: a logged-in user may
/// mutate only resources whose `user_id` is their own. Checks run against
/// an explicit [`CurrentUser`] context (never ambient state) and are
/// ordered: authentication first ("Login required"), then ownership
/// ("Forbidden access.").
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::authorization::require_ownership;
/// use taskdeck_shared::auth::middleware::CurrentUser;
/// use uuid::Uuid;
///
/// # fn example(current: CurrentUser, task_owner_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// require_ownership(&current, task_owner_id)?;
/// # Ok(())
/// # }
/// ```

use uuid::Uuid;

use super::middleware::CurrentUser;

/// Error type for authentication/authorization checks
///
/// The display strings are user-facing and must not change: the
/// authentication message is "Login required", the ownership message is
/// "Forbidden access." (with the trailing period).
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// No active session on a protected action
    #[error("Login required")]
    LoginRequired,

    /// The session user does not own the target resource
    #[error("Forbidden access.")]
    Forbidden,

    /// Database error during session lookup
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Checks that the current user owns a resource
///
/// # Errors
///
/// Returns `AuthzError::Forbidden` when `resource_owner_id` is another
/// user.
pub fn require_ownership(current: &CurrentUser, resource_owner_id: Uuid) -> Result<(), AuthzError> {
    if current.user_id != resource_owner_id {
        return Err(AuthzError::Forbidden);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current_user(user_id: Uuid) -> CurrentUser {
        CurrentUser {
            user_id,
            email: "test@example.com".to_string(),
            session_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_require_ownership_own_resource() {
        let user_id = Uuid::new_v4();
        let current = current_user(user_id);

        assert!(require_ownership(&current, user_id).is_ok());
    }

    #[test]
    fn test_require_ownership_other_resource() {
        let current = current_user(Uuid::new_v4());

        let err = require_ownership(&current, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AuthzError::Forbidden));
    }

    #[test]
    fn test_error_messages_are_exact() {
        assert_eq!(AuthzError::LoginRequired.to_string(), "Login required");
        assert_eq!(AuthzError::Forbidden.to_string(), "Forbidden access.");
    }
}
