//! Account listing for operators.

use std::fmt::Write as _;

use shopwai_storefront::error::Result;
use shopwai_storefront::models::User;
use shopwai_storefront::state::AppState;

/// Every registered account in registration order.
///
/// # Errors
///
/// Returns an error if the user collection is unreadable.
pub fn list(state: &AppState) -> Result<String> {
    let users = state.accounts().list()?;
    if users.is_empty() {
        return Ok("No accounts registered.".to_string());
    }
    let mut out = String::new();
    for user in &users {
        let _ = writeln!(out, "{}", line(user));
    }
    out.truncate(out.trim_end().len());
    Ok(out)
}

/// The account registered under `email`.
///
/// # Errors
///
/// Returns an error if the email is malformed.
pub fn show(state: &AppState, email: &str) -> Result<String> {
    Ok(state
        .accounts()
        .find_by_email(email)?
        .map_or_else(|| format!("No account for {}", email.trim()), |user| line(&user)))
}

fn line(user: &User) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        user.id,
        user.name,
        user.email,
        user.role,
        user.created_at.format("%Y-%m-%d")
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopwai_core::Role;

    use super::*;
    use crate::commands::{account, testing};

    #[test]
    fn test_list_and_show() {
        let state = testing::state();
        assert_eq!(list(&state).unwrap(), "No accounts registered.");

        account::register(&state, "Maria", "maria@x.org", "pw", "pw", Role::Vendor).unwrap();
        account::register(&state, "João", "joao@x.org", "pw", "pw", Role::Customer).unwrap();

        let listed = list(&state).unwrap();
        assert_eq!(listed.lines().count(), 2);
        assert!(!listed.contains("argon2"));

        let maria = show(&state, " maria@x.org ").unwrap();
        assert!(maria.contains("\tMaria\tmaria@x.org\tvendor\t"));
        assert_eq!(show(&state, "nobody@x.org").unwrap(), "No account for nobody@x.org");

        let err = show(&state, "not-an-email").unwrap_err();
        assert_eq!(err.user_message(), "Invalid email address");
    }
}
