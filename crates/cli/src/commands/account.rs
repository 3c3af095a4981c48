//! Account and session commands.

use shopwai_core::Role;
use shopwai_storefront::error::Result;
use shopwai_storefront::services::Registration;
use shopwai_storefront::state::AppState;

/// Create an account and log in as it.
///
/// # Errors
///
/// Returns an error if the input is invalid or the email is taken.
pub fn register(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
    role: Role,
) -> Result<String> {
    let user = state.accounts().register(&Registration {
        name,
        email,
        password,
        password_confirmation: confirm,
        role,
    })?;
    Ok(format!(
        "Welcome, {}! Registered and logged in as {} ({}).",
        user.name, user.email, user.role
    ))
}

/// Log in, replacing the current session.
///
/// # Errors
///
/// Returns an error if no account matches email, password and role.
pub fn login(state: &AppState, email: &str, password: &str, role: Role) -> Result<String> {
    let current = state.accounts().login(email, password, role)?;
    Ok(format!("Logged in as {} ({}).", current.name, current.role))
}

/// Log out.
///
/// # Errors
///
/// Returns an error if the session cannot be cleared.
pub fn logout(state: &AppState) -> Result<String> {
    state.session().logout()?;
    Ok("Logged out.".to_string())
}

/// Describe the logged-in user.
///
/// # Errors
///
/// Returns an error if the stored session is unreadable.
pub fn whoami(state: &AppState) -> Result<String> {
    Ok(match state.session().current()? {
        Some(user) => format!("{} <{}> ({}) id={}", user.name, user.email, user.role, user.id),
        None => "Not logged in.".to_string(),
    })
}
