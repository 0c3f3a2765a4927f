//! Operator account commands.
//!
//! # Usage
//!
//! ```bash
//! # Register an operator (password from MATCHBOOK_PASSWORD or stdin)
//! echo 'Str0ng!Pass' | mb-cli admin register -u desk_lead -e lead@example.com -n "Desk Lead"
//!
//! # Check a login
//! mb-cli admin login -u desk_lead
//!
//! # Manage accounts
//! mb-cli admin list
//! mb-cli admin deactivate desk_lead
//! mb-cli admin activate desk_lead
//! mb-cli admin passwd desk_lead
//! mb-cli admin delete desk_lead
//! ```

use matchbook_admin::db::AdminUserRepository;
use matchbook_admin::models::AdminUser;
use matchbook_admin::services::{AuthService, Registration};

use super::{emit, emit_json, read_password};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Register a new operator.
pub async fn register(username: &str, email: &str, name: &str, json: bool) -> CommandResult {
    let password = read_password()?;
    let pool = super::connect().await?;
    let auth = AuthService::new(AdminUserRepository::new(&pool));

    let registration = Registration {
        username: username.to_owned(),
        email: email.to_owned(),
        full_name: name.to_owned(),
        password,
    };

    // A weak password error lists every failed rule; main logs it once.
    let user = auth.register(&registration).await?;

    if json {
        return emit_json(&user);
    }
    emit(format_args!("Registered {} (id {})", user.username, user.id))?;
    Ok(())
}

/// Verify a username-or-email and password.
pub async fn login(login: &str, json: bool) -> CommandResult {
    let password = read_password()?;
    let pool = super::connect().await?;
    let auth = AuthService::new(AdminUserRepository::new(&pool));

    let user = auth.login(login, &password).await?;

    if json {
        return emit_json(&user);
    }
    emit(format_args!("Welcome, {}", user.display_name()))?;
    Ok(())
}

/// List every operator.
pub async fn list(json: bool) -> CommandResult {
    let pool = super::connect().await?;
    let auth = AuthService::new(AdminUserRepository::new(&pool));

    let users = auth.list_users().await?;

    if json {
        return emit_json(&users);
    }
    if users.is_empty() {
        emit("No admin users.")?;
        return Ok(());
    }
    for user in &users {
        emit(describe(user))?;
    }
    Ok(())
}

/// Allow or block logins for an operator.
pub async fn set_active(username: &str, active: bool) -> CommandResult {
    let pool = super::connect().await?;
    let auth = AuthService::new(AdminUserRepository::new(&pool));

    let user = auth.set_active(username, active).await?;
    let state = if user.is_active { "activated" } else { "deactivated" };
    emit(format_args!("{} {state}", user.username))?;
    Ok(())
}

/// Replace an operator's password.
pub async fn change_password(username: &str) -> CommandResult {
    let password = read_password()?;
    let pool = super::connect().await?;
    let auth = AuthService::new(AdminUserRepository::new(&pool));

    auth.change_password(username, &password).await?;
    emit(format_args!("Password changed for {username}"))?;
    Ok(())
}

/// Delete an operator.
pub async fn delete(username: &str) -> CommandResult {
    let pool = super::connect().await?;
    let auth = AuthService::new(AdminUserRepository::new(&pool));

    auth.delete_user(username).await?;
    emit(format_args!("Deleted {username}"))?;
    Ok(())
}

fn describe(user: &AdminUser) -> String {
    let last_login = user.last_login.map_or_else(
        || "never".to_owned(),
        |at| at.format("%Y-%m-%d %H:%M").to_string(),
    );
    format!(
        "{:>4}  {:<20} {:<30} {:<8} last login: {last_login}",
        user.id.as_i32(),
        user.username.as_str(),
        user.email.as_str(),
        if user.is_active { "active" } else { "inactive" },
    )
}
