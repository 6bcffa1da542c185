use anyhow::{Context, Result};

/// Prompts the operator for the admin password without echoing it
pub fn prompt_for_password() -> Result<String> {
    let password = rpassword::prompt_password("Admin password: ")
        .context("Failed to read password from stdin")?;

    let password = password.trim();

    if password.is_empty() {
        anyhow::bail!("Password cannot be empty");
    }

    Ok(password.to_string())
}

/// Resolve the caller's credential: the supplied value (flag or its env
/// fallback, already merged by the CLI), otherwise an interactive prompt.
pub fn resolve_password(supplied: Option<String>) -> Result<String> {
    match supplied.filter(|p| !p.trim().is_empty()) {
        Some(password) => Ok(password.trim().to_string()),
        None => prompt_for_password(),
    }
}
