//! Sign-in CLI commands
//!
//! Implements login, register, logout and status. The token issued by the
//! server is stored in the session file and reused by later commands.

use log::info;
use zeroize::Zeroizing;

use crate::api::ExpenseApi;
use crate::config::{CostbookPaths, Session};
use crate::error::{CostbookError, CostbookResult};

/// Log in (or register, then log in) and persist the token
pub fn handle_sign_in(
    api: &mut dyn ExpenseApi,
    paths: &CostbookPaths,
    name: &str,
    password: Option<String>,
    register: bool,
) -> CostbookResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CostbookError::Validation("Name cannot be empty".into()));
    }

    let password = match password {
        Some(password) => Zeroizing::new(password),
        None => prompt_password("Password: ")?,
    };
    if password.is_empty() {
        return Err(CostbookError::Validation("Password cannot be empty".into()));
    }

    let issued = if register {
        let issued = api.register(name, &password)?;
        println!("Registered '{}'.", name);
        issued
    } else {
        None
    };

    let token = match issued {
        Some(token) => token,
        None => api.login(name, &password)?,
    };

    api.set_token(Some(token.clone()));
    Session::new(token).save(paths)?;
    info!("signed in as {}", name);
    println!("Signed in as '{}'.", name);
    Ok(())
}

/// Forget the stored token
pub fn handle_logout(paths: &CostbookPaths) -> CostbookResult<()> {
    Session::clear(paths)?;
    info!("signed out");
    println!("Signed out.");
    Ok(())
}

/// Report whether the stored token is still accepted
pub fn handle_status(api: &dyn ExpenseApi, base_url: &str) -> CostbookResult<()> {
    println!("Server: {}", base_url);

    if api.token().is_none() {
        println!("Not signed in. Run 'costbook login <name>'.");
        return Ok(());
    }

    let validation = api.validate()?;
    if validation.valid {
        match validation.user_id {
            Some(user_id) => println!("Signed in (user {}).", user_id),
            None => println!("Signed in."),
        }
    } else {
        println!("Session expired. Run 'costbook login <name>'.");
    }
    Ok(())
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> CostbookResult<Zeroizing<String>> {
    rpassword::prompt_password(prompt)
        .map(Zeroizing::new)
        .map_err(|e| CostbookError::Io(format!("Failed to read password: {}", e)))
}
