//! User CLI commands

use chrono::Utc;
use clap::Subcommand;

use crate::crypto::SecretString;
use crate::display::format_activity_list;
use crate::error::{CalcError, CalcResult};
use crate::services::activity::RECENT_LIMIT;
use crate::services::{ActivityService, AuthService};
use crate::storage::Storage;

/// Environment variable read when `--password` is not given
pub const PASSWORD_ENV: &str = "CALCDECK_PASSWORD";

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a local account
    Register {
        username: String,
        /// Password (prompted for when omitted)
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },
    /// Log in as an existing user
    Login {
        username: String,
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },
    /// End the current session
    Logout,
    /// Show the logged-in user
    Whoami,
}

/// Prompt for a password (hidden input)
fn prompt_password(prompt: &str) -> CalcResult<SecretString> {
    rpassword::prompt_password(prompt)
        .map(SecretString::from)
        .map_err(|e| CalcError::Auth(format!("Failed to read password: {}", e)))
}

fn resolve_password(given: Option<String>, confirm: bool) -> CalcResult<SecretString> {
    if let Some(password) = given {
        return Ok(SecretString::from(password));
    }

    let password = prompt_password("Password: ")?;
    if confirm {
        let again = prompt_password("Confirm password: ")?;
        if password.as_str() != again.as_str() {
            return Err(CalcError::Validation("Passwords do not match".into()));
        }
    }
    Ok(password)
}

/// Handle a user command
pub fn handle_user_command(storage: &Storage, cmd: UserCommands) -> CalcResult<()> {
    let auth = AuthService::new(storage);

    match cmd {
        UserCommands::Register { username, password } => {
            let password = resolve_password(password, true)?;
            let user = auth.register(&username, &password)?;
            println!(
                "Registered {}. Run `calcdeck user login {}` to start.",
                user.username, user.username
            );
        }
        UserCommands::Login { username, password } => {
            let password = resolve_password(password, false)?;
            let session = auth.login(&username, &password)?;
            println!("Logged in as {}", session.username);

            let recent = ActivityService::new(storage).recent(session.user_id, RECENT_LIMIT)?;
            if !recent.is_empty() {
                println!("\nRecent activity:");
                println!("{}", format_activity_list(&recent, Utc::now()));
            }
        }
        UserCommands::Logout => match auth.logout()? {
            Some(session) => println!("Logged out {}", session.username),
            None => println!("Not logged in."),
        },
        UserCommands::Whoami => match auth.current()? {
            Some(session) => println!(
                "{} (since {})",
                session.username,
                session.logged_in_at.format("%Y-%m-%d %H:%M")
            ),
            None => println!("Not logged in."),
        },
    }
    Ok(())
}
