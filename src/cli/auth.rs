//! Account CLI commands
//!
//! Registration, password change, and profile management. Passwords come
//! from the `SPENDLOG_PASSWORD` environment variable when set, otherwise
//! they are prompted for without echo.

use clap::{Args, Subcommand};

use crate::error::{SpendlogError, SpendlogResult};
use crate::services::{AuthService, ProfileUpdate, RegisterInput};
use crate::session::Session;
use crate::storage::Storage;

/// Resolved login credentials
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Resolve credentials from CLI arguments, prompting for a missing password
pub fn resolve_credentials(
    user: Option<String>,
    password: Option<String>,
) -> SpendlogResult<Credentials> {
    let username = user.ok_or_else(|| {
        SpendlogError::Validation(
            "No username given; pass --user or set SPENDLOG_USER".to_string(),
        )
    })?;

    let password = match password {
        Some(p) => p,
        None => rpassword::prompt_password(format!("Password for {username}: "))?,
    };

    Ok(Credentials { username, password })
}

/// Authenticate and return a session
pub fn login(storage: &Storage, credentials: &Credentials) -> SpendlogResult<Session> {
    AuthService::new(storage).authenticate(&credentials.username, &credentials.password)
}

/// Arguments for registering a new user
#[derive(Args)]
pub struct RegisterArgs {
    /// Email address
    #[arg(short, long)]
    pub email: Option<String>,

    /// Full name
    #[arg(short, long)]
    pub full_name: Option<String>,
}

/// Handle the register command
pub fn handle_register(
    storage: &Storage,
    user: Option<String>,
    password: Option<String>,
    args: RegisterArgs,
) -> SpendlogResult<()> {
    let username = user.ok_or_else(|| {
        SpendlogError::Validation(
            "No username given; pass --user or set SPENDLOG_USER".to_string(),
        )
    })?;

    let password = match password {
        Some(p) => p,
        None => {
            let first = rpassword::prompt_password("Choose a password: ")?;
            let second = rpassword::prompt_password("Repeat password: ")?;
            if first != second {
                return Err(SpendlogError::Validation(
                    "Passwords did not match".to_string(),
                ));
            }
            first
        }
    };

    let account = AuthService::new(storage).register(RegisterInput {
        username,
        password,
        email: args.email,
        full_name: args.full_name,
    })?;

    println!("Registered user '{}'", account.username);
    println!("Account id: {}", account.id);
    Ok(())
}

/// Handle the passwd command
pub fn handle_passwd(storage: &Storage, session: &Session, old_password: &str) -> SpendlogResult<()> {
    let new_password = rpassword::prompt_password("New password: ")?;
    let repeat = rpassword::prompt_password("Repeat new password: ")?;
    if new_password != repeat {
        return Err(SpendlogError::Validation(
            "Passwords did not match".to_string(),
        ));
    }

    AuthService::new(storage).change_password(session, old_password, &new_password)?;
    println!("Password changed for '{}'", session.username());
    Ok(())
}

/// Profile subcommands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the current profile
    Show,

    /// Update profile fields and preferences
    Set {
        /// Email address
        #[arg(long)]
        email: Option<String>,

        /// Full name
        #[arg(long)]
        full_name: Option<String>,

        /// Preferred currency code (e.g. "USD")
        #[arg(long)]
        currency: Option<String>,

        /// Preferred date format (e.g. "%Y-%m-%d")
        #[arg(long)]
        date_format: Option<String>,

        /// Preferred theme ("light" or "dark")
        #[arg(long)]
        theme: Option<String>,
    },
}

/// Handle a profile command
pub fn handle_profile_command(
    storage: &Storage,
    session: &Session,
    cmd: ProfileCommands,
) -> SpendlogResult<()> {
    let auth = AuthService::new(storage);

    match cmd {
        ProfileCommands::Show => {
            let user = auth.current_user(session)?;
            println!("Username:    {}", user.username);
            if !user.email.is_empty() {
                println!("Email:       {}", user.email);
            }
            if !user.full_name.is_empty() {
                println!("Full name:   {}", user.full_name);
            }
            println!("Member since {}", user.created_at.format("%Y-%m-%d"));
            if let Some(last_login) = user.last_login {
                println!("Last login:  {}", last_login.format("%Y-%m-%d %H:%M UTC"));
            }
            println!();
            println!("Preferences:");
            println!("  Currency:    {}", user.preferences.currency);
            println!("  Date format: {}", user.preferences.date_format);
            println!("  Theme:       {}", user.preferences.theme);
        }

        ProfileCommands::Set {
            email,
            full_name,
            currency,
            date_format,
            theme,
        } => {
            let updated = auth.update_profile(
                session,
                ProfileUpdate {
                    email,
                    full_name,
                    currency,
                    date_format,
                    theme,
                },
            )?;
            println!("Profile updated for '{}'", updated.username);
        }
    }

    Ok(())
}
