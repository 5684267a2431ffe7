//! Password hashing command.
//!
//! Prints an argon2 hash for manual provisioning (e.g. a direct SQL
//! insert against a locked-down environment).

use luxe_server::services::auth::hash_password;

use super::CommandError;

/// Hash a password and print the PHC string.
///
/// # Errors
///
/// Returns `CommandError` if hashing fails.
pub fn run(password: &str) -> Result<(), CommandError> {
    let hash = hash_password(password)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{hash}");
    }

    Ok(())
}
