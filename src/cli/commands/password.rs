use serde_json::json;

use crate::auth::hash_password;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

/// Print a PHC string suitable for seeding `accounts.password_hash`
pub fn hash(password: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let hash = hash_password(password)?;
    match output_format {
        OutputFormat::Json => output_success(&output_format, "Password hashed", Some(json!({ "hash": hash }))),
        OutputFormat::Text => {
            println!("{}", hash);
            Ok(())
        }
    }
}
