//! List every patron, following pagination.
//!
//! Run:
//! `LIBIB_API_KEY=<key> LIBIB_API_USER=<user> cargo run --example async_list_patrons`
//!
//! Optional env vars:
//! - `LIBIB_ULTIMATE_ID` (Ultimate multi-account credential)
//! - `LIBIB_BASE_URL` (defaults to `https://api.libib.com`)

use libib_client::{LibibClient, LibibError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = match LibibClient::from_env() {
        Ok(client) => client,
        Err(LibibError::MissingCredential(name)) => {
            eprintln!("Set {name} before running this example.");
            std::process::exit(2);
        }
        Err(other) => return Err(other.into()),
    };

    let patrons = client.patrons().list().await?;
    println!("{}", serde_json::to_string_pretty(&patrons)?);
    Ok(())
}
