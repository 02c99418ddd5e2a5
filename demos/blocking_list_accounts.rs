//! List the accounts visible to the credential.
//!
//! Run:
//! `LIBIB_API_KEY=<key> LIBIB_API_USER=<user> cargo run --example blocking_list_accounts`
//!
//! Set `LIBIB_ULTIMATE_ID` to see every account of an Ultimate credential.

use libib_client::BlockingLibibClient;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = BlockingLibibClient::from_env()?;
    let accounts = client.accounts().list()?;
    println!("{}", serde_json::to_string_pretty(&accounts)?);
    Ok(())
}
