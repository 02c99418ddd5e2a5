//! List managers with the blocking client.
//!
//! Run:
//! `LIBIB_API_KEY=<key> LIBIB_API_USER=<user> cargo run --example blocking_list_managers`

use libib_client::BlockingLibibClient;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = BlockingLibibClient::from_env()?;

    for manager in client.managers().list()? {
        println!(
            "{:<8} {} {} <{}>",
            manager.role, manager.first_name, manager.last_name, manager.email
        );
    }
    Ok(())
}
