//! Create a patron, then fetch it back by barcode.
//!
//! Run:
//! `LIBIB_API_KEY=<key> LIBIB_API_USER=<user> cargo run --example async_create_patron -- <barcode> <email>`

use libib_client::LibibClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let (Some(barcode), Some(email)) = (args.next(), args.next()) else {
        eprintln!("usage: async_create_patron <barcode> <email>");
        std::process::exit(2);
    };

    let client = LibibClient::from_env()?;
    let patrons = client.patrons();

    if let Err(error) = patrons
        .create([("barcode", barcode.as_str()), ("email", email.as_str())])
        .await
    {
        match error.to_error_result() {
            Some(result) => eprintln!("{}", serde_json::to_string_pretty(&result)?),
            None => eprintln!("{error}"),
        }
        std::process::exit(1);
    }

    let patron = patrons.get_by_id(&barcode).await?;
    println!("{}", serde_json::to_string_pretty(&patron)?);
    Ok(())
}
