use std::io;

use clickatell::{ClickatellClient, Credentials};

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let credentials = Credentials::new(
        required("CLICKATELL_API_ID")?,
        required("CLICKATELL_USER")?,
        required("CLICKATELL_PASSWORD")?,
    )?;

    let mut builder = ClickatellClient::builder(credentials);
    if let Ok(api_url) = std::env::var("CLICKATELL_API_URL") {
        builder = builder.api_url(api_url);
    }
    let mut client = builder.build()?;

    let session = client.authenticate().await?;
    println!("session: {}", session.as_str());

    let balance = client.get_balance().await?;
    println!("balance: {balance} (parsed: {:?})", balance.amount());

    Ok(())
}
