use std::io;

use clickatell::{ClickatellClient, Credentials, MessageText, PatternValidator};

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
    let to = required("CLICKATELL_TO")?;
    let message = std::env::var("CLICKATELL_MESSAGE")
        .unwrap_or_else(|_| "Hello from the clickatell example.".to_owned());

    let mut builder =
        ClickatellClient::builder(credentials).validator(PatternValidator::australian_mobile()?);
    if let Ok(api_url) = std::env::var("CLICKATELL_API_URL") {
        builder = builder.api_url(api_url);
    }
    let mut client = builder.build()?;

    client
        .add_recipients(to.split(','))
        .set_message(MessageText::new(message)?);
    for rejected in client.rejected_recipients() {
        println!("skipping {}: {}", rejected.input, rejected.reason);
    }

    let ids = client.send_messages().await?;
    println!("api message ids: {ids:?}");
    println!("balance: {}", client.get_balance().await?);

    Ok(())
}
