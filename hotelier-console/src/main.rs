use std::env;
use std::time::Duration;

use anyhow::Context;
use hotelier_console::{CustomersController, HttpCustomerApi, TextRenderer};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "\
Commands:
  list | retry                 reload the table
  add | edit <id>              open the customer form
  set <field> <value>          fill a form field (e.g. set lastName Lovelace)
  save | cancel                submit or close the form
  delete <id>                  delete a customer (asks yes/no)
  yes | no                     answer the delete prompt
  ok                           dismiss the alert
  quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotelier_console=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_url = env::var("HOTELIER_API_URL").unwrap_or_else(|_| "http://localhost:3000".into());
    let timeout = env::var("HOTELIER_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);
    let ssn = env::var("HOTELIER_SSN").context("HOTELIER_SSN must be set")?;
    let password = env::var("HOTELIER_PASSWORD").context("HOTELIER_PASSWORD must be set")?;

    let mut api = HttpCustomerApi::new(&base_url, Duration::from_secs(timeout))?;
    let login = api.login(&ssn, &password).await.context("Employee login failed")?;
    info!(
        role = %login.user.role,
        hotel_id = login.user.hotel_id,
        "Logged in as {} {}",
        login.user.first_name,
        login.user.last_name
    );

    let mut controller = CustomersController::new(api, TextRenderer::new(std::io::stdout()));
    controller.load().await;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut parts = line.trim().splitn(3, ' ');
        let command = parts.next().unwrap_or_default();
        let arg = parts.next();
        let rest = parts.next().unwrap_or_default();

        let outcome = match (command, arg) {
            ("", _) => Ok(()),
            ("quit", _) | ("exit", _) => break,
            ("list", _) => {
                controller.load().await;
                Ok(())
            }
            ("retry", _) => controller.retry().await,
            ("add", _) => controller.open_form(None).await,
            ("edit", Some(id)) => match id.parse() {
                Ok(id) => controller.open_form(Some(id)).await,
                Err(_) => {
                    println!("Invalid customer id: {id}");
                    Ok(())
                }
            },
            ("set", Some(field)) => controller.set_field(field, rest),
            ("save", _) => controller.submit().await,
            ("cancel", _) => controller.close_form(),
            ("delete", Some(id)) => {
                match id.parse() {
                    Ok(id) => controller.request_delete(id),
                    Err(_) => println!("Invalid customer id: {id}"),
                }
                Ok(())
            }
            ("yes", _) => {
                controller.answer_delete(true).await;
                Ok(())
            }
            ("no", _) => {
                controller.answer_delete(false).await;
                Ok(())
            }
            ("ok", _) => {
                controller.dismiss_alert();
                Ok(())
            }
            _ => {
                println!("{HELP}");
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("{e}");
        }
    }

    Ok(())
}
