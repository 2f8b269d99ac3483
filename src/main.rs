use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};

use courier_client::config::Settings;
use courier_client::metrics::encode_metrics;
use courier_client::telemetry::{init_telemetry, TracingReporter};
use courier_client::{Attachment, CourierClient};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print Prometheus metrics after the command finishes
    #[arg(long, global = true)]
    print_metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the resolved template ids
    Templates,

    /// Exit with success if the template id is known
    Validate {
        template_id: String,
    },

    /// Re-resolve templates and overwrite the fallback list
    RefreshFallback,

    /// Send a template to a single recipient
    Send {
        #[arg(long)]
        email: String,

        #[arg(long)]
        template: String,

        /// JSON object substituted into the template
        #[arg(long, default_value = "{}")]
        data: String,

        /// Text file to attach
        #[arg(long)]
        attachment: Option<PathBuf>,

        #[arg(long, default_value = "text/csv")]
        content_type: String,

        #[arg(long, default_value = "base64")]
        encoding: String,

        /// Send even if the template id is not in the template set
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let settings = Settings::new().context("Failed to load configuration")?;
    let _telemetry = init_telemetry(&settings.otel)?;

    let client = CourierClient::new(settings.courier, Arc::new(TracingReporter))
        .await
        .context("Failed to initialize Courier client")?;

    let code = run(&client, args.command).await?;

    if args.print_metrics {
        print!("{}", encode_metrics()?);
    }

    Ok(code)
}

async fn run(client: &CourierClient, command: Command) -> Result<ExitCode> {
    match command {
        Command::Templates => {
            for id in client.templates() {
                println!("{id}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { template_id } => {
            if client.is_valid_template(&template_id) {
                println!("{template_id}: valid");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("{template_id}: unknown");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::RefreshFallback => {
            let templates = client
                .refresh_fallback()
                .await
                .context("Failed to refresh fallback templates")?;
            println!("Wrote {} template ids to the fallback list", templates.len());
            Ok(ExitCode::SUCCESS)
        }
        Command::Send {
            email,
            template,
            data,
            attachment,
            content_type,
            encoding,
            force,
        } => {
            if !force && !client.is_valid_template(&template) {
                bail!("Unknown template id: {template}");
            }

            let data: Map<String, Value> =
                serde_json::from_str(&data).context("--data must be a JSON object")?;

            let attachment = match attachment {
                Some(path) => Some(load_attachment(&path, content_type, encoding).await?),
                None => None,
            };

            match client.send(&email, &template, data, attachment).await {
                Some(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    println!("{} {}", status.as_u16(), body);
                    Ok(if status.is_success() {
                        ExitCode::SUCCESS
                    } else {
                        ExitCode::FAILURE
                    })
                }
                None => {
                    eprintln!("No response from Courier; delivery outcome unknown");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

async fn load_attachment(
    path: &Path,
    content_type: String,
    encoding: String,
) -> Result<Attachment> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read attachment {} as UTF-8 text", path.display()))?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .context("Attachment path has no file name")?;

    Ok(Attachment::new(file_name, content, encoding, content_type))
}
