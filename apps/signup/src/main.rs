mod config;

use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    validate, HttpAuthApi, RegistrationController, RegistrationWorkflow, SessionStore,
    SubmitOutcome,
};
use shared::domain::{FormField, RegistrationInput};
use tracing::{error, info};

use crate::config::{load_settings, parse_api_base_url};

#[derive(Parser)]
#[command(name = "signup", about = "Create an account and sign in against the auth backend")]
struct Cli {
    /// Settings file; defaults to ./signup.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the form, create the account, then sign in.
    Register(FormArgs),
    /// Run the client-side checks only.
    Validate(FormArgs),
}

#[derive(Args)]
struct FormArgs {
    #[arg(long)]
    full_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    confirm_password: String,
}

impl FormArgs {
    fn into_input(self) -> RegistrationInput {
        RegistrationInput::new(
            self.full_name,
            self.email,
            self.password,
            self.confirm_password,
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(url) = cli.api_base_url {
        settings.api_base_url = url;
    }
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();

    match cli.command {
        Command::Validate(form) => match validate(&form.into_input()) {
            Ok(()) => {
                println!("Valid");
                Ok(())
            }
            Err(err) => bail!("{err}"),
        },
        Command::Register(form) => {
            let base_url = parse_api_base_url(&settings.api_base_url)?;
            info!(%base_url, "using auth backend");
            register(base_url, form.into_input()).await
        }
    }
}

async fn register(base_url: url::Url, input: RegistrationInput) -> Result<()> {
    let sessions = Arc::new(SessionStore::new());
    let workflow = RegistrationWorkflow::new(Arc::new(HttpAuthApi::new(base_url)), sessions);
    let controller = RegistrationController::new(workflow);

    for field in FormField::ALL {
        // Live per-keystroke result; `submit` runs the full check again.
        controller.change_field(field, input.get(field)).await.ok();
        controller.blur_field(field).await;
    }

    match controller.submit().await {
        SubmitOutcome::SessionEstablished(session) => {
            println!("Signed in.");
            if let Some(profile) = &session.profile {
                println!("{}", serde_json::to_string_pretty(profile)?);
            }
            Ok(())
        }
        SubmitOutcome::Invalid(err) => {
            for (field, message) in controller.view().await.field_errors {
                eprintln!("{field}: {message}");
            }
            bail!("{err}")
        }
        SubmitOutcome::AlreadySubmitting => bail!("a submission is already in progress"),
        SubmitOutcome::Failed(err) => {
            error!(error = %err, "registration failed");
            bail!("{}", err.user_message())
        }
    }
}
