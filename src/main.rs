//! TMB Admin command-line client
//!
//! Entry point wiring configuration, logging and file-backed session storage
//! to the client stores. Every command prints the response body as JSON on
//! stdout; notifications go to stderr.

#![allow(clippy::too_many_lines)]

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde_json::{Value, json};

use tmb_admin::AppState;
use tmb_admin::config::{AppConfig, ConfigArgs};
use tmb_admin::dispatch::{MemoryNotifier, Severity};
use tmb_admin::routes::{self, Navigation};
use tmb_admin::telemetry;
use tmb_admin::types::{
    ForgotPasswordRequest, LoginRequest, PasswordRequest, Query, ResendOtpRequest,
    VerifyOtpRequest,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "TMB business administration client", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    /// Emit logs as JSON
    #[arg(long, env = "TMB_LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in; may leave the session waiting for an OTP
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TMB_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Complete a login with the emailed one-time passcode
    VerifyOtp {
        #[arg(long)]
        otp: String,
        /// Defaults to the email remembered by `login`
        #[arg(long)]
        email: Option<String>,
    },
    /// Send a fresh one-time passcode
    ResendOtp {
        #[arg(long)]
        email: Option<String>,
    },
    /// Request a password reset link
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Reset a password with the emailed token
    ResetPassword {
        #[command(flatten)]
        args: PasswordArgs,
    },
    /// Set a first password with the emailed token and sign in
    SetupPassword {
        #[command(flatten)]
        args: PasswordArgs,
    },
    /// Sign out and clear local session state
    Logout,
    /// Show the signed-in user
    Me,
    /// Show the local login state
    Status,
    /// Check where a navigation to PATH would land
    Route { path: String },
    /// Subscription plans
    Plans {
        #[command(subcommand)]
        action: PlanAction,
    },
    /// Menus
    Menus {
        #[command(subcommand)]
        action: MenuAction,
    },
    /// Email templates
    Templates {
        #[command(subcommand)]
        action: TemplateAction,
    },
    /// Outgoing email configuration
    EmailConfig {
        #[command(subcommand)]
        action: EmailConfigAction,
    },
    /// QuickBooks integration
    Quickbooks {
        #[command(subcommand)]
        action: QuickBooksAction,
    },
    /// Dashboard summary
    Dashboard,
}

#[derive(clap::Args, Debug)]
struct PasswordArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    token: String,
    #[arg(long, env = "TMB_PASSWORD", hide_env_values = true)]
    password: String,
}

impl PasswordArgs {
    fn into_request(self) -> PasswordRequest {
        PasswordRequest {
            email: self.email,
            token: self.token,
            password_confirmation: self.password.clone(),
            password: self.password,
        }
    }
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// JSON filter body
    #[arg(long, value_parser = parse_json, default_value = "{}")]
    payload: Value,
    /// Query parameter as key=value (repeatable)
    #[arg(long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,
}

impl SearchArgs {
    fn query(&self) -> Option<Query> {
        (!self.params.is_empty()).then(|| self.params.iter().cloned().collect())
    }
}

#[derive(Subcommand, Debug)]
enum PlanAction {
    Search(SearchArgs),
    Show {
        id: String,
    },
    Create {
        #[arg(long, value_parser = parse_json)]
        payload: Value,
    },
    Update {
        id: String,
        #[arg(long, value_parser = parse_json)]
        payload: Value,
    },
    Delete {
        id: String,
    },
    Status {
        id: String,
        #[arg(long, value_parser = parse_json)]
        payload: Value,
    },
}

#[derive(Subcommand, Debug)]
enum MenuAction {
    Search(SearchArgs),
    Create {
        #[arg(long, value_parser = parse_json)]
        payload: Value,
    },
    Update {
        id: String,
        #[arg(long, value_parser = parse_json)]
        payload: Value,
    },
    Status {
        id: String,
        #[arg(long, value_parser = parse_json)]
        payload: Value,
    },
}

#[derive(Subcommand, Debug)]
enum TemplateAction {
    Search(SearchArgs),
    Show {
        id: String,
    },
    Update {
        id: String,
        #[arg(long, value_parser = parse_json)]
        payload: Value,
    },
    /// Print the rendered template
    Preview {
        id: String,
        #[arg(long, value_parser = parse_json, default_value = "{}")]
        payload: Value,
    },
    Status {
        id: String,
        #[arg(long, value_parser = parse_json)]
        payload: Value,
    },
}

#[derive(Subcommand, Debug)]
enum EmailConfigAction {
    Get,
    Update {
        #[arg(long, value_parser = parse_json)]
        payload: Value,
    },
}

#[derive(Subcommand, Debug)]
enum QuickBooksAction {
    Info,
    Setup,
    Disconnect,
    Toggle {
        #[arg(long, value_parser = parse_json)]
        payload: Value,
    },
    SaveDefaults {
        #[arg(long, value_parser = parse_json)]
        payload: Value,
    },
    DepositBanks,
    ExpenseBankAccounts,
    CreditCardAccounts,
}

fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {e}"))
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env (if present)
    let _ = dotenv();

    let cli = Cli::parse();
    telemetry::init(cli.log_json);

    let notifier = MemoryNotifier::new();
    let result = run(cli, &notifier).await;

    for note in notifier.drain() {
        let tag = match note.severity {
            Severity::Success => "ok",
            Severity::Error => "error",
        };
        eprintln!("[{tag}] {}: {}", note.title, note.message);
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, notifier: &MemoryNotifier) -> anyhow::Result<()> {
    let config = AppConfig::from_args(&cli.config).context("Configuration error")?;
    let app = AppState::with_file_storage(config, Arc::new(notifier.clone()))?;

    let output = match cli.command {
        Command::Login { email, password } => {
            let res = app.auth.login(&LoginRequest { email, password }).await?;
            if res.requires_otp() {
                eprintln!("OTP required: run `tmb-admin verify-otp --otp <code>`");
            }
            serde_json::to_value(res)?
        }
        Command::VerifyOtp { otp, email } => {
            let email = remembered_email(&app, email)?;
            let res = app.auth.verify_otp(&VerifyOtpRequest { email, otp }).await?;
            serde_json::to_value(res)?
        }
        Command::ResendOtp { email } => {
            let email = remembered_email(&app, email)?;
            app.auth.resend_otp(&ResendOtpRequest { email }).await?
        }
        Command::ForgotPassword { email } => {
            app.auth
                .forgot_password(&ForgotPasswordRequest { email })
                .await?
        }
        Command::ResetPassword { args } => app.auth.reset_password(&args.into_request()).await?,
        Command::SetupPassword { args } => {
            serde_json::to_value(app.auth.setup_password(&args.into_request()).await?)?
        }
        Command::Logout => app.auth.logout().await?,
        Command::Me => serde_json::to_value(app.session.me().await?)?,
        Command::Status => {
            let cookie = app.session.get_cookie()?;
            json!({
                "auth": app.session.state(),
                "expires_at": cookie.as_ref().map(|c| c.expires_in),
                "has_refresh_token": cookie.as_ref().is_some_and(|c| c.refresh_token.is_some()),
            })
        }
        Command::Route { path } => match routes::guard(&app.routes, &path, &app.session)? {
            Navigation::Allow(found) => json!({
                "allow": found.route.path,
                "name": found.route.name,
                "params": found.params,
            }),
            Navigation::Redirect(to) => json!({ "redirect": to }),
            Navigation::NotFound => json!({ "not_found": path }),
        },
        Command::Plans { action } => match action {
            PlanAction::Search(args) => {
                app.plans
                    .search(&args.payload, args.query().as_ref())
                    .await?
            }
            PlanAction::Show { id } => app.plans.show(&id).await?,
            PlanAction::Create { payload } => app.plans.create(&payload).await?,
            PlanAction::Update { id, payload } => app.plans.update(&id, &payload).await?,
            PlanAction::Delete { id } => app.plans.delete_item(&id).await?,
            PlanAction::Status { id, payload } => app.plans.change_status(&id, &payload).await?,
        },
        Command::Menus { action } => match action {
            MenuAction::Search(args) => {
                app.menus
                    .search(&args.payload, args.query().as_ref())
                    .await?
            }
            MenuAction::Create { payload } => app.menus.create(&payload).await?,
            MenuAction::Update { id, payload } => app.menus.update(&id, &payload).await?,
            MenuAction::Status { id, payload } => app.menus.change_status(&id, &payload).await?,
        },
        Command::Templates { action } => match action {
            TemplateAction::Search(args) => {
                app.email_templates
                    .search(&args.payload, args.query().as_ref())
                    .await?
            }
            TemplateAction::Show { id } => app.email_templates.show(&id, None).await?,
            TemplateAction::Update { id, payload } => {
                app.email_templates.update(&id, &payload).await?
            }
            TemplateAction::Preview { id, payload } => {
                println!("{}", app.email_templates.preview(&id, &payload).await?);
                return Ok(());
            }
            TemplateAction::Status { id, payload } => {
                app.email_templates.change_status(&id, &payload).await?
            }
        },
        Command::EmailConfig { action } => match action {
            EmailConfigAction::Get => app.email_configuration.get_configuration().await?,
            EmailConfigAction::Update { payload } => {
                app.email_configuration
                    .update_configuration(&payload)
                    .await?
            }
        },
        Command::Quickbooks { action } => match action {
            QuickBooksAction::Info => app.integrations.quickbooks_info().await?,
            QuickBooksAction::Setup => app.integrations.setup_quickbooks().await?,
            QuickBooksAction::Disconnect => app.integrations.disconnect_quickbooks().await?,
            QuickBooksAction::Toggle { payload } => {
                app.integrations.toggle_quickbooks(&payload).await?
            }
            QuickBooksAction::SaveDefaults { payload } => {
                app.integrations.save_integration_defaults(&payload).await?
            }
            QuickBooksAction::DepositBanks => app.integrations.deposit_banks().await?,
            QuickBooksAction::ExpenseBankAccounts => {
                app.integrations.expense_bank_accounts().await?
            }
            QuickBooksAction::CreditCardAccounts => {
                app.integrations.credit_card_accounts().await?
            }
        },
        Command::Dashboard => app.dashboard.summary().await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn remembered_email(app: &AppState, explicit: Option<String>) -> anyhow::Result<String> {
    if let Some(email) = explicit {
        return Ok(email);
    }
    match app.session.get_email()? {
        Some(email) => Ok(email),
        None => bail!("no email remembered from `login`; pass --email"),
    }
}
