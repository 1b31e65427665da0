mod dry_run;

use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use provadmin_api::{HttpProviderGateway, ProvadminClient, ProviderGateway, Session};
use provadmin_engine::{Confirmation, Dashboard, Driver, Msg};
use provadmin_types::{
    ChargeKind, DraftField, FormTab, MAX_INSTALLMENTS, Notification, PaymentFilter, ProviderPayment, ProviderRecord,
    Severity,
};
use provadmin_util::keystore::TokenStore;
use provadmin_util::preferences::UserPreferences;
use tracing::{debug, warn};

use crate::dry_run::DryRunGateway;

/// Administration client for provider accounts.
///
/// Without a subcommand the interactive dashboard starts.
#[derive(Debug, Parser)]
#[command(name = "provadmin", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// Backend origin, e.g. https://admin.example.com
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Admin bearer token for this invocation only
    #[arg(long, global = true)]
    token: Option<String>,

    /// Print mutating requests instead of sending them
    #[arg(long, global = true)]
    dry_run: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List providers
    List {
        /// Case-insensitive match on name or e-mail, substring match on CNPJ
        #[arg(long)]
        search: Option<String>,
        /// Print the raw records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a provider from field assignments
    Create {
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        assignments: Vec<(DraftField, String)>,
    },
    /// Update a provider; unspecified fields keep their current values
    Update {
        id: String,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        assignments: Vec<(DraftField, String)>,
    },
    /// Delete a provider
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Block a provider
    Block {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Unblock a provider
    Unblock { id: String },
    /// List a provider's payments
    Payments {
        provider_id: String,
        #[arg(long, default_value_t = PaymentFilter::All)]
        filter: PaymentFilter,
    },
    /// Issue monthly charges for a provider from its plan
    GeneratePayments {
        provider_id: String,
        /// Number of monthly charges
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_INSTALLMENTS)))]
        installments: u32,
        /// Amount of each charge; defaults to the provider's plan value
        #[arg(long)]
        amount: Option<String>,
        /// boleto or pix; defaults to the provider's payment method
        #[arg(long)]
        method: Option<ChargeKind>,
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Mark a pending payment as received
    ConfirmPayment {
        id: String,
        /// Provider the payment belongs to
        #[arg(long)]
        provider: String,
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Cancel a pending or waiting payment
    CancelPayment {
        id: String,
        /// Provider the payment belongs to
        #[arg(long)]
        provider: String,
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Show the configuration, or save the origin given with --api-base as the default
    Config {
        /// Forget the saved backend origin
        #[arg(long)]
        reset: bool,
    },
    /// Store the token given with --token in the credential store
    Login,
    /// Remove the stored admin token
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let preferences = UserPreferences::new().unwrap_or_else(|error| {
        eprintln!("warning: {error}; using default configuration");
        UserPreferences::ephemeral()
    });

    let Some(command) = cli.command else {
        init_file_tracing()?;
        let gateway = build_gateway(&cli.global, &preferences)?;
        return provadmin_tui::run(gateway).await;
    };

    init_tracing();
    match command {
        Command::Login => {
            let Some(token) = cli.global.token.as_deref().filter(|token| !token.trim().is_empty()) else {
                bail!("login requires --token");
            };
            let store = TokenStore::new(preferences.token_key());
            store.save(token.trim()).context("store admin token")?;
            println!("Token saved under '{}'", store.key());
            Ok(())
        }
        Command::Logout => {
            let store = TokenStore::new(preferences.token_key());
            store.clear().context("remove admin token")?;
            println!("Token removed from '{}'", store.key());
            Ok(())
        }
        Command::Config { reset } => configure(&preferences, cli.global.api_base.as_deref(), reset),
        command => {
            let gateway = build_gateway(&cli.global, &preferences)?;
            run_command(gateway.as_ref(), command).await
        }
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// The dashboard owns the terminal, so its log goes to a file.
fn init_file_tracing() -> Result<()> {
    let path = provadmin_util::log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

/// Resolves the session once and wires the gateway every front end shares.
fn build_gateway(global: &GlobalArgs, preferences: &UserPreferences) -> Result<Arc<dyn ProviderGateway>> {
    let api_base = global.api_base.clone().unwrap_or_else(|| preferences.api_base());
    let token = match global.token.clone() {
        Some(token) => Some(token),
        None => TokenStore::new(preferences.token_key())
            .resolve()
            .unwrap_or_else(|error| {
                warn!(error = %error, "could not read stored admin token");
                None
            }),
    };
    let session = Session::new(token);
    if !session.is_authenticated() {
        warn!("no admin token configured; the backend will reject requests");
    }
    debug!(%api_base, authenticated = session.is_authenticated(), "session resolved");

    let client = ProvadminClient::new(&api_base, session)?;
    let http = HttpProviderGateway::new(client);
    let gateway: Arc<dyn ProviderGateway> = if global.dry_run {
        Arc::new(DryRunGateway::new(http))
    } else {
        Arc::new(http)
    };
    Ok(gateway)
}

async fn run_command(gateway: &dyn ProviderGateway, command: Command) -> Result<()> {
    let mut dashboard = Dashboard::new();
    match command {
        Command::List { search, json } => {
            drive(gateway, &mut dashboard, true, [Msg::LoadRequested]).await;
            if let Some(term) = search {
                dashboard.update(Msg::SearchChanged(term));
            }
            report(&mut dashboard)?;
            let visible = dashboard.list().visible();
            if json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
            } else {
                print_providers(&visible);
            }
            Ok(())
        }
        Command::Create { assignments } => {
            let mut script = vec![Msg::NewRequested];
            script.extend(assignments.into_iter().map(|(field, value)| Msg::FieldChanged(field, value)));
            script.push(Msg::SaveRequested);
            drive(gateway, &mut dashboard, true, script).await;
            report(&mut dashboard)
        }
        Command::Update { id, assignments } => {
            drive(gateway, &mut dashboard, true, [Msg::LoadRequested]).await;
            report(&mut dashboard)?;
            let mut script = vec![Msg::EditRequested(id)];
            script.extend(assignments.into_iter().map(|(field, value)| Msg::FieldChanged(field, value)));
            drive(gateway, &mut dashboard, true, script).await;
            report(&mut dashboard)?;
            drive(gateway, &mut dashboard, true, [Msg::SaveRequested]).await;
            report(&mut dashboard)
        }
        Command::Delete { id, yes } => {
            drive(gateway, &mut dashboard, yes, [Msg::DeleteRequested(id)]).await;
            report(&mut dashboard)
        }
        Command::Block { id, reason } => {
            drive(gateway, &mut dashboard, true, [Msg::BlockRequested { id, reason }]).await;
            report(&mut dashboard)
        }
        Command::Unblock { id } => {
            drive(gateway, &mut dashboard, true, [Msg::UnblockRequested(id)]).await;
            report(&mut dashboard)
        }
        Command::Payments { provider_id, filter } => {
            let payments = gateway
                .list_payments(&provider_id)
                .await
                .map_err(|error| anyhow::anyhow!("Failed to load payments: {}", error.message))?;
            let now = Utc::now();
            let visible: Vec<&ProviderPayment> =
                payments.iter().filter(|payment| filter.matches(payment, now)).collect();
            print_payments(&visible, now);
            Ok(())
        }
        Command::GeneratePayments {
            provider_id,
            installments,
            amount,
            method,
            yes,
        } => {
            drive(gateway, &mut dashboard, true, [Msg::LoadRequested, Msg::EditRequested(provider_id)]).await;
            report(&mut dashboard)?;
            let mut script = Vec::new();
            if let Some(amount) = amount {
                script.push(Msg::FieldChanged(DraftField::PlanValue, amount));
            }
            if let Some(kind) = method {
                script.push(Msg::FieldChanged(DraftField::PaymentMethod, kind.as_str().to_string()));
            }
            script.push(Msg::InstallmentsChanged(installments));
            script.push(Msg::GeneratePaymentsRequested);
            drive(gateway, &mut dashboard, yes, script).await;
            report(&mut dashboard)
        }
        Command::ConfirmPayment { id, provider, yes } => {
            open_billing(gateway, &mut dashboard, provider).await?;
            drive(gateway, &mut dashboard, yes, [Msg::ConfirmPaymentRequested(id)]).await;
            report(&mut dashboard)
        }
        Command::CancelPayment { id, provider, yes } => {
            open_billing(gateway, &mut dashboard, provider).await?;
            drive(gateway, &mut dashboard, yes, [Msg::CancelPaymentRequested(id)]).await;
            report(&mut dashboard)
        }
        Command::Config { .. } | Command::Login | Command::Logout => Ok(()),
    }
}

/// Loads the provider's payments so payment actions can check their status.
async fn open_billing(gateway: &dyn ProviderGateway, dashboard: &mut Dashboard, provider_id: String) -> Result<()> {
    drive(
        gateway,
        dashboard,
        true,
        [
            Msg::LoadRequested,
            Msg::EditRequested(provider_id),
            Msg::TabChanged(FormTab::Billing),
        ],
    )
    .await;
    report(dashboard)
}

fn configure(preferences: &UserPreferences, api_base: Option<&str>, reset: bool) -> Result<()> {
    match (api_base, reset) {
        (Some(_), true) => bail!("--api-base and --reset cannot be combined"),
        (Some(api_base), false) => {
            let api_base = api_base.trim().trim_end_matches('/').to_string();
            preferences
                .set_api_base(Some(api_base.clone()))
                .context("save backend origin")?;
            println!("Backend origin set to {api_base}");
        }
        (None, true) => {
            preferences.set_api_base(None).context("reset backend origin")?;
            println!("Backend origin reset to the default");
        }
        (None, false) => {
            println!("config file: {}", preferences.path().display());
            println!("api base:    {}", preferences.api_base());
            println!("token key:   {}", preferences.token_key());
        }
    }
    Ok(())
}

/// Runs each message to completion. Prompts go to stdin unless `assume_yes`.
async fn drive(
    gateway: &dyn ProviderGateway,
    dashboard: &mut Dashboard,
    assume_yes: bool,
    script: impl IntoIterator<Item = Msg>,
) {
    let confirmer: Box<dyn FnMut(&Confirmation) -> bool> = if assume_yes {
        Box::new(|_: &Confirmation| true)
    } else {
        Box::new(prompt_on_stdin)
    };
    let mut driver = Driver::new(gateway, confirmer);
    for msg in script {
        driver.run(dashboard, msg).await;
    }
}

fn prompt_on_stdin(confirmation: &Confirmation) -> bool {
    eprint!("{} [y/N] ", confirmation.prompt);
    let _ = io::stderr().flush();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    is_affirmative(&answer)
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Prints pending notifications. The first error becomes the command's failure.
fn report(dashboard: &mut Dashboard) -> Result<()> {
    let notifications = dashboard.drain_notifications();
    let mut failure: Option<Notification> = None;
    for notification in notifications {
        match notification.severity {
            Severity::Error | Severity::Warning => {
                eprintln!("{}: {}", notification.severity, notification.message);
                if notification.severity == Severity::Error && failure.is_none() {
                    failure = Some(notification);
                }
            }
            Severity::Success | Severity::Info => println!("{}", notification.message),
        }
    }
    match failure {
        Some(notification) => bail!(notification.message),
        None => Ok(()),
    }
}

fn print_providers(records: &[&ProviderRecord]) {
    if records.is_empty() {
        println!("No providers found");
        return;
    }
    println!("{:<10} {:<28} {:<30} {:<20} {:<20} STATUS", "ID", "NAME", "EMAIL", "CNPJ", "CITY/STATE");
    for record in records {
        println!(
            "{:<10} {:<28} {:<30} {:<20} {:<20} {}",
            record.id,
            record.name,
            record.email,
            record.cnpj.as_deref().unwrap_or("-"),
            record.location_label(),
            record.status_label()
        );
    }
}

fn print_payments(payments: &[&ProviderPayment], now: chrono::DateTime<Utc>) {
    if payments.is_empty() {
        println!("No payments");
        return;
    }
    println!("{:<10} {:<12} {:<12} {:<12} {:<10} DOCUMENT", "ID", "AMOUNT", "DUE", "PAID", "STATUS");
    for payment in payments {
        let status = if payment.is_overdue(now) { "overdue" } else { payment.status.as_str() };
        println!(
            "{:<10} {:<12} {:<12} {:<12} {:<10} {}",
            payment.id,
            payment.amount.map(|amount| format!("{amount:.2}")).unwrap_or_else(|| "-".into()),
            format_day(payment.expires_at),
            format_day(payment.paid_at),
            status,
            payment.document_link().unwrap_or("not available")
        );
        if let Some(code) = &payment.qr_code {
            println!("{:<10} pix: {code}", "");
        }
        if let Some(code) = &payment.barcode {
            println!("{:<10} barcode: {code}", "");
        }
    }
}

fn format_day(moment: Option<chrono::DateTime<Utc>>) -> String {
    moment
        .map(|moment| moment.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".into())
}

/// Parses `FIELD=VALUE`. Field names use the request keys (`plan_value`, `cep`, ...).
fn parse_assignment(raw: &str) -> Result<(DraftField, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let field = key.parse::<DraftField>().map_err(|error| {
        let known: Vec<&str> = FormTab::ALL
            .iter()
            .flat_map(|tab| tab.fields().iter().map(|field| field.key()))
            .collect();
        format!("{error}; known fields: {}", known.join(", "))
    })?;
    Ok((field, value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_dashboard() {
        let cli = Cli::try_parse_from(["provadmin"]).expect("parse");
        assert!(cli.command.is_none());
        assert!(!cli.global.dry_run);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["provadmin", "delete", "p-1", "--yes", "--dry-run", "--token", "abc"])
            .expect("parse");
        assert!(cli.global.dry_run);
        assert_eq!(cli.global.token.as_deref(), Some("abc"));
        match cli.command {
            Some(Command::Delete { id, yes }) => {
                assert_eq!(id, "p-1");
                assert!(yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn update_collects_assignments() {
        let cli = Cli::try_parse_from([
            "provadmin",
            "update",
            "p-1",
            "--set",
            "name=Alpha Net",
            "--set",
            "plan-value=89,90",
        ])
        .expect("parse");
        match cli.command {
            Some(Command::Update { assignments, .. }) => assert_eq!(
                assignments,
                vec![
                    (DraftField::Name, "Alpha Net".to_string()),
                    (DraftField::PlanValue, "89,90".to_string())
                ]
            ),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn assignment_requires_known_field_and_equals() {
        assert!(parse_assignment("name").is_err());
        let error = parse_assignment("nickname=x").unwrap_err();
        assert!(error.contains("known fields"));
        assert_eq!(
            parse_assignment("complement=Sala 2=B"),
            Ok((DraftField::Complement, "Sala 2=B".to_string()))
        );
    }

    #[test]
    fn payments_filter_parses() {
        let cli = Cli::try_parse_from(["provadmin", "payments", "p-1", "--filter", "overdue"]).expect("parse");
        match cli.command {
            Some(Command::Payments { filter, .. }) => assert_eq!(filter, PaymentFilter::Overdue),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["provadmin", "payments", "p-1", "--filter", "late"]).is_err());
    }

    #[test]
    fn login_takes_the_global_token() {
        let cli = Cli::try_parse_from(["provadmin", "login", "--token", "tok-1"]).expect("parse");
        assert!(matches!(cli.command, Some(Command::Login)));
        assert_eq!(cli.global.token.as_deref(), Some("tok-1"));
    }

    #[test]
    fn generate_payments_bounds_installments() {
        let cli = Cli::try_parse_from(["provadmin", "generate-payments", "p-1", "--installments", "6", "--method", "pix"])
            .expect("parse");
        match cli.command {
            Some(Command::GeneratePayments {
                provider_id,
                installments,
                method,
                amount,
                yes,
            }) => {
                assert_eq!(provider_id, "p-1");
                assert_eq!(installments, 6);
                assert_eq!(method, Some(ChargeKind::Pix));
                assert_eq!(amount, None);
                assert!(!yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["provadmin", "generate-payments", "p-1", "--installments", "13"]).is_err());
        assert!(Cli::try_parse_from(["provadmin", "generate-payments", "p-1", "--installments", "0"]).is_err());
    }

    #[test]
    fn payment_actions_need_their_provider() {
        assert!(Cli::try_parse_from(["provadmin", "confirm-payment", "pay-1"]).is_err());
        let cli = Cli::try_parse_from(["provadmin", "cancel-payment", "pay-1", "--provider", "p-1", "-y"]).expect("parse");
        assert!(matches!(
            cli.command,
            Some(Command::CancelPayment { id, provider, yes: true }) if id == "pay-1" && provider == "p-1"
        ));
    }

    #[test]
    fn config_saves_the_global_api_base() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        let cli = Cli::try_parse_from(["provadmin", "config", "--api-base", "https://admin.example.com/"]).expect("parse");
        let Some(Command::Config { reset }) = cli.command else {
            panic!("unexpected command: {:?}", cli.command);
        };

        let preferences = UserPreferences::at(path.clone()).expect("preferences");
        configure(&preferences, cli.global.api_base.as_deref(), reset).expect("configure");
        assert_eq!(
            UserPreferences::at(path.clone()).expect("reload").snapshot().api_base.as_deref(),
            Some("https://admin.example.com")
        );

        assert!(configure(&preferences, Some("http://admin.example.com"), false).is_err());
        assert!(configure(&preferences, Some("https://admin.example.com"), true).is_err());
        configure(&preferences, None, true).expect("reset");
        assert_eq!(UserPreferences::at(path).expect("reload").snapshot().api_base, None);
    }

    #[test]
    fn affirmative_answers() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("no"));
    }

    #[test]
    fn report_fails_on_error_notification() {
        let mut dashboard = Dashboard::new();
        dashboard.update(Msg::EditRequested("missing".into()));
        let error = report(&mut dashboard).unwrap_err();
        assert_eq!(error.to_string(), "Provider not found");
    }
}
