//! `np` — command-line tool for the NOWPayments API.
//!
//! # Usage
//!
//! ```bash
//! # Liveness probe against the configured server
//! np -f config.json status
//!
//! # Create a 2 EUR payment payable in monero (sandbox: force success)
//! np -f config.json payment new --amount 2.0 --case success
//!
//! # Show a payment, list recent payments
//! np -f config.json payment status 5524759814
//! np -f config.json payment list --limit 5
//!
//! # Invoices and recurring payments
//! np -f config.json invoice new --amount 2.0
//! np -f config.json invoice pay 4522625843
//! np -f config.json recurring new --plan 42 --sub-partner 7
//! ```
//!
//! Results are printed to stdout as JSON; diagnostics go to stderr via
//! `tracing` (`RUST_LOG` controls the level, `--debug` additionally
//! dumps requests and raw response bodies).

#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use nowpayments::invoice::InvoiceArgs;
use nowpayments::payment::{InvoicePaymentArgs, ListOptions, PaymentAmount, PaymentArgs};
use nowpayments::recurring::RecurringPaymentArgs;
use nowpayments::{Client, Credentials};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "np", version, about = "NOWPayments command-line tool")]
struct Cli {
    /// JSON credentials file.
    #[arg(short = 'f', long, value_name = "FILE")]
    config: PathBuf,

    /// Dump outgoing requests and raw response bodies.
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that the API is reachable.
    Status,
    /// List the merchant's selected currencies (or all with --all).
    Currencies {
        /// List every currency the service supports.
        #[arg(long)]
        all: bool,
    },
    /// Payment operations.
    #[command(subcommand)]
    Payment(PaymentCommand),
    /// Invoice operations.
    #[command(subcommand)]
    Invoice(InvoiceCommand),
    /// Recurring payment operations (JWT-authenticated).
    #[command(subcommand)]
    Recurring(RecurringCommand),
}

#[derive(Debug, Subcommand)]
enum PaymentCommand {
    /// Create a new payment.
    New {
        /// Fiat price of the order.
        #[arg(short, long, default_value_t = 2.0)]
        amount: f64,
        /// Fiat currency of the price.
        #[arg(long, default_value = "eur")]
        price_currency: String,
        /// Crypto currency to pay in.
        #[arg(long, default_value = "xmr")]
        pay_currency: String,
        /// Payment outcome to force (sandbox only).
        #[arg(long, default_value = "success")]
        case: String,
    },
    /// Show the status of a payment.
    Status {
        /// Payment ID.
        id: String,
    },
    /// List the most recent payments.
    List {
        /// Maximum number of payments to show.
        #[arg(long, default_value_t = 5)]
        limit: u32,
    },
}

#[derive(Debug, Subcommand)]
enum InvoiceCommand {
    /// Create a new invoice with a hosted checkout page.
    New {
        /// Fiat price of the order.
        #[arg(short, long, default_value_t = 2.0)]
        amount: f64,
        /// Fiat currency of the price.
        #[arg(long, default_value = "eur")]
        price_currency: String,
        /// Crypto currency to pay in.
        #[arg(long, default_value = "xmr")]
        pay_currency: String,
        /// Redirect URL after a successful payment.
        #[arg(long)]
        success_url: Option<String>,
        /// Redirect URL after cancelling.
        #[arg(long)]
        cancel_url: Option<String>,
    },
    /// Create a payment from an existing invoice.
    Pay {
        /// Invoice ID.
        id: String,
        /// Crypto currency to pay in.
        #[arg(long, default_value = "xmr")]
        pay_currency: String,
    },
}

#[derive(Debug, Subcommand)]
enum RecurringCommand {
    /// Create a recurring payment from a custody user account.
    New {
        /// Subscription plan ID.
        #[arg(long)]
        plan: i64,
        /// Custody sub-partner ID.
        #[arg(long)]
        sub_partner: i64,
    },
    /// Show a recurring payment.
    Get {
        /// Recurring payment ID.
        id: String,
    },
    /// Delete a recurring payment.
    Delete {
        /// Recurring payment ID.
        id: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let credentials = Credentials::load(&cli.config)?;
    let client = Client::new(credentials)?.with_debug(cli.debug);
    tracing::info!(sandbox = client.is_sandbox(), server = client.base_url(), "configured");

    match cli.command {
        Command::Status => {
            let message = client.status().await?;
            println!("{message}");
        }
        Command::Currencies { all } => {
            let currencies = if all {
                client.currencies().await?
            } else {
                client.selected_currencies().await?
            };
            tracing::info!(count = currencies.len(), "currencies");
            print_json(&currencies)?;
        }
        Command::Payment(command) => run_payment(&client, command).await?,
        Command::Invoice(command) => run_invoice(&client, command).await?,
        Command::Recurring(command) => run_recurring(&client, command).await?,
    }
    Ok(())
}

async fn run_payment(
    client: &Client,
    command: PaymentCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        PaymentCommand::New { amount, price_currency, pay_currency, case } => {
            let mut args = PaymentArgs {
                amount: PaymentAmount {
                    price_amount: amount,
                    price_currency,
                    pay_currency,
                    order_id: Some("tool 1".into()),
                    order_description: Some("Some useful tool".into()),
                    ..PaymentAmount::default()
                },
                ..PaymentArgs::default()
            };
            // The case switch only exists on the sandbox.
            if client.is_sandbox() {
                args.case = Some(case);
            }
            tracing::info!(amount, "creating payment");
            print_json(&client.new_payment(&args).await?)?;
        }
        PaymentCommand::Status { id } => {
            print_json(&client.payment_status(&id).await?)?;
        }
        PaymentCommand::List { limit } => {
            tracing::info!(limit, "listing most recent payments");
            let options = ListOptions { limit: Some(limit), ..ListOptions::default() };
            print_json(&client.list_payments(&options).await?)?;
        }
    }
    Ok(())
}

async fn run_invoice(
    client: &Client,
    command: InvoiceCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        InvoiceCommand::New { amount, price_currency, pay_currency, success_url, cancel_url } => {
            let args = InvoiceArgs {
                amount: PaymentAmount {
                    price_amount: amount,
                    price_currency,
                    pay_currency,
                    order_id: Some("tool 1".into()),
                    order_description: Some("Some useful tool".into()),
                    ..PaymentAmount::default()
                },
                success_url,
                cancel_url,
            };
            tracing::info!(amount, "creating invoice");
            print_json(&client.new_invoice(&args).await?)?;
        }
        InvoiceCommand::Pay { id, pay_currency } => {
            let args = InvoicePaymentArgs {
                invoice_id: id,
                pay_currency,
                ..InvoicePaymentArgs::default()
            };
            tracing::info!(invoice = %args.invoice_id, "creating payment from invoice");
            print_json(&client.new_payment_from_invoice(&args).await?)?;
        }
    }
    Ok(())
}

async fn run_recurring(
    client: &Client,
    command: RecurringCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        RecurringCommand::New { plan, sub_partner } => {
            let args = RecurringPaymentArgs {
                subscription_plan_id: plan,
                sub_partner_id: sub_partner,
            };
            print_json(&client.new_recurring_payment(&args).await?)?;
        }
        RecurringCommand::Get { id } => {
            print_json(&client.recurring_payment(&id).await?)?;
        }
        RecurringCommand::Delete { id } => {
            let status = client.delete_recurring_payment(&id).await?;
            println!("{status}");
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
