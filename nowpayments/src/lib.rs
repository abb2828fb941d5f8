#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Client library for the [NOWPayments](https://nowpayments.io) crypto
//! payment gateway API.
//!
//! The library builds authenticated requests against a fixed table of
//! named routes, decodes the service's heterogeneous JSON response
//! envelopes into typed results, and absorbs wire-level
//! inconsistencies (amounts serialized as numbers or strings, IDs as
//! strings or integers) so callers see uniform types.
//!
//! # Overview
//!
//! Construct a [`Client`] from validated [`Credentials`], then call
//! the payment, invoice, currency, and recurring-payment operations on
//! it. Each operation performs at most one authentication exchange and
//! one request; there are no retries at this layer — a failed call
//! surfaces immediately and the caller owns any retry policy.
//!
//! ```no_run
//! use nowpayments::{Client, Credentials};
//! use nowpayments::payment::{PaymentAmount, PaymentArgs};
//!
//! # async fn demo() -> Result<(), nowpayments::Error> {
//! let client = Client::new(Credentials::load("config.json")?)?;
//! let payment = client
//!     .new_payment(&PaymentArgs {
//!         amount: PaymentAmount {
//!             price_amount: 2.0,
//!             price_currency: "eur".into(),
//!             pay_currency: "xmr".into(),
//!             ..PaymentAmount::default()
//!         },
//!         ..PaymentArgs::default()
//!     })
//!     .await?;
//! println!("pay {} {} to {}", payment.pay_amount, payment.pay_currency, payment.pay_address);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`config`] — credentials, sandbox/production base URLs
//! - [`route`] — the static route table
//! - [`flex`] — tolerant wire types for inconsistent fields
//! - [`payment`] — payment create/status/list, payment-from-invoice
//! - [`invoice`] — invoice creation
//! - [`currency`] — currency lists, estimates, minimum amounts
//! - [`recurring`] — recurring payments (JWT-authenticated)

pub mod client;
pub mod config;
pub mod currency;
mod envelope;
pub mod error;
pub mod flex;
pub mod invoice;
pub mod payment;
pub mod recurring;
pub mod route;

pub use client::Client;
pub use config::{Credentials, PRODUCTION_BASE_URL, SANDBOX_BASE_URL};
pub use error::Error;
