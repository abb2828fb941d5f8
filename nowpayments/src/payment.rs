//! Payment operations: create, status, list, and payment-from-invoice.

use serde::{Deserialize, Serialize};

use crate::client::{Client, SendRequest};
use crate::error::Error;
use crate::flex;

/// Price fields shared by payment and invoice creation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PaymentAmount {
    /// Fiat price of the order.
    pub price_amount: f64,
    /// Fiat currency of `price_amount` (e.g. `"eur"`).
    pub price_currency: String,
    /// Crypto currency the customer pays in (e.g. `"xmr"`).
    pub pay_currency: String,
    /// URL to receive instant payment notifications on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipn_callback_url: Option<String>,
    /// Merchant-side order identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Merchant-side order description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_description: Option<String>,
}

/// Arguments for creating a payment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PaymentArgs {
    /// Price of the order.
    #[serde(flatten)]
    pub amount: PaymentAmount,
    /// Crypto amount to pay, when fixing it up front.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_amount: Option<f64>,
    /// Payout address overriding the account-level one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_address: Option<String>,
    /// Currency of the payout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_currency: Option<String>,
    /// Extra ID (memo/tag) for the payout address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_extra_id: Option<String>,
    /// Lock the exchange rate at creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_rate: Option<bool>,
    /// Merchant-side purchase identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_id: Option<String>,
    /// Sandbox only: force a payment outcome (`"success"`,
    /// `"partially_paid"`, `"failure"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<String>,
}

/// A created payment.
///
/// Decoded tolerantly: amounts arrive as numbers or numeric strings
/// depending on the endpoint variant, IDs as strings or integers, and
/// fields the service has not determined yet are simply absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Payment {
    /// Payment identifier.
    pub payment_id: flex::Id,
    /// Current status (`waiting`, `confirming`, `finished`, ...).
    pub payment_status: String,
    /// Deposit address the customer pays to.
    pub pay_address: String,
    /// Fiat price of the order.
    pub price_amount: flex::Amount,
    /// Fiat currency.
    pub price_currency: String,
    /// Crypto amount to pay; zero until the exchange rate is fixed.
    pub pay_amount: flex::Amount,
    /// Crypto currency.
    pub pay_currency: String,
    /// Merchant-side order identifier.
    pub order_id: Option<String>,
    /// Merchant-side order description.
    pub order_description: Option<String>,
    /// IPN callback URL.
    pub ipn_callback_url: Option<String>,
    /// Merchant-side purchase identifier.
    pub purchase_id: flex::Id,
    /// Amount received so far.
    pub amount_received: flex::Amount,
    /// Extra ID (memo/tag) for the deposit address, when the chain
    /// requires one.
    pub payin_extra_id: Option<String>,
    /// Creation timestamp, as reported by the service.
    pub created_at: Option<String>,
    /// Last update timestamp.
    pub updated_at: Option<String>,
}

/// Status of an existing payment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentStatus {
    /// Payment identifier.
    pub payment_id: flex::Id,
    /// Current status.
    pub payment_status: String,
    /// Deposit address.
    pub pay_address: String,
    /// Fiat price of the order.
    pub price_amount: flex::Amount,
    /// Fiat currency.
    pub price_currency: String,
    /// Crypto amount to pay.
    pub pay_amount: flex::Amount,
    /// Crypto amount actually paid so far.
    pub actually_paid: flex::Amount,
    /// Crypto currency.
    pub pay_currency: String,
    /// Merchant-side order identifier.
    pub order_id: Option<String>,
    /// Merchant-side order description.
    pub order_description: Option<String>,
    /// Merchant-side purchase identifier.
    pub purchase_id: flex::Id,
    /// Amount credited to the merchant balance.
    pub outcome_amount: flex::Amount,
    /// Currency of the credited amount.
    pub outcome_currency: String,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Last update timestamp.
    pub updated_at: Option<String>,
}

/// Filtering and pagination for [`Client::list_payments`].
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Maximum number of payments to return.
    pub limit: Option<u32>,
    /// Zero-based page index.
    pub page: Option<u32>,
    /// Field to sort on (e.g. `"created_at"`).
    pub sort_by: Option<String>,
    /// Sort direction, `"asc"` or `"desc"`.
    pub order_by: Option<String>,
    /// Lower bound on creation date, `YYYY-MM-DD`.
    pub date_from: Option<String>,
    /// Upper bound on creation date, `YYYY-MM-DD`.
    pub date_to: Option<String>,
}

impl ListOptions {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(sort_by) = &self.sort_by {
            query.push(("sortBy", sort_by.clone()));
        }
        if let Some(order_by) = &self.order_by {
            query.push(("orderBy", order_by.clone()));
        }
        if let Some(date_from) = &self.date_from {
            query.push(("dateFrom", date_from.clone()));
        }
        if let Some(date_to) = &self.date_to {
            query.push(("dateTo", date_to.clone()));
        }
        query
    }
}

/// One page of payments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentList {
    /// The payments on this page.
    pub data: Vec<Payment>,
    /// Page size used by the server.
    pub limit: u64,
    /// Zero-based page index.
    pub page: u64,
    /// Total number of pages.
    #[serde(rename = "pagesCount")]
    pub pages_count: u64,
    /// Total number of payments across all pages.
    pub total: u64,
}

/// Arguments for creating a payment from an existing invoice.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoicePaymentArgs {
    /// Identifier of the invoice to pay.
    #[serde(rename = "iid")]
    pub invoice_id: String,
    /// Crypto currency the customer pays in.
    pub pay_currency: String,
    /// Merchant-side purchase identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_id: Option<String>,
    /// Merchant-side order description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_description: Option<String>,
    /// Customer email for notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    /// Payout address overriding the account-level one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_address: Option<String>,
    /// Extra ID (memo/tag) for the payout address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_extra_id: Option<String>,
    /// Currency of the payout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_currency: Option<String>,
}

impl Client {
    /// Creates a new payment.
    ///
    /// # Errors
    ///
    /// Returns an error tagged with the `payment-create` route on any
    /// transport, status, or decoding failure.
    pub async fn new_payment(&self, args: &PaymentArgs) -> Result<Payment, Error> {
        let body = serde_json::to_value(args)
            .map_err(|e| Error::InvalidArgument(format!("payment args: {e}")))?;
        self.send(SendRequest::new("payment-create").with_body(body)).await
    }

    /// Fetches the status of an existing payment.
    ///
    /// # Errors
    ///
    /// Fails fast with [`Error::InvalidArgument`] on an empty ID; no
    /// request is sent in that case.
    pub async fn payment_status(&self, payment_id: &str) -> Result<PaymentStatus, Error> {
        if payment_id.is_empty() {
            return Err(Error::InvalidArgument("empty payment ID".into()));
        }
        self.send(SendRequest::new("payment-status").with_path(payment_id)).await
    }

    /// Lists payments, newest first, honoring the given pagination
    /// options.
    ///
    /// # Errors
    ///
    /// Returns an error tagged with the `payment-list` route.
    pub async fn list_payments(&self, options: &ListOptions) -> Result<PaymentList, Error> {
        let query = options.query();
        self.send(SendRequest::new("payment-list").with_query(&query)).await
    }

    /// Creates a payment for an existing invoice.
    ///
    /// This route is JWT-authenticated: a fresh token exchange is
    /// performed before the request.
    ///
    /// # Errors
    ///
    /// Fails fast with [`Error::InvalidArgument`] on an empty invoice
    /// ID; otherwise errors are tagged with the `auth` or
    /// `invoice-payment` route.
    pub async fn new_payment_from_invoice(
        &self,
        args: &InvoicePaymentArgs,
    ) -> Result<Payment, Error> {
        if args.invoice_id.is_empty() {
            return Err(Error::InvalidArgument("empty invoice ID".into()));
        }
        let token = self.authenticate().await?;
        let body = serde_json::to_value(args)
            .map_err(|e| Error::InvalidArgument(format!("invoice payment args: {e}")))?;
        self.send(SendRequest::new("invoice-payment").with_body(body).with_bearer(&token))
            .await
    }
}
