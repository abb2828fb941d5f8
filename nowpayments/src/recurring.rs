//! Recurring payments against custody user accounts.
//!
//! Creation and deletion are JWT-authenticated: each call performs a
//! fresh login/password exchange before the request.

use serde::{Deserialize, Serialize};

use crate::client::{Client, SendRequest};
use crate::error::Error;
use crate::flex;

/// Arguments for creating a recurring payment from a custody user
/// account.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RecurringPaymentArgs {
    /// Existing subscription plan to bill against.
    pub subscription_plan_id: i64,
    /// Custody sub-partner account being billed.
    pub sub_partner_id: i64,
}

/// A subscriber attached to a recurring payment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscriber {
    /// Subscriber email, when billed by email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Custody sub-partner ID, when billed from a custody account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_partner_id: Option<String>,
}

/// Status of a recurring payment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecurringPayment {
    /// Recurring payment identifier.
    pub id: flex::Id,
    /// The plan this payment bills against.
    pub subscription_plan_id: flex::Id,
    /// Whether the recurring payment is currently active.
    pub is_active: bool,
    /// Current status (`WAITING_PAY`, `PAID`, `EXPIRED`, ...).
    pub status: String,
    /// Expiry date of the current billing period.
    pub expire_date: Option<String>,
    /// The subscriber being billed.
    pub subscriber: Subscriber,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Last update timestamp.
    pub updated_at: Option<String>,
}

/// Deletion status, absorbing another wire inconsistency: the service
/// answers with either a bare string (`{"result": "deleted"}`) or an
/// object carrying a `status` field.
#[derive(Debug)]
struct DeleteStatus(String);

impl<'de> serde::Deserialize<'de> for DeleteStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;
        use serde_json::Value;

        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Self(s)),
            Value::Object(map) => match map.get("status") {
                Some(Value::String(s)) => Ok(Self(s.clone())),
                _ => Err(D::Error::custom("deletion status object has no status string")),
            },
            other => Err(D::Error::custom(format!(
                "deletion status must be a string or an object, got {}",
                crate::flex::type_name(&other)
            ))),
        }
    }
}

impl Client {
    /// Creates a recurring payment billing a custody user account.
    ///
    /// The service wraps the response in a list even though a single
    /// payment is created; the first element is returned, and an empty
    /// list is an [`Error::EmptyResult`] rather than a zero-valued
    /// record.
    ///
    /// # Errors
    ///
    /// Fails fast with [`Error::InvalidArgument`] on zero IDs;
    /// otherwise errors are tagged with the `auth` or
    /// `recurring-payment-create` route.
    pub async fn new_recurring_payment(
        &self,
        args: &RecurringPaymentArgs,
    ) -> Result<RecurringPayment, Error> {
        if args.subscription_plan_id == 0 {
            return Err(Error::InvalidArgument("empty subscription plan ID".into()));
        }
        if args.sub_partner_id == 0 {
            return Err(Error::InvalidArgument("empty sub partner ID".into()));
        }
        let token = self.authenticate().await?;
        let body = serde_json::to_value(args)
            .map_err(|e| Error::InvalidArgument(format!("recurring payment args: {e}")))?;
        let created: Vec<RecurringPayment> = self
            .send(
                SendRequest::new("recurring-payment-create")
                    .with_body(body)
                    .with_bearer(&token),
            )
            .await?;
        created
            .into_iter()
            .next()
            .ok_or(Error::EmptyResult { route: "recurring-payment-create" })
    }

    /// Fetches a single recurring payment by ID.
    ///
    /// # Errors
    ///
    /// Fails fast with [`Error::InvalidArgument`] on an empty ID;
    /// otherwise errors are tagged with the `recurring-payment-single`
    /// route.
    pub async fn recurring_payment(
        &self,
        recurring_payment_id: &str,
    ) -> Result<RecurringPayment, Error> {
        if recurring_payment_id.is_empty() {
            return Err(Error::InvalidArgument("empty recurring payment ID".into()));
        }
        self.send(SendRequest::new("recurring-payment-single").with_path(recurring_payment_id))
            .await
    }

    /// Deletes a recurring payment by ID, returning the deletion
    /// status reported by the service.
    ///
    /// # Errors
    ///
    /// Fails fast with [`Error::InvalidArgument`] on an empty ID;
    /// otherwise errors are tagged with the `auth` or
    /// `recurring-payment-delete` route.
    pub async fn delete_recurring_payment(
        &self,
        recurring_payment_id: &str,
    ) -> Result<String, Error> {
        if recurring_payment_id.is_empty() {
            return Err(Error::InvalidArgument("empty recurring payment ID".into()));
        }
        let token = self.authenticate().await?;
        let status: DeleteStatus = self
            .send(
                SendRequest::new("recurring-payment-delete")
                    .with_path(recurring_payment_id)
                    .with_bearer(&token),
            )
            .await?;
        Ok(status.0)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::test_client;

    fn args() -> RecurringPaymentArgs {
        RecurringPaymentArgs { subscription_plan_id: 42, sub_partner_id: 7 }
    }

    async fn mount_auth(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/v1/auth"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token": "jwt-token"
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn create_takes_the_first_element_of_the_result_list() {
        let server = MockServer::start().await;
        mount_auth(&server).await;
        Mock::given(method("POST"))
            .and(path("/v2/recurring-payments"))
            .and(header("authorization", "Bearer jwt-token"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"result":[{"id":"rp-1","subscription_plan_id":42,"is_active":true,"status":"WAITING_PAY"}]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let payment = client.new_recurring_payment(&args()).await.unwrap();
        assert_eq!(payment.id, "rp-1");
        assert_eq!(payment.subscription_plan_id, "42");
        assert!(payment.is_active);
    }

    #[tokio::test]
    async fn create_with_empty_result_list_is_empty_result() {
        let server = MockServer::start().await;
        mount_auth(&server).await;
        Mock::given(method("POST"))
            .and(path("/v2/recurring-payments"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"result":[]}"#))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.new_recurring_payment(&args()).await.unwrap_err();
        assert!(matches!(err, Error::EmptyResult { route: "recurring-payment-create" }));
        assert_eq!(err.to_string(), "recurring-payment-create: empty result");
    }

    #[tokio::test]
    async fn zero_ids_fail_without_a_request() {
        let client = test_client("http://127.0.0.1:9");
        let err = client
            .new_recurring_payment(&RecurringPaymentArgs::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn get_unwraps_the_result_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/recurring-payments/rp-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"result":{"id":"rp-1","status":"PAID","is_active":false}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let payment = client.recurring_payment("rp-1").await.unwrap();
        assert_eq!(payment.status, "PAID");
    }

    #[tokio::test]
    async fn empty_recurring_payment_id_fails_without_a_request() {
        let client = test_client("http://127.0.0.1:9");
        for err in [
            client.recurring_payment("").await.unwrap_err(),
            client.delete_recurring_payment("").await.unwrap_err(),
        ] {
            assert!(matches!(err, Error::InvalidArgument(_)));
            assert_eq!(err.to_string(), "empty recurring payment ID");
        }
    }

    #[tokio::test]
    async fn delete_accepts_a_bare_string_status() {
        let server = MockServer::start().await;
        mount_auth(&server).await;
        Mock::given(method("DELETE"))
            .and(path("/v2/recurring-payments/rp-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"result":"deleted"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert_eq!(client.delete_recurring_payment("rp-1").await.unwrap(), "deleted");
    }

    #[tokio::test]
    async fn delete_authenticates_and_returns_the_status() {
        let server = MockServer::start().await;
        mount_auth(&server).await;
        Mock::given(method("DELETE"))
            .and(path("/v2/recurring-payments/rp-1"))
            .and(header("authorization", "Bearer jwt-token"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"result":{"status":"deleted"}}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert_eq!(client.delete_recurring_payment("rp-1").await.unwrap(), "deleted");
    }
}
