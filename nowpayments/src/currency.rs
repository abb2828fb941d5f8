//! Currency information: available currencies, merchant selection,
//! estimates, and minimum payable amounts.

use serde::{Deserialize, Serialize};

use crate::client::{Client, SendRequest};
use crate::error::Error;
use crate::flex;

#[derive(Debug, Deserialize)]
struct CurrenciesResponse {
    currencies: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SelectedCurrenciesResponse {
    #[serde(rename = "selectedCurrencies")]
    selected_currencies: Vec<String>,
}

/// Estimated crypto price for a fiat amount.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Estimate {
    /// Source currency.
    pub currency_from: String,
    /// Amount in the source currency.
    pub amount_from: flex::Amount,
    /// Target currency.
    pub currency_to: String,
    /// Estimated amount in the target currency.
    pub estimated_amount: flex::Amount,
}

/// Minimum payable amount for a currency pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MinAmount {
    /// Source currency.
    pub currency_from: String,
    /// Target currency.
    pub currency_to: String,
    /// Minimum amount accepted for the pair.
    pub min_amount: flex::Amount,
}

impl Client {
    /// Lists all currencies the service supports.
    ///
    /// # Errors
    ///
    /// Returns an error tagged with the `currencies` route.
    pub async fn currencies(&self) -> Result<Vec<String>, Error> {
        let response: CurrenciesResponse = self.send(SendRequest::new("currencies")).await?;
        Ok(response.currencies)
    }

    /// Lists the currencies checked in the merchant's account settings.
    ///
    /// # Errors
    ///
    /// Returns an error tagged with the `selected-currencies` route.
    pub async fn selected_currencies(&self) -> Result<Vec<String>, Error> {
        let response: SelectedCurrenciesResponse =
            self.send(SendRequest::new("selected-currencies")).await?;
        Ok(response.selected_currencies)
    }

    /// Estimates the crypto price of `amount` in `currency_from`.
    ///
    /// # Errors
    ///
    /// Fails fast with [`Error::InvalidArgument`] on a non-finite or
    /// non-positive amount or an empty currency; otherwise errors are
    /// tagged with the `estimate` route.
    pub async fn estimate(
        &self,
        amount: f64,
        currency_from: &str,
        currency_to: &str,
    ) -> Result<Estimate, Error> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidArgument("estimate amount must be positive".into()));
        }
        if currency_from.is_empty() || currency_to.is_empty() {
            return Err(Error::InvalidArgument("empty estimate currency".into()));
        }
        let query = [
            ("amount", amount.to_string()),
            ("currency_from", currency_from.to_owned()),
            ("currency_to", currency_to.to_owned()),
        ];
        self.send(SendRequest::new("estimate").with_query(&query)).await
    }

    /// Returns the minimum payable amount for a currency pair.
    ///
    /// # Errors
    ///
    /// Fails fast with [`Error::InvalidArgument`] on an empty
    /// currency; otherwise errors are tagged with the `min-amount`
    /// route.
    pub async fn min_amount(
        &self,
        currency_from: &str,
        currency_to: &str,
    ) -> Result<MinAmount, Error> {
        if currency_from.is_empty() || currency_to.is_empty() {
            return Err(Error::InvalidArgument("empty min-amount currency".into()));
        }
        let query = [
            ("currency_from", currency_from.to_owned()),
            ("currency_to", currency_to.to_owned()),
        ];
        self.send(SendRequest::new("min-amount").with_query(&query)).await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::test_client;

    #[tokio::test]
    async fn currencies_unwraps_the_list_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/currencies"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"currencies":["btc","eth","xmr"]}"#,
            ))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let currencies = client.currencies().await.unwrap();
        assert_eq!(currencies, ["btc", "eth", "xmr"]);
    }

    #[tokio::test]
    async fn selected_currencies_uses_the_merchant_coins_route() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/merchant/coins"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"selectedCurrencies":["xmr"]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert_eq!(client.selected_currencies().await.unwrap(), ["xmr"]);
    }

    #[tokio::test]
    async fn estimate_sends_the_pair_as_query_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/estimate"))
            .and(query_param("amount", "3.99"))
            .and(query_param("currency_from", "usd"))
            .and(query_param("currency_to", "btc"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"currency_from":"usd","amount_from":"3.99","currency_to":"btc","estimated_amount":"0.000172"}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let estimate = client.estimate(3.99, "usd", "btc").await.unwrap();
        assert_eq!(estimate.estimated_amount.value(), 0.000_172);
    }

    #[tokio::test]
    async fn estimate_rejects_bad_arguments_without_a_request() {
        let client = test_client("http://127.0.0.1:9");
        assert!(matches!(
            client.estimate(0.0, "usd", "btc").await.unwrap_err(),
            Error::InvalidArgument(_)
        ));
        assert!(matches!(
            client.estimate(f64::NAN, "usd", "btc").await.unwrap_err(),
            Error::InvalidArgument(_)
        ));
        assert!(matches!(
            client.estimate(f64::INFINITY, "usd", "btc").await.unwrap_err(),
            Error::InvalidArgument(_)
        ));
        assert!(matches!(
            client.estimate(1.0, "", "btc").await.unwrap_err(),
            Error::InvalidArgument(_)
        ));
    }

    #[tokio::test]
    async fn min_amount_decodes_numeric_wire_value() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/min-amount"))
            .and(query_param("currency_from", "btc"))
            .and(query_param("currency_to", "eth"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"currency_from":"btc","currency_to":"eth","min_amount":0.0098927}"#,
            ))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let min = client.min_amount("btc", "eth").await.unwrap();
        assert_eq!(min.min_amount.value(), 0.009_892_7);
    }
}
