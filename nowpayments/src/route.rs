//! Static table of named API routes.
//!
//! Each remote operation is identified by a symbolic name mapped to a
//! fixed HTTP method and path. Paths ending in `/` take a
//! caller-supplied suffix (an ID) appended by plain concatenation, so
//! the suffix must already be URL-safe.

use reqwest::Method;

use crate::error::Error;

/// A named, fixed (method, path) pair identifying one remote operation.
#[derive(Debug, Clone)]
pub struct Route {
    /// Symbolic route name, e.g. `"payment-create"`.
    pub name: &'static str,
    /// HTTP method for the route.
    pub method: Method,
    /// URL path, relative to the configured server base URL.
    pub path: &'static str,
}

static ROUTES: &[Route] = &[
    Route { name: "auth", method: Method::POST, path: "/v1/auth" },
    Route { name: "status", method: Method::GET, path: "/v1/status" },
    Route { name: "payment-create", method: Method::POST, path: "/v1/payment" },
    Route { name: "payment-status", method: Method::GET, path: "/v1/payment/" },
    Route { name: "payment-list", method: Method::GET, path: "/v1/payment/" },
    Route { name: "invoice-create", method: Method::POST, path: "/v1/invoice" },
    Route { name: "invoice-payment", method: Method::POST, path: "/v1/invoice-payment" },
    Route { name: "currencies", method: Method::GET, path: "/v1/currencies" },
    Route { name: "selected-currencies", method: Method::GET, path: "/v1/merchant/coins" },
    Route { name: "estimate", method: Method::GET, path: "/v1/estimate" },
    Route { name: "min-amount", method: Method::GET, path: "/v1/min-amount" },
    Route { name: "recurring-payment-create", method: Method::POST, path: "/v2/recurring-payments" },
    Route { name: "recurring-payment-single", method: Method::GET, path: "/v2/recurring-payments/" },
    Route { name: "recurring-payment-delete", method: Method::DELETE, path: "/v2/recurring-payments/" },
];

/// Looks up a route by its symbolic name.
///
/// # Errors
///
/// Returns [`Error::UnknownRoute`] if the name has no entry. This
/// should not happen in a correct build; it is surfaced rather than
/// panicking so it stays testable.
pub fn resolve(name: &'static str) -> Result<&'static Route, Error> {
    ROUTES
        .iter()
        .find(|r| r.name == name)
        .ok_or(Error::UnknownRoute(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_routes_resolve_to_documented_pairs() {
        let cases = [
            ("auth", Method::POST, "/v1/auth"),
            ("status", Method::GET, "/v1/status"),
            ("payment-create", Method::POST, "/v1/payment"),
            ("payment-status", Method::GET, "/v1/payment/"),
            ("payment-list", Method::GET, "/v1/payment/"),
            ("invoice-create", Method::POST, "/v1/invoice"),
            ("invoice-payment", Method::POST, "/v1/invoice-payment"),
            ("currencies", Method::GET, "/v1/currencies"),
            ("selected-currencies", Method::GET, "/v1/merchant/coins"),
            ("estimate", Method::GET, "/v1/estimate"),
            ("min-amount", Method::GET, "/v1/min-amount"),
            ("recurring-payment-create", Method::POST, "/v2/recurring-payments"),
            ("recurring-payment-single", Method::GET, "/v2/recurring-payments/"),
            ("recurring-payment-delete", Method::DELETE, "/v2/recurring-payments/"),
        ];
        for (name, method, path) in cases {
            let route = resolve(name).unwrap();
            assert_eq!(route.method, method, "bad method for {name}");
            assert_eq!(route.path, path, "bad path for {name}");
        }
    }

    #[test]
    fn unknown_route_is_an_error() {
        let err = resolve("no-such-route").unwrap_err();
        assert!(matches!(err, Error::UnknownRoute("no-such-route")));
        assert_eq!(err.to_string(), r#"unknown route "no-such-route""#);
    }
}
