/// One in-flight simulated payment awaiting a checkin.
///
/// The assertion is signed when the payment starts, so the outcome state is
/// fixed at that point.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCheckout {
    pub success_destination: String,
    pub signed_assertion: String,
}

/// The cancellation destination recorded alongside a `PendingCheckout`.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCancellation {
    pub cancel_destination: String,
}

/// Where the browser is sent when a payment completes.
#[derive(Debug, Clone, PartialEq)]
pub struct Redirect {
    pub location: String,
}

impl Redirect {
    /// Success redirect: destination plus `jwt` and `token` parameters.
    pub fn success(checkout: &PendingCheckout, bearer_token: &str) -> Self {
        let location = append_query(
            &checkout.success_destination,
            &[
                ("jwt", checkout.signed_assertion.as_str()),
                ("token", bearer_token),
            ],
        );
        Self { location }
    }

    /// Cancellation redirect: destination plus the `token` parameter.
    pub fn cancellation(destination: &str, bearer_token: &str) -> Self {
        Self {
            location: append_query(destination, &[("token", bearer_token)]),
        }
    }
}

/// Appends query parameters, continuing an existing query string if present.
fn append_query(base: &str, params: &[(&str, &str)]) -> String {
    let mut url = base.to_string();
    for (key, value) in params {
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(key);
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }
    url
}
