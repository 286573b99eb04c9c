use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Fixed gateway identifier stamped on every payout record.
pub const GATEWAY_EXTERNAL_ID: &str = "stripe-payment-gateway-external-id";
/// Fixed payment method marker stamped on every payout record.
pub const PAYMENT_METHOD_TYPE: &str = "CARD";

pub const DEFAULT_PAYMENT_EXTERNAL_ID: &str =
    "urn:ngsi-ld:product-order:6209b835-90e4-45cc-bba3-0262d9f1e861";
pub const DEFAULT_PRE_AUTHORIZATION_ID: &str = "c995a1b2-8f04-480c-820e-21f970925675";
pub const DEFAULT_PAYMENT_ITEM_ID: u64 = 207;

/// Outcome attributed to every line item of one assertion.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PayoutState {
    #[default]
    Processed,
    Pending,
    Failed,
    Cancelled,
}

impl PayoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutState::Processed => "PROCESSED",
            PayoutState::Pending => "PENDING",
            PayoutState::Failed => "FAILED",
            PayoutState::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for PayoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayoutState {
    type Err = String;

    /// Parses an outcome state, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PROCESSED" => Ok(PayoutState::Processed),
            "PENDING" => Ok(PayoutState::Pending),
            "FAILED" => Ok(PayoutState::Failed),
            "CANCELLED" => Ok(PayoutState::Cancelled),
            other => Err(format!("unknown payout state: {other}")),
        }
    }
}

/// One chargeable unit of a checkout, as sent by the marketplace.
///
/// All fields are opaque pass-through values; absent or `null` ones stay absent
/// in the resulting payout record. An entry that is not a JSON object becomes
/// an item with every field absent.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct PayoutLineItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_provider_external_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_item_external_id: Option<Value>,
}

impl From<Value> for PayoutLineItem {
    fn from(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };
        let mut take = |key: &str| fields.remove(key).filter(|v| !v.is_null());

        Self {
            product_provider_external_id: take("productProviderExternalId"),
            amount: take("amount"),
            currency: take("currency"),
            payment_item_external_id: take("paymentItemExternalId"),
        }
    }
}

/// Overrides for the identifiers the assertion carries.
#[derive(Debug, Clone, PartialEq)]
pub struct AssertionOptions {
    pub payment_external_id: String,
    pub pre_authorization_id: String,
    pub payment_item_id: u64,
}

impl Default for AssertionOptions {
    fn default() -> Self {
        Self {
            payment_external_id: DEFAULT_PAYMENT_EXTERNAL_ID.to_string(),
            pre_authorization_id: DEFAULT_PRE_AUTHORIZATION_ID.to_string(),
            payment_item_id: DEFAULT_PAYMENT_ITEM_ID,
        }
    }
}

/// A single entry of the payout list.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PayoutRecord {
    pub state: PayoutState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_provider_external_id: Option<Value>,
    pub gateway_external_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<Value>,
    pub payment_method_type: String,
    pub payment_item_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_item_external_id: Option<Value>,
}

/// The claims of the signed batch payout decision.
///
/// Shaped like the callback payload the marketplace billing subsystem expects
/// from a real payment provider. Carries no `exp` or `iat` claim.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PayoutAssertion {
    pub payment_external_id: String,
    pub payment_pre_authorization_external_id: String,
    pub payout_list: Vec<PayoutRecord>,
}

impl PayoutAssertion {
    /// Builds the unsigned payload. Every record gets the same `state`.
    pub fn new(
        items: &[PayoutLineItem],
        state: PayoutState,
        options: &AssertionOptions,
    ) -> Self {
        let payout_list = items
            .iter()
            .map(|item| PayoutRecord {
                state,
                product_provider_external_id: item.product_provider_external_id.clone(),
                gateway_external_id: GATEWAY_EXTERNAL_ID.to_string(),
                amount: item.amount.clone(),
                currency: item.currency.clone(),
                payment_method_type: PAYMENT_METHOD_TYPE.to_string(),
                payment_item_id: options.payment_item_id,
                payment_item_external_id: item.payment_item_external_id.clone(),
            })
            .collect();

        Self {
            payment_external_id: options.payment_external_id.clone(),
            payment_pre_authorization_external_id: options.pre_authorization_id.clone(),
            payout_list,
        }
    }
}
