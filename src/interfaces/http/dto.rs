use crate::domain::payout::PayoutLineItem;
use serde::{Deserialize, Serialize};

/// Body of a payment start, as posted by the marketplace.
#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStartRequest {
    pub process_success_url: String,
    pub process_error_url: String,
    pub base_attributes: BaseAttributes,
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BaseAttributes {
    pub payment_items: Vec<PayoutLineItem>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStartResponse {
    pub redirect_url: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
