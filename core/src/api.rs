// src/api.rs

//! The backend contracts this crate consumes. The marketplace backend
//! owns every record; these traits are the client half of that contract.
//! The REST surface maps onto [`MarketplaceApi`]; shop directory listings
//! come from the document store behind [`ShopDirectory`].

use crate::error::CheckoutResult;
use crate::model::{
  Complaint, ComplaintKind, Payment, PaymentId, PaymentMethod, Raffle, RaffleId, ShopId, ShopListing,
  VerificationStatus,
};
use crate::session::BearerToken;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `POST /payments`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
  pub raffle_id: RaffleId,
  /// Client-computed `ticket_quantity × product_value`; the backend
  /// re-validates.
  pub amount: Decimal,
  pub ticket_quantity: u32,
}

/// `POST /payments/confirm`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
  pub payment_id: PaymentId,
  pub external_transaction_id: String,
  pub payment_method: PaymentMethod,
}

/// `POST /payments/{id}/fail`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailPaymentRequest {
  pub payment_id: PaymentId,
  pub failure_reason: String,
}

/// `POST /complaints`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileComplaintRequest {
  pub kind: ComplaintKind,
  pub subject: String,
  pub description: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub shop_id: Option<ShopId>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub raffle_id: Option<RaffleId>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub payment_id: Option<PaymentId>,
}

/// The REST backend. Implementations attach `auth` as
/// `Authorization: Bearer <token>` on every call that takes one and map
/// a 401 answer to [`crate::CheckoutError::Unauthorized`].
///
/// Re-issuing confirm or fail against an already-terminal payment must
/// not corrupt backend state; this client relies on that contract
/// (duplicate gateway callbacks happen in practice) without enforcing it.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
  /// Submits a purchase intent; answers with a `pending` payment.
  async fn create_payment(&self, auth: &BearerToken, req: CreatePaymentRequest) -> CheckoutResult<Payment>;

  /// Reconciles a gateway approval; answers with the `completed` payment.
  async fn confirm_payment(&self, auth: &BearerToken, req: ConfirmPaymentRequest) -> CheckoutResult<Payment>;

  /// Reconciles a gateway decline; answers with the `failed` payment.
  async fn fail_payment(&self, auth: &BearerToken, req: FailPaymentRequest) -> CheckoutResult<Payment>;

  async fn fetch_payment(&self, auth: &BearerToken, id: &PaymentId) -> CheckoutResult<Payment>;

  /// Raffle pages are public; no credential travels with this read.
  async fn fetch_raffle(&self, id: &RaffleId) -> CheckoutResult<Raffle>;

  /// Files a dispute; answers with the `pending` complaint carrying its
  /// display-only response deadline.
  async fn file_complaint(&self, auth: &BearerToken, req: FileComplaintRequest) -> CheckoutResult<Complaint>;
}

/// Shop directory reads, keyed by verification status. These bypass the
/// REST API and hit the document store directly.
#[async_trait]
pub trait ShopDirectory: Send + Sync {
  async fn shops_with_status(&self, status: VerificationStatus) -> CheckoutResult<Vec<ShopListing>>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn create_request_serializes_camel_case() {
    let req = CreatePaymentRequest {
      raffle_id: RaffleId::from("r1"),
      amount: Decimal::new(5997, 2),
      ticket_quantity: 3,
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["raffleId"], "r1");
    assert_eq!(json["ticketQuantity"], 3);
    assert_eq!(json["amount"], "59.97");
  }

  #[test]
  fn confirm_request_carries_snake_case_method_tag() {
    let req = ConfirmPaymentRequest {
      payment_id: PaymentId::from("p1"),
      external_transaction_id: "stripe_123".to_string(),
      payment_method: PaymentMethod::Stripe,
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["paymentId"], "p1");
    assert_eq!(json["externalTransactionId"], "stripe_123");
    assert_eq!(json["paymentMethod"], "stripe");
  }

  #[test]
  fn complaint_request_omits_absent_references() {
    let req = FileComplaintRequest {
      kind: ComplaintKind::PaymentIssue,
      subject: "Cobro duplicado".to_string(),
      description: "Se cobró dos veces el mismo boleto.".to_string(),
      shop_id: None,
      raffle_id: None,
      payment_id: Some(PaymentId::from("p9")),
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["kind"], "payment_issue");
    assert_eq!(json["paymentId"], "p9");
    assert!(json.get("shopId").is_none());
    assert!(json.get("raffleId").is_none());
  }
}
