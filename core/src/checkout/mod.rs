// src/checkout/mod.rs

//! The purchase protocol, expressed as flows over the engine in
//! [`crate::flow`]: availability guarding and payment initiation,
//! gateway settlement reconciliation, outcome reflection, and complaint
//! filing. Each submodule owns one flow: its context struct and the
//! builder that wires its steps.

pub mod complaint;
pub mod initiate;
pub mod outcome;
pub mod settle;

pub use complaint::{build_complaint_flow, ComplaintCtx};
pub use initiate::{build_initiate_flow, InitiateCtx};
pub use outcome::{build_outcome_flow, OutcomeCtx, OutcomeView};
pub use settle::{build_settle_flow, SettleCtx};

use crate::error::CheckoutError;
use crate::flow::Flow;
use crate::model::PaymentId;

/// Where the user goes next. Flows never render; they resolve a route and
/// the embedding surface navigates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextRoute {
  /// Enter (or re-enter) checkout for this pending payment.
  Checkout { payment_id: PaymentId },
  /// The success page, keyed by the payment that completed.
  Success { payment_id: PaymentId },
  /// The failure page, keyed by the payment that failed; it offers retry
  /// back into `Checkout` with the same id.
  Failure { payment_id: PaymentId },
  /// The single escape hatch: back to the marketplace listing.
  Marketplace,
}

/// The four protocol flows, built once at startup and shared.
pub struct CheckoutFlows {
  pub initiate: Flow<InitiateCtx, CheckoutError>,
  pub settle: Flow<SettleCtx, CheckoutError>,
  pub outcome: Flow<OutcomeCtx, CheckoutError>,
  pub complaint: Flow<ComplaintCtx, CheckoutError>,
}

impl CheckoutFlows {
  pub fn build() -> Self {
    Self {
      initiate: build_initiate_flow(),
      settle: build_settle_flow(),
      outcome: build_outcome_flow(),
      complaint: build_complaint_flow(),
    }
  }
}
