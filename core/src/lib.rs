// src/lib.rs

//! Rifa: the checkout engine of a raffle marketplace.
//!
//! Shops list products as raffles sold in numbered tickets; users buy
//! tickets; payments settle through external gateways; disputes travel a
//! complaint workflow. The authoritative records live in a backend this
//! crate only calls. What lives here is the protocol the client drives:
//!  - A pure availability guard bounding every requested quantity.
//!  - Payment initiation: exact pricing and the purchase intent call.
//!  - Gateway settlement: await the provider's verdict, reconcile it with
//!    the backend, and only then move the user.
//!  - Outcome reflection: rebuild a terminal page from nothing but a
//!    payment identifier.
//!  - Complaint filing against a shop, raffle or payment.
//!
//! The flows run on a small step engine (`flow`), the backend and the
//! gateways sit behind seam traits (`api`, `gateway`), and the only
//! cross-request state is an explicit session store cleared wholesale on
//! any 401.

pub mod api;
pub mod availability;
pub mod checkout;
pub mod error;
pub mod flow;
pub mod gateway;
pub mod model;
pub mod pricing;
pub mod session;

// --- Re-exports for the public API ---

pub use crate::error::{CheckoutError, CheckoutResult, GENERIC_ERROR_MESSAGE};
pub use crate::flow::{Flow, FlowControl, FlowData, FlowError, FlowOutcome, FlowResult};

pub use crate::api::{
  ConfirmPaymentRequest, CreatePaymentRequest, FailPaymentRequest, FileComplaintRequest, MarketplaceApi,
  ShopDirectory,
};
pub use crate::checkout::{
  build_complaint_flow, build_initiate_flow, build_outcome_flow, build_settle_flow, CheckoutFlows, ComplaintCtx,
  InitiateCtx, NextRoute, OutcomeCtx, OutcomeView, SettleCtx,
};
pub use crate::gateway::{GatewayOutcome, PaymentGateway};
pub use crate::model::{
  Complaint, ComplaintId, ComplaintKind, ComplaintStatus, Payment, PaymentId, PaymentMethod, PaymentStatus,
  ProductSummary, Raffle, RaffleId, RaffleStatus, ShopId, ShopListing, ShopSummary, UserId, VerificationStatus,
};
pub use crate::session::{BearerToken, SessionStore};
