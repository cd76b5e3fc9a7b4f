// src/model/mod.rs

//! Read-only projections of the backend-owned records the checkout
//! protocol operates on. The backend mutates these; this crate only
//! fetches, validates and reflects them.

pub mod complaint;
pub mod ids;
pub mod payment;
pub mod raffle;
pub mod shop;

pub use complaint::{Complaint, ComplaintKind, ComplaintStatus};
pub use ids::{ComplaintId, PaymentId, RaffleId, ShopId, UserId};
pub use payment::{Payment, PaymentMethod, PaymentStatus};
pub use raffle::{ProductSummary, Raffle, RaffleStatus};
pub use shop::{ShopListing, ShopSummary, VerificationStatus};
