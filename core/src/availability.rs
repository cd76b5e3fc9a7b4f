// src/availability.rs

//! The availability guard: pure checks that run before any purchase
//! request leaves the client. No side effects here.

use crate::error::{CheckoutError, CheckoutResult};
use crate::model::{Raffle, RaffleStatus};

/// Tickets still purchasable, computed from the page's raffle projection.
/// Saturates at zero when a projection violates `sold ≤ total`.
pub fn available_tickets(total_tickets: u32, sold_tickets: u32) -> u32 {
  total_tickets.saturating_sub(sold_tickets)
}

/// Clamps a requested quantity into `[1, available]`. Applied on every
/// input change so the user can never overshoot. Returns 0 only when
/// nothing is available at all (the purchase action is disabled then).
pub fn clamp_quantity(requested: u32, available: u32) -> u32 {
  if available == 0 {
    return 0;
  }
  requested.clamp(1, available)
}

/// Validates a quantity about to be submitted. Anything outside
/// `[1, available]` is rejected here, before any network call.
pub fn validate_quantity(requested: u32, available: u32) -> CheckoutResult<()> {
  if available == 0 {
    return Err(CheckoutError::Validation("No quedan boletos disponibles.".to_string()));
  }
  if requested == 0 {
    return Err(CheckoutError::Validation(
      "Debes comprar al menos un boleto.".to_string(),
    ));
  }
  if requested > available {
    return Err(CheckoutError::Validation(format!(
      "Solo quedan {} boletos disponibles.",
      available
    )));
  }
  Ok(())
}

/// Whether purchases are permitted at all for this raffle: it must be
/// `active` AND have tickets left. An exhausted raffle blocks purchase
/// even if its status flag has not caught up.
pub fn purchase_allowed(raffle: &Raffle) -> bool {
  raffle.status == RaffleStatus::Active && raffle.remaining_tickets() > 0
}
