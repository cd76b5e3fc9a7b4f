// src/pricing.rs

//! Order pricing. One computation, kept exact: two-decimal currency
//! amounts must never drift.

use rust_decimal::Decimal;

/// Total amount for an order: `quantity × unit_price`, exact.
pub fn order_amount(quantity: u32, unit_price: Decimal) -> Decimal {
  Decimal::from(quantity) * unit_price
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn three_tickets_at_19_99_cost_exactly_59_97() {
    let amount = order_amount(3, Decimal::new(1999, 2));
    assert_eq!(amount, Decimal::new(5997, 2));
    assert_eq!(amount.to_string(), "59.97");
  }

  #[test]
  fn single_ticket_costs_unit_price() {
    assert_eq!(order_amount(1, Decimal::new(250, 1)), Decimal::new(250, 1));
  }

  #[test]
  fn repeated_addition_and_multiplication_agree() {
    let unit = Decimal::new(1999, 2);
    let mut sum = Decimal::ZERO;
    for _ in 0..7 {
      sum += unit;
    }
    assert_eq!(order_amount(7, unit), sum);
  }
}
