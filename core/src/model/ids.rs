// src/model/ids.rs

//! Opaque identifiers minted by the backend. Newtypes keep a payment id
//! from ever being passed where a raffle id is expected.

use serde::{Deserialize, Serialize};

macro_rules! opaque_id {
  ($(#[$doc:meta])* $name:ident) => {
    $(#[$doc])*
    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(pub String);

    impl $name {
      pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
      }

      pub fn as_str(&self) -> &str {
        &self.0
      }
    }

    impl std::fmt::Display for $name {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
      }
    }

    impl From<&str> for $name {
      fn from(raw: &str) -> Self {
        Self(raw.to_string())
      }
    }
  };
}

opaque_id!(RaffleId);
opaque_id!(PaymentId);
opaque_id!(ShopId);
opaque_id!(ComplaintId);
opaque_id!(UserId);
