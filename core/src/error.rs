// src/error.rs

use crate::flow::FlowError;
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Fallback shown to the user when the backend did not supply a message
/// of its own. The marketplace ships in Spanish first.
pub const GENERIC_ERROR_MESSAGE: &str = "Ocurrió un error. Inténtalo de nuevo.";

/// Error taxonomy of the checkout protocol, as seen by a caller driving it.
#[derive(Debug, Error)]
pub enum CheckoutError {
  /// Input rejected before any network call was issued.
  #[error("validation error: {0}")]
  Validation(String),

  /// The backend rejected the request. `message` is the backend-supplied
  /// message field when present.
  #[error("backend rejected request ({status}): {message:?}")]
  Backend { status: u16, message: Option<String> },

  /// No session token, or the backend answered 401. The session store is
  /// cleared wholesale when this surfaces from a network call.
  #[error("not authenticated")]
  Unauthorized,

  /// The request never produced a backend answer (connection, timeout).
  #[error("transport failure: {source}")]
  Transport {
    #[source]
    source: AnyhowError,
  },

  /// A record the protocol needs does not exist on the backend.
  #[error("not found: {0}")]
  NotFound(String),

  /// A status change that the payment lifecycle does not permit.
  #[error("illegal payment transition: {from} -> {to}")]
  IllegalTransition { from: String, to: String },

  /// The flow engine reported a configuration problem.
  #[error("flow error: {source}")]
  Flow {
    #[from]
    source: FlowError,
  },

  #[error("internal error: {0}")]
  Internal(String),
}

impl CheckoutError {
  /// The message a UI surfaces for this error: the backend's own message
  /// when it supplied one, the generic localized fallback otherwise.
  /// Validation messages are composed client-side and pass through as-is.
  pub fn surface_message(&self) -> String {
    match self {
      CheckoutError::Validation(m) => m.clone(),
      CheckoutError::Backend { message: Some(m), .. } => m.clone(),
      _ => GENERIC_ERROR_MESSAGE.to_string(),
    }
  }

  /// Whether this error means the stored credential is no longer usable.
  pub fn is_unauthorized(&self) -> bool {
    matches!(self, CheckoutError::Unauthorized) || matches!(self, CheckoutError::Backend { status: 401, .. })
  }
}

// Opaque errors from transports or handler internals become Transport
// failures unless they already wrap a CheckoutError.
impl From<AnyhowError> for CheckoutError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<CheckoutError>() {
      Ok(checkout_err) => checkout_err,
      Err(other) => CheckoutError::Transport { source: other },
    }
  }
}

pub type CheckoutResult<T, E = CheckoutError> = std::result::Result<T, E>;
