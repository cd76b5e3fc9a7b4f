// src/session.rs

//! The explicit authentication context. There is no ambient global: every
//! network-calling component receives an `Arc<SessionStore>` and reads the
//! credential per request. Any 401 clears the store wholesale; the next
//! user action re-authenticates.

use crate::error::{CheckoutError, CheckoutResult};
use crate::model::UserId;
use parking_lot::RwLock;

/// A bearer credential. Debug output is redacted; tokens must not reach
/// logs.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
  pub fn new(raw: impl Into<String>) -> Self {
    BearerToken(raw.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Value for an `Authorization` header.
  pub fn header_value(&self) -> String {
    format!("Bearer {}", self.0)
  }
}

impl std::fmt::Debug for BearerToken {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str("BearerToken(***)")
  }
}

#[derive(Debug, Clone)]
struct SessionState {
  token: BearerToken,
  user_id: UserId,
}

/// Holds the credential and the cached user reference for one client
/// session. The only state shared across requests.
#[derive(Debug, Default)]
pub struct SessionStore {
  state: RwLock<Option<SessionState>>,
}

impl SessionStore {
  /// A store with no credential; every authenticated call fails with
  /// `Unauthorized` until `sign_in` runs.
  pub fn anonymous() -> Self {
    Self::default()
  }

  pub fn signed_in(token: BearerToken, user_id: UserId) -> Self {
    let store = Self::default();
    store.sign_in(token, user_id);
    store
  }

  pub fn sign_in(&self, token: BearerToken, user_id: UserId) {
    *self.state.write() = Some(SessionState { token, user_id });
  }

  /// Clears credential and cached profile together.
  pub fn clear(&self) {
    *self.state.write() = None;
  }

  pub fn is_authenticated(&self) -> bool {
    self.state.read().is_some()
  }

  pub fn user_id(&self) -> Option<UserId> {
    self.state.read().as_ref().map(|s| s.user_id.clone())
  }

  /// The credential to attach to an outgoing request, or `Unauthorized`
  /// before any network call is issued.
  pub fn bearer(&self) -> CheckoutResult<BearerToken> {
    self
      .state
      .read()
      .as_ref()
      .map(|s| s.token.clone())
      .ok_or(CheckoutError::Unauthorized)
  }

  /// Routes an API error through the session: a 401 (in either shape)
  /// clears the store and normalizes to `Unauthorized`; anything else
  /// passes through untouched.
  pub fn absorb(&self, err: CheckoutError) -> CheckoutError {
    if err.is_unauthorized() {
      tracing::warn!("Credential rejected by backend; clearing session store.");
      self.clear();
      return CheckoutError::Unauthorized;
    }
    err
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn anonymous_store_refuses_bearer() {
    let store = SessionStore::anonymous();
    assert!(matches!(store.bearer(), Err(CheckoutError::Unauthorized)));
  }

  #[test]
  fn absorb_clears_on_backend_401() {
    let store = SessionStore::signed_in(BearerToken::new("tok"), UserId::from("u1"));
    assert!(store.is_authenticated());

    let normalized = store.absorb(CheckoutError::Backend {
      status: 401,
      message: None,
    });
    assert!(matches!(normalized, CheckoutError::Unauthorized));
    assert!(!store.is_authenticated());
  }

  #[test]
  fn absorb_passes_other_errors_through() {
    let store = SessionStore::signed_in(BearerToken::new("tok"), UserId::from("u1"));
    let err = store.absorb(CheckoutError::Backend {
      status: 500,
      message: Some("boom".to_string()),
    });
    assert!(matches!(err, CheckoutError::Backend { status: 500, .. }));
    assert!(store.is_authenticated());
  }

  #[test]
  fn debug_never_prints_the_token() {
    let token = BearerToken::new("secret-token-value");
    assert_eq!(format!("{:?}", token), "BearerToken(***)");
    assert_eq!(token.header_value(), "Bearer secret-token-value");
  }
}
