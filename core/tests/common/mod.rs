// tests/common/mod.rs
#![allow(dead_code)] // Allow unused helpers in this common test module

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use rifa::{
  BearerToken, CheckoutError, CheckoutResult, Complaint, ComplaintId, ComplaintStatus, ConfirmPaymentRequest,
  CreatePaymentRequest, FailPaymentRequest, FileComplaintRequest, GatewayOutcome, MarketplaceApi, Payment,
  PaymentGateway, PaymentId, PaymentMethod, PaymentStatus, ProductSummary, Raffle, RaffleId, RaffleStatus,
  SessionStore, ShopId, ShopSummary, UserId,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::Level;

// --- Tracing setup (once per test binary) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Fixtures ---

pub const TEST_TOKEN: &str = "test-session-token";

pub fn signed_in_store() -> SessionStore {
  SessionStore::signed_in(BearerToken::new(TEST_TOKEN), UserId::from("u1"))
}

pub fn sample_raffle(id: &str, total: u32, sold: u32) -> Raffle {
  Raffle {
    id: RaffleId::from(id),
    shop: ShopSummary {
      id: ShopId::from("s1"),
      name: "Tienda Aurora".to_string(),
    },
    product: ProductSummary {
      name: "Consola de videojuegos".to_string(),
      image_url: None,
    },
    product_value: Decimal::new(1999, 2), // 19.99
    total_tickets: total,
    sold_tickets: sold,
    status: RaffleStatus::Active,
    winning_ticket: None,
    created_at: Utc::now(),
    updated_at: Utc::now(),
  }
}

// --- Injectable faults for the stub backend ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
  Transport,
  Unauthorized,
}

fn fault_error(fault: Fault) -> CheckoutError {
  match fault {
    Fault::Transport => CheckoutError::Transport {
      source: anyhow::anyhow!("connection reset by stub"),
    },
    Fault::Unauthorized => CheckoutError::Unauthorized,
  }
}

// --- Stub backend ---

/// In-memory stand-in for the marketplace backend. Enforces the same
/// contract the real one would: bearer auth on every call, pending-only
/// transitions, idempotent re-confirmation of an already-terminal record.
#[derive(Default)]
pub struct StubMarketplace {
  pub raffles: Mutex<HashMap<RaffleId, Raffle>>,
  pub payments: Mutex<HashMap<PaymentId, Payment>>,
  minted: AtomicUsize,

  pub create_fault: Mutex<Option<Fault>>,
  pub confirm_fault: Mutex<Option<Fault>>,
  pub fail_fault: Mutex<Option<Fault>>,
  pub fetch_payment_fault: Mutex<Option<Fault>>,
  pub fetch_raffle_fault: Mutex<Option<Fault>>,

  pub create_calls: AtomicUsize,
  pub confirm_calls: AtomicUsize,
  pub fail_calls: AtomicUsize,
  pub fetch_payment_calls: AtomicUsize,
}

impl StubMarketplace {
  pub fn with_raffle(raffle: Raffle) -> Self {
    let stub = Self::default();
    stub.raffles.lock().insert(raffle.id.clone(), raffle);
    stub
  }

  pub fn seed_payment(&self, payment: Payment) {
    self.payments.lock().insert(payment.id.clone(), payment);
  }

  pub fn payment(&self, id: &PaymentId) -> Option<Payment> {
    self.payments.lock().get(id).cloned()
  }

  fn check_auth(&self, auth: &BearerToken) -> CheckoutResult<()> {
    if auth.as_str() == TEST_TOKEN {
      Ok(())
    } else {
      Err(CheckoutError::Unauthorized)
    }
  }

  fn take_fault(slot: &Mutex<Option<Fault>>) -> Option<Fault> {
    slot.lock().take()
  }
}

#[async_trait]
impl MarketplaceApi for StubMarketplace {
  async fn create_payment(&self, auth: &BearerToken, req: CreatePaymentRequest) -> CheckoutResult<Payment> {
    self.create_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(fault) = Self::take_fault(&self.create_fault) {
      return Err(fault_error(fault));
    }
    self.check_auth(auth)?;

    let raffle = self
      .raffles
      .lock()
      .get(&req.raffle_id)
      .cloned()
      .ok_or_else(|| CheckoutError::NotFound(format!("raffle {}", req.raffle_id)))?;
    let expected = Decimal::from(req.ticket_quantity) * raffle.product_value;
    if req.amount != expected {
      return Err(CheckoutError::Backend {
        status: 422,
        message: Some("amount does not match ticket price".to_string()),
      });
    }

    let n = self.minted.fetch_add(1, Ordering::SeqCst) + 1;
    let payment = Payment {
      id: PaymentId::new(format!("p{}", n)),
      user_id: UserId::from("u1"),
      raffle_id: Some(req.raffle_id),
      amount: req.amount,
      currency: "MXN".to_string(),
      status: PaymentStatus::Pending,
      payment_method: None,
      ticket_quantity: req.ticket_quantity,
      external_transaction_id: None,
      failure_reason: None,
      created_at: Utc::now(),
      completed_at: None,
      failed_at: None,
    };
    self.payments.lock().insert(payment.id.clone(), payment.clone());
    Ok(payment)
  }

  async fn confirm_payment(&self, auth: &BearerToken, req: ConfirmPaymentRequest) -> CheckoutResult<Payment> {
    self.confirm_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(fault) = Self::take_fault(&self.confirm_fault) {
      return Err(fault_error(fault));
    }
    self.check_auth(auth)?;

    let mut payments = self.payments.lock();
    let payment = payments
      .get_mut(&req.payment_id)
      .ok_or_else(|| CheckoutError::NotFound(format!("payment {}", req.payment_id)))?;
    // Duplicate confirmation of an already-completed payment is a no-op.
    if payment.status == PaymentStatus::Completed {
      return Ok(payment.clone());
    }
    if !payment.status.can_transition(PaymentStatus::Completed) {
      return Err(CheckoutError::IllegalTransition {
        from: payment.status.as_str().to_string(),
        to: "completed".to_string(),
      });
    }
    payment.status = PaymentStatus::Completed;
    payment.external_transaction_id = Some(req.external_transaction_id);
    payment.payment_method = Some(req.payment_method);
    payment.completed_at = Some(Utc::now());
    Ok(payment.clone())
  }

  async fn fail_payment(&self, auth: &BearerToken, req: FailPaymentRequest) -> CheckoutResult<Payment> {
    self.fail_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(fault) = Self::take_fault(&self.fail_fault) {
      return Err(fault_error(fault));
    }
    self.check_auth(auth)?;

    let mut payments = self.payments.lock();
    let payment = payments
      .get_mut(&req.payment_id)
      .ok_or_else(|| CheckoutError::NotFound(format!("payment {}", req.payment_id)))?;
    if payment.status == PaymentStatus::Failed {
      return Ok(payment.clone());
    }
    if !payment.status.can_transition(PaymentStatus::Failed) {
      return Err(CheckoutError::IllegalTransition {
        from: payment.status.as_str().to_string(),
        to: "failed".to_string(),
      });
    }
    payment.status = PaymentStatus::Failed;
    payment.failure_reason = Some(req.failure_reason);
    payment.failed_at = Some(Utc::now());
    Ok(payment.clone())
  }

  async fn fetch_payment(&self, auth: &BearerToken, id: &PaymentId) -> CheckoutResult<Payment> {
    self.fetch_payment_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(fault) = Self::take_fault(&self.fetch_payment_fault) {
      return Err(fault_error(fault));
    }
    self.check_auth(auth)?;
    self
      .payments
      .lock()
      .get(id)
      .cloned()
      .ok_or_else(|| CheckoutError::NotFound(format!("payment {}", id)))
  }

  async fn fetch_raffle(&self, id: &RaffleId) -> CheckoutResult<Raffle> {
    if let Some(fault) = Self::take_fault(&self.fetch_raffle_fault) {
      return Err(fault_error(fault));
    }
    self
      .raffles
      .lock()
      .get(id)
      .cloned()
      .ok_or_else(|| CheckoutError::NotFound(format!("raffle {}", id)))
  }

  async fn file_complaint(&self, auth: &BearerToken, req: FileComplaintRequest) -> CheckoutResult<Complaint> {
    self.check_auth(auth)?;
    let n = self.minted.fetch_add(1, Ordering::SeqCst) + 1;
    let now = Utc::now();
    Ok(Complaint {
      id: ComplaintId::new(format!("c{}", n)),
      user_id: UserId::from("u1"),
      shop_id: req.shop_id,
      raffle_id: req.raffle_id,
      payment_id: req.payment_id,
      kind: req.kind,
      subject: req.subject,
      description: req.description,
      status: ComplaintStatus::Pending,
      response_deadline: now + Duration::days(7),
      created_at: now,
      updated_at: now,
    })
  }
}

// --- Stub gateways ---

/// Always approves, reporting a fixed provider transaction reference.
pub struct ApprovingGateway {
  pub transaction_id: String,
  pub method: PaymentMethod,
}

#[async_trait]
impl PaymentGateway for ApprovingGateway {
  fn method(&self) -> PaymentMethod {
    self.method
  }

  async fn collect(&self, _payment: &Payment) -> CheckoutResult<GatewayOutcome> {
    Ok(GatewayOutcome::Approved {
      transaction_id: self.transaction_id.clone(),
    })
  }
}

/// Always declines with a fixed human-readable reason.
pub struct DecliningGateway {
  pub reason: String,
  pub method: PaymentMethod,
}

#[async_trait]
impl PaymentGateway for DecliningGateway {
  fn method(&self) -> PaymentMethod {
    self.method
  }

  async fn collect(&self, _payment: &Payment) -> CheckoutResult<GatewayOutcome> {
    Ok(GatewayOutcome::Declined {
      reason: self.reason.clone(),
    })
  }
}

/// Never answers: the provider leg itself fails at transport level.
pub struct UnreachableGateway {
  pub method: PaymentMethod,
}

#[async_trait]
impl PaymentGateway for UnreachableGateway {
  fn method(&self) -> PaymentMethod {
    self.method
  }

  async fn collect(&self, _payment: &Payment) -> CheckoutResult<GatewayOutcome> {
    Err(CheckoutError::Transport {
      source: anyhow::anyhow!("gateway unreachable"),
    })
  }
}
