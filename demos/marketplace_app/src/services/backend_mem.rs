// demos/marketplace_app/src/services/backend_mem.rs

//! In-memory stand-in for the marketplace backend. It enforces the same
//! contract the real service would — bearer auth on every call, amount
//! re-validation, the monotonic payment lifecycle, idempotent re-delivery
//! of confirm/fail — so the checkout flows above it behave exactly as
//! they would against production.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::RwLock;
use rifa::{
  BearerToken, CheckoutError, CheckoutResult, Complaint, ComplaintId, ComplaintStatus, ConfirmPaymentRequest,
  CreatePaymentRequest, FailPaymentRequest, FileComplaintRequest, MarketplaceApi, Payment, PaymentId, PaymentStatus,
  ProductSummary, Raffle, RaffleId, RaffleStatus, ShopDirectory, ShopId, ShopListing, ShopSummary, UserId,
  VerificationStatus,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;

pub struct InMemoryBackend {
  sessions: RwLock<HashMap<String, UserId>>,
  shops: RwLock<HashMap<ShopId, ShopListing>>,
  raffles: RwLock<HashMap<RaffleId, Raffle>>,
  payments: RwLock<HashMap<PaymentId, Payment>>,
  complaints: RwLock<HashMap<ComplaintId, Complaint>>,
  complaint_response_days: i64,
}

impl InMemoryBackend {
  pub fn new(complaint_response_days: i64) -> Self {
    Self {
      sessions: RwLock::new(HashMap::new()),
      shops: RwLock::new(HashMap::new()),
      raffles: RwLock::new(HashMap::new()),
      payments: RwLock::new(HashMap::new()),
      complaints: RwLock::new(HashMap::new()),
      complaint_response_days,
    }
  }

  /// Registers a valid credential. The demo seeds one at startup.
  pub fn register_session(&self, token: &str, user_id: UserId) {
    self.sessions.write().insert(token.to_string(), user_id);
  }

  /// Resolves a presented credential to its user, as the credential store
  /// of the original client would.
  pub fn resolve_user(&self, token: &BearerToken) -> CheckoutResult<UserId> {
    self
      .sessions
      .read()
      .get(token.as_str())
      .cloned()
      .ok_or(CheckoutError::Unauthorized)
  }

  pub fn insert_shop(&self, shop: ShopListing) {
    self.shops.write().insert(shop.id.clone(), shop);
  }

  pub fn insert_raffle(&self, raffle: Raffle) {
    self.raffles.write().insert(raffle.id.clone(), raffle);
  }

  /// Demo catalog: a verified shop with two live raffles, an unverified
  /// shop that must stay out of the public directory, and one exhausted
  /// raffle.
  pub fn seed_demo_catalog(&self) {
    let now = Utc::now();
    let aurora = ShopListing {
      id: ShopId::from("shop-aurora"),
      name: "Tienda Aurora".to_string(),
      verification_status: VerificationStatus::Verified,
      created_at: now,
    };
    let pending = ShopListing {
      id: ShopId::from("shop-nueva"),
      name: "Tienda Nueva".to_string(),
      verification_status: VerificationStatus::Pending,
      created_at: now,
    };
    self.insert_shop(aurora.clone());
    self.insert_shop(pending);

    let aurora_summary = ShopSummary {
      id: aurora.id.clone(),
      name: aurora.name.clone(),
    };
    self.insert_raffle(Raffle {
      id: RaffleId::from("raffle-consola"),
      shop: aurora_summary.clone(),
      product: ProductSummary {
        name: "Consola de videojuegos".to_string(),
        image_url: None,
      },
      product_value: Decimal::new(1999, 2),
      total_tickets: 100,
      sold_tickets: 0,
      status: RaffleStatus::Active,
      winning_ticket: None,
      created_at: now,
      updated_at: now,
    });
    self.insert_raffle(Raffle {
      id: RaffleId::from("raffle-bicicleta"),
      shop: aurora_summary.clone(),
      product: ProductSummary {
        name: "Bicicleta de montaña".to_string(),
        image_url: None,
      },
      product_value: Decimal::new(4550, 2),
      total_tickets: 100,
      sold_tickets: 97,
      status: RaffleStatus::Active,
      winning_ticket: None,
      created_at: now,
      updated_at: now,
    });
    self.insert_raffle(Raffle {
      id: RaffleId::from("raffle-agotada"),
      shop: aurora_summary,
      product: ProductSummary {
        name: "Audífonos inalámbricos".to_string(),
        image_url: None,
      },
      product_value: Decimal::new(899, 2),
      total_tickets: 50,
      sold_tickets: 50,
      status: RaffleStatus::SoldOut,
      winning_ticket: None,
      created_at: now,
      updated_at: now,
    });
    info!("Demo catalog seeded.");
  }
}

#[async_trait]
impl MarketplaceApi for InMemoryBackend {
  async fn create_payment(&self, auth: &BearerToken, req: CreatePaymentRequest) -> CheckoutResult<Payment> {
    let user_id = self.resolve_user(auth)?;

    let raffle = self
      .raffles
      .read()
      .get(&req.raffle_id)
      .cloned()
      .ok_or_else(|| CheckoutError::NotFound(format!("raffle {}", req.raffle_id)))?;

    if raffle.status != RaffleStatus::Active {
      return Err(CheckoutError::Backend {
        status: 422,
        message: Some("La rifa no está activa.".to_string()),
      });
    }
    if req.ticket_quantity == 0 || req.ticket_quantity > raffle.remaining_tickets() {
      return Err(CheckoutError::Backend {
        status: 422,
        message: Some("Cantidad de boletos no disponible.".to_string()),
      });
    }
    let expected = Decimal::from(req.ticket_quantity) * raffle.product_value;
    if req.amount != expected {
      warn!(sent = %req.amount, %expected, "Rejected payment with mismatched amount.");
      return Err(CheckoutError::Backend {
        status: 422,
        message: Some("El monto no coincide con el precio de los boletos.".to_string()),
      });
    }

    let payment = Payment {
      id: PaymentId::new(format!("pay_{}", Uuid::new_v4().simple())),
      user_id,
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
    self.payments.write().insert(payment.id.clone(), payment.clone());
    info!(payment_id = %payment.id, "Pending payment recorded.");
    Ok(payment)
  }

  async fn confirm_payment(&self, auth: &BearerToken, req: ConfirmPaymentRequest) -> CheckoutResult<Payment> {
    self.resolve_user(auth)?;

    let confirmed = {
      let mut payments = self.payments.write();
      let payment = payments
        .get_mut(&req.payment_id)
        .ok_or_else(|| CheckoutError::NotFound(format!("payment {}", req.payment_id)))?;

      // Duplicate delivery of a confirmation is a no-op, not corruption.
      if payment.status == PaymentStatus::Completed {
        warn!(payment_id = %payment.id, "Duplicate confirm ignored.");
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
      payment.clone()
    };

    // Ticket allocation happens server-side at confirmation time.
    if let Some(raffle_id) = &confirmed.raffle_id {
      let mut raffles = self.raffles.write();
      if let Some(raffle) = raffles.get_mut(raffle_id) {
        raffle.sold_tickets = (raffle.sold_tickets + confirmed.ticket_quantity).min(raffle.total_tickets);
        if raffle.sold_tickets == raffle.total_tickets {
          raffle.status = RaffleStatus::SoldOut;
        }
        raffle.updated_at = Utc::now();
      }
    }

    info!(payment_id = %confirmed.id, "Payment confirmed.");
    Ok(confirmed)
  }

  async fn fail_payment(&self, auth: &BearerToken, req: FailPaymentRequest) -> CheckoutResult<Payment> {
    self.resolve_user(auth)?;

    let mut payments = self.payments.write();
    let payment = payments
      .get_mut(&req.payment_id)
      .ok_or_else(|| CheckoutError::NotFound(format!("payment {}", req.payment_id)))?;

    if payment.status == PaymentStatus::Failed {
      warn!(payment_id = %payment.id, "Duplicate fail ignored.");
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
    info!(payment_id = %payment.id, reason = ?payment.failure_reason, "Payment failed.");
    Ok(payment.clone())
  }

  async fn fetch_payment(&self, auth: &BearerToken, id: &PaymentId) -> CheckoutResult<Payment> {
    self.resolve_user(auth)?;
    self
      .payments
      .read()
      .get(id)
      .cloned()
      .ok_or_else(|| CheckoutError::NotFound(format!("payment {}", id)))
  }

  async fn fetch_raffle(&self, id: &RaffleId) -> CheckoutResult<Raffle> {
    self
      .raffles
      .read()
      .get(id)
      .cloned()
      .ok_or_else(|| CheckoutError::NotFound(format!("raffle {}", id)))
  }

  async fn file_complaint(&self, auth: &BearerToken, req: FileComplaintRequest) -> CheckoutResult<Complaint> {
    let user_id = self.resolve_user(auth)?;
    let now = Utc::now();
    let complaint = Complaint {
      id: ComplaintId::new(format!("cmp_{}", Uuid::new_v4().simple())),
      user_id,
      shop_id: req.shop_id,
      raffle_id: req.raffle_id,
      payment_id: req.payment_id,
      kind: req.kind,
      subject: req.subject,
      description: req.description,
      status: ComplaintStatus::Pending,
      response_deadline: now + Duration::days(self.complaint_response_days),
      created_at: now,
      updated_at: now,
    };
    self.complaints.write().insert(complaint.id.clone(), complaint.clone());
    info!(complaint_id = %complaint.id, "Complaint recorded.");
    Ok(complaint)
  }
}

#[async_trait]
impl ShopDirectory for InMemoryBackend {
  async fn shops_with_status(&self, status: VerificationStatus) -> CheckoutResult<Vec<ShopListing>> {
    let mut listings: Vec<ShopListing> = self
      .shops
      .read()
      .values()
      .filter(|s| s.verification_status == status)
      .cloned()
      .collect();
    listings.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(listings)
  }
}
