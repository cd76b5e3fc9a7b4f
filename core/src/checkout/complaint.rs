// src/checkout/complaint.rs

//! Complaint filing: validate the draft, submit it, hand back the
//! pending complaint with its display-only response deadline.

use crate::api::{FileComplaintRequest, MarketplaceApi};
use crate::error::CheckoutError;
use crate::flow::{Flow, FlowControl, FlowData};
use crate::model::Complaint;
use crate::session::SessionStore;
use std::sync::Arc;
use tracing::info;

/// Subjects and descriptions are bounded; the backend enforces its own
/// limits, these just keep obviously broken input off the wire.
const MAX_SUBJECT_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 2000;

pub struct ComplaintCtx {
  pub api: Arc<dyn MarketplaceApi>,
  pub session: Arc<SessionStore>,

  pub draft: FileComplaintRequest,
  pub complaint: Option<Complaint>,
}

impl ComplaintCtx {
  pub fn new(api: Arc<dyn MarketplaceApi>, session: Arc<SessionStore>, draft: FileComplaintRequest) -> Self {
    Self {
      api,
      session,
      draft,
      complaint: None,
    }
  }
}

pub fn build_complaint_flow() -> Flow<ComplaintCtx, CheckoutError> {
  let mut f = Flow::<ComplaintCtx, CheckoutError>::new(&[
    ("validate_complaint_draft", false, None),
    ("submit_complaint", false, None),
  ]);

  f.on("validate_complaint_draft", |ctx_data: FlowData<ComplaintCtx>| {
    Box::pin(async move {
      let draft = ctx_data.read().draft.clone();

      if draft.subject.trim().is_empty() {
        return Err(CheckoutError::Validation("El asunto es obligatorio.".to_string()));
      }
      if draft.subject.chars().count() > MAX_SUBJECT_LEN {
        return Err(CheckoutError::Validation("El asunto es demasiado largo.".to_string()));
      }
      if draft.description.trim().is_empty() {
        return Err(CheckoutError::Validation("La descripción es obligatoria.".to_string()));
      }
      if draft.description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(CheckoutError::Validation(
          "La descripción es demasiado larga.".to_string(),
        ));
      }
      Ok(FlowControl::Continue)
    })
  });

  f.on("submit_complaint", |ctx_data: FlowData<ComplaintCtx>| {
    Box::pin(async move {
      let (api, session, draft) = {
        let guard = ctx_data.read();
        (guard.api.clone(), guard.session.clone(), guard.draft.clone())
      };

      let token = session.bearer()?;
      match api.file_complaint(&token, draft).await {
        Ok(complaint) => {
          info!(complaint_id = %complaint.id, kind = ?complaint.kind, "Complaint filed.");
          ctx_data.write().complaint = Some(complaint);
          Ok(FlowControl::Continue)
        }
        Err(e) => Err(session.absorb(e)),
      }
    })
  });

  f
}
