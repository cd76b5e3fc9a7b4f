// demos/marketplace_app/src/web/routes.rs

use actix_web::web;

// Liveness only; the in-memory backend has no further health to report.
async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Called from `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1") // Base path for API version 1
      // Health Check Route
      .route("/health", web::get().to(health_check_handler))
      // Purchase Routes: initiation, then settlement keyed by payment id
      .service(
        web::scope("/purchases").route(
          "",
          web::post().to(crate::web::handlers::purchase_handlers::start_purchase_handler),
        ),
      )
      .service(
        web::scope("/payments").route(
          "/{payment_id}/settle",
          web::post().to(crate::web::handlers::purchase_handlers::settle_payment_handler),
        ),
      )
      // Outcome page data, keyed by the paymentId query parameter
      .service(
        web::scope("/outcome").route(
          "",
          web::get().to(crate::web::handlers::outcome_handlers::outcome_page_handler),
        ),
      )
      // Catalog Routes
      .service(
        web::scope("/raffles").route(
          "/{raffle_id}",
          web::get().to(crate::web::handlers::catalog_handlers::get_raffle_handler),
        ),
      )
      .service(
        web::scope("/shops").route(
          "",
          web::get().to(crate::web::handlers::catalog_handlers::list_shops_handler),
        ),
      )
      // Complaint Routes
      .service(
        web::scope("/complaints").route(
          "",
          web::post().to(crate::web::handlers::complaint_handlers::file_complaint_handler),
        ),
      ),
  );
}
