//! Request handler definitions
//!
//! Define each route and its handler here. Handlers that are more than a line or two MUST go into a separate module
//! (see [`epay_routes`](crate::epay_routes) and [`alipay_routes`](crate::alipay_routes)). Keep this module neat and
//! tidy 🙏

use actix_web::{get, HttpResponse, Responder};
use log::trace;

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}
