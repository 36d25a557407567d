use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use alipay_client::AlipayApi;

use crate::{
    alipay_routes::settlement_notify,
    config::{RelayOptions, ServerConfig},
    epay_routes::checkout,
    errors::ServerError,
    integrations::UpstreamProvider,
    routes::health,
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let provider = AlipayApi::new(config.alipay.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, provider)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

/// Assembles the actix server. Generic over the upstream provider so that endpoint tests can stand in a mock; the
/// production binary always wires in [`AlipayApi`].
pub fn create_server_instance<P>(config: ServerConfig, provider: P) -> Result<Server, ServerError>
where P: UpstreamProvider + Send + Sync + 'static {
    let options = RelayOptions::from_config(&config);
    // One outbound client for all merchant deliveries, bounded by the configured notify timeout
    let client = reqwest::Client::builder()
        .timeout(config.merchant_notify_timeout)
        .build()
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let provider = web::Data::new(provider);
    let srv = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("epf::access_log"))
            .app_data(provider.clone())
            .app_data(web::Data::new(options.clone()))
            .app_data(web::Data::new(client.clone()))
            .service(health)
            .service(web::scope("/epay").route("/{env}/submit.php", web::post().to(checkout::<P>)))
            .service(web::scope("/alipay").route("/notify", web::post().to(settlement_notify::<P>)))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
