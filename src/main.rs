use actix_web::{middleware::Logger, web, App, HttpServer};
use secrecy::ExposeSecret as _;

use course_forge::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    if config.openai_api_key.expose_secret().is_empty() {
        log::warn!("OPENAI_API_KEY is not set; completion calls will be rejected by the API");
    }

    let bind_addr = (config.web_server_host.clone(), config.web_server_port);
    let state = AppState::new(config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    log::info!("starting HTTP server on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
