//! Entry point of the booking gap offer run.
//! Prints booking reports for the configured Smoobu account and emails
//! discounted offers for free days next to upcoming stays.

mod app;
mod config;

use std::sync::Arc;

use app::App;
use config::AppConfig;
use notification_services::{EmailService, MockEmailService, OfferDispatcher, SmtpEmailService};
use smoobu_api::{SmoobuApiClient, SmoobuService};

fn create_email_service(config: &AppConfig) -> Arc<dyn EmailService> {
    let Some(email_config) = config.email_config() else {
        if config.email_dry_run {
            log::warn!("📭 EMAIL_DRY_RUN is set, offers are only logged");
        } else {
            log::warn!("📭 SMTP credentials or SENDER_EMAIL missing, offers are only logged");
        }
        return Arc::new(MockEmailService);
    };

    match SmtpEmailService::new(&email_config) {
        Ok(service) => {
            log::info!(
                "📧 SMTP email service ready ({}:{})",
                email_config.smtp_server,
                email_config.smtp_port
            );
            Arc::new(service)
        }
        Err(e) => {
            log::error!("❌ Failed to initialize SMTP email service: {}", e);
            log::warn!("🔧 Falling back to logging offers only");
            Arc::new(MockEmailService)
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("🚀 Starting booking gap offer run...");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ Invalid configuration: {}", e);
            log::error!("💡 Set SMOOBU_API_KEY in the environment or in a .env file");
            std::process::exit(1);
        }
    };

    let api_client = match SmoobuApiClient::new(config.client_config()) {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ Failed to create Smoobu API client: {}", e);
            std::process::exit(1);
        }
    };

    let app = App::new(
        SmoobuService::new(Arc::new(api_client)),
        OfferDispatcher::new(create_email_service(&config)),
    );

    app.run(chrono::Local::now().naive_local()).await;
}
