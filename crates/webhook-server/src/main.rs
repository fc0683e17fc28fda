use anyhow::Result;
use tracing::info;

use webhook_server::cli;
use webhook_server::config::{Config, SERVICE_NAME};
use webhook_server::tracing::setup_tracing;
use webhook_server::WebhookServer;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    let config = Config::from_args(&matches)?;

    setup_tracing(&config.log_level, &config.log_fmt, config.log_no_color)?;

    info!(
        service = SERVICE_NAME,
        address = config.addr.to_string().as_str(),
        tls = config.tls_config.is_some(),
        label_key = config.settings.target_label.key.as_str(),
        label_value = config.settings.target_label.value.as_str(),
        rewrite_from = config.settings.rewrite_rule.from.as_str(),
        rewrite_to = config.settings.rewrite_rule.to.as_str(),
        "starting mutating webhook",
    );

    WebhookServer::new_from_config(config).run().await
}
