use std::net::SocketAddr;

use axum::Router;
use mount_rewriter::MutationSettings;
use webhook_server::config::Config;
use webhook_server::WebhookServer;

pub(crate) fn default_test_config() -> Config {
    Config {
        addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
        tls_config: None,
        settings: MutationSettings::default(),
        log_level: "info".to_owned(),
        log_fmt: "json".to_owned(),
        log_no_color: false,
    }
}

pub(crate) fn app(config: Config) -> Router {
    let server = WebhookServer::new_from_config(config);

    server.router()
}
