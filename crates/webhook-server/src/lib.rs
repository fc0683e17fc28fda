mod api;
pub mod cli;
pub mod config;
pub mod tracing;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use mount_rewriter::MutationHandler;

use crate::api::state::ApiServerState;
use crate::config::Config;

pub struct WebhookServer {
    config: Config,
    router: Router,
}

impl WebhookServer {
    pub fn new_from_config(config: Config) -> Self {
        let handler = MutationHandler::new(config.settings.clone());
        let state = Arc::new(ApiServerState { handler });

        WebhookServer {
            router: api::router(state),
            config,
        }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serves until the process is stopped. With a cert/key pair configured
    /// the listener speaks HTTPS, otherwise plain HTTP (e.g. behind a
    /// TLS-terminating proxy).
    pub async fn run(self) -> Result<()> {
        let addr = self.config.addr;

        match &self.config.tls_config {
            Some(tls_config) => {
                rustls::crypto::ring::default_provider()
                    .install_default()
                    .map_err(|_| anyhow!("cannot install rustls crypto provider"))?;

                let rustls_config =
                    RustlsConfig::from_pem_file(&tls_config.cert_file, &tls_config.key_file)
                        .await
                        .map_err(|e| {
                            anyhow!(
                                "cannot load certificate file {} or key file {}: {e}",
                                tls_config.cert_file,
                                tls_config.key_file
                            )
                        })?;

                axum_server::bind_rustls(addr, rustls_config)
                    .serve(self.router.into_make_service())
                    .await?;
            }
            None => {
                axum_server::bind(addr)
                    .serve(self.router.into_make_service())
                    .await?;
            }
        }

        Ok(())
    }
}
