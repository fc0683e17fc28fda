use std::net::SocketAddr;

use anyhow::{anyhow, Result};
use clap::ArgMatches;
use lazy_static::lazy_static;
use mount_rewriter::{MutationSettings, RewriteRule, TargetLabel};

pub static SERVICE_NAME: &str = "mount-rewriter-webhook";

lazy_static! {
    pub(crate) static ref HOSTNAME: String =
        std::env::var("HOSTNAME").unwrap_or_else(|_| String::from("unknown"));
}

pub struct Config {
    pub addr: SocketAddr,
    pub tls_config: Option<TlsConfig>,
    pub settings: MutationSettings,
    pub log_level: String,
    pub log_fmt: String,
    pub log_no_color: bool,
}

pub struct TlsConfig {
    pub cert_file: String,
    pub key_file: String,
}

impl Config {
    pub fn from_args(matches: &ArgMatches) -> Result<Self> {
        let addr = api_bind_address(matches)?;

        let (cert_file, key_file) = tls_files(matches)?;
        let tls_config = if cert_file.is_empty() {
            None
        } else {
            Some(TlsConfig {
                cert_file,
                key_file,
            })
        };

        let settings = MutationSettings {
            target_label: TargetLabel::new(
                matches
                    .get_one::<String>("label-key")
                    .expect("clap should have set a default value")
                    .to_owned(),
                matches
                    .get_one::<String>("label-value")
                    .expect("clap should have set a default value")
                    .to_owned(),
            ),
            rewrite_rule: RewriteRule::new(
                matches
                    .get_one::<String>("rewrite-from")
                    .expect("clap should have set a default value")
                    .to_owned(),
                matches
                    .get_one::<String>("rewrite-to")
                    .expect("clap should have set a default value")
                    .to_owned(),
            ),
        };

        let log_level = matches
            .get_one::<String>("log-level")
            .expect("clap should have set a default value")
            .to_owned();
        let log_fmt = matches
            .get_one::<String>("log-fmt")
            .expect("clap should have set a default value")
            .to_owned();
        let log_no_color = matches
            .get_one::<bool>("log-no-color")
            .expect("clap should have set a default value")
            .to_owned();

        Ok(Self {
            addr,
            tls_config,
            settings,
            log_level,
            log_fmt,
            log_no_color,
        })
    }
}

fn api_bind_address(matches: &ArgMatches) -> Result<SocketAddr> {
    format!(
        "{}:{}",
        matches.get_one::<String>("address").unwrap(),
        matches.get_one::<String>("port").unwrap()
    )
    .parse()
    .map_err(|e| anyhow!("error parsing arguments: {}", e))
}

fn tls_files(matches: &ArgMatches) -> Result<(String, String)> {
    let cert_file = matches.get_one::<String>("cert-file").unwrap().to_owned();
    let key_file = matches.get_one::<String>("key-file").unwrap().to_owned();
    if cert_file.is_empty() != key_file.is_empty() {
        Err(anyhow!("error parsing arguments: either both --cert-file and --key-file must be provided, or neither"))
    } else {
        Ok((cert_file, key_file))
    }
}
