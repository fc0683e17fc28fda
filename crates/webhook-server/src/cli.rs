use clap::builder::PossibleValue;
use clap::{crate_description, crate_name, crate_version, Arg, ArgAction, Command};
use mount_rewriter::settings::{
    DEFAULT_LABEL_KEY, DEFAULT_LABEL_VALUE, DEFAULT_REWRITE_FROM, DEFAULT_REWRITE_TO,
};

pub fn build_cli() -> Command {
    let args = vec![
        Arg::new("log-level")
            .long("log-level")
            .value_name("LOG_LEVEL")
            .env("LOG_LEVEL")
            .default_value("info")
            .value_parser([
                PossibleValue::new("trace"),
                PossibleValue::new("debug"),
                PossibleValue::new("info"),
                PossibleValue::new("warn"),
                PossibleValue::new("error"),
            ])
            .help("Log level"),
        Arg::new("log-fmt")
            .long("log-fmt")
            .value_name("LOG_FMT")
            .env("LOG_FMT")
            .default_value("text")
            .value_parser([PossibleValue::new("text"), PossibleValue::new("json")])
            .help("Log output format"),
        Arg::new("log-no-color")
            .long("log-no-color")
            .env("NO_COLOR")
            .action(ArgAction::SetTrue)
            .help("Disable colored output for logs"),
        Arg::new("address")
            .long("addr")
            .value_name("BIND_ADDRESS")
            .default_value("0.0.0.0")
            .env("BIND_ADDRESS")
            .help("Bind against ADDRESS"),
        Arg::new("port")
            .long("port")
            .value_name("PORT")
            .default_value("8443")
            .env("PORT")
            .help("Listen on PORT"),
        Arg::new("cert-file")
            .long("cert-file")
            .value_name("CERT_FILE")
            .default_value("")
            .env("CERT_FILE")
            .help("Path to an X.509 certificate file for HTTPS"),
        Arg::new("key-file")
            .long("key-file")
            .value_name("KEY_FILE")
            .default_value("")
            .env("KEY_FILE")
            .help("Path to an X.509 private key file for HTTPS"),
        Arg::new("label-key")
            .long("label-key")
            .value_name("TARGET_LABEL_KEY")
            .default_value(DEFAULT_LABEL_KEY)
            .env("TARGET_LABEL_KEY")
            .help("Label key a resource must carry to opt into mount rewriting"),
        Arg::new("label-value")
            .long("label-value")
            .value_name("TARGET_LABEL_VALUE")
            .default_value(DEFAULT_LABEL_VALUE)
            .env("TARGET_LABEL_VALUE")
            .help("Label value a resource must carry to opt into mount rewriting"),
        Arg::new("rewrite-from")
            .long("rewrite-from")
            .value_name("REWRITE_FROM")
            .default_value(DEFAULT_REWRITE_FROM)
            .env("REWRITE_FROM")
            .help("Source path prefix to rewrite"),
        Arg::new("rewrite-to")
            .long("rewrite-to")
            .value_name("REWRITE_TO")
            .default_value(DEFAULT_REWRITE_TO)
            .env("REWRITE_TO")
            .help("Destination path prefix mounts are redirected to"),
    ];

    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .args(args)
}
