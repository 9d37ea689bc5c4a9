//! ログ初期化
//!
//! `RUST_LOG` があればそれを優先し、なければ `--verbose` で debug、通常は warn。
//! 画面向けの出力は stdout、ログは stderr に分ける。

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "aadhaar_verify=debug,aadhaar_verify_common=debug"
    } else {
        "warn"
    }
}

pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // テストなどで二重に初期化されても無視する
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(false), "warn");
        assert!(default_level(true).contains("debug"));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(false);
        init_logging(true);
    }
}
