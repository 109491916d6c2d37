use log::{debug, info};
use packet_decoder::error::InitProcessError;
use packet_decoder::packet_analysis::packet_analysis;
use packet_decoder::setup_logger::setup_logger;
use packet_decoder::AppConfig;
use std::io;

fn main() -> Result<(), InitProcessError> {
    let config = AppConfig::from_env()?;

    setup_logger(&config.logging).map_err(|e| InitProcessError::LoggerError(e.to_string()))?;
    debug!("設定を読み込みました: {:?}", config);

    let stdin = io::stdin();
    let stdout = io::stdout();

    let summary = packet_analysis(stdin.lock(), stdout.lock(), &config.decoder)?;
    info!(
        "デコード完了: 成功 {} 件, 破棄 {} 件",
        summary.decoded, summary.rejected
    );

    Ok(())
}
