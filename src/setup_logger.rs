use crate::config::LoggingConfig;
use env_logger::{Builder, Target};
use std::fs::File;
use std::io::Write;

pub fn setup_logger(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut builder = Builder::new();

    builder
        // ログレベルの設定
        .filter_level(config.level)
        // タイムスタンプ付きのフォーマット
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        });

    // 標準出力はデコード結果に使うので、ログはファイルか標準エラーへ
    match &config.file {
        Some(path) => {
            let file = File::create(path)?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    builder.try_init()?;

    Ok(())
}
