use crate::config::DecoderConfig;
use crate::error::InitProcessError;
use crate::input::CapturedPacket;
use chrono::{DateTime, SubsecRound, Utc};
use log::{debug, warn};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub decoded: usize,
    pub rejected: usize,
}

/// キャプチャ時刻の既定値。マイクロ秒精度に揃える
pub fn capture_time_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// 1行1パケットでデコードし、結果をJSONで1行ずつ書き出す。
/// 不正な行は警告を出して読み飛ばし、入出力のエラーだけを返す
pub fn packet_analysis<R: BufRead, W: Write>(
    reader: R,
    mut out: W,
    config: &DecoderConfig,
) -> Result<AnalysisSummary, InitProcessError> {
    let mut summary = AnalysisSummary::default();

    for (index, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let line_number = index + 1;

        let text = match std::str::from_utf8(&line) {
            Ok(text) => text,
            Err(e) => {
                warn!("{}行目を読み飛ばします: UTF-8ではありません: {}", line_number, e);
                summary.rejected += 1;
                continue;
            }
        };

        let captured = match CapturedPacket::parse_line(text) {
            Ok(captured) => captured,
            Err(e) => {
                warn!("{}行目を読み飛ばします: {}", line_number, e);
                summary.rejected += 1;
                continue;
            }
        };

        let mut record = match captured.record(capture_time_now()) {
            Ok(record) => record,
            Err(e) => {
                warn!("{}行目を読み飛ばします: {}", line_number, e);
                summary.rejected += 1;
                continue;
            }
        };

        if let Err(e) = record.decode_with(config) {
            warn!("{}行目のパケットを破棄します: {}", line_number, e);
            summary.rejected += 1;
            continue;
        }

        debug!(
            "{}行目: {} -> {} type=0x{:04x}",
            line_number,
            record.source_mac_addr(),
            record.destination_mac_addr(),
            record.link_type
        );
        if let Some(udp) = record.udp_header {
            let declared = udp.declared_payload(record.payload).len();
            if declared != record.payload.len() {
                debug!(
                    "{}行目: UDP length は {} バイトだがペイロードは {} バイト",
                    line_number,
                    declared,
                    record.payload.len()
                );
            }
        }

        serde_json::to_writer(&mut out, &record)?;
        writeln!(out)?;
        summary.decoded += 1;
    }

    out.flush()?;

    Ok(summary)
}
