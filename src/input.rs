use crate::error::InputError;
use crate::network::{capture_time_from_timeval, PacketRecord};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};

/// 標準入力の1行分。`<base64>` か `<秒>.<マイクロ秒> <元の長さ> <base64>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPacket {
    pub data: Vec<u8>,
    pub capture_time: Option<DateTime<Utc>>,
    pub original_length: Option<u32>,
}

impl CapturedPacket {
    pub fn parse_line(line: &str) -> Result<Self, InputError> {
        let fields: Vec<&str> = line.split_whitespace().collect();

        let (capture_time, original_length, encoded) = match fields.as_slice() {
            [] => return Err(InputError::EmptyLine),
            [encoded] => (None, None, *encoded),
            [timestamp, original_length, encoded] => {
                let original_length = original_length.parse::<u32>().map_err(|e| {
                    InputError::OriginalLength(format!("{}: {}", original_length, e))
                })?;
                (Some(parse_timestamp(timestamp)?), Some(original_length), *encoded)
            }
            other => return Err(InputError::FieldCount(other.len())),
        };

        let data = STANDARD
            .decode(encoded)
            .map_err(|e| InputError::Base64(e.to_string()))?;

        Ok(Self {
            data,
            capture_time,
            original_length,
        })
    }

    /// 時刻が無ければ `now`、元の長さが無ければキャプチャ長を使う
    pub fn record(&self, now: DateTime<Utc>) -> Result<PacketRecord<'_>, InputError> {
        let captured_length =
            u32::try_from(self.data.len()).map_err(|_| InputError::TooLarge(self.data.len()))?;

        Ok(PacketRecord::new(
            &self.data,
            self.capture_time.unwrap_or(now),
            captured_length,
            self.original_length.unwrap_or(captured_length),
        ))
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, InputError> {
    let invalid = || InputError::Timestamp(value.to_string());

    let (sec_text, frac) = value.split_once('.').unwrap_or((value, "0"));
    let mut sec = sec_text.parse::<i64>().map_err(|_| invalid())?;

    if frac.is_empty() || frac.len() > 6 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    // 小数部を6桁に揃えてマイクロ秒にする
    let mut usec = frac.parse::<u32>().map_err(|_| invalid())? * 10u32.pow(6 - frac.len() as u32);

    // 負の時刻では小数部も負の向きに効く (-1.5 は -2 秒 + 0.5 秒)
    if sec_text.starts_with('-') && usec > 0 {
        sec = sec.checked_sub(1).ok_or_else(invalid)?;
        usec = 1_000_000 - usec;
    }

    capture_time_from_timeval(sec, usec).ok_or_else(invalid)
}
