pub mod ethernet;
pub mod ipv4;
pub mod udp;

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::network::packet::ethernet::{EthernetHeader, ETHERTYPE_IPV4};
use crate::network::packet::ipv4::{IPv4Header, IP_PROTOCOL_IPIP, IP_PROTOCOL_UDP};
use crate::network::packet::udp::UDPHeader;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use log::{debug, trace};
use pnet::util::MacAddr;
use serde::{Serialize, Serializer};

/// キャプチャした1パケット分のレコード。
///
/// `payload` と IPv4 アドレスは `raw_data` を借用したビューなので、
/// レコードが生きている間はバッファを解放・変更できない。
/// 保持したい場合は呼び出し側で `to_vec()` する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PacketRecord<'a> {
    pub capture_time: DateTime<Utc>,
    pub captured_length: u32,
    pub original_length: u32,
    #[serde(skip)]
    pub raw_data: &'a [u8],
    pub link_type: u16,
    pub destination_mac: u64,
    pub source_mac: u64,
    pub ip_header: Option<IPv4Header<'a>>,
    pub udp_header: Option<UDPHeader>,
    #[serde(serialize_with = "serialize_base64")]
    pub payload: &'a [u8],
}

fn serialize_base64<S: Serializer>(bytes: &&[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(bytes))
}

/// 秒 + マイクロ秒のキャプチャ時刻を UTC に変換する
pub fn capture_time_from_timeval(sec: i64, usec: u32) -> Option<DateTime<Utc>> {
    if usec >= 1_000_000 {
        return None;
    }
    DateTime::<Utc>::from_timestamp(sec, usec * 1_000)
}

// IPv4 層で最終的に残るもの
struct NetworkLayer<'a> {
    ip: IPv4Header<'a>,
    udp: Option<UDPHeader>,
    payload: &'a [u8],
}

impl<'a> PacketRecord<'a> {
    pub fn new(
        raw_data: &'a [u8],
        capture_time: DateTime<Utc>,
        captured_length: u32,
        original_length: u32,
    ) -> Self {
        Self {
            capture_time,
            captured_length,
            original_length,
            raw_data,
            link_type: 0,
            destination_mac: 0,
            source_mac: 0,
            ip_header: None,
            udp_header: None,
            payload: raw_data,
        }
    }

    pub fn decode(&mut self) -> Result<(), DecodeError> {
        self.decode_with(&DecoderConfig::default())
    }

    /// イーサネットヘッダーすら収まらないときだけエラー。それより深い層の
    /// 切り詰めや未知のプロトコルはそこでデコードを止めるだけ
    pub fn decode_with(&mut self, config: &DecoderConfig) -> Result<(), DecodeError> {
        let (ethernet, payload) =
            EthernetHeader::parse(self.raw_data).ok_or(DecodeError::MalformedHeader {
                length: self.raw_data.len(),
            })?;

        self.link_type = ethernet.ethertype;
        self.destination_mac = ethernet.destination;
        self.source_mac = ethernet.source;
        self.ip_header = None;
        self.udp_header = None;
        self.payload = payload;

        if ethernet.ethertype != ETHERTYPE_IPV4 {
            trace!("IPv4以外のEtherType 0x{:04x}: デコードを終了", ethernet.ethertype);
            return Ok(());
        }

        if let Some(layer) = decode_ipv4(payload, config.max_ip_in_ip_depth) {
            self.ip_header = Some(layer.ip);
            self.udp_header = layer.udp;
            self.payload = layer.payload;
        }

        Ok(())
    }

    pub fn destination_mac_addr(&self) -> MacAddr {
        mac_addr(self.destination_mac)
    }

    pub fn source_mac_addr(&self) -> MacAddr {
        mac_addr(self.source_mac)
    }

    pub fn is_truncated(&self) -> bool {
        self.captured_length < self.original_length
    }
}

fn mac_addr(mac: u64) -> MacAddr {
    let b = mac.to_be_bytes();
    MacAddr::new(b[2], b[3], b[4], b[5], b[6], b[7])
}

// IP-in-IP は内側のヘッダーで上書きする。内側が短すぎれば外側のまま
fn decode_ipv4(data: &[u8], remaining_depth: usize) -> Option<NetworkLayer<'_>> {
    let Some((ip, payload)) = IPv4Header::parse(data) else {
        trace!("IPv4ヘッダーが短すぎます: {} バイト", data.len());
        return None;
    };

    match ip.protocol {
        IP_PROTOCOL_UDP => {
            let Some((udp, udp_payload)) = UDPHeader::parse(payload) else {
                trace!("UDPヘッダーが短すぎます: {} バイト", payload.len());
                return Some(NetworkLayer { ip, udp: None, payload });
            };
            Some(NetworkLayer {
                ip,
                udp: Some(udp),
                payload: udp_payload,
            })
        }
        IP_PROTOCOL_IPIP if remaining_depth == 0 => {
            debug!("IP-in-IPのネストが上限に達したため展開を中止します");
            Some(NetworkLayer { ip, udp: None, payload })
        }
        IP_PROTOCOL_IPIP => Some(
            decode_ipv4(payload, remaining_depth - 1)
                .unwrap_or(NetworkLayer { ip, udp: None, payload }),
        ),
        protocol => {
            trace!("未対応のIPプロトコル {}: デコードを終了", protocol);
            Some(NetworkLayer { ip, udp: None, payload })
        }
    }
}
