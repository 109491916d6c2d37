use pnet::packet::ip::IpNextHeaderProtocols;
use serde::{Serialize, Serializer};
use std::net::Ipv4Addr;

pub const IPV4_MIN_HEADER_LEN: usize = 20;
pub const IP_PROTOCOL_UDP: u8 = IpNextHeaderProtocols::Udp.0;
/// IPv4 over IPv4 (IP-in-IP)
pub const IP_PROTOCOL_IPIP: u8 = IpNextHeaderProtocols::Ipv4.0;

/// デコード済みIPv4ヘッダー。アドレスは元のバッファを借用する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IPv4Header<'a> {
    pub version: u8,
    pub ihl: u8,
    pub tos: u8,
    pub total_length: u16,
    pub identification: u16,
    pub flags: u8,
    pub fragment_offset: u16,
    pub ttl: u8,
    pub protocol: u8,
    // 検証はしない
    pub checksum: u16,
    #[serde(serialize_with = "serialize_addr")]
    pub source: &'a [u8; 4],
    #[serde(serialize_with = "serialize_addr")]
    pub destination: &'a [u8; 4],
}

fn serialize_addr<S: Serializer>(addr: &&[u8; 4], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&Ipv4Addr::from(**addr))
}

impl<'a> IPv4Header<'a> {
    /// 20バイト未満なら `None`。戻り値のペイロードは total length とバッファ長の
    /// 小さい方で終わり、開始位置 (IHL*4) は終端を超えない
    pub fn parse(data: &'a [u8]) -> Option<(Self, &'a [u8])> {
        if data.len() < IPV4_MIN_HEADER_LEN {
            return None;
        }

        let version = data[0] >> 4;
        let ihl = data[0] & 0x0f;
        let tos = data[1];
        let total_length = u16::from_be_bytes([data[2], data[3]]);
        let identification = u16::from_be_bytes([data[4], data[5]]);
        let flags_fragment = u16::from_be_bytes([data[6], data[7]]);
        let flags = (flags_fragment >> 13) as u8;
        let fragment_offset = flags_fragment & 0x1fff;
        let ttl = data[8];
        let protocol = data[9];
        let checksum = u16::from_be_bytes([data[10], data[11]]);
        let source: &'a [u8; 4] = data[12..16].try_into().ok()?;
        let destination: &'a [u8; 4] = data[16..20].try_into().ok()?;

        // キャプチャがヘッダーの申告より短いことがある
        let end = usize::from(total_length).min(data.len());
        let start = (usize::from(ihl) * 4).min(end);

        Some((
            Self {
                version,
                ihl,
                tos,
                total_length,
                identification,
                flags,
                fragment_offset,
                ttl,
                protocol,
                checksum,
                source,
                destination,
            },
            &data[start..end],
        ))
    }

    pub fn header_len(&self) -> usize {
        usize::from(self.ihl) * 4
    }

    pub fn source_addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(*self.source)
    }

    pub fn destination_addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(*self.destination)
    }
}
