use pnet::packet::ethernet::EtherTypes;

pub const ETHERNET_HEADER_LEN: usize = 14;
pub const ETHERTYPE_IPV4: u16 = EtherTypes::Ipv4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetHeader {
    pub destination: u64,
    pub source: u64,
    pub ethertype: u16,
}

/// 6バイトのMACアドレスを先頭バイトが最上位の48ビット整数にまとめる
pub fn mac_from_6_bytes(bytes: &[u8; 6]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |mac, &byte| (mac << 8) | u64::from(byte))
}

impl EthernetHeader {
    /// ヘッダーの後ろに1バイトもないフレームは不正として扱う
    pub fn parse(data: &[u8]) -> Option<(Self, &[u8])> {
        if data.len() <= ETHERNET_HEADER_LEN {
            return None;
        }

        let destination: &[u8; 6] = data[0..6].try_into().ok()?;
        let source: &[u8; 6] = data[6..12].try_into().ok()?;
        let ethertype = u16::from_be_bytes([data[12], data[13]]);

        Some((
            Self {
                destination: mac_from_6_bytes(destination),
                source: mac_from_6_bytes(source),
                ethertype,
            },
            &data[ETHERNET_HEADER_LEN..],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mac_from_6_bytes() {
        assert_eq!(
            mac_from_6_bytes(&[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]),
            0x0011_2233_4455
        );
        assert_eq!(
            mac_from_6_bytes(&[0xff, 0xff, 0xff, 0xff, 0xff, 0xff]),
            0xffff_ffff_ffff
        );
        assert_eq!(mac_from_6_bytes(&[0x80, 0, 0, 0, 0, 0x01]), 0x8000_0000_0001);
    }

    #[test]
    fn test_parse_ethernet() {
        let frame = [
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, // Dst MAC
            0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, // Src MAC
            0x08, 0x00, // EtherType: IPv4
            0xde, 0xad,
        ];

        let (header, rest) = EthernetHeader::parse(&frame).unwrap();
        assert_eq!(header.destination, 0x0011_2233_4455);
        assert_eq!(header.source, 0x6677_8899_aabb);
        assert_eq!(header.ethertype, ETHERTYPE_IPV4);
        assert_eq!(rest, &[0xde, 0xad]);
    }

    #[test]
    fn test_parse_rejects_header_only_frame() {
        assert!(EthernetHeader::parse(&[]).is_none());
        assert!(EthernetHeader::parse(&[0u8; 13]).is_none());
        assert!(EthernetHeader::parse(&[0u8; 14]).is_none());
        assert!(EthernetHeader::parse(&[0u8; 15]).is_some());
    }
}
