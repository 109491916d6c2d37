use serde::Serialize;

pub const UDP_HEADER_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UDPHeader {
    pub source_port: u16,
    pub destination_port: u16,
    pub length: u16,
    pub checksum: u16,
}

impl UDPHeader {
    /// 返すペイロードはバッファの終端まで。length フィールドでは切り詰めない
    pub fn parse(data: &[u8]) -> Option<(Self, &[u8])> {
        if data.len() < UDP_HEADER_LEN {
            return None;
        }

        let source_port = u16::from_be_bytes([data[0], data[1]]);
        let destination_port = u16::from_be_bytes([data[2], data[3]]);
        let length = u16::from_be_bytes([data[4], data[5]]);
        let checksum = u16::from_be_bytes([data[6], data[7]]);

        Some((
            Self {
                source_port,
                destination_port,
                length,
                checksum,
            },
            &data[UDP_HEADER_LEN..],
        ))
    }

    /// length フィールドが示す範囲に収めたペイロード
    pub fn declared_payload<'a>(&self, payload: &'a [u8]) -> &'a [u8] {
        let declared = usize::from(self.length).saturating_sub(UDP_HEADER_LEN);
        &payload[..declared.min(payload.len())]
    }
}
