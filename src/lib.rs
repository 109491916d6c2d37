//! イーサネット / IPv4 / UDP ヘッダーのデコーダー。
//!
//! キャプチャ済みの1パケット分のバイト列を [`PacketRecord`] に包み、
//! [`PacketRecord::decode`] でヘッダーを埋める。デコードはコピーせず、
//! ペイロードは元のバッファを借用したスライスになる。

pub mod config;
pub mod error;
pub mod input;
pub mod network;
pub mod packet_analysis;
pub mod setup_logger;

pub use config::{AppConfig, DecoderConfig};
pub use error::DecodeError;
pub use network::packet::ethernet::{mac_from_6_bytes, EthernetHeader};
pub use network::packet::ipv4::IPv4Header;
pub use network::packet::udp::UDPHeader;
pub use network::{capture_time_from_timeval, PacketRecord};
