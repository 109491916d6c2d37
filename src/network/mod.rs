pub mod packet;

pub use packet::{capture_time_from_timeval, PacketRecord};
