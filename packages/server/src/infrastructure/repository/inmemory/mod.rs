//! インメモリ Repository 実装

pub mod room;
pub mod session;

pub use room::InMemoryRoomRepository;
pub use session::InMemorySessionRepository;
