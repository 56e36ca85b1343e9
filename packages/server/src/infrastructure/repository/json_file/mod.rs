//! JSON ファイルをドキュメントストアとして使う Repository 実装

pub mod room;

pub use room::JsonFileRoomRepository;
