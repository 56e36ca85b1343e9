//! RoomId の生成

use rand::Rng;

use super::{error::ValueObjectError, value_object::RoomId};

/// 生成する RoomId の下限（先頭桁が 0 にならない）
pub const ROOM_ID_MIN: u16 = 1000;

/// 生成する RoomId の上限
pub const ROOM_ID_MAX: u16 = 9999;

/// RoomId の候補を生成するファクトリ
///
/// 候補は `ROOM_ID_MIN..=ROOM_ID_MAX` から一様に選ばれます。
/// 一意性は保証しません。空き確認と確保は Repository の `insert_if_absent` が担います。
pub struct RoomIdFactory;

impl RoomIdFactory {
    /// スレッドローカルな乱数で候補を生成
    pub fn generate() -> Result<RoomId, ValueObjectError> {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// 指定した乱数源で候補を生成
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Result<RoomId, ValueObjectError> {
        RoomId::from_number(rng.gen_range(ROOM_ID_MIN..=ROOM_ID_MAX))
    }
}
