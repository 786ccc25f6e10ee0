use crate::domain::{booking::ItemSnapshot, value_objects::ItemId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// アイテムカタログポート
///
/// 予約コンテキストとカタログコンテキストの境界を維持する。
/// 所有者と貸出可否のみを参照し、アイテムの可変状態は複製しない。
#[async_trait]
pub trait ItemCatalog: Send + Sync {
    /// アイテムの所有者と貸出可否を取得する
    ///
    /// 存在しない場合は`None`。
    async fn get(&self, item_id: ItemId) -> Result<Option<ItemSnapshot>>;
}
