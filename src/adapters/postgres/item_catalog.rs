use crate::domain::{
    booking::ItemSnapshot,
    value_objects::{ItemId, UserId},
};
use crate::ports::item_catalog::{ItemCatalog as ItemCatalogTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row};

/// ItemCatalogのPostgreSQL実装
///
/// カタログコンテキストの`items`テーブルから所有者と貸出可否のみを読む。
pub struct ItemCatalog {
    pool: PgPool,
}

impl ItemCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemCatalogTrait for ItemCatalog {
    async fn get(&self, item_id: ItemId) -> Result<Option<ItemSnapshot>> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, available
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(item_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| ItemSnapshot {
            item_id: ItemId::new(row.get("id")),
            owner_id: UserId::new(row.get("owner_id")),
            available: row.get("available"),
        }))
    }
}
