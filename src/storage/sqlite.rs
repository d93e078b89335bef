use anyhow::Result;

use crate::db::Database;

use super::ReadLogStore;

impl ReadLogStore for Database {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        self.get_item(key.to_string()).await
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        self.set_item(key.to_string(), value.to_string()).await
    }
}
