use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

use super::WISHES_FILE;
use crate::domain::models::Wish;
use crate::storage::connection::FileConnection;
use crate::storage::records::{convert_records, WishRecord};
use crate::storage::traits::WishStorage;

/// JSON-backed wish repository (`wishes.json`)
#[derive(Debug, Clone)]
pub struct WishRepository {
    connection: FileConnection,
}

impl WishRepository {
    pub fn new(connection: FileConnection) -> Self {
        Self { connection }
    }

    fn wishes_file_path(&self) -> PathBuf {
        self.connection.file_path(WISHES_FILE)
    }
}

impl WishStorage for WishRepository {
    fn load_wishes(&self) -> Result<Vec<Wish>> {
        let path = self.wishes_file_path();
        let content = match self.connection.read_if_exists(&path)? {
            Some(content) if !content.trim().is_empty() => content,
            _ => return Ok(Vec::new()),
        };

        let records: Vec<WishRecord> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        let wishes = convert_records(records, "wish");

        debug!("Loaded {} wishes from {:?}", wishes.len(), path);
        Ok(wishes)
    }

    fn save_wishes(&self, wishes: &[Wish]) -> Result<()> {
        let records: Vec<WishRecord> = wishes.iter().map(WishRecord::from).collect();
        let json = serde_json::to_string_pretty(&records)?;

        let path = self.wishes_file_path();
        self.connection.write_atomic(&path, json.as_bytes())?;

        info!("Saved {} wishes to {:?}", wishes.len(), path);
        Ok(())
    }
}
