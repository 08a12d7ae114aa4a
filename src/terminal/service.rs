use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::db::models::Terminal;
use crate::db::store::{TerminalKey, TerminalStore};
use crate::error::{AppError, StoreError};
use crate::response::PageMetadata;
use crate::terminal::models::{CreateTerminalRequest, TerminalResponse, UpdateTerminalRequest};
use crate::validation::validate_request;

pub struct TerminalService {
    terminals: Arc<dyn TerminalStore>,
}

impl TerminalService {
    pub fn new(terminals: Arc<dyn TerminalStore>) -> Self {
        Self { terminals }
    }

    /// Bounded, newest-first page of non-deleted terminals plus paging
    /// metadata. Page and size must both be at least 1.
    pub async fn find_all(
        &self,
        page: i64,
        size: i64,
    ) -> Result<(Vec<TerminalResponse>, PageMetadata), AppError> {
        if page < 1 || size < 1 {
            let mut fields = HashMap::new();
            if page < 1 {
                fields.insert("page".to_string(), "must be at least 1".to_string());
            }
            if size < 1 {
                fields.insert("size".to_string(), "must be at least 1".to_string());
            }
            return Err(AppError::InvalidParams(fields));
        }

        let (rows, total_item) = self.terminals.list(page, size).await?;
        let paging = PageMetadata::new(page, size, total_item);
        let items = rows.iter().map(TerminalResponse::from).collect();
        Ok((items, paging))
    }

    pub async fn create(&self, request: &CreateTerminalRequest) -> Result<TerminalResponse, AppError> {
        validate_request(request)?;

        // Names are unique among live terminals.
        let existing = self
            .terminals
            .count_by(&TerminalKey::Name(request.name.clone()))
            .await?;
        if existing > 0 {
            return Err(AppError::Store(StoreError::ConstraintViolation(format!(
                "terminal named {:?} already exists",
                request.name
            ))));
        }

        let record = Terminal::new(request.name.clone(), request.location.clone());
        let created = self.terminals.create(&record).await?;
        info!("created terminal {}", created.id);
        Ok(TerminalResponse::from(&created))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<TerminalResponse, AppError> {
        match self.terminals.find_by(&TerminalKey::Id(id)).await {
            Ok(terminal) => Ok(TerminalResponse::from(&terminal)),
            Err(StoreError::NotFound) => Err(AppError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn update(
        &self,
        id: i64,
        request: &UpdateTerminalRequest,
    ) -> Result<TerminalResponse, AppError> {
        validate_request(request)?;

        let mut record = match self.terminals.find_by(&TerminalKey::Id(id)).await {
            Ok(terminal) => terminal,
            Err(StoreError::NotFound) => return Err(AppError::NotFound),
            Err(e) => return Err(e.into()),
        };

        record.name = request.name.clone();
        record.location = request.location.clone();
        record.updated_at = Utc::now();

        match self.terminals.update(&record).await {
            Ok(updated) => {
                info!("updated terminal {}", updated.id);
                Ok(TerminalResponse::from(&updated))
            }
            Err(StoreError::NotFound) => Err(AppError::NotFound),
            Err(e) => Err(e.into()),
        }
    }
}
