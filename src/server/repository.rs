use crate::core::query::query;
use crate::domain::model::{FilterSpec, NewService, ServiceId, ServiceRecord};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// In-memory datastore behind the catalog API. Nothing survives a restart.
#[derive(Debug)]
pub struct ServiceRepository {
    services: RwLock<Vec<ServiceRecord>>,
    next_id: AtomicU64,
}

impl ServiceRepository {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Start from `records`; new ids continue above the highest numeric id.
    pub fn with_records(records: Vec<ServiceRecord>) -> Self {
        let highest = records
            .iter()
            .filter_map(|r| r.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            services: RwLock::new(records),
            next_id: AtomicU64::new(highest.saturating_add(1)),
        }
    }

    pub fn seeded() -> Self {
        Self::with_records(sample_services())
    }

    pub async fn list(&self, spec: &FilterSpec) -> Vec<ServiceRecord> {
        let services = self.services.read().await;
        query(&services, spec)
    }

    pub async fn get(&self, id: &ServiceId) -> Option<ServiceRecord> {
        let services = self.services.read().await;
        services.iter().find(|s| &s.id == id).cloned()
    }

    pub async fn create(&self, new: NewService) -> Result<ServiceRecord> {
        new.validate()?;

        let id = ServiceId::from(self.next_id.fetch_add(1, Ordering::SeqCst));
        let mut record = ServiceRecord::from_new(id, new);
        if record.created_at.is_none() {
            record.created_at = Some(json!(chrono::Utc::now().to_rfc3339()));
        }

        self.services.write().await.push(record.clone());
        Ok(record)
    }

    /// Returns whether a record was removed.
    pub async fn delete(&self, id: &ServiceId) -> bool {
        let mut services = self.services.write().await;
        let before = services.len();
        services.retain(|s| &s.id != id);
        services.len() != before
    }

    pub async fn len(&self) -> usize {
        self.services.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for ServiceRepository {
    fn default() -> Self {
        Self::new()
    }
}

pub fn sample_services() -> Vec<ServiceRecord> {
    let seed = json!([
        {
            "id": 1,
            "title": "Room Cleaning",
            "description": "Daily hostel room cleaning service",
            "price": 30,
            "category": "Household",
            "university": "UG",
            "hostel": "Pent",
            "createdAt": "2025-08-29"
        },
        {
            "id": 2,
            "title": "Tutoring",
            "description": "Maths tutoring for SHS students",
            "price": 50,
            "category": "Education",
            "university": "KNUST",
            "hostel": "SRC",
            "createdAt": "2025-08-28"
        }
    ]);
    serde_json::from_value(seed).unwrap_or_default()
}
