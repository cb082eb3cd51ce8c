//! HTTP implementation of the store contract.

use std::time::Duration;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, Month, MonthMatrix, OtRecord, OverrideMap, StaffMember};

use super::protocol::{StoreRequest, StoreResponse};
use super::store::TimekeepingStore;

/// Remote store client posting action-tagged JSON to a single endpoint.
///
/// Every call is bounded by the configured timeout and never retried: the
/// operations are short, and duplicate check-ins are guarded by the store
/// itself, so a failure surfaces immediately and the caller decides what
/// to do with it.
#[derive(Debug, Clone)]
pub struct HttpStore {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpStore {
    /// Creates a client for the configured endpoint.
    pub fn new(config: &StoreConfig) -> EngineResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| EngineError::ClientInit {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    /// The endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts a request and decodes the response envelope.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: StoreRequest<'_>,
    ) -> EngineResult<StoreResponse<T>> {
        let action = request.action();
        let correlation_id = Uuid::new_v4();
        debug!(%correlation_id, action, "dispatching store request");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| EngineError::Network {
                action: action.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%correlation_id, action, %status, "store returned non-success status");
            return Err(EngineError::Network {
                action: action.to_string(),
                message: format!("HTTP {status}"),
            });
        }

        let envelope: StoreResponse<T> =
            response.json().await.map_err(|e| EngineError::Parse {
                action: action.to_string(),
                message: e.to_string(),
            })?;

        if !envelope.success {
            let message = envelope
                .error
                .clone()
                .unwrap_or_else(|| "unspecified store error".to_string());
            warn!(%correlation_id, action, %message, "store rejected request");
            return Err(EngineError::Rejected {
                action: action.to_string(),
                message,
            });
        }

        Ok(envelope)
    }

    /// Dispatches a fetch and requires a data payload.
    async fn call<T: DeserializeOwned>(&self, request: StoreRequest<'_>) -> EngineResult<T> {
        let action = request.action();
        self.dispatch(request)
            .await?
            .data
            .ok_or_else(|| EngineError::Parse {
                action: action.to_string(),
                message: "missing data payload".to_string(),
            })
    }

    /// Dispatches a mutation; any data payload is ignored.
    async fn call_ack(&self, request: StoreRequest<'_>) -> EngineResult<()> {
        self.dispatch::<serde_json::Value>(request).await.map(|_| ())
    }
}

impl TimekeepingStore for HttpStore {
    async fn fetch_staff(&self) -> EngineResult<Vec<StaffMember>> {
        self.call(StoreRequest::GetScheduleStaff).await
    }

    async fn save_staff(&self, staff: &[StaffMember]) -> EngineResult<()> {
        self.call_ack(StoreRequest::SaveScheduleStaff { staff }).await
    }

    async fn delete_staff(&self, identifier: &str, name: &str) -> EngineResult<()> {
        self.call_ack(StoreRequest::DeleteScheduleStaffMember { identifier, name })
            .await
    }

    async fn fetch_attendance(&self, month: Month) -> EngineResult<Vec<AttendanceRecord>> {
        self.call(StoreRequest::GetAttendance { month }).await
    }

    async fn check_in(&self, identifier: &str, name: &str) -> EngineResult<()> {
        self.call_ack(StoreRequest::CheckIn { identifier, name }).await
    }

    async fn check_out(&self, identifier: &str, name: &str) -> EngineResult<()> {
        self.call_ack(StoreRequest::CheckOut { identifier, name }).await
    }

    async fn fetch_ot(&self, month: Month) -> EngineResult<Vec<OtRecord>> {
        self.call(StoreRequest::GetOtAttendance { month }).await
    }

    async fn check_in_ot(&self, identifier: &str, name: &str) -> EngineResult<()> {
        self.call_ack(StoreRequest::CheckInOt { identifier, name }).await
    }

    async fn check_out_ot(&self, identifier: &str, name: &str) -> EngineResult<()> {
        self.call_ack(StoreRequest::CheckOutOt { identifier, name }).await
    }

    async fn fetch_holidays(&self, month: Month) -> EngineResult<Vec<NaiveDate>> {
        self.call(StoreRequest::GetHolidays { month }).await
    }

    async fn toggle_holiday(&self, date: NaiveDate) -> EngineResult<()> {
        self.call_ack(StoreRequest::ToggleHoliday { date }).await
    }

    async fn fetch_overrides(&self, month: Month) -> EngineResult<OverrideMap> {
        self.call(StoreRequest::GetManualTimekeeping { month }).await
    }

    async fn save_override(
        &self,
        month: Month,
        identifier: &str,
        day: u32,
        code: &str,
    ) -> EngineResult<()> {
        self.call_ack(StoreRequest::SaveManualTimekeeping {
            month,
            identifier,
            day,
            code,
        })
        .await
    }

    async fn save_matrix(&self, matrix: &MonthMatrix) -> EngineResult<()> {
        self.call_ack(StoreRequest::SaveFullMonthlyTable {
            month: matrix.month,
            matrix,
        })
        .await
    }
}
