//! Client health checks

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse health state of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unreachable,
}

/// Point-in-time health report for a chaincode client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientHealth {
    pub status: HealthStatus,
    /// Round-trip latency of the probe, when one was made
    pub latency_ms: Option<u64>,
    /// Human-readable detail, populated for non-healthy states
    pub message: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl ClientHealth {
    /// Creates a healthy report
    pub fn healthy(latency_ms: Option<u64>) -> Self {
        Self {
            status: HealthStatus::Healthy,
            latency_ms,
            message: None,
            checked_at: Utc::now(),
        }
    }

    /// Creates a degraded report
    pub fn degraded(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Degraded,
            latency_ms: None,
            message: Some(message.into()),
            checked_at: Utc::now(),
        }
    }

    /// Creates an unreachable report
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unreachable,
            latency_ms: None,
            message: Some(message.into()),
            checked_at: Utc::now(),
        }
    }

    /// Returns true when the client can serve calls
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// Implemented by clients that can probe their own connectivity.
#[async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> ClientHealth;
}
