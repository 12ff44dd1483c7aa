// SPDX-FileCopyrightText: 2025 GameTip Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Health check types for chain adapters

use serde::{Deserialize, Serialize};

/// Health status of a chain adapter's upstream endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum HealthStatus {
    /// Upstream is healthy and operational
    Up,
    /// Upstream is degraded but still functional
    Degraded { reason: String },
    /// Upstream is down and not functional
    Down { reason: String },
}

impl HealthStatus {
    /// Check if this status indicates the upstream is usable
    pub fn is_available(&self) -> bool {
        matches!(self, HealthStatus::Up | HealthStatus::Degraded { .. })
    }

    /// Check if this status indicates the upstream is completely down
    pub fn is_down(&self) -> bool {
        matches!(self, HealthStatus::Down { .. })
    }

    /// Get a human-readable description of the status
    pub fn description(&self) -> &str {
        match self {
            HealthStatus::Up => "upstream is healthy",
            HealthStatus::Degraded { reason } | HealthStatus::Down { reason } => reason,
        }
    }
}
