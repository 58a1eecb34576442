use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::models::analytics::{DashboardSummary, ReportSummary};
use crate::services::analytics_service::AnalyticsService;
use crate::utils::errors::AppError;

pub struct ReportController {
    analytics: AnalyticsService,
}

impl ReportController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            analytics: AnalyticsService::new(pool),
        }
    }

    pub async fn dashboard(&self, today: NaiveDate) -> Result<DashboardSummary, AppError> {
        self.analytics.dashboard(today).await
    }

    pub async fn reports(&self) -> Result<ReportSummary, AppError> {
        self.analytics.report().await
    }
}
