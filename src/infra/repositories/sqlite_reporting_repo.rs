use crate::domain::models::booking::Booking;
use crate::domain::models::reporting::{
    MonthCount, MonthRevenue, PeriodCounts, PlatformStats, PlatformTrends, StatusCount,
    TypeCount, UserAnalytics, VendorAnalytics,
};
use crate::domain::ports::ReportingRepository;
use crate::domain::services::reporting::{month_start, months_back};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

pub struct SqliteReportingRepo {
    pool: SqlitePool,
}

impl SqliteReportingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn count(&self, sql: &str) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(sql).fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn period_counts(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<PeriodCounts, AppError> {
        let users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts WHERE created_at >= ? AND created_at < ?")
            .bind(start).bind(end).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        let bookings = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings WHERE created_at >= ? AND created_at < ?")
            .bind(start).bind(end).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        let revenue = sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(amount), 0.0) FROM bookings WHERE status = 'CONFIRMED' AND created_at >= ? AND created_at < ?"
        )
            .bind(start).bind(end).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(PeriodCounts { users, bookings, revenue })
    }
}

#[async_trait]
impl ReportingRepository for SqliteReportingRepo {
    async fn platform_stats(&self) -> Result<PlatformStats, AppError> {
        let now = Utc::now();
        let cur_start = month_start(now);
        let prev_start = months_back(now, 1);

        let total_users = self.count("SELECT COUNT(*) FROM accounts").await?;
        let total_vendors = self.count("SELECT COUNT(*) FROM vendors").await?;
        let total_events = self.count("SELECT COUNT(*) FROM events").await?;
        let total_bookings = self.count("SELECT COUNT(*) FROM bookings").await?;
        let total_revenue = sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(amount), 0.0) FROM bookings WHERE status = 'CONFIRMED'"
        )
            .fetch_one(&self.pool).await.map_err(AppError::Database)?;

        Ok(PlatformStats {
            total_users,
            total_vendors,
            total_events,
            total_bookings,
            total_revenue,
            current_month: self.period_counts(cur_start, now + Duration::days(1)).await?,
            previous_month: self.period_counts(prev_start, cur_start).await?,
        })
    }

    async fn platform_trends(&self, months: i64) -> Result<PlatformTrends, AppError> {
        let since = months_back(Utc::now(), (months - 1).max(0) as u32);

        let monthly_signups = sqlx::query_as::<_, MonthCount>(
            "SELECT strftime('%Y-%m', created_at) AS month, COUNT(*) AS count
             FROM accounts WHERE created_at >= ? GROUP BY month ORDER BY month"
        )
            .bind(since).fetch_all(&self.pool).await.map_err(AppError::Database)?;

        let monthly_bookings = sqlx::query_as::<_, MonthCount>(
            "SELECT strftime('%Y-%m', created_at) AS month, COUNT(*) AS count
             FROM bookings WHERE created_at >= ? GROUP BY month ORDER BY month"
        )
            .bind(since).fetch_all(&self.pool).await.map_err(AppError::Database)?;

        let monthly_revenue = sqlx::query_as::<_, MonthRevenue>(
            "SELECT strftime('%Y-%m', created_at) AS month, COALESCE(SUM(amount), 0.0) AS revenue
             FROM bookings WHERE status = 'CONFIRMED' AND created_at >= ? GROUP BY month ORDER BY month"
        )
            .bind(since).fetch_all(&self.pool).await.map_err(AppError::Database)?;

        Ok(PlatformTrends { monthly_signups, monthly_bookings, monthly_revenue })
    }

    async fn user_analytics(&self, account_id: &str) -> Result<UserAnalytics, AppError> {
        let year_ago = Utc::now() - Duration::days(365);
        let today = Utc::now().date_naive();

        let events_by_status = sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM events WHERE account_id = ? GROUP BY status"
        )
            .bind(account_id).fetch_all(&self.pool).await.map_err(AppError::Database)?;

        let bookings_by_status = sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM bookings WHERE account_id = ? GROUP BY status"
        )
            .bind(account_id).fetch_all(&self.pool).await.map_err(AppError::Database)?;

        let revenue_spent = sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(amount), 0.0) FROM bookings WHERE account_id = ? AND status = 'CONFIRMED'"
        )
            .bind(account_id).fetch_one(&self.pool).await.map_err(AppError::Database)?;

        let monthly_events = sqlx::query_as::<_, MonthCount>(
            "SELECT strftime('%Y-%m', created_at) AS month, COUNT(*) AS count
             FROM events WHERE account_id = ? AND created_at >= ? GROUP BY month ORDER BY month"
        )
            .bind(account_id).bind(year_ago).fetch_all(&self.pool).await.map_err(AppError::Database)?;

        let average_budget = sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(AVG(budget), 0.0) FROM events WHERE account_id = ?"
        )
            .bind(account_id).fetch_one(&self.pool).await.map_err(AppError::Database)?;

        let top_event_types = sqlx::query_as::<_, TypeCount>(
            "SELECT event_type, COUNT(*) AS count FROM events WHERE account_id = ?
             GROUP BY event_type ORDER BY count DESC LIMIT 5"
        )
            .bind(account_id).fetch_all(&self.pool).await.map_err(AppError::Database)?;

        let upcoming_events = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM events WHERE account_id = ? AND event_date >= ? AND status != 'CANCELLED'"
        )
            .bind(account_id).bind(today).fetch_one(&self.pool).await.map_err(AppError::Database)?;

        Ok(UserAnalytics {
            events_by_status,
            bookings_by_status,
            revenue_spent,
            monthly_events,
            average_budget,
            top_event_types,
            upcoming_events,
        })
    }

    async fn vendor_analytics(&self, vendor_id: &str) -> Result<VendorAnalytics, AppError> {
        let year_ago = Utc::now() - Duration::days(365);

        let bookings_by_status = sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS count FROM bookings WHERE vendor_id = ? GROUP BY status"
        )
            .bind(vendor_id).fetch_all(&self.pool).await.map_err(AppError::Database)?;

        let revenue_earned = sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(amount), 0.0) FROM bookings WHERE vendor_id = ? AND status = 'CONFIRMED'"
        )
            .bind(vendor_id).fetch_one(&self.pool).await.map_err(AppError::Database)?;

        let monthly_bookings = sqlx::query_as::<_, MonthCount>(
            "SELECT strftime('%Y-%m', created_at) AS month, COUNT(*) AS count
             FROM bookings WHERE vendor_id = ? AND created_at >= ? GROUP BY month ORDER BY month"
        )
            .bind(vendor_id).bind(year_ago).fetch_all(&self.pool).await.map_err(AppError::Database)?;

        let recent_bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE vendor_id = ? ORDER BY created_at DESC LIMIT 10"
        )
            .bind(vendor_id).fetch_all(&self.pool).await.map_err(AppError::Database)?;

        let (rating, review_count) = sqlx::query_as::<_, (f64, i64)>(
            "SELECT rating, review_count FROM vendors WHERE id = ?"
        )
            .bind(vendor_id).fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .unwrap_or((0.0, 0));

        Ok(VendorAnalytics {
            bookings_by_status,
            revenue_earned,
            monthly_bookings,
            recent_bookings,
            rating,
            review_count,
        })
    }
}
