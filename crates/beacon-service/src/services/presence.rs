//! Presence service
//!
//! Records per-workspace user presence and answers liveness queries. Liveness
//! is computed at read time from `last_seen_at`; nothing derived is stored.

use std::time::Duration;

use beacon_core::{
    now_millis, DomainError, LivenessPolicy, PresenceRecord, PresenceStatus, UserName,
    WorkspaceId, MAX_INACTIVITY_THRESHOLD, MAX_LIVENESS_WINDOW,
};
use tracing::{debug, info, instrument};

use crate::dto::{PresenceResponse, UpdatePresenceRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Presence service
pub struct PresenceService<'a> {
    ctx: &'a ServiceContext,
}

/// Parse the `(workspace_id, user_name)` key of a record
fn parse_key(workspace_id: &str, user_name: &str) -> ServiceResult<(WorkspaceId, UserName)> {
    let workspace_id = WorkspaceId::parse(workspace_id).map_err(DomainError::from)?;
    let user_name = UserName::parse(user_name).map_err(DomainError::from)?;
    Ok((workspace_id, user_name))
}

/// Reject zero and over-long caller-supplied durations
fn check_duration(
    requested: Option<Duration>,
    name: &'static str,
    max: Duration,
) -> ServiceResult<Option<Duration>> {
    match requested {
        Some(d) if d.is_zero() || d > max => Err(DomainError::InvalidDuration {
            name,
            max_ms: max.as_millis() as u64,
        }
        .into()),
        other => Ok(other),
    }
}

impl<'a> PresenceService<'a> {
    /// Create a new PresenceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn policy(&self) -> LivenessPolicy {
        self.ctx.liveness()
    }

    fn resolve_window(&self, requested: Option<Duration>) -> ServiceResult<Duration> {
        let requested = check_duration(requested, "time_window", MAX_LIVENESS_WINDOW)?;
        Ok(self.policy().window_or_default(requested))
    }

    /// Record a user's declared status, stamping `last_seen_at` with the
    /// current time. Overwrites any previous record for the same key.
    #[instrument(skip(self, request), fields(status = %request.status))]
    pub async fn update_presence(
        &self,
        workspace_id: &str,
        user_name: &str,
        request: UpdatePresenceRequest,
    ) -> ServiceResult<PresenceResponse> {
        let (workspace_id, user_name) = parse_key(workspace_id, user_name)?;
        let status: PresenceStatus = request
            .status
            .parse()
            .map_err(|_| DomainError::InvalidStatus(request.status.clone()))?;

        let now = now_millis();
        let record = PresenceRecord::new(
            workspace_id,
            user_name,
            status,
            request.current_channel,
            now,
        );
        self.ctx.presence_repo().upsert(&record).await?;

        info!(
            workspace_id = %record.workspace_id,
            user_name = %record.user_name,
            status = %record.status,
            "Presence updated"
        );

        Ok(PresenceResponse::from_record(
            record,
            now,
            self.policy().liveness_window,
        ))
    }

    /// Refresh `last_seen_at` of an existing record, keeping its status and channel
    #[instrument(skip(self))]
    pub async fn heartbeat(
        &self,
        workspace_id: &str,
        user_name: &str,
    ) -> ServiceResult<PresenceResponse> {
        let (workspace_id, user_name) = parse_key(workspace_id, user_name)?;
        let now = now_millis();

        let touched = self
            .ctx
            .presence_repo()
            .touch(&workspace_id, &user_name, now)
            .await?;
        let record = touched.ok_or(DomainError::PresenceNotFound {
            workspace_id,
            user_name,
        })?;

        debug!("Heartbeat recorded");
        Ok(PresenceResponse::from_record(
            record,
            now,
            self.policy().liveness_window,
        ))
    }

    /// Mark a user offline (disconnect); the record stays until cleanup
    #[instrument(skip(self))]
    pub async fn set_offline(
        &self,
        workspace_id: &str,
        user_name: &str,
    ) -> ServiceResult<PresenceResponse> {
        let (workspace_id, user_name) = parse_key(workspace_id, user_name)?;
        let now = now_millis();
        let record =
            PresenceRecord::new(workspace_id, user_name, PresenceStatus::Offline, None, now);
        self.ctx.presence_repo().upsert(&record).await?;

        info!(
            workspace_id = %record.workspace_id,
            user_name = %record.user_name,
            "User went offline"
        );

        Ok(PresenceResponse::from_record(
            record,
            now,
            self.policy().liveness_window,
        ))
    }

    /// Get one user's presence with its liveness flag
    #[instrument(skip(self))]
    pub async fn get_presence(
        &self,
        workspace_id: &str,
        user_name: &str,
        time_window: Option<Duration>,
    ) -> ServiceResult<PresenceResponse> {
        let (workspace_id, user_name) = parse_key(workspace_id, user_name)?;
        let window = self.resolve_window(time_window)?;

        let found = self
            .ctx
            .presence_repo()
            .find(&workspace_id, &user_name)
            .await?;
        let record = found.ok_or(DomainError::PresenceNotFound {
            workspace_id,
            user_name,
        })?;

        Ok(PresenceResponse::from_record(record, now_millis(), window))
    }

    /// Records of a workspace that are active right now, sorted by user name
    async fn active_records(
        &self,
        workspace_id: &str,
        time_window: Option<Duration>,
    ) -> ServiceResult<(Vec<PresenceRecord>, i64, Duration)> {
        let workspace_id = WorkspaceId::parse(workspace_id).map_err(DomainError::from)?;
        let window = self.resolve_window(time_window)?;

        let records = self
            .ctx
            .presence_repo()
            .find_by_workspace(&workspace_id)
            .await?;

        let now = now_millis();
        let mut active: Vec<PresenceRecord> = records
            .into_iter()
            .filter(|record| record.is_active(now, window))
            .collect();
        active.sort_by(|a, b| a.user_name.as_str().cmp(b.user_name.as_str()));

        Ok((active, now, window))
    }

    /// Names of users active within the window
    #[instrument(skip(self))]
    pub async fn get_active_users(
        &self,
        workspace_id: &str,
        time_window: Option<Duration>,
    ) -> ServiceResult<Vec<String>> {
        let (active, _, _) = self.active_records(workspace_id, time_window).await?;
        Ok(active
            .into_iter()
            .map(|record| record.user_name.into())
            .collect())
    }

    /// Full records of users active within the window
    #[instrument(skip(self))]
    pub async fn get_active_users_with_presence(
        &self,
        workspace_id: &str,
        time_window: Option<Duration>,
    ) -> ServiceResult<Vec<PresenceResponse>> {
        let (active, now, window) = self.active_records(workspace_id, time_window).await?;
        Ok(active
            .into_iter()
            .map(|record| PresenceResponse::from_record(record, now, window))
            .collect())
    }

    /// Delete records not seen for longer than the inactivity threshold.
    ///
    /// Returns the number of removed records.
    #[instrument(skip(self))]
    pub async fn cleanup_inactive_users(
        &self,
        workspace_id: &str,
        inactivity_threshold: Option<Duration>,
    ) -> ServiceResult<u64> {
        let workspace_id = WorkspaceId::parse(workspace_id).map_err(DomainError::from)?;
        let requested = check_duration(
            inactivity_threshold,
            "inactivity_threshold",
            MAX_INACTIVITY_THRESHOLD,
        )?;
        let threshold = self.policy().threshold_or_default(requested);

        let cutoff = LivenessPolicy::stale_cutoff(now_millis(), threshold);
        let removed = self
            .ctx
            .presence_repo()
            .delete_stale(&workspace_id, cutoff)
            .await?;

        info!(
            workspace_id = %workspace_id,
            threshold_ms = threshold.as_millis() as u64,
            removed,
            "Inactive presence cleaned up"
        );
        Ok(removed)
    }
}
