//! Guild deletion workflow
//!
//! Deletion is best-effort and multi-phase. A clean single-call delete
//! is attempted first; when it fails or is unavailable the workflow
//! cascades dependent rows by hand, retries, and as a last resort
//! evicts the guild from the in-memory registry so it is at least
//! unreachable. Every downgrade is recorded in the report; one failing
//! step never aborts the phases after it.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use guild_core::error::DomainError;
use guild_core::traits::DeletionTarget;
use guild_core::value_objects::Snowflake;

/// Outcome of one deletion run.
#[derive(Debug)]
pub struct DeletionReport {
    pub guild_id: Snowflake,
    /// The guild is gone from the primary lookup path.
    pub success: bool,
    /// Success needed a fallback phase; the clean path did not finish.
    pub degraded: bool,
    /// Human-readable trail of everything that went sideways, in order.
    pub reasons: Vec<String>,
    /// First error encountered, kept for callers that need the cause.
    pub first_error: Option<DomainError>,
}

impl DeletionReport {
    fn new(guild_id: Snowflake) -> Self {
        Self {
            guild_id,
            success: false,
            degraded: false,
            reasons: Vec::new(),
            first_error: None,
        }
    }

    /// The accumulated reasons as one line.
    pub fn reason_trail(&self) -> String {
        self.reasons.join("; ")
    }

    fn note(&mut self, reason: impl Into<String>) {
        self.reasons.push(reason.into());
    }

    fn record_error(&mut self, context: &str, error: DomainError) {
        self.reasons.push(format!("{context}: {error}"));
        if self.first_error.is_none() {
            self.first_error = Some(error);
        }
    }
}

/// Drives the phased deletion workflow against any [`DeletionTarget`].
pub struct DeletionOrchestrator;

impl DeletionOrchestrator {
    /// Delete a guild through whichever capabilities the target has.
    ///
    /// Phases, in order: standard deletion, relation cascade, member
    /// cascade, deletion retry, cache eviction. Later phases run only
    /// while the guild row is still standing.
    #[instrument(skip(target))]
    pub async fn delete_guild(target: &dyn DeletionTarget, guild_id: Snowflake) -> DeletionReport {
        let mut report = DeletionReport::new(guild_id);

        let has_capability = target.standard_delete().is_some()
            || target.relation_enumerator().is_some()
            || target.member_enumerator().is_some()
            || target.cache_evictor().is_some();
        if !has_capability {
            report.note("no deletion interface found");
            warn!(%guild_id, "deletion target exposes no capabilities");
            return report;
        }

        // Phase 1: single-call deletion.
        if let Some(standard) = target.standard_delete() {
            match standard.delete_guild(guild_id).await {
                Ok(true) => {
                    Self::evict(target, guild_id);
                    report.success = true;
                    info!(%guild_id, "guild deleted");
                    return report;
                }
                Ok(false) => report.note("standard deletion removed no row"),
                Err(error) => report.record_error("standard deletion failed", error),
            }
        } else {
            report.note("standard deletion unavailable");
        }

        // Phase 2: cascade relations row by row. One failing row does
        // not stop the rest.
        if let Some(relations) = target.relation_enumerator() {
            match relations.relations_of(guild_id).await {
                Ok(rows) => {
                    let total = rows.len();
                    let mut removed = 0;
                    for relation in rows {
                        match relations.remove_relation(relation.id).await {
                            Ok(()) => removed += 1,
                            Err(error) => report.record_error(
                                &format!("removal of relation {} failed", relation.id),
                                error,
                            ),
                        }
                    }
                    report.note(format!("relation cascade removed {removed} of {total} rows"));
                }
                Err(error) => report.record_error("relation enumeration failed", error),
            }
        } else {
            report.note("relation cascade unavailable");
        }

        // Phase 3: cascade memberships the same way.
        if let Some(members) = target.member_enumerator() {
            match members.members_of(guild_id).await {
                Ok(rows) => {
                    let total = rows.len();
                    let mut removed = 0;
                    for member in rows {
                        match members.remove_member(guild_id, member.player_id).await {
                            Ok(()) => removed += 1,
                            Err(error) => report.record_error(
                                &format!("removal of member {} failed", member.player_id),
                                error,
                            ),
                        }
                    }
                    report.note(format!("member cascade removed {removed} of {total} rows"));
                }
                Err(error) => report.record_error("member enumeration failed", error),
            }
        } else {
            report.note("member cascade unavailable");
        }

        // Phase 4: retry the single-call deletion now that dependents
        // are (mostly) gone.
        if let Some(standard) = target.standard_delete() {
            match standard.delete_guild(guild_id).await {
                Ok(true) => {
                    Self::evict(target, guild_id);
                    report.success = true;
                    report.degraded = true;
                    warn!(%guild_id, reasons = %report.reason_trail(), "guild deleted after cascade");
                    return report;
                }
                Ok(false) => report.note("deletion retry removed no row"),
                Err(error) => report.record_error("deletion retry failed", error),
            }
        }

        // Phase 5: make the guild unreachable even though its row
        // survived everything above.
        if let Some(evictor) = target.cache_evictor() {
            if evictor.evict(guild_id) {
                report.note("guild evicted from registry; storage row may remain");
                report.success = true;
                report.degraded = true;
                warn!(%guild_id, reasons = %report.reason_trail(), "guild deletion degraded to eviction");
                return report;
            }
            report.note("registry eviction removed nothing");
        }

        warn!(%guild_id, reasons = %report.reason_trail(), "guild deletion failed");
        report
    }

    /// Run the workflow on its own task, off the caller's thread. The
    /// report comes back through the handle.
    pub fn spawn_delete(
        target: Arc<dyn DeletionTarget>,
        guild_id: Snowflake,
    ) -> JoinHandle<DeletionReport> {
        tokio::spawn(async move { Self::delete_guild(target.as_ref(), guild_id).await })
    }

    /// Registry consistency after a successful row deletion; the result
    /// does not matter.
    fn evict(target: &dyn DeletionTarget, guild_id: Snowflake) {
        if let Some(evictor) = target.cache_evictor() {
            evictor.evict(guild_id);
        }
    }
}
