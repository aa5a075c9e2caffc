use foundation::Layout;
use runtime::RetryBudget;

use crate::anchor::FeatureAnchor;
use crate::config::ConnectorConfig;
use crate::geometry::NotReady;
use crate::plan::{ConnectorPlan, plan_connectors};
use crate::surface::ConnectorSurface;

#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// The section is hidden; nothing was measured.
    Inactive,
    Applied(ConnectorPlan),
    /// Nothing written; the caller should run the pass again next frame.
    Retry(NotReady),
    /// The retry budget ran out. The next trigger starts a fresh budget.
    GaveUp(NotReady),
}

/// Geometry synchronisation for a fixed set of feature anchors.
pub struct GeometrySync {
    anchors: Vec<FeatureAnchor>,
    breakpoint_px: f64,
    retries: RetryBudget,
}

impl GeometrySync {
    pub fn new(config: &ConnectorConfig) -> Self {
        Self {
            anchors: config.anchors.clone(),
            breakpoint_px: config.breakpoint_px,
            retries: RetryBudget::new(config.max_retry_frames),
        }
    }

    pub fn anchors(&self) -> &[FeatureAnchor] {
        &self.anchors
    }

    pub fn layout_for(&self, viewport_width: f64) -> Layout {
        Layout::for_width(viewport_width, self.breakpoint_px)
    }

    pub fn retry_attempts(&self) -> u32 {
        self.retries.attempts()
    }

    /// Pure half of a pass: measure and compute, write nothing.
    pub fn plan<S: ConnectorSurface + ?Sized>(&self, surface: &S) -> Result<ConnectorPlan, NotReady> {
        plan_connectors(&self.anchors, self.breakpoint_px, surface)
    }

    /// Full pass: plan, then apply in one render step.
    pub fn recompute_all<S: ConnectorSurface + ?Sized>(&mut self, surface: &S) -> SyncOutcome {
        if !surface.presence().is_potentially_active() {
            log::debug!("connector section hidden, skipping pass");
            return SyncOutcome::Inactive;
        }

        match self.plan(surface) {
            Ok(plan) => {
                self.retries.reset();
                surface.apply(&plan);
                SyncOutcome::Applied(plan)
            }
            Err(reason) => {
                if self.retries.try_consume() {
                    log::debug!(
                        "connector pass deferred ({reason}), retry {}/{}",
                        self.retries.attempts(),
                        self.retries.limit()
                    );
                    SyncOutcome::Retry(reason)
                } else {
                    log::warn!(
                        "connector pass abandoned after {} frames: {reason}",
                        self.retries.limit()
                    );
                    self.retries.reset();
                    SyncOutcome::GaveUp(reason)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GeometrySync, SyncOutcome};
    use crate::config::ConnectorConfig;
    use crate::geometry::NotReady;
    use crate::presence::SectionPresence;
    use crate::testing::FakeSurface;
    use foundation::Layout;

    fn config(max_retry_frames: u32) -> ConnectorConfig {
        ConnectorConfig {
            max_retry_frames,
            ..ConnectorConfig::default()
        }
    }

    #[test]
    fn hidden_section_is_not_measured() {
        let cfg = config(3);
        let surface = FakeSurface::ready(&cfg.anchors);
        surface.presence.set(SectionPresence::default());
        let mut sync = GeometrySync::new(&cfg);
        assert_eq!(sync.recompute_all(&surface), SyncOutcome::Inactive);
        assert_eq!(surface.apply_count(), 0);
    }

    #[test]
    fn fragment_match_makes_hidden_section_eligible() {
        let cfg = config(3);
        let surface = FakeSurface::ready(&cfg.anchors);
        surface.presence.set(SectionPresence {
            fragment_matches: true,
            ..SectionPresence::default()
        });
        let mut sync = GeometrySync::new(&cfg);
        assert!(matches!(sync.recompute_all(&surface), SyncOutcome::Applied(_)));
    }

    #[test]
    fn applies_plan_once_per_pass() {
        let cfg = config(3);
        let surface = FakeSurface::ready(&cfg.anchors);
        let mut sync = GeometrySync::new(&cfg);
        let SyncOutcome::Applied(plan) = sync.recompute_all(&surface) else {
            panic!("expected an applied pass");
        };
        assert_eq!(plan.updates.len(), 4);
        assert_eq!(surface.apply_count(), 1);
        assert_eq!(surface.applied.borrow()[0], plan);
    }

    #[test]
    fn retries_are_bounded_then_reset() {
        let cfg = config(2);
        let surface = FakeSurface::ready(&cfg.anchors);
        surface.hide_svg();
        let mut sync = GeometrySync::new(&cfg);

        assert_eq!(sync.recompute_all(&surface), SyncOutcome::Retry(NotReady::ZeroSize));
        assert_eq!(sync.recompute_all(&surface), SyncOutcome::Retry(NotReady::ZeroSize));
        assert_eq!(sync.recompute_all(&surface), SyncOutcome::GaveUp(NotReady::ZeroSize));
        assert_eq!(sync.retry_attempts(), 0);
        assert_eq!(surface.apply_count(), 0);
    }

    #[test]
    fn success_resets_retry_budget() {
        let cfg = config(5);
        let surface = FakeSurface::ready(&cfg.anchors);
        surface.hide_svg();
        let mut sync = GeometrySync::new(&cfg);
        sync.recompute_all(&surface);
        assert_eq!(sync.retry_attempts(), 1);

        surface.show_svg();
        assert!(matches!(sync.recompute_all(&surface), SyncOutcome::Applied(_)));
        assert_eq!(sync.retry_attempts(), 0);
    }

    #[test]
    fn layout_uses_configured_breakpoint() {
        let sync = GeometrySync::new(&ConnectorConfig {
            breakpoint_px: 1024.0,
            ..ConnectorConfig::default()
        });
        assert_eq!(sync.layout_for(900.0), Layout::Mobile);
        assert_eq!(sync.layout_for(1024.0), Layout::Desktop);
    }
}
