//! Proportional scroll synchronization between the outline and source panes.
//!
//! The two panes have unrelated scrollable extents, so positions are mirrored
//! as a fraction of each pane's scrollable range rather than as pixel
//! offsets. Writing the mirrored offset makes the other pane report a scroll
//! of its own; the synchronizer therefore locks itself in `Propagating` after
//! each mirror and ignores further scroll reports until scrolling has been
//! quiet for the quiescence delay. Every report received while locked pushes
//! the deadline back (debounce).
//!
//! Time is passed in by the caller, which keeps the state machine free of
//! timers and lets tests drive it deterministically.

use std::time::{Duration, Instant};

/// Default quiescence delay before the lock is released.
pub const DEFAULT_QUIESCENCE: Duration = Duration::from_millis(150);

/// Offset changes smaller than this (in points) are not treated as scrolls.
pub const SCROLL_EPSILON: f32 = 0.5;

/// The two synchronized panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pane {
    /// Hierarchical outline (pane A).
    Outline,
    /// Paginated source rendering (pane B).
    Source,
}

impl Pane {
    pub const BOTH: [Pane; 2] = [Pane::Outline, Pane::Source];

    /// The pane that mirrors this one.
    pub fn other(self) -> Pane {
        match self {
            Pane::Outline => Pane::Source,
            Pane::Source => Pane::Outline,
        }
    }
}

/// Scroll geometry of a viewport, in the same units as its offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Current offset of the top edge.
    pub scroll_top: f32,
    /// Total height of the scrolled content.
    pub scroll_height: f32,
    /// Height of the visible area.
    pub client_height: f32,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f32, scroll_height: f32, client_height: f32) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    /// Scrollable range; zero when the content fits or the geometry is bogus.
    pub fn range(&self) -> f32 {
        let range = self.scroll_height - self.client_height;
        if range.is_finite() && range > 0.0 {
            range
        } else {
            0.0
        }
    }

    /// Position as a fraction of the scrollable range, always in `[0, 1]`.
    ///
    /// A zero range or a non-finite quotient yields 0.
    pub fn fraction(&self) -> f32 {
        let range = self.range();
        if range == 0.0 {
            return 0.0;
        }
        let fraction = self.scroll_top / range;
        if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Offset corresponding to `fraction` of this viewport's range.
    pub fn offset_for(&self, fraction: f32) -> f32 {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        fraction * self.range()
    }
}

/// A viewport the synchronizer can read and drive.
pub trait ScrollViewport {
    fn metrics(&self) -> ScrollMetrics;
    fn set_scroll_top(&mut self, scroll_top: f32);
}

/// Synchronizer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Ready to mirror the next scroll.
    Idle,
    /// A scroll from `origin` was mirrored; reports are ignored until
    /// `deadline` passes without another one.
    Propagating { origin: Pane, deadline: Instant },
}

/// Result of handing a scroll report to the synchronizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncOutcome {
    /// The other pane was moved to `target_offset`.
    Mirrored { fraction: f32, target_offset: f32 },
    /// The report arrived while locked; nothing was written.
    Suppressed,
}

/// Two-state scroll mirroring machine.
#[derive(Debug, Clone)]
pub struct ScrollSynchronizer {
    state: SyncState,
    quiescence: Duration,
    writes: u64,
}

impl Default for ScrollSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollSynchronizer {
    /// Creates an idle synchronizer with the default quiescence delay.
    pub fn new() -> Self {
        Self::with_quiescence(DEFAULT_QUIESCENCE)
    }

    /// Creates an idle synchronizer with a custom quiescence delay.
    pub fn with_quiescence(quiescence: Duration) -> Self {
        Self {
            state: SyncState::Idle,
            quiescence,
            writes: 0,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SyncState::Idle
    }

    pub fn quiescence(&self) -> Duration {
        self.quiescence
    }

    /// Number of mirrored writes performed so far.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Fires the quiescence timer if its deadline has passed.
    ///
    /// Returns true when this call moved the machine back to `Idle`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            SyncState::Propagating { deadline, .. } if now >= deadline => {
                self.state = SyncState::Idle;
                tracing::trace!("scroll sync idle");
                true
            }
            _ => false,
        }
    }

    /// Time left until the lock releases, if locked.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.state {
            SyncState::Idle => None,
            SyncState::Propagating { deadline, .. } => Some(deadline.saturating_duration_since(now)),
        }
    }

    /// Handles a scroll report from `origin`.
    ///
    /// When idle, mirrors `source`'s fraction onto `mirror` and locks. When
    /// locked, only restarts the quiescence timer.
    pub fn handle_scroll<S, M>(
        &mut self,
        origin: Pane,
        now: Instant,
        source: &S,
        mirror: &mut M,
    ) -> SyncOutcome
    where
        S: ScrollViewport + ?Sized,
        M: ScrollViewport + ?Sized,
    {
        self.poll(now);

        let deadline = now + self.quiescence;
        match self.state {
            SyncState::Propagating { origin: active, .. } => {
                self.state = SyncState::Propagating {
                    origin: active,
                    deadline,
                };
                SyncOutcome::Suppressed
            }
            SyncState::Idle => {
                // Lock before writing: the write itself produces a report.
                self.state = SyncState::Propagating { origin, deadline };

                let fraction = source.metrics().fraction();
                let target_offset = mirror.metrics().offset_for(fraction);
                mirror.set_scroll_top(target_offset);
                self.writes += 1;

                tracing::trace!(?origin, fraction, target_offset, "mirrored scroll");
                SyncOutcome::Mirrored {
                    fraction,
                    target_offset,
                }
            }
        }
    }

    /// Cancels any pending quiescence timer and returns to `Idle`.
    pub fn reset(&mut self) {
        self.state = SyncState::Idle;
    }
}

/// A [`ScrollViewport`] for immediate-mode UIs.
///
/// The UI reports the pane's offset and extents once per frame through
/// [`TrackedPane::observe`]; a change of offset since the previous frame is a
/// scroll. Offsets written by the synchronizer are kept as a pending request
/// that the UI applies on its next frame.
#[derive(Debug, Clone, Default)]
pub struct TrackedPane {
    metrics: ScrollMetrics,
    observed: Option<f32>,
    pending: Option<f32>,
}

impl TrackedPane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records this frame's geometry. Returns true if the pane scrolled.
    pub fn observe(&mut self, offset: f32, content_height: f32, viewport_height: f32) -> bool {
        self.metrics = ScrollMetrics::new(offset, content_height, viewport_height);
        let moved = self
            .observed
            .is_some_and(|previous| (previous - offset).abs() > SCROLL_EPSILON);
        self.observed = Some(offset);
        moved
    }

    /// Takes the offset the UI should apply on its next frame.
    pub fn take_pending(&mut self) -> Option<f32> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<f32> {
        self.pending
    }

    /// Forgets all observed geometry (new document).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl ScrollViewport for TrackedPane {
    fn metrics(&self) -> ScrollMetrics {
        self.metrics
    }

    fn set_scroll_top(&mut self, scroll_top: f32) {
        self.metrics.scroll_top = scroll_top;
        self.pending = Some(scroll_top);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// DOM-like viewport: assigning `scroll_top` clamps it and counts writes.
    #[derive(Debug, Default)]
    struct FakeViewport {
        metrics: ScrollMetrics,
        writes: usize,
    }

    impl FakeViewport {
        fn new(scroll_height: f32, client_height: f32) -> Self {
            Self {
                metrics: ScrollMetrics::new(0.0, scroll_height, client_height),
                writes: 0,
            }
        }
    }

    impl ScrollViewport for FakeViewport {
        fn metrics(&self) -> ScrollMetrics {
            self.metrics
        }

        fn set_scroll_top(&mut self, scroll_top: f32) {
            self.metrics.scroll_top = scroll_top.clamp(0.0, self.metrics.range());
            self.writes += 1;
        }
    }

    #[test]
    fn test_mirrors_fraction() {
        let now = Instant::now();
        let mut sync = ScrollSynchronizer::new();
        let mut outline = FakeViewport::new(1_100.0, 100.0);
        let mut source = FakeViewport::new(5_300.0, 300.0);

        outline.metrics.scroll_top = 250.0;
        let outcome = sync.handle_scroll(Pane::Outline, now, &outline, &mut source);

        assert_eq!(
            outcome,
            SyncOutcome::Mirrored {
                fraction: 0.25,
                target_offset: 1_250.0
            }
        );
        assert!((source.metrics().fraction() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_echo_is_suppressed() {
        let now = Instant::now();
        let mut sync = ScrollSynchronizer::new();
        let mut outline = FakeViewport::new(1_000.0, 200.0);
        let mut source = FakeViewport::new(4_000.0, 500.0);

        outline.metrics.scroll_top = 400.0;
        sync.handle_scroll(Pane::Outline, now, &outline, &mut source);

        // The mirrored write makes the source pane report a scroll.
        let echo = sync.handle_scroll(
            Pane::Source,
            now + Duration::from_millis(5),
            &source,
            &mut outline,
        );
        assert_eq!(echo, SyncOutcome::Suppressed);
        assert_eq!(source.writes, 1);
        assert_eq!(outline.writes, 0);
        assert_eq!(sync.writes(), 1);
    }

    #[test]
    fn test_debounce_extends_deadline() {
        let start = Instant::now();
        let mut sync = ScrollSynchronizer::new();
        let mut outline = FakeViewport::new(1_000.0, 200.0);
        let mut source = FakeViewport::new(4_000.0, 500.0);

        sync.handle_scroll(Pane::Outline, start, &outline, &mut source);
        let later = start + Duration::from_millis(100);
        sync.handle_scroll(Pane::Outline, later, &outline, &mut source);

        // 150ms after the first report, but only 50ms after the second.
        assert!(!sync.poll(start + Duration::from_millis(150)));
        assert!(!sync.is_idle());
        assert!(sync.poll(later + DEFAULT_QUIESCENCE));
        assert!(sync.is_idle());

        outline.metrics.scroll_top = 800.0;
        let outcome = sync.handle_scroll(
            Pane::Outline,
            later + Duration::from_millis(200),
            &outline,
            &mut source,
        );
        assert!(matches!(outcome, SyncOutcome::Mirrored { .. }));
        assert_eq!(source.metrics().scroll_top, 3_500.0);
    }

    #[test]
    fn test_expired_timer_settles_before_next_report() {
        let start = Instant::now();
        let mut sync = ScrollSynchronizer::new();
        let mut outline = FakeViewport::new(1_000.0, 200.0);
        let mut source = FakeViewport::new(4_000.0, 500.0);

        sync.handle_scroll(Pane::Outline, start, &outline, &mut source);
        // Nobody polled, but the deadline has long passed.
        let outcome = sync.handle_scroll(
            Pane::Source,
            start + Duration::from_secs(1),
            &source,
            &mut outline,
        );
        assert!(matches!(outcome, SyncOutcome::Mirrored { .. }));
        assert_eq!(
            sync.state(),
            SyncState::Propagating {
                origin: Pane::Source,
                deadline: start + Duration::from_secs(1) + DEFAULT_QUIESCENCE
            }
        );
    }

    #[test]
    fn test_zero_range_source_yields_zero() {
        let now = Instant::now();
        let mut sync = ScrollSynchronizer::new();
        let outline = FakeViewport {
            metrics: ScrollMetrics::new(0.0, 400.0, 400.0),
            writes: 0,
        };
        let mut source = FakeViewport::new(2_000.0, 500.0);
        source.metrics.scroll_top = 700.0;

        let outcome = sync.handle_scroll(Pane::Outline, now, &outline, &mut source);
        assert_eq!(
            outcome,
            SyncOutcome::Mirrored {
                fraction: 0.0,
                target_offset: 0.0
            }
        );
        assert_eq!(source.metrics().scroll_top, 0.0);
    }

    #[test]
    fn test_fraction_guards() {
        assert_eq!(ScrollMetrics::new(50.0, 100.0, 100.0).fraction(), 0.0);
        assert_eq!(ScrollMetrics::new(50.0, 80.0, 100.0).fraction(), 0.0);
        assert_eq!(ScrollMetrics::new(500.0, 300.0, 100.0).fraction(), 1.0);
        assert_eq!(ScrollMetrics::new(-20.0, 300.0, 100.0).fraction(), 0.0);
        assert_eq!(ScrollMetrics::new(f32::NAN, 300.0, 100.0).fraction(), 0.0);
        assert_eq!(ScrollMetrics::new(10.0, f32::INFINITY, 100.0).fraction(), 0.0);
        assert_eq!(ScrollMetrics::new(0.0, 300.0, 100.0).offset_for(f32::NAN), 0.0);
    }

    #[test]
    fn test_reset_clears_timer() {
        let now = Instant::now();
        let mut sync = ScrollSynchronizer::new();
        let mut outline = FakeViewport::new(1_000.0, 200.0);
        let mut source = FakeViewport::new(4_000.0, 500.0);

        sync.handle_scroll(Pane::Outline, now, &outline, &mut source);
        assert_eq!(sync.remaining(now), Some(DEFAULT_QUIESCENCE));

        sync.reset();
        assert!(sync.is_idle());
        assert_eq!(sync.remaining(now), None);
    }

    #[test]
    fn test_tracked_pane_reports_moves_and_pending() {
        let mut pane = TrackedPane::new();
        assert!(!pane.observe(0.0, 1_000.0, 200.0), "first frame is not a scroll");
        assert!(!pane.observe(0.2, 1_000.0, 200.0));
        assert!(pane.observe(40.0, 1_000.0, 200.0));

        pane.set_scroll_top(120.0);
        assert_eq!(pane.metrics().scroll_top, 120.0);
        assert_eq!(pane.take_pending(), Some(120.0));
        assert_eq!(pane.take_pending(), None);
    }
}
