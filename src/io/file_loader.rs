//! Asynchronous loading state management.

/// What a background load is fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// The document outline
    Outline,
    /// The paginated source document
    Source,
}

/// Holds the state of the background loads.
///
/// Only the in-flight counters are shared; results come through a channel.
/// This struct is wrapped in an `Arc<Mutex<>>` to allow safe sharing between
/// the main thread and the loading threads.
#[derive(Debug, Default)]
pub struct LoadingState {
    /// Outline loads currently running
    pub outlines_in_flight: usize,
    /// Source document loads currently running
    pub sources_in_flight: usize,
}

impl LoadingState {
    /// Creates a new loading state with nothing in progress.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started(&mut self, kind: LoadKind) {
        *self.counter(kind) += 1;
    }

    pub fn finished(&mut self, kind: LoadKind) {
        let counter = self.counter(kind);
        *counter = counter.saturating_sub(1);
    }

    pub fn in_progress(&self, kind: LoadKind) -> bool {
        match kind {
            LoadKind::Outline => self.outlines_in_flight > 0,
            LoadKind::Source => self.sources_in_flight > 0,
        }
    }

    fn counter(&mut self, kind: LoadKind) -> &mut usize {
        match kind {
            LoadKind::Outline => &mut self.outlines_in_flight,
            LoadKind::Source => &mut self.sources_in_flight,
        }
    }
}
