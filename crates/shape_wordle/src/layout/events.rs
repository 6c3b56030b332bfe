//! Event types and sinks for observing layout runs.
//!
//! This module defines [`LayoutEvent`] and a set of sinks to emit, collect or forward events
//! while [`crate::layout::wordle::generate_wordle`] or
//! [`crate::layout::runner::ShapeWordle`] work through the regions.
use glam::Vec2;

use crate::layout::config::LayoutConfig;

/// Describes events emitted during a layout run.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum LayoutEvent {
    /// Emitted when a run starts.
    RunStarted {
        /// The configuration used.
        config: LayoutConfig,
        /// Number of keywords.
        word_count: usize,
        /// Number of regions.
        region_count: usize,
    },

    /// Emitted once the font-size search settled.
    FontSizeChosen {
        /// Maximum font size chosen by the search.
        max_font_size: f32,
        /// Fill ratio of every region at that size.
        fill_ratios: Vec<f32>,
    },

    /// Emitted when a region pass starts.
    RegionStarted {
        region_id: usize,
        /// Words allocated to the region.
        word_count: usize,
    },

    /// Emitted when a word found a position.
    WordPlaced {
        /// Index of the word in the keyword list.
        index: usize,
        name: String,
        position: Vec2,
        /// Spiral iterations spent on the word.
        iterations: usize,
    },

    /// Emitted when a word exhausted its iteration budget.
    WordFailed {
        /// Index of the word in the keyword list.
        index: usize,
        name: String,
        region_id: usize,
    },

    /// Emitted when the global font size shrinks and the region restarts.
    FontShrunk {
        region_id: usize,
        /// New maximum font size.
        max_font_size: f32,
    },

    /// Emitted when the last fully placed layout is restored.
    SnapshotRestored { region_id: usize },

    /// Emitted when a region pass ends.
    RegionFinished { region_id: usize, success: bool },

    /// Emitted when the run ends.
    RunFinished {
        placed: usize,
        total: usize,
        max_font_size: f32,
        success: bool,
    },

    /// Non-fatal warning generated during layout.
    Warning {
        /// Context string (e.g. region or word).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of a [`LayoutEvent`], used by sinks to filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutEventKind {
    RunStarted,
    FontSizeChosen,
    RegionStarted,
    WordPlaced,
    WordFailed,
    FontShrunk,
    SnapshotRestored,
    RegionFinished,
    RunFinished,
    Warning,
}

impl LayoutEvent {
    pub fn kind(&self) -> LayoutEventKind {
        match self {
            LayoutEvent::RunStarted { .. } => LayoutEventKind::RunStarted,
            LayoutEvent::FontSizeChosen { .. } => LayoutEventKind::FontSizeChosen,
            LayoutEvent::RegionStarted { .. } => LayoutEventKind::RegionStarted,
            LayoutEvent::WordPlaced { .. } => LayoutEventKind::WordPlaced,
            LayoutEvent::WordFailed { .. } => LayoutEventKind::WordFailed,
            LayoutEvent::FontShrunk { .. } => LayoutEventKind::FontShrunk,
            LayoutEvent::SnapshotRestored { .. } => LayoutEventKind::SnapshotRestored,
            LayoutEvent::RegionFinished { .. } => LayoutEventKind::RegionFinished,
            LayoutEvent::RunFinished { .. } => LayoutEventKind::RunFinished,
            LayoutEvent::Warning { .. } => LayoutEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`LayoutEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: LayoutEvent);

    /// Returns `false` for kinds the sink ignores, letting emitters skip building the event.
    #[inline]
    fn wants(&self, _kind: LayoutEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = LayoutEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: LayoutEvent) {}

    #[inline]
    fn wants(&self, _kind: LayoutEventKind) -> bool {
        false
    }
}

impl<T: EventSink + ?Sized> EventSink for &mut T {
    #[inline]
    fn send(&mut self, event: LayoutEvent) {
        (**self).send(event);
    }

    #[inline]
    fn wants(&self, kind: LayoutEventKind) -> bool {
        (**self).wants(kind)
    }
}

impl<T: EventSink + ?Sized> EventSink for Box<T> {
    #[inline]
    fn send(&mut self, event: LayoutEvent) {
        (**self).send(event);
    }

    #[inline]
    fn wants(&self, kind: LayoutEventKind) -> bool {
        (**self).wants(kind)
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    #[inline]
    fn send(&mut self, event: LayoutEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally restricted to some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<LayoutEvent>,
    only: Option<Vec<LayoutEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            events: Vec::with_capacity(cap),
            only: None,
        }
    }

    /// Collects only the listed kinds.
    pub fn only(kinds: impl IntoIterator<Item = LayoutEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<LayoutEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[LayoutEvent] {
        &self.events
    }

    /// Number of collected events of the given kind.
    pub fn count(&self, kind: LayoutEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: LayoutEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: LayoutEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: LayoutEvent) {
        let kind = event.kind();
        let targets: Vec<usize> = (0..self.sinks.len())
            .filter(|&i| self.sinks[i].wants(kind))
            .collect();
        let Some((&last, rest)) = targets.split_last() else {
            return;
        };
        for &i in rest {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last].send(event);
    }

    fn wants(&self, kind: LayoutEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
