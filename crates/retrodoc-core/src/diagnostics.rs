//! Diagnostics for degraded input
//!
//! Malformed or unsupported data never aborts a conversion: the element is
//! approximated (or dropped) and the condition is reported to a
//! [`DiagnosticSink`] supplied by the caller. Pathological documents can hit
//! the same condition thousands of times, so [`LogOnce`] only warns on the
//! first report of each kind.

use std::collections::HashSet;
use std::fmt;

/// Recoverable conditions reported while serializing shapes, styles and bitmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticKind {
    /// A dash pattern with more than two distinct dash lengths
    UnsupportedDash,
    /// Gradient stops that are not exactly `0` and `1`
    NonCanonicalGradient,
    /// A double border whose relative widths are not three values
    UnsupportedBorderWidths,
    /// A pattern that could not be turned into an image
    PatternNotRasterizable,
    /// A shape with no geometry to serialize
    UnknownShape,
    /// A bitmap with zero or overflowing dimensions
    DegenerateBitmap,
    /// The image encoder failed
    EncoderFailure,
    /// A transformation that could not be split into rotation and scale
    BadDecomposition,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::UnsupportedDash => "unsupported dash pattern",
            DiagnosticKind::NonCanonicalGradient => "non canonical gradient stops",
            DiagnosticKind::UnsupportedBorderWidths => "unsupported border widths",
            DiagnosticKind::PatternNotRasterizable => "pattern cannot be rasterized",
            DiagnosticKind::UnknownShape => "unknown shape",
            DiagnosticKind::DegenerateBitmap => "degenerate bitmap",
            DiagnosticKind::EncoderFailure => "image encoder failure",
            DiagnosticKind::BadDecomposition => "transformation cannot be decomposed",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives reports of degraded input.
pub trait DiagnosticSink {
    fn report(&mut self, kind: DiagnosticKind, detail: &str);
}

/// Sink that drops every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ignore;

impl DiagnosticSink for Ignore {
    fn report(&mut self, _kind: DiagnosticKind, _detail: &str) {}
}

/// Forwards the first report of each kind to the wrapped sink; later ones
/// are only traced.
#[derive(Debug, Default, Clone)]
pub struct Deduplicate<S> {
    inner: S,
    seen: HashSet<DiagnosticKind>,
}

/// Logs the first report of each kind at `warn` level, later ones at `trace`.
pub type LogOnce = Deduplicate<LogAll>;

impl LogOnce {
    pub fn new() -> Self {
        Self::wrap(LogAll)
    }
}

impl<S: DiagnosticSink> Deduplicate<S> {
    pub fn wrap(inner: S) -> Self {
        Self {
            inner,
            seen: HashSet::new(),
        }
    }

    pub fn has_seen(&self, kind: DiagnosticKind) -> bool {
        self.seen.contains(&kind)
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: DiagnosticSink> DiagnosticSink for Deduplicate<S> {
    fn report(&mut self, kind: DiagnosticKind, detail: &str) {
        if self.seen.insert(kind) {
            self.inner.report(kind, detail);
        } else {
            tracing::trace!(kind = %kind, "{}", detail);
        }
    }
}

/// Logs every report at `warn` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAll;

impl DiagnosticSink for LogAll {
    fn report(&mut self, kind: DiagnosticKind, detail: &str) {
        tracing::warn!(kind = %kind, "{}", detail);
    }
}

/// Keeps every report for later inspection.
#[derive(Debug, Default, Clone)]
pub struct Collector {
    reports: Vec<(DiagnosticKind, String)>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(DiagnosticKind, String)] {
        &self.reports
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.reports.iter().filter(|(k, _)| *k == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl DiagnosticSink for Collector {
    fn report(&mut self, kind: DiagnosticKind, detail: &str) {
        tracing::debug!(kind = %kind, "{}", detail);
        self.reports.push((kind, detail.to_string()));
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, kind: DiagnosticKind, detail: &str) {
        (**self).report(kind, detail);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn report(&mut self, kind: DiagnosticKind, detail: &str) {
        (**self).report(kind, detail);
    }
}
