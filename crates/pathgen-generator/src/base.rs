//! State shared by every generation mode.

use pathgen_core::{Diagnostic, DiagnosticKind, PathError};
use pathgen_curve::{AnchorStyle, ColliderBuilder, ControlMode, CurveBuilder, CurveSink, CurveSpec};
use pathgen_math::{PathSpace, Point3};

use crate::config::GeneratorSettings;
use crate::sequence::PointSequence;

/// Lifecycle of a generator.
///
/// `Uninitialized -> Ready -> (Generating <-> Ready) -> Cleared -> Ready`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    Uninitialized,
    Ready,
    Generating,
    Cleared,
}

/// What one batch (a manual call or a periodic batch) did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Units the batch attempted.
    pub units: usize,
    pub added: usize,
    pub evicted: usize,
    /// A unit was refused because the limit was hit with eviction off.
    pub refused: bool,
}

/// Point sequence, curve and bookkeeping owned by one generator.
///
/// Points produced since the last curve update are `pending`: they sit at
/// the tail of the sequence but not yet on the curve.
pub struct GeneratorCore {
    settings: GeneratorSettings,
    sequence: PointSequence,
    curve: CurveBuilder,
    pending: usize,
    needs_full_rebuild: bool,
    collider: Option<Box<dyn ColliderBuilder>>,
    state: GeneratorState,
    batch: GenerationReport,
    diagnostics: Vec<Diagnostic>,
}

impl GeneratorCore {
    pub fn new(settings: GeneratorSettings) -> Self {
        let sequence = PointSequence::new(settings.limit());
        Self {
            settings,
            sequence,
            curve: CurveBuilder::new(),
            pending: 0,
            needs_full_rebuild: true,
            collider: None,
            state: GeneratorState::Uninitialized,
            batch: GenerationReport::default(),
            diagnostics: Vec::new(),
        }
    }

    pub fn with_sink(settings: GeneratorSettings, sink: Box<dyn CurveSink>) -> Self {
        Self {
            curve: CurveBuilder::with_sink(sink),
            ..Self::new(settings)
        }
    }

    pub fn name(&self) -> &str {
        &self.settings.name
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Changes take effect on the next generation call.
    pub fn settings_mut(&mut self) -> &mut GeneratorSettings {
        &mut self.settings
    }

    pub fn sequence(&self) -> &PointSequence {
        &self.sequence
    }

    pub fn points(&self) -> &[Point3] {
        self.sequence.as_slice()
    }

    pub fn curve(&self) -> Option<&CurveSpec> {
        self.curve.spec()
    }

    pub fn curve_builder(&self) -> &CurveBuilder {
        &self.curve
    }

    pub fn sink(&self) -> &dyn CurveSink {
        self.curve.sink()
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn set_collider(&mut self, collider: Box<dyn ColliderBuilder>) {
        self.collider = Some(collider);
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Record a non-fatal failure.
    pub fn report(&mut self, err: PathError) {
        let diagnostic = Diagnostic::warn(&self.settings.name, &err);
        self.diagnostics.push(diagnostic);
    }

    /// Record that the current unit was abandoned.
    pub(crate) fn refuse(&mut self, err: PathError) {
        self.batch.refused = true;
        self.report(err);
    }

    pub(crate) fn push_diagnostics(&mut self, diagnostics: Vec<Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub(crate) fn note(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let diagnostic = Diagnostic::debug(&self.settings.name, kind, message);
        self.diagnostics.push(diagnostic);
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Drop all points and curve state; the generator must be initialized again.
    pub(crate) fn reset(&mut self) {
        self.sequence.clear();
        self.sequence.set_limit(self.settings.limit());
        self.curve.clear();
        self.pending = 0;
        self.needs_full_rebuild = true;
        self.batch = GenerationReport::default();
    }

    pub(crate) fn set_state(&mut self, state: GeneratorState) {
        if self.state != state {
            tracing::debug!(generator = %self.settings.name, from = ?self.state, to = ?state, "state change");
            self.state = state;
        }
    }

    pub(crate) fn begin_batch(&mut self) -> Result<(), PathError> {
        match self.state {
            GeneratorState::Ready => {
                self.sequence.set_limit(self.settings.limit());
                self.batch = GenerationReport::default();
                self.set_state(GeneratorState::Generating);
                Ok(())
            }
            GeneratorState::Generating => Err(PathError::BatchInProgress),
            GeneratorState::Uninitialized | GeneratorState::Cleared => Err(PathError::NotInitialized),
        }
    }

    pub(crate) fn finish_batch(&mut self) -> GenerationReport {
        self.set_state(GeneratorState::Ready);
        std::mem::take(&mut self.batch)
    }

    pub(crate) fn count_unit(&mut self) {
        self.batch.units += 1;
    }

    // ------------------------------------------------------------------
    // Points
    // ------------------------------------------------------------------

    /// Append a point that has already been given room.
    pub(crate) fn push(&mut self, point: Point3) -> bool {
        match self.sequence.append(point) {
            Ok(()) => {
                self.pending += 1;
                self.batch.added += 1;
                true
            }
            Err(err) => {
                self.refuse(err);
                false
            }
        }
    }

    /// Replace every point; the curve must be rebuilt in full afterwards.
    pub(crate) fn replace_all(&mut self, points: Vec<Point3>) {
        self.sequence.clear();
        self.pending = 0;
        for p in points {
            if !self.push(p) {
                break;
            }
        }
        self.needs_full_rebuild = true;
    }

    pub(crate) fn ensure_minimum(&mut self) {
        if self.sequence.ensure_minimum() {
            self.pending = self.sequence.len();
            self.needs_full_rebuild = true;
        }
    }

    /// Make room for `unit` more points, evicting `evict_unit` points at a
    /// time from the front while needed. Returns `false` (after recording
    /// `CapacityExceeded`) when the unit has to be abandoned.
    pub(crate) fn make_room(&mut self, unit: usize, evict_unit: usize) -> bool {
        while !self.sequence.can_accept(unit) {
            let max = self.sequence.limit().unwrap_or(usize::MAX);
            if !self.settings.evict_on_limit || self.sequence.is_empty() {
                self.refuse(PathError::CapacityExceeded { requested: unit, max });
                return false;
            }
            self.evict(evict_unit.max(1));
        }
        true
    }

    /// Evict up to `n` points from the front, clamping to what exists, and
    /// delete the matching segments from the curve.
    pub(crate) fn evict(&mut self, n: usize) {
        let n = match self.sequence.evict_front(n) {
            Ok(removed) => removed.len(),
            Err(err) => {
                self.report(err);
                let available = self.sequence.len();
                self.sequence.evict_front(available).map_or(0, |r| r.len())
            }
        };

        // Points on the curve come first; only the tail is pending.
        let mut on_curve = self.sequence.len() + n - self.pending;
        for _ in 0..n {
            if on_curve == 0 {
                self.pending -= 1;
                continue;
            }
            on_curve -= 1;
            if self.needs_full_rebuild {
                continue;
            }
            if let Err(err) = self.curve.delete_front_segment() {
                self.note(err.kind(), format!("{}; curve will be rebuilt", err));
                self.needs_full_rebuild = true;
            }
        }
        self.batch.evicted += n;
    }

    // ------------------------------------------------------------------
    // Curve
    // ------------------------------------------------------------------

    /// Rebuild the whole curve from the sequence.
    pub(crate) fn rebuild_full(&mut self, closed: bool, space: PathSpace, style: AnchorStyle) {
        self.curve.set_space(space);
        self.curve.set_tangent_scale(style.tangent_scale);
        self.curve.rebuild_full(self.sequence.as_slice(), closed, style.mode);
        self.pending = 0;
        self.needs_full_rebuild = false;
        self.build_collider();
    }

    /// Put the pending points on the curve, one segment each. Falls back to
    /// a full open rebuild when the curve is missing or out of step.
    pub(crate) fn extend_curve(&mut self, space: PathSpace, mode: ControlMode) {
        if self.needs_full_rebuild || self.curve.spec().is_none() || self.curve.anchor_count() < 2 {
            let style = AnchorStyle::new(mode, self.curve.tangent_scale());
            self.rebuild_full(false, space, style);
            return;
        }
        if self.pending == 0 {
            return;
        }
        self.curve.set_continuity_mode(mode);
        let start = self.sequence.len() - self.pending;
        for i in start..self.sequence.len() {
            let point = self.sequence.as_slice()[i];
            if let Err(err) = self.curve.append_point(point) {
                self.report(err);
            }
        }
        self.pending = 0;
        self.build_collider();
    }

    fn build_collider(&mut self) {
        if !self.settings.generate_collider {
            return;
        }
        let (Some(collider), Some(spec)) = (self.collider.as_mut(), self.curve.spec()) else {
            return;
        };
        if let Err(err) = collider.regenerate(spec, self.curve.sink()) {
            let diagnostic = Diagnostic::warn(&self.settings.name, &err);
            self.diagnostics.push(diagnostic);
        }
    }
}
