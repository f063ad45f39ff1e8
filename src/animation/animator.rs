use crate::{
    animation::ticker::{FRAME_INTERVAL, FixedCadence},
    foundation::error::{SvgaError, SvgaResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopCount {
    Infinite,
    Finite(u32),
}

impl LoopCount {
    /// Total run length for a cycle of `duration_ms`.
    pub fn total_ms(self, duration_ms: f64) -> f64 {
        match self {
            Self::Infinite => f64::INFINITY,
            Self::Finite(n) => duration_ms * f64::from(n),
        }
    }
}

/// Where the value lands once the run is over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillRule {
    /// Terminal fraction 1.
    #[default]
    ToEnd,
    /// Terminal fraction 0.
    ToStart,
}

/// Lifecycle notifications, pushed in order into the caller's buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimatorSignal {
    Started,
    /// Current animated value.
    Update(f64),
    End,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnimatorState {
    #[default]
    Idle,
    Running,
    Stopped,
}

/// Parameters bound to one run, fixed from `start` until the run ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatorRun {
    pub start_value: f64,
    pub end_value: f64,
    /// Length of one cycle. Must be positive.
    pub duration_ms: f64,
    pub loop_count: LoopCount,
    pub fill_rule: FillRule,
    /// Pace the run with an owned [`FixedCadence`] timer.
    pub no_execution_delay: bool,
}

/// Time-driven interpolation between two scalars.
///
/// The animator owns no clock. Every call takes the current time in
/// milliseconds, so the same instance can be driven by wall time or by a
/// simulated clock. Output is pushed into a signal buffer supplied by the caller;
/// once a run has been stopped no further signals are produced for it.
#[derive(Debug, Default)]
pub struct Animator {
    run: Option<AnimatorRun>,
    state: AnimatorState,
    start_timestamp: f64,
    fraction: f64,
    timer: Option<FixedCadence>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a run, continuing from `current_value` when it is non-zero.
    ///
    /// The start time is back-projected so that the fraction `current_value`
    /// occupies within the range is reached exactly at `now_ms`.
    #[tracing::instrument(level = "trace", skip(self, out))]
    pub fn start(
        &mut self,
        run: AnimatorRun,
        current_value: f64,
        now_ms: f64,
        out: &mut Vec<AnimatorSignal>,
    ) -> SvgaResult<()> {
        if !(run.duration_ms.is_finite() && run.duration_ms > 0.0) {
            return Err(SvgaError::invalid_input(format!(
                "animator duration must be positive, got {}",
                run.duration_ms
            )));
        }

        let mut start_timestamp = now_ms;
        let span = run.end_value - run.start_value;
        if current_value != 0.0 && span != 0.0 {
            let offset = ((current_value - run.start_value) / span).clamp(0.0, 1.0);
            start_timestamp -= offset * run.duration_ms;
        }

        if run.no_execution_delay {
            if self.timer.is_none() {
                self.timer = Some(FixedCadence::spawn(FRAME_INTERVAL)?);
            }
        } else {
            self.timer = None;
        }

        self.run = Some(run);
        self.state = AnimatorState::Running;
        self.start_timestamp = start_timestamp;
        self.fraction = 0.0;

        out.push(AnimatorSignal::Started);
        self.tick(now_ms, out);
        Ok(())
    }

    /// Advance to `now_ms`. Does nothing unless running.
    pub fn tick(&mut self, now_ms: f64, out: &mut Vec<AnimatorSignal>) {
        let Some(run) = self.run.filter(|_| self.state == AnimatorState::Running) else {
            return;
        };

        let elapsed = (now_ms - self.start_timestamp).max(0.0);
        let finished = elapsed >= run.loop_count.total_ms(run.duration_ms);
        self.fraction = if finished {
            match run.fill_rule {
                FillRule::ToStart => 0.0,
                FillRule::ToEnd => 1.0,
            }
        } else {
            (elapsed % run.duration_ms) / run.duration_ms
        };

        out.push(AnimatorSignal::Update(self.animated_value()));

        if finished {
            self.state = AnimatorState::Idle;
            self.timer = None;
            out.push(AnimatorSignal::End);
        }
    }

    /// Halt the current run and release its timer. Idempotent.
    pub fn stop(&mut self) {
        if self.state == AnimatorState::Running {
            self.state = AnimatorState::Stopped;
        }
        self.timer = None;
    }

    pub fn animated_value(&self) -> f64 {
        self.run.map_or(0.0, |r| {
            r.start_value + (r.end_value - r.start_value) * self.fraction
        })
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimatorState::Running
    }

    pub fn run(&self) -> Option<&AnimatorRun> {
        self.run.as_ref()
    }

    /// The fixed-cadence timer, present only while a no-execution-delay run is
    /// active.
    pub fn timer_mut(&mut self) -> Option<&mut FixedCadence> {
        self.timer.as_mut()
    }

    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/animator.rs"]
mod tests;
