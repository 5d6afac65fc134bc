use std::time::Duration;

/// Something the scheduler wants run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Execute one instruction.
    Instruction,
    /// Decrement the delay and sound timers.
    Timer,
}

/// A recurring trigger that fires every `period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Trigger {
    period: Duration,
    due: Duration,
}

impl Trigger {
    /// A trigger created at `now` first fires one period later.
    fn new(period: Duration, now: Duration) -> Self {
        Trigger {
            period,
            due: now + period,
        }
    }
}

/// # Scheduler
/// Drives the two independently clocked loops of the Chip-8: instruction steps and timer steps.
///
/// It owns no thread or timer of its own. Whoever drives it reports how much time has passed
/// and gets back every tick that fell due in that window, in deadline order, to run one after
/// another against the same machine. Timer ticks come first when both are due together.
///
/// Pausing drops both triggers; resuming creates fresh ones, so time spent paused is never
/// caught up on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduler {
    instruction_period: Duration,
    timer_period: Duration,
    now: Duration,
    instruction: Option<Trigger>,
    timer: Option<Trigger>,
}

impl Scheduler {
    /// Creates a paused scheduler. Both periods must be non-zero.
    pub fn new(instruction_period: Duration, timer_period: Duration) -> Self {
        debug_assert!(
            !instruction_period.is_zero() && !timer_period.is_zero(),
            "scheduler periods must be non-zero"
        );
        Scheduler {
            instruction_period,
            timer_period,
            now: Duration::ZERO,
            instruction: None,
            timer: None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.instruction.is_none() && self.timer.is_none()
    }

    /// Stops and discards both triggers. Does nothing when already paused.
    pub fn pause(&mut self) {
        self.instruction = None;
        self.timer = None;
    }

    /// (Re)creates whichever triggers are missing. Does nothing when already running.
    pub fn resume(&mut self) {
        let now = self.now;
        let (instruction_period, timer_period) = (self.instruction_period, self.timer_period);
        self.instruction
            .get_or_insert_with(|| Trigger::new(instruction_period, now));
        self.timer.get_or_insert_with(|| Trigger::new(timer_period, now));
    }

    /// Moves time forward by `elapsed` and returns the ticks that fell due, earliest first.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Tick> {
        if self.is_paused() {
            return Vec::new();
        }
        self.now += elapsed;

        let mut ticks = Vec::new();
        loop {
            let timer_due = self.timer.filter(|t| t.due <= self.now).map(|t| t.due);
            let instruction_due = self.instruction.filter(|t| t.due <= self.now).map(|t| t.due);
            let (tick, trigger) = match (timer_due, instruction_due) {
                (None, None) => break,
                (Some(t), Some(i)) if i < t => (Tick::Instruction, &mut self.instruction),
                (Some(_), _) => (Tick::Timer, &mut self.timer),
                (None, Some(_)) => (Tick::Instruction, &mut self.instruction),
            };
            if let Some(trigger) = trigger {
                trigger.due += trigger.period;
            }
            ticks.push(tick);
        }
        ticks
    }
}
