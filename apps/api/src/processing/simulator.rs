//! Tick arithmetic for the Processing step.
//!
//! Progress is derived from an integer tick count so the final tick lands on
//! exactly 100.0 with no floating-point drift.

use super::ProcessingTiming;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayStep {
    pub title: &'static str,
    pub description: &'static str,
}

pub const STEPS: [DisplayStep; 6] = [
    DisplayStep {
        title: "Reading your resume...",
        description: "Analyzing document structure and extracting text content",
    },
    DisplayStep {
        title: "Extracting personal information...",
        description: "Identifying contact details and professional summary",
    },
    DisplayStep {
        title: "Analyzing work experience...",
        description: "Processing job titles, companies, and achievements",
    },
    DisplayStep {
        title: "Identifying skills and education...",
        description: "Categorizing technical skills and educational background",
    },
    DisplayStep {
        title: "Optimizing content structure...",
        description: "Organizing information for maximum impact",
    },
    DisplayStep {
        title: "Preparing website templates...",
        description: "Getting everything ready for template selection",
    },
];

/// `min(steps - 1, floor(progress / 100 * steps))`, with progress clamped to [0, 100].
pub fn display_step_index(progress: f64, steps: usize) -> usize {
    if steps == 0 {
        return 0;
    }
    let fraction = progress.clamp(0.0, 100.0) / 100.0;
    ((fraction * steps as f64).floor() as usize).min(steps - 1)
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Advanced,
    /// Returned by exactly one tick: the one that reaches 100%.
    Completed,
    /// Any tick after completion. Changes nothing.
    Idle,
}

#[derive(Debug, Clone)]
pub struct ProgressSimulator {
    ticks: u32,
    total_ticks: u32,
    completed: bool,
}

impl ProgressSimulator {
    pub fn new(timing: &ProcessingTiming) -> Self {
        let tick_ms = timing.tick.as_millis().max(1);
        let total = (timing.duration.as_millis() / tick_ms).max(1);
        Self {
            ticks: 0,
            total_ticks: u32::try_from(total).unwrap_or(u32::MAX),
            completed: false,
        }
    }

    pub fn total_ticks(&self) -> u32 {
        self.total_ticks
    }

    pub fn progress(&self) -> f64 {
        (f64::from(self.ticks) * 100.0 / f64::from(self.total_ticks)).min(100.0)
    }

    pub fn step_index(&self) -> usize {
        display_step_index(self.progress(), STEPS.len())
    }

    pub fn current_step(&self) -> DisplayStep {
        STEPS[self.step_index()]
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn tick(&mut self) -> Tick {
        if self.completed {
            return Tick::Idle;
        }
        self.ticks += 1;
        if self.ticks >= self.total_ticks {
            self.completed = true;
            Tick::Completed
        } else {
            Tick::Advanced
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_simulator() -> ProgressSimulator {
        ProgressSimulator::new(&ProcessingTiming::default())
    }

    #[test]
    fn test_default_timing_is_eighty_ticks() {
        let sim = default_simulator();
        assert_eq!(sim.total_ticks(), 80);
        assert_eq!(sim.progress(), 0.0);
        assert_eq!(sim.step_index(), 0);
    }

    #[test]
    fn test_each_tick_adds_one_and_a_quarter_percent() {
        let mut sim = default_simulator();
        sim.tick();
        assert!((sim.progress() - 1.25).abs() < 1e-9);
        for _ in 0..39 {
            sim.tick();
        }
        assert!((sim.progress() - 50.0).abs() < 1e-9);
        assert_eq!(sim.step_index(), 3);
    }

    #[test]
    fn test_completes_exactly_once() {
        let mut sim = default_simulator();
        let mut completions = 0;
        for _ in 0..200 {
            if sim.tick() == Tick::Completed {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(sim.progress(), 100.0);
        assert_eq!(sim.tick(), Tick::Idle);
    }

    #[test]
    fn test_completion_lands_on_last_step() {
        let mut sim = default_simulator();
        while sim.tick() != Tick::Completed {}
        assert_eq!(sim.step_index(), STEPS.len() - 1);
        assert_eq!(sim.current_step().title, "Preparing website templates...");
    }

    #[test]
    fn test_step_index_matches_formula_and_is_monotonic() {
        let mut sim = default_simulator();
        let mut previous = sim.step_index();
        loop {
            let outcome = sim.tick();
            let p = sim.progress();
            let expected = ((p / 100.0 * 6.0).floor() as usize).min(5);
            assert_eq!(sim.step_index(), expected, "at progress {p}");
            assert!(sim.step_index() >= previous);
            previous = sim.step_index();
            if outcome == Tick::Completed {
                break;
            }
        }
    }

    #[test]
    fn test_display_step_index_samples() {
        assert_eq!(display_step_index(0.0, 6), 0);
        assert_eq!(display_step_index(16.0, 6), 0);
        assert_eq!(display_step_index(16.67, 6), 1);
        assert_eq!(display_step_index(99.9, 6), 5);
        assert_eq!(display_step_index(100.0, 6), 5);
        assert_eq!(display_step_index(150.0, 6), 5);
        assert_eq!(display_step_index(-5.0, 6), 0);
        assert_eq!(display_step_index(50.0, 0), 0);
    }

    #[test]
    fn test_display_step_index_monotonic_over_samples() {
        let mut previous = 0;
        for i in 0..=1000 {
            let p = f64::from(i) / 10.0;
            let idx = display_step_index(p, 6);
            assert!(idx >= previous);
            previous = idx;
        }
    }

    #[test]
    fn test_tick_longer_than_duration_completes_on_first_tick() {
        let timing = ProcessingTiming {
            duration: std::time::Duration::from_millis(50),
            tick: std::time::Duration::from_millis(100),
            navigate_delay: std::time::Duration::ZERO,
        };
        let mut sim = ProgressSimulator::new(&timing);
        assert_eq!(sim.tick(), Tick::Completed);
    }
}
