use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::{MotionError, Scheduler, Surface, TimerGuard};

/// Fixed lines revealed by the typewriter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    lines: Vec<Vec<char>>,
}

impl Script {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.chars().collect()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line(&self, index: usize) -> Option<&[char]> {
        self.lines.get(index).map(Vec::as_slice)
    }

    /// Total number of ticks that change the output.
    pub fn total_steps(&self) -> usize {
        let chars: usize = self.lines.iter().map(Vec::len).sum();
        chars + self.lines.len().saturating_sub(1)
    }

    /// The fully revealed text.
    pub fn rendered(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Reveal position: `column` counts characters already copied from `line`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    line: usize,
    column: usize,
    output: String,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn is_done(&self, script: &Script) -> bool {
        self.line >= script.len()
    }

    pub fn advance(mut self, script: &Script) -> Self {
        self.step(script);
        self
    }

    /// Consume one character, or break to the next line once the current one
    /// is exhausted. Returns whether the output changed.
    pub fn step(&mut self, script: &Script) -> bool {
        let Some(line) = script.line(self.line) else {
            return false;
        };
        if let Some(ch) = line.get(self.column) {
            self.output.push(*ch);
            self.column += 1;
            return true;
        }
        self.line += 1;
        self.column = 0;
        if self.line < script.len() {
            self.output.push('\n');
            true
        } else {
            false
        }
    }
}

/// A running typewriter bound to one surface. Dropping it stops the ticks.
pub struct Typewriter {
    cursor: Rc<RefCell<Cursor>>,
    timer: TimerGuard,
}

impl Typewriter {
    pub fn start<S>(
        scheduler: Rc<dyn Scheduler>,
        script: Script,
        period: Duration,
        surface: S,
    ) -> Result<Self, MotionError>
    where
        S: Surface + 'static,
    {
        let cursor = Rc::new(RefCell::new(Cursor::new()));
        let state = cursor.clone();
        let id = scheduler.set_interval(
            period,
            Box::new(move || {
                let mut cursor = state.borrow_mut();
                if cursor.step(&script) {
                    surface.set_text(cursor.output());
                }
            }),
        )?;
        log::debug!("typewriter started with {}ms ticks", period.as_millis());
        Ok(Self {
            cursor,
            timer: TimerGuard::new(scheduler, id),
        })
    }

    pub fn output(&self) -> String {
        self.cursor.borrow().output().to_string()
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.timer.is_active()
    }

    pub fn dispose(&self) {
        self.timer.dispose();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::motion::testing::ManualScheduler;
    use crate::motion::Pose;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl Surface for Recorder {
        fn set_text(&self, text: &str) {
            self.0.borrow_mut().push(text.to_string());
        }

        fn apply(&self, _pose: &Pose) {}
    }

    #[test]
    fn test_two_line_scenario() {
        let script = Script::new(&["AB", "C"]);
        let mut cursor = Cursor::new();
        let mut seen = Vec::new();
        for _ in 0..7 {
            cursor = cursor.advance(&script);
            seen.push(cursor.output().to_string());
        }
        assert_eq!(seen, vec!["A", "AB", "AB\n", "AB\nC", "AB\nC", "AB\nC", "AB\nC"]);
        assert!(cursor.is_done(&script));
    }

    #[test]
    fn test_idempotent_after_exhaustion() {
        let script = Script::new(&["$ curl -s example.com", "[", "]"]);
        let mut cursor = Cursor::new();
        for _ in 0..script.total_steps() {
            assert!(cursor.step(&script));
        }
        assert_eq!(cursor.output(), script.rendered());
        let settled = cursor.clone();
        for _ in 0..50 {
            assert!(!cursor.step(&script));
        }
        assert_eq!(cursor, settled.advance(&script));
        assert_eq!(cursor.output(), script.rendered());
    }

    #[test]
    fn test_output_is_always_a_prefix() {
        let script = Script::new(&["{ \"name\": \"go-gin-api\" }", "", "ünïcödé", "$ _"]);
        let full = script.rendered();
        let mut cursor = Cursor::new();
        let mut prev = String::new();
        for _ in 0..(script.total_steps() + 10) {
            cursor.step(&script);
            assert!(full.starts_with(cursor.output()));
            assert!(cursor.output().starts_with(&prev));
            assert!(cursor.column() <= script.line(cursor.line()).map_or(0, <[char]>::len));
            assert!(cursor.line() <= script.len());
            prev = cursor.output().to_string();
        }
        assert_eq!(prev, full);
    }

    #[test]
    fn test_empty_script_is_done_immediately() {
        let script = Script::new(&[]);
        let cursor = Cursor::new();
        assert!(cursor.is_done(&script));
        assert_eq!(cursor.advance(&script).output(), "");
    }

    #[test]
    fn test_engine_ticks_and_teardown() {
        let clock = ManualScheduler::new();
        let surface = Recorder::default();
        let writer = Typewriter::start(
            Rc::new(clock.clone()),
            Script::new(&["AB", "C"]),
            Duration::from_millis(12),
            surface.clone(),
        )
        .unwrap();

        clock.advance(Duration::from_millis(24));
        assert_eq!(writer.output(), "AB");
        clock.advance(Duration::from_millis(120));
        assert_eq!(writer.output(), "AB\nC");
        // the surface is only written when the buffer changes
        assert_eq!(*surface.0.borrow(), vec!["A", "AB", "AB\n", "AB\nC"]);

        assert!(writer.is_running());
        writer.dispose();
        writer.dispose();
        assert!(!writer.is_running());
        assert_eq!(clock.active_timers(), 0);
        assert_eq!(clock.effective_cancels(), 1);
    }

    #[test]
    fn test_drop_releases_timer() {
        let clock = ManualScheduler::new();
        {
            let _writer = Typewriter::start(
                Rc::new(clock.clone()),
                Script::new(&["hello"]),
                Duration::from_millis(12),
                Recorder::default(),
            )
            .unwrap();
            assert_eq!(clock.active_timers(), 1);
        }
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn test_start_failure_is_reported() {
        let clock = ManualScheduler::failing();
        let res = Typewriter::start(
            Rc::new(clock),
            Script::new(&["x"]),
            Duration::from_millis(12),
            Recorder::default(),
        );
        assert!(matches!(res, Err(MotionError::Timer(_))));
    }

    #[test]
    fn test_remount_starts_fresh() {
        let clock = ManualScheduler::new();
        let script = Script::new(&["abc"]);
        let first = Typewriter::start(
            Rc::new(clock.clone()),
            script.clone(),
            Duration::from_millis(12),
            Recorder::default(),
        )
        .unwrap();
        clock.advance(Duration::from_millis(24));
        drop(first);
        let second = Typewriter::start(
            Rc::new(clock.clone()),
            script,
            Duration::from_millis(12),
            Recorder::default(),
        )
        .unwrap();
        assert_eq!(second.output(), "");
        clock.advance(Duration::from_millis(12));
        assert_eq!(second.output(), "a");
    }
}
