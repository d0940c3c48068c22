use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::anyhow;
use taskdag::TaskDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Started,
    Finished,
}

/// One recorded start or finish. `tick` is a global sequence number, so
/// comparing ticks gives a strict happens-before order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub task: String,
    pub kind: EventKind,
    pub tick: usize,
}

#[derive(Debug, Default)]
struct Inner {
    events: Vec<Event>,
    running: usize,
    max_running: usize,
}

/// Shared recorder for task bodies.
///
/// Bodies built from a timeline record when they start and finish and how
/// many bodies were running at the same time.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    inner: Arc<Mutex<Inner>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// A body that records itself and sleeps for `hold`.
    pub fn work(
        &self,
        name: &str,
        hold: Duration,
    ) -> impl Fn() -> anyhow::Result<()> + Send + Sync + 'static {
        let timeline = self.clone();
        let name = name.to_string();
        move || {
            timeline.start(&name);
            thread::sleep(hold);
            timeline.finish(&name);
            Ok(())
        }
    }

    /// A body that records itself and then returns an error.
    pub fn failing_work(&self, name: &str) -> impl Fn() -> anyhow::Result<()> + Send + Sync + 'static {
        let timeline = self.clone();
        let name = name.to_string();
        move || {
            timeline.start(&name);
            timeline.finish(&name);
            Err(anyhow!("task {name} failed on purpose"))
        }
    }

    /// A body that records itself and then panics.
    pub fn panicking_work(&self, name: &str) -> impl Fn() -> anyhow::Result<()> + Send + Sync + 'static {
        let timeline = self.clone();
        let name = name.to_string();
        move || {
            timeline.start(&name);
            timeline.finish(&name);
            panic!("task {name} panicked on purpose");
        }
    }

    /// Descriptor whose body is [`Timeline::work`].
    pub fn descriptor(&self, name: &str, hold: Duration) -> TaskDescriptor {
        TaskDescriptor::new(name, self.work(name, hold))
    }

    pub fn events(&self) -> Vec<Event> {
        self.inner.lock().unwrap().events.clone()
    }

    pub fn start_tick(&self, task: &str) -> Option<usize> {
        self.tick_of(task, EventKind::Started)
    }

    pub fn finish_tick(&self, task: &str) -> Option<usize> {
        self.tick_of(task, EventKind::Finished)
    }

    /// How many times `task`'s body was entered.
    pub fn run_count(&self, task: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .events
            .iter()
            .filter(|e| e.task == task && e.kind == EventKind::Started)
            .count()
    }

    /// Task names in the order their bodies started.
    pub fn start_order(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap()
            .events
            .iter()
            .filter(|e| e.kind == EventKind::Started)
            .map(|e| e.task.clone())
            .collect()
    }

    /// Highest number of bodies that were running at the same time.
    pub fn max_running(&self) -> usize {
        self.inner.lock().unwrap().max_running
    }

    fn start(&self, task: &str) {
        let mut inner = self.inner.lock().unwrap();
        let tick = inner.events.len();
        inner.events.push(Event {
            task: task.to_string(),
            kind: EventKind::Started,
            tick,
        });
        inner.running += 1;
        inner.max_running = inner.max_running.max(inner.running);
    }

    fn finish(&self, task: &str) {
        let mut inner = self.inner.lock().unwrap();
        let tick = inner.events.len();
        inner.events.push(Event {
            task: task.to_string(),
            kind: EventKind::Finished,
            tick,
        });
        inner.running -= 1;
    }

    fn tick_of(&self, task: &str, kind: EventKind) -> Option<usize> {
        self.inner
            .lock()
            .unwrap()
            .events
            .iter()
            .find(|e| e.task == task && e.kind == kind)
            .map(|e| e.tick)
    }
}
