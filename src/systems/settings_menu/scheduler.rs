use std::time::Duration;

use super::defs::EntryId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeferredStep {
    CompleteOpen(EntryId),
    CompleteBack(EntryId),
    RefreshValue { entry: EntryId, close_dialog: bool },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledStep {
    pub session: u64,
    pub step: DeferredStep,
    not_before_tick: u64,
    remaining: Duration,
}

/// Frame-driven queue. A step never runs in the frame it was scheduled.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    tick: u64,
    pending: Vec<ScheduledStep>,
}

impl DeferredQueue {
    pub fn next_frame(&mut self, session: u64, step: DeferredStep) {
        self.after(session, step, Duration::ZERO);
    }

    pub fn after(&mut self, session: u64, step: DeferredStep, delay: Duration) {
        self.pending.push(ScheduledStep {
            session,
            step,
            not_before_tick: self.tick + 1,
            remaining: delay,
        });
    }

    pub fn advance(&mut self, delta: Duration) -> Vec<ScheduledStep> {
        self.tick += 1;
        let tick = self.tick;

        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .map(|mut scheduled| {
                if scheduled.not_before_tick <= tick {
                    scheduled.remaining = scheduled.remaining.saturating_sub(delta);
                }
                scheduled
            })
            .partition(|scheduled| {
                scheduled.not_before_tick <= tick && scheduled.remaining.is_zero()
            });

        self.pending = waiting;
        due
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_frame_steps_wait_for_one_advance() {
        let mut queue = DeferredQueue::default();
        queue.next_frame(3, DeferredStep::CompleteOpen(EntryId::new("speed")));

        let due = queue.advance(Duration::from_millis(16));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].session, 3);
        assert_eq!(due[0].step, DeferredStep::CompleteOpen(EntryId::new("speed")));
        assert!(queue.is_empty());
    }

    #[test]
    fn delayed_steps_accumulate_frame_time() {
        let mut queue = DeferredQueue::default();
        queue.after(
            0,
            DeferredStep::RefreshValue {
                entry: EntryId::new("captions"),
                close_dialog: true,
            },
            Duration::from_millis(40),
        );

        assert!(queue.advance(Duration::from_millis(16)).is_empty());
        assert!(queue.advance(Duration::from_millis(16)).is_empty());
        assert_eq!(queue.advance(Duration::from_millis(16)).len(), 1);
    }

    #[test]
    fn due_steps_keep_scheduling_order() {
        let mut queue = DeferredQueue::default();
        queue.next_frame(0, DeferredStep::CompleteBack(EntryId::new("a")));
        queue.next_frame(0, DeferredStep::CompleteOpen(EntryId::new("b")));

        let steps: Vec<_> = queue
            .advance(Duration::ZERO)
            .into_iter()
            .map(|scheduled| scheduled.step)
            .collect();
        assert_eq!(
            steps,
            vec![
                DeferredStep::CompleteBack(EntryId::new("a")),
                DeferredStep::CompleteOpen(EntryId::new("b")),
            ]
        );
    }
}
