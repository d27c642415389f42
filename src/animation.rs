//! Linear opacity fades.
//!
//! A fade applies its first step immediately and then one step per interval
//! until it reaches its end value, which it lands on exactly. Two fades started
//! together with the same duration make a cross-fade; the animator itself
//! knows nothing about pairing.

use std::collections::HashMap;
use std::time::Duration;

use backdrop_platform::{DisplayHandle, TimerId};

use crate::host::Host;
use crate::message::Message;

/// Token of one fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FadeId(u64);

/// Opacity interpolation from `start` to `end` in fixed steps.
#[derive(Debug, Clone)]
pub struct Fade {
    target: DisplayHandle,
    start: f64,
    end: f64,
    increment: f64,
    total_steps: u32,
    steps_taken: u32,
    current: f64,
}

impl Fade {
    pub fn new(target: DisplayHandle, start: f64, end: f64, duration: Duration, step: Duration) -> Self {
        let steps = if step.is_zero() {
            0.0
        } else {
            duration.as_secs_f64() / step.as_secs_f64()
        };
        let increment = if steps > 0.0 {
            (end - start) / steps
        } else {
            end - start
        };
        Self {
            target,
            start,
            end,
            increment,
            total_steps: (steps.ceil() as u32).max(1),
            steps_taken: 0,
            current: start,
        }
    }

    pub fn target(&self) -> &DisplayHandle {
        &self.target
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn increment(&self) -> f64 {
        self.increment
    }

    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    pub fn is_finished(&self) -> bool {
        self.steps_taken > 0 && self.current == self.end
    }

    /// Advance one step and return the opacity to apply. The final step
    /// returns exactly `end`.
    pub fn step(&mut self) -> f64 {
        if self.is_finished() {
            return self.end;
        }
        self.steps_taken += 1;
        let next = self.start + self.increment * f64::from(self.steps_taken);
        let passed = if self.end > self.start {
            next >= self.end
        } else {
            next <= self.end
        };
        self.current = if passed || self.steps_taken >= self.total_steps {
            self.end
        } else {
            next
        };
        self.current
    }
}

struct RunningFade {
    fade: Fade,
    timer: Option<TimerId>,
}

/// Owns every running fade and its pending step timer.
pub struct Animator {
    step: Duration,
    next_id: u64,
    running: HashMap<FadeId, RunningFade>,
}

impl Animator {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            next_id: 0,
            running: HashMap::new(),
        }
    }

    /// Start fading `target` from `start` to `end` over `duration`.
    ///
    /// A fade already running on the same target is cancelled first.
    pub fn fade(
        &mut self,
        target: &DisplayHandle,
        start: f64,
        end: f64,
        duration: Duration,
        host: &mut dyn Host,
    ) -> FadeId {
        self.cancel_target(target, host);

        let id = FadeId(self.next_id);
        self.next_id += 1;

        let fade = Fade::new(target.clone(), start, end, duration, self.step);
        self.running.insert(id, RunningFade { fade, timer: None });
        self.advance(id, host);
        id
    }

    /// Apply the next step of fade `id`, scheduling another one unless it
    /// finished. Returns false for unknown (finished or cancelled) fades.
    pub fn advance(&mut self, id: FadeId, host: &mut dyn Host) -> bool {
        let Some(running) = self.running.get_mut(&id) else {
            return false;
        };
        let opacity = running.fade.step();
        host.stage().set_opacity(running.fade.target(), opacity);

        if running.fade.is_finished() {
            log::trace!(
                "Fade on {} finished after {} steps",
                running.fade.target(),
                running.fade.steps_taken()
            );
            self.running.remove(&id);
        } else {
            running.timer = Some(host.scheduler().schedule_once(self.step, Message::FadeStep(id)));
        }
        true
    }

    /// Cancel fade `id`, leaving its target at its current opacity.
    pub fn cancel(&mut self, id: FadeId, host: &mut dyn Host) -> bool {
        match self.running.remove(&id) {
            Some(running) => {
                if let Some(timer) = running.timer {
                    host.scheduler().cancel(timer);
                }
                true
            }
            None => false,
        }
    }

    /// Cancel every running fade.
    pub fn cancel_all(&mut self, host: &mut dyn Host) {
        let ids: Vec<FadeId> = self.running.keys().copied().collect();
        for id in ids {
            self.cancel(id, host);
        }
    }

    /// Whether `target` has a fade in flight.
    pub fn is_animating(&self, target: &DisplayHandle) -> bool {
        self.running.values().any(|r| r.fade.target() == target)
    }

    pub fn running_count(&self) -> usize {
        self.running.len()
    }

    fn cancel_target(&mut self, target: &DisplayHandle, host: &mut dyn Host) {
        let ids: Vec<FadeId> = self
            .running
            .iter()
            .filter(|(_, r)| r.fade.target() == target)
            .map(|(id, _)| *id)
            .collect();
        for id in ids {
            log::debug!("Cancelling fade on {} for a new one", target);
            self.cancel(id, host);
        }
    }
}
