//! Feed navigation state machine.
//!
//! Owns the ordered feed of video ids, the single "current" position, and
//! the playback/mute lifecycle around it. The machine is an explicit state
//! object with one reducer-style transition function: gesture and timer
//! events go in, playback commands and timer requests come out as
//! [`Effect`]s. It performs no I/O and holds no timers itself, so every
//! timing rule is unit-testable with plain [`Instant`] arithmetic.
//!
//! Two independent mechanisms suppress rapid-fire navigation: the gesture
//! debounce (one accepted gesture per [`GESTURE_DEBOUNCE`] window) stops a
//! single physical swipe from counting twice, and the transition cooldown
//! ([`TRANSITION_COOLDOWN`] after any index change) stops a new transition
//! from interrupting the one in flight.

pub mod debounce;
pub mod playback;

use std::time::{Duration, Instant};

use crate::error::CoreError;
use crate::types::DbId;

use debounce::{Debouncer, TapDetector};

/// Window after any index change during which navigation is ignored.
pub const TRANSITION_COOLDOWN: Duration = Duration::from_millis(500);

/// Minimum gap between two accepted navigation gestures.
pub const GESTURE_DEBOUNCE: Duration = Duration::from_millis(300);

/// Maximum gap between two taps that count as a double tap.
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);

/// Lifetime of the transient double-tap like signal.
pub const LIKE_ANIMATION_DURATION: Duration = Duration::from_millis(800);

/// Delay between pausing every element and starting the new current one,
/// so the pauses settle before playback begins.
pub const PLAYBACK_SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Interval at which the driver samples playback progress.
pub const PROGRESS_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Minimum vertical touch travel, in pixels, for a swipe to navigate.
pub const SWIPE_THRESHOLD_PX: f32 = 80.0;

/// Visual direction of the last transition. Affects presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Timers the machine asks its driver to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    /// Clears `is_transitioning` once the transition animation is done.
    TransitionCooldown,
    /// Starts playback of the new current video after the settle delay.
    PlaybackStart,
    /// Expires the double-tap like signal.
    LikeAnimation,
}

/// Input events: user gestures, timer expiries, and progress samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedEvent {
    /// Vertical wheel scroll; positive delta advances the feed.
    Wheel { delta_y: f32 },
    /// Finger down at the given vertical coordinate.
    TouchStart { y: f32 },
    /// Finger up at the given vertical coordinate.
    TouchEnd { y: f32 },
    /// Tap on the video surface (double taps fire the like signal).
    Tap,
    /// Sound-button press.
    ToggleMute,
    /// Programmatic advance, same guards as a gesture minus the debounce.
    Next,
    /// Programmatic step back.
    Prev,
    /// A previously scheduled timer fired.
    TimerFired(Timer),
    /// Playback position sample for the current video, in seconds.
    ProgressSample { position: f32, duration: f32 },
}

/// Commands the machine emits for its driver to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Pause every tracked element, rewind it to the start, and mute it.
    PauseAll,
    /// Start the given video from the beginning with the given mute state.
    Play { video: DbId, muted: bool },
    /// Flip the live mute flag of the given video.
    SetMuted { video: DbId, muted: bool },
    /// Run `timer` after `delay`, then feed back [`FeedEvent::TimerFired`].
    Schedule { timer: Timer, delay: Duration },
    /// Cancel a pending timer without firing it.
    Cancel { timer: Timer },
}

/// The feed controller state.
///
/// Construct with [`FeedMachine::new`] (which refuses an empty feed -- the
/// empty-state view never enters this machine), emit the initial playback
/// effects with [`FeedMachine::start`], then push every event through
/// [`FeedMachine::handle`].
#[derive(Debug)]
pub struct FeedMachine {
    videos: Vec<DbId>,
    current_index: usize,
    direction: Direction,
    is_transitioning: bool,
    gesture_debounce: Debouncer,
    tap_detector: TapDetector,
    touch_start_y: Option<f32>,
    has_unmuted_once: bool,
    current_muted: bool,
    show_sound_hint: bool,
    like_animation: bool,
    progress: f32,
}

impl FeedMachine {
    /// Create a machine over a non-empty, server-ordered list of video ids.
    pub fn new(videos: Vec<DbId>) -> Result<Self, CoreError> {
        if videos.is_empty() {
            return Err(CoreError::Validation(
                "The feed requires at least one video".to_string(),
            ));
        }
        Ok(Self {
            videos,
            current_index: 0,
            direction: Direction::Forward,
            is_transitioning: false,
            gesture_debounce: Debouncer::new(GESTURE_DEBOUNCE),
            tap_detector: TapDetector::new(DOUBLE_TAP_WINDOW),
            touch_start_y: None,
            has_unmuted_once: false,
            current_muted: true,
            show_sound_hint: true,
            like_animation: false,
            progress: 0.0,
        })
    }

    /// Effects for the initial load: stop everything, then start the first
    /// video (muted) after the settle delay. Does not mark a transition in
    /// flight, so the first gesture is accepted immediately.
    pub fn start(&mut self) -> Vec<Effect> {
        self.index_change_effects()
    }

    /// Apply one event at time `now` and return the effects to execute.
    pub fn handle(&mut self, event: FeedEvent, now: Instant) -> Vec<Effect> {
        match event {
            FeedEvent::Wheel { delta_y } => self.on_wheel(delta_y, now),
            FeedEvent::TouchStart { y } => {
                if !self.is_transitioning {
                    self.touch_start_y = Some(y);
                }
                Vec::new()
            }
            FeedEvent::TouchEnd { y } => self.on_touch_end(y, now),
            FeedEvent::Tap => self.on_tap(now),
            FeedEvent::ToggleMute => self.on_toggle_mute(),
            FeedEvent::Next => self.advance(Direction::Forward),
            FeedEvent::Prev => self.advance(Direction::Backward),
            FeedEvent::TimerFired(timer) => self.on_timer(timer),
            FeedEvent::ProgressSample { position, duration } => {
                if duration > 0.0 {
                    self.progress = (position / duration).clamp(0.0, 1.0);
                }
                Vec::new()
            }
        }
    }

    /// Teardown effects: pause and mute every tracked element and cancel
    /// every pending timer so none acts on stale state.
    pub fn shutdown(&self) -> Vec<Effect> {
        vec![
            Effect::PauseAll,
            Effect::Cancel {
                timer: Timer::TransitionCooldown,
            },
            Effect::Cancel {
                timer: Timer::PlaybackStart,
            },
            Effect::Cancel {
                timer: Timer::LikeAnimation,
            },
        ]
    }

    // -----------------------------------------------------------------------
    // Event handlers
    // -----------------------------------------------------------------------

    fn on_wheel(&mut self, delta_y: f32, now: Instant) -> Vec<Effect> {
        if self.is_transitioning {
            return Vec::new();
        }
        // The debounce slot is consumed on acceptance, before the transition
        // cooldown even starts.
        if !self.gesture_debounce.try_accept(now) {
            return Vec::new();
        }
        if delta_y > 0.0 {
            self.advance(Direction::Forward)
        } else if delta_y < 0.0 {
            self.advance(Direction::Backward)
        } else {
            Vec::new()
        }
    }

    fn on_touch_end(&mut self, y: f32, now: Instant) -> Vec<Effect> {
        let Some(start_y) = self.touch_start_y else {
            return Vec::new();
        };
        if self.is_transitioning {
            return Vec::new();
        }
        if !self.gesture_debounce.ready(now) {
            return Vec::new();
        }

        let delta = start_y - y;
        // Sub-threshold swipes are dropped silently and do not consume the
        // debounce slot.
        let effects = if delta.abs() > SWIPE_THRESHOLD_PX {
            self.gesture_debounce.record(now);
            if delta > 0.0 {
                self.advance(Direction::Forward)
            } else {
                self.advance(Direction::Backward)
            }
        } else {
            Vec::new()
        };
        self.touch_start_y = None;
        effects
    }

    fn on_tap(&mut self, now: Instant) -> Vec<Effect> {
        if self.tap_detector.tap(now) {
            self.like_animation = true;
            return vec![Effect::Schedule {
                timer: Timer::LikeAnimation,
                delay: LIKE_ANIMATION_DURATION,
            }];
        }
        Vec::new()
    }

    fn on_toggle_mute(&mut self) -> Vec<Effect> {
        let video = self.current_id();
        if self.current_muted {
            self.current_muted = false;
            self.has_unmuted_once = true;
            self.show_sound_hint = false;
            vec![Effect::SetMuted {
                video,
                muted: false,
            }]
        } else {
            // Muting again does not reset the sticky unmute preference.
            self.current_muted = true;
            vec![Effect::SetMuted { video, muted: true }]
        }
    }

    fn on_timer(&mut self, timer: Timer) -> Vec<Effect> {
        match timer {
            Timer::TransitionCooldown => {
                self.is_transitioning = false;
                Vec::new()
            }
            Timer::PlaybackStart => vec![Effect::Play {
                video: self.current_id(),
                muted: self.current_muted,
            }],
            Timer::LikeAnimation => {
                self.like_animation = false;
                Vec::new()
            }
        }
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    fn advance(&mut self, direction: Direction) -> Vec<Effect> {
        if self.is_transitioning {
            return Vec::new();
        }
        self.is_transitioning = true;
        self.direction = direction;
        let n = self.videos.len();
        self.current_index = match direction {
            Direction::Forward => (self.current_index + 1) % n,
            Direction::Backward => (self.current_index + n - 1) % n,
        };
        self.index_change_effects()
    }

    /// The effect sequence run on every index change, including initial load:
    /// stop everything, then start the new current element after the settle
    /// delay with the mute state dictated by the sticky unmute preference.
    fn index_change_effects(&mut self) -> Vec<Effect> {
        self.progress = 0.0;
        self.current_muted = !self.has_unmuted_once;
        vec![
            Effect::PauseAll,
            Effect::Schedule {
                timer: Timer::PlaybackStart,
                delay: PLAYBACK_SETTLE_DELAY,
            },
            Effect::Schedule {
                timer: Timer::TransitionCooldown,
                delay: TRANSITION_COOLDOWN,
            },
        ]
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The server-ordered video ids backing the feed.
    pub fn videos(&self) -> &[DbId] {
        &self.videos
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        // Construction refuses empty feeds, but keep the conventional pair.
        self.videos.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Id of the current video.
    pub fn current_id(&self) -> DbId {
        self.videos[self.current_index]
    }

    /// Visual direction of the last transition.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    /// Live mute state of the current element, for the sound-icon affordance.
    pub fn is_muted(&self) -> bool {
        self.current_muted
    }

    /// Whether the user has ever unmuted this session.
    pub fn has_unmuted_once(&self) -> bool {
        self.has_unmuted_once
    }

    /// Whether the one-time "tap to unmute" hint is still showing.
    pub fn show_sound_hint(&self) -> bool {
        self.show_sound_hint
    }

    /// Whether the double-tap like signal is currently visible.
    pub fn like_animation_active(&self) -> bool {
        self.like_animation
    }

    /// Sampled playback progress of the current video in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.progress
    }
}
