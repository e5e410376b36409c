//! Feed session: the navigation machine bound to live playback handles.
//!
//! [`FeedSession`] owns the machine, the identity-keyed player registry, and
//! the pending timer deadlines the machine has asked for. The embedding UI
//! forwards gestures via [`FeedSession::dispatch`] and calls
//! [`FeedSession::tick`] on its frame/poll cadence (at least every
//! [`PROGRESS_POLL_INTERVAL`]); everything else -- exclusive playback, mute
//! lifecycle, debouncing -- happens in here.

use std::time::Instant;

use scrollit_core::feed::playback::{PlayerHandle, PlayerRegistry};
use scrollit_core::feed::{Effect, FeedEvent, FeedMachine, Timer, PROGRESS_POLL_INTERVAL};
use scrollit_core::types::DbId;

use crate::api::{ApiClient, ClientError, VideoRecord};

/// What the feed screen should render.
#[derive(Debug)]
pub enum FeedView<H> {
    /// Zero videos: show the empty-state affordance, never the player UI.
    Empty,
    /// At least one video: a live session.
    Feed(FeedSession<H>),
}

/// A running feed over a non-empty video list.
#[derive(Debug)]
pub struct FeedSession<H> {
    videos: Vec<VideoRecord>,
    machine: FeedMachine,
    registry: PlayerRegistry<H>,
    /// Pending `(timer, due_at)` deadlines, at most one per timer kind.
    pending: Vec<(Timer, Instant)>,
}

impl<H: PlayerHandle> FeedSession<H> {
    /// Fetch the feed and build a view. A zero-video response (the server's
    /// distinct 404, already mapped by the client) yields [`FeedView::Empty`]
    /// -- the machine is never constructed for it. Transport failures
    /// propagate; retry is a full reload.
    pub async fn load(api: &ApiClient) -> Result<FeedView<H>, ClientError> {
        let videos = api.get_videos().await?;
        Ok(Self::from_videos(videos))
    }

    /// Build a view from an already-fetched list.
    pub fn from_videos(videos: Vec<VideoRecord>) -> FeedView<H> {
        let ids: Vec<DbId> = videos.iter().map(|v| v.id).collect();
        match FeedMachine::new(ids) {
            Ok(machine) => FeedView::Feed(Self {
                videos,
                machine,
                registry: PlayerRegistry::new(),
                pending: Vec::new(),
            }),
            Err(_) => FeedView::Empty,
        }
    }

    /// Register the live handle for a video element.
    pub fn attach_player(&mut self, video: DbId, handle: H) {
        self.registry.attach(video, handle);
    }

    /// Remove the handle for a video element.
    pub fn detach_player(&mut self, video: DbId) -> Option<H> {
        self.registry.detach(video)
    }

    /// Begin playback. Call once the players are attached.
    pub fn start(&mut self, now: Instant) {
        let effects = self.machine.start();
        self.run(effects, now);
    }

    /// Forward a gesture or programmatic event to the machine.
    pub fn dispatch(&mut self, event: FeedEvent, now: Instant) {
        let effects = self.machine.handle(event, now);
        self.run(effects, now);
    }

    /// Fire every timer due at `now` and sample playback progress.
    pub fn tick(&mut self, now: Instant) {
        let due: Vec<Timer> = self
            .pending
            .iter()
            .filter(|(_, at)| *at <= now)
            .map(|(timer, _)| *timer)
            .collect();
        self.pending.retain(|(_, at)| *at > now);

        for timer in due {
            self.dispatch(FeedEvent::TimerFired(timer), now);
        }

        if let Some((position, duration)) = self.registry.sample(self.machine.current_id()) {
            self.dispatch(FeedEvent::ProgressSample { position, duration }, now);
        }
    }

    /// Teardown: stop and mute everything, drop every pending timer.
    pub fn teardown(&mut self) {
        for effect in self.machine.shutdown() {
            self.registry.apply(&effect);
        }
        self.pending.clear();
    }

    /// Earliest pending deadline, for hosts that sleep between events.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(_, at)| *at).min()
    }

    /// The record currently on screen.
    pub fn current_video(&self) -> &VideoRecord {
        &self.videos[self.machine.current_index()]
    }

    /// All records in feed order.
    pub fn videos(&self) -> &[VideoRecord] {
        &self.videos
    }

    /// Read-only view of the navigation state (index, mute, progress, ...).
    pub fn machine(&self) -> &FeedMachine {
        &self.machine
    }

    fn run(&mut self, effects: Vec<Effect>, now: Instant) {
        for effect in effects {
            match effect {
                Effect::Schedule { timer, delay } => {
                    // Re-scheduling a timer replaces its previous deadline.
                    self.pending.retain(|(t, _)| *t != timer);
                    self.pending.push((timer, now + delay));
                }
                Effect::Cancel { timer } => {
                    self.pending.retain(|(t, _)| *t != timer);
                }
                other => self.registry.apply(&other),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use scrollit_core::feed::{PLAYBACK_SETTLE_DELAY, TRANSITION_COOLDOWN};
    use scrollit_core::video::VideoTransform;

    use super::*;

    #[derive(Debug, Default)]
    struct FakePlayer {
        playing: bool,
        muted: bool,
        position: f32,
        duration: f32,
    }

    impl PlayerHandle for FakePlayer {
        fn play(&mut self) {
            self.playing = true;
        }
        fn pause(&mut self) {
            self.playing = false;
        }
        fn seek_to_start(&mut self) {
            self.position = 0.0;
        }
        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }
        fn is_playing(&self) -> bool {
            self.playing
        }
        fn position(&self) -> f32 {
            self.position
        }
        fn duration(&self) -> f32 {
            self.duration
        }
    }

    fn record(id: i64, title: &str) -> VideoRecord {
        let now = chrono::Utc::now();
        VideoRecord {
            id,
            user_id: 1,
            video_url: format!("https://media.test/{id}.mp4"),
            title: title.to_string(),
            description: String::new(),
            thumbnail_url: format!("https://media.test/{id}.jpg"),
            transform: Some(VideoTransform::stored_default(Some(80))),
            created_at: now,
            updated_at: now,
        }
    }

    fn session(ids: &[i64]) -> FeedSession<FakePlayer> {
        let videos = ids.iter().map(|&id| record(id, "clip")).collect();
        let FeedView::Feed(mut session) = FeedSession::from_videos(videos) else {
            panic!("non-empty list must produce a live session");
        };
        for &id in ids {
            session.attach_player(id, FakePlayer::default());
        }
        session
    }

    #[test]
    fn empty_list_yields_the_empty_state() {
        let view: FeedView<FakePlayer> = FeedSession::from_videos(Vec::new());
        assert!(matches!(view, FeedView::Empty));
    }

    #[test]
    fn start_plays_the_first_video_after_the_settle_delay() {
        let mut s = session(&[10, 20]);
        let t0 = Instant::now();

        s.start(t0);
        assert_eq!(s.machine().current_index(), 0);
        assert_eq!(
            s.next_deadline(),
            Some(t0 + PLAYBACK_SETTLE_DELAY),
            "the settle timer is the nearest deadline"
        );

        s.tick(t0 + PLAYBACK_SETTLE_DELAY);
        assert!(s.registry.get(10).expect("player attached").is_playing());
        assert!(!s.registry.get(20).expect("player attached").is_playing());
    }

    #[test]
    fn wheel_navigation_moves_playback_to_the_next_video() {
        let mut s = session(&[10, 20]);
        let t0 = Instant::now();
        s.start(t0);
        s.tick(t0 + PLAYBACK_SETTLE_DELAY);

        // The initial cooldown timer expires, then the user swipes on.
        s.tick(t0 + TRANSITION_COOLDOWN);
        let swipe_at = t0 + TRANSITION_COOLDOWN + Duration::from_millis(1);
        s.dispatch(FeedEvent::Wheel { delta_y: 90.0 }, swipe_at);
        assert_eq!(s.machine().current_index(), 1);
        assert_eq!(s.current_video().id, 20);

        s.tick(swipe_at + PLAYBACK_SETTLE_DELAY);
        assert!(!s.registry.get(10).expect("player attached").is_playing());
        assert!(s.registry.get(20).expect("player attached").is_playing());
    }

    #[test]
    fn tick_samples_progress_of_the_current_video() {
        let mut s = session(&[10]);
        let t0 = Instant::now();
        s.start(t0);
        // Let playback start first; the play effect rewinds the element.
        s.tick(t0 + PLAYBACK_SETTLE_DELAY);

        if let Some(player) = s.registry.get_mut(10) {
            player.position = 4.0;
            player.duration = 8.0;
        }
        s.tick(t0 + PLAYBACK_SETTLE_DELAY + PROGRESS_POLL_INTERVAL);
        assert!((s.machine().progress() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn teardown_silences_everything_and_clears_timers() {
        let mut s = session(&[10, 20]);
        let t0 = Instant::now();
        s.start(t0);
        s.tick(t0 + PLAYBACK_SETTLE_DELAY);
        assert!(s.registry.get(10).expect("player attached").is_playing());

        s.teardown();
        assert_eq!(s.registry.playing_count(), 0);
        assert!(s.next_deadline().is_none());
        assert!(s.registry.get(10).expect("player attached").muted);
    }
}
