//! Live playback handles for the feed.
//!
//! [`PlayerRegistry`] maps video identity to a media-element handle behind
//! the [`PlayerHandle`] trait, with explicit attach/detach lifecycle. Keying
//! by identity rather than feed position keeps the registry correct if the
//! underlying list is ever reordered or filtered. The registry executes the
//! machine's playback effects; scheduling effects are the event loop's
//! business and pass through untouched.

use std::collections::HashMap;

use crate::types::DbId;

use super::Effect;

/// One live media element. Implemented by whatever playback surface embeds
/// the feed (a web view, a native player, a test double).
pub trait PlayerHandle {
    fn play(&mut self);
    fn pause(&mut self);
    fn seek_to_start(&mut self);
    fn set_muted(&mut self, muted: bool);
    fn is_playing(&self) -> bool;
    /// Current playback position in seconds.
    fn position(&self) -> f32;
    /// Media duration in seconds; `0.0` until metadata is available.
    fn duration(&self) -> f32;
}

/// Identity-keyed collection of live playback handles.
#[derive(Debug, Default)]
pub struct PlayerRegistry<H> {
    players: HashMap<DbId, H>,
}

impl<H: PlayerHandle> PlayerRegistry<H> {
    pub fn new() -> Self {
        Self {
            players: HashMap::new(),
        }
    }

    /// Register the handle for a video, returning any handle it replaced.
    pub fn attach(&mut self, video: DbId, handle: H) -> Option<H> {
        self.players.insert(video, handle)
    }

    /// Remove and return the handle for a video.
    pub fn detach(&mut self, video: DbId) -> Option<H> {
        self.players.remove(&video)
    }

    pub fn get(&self, video: DbId) -> Option<&H> {
        self.players.get(&video)
    }

    pub fn get_mut(&mut self, video: DbId) -> Option<&mut H> {
        self.players.get_mut(&video)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Execute a playback effect. Scheduling effects are ignored here.
    pub fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::PauseAll => {
                for handle in self.players.values_mut() {
                    handle.pause();
                    handle.set_muted(true);
                    handle.seek_to_start();
                }
            }
            Effect::Play { video, muted } => {
                if let Some(handle) = self.players.get_mut(video) {
                    handle.seek_to_start();
                    handle.set_muted(*muted);
                    handle.play();
                }
            }
            Effect::SetMuted { video, muted } => {
                if let Some(handle) = self.players.get_mut(video) {
                    handle.set_muted(*muted);
                }
            }
            Effect::Schedule { .. } | Effect::Cancel { .. } => {}
        }
    }

    /// `(position, duration)` sample for the given video, for progress polling.
    pub fn sample(&self, video: DbId) -> Option<(f32, f32)> {
        self.players
            .get(&video)
            .map(|h| (h.position(), h.duration()))
    }

    /// Number of handles currently playing.
    pub fn playing_count(&self) -> usize {
        self.players.values().filter(|h| h.is_playing()).count()
    }

    /// Unconditional teardown: pause and mute every tracked element.
    pub fn shutdown(&mut self) {
        for handle in self.players.values_mut() {
            handle.pause();
            handle.set_muted(true);
        }
    }
}
