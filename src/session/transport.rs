use serde::{Deserialize, Serialize};

use crate::session::error::Precondition;

pub const PLAYBACK_RATES: [f32; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// Play/pause/seek/volume/rate state of the active media element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, utoipa::ToSchema)]
pub struct TransportState {
    playing: bool,
    /// seconds
    current_time: f64,
    /// Unknown until the media reports its metadata.
    duration: Option<f64>,
    volume: f32,
    muted: bool,
    playback_rate: f32,
}

impl Default for TransportState {
    fn default() -> Self {
        Self {
            playing: false,
            current_time: 0.0,
            duration: None,
            volume: 1.0,
            muted: false,
            playback_rate: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, utoipa::ToSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TransportAction {
    Play,
    Pause,
    TogglePlay,
    Seek { time: f64 },
    SetVolume { volume: f32 },
    ToggleMute,
    SetPlaybackRate { rate: f32 },
    /// Periodic position report from the media element.
    TimeUpdate { time: f64 },
    /// Media element finished reading metadata.
    LoadedMetadata { duration: f64 },
}

impl TransportState {
    pub fn playing(&self) -> bool {
        self.playing
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn playback_rate(&self) -> f32 {
        self.playback_rate
    }

    pub fn apply(&mut self, action: TransportAction) -> Result<(), Precondition> {
        match action {
            TransportAction::Play => self.playing = true,
            TransportAction::Pause => self.playing = false,
            TransportAction::TogglePlay => self.playing = !self.playing,
            TransportAction::Seek { time } | TransportAction::TimeUpdate { time } => {
                self.seek(time)
            }
            TransportAction::SetVolume { volume } => self.set_volume(volume)?,
            TransportAction::ToggleMute => self.muted = !self.muted,
            TransportAction::SetPlaybackRate { rate } => {
                if !PLAYBACK_RATES.contains(&rate) {
                    return Err(Precondition::InvalidPlaybackRate);
                }
                self.playback_rate = rate;
            }
            TransportAction::LoadedMetadata { duration } => {
                if duration.is_finite() && duration > 0.0 {
                    self.duration = Some(duration);
                    self.current_time = self.current_time.min(duration);
                }
            }
        }
        Ok(())
    }

    /// Moves the position without touching play/pause. Clamped to
    /// `[0, duration]` once the duration is known.
    pub fn seek(&mut self, time: f64) {
        let time = if time.is_finite() { time.max(0.0) } else { 0.0 };
        self.current_time = match self.duration {
            Some(duration) => time.min(duration),
            None => time,
        };
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), Precondition> {
        if volume.is_nan() {
            return Err(Precondition::InvalidVolume);
        }
        self.volume = volume.clamp(0.0, 1.0);
        self.muted = self.volume == 0.0;
        Ok(())
    }
}
