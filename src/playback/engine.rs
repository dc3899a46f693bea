// SPDX-FileCopyrightText: 2026  The Flick developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::{self, Display, Formatter};

use gtk::glib;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PipelineState {
    // Reported as the pending state when no transition is in flight
    VoidPending,
    #[default]
    Null,
    Ready,
    Paused,
    Playing,
}

impl PipelineState {
    /// Whether position and duration queries make sense in this state.
    pub fn is_active(self) -> bool {
        matches!(self, PipelineState::Paused | PipelineState::Playing)
    }
}

impl Display for PipelineState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            PipelineState::VoidPending => write!(f, "VOID_PENDING"),
            PipelineState::Null => write!(f, "NULL"),
            PipelineState::Ready => write!(f, "READY"),
            PipelineState::Paused => write!(f, "PAUSED"),
            PipelineState::Playing => write!(f, "PLAYING"),
        }
    }
}

impl From<gst::State> for PipelineState {
    fn from(state: gst::State) -> Self {
        match state {
            gst::State::Null => PipelineState::Null,
            gst::State::Ready => PipelineState::Ready,
            gst::State::Paused => PipelineState::Paused,
            gst::State::Playing => PipelineState::Playing,
            _ => PipelineState::VoidPending,
        }
    }
}

impl From<PipelineState> for gst::State {
    fn from(state: PipelineState) -> Self {
        match state {
            PipelineState::VoidPending => gst::State::VoidPending,
            PipelineState::Null => gst::State::Null,
            PipelineState::Ready => gst::State::Ready,
            PipelineState::Paused => gst::State::Paused,
            PipelineState::Playing => gst::State::Playing,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Video,
    Audio,
    Text,
}

impl Display for StreamKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            StreamKind::Video => write!(f, "video"),
            StreamKind::Audio => write!(f, "audio"),
            StreamKind::Text => write!(f, "text"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct StreamCounts {
    pub video: u32,
    pub audio: u32,
    pub text: u32,
}

/// The subset of a stream's tag list that we display.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct StreamTags {
    pub codec: Option<String>,
    pub language: Option<String>,
    pub bitrate: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Unable to create the '{name}' element")]
    MissingElement {
        name: &'static str,
        #[source]
        source: glib::BoolError,
    },
    #[error("Pipeline without bus")]
    MissingBus,
    #[error("Unable to watch the pipeline bus")]
    BusWatch(#[source] glib::BoolError),
    #[error("Unable to set the pipeline to the {0} state")]
    StateChange(PipelineState),
    #[error("Unable to seek to {position}")]
    Seek {
        position: gst::ClockTime,
        #[source]
        source: glib::BoolError,
    },
}

// The media pipeline as seen by the session. Every call returns
// immediately, except `settle`, which waits for a pending state
// change to complete.
pub trait MediaEngine {
    fn set_state(&self, state: PipelineState) -> Result<(), EngineError>;

    fn query_position(&self) -> Option<gst::ClockTime>;
    fn query_duration(&self) -> Option<gst::ClockTime>;
    fn seek(&self, position: gst::ClockTime, flags: gst::SeekFlags) -> Result<(), EngineError>;

    fn stream_counts(&self) -> StreamCounts;
    fn stream_tags(&self, kind: StreamKind, index: u32) -> Option<StreamTags>;

    fn settle(&self, timeout: gst::ClockTime) -> Option<PipelineState>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gst_states_map_both_ways() {
        for state in [
            PipelineState::VoidPending,
            PipelineState::Null,
            PipelineState::Ready,
            PipelineState::Paused,
            PipelineState::Playing,
        ] {
            let gst_state: gst::State = state.into();
            assert_eq!(PipelineState::from(gst_state), state);
        }
    }

    #[test]
    fn only_paused_and_playing_are_active() {
        assert!(!PipelineState::VoidPending.is_active());
        assert!(!PipelineState::Null.is_active());
        assert!(!PipelineState::Ready.is_active());
        assert!(PipelineState::Paused.is_active());
        assert!(PipelineState::Playing.is_active());
    }
}
