// SPDX-FileCopyrightText: 2026  The Flick developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::cell::Cell;

use log::debug;

use crate::playback::{MediaEngine, Session, SessionView};

/// The upper bound of the slider, in seconds, for a stream of the given
/// duration. The last second is kept out of reach so that rounding never
/// seeks past the end of the stream.
pub fn slider_upper(duration: gst::ClockTime) -> u64 {
    duration.seconds().saturating_sub(1)
}

// Blocks the slider's seek handler for as long as it is alive
struct SeekBlock<'a, V: SessionView> {
    view: &'a V,
    refreshing: &'a Cell<bool>,
}

impl<'a, V: SessionView> SeekBlock<'a, V> {
    fn new(view: &'a V, refreshing: &'a Cell<bool>) -> Self {
        refreshing.set(true);
        view.block_seek();

        Self { view, refreshing }
    }
}

impl<V: SessionView> Drop for SeekBlock<'_, V> {
    fn drop(&mut self) {
        self.view.unblock_seek();
        self.refreshing.set(false);
    }
}

impl<E: MediaEngine, V: SessionView> Session<E, V> {
    /// Brings the slider in sync with the pipeline.
    pub fn refresh(&self) {
        // Nothing to show unless we are in the PAUSED or PLAYING states
        if !self.state.get().is_active() {
            return;
        }

        // The duration of the stream does not change, so we only
        // ask for it until we get an answer
        let duration = match self.duration.get() {
            Some(duration) => Some(duration),
            None => match self.engine.query_duration() {
                Some(duration) => {
                    debug!("Stream duration: {}", duration);
                    self.duration.set(Some(duration));
                    Some(duration)
                }
                None => {
                    debug!("Could not query current duration");
                    None
                }
            },
        };

        let position = self.engine.query_position();
        if position.is_none() {
            debug!("Could not query current position");
        }

        if duration.is_none() && position.is_none() {
            return;
        }

        // Updating the range can move the value as well, so both
        // writes happen with the seek handler blocked
        let _block = SeekBlock::new(&self.view, &self.refreshing);

        if let Some(duration) = duration {
            self.view.set_slider_range(0.0, slider_upper(duration) as f64);
        }

        if let Some(position) = position {
            self.view.set_slider_value(position.seconds() as f64);
        }
    }
}
