// SPDX-FileCopyrightText: 2026  The Flick developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::cell::OnceCell;

use gtk::{glib, prelude::*};
use log::warn;

// The widgets the session writes to. The session never owns them; it
// only updates what they display.
pub trait SessionView {
    fn set_slider_range(&self, min: f64, max: f64);
    fn set_slider_value(&self, value: f64);

    // Suspend and resume the slider's seek handler
    fn block_seek(&self);
    fn unblock_seek(&self);

    fn set_stream_info(&self, text: &str);
}

#[derive(Debug)]
pub struct PlayerView {
    slider: gtk::Scale,
    streams: gtk::Label,
    seek_handler: OnceCell<glib::SignalHandlerId>,
}

impl PlayerView {
    pub fn new(slider: &gtk::Scale, streams: &gtk::Label) -> Self {
        Self {
            slider: slider.clone(),
            streams: streams.clone(),
            seek_handler: OnceCell::new(),
        }
    }

    /// Registers the slider's `value-changed` handler that issues seeks.
    pub fn set_seek_handler(&self, handler: glib::SignalHandlerId) {
        if let Err(handler) = self.seek_handler.set(handler) {
            warn!("Seek handler already set");
            self.slider.disconnect(handler);
        }
    }
}

impl SessionView for PlayerView {
    fn set_slider_range(&self, min: f64, max: f64) {
        self.slider.set_range(min, max);
    }

    fn set_slider_value(&self, value: f64) {
        self.slider.set_value(value);
    }

    fn block_seek(&self) {
        if let Some(handler) = self.seek_handler.get() {
            self.slider.block_signal(handler);
        }
    }

    fn unblock_seek(&self) {
        if let Some(handler) = self.seek_handler.get() {
            self.slider.unblock_signal(handler);
        }
    }

    fn set_stream_info(&self, text: &str) {
        self.streams.set_text(text);
    }
}
