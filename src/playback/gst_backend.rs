// SPDX-FileCopyrightText: 2026  The Flick developers
// SPDX-License-Identifier: GPL-3.0-or-later

use async_channel::Sender;
use glib::clone;
use gst::prelude::*;
use gtk::{gdk, glib};
use log::{debug, trace, warn};

use crate::playback::{
    EngineError, MediaEngine, PipelineState, SessionEvent, StreamCounts, StreamKind, StreamTags,
};

#[derive(Debug)]
pub struct GstBackend {
    playbin: gst::Element,
    paintable: gdk::Paintable,
    _bus_watch: gst::bus::BusWatchGuard,
}

fn make_element(name: &'static str) -> Result<gst::Element, EngineError> {
    gst::ElementFactory::make(name)
        .build()
        .map_err(|source| EngineError::MissingElement { name, source })
}

impl GstBackend {
    /// Builds a playbin for `uri` and forwards its notifications to
    /// `sender`.
    pub fn new(uri: &str, sender: Sender<SessionEvent>) -> Result<Self, EngineError> {
        let playbin = gst::ElementFactory::make("playbin")
            .name("playbin")
            .property("uri", uri)
            .build()
            .map_err(|source| EngineError::MissingElement {
                name: "playbin",
                source,
            })?;

        let gtksink = make_element("gtk4paintablesink")?;
        let paintable = gtksink.property::<gdk::Paintable>("paintable");

        // Let GL capable paintables receive GL memory
        let video_sink = if paintable
            .property::<Option<gdk::GLContext>>("gl-context")
            .is_some()
        {
            gst::ElementFactory::make("glsinkbin")
                .property("sink", &gtksink)
                .build()
                .map_err(|source| EngineError::MissingElement {
                    name: "glsinkbin",
                    source,
                })?
        } else {
            gtksink
        };
        playbin.set_property("video-sink", &video_sink);

        Self::connect_tags_signals(&playbin, &sender);

        let bus = playbin.bus().ok_or(EngineError::MissingBus)?;

        debug!("Adding bus watch");
        let bus_watch = bus
            .add_watch_local(clone!(
                #[weak]
                playbin,
                #[strong]
                sender,
                #[upgrade_or]
                glib::ControlFlow::Break,
                move |_, msg| {
                    if let Some(event) = SessionEvent::from_message(msg, &playbin) {
                        if let Err(err) = sender.send_blocking(event) {
                            warn!("Unable to relay bus message: {}", err);
                            return glib::ControlFlow::Break;
                        }
                    }

                    glib::ControlFlow::Continue
                }
            ))
            .map_err(EngineError::BusWatch)?;

        Ok(Self {
            playbin,
            paintable,
            _bus_watch: bus_watch,
        })
    }

    // The tags signals are emitted from streaming threads, so the
    // handlers only queue an event for the main context
    fn connect_tags_signals(playbin: &gst::Element, sender: &Sender<SessionEvent>) {
        for (signal, kind) in [
            ("video-tags-changed", StreamKind::Video),
            ("audio-tags-changed", StreamKind::Audio),
            ("text-tags-changed", StreamKind::Text),
        ] {
            let sender = sender.clone();
            playbin.connect(signal, false, move |args| {
                let stream = args
                    .get(1)
                    .and_then(|v| v.get::<i32>().ok())
                    .unwrap_or(-1);
                trace!("{} tags changed on stream {}", kind, stream);

                if let Err(err) = sender.send_blocking(SessionEvent::TagsChanged { kind, stream }) {
                    warn!("Unable to relay tags change: {}", err);
                }

                None
            });
        }
    }

    /// The paintable the video is rendered to.
    pub fn paintable(&self) -> &gdk::Paintable {
        &self.paintable
    }

    fn stream_count(&self, property: &str) -> u32 {
        let count = self.playbin.property::<i32>(property);
        u32::try_from(count).unwrap_or(0)
    }
}

impl MediaEngine for GstBackend {
    fn set_state(&self, state: PipelineState) -> Result<(), EngineError> {
        debug!("Requesting {} state", state);
        self.playbin
            .set_state(state.into())
            .map(|_| ())
            .map_err(|_| EngineError::StateChange(state))
    }

    fn query_position(&self) -> Option<gst::ClockTime> {
        self.playbin.query_position::<gst::ClockTime>()
    }

    fn query_duration(&self) -> Option<gst::ClockTime> {
        self.playbin.query_duration::<gst::ClockTime>()
    }

    fn seek(&self, position: gst::ClockTime, flags: gst::SeekFlags) -> Result<(), EngineError> {
        self.playbin
            .seek_simple(flags, position)
            .map_err(|source| EngineError::Seek { position, source })
    }

    fn stream_counts(&self) -> StreamCounts {
        StreamCounts {
            video: self.stream_count("n-video"),
            audio: self.stream_count("n-audio"),
            text: self.stream_count("n-text"),
        }
    }

    fn stream_tags(&self, kind: StreamKind, index: u32) -> Option<StreamTags> {
        let signal = match kind {
            StreamKind::Video => "get-video-tags",
            StreamKind::Audio => "get-audio-tags",
            StreamKind::Text => "get-text-tags",
        };

        let index = i32::try_from(index).ok()?;
        let tags = self
            .playbin
            .emit_by_name::<Option<gst::TagList>>(signal, &[&index])?;

        let codec = match kind {
            StreamKind::Video => tags.get::<gst::tags::VideoCodec>().map(|v| v.get().to_owned()),
            StreamKind::Audio => tags.get::<gst::tags::AudioCodec>().map(|v| v.get().to_owned()),
            StreamKind::Text => tags
                .get::<gst::tags::SubtitleCodec>()
                .map(|v| v.get().to_owned()),
        };

        Some(StreamTags {
            codec,
            language: tags
                .get::<gst::tags::LanguageCode>()
                .map(|v| v.get().to_owned()),
            bitrate: tags.get::<gst::tags::Bitrate>().map(|v| v.get()),
        })
    }

    fn settle(&self, timeout: gst::ClockTime) -> Option<PipelineState> {
        let (res, current, _pending) = self.playbin.state(timeout);
        match res {
            Ok(gst::StateChangeSuccess::Async) => None,
            Ok(_) => Some(current.into()),
            Err(err) => {
                warn!("Pipeline state change failed: {}", err);
                None
            }
        }
    }
}

impl Drop for GstBackend {
    fn drop(&mut self) {
        debug!("Releasing the pipeline");
        if let Err(err) = self.playbin.set_state(gst::State::Null) {
            warn!("Unable to set the pipeline to Null state: {}", err);
        }
    }
}
