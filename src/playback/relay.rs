// SPDX-FileCopyrightText: 2026  The Flick developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::{self, Display, Formatter};

use gst::prelude::*;
use log::{debug, error, info, trace, warn};

use crate::playback::{MediaEngine, PipelineState, Session, SessionView, StreamKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventSource {
    Pipeline,
    Element(String),
}

impl Display for EventSource {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            EventSource::Pipeline => write!(f, "pipeline"),
            EventSource::Element(path) => write!(f, "{}", path),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Error {
        source: EventSource,
        message: String,
        debug: Option<String>,
    },
    EndOfStream,
    StateChanged {
        source: EventSource,
        old: PipelineState,
        current: PipelineState,
        pending: PipelineState,
    },
    TagsChanged {
        kind: StreamKind,
        stream: i32,
    },
}

impl SessionEvent {
    /// Translates a bus message posted by `pipeline`, or one of its
    /// children, into a session event.
    pub fn from_message(msg: &gst::Message, pipeline: &gst::Element) -> Option<Self> {
        use gst::MessageView;

        let source = match msg.src() {
            Some(src) if src == pipeline.upcast_ref::<gst::Object>() => EventSource::Pipeline,
            Some(src) => EventSource::Element(src.path_string().to_string()),
            None => EventSource::Element(String::from("unknown")),
        };

        match msg.view() {
            MessageView::Error(err) => Some(SessionEvent::Error {
                source,
                message: err.error().to_string(),
                debug: err.debug().map(|d| d.to_string()),
            }),
            MessageView::Warning(w) => {
                warn!("GStreamer warning from {}: {}", source, w.error());
                None
            }
            MessageView::Eos(..) => Some(SessionEvent::EndOfStream),
            MessageView::StateChanged(sc) => Some(SessionEvent::StateChanged {
                source,
                old: sc.old().into(),
                current: sc.current().into(),
                pending: sc.pending().into(),
            }),
            _ => None,
        }
    }
}

impl<E: MediaEngine, V: SessionView> Session<E, V> {
    pub fn process_event(&self, event: SessionEvent) {
        match event {
            SessionEvent::Error {
                source,
                message,
                debug,
            } => {
                error!("Error received from element {}: {}", source, message);
                error!(
                    "Debugging information: {}",
                    debug.as_deref().unwrap_or("none")
                );
                self.stop();
            }
            SessionEvent::EndOfStream => {
                info!("End of stream reached");
                self.stop();
            }
            SessionEvent::StateChanged {
                source: EventSource::Pipeline,
                old,
                current,
                pending,
            } => {
                self.state.set(current);
                info!("State set to {} (pending: {})", current, pending);

                // Refresh right away instead of waiting for the next tick
                if old == PipelineState::Ready && current == PipelineState::Paused {
                    self.refresh();
                }
            }
            SessionEvent::StateChanged { source, .. } => {
                trace!("Ignoring state change from {}", source);
            }
            SessionEvent::TagsChanged { kind, stream } => {
                debug!("Tags changed on {} stream {}", kind, stream);
                self.report_streams();
            }
        }
    }
}
