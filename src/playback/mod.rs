// SPDX-FileCopyrightText: 2026  The Flick developers
// SPDX-License-Identifier: GPL-3.0-or-later

// GStreamer runs its own streaming threads, and will happily call us
// from any of them; GTK widgets, on the other hand, can only be touched
// from the main context. Instead of sharing state across threads, every
// notification coming from the pipeline is turned into a SessionEvent and
// sent over a channel whose receiving end lives on the main context.
//
// The playback code is split into the following components:
//
// Session: owns the pipeline and mirrors its state
// ├── GstBackend: a playbin wrapper, implementing MediaEngine
// ├── relay: SessionEvent, and the code applying events to the session
// ├── refresher: the periodic slider update
// ├── metadata: the stream information panel
// ╰── SessionView: the widgets the session writes to
//
// The GstBackend translates bus messages (in a bus watch on the main
// context) and the playbin tags signals (on streaming threads) into
// SessionEvents, and pushes them through the async_channel::Sender it
// was given. The Session drains the Receiver on the main context.
//
// The session never predicts the pipeline state: it asks for state
// changes, and only updates its copy of the state once the pipeline
// reports it.

mod engine;
mod gst_backend;
mod metadata;
mod refresher;
mod relay;
mod session;
#[cfg(test)]
mod testing;
mod view;

pub use engine::{
    EngineError, MediaEngine, PipelineState, StreamCounts, StreamKind, StreamTags,
};
pub use gst_backend::GstBackend;
pub use relay::SessionEvent;
pub use session::{slider_seconds, Session};
pub use view::{PlayerView, SessionView};

pub type PlayerSession = Session<GstBackend, PlayerView>;
