// SPDX-FileCopyrightText: 2026  The Flick developers
// SPDX-License-Identifier: GPL-3.0-or-later

// In-memory stand-ins for the pipeline and the widgets

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use crate::playback::{
    EngineError, MediaEngine, PipelineState, Session, SessionView, StreamCounts, StreamKind,
    StreamTags,
};

#[derive(Debug, Default)]
pub struct MockEngine {
    pub requests: RefCell<Vec<PipelineState>>,
    pub refuse: Cell<Option<PipelineState>>,
    pub seeks: RefCell<Vec<(gst::ClockTime, gst::SeekFlags)>>,
    pub settle_timeouts: RefCell<Vec<gst::ClockTime>>,

    pub duration: Cell<Option<gst::ClockTime>>,
    pub position: Cell<Option<gst::ClockTime>>,
    pub duration_queries: Cell<u32>,
    pub position_queries: Cell<u32>,

    pub counts: Cell<StreamCounts>,
    pub tags: RefCell<HashMap<(StreamKind, u32), StreamTags>>,
}

impl MockEngine {
    pub fn last_request(&self) -> Option<PipelineState> {
        self.requests.borrow().last().copied()
    }
}

impl MediaEngine for MockEngine {
    fn set_state(&self, state: PipelineState) -> Result<(), EngineError> {
        if self.refuse.get() == Some(state) {
            return Err(EngineError::StateChange(state));
        }

        self.requests.borrow_mut().push(state);
        Ok(())
    }

    fn query_position(&self) -> Option<gst::ClockTime> {
        self.position_queries.set(self.position_queries.get() + 1);
        self.position.get()
    }

    fn query_duration(&self) -> Option<gst::ClockTime> {
        self.duration_queries.set(self.duration_queries.get() + 1);
        self.duration.get()
    }

    fn seek(&self, position: gst::ClockTime, flags: gst::SeekFlags) -> Result<(), EngineError> {
        self.seeks.borrow_mut().push((position, flags));
        Ok(())
    }

    fn stream_counts(&self) -> StreamCounts {
        self.counts.get()
    }

    fn stream_tags(&self, kind: StreamKind, index: u32) -> Option<StreamTags> {
        self.tags.borrow().get(&(kind, index)).cloned()
    }

    fn settle(&self, timeout: gst::ClockTime) -> Option<PipelineState> {
        self.settle_timeouts.borrow_mut().push(timeout);
        self.last_request()
    }
}

#[derive(Debug, Default)]
pub struct MockView {
    pub range: Cell<Option<(f64, f64)>>,
    pub value: Cell<Option<f64>>,
    pub blocked: Cell<bool>,
    pub range_writes: Cell<u32>,
    pub value_writes: Cell<u32>,
    // Writes a real slider would have reported to the seek handler
    pub unguarded_writes: Cell<u32>,
    pub text: RefCell<String>,
    pub text_writes: Cell<u32>,
}

impl SessionView for MockView {
    fn set_slider_range(&self, min: f64, max: f64) {
        self.range_writes.set(self.range_writes.get() + 1);
        if !self.blocked.get() {
            self.unguarded_writes.set(self.unguarded_writes.get() + 1);
        }
        self.range.set(Some((min, max)));
    }

    fn set_slider_value(&self, value: f64) {
        self.value_writes.set(self.value_writes.get() + 1);
        if !self.blocked.get() {
            self.unguarded_writes.set(self.unguarded_writes.get() + 1);
        }
        self.value.set(Some(value));
    }

    fn block_seek(&self) {
        assert!(!self.blocked.replace(true), "seek handler blocked twice");
    }

    fn unblock_seek(&self) {
        assert!(self.blocked.replace(false), "seek handler was not blocked");
    }

    fn set_stream_info(&self, text: &str) {
        self.text_writes.set(self.text_writes.get() + 1);
        self.text.replace(text.to_string());
    }
}

pub type TestSession = Session<MockEngine, MockView>;

pub fn session() -> Rc<TestSession> {
    let (_sender, receiver) = async_channel::unbounded();
    Session::new(MockEngine::default(), MockView::default(), receiver)
        .expect("mock engine refused Ready")
}

/// A session whose pipeline has already reported `state`.
pub fn session_in(state: PipelineState) -> Rc<TestSession> {
    let session = session();
    session.state.set(state);
    session
}
