// SPDX-FileCopyrightText: 2026  The Flick developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use async_channel::Receiver;
use gtk::glib;
use log::{debug, error, warn};

use crate::playback::{EngineError, MediaEngine, PipelineState, SessionEvent, SessionView};

const REFRESH_INTERVAL_SECONDS: u32 = 1;
const SHUTDOWN_TIMEOUT_SECONDS: u64 = 5;

/// Converts a slider value into the whole second to seek to.
pub fn slider_seconds(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

pub struct Session<E: MediaEngine, V: SessionView> {
    pub(super) engine: E,
    pub(super) view: V,
    receiver: RefCell<Option<Receiver<SessionEvent>>>,
    refresh_source: RefCell<Option<glib::SourceId>>,

    // Last state reported by the pipeline itself
    pub(super) state: Cell<PipelineState>,
    // Last state we asked the pipeline for
    target: Cell<PipelineState>,
    pub(super) duration: Cell<Option<gst::ClockTime>>,
    // Raised while the refresher writes to the slider
    pub(super) refreshing: Cell<bool>,
    terminated: Cell<bool>,
}

impl<E: MediaEngine, V: SessionView> fmt::Debug for Session<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state.get())
            .field("target", &self.target.get())
            .field("duration", &self.duration.get())
            .field("terminated", &self.terminated.get())
            .finish()
    }
}

impl<E: MediaEngine, V: SessionView> Session<E, V> {
    /// Takes ownership of `engine` and brings it to the `Ready` state.
    ///
    /// Events from the engine are read from `receiver` once the session
    /// is started.
    pub fn new(engine: E, view: V, receiver: Receiver<SessionEvent>) -> Result<Rc<Self>, EngineError> {
        let res = Self {
            engine,
            view,
            receiver: RefCell::new(Some(receiver)),
            refresh_source: RefCell::new(None),
            state: Cell::new(PipelineState::Null),
            target: Cell::new(PipelineState::Null),
            duration: Cell::new(None),
            refreshing: Cell::new(false),
            terminated: Cell::new(false),
        };

        res.request_state(PipelineState::Ready)?;

        Ok(Rc::new(res))
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn state(&self) -> PipelineState {
        self.state.get()
    }

    pub fn duration(&self) -> Option<gst::ClockTime> {
        self.duration.get()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated.get()
    }

    fn request_state(&self, target: PipelineState) -> Result<bool, EngineError> {
        if self.terminated.get() {
            debug!("Session terminated, not requesting {}", target);
            return Ok(false);
        }

        if self.target.get() == target {
            debug!("Pipeline already heading to {}", target);
            return Ok(false);
        }

        self.engine.set_state(target)?;
        self.target.set(target);

        Ok(true)
    }

    /// Asks the pipeline to start playing.
    ///
    /// A pipeline that refuses the request is torn down, and the
    /// session will ignore any further command.
    pub fn play(&self) -> Result<(), EngineError> {
        match self.request_state(PipelineState::Playing) {
            Ok(_) => Ok(()),
            Err(err) => {
                error!("Unable to set the pipeline to the playing state");
                self.terminate();
                Err(err)
            }
        }
    }

    pub fn pause(&self) {
        if let Err(err) = self.request_state(PipelineState::Paused) {
            warn!("Unable to pause: {}", err);
        }
    }

    pub fn stop(&self) {
        if let Err(err) = self.request_state(PipelineState::Ready) {
            warn!("Unable to stop: {}", err);
        }
    }

    pub fn seek(&self, seconds: u64) {
        if self.refreshing.get() {
            debug!("Ignoring seek to {}s requested while refreshing", seconds);
            return;
        }

        let state = self.state.get();
        if !state.is_active() {
            debug!("Ignoring seek to {}s in the {} state", seconds, state);
            return;
        }

        let position = gst::ClockTime::from_seconds(seconds);
        debug!("Seeking to {}", position);
        if let Err(err) = self
            .engine
            .seek(position, gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT)
        {
            warn!("{}", err);
        }
    }

    /// Stops playback and waits for the pipeline to get there.
    pub fn shutdown(&self) {
        self.remove_refresh();
        self.stop();

        let timeout = gst::ClockTime::from_seconds(SHUTDOWN_TIMEOUT_SECONDS);
        match self.engine.settle(timeout) {
            Some(state) => debug!("Pipeline settled in the {} state", state),
            None => warn!("Pipeline did not settle within {}", timeout),
        }
    }

    fn terminate(&self) {
        self.remove_refresh();
        if let Err(err) = self.engine.set_state(PipelineState::Null) {
            warn!("Unable to set the pipeline to Null state: {}", err);
        }
        self.target.set(PipelineState::Null);
        self.terminated.set(true);
    }

    fn remove_refresh(&self) {
        if let Some(source) = self.refresh_source.take() {
            source.remove();
        }
    }
}

impl<E: MediaEngine + 'static, V: SessionView + 'static> Session<E, V> {
    /// Attaches the session to the default main context and starts
    /// playing.
    pub fn start(self: &Rc<Self>) -> Result<(), EngineError> {
        self.setup_channel();
        self.setup_refresh();
        self.play()
    }

    fn setup_channel(self: &Rc<Self>) {
        let receiver = match self.receiver.borrow_mut().take() {
            Some(r) => r,
            None => {
                warn!("Session events are already being processed");
                return;
            }
        };

        let this = Rc::downgrade(self);
        glib::MainContext::default().spawn_local(async move {
            use futures::prelude::*;

            let mut receiver = std::pin::pin!(receiver);
            while let Some(event) = receiver.next().await {
                match this.upgrade() {
                    Some(session) => session.process_event(event),
                    None => break,
                }
            }

            debug!("Session event channel closed");
        });
    }

    fn setup_refresh(self: &Rc<Self>) {
        let this = Rc::downgrade(self);
        let source = glib::timeout_add_seconds_local(REFRESH_INTERVAL_SECONDS, move || {
            match this.upgrade() {
                Some(session) => {
                    session.refresh();
                    glib::ControlFlow::Continue
                }
                None => glib::ControlFlow::Break,
            }
        });

        if let Some(old) = self.refresh_source.replace(Some(source)) {
            old.remove();
        }
    }
}

#[cfg(test)]
mod tests {
    use gst::ClockTime;

    use super::*;
    use crate::playback::testing::{session, session_in, MockEngine, MockView};

    #[test]
    fn new_session_requests_ready() {
        let session = session();

        assert_eq!(*session.engine().requests.borrow(), vec![PipelineState::Ready]);
        assert_eq!(session.state(), PipelineState::Null);
        assert_eq!(session.duration(), None);
    }

    #[test]
    fn refused_ready_fails_construction() {
        let engine = MockEngine::default();
        engine.refuse.set(Some(PipelineState::Ready));
        let (_sender, receiver) = async_channel::unbounded();

        let res = Session::new(engine, MockView::default(), receiver);
        assert!(matches!(
            res,
            Err(EngineError::StateChange(PipelineState::Ready))
        ));
    }

    #[test]
    fn commands_keep_the_same_pipeline() {
        let session = session();

        for _ in 0..3 {
            session.play().unwrap();
            session.pause();
            session.stop();
            session.pause();
            session.play().unwrap();
        }

        // Stopping only goes back to Ready; the pipeline is never torn
        // down and rebuilt
        assert!(!session
            .engine()
            .requests
            .borrow()
            .contains(&PipelineState::Null));
        assert!(!session.is_terminated());
    }

    #[test]
    fn pause_twice_sends_a_single_request() {
        let session = session_in(PipelineState::Playing);
        session.play().unwrap();

        session.pause();
        session.pause();

        assert_eq!(
            *session.engine().requests.borrow(),
            vec![
                PipelineState::Ready,
                PipelineState::Playing,
                PipelineState::Paused
            ]
        );
    }

    #[test]
    fn commands_do_not_touch_the_state_cache() {
        let session = session_in(PipelineState::Ready);

        session.play().unwrap();
        assert_eq!(session.state(), PipelineState::Ready);

        session.pause();
        assert_eq!(session.state(), PipelineState::Ready);
    }

    #[test]
    fn refused_play_terminates_the_session() {
        let session = session_in(PipelineState::Ready);
        session.engine().refuse.set(Some(PipelineState::Playing));

        let res = session.play();
        assert!(matches!(
            res,
            Err(EngineError::StateChange(PipelineState::Playing))
        ));
        assert!(session.is_terminated());
        assert_eq!(session.engine().last_request(), Some(PipelineState::Null));

        // Nothing reaches the engine anymore
        session.engine().refuse.set(None);
        let requests = session.engine().requests.borrow().len();
        session.play().unwrap();
        session.pause();
        session.stop();
        assert_eq!(session.engine().requests.borrow().len(), requests);
    }

    #[test]
    fn seek_uses_flush_and_key_unit() {
        let session = session_in(PipelineState::Playing);

        session.seek(42);

        assert_eq!(
            *session.engine().seeks.borrow(),
            vec![(
                ClockTime::from_nseconds(42_000_000_000),
                gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT
            )]
        );
    }

    #[test]
    fn seek_is_ignored_while_stopped() {
        let session = session_in(PipelineState::Ready);

        session.seek(10);

        assert!(session.engine().seeks.borrow().is_empty());
    }

    #[test]
    fn seek_is_ignored_while_refreshing() {
        let session = session_in(PipelineState::Playing);

        session.refreshing.set(true);
        session.seek(10);
        session.refreshing.set(false);

        assert!(session.engine().seeks.borrow().is_empty());
    }

    #[test]
    fn shutdown_stops_and_waits() {
        let session = session_in(PipelineState::Playing);
        session.play().unwrap();

        session.shutdown();

        assert_eq!(session.engine().last_request(), Some(PipelineState::Ready));
        assert_eq!(
            session.engine().settle_timeouts.borrow().as_slice(),
            &[ClockTime::from_seconds(5)]
        );
    }

    #[test]
    fn slider_values_round_to_whole_seconds() {
        assert_eq!(slider_seconds(42.0), 42);
        assert_eq!(slider_seconds(41.6), 42);
        assert_eq!(slider_seconds(-3.0), 0);
        assert_eq!(slider_seconds(f64::NAN), 0);
    }
}
