// SPDX-FileCopyrightText: 2026  The Flick developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    cell::{Cell, OnceCell},
    rc::Rc,
};

use adw::{prelude::*, subclass::prelude::*};
use glib::clone;
use gtk::{gio, glib};
use log::{debug, error};

use crate::{
    application::Application,
    config::APPLICATION_ID,
    i18n::i18n,
    playback::{slider_seconds, EngineError, GstBackend, PlayerSession, PlayerView, Session},
};

mod imp {
    use super::*;

    #[derive(Debug, Default)]
    pub struct Window {
        pub session: OnceCell<Rc<PlayerSession>>,
        pub started: Cell<bool>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for Window {
        const NAME: &'static str = "FlickWindow";
        type Type = super::Window;
        type ParentType = adw::ApplicationWindow;

        fn class_init(klass: &mut Self::Class) {
            klass.install_action("win.play", None, move |win, _, _| {
                debug!("Window::win.play()");
                win.play();
            });
            klass.install_action("win.pause", None, move |win, _, _| {
                debug!("Window::win.pause()");
                if let Some(session) = win.imp().session.get() {
                    session.pause();
                }
            });
            klass.install_action("win.stop", None, move |win, _, _| {
                debug!("Window::win.stop()");
                if let Some(session) = win.imp().session.get() {
                    session.stop();
                }
            });
        }
    }

    impl ObjectImpl for Window {
        fn constructed(&self) {
            self.parent_constructed();

            if APPLICATION_ID.ends_with("Devel") {
                self.obj().add_css_class("devel");
            }
        }
    }

    impl WidgetImpl for Window {}

    impl WindowImpl for Window {
        fn close_request(&self) -> glib::Propagation {
            debug!("Window::close_request");

            // Leave the pipeline stopped before we go away
            if let Some(session) = self.session.get() {
                session.shutdown();
            }

            self.parent_close_request()
        }
    }

    impl ApplicationWindowImpl for Window {}
    impl AdwApplicationWindowImpl for Window {}
}

glib::wrapper! {
    pub struct Window(ObjectSubclass<imp::Window>)
        @extends gtk::Widget, gtk::Window, gtk::ApplicationWindow, adw::ApplicationWindow,
        @implements gio::ActionGroup, gio::ActionMap;
}

fn control_button(icon_name: &str, tooltip: &str, action: &str) -> gtk::Button {
    gtk::Button::builder()
        .icon_name(icon_name)
        .tooltip_text(tooltip)
        .action_name(action)
        .build()
}

impl Window {
    /// Creates the window and the playback session for `uri`.
    pub fn new<P: IsA<gtk::Application>>(application: &P, uri: &str) -> Result<Self, EngineError> {
        let picture = gtk::Picture::builder()
            .hexpand(true)
            .vexpand(true)
            .build();

        let streams = gtk::Label::builder()
            .xalign(0.0)
            .yalign(0.0)
            .selectable(true)
            .wrap(true)
            .margin_start(12)
            .margin_end(12)
            .margin_top(12)
            .build();
        let streams_window = gtk::ScrolledWindow::builder()
            .hscrollbar_policy(gtk::PolicyType::Never)
            .min_content_width(220)
            .child(&streams)
            .build();

        let slider = gtk::Scale::with_range(gtk::Orientation::Horizontal, 0.0, 100.0, 1.0);
        slider.set_draw_value(false);
        slider.set_round_digits(0);
        slider.set_hexpand(true);

        let controls = gtk::Box::builder()
            .orientation(gtk::Orientation::Horizontal)
            .spacing(6)
            .margin_start(6)
            .margin_end(6)
            .margin_top(6)
            .margin_bottom(6)
            .build();
        controls.append(&control_button(
            "media-playback-start-symbolic",
            &i18n("Play"),
            "win.play",
        ));
        controls.append(&control_button(
            "media-playback-pause-symbolic",
            &i18n("Pause"),
            "win.pause",
        ));
        controls.append(&control_button(
            "media-playback-stop-symbolic",
            &i18n("Stop"),
            "win.stop",
        ));
        controls.append(&slider);

        let (sender, receiver) = async_channel::unbounded();
        let backend = GstBackend::new(uri, sender)?;
        picture.set_paintable(Some(backend.paintable()));

        let view = PlayerView::new(&slider, &streams);
        let session = Session::new(backend, view, receiver)?;

        let handler = slider.connect_value_changed(clone!(
            #[weak]
            session,
            move |slider| {
                session.seek(slider_seconds(slider.value()));
            }
        ));
        session.view().set_seek_handler(handler);

        let win = glib::Object::builder::<Window>()
            .property("application", application)
            .property("title", "Flick")
            .property("default-width", 960)
            .property("default-height", 600)
            .build();

        let main_box = gtk::Box::new(gtk::Orientation::Horizontal, 0);
        main_box.append(&picture);
        main_box.append(&streams_window);

        let content = gtk::Box::new(gtk::Orientation::Vertical, 0);
        content.append(&adw::HeaderBar::new());
        content.append(&main_box);
        content.append(&controls);
        win.set_content(Some(&content));

        // There is only ever one session per window
        let _ = win.imp().session.set(session);

        win.connect_map(|win| win.start());

        Ok(win)
    }

    fn start(&self) {
        if self.imp().started.replace(true) {
            return;
        }

        if let Some(session) = self.imp().session.get() {
            if let Err(err) = session.start() {
                self.fail(&err);
            }
        }
    }

    fn play(&self) {
        if let Some(session) = self.imp().session.get() {
            if let Err(err) = session.play() {
                self.fail(&err);
            }
        }
    }

    fn fail(&self, err: &EngineError) {
        error!("{}", err);

        if let Some(app) = self.application().and_downcast::<Application>() {
            app.fail();
        }
    }
}
