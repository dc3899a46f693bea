// SPDX-FileCopyrightText: 2026  The Flick developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::cell::Cell;

use adw::{prelude::*, subclass::prelude::*};
use gtk::{gio, glib};
use log::{debug, error};

use crate::{
    config::{APPLICATION_ID, DEFAULT_URI},
    window::Window,
};

mod imp {
    use super::*;

    #[derive(Debug, Default)]
    pub struct Application {
        pub failed: Cell<bool>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for Application {
        const NAME: &'static str = "FlickApplication";
        type Type = super::Application;
        type ParentType = adw::Application;
    }

    impl ObjectImpl for Application {
        fn constructed(&self) {
            self.parent_constructed();

            let obj = self.obj();
            obj.setup_gactions();

            obj.set_accels_for_action("app.quit", &["<primary>q"]);
            obj.set_accels_for_action("win.play", &["<primary>p"]);
            obj.set_accels_for_action("win.pause", &["<primary>space"]);
            obj.set_accels_for_action("win.stop", &["<primary>s"]);
        }
    }

    impl ApplicationImpl for Application {
        fn activate(&self) {
            debug!("Application::activate");

            self.obj().present_main_window(DEFAULT_URI);
        }

        fn open(&self, files: &[gio::File], _hint: &str) {
            debug!("Application::open");

            // One pipeline per session: only the first file is played
            match files.first() {
                Some(file) => self.obj().present_main_window(&file.uri()),
                None => self.obj().present_main_window(DEFAULT_URI),
            }
        }
    }

    impl GtkApplicationImpl for Application {}
    impl AdwApplicationImpl for Application {}
}

glib::wrapper! {
    pub struct Application(ObjectSubclass<imp::Application>)
        @extends gio::Application, gtk::Application, adw::Application,
        @implements gio::ActionGroup, gio::ActionMap;
}

impl Default for Application {
    fn default() -> Self {
        glib::Object::builder::<Application>()
            .property("application-id", APPLICATION_ID)
            .property("flags", gio::ApplicationFlags::HANDLES_OPEN)
            .build()
    }
}

impl Application {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the application quit because playback could not start.
    pub fn failed(&self) -> bool {
        self.imp().failed.get()
    }

    pub fn fail(&self) {
        self.imp().failed.set(true);
        self.quit();
    }

    fn present_main_window(&self, uri: &str) {
        if let Some(window) = self.active_window() {
            debug!("Window already playing, ignoring {}", uri);
            window.present();
            return;
        }

        debug!("Playing {}", uri);
        match Window::new(self, uri) {
            Ok(window) => window.present(),
            Err(err) => {
                error!("Unable to set up the pipeline: {}", err);
                self.fail();
            }
        }
    }

    fn setup_gactions(&self) {
        self.add_action_entries([gio::ActionEntry::builder("quit")
            .activate(|app: &Application, _, _| {
                // Closing the windows lets them stop their pipelines
                for window in app.windows() {
                    window.close();
                }
                app.quit();
            })
            .build()]);
    }
}
