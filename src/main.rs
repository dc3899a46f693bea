// SPDX-FileCopyrightText: 2026  The Flick developers
// SPDX-License-Identifier: GPL-3.0-or-later

mod application;
mod config;
mod i18n;
mod playback;
mod window;

use std::env;

use config::{APPLICATION_ID, GETTEXT_PACKAGE, LOCALEDIR, PROFILE};
use gettextrs::{bind_textdomain_codeset, bindtextdomain, setlocale, textdomain, LocaleCategory};
use gtk::{glib, prelude::*};
use log::{debug, error, warn, LevelFilter};

use self::application::Application;

fn setup_locale() -> Result<(), std::io::Error> {
    setlocale(LocaleCategory::LcAll, "");

    bindtextdomain(GETTEXT_PACKAGE, LOCALEDIR)?;
    bind_textdomain_codeset(GETTEXT_PACKAGE, "UTF-8")?;
    textdomain(GETTEXT_PACKAGE)?;

    Ok(())
}

fn main() -> glib::ExitCode {
    let mut builder = pretty_env_logger::formatted_builder();
    if APPLICATION_ID.ends_with("Devel") {
        builder.filter(Some("flick"), LevelFilter::Debug);
    } else {
        builder.filter(Some("flick"), LevelFilter::Info);
    }
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();

    // Set up gettext translations
    debug!("Setting up locale data");
    if let Err(err) = setup_locale() {
        warn!("Unable to set up translations: {}", err);
    }

    debug!("Setting up application (profile: {})", &PROFILE);
    glib::set_application_name("Flick");
    glib::set_program_name(Some("flick"));

    if let Err(err) = gst::init() {
        error!("Failed to initialize GStreamer: {}", err);
        return glib::ExitCode::FAILURE;
    }

    let ctx = glib::MainContext::default();
    let _guard = match ctx.acquire() {
        Ok(guard) => guard,
        Err(err) => {
            error!("Unable to acquire the main context: {}", err);
            return glib::ExitCode::FAILURE;
        }
    };

    let app = Application::new();
    let code = app.run();
    if app.failed() {
        glib::ExitCode::FAILURE
    } else {
        code
    }
}
