// SPDX-FileCopyrightText: 2026  The Flick developers
// SPDX-License-Identifier: GPL-3.0-or-later

pub const APPLICATION_ID: &str = match option_env!("FLICK_APPLICATION_ID") {
    Some(id) => id,
    None => "io.github.Flick",
};

pub const PROFILE: &str = match option_env!("FLICK_PROFILE") {
    Some(profile) => profile,
    None => "default",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const GETTEXT_PACKAGE: &str = "flick";

pub const LOCALEDIR: &str = match option_env!("FLICK_LOCALEDIR") {
    Some(dir) => dir,
    None => "/usr/share/locale",
};

// Played when no media is passed on the command line
pub const DEFAULT_URI: &str =
    "https://gstreamer.freedesktop.org/data/media/sintel_trailer-480p.webm";
