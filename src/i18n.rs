// SPDX-FileCopyrightText: 2026  The Flick developers
// SPDX-License-Identifier: GPL-3.0-or-later

use gettextrs::gettext;

fn freplace(input: String, args: &[&str]) -> String {
    let mut s = input;

    for arg in args {
        s = s.replacen("{}", arg, 1);
    }

    s
}

pub fn i18n(format: &str) -> String {
    gettext(format)
}

/// Translates `format` and fills each `{}` placeholder, in order, with `args`.
pub fn i18n_f(format: &str, args: &[&str]) -> String {
    let s = gettext(format);
    freplace(s, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_filled_in_order() {
        let s = freplace("{} of {}".to_string(), &["1", "2"]);
        assert_eq!(s, "1 of 2");
    }

    #[test]
    fn extra_placeholders_are_left_alone() {
        let s = freplace("stream {}: {}".to_string(), &["0"]);
        assert_eq!(s, "stream 0: {}");
    }
}
