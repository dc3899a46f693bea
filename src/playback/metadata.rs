// SPDX-FileCopyrightText: 2026  The Flick developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Write;

use crate::{
    i18n::i18n_f,
    playback::{MediaEngine, Session, SessionView, StreamKind, StreamTags},
};

/// Describes a single stream, one line per tag we know about.
pub fn describe_stream(kind: StreamKind, index: u32, tags: &StreamTags) -> String {
    let index = index.to_string();
    let mut text = String::new();

    let header = match kind {
        StreamKind::Video => i18n_f("video stream {}:", &[index.as_str()]),
        StreamKind::Audio => i18n_f("audio stream {}:", &[index.as_str()]),
        StreamKind::Text => i18n_f("subtitle stream {}:", &[index.as_str()]),
    };
    let _ = writeln!(text, "{}", header);

    if matches!(kind, StreamKind::Video | StreamKind::Audio) {
        if let Some(codec) = &tags.codec {
            let _ = writeln!(text, "{}", i18n_f("Codec: {}", &[codec.as_str()]));
        }
    }

    if matches!(kind, StreamKind::Audio | StreamKind::Text) {
        if let Some(language) = &tags.language {
            let _ = writeln!(text, "{}", i18n_f("Language: {}", &[language.as_str()]));
        }
    }

    if kind == StreamKind::Audio {
        if let Some(bitrate) = tags.bitrate {
            let _ = writeln!(text, "{}", i18n_f("Bitrate: {}", &[bitrate.to_string().as_str()]));
        }
    }

    text
}

impl<E: MediaEngine, V: SessionView> Session<E, V> {
    /// Rewrites the stream information panel from the pipeline's tags.
    pub fn report_streams(&self) {
        self.view.set_stream_info("");

        // Streams show up as the container gets parsed, so the
        // counts are never cached
        let counts = self.engine.stream_counts();

        let mut text = String::new();
        for (kind, count) in [
            (StreamKind::Video, counts.video),
            (StreamKind::Audio, counts.audio),
            (StreamKind::Text, counts.text),
        ] {
            for index in 0..count {
                if let Some(tags) = self.engine.stream_tags(kind, index) {
                    text.push_str(&describe_stream(kind, index, &tags));
                }
            }
        }

        self.view.set_stream_info(&text);
    }
}
