//! Synthetic albums
//!
//! A round `n` holds the mystery image `#n tag` and the proof of the previous
//! round `#n-1 proof`, uploaded together. Albums list newest rounds first.

use biketag_core::TaggedImage;
use chrono::{TimeZone, Utc};

/// Mystery tag and proof entries for round `n`
pub fn synthetic_round(n: u32) -> Vec<TaggedImage> {
    let uploaded = Utc.timestamp_opt(1_600_000_000 + i64::from(n) * 86_400, 0).single();
    let mystery = TaggedImage::new(
        format!("t{}", n),
        format!("#{} tag (hint: clue {}) by u/player{}", n, n, n),
    )
    .with_title(format!("(44.9{},-93.2{}) {{https://redd.it/r{}}}", n, n, n))
    .with_link(format!("https://i.imgur.com/t{}.jpg", n))
    .with_datetime(uploaded);

    let mut round = vec![mystery];
    if n > 1 {
        round.push(
            TaggedImage::new(
                format!("p{}", n - 1),
                format!("#{} proof found at (spot {}) by u/player{}", n - 1, n - 1, n),
            )
            .with_title(format!("(44.9{},-93.2{})", n - 1, n - 1))
            .with_link(format!("https://i.imgur.com/p{}.jpg", n - 1))
            .with_datetime(uploaded),
        );
    }
    round
}

/// Rounds `1..=rounds`, newest first
pub fn synthetic_album(rounds: u32) -> Vec<TaggedImage> {
    (1..=rounds).rev().flat_map(synthetic_round).collect()
}
