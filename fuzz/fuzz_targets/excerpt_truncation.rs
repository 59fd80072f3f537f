#![no_main]

use arbitrary::Arbitrary;
use ctp_search::markup::OMISSION;
use ctp_search::truncate;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct TruncateInput {
    text: String,
    length: u8,
}

/// Fuzz target for body truncation.
///
/// - Output never exceeds the limit once the limit can hold the omission
/// - Text within the limit comes back unchanged
/// - Truncated output is a prefix of the input plus the omission
/// - Multi-byte characters are never split
fuzz_target!(|input: TruncateInput| {
    let length = usize::from(input.length);
    let out = truncate(&input.text, length);
    let chars = input.text.chars().count();

    if chars <= length {
        assert_eq!(out, input.text.as_str());
        return;
    }

    assert!(out.ends_with(OMISSION));
    if length >= OMISSION.len() {
        assert!(out.chars().count() <= length);
    }
    let kept = &out[..out.len() - OMISSION.len()];
    assert!(input.text.starts_with(kept));
});
