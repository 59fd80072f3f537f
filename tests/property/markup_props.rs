//! Truncation and excerpt invariants.

use ctp_search::markup::OMISSION;
use ctp_search::{truncate, CollectionType, MatchLevel, Normalizer};
use proptest::prelude::*;

use super::common::{page_hit, EchoRenderer};

fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 .,éü日本]{0,80}").unwrap()
}

proptest! {
    /// The result, omission included, never exceeds the limit.
    #[test]
    fn prop_truncate_is_bounded(text in text_strategy(), length in 3usize..60) {
        prop_assert!(truncate(&text, length).chars().count() <= length);
    }

    #[test]
    fn prop_short_text_unchanged(text in text_strategy()) {
        let length = text.chars().count();
        prop_assert_eq!(&*truncate(&text, length), text.as_str());
    }

    /// A truncated result is a prefix of the input plus the omission.
    #[test]
    fn prop_truncate_keeps_prefix(text in text_strategy(), length in 4usize..60) {
        prop_assume!(text.chars().count() > length);
        let cut = truncate(&text, length);
        prop_assert!(cut.ends_with(OMISSION));
        let kept = cut.strip_suffix(OMISSION).unwrap();
        prop_assert!(text.starts_with(kept));
        prop_assert_eq!(cut.chars().count(), length);
    }

    /// With a snippet present, the body never reaches the renderer.
    #[test]
    fn prop_snippet_wins(body in text_strategy(), snippet in "[a-z]{1,20}") {
        let hit = page_hit("p", "P", &body, MatchLevel::Partial, Some(&snippet));
        let normalizer = Normalizer::with_renderer(EchoRenderer, 30);
        prop_assert_eq!(
            normalizer.excerpt_html(CollectionType::Page, &hit),
            format!("[{}]", snippet)
        );
    }
}
