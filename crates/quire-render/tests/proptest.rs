//! Property-based tests for renderer dispatch using proptest.

use proptest::prelude::*;
use quire_render::{Formats, Renderers};

fn threshold_renderers(thresholds: &[i64]) -> Renderers<i64> {
    thresholds
        .iter()
        .enumerate()
        .fold(Renderers::new(), |renderers, (index, &threshold)| {
            renderers.add_infallible(move |n| *n >= threshold, move |_| format!("r{index}"))
        })
}

proptest! {
    /// The first registration whose predicate accepts the value is used.
    #[test]
    fn first_matching_registration_wins(
        thresholds in prop::collection::vec(-100i64..100, 0..8),
        value in -120i64..120,
    ) {
        let renderers = threshold_renderers(&thresholds);
        let expected = thresholds
            .iter()
            .position(|threshold| value >= *threshold)
            .map(|index| format!("r{index}"))
            .unwrap_or_else(|| value.to_string());
        prop_assert_eq!(renderers.render(&value).unwrap(), expected);
    }

    /// `find` agrees with `render_registered`.
    #[test]
    fn find_agrees_with_render_registered(
        thresholds in prop::collection::vec(-100i64..100, 0..8),
        value in -120i64..120,
    ) {
        let renderers = threshold_renderers(&thresholds);
        prop_assert_eq!(
            renderers.find(&value).is_some(),
            renderers.render_registered(&value).is_some()
        );
    }

    /// The html encoder never leaves markup characters unescaped.
    #[test]
    fn html_encoder_escapes_markup(text in ".*") {
        let formats = Formats::<String>::with_default_encoders();
        let escaped = formats.render("html", &text).unwrap();
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert!(!escaped.contains('"'));
    }
}
