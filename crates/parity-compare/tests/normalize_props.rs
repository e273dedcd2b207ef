//! Property-based tests for hash normalization and comparison.

use parity_compare::{normalize, Comparator, TextPolicy, FULL_HASH_PLACEHOLDER, SHORT_HASH_PLACEHOLDER};
use proptest::prelude::*;

/// True if `text` has a maximal hex run of exactly 40 or 7 characters.
fn has_hash_token(text: &str) -> bool {
    let mut run = 0usize;
    for c in text.chars().chain(std::iter::once(' ')) {
        if c.is_ascii_hexdigit() {
            run += 1;
        } else {
            if run == 40 || run == 7 {
                return true;
            }
            run = 0;
        }
    }
    false
}

/// Text built from hash tokens separated by non-hex filler.
fn hashy_text() -> impl Strategy<Value = String> {
    let token = prop_oneof![
        "[0-9a-f]{40}",
        "[0-9a-f]{7}",
        "[0-9a-f]{1,12}",
        "[g-z .:\\n\\[\\]-]{1,10}",
    ];
    prop::collection::vec(token, 0..20).prop_map(|parts| parts.join(" "))
}

proptest! {
    #[test]
    fn normalization_is_idempotent(s in "\\PC{0,200}") {
        let once = normalize(&s);
        let twice = normalize(once.as_str());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn idempotent_on_hash_heavy_text(s in hashy_text()) {
        let once = normalize(&s);
        prop_assert_eq!(normalize(once.as_str()), once);
    }

    #[test]
    fn no_hash_token_survives(s in hashy_text()) {
        let n = normalize(&s);
        prop_assert!(!has_hash_token(n.as_str()), "hash token left in {:?}", n.as_str());
    }

    #[test]
    fn comparator_reflexive(s in "\\PC{0,200}") {
        let cmp = Comparator::default();
        prop_assert!(cmp.compare(&s, &s, TextPolicy::Normalized).is_match());
        prop_assert!(cmp.compare(&s, &s, TextPolicy::Verbatim).is_match());
    }

    #[test]
    fn differing_only_in_full_hashes_matches(
        prefix in "[g-z ]{0,20}",
        a in "[0-9a-f]{40}",
        b in "[0-9a-f]{40}",
        suffix in "[g-z ]{0,20}",
    ) {
        let left = format!("{prefix} {a} {suffix}");
        let right = format!("{prefix} {b} {suffix}");
        prop_assert!(Comparator::default().compare(&left, &right, TextPolicy::Normalized).is_match());
    }

    #[test]
    fn differing_in_other_text_fails(
        hash in "[0-9a-f]{40}",
        a in "[g-z]{1,10}",
        b in "[g-z]{1,10}",
    ) {
        prop_assume!(a != b);
        let left = format!("{hash} {a}");
        let right = format!("{hash} {b}");
        prop_assert!(!Comparator::default().compare(&left, &right, TextPolicy::Normalized).is_match());
    }
}

#[test]
fn placeholders_are_not_hash_tokens() {
    assert!(!has_hash_token(FULL_HASH_PLACEHOLDER));
    assert!(!has_hash_token(SHORT_HASH_PLACEHOLDER));
}

#[test]
fn log_oneline_output_normalizes() {
    let text = "9fceb02 Cherry commit\n3b18e51 Initial commit\n";
    assert_eq!(
        normalize(text).as_str(),
        "<SHORTHASH> Cherry commit\n<SHORTHASH> Initial commit\n"
    );
}
