//! Property tests for the transform engine.
//!
//! Covers length additivity, involutions, codec round-trips and the
//! split/join inverse over arbitrary byte sequences.

mod common;

use common::{init_test_logging, test_proptest_config};
use proptest::prelude::*;
use strbuf_core::rle::{compress, decompress};
use strbuf_core::{
    ByteBuffer, StringCollection, caesar_decode, caesar_encode, concatenate, reverse, split,
    substring, to_lower, to_upper,
};

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_buffer() -> impl Strategy<Value = ByteBuffer> {
    prop::collection::vec(any::<u8>(), 0..128).prop_map(ByteBuffer::from)
}

fn arb_letters() -> impl Strategy<Value = ByteBuffer> {
    "[a-zA-Z]{0,64}".prop_map(|s| ByteBuffer::from(s.as_str()))
}

fn arb_digit_free() -> impl Strategy<Value = ByteBuffer> {
    prop::collection::vec(any::<u8>().prop_filter("no ASCII digits", |b| !b.is_ascii_digit()), 0..128)
        .prop_map(ByteBuffer::from)
}

/// Digit-free bytes drawn from a tiny alphabet so long runs are common.
fn arb_runs() -> impl Strategy<Value = ByteBuffer> {
    prop::collection::vec(prop::sample::select(vec![b'a', b'b', b' ']), 0..256)
        .prop_map(ByteBuffer::from)
}

// ============================================================================
// Core Algebra
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(256))]

    #[test]
    fn concatenate_length_is_additive(x in arb_buffer(), y in arb_buffer()) {
        init_test_logging();
        let joined = concatenate(&x, &y);
        prop_assert_eq!(joined.len(), x.len() + y.len());
        prop_assert_eq!(&joined.as_bytes()[..x.len()], x.as_bytes());
        prop_assert_eq!(&joined.as_bytes()[x.len()..], y.as_bytes());
    }

    #[test]
    fn reverse_is_an_involution(x in arb_buffer()) {
        init_test_logging();
        let once = reverse(&x);
        prop_assert_eq!(once.len(), x.len());
        prop_assert_eq!(reverse(&once), x);
    }

    #[test]
    fn upper_after_lower_equals_upper_for_letters(x in arb_letters()) {
        init_test_logging();
        prop_assert_eq!(to_upper(&to_lower(&x)), to_upper(&x));
    }

    #[test]
    fn substring_from_end_or_beyond_is_empty(x in arb_buffer(), past in 0usize..16, len in any::<usize>()) {
        init_test_logging();
        prop_assert!(substring(&x, x.len() + past, len).is_empty());
    }

    #[test]
    fn substring_never_overruns(x in arb_buffer(), start in 0usize..160, len in any::<usize>()) {
        init_test_logging();
        let sub = substring(&x, start, len);
        prop_assert!(sub.len() <= len);
        prop_assert!(sub.len() <= x.len().saturating_sub(start));
    }
}

// ============================================================================
// Round-Trips
// ============================================================================

proptest! {
    #![proptest_config(test_proptest_config(256))]

    #[test]
    fn rle_round_trips_digit_free_input(x in arb_digit_free()) {
        init_test_logging();
        let encoded = compress(&x).expect("digit-free input must compress");
        prop_assert_eq!(decompress(&encoded).expect("own output must decode"), x);
    }

    #[test]
    fn rle_round_trips_long_runs(x in arb_runs()) {
        init_test_logging();
        let encoded = compress(&x).expect("digit-free input must compress");
        prop_assert!(encoded.len() <= 2 * x.len());
        prop_assert_eq!(decompress(&encoded).expect("own output must decode"), x);
    }

    #[test]
    fn rle_rejects_any_input_with_a_digit(prefix in arb_digit_free(), digit in 0u8..10, suffix in arb_buffer()) {
        init_test_logging();
        let mut bytes = prefix.into_bytes();
        bytes.push(b'0' + digit);
        bytes.extend_from_slice(suffix.as_bytes());
        prop_assert!(compress(&ByteBuffer::from(bytes)).is_err());
    }

    #[test]
    fn caesar_decode_inverts_encode(x in arb_letters(), shift in any::<i64>()) {
        init_test_logging();
        prop_assert_eq!(caesar_decode(&caesar_encode(&x, shift), shift), x);
    }

    #[test]
    fn join_inverts_split(x in arb_buffer(), delimiter in any::<u8>()) {
        init_test_logging();
        let parts = split(&x, delimiter);
        let delimiters = x.as_bytes().iter().filter(|&&b| b == delimiter).count();
        prop_assert_eq!(parts.len(), delimiters + 1);
        prop_assert_eq!(StringCollection::from(parts).join(delimiter), x);
    }
}
