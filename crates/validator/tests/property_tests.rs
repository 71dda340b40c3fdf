//! Property-based tests for tagval-validator.

use proptest::prelude::*;
use tagval_validator::prelude::*;

fn outcome(field: String, ok: bool) -> ValidationOutcome {
    if ok {
        Ok(())
    } else {
        Err(ValidationMessage::new(field, "test", "failed"))
    }
}

fn result_of(outcomes: &[(String, bool)]) -> ValidationResult {
    outcomes
        .iter()
        .map(|(field, ok)| outcome(field.clone(), *ok))
        .collect()
}

// ============================================================================
// PASS INVARIANT: pass() == messages().is_empty()
// ============================================================================

proptest! {
    #[test]
    fn pass_iff_no_messages(outcomes in prop::collection::vec(("[a-z]{1,8}", any::<bool>()), 0..16)) {
        let result = result_of(&outcomes);
        prop_assert_eq!(result.pass(), result.messages().is_empty());
        prop_assert_eq!(result.pass(), outcomes.iter().all(|(_, ok)| *ok));
    }
}

// ============================================================================
// APPEND LAWS
// ============================================================================

proptest! {
    #[test]
    fn append_pass_is_conjunction(
        a in prop::collection::vec(("[a-z]{1,8}", any::<bool>()), 0..8),
        b in prop::collection::vec(("[a-z]{1,8}", any::<bool>()), 0..8),
    ) {
        let left = result_of(&a);
        let right = result_of(&b);
        let expected = left.pass() && right.pass();

        let mut merged = left.clone();
        merged.append(right.clone());

        prop_assert_eq!(merged.pass(), expected);
        prop_assert_eq!(
            merged.messages().len(),
            left.messages().len() + right.messages().len()
        );
        prop_assert_eq!(&merged.messages()[..left.messages().len()], left.messages());
        prop_assert_eq!(&merged.messages()[left.messages().len()..], right.messages());
    }

    #[test]
    fn failing_is_absorbing(passing in 0usize..16) {
        let mut result = ValidationResult::failure(ValidationMessage::new("x", "test", "failed"));
        for _ in 0..passing {
            result.push(Ok(()));
            result.append(ValidationResult::success());
        }
        prop_assert!(!result.pass());
        prop_assert_eq!(result.messages().len(), 1);
    }
}

// ============================================================================
// PRIMITIVES ARE TOTAL
// ============================================================================

proptest! {
    #[test]
    fn text_primitives_never_panic(s in ".{0,64}") {
        let _ = is_not_empty("f", &s);
        let _ = is_email("f", &s);
        let _ = is_url("f", &s);
        let _ = is_ip("f", &s);
        let _ = is_length_greater_than("f", &s, 3);
        let _ = is_length_less_than("f", &s, 3);
    }

    #[test]
    fn not_empty_matches_emptiness(s in ".{0,16}") {
        prop_assert_eq!(is_not_empty("f", &s).is_ok(), !s.is_empty());
    }

    #[test]
    fn length_bounds_are_strict(s in ".{0,32}", n in 0usize..32) {
        let len = s.chars().count();
        prop_assert_eq!(is_length_greater_than("f", &s, n).is_ok(), len > n);
        prop_assert_eq!(is_length_less_than("f", &s, n).is_ok(), len < n);
    }
}
