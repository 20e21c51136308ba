//! Property-based tests for rust_xlog using proptest

use proptest::prelude::*;
use rust_xlog::prelude::*;
use rust_xlog::{GlobalChain, BAD_KEY};
use std::sync::{Arc, Mutex};

fn any_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Debug),
        Just(Level::Info),
        Just(Level::Warning),
        Just(Level::Error),
        Just(Level::Panic),
        Just(Level::Fatal),
    ]
}

fn any_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z0-9 ]{0,12}".prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<u32>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        Just(Value::Null),
    ]
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Display names parse back to the same level
    #[test]
    fn test_level_str_roundtrip(level in any_level()) {
        let parsed: Level = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
        let lower: Level = level.to_str().to_lowercase().parse().unwrap();
        prop_assert_eq!(level, lower);
    }

    /// Ordering follows the ordinals
    #[test]
    fn test_level_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a <= b, a.as_i8() <= b.as_i8());
        prop_assert_eq!(a < b, a.as_i8() < b.as_i8());
    }

    /// Every ordinal has a name; only defined ones convert
    #[test]
    fn test_ordinal_names_total(ordinal in any::<i8>()) {
        let name = Level::name_of(ordinal);
        match Level::try_from(ordinal) {
            Ok(level) => prop_assert_eq!(name, level.to_str()),
            Err(_) => prop_assert_eq!(name.into_owned(), format!("UNKNOWN({})", ordinal)),
        }
    }
}

// ============================================================================
// Record Construction Tests
// ============================================================================

proptest! {
    /// Positional arguments are kept in order, across several Args steps
    #[test]
    fn test_args_accumulate(
        first in prop::collection::vec(any_value(), 0..6),
        second in prop::collection::vec(any_value(), 0..6),
    ) {
        let record = Params::build(
            Level::Info,
            None,
            [Param::Args(first.clone()), Param::Args(second.clone())],
        );
        let mut expected = first;
        expected.extend(second);
        prop_assert_eq!(record.args, expected);
        prop_assert!(record.format.is_none());
    }

    /// Templates concatenate verbatim, in application order
    #[test]
    fn test_templates_concatenate(parts in prop::collection::vec("[a-z =]{0,8}", 1..5)) {
        let steps: Vec<Param> = parts.iter().map(|p| argsf(p.as_str(), Vec::<Value>::new())).collect();
        let record = Params::build(Level::Info, None, steps);
        prop_assert_eq!(record.format.unwrap(), parts.concat());
    }

    /// A template without verbs and without arguments renders as itself
    #[test]
    fn test_plain_template_verbatim(text in "[a-zA-Z0-9 .,:]{1,40}") {
        let record = Params::build(Level::Info, Some(text.as_str()), Vec::new());
        prop_assert_eq!(record.message(), text);
    }

    /// Field pairing covers every field, with a trailing key under BAD_KEY
    #[test]
    fn test_field_pairs(values in prop::collection::vec(any_value(), 0..9)) {
        let record = Params::build(Level::Info, None, [Param::Fields(values.clone())]);
        let pairs = record.field_pairs();
        prop_assert_eq!(pairs.len(), (values.len() + 1) / 2);
        if values.len() % 2 == 1 {
            prop_assert_eq!(pairs.last().unwrap().0.as_str(), BAD_KEY);
        }
    }

    /// Rendering never panics on mismatched templates
    #[test]
    fn test_sprintf_total(
        template in "[a-z%dsvfqxX0-9.+-]{0,20}",
        values in prop::collection::vec(any_value(), 0..4),
    ) {
        let record = Params::build(Level::Info, Some(template.as_str()), [Param::Args(values)]);
        let _ = record.message();
    }
}

// ============================================================================
// Dispatch Tests
// ============================================================================

proptest! {
    /// Every handler sees the same record, once, in registration order
    #[test]
    fn test_fan_out(level in any_level(), handlers in 1usize..6) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut builder = Logger::builder().global_chain(GlobalChain::new());
        for index in 0..handlers {
            let sink = Arc::clone(&seen);
            builder = builder.handler(move |_: &Context, p: &Params| {
                sink.lock().unwrap().push((index, p.level));
            });
        }
        let logger = builder.build();

        logger.log(&Context::background(), level, values!["x"]);

        let seen = seen.lock().unwrap();
        prop_assert_eq!(seen.len(), handlers);
        for (position, (index, seen_level)) in seen.iter().enumerate() {
            prop_assert_eq!(position, *index);
            prop_assert_eq!(*seen_level, level);
        }
    }
}
