//! Property tests: rendered documents parse back to the same value

use std::borrow::Cow;

use proptest::prelude::*;

use bibraw::{
    normalize, parse, to_string_with, Document, DocumentBuilder, Entry, FieldValue, Fields,
    NormalizeOptions, Preamble, StringMacro, WriterConfig,
};

/// Wide enough that no text value ever wraps, so rendering is exact
const NO_WRAP: WriterConfig = WriterConfig {
    indent: 4,
    width: 10_000,
};

fn name_strategy() -> impl Strategy<Value = Vec<u8>> {
    "[a-z][a-z0-9_]{0,9}".prop_map(String::into_bytes)
}

fn type_strategy() -> impl Strategy<Value = Vec<u8>> {
    name_strategy().prop_filter("reserved type keywords", |ty| {
        ty != b"string" && ty != b"preamble"
    })
}

fn value_strategy() -> impl Strategy<Value = FieldValue<'static>> {
    prop_oneof![
        (0..i64::MAX).prop_map(FieldValue::Integer),
        "[a-zA-Z0-9 .,:;'!?-]{0,40}"
            .prop_map(|s| FieldValue::Text(Cow::Owned(s.into_bytes()))),
    ]
}

fn fields_strategy() -> impl Strategy<Value = Fields<'static>> {
    prop::collection::vec((name_strategy(), value_strategy()), 0..6).prop_map(|pairs| {
        let mut fields = Fields::new();
        for (name, value) in pairs {
            fields.insert(Cow::Owned(name), value);
        }
        fields
    })
}

fn entry_strategy() -> impl Strategy<Value = Entry<'static>> {
    (type_strategy(), name_strategy(), fields_strategy()).prop_map(|(ty, citekey, fields)| {
        Entry {
            ty: Cow::Owned(ty),
            citekey: Cow::Owned(citekey),
            fields,
        }
    })
}

fn document_strategy() -> impl Strategy<Value = Document<'static>> {
    (
        prop::collection::vec("\"[a-zA-Z0-9 ]{0,20}\"", 0..3),
        prop::collection::vec((name_strategy(), value_strategy()), 0..3),
        prop::collection::vec(entry_strategy(), 1..8),
    )
        .prop_map(|(preambles, macros, entries)| {
            let mut builder = DocumentBuilder::new();
            for value in preambles {
                builder = builder.preamble(Preamble {
                    value: Cow::Owned(value.into_bytes()),
                });
            }
            for (name, value) in macros {
                let mut fields = Fields::new();
                fields.insert(Cow::Owned(name), value);
                builder = builder.string(StringMacro { fields });
            }
            for entry in entries {
                builder = builder.entry(entry);
            }
            builder.build()
        })
}

proptest! {
    #[test]
    fn roundtrip_unwrapped_is_exact(doc in document_strategy()) {
        let rendered = to_string_with(&doc, &NO_WRAP).unwrap();
        let reparsed = parse(rendered.as_bytes()).unwrap();
        prop_assert_eq!(&reparsed, &doc);
    }

    #[test]
    fn roundtrip_default_width_is_stable_under_normalization(doc in document_strategy()) {
        let options = NormalizeOptions::default();
        let first = normalize(&doc, &options).unwrap();

        let rendered = to_string_with(&first, &WriterConfig::default()).unwrap();
        let second = normalize(&parse(rendered.as_bytes()).unwrap(), &options).unwrap();
        prop_assert_eq!(&first, &second);
    }

    #[test]
    fn normalize_is_idempotent(doc in document_strategy()) {
        let options = NormalizeOptions::default();
        let once = normalize(&doc, &options).unwrap();
        let twice = normalize(&once, &options).unwrap();
        prop_assert_eq!(&once, &twice);
    }
}
