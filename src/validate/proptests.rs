//! Property-based tests for document validation

use super::validator::{validate_document, Strictness};
use crate::config::raw::RawDocument;
use crate::registry::Registry;
use proptest::prelude::*;

fn arb_valid_doc() -> impl Strategy<Value = String> {
    (
        1usize..512,       // batch_size
        1usize..1024,      // height
        1usize..1024,      // width
        0.0f64..=1.0,      // maskthr
        1usize..100,       // eval_freq
    )
        .prop_map(|(batch_size, height, width, maskthr, eval_freq)| {
            format!(
                "model:\n  name: bdnet\n\
                 data:\n  height: {height}\n  width: {width}\n\
                 test:\n  batch_size: {batch_size}\n  maskthr: {maskthr}\n  eval_freq: {eval_freq}\n"
            )
        })
}

fn validate(text: &str) -> Result<super::Validated, super::ValidationReport> {
    let doc = RawDocument::parse(text).expect("valid YAML");
    validate_document(&doc, &Registry::builtin(), Strictness::default())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_documents_pass(doc in arb_valid_doc()) {
        prop_assert!(validate(&doc).is_ok());
    }

    #[test]
    fn prop_supplied_values_survive(doc in arb_valid_doc()) {
        let validated = validate(&doc).unwrap();
        let rendered = validated.config.to_yaml().unwrap();
        // the supplied model name survives into the typed config
        prop_assert_eq!(validated.config.model().name.as_str(), "bdnet");
        prop_assert!(rendered.contains("bdnet"));
    }

    #[test]
    fn prop_non_positive_batch_size_fails(
        doc in arb_valid_doc(),
        bad in -1000i64..=0,
    ) {
        let text = doc.replace(
            &format!("batch_size: {}\n", extract_key(&doc, "batch_size")),
            &format!("batch_size: {bad}\n"),
        );
        let report = validate(&text).unwrap_err();
        prop_assert!(report.mentions("test", "batch_size"));
    }

    #[test]
    fn prop_maskthr_above_one_fails(
        doc in arb_valid_doc(),
        excess in 1.001f64..100.0,
    ) {
        let text = doc.replace(
            &format!("maskthr: {}\n", extract_key(&doc, "maskthr")),
            &format!("maskthr: {excess}\n"),
        );
        let report = validate(&text).unwrap_err();
        prop_assert!(report.mentions("test", "maskthr"));
    }

    #[test]
    fn prop_roundtrip_preserves_config(doc in arb_valid_doc()) {
        let first = validate(&doc).unwrap().config;
        let rendered = first.to_yaml().unwrap();
        let second = validate(&rendered).unwrap().config;
        prop_assert_eq!(first, second);
    }
}

fn extract_key(doc: &str, key: &str) -> String {
    doc.lines()
        .find_map(|line| line.trim().strip_prefix(&format!("{key}: ")))
        .expect("key present")
        .to_string()
}
