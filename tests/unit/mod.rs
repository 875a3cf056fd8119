// Test code is allowed to panic on failure
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

//! Unit tests for markdown-view.
//!
//! These tests run without a Kubernetes cluster and exercise the public
//! webhook API directly.

#[path = "../common/mod.rs"]
#[allow(dead_code)]
mod common;

mod crd_tests {
    use markdown_view::crd::{
        DEFAULT_VIEWER_IMAGE, MAX_REPLICAS, MIN_REPLICAS, MarkdownView, MarkdownViewStatus,
        REQUIRED_DOCUMENT,
    };

    #[test]
    fn test_constants() {
        assert_eq!(DEFAULT_VIEWER_IMAGE, "peaceiris/mdbook:latest");
        assert_eq!(REQUIRED_DOCUMENT, "SUMMARY.md");
        assert_eq!((MIN_REPLICAS, MAX_REPLICAS), (1, 5));
    }

    #[test]
    fn test_status_round_trip() {
        let raw = serde_json::json!({
            "apiVersion": "view.cappyzawa.github.io/v1",
            "kind": "MarkdownView",
            "metadata": {"name": "sample"},
            "spec": {"replicas": 1},
            "status": "Healthy"
        });
        let view: MarkdownView = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(view.status, Some(MarkdownViewStatus("Healthy".to_string())));
        assert_eq!(serde_json::to_value(&view).unwrap(), raw);
    }
}

mod mutator_tests {
    use crate::common::fixtures::MarkdownViewBuilder;
    use markdown_view::crd::DEFAULT_VIEWER_IMAGE;
    use markdown_view::webhooks::{AdmissionInput, Operation};
    use markdown_view::{AdmissionHandler, Decision, JsonDecoder, Mutator};

    fn input(operation: Operation, object: Vec<u8>) -> AdmissionInput {
        AdmissionInput {
            uid: "uid".to_string(),
            operation,
            object,
            name: "sample".to_string(),
            namespace: Some("default".to_string()),
        }
    }

    #[test]
    fn test_scenario_empty_image_is_defaulted() {
        let raw = MarkdownViewBuilder::new("sample")
            .replicas(3)
            .markdown("SUMMARY.md", "...")
            .markdown("a.md", "...")
            .viewer_image("")
            .raw();

        let decision = Mutator::new(JsonDecoder).handle(&input(Operation::Create, raw));
        let Decision::Patched(patch) = decision else {
            panic!("expected a patch, got {:?}", decision);
        };
        let ops = serde_json::to_value(&patch).unwrap();
        assert_eq!(ops[0]["path"], "/spec/viewerImage");
        assert_eq!(ops[0]["value"], DEFAULT_VIEWER_IMAGE);
    }

    #[test]
    fn test_mutator_never_denies_invalid_objects() {
        // Validation is the validating webhook's job
        let raw = MarkdownViewBuilder::new("sample").replicas(0).raw();
        let decision = Mutator::new(JsonDecoder).handle(&input(Operation::Update, raw));
        assert!(decision.is_allowed());
    }

    #[test]
    fn test_scenario_unparseable_bytes() {
        let decision =
            Mutator::new(JsonDecoder).handle(&input(Operation::Create, b"\x00garbage".to_vec()));
        assert!(matches!(decision, Decision::DecodeFailed(_)));
        assert_eq!(decision.status_code(), 400);
        assert!(decision.message().is_some());
    }
}

mod validator_tests {
    use crate::common::fixtures::MarkdownViewBuilder;
    use markdown_view::webhooks::{FieldErrorType, validate_resource};
    use markdown_view::{Decision, JsonDecoder, Validator};

    #[test]
    fn test_scenario_zero_replicas() {
        let view = MarkdownViewBuilder::new("sample")
            .replicas(0)
            .markdown("SUMMARY.md", "...")
            .build();

        let Decision::Denied(err) = validate_resource(&view) else {
            panic!("expected denial");
        };
        assert!(err.to_string().contains("replicas must be in the range of 1 to 5"));
        assert_eq!(err.causes()[0].error_type, FieldErrorType::Invalid);
        assert_eq!(err.causes()[0].bad_value, Some(serde_json::json!(0)));
    }

    #[test]
    fn test_scenario_without_summary() {
        let view = MarkdownViewBuilder::new("sample")
            .replicas(2)
            .markdown("a.md", "...")
            .build();

        let Decision::Denied(err) = validate_resource(&view) else {
            panic!("expected denial");
        };
        assert!(err.to_string().contains("markdowns must have SUMMARY.md"));
        assert_eq!(err.causes()[0].error_type, FieldErrorType::Required);
        assert_eq!(
            err.to_string(),
            "MarkdownView.view.cappyzawa.github.io \"sample\" is invalid: \
             spec.markdowns: Required value: markdowns must have SUMMARY.md."
        );
    }

    #[test]
    fn test_scenario_custom_image() {
        let view = MarkdownViewBuilder::new("sample")
            .replicas(2)
            .markdown("SUMMARY.md", "...")
            .viewer_image("custom/image:v1")
            .build();

        let decision = validate_resource(&view);
        assert!(decision.is_allowed());
        assert_eq!(decision.warnings().len(), 1);
        assert!(decision.warnings()[0].contains("viewerImage is not default"));
    }

    #[test]
    fn test_scenario_unparseable_bytes() {
        let decision = Validator::new(JsonDecoder).validate(b"[1, 2");
        assert!(matches!(decision, Decision::DecodeFailed(_)));
    }
}

mod concurrency_tests {
    use std::sync::Arc;
    use std::thread;

    use crate::common::fixtures::MarkdownViewBuilder;
    use markdown_view::webhooks::{AdmissionInput, Operation};
    use markdown_view::{AdmissionHandler, JsonDecoder, VALIDATE_PATH, webhook_handlers};

    #[test]
    fn test_handlers_shared_across_threads() {
        let (_, validator) = webhook_handlers(JsonDecoder)
            .into_iter()
            .find(|(path, _)| *path == VALIDATE_PATH)
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|replicas| {
                let validator = Arc::clone(&validator);
                thread::spawn(move || {
                    let object = MarkdownViewBuilder::new(format!("view-{}", replicas))
                        .replicas(replicas)
                        .markdown("SUMMARY.md", "...")
                        .viewer_image("peaceiris/mdbook:latest")
                        .raw();
                    let input = AdmissionInput {
                        uid: format!("uid-{}", replicas),
                        operation: Operation::Create,
                        object,
                        name: format!("view-{}", replicas),
                        namespace: None,
                    };
                    (replicas, validator.handle(&input).is_allowed())
                })
            })
            .collect();

        for handle in handles {
            let (replicas, allowed) = handle.join().unwrap();
            assert_eq!(allowed, (1..=5).contains(&replicas), "replicas {}", replicas);
        }
    }
}
