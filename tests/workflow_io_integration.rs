//! Integration tests for workflow file I/O
//!
//! These tests validate loading and saving API-format workflows:
//! - Document order and editor metadata survive a load/save cycle
//! - Literal pairs are not mistaken for links
//! - Repeated node ids are rejected
//! - Frame extraction output written to disk is loadable again

mod common;

use common::{extraction_input, frame_saver_generator, node};
use framesaver_rs::config::FrameSaverConfig;
use framesaver_rs::workflow::{CollectedDiagnostics, InputValue, WorkflowError, WorkflowGraph};
use framesaver_rs::FrameSaverError;
use serde_json::json;

const VIDEO_WORKFLOW: &str = r#"{
    "4": {
        "class_type": "CheckpointLoaderSimple",
        "inputs": { "ckpt_name": "video.safetensors" }
    },
    "5": {
        "class_type": "EmptyHunyuanLatentVideo",
        "inputs": { "width": 848, "height": 480, "length": 73, "resolution": [848, 480] }
    },
    "3": {
        "class_type": "KSampler",
        "inputs": { "model": ["4", 0], "latent_image": ["5", 0], "seed": 7 }
    },
    "8": {
        "class_type": "VAEDecode",
        "inputs": { "samples": ["3", 0], "vae": ["4", 2] },
        "_meta": { "title": "VAE Decode" }
    },
    "9": {
        "class_type": "SwarmSaveAnimationWS",
        "inputs": { "images": ["8", 0], "fps": 24 }
    }
}"#;

#[test]
fn test_load_and_save_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("workflow.json");
    let output = dir.path().join("out").join("workflow.json");
    std::fs::write(&input, VIDEO_WORKFLOW).unwrap();

    let graph = WorkflowGraph::load(&input).unwrap();
    let ids: Vec<_> = graph.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["4", "5", "3", "8", "9"]);

    graph.save(&output).unwrap();
    let reloaded = WorkflowGraph::load(&output).unwrap();
    assert_eq!(reloaded.nodes(), graph.nodes());
    assert_eq!(node(&reloaded, "8").meta, Some(json!({ "title": "VAE Decode" })));
}

#[test]
fn test_literal_pairs_stay_literals() {
    let graph = WorkflowGraph::from_json_str(VIDEO_WORKFLOW).unwrap();
    let latent = node(&graph, "5");
    assert!(!latent.input("resolution").unwrap().is_link());
    assert_eq!(graph.links().count(), 5);
}

#[test]
fn test_load_reports_path_on_bad_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"{ "1": { "inputs": {} } }"#).unwrap();

    let err = WorkflowGraph::load(&path).unwrap_err();
    assert!(matches!(err, FrameSaverError::WithContext { .. }));
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_load_rejects_repeated_node_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repeated.json");
    std::fs::write(
        &path,
        r#"{
            "8": { "class_type": "VAEDecode", "inputs": {} },
            "8": { "class_type": "KSampler", "inputs": {} }
        }"#,
    )
    .unwrap();

    let err = WorkflowGraph::load(&path).unwrap_err();
    match err {
        FrameSaverError::WithContext { source, .. } => assert!(matches!(
            *source,
            FrameSaverError::Workflow(WorkflowError::DuplicateNode(ref id)) if id.as_str() == "8"
        )),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = WorkflowGraph::load(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, FrameSaverError::Io(_)));
}

#[test]
fn test_extracted_workflow_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("extracted.json");

    let (extension, generator) = frame_saver_generator(&FrameSaverConfig::default());
    let mut graph = WorkflowGraph::from_json_str(VIDEO_WORKFLOW).unwrap();
    graph.infer_final_image_out("VAEDecode");

    let input = extraction_input(&extension, true, true, Some((10, 20)));
    generator.generate(&mut graph, &input, &mut CollectedDiagnostics::new());
    graph.save(&path).unwrap();

    let reloaded = WorkflowGraph::load(&path).unwrap();
    assert_eq!(reloaded.len(), 5 + 7);
    assert!(reloaded.validate().is_ok());

    let document: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(document["50002"]["class_type"], "SwarmSaveImageWS");
    assert_eq!(document["50001"]["inputs"]["bit_depth"], "8bit");

    let range_slice = node(&reloaded, "103");
    assert_eq!(range_slice.input("batch_index"), Some(&InputValue::literal(10)));
    assert_eq!(range_slice.input("length"), Some(&InputValue::literal(11)));
}
