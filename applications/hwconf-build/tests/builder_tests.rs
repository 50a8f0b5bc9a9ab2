mod common;

use common::{board, RecordingRunner};
use hwconf_build::{Builder, CargoBackend, DryRunner, IdfBackend};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn idf(build_dir: PathBuf) -> IdfBackend {
    IdfBackend {
        command: "idf.py".to_string(),
        build_dir,
        app_name: "vesc_express".to_string(),
    }
}

#[test]
fn test_builds_every_board_and_copies_artifacts() {
    let work = TempDir::new().unwrap();
    let build_dir = work.path().join("build");
    let output_dir = work.path().join("build_output");
    let backend = idf(build_dir.clone());

    let runner = RecordingRunner {
        outputs: vec![
            build_dir.join("vesc_express.bin"),
            build_dir.join("bootloader").join("bootloader.bin"),
            build_dir.join("partition_table").join("partition-table.bin"),
        ],
        ..RecordingRunner::default()
    };

    let boards = [board("Devkit C6", "esp32c6"), board("DevKit S3", "esp32s3")];
    let mut builder = Builder::new(&backend, runner, &output_dir);
    let summary = builder.build_all(&boards).unwrap();

    assert!(summary.is_success());
    assert_eq!(summary.succeeded, ["Devkit C6", "DevKit S3"]);
    assert!(summary.output_dir.is_absolute());

    // set-target + build per board, in board order
    let calls = &builder.runner().calls;
    assert_eq!(calls.len(), 4);
    assert!(calls[0].args.contains(&"set-target".to_string()));
    assert!(calls[1].args.contains(&"-DHW_NAME=Devkit C6".to_string()));
    assert!(calls[3].args.contains(&"-DHW_NAME=DevKit S3".to_string()));

    for name in ["Devkit C6", "DevKit S3"] {
        let dir = output_dir.join(name);
        for file in ["vesc_express.bin", "bootloader.bin", "partition_table.bin"] {
            assert!(dir.join(file).is_file(), "{name}/{file}");
        }
    }

    // Each board keeps the image from its own build
    let s3_image = fs::read_to_string(output_dir.join("DevKit S3").join("vesc_express.bin")).unwrap();
    assert!(s3_image.contains("-DHW_NAME=DevKit S3"));
}

#[test]
fn test_failed_step_stops_board_but_not_run() {
    let work = TempDir::new().unwrap();
    let backend = idf(work.path().join("build"));
    let runner = RecordingRunner {
        fail_when: Some("-DHW_NAME=Devkit C6\" set-target".to_string()),
        ..RecordingRunner::default()
    };

    let boards = [board("Devkit C6", "esp32c6"), board("DevKit S3", "esp32s3")];
    let mut builder = Builder::new(&backend, runner, work.path().join("out"));
    let summary = builder.build_all(&boards).unwrap();

    assert!(!summary.is_success());
    assert_eq!(summary.failed, ["Devkit C6"]);
    assert_eq!(summary.succeeded, ["DevKit S3"]);
    // The C6 build step never ran
    assert_eq!(builder.runner().calls.len(), 3);
    assert!(!work.path().join("out").join("Devkit C6").exists());
}

#[test]
fn test_spawn_error_fails_board() {
    let work = TempDir::new().unwrap();
    let backend = idf(work.path().join("build"));
    let runner = RecordingRunner {
        missing_when: Some("idf.py".to_string()),
        ..RecordingRunner::default()
    };

    let mut builder = Builder::new(&backend, runner, work.path().join("out"));
    let summary = builder.build_all(&[board("Devkit C6", "esp32c6")]).unwrap();
    assert_eq!(summary.failed, ["Devkit C6"]);
    assert_eq!(summary.total(), 1);
}

#[test]
fn test_missing_artifacts_do_not_fail_board() {
    let work = TempDir::new().unwrap();
    let build_dir = work.path().join("build");
    let backend = idf(build_dir.clone());
    let runner = RecordingRunner {
        outputs: vec![build_dir.join("vesc_express.bin")],
        ..RecordingRunner::default()
    };

    let out = work.path().join("out");
    let mut builder = Builder::new(&backend, runner, &out);
    let summary = builder.build_all(&[board("Devkit C6", "esp32c6")]).unwrap();

    assert!(summary.is_success());
    let dir = out.join("Devkit C6");
    assert!(dir.join("vesc_express.bin").is_file());
    assert!(!dir.join("bootloader.bin").exists());
}

#[test]
fn test_output_dir_created() {
    let work = TempDir::new().unwrap();
    let backend = idf(work.path().join("build"));
    let out = work.path().join("nested").join("out");

    let mut builder = Builder::new(&backend, RecordingRunner::default(), &out);
    builder.build_all(&[]).unwrap();
    assert!(out.is_dir());
}

#[test]
fn test_path_like_names_fail_without_writing_outside() {
    let work = TempDir::new().unwrap();
    let build_dir = work.path().join("build");
    let backend = idf(build_dir.clone());
    let runner = RecordingRunner {
        outputs: vec![build_dir.join("vesc_express.bin")],
        ..RecordingRunner::default()
    };

    let out = work.path().join("out");
    let boards = [
        board("", "esp32c6"),
        board("../escaped", "esp32c6"),
        board("Devkit C6", "esp32c6"),
    ];
    let mut builder = Builder::new(&backend, runner, &out);
    let summary = builder.build_all(&boards).unwrap();

    assert_eq!(summary.failed, ["", "../escaped"]);
    assert_eq!(summary.succeeded, ["Devkit C6"]);
    // Refused before any command ran
    assert_eq!(builder.runner().calls.len(), 2);
    assert!(!out.join("vesc_express.bin").exists());
    assert!(!work.path().join("escaped").exists());
    assert!(out.join("Devkit C6").join("vesc_express.bin").is_file());
}

#[test]
fn test_dry_run_touches_nothing() {
    let work = TempDir::new().unwrap();
    let backend = idf(work.path().join("build"));
    let out = work.path().join("out");

    let mut builder = Builder::new(&backend, DryRunner, &out);
    let summary = builder
        .build_all(&[board("Devkit C6", "esp32c6")])
        .unwrap();

    assert!(summary.is_success());
    assert!(!out.exists());
}

#[test]
fn test_cargo_backend_unknown_target_fails_only_that_board() {
    let work = TempDir::new().unwrap();
    let backend = CargoBackend {
        command: "cargo".to_string(),
        firmware_dir: work.path().join("firmware"),
        bin_name: "express-firmware".to_string(),
    };

    let boards = [board("C3 Board", "esp32c3"), board("Devkit C6", "esp32c6")];
    let mut builder = Builder::new(&backend, RecordingRunner::default(), work.path().join("out"));
    let summary = builder.build_all(&boards).unwrap();

    assert_eq!(summary.failed, ["C3 Board"]);
    assert_eq!(summary.succeeded, ["Devkit C6"]);
    let calls = &builder.runner().calls;
    assert_eq!(calls.len(), 1);
    assert!(calls[0].args.contains(&"devkit-c6".to_string()));
    assert_eq!(calls[0].cwd.as_deref(), Some(work.path().join("firmware").as_path()));
}
