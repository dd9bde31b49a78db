use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use topolayer_cli::{Args, run};

/// Collects all .yml files from a directory
fn collect_topology_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("yml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demo topologies live at the workspace root.
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: Some(output.to_string_lossy().to_string()),
        config: None,
        orientation: None,
        connectors: false,
        include_unlinked_nodes: false,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_topology_files(demos_path());
    assert!(!valid_demos.is_empty(), "No demo topologies found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let stem = demo_path.file_stem().unwrap().to_string_lossy();
        for connectors in [false, true] {
            let output_path = temp_dir
                .path()
                .join(format!("{stem}-{connectors}.layout.json"));

            let mut args = args(demo_path, &output_path);
            args.connectors = connectors;

            match run(&args) {
                Ok(()) => {
                    let json = fs::read_to_string(&output_path).expect("Output was not written");
                    assert!(json.contains("\"nodes\""), "{}: no nodes in output", demo_path.display());
                    assert_eq!(json.contains("\"connectors\""), connectors);
                }
                Err(e) => failed_demos.push((demo_path.clone(), e)),
            }
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nDemo topologies that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo run(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} demo topologies passed", valid_demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_topology_files(demos_path().join("errors"));
    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_path = temp_dir.path().join(format!(
            "error_{}.layout.json",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args(demo_path, &output_path)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!("✅ All {} error demos failed as expected", error_demos.len());
}

#[test]
fn e2e_default_output_path() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("lab.clab.yml");
    fs::write(
        &input,
        "topology:\n  nodes:\n    a: {}\n    b: {}\n  links:\n    - endpoints: [\"a:e1\", \"b:e1\"]\n",
    )
    .unwrap();

    let mut args = args(&input, &input);
    args.output = None;
    run(&args).expect("Layout failed");

    let output = temp_dir.path().join("lab.clab.layout.json");
    let json = fs::read_to_string(output).expect("Default output was not written");
    assert!(json.contains("\"a:e1:b:e1\""));
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("absent.yml");
    let output = temp_dir.path().join("out.json");

    assert!(run(&args(&input, &output)).is_err());
    assert!(!output.exists());
}
