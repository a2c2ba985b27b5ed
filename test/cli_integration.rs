//! CLI Integration Tests for nativecall
//!
//! Runs the built binary end to end.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Get the path to the nativecall binary
fn nativecall_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_nativecall"))
}

/// Directory the build script compiled the fixture into
fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("NATIVECALL_FIXTURE_DIR"))
}

fn fixture_filename() -> &'static str {
    if cfg!(windows) {
        "mylib.dll"
    } else if cfg!(target_os = "macos") {
        "libmylib.dylib"
    } else {
        "libmylib.so"
    }
}

fn fixture_built() -> bool {
    fixture_dir().join(fixture_filename()).exists()
}

/// Run in an empty temp directory so no stray nativecall.toml is picked up
fn run(args: &[&str]) -> Output {
    let cwd = std::env::temp_dir().join(format!("nativecall_cli_{}", std::process::id()));
    std::fs::create_dir_all(&cwd).ok();
    Command::new(nativecall_binary())
        .args(args)
        .current_dir(&cwd)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run nativecall")
}

// ============================================================================
// resolve
// ============================================================================

#[test]
fn test_resolve_each_platform() {
    let cases = [
        ("win32", "mylib.dll"),
        ("linux", "libmylib.so"),
        ("darwin", "libmylib.dylib"),
    ];
    for (platform, file) in cases {
        let output = run(&["resolve", "--platform", platform, "--lib-dir", "build"]);
        assert!(
            output.status.success(),
            "resolve failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let expected = Path::new("build").join(file);
        assert_eq!(
            String::from_utf8_lossy(&output.stdout).trim(),
            expected.display().to_string()
        );
    }
}

#[test]
fn test_resolve_custom_name() {
    let output = run(&[
        "resolve",
        "--platform",
        "linux",
        "--lib-dir",
        "out",
        "--lib-name",
        "engine",
    ]);
    assert!(output.status.success());
    let expected = Path::new("out").join("libengine.so");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        expected.display().to_string()
    );
}

#[test]
fn test_resolve_unsupported_platform() {
    let output = run(&["resolve", "--platform", "plan9"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported platform: plan9"), "{}", stderr);
    assert!(output.stdout.is_empty());
}

// ============================================================================
// exports
// ============================================================================

#[test]
fn test_exports_listing() {
    let output = run(&["exports"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            "void say_hello()",
            "int twice_int(int)",
            "float twice_float(float)",
            "void print_str(const char*)",
            "void test_array(void*, size_t)",
        ]
    );
}

#[test]
fn test_exports_json() {
    let output = run(&["exports", "--json"]);
    assert!(output.status.success());
    let table: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let table = table.as_array().unwrap();
    assert_eq!(table.len(), 5);
    assert_eq!(table[1]["name"], "twice_int");
    assert_eq!(table[1]["params"][0], "i32");
    assert_eq!(table[4]["params"][1], "usize");
}

// ============================================================================
// run
// ============================================================================

#[test]
fn test_run_against_fixture() {
    if !fixture_built() {
        eprintln!("skipping: fixture library not built");
        return;
    }
    let dir = fixture_dir();
    let output = run(&[
        "run",
        "--lib-dir",
        dir.to_str().unwrap(),
        "--seed",
        "7",
        "--array-len",
        "4",
    ]);
    assert!(
        output.status.success(),
        "run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Hello from native code!"));
    assert!(stdout.lines().any(|l| l == "42"));
    assert!(stdout.lines().any(|l| l == "64"));
    assert!(stdout.lines().any(|l| l == "6.28"));
    assert!(stdout.contains("str is: Hello, C++!"));
    assert!(stdout.contains("str is: 我系佳佳辉"));
    assert!(stdout.contains("array of 4 floats:"));
}

#[test]
fn test_run_json_report() {
    if !fixture_built() {
        eprintln!("skipping: fixture library not built");
        return;
    }
    let dir = fixture_dir();
    let output = run(&["run", "--lib-dir", dir.to_str().unwrap(), "--json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let start = stdout.find('{').expect("no JSON report");
    let report: serde_json::Value = serde_json::from_str(&stdout[start..]).unwrap();
    assert_eq!(report["twice_int"][0][1], 42);
    assert_eq!(report["array_after"].as_array().unwrap().len(), 16);
}

#[test]
fn test_run_missing_library() {
    let output = run(&["run", "--lib-dir", "/nonexistent/nativecall"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load library"), "{}", stderr);
}

#[test]
fn test_default_invocation_uses_build_dir() {
    // No arguments: looks for build/<mylib> relative to the working directory
    let output = run(&[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("mylib"), "{}", stderr);
}

#[test]
fn test_config_file() {
    if !fixture_built() {
        eprintln!("skipping: fixture library not built");
        return;
    }
    let cwd = std::env::temp_dir().join(format!("nativecall_cfg_{}", std::process::id()));
    std::fs::create_dir_all(&cwd).unwrap();
    let config_path = cwd.join("custom.toml");
    let config = format!(
        "[library]\ndir = {:?}\n\n[demo]\nints = [5]\nstrings = []\narray_len = 2\n",
        fixture_dir().to_str().unwrap()
    );
    std::fs::write(&config_path, config).unwrap();

    let output = Command::new(nativecall_binary())
        .args(["--config", config_path.to_str().unwrap()])
        .current_dir(&cwd)
        .output()
        .expect("Failed to run nativecall");
    assert!(
        output.status.success(),
        "run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|l| l == "10"));
    assert!(!stdout.contains("str is:"));

    std::fs::remove_dir_all(&cwd).ok();
}

#[test]
fn test_config_found_in_parent_directory() {
    if !fixture_built() {
        eprintln!("skipping: fixture library not built");
        return;
    }
    let root = std::env::temp_dir().join(format!("nativecall_parent_{}", std::process::id()));
    let sub = root.join("sub");
    std::fs::create_dir_all(root.join("native")).unwrap();
    std::fs::create_dir_all(&sub).unwrap();

    // Copy the fixture next to the config file, referenced by a relative dir
    std::fs::copy(
        fixture_dir().join(fixture_filename()),
        root.join("native").join(fixture_filename()),
    )
    .unwrap();
    std::fs::write(
        root.join("nativecall.toml"),
        "[library]\ndir = \"native\"\n\n[demo]\nints = [9]\nstrings = []\narray_len = 1\n",
    )
    .unwrap();

    for cwd in [&root, &sub] {
        let output = Command::new(nativecall_binary())
            .current_dir(cwd)
            .output()
            .expect("Failed to run nativecall");
        assert!(
            output.status.success(),
            "run from {} failed: {}",
            cwd.display(),
            String::from_utf8_lossy(&output.stderr)
        );
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.lines().any(|l| l == "18"), "{}", stdout);
    }

    std::fs::remove_dir_all(&root).ok();
}
