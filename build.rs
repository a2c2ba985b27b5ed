//! Build script for the nativecall fixture library
//!
//! Compiles `native/mylib.c` into a shared library with the host C compiler
//! so tests and the demo have something real to load. The output directory
//! is exported as `NATIVECALL_FIXTURE_DIR`. A missing compiler is not fatal:
//! the build continues and fixture-dependent tests skip themselves.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const FIXTURE_SOURCE: &str = "native/mylib.c";
const FIXTURE_NAME: &str = "mylib";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={}", FIXTURE_SOURCE);

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set by cargo"));
    let fixture_dir = out_dir.join("native");
    fs::create_dir_all(&fixture_dir).expect("Failed to create fixture directory");
    println!(
        "cargo:rustc-env=NATIVECALL_FIXTURE_DIR={}",
        fixture_dir.display()
    );

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let filename = match target_os.as_str() {
        "windows" => format!("{}.dll", FIXTURE_NAME),
        "macos" => format!("lib{}.dylib", FIXTURE_NAME),
        "linux" => format!("lib{}.so", FIXTURE_NAME),
        other => {
            println!(
                "cargo:warning=No shared library convention for {}, fixture not built",
                other
            );
            return;
        }
    };

    if let Err(e) = compile_fixture(Path::new(FIXTURE_SOURCE), &fixture_dir.join(&filename)) {
        println!("cargo:warning=Failed to build fixture library: {}", e);
    }
}

/// Compile `source` into the shared library `output`
fn compile_fixture(source: &Path, output: &Path) -> Result<(), String> {
    let compiler = cc::Build::new()
        .cargo_metadata(false)
        .try_get_compiler()
        .map_err(|e| e.to_string())?;

    let mut cmd = compiler.to_command();
    if compiler.is_like_msvc() {
        cmd.arg("/nologo")
            .arg("/LD")
            .arg(source)
            .arg(format!("/Fe{}", output.display()))
            .arg(format!(
                "/Fo{}\\",
                output.parent().unwrap_or(Path::new(".")).display()
            ));
    } else {
        cmd.args(["-shared", "-fPIC", "-O2", "-o"])
            .arg(output)
            .arg(source);
    }

    let status = cmd
        .status()
        .map_err(|e| format!("could not run {}: {}", compiler.path().display(), e))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("{} exited with {}", compiler.path().display(), status))
    }
}
