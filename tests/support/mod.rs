//! Test harness mimicking the build container layout
//!
//! A temp directory stands in for the container: `mapped/` is the mount point
//! and `js/` the build root. The build command is a shell script that fails a
//! configurable number of times, counts its invocations and, on success,
//! drops both artifacts where PlatformIO would.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const FAKE_BUILD: &str = r#"#!/bin/sh
count=$(cat attempts 2>/dev/null || echo 0)
count=$((count + 1))
echo "$count" > attempts
pwd > build-cwd
if [ "$count" -le "${FAIL_TIMES:-0}" ]; then
    echo "fake build failing (attempt $count)" >&2
    exit 1
fi
[ -f src/Arduino.h ] || { echo "Arduino.h was not provisioned" >&2; exit 7; }
if [ "${PRODUCE_OUTPUT:-1}" = "1" ]; then
    mkdir -p .pio/build/wasm
    echo "// loader" > .pio/build/wasm/fastled.js
    printf 'wasm' > .pio/build/wasm/fastled.wasm
fi
exit 0
"#;

pub fn sketchwasm_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sketchwasm"))
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/sketches")
        .join(name)
}

pub struct BuildContainer {
    pub root: TempDir,
    pub fail_times: u32,
    pub produce_output: bool,
}

#[allow(dead_code)]
impl BuildContainer {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(root.path().join("mapped")).unwrap();
        fs::create_dir_all(root.path().join("js")).unwrap();
        fs::write(root.path().join("js/build.sh"), FAKE_BUILD).unwrap();
        fs::write(root.path().join("js/Arduino.h"), "#pragma once\n").unwrap();
        fs::write(
            root.path().join("js/index.html"),
            "<!doctype html><script src=\"fastled.js\"></script>\n",
        )
        .unwrap();

        Self {
            root,
            fail_times: 0,
            produce_output: true,
        }
    }

    pub fn mapped(&self) -> PathBuf {
        self.root.path().join("mapped")
    }

    pub fn build_root(&self) -> PathBuf {
        self.root.path().join("js")
    }

    pub fn working_tree(&self) -> PathBuf {
        self.build_root().join("src")
    }

    /// Copies a fixture sketch into the mapped root
    pub fn map_fixture(&self, name: &str) -> PathBuf {
        let dst = self.mapped().join(name);
        copy_dir(&fixture_path(name), &dst);
        dst
    }

    /// Number of times the fake build ran
    pub fn attempts(&self) -> u32 {
        fs::read_to_string(self.build_root().join("attempts"))
            .map(|s| s.trim().parse().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(sketchwasm_bin())
            .args(args)
            .env("SKETCHWASM_MAPPED_DIR", self.mapped())
            .env("SKETCHWASM_BUILD_ROOT", self.build_root())
            .env("SKETCHWASM_BUILD_COMMAND", "sh build.sh")
            .env_remove("SKETCHWASM_MAX_ATTEMPTS")
            .env_remove("SKETCHWASM_RESULTS_DIR_NAME")
            .env_remove("SKETCHWASM_COMPANION_HEADER")
            .env_remove("SKETCHWASM_LOG_JSON")
            .env_remove("RUST_LOG")
            .env("FAIL_TIMES", self.fail_times.to_string())
            .env("PRODUCE_OUTPUT", if self.produce_output { "1" } else { "0" })
            .output()
            .expect("Failed to execute sketchwasm")
    }
}

fn copy_dir(src: &Path, dst: &Path) {
    fs::create_dir_all(dst).unwrap();
    for entry in fs::read_dir(src).unwrap() {
        let entry = entry.unwrap();
        let target = dst.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), target).unwrap();
        }
    }
}
