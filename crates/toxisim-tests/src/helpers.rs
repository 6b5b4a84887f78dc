//! Shared test helpers for integration tests.

use std::io::Write;
use std::path::PathBuf;

use toxisim_core::config::ConfigLoader;
use toxisim_kinetics::Toolkit;

/// Relative closeness: `|a - b| <= tol * max(|a|, |b|, 1)`.
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * a.abs().max(b.abs()).max(1.0)
}

/// Write `body` to `name` inside `dir` and return the path.
pub fn write_config(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path).expect("create config file");
    f.write_all(body.as_bytes()).expect("write config file");
    path
}

/// Toolkit loaded from `path`, ignoring environment overrides.
pub fn toolkit_from(path: &std::path::Path) -> Toolkit {
    Toolkit::initialize(ConfigLoader::new().without_env().file(path).load())
}
