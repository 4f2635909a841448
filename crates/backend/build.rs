//! Кладёт `config.toml` шлюза рядом с собранным исполняемым файлом, где его
//! ищет `load_config`.
//!
//! Источник: `config.toml` в корне workspace (шаблон:
//! `crates/backend/config.example.toml`). Без него шлюз работает на
//! встроенных настройках и встроенной политике, поэтому отсутствие файла или
//! необычная структура target дают только предупреждение.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let Some(source) = workspace_config() else {
        return;
    };
    if !source.exists() {
        println!(
            "cargo:warning=no config.toml at {}, the gateway will use its built-in policy",
            source.display()
        );
        return;
    }

    let Some(target_dir) = profile_dir() else {
        println!("cargo:warning=target profile directory not found, config.toml not copied");
        return;
    };
    let dest = target_dir.join("config.toml");

    match fs::copy(&source, &dest) {
        Ok(_) => println!("cargo:warning=gateway config copied to {}", dest.display()),
        Err(e) => println!("cargo:warning=cannot copy config.toml to {}: {}", dest.display(), e),
    }
}

fn workspace_config() -> Option<PathBuf> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").ok()?;
    Path::new(&manifest_dir)
        .ancestors()
        .nth(2)
        .map(|root| root.join("config.toml"))
}

/// `OUT_DIR` имеет вид `target/<profile>/build/backend-*/out`, бинарник лежит в
/// `target/<profile>`.
fn profile_dir() -> Option<PathBuf> {
    let out_dir = env::var("OUT_DIR").ok()?;
    let profile = env::var("PROFILE").ok()?;
    Path::new(&out_dir)
        .ancestors()
        .find(|dir| dir.ends_with(&profile))
        .map(Path::to_path_buf)
}
