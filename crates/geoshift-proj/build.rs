use std::env;
use std::path::{Path, PathBuf};

const MIN_PROJ_VERSION: &str = "8.0";

const ENV_SKIP: &str = "GEOSHIFT_PROJ_SKIP_NATIVE_BUILD";
const ENV_PREBUILT: &str = "GEOSHIFT_PROJ_PREBUILT_DIR";
const ENV_SOURCE: &str = "GEOSHIFT_PROJ_SOURCE_DIR";
const ENV_PREFIX_PATH: &str = "GEOSHIFT_PROJ_CMAKE_PREFIX_PATH";

/// A PROJ install tree as laid out by `cmake --install`.
struct ProjInstall {
    root: PathBuf,
    lib_dir: PathBuf,
}

impl ProjInstall {
    /// Locate `include/proj.h` and the directory holding the library.
    fn at(root: &Path) -> Option<Self> {
        if !root.join("include").join("proj.h").is_file() {
            return None;
        }
        let lib_dir = ["lib", "lib64"]
            .iter()
            .map(|name| root.join(name))
            .find(|dir| has_proj_library(dir))?;
        Some(Self {
            root: root.to_path_buf(),
            lib_dir,
        })
    }

    /// `proj.db` is needed at runtime; without it every EPSG lookup fails.
    fn warn_if_database_missing(&self) {
        let db = self.root.join("share").join("proj").join("proj.db");
        if !db.is_file() {
            println!(
                "cargo:warning=no proj.db under {}; set GEOSHIFT_PROJ_DATA at runtime",
                self.root.display()
            );
        }
    }

    fn link(&self) {
        println!("cargo:rustc-link-search=native={}", self.lib_dir.display());
        println!("cargo:rustc-link-lib=proj");
        // libproj is C++ internally.
        if cfg!(target_os = "linux") {
            println!("cargo:rustc-link-lib=dylib=stdc++");
        } else if cfg!(target_os = "macos") {
            println!("cargo:rustc-link-lib=dylib=c++");
        }
        self.warn_if_database_missing();
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    for var in [ENV_SKIP, ENV_PREBUILT, ENV_SOURCE, ENV_PREFIX_PATH] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    if flag(ENV_SKIP) {
        println!("cargo:warning={ENV_SKIP} set: not linking PROJ (check-only mode)");
        return;
    }

    if let Some(prefix) = var(ENV_PREBUILT).map(PathBuf::from) {
        match ProjInstall::at(&prefix) {
            Some(install) => install.link(),
            None => panic!(
                "{ENV_PREBUILT}={} has no include/proj.h with libproj under lib or lib64",
                prefix.display()
            ),
        }
        return;
    }

    // A system PROJ is the common case; pkg-config emits the link lines.
    match pkg_config::Config::new()
        .atleast_version(MIN_PROJ_VERSION)
        .probe("proj")
    {
        Ok(_) => return,
        Err(err) => println!(
            "cargo:warning=system PROJ >= {MIN_PROJ_VERSION} not found ({err}); building from source"
        ),
    }

    let install = build_from_source(&source_dir());
    install.link();
}

fn source_dir() -> PathBuf {
    if let Some(dir) = var(ENV_SOURCE) {
        return PathBuf::from(dir);
    }
    let manifest_dir = env::var_os("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_default();
    manifest_dir.join("../../extern/PROJ")
}

/// Configure a minimal library-only PROJ: no command-line tools, no network
/// grid fetching, no GeoTIFF grids.
fn build_from_source(src: &Path) -> ProjInstall {
    if !src.join("CMakeLists.txt").is_file() {
        panic!(
            "PROJ source not found at {}. Install PROJ, or set {ENV_SOURCE} or {ENV_PREBUILT}.",
            src.display()
        );
    }

    let mut config = cmake::Config::new(src);
    config
        .define("BUILD_SHARED_LIBS", "ON")
        .define("BUILD_TESTING", "OFF")
        .define("ENABLE_CURL", "OFF")
        .define("ENABLE_TIFF", "OFF");
    for tool in ["CCT", "CS2CS", "GEOD", "GIE", "PROJ", "PROJINFO", "PROJSYNC"] {
        config.define(format!("BUILD_{tool}"), "OFF");
    }
    if let Some(prefix_path) = var(ENV_PREFIX_PATH) {
        config.define("CMAKE_PREFIX_PATH", prefix_path);
    }

    let root = config.build();
    ProjInstall::at(&root)
        .unwrap_or_else(|| panic!("PROJ build finished but {} has no library", root.display()))
}

fn has_proj_library(dir: &Path) -> bool {
    let Ok(entries) = dir.read_dir() else {
        return false;
    };
    entries.flatten().any(|entry| {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        name.starts_with("libproj.") || name == "proj.lib" || name.starts_with("proj_")
    })
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn flag(name: &str) -> bool {
    var(name).is_some_and(|v| {
        ["1", "true", "yes", "on"]
            .iter()
            .any(|truthy| v.eq_ignore_ascii_case(truthy))
    })
}
