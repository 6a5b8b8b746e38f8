//! Test utilities and global setup

/// Test logging utilities
#[cfg(all(test, feature = "test-logging"))]
pub mod logging {
    use std::sync::Once;
    use tracing_subscriber::{EnvFilter, fmt};

    static INIT: Once = Once::new();

    /// Initialize test logging globally - safe to call multiple times
    ///
    /// Respects `RUST_LOG` and defaults to `trace` so disposal events show up:
    ///
    /// ```bash
    /// RUST_LOG=clang_bridge::ffi=trace cargo test --features test-logging
    /// ```
    pub fn init() {
        INIT.call_once(|| {
            let env_filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("clang_bridge=trace"));

            fmt()
                .with_env_filter(env_filter)
                .with_test_writer()
                .with_target(true)
                .compact()
                .try_init()
                .ok();
        });
    }
}

/// Initialize test logging once for every test in the crate
#[cfg(all(test, feature = "test-logging"))]
#[macro_export]
macro_rules! setup_test_logging {
    () => {
        #[ctor::ctor]
        fn init_test_logging() {
            $crate::test_utils::logging::init();
        }
    };
}

/// Scratch C and C++ sources for tests that need real files on disk
#[cfg(test)]
pub mod sources {
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// A temporary directory of source files, removed on drop
    pub struct SourceTree {
        _temp_dir: TempDir,
        pub root: PathBuf,
    }

    impl SourceTree {
        pub fn new() -> Result<Self, std::io::Error> {
            let temp_dir = TempDir::new()?;
            let root = temp_dir.path().to_path_buf();
            Ok(Self {
                _temp_dir: temp_dir,
                root,
            })
        }

        /// Write `contents` to `name` below the root, creating parent directories
        pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf, std::io::Error> {
            let path = self.root.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, contents)?;
            Ok(path)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_source_tree_writes_nested_files() {
            let tree = SourceTree::new().unwrap();
            let path = tree.write("include/shape.h", "struct Shape {};").unwrap();
            assert!(path.starts_with(&tree.root));
            assert_eq!(fs::read_to_string(path).unwrap(), "struct Shape {};");
        }
    }
}
