//! Worker configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::catalog::CATALOG_FILE_NAME;

/// Resolve the assets directory holding bundled datasets.
///
/// `OPENING_ASSETS_DIR` overrides everything. A packaged install ships an
/// `assets/` directory next to the executable; development builds read
/// from `data/` in the working directory.
pub fn assets_dir() -> PathBuf {
    if let Ok(dir) = env::var("OPENING_ASSETS_DIR") {
        return PathBuf::from(dir);
    }

    if let Ok(exe) = env::current_exe() {
        if let Some(parent) = exe.parent() {
            let packaged = parent.join("assets");
            if packaged.is_dir() {
                return packaged;
            }
        }
    }

    PathBuf::from("data")
}

/// Path to the bundled opening catalog dataset.
pub fn catalog_path() -> PathBuf {
    assets_dir().join(CATALOG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_path_is_inside_assets_dir() {
        let path = catalog_path();
        assert_eq!(path.file_name().unwrap(), CATALOG_FILE_NAME);
        assert!(path.parent().is_some());
    }
}
