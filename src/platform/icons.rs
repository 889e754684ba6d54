use std::path::{Path, PathBuf};

/// Icon shown for results that don't bring their own
pub const DEFAULT_ICON: &str = "images/icon.svg";

/// Turns an icon reference into an absolute path the host can load
pub trait IconResolver: Send + Sync {
    fn resolve(&self, icon: &str) -> PathBuf;
}

/// Resolves icons relative to an asset directory.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$CALCANY_ASSETS` if set, else `<data_dir>/calcany`
    pub fn discover() -> Self {
        if let Some(dir) = std::env::var_os("CALCANY_ASSETS") {
            return Self::new(dir);
        }

        let root = dirs::data_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".local").join("share"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("calcany");
        Self::new(root)
    }
}

impl IconResolver for AssetDir {
    fn resolve(&self, icon: &str) -> PathBuf {
        let path = Path::new(icon);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
