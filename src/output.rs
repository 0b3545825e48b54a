//! Output directory layout.

use std::path::{Path, PathBuf};

use sbgen_emit::OutputTarget;

/// Where each kind of generated file is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    pub native_framework: PathBuf,
    pub native_editor: PathBuf,
    pub managed_framework: PathBuf,
    pub managed_editor: PathBuf,
}

impl OutputDirs {
    /// One subdirectory per target under `root`.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            native_framework: root.join("Native"),
            native_editor: root.join("NativeEditor"),
            managed_framework: root.join("Managed"),
            managed_editor: root.join("ManagedEditor"),
        }
    }

    pub fn dir(&self, target: OutputTarget) -> &Path {
        match target {
            OutputTarget::NativeFramework => &self.native_framework,
            OutputTarget::NativeEditor => &self.native_editor,
            OutputTarget::ManagedFramework => &self.managed_framework,
            OutputTarget::ManagedEditor => &self.managed_editor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_map_to_their_directory() {
        let dirs = OutputDirs::under("out");
        assert_eq!(dirs.dir(OutputTarget::NativeEditor), Path::new("out/NativeEditor"));
        assert_eq!(dirs.dir(OutputTarget::ManagedFramework), Path::new("out/Managed"));
    }
}
