//! Generator configuration.

/// Namespaces the generated code is placed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces {
    pub native_framework: String,
    pub native_editor: String,
    pub managed_framework: String,
    pub managed_editor: String,
}

impl Default for Namespaces {
    fn default() -> Self {
        Self {
            native_framework: "bs".into(),
            native_editor: "bs".into(),
            managed_framework: "bs".into(),
            managed_editor: "bs.Editor".into(),
        }
    }
}

/// Export macros prefixed to generated native companion classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportMacros {
    pub framework: String,
    pub editor: String,
}

impl Default for ExportMacros {
    fn default() -> Self {
        Self {
            framework: "BS_SCR_BE_EXPORT".into(),
            editor: "BS_SCR_BED_EXPORT".into(),
        }
    }
}

/// Settings shared by every phase.
///
/// # Example
///
/// ```
/// use sbgen_core::GeneratorConfig;
///
/// let config = GeneratorConfig::default().with_editor(false);
/// assert_eq!(config.native_namespace(false), "bs");
/// assert_eq!(config.managed_namespace(true), "bs.Editor");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// When false, editor-only declarations are skipped entirely.
    pub generate_editor: bool,
    pub namespaces: Namespaces,
    pub export_macros: ExportMacros,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generate_editor: true,
            namespaces: Namespaces::default(),
            export_macros: ExportMacros::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_editor(mut self, generate_editor: bool) -> Self {
        self.generate_editor = generate_editor;
        self
    }

    pub fn with_namespaces(mut self, namespaces: Namespaces) -> Self {
        self.namespaces = namespaces;
        self
    }

    pub fn with_export_macros(mut self, export_macros: ExportMacros) -> Self {
        self.export_macros = export_macros;
        self
    }

    pub fn native_namespace(&self, editor: bool) -> &str {
        if editor {
            &self.namespaces.native_editor
        } else {
            &self.namespaces.native_framework
        }
    }

    pub fn managed_namespace(&self, editor: bool) -> &str {
        if editor {
            &self.namespaces.managed_editor
        } else {
            &self.namespaces.managed_framework
        }
    }

    pub fn export_macro(&self, editor: bool) -> &str {
        if editor {
            &self.export_macros.editor
        } else {
            &self.export_macros.framework
        }
    }
}
