//! Backend configuration.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CodegenError, Result};

/// Target framework.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framework {
    /// Next.js app router with Tailwind classes.
    #[default]
    Nextjs,
    /// Plain React with inline style objects.
    React,
    ReactNative,
    Swiftui,
    Compose,
}

impl Framework {
    pub const ALL: [Framework; 5] = [
        Self::Nextjs,
        Self::React,
        Self::ReactNative,
        Self::Swiftui,
        Self::Compose,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nextjs => "nextjs",
            Self::React => "react",
            Self::ReactNative => "react-native",
            Self::Swiftui => "swiftui",
            Self::Compose => "compose",
        }
    }

    /// Whether output targets a browser.
    pub fn is_web(self) -> bool {
        matches!(self, Self::Nextjs | Self::React)
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| CodegenError::UnknownFramework(s.to_string()))
    }
}

/// One externally supplied component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryComponent {
    /// Module to import from.
    pub import: String,
    /// Exported name, when it differs from the node type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Prop renames, spec name to component name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: IndexMap<String, String>,
}

/// Mapping from external node types to importable components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentLibrary {
    #[serde(default)]
    pub components: IndexMap<String, LibraryComponent>,
}

impl ComponentLibrary {
    pub fn get(&self, tag: &str) -> Option<&LibraryComponent> {
        self.components.get(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Settings shared by every backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackendConfig {
    pub framework: Framework,
    /// Next.js app directory that receives `page.tsx` files.
    pub app_dir: String,
    pub components_dir: String,
    /// Directory for generated web screen components.
    pub generated_dir: String,
    /// Directory for native screen files.
    pub screens_dir: String,
    pub schema_path: Option<String>,
    /// Import prefix that maps to the project root, e.g. `@/`.
    pub import_alias: String,
    /// Kotlin package for compose output.
    pub package_name: String,
    pub component_library: ComponentLibrary,
    /// Extra side-effect imports added to web screen files.
    pub plugins: Vec<String>,
    /// Token file path.
    pub tokens: Option<String>,
    /// Font family to fallback stack.
    pub fonts: IndexMap<String, String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            framework: Framework::default(),
            app_dir: "app".to_string(),
            components_dir: "components".to_string(),
            generated_dir: "components/generated".to_string(),
            screens_dir: "screens".to_string(),
            schema_path: None,
            import_alias: "@/".to_string(),
            package_name: "app.screens".to_string(),
            component_library: ComponentLibrary::default(),
            plugins: Vec::new(),
            tokens: None,
            fonts: IndexMap::new(),
        }
    }
}

impl BackendConfig {
    pub fn new(framework: Framework) -> Self {
        Self {
            framework,
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Import specifier for a project-relative module path.
    pub fn import_path(&self, module: &str) -> String {
        format!("{}{}", self.import_alias, module.trim_start_matches('/'))
    }

    /// Full font stack for a family, or the family itself.
    pub fn font_stack(&self, family: &str) -> String {
        match self.fonts.get(family) {
            Some(fallback) => format!("{}, {fallback}", quote_family(family)),
            None => quote_family(family),
        }
    }
}

fn quote_family(family: &str) -> String {
    if family.contains(' ') && !family.starts_with(['"', '\'']) {
        format!("\"{family}\"")
    } else {
        family.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let config = BackendConfig::from_json("{}").unwrap();
        assert_eq!(config, BackendConfig::default());
        assert_eq!(config.framework, Framework::Nextjs);
    }

    #[test]
    fn test_parse_full_config() {
        let config = BackendConfig::from_json(
            r#"{
                "framework": "react-native",
                "screensDir": "src/screens",
                "componentLibrary": {
                    "components": {
                        "SalesChart": {"import": "@acme/charts", "name": "LineChart", "props": {"series": "data"}}
                    }
                },
                "plugins": ["@acme/polyfills"],
                "fonts": {"Inter": "system-ui, sans-serif"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.framework, Framework::ReactNative);
        assert_eq!(config.screens_dir, "src/screens");
        let chart = config.component_library.get("SalesChart").unwrap();
        assert_eq!(chart.name.as_deref(), Some("LineChart"));
        assert_eq!(chart.props.get("series").map(String::as_str), Some("data"));
        assert_eq!(config.plugins, vec!["@acme/polyfills"]);
    }

    #[test]
    fn test_framework_from_str() {
        assert_eq!("swiftui".parse::<Framework>().unwrap(), Framework::Swiftui);
        assert!("flutter".parse::<Framework>().is_err());
    }

    #[test]
    fn test_font_stack() {
        let mut config = BackendConfig::default();
        config.fonts.insert("Open Sans".into(), "sans-serif".into());
        assert_eq!(config.font_stack("Open Sans"), "\"Open Sans\", sans-serif");
        assert_eq!(config.font_stack("Mono"), "Mono");
    }

    #[test]
    fn test_import_path() {
        let config = BackendConfig::default();
        assert_eq!(config.import_path("components/generated/HomeScreen"), "@/components/generated/HomeScreen");
    }
}
