//! React backend with inline style objects.

use screenspec_core::ScreenSpec;

use super::templates::TemplateEngine;
use super::web::{render_component, render_js_barrel, WebFlavor};
use super::{join_path, EmitOutput, GeneratedFile, ScreenBackend};
use crate::config::BackendConfig;
use crate::error::Result;
use crate::naming::component_name;

/// React code generator.
pub struct ReactBackend {
    engine: TemplateEngine<'static>,
}

impl ReactBackend {
    pub fn new() -> Self {
        Self {
            engine: TemplateEngine::new(),
        }
    }
}

impl Default for ReactBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenBackend for ReactBackend {
    fn name(&self) -> &'static str {
        "react"
    }

    fn emit_screen(&self, spec: &ScreenSpec, config: &BackendConfig) -> Result<EmitOutput> {
        let name = component_name(&spec.route);
        let file = GeneratedFile::new(
            join_path(&config.generated_dir, &format!("{name}.tsx")),
            render_component(spec, config, WebFlavor::React),
        );
        Ok(EmitOutput {
            component_name: name,
            files: vec![file],
        })
    }

    fn emit_barrel_index(&self, names: &[String], config: &BackendConfig) -> Result<GeneratedFile> {
        Ok(GeneratedFile::new(
            join_path(&config.generated_dir, "index.ts"),
            render_js_barrel(&self.engine, names)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emits_single_component() {
        let spec = ScreenSpec::from_value(json!({
            "version": 1,
            "route": "/about",
            "meta": {"title": "About us"},
            "tree": {"id": "root", "type": "Card", "props": {"title": "Team", "elevated": true}}
        }))
        .unwrap();
        let output = ReactBackend::new().emit_screen(&spec, &BackendConfig::default()).unwrap();

        assert_eq!(output.component_name, "AboutScreen");
        assert_eq!(output.files.len(), 1);
        assert_eq!(output.files[0].path, "components/generated/AboutScreen.tsx");

        let content = &output.files[0].content;
        assert!(!content.contains("use client"));
        assert!(content.contains("document.title = \"About us\";"));
        assert!(content.contains("boxShadow: \"0 4px 6px -1px rgba(0, 0, 0, 0.1)\""));
        assert!(content.contains(r#"<h3 style={{ fontSize: 18, fontWeight: 600 }}>{"Team"}</h3>"#));
    }

    #[test]
    fn test_barrel_lists_names_in_order() {
        let names = vec!["BScreen".to_string(), "AScreen".to_string()];
        let file = ReactBackend::new().emit_barrel_index(&names, &BackendConfig::default()).unwrap();
        let lines: Vec<&str> = file.content.lines().collect();
        assert_eq!(lines[1], "export { default as BScreen } from \"./BScreen\";");
        assert_eq!(lines[2], "export { default as AScreen } from \"./AScreen\";");
    }
}
