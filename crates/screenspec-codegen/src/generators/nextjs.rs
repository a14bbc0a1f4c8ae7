//! Next.js app router backend.
//!
//! Each screen becomes a client component styled with Tailwind classes under
//! `generatedDir`, plus a thin `page.tsx` under `appDir` that mounts it at the
//! screen's route.

use screenspec_core::ScreenSpec;
use serde_json::json;

use super::templates::TemplateEngine;
use super::web::{render_component, render_js_barrel, WebFlavor};
use super::{join_path, EmitOutput, GeneratedFile, ScreenBackend, GENERATED_MARKER};
use crate::config::BackendConfig;
use crate::error::Result;
use crate::naming::{component_name, route_dir};

const PAGE_TEMPLATE: &str = r#"// {{marker}}
import {{name}} from "{{import}}";
{{#if title}}

export const metadata = { title: {{json title}} };
{{/if}}

export default function Page() {
  return <{{name}} />;
}
"#;

/// Next.js code generator.
pub struct NextjsBackend {
    engine: TemplateEngine<'static>,
}

impl NextjsBackend {
    pub fn new() -> Self {
        Self {
            engine: TemplateEngine::new(),
        }
    }

    fn page(&self, spec: &ScreenSpec, name: &str, config: &BackendConfig) -> Result<GeneratedFile> {
        let title = spec.meta.as_ref().and_then(|m| m.title.clone());
        let import = config.import_path(&join_path(&config.generated_dir, name));
        let content = self.engine.render_string(
            PAGE_TEMPLATE,
            &json!({"marker": GENERATED_MARKER, "name": name, "import": import, "title": title}),
        )?;
        let dir = join_path(&config.app_dir, &route_dir(&spec.route));
        Ok(GeneratedFile::new(join_path(&dir, "page.tsx"), content))
    }
}

impl Default for NextjsBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenBackend for NextjsBackend {
    fn name(&self) -> &'static str {
        "nextjs"
    }

    fn emit_screen(&self, spec: &ScreenSpec, config: &BackendConfig) -> Result<EmitOutput> {
        let name = component_name(&spec.route);
        let component = GeneratedFile::new(
            join_path(&config.generated_dir, &format!("{name}.tsx")),
            render_component(spec, config, WebFlavor::Next),
        );
        let page = self.page(spec, &name, config)?;
        Ok(EmitOutput {
            component_name: name,
            files: vec![page, component],
        })
    }

    fn emit_barrel_index(&self, names: &[String], config: &BackendConfig) -> Result<GeneratedFile> {
        Ok(GeneratedFile::new(
            join_path(&config.generated_dir, "index.ts"),
            render_js_barrel(&self.engine, names)?,
        ))
    }
}
