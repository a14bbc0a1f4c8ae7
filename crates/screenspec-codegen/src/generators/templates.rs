//! Template engine for file skeletons.

use crate::error::{CodegenError, Result};
use convert_case::{Case, Casing};
use handlebars::Handlebars;
use serde::Serialize;

const CASE_HELPERS: [(&str, Case); 4] = [
    ("pascal_case", Case::Pascal),
    ("camel_case", Case::Camel),
    ("snake_case", Case::Snake),
    ("kebab_case", Case::Kebab),
];

/// Template engine using Handlebars.
///
/// Output is source code, so HTML escaping is disabled.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create a new template engine.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        Self::register_helpers(&mut handlebars);
        Self { handlebars }
    }

    /// Render a template string directly.
    pub fn render_string<T: Serialize>(&self, template: &str, data: &T) -> Result<String> {
        self.handlebars
            .render_template(template, data)
            .map_err(CodegenError::TemplateError)
    }

    fn register_helpers(handlebars: &mut Handlebars) {
        for (name, case) in CASE_HELPERS {
            handlebars.register_helper(
                name,
                Box::new(
                    move |h: &handlebars::Helper,
                          _r: &Handlebars,
                          _ctx: &handlebars::Context,
                          _rc: &mut handlebars::RenderContext,
                          out: &mut dyn handlebars::Output| {
                        let param = h
                            .param(0)
                            .and_then(|v| v.value().as_str())
                            .unwrap_or("");
                        out.write(&param.to_case(case))?;
                        Ok(())
                    },
                ),
            );
        }

        // JSON literal of any value, usable as a JS expression
        handlebars.register_helper(
            "json",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let literal = h
                        .param(0)
                        .map(|v| v.value().to_string())
                        .unwrap_or_else(|| "null".to_string());
                    out.write(&literal)?;
                    Ok(())
                },
            ),
        );
    }
}

impl<'a> Default for TemplateEngine<'a> {
    fn default() -> Self {
        Self::new()
    }
}
