//! Kotlin Compose code generator.
//!
//! Each screen becomes a `@Composable` function in the configured package.
//! Screen state lives in a `mutableStateMapOf<String, String>()`; host
//! integration happens through lambda parameters with no-op defaults.
//! Responsive overrides are ignored.

use std::collections::BTreeSet;

use screenspec_core::{
    format_number, ActionKind, Condition, Interaction, Node, NodeKind, ScreenSpec, Style,
    StyleProperty, StyleValue,
};
use serde_json::{json, Value};

use super::common::{
    action_key, diagnostic_text, item_label, native_style, select_options, DataBinding,
    ScreenFeatures,
};
use super::templates::TemplateEngine;
use super::{join_path, EmitOutput, GeneratedFile, ScreenBackend, GENERATED_MARKER};
use crate::config::BackendConfig;
use crate::error::Result;
use crate::naming::{component_name, js_ident, string_literal, Dialect};
use crate::scale::{font_weight, parse_color, shadow, weight_name, Length};

const REGISTRY_TEMPLATE: &str = r#"// {{marker}}
package {{package}}

import androidx.compose.runtime.Composable

object GeneratedScreens {
    val all: List<String> = listOf(
{{#each names}}
        "{{this}}",
{{/each}}
    )

    @Composable
    fun Render(name: String) {
        when (name) {
{{#each names}}
            "{{this}}" -> {{this}}()
{{/each}}
        }
    }
}
"#;

const NAMED_COLORS: [(&str, &str); 8] = [
    ("black", "Black"),
    ("white", "White"),
    ("gray", "Gray"),
    ("red", "Red"),
    ("green", "Green"),
    ("blue", "Blue"),
    ("yellow", "Yellow"),
    ("clear", "Transparent"),
];

/// Kotlin Compose code generator.
pub struct ComposeBackend {
    engine: TemplateEngine<'static>,
}

impl ComposeBackend {
    /// Create a new Compose generator.
    pub fn new() -> Self {
        Self {
            engine: TemplateEngine::new(),
        }
    }
}

impl Default for ComposeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenBackend for ComposeBackend {
    fn name(&self) -> &'static str {
        "compose"
    }

    fn emit_screen(&self, spec: &ScreenSpec, config: &BackendConfig) -> Result<EmitOutput> {
        let name = component_name(&spec.route);
        let features = ScreenFeatures::scan(&spec.tree);
        let mut screen = KotlinScreen::new(config, &features);
        screen.render_root(&spec.tree);
        let content = screen.assemble(&name);
        Ok(EmitOutput {
            files: vec![GeneratedFile::new(
                join_path(&config.screens_dir, &format!("{name}.kt")),
                content,
            )],
            component_name: name,
        })
    }

    fn emit_barrel_index(&self, names: &[String], config: &BackendConfig) -> Result<GeneratedFile> {
        let content = self.engine.render_string(
            REGISTRY_TEMPLATE,
            &json!({"marker": GENERATED_MARKER, "package": config.package_name, "names": names}),
        )?;
        Ok(GeneratedFile::new(
            join_path(&config.screens_dir, "GeneratedScreens.kt"),
            content,
        ))
    }
}

fn kotlin_string(s: &str) -> String {
    string_literal(s, Dialect::Kotlin)
}

fn dp(n: f64) -> String {
    format!("{}.dp", format_number(n))
}

fn sp(n: f64) -> String {
    format!("{}.sp", format_number(n))
}

fn float(n: f64) -> String {
    let text = format_number(n);
    if text.contains('.') {
        format!("{text}f")
    } else {
        format!("{text}.0f")
    }
}

fn points(style: &Style, property: StyleProperty) -> Option<f64> {
    style.get(property).and_then(|v| Length::parse(v).as_px())
}

fn kotlin_weight(weight: u16) -> &'static str {
    match weight_name(weight) {
        "thin" => "Thin",
        "extralight" => "ExtraLight",
        "light" => "Light",
        "normal" => "Normal",
        "medium" => "Medium",
        "semibold" => "SemiBold",
        "bold" => "Bold",
        "extrabold" => "ExtraBold",
        _ => "Black",
    }
}

/// Kotlin text of a JSON value stored in screen state.
fn state_value(value: &Value) -> String {
    kotlin_string(&item_label(value))
}

fn field_key(node: &Node) -> &str {
    node.prop_str("name").unwrap_or(&node.id)
}

/// A JSON value as a Kotlin literal.
fn kotlin_literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        Value::String(s) => kotlin_string(s),
        Value::Array(items) => format!("listOf({})", items.iter().map(kotlin_literal).collect::<Vec<_>>().join(", ")),
        Value::Object(fields) => format!(
            "mapOf({})",
            fields
                .iter()
                .map(|(k, v)| format!("{} to {}", kotlin_string(k), kotlin_literal(v)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

struct KotlinScreen<'a> {
    config: &'a BackendConfig,
    features: &'a ScreenFeatures,
    body: Vec<String>,
    imports: BTreeSet<String>,
    /// Initial state entries as Kotlin literals.
    initial_state: Vec<(String, String)>,
    field_keys: Vec<String>,
    /// Host-supplied item lists for api data sources: `(parameter, url)`.
    remote_items: Vec<(String, String)>,
    navigates: bool,
    opens_uris: bool,
    uses_is_set: bool,
}

impl<'a> KotlinScreen<'a> {
    fn new(config: &'a BackendConfig, features: &'a ScreenFeatures) -> Self {
        let imports = [
            "androidx.compose.runtime.Composable",
            "androidx.compose.ui.Modifier",
            "androidx.compose.ui.tooling.preview.Preview",
            "androidx.compose.ui.unit.dp",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        Self {
            config,
            features,
            body: Vec::new(),
            imports,
            initial_state: Vec::new(),
            field_keys: Vec::new(),
            remote_items: Vec::new(),
            navigates: features.navigates,
            opens_uris: false,
            uses_is_set: false,
        }
    }

    fn push(&mut self, depth: usize, line: impl AsRef<str>) {
        self.body.push(format!("{}{}", "    ".repeat(depth), line.as_ref()));
    }

    fn import(&mut self, path: &str) {
        if !self.imports.contains(path) {
            self.imports.insert(path.to_string());
        }
    }

    fn has_state(&self) -> bool {
        self.features.has_state() || self.features.has_forms || !self.field_keys.is_empty()
    }

    fn color(&mut self, value: &StyleValue) -> Option<String> {
        let text = value.as_text()?.trim();
        let literal = match NAMED_COLORS.iter().find(|(name, _)| *name == text) {
            Some((_, constant)) => format!("Color.{constant}"),
            None => format!("Color({})", parse_color(text)?.to_argb_hex()),
        };
        self.import("androidx.compose.ui.graphics.Color");
        Some(literal)
    }

    fn condition(&mut self, condition: &Condition) -> String {
        let key = kotlin_string(&condition.state);
        match &condition.equals {
            Some(expected) => format!("state[{key}] == {}", state_value(expected)),
            None => {
                self.uses_is_set = true;
                format!("isSet(state[{key}])")
            }
        }
    }

    fn action(&mut self, node: &Node, interaction: &Interaction, event_value: Option<&str>) -> Option<String> {
        let value = interaction
            .value
            .as_ref()
            .map(state_value)
            .or_else(|| event_value.map(str::to_string));
        let key = kotlin_string(action_key(node, interaction));
        match interaction.action {
            ActionKind::Navigate => interaction
                .target
                .as_deref()
                .map(|target| format!("onNavigate({})", kotlin_string(target))),
            ActionKind::Submit => Some("onSubmit(state.toMap())".to_string()),
            ActionKind::SetState => Some(match value {
                Some(value) => format!("state[{key}] = {value}"),
                None => {
                    self.uses_is_set = true;
                    format!("state[{key}] = if (isSet(state[{key}])) \"false\" else \"true\"")
                }
            }),
            ActionKind::Custom => Some(format!("onAction({key}, {})", value.unwrap_or_else(|| "\"\"".into()))),
        }
    }

    fn click_action(&mut self, node: &Node) -> Option<String> {
        let click = node.interactions.on_click.as_ref()?;
        self.action(node, click, None)
    }

    fn change_action(&mut self, node: &Node, event_value: &str) -> Option<String> {
        let change = node.interactions.on_change.as_ref()?;
        self.action(node, change, Some(event_value))
    }

    /// The modifier chain for a node, starting from `base`.
    fn modifier(&mut self, node: &Node, style: &Style, base: &str) -> Option<String> {
        use StyleProperty::*;
        let mut parts = Vec::new();

        for (property, edge) in [(Margin, None), (MarginX, Some("horizontal")), (MarginY, Some("vertical"))] {
            if let Some(amount) = points(style, property) {
                self.import("androidx.compose.foundation.layout.padding");
                parts.push(match edge {
                    Some(edge) => format!("padding({edge} = {})", dp(amount)),
                    None => format!("padding({})", dp(amount)),
                });
            }
        }

        for (property, fill, fixed) in [(Width, "fillMaxWidth", "width"), (Height, "fillMaxHeight", "height")] {
            match style.get(property).map(Length::parse) {
                Some(Length::Px(px)) => {
                    self.import(&format!("androidx.compose.foundation.layout.{fixed}"));
                    parts.push(format!("{fixed}({})", dp(px)));
                }
                Some(Length::Percent(p)) => {
                    self.import(&format!("androidx.compose.foundation.layout.{fill}"));
                    if p >= 100.0 {
                        parts.push(format!("{fill}()"));
                    } else {
                        parts.push(format!("{fill}({})", float(p / 100.0)));
                    }
                }
                _ => {}
            }
        }
        let bounds: Vec<String> = [
            (MinWidth, "minWidth"),
            (MaxWidth, "maxWidth"),
            (MinHeight, "minHeight"),
            (MaxHeight, "maxHeight"),
        ]
        .into_iter()
        .filter_map(|(property, label)| points(style, property).map(|px| format!("{label} = {}", dp(px))))
        .collect();
        if !bounds.is_empty() {
            self.import("androidx.compose.foundation.layout.sizeIn");
            parts.push(format!("sizeIn({})", bounds.join(", ")));
        }

        let shape = points(style, BorderRadius).map(|radius| {
            format!("RoundedCornerShape({})", dp(radius))
        });
        if shape.is_some() {
            self.import("androidx.compose.foundation.shape.RoundedCornerShape");
        }
        if let Some(preset) = style.get(Shadow).and_then(shadow) {
            if preset.elevation > 0.0 {
                self.import("androidx.compose.ui.draw.shadow");
                match &shape {
                    Some(shape) => parts.push(format!("shadow({}, {shape})", dp(preset.elevation))),
                    None => parts.push(format!("shadow({})", dp(preset.elevation))),
                }
            }
        }
        if let Some(shape) = &shape {
            self.import("androidx.compose.ui.draw.clip");
            parts.push(format!("clip({shape})"));
        }
        if let Some(color) = style.get(BackgroundColor).and_then(|v| self.color(v)) {
            self.import("androidx.compose.foundation.background");
            match &shape {
                Some(shape) => parts.push(format!("background({color}, {shape})")),
                None => parts.push(format!("background({color})")),
            }
        }
        if let Some(width) = points(style, BorderWidth) {
            let color = match style.get(BorderColor).and_then(|v| self.color(v)) {
                Some(color) => color,
                None => {
                    self.import("androidx.compose.ui.graphics.Color");
                    "Color.Gray".to_string()
                }
            };
            self.import("androidx.compose.foundation.border");
            match &shape {
                Some(shape) => parts.push(format!("border({}, {color}, {shape})", dp(width))),
                None => parts.push(format!("border({}, {color})", dp(width))),
            }
        }
        if !matches!(node.kind, NodeKind::Button | NodeKind::Link) {
            if let Some(action) = self.click_action(node) {
                self.import("androidx.compose.foundation.clickable");
                parts.push(format!("clickable {{ {action} }}"));
            }
        }
        for (property, edge) in [(Padding, None), (PaddingX, Some("horizontal")), (PaddingY, Some("vertical"))] {
            if let Some(amount) = points(style, property) {
                self.import("androidx.compose.foundation.layout.padding");
                parts.push(match edge {
                    Some(edge) => format!("padding({edge} = {})", dp(amount)),
                    None => format!("padding({})", dp(amount)),
                });
            }
        }
        if let Some(opacity) = style.get(Opacity).and_then(StyleValue::as_number) {
            self.import("androidx.compose.ui.draw.alpha");
            parts.push(format!("alpha({})", float(opacity)));
        }
        if style.get(Flex).and_then(StyleValue::as_number).is_some_and(|f| f > 0.0)
            && !parts.iter().any(|p| p.starts_with("fillMaxWidth"))
        {
            self.import("androidx.compose.foundation.layout.fillMaxWidth");
            parts.push("fillMaxWidth()".to_string());
        }

        let mut semantics = Vec::new();
        if node.kind == NodeKind::Heading {
            self.import("androidx.compose.ui.semantics.heading");
            semantics.push("heading()".to_string());
        }
        if let Some(label) = node.prop_str("ariaLabel") {
            self.import("androidx.compose.ui.semantics.contentDescription");
            semantics.push(format!("contentDescription = {}", kotlin_string(label)));
        }
        if !semantics.is_empty() {
            self.import("androidx.compose.ui.semantics.semantics");
            parts.push(format!("semantics {{ {} }}", semantics.join("; ")));
        }
        if let Some(tag) = node.prop_str("testId") {
            self.import("androidx.compose.ui.platform.testTag");
            parts.push(format!("testTag({})", kotlin_string(tag)));
        }

        if parts.is_empty() && base == "Modifier" {
            return None;
        }
        let mut chain = base.to_string();
        for part in parts {
            chain.push('.');
            chain.push_str(&part);
        }
        Some(chain)
    }

    /// Text parameters carried by the style bag.
    fn text_params(&mut self, style: &Style) -> Vec<String> {
        use StyleProperty::*;
        let mut params = Vec::new();
        if let Some(color) = style.get(Color).and_then(|v| self.color(v)) {
            params.push(format!("color = {color}"));
        }
        let size = points(style, FontSize);
        if let Some(size) = size {
            self.import("androidx.compose.ui.unit.sp");
            params.push(format!("fontSize = {}", sp(size)));
        }
        if let Some(weight) = style.get(FontWeight).and_then(font_weight) {
            self.import("androidx.compose.ui.text.font.FontWeight");
            params.push(format!("fontWeight = FontWeight.{}", kotlin_weight(weight)));
        }
        if let Some(line_height) = points(style, LineHeight) {
            // Small values are multipliers of the font size.
            let height = if line_height <= 4.0 { line_height * size.unwrap_or(14.0) } else { line_height };
            self.import("androidx.compose.ui.unit.sp");
            params.push(format!("lineHeight = {}", sp(height.round())));
        }
        if let Some(tracking) = points(style, LetterSpacing) {
            self.import("androidx.compose.ui.unit.sp");
            params.push(format!("letterSpacing = {}", sp(tracking)));
        }
        if let Some(align) = style.get(TextAlign).and_then(StyleValue::as_text) {
            let align = match align {
                "center" => "Center",
                "right" | "end" => "End",
                "justify" => "Justify",
                _ => "Start",
            };
            self.import("androidx.compose.ui.text.style.TextAlign");
            params.push(format!("textAlign = TextAlign.{align}"));
        }
        params
    }

    fn arrangement(&mut self, style: &Style, row: bool, default_gap: f64) -> String {
        self.import("androidx.compose.foundation.layout.Arrangement");
        let justify = style.get(StyleProperty::JustifyContent).and_then(StyleValue::as_text);
        match justify {
            Some("center") => "Arrangement.Center".to_string(),
            Some("end" | "flex-end") if row => "Arrangement.End".to_string(),
            Some("end" | "flex-end") => "Arrangement.Bottom".to_string(),
            Some("between" | "space-between") => "Arrangement.SpaceBetween".to_string(),
            Some("around" | "space-around") => "Arrangement.SpaceAround".to_string(),
            _ => {
                self.import("androidx.compose.ui.unit.dp");
                let gap = points(style, StyleProperty::Gap).unwrap_or(default_gap);
                format!("Arrangement.spacedBy({})", dp(gap))
            }
        }
    }

    fn alignment(&mut self, style: &Style, row: bool) -> String {
        self.import("androidx.compose.ui.Alignment");
        let align = style.get(StyleProperty::AlignItems).and_then(StyleValue::as_text);
        let name = match (row, align) {
            (true, Some("start" | "flex-start")) => "Top",
            (true, Some("end" | "flex-end")) => "Bottom",
            (true, _) => "CenterVertically",
            (false, Some("center")) => "CenterHorizontally",
            (false, Some("end" | "flex-end")) => "End",
            (false, _) => "Start",
        };
        format!("Alignment.{name}")
    }

    /// Open a layout call and render the children inside it.
    fn layout(&mut self, call: &str, args: Vec<String>, node: &Node, depth: usize) {
        self.push(depth, format!("{call}({}) {{", args.join(", ")));
        self.render_children(node, depth + 1);
        self.push(depth, "}");
    }

    fn render_root(&mut self, tree: &Node) {
        self.render_node(tree, 1, true);
    }

    fn render_node(&mut self, node: &Node, depth: usize, root: bool) {
        match &node.interactions.visible_when {
            Some(condition) => {
                let test = self.condition(condition);
                self.push(depth, format!("if ({test}) {{"));
                self.render_element(node, depth + 1, root);
                self.push(depth, "}");
            }
            None => self.render_element(node, depth, root),
        }
    }

    fn render_children(&mut self, node: &Node, depth: usize) {
        for child in &node.children {
            self.render_node(child, depth, false);
        }
    }

    fn render_element(&mut self, node: &Node, depth: usize, root: bool) {
        let style = native_style(node);
        let base = if root { "modifier" } else { "Modifier" };
        let modifier = self.modifier(node, &style, base);
        let mut args: Vec<String> = modifier.map(|m| format!("modifier = {m}")).into_iter().collect();
        self.import("androidx.compose.material3.Text");

        match &node.kind {
            NodeKind::Container | NodeKind::Stack | NodeKind::Form | NodeKind::Card => {
                let row = node.kind == NodeKind::Stack
                    && (node.prop_str("direction") == Some("row")
                        || style.get(StyleProperty::FlexDirection).and_then(StyleValue::as_text) == Some("row"));
                let default_gap = match node.kind {
                    NodeKind::Container => 0.0,
                    NodeKind::Form => 12.0,
                    _ => 8.0,
                };
                let arrangement = self.arrangement(&style, row, default_gap);
                let alignment = self.alignment(&style, row);
                let call = if row {
                    self.import("androidx.compose.foundation.layout.Row");
                    args.push(format!("horizontalArrangement = {arrangement}"));
                    args.push(format!("verticalAlignment = {alignment}"));
                    "Row"
                } else {
                    self.import("androidx.compose.foundation.layout.Column");
                    args.push(format!("verticalArrangement = {arrangement}"));
                    args.push(format!("horizontalAlignment = {alignment}"));
                    "Column"
                };
                self.push(depth, format!("{call}({}) {{", args.join(", ")));
                if node.kind == NodeKind::Card {
                    if let Some(title) = node.prop_str("title") {
                        self.import("androidx.compose.material3.MaterialTheme");
                        self.push(
                            depth + 1,
                            format!("Text(text = {}, style = MaterialTheme.typography.titleMedium)", kotlin_string(title)),
                        );
                    }
                }
                self.render_children(node, depth + 1);
                if node.kind == NodeKind::Form {
                    if let Some(label) = node.prop_str("submitLabel") {
                        self.import("androidx.compose.material3.Button");
                        self.push(depth + 1, "Button(onClick = { onSubmit(state.toMap()) }) {");
                        self.push(depth + 2, format!("Text(text = {})", kotlin_string(label)));
                        self.push(depth + 1, "}");
                    }
                }
                self.push(depth, "}");
            }
            NodeKind::Grid => self.grid(node, &style, args, depth),
            NodeKind::Text | NodeKind::Heading | NodeKind::ComponentRef => {
                let text = match node.kind {
                    NodeKind::ComponentRef => diagnostic_text(node),
                    _ => node.prop_str("text").unwrap_or_default().to_string(),
                };
                let mut params = vec![format!("text = {}", kotlin_string(&text))];
                params.extend(self.text_params(&style));
                params.extend(args);
                self.push(depth, format!("Text({})", params.join(", ")));
            }
            NodeKind::Button => {
                let action = self.click_action(node).unwrap_or_default();
                let call = match node.prop_str("variant") {
                    Some("outline" | "secondary") => "OutlinedButton",
                    Some("ghost") => "TextButton",
                    _ => "Button",
                };
                self.import(match call {
                    "OutlinedButton" => "androidx.compose.material3.OutlinedButton",
                    "TextButton" => "androidx.compose.material3.TextButton",
                    _ => "androidx.compose.material3.Button",
                });
                let mut params = vec![format!("onClick = {{ {action} }}")];
                if node.prop_bool("disabled") == Some(true) {
                    params.push("enabled = false".to_string());
                }
                params.extend(args);
                self.push(depth, format!("{call}({}) {{", params.join(", ")));
                let label = node.prop_str("label").unwrap_or_default();
                self.push(depth + 1, format!("Text(text = {})", kotlin_string(label)));
                self.push(depth, "}");
            }
            NodeKind::Link => {
                let href = node.prop_str("href").unwrap_or("/");
                let external = node.prop_bool("external") == Some(true) || href.contains("://");
                let action = match self.click_action(node) {
                    Some(action) => action,
                    None if external => {
                        self.opens_uris = true;
                        format!("uriHandler.openUri({})", kotlin_string(href))
                    }
                    None => {
                        self.navigates = true;
                        format!("onNavigate({})", kotlin_string(href))
                    }
                };
                self.import("androidx.compose.material3.TextButton");
                let mut params = vec![format!("onClick = {{ {action} }}")];
                params.extend(args);
                self.push(depth, format!("TextButton({}) {{", params.join(", ")));
                let text = node.prop_str("text").unwrap_or_default();
                let mut text_params = vec![format!("text = {}", kotlin_string(text))];
                text_params.extend(self.text_params(&style));
                self.push(depth + 1, format!("Text({})", text_params.join(", ")));
                self.push(depth, "}");
            }
            NodeKind::Image => {
                self.import("coil.compose.AsyncImage");
                self.import("androidx.compose.ui.layout.ContentScale");
                let scale = match node.prop_str("fit") {
                    Some("cover") => "Crop",
                    Some("fill") => "FillBounds",
                    _ => "Fit",
                };
                let description = node.prop_str("alt").map_or_else(|| "null".to_string(), kotlin_string);
                let mut params = vec![
                    format!("model = {}", kotlin_string(node.prop_str("src").unwrap_or_default())),
                    format!("contentDescription = {description}"),
                    format!("contentScale = ContentScale.{scale}"),
                ];
                params.extend(args);
                self.push(depth, format!("AsyncImage({})", params.join(", ")));
            }
            NodeKind::Input | NodeKind::Textarea => self.text_field(node, args, depth),
            NodeKind::Select => self.select(node, args, depth),
            NodeKind::Checkbox => {
                let key = field_key(node).to_string();
                let literal = kotlin_string(&key);
                if node.prop_bool("checked") == Some(true) {
                    self.initial_state.push((key.clone(), kotlin_string("true")));
                }
                let mut on_change = vec![format!("state[{literal}] = it.toString()")];
                on_change.extend(self.change_action(node, "it.toString()"));
                self.import("androidx.compose.foundation.layout.Row");
                self.import("androidx.compose.ui.Alignment");
                self.import("androidx.compose.material3.Checkbox");
                args.push("verticalAlignment = Alignment.CenterVertically".to_string());
                self.push(depth, format!("Row({}) {{", args.join(", ")));
                self.push(
                    depth + 1,
                    format!(
                        "Checkbox(checked = state[{literal}] == \"true\", onCheckedChange = {{ {} }})",
                        on_change.join("; ")
                    ),
                );
                self.push(depth + 1, format!("Text(text = {})", kotlin_string(node.prop_str("label").unwrap_or_default())));
                self.push(depth, "}");
                self.field_keys.push(key);
            }
            NodeKind::Divider => {
                let call = if node.prop_str("orientation") == Some("vertical") {
                    self.import("androidx.compose.material3.VerticalDivider");
                    "VerticalDivider"
                } else {
                    self.import("androidx.compose.material3.HorizontalDivider");
                    "HorizontalDivider"
                };
                self.push(depth, format!("{call}({})", args.join(", ")));
            }
            NodeKind::Spacer => {
                let size = node.prop_f64("size").unwrap_or(16.0);
                self.import("androidx.compose.foundation.layout.Spacer");
                self.import("androidx.compose.foundation.layout.size");
                self.import("androidx.compose.ui.unit.dp");
                self.push(depth, format!("Spacer(modifier = Modifier.size({}))", dp(size)));
            }
            NodeKind::List => self.list(node, &style, args, depth),
            NodeKind::Other(tag) => self.external(node, tag, args, depth),
        }
    }

    fn grid(&mut self, node: &Node, style: &Style, mut args: Vec<String>, depth: usize) {
        let columns = node.prop_f64("columns").map_or(2, |c| c.round().max(1.0) as usize);
        let gap = dp(points(style, StyleProperty::Gap).unwrap_or(16.0));
        for path in [
            "androidx.compose.foundation.layout.Arrangement",
            "androidx.compose.foundation.layout.Box",
            "androidx.compose.foundation.layout.Column",
            "androidx.compose.foundation.layout.Row",
            "androidx.compose.ui.unit.dp",
        ] {
            self.import(path);
        }
        args.push(format!("verticalArrangement = Arrangement.spacedBy({gap})"));
        self.push(depth, format!("Column({}) {{", args.join(", ")));
        for row in node.children.chunks(columns) {
            self.push(depth + 1, format!("Row(horizontalArrangement = Arrangement.spacedBy({gap})) {{"));
            for cell in row {
                self.push(depth + 2, "Box(modifier = Modifier.weight(1f)) {");
                self.render_node(cell, depth + 3, false);
                self.push(depth + 2, "}");
            }
            for _ in row.len()..columns {
                self.import("androidx.compose.foundation.layout.Spacer");
                self.push(depth + 2, "Spacer(modifier = Modifier.weight(1f))");
            }
            self.push(depth + 1, "}");
        }
        self.push(depth, "}");
    }

    fn text_field(&mut self, node: &Node, args: Vec<String>, depth: usize) {
        let key = field_key(node).to_string();
        let literal = kotlin_string(&key);
        if let Some(default) = node.prop_str("defaultValue") {
            self.initial_state.push((key.clone(), kotlin_string(default)));
        }
        let mut on_change = vec![format!("state[{literal}] = it")];
        on_change.extend(self.change_action(node, "it"));
        self.import("androidx.compose.material3.OutlinedTextField");

        let mut params = vec![
            format!("value = state[{literal}] ?: \"\""),
            format!("onValueChange = {{ {} }}", on_change.join("; ")),
        ];
        if let Some(label) = node.prop_str("label") {
            params.push(format!("label = {{ Text(text = {}) }}", kotlin_string(label)));
        }
        if let Some(placeholder) = node.prop_str("placeholder") {
            params.push(format!("placeholder = {{ Text(text = {}) }}", kotlin_string(placeholder)));
        }
        if node.kind == NodeKind::Textarea {
            let rows = node.prop_f64("rows").map_or(3, |r| r.round().max(1.0) as u32);
            params.push(format!("minLines = {rows}"));
        } else {
            params.push("singleLine = true".to_string());
            let keyboard = match node.prop_str("inputType") {
                Some("email") => Some("Email"),
                Some("number") => Some("Number"),
                Some("tel") => Some("Phone"),
                Some("url") => Some("Uri"),
                Some("password") => Some("Password"),
                _ => None,
            };
            if let Some(keyboard) = keyboard {
                self.import("androidx.compose.foundation.text.KeyboardOptions");
                self.import("androidx.compose.ui.text.input.KeyboardType");
                params.push(format!("keyboardOptions = KeyboardOptions(keyboardType = KeyboardType.{keyboard})"));
            }
            if node.prop_str("inputType") == Some("password") {
                self.import("androidx.compose.ui.text.input.PasswordVisualTransformation");
                params.push("visualTransformation = PasswordVisualTransformation()".to_string());
            }
            if node.prop_bool("disabled") == Some(true) {
                params.push("enabled = false".to_string());
            }
        }
        params.extend(args);
        self.push(depth, "OutlinedTextField(");
        for param in &params {
            self.push(depth + 1, format!("{param},"));
        }
        self.push(depth, ")");
        self.field_keys.push(key);
    }

    fn select(&mut self, node: &Node, args: Vec<String>, depth: usize) {
        let key = field_key(node).to_string();
        let literal = kotlin_string(&key);
        for path in [
            "androidx.compose.foundation.layout.Column",
            "androidx.compose.foundation.layout.Row",
            "androidx.compose.material3.RadioButton",
            "androidx.compose.ui.Alignment",
        ] {
            self.import(path);
        }
        self.push(depth, format!("Column({}) {{", args.join(", ")));
        if let Some(label) = node.prop_str("label") {
            self.push(depth + 1, format!("Text(text = {})", kotlin_string(label)));
        }
        for (label, value) in select_options(node) {
            let value = kotlin_string(&value);
            let mut on_select = vec![format!("state[{literal}] = {value}")];
            on_select.extend(self.change_action(node, &value));
            self.push(depth + 1, "Row(verticalAlignment = Alignment.CenterVertically) {");
            self.push(
                depth + 2,
                format!("RadioButton(selected = state[{literal}] == {value}, onClick = {{ {} }})", on_select.join("; ")),
            );
            self.push(depth + 2, format!("Text(text = {})", kotlin_string(&label)));
            self.push(depth + 1, "}");
        }
        self.push(depth, "}");
        self.field_keys.push(key);
    }

    fn list(&mut self, node: &Node, style: &Style, mut args: Vec<String>, depth: usize) {
        let ordered = node.prop_bool("ordered") == Some(true);
        let arrangement = self.arrangement(style, false, 8.0);
        self.import("androidx.compose.foundation.layout.Column");
        args.push(format!("verticalArrangement = {arrangement}"));
        self.push(depth, format!("Column({}) {{", args.join(", ")));
        match DataBinding::of(node) {
            Some(DataBinding::Inline(items)) => {
                if items.is_empty() {
                    if let Some(empty) = node.prop_str("emptyText") {
                        self.push(depth + 1, format!("Text(text = {})", kotlin_string(empty)));
                    }
                }
                for (index, item) in items.iter().enumerate() {
                    let label = if ordered {
                        format!("{}. {}", index + 1, item_label(item))
                    } else {
                        item_label(item)
                    };
                    self.push(depth + 1, format!("Text(text = {})", kotlin_string(&label)));
                }
            }
            Some(binding @ DataBinding::Remote { .. }) => {
                let parameter = format!("{}Items", js_ident(&node.id));
                let field = kotlin_string(binding.label_field().unwrap_or("label"));
                if let Some(empty) = node.prop_str("emptyText") {
                    self.push(depth + 1, format!("if ({parameter}.isEmpty()) {{"));
                    self.push(depth + 2, format!("Text(text = {})", kotlin_string(empty)));
                    self.push(depth + 1, "}");
                }
                self.push(depth + 1, format!("{parameter}.forEachIndexed {{ index, item ->"));
                let label = if ordered {
                    format!("Text(text = \"${{index + 1}}. ${{item[{field}] ?: \"\"}}\")")
                } else {
                    format!("Text(text = item[{field}] ?: \"\")")
                };
                self.push(depth + 2, label);
                self.push(depth + 1, "}");
                if let DataBinding::Remote { url, .. } = binding {
                    self.remote_items.push((parameter, url));
                }
            }
            None => {}
        }
        self.render_children(node, depth + 1);
        self.push(depth, "}");
    }

    fn external(&mut self, node: &Node, tag: &str, args: Vec<String>, depth: usize) {
        let config = self.config;
        match config.component_library.get(tag) {
            Some(component) => {
                if !component.import.is_empty() {
                    self.import(&component.import);
                }
                let export = component.name.clone().unwrap_or_else(|| tag.to_string());
                let mut params: Vec<String> = node
                    .props
                    .iter()
                    .filter(|(key, _)| !matches!(key.as_str(), "slot" | "testId" | "ariaLabel"))
                    .map(|(key, value)| {
                        let name = component.props.get(key).map(String::as_str).unwrap_or(key);
                        format!("{name} = {}", kotlin_literal(value))
                    })
                    .collect();
                params.extend(args);
                if node.children.is_empty() {
                    self.push(depth, format!("{export}({})", params.join(", ")));
                } else {
                    self.push(depth, format!("{export}({}) {{", params.join(", ")));
                    self.render_children(node, depth + 1);
                    self.push(depth, "}");
                }
            }
            None => {
                self.import("androidx.compose.foundation.layout.Box");
                self.push(depth, format!("// Unsupported component: {}", tag.replace(['\n', '\r'], " ")));
                self.layout("Box", args, node, depth);
            }
        }
    }

    fn assemble(self, name: &str) -> String {
        let features = self.features;
        let has_state = self.has_state();
        let mut imports = self.imports.clone();
        if has_state {
            imports.insert("androidx.compose.runtime.mutableStateMapOf".to_string());
            imports.insert("androidx.compose.runtime.remember".to_string());
        }
        if self.opens_uris {
            imports.insert("androidx.compose.ui.platform.LocalUriHandler".to_string());
        }

        let mut lines = vec![
            format!("// {GENERATED_MARKER}"),
            format!("package {}", self.config.package_name),
            String::new(),
        ];
        lines.extend(imports.iter().map(|path| format!("import {path}")));
        lines.push(String::new());

        for (parameter, url) in &self.remote_items {
            lines.push(format!("// {parameter}: loaded by the host from {url}"));
        }
        let mut params = Vec::new();
        if self.navigates {
            params.push("onNavigate: (String) -> Unit = {}".to_string());
        }
        if features.submits || features.has_forms {
            params.push("onSubmit: (Map<String, String>) -> Unit = {}".to_string());
        }
        if !features.handlers.is_empty() {
            params.push("onAction: (String, String) -> Unit = { _, _ -> }".to_string());
        }
        for (parameter, _) in &self.remote_items {
            params.push(format!("{parameter}: List<Map<String, String>> = emptyList()"));
        }
        params.push("modifier: Modifier = Modifier".to_string());

        lines.push("@Composable".to_string());
        if params.len() <= 1 {
            lines.push(format!("fun {name}({}) {{", params.join(", ")));
        } else {
            lines.push(format!("fun {name}("));
            for param in &params {
                lines.push(format!("    {param},"));
            }
            lines.push(") {".to_string());
        }
        if has_state {
            let entries: Vec<String> = self
                .initial_state
                .iter()
                .map(|(key, value)| format!("{} to {value}", kotlin_string(key)))
                .collect();
            lines.push(format!(
                "    val state = remember {{ mutableStateMapOf<String, String>({}) }}",
                entries.join(", ")
            ));
        }
        if self.opens_uris {
            lines.push("    val uriHandler = LocalUriHandler.current".to_string());
        }
        lines.extend(self.body);
        lines.push("}".to_string());

        if self.uses_is_set {
            lines.push(String::new());
            lines.push("private fun isSet(value: String?): Boolean = !value.isNullOrEmpty() && value != \"false\"".to_string());
        }

        lines.push(String::new());
        lines.push("@Preview(showBackground = true)".to_string());
        lines.push("@Composable".to_string());
        lines.push(format!("fun {name}Preview() {{"));
        lines.push(format!("    {name}()"));
        lines.push("}".to_string());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn emit(tree: Value) -> String {
        let spec = ScreenSpec::from_value(json!({"version": 1, "route": "/orders/[id]", "tree": tree})).unwrap();
        let output = ComposeBackend::new().emit_screen(&spec, &BackendConfig::default()).unwrap();
        assert_eq!(output.component_name, "OrdersIdScreen");
        assert_eq!(output.files[0].path, "screens/OrdersIdScreen.kt");
        output.files[0].content.clone()
    }

    #[test]
    fn test_dp_and_sp_units() {
        let content = emit(json!({
            "id": "root", "type": "Stack",
            "style": {"padding": 16, "gap": 12, "backgroundColor": "#3366ff"},
            "children": [{"id": "t", "type": "Heading", "props": {"text": "Order", "level": 2}}]
        }));
        assert!(content.contains("package app.screens"));
        assert!(content.contains(
            "    Column(modifier = modifier.background(Color(0xFF3366FF)).padding(16.dp), verticalArrangement = Arrangement.spacedBy(12.dp), horizontalAlignment = Alignment.Start) {"
        ));
        assert!(content.contains(
            "        Text(text = \"Order\", fontSize = 24.sp, fontWeight = FontWeight.Bold, modifier = Modifier.semantics { heading() })"
        ));
        assert!(content.contains("import androidx.compose.ui.unit.sp"));
        assert!(content.contains("fun OrdersIdScreenPreview() {"));
    }

    #[test]
    fn test_grid_is_chunked_into_rows() {
        let content = emit(json!({
            "id": "grid", "type": "Grid", "props": {"columns": 2},
            "children": [
                {"id": "a", "type": "Text", "props": {"text": "A"}},
                {"id": "b", "type": "Text", "props": {"text": "B"}},
                {"id": "c", "type": "Text", "props": {"text": "C"}}
            ]
        }));
        assert_eq!(content.matches("Row(horizontalArrangement = Arrangement.spacedBy(16.dp)) {").count(), 2);
        assert_eq!(content.matches("Box(modifier = Modifier.weight(1f)) {").count(), 3);
        assert!(content.contains("Spacer(modifier = Modifier.weight(1f))"));
    }

    #[test]
    fn test_state_and_callbacks() {
        let content = emit(json!({
            "id": "root", "type": "Form", "props": {"submitLabel": "Pay"},
            "children": [
                {"id": "gift", "type": "Checkbox", "props": {"label": "Gift", "checked": true}},
                {"id": "help", "type": "Link", "props": {"text": "Help", "href": "https://x.test/help"}},
                {"id": "back", "type": "Button", "props": {"label": "Back", "variant": "ghost"},
                 "interactions": {"onClick": {"action": "navigate", "target": "/orders"}}}
            ]
        }));
        assert!(content.contains("    onNavigate: (String) -> Unit = {},"));
        assert!(content.contains("    onSubmit: (Map<String, String>) -> Unit = {},"));
        assert!(content.contains("    val state = remember { mutableStateMapOf<String, String>(\"gift\" to \"true\") }"));
        assert!(content.contains("    val uriHandler = LocalUriHandler.current"));
        assert!(content.contains("TextButton(onClick = { uriHandler.openUri(\"https://x.test/help\") }) {"));
        assert!(content.contains("TextButton(onClick = { onNavigate(\"/orders\") }) {"));
        assert!(content.contains("Button(onClick = { onSubmit(state.toMap()) }) {"));
    }

    #[test]
    fn test_kotlin_strings_escape_dollar() {
        let content = emit(json!({"id": "price", "type": "Text", "props": {"text": "Total: $5"}}));
        assert!(content.contains("Text(text = \"Total: \\$5\""));
    }

    #[test]
    fn test_remote_list_parameter() {
        let content = emit(json!({
            "id": "lines", "type": "List",
            "dataSource": {"type": "api", "url": "https://api.test/lines"}
        }));
        assert!(content.contains("// linesItems: loaded by the host from https://api.test/lines"));
        assert!(content.contains("    linesItems: List<Map<String, String>> = emptyList(),"));
        assert!(content.contains("linesItems.forEachIndexed { index, item ->"));
    }

    #[test]
    fn test_registry_uses_package() {
        let config = BackendConfig {
            package_name: "com.shop.screens".to_string(),
            ..BackendConfig::default()
        };
        let file = ComposeBackend::new()
            .emit_barrel_index(&["HomeScreen".to_string()], &config)
            .unwrap();
        assert_eq!(file.path, "screens/GeneratedScreens.kt");
        assert!(file.content.contains("package com.shop.screens"));
        assert!(file.content.contains("            \"HomeScreen\" -> HomeScreen()\n"));
    }
}
