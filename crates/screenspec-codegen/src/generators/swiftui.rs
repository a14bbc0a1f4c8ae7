//! SwiftUI code generator.
//!
//! Each screen becomes a `View` struct. Host integration happens through
//! closure properties (`onNavigate`, `onSubmit`, `onAction`) that default to
//! no-ops, so every generated screen can be constructed without arguments.
//! Responsive overrides have no SwiftUI counterpart and are ignored.

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
import SwiftUI

enum Screens {
    static let all: [String] = [
{{#each names}}
        "{{this}}",
{{/each}}
    ]

    @ViewBuilder
    static func view(named name: String) -> some View {
        switch name {
{{#each names}}
        case "{{this}}": {{this}}()
{{/each}}
        default: EmptyView()
        }
    }
}
"#;

/// Default SwiftUI body font size, in points.
const BODY_SIZE: f64 = 17.0;

const NAMED_COLORS: [&str; 12] = [
    "black", "white", "gray", "red", "orange", "yellow", "green", "blue", "purple", "pink", "brown",
    "clear",
];

/// SwiftUI code generator.
pub struct SwiftUiBackend {
    engine: TemplateEngine<'static>,
}

impl SwiftUiBackend {
    /// Create a new SwiftUI generator.
    pub fn new() -> Self {
        Self {
            engine: TemplateEngine::new(),
        }
    }
}

impl Default for SwiftUiBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenBackend for SwiftUiBackend {
    fn name(&self) -> &'static str {
        "swiftui"
    }

    fn emit_screen(&self, spec: &ScreenSpec, config: &BackendConfig) -> Result<EmitOutput> {
        let name = component_name(&spec.route);
        let features = ScreenFeatures::scan(&spec.tree);
        let mut screen = SwiftScreen::new(config, &features);
        screen.render_node(&spec.tree, 2);
        let content = screen.assemble(&name);
        Ok(EmitOutput {
            files: vec![GeneratedFile::new(
                join_path(&config.screens_dir, &format!("{name}.swift")),
                content,
            )],
            component_name: name,
        })
    }

    fn emit_barrel_index(&self, names: &[String], config: &BackendConfig) -> Result<GeneratedFile> {
        let content = self
            .engine
            .render_string(REGISTRY_TEMPLATE, &json!({"marker": GENERATED_MARKER, "names": names}))?;
        Ok(GeneratedFile::new(join_path(&config.screens_dir, "Screens.swift"), content))
    }
}

fn swift_string(s: &str) -> String {
    string_literal(s, Dialect::Swift)
}

/// A color expression, or `None` when the value is not a color SwiftUI can express.
fn swift_color(value: &StyleValue) -> Option<String> {
    let text = value.as_text()?.trim();
    if NAMED_COLORS.contains(&text) {
        return Some(format!("Color.{text}"));
    }
    let rgba = parse_color(text)?;
    let [r, g, b] = rgba.unit_channels();
    let channels = format!(
        "red: {}, green: {}, blue: {}",
        format_number(r),
        format_number(g),
        format_number(b)
    );
    if rgba.a < 1.0 {
        Some(format!("Color({channels}, opacity: {})", format_number(rgba.a)))
    } else {
        Some(format!("Color({channels})"))
    }
}

/// A point length; percentages only matter at 100%.
enum Extent {
    Points(f64),
    Fill,
}

fn extent(value: &StyleValue) -> Option<Extent> {
    match Length::parse(value) {
        Length::Px(px) => Some(Extent::Points(px)),
        Length::Percent(p) if p >= 100.0 => Some(Extent::Fill),
        _ => None,
    }
}

fn points(style: &Style, property: StyleProperty) -> Option<f64> {
    style.get(property).and_then(|v| Length::parse(v).as_px())
}

/// Modifier lines for a style bag, in SwiftUI application order.
fn modifiers(style: &Style) -> Vec<String> {
    use StyleProperty::*;
    let mut out = Vec::new();

    let font_size = points(style, FontSize);
    match style.get(FontFamily).and_then(StyleValue::as_text) {
        Some(family) => out.push(format!(
            ".font(.custom({}, size: {}))",
            swift_string(family),
            format_number(font_size.unwrap_or(BODY_SIZE))
        )),
        None => {
            if let Some(size) = font_size {
                out.push(format!(".font(.system(size: {}))", format_number(size)));
            }
        }
    }
    if let Some(weight) = style.get(FontWeight).and_then(font_weight) {
        out.push(format!(".fontWeight(.{})", swift_weight(weight)));
    }
    if let Some(line_height) = points(style, LineHeight) {
        let size = font_size.unwrap_or(BODY_SIZE);
        // Small values are multipliers.
        let spacing = if line_height <= 4.0 { (line_height - 1.0) * size } else { line_height - size };
        if spacing > 0.0 {
            out.push(format!(".lineSpacing({})", format_number(spacing.round())));
        }
    }
    if let Some(tracking) = points(style, LetterSpacing) {
        out.push(format!(".tracking({})", format_number(tracking)));
    }
    if let Some(align) = style.get(TextAlign).and_then(StyleValue::as_text) {
        let alignment = match align {
            "center" => "center",
            "right" | "end" => "trailing",
            _ => "leading",
        };
        out.push(format!(".multilineTextAlignment(.{alignment})"));
    }
    if let Some(color) = style.get(Color).and_then(swift_color) {
        out.push(format!(".foregroundColor({color})"));
    }

    for (property, edge) in [(Padding, None), (PaddingX, Some(".horizontal")), (PaddingY, Some(".vertical"))] {
        if let Some(amount) = points(style, property) {
            match edge {
                Some(edge) => out.push(format!(".padding({edge}, {})", format_number(amount))),
                None => out.push(format!(".padding({})", format_number(amount))),
            }
        }
    }

    out.extend(frame(style, &[(Width, "width"), (Height, "height")], false));
    out.extend(frame(
        style,
        &[(MinWidth, "minWidth"), (MaxWidth, "maxWidth"), (MinHeight, "minHeight"), (MaxHeight, "maxHeight")],
        style.get(Flex).and_then(StyleValue::as_number).is_some_and(|f| f > 0.0),
    ));

    let radius = points(style, BorderRadius);
    if let Some(color) = style.get(BackgroundColor).and_then(swift_color) {
        out.push(format!(".background({color})"));
    }
    if let Some(radius) = radius {
        out.push(format!(".cornerRadius({})", format_number(radius)));
    }
    if let Some(width) = points(style, BorderWidth) {
        let color = style
            .get(BorderColor)
            .and_then(swift_color)
            .unwrap_or_else(|| "Color.gray".to_string());
        out.push(format!(
            ".overlay(RoundedRectangle(cornerRadius: {}).stroke({color}, lineWidth: {}))",
            format_number(radius.unwrap_or(0.0)),
            format_number(width)
        ));
    }
    if let Some(preset) = style.get(Shadow).and_then(shadow) {
        if preset.radius > 0.0 {
            out.push(format!(".shadow(radius: {})", format_number(preset.radius)));
        }
    }
    if let Some(opacity) = style.get(Opacity).and_then(StyleValue::as_number) {
        out.push(format!(".opacity({})", format_number(opacity)));
    }

    // Margins have no SwiftUI equivalent: outer padding after the background.
    for (property, edge) in [(Margin, None), (MarginX, Some(".horizontal")), (MarginY, Some(".vertical"))] {
        if let Some(amount) = points(style, property) {
            match edge {
                Some(edge) => out.push(format!(".padding({edge}, {})", format_number(amount))),
                None => out.push(format!(".padding({})", format_number(amount))),
            }
        }
    }
    out
}

/// A `.frame(...)` modifier from the given properties.
fn frame(style: &Style, properties: &[(StyleProperty, &str)], fill_width: bool) -> Option<String> {
    let mut args = Vec::new();
    for (property, label) in properties {
        match style.get(*property).and_then(extent) {
            Some(Extent::Points(pt)) => args.push(format!("{label}: {}", format_number(pt))),
            // A fixed extent cannot fill; the max form is used instead.
            Some(Extent::Fill) => {
                let label = match *label {
                    "width" | "minWidth" => "maxWidth",
                    "height" | "minHeight" => "maxHeight",
                    other => other,
                };
                args.push(format!("{label}: .infinity"));
            }
            None => {}
        }
    }
    if fill_width && !args.iter().any(|a| a.starts_with("maxWidth")) {
        args.push("maxWidth: .infinity".to_string());
    }
    if args.is_empty() {
        return None;
    }
    // SwiftUI rejects mixing fixed and flexible labels in one call.
    let fixed = args.iter().all(|a| a.starts_with("width") || a.starts_with("height"));
    if !fixed && args.iter().any(|a| a.starts_with("width") || a.starts_with("height")) {
        let (fixed_args, flexible): (Vec<_>, Vec<_>) =
            args.into_iter().partition(|a| a.starts_with("width") || a.starts_with("height"));
        return Some(format!(".frame({}).frame({})", fixed_args.join(", "), flexible.join(", ")));
    }
    Some(format!(".frame({})", args.join(", ")))
}

fn swift_weight(weight: u16) -> &'static str {
    match weight_name(weight) {
        "extralight" => "ultraLight",
        "normal" => "regular",
        "extrabold" => "heavy",
        name => name,
    }
}

fn horizontal_alignment(style: &Style) -> &'static str {
    match style.get(StyleProperty::AlignItems).and_then(StyleValue::as_text) {
        Some("center") => ".center",
        Some("end" | "flex-end") => ".trailing",
        _ => ".leading",
    }
}

fn vertical_alignment(style: &Style) -> &'static str {
    match style.get(StyleProperty::AlignItems).and_then(StyleValue::as_text) {
        Some("start" | "flex-start") => ".top",
        Some("end" | "flex-end") => ".bottom",
        _ => ".center",
    }
}

/// Where `Spacer()`s go for a justify value.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Distribution {
    Start,
    Center,
    End,
    Between,
}

fn distribution(style: &Style) -> Distribution {
    match style.get(StyleProperty::JustifyContent).and_then(StyleValue::as_text) {
        Some("center") => Distribution::Center,
        Some("end" | "flex-end") => Distribution::End,
        Some("between" | "space-between") => Distribution::Between,
        _ => Distribution::Start,
    }
}

/// Swift text of a JSON value stored in screen state.
fn state_value(value: &Value) -> String {
    swift_string(&item_label(value))
}

/// Key a form control binds to in screen state.
fn field_key(node: &Node) -> &str {
    node.prop_str("name").unwrap_or(&node.id)
}

struct SwiftScreen<'a> {
    config: &'a BackendConfig,
    features: &'a ScreenFeatures,
    body: Vec<String>,
    /// Keys written by form controls.
    field_keys: Vec<String>,
    /// Initial state entries as Swift literals.
    initial_state: Vec<(String, String)>,
    /// Host-supplied item arrays for api data sources: `(property, url)`.
    remote_items: Vec<(String, String)>,
    navigates: bool,
    uses_binding: bool,
    uses_flag: bool,
    uses_is_set: bool,
}

impl<'a> SwiftScreen<'a> {
    fn new(config: &'a BackendConfig, features: &'a ScreenFeatures) -> Self {
        Self {
            config,
            features,
            body: Vec::new(),
            field_keys: Vec::new(),
            initial_state: Vec::new(),
            remote_items: Vec::new(),
            navigates: features.navigates,
            uses_binding: false,
            uses_flag: false,
            uses_is_set: false,
        }
    }

    fn push(&mut self, depth: usize, line: impl AsRef<str>) {
        self.body.push(format!("{}{}", "    ".repeat(depth), line.as_ref()));
    }

    fn has_state(&self) -> bool {
        self.features.has_state() || self.features.has_forms || !self.field_keys.is_empty()
    }

    fn condition(&mut self, condition: &Condition) -> String {
        let key = swift_string(&condition.state);
        match &condition.equals {
            Some(expected) => format!("state[{key}] == {}", state_value(expected)),
            None => {
                self.uses_is_set = true;
                format!("isSet({key})")
            }
        }
    }

    fn action(&mut self, node: &Node, interaction: &Interaction, event_value: Option<&str>) -> Option<String> {
        let value = interaction
            .value
            .as_ref()
            .map(state_value)
            .or_else(|| event_value.map(str::to_string));
        let key = swift_string(action_key(node, interaction));
        match interaction.action {
            ActionKind::Navigate => interaction
                .target
                .as_deref()
                .map(|target| format!("onNavigate({})", swift_string(target))),
            ActionKind::Submit => Some("onSubmit(state)".to_string()),
            ActionKind::SetState => Some(match value {
                Some(value) => format!("state[{key}] = {value}"),
                None => {
                    self.uses_is_set = true;
                    format!("state[{key}] = isSet({key}) ? \"false\" : \"true\"")
                }
            }),
            ActionKind::Custom => Some(format!("onAction({key}, {})", value.unwrap_or_else(|| "\"\"".into()))),
        }
    }

    fn click_action(&mut self, node: &Node) -> Option<String> {
        let click = node.interactions.on_click.as_ref()?;
        self.action(node, click, None)
    }

    fn render_node(&mut self, node: &Node, depth: usize) {
        match &node.interactions.visible_when {
            Some(condition) => {
                let test = self.condition(condition);
                self.push(depth, format!("if {test} {{"));
                self.render_element(node, depth + 1);
                self.push(depth, "}");
            }
            None => self.render_element(node, depth),
        }
    }

    fn render_children(&mut self, node: &Node, depth: usize) {
        for child in &node.children {
            self.render_node(child, depth);
        }
    }

    fn render_element(&mut self, node: &Node, depth: usize) {
        let style = native_style(node);
        self.render_kind(node, &style, depth);
        for modifier in modifiers(&style) {
            self.push(depth, modifier);
        }
        if let Some(label) = node.prop_str("ariaLabel") {
            self.push(depth, format!(".accessibilityLabel({})", swift_string(label)));
        }
        if let Some(test_id) = node.prop_str("testId") {
            self.push(depth, format!(".accessibilityIdentifier({})", swift_string(test_id)));
        }
        if !matches!(node.kind, NodeKind::Button | NodeKind::Link) {
            if let Some(action) = self.click_action(node) {
                self.push(depth, format!(".onTapGesture {{ {action} }}"));
            }
        }
        if !matches!(node.kind, NodeKind::Select | NodeKind::Checkbox) {
            if let Some(change) = &node.interactions.on_change {
                let key = swift_string(field_key(node));
                if let Some(action) = self.action(node, change, Some("value")) {
                    self.push(depth, format!(".onChange(of: state[{key}] ?? \"\") {{ value in {action} }}"));
                }
            }
        }
    }

    fn block(&mut self, opener: String, node: &Node, depth: usize, distribution: Distribution) {
        self.push(depth, format!("{opener} {{"));
        if matches!(distribution, Distribution::Center | Distribution::End) {
            self.push(depth + 1, "Spacer()");
        }
        for (index, child) in node.children.iter().enumerate() {
            if index > 0 && distribution == Distribution::Between {
                self.push(depth + 1, "Spacer()");
            }
            self.render_node(child, depth + 1);
        }
        if distribution == Distribution::Center {
            self.push(depth + 1, "Spacer()");
        }
        self.push(depth, "}");
    }

    fn render_kind(&mut self, node: &Node, style: &Style, depth: usize) {
        let spacing = points(style, StyleProperty::Gap);
        let spacing_arg = |default: f64| format_number(spacing.unwrap_or(default));
        match &node.kind {
            NodeKind::Container => {
                let opener = format!("VStack(alignment: {}, spacing: {})", horizontal_alignment(style), spacing_arg(0.0));
                self.block(opener, node, depth, distribution(style));
            }
            NodeKind::Stack => {
                let row = node.prop_str("direction") == Some("row")
                    || style.get(StyleProperty::FlexDirection).and_then(StyleValue::as_text) == Some("row");
                let opener = if row {
                    format!("HStack(alignment: {}, spacing: {})", vertical_alignment(style), spacing_arg(8.0))
                } else {
                    format!("VStack(alignment: {}, spacing: {})", horizontal_alignment(style), spacing_arg(8.0))
                };
                self.block(opener, node, depth, distribution(style));
            }
            NodeKind::Grid => {
                let columns = node.prop_f64("columns").map_or(2, |c| c.round().max(1.0) as usize);
                let gap = spacing_arg(16.0);
                self.push(
                    depth,
                    format!(
                        "LazyVGrid(columns: Array(repeating: GridItem(.flexible(), spacing: {gap}), count: {columns}), alignment: .leading, spacing: {gap}) {{"
                    ),
                );
                self.render_children(node, depth + 1);
                self.push(depth, "}");
            }
            NodeKind::Card => {
                self.push(depth, format!("VStack(alignment: .leading, spacing: {}) {{", spacing_arg(8.0)));
                if let Some(title) = node.prop_str("title") {
                    self.push(depth + 1, format!("Text({})", swift_string(title)));
                    self.push(depth + 1, ".font(.headline)");
                }
                self.render_children(node, depth + 1);
                self.push(depth, "}");
            }
            NodeKind::Text => self.push(depth, format!("Text({})", swift_string(node.prop_str("text").unwrap_or_default()))),
            NodeKind::Heading => {
                self.push(depth, format!("Text({})", swift_string(node.prop_str("text").unwrap_or_default())));
                self.push(depth, ".accessibilityAddTraits(.isHeader)");
            }
            NodeKind::Button => {
                let label = swift_string(node.prop_str("label").unwrap_or_default());
                let action = self.click_action(node).unwrap_or_default();
                if action.is_empty() {
                    self.push(depth, format!("Button({label}) {{}}"));
                } else {
                    self.push(depth, format!("Button({label}) {{ {action} }}"));
                }
                if node.prop_str("variant") == Some("destructive") {
                    self.push(depth, ".tint(.red)");
                }
                if node.prop_bool("disabled") == Some(true) {
                    self.push(depth, ".disabled(true)");
                }
            }
            NodeKind::Link => {
                let text = swift_string(node.prop_str("text").unwrap_or_default());
                let href = node.prop_str("href").unwrap_or("/");
                let external = node.prop_bool("external") == Some(true) || href.contains("://");
                match self.click_action(node) {
                    Some(action) => self.push(depth, format!("Button({text}) {{ {action} }}")),
                    None if external => self.push(
                        depth,
                        format!("Link({text}, destination: URL(string: {})!)", swift_string(href)),
                    ),
                    None => {
                        self.navigates = true;
                        self.push(depth, format!("Button({text}) {{ onNavigate({}) }}", swift_string(href)));
                    }
                }
            }
            NodeKind::Image => {
                let src = swift_string(node.prop_str("src").unwrap_or_default());
                let mode = if node.prop_str("fit") == Some("cover") { ".fill" } else { ".fit" };
                self.push(depth, format!("AsyncImage(url: URL(string: {src})) {{ image in"));
                if node.prop_str("fit") == Some("fill") {
                    self.push(depth + 1, "image.resizable()");
                } else {
                    self.push(depth + 1, format!("image.resizable().aspectRatio(contentMode: {mode})"));
                }
                self.push(depth, "} placeholder: {");
                self.push(depth + 1, "Color.gray.opacity(0.1)");
                self.push(depth, "}");
                if let Some(alt) = node.prop_str("alt") {
                    self.push(depth, format!(".accessibilityLabel({})", swift_string(alt)));
                }
            }
            NodeKind::Input | NodeKind::Textarea => self.text_field(node, depth),
            NodeKind::Select => self.picker(node, depth),
            NodeKind::Checkbox => {
                let key = field_key(node).to_string();
                if node.prop_bool("checked") == Some(true) {
                    self.initial_state.push((key.clone(), swift_string("true")));
                }
                self.uses_flag = true;
                let label = swift_string(node.prop_str("label").unwrap_or_default());
                self.push(depth, format!("Toggle({label}, isOn: flag({}))", swift_string(&key)));
                if let Some(change) = &node.interactions.on_change {
                    if let Some(action) = self.action(node, change, Some("String(value)")) {
                        self.push(depth, format!(".onChange(of: isSet({})) {{ value in {action} }}", swift_string(&key)));
                        self.uses_is_set = true;
                    }
                }
                self.field_keys.push(key);
            }
            NodeKind::Divider => self.push(depth, "Divider()"),
            NodeKind::Spacer => {
                let size = node.prop_f64("size").unwrap_or(16.0);
                self.push(depth, format!("Spacer().frame(width: {0}, height: {0})", format_number(size)));
            }
            NodeKind::List => self.list(node, style, depth),
            NodeKind::Form => {
                self.push(depth, format!("VStack(alignment: .leading, spacing: {}) {{", spacing_arg(12.0)));
                self.render_children(node, depth + 1);
                if let Some(label) = node.prop_str("submitLabel") {
                    self.push(depth + 1, format!("Button({}) {{ onSubmit(state) }}", swift_string(label)));
                    self.push(depth + 1, ".buttonStyle(.borderedProminent)");
                }
                self.push(depth, "}");
            }
            NodeKind::ComponentRef => {
                self.push(depth, format!("Text({})", swift_string(&diagnostic_text(node))));
            }
            NodeKind::Other(tag) => self.external(node, tag, depth),
        }
    }

    fn text_field(&mut self, node: &Node, depth: usize) {
        let key = field_key(node).to_string();
        self.uses_binding = true;
        if let Some(default) = node.prop_str("defaultValue") {
            self.initial_state.push((key.clone(), swift_string(default)));
        }
        let binding = format!("binding({})", swift_string(&key));
        let placeholder = swift_string(node.prop_str("placeholder").unwrap_or_default());
        let label = node.prop_str("label");
        let inner = if label.is_some() { depth + 1 } else { depth };
        if let Some(label) = label {
            self.push(depth, "VStack(alignment: .leading, spacing: 4) {");
            self.push(inner, format!("Text({})", swift_string(label)));
            self.push(inner, ".font(.subheadline)");
        }
        if node.kind == NodeKind::Textarea {
            let rows = node.prop_f64("rows").unwrap_or(3.0);
            self.push(inner, format!("TextEditor(text: {binding})"));
            self.push(inner, format!(".frame(minHeight: {})", format_number((rows * 22.0).round())));
        } else {
            let control = if node.prop_str("inputType") == Some("password") { "SecureField" } else { "TextField" };
            self.push(inner, format!("{control}({placeholder}, text: {binding})"));
            match node.prop_str("inputType") {
                Some("email") => self.push(inner, ".keyboardType(.emailAddress)"),
                Some("number") => self.push(inner, ".keyboardType(.decimalPad)"),
                Some("tel") => self.push(inner, ".keyboardType(.phonePad)"),
                Some("url") => self.push(inner, ".keyboardType(.URL)"),
                _ => {}
            }
            self.push(inner, ".textFieldStyle(.roundedBorder)");
            if node.prop_bool("disabled") == Some(true) {
                self.push(inner, ".disabled(true)");
            }
        }
        if label.is_some() {
            self.push(depth, "}");
        }
        self.field_keys.push(key);
    }

    fn picker(&mut self, node: &Node, depth: usize) {
        let key = field_key(node).to_string();
        self.uses_binding = true;
        let label = swift_string(node.prop_str("label").or(node.prop_str("placeholder")).unwrap_or_default());
        self.push(depth, format!("Picker({label}, selection: binding({})) {{", swift_string(&key)));
        for (label, value) in select_options(node) {
            self.push(depth + 1, format!("Text({}).tag({})", swift_string(&label), swift_string(&value)));
        }
        self.push(depth, "}");
        if let Some(change) = &node.interactions.on_change {
            if let Some(action) = self.action(node, change, Some("value")) {
                self.push(depth, format!(".onChange(of: state[{}] ?? \"\") {{ value in {action} }}", swift_string(&key)));
            }
        }
        self.field_keys.push(key);
    }

    fn list(&mut self, node: &Node, style: &Style, depth: usize) {
        let spacing = format_number(points(style, StyleProperty::Gap).unwrap_or(8.0));
        let ordered = node.prop_bool("ordered") == Some(true);
        self.push(depth, format!("VStack(alignment: .leading, spacing: {spacing}) {{"));
        match DataBinding::of(node) {
            Some(DataBinding::Inline(items)) => {
                if items.is_empty() {
                    if let Some(empty) = node.prop_str("emptyText") {
                        self.push(depth + 1, format!("Text({})", swift_string(empty)));
                    }
                }
                for (index, item) in items.iter().enumerate() {
                    let label = if ordered {
                        format!("{}. {}", index + 1, item_label(item))
                    } else {
                        item_label(item)
                    };
                    self.push(depth + 1, format!("Text({})", swift_string(&label)));
                }
            }
            Some(binding @ DataBinding::Remote { .. }) => {
                let property = format!("{}Items", js_ident(&node.id));
                let field = swift_string(binding.label_field().unwrap_or("label"));
                if let Some(empty) = node.prop_str("emptyText") {
                    self.push(depth + 1, format!("if {property}.isEmpty {{"));
                    self.push(depth + 2, format!("Text({})", swift_string(empty)));
                    self.push(depth + 1, "}");
                }
                self.push(depth + 1, format!("ForEach({property}.indices, id: \\.self) {{ index in"));
                let label = if ordered {
                    format!("Text(\"\\(index + 1). \\({property}[index][{field}] ?? \"\")\")")
                } else {
                    format!("Text({property}[index][{field}] ?? \"\")")
                };
                self.push(depth + 2, label);
                self.push(depth + 1, "}");
                if let DataBinding::Remote { url, .. } = binding {
                    self.remote_items.push((property, url));
                }
            }
            None => {}
        }
        self.render_children(node, depth + 1);
        self.push(depth, "}");
    }

    fn external(&mut self, node: &Node, tag: &str, depth: usize) {
        let config = self.config;
        match config.component_library.get(tag) {
            Some(component) => {
                let export = component.name.clone().unwrap_or_else(|| tag.to_string());
                let args: Vec<String> = node
                    .props
                    .iter()
                    .filter(|(key, _)| !matches!(key.as_str(), "slot" | "testId" | "ariaLabel"))
                    .map(|(key, value)| {
                        let name = component.props.get(key).map(String::as_str).unwrap_or(key);
                        format!("{name}: {}", swift_literal(value))
                    })
                    .collect();
                if node.children.is_empty() {
                    self.push(depth, format!("{export}({})", args.join(", ")));
                } else {
                    let call = if args.is_empty() { export } else { format!("{export}({})", args.join(", ")) };
                    self.push(depth, format!("{call} {{"));
                    self.render_children(node, depth + 1);
                    self.push(depth, "}");
                }
            }
            None => {
                self.push(depth, "VStack(alignment: .leading, spacing: 0) {");
                self.push(depth + 1, format!("// Unsupported component: {}", tag.replace(['\n', '\r'], " ")));
                if node.children.is_empty() {
                    self.push(depth + 1, "EmptyView()");
                }
                self.render_children(node, depth + 1);
                self.push(depth, "}");
            }
        }
    }

    fn assemble(self, name: &str) -> String {
        let features = self.features;
        let has_state = self.has_state();
        let mut lines = vec![format!("// {GENERATED_MARKER}"), "import SwiftUI".to_string(), String::new()];
        lines.push(format!("struct {name}: View {{"));

        let mut properties = Vec::new();
        if self.navigates {
            properties.push("    var onNavigate: (String) -> Void = { _ in }".to_string());
        }
        if features.submits || features.has_forms {
            properties.push("    var onSubmit: ([String: String]) -> Void = { _ in }".to_string());
        }
        if !features.handlers.is_empty() {
            properties.push("    var onAction: (String, String) -> Void = { _, _ in }".to_string());
        }
        for (property, url) in &self.remote_items {
            properties.push(format!("    /// Loaded by the host from `{url}`."));
            properties.push(format!("    var {property}: [[String: String]] = []"));
        }
        if has_state {
            let initial = if self.initial_state.is_empty() {
                "[:]".to_string()
            } else {
                let entries: Vec<String> = self
                    .initial_state
                    .iter()
                    .map(|(key, value)| format!("{}: {value}", swift_string(key)))
                    .collect();
                format!("[{}]", entries.join(", "))
            };
            properties.push(format!("    @State private var state: [String: String] = {initial}"));
        }
        lines.extend(properties.iter().cloned());
        if !properties.is_empty() {
            lines.push(String::new());
        }

        lines.push("    var body: some View {".to_string());
        lines.extend(self.body);
        lines.push("    }".to_string());

        if self.uses_binding {
            lines.push(String::new());
            lines.push("    private func binding(_ key: String) -> Binding<String> {".to_string());
            lines.push("        Binding(get: { state[key] ?? \"\" }, set: { state[key] = $0 })".to_string());
            lines.push("    }".to_string());
        }
        if self.uses_flag {
            lines.push(String::new());
            lines.push("    private func flag(_ key: String) -> Binding<Bool> {".to_string());
            lines.push("        Binding(get: { state[key] == \"true\" }, set: { state[key] = $0 ? \"true\" : \"false\" })".to_string());
            lines.push("    }".to_string());
        }
        if self.uses_is_set {
            lines.push(String::new());
            lines.push("    private func isSet(_ key: String) -> Bool {".to_string());
            lines.push("        guard let value = state[key] else { return false }".to_string());
            lines.push("        return !value.isEmpty && value != \"false\"".to_string());
            lines.push("    }".to_string());
        }
        lines.push("}".to_string());

        lines.push(String::new());
        lines.push("#if DEBUG".to_string());
        lines.push(format!("struct {name}_Previews: PreviewProvider {{"));
        lines.push("    static var previews: some View {".to_string());
        lines.push(format!("        {name}()"));
        lines.push("    }".to_string());
        lines.push("}".to_string());
        lines.push("#endif".to_string());
        lines.join("\n")
    }
}

/// A JSON value as a Swift literal.
fn swift_literal(value: &Value) -> String {
    match value {
        Value::Null => "nil".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        Value::String(s) => swift_string(s),
        Value::Array(items) => format!("[{}]", items.iter().map(swift_literal).collect::<Vec<_>>().join(", ")),
        Value::Object(fields) if fields.is_empty() => "[:]".to_string(),
        Value::Object(fields) => format!(
            "[{}]",
            fields
                .iter()
                .map(|(k, v)| format!("{}: {}", swift_string(k), swift_literal(v)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}
