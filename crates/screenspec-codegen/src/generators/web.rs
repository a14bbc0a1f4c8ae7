//! JSX renderer shared by the Next.js and React backends.
//!
//! Both emit one default-exported function component per screen. They differ
//! in styling (Tailwind classes against inline style tables) and navigation
//! (`next/navigation` against `window.location`).

use std::collections::{BTreeMap, BTreeSet};

use convert_case::{Case, Casing};
use indexmap::IndexMap;
use screenspec_core::{
    format_number, ActionKind, Breakpoint, Condition, Interaction, Node, NodeKind, ScreenSpec,
    Style, StyleProperty, StyleValue, SLOT_PROP,
};
use serde_json::Value;

use super::common::{
    action_key, diagnostic_text, heading_level, item_label, select_options,
    DataBinding, ScreenFeatures,
};
use super::templates::TemplateEngine;
use super::GENERATED_MARKER;
use crate::config::BackendConfig;
use crate::error::Result;
use crate::naming::{component_name, js_ident, js_string};
use crate::scale::{
    font_size_step, font_weight, radius_class, shadow, spacing_step, weight_name, Length,
};

/// Props that every node may carry and that never become attributes.
const RESERVED_PROPS: [&str; 3] = [SLOT_PROP, "testId", "ariaLabel"];

/// Which web flavor to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WebFlavor {
    /// Tailwind classes, `next/link` and the app router.
    Next,
    /// Inline style tables and a breakpoint hook.
    React,
}

/// A CSS-in-JS value.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CssValue {
    Num(f64),
    Str(String),
    /// A JS expression emitted verbatim.
    Expr(String),
}

impl CssValue {
    pub(crate) fn to_js(&self) -> String {
        match self {
            Self::Num(n) => format_number(*n),
            Self::Str(s) => js_string(s),
            Self::Expr(e) => e.clone(),
        }
    }
}

/// Numeric pixels stay numbers, everything else is a CSS string.
pub(crate) fn length_value(value: &StyleValue) -> CssValue {
    match Length::parse(value) {
        Length::Px(px) => CssValue::Num(px),
        other => CssValue::Str(other.to_css()),
    }
}

/// `start`/`end` shorthands as flexbox values.
pub(crate) fn css_align(value: &str) -> String {
    match value {
        "start" => "flex-start".to_string(),
        "end" => "flex-end".to_string(),
        other => other.to_string(),
    }
}

/// `between`/`around`/`evenly` shorthands as flexbox values.
pub(crate) fn css_justify(value: &str) -> String {
    match value {
        "start" => "flex-start".to_string(),
        "end" => "flex-end".to_string(),
        "between" | "around" | "evenly" => format!("space-{value}"),
        other => other.to_string(),
    }
}

/// Style bag as ordered CSS-in-JS declarations.
pub(crate) fn inline_declarations(style: &Style, config: &BackendConfig) -> Vec<(String, CssValue)> {
    let mut out = Vec::new();
    let mut push = |key: &str, value: CssValue| out.push((key.to_string(), value));
    for (property, value) in style.iter() {
        let text = value.to_string();
        match property {
            StyleProperty::PaddingX => {
                push("paddingLeft", length_value(value));
                push("paddingRight", length_value(value));
            }
            StyleProperty::PaddingY => {
                push("paddingTop", length_value(value));
                push("paddingBottom", length_value(value));
            }
            StyleProperty::MarginX => {
                push("marginLeft", length_value(value));
                push("marginRight", length_value(value));
            }
            StyleProperty::MarginY => {
                push("marginTop", length_value(value));
                push("marginBottom", length_value(value));
            }
            StyleProperty::BorderWidth => {
                push("borderWidth", length_value(value));
                push("borderStyle", CssValue::Str("solid".into()));
            }
            StyleProperty::FontFamily => push("fontFamily", CssValue::Str(config.font_stack(&text))),
            StyleProperty::FontWeight => match font_weight(value) {
                Some(weight) => push("fontWeight", CssValue::Num(f64::from(weight))),
                None => push("fontWeight", CssValue::Str(text)),
            },
            StyleProperty::LineHeight | StyleProperty::Opacity | StyleProperty::Flex => {
                let key = property.key();
                match value {
                    StyleValue::Number(n) => push(key, CssValue::Num(*n)),
                    StyleValue::Text(_) => push(key, CssValue::Str(text)),
                }
            }
            StyleProperty::Shadow => {
                let css = shadow(value).map_or(text, |preset| preset.css.to_string());
                push("boxShadow", CssValue::Str(css));
            }
            StyleProperty::AlignItems => push("alignItems", CssValue::Str(css_align(&text))),
            StyleProperty::JustifyContent => push("justifyContent", CssValue::Str(css_justify(&text))),
            StyleProperty::BackgroundColor
            | StyleProperty::Color
            | StyleProperty::BorderColor
            | StyleProperty::TextAlign
            | StyleProperty::FlexDirection => push(property.key(), CssValue::Str(text)),
            _ => push(property.key(), length_value(value)),
        }
    }
    out
}

/// Tailwind arbitrary values cannot contain spaces.
fn arbitrary(value: &str) -> String {
    value.trim().replace(' ', "_")
}

fn spacing_class(prefix: &str, value: &StyleValue) -> String {
    match Length::parse(value) {
        Length::Px(px) => {
            let sign = if px < 0.0 { "-" } else { "" };
            match spacing_step(px.abs()) {
                Some(step) => format!("{sign}{prefix}-{step}"),
                None => format!("{prefix}-[{}px]", format_number(px)),
            }
        }
        Length::Auto => format!("{prefix}-auto"),
        other => format!("{prefix}-[{}]", arbitrary(&other.to_css())),
    }
}

fn size_class(prefix: &str, value: &StyleValue) -> String {
    match Length::parse(value) {
        Length::Percent(p) if p == 100.0 => format!("{prefix}-full"),
        Length::Auto => format!("{prefix}-auto"),
        Length::Px(px) => match spacing_step(px) {
            Some(step) => format!("{prefix}-{step}"),
            None => format!("{prefix}-[{}px]", format_number(px)),
        },
        other => format!("{prefix}-[{}]", arbitrary(&other.to_css())),
    }
}

fn tailwind_class(property: StyleProperty, value: &StyleValue, config: &BackendConfig) -> String {
    let text = value.to_string();
    match property {
        StyleProperty::Padding => spacing_class("p", value),
        StyleProperty::PaddingX => spacing_class("px", value),
        StyleProperty::PaddingY => spacing_class("py", value),
        StyleProperty::Margin => spacing_class("m", value),
        StyleProperty::MarginX => spacing_class("mx", value),
        StyleProperty::MarginY => spacing_class("my", value),
        StyleProperty::Gap => spacing_class("gap", value),
        StyleProperty::Width => size_class("w", value),
        StyleProperty::Height => size_class("h", value),
        StyleProperty::MinWidth => size_class("min-w", value),
        StyleProperty::MaxWidth => size_class("max-w", value),
        StyleProperty::MinHeight => size_class("min-h", value),
        StyleProperty::MaxHeight => size_class("max-h", value),
        StyleProperty::BackgroundColor => format!("bg-[{}]", arbitrary(&text)),
        StyleProperty::Color => format!("text-[{}]", arbitrary(&text)),
        StyleProperty::BorderColor => format!("border-[{}]", arbitrary(&text)),
        StyleProperty::BorderWidth => match Length::parse(value).as_px() {
            Some(px) if px == 1.0 => "border".to_string(),
            Some(px) if [0.0, 2.0, 4.0, 8.0].contains(&px) => format!("border-{}", format_number(px)),
            _ => format!("border-[{}]", arbitrary(&Length::parse(value).to_css())),
        },
        StyleProperty::BorderRadius => match Length::parse(value) {
            Length::Px(px) => radius_class(px)
                .map(str::to_string)
                .unwrap_or_else(|| format!("rounded-[{}px]", format_number(px))),
            other => format!("rounded-[{}]", arbitrary(&other.to_css())),
        },
        StyleProperty::FontFamily => {
            format!("[font-family:{}]", arbitrary(&config.font_stack(&text).replace('"', "'")))
        }
        StyleProperty::FontSize => match Length::parse(value) {
            Length::Px(px) => font_size_step(px)
                .map(|step| format!("text-{step}"))
                .unwrap_or_else(|| format!("text-[{}px]", format_number(px))),
            other => format!("text-[{}]", arbitrary(&other.to_css())),
        },
        StyleProperty::FontWeight => match font_weight(value) {
            Some(weight) => format!("font-{}", weight_name(weight)),
            None => format!("[font-weight:{}]", arbitrary(&text)),
        },
        StyleProperty::LineHeight => format!("leading-[{}]", arbitrary(&text)),
        StyleProperty::LetterSpacing => {
            format!("tracking-[{}]", arbitrary(&Length::parse(value).to_css()))
        }
        StyleProperty::TextAlign => match text.as_str() {
            "left" | "center" | "right" | "justify" | "start" | "end" => format!("text-{text}"),
            other => format!("[text-align:{}]", arbitrary(other)),
        },
        StyleProperty::Shadow => match shadow(value) {
            Some(preset) => format!("shadow-{}", preset.name),
            None => format!("shadow-[{}]", arbitrary(&text)),
        },
        StyleProperty::Opacity => match value.as_number() {
            Some(n) if ((n * 100.0).round() as i64) % 5 == 0 => {
                format!("opacity-{}", (n * 100.0).round() as i64)
            }
            _ => format!("opacity-[{}]", arbitrary(&text)),
        },
        StyleProperty::FlexDirection => match text.as_str() {
            "column" => "flex-col".to_string(),
            "column-reverse" => "flex-col-reverse".to_string(),
            other => format!("flex-{other}"),
        },
        StyleProperty::AlignItems => format!("items-{}", text.trim_start_matches("flex-")),
        StyleProperty::JustifyContent => format!(
            "justify-{}",
            text.trim_start_matches("flex-").trim_start_matches("space-")
        ),
        StyleProperty::Flex => match value {
            StyleValue::Number(n) if *n == 1.0 => "flex-1".to_string(),
            StyleValue::Number(n) => {
                let n = format_number(*n);
                format!("flex-[{n}_{n}_0%]")
            }
            StyleValue::Text(t) if matches!(t.as_str(), "auto" | "none" | "initial") => format!("flex-{t}"),
            StyleValue::Text(t) => format!("flex-[{}]", arbitrary(t)),
        },
    }
}

/// Style bag as Tailwind classes.
pub(crate) fn tailwind_classes(style: &Style, config: &BackendConfig) -> Vec<String> {
    style
        .iter()
        .map(|(property, value)| tailwind_class(property, value, config))
        .collect()
}

/// Variant prefix for a breakpoint.
fn breakpoint_prefix(breakpoint: Breakpoint) -> &'static str {
    match breakpoint {
        Breakpoint::Tablet => "max-lg:",
        Breakpoint::Mobile => "max-md:",
    }
}

/// A JSX attribute with a string value.
pub(crate) fn str_attr(name: &str, value: &str) -> String {
    if value.contains(['"', '\\', '{', '}', '\n', '\r']) {
        format!("{name}={{{}}}", js_string(value))
    } else {
        format!("{name}=\"{value}\"")
    }
}

/// A JSX attribute with an expression value.
pub(crate) fn expr_attr(name: &str, expr: &str) -> String {
    format!("{name}={{{expr}}}")
}

/// A JSON value as a JSX attribute.
pub(crate) fn value_attr(name: &str, value: &Value) -> String {
    match value {
        Value::String(s) => str_attr(name, s),
        Value::Bool(true) => name.to_string(),
        other => expr_attr(name, &other.to_string()),
    }
}

/// A JSX child expression for literal text.
pub(crate) fn text_child(text: &str) -> String {
    format!("{{{}}}", js_string(text))
}

/// Base classes and inline declarations implied by a node's kind.
fn kind_base(node: &Node) -> (Vec<&'static str>, Vec<(String, CssValue)>) {
    let decl = |key: &str, value: CssValue| (key.to_string(), value);
    let text = |s: &str| CssValue::Str(s.to_string());
    match &node.kind {
        NodeKind::Stack => {
            let row = node.prop_str("direction") == Some("row");
            let mut classes = vec!["flex", if row { "flex-row" } else { "flex-col" }];
            let mut inline = vec![
                decl("display", text("flex")),
                decl("flexDirection", text(if row { "row" } else { "column" })),
            ];
            if node.prop_bool("wrap") == Some(true) {
                classes.push("flex-wrap");
                inline.push(decl("flexWrap", text("wrap")));
            }
            (classes, inline)
        }
        NodeKind::Grid => (vec!["grid"], vec![decl("display", text("grid"))]),
        NodeKind::Card => {
            let mut classes = vec!["rounded-lg", "border", "border-gray-200", "p-4"];
            let mut inline = vec![
                decl("borderRadius", CssValue::Num(8.0)),
                decl("border", text("1px solid #e5e7eb")),
                decl("padding", CssValue::Num(16.0)),
            ];
            if node.prop_bool("elevated") == Some(true) {
                classes.push("shadow-md");
                if let Some(preset) = shadow(&StyleValue::from("md")) {
                    inline.push(decl("boxShadow", text(preset.css)));
                }
            }
            (classes, inline)
        }
        NodeKind::Text => match node.prop_str("variant") {
            Some("caption") => (vec!["text-sm"], vec![decl("fontSize", CssValue::Num(14.0))]),
            Some("label") => (
                vec!["text-sm", "font-medium"],
                vec![decl("fontSize", CssValue::Num(14.0)), decl("fontWeight", CssValue::Num(500.0))],
            ),
            Some("muted") => (vec!["text-gray-500"], vec![decl("color", text("#6b7280"))]),
            _ => (Vec::new(), Vec::new()),
        },
        NodeKind::Image => match node.prop_str("fit") {
            Some(fit) => {
                let class = match fit {
                    "contain" => "object-contain",
                    "fill" => "object-fill",
                    _ => "object-cover",
                };
                (vec![class], vec![decl("objectFit", text(fit))])
            }
            None => (Vec::new(), Vec::new()),
        },
        NodeKind::Input | NodeKind::Textarea | NodeKind::Select if node.prop_str("label").is_some() => (
            vec!["flex", "flex-col", "gap-1"],
            vec![
                decl("display", text("flex")),
                decl("flexDirection", text("column")),
                decl("gap", CssValue::Num(4.0)),
            ],
        ),
        NodeKind::Checkbox => (
            vec!["flex", "items-center", "gap-2"],
            vec![
                decl("display", text("flex")),
                decl("alignItems", text("center")),
                decl("gap", CssValue::Num(8.0)),
            ],
        ),
        NodeKind::ComponentRef => (
            vec!["rounded", "border", "border-dashed", "border-red-400", "p-2", "text-sm", "text-red-600"],
            vec![
                decl("border", text("1px dashed #f87171")),
                decl("padding", CssValue::Num(8.0)),
                decl("fontSize", CssValue::Num(14.0)),
                decl("color", text("#dc2626")),
            ],
        ),
        _ => (Vec::new(), Vec::new()),
    }
}

/// Grid template classes, which depend on props rather than kind alone.
fn grid_extras(node: &Node) -> (Vec<String>, Vec<(String, CssValue)>) {
    let mut classes = Vec::new();
    let mut inline = Vec::new();
    if node.kind != NodeKind::Grid {
        return (classes, inline);
    }
    for (prop, class, key) in [
        ("columns", "grid-cols", "gridTemplateColumns"),
        ("rows", "grid-rows", "gridTemplateRows"),
    ] {
        if let Some(count) = node.prop_f64(prop).map(|n| n.round().max(1.0) as u32) {
            classes.push(if count <= 12 {
                format!("{class}-{count}")
            } else {
                format!("{class}-[repeat({count},minmax(0,1fr))]")
            });
            inline.push((key.to_string(), CssValue::Str(format!("repeat({count}, minmax(0, 1fr))"))));
        }
    }
    (classes, inline)
}

fn spacer_size(node: &Node) -> f64 {
    node.prop_f64("size").unwrap_or(16.0)
}

const JS_BARREL_TEMPLATE: &str = "// {{marker}}\n{{#each names}}export { default as {{this}} } from \"./{{this}}\";\n{{/each}}";

/// Barrel index re-exporting default-exported screen components.
pub(crate) fn render_js_barrel(engine: &TemplateEngine<'_>, names: &[String]) -> Result<String> {
    engine.render_string(
        JS_BARREL_TEMPLATE,
        &serde_json::json!({"marker": GENERATED_MARKER, "names": names}),
    )
}

/// Render the screen component file for a web flavor.
pub(crate) fn render_component(spec: &ScreenSpec, config: &BackendConfig, flavor: WebFlavor) -> String {
    let name = component_name(&spec.route);
    let features = ScreenFeatures::scan(&spec.tree);
    let mut screen = WebScreen::new(config, flavor, &features);
    screen.render_root(&spec.tree);
    screen.assemble(&name, spec)
}

/// Per-screen render state.
struct WebScreen<'a> {
    config: &'a BackendConfig,
    flavor: WebFlavor,
    features: &'a ScreenFeatures,
    body: Vec<String>,
    uses_link: bool,
    /// Import path to named imports.
    library_imports: BTreeMap<String, BTreeSet<String>>,
    styles: IndexMap<String, Vec<(String, CssValue)>>,
    tablet_styles: IndexMap<String, Vec<(String, CssValue)>>,
    mobile_styles: IndexMap<String, Vec<(String, CssValue)>>,
}

impl<'a> WebScreen<'a> {
    fn new(config: &'a BackendConfig, flavor: WebFlavor, features: &'a ScreenFeatures) -> Self {
        Self {
            config,
            flavor,
            features,
            body: Vec::new(),
            uses_link: false,
            library_imports: BTreeMap::new(),
            styles: IndexMap::new(),
            tablet_styles: IndexMap::new(),
            mobile_styles: IndexMap::new(),
        }
    }

    fn push(&mut self, depth: usize, line: impl AsRef<str>) {
        self.body.push(format!("{}{}", "  ".repeat(depth), line.as_ref()));
    }

    fn render_root(&mut self, root: &Node) {
        self.render_element(root, 2);
    }

    fn render_node(&mut self, node: &Node, depth: usize) {
        match &node.interactions.visible_when {
            Some(condition) => {
                let test = condition_expr(condition);
                self.push(depth, format!("{{{test} && ("));
                self.render_element(node, depth + 1);
                self.push(depth, ")}");
            }
            None => self.render_element(node, depth),
        }
    }

    fn render_children(&mut self, node: &Node, depth: usize) {
        for child in &node.children {
            self.render_node(child, depth);
        }
    }

    /// Style attributes for a node: `className` or an inline style reference.
    fn style_attrs(&mut self, node: &Node) -> Vec<String> {
        let (base_classes, base_inline) = kind_base(node);
        let (grid_classes, grid_inline) = grid_extras(node);
        match self.flavor {
            WebFlavor::Next => {
                let mut classes: Vec<String> = base_classes.into_iter().map(str::to_string).collect();
                classes.extend(grid_classes);
                if node.kind == NodeKind::Spacer {
                    let step = spacing_class("h", &StyleValue::Number(spacer_size(node)));
                    classes.push(step.clone());
                    classes.push(step.replacen('h', "w", 1));
                    classes.push("shrink-0".to_string());
                }
                classes.extend(tailwind_classes(&node.style, self.config));
                for (breakpoint, style) in node.responsive.iter() {
                    let prefix = breakpoint_prefix(breakpoint);
                    classes.extend(
                        tailwind_classes(style, self.config)
                            .into_iter()
                            .map(|class| format!("{prefix}{class}")),
                    );
                }
                if classes.is_empty() {
                    Vec::new()
                } else {
                    vec![str_attr("className", &classes.join(" "))]
                }
            }
            WebFlavor::React => {
                let mut declarations = base_inline;
                declarations.extend(grid_inline);
                if node.kind == NodeKind::Spacer {
                    let size = spacer_size(node);
                    declarations.push(("width".into(), CssValue::Num(size)));
                    declarations.push(("height".into(), CssValue::Num(size)));
                    declarations.push(("flexShrink".into(), CssValue::Num(0.0)));
                }
                declarations.extend(inline_declarations(&node.style, self.config));
                let declarations = dedupe_declarations(declarations);

                let key = js_string(&node.id);
                let mut spreads = Vec::new();
                if !declarations.is_empty() {
                    self.styles.insert(node.id.clone(), declarations);
                    spreads.push(format!("...styles[{key}]"));
                }
                if !node.responsive.tablet.is_empty() {
                    let tablet = inline_declarations(&node.responsive.tablet, self.config);
                    self.tablet_styles.insert(node.id.clone(), dedupe_declarations(tablet));
                    spreads.push(format!("...(breakpoint !== \"desktop\" ? tabletStyles[{key}] : {{}})"));
                }
                if !node.responsive.mobile.is_empty() {
                    let mobile = inline_declarations(&node.responsive.mobile, self.config);
                    self.mobile_styles.insert(node.id.clone(), dedupe_declarations(mobile));
                    spreads.push(format!("...(breakpoint === \"mobile\" ? mobileStyles[{key}] : {{}})"));
                }
                match spreads.len() {
                    0 => Vec::new(),
                    1 if self.styles.contains_key(&node.id) => {
                        vec![expr_attr("style", &format!("styles[{key}]"))]
                    }
                    _ => vec![format!("style={{{{ {} }}}}", spreads.join(", "))],
                }
            }
        }
    }

    /// Attributes shared by every element: test hooks, accessibility, style.
    fn common_attrs(&mut self, node: &Node) -> Vec<String> {
        let mut attrs = Vec::new();
        if let Some(test_id) = node.prop_str("testId") {
            attrs.push(str_attr("data-testid", test_id));
        }
        if let Some(label) = node.prop_str("ariaLabel") {
            attrs.push(str_attr("aria-label", label));
        }
        attrs.extend(self.style_attrs(node));
        attrs
    }

    fn navigate_expr(&self, target: &str) -> String {
        match self.flavor {
            WebFlavor::Next => format!("router.push({})", js_string(target)),
            WebFlavor::React => format!("window.location.assign({})", js_string(target)),
        }
    }

    /// JS statement for an interaction. `event_value` is the DOM value, if any.
    fn action_expr(&self, node: &Node, interaction: &Interaction, event_value: Option<&str>) -> Option<String> {
        let value = interaction
            .value
            .as_ref()
            .map(Value::to_string)
            .or_else(|| event_value.map(str::to_string));
        let key = js_string(action_key(node, interaction));
        match interaction.action {
            ActionKind::Navigate => interaction.target.as_deref().map(|t| self.navigate_expr(t)),
            ActionKind::Submit => Some(format!("handlers.submit?.({})", value.unwrap_or_default())),
            ActionKind::SetState => {
                let value = value.unwrap_or_else(|| format!("!prev[{key}]"));
                Some(format!("setState((prev) => ({{ ...prev, [{key}]: {value} }}))"))
            }
            ActionKind::Custom => Some(format!("handlers[{key}]?.({})", value.unwrap_or_default())),
        }
    }

    fn event_attrs(&self, node: &Node, change_value: &str) -> Vec<String> {
        let mut attrs = Vec::new();
        if let Some(click) = &node.interactions.on_click {
            if let Some(expr) = self.action_expr(node, click, None) {
                attrs.push(format!("onClick={{() => {expr}}}"));
            }
        }
        if let Some(change) = &node.interactions.on_change {
            if let Some(expr) = self.action_expr(node, change, Some(change_value)) {
                attrs.push(format!("onChange={{(event) => {expr}}}"));
            }
        }
        attrs
    }

    fn open(&mut self, depth: usize, tag: &str, attrs: &[String]) {
        self.push(depth, format!("<{tag}{}>", attr_list(attrs)));
    }

    fn close(&mut self, depth: usize, tag: &str) {
        self.push(depth, format!("</{tag}>"));
    }

    fn void(&mut self, depth: usize, tag: &str, attrs: &[String]) {
        self.push(depth, format!("<{tag}{} />", attr_list(attrs)));
    }

    fn inline(&mut self, depth: usize, tag: &str, attrs: &[String], text: &str) {
        self.push(depth, format!("<{tag}{}>{}</{tag}>", attr_list(attrs), text_child(text)));
    }

    fn container(&mut self, node: &Node, tag: &str, mut attrs: Vec<String>, depth: usize) {
        attrs.extend(self.event_attrs(node, "event.target"));
        if node.children.is_empty() {
            self.void(depth, tag, &attrs);
            return;
        }
        self.open(depth, tag, &attrs);
        self.render_children(node, depth + 1);
        self.close(depth, tag);
    }

    fn render_element(&mut self, node: &Node, depth: usize) {
        let mut attrs = self.common_attrs(node);
        match &node.kind {
            NodeKind::Container => {
                let tag = node.prop_str("as").unwrap_or("div").to_string();
                self.container(node, &tag, attrs, depth);
            }
            NodeKind::Stack | NodeKind::Grid => self.container(node, "div", attrs, depth),
            NodeKind::Card => {
                attrs.extend(self.event_attrs(node, "event.target"));
                self.open(depth, "div", &attrs);
                if let Some(title) = node.prop_str("title") {
                    let title_attrs = match self.flavor {
                        WebFlavor::Next => vec![str_attr("className", "text-lg font-semibold")],
                        WebFlavor::React => vec!["style={{ fontSize: 18, fontWeight: 600 }}".to_string()],
                    };
                    self.inline(depth + 1, "h3", &title_attrs, title);
                }
                self.render_children(node, depth + 1);
                self.close(depth, "div");
            }
            NodeKind::Text => {
                attrs.extend(self.event_attrs(node, "event.target"));
                self.inline(depth, "p", &attrs, node.prop_str("text").unwrap_or_default());
            }
            NodeKind::Heading => {
                attrs.extend(self.event_attrs(node, "event.target"));
                let tag = format!("h{}", heading_level(node));
                self.inline(depth, &tag, &attrs, node.prop_str("text").unwrap_or_default());
            }
            NodeKind::Button => {
                attrs.insert(0, str_attr("type", node.prop_str("type").unwrap_or("button")));
                if let Some(variant) = node.prop_str("variant") {
                    attrs.push(str_attr("data-variant", variant));
                }
                if node.prop_bool("disabled") == Some(true) {
                    attrs.push("disabled".to_string());
                }
                attrs.extend(self.event_attrs(node, "event.target"));
                self.inline(depth, "button", &attrs, node.prop_str("label").unwrap_or_default());
            }
            NodeKind::Link => self.link(node, attrs, depth),
            NodeKind::Image => {
                attrs.insert(0, str_attr("src", node.prop_str("src").unwrap_or_default()));
                attrs.insert(1, str_attr("alt", node.prop_str("alt").unwrap_or_default()));
                attrs.extend(self.event_attrs(node, "event.target"));
                self.void(depth, "img", &attrs);
            }
            NodeKind::Input | NodeKind::Textarea | NodeKind::Select => self.field(node, attrs, depth),
            NodeKind::Checkbox => {
                let mut input = vec![str_attr("type", "checkbox")];
                if let Some(name) = node.prop_str("name") {
                    input.push(str_attr("name", name));
                }
                if node.prop_bool("checked") == Some(true) {
                    input.push("defaultChecked".to_string());
                }
                input.extend(self.event_attrs(node, "event.target.checked"));
                self.open(depth, "label", &attrs);
                self.void(depth + 1, "input", &input);
                self.inline(depth + 1, "span", &[], node.prop_str("label").unwrap_or_default());
                self.close(depth, "label");
            }
            NodeKind::Divider => {
                if node.prop_str("orientation") == Some("vertical") {
                    attrs.insert(0, str_attr("role", "separator"));
                    attrs.insert(1, str_attr("aria-orientation", "vertical"));
                    self.void(depth, "div", &attrs);
                } else {
                    self.void(depth, "hr", &attrs);
                }
            }
            NodeKind::Spacer => {
                attrs.insert(0, str_attr("aria-hidden", "true"));
                self.void(depth, "div", &attrs);
            }
            NodeKind::List => self.list(node, attrs, depth),
            NodeKind::Form => self.form(node, attrs, depth),
            NodeKind::ComponentRef => {
                attrs.insert(0, str_attr("role", "note"));
                attrs.insert(1, str_attr("data-screenspec-diagnostic", "unresolved-ref"));
                self.inline(depth, "div", &attrs, &diagnostic_text(node));
            }
            NodeKind::Other(tag) => self.external(node, tag, attrs, depth),
        }
    }

    fn link(&mut self, node: &Node, mut attrs: Vec<String>, depth: usize) {
        let href = node.prop_str("href").unwrap_or("#");
        let text = node.prop_str("text").unwrap_or_default();
        let external = node.prop_bool("external") == Some(true) || href.contains("://");
        attrs.insert(0, str_attr("href", href));
        if external {
            attrs.push(str_attr("target", "_blank"));
            attrs.push(str_attr("rel", "noopener noreferrer"));
        }
        attrs.extend(self.event_attrs(node, "event.target"));
        let tag = if self.flavor == WebFlavor::Next && !external {
            self.uses_link = true;
            "Link"
        } else {
            "a"
        };
        self.inline(depth, tag, &attrs, text);
    }

    fn field(&mut self, node: &Node, wrapper_attrs: Vec<String>, depth: usize) {
        let mut attrs = Vec::new();
        if let Some(name) = node.prop_str("name") {
            attrs.push(str_attr("name", name));
        }
        match node.kind {
            NodeKind::Input => {
                attrs.push(str_attr("type", node.prop_str("inputType").unwrap_or("text")));
                if let Some(default) = node.prop_str("defaultValue") {
                    attrs.push(str_attr("defaultValue", default));
                }
            }
            NodeKind::Textarea => {
                if let Some(rows) = node.prop_f64("rows") {
                    attrs.push(expr_attr("rows", &format_number(rows.round())));
                }
            }
            _ => {
                if node.prop_str("placeholder").is_some() {
                    attrs.push(str_attr("defaultValue", ""));
                }
            }
        }
        if node.kind != NodeKind::Select {
            if let Some(placeholder) = node.prop_str("placeholder") {
                attrs.push(str_attr("placeholder", placeholder));
            }
        }
        if node.prop_bool("required") == Some(true) {
            attrs.push("required".to_string());
        }
        if node.prop_bool("disabled") == Some(true) {
            attrs.push("disabled".to_string());
        }
        attrs.extend(self.event_attrs(node, "event.target.value"));

        let (control_depth, label) = match node.prop_str("label") {
            Some(label) => {
                self.open(depth, "label", &wrapper_attrs);
                self.inline(depth + 1, "span", &[], label);
                (depth + 1, true)
            }
            None => {
                let mut merged = wrapper_attrs;
                merged.extend(attrs);
                attrs = merged;
                (depth, false)
            }
        };

        match node.kind {
            NodeKind::Input => self.void(control_depth, "input", &attrs),
            NodeKind::Textarea => self.void(control_depth, "textarea", &attrs),
            _ => {
                self.open(control_depth, "select", &attrs);
                if let Some(placeholder) = node.prop_str("placeholder") {
                    self.inline(
                        control_depth + 1,
                        "option",
                        &[str_attr("value", ""), "disabled".to_string()],
                        placeholder,
                    );
                }
                for (label, value) in select_options(node) {
                    self.inline(control_depth + 1, "option", &[str_attr("value", &value)], &label);
                }
                self.close(control_depth, "select");
            }
        }

        if label {
            self.close(depth, "label");
        }
    }

    fn list(&mut self, node: &Node, attrs: Vec<String>, depth: usize) {
        let tag = if node.prop_bool("ordered") == Some(true) { "ol" } else { "ul" };
        let empty_text = node.prop_str("emptyText");
        self.open(depth, tag, &attrs);
        match DataBinding::of(node) {
            Some(DataBinding::Inline(items)) => {
                if items.is_empty() {
                    if let Some(empty) = empty_text {
                        self.inline(depth + 1, "li", &[], empty);
                    }
                }
                for (index, item) in items.iter().enumerate() {
                    self.inline(depth + 1, "li", &[format!("key={{{index}}}")], &item_label(item));
                }
            }
            Some(binding @ DataBinding::Remote { .. }) => {
                let items = items_ident(&node.id);
                if let Some(empty) = empty_text {
                    self.push(depth + 1, format!("{{{items}.length === 0 && <li>{}</li>}}", text_child(empty)));
                }
                let field = binding.label_field().map(js_string).unwrap_or_else(|| "undefined".into());
                self.push(
                    depth + 1,
                    format!("{{{items}.map((item, index) => <li key={{index}}>{{itemLabel(item, {field})}}</li>)}}"),
                );
            }
            None => {}
        }
        for child in &node.children {
            self.push(depth + 1, "<li>");
            self.render_node(child, depth + 2);
            self.push(depth + 1, "</li>");
        }
        self.close(depth, tag);
    }

    fn form(&mut self, node: &Node, mut attrs: Vec<String>, depth: usize) {
        match node.prop_str("action") {
            Some(action) => {
                attrs.insert(0, str_attr("action", action));
                attrs.insert(1, str_attr("method", node.prop_str("method").unwrap_or("post")));
            }
            None => attrs.push(
                "onSubmit={(event) => { event.preventDefault(); handlers.submit?.(Object.fromEntries(new FormData(event.currentTarget))); }}"
                    .to_string(),
            ),
        }
        self.open(depth, "form", &attrs);
        self.render_children(node, depth + 1);
        if let Some(label) = node.prop_str("submitLabel") {
            self.inline(depth + 1, "button", &[str_attr("type", "submit")], label);
        }
        self.close(depth, "form");
    }

    fn external(&mut self, node: &Node, tag: &str, mut attrs: Vec<String>, depth: usize) {
        let data_attr = match DataBinding::of(node) {
            Some(DataBinding::Inline(items)) if node.data_source.is_some() => {
                Some(expr_attr("data", &Value::Array(items).to_string()))
            }
            Some(DataBinding::Remote { .. }) => Some(expr_attr("data", &items_ident(&node.id))),
            _ => None,
        };

        let config = self.config;
        let element = match config.component_library.get(tag) {
            Some(component) => {
                let export = component.name.clone().unwrap_or_else(|| tag.to_string());
                self.library_imports
                    .entry(component.import.clone())
                    .or_default()
                    .insert(export.clone());
                for (prop, value) in visible_props(node) {
                    let name = component.props.get(prop).map(String::as_str).unwrap_or(prop);
                    attrs.push(value_attr(name, value));
                }
                export
            }
            None => {
                attrs.insert(0, str_attr("data-component", tag));
                for (prop, value) in visible_props(node) {
                    let name = format!("data-{}", prop.to_case(Case::Kebab));
                    let text = match value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    attrs.push(str_attr(&name, &text));
                }
                "div".to_string()
            }
        };
        attrs.extend(data_attr);
        self.container(node, &element, attrs, depth);
    }

    fn assemble(self, name: &str, spec: &ScreenSpec) -> String {
        let features = self.features;
        let mut lines = vec![format!("// {GENERATED_MARKER}")];
        if self.flavor == WebFlavor::Next {
            lines.push("\"use client\";".to_string());
        }
        lines.push(String::new());

        let responsive_hook = self.flavor == WebFlavor::React && features.responsive;
        let remote = !features.remote_lists.is_empty();
        let sets_title = self.flavor == WebFlavor::React
            && spec.meta.as_ref().and_then(|m| m.title.as_ref()).is_some();

        let mut react_imports = Vec::new();
        if remote || responsive_hook || sets_title {
            react_imports.push("useEffect");
        }
        if features.has_state() || remote || responsive_hook {
            react_imports.push("useState");
        }
        if !self.styles.is_empty() || !self.tablet_styles.is_empty() || !self.mobile_styles.is_empty() {
            react_imports.push("type CSSProperties");
        }
        if !react_imports.is_empty() {
            lines.push(format!("import {{ {} }} from \"react\";", react_imports.join(", ")));
        }
        if self.uses_link {
            lines.push("import Link from \"next/link\";".to_string());
        }
        let routes = self.flavor == WebFlavor::Next && features.navigates;
        if routes {
            lines.push("import { useRouter } from \"next/navigation\";".to_string());
        }
        for (path, names) in &self.library_imports {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            lines.push(format!("import {{ {} }} from {};", names.join(", "), js_string(path)));
        }
        for plugin in &self.config.plugins {
            lines.push(format!("import {};", js_string(plugin)));
        }
        lines.push(String::new());

        if remote {
            lines.extend(ITEM_LABEL_HELPER.lines().map(str::to_string));
            lines.push(String::new());
        }
        if responsive_hook {
            lines.extend(breakpoint_hook());
            lines.push(String::new());
        }
        for (table, entries) in [
            ("styles", &self.styles),
            ("tabletStyles", &self.tablet_styles),
            ("mobileStyles", &self.mobile_styles),
        ] {
            if entries.is_empty() {
                continue;
            }
            lines.push(format!("const {table}: Record<string, CSSProperties> = {{"));
            for (id, declarations) in entries {
                let body: Vec<String> = declarations
                    .iter()
                    .map(|(key, value)| format!("{key}: {}", value.to_js()))
                    .collect();
                lines.push(format!("  {}: {{ {} }},", js_string(id), body.join(", ")));
            }
            lines.push("};".to_string());
            lines.push(String::new());
        }

        let signature = if features.has_callbacks() {
            lines.push(format!("export interface {name}Props {{"));
            lines.push("  handlers?: Record<string, (value?: unknown) => void>;".to_string());
            lines.push("}".to_string());
            lines.push(String::new());
            format!("export default function {name}({{ handlers = {{}} }}: {name}Props) {{")
        } else {
            format!("export default function {name}() {{")
        };
        lines.push(signature);

        if routes {
            lines.push("  const router = useRouter();".to_string());
        }
        if responsive_hook {
            lines.push("  const breakpoint = useBreakpoint();".to_string());
        }
        if features.has_state() {
            lines.push("  const [state, setState] = useState<Record<string, unknown>>({});".to_string());
        }
        if let Some(title) = spec.meta.as_ref().and_then(|m| m.title.as_deref()).filter(|_| sets_title) {
            lines.push("  useEffect(() => {".to_string());
            lines.push(format!("    document.title = {};", js_string(title)));
            lines.push("  }, []);".to_string());
        }
        for id in &features.remote_lists {
            lines.extend(remote_effect(id, spec));
        }
        if routes || responsive_hook || features.has_state() || sets_title || remote {
            lines.push(String::new());
        }

        match &spec.tree.interactions.visible_when {
            Some(condition) => {
                lines.push(format!("  return {} ? (", condition_expr(condition)));
                lines.extend(self.body);
                lines.push("  ) : null;".to_string());
            }
            None => {
                lines.push("  return (".to_string());
                lines.extend(self.body);
                lines.push("  );".to_string());
            }
        }
        lines.push("}".to_string());
        lines.join("\n")
    }
}

pub(crate) fn attr_list(attrs: &[String]) -> String {
    attrs.iter().map(|a| format!(" {a}")).collect()
}

/// Later declarations of the same key win, keeping first position.
pub(crate) fn dedupe_declarations(declarations: Vec<(String, CssValue)>) -> Vec<(String, CssValue)> {
    let mut merged: IndexMap<String, CssValue> = IndexMap::new();
    for (key, value) in declarations {
        merged.insert(key, value);
    }
    merged.into_iter().collect()
}

/// Props rendered onto external components.
pub(crate) fn visible_props(node: &Node) -> impl Iterator<Item = (&str, &Value)> {
    node.props
        .iter()
        .filter(|(key, _)| !RESERVED_PROPS.contains(&key.as_str()))
        .map(|(key, value)| (key.as_str(), value))
}

/// JS test for a visibleWhen condition.
pub(crate) fn condition_expr(condition: &Condition) -> String {
    let key = js_string(&condition.state);
    match &condition.equals {
        Some(expected) => format!("state[{key}] === {expected}"),
        None => format!("Boolean(state[{key}])"),
    }
}

/// State variable holding fetched items for a node.
pub(crate) fn items_ident(id: &str) -> String {
    format!("{}Items", js_ident(id))
}

pub(crate) fn remote_effect(id: &str, spec: &ScreenSpec) -> Vec<String> {
    let url = spec
        .tree
        .find(id)
        .and_then(DataBinding::of)
        .and_then(|binding| match binding {
            DataBinding::Remote { url, .. } => Some(url),
            DataBinding::Inline(_) => None,
        })
        .unwrap_or_default();
    let items = items_ident(id);
    let setter = format!("set{}", items.to_case(Case::Pascal));
    vec![
        format!("  const [{items}, {setter}] = useState<unknown[]>([]);"),
        "  useEffect(() => {".to_string(),
        "    let cancelled = false;".to_string(),
        format!("    fetch({})", js_string(&url)),
        "      .then((response) => response.json())".to_string(),
        "      .then((data) => {".to_string(),
        format!("        if (!cancelled) {setter}(Array.isArray(data) ? data : []);"),
        "      })".to_string(),
        format!("      .catch(() => {{ if (!cancelled) {setter}([]); }});"),
        "    return () => {".to_string(),
        "      cancelled = true;".to_string(),
        "    };".to_string(),
        "  }, []);".to_string(),
    ]
}

pub(crate) const ITEM_LABEL_HELPER: &str = r#"function itemLabel(item: unknown, field?: string): string {
  if (item === null || item === undefined) return "";
  if (typeof item !== "object") return String(item);
  const record = item as Record<string, unknown>;
  const keys = field ? [field] : ["label", "title", "name", "text"];
  for (const key of keys) {
    if (record[key] !== undefined) return String(record[key]);
  }
  return JSON.stringify(item);
}"#;

fn breakpoint_hook() -> Vec<String> {
    let mobile = Breakpoint::Mobile.max_width();
    let tablet = Breakpoint::Tablet.max_width();
    vec![
        "type Breakpoint = \"desktop\" | \"tablet\" | \"mobile\";".to_string(),
        String::new(),
        "function useBreakpoint(): Breakpoint {".to_string(),
        "  const [width, setWidth] = useState(() => (typeof window === \"undefined\" ? 1280 : window.innerWidth));"
            .to_string(),
        "  useEffect(() => {".to_string(),
        "    const onResize = () => setWidth(window.innerWidth);".to_string(),
        "    window.addEventListener(\"resize\", onResize);".to_string(),
        "    return () => window.removeEventListener(\"resize\", onResize);".to_string(),
        "  }, []);".to_string(),
        format!("  if (width <= {mobile}) return \"mobile\";"),
        format!("  if (width <= {tablet}) return \"tablet\";"),
        "  return \"desktop\";".to_string(),
        "}".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(tree: Value) -> ScreenSpec {
        ScreenSpec::from_value(json!({"version": 1, "route": "/settings", "tree": tree})).unwrap()
    }

    #[test]
    fn test_tailwind_spacing_and_arbitrary_values() {
        let config = BackendConfig::default();
        let style = Style::new()
            .with(StyleProperty::Padding, 16.0)
            .with(StyleProperty::Gap, 13.0)
            .with(StyleProperty::Width, "100%")
            .with(StyleProperty::BackgroundColor, "rgb(1, 2, 3)")
            .with(StyleProperty::FontSize, 14.0)
            .with(StyleProperty::FontWeight, 600.0)
            .with(StyleProperty::JustifyContent, "space-between");
        assert_eq!(
            tailwind_classes(&style, &config),
            vec!["p-4", "gap-[13px]", "w-full", "bg-[rgb(1,_2,_3)]", "text-sm", "font-semibold", "justify-between"]
        );
    }

    #[test]
    fn test_inline_declarations_expand_axes() {
        let config = BackendConfig::default();
        let style = Style::new()
            .with(StyleProperty::PaddingX, 8.0)
            .with(StyleProperty::Shadow, "md")
            .with(StyleProperty::AlignItems, "start");
        let declarations: Vec<String> = inline_declarations(&style, &config)
            .into_iter()
            .map(|(k, v)| format!("{k}: {}", v.to_js()))
            .collect();
        assert_eq!(
            declarations,
            vec![
                "paddingLeft: 8",
                "paddingRight: 8",
                "boxShadow: \"0 4px 6px -1px rgba(0, 0, 0, 0.1)\"",
                "alignItems: \"flex-start\"",
            ]
        );
    }

    #[test]
    fn test_responsive_prefixes() {
        let screen = spec(json!({
            "id": "root", "type": "Stack",
            "style": {"padding": 32},
            "responsive": {"tablet": {"padding": 16}, "mobile": {"padding": 8}}
        }));
        let out = render_component(&screen, &BackendConfig::default(), WebFlavor::Next);
        assert!(out.contains(r#"<div className="flex flex-col p-8 max-lg:p-4 max-md:p-2" />"#), "{out}");
    }

    #[test]
    fn test_react_uses_style_tables_and_breakpoint_hook() {
        let screen = spec(json!({
            "id": "root", "type": "Container",
            "style": {"padding": 32},
            "responsive": {"mobile": {"padding": 8}},
            "children": [{"id": "t", "type": "Text", "props": {"text": "Hi"}}]
        }));
        let out = render_component(&screen, &BackendConfig::default(), WebFlavor::React);
        assert!(out.contains("function useBreakpoint(): Breakpoint {"));
        assert!(out.contains(r#"  "root": { padding: 32 },"#));
        assert!(out.contains(r#"const mobileStyles: Record<string, CSSProperties> = {"#));
        assert!(out.contains(
            r#"<div style={{ ...styles["root"], ...(breakpoint === "mobile" ? mobileStyles["root"] : {}) }}>"#
        ));
        assert!(out.contains(r#"<p>{"Hi"}</p>"#));
    }

    #[test]
    fn test_interactions_and_visibility() {
        let screen = spec(json!({
            "id": "root", "type": "Stack",
            "children": [
                {"id": "go", "type": "Button", "props": {"label": "Next"},
                 "interactions": {"onClick": {"action": "navigate", "target": "/next"}}},
                {"id": "tab", "type": "Button", "props": {"label": "Tab"},
                 "interactions": {"onClick": {"action": "setState", "target": "tab", "value": "b"}}},
                {"id": "panel", "type": "Text", "props": {"text": "B"},
                 "interactions": {"visibleWhen": {"state": "tab", "equals": "b"}}}
            ]
        }));
        let out = render_component(&screen, &BackendConfig::default(), WebFlavor::Next);
        assert!(out.contains("import { useRouter } from \"next/navigation\";"));
        assert!(out.contains(r#"onClick={() => router.push("/next")}"#));
        assert!(out.contains(r#"onClick={() => setState((prev) => ({ ...prev, ["tab"]: "b" }))}"#));
        assert!(out.contains(r#"{state["tab"] === "b" && ("#));

        let out = render_component(&screen, &BackendConfig::default(), WebFlavor::React);
        assert!(out.contains(r#"onClick={() => window.location.assign("/next")}"#));
        assert!(!out.contains("next/navigation"));
    }

    #[test]
    fn test_unresolved_ref_renders_placeholder() {
        let screen = spec(json!({
            "id": "root", "type": "ComponentRef",
            "props": {"ref": "gone", "diagnostic": "Missing component \"gone\""}
        }));
        let out = render_component(&screen, &BackendConfig::default(), WebFlavor::Next);
        assert!(out.contains(r#"data-screenspec-diagnostic="unresolved-ref""#));
        assert!(out.contains(r#"{"Missing component \"gone\""}"#));
    }

    #[test]
    fn test_other_nodes_use_component_library() {
        let config = BackendConfig::from_json(
            r#"{"componentLibrary": {"components": {"SalesChart": {"import": "@acme/charts", "name": "LineChart", "props": {"series": "data"}}}}}"#,
        )
        .unwrap();
        let screen = spec(json!({
            "id": "root", "type": "Stack",
            "children": [
                {"id": "chart", "type": "SalesChart", "props": {"series": [1, 2]}},
                {"id": "map", "type": "StoreMap", "props": {"zoom": 3}}
            ]
        }));
        let out = render_component(&screen, &config, WebFlavor::Next);
        assert!(out.contains("import { LineChart } from \"@acme/charts\";"));
        assert!(out.contains("<LineChart data={[1,2]} />"));
        assert!(out.contains(r#"<div data-component="StoreMap" data-zoom="3" />"#));
    }

    #[test]
    fn test_remote_list_fetches() {
        let screen = spec(json!({
            "id": "feed", "type": "List",
            "props": {"emptyText": "Nothing yet"},
            "dataSource": {"type": "api", "url": "https://api.test/items", "mapping": {"label": "title"}}
        }));
        let out = render_component(&screen, &BackendConfig::default(), WebFlavor::React);
        assert!(out.contains("const [feedItems, setFeedItems] = useState<unknown[]>([]);"));
        assert!(out.contains(r#"fetch("https://api.test/items")"#));
        assert!(out.contains(r#"{feedItems.map((item, index) => <li key={index}>{itemLabel(item, "title")}</li>)}"#));
        assert!(out.contains("function itemLabel(item: unknown, field?: string): string {"));
    }

    #[test]
    fn test_static_list_is_unrolled() {
        let screen = spec(json!({
            "id": "todo", "type": "List", "props": {"ordered": true},
            "dataSource": {"type": "static", "data": [{"name": "Milk"}, {"name": "Eggs"}]}
        }));
        let out = render_component(&screen, &BackendConfig::default(), WebFlavor::Next);
        assert!(out.contains(r#"<li key={0}>{"Milk"}</li>"#));
        assert!(out.contains(r#"<li key={1}>{"Eggs"}</li>"#));
        assert!(out.contains("<ol>"));
    }

    #[test]
    fn test_form_submits_to_handlers() {
        let screen = spec(json!({
            "id": "signup", "type": "Form", "props": {"submitLabel": "Create"},
            "children": [{"id": "email", "type": "Input", "props": {"name": "email", "label": "Email", "inputType": "email"}}]
        }));
        let out = render_component(&screen, &BackendConfig::default(), WebFlavor::Next);
        assert!(out.contains("export interface SettingsScreenProps {"));
        assert!(out.contains("export default function SettingsScreen({ handlers = {} }: SettingsScreenProps) {"));
        assert!(out.contains("handlers.submit?.(Object.fromEntries(new FormData(event.currentTarget)))"));
        assert!(out.contains(r#"<input name="email" type="email" />"#));
        assert!(out.contains(r#"<button type="submit">{"Create"}</button>"#));
    }

    #[test]
    fn test_plugins_become_side_effect_imports() {
        let mut config = BackendConfig::default();
        config.plugins.push("@acme/analytics".into());
        let screen = spec(json!({"id": "root", "type": "Container"}));
        let out = render_component(&screen, &config, WebFlavor::React);
        assert!(out.contains("import \"@acme/analytics\";"));
    }
}
