//! React Native backend.
//!
//! Screens become function components styled through `StyleSheet.create`.
//! Responsive overrides are applied with `useWindowDimensions`, and
//! navigation is delegated to an `onNavigate` callback since React Native
//! ships no router.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use screenspec_core::{
    format_number, ActionKind, Breakpoint, Interaction, Node, NodeKind, ScreenSpec, Style,
    StyleProperty, StyleValue,
};
use serde_json::Value;

use super::common::{
    action_key, diagnostic_text, heading_level, item_label, select_options, DataBinding,
    ScreenFeatures, HEADING_SIZES,
};
use super::templates::TemplateEngine;
use super::web::{
    attr_list, condition_expr, css_align, css_justify, dedupe_declarations, expr_attr,
    items_ident, length_value, remote_effect, render_js_barrel, str_attr, text_child, value_attr,
    visible_props, CssValue, ITEM_LABEL_HELPER,
};
use super::{join_path, EmitOutput, GeneratedFile, ScreenBackend, GENERATED_MARKER};
use crate::config::BackendConfig;
use crate::error::Result;
use crate::naming::{comment_text, component_name, js_string};
use crate::scale::{font_weight, shadow, Length};

/// React Native code generator.
pub struct ReactNativeBackend {
    engine: TemplateEngine<'static>,
}

impl ReactNativeBackend {
    pub fn new() -> Self {
        Self {
            engine: TemplateEngine::new(),
        }
    }
}

impl Default for ReactNativeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenBackend for ReactNativeBackend {
    fn name(&self) -> &'static str {
        "react-native"
    }

    fn emit_screen(&self, spec: &ScreenSpec, config: &BackendConfig) -> Result<EmitOutput> {
        let name = component_name(&spec.route);
        let features = ScreenFeatures::scan(&spec.tree);
        let mut screen = NativeScreen::new(config, &features);
        screen.render_element(&spec.tree, 2);
        let content = screen.assemble(&name, spec);
        Ok(EmitOutput {
            files: vec![GeneratedFile::new(
                join_path(&config.screens_dir, &format!("{name}.tsx")),
                content,
            )],
            component_name: name,
        })
    }

    fn emit_barrel_index(&self, names: &[String], config: &BackendConfig) -> Result<GeneratedFile> {
        Ok(GeneratedFile::new(
            join_path(&config.screens_dir, "index.ts"),
            render_js_barrel(&self.engine, names)?,
        ))
    }
}

/// Style bag as React Native style declarations.
fn native_declarations(style: &Style) -> Vec<(String, CssValue)> {
    let mut out = Vec::new();
    for (property, value) in style.iter() {
        let text = value.to_string();
        let mut push = |key: &str, value: CssValue| out.push((key.to_string(), value));
        match property {
            StyleProperty::PaddingX => push("paddingHorizontal", length_value(value)),
            StyleProperty::PaddingY => push("paddingVertical", length_value(value)),
            StyleProperty::MarginX => push("marginHorizontal", length_value(value)),
            StyleProperty::MarginY => push("marginVertical", length_value(value)),
            StyleProperty::FontWeight => {
                let weight = font_weight(value).map_or(text, |w| w.to_string());
                push("fontWeight", CssValue::Str(weight));
            }
            StyleProperty::FontFamily => push("fontFamily", CssValue::Str(text)),
            StyleProperty::Opacity | StyleProperty::Flex | StyleProperty::LineHeight => match value {
                StyleValue::Number(n) => push(property.key(), CssValue::Num(*n)),
                StyleValue::Text(_) => {
                    if let Some(px) = Length::parse(value).as_px() {
                        push(property.key(), CssValue::Num(px));
                    }
                }
            },
            StyleProperty::Shadow => {
                if let Some(preset) = shadow(value) {
                    push("elevation", CssValue::Num(preset.elevation));
                    if preset.elevation > 0.0 {
                        push("shadowColor", CssValue::Str("#000".into()));
                        push("shadowOpacity", CssValue::Num(0.1));
                        push("shadowRadius", CssValue::Num(preset.radius));
                        push(
                            "shadowOffset",
                            CssValue::Expr(format!("{{ width: 0, height: {} }}", format_number(preset.radius / 2.0))),
                        );
                    }
                }
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

/// Declarations implied by a node's kind.
fn kind_base(node: &Node) -> Vec<(String, CssValue)> {
    let decl = |key: &str, value: CssValue| (key.to_string(), value);
    let text = |s: &str| CssValue::Str(s.to_string());
    match &node.kind {
        NodeKind::Stack => {
            let mut base = Vec::new();
            if node.prop_str("direction") == Some("row") {
                base.push(decl("flexDirection", text("row")));
            }
            if node.prop_bool("wrap") == Some(true) {
                base.push(decl("flexWrap", text("wrap")));
            }
            base
        }
        NodeKind::Grid => vec![decl("flexDirection", text("row")), decl("flexWrap", text("wrap"))],
        NodeKind::Card => {
            let mut base = vec![
                decl("borderRadius", CssValue::Num(8.0)),
                decl("borderWidth", CssValue::Num(1.0)),
                decl("borderColor", text("#e5e7eb")),
                decl("padding", CssValue::Num(16.0)),
            ];
            if node.prop_bool("elevated") == Some(true) {
                base.extend(native_declarations(&Style::new().with(StyleProperty::Shadow, "md")));
            }
            base
        }
        NodeKind::Heading => vec![
            decl("fontSize", CssValue::Num(HEADING_SIZES[usize::from(heading_level(node)) - 1])),
            decl("fontWeight", text("700")),
        ],
        NodeKind::Text => match node.prop_str("variant") {
            Some("caption") => vec![decl("fontSize", CssValue::Num(14.0))],
            Some("label") => vec![decl("fontSize", CssValue::Num(14.0)), decl("fontWeight", text("500"))],
            Some("muted") => vec![decl("color", text("#6b7280"))],
            _ => Vec::new(),
        },
        NodeKind::Divider => {
            let vertical = node.prop_str("orientation") == Some("vertical");
            vec![
                decl(if vertical { "width" } else { "height" }, CssValue::Num(1.0)),
                decl("alignSelf", text("stretch")),
                decl("backgroundColor", text("#e5e7eb")),
            ]
        }
        NodeKind::Spacer => {
            let size = node.prop_f64("size").unwrap_or(16.0);
            vec![decl("width", CssValue::Num(size)), decl("height", CssValue::Num(size))]
        }
        NodeKind::Checkbox => vec![
            decl("flexDirection", text("row")),
            decl("alignItems", text("center")),
            decl("gap", CssValue::Num(8.0)),
        ],
        NodeKind::Input | NodeKind::Textarea | NodeKind::Select if node.prop_str("label").is_some() => {
            vec![decl("gap", CssValue::Num(4.0))]
        }
        NodeKind::ComponentRef => vec![
            decl("borderWidth", CssValue::Num(1.0)),
            decl("borderStyle", text("dashed")),
            decl("borderColor", text("#f87171")),
            decl("padding", CssValue::Num(8.0)),
        ],
        _ => Vec::new(),
    }
}

/// Switch state key for a checkbox.
fn checkbox_key(node: &Node) -> &str {
    node.prop_str("name").unwrap_or(&node.id)
}

struct NativeScreen<'a> {
    config: &'a BackendConfig,
    features: &'a ScreenFeatures,
    body: Vec<String>,
    components: BTreeSet<&'static str>,
    library_imports: BTreeMap<String, BTreeSet<String>>,
    /// Initial screen state, seeded by checked checkboxes.
    initial_state: IndexMap<String, Value>,
    /// Keys held in screen state by checkboxes and named inputs.
    field_keys: BTreeSet<String>,
    styles: IndexMap<String, Vec<(String, CssValue)>>,
    tablet_styles: IndexMap<String, Vec<(String, CssValue)>>,
    mobile_styles: IndexMap<String, Vec<(String, CssValue)>>,
}

impl<'a> NativeScreen<'a> {
    fn new(config: &'a BackendConfig, features: &'a ScreenFeatures) -> Self {
        Self {
            config,
            features,
            body: Vec::new(),
            components: BTreeSet::new(),
            library_imports: BTreeMap::new(),
            initial_state: IndexMap::new(),
            field_keys: BTreeSet::new(),
            styles: IndexMap::new(),
            tablet_styles: IndexMap::new(),
            mobile_styles: IndexMap::new(),
        }
    }

    fn push(&mut self, depth: usize, line: impl AsRef<str>) {
        self.body.push(format!("{}{}", "  ".repeat(depth), line.as_ref()));
    }

    fn uses(&mut self, component: &'static str) -> &'static str {
        self.components.insert(component);
        component
    }

    fn has_state(&self) -> bool {
        self.features.has_state() || !self.field_keys.is_empty()
    }

    fn style_attr(&mut self, node: &Node) -> Option<String> {
        let mut declarations = kind_base(node);
        declarations.extend(native_declarations(&node.style));
        let declarations = dedupe_declarations(declarations);
        let key = js_string(&node.id);

        let mut parts = Vec::new();
        if !declarations.is_empty() {
            self.styles.insert(node.id.clone(), declarations);
            parts.push(format!("styles[{key}]"));
        }
        for (breakpoint, style) in node.responsive.iter() {
            let declarations = dedupe_declarations(native_declarations(style));
            let (table, flag, name) = match breakpoint {
                Breakpoint::Tablet => (&mut self.tablet_styles, "isTablet", "tabletStyles"),
                Breakpoint::Mobile => (&mut self.mobile_styles, "isMobile", "mobileStyles"),
            };
            table.insert(node.id.clone(), declarations);
            parts.push(format!("{flag} && {name}[{key}]"));
        }
        match parts.len() {
            0 => None,
            1 if self.styles.contains_key(&node.id) => Some(expr_attr("style", &parts[0])),
            _ => Some(expr_attr("style", &format!("[{}]", parts.join(", ")))),
        }
    }

    fn action_expr(&self, node: &Node, interaction: &Interaction, event_value: Option<&str>) -> Option<String> {
        let value = interaction
            .value
            .as_ref()
            .map(Value::to_string)
            .or_else(|| event_value.map(str::to_string));
        let key = js_string(action_key(node, interaction));
        match interaction.action {
            ActionKind::Navigate => interaction
                .target
                .as_deref()
                .map(|target| format!("onNavigate?.({})", js_string(target))),
            ActionKind::Submit => Some(format!("handlers.submit?.({})", value.unwrap_or_default())),
            ActionKind::SetState => {
                let value = value.unwrap_or_else(|| format!("!prev[{key}]"));
                Some(format!("setState((prev) => ({{ ...prev, [{key}]: {value} }}))"))
            }
            ActionKind::Custom => Some(format!("handlers[{key}]?.({})", value.unwrap_or_default())),
        }
    }

    fn press_expr(&self, node: &Node) -> Option<String> {
        node.interactions
            .on_click
            .as_ref()
            .and_then(|click| self.action_expr(node, click, None))
    }

    fn change_expr(&self, node: &Node, value: &str) -> Option<String> {
        node.interactions
            .on_change
            .as_ref()
            .and_then(|change| self.action_expr(node, change, Some(value)))
    }

    fn render_node(&mut self, node: &Node, depth: usize) {
        match &node.interactions.visible_when {
            Some(condition) => {
                self.push(depth, format!("{{{} && (", condition_expr(condition)));
                self.render_element(node, depth + 1);
                self.push(depth, ")}");
            }
            None => self.render_element(node, depth),
        }
    }

    /// Render a node, wrapping it in a Pressable when it handles clicks but
    /// is not pressable itself.
    fn render_element(&mut self, node: &Node, depth: usize) {
        let pressable_kind = matches!(node.kind, NodeKind::Button | NodeKind::Link);
        match self.press_expr(node).filter(|_| !pressable_kind) {
            Some(press) => {
                let tag = self.uses("Pressable");
                self.push(depth, format!("<{tag} onPress={{() => {press}}}>"));
                self.render_kind(node, depth + 1);
                self.push(depth, format!("</{tag}>"));
            }
            None => self.render_kind(node, depth),
        }
    }

    fn base_attrs(&mut self, node: &Node) -> Vec<String> {
        let mut attrs = Vec::new();
        if let Some(test_id) = node.prop_str("testId") {
            attrs.push(str_attr("testID", test_id));
        }
        if let Some(label) = node.prop_str("ariaLabel") {
            attrs.push(str_attr("accessibilityLabel", label));
        }
        attrs.extend(self.style_attr(node));
        attrs
    }

    fn text(&mut self, depth: usize, attrs: &[String], text: &str) {
        let tag = self.uses("Text");
        self.push(depth, format!("<{tag}{}>{}</{tag}>", attr_list(attrs), text_child(text)));
    }

    fn view(&mut self, node: &Node, attrs: &[String], depth: usize) {
        let tag = self.uses("View");
        if node.children.is_empty() {
            self.push(depth, format!("<{tag}{} />", attr_list(attrs)));
            return;
        }
        self.push(depth, format!("<{tag}{}>", attr_list(attrs)));
        for child in &node.children {
            self.render_node(child, depth + 1);
        }
        self.push(depth, format!("</{tag}>"));
    }

    fn render_kind(&mut self, node: &Node, depth: usize) {
        let mut attrs = self.base_attrs(node);
        match &node.kind {
            NodeKind::Container | NodeKind::Stack | NodeKind::Grid => self.view(node, &attrs, depth),
            NodeKind::Card => {
                let tag = self.uses("View");
                self.push(depth, format!("<{tag}{}>", attr_list(&attrs)));
                if let Some(title) = node.prop_str("title") {
                    self.text(depth + 1, &["style={{ fontSize: 18, fontWeight: \"600\" }}".to_string()], title);
                }
                for child in &node.children {
                    self.render_node(child, depth + 1);
                }
                self.push(depth, format!("</{tag}>"));
            }
            NodeKind::Text => self.text(depth, &attrs, node.prop_str("text").unwrap_or_default()),
            NodeKind::Heading => {
                attrs.insert(0, str_attr("accessibilityRole", "header"));
                self.text(depth, &attrs, node.prop_str("text").unwrap_or_default());
            }
            NodeKind::Button => {
                attrs.insert(0, str_attr("accessibilityRole", "button"));
                if let Some(press) = self.press_expr(node) {
                    attrs.push(format!("onPress={{() => {press}}}"));
                }
                if node.prop_bool("disabled") == Some(true) {
                    attrs.push("disabled".to_string());
                }
                let tag = self.uses("Pressable");
                self.push(depth, format!("<{tag}{}>", attr_list(&attrs)));
                self.text(depth + 1, &[], node.prop_str("label").unwrap_or_default());
                self.push(depth, format!("</{tag}>"));
            }
            NodeKind::Link => {
                let href = node.prop_str("href").unwrap_or("/");
                let external = node.prop_bool("external") == Some(true) || href.contains("://");
                let press = match self.press_expr(node) {
                    Some(press) => press,
                    None if external => {
                        self.uses("Linking");
                        format!("Linking.openURL({})", js_string(href))
                    }
                    None => format!("onNavigate?.({})", js_string(href)),
                };
                attrs.insert(0, str_attr("accessibilityRole", "link"));
                attrs.push(format!("onPress={{() => {press}}}"));
                let tag = self.uses("Pressable");
                self.push(depth, format!("<{tag}{}>", attr_list(&attrs)));
                self.text(depth + 1, &[], node.prop_str("text").unwrap_or_default());
                self.push(depth, format!("</{tag}>"));
            }
            NodeKind::Image => {
                let src = js_string(node.prop_str("src").unwrap_or_default());
                attrs.insert(0, format!("source={{{{ uri: {src} }}}}"));
                if let Some(alt) = node.prop_str("alt") {
                    attrs.push(str_attr("accessibilityLabel", alt));
                }
                if let Some(fit) = node.prop_str("fit") {
                    attrs.push(str_attr("resizeMode", if fit == "fill" { "stretch" } else { fit }));
                }
                let tag = self.uses("Image");
                self.push(depth, format!("<{tag}{} />", attr_list(&attrs)));
            }
            NodeKind::Input | NodeKind::Textarea => self.text_input(node, attrs, depth),
            NodeKind::Select => self.select(node, attrs, depth),
            NodeKind::Checkbox => {
                let key = js_string(checkbox_key(node));
                self.field_keys.insert(checkbox_key(node).to_string());
                if node.prop_bool("checked") == Some(true) {
                    self.initial_state.insert(checkbox_key(node).to_string(), Value::Bool(true));
                }
                let mut on_change = format!("setState((prev) => ({{ ...prev, [{key}]: value }}))");
                if let Some(extra) = self.change_expr(node, "value") {
                    on_change = format!("{{ {on_change}; {extra}; }}");
                }
                let view = self.uses("View");
                let switch = self.uses("Switch");
                self.push(depth, format!("<{view}{}>", attr_list(&attrs)));
                self.push(
                    depth + 1,
                    format!("<{switch} value={{Boolean(state[{key}])}} onValueChange={{(value) => {on_change}}} />"),
                );
                self.text(depth + 1, &[], node.prop_str("label").unwrap_or_default());
                self.push(depth, format!("</{view}>"));
            }
            NodeKind::Divider | NodeKind::Spacer => {
                let tag = self.uses("View");
                self.push(depth, format!("<{tag}{} />", attr_list(&attrs)));
            }
            NodeKind::List => self.list(node, &attrs, depth),
            NodeKind::Form => {
                let tag = self.uses("View");
                self.push(depth, format!("<{tag}{}>", attr_list(&attrs)));
                for child in &node.children {
                    self.render_node(child, depth + 1);
                }
                if let Some(label) = node.prop_str("submitLabel") {
                    let pressable = self.uses("Pressable");
                    let payload = if self.has_state() { "state" } else { "{}" };
                    let submit = match node.prop_str("action") {
                        Some(action) => format!(
                            "fetch({}, {{ method: {}, headers: {{ \"Content-Type\": \"application/json\" }}, body: JSON.stringify({payload}) }})",
                            js_string(action),
                            js_string(&node.prop_str("method").unwrap_or("post").to_uppercase()),
                        ),
                        None => format!("handlers.submit?.({payload})"),
                    };
                    self.push(
                        depth + 1,
                        format!("<{pressable} accessibilityRole=\"button\" onPress={{() => {submit}}}>"),
                    );
                    self.text(depth + 2, &[], label);
                    self.push(depth + 1, format!("</{pressable}>"));
                }
                self.push(depth, format!("</{tag}>"));
            }
            NodeKind::ComponentRef => {
                let tag = self.uses("View");
                attrs.insert(0, str_attr("accessibilityRole", "alert"));
                self.push(depth, format!("<{tag}{}>", attr_list(&attrs)));
                self.text(depth + 1, &["style={{ color: \"#dc2626\" }}".to_string()], &diagnostic_text(node));
                self.push(depth, format!("</{tag}>"));
            }
            NodeKind::Other(tag) => self.external(node, tag, attrs, depth),
        }
    }

    fn text_input(&mut self, node: &Node, wrapper: Vec<String>, depth: usize) {
        let mut attrs = Vec::new();
        if let Some(placeholder) = node.prop_str("placeholder") {
            attrs.push(str_attr("placeholder", placeholder));
        }
        if let Some(default) = node.prop_str("defaultValue") {
            attrs.push(str_attr("defaultValue", default));
        }
        match node.prop_str("inputType") {
            Some("password") => attrs.push("secureTextEntry".to_string()),
            Some("email") => attrs.push(str_attr("keyboardType", "email-address")),
            Some("number") => attrs.push(str_attr("keyboardType", "numeric")),
            Some("tel") => attrs.push(str_attr("keyboardType", "phone-pad")),
            Some("url") => attrs.push(str_attr("keyboardType", "url")),
            _ => {}
        }
        if node.kind == NodeKind::Textarea {
            attrs.push("multiline".to_string());
            if let Some(rows) = node.prop_f64("rows") {
                attrs.push(expr_attr("numberOfLines", &format_number(rows.round())));
            }
        }
        if node.prop_bool("disabled") == Some(true) {
            attrs.push(expr_attr("editable", "false"));
        }
        let mut on_change = Vec::new();
        if let Some(name) = node.prop_str("name") {
            self.field_keys.insert(name.to_string());
            on_change.push(format!("setState((prev) => ({{ ...prev, [{}]: value }}))", js_string(name)));
        }
        on_change.extend(self.change_expr(node, "value"));
        match on_change.as_slice() {
            [] => {}
            [single] => attrs.push(format!("onChangeText={{(value) => {single}}}")),
            many => attrs.push(format!("onChangeText={{(value) => {{ {}; }}}}", many.join("; "))),
        }
        let tag = self.uses("TextInput");
        match node.prop_str("label") {
            Some(label) => {
                let view = self.uses("View");
                self.push(depth, format!("<{view}{}>", attr_list(&wrapper)));
                self.text(depth + 1, &[], label);
                self.push(depth + 1, format!("<{tag}{} />", attr_list(&attrs)));
                self.push(depth, format!("</{view}>"));
            }
            None => {
                let mut merged = wrapper;
                merged.extend(attrs);
                self.push(depth, format!("<{tag}{} />", attr_list(&merged)));
            }
        }
    }

    fn select(&mut self, node: &Node, attrs: Vec<String>, depth: usize) {
        let view = self.uses("View");
        self.push(depth, format!("<{view}{}>", attr_list(&attrs)));
        if let Some(label) = node.prop_str("label") {
            self.text(depth + 1, &[], label);
        }
        for (label, value) in select_options(node) {
            let pressable = self.uses("Pressable");
            let literal = js_string(&value);
            match self.change_expr(node, &literal) {
                Some(change) => self.push(depth + 1, format!("<{pressable} onPress={{() => {change}}}>")),
                None => self.push(depth + 1, format!("<{pressable}>")),
            }
            self.text(depth + 2, &[], &label);
            self.push(depth + 1, format!("</{pressable}>"));
        }
        self.push(depth, format!("</{view}>"));
    }

    fn list(&mut self, node: &Node, attrs: &[String], depth: usize) {
        let view = self.uses("View");
        let ordered = node.prop_bool("ordered") == Some(true);
        let empty_text = node.prop_str("emptyText");
        self.push(depth, format!("<{view}{}>", attr_list(attrs)));
        match DataBinding::of(node) {
            Some(DataBinding::Inline(items)) => {
                if items.is_empty() {
                    if let Some(empty) = empty_text {
                        self.text(depth + 1, &[], empty);
                    }
                }
                for (index, item) in items.iter().enumerate() {
                    let label = if ordered {
                        format!("{}. {}", index + 1, item_label(item))
                    } else {
                        item_label(item)
                    };
                    self.text(depth + 1, &[format!("key={{{index}}}")], &label);
                }
            }
            Some(binding @ DataBinding::Remote { .. }) => {
                let items = items_ident(&node.id);
                let text = self.uses("Text");
                if let Some(empty) = empty_text {
                    self.push(
                        depth + 1,
                        format!("{{{items}.length === 0 && <{text}>{}</{text}>}}", text_child(empty)),
                    );
                }
                let field = binding.label_field().map(js_string).unwrap_or_else(|| "undefined".into());
                self.push(
                    depth + 1,
                    format!("{{{items}.map((item, index) => <{text} key={{index}}>{{itemLabel(item, {field})}}</{text}>)}}"),
                );
            }
            None => {}
        }
        for child in &node.children {
            self.render_node(child, depth + 1);
        }
        self.push(depth, format!("</{view}>"));
    }

    fn external(&mut self, node: &Node, tag: &str, mut attrs: Vec<String>, depth: usize) {
        let config = self.config;
        let Some(component) = config.component_library.get(tag) else {
            let view = self.uses("View");
            self.push(depth, format!("<{view}{}>", attr_list(&attrs)));
            self.push(depth + 1, format!("{{/* Unsupported component: {} */}}", comment_text(tag)));
            for child in &node.children {
                self.render_node(child, depth + 1);
            }
            self.push(depth, format!("</{view}>"));
            return;
        };

        let export = component.name.clone().unwrap_or_else(|| tag.to_string());
        self.library_imports
            .entry(component.import.clone())
            .or_default()
            .insert(export.clone());
        for (prop, value) in visible_props(node) {
            let name = component.props.get(prop).map(String::as_str).unwrap_or(prop);
            attrs.push(value_attr(name, value));
        }
        match DataBinding::of(node) {
            Some(DataBinding::Inline(items)) if node.data_source.is_some() => {
                attrs.push(expr_attr("data", &Value::Array(items).to_string()));
            }
            Some(DataBinding::Remote { .. }) => attrs.push(expr_attr("data", &items_ident(&node.id))),
            _ => {}
        }
        if node.children.is_empty() {
            self.push(depth, format!("<{export}{} />", attr_list(&attrs)));
        } else {
            self.push(depth, format!("<{export}{}>", attr_list(&attrs)));
            for child in &node.children {
                self.render_node(child, depth + 1);
            }
            self.push(depth, format!("</{export}>"));
        }
    }

    fn assemble(mut self, name: &str, spec: &ScreenSpec) -> String {
        let features = self.features;
        let remote = !features.remote_lists.is_empty();
        let has_state = self.has_state();
        let styled = !self.styles.is_empty() || !self.tablet_styles.is_empty() || !self.mobile_styles.is_empty();
        if styled {
            self.components.insert("StyleSheet");
        }
        if features.responsive {
            self.components.insert("useWindowDimensions");
        }
        let navigates = features.navigates
            || spec.tree.walk().any(|n| {
                n.kind == NodeKind::Link
                    && !(n.prop_bool("external") == Some(true) || n.prop_str("href").unwrap_or("/").contains("://"))
                    && n.interactions.on_click.is_none()
            });
        let callbacks = features.has_callbacks();

        let mut lines = vec![format!("// {GENERATED_MARKER}"), String::new()];
        let mut react_imports = Vec::new();
        if remote {
            react_imports.push("useEffect");
        }
        if has_state || remote {
            react_imports.push("useState");
        }
        if !react_imports.is_empty() {
            lines.push(format!("import {{ {} }} from \"react\";", react_imports.join(", ")));
        }
        let components: Vec<&str> = self.components.iter().copied().collect();
        lines.push(format!("import {{ {} }} from \"react-native\";", components.join(", ")));
        for (path, names) in &self.library_imports {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            lines.push(format!("import {{ {} }} from {};", names.join(", "), js_string(path)));
        }
        lines.push(String::new());

        if remote {
            lines.extend(ITEM_LABEL_HELPER.lines().map(str::to_string));
            lines.push(String::new());
        }

        let mut params = Vec::new();
        if navigates || callbacks {
            lines.push(format!("export interface {name}Props {{"));
            if navigates {
                lines.push("  onNavigate?: (route: string) => void;".to_string());
                params.push("onNavigate");
            }
            if callbacks {
                lines.push("  handlers?: Record<string, (value?: unknown) => void>;".to_string());
                params.push("handlers = {}");
            }
            lines.push("}".to_string());
            lines.push(String::new());
            lines.push(format!(
                "export default function {name}({{ {} }}: {name}Props) {{",
                params.join(", ")
            ));
        } else {
            lines.push(format!("export default function {name}() {{"));
        }

        if features.responsive {
            lines.push("  const { width } = useWindowDimensions();".to_string());
            lines.push(format!("  const isTablet = width <= {};", Breakpoint::Tablet.max_width()));
            lines.push(format!("  const isMobile = width <= {};", Breakpoint::Mobile.max_width()));
        }
        if has_state {
            let initial: Vec<String> = self
                .initial_state
                .iter()
                .map(|(key, value)| format!("{}: {value}", js_string(key)))
                .collect();
            let initial = if initial.is_empty() {
                "{}".to_string()
            } else {
                format!("{{ {} }}", initial.join(", "))
            };
            lines.push(format!("  const [state, setState] = useState<Record<string, unknown>>({initial});"));
        }
        for id in &features.remote_lists {
            lines.extend(remote_effect(id, spec));
        }
        if features.responsive || has_state || remote {
            lines.push(String::new());
        }

        match &spec.tree.interactions.visible_when {
            Some(condition) => {
                lines.push(format!("  return {} ? (", condition_expr(condition)));
                lines.append(&mut self.body);
                lines.push("  ) : null;".to_string());
            }
            None => {
                lines.push("  return (".to_string());
                lines.append(&mut self.body);
                lines.push("  );".to_string());
            }
        }
        lines.push("}".to_string());

        for (table, entries) in [
            ("styles", &self.styles),
            ("tabletStyles", &self.tablet_styles),
            ("mobileStyles", &self.mobile_styles),
        ] {
            if entries.is_empty() {
                continue;
            }
            lines.push(String::new());
            lines.push(format!("const {table} = StyleSheet.create({{"));
            for (id, declarations) in entries {
                let body: Vec<String> = declarations
                    .iter()
                    .map(|(key, value)| format!("{key}: {}", value.to_js()))
                    .collect();
                lines.push(format!("  {}: {{ {} }},", js_string(id), body.join(", ")));
            }
            lines.push("});".to_string());
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn emit(tree: Value, config: &BackendConfig) -> EmitOutput {
        let spec = ScreenSpec::from_value(json!({"version": 1, "route": "/checkout", "tree": tree})).unwrap();
        ReactNativeBackend::new().emit_screen(&spec, config).unwrap()
    }

    #[test]
    fn test_stylesheet_and_responsive() {
        let output = emit(
            json!({
                "id": "root", "type": "Stack",
                "style": {"padding": 24, "paddingX": 8, "fontWeight": "bold"},
                "responsive": {"mobile": {"padding": 12}},
                "children": [{"id": "title", "type": "Heading", "props": {"text": "Checkout", "level": 1}}]
            }),
            &BackendConfig::default(),
        );

        assert_eq!(output.files[0].path, "screens/CheckoutScreen.tsx");
        let content = &output.files[0].content;
        assert!(content.contains(
            "import { StyleSheet, Text, View, useWindowDimensions } from \"react-native\";"
        ));
        assert!(content.contains("const isMobile = width <= 768;"));
        assert!(content.contains(r#"<View style={[styles["root"], isMobile && mobileStyles["root"]]}>"#));
        assert!(content.contains(r#"  "root": { padding: 24, paddingHorizontal: 8, fontWeight: "700" },"#));
        assert!(content.contains(r#"  "title": { fontSize: 32, fontWeight: "700" },"#));
        assert!(content.contains(r#"<Text accessibilityRole="header" style={styles["title"]}>{"Checkout"}</Text>"#));
    }

    #[test]
    fn test_navigation_uses_callback() {
        let output = emit(
            json!({
                "id": "root", "type": "Stack",
                "children": [
                    {"id": "pay", "type": "Button", "props": {"label": "Pay"},
                     "interactions": {"onClick": {"action": "navigate", "target": "/done"}}},
                    {"id": "terms", "type": "Link", "props": {"text": "Terms", "href": "https://x.test/terms"}}
                ]
            }),
            &BackendConfig::default(),
        );
        let content = &output.files[0].content;
        assert!(content.contains("export default function CheckoutScreen({ onNavigate }: CheckoutScreenProps) {"));
        assert!(content.contains(r#"<Pressable accessibilityRole="button" onPress={() => onNavigate?.("/done")}>"#));
        assert!(content.contains(r#"onPress={() => Linking.openURL("https://x.test/terms")}"#));
        assert!(content.contains("Linking"));
    }

    #[test]
    fn test_checkbox_seeds_state() {
        let output = emit(
            json!({"id": "news", "type": "Checkbox", "props": {"name": "newsletter", "label": "News", "checked": true}}),
            &BackendConfig::default(),
        );
        let content = &output.files[0].content;
        assert!(content.contains(r#"useState<Record<string, unknown>>({ "newsletter": true });"#));
        assert!(content.contains(
            r#"<Switch value={Boolean(state["newsletter"])} onValueChange={(value) => setState((prev) => ({ ...prev, ["newsletter"]: value }))} />"#
        ));
    }

    #[test]
    fn test_form_collects_named_inputs() {
        let output = emit(
            json!({
                "id": "signup", "type": "Form", "props": {"submitLabel": "Join"},
                "children": [{"id": "email", "type": "Input", "props": {"name": "email", "inputType": "email"}}]
            }),
            &BackendConfig::default(),
        );
        let content = &output.files[0].content;
        assert!(content.contains(
            r#"<TextInput keyboardType="email-address" onChangeText={(value) => setState((prev) => ({ ...prev, ["email"]: value }))} />"#
        ));
        assert!(content.contains(r#"onPress={() => handlers.submit?.(state)}"#));
        assert!(content.contains("handlers?: Record<string, (value?: unknown) => void>;"));
    }

    #[test]
    fn test_unsupported_component_comment() {
        let output = emit(
            json!({"id": "root", "type": "Stack", "children": [{"id": "m", "type": "StoreMap"}]}),
            &BackendConfig::default(),
        );
        assert!(output.files[0].content.contains("{/* Unsupported component: StoreMap */}"));
    }

    #[test]
    fn test_barrel_path() {
        let file = ReactNativeBackend::new()
            .emit_barrel_index(&["CheckoutScreen".to_string()], &BackendConfig::default())
            .unwrap();
        assert_eq!(file.path, "screens/index.ts");
        assert!(file.content.contains("export { default as CheckoutScreen } from \"./CheckoutScreen\";"));
    }
}
