//! Writing declarations into a style bundle.

use std::rc::Rc;

use css_properties::{
    EnumKind, NativeCursor, PropertyCache, StyleEnum, StylePropertyId, ValueKind, WhiteSpace,
};
use css_stylesheet::{StyleProperty, StyleSheet};
use css_values::{
    Background, Cursor, FontHandle, ImageHandle, Length, StyleKeyword, StyleValue,
    StyleValueKeyword, StyleValueType,
};
use css_variables::{
    MAX_RESOLVES, ResolveResult, StylePropertyValue, SyntaxCache, VariableContext,
    VariableResolver,
};
use log::{trace, warn};

use crate::{CopyMode, ResourceProvider, StylePropertyReader, StylesData};

const CASCADE: CopyMode = CopyMode::CopyIfEqualOrGreaterSpecificity;

/// Value positions feeding top, right, bottom and left for 1 to 4 values.
const SIDE_SOURCES: [[usize; 4]; 4] = [[0, 0, 0, 0], [0, 1, 0, 1], [0, 1, 2, 1], [0, 1, 2, 3]];

/// Everything property application reads besides the declaration itself.
pub struct ApplyContext<'ctx> {
    pub properties: &'ctx mut PropertyCache,
    pub syntax: &'ctx mut SyntaxCache,
    pub variables: &'ctx VariableContext,
    pub resources: &'ctx dyn ResourceProvider,
    pub dpi_scale: f32,
    pub max_variable_resolves: usize,
}

impl<'ctx> ApplyContext<'ctx> {
    pub fn new(
        properties: &'ctx mut PropertyCache,
        syntax: &'ctx mut SyntaxCache,
        variables: &'ctx VariableContext,
        resources: &'ctx dyn ResourceProvider,
    ) -> Self {
        Self {
            properties,
            syntax,
            variables,
            resources,
            dpi_scale: 1.0,
            max_variable_resolves: MAX_RESOLVES,
        }
    }

    /// Scale passed to [`ResourceProvider::load_image`].
    #[must_use]
    pub fn with_dpi_scale(mut self, dpi_scale: f32) -> Self {
        self.dpi_scale = dpi_scale;
        self
    }

    /// Lookup budget for each declaration's `var()` substitution.
    #[must_use]
    pub fn with_max_variable_resolves(mut self, max_variable_resolves: usize) -> Self {
        self.max_variable_resolves = max_variable_resolves;
        self
    }
}

/// Apply every declaration of a rule, in order, at `specificity`.
pub fn apply_rule(
    ctx: &mut ApplyContext<'_>,
    sheet: &Rc<StyleSheet>,
    rule_index: usize,
    specificity: i32,
    target: &mut StylesData,
) {
    let ids = ctx.properties.property_ids(sheet, rule_index);
    let Some(rule) = sheet.rule(rule_index) else {
        return;
    };
    for (property, &id) in rule.properties.iter().zip(ids.iter()) {
        apply_style_property(ctx, sheet, id, property, specificity, target);
    }
}

/// Apply one declaration to `target`, keeping fields set at a higher
/// specificity.
///
/// Unknown and custom properties are skipped. Values using `var()` are
/// substituted first; if that fails every longhand of the property becomes
/// `unset`. A lone CSS-wide keyword is written to every longhand.
pub fn apply_style_property(
    ctx: &mut ApplyContext<'_>,
    sheet: &Rc<StyleSheet>,
    id: StylePropertyId,
    property: &StyleProperty,
    specificity: i32,
    target: &mut StylesData,
) {
    match id.value_kind() {
        ValueKind::Unknown => {
            trace!("Skipping unknown property '{}' at line {}", property.name, property.line);
            return;
        }
        ValueKind::Custom => {
            trace!("'{}' binds a variable, nothing to apply", property.name);
            return;
        }
        _ => {}
    }

    let values = if property.requires_variable_resolution {
        let mut resolver = VariableResolver::new(ctx.variables, ctx.syntax)
            .with_max_resolves(ctx.max_variable_resolves);
        let result = resolver.resolve(id, sheet, &property.values);
        if result != ResolveResult::Valid {
            warn!(
                "Could not resolve variables of '{}' at line {} ({result:?}), treating it as unset",
                property.name, property.line
            );
            write_all(id, StyleValue::Keyword(StyleKeyword::Unset), specificity, target);
            return;
        }
        resolver.into_values()
    } else {
        property
            .values
            .iter()
            .map(|&handle| StylePropertyValue::new(sheet, handle))
            .collect()
    };

    let reader = StylePropertyReader::new(id, &values);
    if reader.is_empty() {
        warn!("'{}' at line {} has no value", property.name, property.line);
        return;
    }
    if let Some(keyword) = reader.css_wide_keyword() {
        write_all(id, StyleValue::Keyword(keyword.into()), specificity, target);
        return;
    }

    match id.value_kind() {
        ValueKind::Shorthand if id == StylePropertyId::Flex => apply_flex(&reader, specificity, target),
        ValueKind::Shorthand => apply_four_sides(ctx, &reader, specificity, target),
        ValueKind::Font => apply_font(ctx, &reader, specificity, target),
        ValueKind::Background => apply_background(ctx, &reader, specificity, target),
        ValueKind::Cursor => apply_cursor(ctx, &reader, specificity, target),
        _ => {
            if let Some(value) = read_value(ctx, id, &reader, 0) {
                target.set(id, value, specificity, CASCADE);
            }
        }
    }
}

fn write_all(id: StylePropertyId, value: StyleValue, specificity: i32, target: &mut StylesData) {
    for &longhand in id.longhands() {
        target.set(longhand, value, specificity, CASCADE);
    }
}

/// Value of a scalar longhand from the value at `index`.
fn read_value(
    ctx: &mut ApplyContext<'_>,
    id: StylePropertyId,
    reader: &StylePropertyReader<'_>,
    index: usize,
) -> Option<StyleValue> {
    match id.value_kind() {
        ValueKind::Float => Some(StyleValue::Float(reader.read_float(index))),
        ValueKind::Int => Some(StyleValue::Int(reader.read_int(index))),
        ValueKind::Length => Some(reader.read_length(index)),
        ValueKind::Color => Some(StyleValue::Color(reader.read_color(index))),
        ValueKind::Enum(kind) => read_enum(ctx, id, kind, reader, index),
        ValueKind::Font
        | ValueKind::Background
        | ValueKind::Cursor
        | ValueKind::Shorthand
        | ValueKind::Custom
        | ValueKind::Unknown => None,
    }
}

fn read_enum(
    ctx: &mut ApplyContext<'_>,
    id: StylePropertyId,
    kind: EnumKind,
    reader: &StylePropertyReader<'_>,
    index: usize,
) -> Option<StyleValue> {
    // `word-wrap: true | false` predates `white-space`.
    if kind == EnumKind::WhiteSpace {
        match reader.keyword(index) {
            Some(StyleValueKeyword::True) => return Some(StyleValue::Enum(WhiteSpace::Normal.to_int())),
            Some(StyleValueKeyword::False) => return Some(StyleValue::Enum(WhiteSpace::NoWrap.to_int())),
            _ => {}
        }
    }
    let value = reader.get(index)?;
    let parsed = ctx.properties.enum_value_of(kind, &value.sheet, value.handle);
    if parsed.is_none() {
        warn!(
            "'{}' is not a valid value for '{}'",
            value.sheet.describe(value.handle),
            id.name()
        );
    }
    parsed.map(StyleValue::Enum)
}

fn apply_four_sides(
    ctx: &mut ApplyContext<'_>,
    reader: &StylePropertyReader<'_>,
    specificity: i32,
    target: &mut StylesData,
) {
    let id = reader.property();
    if reader.len() > 4 {
        warn!("'{}' takes at most four values, ignoring the rest", id.name());
    }
    let Some(sources) = SIDE_SOURCES.get(reader.len().min(4).saturating_sub(1)) else {
        return;
    };
    for (&longhand, &source) in id.longhands().iter().zip(sources) {
        if let Some(value) = read_value(ctx, longhand, reader, source) {
            target.set(longhand, value, specificity, CASCADE);
        }
    }
}

/// Grow, shrink and basis of a `flex` shorthand.
///
/// `auto` is `1 1 auto`, `none` is `0 0 auto`, a lone number is
/// `<grow> 1 0`, a lone length is `1 1 <basis>`. With two values the second
/// is the shrink factor if it is a number and the basis otherwise.
fn flex_values(reader: &StylePropertyReader<'_>) -> (f32, f32, StyleValue) {
    const AUTO: StyleValue = StyleValue::Keyword(StyleKeyword::Auto);
    const ZERO: StyleValue = StyleValue::Length(Length::zero());
    let is_number = |index: usize| reader.value_type(index) == StyleValueType::Float;
    match reader.len() {
        1 => match reader.keyword(0) {
            Some(StyleValueKeyword::Auto) => (1.0, 1.0, AUTO),
            Some(StyleValueKeyword::None) => (0.0, 0.0, AUTO),
            _ if is_number(0) => (reader.read_float(0), 1.0, ZERO),
            _ => (1.0, 1.0, reader.read_length(0)),
        },
        2 if is_number(1) => (reader.read_float(0), reader.read_float(1), ZERO),
        2 => (reader.read_float(0), 1.0, reader.read_length(1)),
        count => {
            if count > 3 {
                warn!("'flex' takes at most three values, ignoring the rest");
            }
            (reader.read_float(0), reader.read_float(1), reader.read_length(2))
        }
    }
}

fn apply_flex(reader: &StylePropertyReader<'_>, specificity: i32, target: &mut StylesData) {
    let (grow, shrink, basis) = flex_values(reader);
    target.set(StylePropertyId::FlexGrow, StyleValue::Float(grow), specificity, CASCADE);
    target.set(StylePropertyId::FlexShrink, StyleValue::Float(shrink), specificity, CASCADE);
    target.set(StylePropertyId::FlexBasis, basis, specificity, CASCADE);
}

fn load_font(ctx: &ApplyContext<'_>, reader: &StylePropertyReader<'_>, index: usize) -> Option<FontHandle> {
    let path = reader.read_path(index)?;
    let font = if reader.value_type(index) == StyleValueType::MissingAssetReference {
        None
    } else {
        ctx.resources.load_font(path)
    };
    if font.is_none() {
        warn!("Font '{path}' used by '{}' could not be loaded", reader.property().name());
    }
    font
}

fn load_image(ctx: &ApplyContext<'_>, reader: &StylePropertyReader<'_>, index: usize) -> Option<ImageHandle> {
    let path = reader.read_path(index)?;
    let image = if reader.value_type(index) == StyleValueType::MissingAssetReference {
        None
    } else {
        ctx.resources.load_image(path, ctx.dpi_scale)
    };
    if image.is_none() {
        warn!("Image '{path}' used by '{}' could not be loaded", reader.property().name());
    }
    image
}

/// Missing fonts leave the field untouched.
fn apply_font(ctx: &ApplyContext<'_>, reader: &StylePropertyReader<'_>, specificity: i32, target: &mut StylesData) {
    let id = StylePropertyId::UnityFont;
    if reader.keyword(0) == Some(StyleValueKeyword::None) {
        target.set(id, StyleValue::Keyword(StyleKeyword::None), specificity, CASCADE);
    } else if let Some(font) = load_font(ctx, reader, 0) {
        target.set(id, StyleValue::Font(font), specificity, CASCADE);
    }
}

/// Missing images are replaced by [`ImageHandle::MISSING`].
fn apply_background(
    ctx: &ApplyContext<'_>,
    reader: &StylePropertyReader<'_>,
    specificity: i32,
    target: &mut StylesData,
) {
    let image = if reader.keyword(0) == Some(StyleValueKeyword::None) {
        None
    } else {
        Some(load_image(ctx, reader, 0).unwrap_or(ImageHandle::MISSING))
    };
    target.set(
        StylePropertyId::BackgroundImage,
        StyleValue::Background(Background { image }),
        specificity,
        CASCADE,
    );
}

/// `cursor: <image> [<x> <y>]?` or a built-in cursor name. A texture that
/// fails to load falls back to the default cursor.
fn apply_cursor(ctx: &ApplyContext<'_>, reader: &StylePropertyReader<'_>, specificity: i32, target: &mut StylesData) {
    let cursor = match reader.value_type(0) {
        StyleValueType::ResourcePath
        | StyleValueType::AssetReference
        | StyleValueType::MissingAssetReference => {
            let hotspot = if reader.len() >= 3 {
                (reader.read_float(1), reader.read_float(2))
            } else {
                (0.0, 0.0)
            };
            Cursor {
                texture: load_image(ctx, reader, 0),
                hotspot,
                default_cursor_id: 0,
            }
        }
        _ => {
            let Some(native) = reader.ident(0).and_then(NativeCursor::from_ident) else {
                warn!("Unknown cursor '{}'", reader.get(0).map(|value| value.sheet.describe(value.handle)).unwrap_or_default());
                return;
            };
            Cursor {
                texture: None,
                hotspot: (0.0, 0.0),
                default_cursor_id: native.to_int(),
            }
        }
    };
    target.set(StylePropertyId::Cursor, StyleValue::Cursor(cursor), specificity, CASCADE);
}
