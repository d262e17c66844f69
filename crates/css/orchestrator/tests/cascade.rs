#![cfg(test)]

use std::rc::Rc;

use anyhow::{Context as _, Result, bail};
use css_cascade::{LayoutLength, ResourceProvider, StylesData};
use css_orchestrator::{CascadeConfig, CascadeEngine, DirtyFlags, Element, ElementId, ElementTree};
use css_properties::StylePropertyId;
use css_selectors::PseudoStates;
use css_values::{Color, FontHandle, ImageHandle, Length, StyleKeyword, StyleValue};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A `Root` element with `css` attached and one child per entry of `types`.
///
/// # Errors
/// Returns an error if `css` does not import.
fn tree_with(css: &str, types: &[&str]) -> Result<(ElementTree, ElementId, Vec<ElementId>)> {
    init_logging();
    let sheet = CascadeEngine::load_style_sheet(css)?;
    let mut tree = ElementTree::new();
    let root = tree.create_element("Root");
    tree.add_style_sheet(root, &sheet);
    let children = types
        .iter()
        .map(|type_name| tree.create_child(root, type_name))
        .collect();
    Ok((tree, root, children))
}

/// # Errors
/// Returns an error if the element has not been styled.
fn computed(tree: &ElementTree, id: ElementId) -> Result<Rc<StylesData>> {
    tree.get(id)
        .and_then(|element| element.computed_styles().map(Rc::clone))
        .context("element has no computed styles")
}

/// # Errors
/// Returns an error if the element has not been styled.
fn shared(tree: &ElementTree, id: ElementId) -> Result<Rc<StylesData>> {
    tree.get(id)
        .and_then(|element| element.shared_styles().map(Rc::clone))
        .context("element has no shared styles")
}

/// # Errors
/// Returns an error if named colors fail to parse.
fn red() -> Result<Color> {
    Color::parse("red").context("red is a color")
}

fn px(value: f32) -> StyleValue {
    StyleValue::Length(Length::pixels(value))
}

struct FontsOnly;

impl ResourceProvider for FontsOnly {
    fn load_font(&self, path: &str) -> Option<FontHandle> {
        (path == "Fonts/Main").then_some(FontHandle(7))
    }

    fn load_image(&self, _path: &str, _dpi_scale: f32) -> Option<ImageHandle> {
        None
    }
}

#[test]
fn equal_rule_sets_share_one_bundle() -> Result<()> {
    let (mut tree, root, children) = tree_with(
        "Button { width: 10px; } .primary { color: red; }",
        &["Button", "Button", "Label"],
    )?;
    for &child in &children {
        tree.add_class(child, "primary");
    }
    let mut engine = CascadeEngine::default();
    engine.apply_styles(&mut tree, root);

    assert!(Rc::ptr_eq(&shared(&tree, children[0])?, &shared(&tree, children[1])?));
    assert!(!Rc::ptr_eq(&shared(&tree, children[0])?, &shared(&tree, children[2])?));
    assert!(shared(&tree, children[0])?.is_shared());
    assert_eq!(engine.stats().cache_hits, 1);
    Ok(())
}

#[test]
fn sharing_can_be_disabled() -> Result<()> {
    let (mut tree, root, children) = tree_with("Button { width: 10px; }", &["Button", "Button"])?;
    let mut engine = CascadeEngine::new(CascadeConfig::default().with_share_styles(false));
    engine.apply_styles(&mut tree, root);

    assert!(!Rc::ptr_eq(&shared(&tree, children[0])?, &shared(&tree, children[1])?));
    assert_eq!(computed(&tree, children[1])?.width(), px(10.0));
    assert_eq!(engine.cached_style_count(), 0);
    Ok(())
}

#[test]
fn specificity_decides_before_order() -> Result<()> {
    let (mut tree, root, children) = tree_with(
        "#ok { width: 1px; } .primary { width: 3px; height: 3px; } Button { width: 2px; height: 2px; }",
        &["Button"],
    )?;
    tree.set_name(children[0], Some("ok"));
    tree.add_class(children[0], "primary");
    let mut engine = CascadeEngine::default();
    engine.apply_styles(&mut tree, root);

    let styles = computed(&tree, children[0])?;
    assert_eq!(styles.width(), px(1.0));
    assert_eq!(styles.height(), px(3.0));
    Ok(())
}

#[test]
fn later_rules_win_ties() -> Result<()> {
    let (mut tree, root, children) = tree_with(".b { width: 2px; } .a { width: 1px; }", &["Button", "Label"])?;
    tree.add_class(children[0], "a");
    tree.add_class(children[0], "b");

    let nested = CascadeEngine::load_style_sheet(".b { width: 5px; }")?;
    tree.add_style_sheet(children[1], &nested);
    tree.add_class(children[1], "b");

    let mut engine = CascadeEngine::default();
    engine.apply_styles(&mut tree, root);
    assert_eq!(computed(&tree, children[0])?.width(), px(1.0));
    assert_eq!(computed(&tree, children[1])?.width(), px(5.0));
    Ok(())
}

#[test]
fn variables_resolve_through_ancestors() -> Result<()> {
    let (mut tree, root, children) = tree_with(
        "Root { --x: 10px; } Button { width: var(--x); height: var(--undefined, 5px); }",
        &["Button"],
    )?;
    let mut engine = CascadeEngine::default();
    engine.apply_styles(&mut tree, root);

    let styles = computed(&tree, children[0])?;
    assert_eq!(styles.width(), px(10.0));
    assert_eq!(styles.height(), px(5.0));
    Ok(())
}

#[test]
fn self_referencing_variables_unset_the_property() -> Result<()> {
    let (mut tree, root, children) = tree_with(
        "Button { --a: var(--a); width: var(--a); min-width: 4px; }",
        &["Button"],
    )?;
    let mut engine = CascadeEngine::default();
    engine.apply_styles(&mut tree, root);

    assert_eq!(
        shared(&tree, children[0])?.width(),
        StyleValue::Keyword(StyleKeyword::Unset)
    );
    let styles = computed(&tree, children[0])?;
    assert_eq!(styles.width(), StyleValue::Keyword(StyleKeyword::Auto));
    assert_eq!(styles.value(StylePropertyId::MinWidth), px(4.0));
    Ok(())
}

#[test]
fn inherited_variables_split_the_cache() -> Result<()> {
    let (mut tree, root, panels) = tree_with(
        ".a { --x: 10px; } .b { --x: 20px; } Button { width: var(--x); }",
        &["Panel", "Panel"],
    )?;
    tree.add_class(panels[0], "a");
    tree.add_class(panels[1], "b");
    let first = tree.create_child(panels[0], "Button");
    let second = tree.create_child(panels[1], "Button");
    let mut engine = CascadeEngine::default();
    engine.apply_styles(&mut tree, root);

    assert_eq!(computed(&tree, first)?.width(), px(10.0));
    assert_eq!(computed(&tree, second)?.width(), px(20.0));
    assert!(!Rc::ptr_eq(&shared(&tree, first)?, &shared(&tree, second)?));
    Ok(())
}

#[test]
fn inline_variables_shadow_rule_variables() -> Result<()> {
    let (mut tree, root, buttons) = tree_with(
        "Root { --w: 2px; } Button { width: var(--w, 1px); } Label { height: var(--w, 1px); }",
        &["Button", "Button"],
    )?;
    let bound = buttons[0];
    tree.set_inline_style(bound, Some(CascadeEngine::load_inline_style("--w: 42px")?));
    let label = tree.create_child(bound, "Label");
    let mut engine = CascadeEngine::default();
    engine.apply_styles(&mut tree, root);

    assert_eq!(computed(&tree, bound)?.width(), px(42.0));
    assert_eq!(computed(&tree, label)?.height(), px(42.0));
    assert_eq!(computed(&tree, buttons[1])?.width(), px(2.0));
    assert!(!Rc::ptr_eq(&shared(&tree, bound)?, &shared(&tree, buttons[1])?));

    let locals = tree
        .get(bound)
        .map(|element| element.variables().local_variables().to_vec())
        .context("bound button is in the tree")?;
    assert_eq!(locals.len(), 1);
    assert_eq!(locals.first().map(|variable| variable.name.as_str()), Some("--w"));

    tree.set_inline_style(bound, None);
    engine.apply_styles(&mut tree, root);
    assert_eq!(computed(&tree, bound)?.width(), px(2.0));
    assert_eq!(computed(&tree, label)?.height(), px(2.0));
    assert!(Rc::ptr_eq(&shared(&tree, bound)?, &shared(&tree, buttons[1])?));
    Ok(())
}

#[test]
fn variable_budget_comes_from_the_config() -> Result<()> {
    let css = "Root { --a: var(--b); --b: var(--c); --c: 3px; } Button { width: var(--a); }";
    let (mut tree, root, children) = tree_with(css, &["Button"])?;
    let mut engine = CascadeEngine::new(CascadeConfig::default().with_max_variable_resolves(1));
    engine.apply_styles(&mut tree, root);
    assert_eq!(
        shared(&tree, children[0])?.width(),
        StyleValue::Keyword(StyleKeyword::Unset)
    );
    assert_eq!(computed(&tree, children[0])?.width(), StyleValue::Keyword(StyleKeyword::Auto));

    let (mut unbounded_tree, unbounded_root, unbounded) = tree_with(css, &["Button"])?;
    CascadeEngine::default().apply_styles(&mut unbounded_tree, unbounded_root);
    assert_eq!(computed(&unbounded_tree, unbounded[0])?.width(), px(3.0));
    Ok(())
}

#[test]
fn loaded_fonts_are_inherited() -> Result<()> {
    let (mut tree, root, children) = tree_with("Root { -unity-font: resource(\"Fonts/Main\"); }", &["Label"])?;
    let mut engine = CascadeEngine::default().with_resources(FontsOnly);
    engine.apply_styles(&mut tree, root);

    assert_eq!(
        computed(&tree, root)?.font_value(StylePropertyId::UnityFont),
        Some(FontHandle(7))
    );
    assert_eq!(computed(&tree, children[0])?.to_text_style().font, Some(FontHandle(7)));
    Ok(())
}

#[test]
fn removed_sheets_stop_applying() -> Result<()> {
    let (mut tree, root, children) = tree_with("Label { width: 1px; }", &["Button"])?;
    let button = children[0];
    let sheet = CascadeEngine::load_style_sheet("Button { width: 8px; }")?;
    tree.add_style_sheet(button, &sheet);
    let mut engine = CascadeEngine::default();
    engine.apply_styles(&mut tree, root);
    assert_eq!(computed(&tree, button)?.width(), px(8.0));

    tree.remove_style_sheet(button, &sheet);
    assert_eq!(
        tree.get(button).map(Element::dirty_flags),
        Some(DirtyFlags::STYLES)
    );
    assert_eq!(tree.get(button).map(|element| element.style_sheets().len()), Some(0));
    engine.apply_styles(&mut tree, root);
    assert_eq!(computed(&tree, button)?.width(), StyleValue::Keyword(StyleKeyword::Auto));
    Ok(())
}

#[test]
fn clearing_the_style_cache_keeps_applied_styles() -> Result<()> {
    let (mut tree, root, children) = tree_with("Button { width: 10px; }", &["Button"])?;
    let mut engine = CascadeEngine::default();
    engine.apply_styles(&mut tree, root);
    let before = shared(&tree, children[0])?;
    assert_eq!(engine.cached_style_count(), 2);

    engine.clear_style_cache();
    assert_eq!(engine.cached_style_count(), 0);
    assert_eq!(computed(&tree, children[0])?.width(), px(10.0));

    tree.mark_all_dirty();
    engine.reset_stats();
    engine.apply_styles(&mut tree, root);
    assert_eq!(engine.stats().cache_misses, 2);
    assert!(!Rc::ptr_eq(&before, &shared(&tree, children[0])?));
    assert_eq!(computed(&tree, children[0])?.width(), px(10.0));
    assert_eq!(engine.cached_style_count(), 2);
    Ok(())
}

#[test]
fn shorthands_expand_to_longhands() -> Result<()> {
    let (mut tree, root, children) = tree_with(
        "Button { margin: 1px 2px 3px 4px; flex: auto; } Label { margin: 1px 2px; flex: 2; }",
        &["Button", "Label"],
    )?;
    let mut engine = CascadeEngine::default();
    engine.apply_styles(&mut tree, root);

    let button = computed(&tree, children[0])?.to_layout_style();
    assert_eq!(button.margin.top, LayoutLength::Points(1.0));
    assert_eq!(button.margin.right, LayoutLength::Points(2.0));
    assert_eq!(button.margin.bottom, LayoutLength::Points(3.0));
    assert_eq!(button.margin.left, LayoutLength::Points(4.0));
    assert!((button.flex_grow - 1.0).abs() < f32::EPSILON);
    assert!((button.flex_shrink - 1.0).abs() < f32::EPSILON);
    assert_eq!(button.flex_basis, LayoutLength::Auto);

    let label = computed(&tree, children[1])?;
    assert_eq!(label.value(StylePropertyId::MarginBottom), px(1.0));
    assert_eq!(label.value(StylePropertyId::MarginLeft), px(2.0));
    assert_eq!(label.value(StylePropertyId::FlexGrow), StyleValue::Float(2.0));
    assert_eq!(label.value(StylePropertyId::FlexShrink), StyleValue::Float(1.0));
    assert_eq!(label.value(StylePropertyId::FlexBasis), px(0.0));
    Ok(())
}

#[test]
fn restyling_finds_the_cached_bundle() -> Result<()> {
    let (mut tree, root, children) = tree_with("Button { width: 10px; }", &["Button"])?;
    let mut engine = CascadeEngine::default();
    engine.apply_styles(&mut tree, root);
    let before = shared(&tree, children[0])?;
    let cached = engine.cached_style_count();

    tree.mark_all_dirty();
    engine.reset_stats();
    engine.apply_styles(&mut tree, root);

    assert!(Rc::ptr_eq(&before, &shared(&tree, children[0])?));
    assert_eq!(engine.cached_style_count(), cached);
    assert_eq!(engine.stats().cache_misses, 0);
    assert_eq!(engine.stats().cache_hits, 2);
    Ok(())
}

#[test]
fn inline_values_survive_restyles() -> Result<()> {
    let (mut tree, root, children) = tree_with(
        "Button { width: 10px; height: 10px; } .wide { width: 50px; }",
        &["Button"],
    )?;
    let button = children[0];
    tree.set_inline_value(button, StylePropertyId::Width, px(99.0));
    tree.set_inline_style(button, Some(CascadeEngine::load_inline_style("height: 7px")?));
    let mut engine = CascadeEngine::default();
    engine.apply_styles(&mut tree, root);
    assert_eq!(computed(&tree, button)?.width(), px(99.0));
    assert_eq!(computed(&tree, button)?.height(), px(7.0));

    tree.add_class(button, "wide");
    engine.apply_styles(&mut tree, root);
    assert_eq!(computed(&tree, button)?.width(), px(99.0));
    assert_eq!(shared(&tree, button)?.width(), px(50.0));

    tree.clear_inline_values(button);
    tree.set_inline_style(button, None);
    engine.apply_styles(&mut tree, root);
    assert_eq!(computed(&tree, button)?.width(), px(50.0));
    assert_eq!(computed(&tree, button)?.height(), px(10.0));
    Ok(())
}

#[test]
fn inherited_properties_flow_to_children() -> Result<()> {
    let (mut tree, root, children) = tree_with(
        "Root { color: red; font-size: 20px; width: 10px; } Label { color: inherit; }",
        &["Button", "Label"],
    )?;
    let mut engine = CascadeEngine::default();
    engine.apply_styles(&mut tree, root);

    let red = red()?;
    let button = computed(&tree, children[0])?;
    assert_eq!(button.color(), red);
    assert_eq!(button.font_size(), Some(Length::pixels(20.0)));
    assert_eq!(button.width(), StyleValue::Keyword(StyleKeyword::Auto));
    assert_eq!(computed(&tree, children[1])?.color(), red);
    Ok(())
}

#[test]
fn clean_elements_are_not_restyled() -> Result<()> {
    let (mut tree, root, children) = tree_with(".on { width: 3px; }", &["Button", "Button", "Button"])?;
    let mut engine = CascadeEngine::default();
    engine.apply_styles(&mut tree, root);
    assert_eq!(engine.stats().elements_processed, 4);

    engine.reset_stats();
    engine.apply_styles(&mut tree, root);
    assert_eq!(engine.stats().elements_processed, 0);

    tree.add_class(children[1], "on");
    assert_eq!(
        tree.get(root).map(Element::dirty_flags),
        Some(DirtyFlags::DESCENDANT_DIRTY)
    );
    engine.apply_styles(&mut tree, root);
    assert_eq!(engine.stats().elements_processed, 1);
    assert_eq!(computed(&tree, children[1])?.width(), px(3.0));
    assert_eq!(
        tree.get(children[1]).map(Element::dirty_flags),
        Some(DirtyFlags::empty())
    );
    Ok(())
}

#[test]
fn pseudo_state_changes_restyle_dependents() -> Result<()> {
    let (mut tree, root, children) = tree_with(
        "Button:hover { width: 30px; } Button:hover Label { color: red; }",
        &["Button"],
    )?;
    let button = children[0];
    let label = tree.create_child(button, "Label");
    let mut engine = CascadeEngine::default();
    engine.apply_styles(&mut tree, root);
    assert_eq!(computed(&tree, button)?.width(), StyleValue::Keyword(StyleKeyword::Auto));

    tree.set_pseudo_states(button, PseudoStates::CHECKED);
    assert_eq!(
        tree.get(button).map(Element::dirty_flags),
        Some(DirtyFlags::empty())
    );

    tree.set_pseudo_states(button, PseudoStates::HOVER);
    engine.apply_styles(&mut tree, root);
    assert_eq!(computed(&tree, button)?.width(), px(30.0));
    assert_eq!(computed(&tree, label)?.color(), red()?);
    Ok(())
}

#[test]
fn deprecated_names_are_rewritten() -> Result<()> {
    let (mut tree, root, children) = tree_with("Label { text-color: red; position-left: 4px; }", &["Label"])?;
    let mut engine = CascadeEngine::default();
    engine.apply_styles(&mut tree, root);

    let styles = computed(&tree, children[0])?;
    assert_eq!(styles.color(), red()?);
    assert_eq!(styles.value(StylePropertyId::Left), px(4.0));
    Ok(())
}

#[test]
fn bad_declarations_do_not_abort_the_cascade() -> Result<()> {
    let (mut tree, root, children) = tree_with(
        "Button { flex-direction: sideways; float: left; width: 5px; background-image: url(\"gone.png\"); }",
        &["Button"],
    )?;
    let mut engine = CascadeEngine::default();
    engine.apply_styles(&mut tree, root);

    let styles = computed(&tree, children[0])?;
    assert_eq!(styles.width(), px(5.0));
    assert_eq!(
        styles.background_value(StylePropertyId::BackgroundImage).image,
        Some(ImageHandle::MISSING)
    );
    Ok(())
}

#[test]
fn invalid_sheets_report_context() -> Result<()> {
    let Err(error) = CascadeEngine::load_style_sheet("A + B { width: 1px; }") else {
        bail!("an invalid selector was imported");
    };
    assert!(error.to_string().contains("failed to import style sheet"));
    Ok(())
}

#[test]
fn dpi_changes_restyle_everything() -> Result<()> {
    let (mut tree, root, children) = tree_with("Button { width: 10px; }", &["Button"])?;
    let mut engine = CascadeEngine::default();
    engine.apply_styles(&mut tree, root);
    let before = shared(&tree, children[0])?;

    engine.set_dpi_scale(&mut tree, 2.0);
    engine.reset_stats();
    engine.apply_styles(&mut tree, root);

    assert_eq!(engine.stats().elements_processed, 2);
    assert!(!Rc::ptr_eq(&before, &shared(&tree, children[0])?));
    assert!((engine.config().dpi_scale - 2.0).abs() < f32::EPSILON);

    engine.clear_caches();
    assert_eq!(engine.cached_style_count(), 0);
    assert_eq!(computed(&tree, children[0])?.width(), px(10.0));
    Ok(())
}
