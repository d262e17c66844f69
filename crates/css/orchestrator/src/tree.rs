//! The styled element tree.

use core::iter;
use std::rc::Rc;

use css_cascade::StylesData;
use css_properties::StylePropertyId;
use css_selectors::{ElementAdapter, PseudoMatchInfo, PseudoStates};
use css_stylesheet::StyleSheet;
use css_values::StyleValue;
use css_variables::VariableContext;
use smallvec::SmallVec;

/// Handle of an element in an [`ElementTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u32);

impl ElementId {
    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Pending style work on an element.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DirtyFlags: u8 {
        /// The element must be matched and styled again, and so must its
        /// descendants since they inherit from it.
        const STYLES           = 0b0000_0001;
        /// Some descendant has [`DirtyFlags::STYLES`].
        const DESCENDANT_DIRTY = 0b0000_0010;
    }
}

/// One element and the styles last computed for it.
#[derive(Debug)]
pub struct Element {
    type_name: String,
    name: Option<String>,
    classes: SmallVec<String, 4>,
    pseudo_states: PseudoStates,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    style_sheets: Vec<Rc<StyleSheet>>,
    inline_style: Option<Rc<StyleSheet>>,
    inline_values: Vec<(StylePropertyId, StyleValue)>,
    dirty: DirtyFlags,
    pub(crate) shared_styles: Option<Rc<StylesData>>,
    pub(crate) styles: Option<Rc<StylesData>>,
    pub(crate) computed_styles: Option<Rc<StylesData>>,
    pub(crate) variables: Rc<VariableContext>,
    pub(crate) pseudo: PseudoMatchInfo,
}

impl Element {
    fn new(type_name: &str, parent: Option<ElementId>) -> Self {
        Self {
            type_name: type_name.to_owned(),
            name: None,
            classes: SmallVec::new(),
            pseudo_states: PseudoStates::empty(),
            parent,
            children: Vec::new(),
            style_sheets: Vec::new(),
            inline_style: None,
            inline_values: Vec::new(),
            dirty: DirtyFlags::STYLES,
            shared_styles: None,
            styles: None,
            computed_styles: None,
            variables: VariableContext::empty(),
            pseudo: PseudoMatchInfo::default(),
        }
    }

    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[inline]
    pub fn pseudo_states(&self) -> PseudoStates {
        self.pseudo_states
    }

    #[inline]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Sheets attached to this element; they apply to its whole subtree.
    #[inline]
    pub fn style_sheets(&self) -> &[Rc<StyleSheet>] {
        &self.style_sheets
    }

    #[inline]
    pub fn inline_style(&self) -> Option<&Rc<StyleSheet>> {
        self.inline_style.as_ref()
    }

    #[inline]
    pub fn inline_values(&self) -> &[(StylePropertyId, StyleValue)] {
        &self.inline_values
    }

    #[inline]
    pub fn has_inline_styles(&self) -> bool {
        self.inline_style.is_some() || !self.inline_values.is_empty()
    }

    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    /// Bundle produced by the cascade, possibly shared with other elements.
    #[inline]
    pub fn shared_styles(&self) -> Option<&Rc<StylesData>> {
        self.shared_styles.as_ref()
    }

    /// Cascade result with inline values applied.
    #[inline]
    pub fn styles(&self) -> Option<&Rc<StylesData>> {
        self.styles.as_ref()
    }

    /// [`Self::styles`] with keywords and inheritance resolved.
    #[inline]
    pub fn computed_styles(&self) -> Option<&Rc<StylesData>> {
        self.computed_styles.as_ref()
    }

    /// Custom properties visible to this element and its children.
    #[inline]
    pub fn variables(&self) -> &Rc<VariableContext> {
        &self.variables
    }

    /// Pseudo states whose change can alter matches involving this element.
    #[inline]
    pub fn pseudo_match_info(&self) -> PseudoMatchInfo {
        self.pseudo
    }
}

/// Arena of elements addressed by [`ElementId`].
///
/// Every mutation that can change how an element matches marks it dirty;
/// the cascade restyles dirty elements and everything below them.
#[derive(Debug, Default)]
pub struct ElementTree {
    elements: Vec<Element>,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.index())
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.index())
    }

    /// Create a parentless element. It starts in the `:root` state.
    pub fn create_element(&mut self, type_name: &str) -> ElementId {
        let mut element = Element::new(type_name, None);
        element.pseudo_states = PseudoStates::ROOT;
        self.push(element)
    }

    /// Create an element as the last child of `parent`.
    pub fn create_child(&mut self, parent: ElementId, type_name: &str) -> ElementId {
        let id = self.push(Element::new(type_name, Some(parent)));
        if let Some(element) = self.get_mut(parent) {
            element.children.push(id);
        }
        self.mark_dirty(id);
        id
    }

    fn push(&mut self, element: Element) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(element);
        id
    }

    /// Ids of elements without a parent.
    pub fn roots(&self) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.parent.is_none())
            .map(|(index, _)| ElementId(index as u32))
            .collect()
    }

    /// Add a class; adding one the element already has is a no-op.
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        let Some(element) = self.get_mut(id) else {
            return;
        };
        if element.classes.iter().any(|existing| existing == class) {
            return;
        }
        element.classes.push(class.to_owned());
        self.mark_dirty(id);
    }

    /// Remove a class and restyle the element if it had it.
    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        let Some(element) = self.get_mut(id) else {
            return;
        };
        let Some(position) = element.classes.iter().position(|existing| existing == class) else {
            return;
        };
        element.classes.remove(position);
        self.mark_dirty(id);
    }

    /// Set or clear the name matched by `#name` selectors.
    pub fn set_name(&mut self, id: ElementId, name: Option<&str>) {
        let Some(element) = self.get_mut(id) else {
            return;
        };
        if element.name.as_deref() == name {
            return;
        }
        element.name = name.map(ToOwned::to_owned);
        self.mark_dirty(id);
    }

    /// Attach a sheet. Its rules apply to the element and its descendants,
    /// after every sheet attached higher up.
    pub fn add_style_sheet(&mut self, id: ElementId, sheet: &Rc<StyleSheet>) {
        let Some(element) = self.get_mut(id) else {
            return;
        };
        element.style_sheets.push(Rc::clone(sheet));
        self.mark_dirty(id);
    }

    /// Detach a sheet previously attached with [`Self::add_style_sheet`].
    pub fn remove_style_sheet(&mut self, id: ElementId, sheet: &Rc<StyleSheet>) {
        let Some(element) = self.get_mut(id) else {
            return;
        };
        let Some(position) = element
            .style_sheets
            .iter()
            .position(|attached| Rc::ptr_eq(attached, sheet))
        else {
            return;
        };
        element.style_sheets.remove(position);
        self.mark_dirty(id);
    }

    /// Replace the interaction state. The element is restyled only if a
    /// selector tested against it depends on one of the changed bits.
    pub fn set_pseudo_states(&mut self, id: ElementId, states: PseudoStates) {
        let Some(element) = self.get_mut(id) else {
            return;
        };
        let changed = element.pseudo_states ^ states;
        element.pseudo_states = states;
        if changed.intersects(element.pseudo.trigger | element.pseudo.dependency) {
            self.mark_dirty(id);
        }
    }

    /// Set or clear the element's inline declarations.
    pub fn set_inline_style(&mut self, id: ElementId, sheet: Option<Rc<StyleSheet>>) {
        let Some(element) = self.get_mut(id) else {
            return;
        };
        element.inline_style = sheet;
        self.mark_dirty(id);
    }

    /// Set one longhand inline; it overrides every rule.
    pub fn set_inline_value(&mut self, id: ElementId, property: StylePropertyId, value: StyleValue) {
        let Some(element) = self.get_mut(id) else {
            return;
        };
        element.inline_values.retain(|(existing, _)| *existing != property);
        element.inline_values.push((property, value));
        self.mark_dirty(id);
    }

    pub fn clear_inline_values(&mut self, id: ElementId) {
        let Some(element) = self.get_mut(id) else {
            return;
        };
        if element.inline_values.is_empty() {
            return;
        }
        element.inline_values.clear();
        self.mark_dirty(id);
    }

    /// Flag an element for restyling and its ancestors for traversal.
    pub fn mark_dirty(&mut self, id: ElementId) {
        let Some(element) = self.get_mut(id) else {
            return;
        };
        element.dirty |= DirtyFlags::STYLES;
        let mut current = element.parent;
        while let Some(ancestor_id) = current {
            let Some(ancestor) = self.get_mut(ancestor_id) else {
                break;
            };
            if ancestor.dirty.contains(DirtyFlags::DESCENDANT_DIRTY) {
                break;
            }
            ancestor.dirty |= DirtyFlags::DESCENDANT_DIRTY;
            current = ancestor.parent;
        }
    }

    /// Mark every element for restyling.
    pub fn mark_all_dirty(&mut self) {
        for element in &mut self.elements {
            element.dirty |= DirtyFlags::STYLES | DirtyFlags::DESCENDANT_DIRTY;
        }
    }

    pub(crate) fn clear_dirty(&mut self, id: ElementId) {
        if let Some(element) = self.get_mut(id) {
            element.dirty = DirtyFlags::empty();
        }
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        let mut current = self.get(id).and_then(Element::parent);
        iter::from_fn(move || {
            let ancestor = current?;
            current = self.get(ancestor).and_then(Element::parent);
            Some(ancestor)
        })
    }
}

impl ElementAdapter for ElementTree {
    type Handle = ElementId;

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.get(element).and_then(Element::parent)
    }

    fn type_name(&self, element: ElementId) -> &str {
        self.get(element).map(Element::type_name).unwrap_or_default()
    }

    fn element_name(&self, element: ElementId) -> Option<&str> {
        self.get(element).and_then(Element::name)
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.get(element)
            .is_some_and(|found| found.classes.iter().any(|existing| existing == class))
    }

    fn pseudo_states(&self, element: ElementId) -> PseudoStates {
        self.get(element)
            .map(Element::pseudo_states)
            .unwrap_or_default()
    }
}
