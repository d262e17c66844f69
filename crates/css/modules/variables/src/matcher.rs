//! Matching resolved values against a property grammar.
//!
//! Every grammar node maps a set of start positions in the value list to the
//! set of positions where a match of that node can end. A list matches when
//! the end set of the whole expression contains the list length.

use std::collections::BTreeSet;

use css_properties::enum_ident;
use css_values::{DimensionUnit, StyleValueType};

use crate::{Component, DataType, Expression, StylePropertyValue, Term};

type Positions = BTreeSet<usize>;

/// True if `values` as a whole is a sentence of `expression`.
///
/// A lone CSS-wide keyword (`inherit`, `initial`, `unset`) matches any grammar.
pub fn matches(expression: &Expression, values: &[StylePropertyValue]) -> bool {
    if let [single] = values
        && single
            .sheet
            .read_keyword(single.handle)
            .is_ok_and(|keyword| keyword.is_css_wide())
    {
        return true;
    }
    let starts = Positions::from([0]);
    match_expression(expression, values, &starts).contains(&values.len())
}

fn match_expression(
    expression: &Expression,
    values: &[StylePropertyValue],
    starts: &Positions,
) -> Positions {
    let mut ends = Positions::new();
    for sequence in &expression.alternatives {
        ends.extend(match_sequence(sequence, values, starts));
    }
    ends
}

fn match_sequence(
    sequence: &[Component],
    values: &[StylePropertyValue],
    starts: &Positions,
) -> Positions {
    let mut current = starts.clone();
    for component in sequence {
        if current.is_empty() {
            break;
        }
        current = match_component(component, values, &current);
    }
    current
}

fn match_component(
    component: &Component,
    values: &[StylePropertyValue],
    starts: &Positions,
) -> Positions {
    let mut ends = Positions::new();
    if component.min == 0 {
        ends.extend(starts.iter().copied());
    }
    // Repetitions past min + len can only revisit positions.
    let limit = component
        .max
        .unwrap_or(usize::MAX)
        .min(component.min.saturating_add(values.len()).saturating_add(1));
    let mut frontier = starts.clone();
    let mut count = 0;
    while count < limit && !frontier.is_empty() {
        let next = match_term(&component.term, values, &frontier);
        count += 1;
        if next == frontier {
            // Nothing consumed: every further repetition yields the same set.
            ends.extend(next);
            break;
        }
        if count >= component.min {
            ends.extend(next.iter().copied());
        }
        frontier = next;
    }
    ends
}

fn match_term(term: &Term, values: &[StylePropertyValue], starts: &Positions) -> Positions {
    match term {
        Term::Group(expression) => match_expression(expression, values, starts),
        Term::Keyword(keyword) => single_value(values, starts, |value| {
            enum_ident(&value.sheet, value.handle).is_some_and(|ident| ident.eq_ignore_ascii_case(keyword))
        }),
        Term::Type(data_type) => single_value(values, starts, |value| is_data_type(*data_type, value)),
    }
}

fn single_value(
    values: &[StylePropertyValue],
    starts: &Positions,
    accept: impl Fn(&StylePropertyValue) -> bool,
) -> Positions {
    starts
        .iter()
        .filter(|&&start| values.get(start).is_some_and(&accept))
        .map(|&start| start + 1)
        .collect()
}

fn is_data_type(data_type: DataType, value: &StylePropertyValue) -> bool {
    let sheet = &value.sheet;
    let handle = value.handle;
    match data_type {
        DataType::Length => match handle.value_type {
            StyleValueType::Float => true,
            StyleValueType::Dimension => sheet.read_dimension(handle).is_ok_and(|dimension| {
                matches!(dimension.unit, DimensionUnit::Pixel | DimensionUnit::Unitless)
            }),
            _ => false,
        },
        DataType::Percentage => {
            handle.value_type == StyleValueType::Dimension
                && sheet
                    .read_dimension(handle)
                    .is_ok_and(|dimension| dimension.unit == DimensionUnit::Percent)
        }
        DataType::Number => handle.value_type == StyleValueType::Float,
        DataType::Integer => {
            handle.value_type == StyleValueType::Float
                && sheet.read_float(handle).is_ok_and(|number| number.fract().abs() < f32::EPSILON)
        }
        DataType::Color => match handle.value_type {
            StyleValueType::Color | StyleValueType::Enum => sheet.read_color(handle).is_ok(),
            _ => false,
        },
        DataType::Resource => handle.value_type == StyleValueType::ResourcePath,
        DataType::Url => matches!(
            handle.value_type,
            StyleValueType::AssetReference | StyleValueType::MissingAssetReference
        ),
        DataType::CustomIdent => handle.value_type == StyleValueType::Enum,
        DataType::String => handle.value_type == StyleValueType::String,
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::parse_syntax;
    use css_stylesheet::{StyleSheet, StyleSheetBuilder};
    use css_values::{Color, Dimension, StyleValueHandle, StyleValueKeyword};

    struct Sample {
        sheet: Rc<StyleSheet>,
        handles: Vec<StyleValueHandle>,
    }

    impl Sample {
        fn values(&self, picks: &[usize]) -> Vec<StylePropertyValue> {
            picks
                .iter()
                .filter_map(|&pick| self.handles.get(pick))
                .map(|&handle| StylePropertyValue::new(&self.sheet, handle))
                .collect()
        }
    }

    // 0: 10px, 1: 50%, 2: 2, 3: 1.5, 4: auto, 5: red (ident), 6: #fff, 7: row, 8: inherit
    fn sample() -> Sample {
        let mut builder = StyleSheetBuilder::new();
        let handles = vec![
            builder.dimension(Dimension::new(10.0, DimensionUnit::Pixel)),
            builder.dimension(Dimension::new(50.0, DimensionUnit::Percent)),
            builder.float(2.0),
            builder.float(1.5),
            builder.keyword(StyleValueKeyword::Auto),
            builder.string(StyleValueType::Enum, "red"),
            builder.color(Color::WHITE),
            builder.string(StyleValueType::Enum, "row"),
            builder.keyword(StyleValueKeyword::Inherit),
        ];
        Sample {
            sheet: Rc::new(builder.build()),
            handles,
        }
    }

    fn accepts(grammar: &str, sample: &Sample, picks: &[usize]) -> bool {
        let expression = parse_syntax(grammar).unwrap_or_default();
        matches(&expression, &sample.values(picks))
    }

    #[test]
    fn lengths_percentages_and_keywords() {
        let sample = sample();
        let grammar = "<length> | <percentage> | auto";
        assert!(accepts(grammar, &sample, &[0]));
        assert!(accepts(grammar, &sample, &[1]));
        assert!(accepts(grammar, &sample, &[2]));
        assert!(accepts(grammar, &sample, &[4]));
        assert!(!accepts(grammar, &sample, &[7]));
        assert!(!accepts(grammar, &sample, &[0, 0]));
        assert!(!accepts(grammar, &sample, &[]));
    }

    #[test]
    fn four_side_repetition() {
        let sample = sample();
        let grammar = "[ <length> | <percentage> | auto ]{1,4}";
        assert!(accepts(grammar, &sample, &[0, 1, 2, 4]));
        assert!(!accepts(grammar, &sample, &[0, 0, 0, 0, 0]));
        assert!(!accepts(grammar, &sample, &[0, 7]));
    }

    #[test]
    fn optional_components_in_sequence() {
        let sample = sample();
        let grammar = "none | auto | <number> <number>? [ <length> | <percentage> | auto ]? | <length> | <percentage>";
        assert!(accepts(grammar, &sample, &[2]));
        assert!(accepts(grammar, &sample, &[2, 3, 0]));
        assert!(accepts(grammar, &sample, &[2, 4]));
        assert!(!accepts(grammar, &sample, &[4, 2]));
    }

    #[test]
    fn colors_integers_and_wide_keywords() {
        let sample = sample();
        assert!(accepts("<color>", &sample, &[5]));
        assert!(accepts("<color>", &sample, &[6]));
        assert!(!accepts("<color>", &sample, &[7]));
        assert!(accepts("<integer>", &sample, &[2]));
        assert!(!accepts("<integer>", &sample, &[3]));
        assert!(accepts("<integer>", &sample, &[8]));
    }

    #[test]
    fn empty_matching_groups_terminate() {
        let sample = sample();
        assert!(accepts("[ auto? ]*", &sample, &[]));
        assert!(accepts("[ auto? ]{2} <number>", &sample, &[2]));
        assert!(accepts("[ auto? ]+", &sample, &[4, 4, 4]));
    }
}
