//! Keyword-valued properties.

/// A keyword enum whose values are matched by CSS identifier.
///
/// The integer form stored in a style bundle is the value's position in
/// [`StyleEnum::VALUES`].
pub trait StyleEnum: Copy + Eq + 'static {
    const VALUES: &'static [(&'static str, Self)];

    fn from_ident(ident: &str) -> Option<Self> {
        Self::VALUES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(ident))
            .map(|&(_, value)| value)
    }

    fn from_int(value: i32) -> Option<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|index| Self::VALUES.get(index))
            .map(|&(_, value)| value)
    }

    fn to_int(self) -> i32 {
        Self::VALUES
            .iter()
            .position(|&(_, value)| value == self)
            .map_or(-1, |index| index as i32)
    }

    fn css_name(self) -> &'static str {
        Self::VALUES
            .iter()
            .find(|&&(_, value)| value == self)
            .map_or("", |&(name, _)| name)
    }
}

macro_rules! style_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$variant_meta:meta])* $variant:ident = $css:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$variant_meta])* $variant,)+
        }

        impl StyleEnum for $name {
            const VALUES: &'static [(&'static str, Self)] = &[$(($css, Self::$variant),)+];
        }
    };
}

style_enum! {
    /// `align-content`, `align-items` and `align-self`.
    Align {
        Auto = "auto",
        #[default]
        FlexStart = "flex-start",
        Center = "center",
        FlexEnd = "flex-end",
        Stretch = "stretch",
    }
}

style_enum! {
    Justify {
        #[default]
        FlexStart = "flex-start",
        Center = "center",
        FlexEnd = "flex-end",
        SpaceBetween = "space-between",
        SpaceAround = "space-around",
    }
}

style_enum! {
    FlexDirection {
        #[default]
        Column = "column",
        ColumnReverse = "column-reverse",
        Row = "row",
        RowReverse = "row-reverse",
    }
}

style_enum! {
    FlexWrap {
        #[default]
        NoWrap = "nowrap",
        Wrap = "wrap",
        WrapReverse = "wrap-reverse",
    }
}

style_enum! {
    DisplayStyle {
        #[default]
        Flex = "flex",
        None = "none",
    }
}

style_enum! {
    Overflow {
        #[default]
        Visible = "visible",
        Hidden = "hidden",
        Scroll = "scroll",
    }
}

style_enum! {
    Position {
        #[default]
        Relative = "relative",
        Absolute = "absolute",
    }
}

style_enum! {
    /// How a background image fills its element.
    ScaleMode {
        #[default]
        StretchToFill = "stretch-to-fill",
        ScaleAndCrop = "scale-and-crop",
        ScaleToFit = "scale-to-fit",
    }
}

style_enum! {
    FontStyle {
        #[default]
        Normal = "normal",
        Bold = "bold",
        Italic = "italic",
        BoldAndItalic = "bold-and-italic",
    }
}

style_enum! {
    /// `-unity-text-align`.
    TextAnchor {
        #[default]
        UpperLeft = "upper-left",
        UpperCenter = "upper-center",
        UpperRight = "upper-right",
        MiddleLeft = "middle-left",
        MiddleCenter = "middle-center",
        MiddleRight = "middle-right",
        LowerLeft = "lower-left",
        LowerCenter = "lower-center",
        LowerRight = "lower-right",
    }
}

style_enum! {
    Visibility {
        #[default]
        Visible = "visible",
        Hidden = "hidden",
    }
}

style_enum! {
    WhiteSpace {
        #[default]
        Normal = "normal",
        NoWrap = "nowrap",
    }
}

style_enum! {
    /// Built-in cursors of the host, used when `cursor` names one instead of
    /// a texture.
    NativeCursor {
        #[default]
        Arrow = "arrow",
        Text = "text",
        ResizeVertical = "resize-vertical",
        ResizeHorizontal = "resize-horizontal",
        Link = "link",
        SlideArrow = "slide-arrow",
        ResizeUpRight = "resize-up-right",
        ResizeUpLeft = "resize-up-left",
        MoveArrow = "move-arrow",
        RotateArrow = "rotate-arrow",
        ScaleArrow = "scale-arrow",
        ArrowPlus = "arrow-plus",
        ArrowMinus = "arrow-minus",
        Pan = "pan",
        Orbit = "orbit",
        Zoom = "zoom",
        Fps = "fps",
        SplitResizeUpDown = "split-resize-up-down",
        SplitResizeLeftRight = "split-resize-left-right",
    }
}

/// Which keyword enum an enum-valued property uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnumKind {
    Align,
    Justify,
    FlexDirection,
    FlexWrap,
    DisplayStyle,
    Overflow,
    Position,
    ScaleMode,
    FontStyle,
    TextAnchor,
    Visibility,
    WhiteSpace,
}

impl EnumKind {
    /// Integer value of `ident` in this enum.
    pub fn parse(self, ident: &str) -> Option<i32> {
        fn int_of<T: StyleEnum>(ident: &str) -> Option<i32> {
            T::from_ident(ident).map(T::to_int)
        }
        match self {
            Self::Align => int_of::<Align>(ident),
            Self::Justify => int_of::<Justify>(ident),
            Self::FlexDirection => int_of::<FlexDirection>(ident),
            Self::FlexWrap => int_of::<FlexWrap>(ident),
            Self::DisplayStyle => int_of::<DisplayStyle>(ident),
            Self::Overflow => int_of::<Overflow>(ident),
            Self::Position => int_of::<Position>(ident),
            Self::ScaleMode => int_of::<ScaleMode>(ident),
            Self::FontStyle => int_of::<FontStyle>(ident),
            Self::TextAnchor => int_of::<TextAnchor>(ident),
            Self::Visibility => int_of::<Visibility>(ident),
            Self::WhiteSpace => int_of::<WhiteSpace>(ident),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_form_is_table_position() {
        assert_eq!(Align::from_ident("Center").map(Align::to_int), Some(2));
        assert_eq!(Align::from_int(4), Some(Align::Stretch));
        assert_eq!(Align::from_int(-1), None);
        assert_eq!(TextAnchor::MiddleCenter.css_name(), "middle-center");
    }

    #[test]
    fn kinds_dispatch_to_their_enum() {
        assert_eq!(EnumKind::FlexDirection.parse("row"), Some(FlexDirection::Row.to_int()));
        assert_eq!(EnumKind::DisplayStyle.parse("none"), Some(1));
        assert_eq!(EnumKind::FlexWrap.parse("row"), None);
        assert_eq!(NativeCursor::from_ident("link"), Some(NativeCursor::Link));
    }
}
