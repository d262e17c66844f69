//! Value handles addressing a style sheet's value pools.

use core::fmt::{self, Display, Formatter};

/// The pool a [`StyleValueHandle`] indexes into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StyleValueType {
    #[default]
    Invalid,
    /// Index is a [`StyleValueKeyword`] discriminant.
    Keyword,
    /// Index into the float pool.
    Float,
    /// Index into the dimension pool.
    Dimension,
    /// Index into the color pool.
    Color,
    /// Index into the string pool; the string is a resource path.
    ResourcePath,
    /// Index into the asset pool.
    AssetReference,
    /// Index into the string pool; the asset could not be resolved at import time.
    MissingAssetReference,
    /// Index into the string pool; the string is an identifier.
    Enum,
    /// Index into the string pool; the string is a `--custom` property name.
    Variable,
    /// Index into the string pool.
    String,
    /// Index is a [`StyleValueFunction`] discriminant. The next handle is a
    /// float holding the argument count.
    Function,
    /// A `,` between function arguments or list items. Index is unused.
    CommaSeparator,
}

impl Display for StyleValueType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Invalid => "invalid",
            Self::Keyword => "keyword",
            Self::Float => "float",
            Self::Dimension => "dimension",
            Self::Color => "color",
            Self::ResourcePath => "resource path",
            Self::AssetReference => "asset reference",
            Self::MissingAssetReference => "missing asset reference",
            Self::Enum => "enum",
            Self::Variable => "variable",
            Self::String => "string",
            Self::Function => "function",
            Self::CommaSeparator => "comma separator",
        };
        formatter.write_str(name)
    }
}

/// A typed index into one of a style sheet's value pools.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StyleValueHandle {
    pub value_type: StyleValueType,
    pub index: usize,
}

impl StyleValueHandle {
    #[inline]
    pub const fn new(value_type: StyleValueType, index: usize) -> Self {
        Self { value_type, index }
    }

    /// Handle for a keyword value.
    #[inline]
    pub const fn keyword(keyword: StyleValueKeyword) -> Self {
        Self::new(StyleValueType::Keyword, keyword as usize)
    }

    /// Handle opening a function call.
    #[inline]
    pub const fn function(function: StyleValueFunction) -> Self {
        Self::new(StyleValueType::Function, function as usize)
    }

    #[inline]
    pub const fn comma() -> Self {
        Self::new(StyleValueType::CommaSeparator, 0)
    }

    #[inline]
    pub fn is_var_function(&self) -> bool {
        self.value_type == StyleValueType::Function
            && self.index == StyleValueFunction::Var as usize
    }
}

/// Keywords stored directly in a handle's index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleValueKeyword {
    Inherit = 0,
    Initial = 1,
    Auto = 2,
    Unset = 3,
    True = 4,
    False = 5,
    None = 6,
}

impl StyleValueKeyword {
    pub const ALL: [Self; 7] = [
        Self::Inherit,
        Self::Initial,
        Self::Auto,
        Self::Unset,
        Self::True,
        Self::False,
        Self::None,
    ];

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Keyword for an identifier, case-insensitively.
    pub fn from_ident(ident: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|keyword| keyword.as_str().eq_ignore_ascii_case(ident))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inherit => "inherit",
            Self::Initial => "initial",
            Self::Auto => "auto",
            Self::Unset => "unset",
            Self::True => "true",
            Self::False => "false",
            Self::None => "none",
        }
    }

    /// CSS-wide keywords apply to every property regardless of its grammar.
    pub const fn is_css_wide(self) -> bool {
        matches!(self, Self::Inherit | Self::Initial | Self::Unset)
    }
}

/// Functions stored directly in a handle's index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleValueFunction {
    Unknown = 0,
    Var = 1,
    Env = 2,
    LinearGradient = 3,
}

impl StyleValueFunction {
    pub fn from_index(index: usize) -> Self {
        match index {
            1 => Self::Var,
            2 => Self::Env,
            3 => Self::LinearGradient,
            _ => Self::Unknown,
        }
    }

    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("var") {
            Self::Var
        } else if name.eq_ignore_ascii_case("env") {
            Self::Env
        } else if name.eq_ignore_ascii_case("linear-gradient") {
            Self::LinearGradient
        } else {
            Self::Unknown
        }
    }
}
