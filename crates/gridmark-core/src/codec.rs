//! Closed enumerations stored as markup attribute tokens
//!
//! Every attribute-valued enumeration of the format has a zero "unset"
//! discriminant that is never written (the attribute is omitted) and a
//! fixed, case-sensitive token for each other discriminant. Decoding is
//! strict: a token that is not registered is an error, never the unset
//! value.
//!
//! Enumerations are declared with the crate-internal `attribute_enum!`
//! macro, which derives the enum, its [`AttributeEnum`] token table and a
//! `Display` that renders the token.

use crate::error::{Error, Result};

/// Token mapping for a closed attribute enumeration
pub trait AttributeEnum: Copy + Eq + Default + std::fmt::Debug + 'static {
    /// Human readable name used in decoding errors
    const NAME: &'static str;

    /// Token for every discriminant except the unset one
    const TOKENS: &'static [(Self, &'static str)];

    /// Check if this is the zero discriminant
    fn is_unset(self) -> bool {
        self == Self::default()
    }

    /// Token to write, or `None` when the attribute must be omitted
    fn encode(self) -> Option<&'static str> {
        if self.is_unset() {
            return None;
        }
        Self::TOKENS
            .iter()
            .find(|(value, _)| *value == self)
            .map(|(_, token)| *token)
    }

    /// Decode an attribute value; an absent attribute is the unset value
    fn decode(value: Option<&str>) -> Result<Self> {
        match value {
            None => Ok(Self::default()),
            Some(token) => Self::from_token(token),
        }
    }

    /// Look up a present token
    fn from_token(token: &str) -> Result<Self> {
        Self::TOKENS
            .iter()
            .find(|(_, t)| *t == token)
            .map(|(value, _)| *value)
            .ok_or_else(|| Error::UnrecognizedToken {
                kind: Self::NAME,
                token: token.to_string(),
            })
    }
}

/// Declare an enumeration whose first variant is the unset discriminant
/// and whose other variants map to fixed tokens.
macro_rules! attribute_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($label:literal) {
            $(#[$unset_meta:meta])*
            $unset:ident,
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $token:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis enum $name {
            $(#[$unset_meta])*
            #[default]
            $unset,
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $crate::codec::AttributeEnum for $name {
            const NAME: &'static str = $label;
            const TOKENS: &'static [(Self, &'static str)] = &[$(($name::$variant, $token)),+];
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::codec::AttributeEnum::encode(*self).unwrap_or(""))
            }
        }
    };
}

pub(crate) use attribute_enum;
