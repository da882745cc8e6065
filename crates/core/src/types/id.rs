//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Errors that can occur when parsing an ID from user input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input is empty or only whitespace.
    #[error("id cannot be empty")]
    Empty,
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `new()` for trusted values, `parse()` for user input, `as_str()`
/// - `Display`, `From<&str>` and `From<String>`
///
/// # Example
///
/// ```rust
/// # use artisan_market_core::define_id;
/// define_id!(ShopId);
/// define_id!(OrderId);
///
/// let shop_id = ShopId::new("s-1");
/// let order_id = OrderId::new("s-1");
///
/// // These are different types, so this won't compile:
/// // let _: ShopId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from a trusted value (remote records, fixtures).
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Parse an ID from user input such as a path segment.
            ///
            /// Profile ids are free text (often a display name), so any
            /// non-blank value is accepted. Callers building URLs must
            /// percent-encode it.
            ///
            /// # Errors
            ///
            /// Returns an error if the trimmed input is empty.
            pub fn parse(s: &str) -> ::core::result::Result<Self, $crate::types::id::IdError> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err($crate::types::id::IdError::Empty);
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ArtisanId);
define_id!(ProductId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_accepts_profile_ids() {
        let id = ArtisanId::parse("  ravi_kumar-01 ").unwrap();
        assert_eq!(id.as_str(), "ravi_kumar-01");

        // Telegram-style numeric user ids are common in the profile store
        assert!(ArtisanId::parse("123456789").is_ok());
    }

    #[test]
    fn test_parse_rejects_only_blank_ids() {
        assert_eq!(ArtisanId::parse(""), Err(IdError::Empty));
        assert_eq!(ArtisanId::parse("   "), Err(IdError::Empty));

        // Onboarding stores whatever the artisan typed as their id
        assert_eq!(ArtisanId::parse(" ravi kumar ").unwrap().as_str(), "ravi kumar");
        assert_eq!(ArtisanId::parse("मीना देवी").unwrap().as_str(), "मीना देवी");
        assert!(ArtisanId::parse("a/b").is_ok());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = ProductId::new("p-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p-1\"");
        let back: ProductId = serde_json::from_str("\"p-1\"").unwrap();
        assert_eq!(back, id);
    }
}
