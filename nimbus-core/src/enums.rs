//! String-valued enums whose set of values may grow on the service side

/// Declare an enum carried on the wire as a string
///
/// Each variant maps to its wire value; anything else deserializes into
/// `Unknown(String)` so a new server-side value never breaks parsing.
///
/// ```
/// nimbus_core::wire_enum! {
///     /// Key type of a table attribute
///     pub enum KeyType {
///         Hash => "HASH",
///         Range => "RANGE",
///     }
/// }
///
/// assert_eq!(KeyType::parse("RANGE"), KeyType::Range);
/// assert_eq!(KeyType::parse("SORT").as_str(), "SORT");
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value not known to this client
            Unknown(String),
        }

        impl $name {
            /// Wire representation
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Unknown(value) => value.as_str(),
                }
            }

            pub fn parse(value: &str) -> Self {
                match value {
                    $( $wire => Self::$variant, )+
                    other => Self::Unknown(other.to_string()),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::std::convert::Infallible;

            fn from_str(value: &str) -> ::std::result::Result<Self, Self::Err> {
                Ok(Self::parse(value))
            }
        }

        impl $crate::serde::Serialize for $name {
            fn serialize<S: $crate::serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> $crate::serde::Deserialize<'de> for $name {
            fn deserialize<D: $crate::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                let value = <::std::string::String as $crate::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                Ok(Self::parse(&value))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    wire_enum! {
        enum Color {
            Red => "RED",
            DarkBlue => "DARK_BLUE",
        }
    }

    #[test]
    fn test_known_and_unknown_values() {
        assert_eq!(Color::parse("DARK_BLUE"), Color::DarkBlue);
        assert_eq!(Color::parse("GREEN"), Color::Unknown("GREEN".to_string()));
        assert_eq!(Color::Red.to_string(), "RED");
    }

    #[test]
    fn test_serde_uses_wire_value() {
        let json = serde_json::to_string(&vec![Color::Red, Color::Unknown("X".into())]).unwrap();
        assert_eq!(json, r#"["RED","X"]"#);

        let back: Vec<Color> = serde_json::from_str(r#"["DARK_BLUE","PINK"]"#).unwrap();
        assert_eq!(back, vec![Color::DarkBlue, Color::Unknown("PINK".to_string())]);
    }
}
