//! Declarative mapping tables for libclang enumerations and bitmasks
//!
//! Each libclang enum is declared once as a `name = value` table. The macros
//! expand that table into the Rust type, both conversion directions and the
//! spelling, so a value cannot drift between the three.

/// Declare a closed set of libclang constants plus an `Unknown(raw)` variant.
///
/// ```ignore
/// foreign_enum! {
///     pub enum EntityRefKind as "IdxEntityRef" {
///         Direct = 1,
///         Implicit = 2,
///     }
/// }
/// ```
macro_rules! foreign_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $prefix:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )*
            /// A value not known to this binding, carried verbatim
            Unknown(u32),
        }

        #[allow(dead_code)]
        impl $name {
            /// Every named variant, in table order
            pub const KNOWN: &'static [$name] = &[$($name::$variant),*];

            /// Map a raw libclang value to its variant
            pub const fn from_raw(raw: u32) -> Self {
                match raw {
                    $($value => $name::$variant,)*
                    other => $name::Unknown(other),
                }
            }

            /// The raw libclang value
            pub const fn to_raw(self) -> u32 {
                match self {
                    $($name::$variant => $value,)*
                    $name::Unknown(raw) => raw,
                }
            }

            pub const fn is_known(self) -> bool {
                !matches!(self, $name::Unknown(_))
            }

            pub fn spelling(self) -> ::std::borrow::Cow<'static, str> {
                match self {
                    $(
                        $name::$variant => ::std::borrow::Cow::Borrowed(
                            concat!($prefix, "=", stringify!($variant)),
                        ),
                    )*
                    $name::Unknown(raw) => ::std::borrow::Cow::Owned(
                        format!("{} unknown {}", stringify!($name), raw),
                    ),
                }
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self::from_raw(raw)
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> Self {
                value.to_raw()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.spelling())
            }
        }
    };
}

/// Declare a libclang bitmask as a `bitflags` type that keeps unknown bits.
macro_rules! foreign_flags {
    (
        $(#[$($meta:tt)*])*
        $vis:vis struct $name:ident : $bits:ty as $prefix:literal {
            $(
                $(#[$($fmeta:tt)*])*
                const $flag:ident = $value:expr => $spell:literal;
            )*
        }
    ) => {
        ::bitflags::bitflags! {
            $(#[$($meta)*])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            $vis struct $name: $bits {
                $(
                    $(#[$($fmeta)*])*
                    const $flag = $value;
                )*
            }
        }

        #[allow(dead_code)]
        impl $name {
            const SPELLINGS: &'static [(u64, &'static str)] = &[$((($value) as u64, $spell)),*];

            /// Wrap a raw libclang bitmask, keeping bits this binding does not name
            pub const fn from_raw(raw: $bits) -> Self {
                Self::from_bits_retain(raw)
            }

            pub const fn to_raw(self) -> $bits {
                self.bits()
            }

            /// Whether any set bit has no name in this binding
            pub const fn has_unknown_bits(self) -> bool {
                self.bits() & !Self::all().bits() != 0
            }

            pub fn spelling(self) -> String {
                $crate::ffi::enums::flag_spelling(
                    self.bits() as u64,
                    Self::SPELLINGS,
                    $prefix,
                    stringify!($name),
                )
            }
        }

        impl From<$bits> for $name {
            fn from(raw: $bits) -> Self {
                Self::from_raw(raw)
            }
        }

        impl From<$name> for $bits {
            fn from(value: $name) -> Self {
                value.to_raw()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.spelling())
            }
        }
    };
}

pub(crate) use foreign_enum;
pub(crate) use foreign_flags;

/// Render a bitmask as `Prefix=A|B`, or `TypeName unknown N` when some bit has no name
pub(crate) fn flag_spelling(
    bits: u64,
    table: &[(u64, &str)],
    prefix: &str,
    type_name: &str,
) -> String {
    if let Some((_, name)) = table.iter().find(|(value, _)| *value == bits) {
        return format!("{prefix}={name}");
    }
    if bits == 0 {
        return format!("{prefix}=None");
    }

    let mut remaining = bits;
    let mut names = Vec::new();
    for &(value, name) in table {
        if value != 0 && value.count_ones() == 1 && remaining & value == value {
            names.push(name);
            remaining &= !value;
        }
    }

    if remaining != 0 || names.is_empty() {
        format!("{type_name} unknown {bits}")
    } else {
        format!("{prefix}={}", names.join("|"))
    }
}
