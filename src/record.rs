use std::num::ParseIntError;

/// The two supported field kinds, plus a marker for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Text,
    Unsupported,
}

/// Mutable access to a field, by kind.
pub enum FieldSlot<'a> {
    Integer(&'a mut dyn IntegerSlot),
    Text(&'a mut String),
    Unsupported,
}

/// An integer field that can be assigned from base-10 text.
pub trait IntegerSlot {
    fn set_decimal(&mut self, raw: &str) -> Result<(), ParseIntError>;
}

/// A single record field.
///
/// Implemented for every primitive integer type and `String`. `bool`, `char`
/// and the float types implement it as [`FieldKind::Unsupported`]: records
/// using them compile but never pass the completeness check.
pub trait Field {
    fn kind(&self) -> FieldKind;

    /// Whether the field still holds its type's zero value.
    fn is_zero(&self) -> bool;

    fn slot(&mut self) -> FieldSlot<'_>;
}

/// Name-keyed registry of a struct's fields.
///
/// Usually generated by [`record!`](crate::record); implement it by hand only
/// when the struct cannot be declared through the macro.
pub trait Record {
    /// Field names in declaration order.
    fn field_names(&self) -> &'static [&'static str];

    fn field(&self, name: &str) -> Option<&dyn Field>;

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Field>;
}

macro_rules! integer_fields {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntegerSlot for $ty {
                fn set_decimal(&mut self, raw: &str) -> Result<(), ParseIntError> {
                    *self = raw.parse()?;
                    Ok(())
                }
            }

            impl Field for $ty {
                fn kind(&self) -> FieldKind {
                    FieldKind::Integer
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }

                fn slot(&mut self) -> FieldSlot<'_> {
                    FieldSlot::Integer(self)
                }
            }
        )*
    };
}

integer_fields!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! unsupported_fields {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Field for $ty {
                fn kind(&self) -> FieldKind {
                    FieldKind::Unsupported
                }

                fn is_zero(&self) -> bool {
                    false
                }

                fn slot(&mut self) -> FieldSlot<'_> {
                    FieldSlot::Unsupported
                }
            }
        )*
    };
}

unsupported_fields!(bool, char, f32, f64);

impl Field for String {
    fn kind(&self) -> FieldKind {
        FieldKind::Text
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn slot(&mut self) -> FieldSlot<'_> {
        FieldSlot::Text(self)
    }
}

/// Declare a struct and implement [`Record`] for it.
///
/// Field names are the env keys, matched exactly and case-sensitively, so
/// upper-case names usually need `#[allow(non_snake_case)]`.
///
/// ```
/// envrecord::record! {
///     #[allow(non_snake_case)]
///     #[derive(Debug, Default)]
///     pub struct Settings {
///         pub NAME: String,
///         pub TIMEOUT: i64,
///     }
/// }
///
/// use envrecord::Record;
/// assert_eq!(Settings::default().field_names(), &["NAME", "TIMEOUT"]);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            fn field_names(&self) -> &'static [&'static str] {
                &[$(stringify!($field)),*]
            }

            fn field(&self, name: &str) -> ::core::option::Option<&dyn $crate::Field> {
                match name {
                    $(stringify!($field) => ::core::option::Option::Some(&self.$field as &dyn $crate::Field),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> ::core::option::Option<&mut dyn $crate::Field> {
                match name {
                    $(stringify!($field) => ::core::option::Option::Some(&mut self.$field as &mut dyn $crate::Field),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    };
}
