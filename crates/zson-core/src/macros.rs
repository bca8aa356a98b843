//! Declarative registration of record and enum types.

/// Declare a struct together with its [`ClassDescriptor`](crate::ClassDescriptor)
/// and a [`Reflect`](crate::Reflect) impl.
///
/// Every field type must implement `Reflect`. Fields are registered in
/// declaration order as writable instance fields. A field missing from the
/// JSON keeps its default: zero, empty, `None`, the first member of an enum, or
/// a default-constructed nested record. A null or an unmatched enum name for a
/// field that is not an `Option` is reported and the default is kept.
///
/// ```
/// zson_core::record! {
///     #[derive(Debug, PartialEq)]
///     pub struct Point {
///         pub x: i32,
///         pub y: i32,
///     }
/// }
///
/// let point: Point = zson_core::from_str("{'x':1,'y':2}").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// assert_eq!(zson_core::to_string(&point).unwrap(), r#"{"x":1,"y":2}"#);
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

        impl $name {
            /// The registered class descriptor.
            pub fn class() -> &'static $crate::ClassDescriptor {
                static FIELDS: &[$crate::FieldDescriptor] = &[
                    $(
                        $crate::FieldDescriptor::new(
                            stringify!($field),
                            <$ty as $crate::Reflect>::shape,
                            <$ty as $crate::Reflect>::default_host,
                        ),
                    )*
                ];
                static CLASS: $crate::ClassDescriptor = $crate::ClassDescriptor {
                    name: stringify!($name),
                    parent: None,
                    fields: FIELDS,
                    constructible: true,
                };
                &CLASS
            }
        }

        impl $crate::Reflect for $name {
            fn shape() -> $crate::Shape {
                $crate::Shape::record(Self::class())
            }

            fn to_host(&self) -> $crate::Host {
                #[allow(unused_mut)]
                let mut record = $crate::Record::new(Self::class());
                $(
                    record.put(stringify!($field), $crate::Reflect::to_host(&self.$field));
                )*
                $crate::Host::Record(record)
            }

            fn default_host() -> $crate::Host {
                $crate::Host::Record($crate::Record::new(Self::class()))
            }

            fn from_host(host: $crate::Host) -> $crate::Result<Self> {
                #[allow(unused_mut, unused_variables)]
                let mut record = $crate::Record::from_host(host, Self::class())?;
                Ok(Self {
                    $(
                        $field: $crate::Reflect::from_host(record.take(stringify!($field)))?,
                    )*
                })
            }
        }
    };
}

/// Declare a fieldless enum together with its
/// [`EnumDescriptor`](crate::EnumDescriptor) and a [`Reflect`](crate::Reflect)
/// impl. Members serialize as their names.
///
/// ```
/// zson_core::enumeration! {
///     #[derive(Debug, Clone, Copy, PartialEq)]
///     pub enum Level { Low, High }
/// }
///
/// assert_eq!(Level::High.as_str(), "High");
/// assert_eq!(zson_core::from_str::<Level>("'High'").unwrap(), Level::High);
/// ```
#[macro_export]
macro_rules! enumeration {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $member:ident ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $( $member, )*
        }

        impl $name {
            /// The registered enum descriptor.
            pub fn descriptor() -> &'static $crate::EnumDescriptor {
                static DESCRIPTOR: $crate::EnumDescriptor = $crate::EnumDescriptor {
                    name: stringify!($name),
                    members: &[$( stringify!($member) ),*],
                };
                &DESCRIPTOR
            }

            pub fn as_str(&self) -> &'static str {
                match *self {
                    $( Self::$member => stringify!($member), )*
                }
            }
        }

        impl $crate::Reflect for $name {
            fn shape() -> $crate::Shape {
                $crate::Shape::enumeration(Self::descriptor())
            }

            fn to_host(&self) -> $crate::Host {
                $crate::EnumValue::named(Self::descriptor(), self.as_str())
                    .map_or($crate::Host::Null, $crate::Host::Enum)
            }

            /// The first member; an empty enumeration has none.
            fn default_host() -> $crate::Host {
                let descriptor = Self::descriptor();
                descriptor
                    .members
                    .first()
                    .and_then(|member| $crate::EnumValue::named(descriptor, member))
                    .map_or($crate::Host::Null, $crate::Host::Enum)
            }

            fn from_host(host: $crate::Host) -> $crate::Result<Self> {
                let name = match &host {
                    $crate::Host::Enum(member) if member.descriptor() == Self::descriptor() => {
                        member.name()
                    }
                    $crate::Host::String(text) => text.as_str(),
                    _ => "",
                };
                match name {
                    $( stringify!($member) => Ok(Self::$member), )*
                    _ => Err($crate::ZsonError::ShapeMismatch {
                        expected: stringify!($name).to_string(),
                        found: host.kind_name().to_string(),
                    }),
                }
            }
        }
    };
}
