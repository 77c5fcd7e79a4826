//! The `tuple_record!` declaration macro.

/// Declares a tuple record: a struct whose fields map to JSON array positions.
///
/// Each field is written `<position> => <required|optional> <name>: <Type>`
/// and becomes a `pub <name>: Option<Type>` field. The macro derives
/// `Default` and implements [`TupleRecord`](crate::TupleRecord),
/// [`Validate`](crate::Validate), and array-shaped `Serialize` /
/// `Deserialize`. Slot types must implement `Serialize`,
/// `DeserializeOwned` and `Validate`. Two fields claiming the same position
/// are a compile error. Skipped positions are allowed and read back as
/// `null`.
///
/// ```
/// use tuple_codec::tuple_record;
///
/// tuple_record! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Reading {
///         0 => required sensor: String,
///         1 => optional celsius: f64,
///     }
/// }
///
/// let reading: Reading = tuple_codec::decode(br#"["sensor-1", 21.5]"#).unwrap();
/// assert_eq!(reading.sensor.as_deref(), Some("sensor-1"));
/// assert_eq!(tuple_codec::encode(&reading).unwrap(), br#"["sensor-1",21.5]"#);
/// ```
#[macro_export]
macro_rules! tuple_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $position:literal => $flag:ident $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: ::core::option::Option<$ty>,
            )*
        }

        impl $crate::TupleRecord for $name {
            const SLOTS: &'static [$crate::SlotSpec] = &[
                $(
                    $crate::SlotSpec {
                        position: $position,
                        name: ::core::stringify!($field),
                        required: $crate::__slot_flag!($flag),
                    },
                )*
            ];

            fn hydrate(
                &mut self,
                position: usize,
                raw: &$crate::__private::serde_json::value::RawValue,
            ) -> ::core::result::Result<(), $crate::__private::serde_json::Error> {
                match position {
                    $(
                        $position => {
                            self.$field = ::core::option::Option::Some(
                                $crate::__private::serde_json::from_str::<$ty>(raw.get())?,
                            );
                        }
                    )*
                    _ => {}
                }
                ::core::result::Result::Ok(())
            }

            fn element(
                &self,
                position: usize,
            ) -> ::core::result::Result<
                $crate::__private::serde_json::Value,
                $crate::__private::serde_json::Error,
            > {
                match position {
                    $(
                        $position => match &self.$field {
                            ::core::option::Option::Some(value) => {
                                $crate::__private::serde_json::to_value(value)
                            }
                            ::core::option::Option::None => {
                                ::core::result::Result::Ok($crate::__private::serde_json::Value::Null)
                            }
                        },
                    )*
                    _ => ::core::result::Result::Ok($crate::__private::serde_json::Value::Null),
                }
            }

            fn nested(&self, position: usize) -> ::core::option::Option<&dyn $crate::Validate> {
                match position {
                    $(
                        $position => self
                            .$field
                            .as_ref()
                            .map(|value| value as &dyn $crate::Validate),
                    )*
                    _ => ::core::option::Option::None,
                }
            }
        }

        const _: () = ::core::assert!(
            $crate::__private::has_unique_positions(<$name as $crate::TupleRecord>::SLOTS),
            "tuple_record! fields must not share a position"
        );

        impl $crate::Validate for $name {
            fn validate(&self) -> ::core::result::Result<(), $crate::ValidationErrors> {
                $crate::validate(self)
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                let elements = $crate::encode_elements(self)
                    .map_err(<S::Error as $crate::__private::serde::ser::Error>::custom)?;
                $crate::__private::serde::Serialize::serialize(&elements, serializer)
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let raw: ::std::boxed::Box<$crate::__private::serde_json::value::RawValue> =
                    $crate::__private::serde::Deserialize::deserialize(deserializer)?;
                $crate::__private::decode_nested(raw.get().as_bytes())
                    .map_err(<D::Error as $crate::__private::serde::de::Error>::custom)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __slot_flag {
    (required) => {
        true
    };
    (optional) => {
        false
    };
}
