/// Declares a task configuration struct.
///
/// Every field is written with its literal wire key and its default. The
/// generated struct flattens [`BaseTaskConfig`](crate::models::BaseTaskConfig),
/// implements `Default`, accepts partial objects on deserialization and
/// implements [`TaskConfig`](crate::models::TaskConfig) for the given task kind.
macro_rules! task_config {
    (
        $(#[$meta:meta])*
        pub struct $name:ident for $kind:ident validated_by $validate:path {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty = $default:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[allow(non_snake_case)]
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(default)]
        pub struct $name {
            #[serde(flatten)]
            pub base: $crate::models::BaseTaskConfig,
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )*
        }

        impl $name {
            pub const KIND: $crate::registry::TaskKind = $crate::registry::TaskKind::$kind;
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    base: $crate::models::BaseTaskConfig::default(),
                    $( $field: $default, )*
                }
            }
        }

        impl $crate::models::TaskConfig for $name {
            fn kind(&self) -> $crate::registry::TaskKind {
                Self::KIND
            }

            fn declared_defaults(&self) -> Result<::serde_json::Value, ::serde_json::Error> {
                $crate::models::base::declared_defaults_of::<Self>()
            }

            fn update_from_value(
                &mut self,
                value: ::serde_json::Value,
            ) -> Result<(), ::serde_json::Error> {
                *self = ::serde_json::from_value(value)?;
                Ok(())
            }

            fn validate(&self) -> Result<(), $crate::error::ValidationError> {
                $validate(self)
            }
        }
    };
    (
        $(#[$meta:meta])*
        pub struct $name:ident for $kind:ident {
            $($body:tt)*
        }
    ) => {
        task_config! {
            $(#[$meta])*
            pub struct $name for $kind validated_by $crate::models::base::always_valid {
                $($body)*
            }
        }
    };
}
