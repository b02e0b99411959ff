//! Internal macros for reducing boilerplate across the schema types.

/// Implements `HasMetadata` for a type with a `metadata` map field.
macro_rules! impl_has_metadata {
    ($type:ty) => {
        impl $crate::traits::HasMetadata for $type {
            fn set_metadata(&mut self, key: &str, value: &str) {
                self.metadata.insert(key.to_string(), value.to_string());
            }

            fn get_metadata(&self, key: &str) -> Option<&str> {
                self.metadata.get(key).map(String::as_str)
            }
        }
    };
}

/// Implements name accessors for a type with a `name: Option<String>` field.
macro_rules! impl_named {
    ($type:ty) => {
        impl $type {
            /// The display name, if one was set.
            #[must_use]
            pub fn name(&self) -> Option<&str> {
                self.name.as_deref()
            }

            /// Set the display name.
            pub fn set_name(&mut self, name: &str) {
                self.name = Some(name.to_string());
            }
        }
    };
}

pub(crate) use {impl_has_metadata, impl_named};
