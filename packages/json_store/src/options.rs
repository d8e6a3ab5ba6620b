use serde::{Deserialize, Serialize};

/// How a [`JsonFile`](crate::JsonFile) encodes and writes its document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Spaces per indentation level in the written file.
    pub indent: usize,
    /// Write to a temporary file next to the target and rename it into place, instead of
    /// truncating the target and writing it directly.
    pub atomic_write: bool,
}

impl StoreOptions {
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_atomic_write(mut self, atomic_write: bool) -> Self {
        self.atomic_write = atomic_write;
        self
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        StoreOptions {
            indent: 4,
            atomic_write: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let options: StoreOptions = serde_json::from_str(r#"{"indent": 2}"#).unwrap();
        assert_eq!(options.indent, 2);
        assert!(options.atomic_write);
    }

    #[test]
    fn builders_override_defaults() {
        let options = StoreOptions::default()
            .with_indent(0)
            .with_atomic_write(false);
        assert_eq!(
            options,
            StoreOptions {
                indent: 0,
                atomic_write: false,
            }
        );
    }
}
