//! Form input fields.

/// What a field accepts from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    /// Free text.
    #[default]
    Text,
    /// Numeric text; the value is still stored as a string.
    Number,
}

impl FieldKind {
    /// Whether a typed character is accepted by this kind of input.
    pub fn accepts(self, c: char) -> bool {
        match self {
            FieldKind::Text => !c.is_control(),
            FieldKind::Number => c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'),
        }
    }
}

/// A single input on a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Label shown above the input.
    pub label: String,
    /// Hint shown while the value is empty.
    pub placeholder: String,
    /// Input kind.
    pub kind: FieldKind,
    value: String,
}

impl Field {
    /// Creates an empty field.
    pub fn new(label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            label: label.into(),
            placeholder: String::new(),
            kind,
            value: String::new(),
        }
    }

    /// Creates an empty text field.
    pub fn text(label: impl Into<String>) -> Self {
        Self::new(label, FieldKind::Text)
    }

    /// Creates an empty number field.
    pub fn number(label: impl Into<String>) -> Self {
        Self::new(label, FieldKind::Number)
    }

    /// Sets the placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// True if the value is the empty string.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub(crate) fn set(&mut self, value: String) {
        self.value = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_accepts() {
        for c in ['0', '9', '.', '-', 'e'] {
            assert!(FieldKind::Number.accepts(c), "{c}");
        }
        for c in ['a', ' ', '\n'] {
            assert!(!FieldKind::Number.accepts(c), "{c:?}");
        }
    }

    #[test]
    fn test_text_accepts() {
        assert!(FieldKind::Text.accepts('a'));
        assert!(FieldKind::Text.accepts(' '));
        assert!(!FieldKind::Text.accepts('\t'));
    }

    #[test]
    fn test_field_builder() {
        let field = Field::number("First").with_placeholder("Enter first number");
        assert_eq!(field.kind, FieldKind::Number);
        assert_eq!(field.placeholder, "Enter first number");
        assert!(field.is_empty());
    }
}
