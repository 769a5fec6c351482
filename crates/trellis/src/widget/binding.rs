//! Two-way value binding and text conversion for input widgets.
//!
//! A [`ValueBinding`] connects a widget to a typed value owned elsewhere
//! (usually by a parent widget or application model) through a getter/setter
//! pair. A [`FieldCodec`] supplies the pure conversion functions between the
//! value and its text representation: a formatter, a parser, and an optional
//! error describer for invalid text.
//!
//! Parsers signal invalid text by returning `None`. That is an ordinary
//! steady state for an input widget, not an error; nothing here returns
//! `Result`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use trellis_core::Property;

/// Getter/setter pair over an externally owned value.
pub struct ValueBinding<T> {
    get: Box<dyn Fn() -> T + Send + Sync>,
    set: Box<dyn Fn(T) + Send + Sync>,
}

impl<T> ValueBinding<T> {
    /// Create a binding from a getter and a setter.
    pub fn new(
        get: impl Fn() -> T + Send + Sync + 'static,
        set: impl Fn(T) + Send + Sync + 'static,
    ) -> Self {
        Self {
            get: Box::new(get),
            set: Box::new(set),
        }
    }

    /// Read the bound value.
    pub fn get(&self) -> T {
        (self.get)()
    }

    /// Write the bound value.
    pub fn set(&self, value: T) {
        (self.set)(value);
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> ValueBinding<T> {
    /// Bind to a shared [`Property`].
    pub fn from_property(property: Arc<Property<T>>) -> Self {
        let reader = Arc::clone(&property);
        Self::new(
            move || reader.get(),
            move |value| {
                property.set(value);
            },
        )
    }
}

impl<T> fmt::Debug for ValueBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueBinding").finish_non_exhaustive()
    }
}

/// Pure conversion functions between a typed value and its text form.
pub struct FieldCodec<T> {
    format: Box<dyn Fn(&T) -> String + Send + Sync>,
    parse: Box<dyn Fn(&str) -> Option<T> + Send + Sync>,
    describe_error: Option<Box<dyn Fn(&str) -> Option<String> + Send + Sync>>,
}

impl<T> FieldCodec<T> {
    /// Create a codec from a formatter and a parser.
    ///
    /// The formatter must be total and stable (same value, same text); the
    /// reconciliation logic in the validating field relies on that to avoid
    /// rewriting an equivalent buffer.
    pub fn new(
        format: impl Fn(&T) -> String + Send + Sync + 'static,
        parse: impl Fn(&str) -> Option<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            format: Box::new(format),
            parse: Box::new(parse),
            describe_error: None,
        }
    }

    /// Attach an error describer consulted for invalid text.
    ///
    /// The describer may decline by returning `None`, in which case
    /// [`error_message`](Self::error_message) falls back to a generic
    /// message.
    pub fn with_error_describer(
        mut self,
        describe: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.describe_error = Some(Box::new(describe));
        self
    }

    /// Format a value to text.
    pub fn format(&self, value: &T) -> String {
        (self.format)(value)
    }

    /// Parse text to a value; `None` means the text is invalid.
    pub fn parse(&self, text: &str) -> Option<T> {
        (self.parse)(text)
    }

    /// Human-readable message for invalid text.
    pub fn error_message(&self, text: &str) -> String {
        self.describe_error
            .as_ref()
            .and_then(|describe| describe(text))
            .unwrap_or_else(|| format!("\"{}\" is an invalid value", text))
    }
}

impl<T: fmt::Display + FromStr> FieldCodec<T> {
    /// A codec using the type's `Display` and `FromStr` implementations.
    pub fn from_display_str() -> Self {
        Self::new(|value| value.to_string(), |text| text.parse().ok())
    }
}

impl<T> fmt::Debug for FieldCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldCodec")
            .field("has_error_describer", &self.describe_error.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(ValueBinding<i64>: Send, Sync);
    assert_impl_all!(FieldCodec<i64>: Send, Sync);

    #[test]
    fn test_binding_round_trip() {
        let store = Arc::new(Property::new(1i64));
        let binding = ValueBinding::from_property(Arc::clone(&store));

        assert_eq!(binding.get(), 1);
        binding.set(9);
        assert_eq!(store.get(), 9);
        assert_eq!(binding.get(), 9);
    }

    #[test]
    fn test_closure_binding() {
        let store = Arc::new(Property::new("x".to_string()));
        let reader = Arc::clone(&store);
        let writer = Arc::clone(&store);
        let binding = ValueBinding::new(move || reader.get(), move |v| writer.set_silent(v));

        binding.set("y".to_string());
        assert_eq!(binding.get(), "y");
    }

    #[test]
    fn test_codec_format_parse_inverse() {
        let codec: FieldCodec<i64> = FieldCodec::from_display_str();
        for value in [-3i64, 0, 42, 9999] {
            assert_eq!(codec.parse(&codec.format(&value)), Some(value));
        }
        assert_eq!(codec.parse("abc"), None);
        assert_eq!(codec.parse(""), None);
    }

    #[test]
    fn test_error_message_fallback() {
        let codec: FieldCodec<i64> = FieldCodec::from_display_str();
        assert_eq!(codec.error_message("abc"), "\"abc\" is an invalid value");
    }

    #[test]
    fn test_error_describer_overrides_fallback() {
        let codec: FieldCodec<i64> = FieldCodec::from_display_str()
            .with_error_describer(|text| {
                text.contains('.')
                    .then(|| "whole numbers only".to_string())
            });

        assert_eq!(codec.error_message("1.5"), "whole numbers only");
        // Describer declines, generic message applies.
        assert_eq!(codec.error_message("abc"), "\"abc\" is an invalid value");
    }
}
