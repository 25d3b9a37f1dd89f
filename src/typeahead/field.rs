//! Controlled-value capability
//!
//! The host owns the text; the typeahead reads it through [`ValueField::value`]
//! and reports every edit or selection through [`ValueField::on_change`].

use std::fmt;

/// Anything that can back a typeahead: a current value plus a change sink
pub trait ValueField {
    fn value(&self) -> &str;

    /// Called synchronously for every keystroke and every selection
    fn on_change(&mut self, value: &str);
}

/// A bare string is the simplest host: changes overwrite it
impl ValueField for String {
    fn value(&self) -> &str {
        self.as_str()
    }

    fn on_change(&mut self, value: &str) {
        self.clear();
        self.push_str(value);
    }
}

impl<F: ValueField + ?Sized> ValueField for &mut F {
    fn value(&self) -> &str {
        (**self).value()
    }

    fn on_change(&mut self, value: &str) {
        (**self).on_change(value);
    }
}

impl<F: ValueField + ?Sized> ValueField for Box<F> {
    fn value(&self) -> &str {
        (**self).value()
    }

    fn on_change(&mut self, value: &str) {
        (**self).on_change(value);
    }
}

/// Stores the value and forwards each change to a callback
pub struct CallbackField<C> {
    value: String,
    callback: C,
}

impl<C> CallbackField<C>
where
    C: FnMut(&str),
{
    pub fn new(value: impl Into<String>, callback: C) -> Self {
        Self {
            value: value.into(),
            callback,
        }
    }

    /// Replace the value from the host side (e.g. a form reset). The callback
    /// is not invoked: this is not a user edit.
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

impl<C> ValueField for CallbackField<C>
where
    C: FnMut(&str),
{
    fn value(&self) -> &str {
        &self.value
    }

    fn on_change(&mut self, value: &str) {
        self.value.clear();
        self.value.push_str(value);
        (self.callback)(value);
    }
}

impl<C> fmt::Debug for CallbackField<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackField")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_field_takes_the_new_value() {
        let mut s = String::from("old");
        s.on_change("new");
        assert_eq!(s.value(), "new");
    }

    #[test]
    fn callback_field_reports_edits_but_not_resets() {
        let mut seen = Vec::new();
        {
            let mut field = CallbackField::new("", |v: &str| seen.push(v.to_string()));
            field.on_change("a");
            field.on_change("ab");
            field.set("");
            assert_eq!(field.value(), "");
        }
        assert_eq!(seen, vec!["a", "ab"]);
    }

    #[test]
    fn borrowed_field_writes_through() {
        let mut owner = String::new();
        {
            let mut borrowed = &mut owner;
            ValueField::on_change(&mut borrowed, "Globex");
        }
        assert_eq!(owner, "Globex");
    }
}
