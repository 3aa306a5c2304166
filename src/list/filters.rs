//! Filter criteria for list views

/// One named filter and its current value.
///
/// `None` and the empty string both mean "not filtering on this field".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterField {
    pub name: String,
    pub label: String,
    pub value: Option<String>,
    pub default: Option<String>,
    /// Allowed `(value, label)` pairs; empty for free text
    pub choices: Vec<(String, String)>,
}

impl FilterField {
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: None,
            default: None,
            choices: Vec::new(),
        }
    }

    pub fn select(name: &str, label: &str, choices: &[(&str, &str)]) -> Self {
        Self {
            choices: choices
                .iter()
                .map(|(value, label)| (value.to_string(), label.to_string()))
                .collect(),
            ..Self::text(name, label)
        }
    }

    /// Whether the field currently constrains the query
    pub fn is_active(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// Move a select field to its next choice, wrapping through "unset"
    pub fn cycle_choice(&mut self) {
        if self.choices.is_empty() {
            return;
        }
        let current = self
            .value
            .as_deref()
            .and_then(|value| self.choices.iter().position(|(choice, _)| choice == value));
        self.value = match current {
            None => self.choices.first().map(|(value, _)| value.clone()),
            Some(index) if index + 1 < self.choices.len() => Some(self.choices[index + 1].0.clone()),
            Some(_) => None,
        };
    }

    /// Label of the current choice for select fields, raw value otherwise
    pub fn display_value(&self) -> &str {
        let Some(value) = self.value.as_deref() else {
            return "";
        };
        self.choices
            .iter()
            .find(|(choice, _)| choice == value)
            .map_or(value, |(_, label)| label.as_str())
    }
}

/// Ordered set of filters for one list view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    fields: Vec<FilterField>,
}

impl FilterSet {
    pub fn new(fields: Vec<FilterField>) -> Self {
        let mut set = Self { fields };
        set.reset();
        set
    }

    pub fn fields(&self) -> &[FilterField] {
        &self.fields
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut FilterField> {
        self.fields.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .and_then(|field| field.value.as_deref())
    }

    /// Set a filter value; returns false for unknown filter names
    pub fn set(&mut self, name: &str, value: Option<String>) -> bool {
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => {
                field.value = value;
                true
            }
            None => false,
        }
    }

    /// Restore every filter to its default
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = field.default.clone();
        }
    }

    /// `(name, value)` pairs of the filters that carry a value, in declaration order
    pub fn non_empty(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter(|field| field.is_active())
            .filter_map(|field| field.value.as_ref().map(|value| (field.name.clone(), value.clone())))
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.fields.iter().filter(|field| field.is_active()).count()
    }
}
