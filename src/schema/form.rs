use serde_json::Value;

use crate::error::ConfigError;

/// The value shape a parameter field accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    /// An enumerated choice between fixed string values.
    Choice(Vec<String>),
}

/// The editor widget a field renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Text,
    TextArea,
    CodeEditor,
    NumberInput,
    Checkbox,
    Select,
    JsonEditor,
}

/// Value constraints attached to a field.
///
/// `pattern` is carried for display purposes but not matched here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub pattern: Option<String>,
}

/// One configurable parameter field, parsed from a node type's JSON Schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub widget: Widget,
    pub title: Option<String>,
    pub description: Option<String>,
    pub default: Option<Value>,
    pub required: bool,
    pub constraints: Constraints,
}

/// The parsed parameter schema of a single node type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSchema {
    pub fields: Vec<FieldSpec>,
}

/// The widget a field renders with.
///
/// Two field names carry a fixed presentation override regardless of their
/// declared kind: `expression` opens a code-style editor and `system_prompt`
/// a multi-line text area. All other fields map straight from their kind.
pub fn widget_for(name: &str, kind: &FieldKind) -> Widget {
    match name {
        "expression" => Widget::CodeEditor,
        "system_prompt" => Widget::TextArea,
        _ => match kind {
            FieldKind::String => Widget::Text,
            FieldKind::Number | FieldKind::Integer => Widget::NumberInput,
            FieldKind::Boolean => Widget::Checkbox,
            FieldKind::Choice(_) => Widget::Select,
            FieldKind::Object | FieldKind::Array => Widget::JsonEditor,
        },
    }
}

impl ParamSchema {
    /// Parses a raw JSON Schema object into a renderable field list.
    ///
    /// Parsing never fails: anything that is not a recognizable object schema
    /// with properties degrades to an empty field list, which the editor
    /// presents as "no parameters".
    pub fn parse(schema: &Value) -> Self {
        let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
            return Self::default();
        };

        let required: Vec<&str> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let fields = properties
            .iter()
            .map(|(name, property)| {
                FieldSpec::parse(name, property, required.contains(&name.as_str()))
            })
            .collect();

        Self { fields }
    }

    /// Whether this schema declares any configurable fields.
    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl FieldSpec {
    fn parse(name: &str, property: &Value, required: bool) -> Self {
        let kind = parse_kind(property);
        let widget = widget_for(name, &kind);
        Self {
            name: name.to_string(),
            title: text_member(property, "title"),
            description: text_member(property, "description"),
            default: property.get("default").cloned(),
            required,
            constraints: Constraints {
                minimum: property.get("minimum").and_then(Value::as_f64),
                maximum: property.get("maximum").and_then(Value::as_f64),
                pattern: text_member(property, "pattern"),
            },
            kind,
            widget,
        }
    }

    /// Checks a candidate value against this field's kind and constraints.
    ///
    /// `null` always passes, since an unset optional field is stored as null.
    pub fn validate(&self, value: &Value) -> Result<(), ConfigError> {
        if value.is_null() {
            return Ok(());
        }

        let accepted = match &self.kind {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Integer => value.as_i64().is_some() || value.as_u64().is_some(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Object => value.is_object(),
            FieldKind::Array => value.is_array(),
            FieldKind::Choice(choices) => value
                .as_str()
                .is_some_and(|candidate| choices.iter().any(|choice| choice == candidate)),
        };
        if !accepted {
            return Err(self.rejection(format!("expected {}", self.kind.describe())));
        }

        if let Some(number) = value.as_f64() {
            if let Some(minimum) = self.constraints.minimum
                && number < minimum
            {
                return Err(self.rejection(format!("must be at least {minimum}")));
            }
            if let Some(maximum) = self.constraints.maximum
                && number > maximum
            {
                return Err(self.rejection(format!("must be at most {maximum}")));
            }
        }

        Ok(())
    }

    fn rejection(&self, message: String) -> ConfigError {
        ConfigError::InvalidParam {
            name: self.name.clone(),
            message,
        }
    }
}

impl FieldKind {
    fn describe(&self) -> String {
        match self {
            FieldKind::String => "a string".to_string(),
            FieldKind::Number => "a number".to_string(),
            FieldKind::Integer => "an integer".to_string(),
            FieldKind::Boolean => "a boolean".to_string(),
            FieldKind::Object => "an object".to_string(),
            FieldKind::Array => "an array".to_string(),
            FieldKind::Choice(choices) => format!("one of: {}", choices.join(", ")),
        }
    }
}

fn parse_kind(property: &Value) -> FieldKind {
    if let Some(choices) = property.get("enum").and_then(Value::as_array) {
        return FieldKind::Choice(
            choices
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        );
    }

    let declared = property.get("type").and_then(Value::as_str).or_else(|| {
        // Optional fields arrive as an anyOf of the real type and null.
        property
            .get("anyOf")
            .and_then(Value::as_array)
            .and_then(|variants| {
                variants
                    .iter()
                    .filter_map(|variant| variant.get("type").and_then(Value::as_str))
                    .find(|name| *name != "null")
            })
    });

    match declared {
        Some("number") => FieldKind::Number,
        Some("integer") => FieldKind::Integer,
        Some("boolean") => FieldKind::Boolean,
        Some("object") => FieldKind::Object,
        Some("array") => FieldKind::Array,
        _ => FieldKind::String,
    }
}

fn text_member(property: &Value, key: &str) -> Option<String> {
    property.get(key).and_then(Value::as_str).map(str::to_string)
}
