//! Column model for tables.

use std::fmt;
use std::sync::Arc;

use ocm_digger::Value;

use crate::descriptions::ColumnDescription;
use crate::text::text_width;

/// Projection from a row object to a column value.
pub type Projection = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Explicit source for the values of a column.
///
/// Columns without one take their value from the row object via the digger,
/// using the column name as path.
#[derive(Clone)]
pub enum ColumnValue {
    /// Same value in every row.
    Constant(Value),
    /// Value computed from the row object.
    Function(Projection),
}

impl ColumnValue {
    /// Creates a constant column value.
    pub fn constant(value: impl Into<Value>) -> Self {
        ColumnValue::Constant(value.into())
    }

    /// Creates a column value computed from each row object.
    pub fn function<F, R>(f: F) -> Self
    where
        F: Fn(&Value) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        ColumnValue::Function(Arc::new(move |object| f(object).into()))
    }

    pub(crate) fn eval(&self, object: &Value) -> Value {
        match self {
            ColumnValue::Constant(value) => value.clone(),
            ColumnValue::Function(f) => f(object),
        }
    }
}

impl fmt::Debug for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            ColumnValue::Function(_) => f.write_str("Function"),
        }
    }
}

/// One column of a table.
#[derive(Clone, Debug)]
pub struct Column {
    /// Canonical name, also the digger path for the column.
    pub name: String,
    /// Header text.
    pub header: String,
    /// Current width in characters.
    pub width: usize,
    /// Explicit value source, if any.
    pub value: Option<ColumnValue>,
}

impl Column {
    /// Creates a column with a synthesized header and a width equal to the
    /// length of the name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Column {
            header: default_header(&name),
            width: text_width(&name),
            name,
            value: None,
        }
    }

    /// Creates a column using the overrides of a description.
    pub fn described(description: &ColumnDescription) -> Self {
        let mut column = Column::new(description.name.clone());
        if let Some(header) = &description.header {
            column.header = header.clone();
        }
        if let Some(width) = description.width {
            column.width = width;
        }
        column
    }

    /// Sets an explicit value source.
    pub fn with_value(mut self, value: ColumnValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Grows the width to fit `text`. Never shrinks.
    pub(crate) fn learn(&mut self, text: &str) {
        self.width = self.width.max(text_width(text));
    }
}

/// Header synthesized from a column name: `.` and `_` become spaces and the
/// result is upper-cased.
///
/// ```rust
/// use ocm_output::default_header;
///
/// assert_eq!(default_header("external_id"), "EXTERNAL ID");
/// assert_eq!(default_header("api.url"), "API URL");
/// ```
pub fn default_header(name: &str) -> String {
    name.replace(['.', '_'], " ").to_uppercase()
}

/// Splits comma separated column specs into column names.
///
/// Names are trimmed and empty entries dropped.
///
/// ```rust
/// use ocm_output::parse_columns;
///
/// assert_eq!(parse_columns(["id, name", ",api.url,"]), ["id", "name", "api.url"]);
/// ```
pub fn parse_columns<I, S>(specs: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    specs
        .into_iter()
        .flat_map(|spec| {
            spec.as_ref()
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_column_defaults() {
        let column = Column::new("external_id");
        assert_eq!(column.header, "EXTERNAL ID");
        assert_eq!(column.width, 11);
        assert!(column.value.is_none());
    }

    #[test]
    fn described_column_overrides() {
        let column = Column::described(&ColumnDescription {
            name: "openshift_version".to_string(),
            header: Some("VERSION".to_string()),
            width: Some(7),
        });
        assert_eq!(column.name, "openshift_version");
        assert_eq!(column.header, "VERSION");
        assert_eq!(column.width, 7);
    }

    #[test]
    fn described_column_partial() {
        let column = Column::described(&ColumnDescription {
            name: "region.id".to_string(),
            header: None,
            width: Some(14),
        });
        assert_eq!(column.header, "REGION ID");
        assert_eq!(column.width, 14);
    }

    #[test]
    fn learning_never_shrinks() {
        let mut column = Column::new("name");
        column.learn("mycluster");
        assert_eq!(column.width, 9);
        column.learn("c");
        assert_eq!(column.width, 9);
    }

    #[test]
    fn column_values() {
        let object = Value::from("obj");
        assert_eq!(ColumnValue::constant("x").eval(&object), Value::from("x"));
        let upper = ColumnValue::function(|v: &Value| v.to_string().to_uppercase());
        assert_eq!(upper.eval(&object), Value::from("OBJ"));
    }

    #[test]
    fn parse_column_specs() {
        assert_eq!(parse_columns(["id,name"]), ["id", "name"]);
        assert_eq!(parse_columns([" id ", "", " , "]), ["id"]);
        assert!(parse_columns(Vec::<String>::new()).is_empty());
    }
}
