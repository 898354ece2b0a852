use crate::types::{Dtype, Value};

/// A named, typed column of a [`Frame`](super::Frame).
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    dtype: Dtype,
    values: Vec<Value>,
}

impl Column {
    /// Creates a column whose dtype is inferred from its values.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        let dtype = Dtype::infer(&values);
        Self {
            name: name.into(),
            dtype,
            values,
        }
    }

    /// Creates a column with an explicit dtype.
    pub fn with_dtype(name: impl Into<String>, dtype: Dtype, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            dtype,
            values,
        }
    }

    pub fn int(name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        Self::with_dtype(name, Dtype::Int64, values.into_iter().map(Value::Int).collect())
    }

    pub fn float(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::with_dtype(
            name,
            Dtype::Float64,
            values.into_iter().map(Value::Float).collect(),
        )
    }

    pub fn text<S: Into<String>>(name: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        Self::with_dtype(
            name,
            Dtype::Text,
            values.into_iter().map(|s| Value::Text(s.into())).collect(),
        )
    }

    pub fn bool(name: impl Into<String>, values: impl IntoIterator<Item = bool>) -> Self {
        Self::with_dtype(name, Dtype::Bool, values.into_iter().map(Value::Bool).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> Dtype {
        self.dtype
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }
}
