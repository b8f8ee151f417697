use std::fmt::{self, Display};

///
/// Value stored in the free-form annotation map of a locus.
///
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl AnnotationValue {
    ///
    /// Numeric view of the value, if it has one. Text is not parsed.
    ///
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AnnotationValue::Integer(v) => Some(*v as f64),
            AnnotationValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnnotationValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationValue::Text(s) => write!(f, "{}", s),
            AnnotationValue::Integer(v) => write!(f, "{}", v),
            AnnotationValue::Float(v) => write!(f, "{:?}", v),
            AnnotationValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        AnnotationValue::Text(value.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(value: String) -> Self {
        AnnotationValue::Text(value)
    }
}

impl From<i64> for AnnotationValue {
    fn from(value: i64) -> Self {
        AnnotationValue::Integer(value)
    }
}

impl From<f64> for AnnotationValue {
    fn from(value: f64) -> Self {
        AnnotationValue::Float(value)
    }
}

impl From<bool> for AnnotationValue {
    fn from(value: bool) -> Self {
        AnnotationValue::Bool(value)
    }
}
