use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Named hyperparameters reported by an estimator, sorted by name.
pub type Params = BTreeMap<String, ParamValue>;

/// Which fit shape an algorithm wrapper accepts.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TrainingContract {
    /// `fit(x, y)`: labels are required alongside the features.
    Supervised,
    /// `fit(x)`: features only (clustering, decomposition, ...).
    Unsupervised,
}

impl TrainingContract {
    pub fn requires_labels(&self) -> bool {
        matches!(self, TrainingContract::Supervised)
    }

    /// Human readable shape of the `fit` call for this contract.
    pub fn fit_arguments(&self) -> &'static str {
        match self {
            TrainingContract::Supervised => "features and labels",
            TrainingContract::Unsupervised => "features only",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingContract::Supervised => "supervised",
            TrainingContract::Unsupervised => "unsupervised",
        }
    }
}

impl fmt::Display for TrainingContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrainingContract {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "supervised" => Ok(TrainingContract::Supervised),
            "unsupervised" => Ok(TrainingContract::Unsupervised),
            _ => Err(format!(
                "Unknown training contract: {}. Expected `supervised` or `unsupervised`",
                s
            )),
        }
    }
}

/// A single hyperparameter value as shown to the GUI.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    /// Unsigned values that do not fit in an `i64`.
    UInt(u64),
    Float(f64),
    Text(String),
    List(Vec<ParamValue>),
    None,
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::UInt(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Text(v) => write!(f, "{:?}", v),
            ParamValue::List(values) => {
                f.write_str("[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                f.write_str("]")
            }
            ParamValue::None => f.write_str("None"),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(ParamValue::UInt(v), ParamValue::Int)
    }
}

impl From<usize> for ParamValue {
    fn from(v: usize) -> Self {
        ParamValue::from(v as u64)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Float(v as f64)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(ParamValue::None, Into::into)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::List(values.into_iter().map(Into::into).collect())
    }
}
