use std::collections::HashMap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::data::{Column, DataTable};
use crate::error::{MosaicError, MosaicResult};

/// A numeric variable: either a column of the data table or inline values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Variable {
    Column(String),
    Values(Vec<f64>),
}

impl Variable {
    pub fn resolve_numeric(&self, data: Option<&DataTable>) -> MosaicResult<Vec<f64>> {
        match self {
            Self::Values(values) => Ok(values.clone()),
            Self::Column(name) => match data {
                Some(table) => Ok(table.numeric_column(name)?.to_vec()),
                None => Err(MosaicError::UnknownColumn(name.clone())),
            },
        }
    }
}

impl From<&str> for Variable {
    fn from(name: &str) -> Self {
        Self::Column(name.to_owned())
    }
}

impl From<String> for Variable {
    fn from(name: String) -> Self {
        Self::Column(name)
    }
}

impl From<Vec<f64>> for Variable {
    fn from(values: Vec<f64>) -> Self {
        Self::Values(values)
    }
}

/// A categorical variable: a column (text or numeric) or inline labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Category {
    Column(String),
    Labels(Vec<String>),
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::Column(name.to_owned())
    }
}

impl From<Vec<String>> for Category {
    fn from(labels: Vec<String>) -> Self {
        Self::Labels(labels)
    }
}

/// Sorted distinct levels plus the level index of every observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categorical {
    pub levels: Vec<String>,
    pub codes: Vec<usize>,
}

impl Categorical {
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Observation indices belonging to each level, in level order.
    #[must_use]
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.levels.len()];
        for (index, &code) in self.codes.iter().enumerate() {
            groups[code].push(index);
        }
        groups
    }
}

impl Category {
    /// Numeric columns order their levels numerically, text lexicographically.
    pub fn resolve(&self, data: Option<&DataTable>) -> MosaicResult<Categorical> {
        match self {
            Self::Labels(labels) => Ok(encode_text(labels)),
            Self::Column(name) => {
                let table = data.ok_or_else(|| MosaicError::UnknownColumn(name.clone()))?;
                match table.column(name) {
                    Some(Column::Text(labels)) => Ok(encode_text(labels)),
                    Some(Column::Numeric(values)) => encode_numeric(values),
                    None => Err(MosaicError::UnknownColumn(name.clone())),
                }
            }
        }
    }
}

fn encode_text(labels: &[String]) -> Categorical {
    let mut levels: Vec<String> = labels.to_vec();
    levels.sort();
    levels.dedup();
    let lookup: HashMap<&str, usize> = levels
        .iter()
        .enumerate()
        .map(|(code, level)| (level.as_str(), code))
        .collect();
    let codes = labels.iter().map(|label| lookup[label.as_str()]).collect();
    Categorical { levels, codes }
}

fn encode_numeric(values: &[f64]) -> MosaicResult<Categorical> {
    if values.iter().any(|value| value.is_nan()) {
        return Err(MosaicError::InvalidData(
            "categorical values must not be NaN".to_owned(),
        ));
    }

    let mut distinct: Vec<OrderedFloat<f64>> = values.iter().copied().map(OrderedFloat).collect();
    distinct.sort();
    distinct.dedup();
    let lookup: HashMap<OrderedFloat<f64>, usize> = distinct
        .iter()
        .enumerate()
        .map(|(code, value)| (*value, code))
        .collect();

    Ok(Categorical {
        levels: distinct.iter().map(|value| format_level(value.0)).collect(),
        codes: values.iter().map(|value| lookup[&OrderedFloat(*value)]).collect(),
    })
}

fn format_level(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
