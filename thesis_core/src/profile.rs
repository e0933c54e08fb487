// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use crate::error::FactoryError;
use crate::types::{Inches, Points};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr as _;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

pub const UNKNOWN_ID: &str = "UNKNOWN";
pub const DEFAULT_UNI_NAME: &str = "University";
pub const DEFAULT_COURSE_NAME: &str = "Thesis";
pub const DEFAULT_YEAR: &str = "2026";
pub const DEFAULT_REFERENCE_STYLE: &str = "APA";
pub const DEFAULT_FONT_NAME: &str = "Times New Roman";
pub const DEFAULT_FONT_SIZE: Points = Points(12.0);
/// Read when `line_spacing` is absent, before normalisation.
pub const DEFAULT_LINE_SPACING: f64 = 1.5;

/// How the printed thesis is bound.
///
/// `Double` prints on both sides of the sheet, so left/right margins become
/// inside/outside and the page layout is mirrored.
#[derive(
    Debug,
    PartialEq,
    Eq,
    Hash,
    Clone,
    Copy,
    Default,
    EnumIter,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "String", into = "&'static str")]
#[strum(ascii_case_insensitive)]
pub enum BindingMode {
    #[default]
    #[strum(to_string = "single", serialize = "single-sided")]
    Single,
    #[strum(to_string = "double", serialize = "double-sided", serialize = "mirrored")]
    Double,
}

impl TryFrom<String> for BindingMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(value.trim()).map_err(|_| format!("Unknown binding mode: {value}"))
    }
}

/// The academic year as written in the input, which may be a number or free text
/// such as `"2025/26"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AcademicYear {
    Number(i64),
    Text(String),
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Margins as given in the input. Any edge may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarginSpec {
    pub top: Option<Inches>,
    pub bottom: Option<Inches>,
    pub left: Option<Inches>,
    pub right: Option<Inches>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FontSpec {
    pub name: Option<String>,
    pub size: Option<Points>,
}

/// One university's formatting requirements, decoded from the input file.
///
/// Every field is optional; the accessors supply the defaults so callers never
/// have to. A field that is present with the wrong JSON type fails decoding.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InstitutionProfile {
    pub id: Option<String>,
    pub uni_name: Option<String>,
    pub course_name: Option<String>,
    pub year: Option<AcademicYear>,
    pub verified_year: Option<i32>,
    pub margins: Option<MarginSpec>,
    pub binding: Option<BindingMode>,
    pub font: Option<FontSpec>,
    pub line_spacing: Option<f64>,
    pub preliminary_order: Option<Vec<String>>,
    pub reference_style: Option<String>,
}

impl InstitutionProfile {
    /// Decodes a single record from the loaded input collection.
    pub fn from_record(record: &serde_json::Value) -> Result<Self, FactoryError> {
        Self::deserialize(record).map_err(|source| FactoryError::Profile {
            id: record_id(record).to_owned(),
            source,
        })
    }

    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(UNKNOWN_ID)
    }

    pub fn uni_name(&self) -> &str {
        self.uni_name.as_deref().unwrap_or(DEFAULT_UNI_NAME)
    }

    pub fn course_name(&self) -> &str {
        self.course_name.as_deref().unwrap_or(DEFAULT_COURSE_NAME)
    }

    pub fn year_label(&self) -> String {
        self.year
            .as_ref()
            .map_or_else(|| DEFAULT_YEAR.to_owned(), ToString::to_string)
    }

    pub fn binding(&self) -> BindingMode {
        self.binding.unwrap_or_default()
    }

    pub fn margins(&self) -> MarginSpec {
        self.margins.unwrap_or_default()
    }

    pub fn font_name(&self) -> &str {
        self.font
            .as_ref()
            .and_then(|f| f.name.as_deref())
            .unwrap_or(DEFAULT_FONT_NAME)
    }

    pub fn font_size(&self) -> Points {
        self.font
            .as_ref()
            .and_then(|f| f.size)
            .unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// The spacing exactly as requested, before normalisation.
    pub fn requested_line_spacing(&self) -> f64 {
        self.line_spacing.unwrap_or(DEFAULT_LINE_SPACING)
    }

    pub fn preliminary_order(&self) -> &[String] {
        self.preliminary_order.as_deref().unwrap_or_default()
    }

    pub fn reference_style(&self) -> &str {
        self.reference_style
            .as_deref()
            .unwrap_or(DEFAULT_REFERENCE_STYLE)
    }
}

/// Best-effort identifier of a raw record, for log lines and error reports.
pub fn record_id(record: &serde_json::Value) -> &str {
    record
        .get("id")
        .and_then(serde_json::Value::as_str)
        .unwrap_or(UNKNOWN_ID)
}
