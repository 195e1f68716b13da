//! Source configuration: workbooks per year, worksheet codes per month,
//! holiday tables and code catalog extensions.
//!
//! # Invariants
//! - Month codes only exist for months `1..=12`.
//! - Relative workbook and cache paths resolve against the config file
//!   directory.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shiftsheet_core::{
    CodeCatalog, CodeResolver, SheetKey, SourceError, SourceResult, StaticHolidayCalendar,
};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_MONTH_CODES: [&str; 12] = [
    "ENE", "FEB", "MAR", "ABR", "MAY", "JUN", "JUL", "AGO", "SEP", "OCT", "NOV", "DIC",
];

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration loading failure.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    InvalidMonthCode(u32),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
            Self::InvalidMonthCode(month) => {
                write!(f, "month code configured for invalid month {month}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::InvalidMonthCode(_) => None,
        }
    }
}

/// Workbook file and worksheet name selected for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetRef {
    pub workbook: PathBuf,
    pub worksheet: String,
}

/// Deserialized configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Year → workbook path.
    #[serde(default)]
    pub workbooks: BTreeMap<i32, PathBuf>,
    /// Month (1..=12) → worksheet name.
    #[serde(default = "default_month_codes")]
    pub month_codes: BTreeMap<u32, String>,
    #[serde(default)]
    pub regional_holidays: BTreeMap<NaiveDate, String>,
    /// Takes precedence over `regional_holidays` on the same date.
    #[serde(default)]
    pub local_holidays: BTreeMap<NaiveDate, String>,
    #[serde(default)]
    pub cache_db: Option<PathBuf>,
    /// Extra or replacement code table entries.
    #[serde(default)]
    pub codes: CodeCatalog,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            workbooks: BTreeMap::new(),
            month_codes: default_month_codes(),
            regional_holidays: BTreeMap::new(),
            local_holidays: BTreeMap::new(),
            cache_db: None,
            codes: CodeCatalog::default(),
            base_dir: None,
        }
    }
}

/// `ENE` … `DIC`.
pub fn default_month_codes() -> BTreeMap<u32, String> {
    DEFAULT_MONTH_CODES
        .iter()
        .zip(1..)
        .map(|(code, month)| (month, (*code).to_string()))
        .collect()
}

/// Reads and validates the JSON configuration at `path`.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<SourceConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = parse_config(&text).map_err(|err| match err {
        ConfigError::Parse { source, .. } => ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    config.base_dir = path.parent().map(Path::to_path_buf);
    Ok(config)
}

/// Parses and validates configuration JSON.
pub fn parse_config(text: &str) -> ConfigResult<SourceConfig> {
    let config: SourceConfig = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
        path: PathBuf::new(),
        source,
    })?;
    if let Some(month) = config
        .month_codes
        .keys()
        .copied()
        .find(|month| !(1..=12).contains(month))
    {
        return Err(ConfigError::InvalidMonthCode(month));
    }
    Ok(config)
}

impl SourceConfig {
    /// Selects the workbook and worksheet holding `key`.
    ///
    /// # Errors
    /// - `SourceError::UnconfiguredYear` when no workbook is set for the year.
    /// - `SourceError::InvalidMonth` when the month has no worksheet code.
    pub fn worksheet_for(&self, key: SheetKey) -> SourceResult<WorksheetRef> {
        let workbook = self
            .workbooks
            .get(&key.year)
            .ok_or(SourceError::UnconfiguredYear(key.year))?;
        let worksheet = self
            .month_codes
            .get(&key.month)
            .ok_or(SourceError::InvalidMonth(key.month))?;
        Ok(WorksheetRef {
            workbook: self.resolve_path(workbook),
            worksheet: worksheet.clone(),
        })
    }

    /// Cache database path, resolved like workbook paths.
    pub fn cache_path(&self) -> Option<PathBuf> {
        self.cache_db.as_deref().map(|path| self.resolve_path(path))
    }

    pub fn holiday_calendar(&self) -> StaticHolidayCalendar {
        StaticHolidayCalendar::new(self.regional_holidays.clone(), self.local_holidays.clone())
    }

    /// Code resolver over the shipped tables plus `codes`.
    pub fn code_resolver(&self) -> CodeResolver {
        CodeResolver::with_extra(self.codes.clone())
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{default_month_codes, parse_config, ConfigError};
    use shiftsheet_core::{SheetKey, SourceError};

    #[test]
    fn month_codes_default_to_spanish_abbreviations() {
        let codes = default_month_codes();
        assert_eq!(codes.len(), 12);
        assert_eq!(codes[&1], "ENE");
        assert_eq!(codes[&8], "AGO");
        assert_eq!(codes[&12], "DIC");
    }

    #[test]
    fn unknown_year_and_month_are_lookup_errors() {
        let config = parse_config(r#"{ "workbooks": { "2025": "/data/2025.xlsx" } }"#).unwrap();
        let found = config.worksheet_for(SheetKey::new(2025, 3)).unwrap();
        assert_eq!(found.worksheet, "MAR");
        assert_eq!(
            config.worksheet_for(SheetKey::new(2024, 3)).unwrap_err(),
            SourceError::UnconfiguredYear(2024)
        );
        assert_eq!(
            config.worksheet_for(SheetKey::new(2025, 13)).unwrap_err(),
            SourceError::InvalidMonth(13)
        );
    }

    #[test]
    fn month_codes_outside_the_year_are_rejected() {
        let err = parse_config(r#"{ "month_codes": { "13": "XXX" } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMonthCode(13)));
    }

    #[test]
    fn holidays_and_codes_are_read() {
        let config = parse_config(
            r#"{
                "local_holidays": { "2025-04-23": "Fiesta local" },
                "codes": { "descriptions": { "NEW": "nueva empresa" } }
            }"#,
        )
        .unwrap();
        assert_eq!(config.local_holidays.len(), 1);
        assert_eq!(config.code_resolver().organization_of("NEW"), "Nueva empresa");
    }
}
