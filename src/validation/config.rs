use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Пороговые значения проверки субтитров
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Минимальная рекомендуемая длительность сегмента, мс
    pub min_duration_ms: i64,
    /// Максимальная рекомендуемая длительность сегмента, мс
    pub max_duration_ms: i64,
    /// Максимальное количество строк
    pub max_lines: usize,
    /// Максимальная длина строки в символах
    pub max_line_chars: usize,
    /// Скорость чтения, выше которой сегмент считается ошибочным
    pub max_cps: f64,
    /// Скорость чтения, выше которой выдается предупреждение
    pub warn_cps: f64,
    /// Скорость чтения, ниже которой выдается предупреждение
    pub min_cps: f64,
    /// Минимальный промежуток между соседними сегментами, мс
    pub min_gap_ms: i64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: 1000,
            max_duration_ms: 6000,
            max_lines: 2,
            max_line_chars: 42,
            max_cps: 21.0,
            warn_cps: 17.0,
            min_cps: 12.0,
            min_gap_ms: 100,
        }
    }
}

impl ValidationConfig {
    /// Загружает настройки из JSON, отсутствующие поля берутся по умолчанию
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Проверяет согласованность порогов
    pub fn check(&self) -> Result<()> {
        if self.min_duration_ms < 0 || self.min_duration_ms > self.max_duration_ms {
            return Err(Error::InvalidParameters(format!(
                "min_duration_ms ({}) must be within [0, max_duration_ms ({})]",
                self.min_duration_ms, self.max_duration_ms
            )));
        }

        if !(self.min_cps <= self.warn_cps && self.warn_cps <= self.max_cps) {
            return Err(Error::InvalidParameters(format!(
                "CPS thresholds must satisfy min_cps <= warn_cps <= max_cps, got {} / {} / {}",
                self.min_cps, self.warn_cps, self.max_cps
            )));
        }

        if self.min_gap_ms < 0 {
            return Err(Error::InvalidParameters(format!(
                "min_gap_ms must not be negative, got {}",
                self.min_gap_ms
            )));
        }

        Ok(())
    }
}
