use crate::error::Result;

/// Внешний источник текста субтитров.
///
/// Сервис исправления получает сериализованные субтитры и возвращает
/// исправленный текст того же формата; сервис транскрипции получает `None`
/// и возвращает новые субтитры. Транспорт остается на стороне реализации.
pub trait CaptionProvider {
    /// Название источника для журнала
    fn name(&self) -> &str;

    /// Возвращает текст субтитров в формате SRT или WebVTT
    fn produce(&self, input: Option<&str>) -> Result<String>;
}

impl<F> CaptionProvider for F
where
    F: Fn(Option<&str>) -> Result<String>,
{
    fn name(&self) -> &str {
        "closure"
    }

    fn produce(&self, input: Option<&str>) -> Result<String> {
        self(input)
    }
}
