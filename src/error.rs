use thiserror::Error;

/// Типы ошибок, которые могут возникнуть при работе с субтитрами
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// Ошибка ввода/вывода
    Io,
    /// Ошибка формата субтитров
    Format,
    /// Ошибка внешнего источника текста
    Provider,
    /// Неверные параметры
    InvalidParameters,
}

/// Ошибки, которые могут возникнуть при работе с субтитрами
#[derive(Debug, Error)]
pub enum Error {
    #[error("Ошибка ввода/вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ошибка формата субтитров: {0}")]
    Format(String),

    #[error("Ошибка источника субтитров: {0}")]
    Provider(String),

    #[error("Неверные параметры: {0}")]
    InvalidParameters(String),

    #[error("Ошибка логирования: {0}")]
    LoggedError(String),
}

impl Error {
    /// Создает новую ошибку указанного типа с сообщением
    pub fn new(error_type: ErrorType, message: &str) -> Self {
        match error_type {
            ErrorType::Io => Self::Io(std::io::Error::new(std::io::ErrorKind::Other, message)),
            ErrorType::Format => Self::Format(message.to_string()),
            ErrorType::Provider => Self::Provider(message.to_string()),
            ErrorType::InvalidParameters => Self::InvalidParameters(message.to_string()),
        }
    }

    /// Возвращает тип ошибки
    pub fn error_type(&self) -> Option<ErrorType> {
        match self {
            Self::Io(_) => Some(ErrorType::Io),
            Self::Format(_) => Some(ErrorType::Format),
            Self::Provider(_) => Some(ErrorType::Provider),
            Self::InvalidParameters(_) => Some(ErrorType::InvalidParameters),
            Self::LoggedError(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidParameters(err.to_string())
    }
}

/// Результат с обработкой ошибок
pub type Result<T> = std::result::Result<T, Error>;
