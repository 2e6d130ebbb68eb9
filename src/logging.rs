use log::{debug, error, info, trace, warn, LevelFilter, Log};
use env_logger::Builder;
use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Логгер для тестов, пишет в stdout, чтобы вывод перехватывался тестовым раннером
#[derive(Clone)]
pub struct TestLogger {
    level: LevelFilter,
}

impl TestLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for TestLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            println!(
                "{} [{}] {} - {}",
                chrono::Local::now().format(TIMESTAMP_FORMAT),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Настраивает логирование для библиотеки.
///
/// Повторный вызов не переустанавливает логгер: первый установленный
/// логгер остается активным, меняется только максимальный уровень.
pub fn setup_logging(level: LevelFilter) {
    let mut builder = Builder::new();

    builder.filter_level(level);
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {} - {}",
            chrono::Local::now().format(TIMESTAMP_FORMAT),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if builder.try_init().is_err() {
        log::set_max_level(level);
    }

    debug!("Логирование редактора субтитров настроено с уровнем: {}", level);
}

/// Настраивает логирование для тестов
pub fn setup_test_logging(level: LevelFilter) {
    INIT.call_once(|| {
        let logger = TestLogger::new(level);
        if log::set_boxed_logger(Box::new(logger)).is_ok() {
            log::set_max_level(level);
        }
    });
}

/// Логирует ошибку и возвращает её
pub fn log_error<T, E: std::fmt::Display>(err: E, message: &str) -> Result<T, crate::error::Error> {
    let error_message = format!("{}: {}", message, err);
    error!("{}", error_message);
    Err(crate::error::Error::LoggedError(error_message))
}

/// Логирует предупреждение
pub fn log_warning(message: &str) {
    warn!("{}", message);
}

/// Логирует информационное сообщение
pub fn log_info(message: &str) {
    info!("{}", message);
}

/// Логирует отладочное сообщение
pub fn log_debug(message: &str) {
    debug!("{}", message);
}

/// Логирует трассировочное сообщение
pub fn log_trace(message: &str) {
    trace!("{}", message);
}
