pub mod error;
pub mod subtitle;
pub mod store;
pub mod validation;
pub mod stats;
pub mod history;
pub mod locator;
pub mod provider;
pub mod logging;

pub use error::{Error, Result, ErrorType};
pub use logging::{
    setup_logging, setup_test_logging, log_error, log_warning, log_info, log_debug, log_trace
};
pub use subtitle::{
    DetectedFormat, Segment, SegmentDraft, SegmentPatch, SubtitleFormat,
    SubtitleParser, SubtitleWriter
};
pub use validation::{
    IssueKind, Severity, ValidationConfig, ValidationIssue, ValidationReport, ValidationResult
};
pub use stats::Stats;
pub use history::{CommitOrigin, History, DEFAULT_HISTORY_CAPACITY};
pub use provider::CaptionProvider;

use std::path::Path;

/// Настройки редактора субтитров
#[derive(Debug, Clone)]
pub struct EditorOptions {
    /// Формат экспорта, пока ничего не загружено
    pub default_format: SubtitleFormat,

    /// Максимальное количество шагов отмены
    pub history_capacity: usize,

    /// Пороги проверки
    pub validation: ValidationConfig,

    /// Уровень логирования
    pub log_level: log::LevelFilter,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            default_format: SubtitleFormat::Srt,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            validation: ValidationConfig::default(),
            log_level: log::LevelFilter::Info,
        }
    }
}

/// Результат изменения коллекции
#[derive(Debug, Clone)]
pub struct EditOutcome {
    /// Изменилась ли коллекция
    pub changed: bool,
    /// Идентификатор созданного сегмента (только для вставки)
    pub segment_id: Option<String>,
    /// Отчет проверки коллекции после изменения
    pub report: ValidationReport,
}

/// Сеанс редактирования: коллекция сегментов под управлением истории
pub struct CaptionEditor {
    options: EditorOptions,
    format: SubtitleFormat,
    history: History<Vec<Segment>>,
}

impl CaptionEditor {
    /// Создает новый редактор с заданными настройками
    pub fn new(options: EditorOptions) -> Self {
        #[cfg(test)]
        {
            setup_test_logging(options.log_level);
        }
        #[cfg(not(test))]
        {
            setup_logging(options.log_level);
        }

        log_debug(&format!("Создан редактор субтитров с настройками: {:?}", options));

        Self {
            format: options.default_format,
            history: History::with_capacity(Vec::new(), options.history_capacity),
            options,
        }
    }

    /// Устанавливает емкость истории, история при этом очищается
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        log_debug(&format!("Установлена емкость истории: {}", capacity));
        self.options.history_capacity = capacity;
        self.history = History::with_capacity(self.history.present().clone(), capacity);
        self
    }

    /// Устанавливает пороги проверки
    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        log_debug(&format!("Установлены пороги проверки: {:?}", validation));
        self.options.validation = validation;
        self
    }

    /// Устанавливает формат экспорта
    pub fn with_format(mut self, format: SubtitleFormat) -> Self {
        log_debug(&format!("Установлен формат экспорта: {:?}", format));
        self.format = format;
        self
    }

    /// Текущая коллекция сегментов
    pub fn segments(&self) -> &[Segment] {
        self.history.present()
    }

    /// Текущий формат экспорта
    pub fn format(&self) -> SubtitleFormat {
        self.format
    }

    /// История изменений
    pub fn history(&self) -> &History<Vec<Segment>> {
        &self.history
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Загружает субтитры из строки, история очищается.
    ///
    /// Формат экспорта становится равным формату загруженного текста.
    pub fn load_str(&mut self, content: &str) -> Result<ValidationReport> {
        let segments = SubtitleParser::parse_str(content)?;

        if let DetectedFormat::Known(format) = SubtitleParser::detect_format(content) {
            self.format = format;
        }

        log_info(&format!("Загружено {} сегментов ({:?})", segments.len(), self.format));
        self.history.reset(segments);
        Ok(self.validate())
    }

    /// Загружает субтитры из файла, история очищается
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<ValidationReport> {
        let path = path.as_ref();
        log_info(&format!("Загрузка субтитров из файла: {}", path.display()));

        let content = std::fs::read_to_string(path)?;
        self.load_str(&content).map_err(|e| {
            log_error::<(), _>(&e, &format!("Ошибка при загрузке файла {}", path.display())).ok();
            e
        })
    }

    /// Сериализует коллекцию в текущем формате
    pub fn export(&self) -> String {
        self.export_as(self.format)
    }

    /// Сериализует коллекцию в указанном формате
    pub fn export_as(&self, format: SubtitleFormat) -> String {
        SubtitleWriter::to_string(self.segments(), format)
    }

    /// Вставляет сегмент в позицию `index`
    pub fn insert(&mut self, index: usize, draft: SegmentDraft) -> EditOutcome {
        let (next, id) = store::insert_at(self.segments(), index, draft);
        let mut outcome = self.apply(next, "вставка");
        outcome.segment_id = Some(id);
        outcome
    }

    /// Обновляет поля сегмента; неизвестный идентификатор ничего не меняет
    pub fn update(&mut self, id: &str, patch: &SegmentPatch) -> EditOutcome {
        let next = store::update(self.segments(), id, patch);
        self.apply(next, "обновление")
    }

    /// Удаляет сегмент; неизвестный идентификатор ничего не меняет
    pub fn remove(&mut self, id: &str) -> EditOutcome {
        let next = store::remove(self.segments(), id);
        self.apply(next, "удаление")
    }

    /// Перемещает сегмент в порядке отображения
    pub fn move_segment(&mut self, from: usize, to: usize) -> EditOutcome {
        let next = store::move_segment(self.segments(), from, to);
        self.apply(next, "перемещение")
    }

    /// Сдвигает все сегменты по времени
    pub fn shift(&mut self, offset_ms: i64) -> EditOutcome {
        let next = store::shift(self.segments(), offset_ms);
        self.apply(next, "сдвиг")
    }

    /// Принимает коллекцию от слоя представления с явным источником изменения
    pub fn set_segments(&mut self, segments: Vec<Segment>, origin: CommitOrigin) -> EditOutcome {
        let changed = self.history.commit(segments, origin);
        log_debug(&format!("Коллекция установлена извне ({:?}), изменена: {}", origin, changed));
        self.outcome(changed)
    }

    /// Отменяет последнее изменение
    pub fn undo(&mut self) -> EditOutcome {
        let changed = self.history.undo();
        log_debug(&format!("Отмена: {}", if changed { "выполнена" } else { "нечего отменять" }));
        self.outcome(changed)
    }

    /// Повторяет отмененное изменение
    pub fn redo(&mut self) -> EditOutcome {
        let changed = self.history.redo();
        log_debug(&format!("Повтор: {}", if changed { "выполнен" } else { "нечего повторять" }));
        self.outcome(changed)
    }

    /// Очищает историю, коллекция сохраняется
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Проверяет текущую коллекцию
    pub fn validate(&self) -> ValidationReport {
        validation::validate_segments(self.segments(), &self.options.validation)
    }

    /// Статистика текущей коллекции
    pub fn stats(&self) -> Stats {
        stats::compute(self.segments())
    }

    /// Индекс сегмента, активного в момент воспроизведения `time_ms`
    pub fn active_index(&self, time_ms: i64) -> Option<usize> {
        locator::locate(self.segments(), time_ms)
    }

    /// Отправляет текущие субтитры на исправление и применяет результат как одно изменение.
    ///
    /// Если количество реплик не изменилось, сегменты сохраняют идентификаторы
    /// по позиции; иначе все сегменты получают новые идентификаторы.
    pub fn apply_correction<P: CaptionProvider>(&mut self, provider: &P) -> Result<EditOutcome> {
        let input = self.export();
        let mut segments = self.fetch_segments(provider, Some(&input))?;

        let current = self.segments();
        if segments.len() == current.len() {
            for (segment, previous) in segments.iter_mut().zip(current) {
                segment.id = previous.id.clone();
            }
        } else {
            log_debug(&format!(
                "Количество реплик изменилось ({} -> {}), идентификаторы назначены заново",
                current.len(),
                segments.len()
            ));
        }

        Ok(self.apply(segments, "исправление"))
    }

    /// Заменяет коллекцию результатом транскрипции как одно изменение
    pub fn apply_transcription<P: CaptionProvider>(&mut self, provider: &P) -> Result<EditOutcome> {
        let segments = self.fetch_segments(provider, None)?;
        Ok(self.apply(segments, "транскрипция"))
    }

    fn fetch_segments<P: CaptionProvider>(&self, provider: &P, input: Option<&str>) -> Result<Vec<Segment>> {
        log_info(&format!("Запрос субтитров у источника '{}'", provider.name()));

        let output = provider.produce(input)?;
        match SubtitleParser::parse_str(&output) {
            Ok(segments) => Ok(segments),
            Err(e) => {
                log_error::<(), _>(&e, &format!("Источник '{}' вернул некорректные субтитры", provider.name())).ok();
                Err(e)
            }
        }
    }

    fn apply(&mut self, next: Vec<Segment>, action: &str) -> EditOutcome {
        let changed = self.history.commit(next, CommitOrigin::User);
        log_debug(&format!(
            "Изменение '{}': {}, сегментов {}",
            action,
            if changed { "применено" } else { "без изменений" },
            self.segments().len()
        ));
        self.outcome(changed)
    }

    fn outcome(&self, changed: bool) -> EditOutcome {
        EditOutcome {
            changed,
            segment_id: None,
            report: self.validate(),
        }
    }
}

impl Default for CaptionEditor {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}
