//! История изменений с отменой и повтором.
//!
//! Каждое изменение помечается источником. Изменение из источника
//! `Replay` (состояние, пришедшее обратно от наблюдателя после отмены
//! или повтора) заменяет текущее значение, но не записывается в историю.

use crate::logging::log_trace;
use std::collections::VecDeque;

/// Емкость истории по умолчанию
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Источник изменения
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOrigin {
    /// Прямое изменение пользователем
    User,
    /// Воспроизведение состояния из истории
    Replay,
}

/// Обертка над значением с историей отмены и повтора
#[derive(Debug, Clone)]
pub struct History<T> {
    /// Прошлые значения, самое старое в начале
    past: VecDeque<T>,
    present: T,
    /// Отмененные значения, ближайшее в начале
    future: VecDeque<T>,
    capacity: usize,
    last_origin: CommitOrigin,
}

impl<T: Clone + PartialEq> History<T> {
    /// Создает историю с емкостью по умолчанию
    pub fn new(initial: T) -> Self {
        Self::with_capacity(initial, DEFAULT_HISTORY_CAPACITY)
    }

    /// Создает историю с указанной емкостью
    pub fn with_capacity(initial: T, capacity: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present: initial,
            future: VecDeque::new(),
            capacity,
            last_origin: CommitOrigin::User,
        }
    }

    /// Текущее значение
    pub fn present(&self) -> &T {
        &self.present
    }

    /// Прошлые значения от самого старого к самому новому
    pub fn past(&self) -> impl Iterator<Item = &T> {
        self.past.iter()
    }

    /// Отмененные значения от ближайшего к самому дальнему
    pub fn future(&self) -> impl Iterator<Item = &T> {
        self.future.iter()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Источник последнего изменения текущего значения
    pub fn last_origin(&self) -> CommitOrigin {
        self.last_origin
    }

    /// Устанавливает новое значение.
    ///
    /// Для `User` значение, равное текущему, игнорируется; иначе текущее
    /// уходит в прошлое, а будущее очищается. Для `Replay` заменяется только
    /// текущее значение. Возвращает `true`, если текущее значение изменилось.
    pub fn commit(&mut self, next: T, origin: CommitOrigin) -> bool {
        if next == self.present {
            return false;
        }

        match origin {
            CommitOrigin::User => {
                let previous = std::mem::replace(&mut self.present, next);
                self.push_past(previous);
                self.future.clear();
            }
            CommitOrigin::Replay => {
                self.present = next;
            }
        }

        self.last_origin = origin;
        log_trace(&format!(
            "История: изменение {:?}, прошлое {}, будущее {}",
            origin,
            self.past.len(),
            self.future.len()
        ));
        true
    }

    /// Вычисляет новое значение из текущего и фиксирует его
    pub fn commit_with<F>(&mut self, update: F, origin: CommitOrigin) -> bool
    where
        F: FnOnce(&T) -> T,
    {
        let next = update(&self.present);
        self.commit(next, origin)
    }

    /// Отменяет последнее изменение; `false`, если отменять нечего
    pub fn undo(&mut self) -> bool {
        let previous = match self.past.pop_back() {
            Some(previous) => previous,
            None => return false,
        };

        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        self.last_origin = CommitOrigin::Replay;
        true
    }

    /// Повторяет отмененное изменение; `false`, если повторять нечего
    pub fn redo(&mut self) -> bool {
        let next = match self.future.pop_front() {
            Some(next) => next,
            None => return false,
        };

        let current = std::mem::replace(&mut self.present, next);
        self.push_past(current);
        self.last_origin = CommitOrigin::Replay;
        true
    }

    /// Очищает прошлое и будущее, текущее значение сохраняется
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    /// Заменяет текущее значение и очищает историю
    pub fn reset(&mut self, value: T) {
        self.present = value;
        self.clear();
        self.last_origin = CommitOrigin::User;
    }

    fn push_past(&mut self, value: T) {
        if self.capacity == 0 {
            return;
        }
        self.past.push_back(value);
        while self.past.len() > self.capacity {
            self.past.pop_front();
        }
    }
}
