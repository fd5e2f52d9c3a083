//! Toast notifications
//!
//! Short-lived messages shown over the bottom-right corner: calculation
//! errors, coin streaks, rate refresh failures.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// How long a toast stays up
pub const DEFAULT_TTL: Duration = Duration::from_secs(3);

/// Most toasts kept queued at once
pub const MAX_QUEUED: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Info => " Info ",
            Self::Warning => " Warning ",
            Self::Error => " Error ",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
            ttl: DEFAULT_TTL,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Error)
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.ttl
    }
}

/// Oldest-first queue; only the front toast is drawn
#[derive(Debug, Default)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a toast, dropping the oldest when full
    pub fn push(&mut self, notification: Notification) {
        if self.items.len() == MAX_QUEUED {
            self.items.pop_front();
        }
        self.items.push_back(notification);
    }

    /// Drop the front toast once it has been visible for its full ttl
    ///
    /// Queued toasts start their clock when they reach the front.
    pub fn expire(&mut self, now: Instant) {
        if self.items.front().is_some_and(|n| n.is_expired_at(now)) {
            self.items.pop_front();
            if let Some(next) = self.items.front_mut() {
                next.created_at = now;
            }
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub struct NotificationWidget<'a> {
    notification: &'a Notification,
}

impl<'a> NotificationWidget<'a> {
    pub fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }
}

impl Widget for NotificationWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = self.notification.level.color();
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(self.notification.level.title())
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

        Paragraph::new(self.notification.message.as_str())
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = NotificationQueue::new();
        assert!(queue.is_empty());

        queue.push(Notification::info("first"));
        queue.push(Notification::error("second"));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current().unwrap().message, "first");
    }

    #[test]
    fn test_queue_drops_oldest_when_full() {
        let mut queue = NotificationQueue::new();
        for i in 0..MAX_QUEUED + 2 {
            queue.push(Notification::info(format!("n{}", i)));
        }
        assert_eq!(queue.len(), MAX_QUEUED);
        assert_eq!(queue.current().unwrap().message, "n2");
    }

    #[test]
    fn test_expire_restarts_clock_for_next() {
        let mut queue = NotificationQueue::new();
        queue.push(Notification::info("a"));
        queue.push(Notification::warning("b"));

        let start = queue.current().unwrap().created_at;
        queue.expire(start + Duration::from_secs(1));
        assert_eq!(queue.len(), 2);

        let later = start + DEFAULT_TTL;
        queue.expire(later);
        assert_eq!(queue.current().unwrap().message, "b");
        assert_eq!(queue.current().unwrap().created_at, later);

        queue.expire(later + DEFAULT_TTL);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_level_colors() {
        assert_eq!(NotificationLevel::Error.color(), Color::Red);
        assert_eq!(NotificationLevel::Warning.title(), " Warning ");
    }
}
