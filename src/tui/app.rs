//! Application state for the TUI
//!
//! The App struct holds everything needed for rendering and handling events.

use std::time::Instant;

use crate::calc::coin::{CoinFace, CoinGame, CoinSource, OsRngSource};
use crate::calc::exchange::{convert_currency, RateTable};
use crate::calc::radix::{render_integer, Radix};
use crate::calc::state::{Action, Calculator};
use crate::config::settings::Settings;
use crate::error::{CalcError, CalcResult};
use crate::models::{Activity, ActivityKind, HistoryEntry, Session};
use crate::services::activity::RECENT_LIMIT;
use crate::services::{ActivityService, HistoryService, RatePoller, RateUpdate};
use crate::storage::Storage;

use super::widgets::{Notification, NotificationQueue};

/// Screens, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Calculator,
    Programmer,
    Coin,
    History,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Self::Calculator, Self::Programmer, Self::Coin, Self::History];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Calculator => "Calculator",
            Self::Programmer => "Programmer",
            Self::Coin => "Coin Flip",
            Self::History => "History",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Whether keypad keys drive the calculator here
    pub fn has_keypad(&self) -> bool {
        matches!(self, Self::Calculator | Self::Programmer)
    }
}

/// Mode of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the `:` command line; keypad mapping is off
    Command,
}

/// Main application state
pub struct App<'a> {
    pub storage: &'a Storage,
    pub settings: &'a Settings,
    pub should_quit: bool,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub command_input: String,
    pub show_help: bool,
    pub calculator: Calculator,
    pub coin: CoinGame<Box<dyn CoinSource>>,
    pub notifications: NotificationQueue,

    /// Latest exchange rates, once the poller has delivered some
    pub rates: Option<RateTable>,

    /// Logged-in user at startup; persisted history needs one
    pub session: Option<Session>,

    poller: Option<RatePoller>,
}

impl<'a> App<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        let session = match storage.users.session() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "could not read session");
                None
            }
        };

        Self {
            storage,
            settings,
            should_quit: false,
            screen: Screen::default(),
            input_mode: InputMode::default(),
            command_input: String::new(),
            show_help: false,
            calculator: Calculator::new(settings.precision),
            coin: CoinGame::new(Box::new(OsRngSource) as Box<dyn CoinSource>),
            notifications: NotificationQueue::new(),
            rates: None,
            session,
            poller: None,
        }
    }

    pub fn with_coin_source(mut self, source: Box<dyn CoinSource>) -> Self {
        self.coin = CoinGame::new(source);
        self
    }

    pub fn with_rate_poller(mut self, poller: RatePoller) -> Self {
        self.poller = Some(poller);
        self
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn enter_command_mode(&mut self) {
        self.input_mode = InputMode::Command;
        self.command_input.clear();
    }

    pub fn exit_command_mode(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command_input.clear();
    }

    /// Feed one keypad action to the calculator
    ///
    /// Errors become toasts; a completed calculation is persisted for the
    /// logged-in user. Returns whether the action was accepted.
    pub fn apply(&mut self, action: Action) -> bool {
        match self.calculator.apply(action) {
            Ok(Some(record)) => {
                self.persist(record);
                true
            }
            Ok(None) => true,
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    /// Apply actions in order, stopping at the first failure
    pub fn apply_all(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            if !self.apply(action) {
                break;
            }
        }
    }

    fn persist(&mut self, record: HistoryEntry) {
        let Some(session) = self.session.clone() else {
            return;
        };
        let kind = match self.calculator.state().base {
            Radix::Decimal => ActivityKind::Calculation,
            _ => ActivityKind::Programmer,
        };
        let description = record.to_string();

        let result = HistoryService::new(self.storage)
            .record(session.user_id, [record])
            .and_then(|_| {
                ActivityService::new(self.storage).log(session.user_id, kind, description)
            });
        if let Err(e) = result {
            self.report(&e);
        }
    }

    fn report(&mut self, err: &CalcError) {
        let notification = if err.is_format() {
            Notification::warning(err.to_string())
        } else {
            Notification::error(err.to_string())
        };
        self.notify(notification);
    }

    /// Value of the display in every supported radix
    pub fn representations(&self) -> CalcResult<Vec<(Radix, String)>> {
        let value = self.calculator.state().integer_value()?;
        Ok(Radix::ALL
            .iter()
            .map(|r| (*r, format!("{}{}", r.prefix(), render_integer(value, r.value()))))
            .collect())
    }

    pub fn flip_coin(&mut self) -> CoinFace {
        let face = self.coin.flip();
        let streak = self.coin.streak();
        if streak.count >= 3 && streak.count % 3 == 0 {
            self.notify(Notification::info(format!("{} × {} in a row!", streak.count, face)));
        }

        if let Some(session) = &self.session {
            let user_id = session.user_id;
            let logged = ActivityService::new(self.storage).log(
                user_id,
                ActivityKind::CoinFlip,
                face.to_string(),
            );
            if let Err(e) = logged {
                self.report(&e);
            }
        }
        face
    }

    pub fn reset_coin(&mut self) {
        self.coin.reset();
    }

    /// Convert `amount` of the rate base into `code` with the latest rates
    pub fn exchange(&mut self, amount: f64, code: &str) -> CalcResult<f64> {
        let table = self
            .rates
            .as_ref()
            .ok_or_else(|| CalcError::Source("No exchange rates loaded yet".into()))?;
        let converted = convert_currency(amount, code, table)?;

        if let Some(session) = &self.session {
            let description = format!(
                "{} {} = {:.2} {}",
                amount,
                table.base,
                converted,
                code.trim().to_uppercase()
            );
            ActivityService::new(self.storage).log(
                session.user_id,
                ActivityKind::Exchange,
                description,
            )?;
        }
        Ok(converted)
    }

    /// Ask the poller for fresh rates
    pub fn refresh_rates(&mut self) {
        match &self.poller {
            Some(poller) => poller.request_refresh(),
            None => self.notify(Notification::warning("No rate source configured")),
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.notifications.expire(now);

        let mut updates = Vec::new();
        if let Some(poller) = &self.poller {
            while let Some(update) = poller.try_recv() {
                updates.push(update);
            }
        }
        for update in updates {
            match update {
                RateUpdate::Refreshed(table) => self.rates = Some(table),
                RateUpdate::Failed(message) => self.notify(Notification::warning(message)),
            }
        }
    }

    /// Persisted calculations of the logged-in user, newest first
    pub fn saved_history(&self) -> CalcResult<Vec<HistoryEntry>> {
        match &self.session {
            Some(session) => HistoryService::new(self.storage).list(session.user_id, usize::MAX),
            None => Ok(Vec::new()),
        }
    }

    pub fn recent_activity(&self) -> CalcResult<Vec<Activity>> {
        match &self.session {
            Some(session) => {
                ActivityService::new(self.storage).recent(session.user_id, RECENT_LIMIT)
            }
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::coin::ScriptedSource;
    use crate::crypto::SecretString;
    use crate::services::{AuthService, StaticRateSource};
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::time::Duration;

    fn keys(app: &mut App, seq: &str) {
        app.apply_all(Action::parse_sequence(seq).unwrap());
    }

    fn logged_in(storage: &Storage) -> Session {
        let auth = AuthService::new(storage);
        let password = SecretString::from("hunter22");
        auth.register("ada", &password).unwrap();
        auth.login("ada", &password).unwrap()
    }

    #[test]
    fn test_screen_cycle() {
        assert_eq!(Screen::Calculator.next(), Screen::Programmer);
        assert_eq!(Screen::History.next(), Screen::Calculator);
        assert_eq!(Screen::Calculator.previous(), Screen::History);
        assert!(!Screen::Coin.has_keypad());
    }

    #[test]
    fn test_calculation_without_session_is_not_persisted() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        keys(&mut app, "7 + 3 =");
        assert_eq!(app.calculator.display(), "10");
        assert!(app.saved_history().unwrap().is_empty());
    }

    #[test]
    fn test_calculation_persisted_for_session() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let session = logged_in(&storage);
        let mut app = App::new(&storage, &settings);

        keys(&mut app, "6 * 7 =");
        let saved = app.saved_history().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].result, "42");

        let activity = ActivityService::new(&storage).list(session.user_id).unwrap();
        assert_eq!(activity[0].kind, ActivityKind::Calculation);
    }

    #[test]
    fn test_errors_become_notifications() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);

        keys(&mut app, "8 / 0 =");
        assert_eq!(app.calculator.display(), "0");
        assert!(app.notifications.current().unwrap().message.contains("zero"));
    }

    #[test]
    fn test_representations() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings);
        keys(&mut app, "255");

        let reps = app.representations().unwrap();
        assert_eq!(reps[0], (Radix::Binary, "0b11111111".to_string()));
        assert_eq!(reps[3], (Radix::Hexadecimal, "0xFF".to_string()));
    }

    #[test]
    fn test_coin_streak_notification() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let mut app = App::new(&storage, &settings)
            .with_coin_source(Box::new(ScriptedSource::new(vec![0.1])));

        for _ in 0..3 {
            assert_eq!(app.flip_coin(), CoinFace::Heads);
        }
        assert_eq!(app.coin.stats().total, 3);
        assert!(app.notifications.current().unwrap().message.contains("3 × Heads"));

        app.reset_coin();
        assert_eq!(app.coin.stats().total, 0);
    }

    #[test]
    fn test_rates_arrive_on_tick() {
        let storage = Storage::in_memory();
        let settings = Settings::default();
        let mut rates = BTreeMap::new();
        rates.insert("EUR".to_string(), 0.5);
        let table = RateTable::new("USD", rates, Utc::now()).unwrap();
        let poller = RatePoller::spawn(
            Arc::new(StaticRateSource::new(table)),
            "USD",
            Duration::from_secs(3600),
            Duration::from_millis(10),
        );
        let mut app = App::new(&storage, &settings).with_rate_poller(poller);

        assert!(app.exchange(10.0, "EUR").is_err());

        let deadline = Instant::now() + Duration::from_secs(2);
        while app.rates.is_none() && Instant::now() < deadline {
            app.on_tick(Instant::now());
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!((app.exchange(10.0, "EUR").unwrap() - 5.0).abs() < 1e-9);
    }
}
