//! Application state and composition.
//!
//! `DrawNumberApp` is the controller: it owns the game, keeps the registered
//! views in order and relays in both directions.
//!
//! ```text
//! view --new_attempt/reset_game/quit--> DrawNumberApp --attempt/reset--> DrawNumber
//! view <--result/number_incorrect------ DrawNumberApp <--DrawResult------
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use drawnumber_domain::{ConfigurationError, DomainError, DrawNumber, GamePhase};

use crate::infrastructure::ports::{
    ConfigSourcePort, DrawNumberView, DrawNumberViewObserver, Lifecycle, RandomPort,
};
use crate::use_cases::{ConfigLoadError, LoadConfiguration};

/// Why the controller could not start. Every variant is fatal.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ConfigLoadError),
    #[error("Configuration is inconsistent: {0}")]
    Inconsistent(#[from] ConfigurationError),
    #[error("Failed to create game: {0}")]
    Game(#[from] DomainError),
}

impl StartupError {
    /// The message shown to the player by every view.
    pub fn user_message(&self) -> String {
        match self {
            StartupError::Load(e) if e.is_malformed() => {
                format!("Configuration is malformed: {e}")
            }
            StartupError::Load(_) => "Failed to load configuration file".to_string(),
            StartupError::Inconsistent(_) => "Configuration is inconsistent".to_string(),
            StartupError::Game(_) => "Failed to start the game".to_string(),
        }
    }
}

/// Main application state.
///
/// The game is behind a mutex so commands from several views are serialized.
/// The lock is never held while views are notified, so a view may issue a
/// new command from inside a notification.
pub struct DrawNumberApp {
    model: Mutex<DrawNumber>,
    views: Vec<Arc<dyn DrawNumberView>>,
    random: Arc<dyn RandomPort>,
    quit: AtomicBool,
}

impl DrawNumberApp {
    /// Wire the views, load the configuration and create the game.
    ///
    /// Every view is started in registration order before the configuration
    /// is read. On any configuration failure every view receives
    /// `display_error` and the error is returned; no game is created.
    /// On success every view is bound to the controller before this returns.
    pub fn start(
        views: Vec<Arc<dyn DrawNumberView>>,
        config_source: Arc<dyn ConfigSourcePort>,
        random: Arc<dyn RandomPort>,
    ) -> Result<Arc<Self>, StartupError> {
        tracing::info!(views = views.len(), "Starting Draw Number controller");
        for view in &views {
            view.start();
        }

        let model = match Self::create_model(config_source, random.as_ref()) {
            Ok(model) => model,
            Err(e) => {
                tracing::error!(error = %e, "Startup failed, quitting");
                let message = e.user_message();
                for view in &views {
                    view.display_error(&message);
                }
                return Err(e);
            }
        };
        tracing::info!(
            minimum = model.minimum(),
            maximum = model.maximum(),
            attempts = model.attempts(),
            "Game created"
        );

        let app = Arc::new(Self {
            model: Mutex::new(model),
            views,
            random,
            quit: AtomicBool::new(false),
        });

        let weak: Weak<DrawNumberApp> = Arc::downgrade(&app);
        let observer: Weak<dyn DrawNumberViewObserver> = weak;
        for view in &app.views {
            view.set_observer(observer.clone());
        }

        Ok(app)
    }

    fn create_model(
        config_source: Arc<dyn ConfigSourcePort>,
        random: &dyn RandomPort,
    ) -> Result<DrawNumber, StartupError> {
        let config = LoadConfiguration::new(config_source).execute()?;
        config.validate()?;
        Ok(DrawNumber::new(&config, |min, max| {
            random.gen_range(min, max)
        })?)
    }

    /// Whether `quit` has been invoked.
    pub fn is_quit(&self) -> bool {
        self.quit.load(Ordering::SeqCst)
    }

    pub fn remaining_attempts(&self) -> i32 {
        self.model().remaining_attempts()
    }

    pub fn phase(&self) -> GamePhase {
        self.model().phase()
    }

    /// Inclusive guessing range.
    pub fn range(&self) -> (i32, i32) {
        let model = self.model();
        (model.minimum(), model.maximum())
    }

    fn model(&self) -> MutexGuard<'_, DrawNumber> {
        self.model.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lifecycle(&self) -> Lifecycle {
        if self.is_quit() {
            Lifecycle::Quit
        } else {
            Lifecycle::Running
        }
    }
}

impl DrawNumberViewObserver for DrawNumberApp {
    fn new_attempt(&self, n: i32) -> Lifecycle {
        let outcome = {
            let mut model = self.model();
            // Checked under the lock so a concurrent quit is never overtaken
            if self.is_quit() {
                tracing::debug!(guess = n, "Ignoring attempt after quit");
                return Lifecycle::Quit;
            }

            let outcome = model.attempt(n);
            tracing::debug!(
                guess = n,
                remaining = model.remaining_attempts(),
                phase = %model.phase(),
                "Attempt processed"
            );
            if outcome.as_ref().is_ok_and(|result| result.is_terminal()) {
                tracing::info!(secret = model.secret(), phase = %model.phase(), "Game over");
            }
            outcome
        };

        match outcome {
            Ok(result) => {
                tracing::info!(guess = n, ?result, "Attempt classified");
                for view in &self.views {
                    view.result(result);
                }
            }
            Err(e) => {
                tracing::info!(guess = n, error = %e, "Attempt refused");
                for view in &self.views {
                    view.number_incorrect();
                }
            }
        }
        self.lifecycle()
    }

    fn reset_game(&self) -> Lifecycle {
        let random = self.random.as_ref();
        {
            let mut model = self.model();
            if self.is_quit() {
                tracing::debug!("Ignoring reset after quit");
                return Lifecycle::Quit;
            }

            match model.reset(|min, max| random.gen_range(min, max)) {
                Ok(()) => tracing::info!("Game reset"),
                Err(e) => tracing::warn!(error = %e, "Game reset failed, keeping current game"),
            }
        }
        self.lifecycle()
    }

    fn quit(&self) -> Lifecycle {
        if !self.quit.swap(true, Ordering::SeqCst) {
            tracing::info!("Quit requested, no further commands will be processed");
        }
        Lifecycle::Quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config_source::EmbeddedConfigSource;
    use crate::infrastructure::ports::{
        ConfigSourceError, MockConfigSourcePort, MockDrawNumberView, MockRandomPort,
    };
    use crate::infrastructure::random::{FixedRandom, SequenceRandom};
    use crate::test_fixtures::{Notification, NotificationLog, RecordingView};
    use drawnumber_domain::DrawResult;
    use mockall::predicate::*;
    use mockall::Sequence;

    const ONE_TO_HUNDRED_THREE_ATTEMPTS: &str = "minimum: 1\nmaximum: 100\nattempts: 3\n";

    fn source(text: &'static str) -> Arc<dyn ConfigSourcePort> {
        Arc::new(EmbeddedConfigSource::new("test config", text))
    }

    fn recording_views(
        names: &[&'static str],
    ) -> (Vec<Arc<RecordingView>>, Vec<Arc<dyn DrawNumberView>>, NotificationLog) {
        let log = NotificationLog::default();
        let concrete: Vec<Arc<RecordingView>> = names
            .iter()
            .map(|name| Arc::new(RecordingView::new(*name, log.clone())))
            .collect();
        let views = concrete
            .iter()
            .map(|view| view.clone() as Arc<dyn DrawNumberView>)
            .collect();
        (concrete, views, log)
    }

    fn start_with_secret(
        secret: i32,
        names: &[&'static str],
    ) -> (Arc<DrawNumberApp>, Vec<Arc<RecordingView>>, NotificationLog) {
        let (concrete, views, log) = recording_views(names);
        let app = DrawNumberApp::start(
            views,
            source(ONE_TO_HUNDRED_THREE_ATTEMPTS),
            Arc::new(FixedRandom(secret)),
        )
        .unwrap();
        (app, concrete, log)
    }

    #[test]
    fn start_notifies_views_and_binds_them() {
        let (app, concrete, log) = start_with_secret(42, &["first", "second"]);

        assert_eq!(
            log.entries(),
            vec![("first", Notification::Start), ("second", Notification::Start)]
        );
        for view in &concrete {
            let observer = view.observer().unwrap();
            assert_eq!(observer.new_attempt(50), Lifecycle::Running);
        }
        assert_eq!(app.remaining_attempts(), 1);
        assert_eq!(app.range(), (1, 100));
    }

    #[test]
    fn results_are_broadcast_in_registration_order() {
        let mut seq = Sequence::new();
        let mut views: Vec<Arc<dyn DrawNumberView>> = Vec::new();
        let mut mocks = Vec::new();
        for _ in 0..3 {
            let mut view = MockDrawNumberView::new();
            view.expect_start().times(1).return_const(());
            view.expect_set_observer().times(1).return_const(());
            mocks.push(view);
        }
        for view in mocks.iter_mut() {
            view.expect_result()
                .with(eq(DrawResult::TooHigh))
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());
        }
        for view in mocks.iter_mut() {
            view.expect_number_incorrect()
                .times(1)
                .in_sequence(&mut seq)
                .return_const(());
        }
        for view in mocks {
            views.push(Arc::new(view));
        }

        let app = DrawNumberApp::start(
            views,
            source(ONE_TO_HUNDRED_THREE_ATTEMPTS),
            Arc::new(FixedRandom(42)),
        )
        .unwrap();

        app.new_attempt(50);
        app.new_attempt(101);
    }

    #[test]
    fn winning_game_fans_out_identical_results() {
        let (app, _views, log) = start_with_secret(42, &["a", "b"]);

        app.new_attempt(50);
        app.new_attempt(10);
        app.new_attempt(42);

        let expected = vec![
            Notification::Start,
            Notification::Result(DrawResult::TooHigh),
            Notification::Result(DrawResult::TooLow),
            Notification::Result(DrawResult::YouWon),
        ];
        assert_eq!(log.for_view("a"), expected);
        assert_eq!(log.for_view("b"), expected);
        assert_eq!(app.phase(), GamePhase::Won);
        assert_eq!(app.remaining_attempts(), 0);
    }

    #[test]
    fn losing_game_reports_loss_on_last_attempt() {
        let (app, _views, log) = start_with_secret(42, &["only"]);

        for guess in [1, 2, 3] {
            app.new_attempt(guess);
        }

        assert_eq!(
            log.for_view("only")[1..],
            [
                Notification::Result(DrawResult::TooLow),
                Notification::Result(DrawResult::TooLow),
                Notification::Result(DrawResult::YouLost),
            ]
        );
        assert_eq!(app.phase(), GamePhase::Lost);
    }

    #[test]
    fn out_of_range_guess_sends_number_incorrect_only() {
        let (app, _views, log) = start_with_secret(42, &["a", "b"]);

        app.new_attempt(0);
        app.new_attempt(101);

        assert_eq!(app.remaining_attempts(), 3);
        for name in ["a", "b"] {
            assert_eq!(
                log.for_view(name),
                vec![
                    Notification::Start,
                    Notification::NumberIncorrect,
                    Notification::NumberIncorrect,
                ]
            );
        }
    }

    #[test]
    fn attempt_after_game_over_sends_number_incorrect() {
        let (app, _views, log) = start_with_secret(42, &["only"]);
        app.new_attempt(42);
        app.new_attempt(42);

        assert_eq!(
            log.for_view("only").last(),
            Some(&Notification::NumberIncorrect)
        );
        assert_eq!(app.phase(), GamePhase::Won);
    }

    #[test]
    fn reset_restores_budget_with_new_secret() {
        let (concrete, views, log) = recording_views(&["only"]);
        let app = DrawNumberApp::start(
            views,
            source(ONE_TO_HUNDRED_THREE_ATTEMPTS),
            Arc::new(SequenceRandom::new([42, 7])),
        )
        .unwrap();
        drop(concrete);

        for guess in [1, 2, 3] {
            app.new_attempt(guess);
        }
        assert_eq!(app.phase(), GamePhase::Lost);

        assert_eq!(app.reset_game(), Lifecycle::Running);
        assert_eq!(app.phase(), GamePhase::Active);
        assert_eq!(app.remaining_attempts(), 3);

        app.new_attempt(7);
        assert_eq!(
            log.for_view("only").last(),
            Some(&Notification::Result(DrawResult::YouWon))
        );
    }

    #[test]
    fn reset_draws_from_configured_range() {
        let mut random = MockRandomPort::new();
        random
            .expect_gen_range()
            .with(eq(1), eq(100))
            .times(3)
            .return_const(50);
        let (_concrete, views, _log) = recording_views(&["only"]);
        let app = DrawNumberApp::start(
            views,
            source(ONE_TO_HUNDRED_THREE_ATTEMPTS),
            Arc::new(random),
        )
        .unwrap();

        app.reset_game();
        app.reset_game();
    }

    #[test]
    fn quit_stops_command_processing() {
        let (app, _views, log) = start_with_secret(42, &["only"]);

        assert_eq!(app.quit(), Lifecycle::Quit);
        assert!(app.is_quit());
        assert_eq!(app.new_attempt(42), Lifecycle::Quit);
        assert_eq!(app.reset_game(), Lifecycle::Quit);
        assert_eq!(app.quit(), Lifecycle::Quit);

        assert_eq!(log.for_view("only"), vec![Notification::Start]);
        assert_eq!(app.remaining_attempts(), 3);
    }

    #[test]
    fn quit_landing_while_a_command_waits_for_the_game_wins() {
        let mut random = MockRandomPort::new();
        random.expect_gen_range().times(1).return_const(42);
        let (_concrete, views, log) = recording_views(&["only"]);
        let app = DrawNumberApp::start(
            views,
            source(ONE_TO_HUNDRED_THREE_ATTEMPTS),
            Arc::new(random),
        )
        .unwrap();

        let guard = app.model();
        let attempt = {
            let app = Arc::clone(&app);
            std::thread::spawn(move || app.new_attempt(42))
        };
        let reset = {
            let app = Arc::clone(&app);
            std::thread::spawn(move || app.reset_game())
        };
        // Both commands are now past any early check and blocked on the game
        std::thread::sleep(std::time::Duration::from_millis(50));
        app.quit();
        drop(guard);

        assert_eq!(attempt.join().unwrap(), Lifecycle::Quit);
        assert_eq!(reset.join().unwrap(), Lifecycle::Quit);
        assert_eq!(log.for_view("only"), vec![Notification::Start]);
        assert_eq!(app.remaining_attempts(), 3);
        assert_eq!(app.phase(), GamePhase::Active);
    }

    #[test]
    fn unavailable_source_notifies_every_view() {
        let mut config_source = MockConfigSourcePort::new();
        config_source
            .expect_describe()
            .return_const("config.yml".to_string());
        config_source
            .expect_open()
            .returning(|| Err(ConfigSourceError::unavailable("config.yml", "not found")));
        let (concrete, views, log) = recording_views(&["a", "b"]);

        let err = DrawNumberApp::start(views, Arc::new(config_source), Arc::new(FixedRandom(1)))
            .err()
            .unwrap();

        assert!(matches!(err, StartupError::Load(ref e) if e.is_source_unavailable()));
        let error = Notification::Error("Failed to load configuration file".to_string());
        assert_eq!(log.for_view("a"), vec![Notification::Start, error.clone()]);
        assert_eq!(log.for_view("b"), vec![Notification::Start, error]);
        for view in &concrete {
            assert!(view.observer().is_none());
        }
    }

    #[test]
    fn malformed_configuration_is_fatal() {
        let (_concrete, views, log) = recording_views(&["a", "b"]);

        let err = DrawNumberApp::start(
            views,
            source("minimum: 1\ncolor: red\nmaximum: 10\nattempts: 3\n"),
            Arc::new(FixedRandom(1)),
        )
        .err()
        .unwrap();

        assert!(matches!(
            err,
            StartupError::Load(ConfigLoadError::UnknownKey { .. })
        ));
        for name in ["a", "b"] {
            let notifications = log.for_view(name);
            assert_eq!(notifications.len(), 2);
            assert!(matches!(
                &notifications[1],
                Notification::Error(message) if message.starts_with("Configuration is malformed")
            ));
        }
    }

    #[test]
    fn non_utf8_configuration_is_reported_as_malformed() {
        let mut source = MockConfigSourcePort::new();
        source
            .expect_describe()
            .return_const("latin1.yml".to_string());
        source.expect_open().returning(|| {
            Ok(Box::new(std::io::Cursor::new(b"minimum: 1\nmaximum: 1\xff0\n".to_vec()))
                as Box<dyn std::io::BufRead + Send>)
        });
        let (_concrete, views, log) = recording_views(&["only"]);

        let err = DrawNumberApp::start(views, Arc::new(source), Arc::new(FixedRandom(1)))
            .err()
            .unwrap();

        assert!(matches!(
            err,
            StartupError::Load(ConfigLoadError::InvalidEncoding { line_number: 2 })
        ));
        assert_eq!(
            log.for_view("only")[1],
            Notification::Error("Configuration is malformed: Line 2: not valid UTF-8".to_string())
        );
    }

    #[test]
    fn inconsistent_configuration_never_creates_a_game() {
        let mut random = MockRandomPort::new();
        random.expect_gen_range().never();
        let (_concrete, views, log) = recording_views(&["a", "b"]);

        let err = DrawNumberApp::start(
            views,
            source("minimum: 10\nmaximum: 1\nattempts: 3\n"),
            Arc::new(random),
        )
        .err()
        .unwrap();

        assert!(matches!(
            err,
            StartupError::Inconsistent(ConfigurationError::EmptyRange { .. })
        ));
        let error = Notification::Error("Configuration is inconsistent".to_string());
        assert_eq!(log.for_view("a"), vec![Notification::Start, error.clone()]);
        assert_eq!(log.for_view("b"), vec![Notification::Start, error]);
    }

    #[test]
    fn missing_field_is_inconsistent() {
        let (_concrete, views, _log) = recording_views(&["only"]);

        let err = DrawNumberApp::start(
            views,
            source("minimum: 1\nmaximum: 10\n"),
            Arc::new(FixedRandom(1)),
        )
        .err()
        .unwrap();

        assert!(matches!(
            err,
            StartupError::Inconsistent(ConfigurationError::MissingField("attempts"))
        ));
    }

    #[test]
    fn view_can_issue_commands_from_a_notification() {
        struct ResetOnWin {
            observer: Mutex<Option<Weak<dyn DrawNumberViewObserver>>>,
        }

        impl DrawNumberView for ResetOnWin {
            fn set_observer(&self, observer: Weak<dyn DrawNumberViewObserver>) {
                *self.observer.lock().unwrap() = Some(observer);
            }
            fn start(&self) {}
            fn result(&self, result: DrawResult) {
                if result == DrawResult::YouWon {
                    let observer = self.observer.lock().unwrap().clone();
                    if let Some(observer) = observer.and_then(|weak| weak.upgrade()) {
                        observer.reset_game();
                    }
                }
            }
            fn number_incorrect(&self) {}
            fn display_error(&self, _message: &str) {}
        }

        let view: Arc<dyn DrawNumberView> = Arc::new(ResetOnWin {
            observer: Mutex::new(None),
        });
        let app = DrawNumberApp::start(
            vec![view],
            source(ONE_TO_HUNDRED_THREE_ATTEMPTS),
            Arc::new(FixedRandom(42)),
        )
        .unwrap();

        app.new_attempt(42);

        assert_eq!(app.phase(), GamePhase::Active);
        assert_eq!(app.remaining_attempts(), 3);
    }
}
