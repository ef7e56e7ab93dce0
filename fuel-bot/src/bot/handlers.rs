//! Per-command handlers.
//!
//! Each command runs to completion on its own: one directory query at
//! most, then replies sent strictly in order. Directory failures become a
//! fixed reply; send failures end the command and are only logged.

use tracing::{Instrument, debug, info, info_span, warn};

use crate::chunk::{MAX_MESSAGE_CHARS, chunk};
use crate::directory::DirectoryClient;
use crate::filter::filter_stations;
use crate::format::{format_station, format_station_list};
use crate::telegram::{TelegramError, Update};

use super::command::Command;
use super::messages;
use super::sink::ReplySink;

/// Command router: turns incoming messages into directory queries and replies.
pub struct Bot<S> {
    directory: DirectoryClient,
    sink: S,
    /// Own username, used to ignore commands addressed to other bots.
    username: Option<String>,
}

impl<S: ReplySink> Bot<S> {
    /// Create a bot that answers through `sink`.
    pub fn new(directory: DirectoryClient, sink: S) -> Self {
        Self {
            directory,
            sink,
            username: None,
        }
    }

    /// Set the bot's own username (from `getMe`).
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Handle one update from the poll loop.
    ///
    /// Anything other than a text message holding a known command is ignored.
    pub async fn handle_update(&self, update: Update) {
        let Some(message) = update.message else {
            return;
        };
        let Some(text) = message.text.as_deref() else {
            return;
        };

        match Command::parse(text, self.username.as_deref()) {
            Some(command) => self.dispatch(message.chat.id, command).await,
            None => debug!(update_id = update.update_id, "ignoring non-command message"),
        }
    }

    /// Run a parsed command for a chat.
    pub async fn dispatch(&self, chat_id: i64, command: Command) {
        let name = command.name();
        let span = info_span!("command", name, chat_id);

        let result = async {
            info!("handling command");
            match command {
                Command::Start => self.start(chat_id).await,
                Command::Stations { query } => self.stations(chat_id, query.as_deref()).await,
                Command::Station { id } => self.station(chat_id, id.as_deref()).await,
            }
        }
        .instrument(span)
        .await;

        if let Err(e) = result {
            warn!(command = name, chat_id, error = %e, "failed to send reply");
        }
    }

    async fn start(&self, chat_id: i64) -> Result<(), TelegramError> {
        self.sink.send_text(chat_id, messages::USAGE).await
    }

    async fn stations(&self, chat_id: i64, query: Option<&str>) -> Result<(), TelegramError> {
        let query = match query {
            Some(query) => query,
            None => {
                self.sink.send_text(chat_id, messages::NO_FILTER).await?;
                ""
            }
        };

        let stations = match self.directory.list_stations().await {
            Ok(stations) => stations,
            Err(e) => {
                warn!(error = %e, "station list unavailable");
                return self
                    .sink
                    .send_text(chat_id, messages::STATIONS_UNAVAILABLE)
                    .await;
            }
        };

        let found = filter_stations(&stations, query);
        info!(query, total = stations.len(), found = found.len(), "filtered stations");

        self.sink
            .send_text(chat_id, &messages::stations_found(found.len()))
            .await?;

        // Telegram rejects empty messages.
        if found.is_empty() {
            return Ok(());
        }

        // The list is never split: too long means a notice instead.
        let list = format_station_list(&found);
        if list.chars().count() > MAX_MESSAGE_CHARS {
            self.sink
                .send_text(chat_id, messages::TOO_MANY_STATIONS)
                .await
        } else {
            self.sink.send_text(chat_id, &list).await
        }
    }

    async fn station(&self, chat_id: i64, id: Option<&str>) -> Result<(), TelegramError> {
        let Some(id) = id else {
            debug!("station id missing");
            return self
                .sink
                .send_text(chat_id, messages::STATION_UNAVAILABLE)
                .await;
        };

        let station = match self.directory.get_station(id).await {
            Ok(station) => station,
            Err(e) => {
                warn!(id, error = %e, "station unavailable");
                return self
                    .sink
                    .send_text(chat_id, messages::STATION_UNAVAILABLE)
                    .await;
            }
        };

        let text = format_station(&station);
        if text.is_empty() {
            debug!(id, "station has no displayable fields");
            return self
                .sink
                .send_text(chat_id, messages::STATION_UNAVAILABLE)
                .await;
        }

        for piece in chunk(&text, MAX_MESSAGE_CHARS) {
            self.sink.send_text(chat_id, piece).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::DirectoryConfig;
    use crate::telegram::{Chat, Message};
    use crate::test_support::serve;
    use async_trait::async_trait;
    use axum::Router;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::get;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    /// Records every reply; optionally fails from the n-th send onwards.
    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<(i64, String)>>,
        fail_from: Option<usize>,
    }

    impl RecordingSink {
        fn failing_from(n: usize) -> Self {
            Self {
                fail_from: Some(n),
                ..Self::default()
            }
        }

        fn texts(&self) -> Vec<String> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .map(|(_, text)| text.clone())
                .collect()
        }
    }

    #[async_trait]
    impl ReplySink for RecordingSink {
        async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
            let mut sent = self.sent.lock().unwrap();
            if self.fail_from.is_some_and(|n| sent.len() >= n) {
                return Err(TelegramError::Api {
                    status: 403,
                    description: "Forbidden: bot was blocked by the user".into(),
                });
            }
            sent.push((chat_id, text.to_string()));
            Ok(())
        }
    }

    /// Directory stand-in serving `stations` and per-id lookups from them.
    async fn directory_serving(stations: Value) -> DirectoryClient {
        let list = json!({"data": {"stations": stations.clone()}});
        let app = Router::new()
            .route(
                "/fuel_stations",
                get(move || {
                    let list = list.clone();
                    async move { axum::Json(list) }
                }),
            )
            .route(
                "/fuel_stations/:id",
                get(move |Path(id): Path<String>| {
                    let stations = stations.clone();
                    async move {
                        stations
                            .as_array()
                            .into_iter()
                            .flatten()
                            .find(|s| s["id"].to_string().trim_matches('"') == id)
                            .map(|s| axum::Json(json!({"data": s})))
                            .ok_or(StatusCode::NOT_FOUND)
                    }
                }),
            );
        let base = serve(app).await;
        DirectoryClient::new(DirectoryConfig::new().with_base_url(base).with_timeout(5)).unwrap()
    }

    /// Directory stand-in that fails every request.
    async fn broken_directory() -> DirectoryClient {
        let app = Router::new().fallback(|| async { StatusCode::INTERNAL_SERVER_ERROR });
        let base = serve(app).await;
        DirectoryClient::new(DirectoryConfig::new().with_base_url(base).with_timeout(5)).unwrap()
    }

    fn update(chat_id: i64, text: Option<&str>) -> Update {
        Update {
            update_id: 1,
            message: Some(Message {
                message_id: 1,
                chat: Chat { id: chat_id },
                from: None,
                text: text.map(str::to_string),
            }),
        }
    }

    #[tokio::test]
    async fn start_sends_usage() {
        let bot = Bot::new(broken_directory().await, RecordingSink::default());

        bot.handle_update(update(5, Some("/start"))).await;

        assert_eq!(bot.sink.texts(), [messages::USAGE]);
        assert_eq!(bot.sink.sent.lock().unwrap()[0].0, 5);
    }

    #[tokio::test]
    async fn stations_filters_and_lists() {
        let directory = directory_serving(json!([
            {"id": 1, "name": "Sunoco"},
            {"id": 2, "name": "Shell", "city": "Sundale"},
            {"id": 3, "name": "Okko", "city": "Київ"}
        ]))
        .await;
        let bot = Bot::new(directory, RecordingSink::default());

        bot.dispatch(
            9,
            Command::Stations {
                query: Some("Sun".into()),
            },
        )
        .await;

        assert_eq!(
            bot.sink.texts(),
            ["Найдено 2 заправок", "1 - Sunoco\n2 - Shell"]
        );
    }

    #[tokio::test]
    async fn stations_without_query_announces_and_lists_all() {
        let directory = directory_serving(json!([
            {"id": 1, "name": "A"},
            {"id": 2, "name": "B"}
        ]))
        .await;
        let bot = Bot::new(directory, RecordingSink::default());

        bot.handle_update(update(9, Some("/stations"))).await;

        assert_eq!(
            bot.sink.texts(),
            [messages::NO_FILTER, "Найдено 2 заправок", "1 - A\n2 - B"]
        );
    }

    #[tokio::test]
    async fn stations_with_no_match_sends_only_count() {
        let directory = directory_serving(json!([{"id": 1, "name": "A"}])).await;
        let bot = Bot::new(directory, RecordingSink::default());

        bot.dispatch(
            9,
            Command::Stations {
                query: Some("zzz".into()),
            },
        )
        .await;

        assert_eq!(bot.sink.texts(), ["Найдено 0 заправок"]);
    }

    #[tokio::test]
    async fn oversized_list_sends_notice_instead_of_chunks() {
        let stations: Vec<Value> = (0..300)
            .map(|i| json!({"id": i, "name": format!("WOG station number {i} on the highway")}))
            .collect();
        let bot = Bot::new(
            directory_serving(Value::Array(stations)).await,
            RecordingSink::default(),
        );

        bot.dispatch(9, Command::Stations { query: Some("WOG".into()) })
            .await;

        assert_eq!(
            bot.sink.texts(),
            ["Найдено 300 заправок", messages::TOO_MANY_STATIONS]
        );
    }

    /// Bot whose directory holds one station `1` named with `name_len` W's,
    /// so its list line is `name_len + 4` characters long.
    async fn bot_with_long_name(name_len: usize) -> Bot<RecordingSink> {
        let stations = json!([{"id": 1, "name": "W".repeat(name_len)}]);
        Bot::new(directory_serving(stations).await, RecordingSink::default())
    }

    #[tokio::test]
    async fn list_of_exactly_max_length_is_sent() {
        let bot = bot_with_long_name(4092).await;

        bot.dispatch(9, Command::Stations { query: Some("W".into()) })
            .await;

        let texts = bot.sink.texts();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0], "Найдено 1 заправок");
        assert_eq!(texts[1].chars().count(), MAX_MESSAGE_CHARS);
        assert!(texts[1].starts_with("1 - WWW"));
    }

    #[tokio::test]
    async fn list_one_past_max_length_sends_notice() {
        let bot = bot_with_long_name(4093).await;

        bot.dispatch(9, Command::Stations { query: Some("W".into()) })
            .await;

        assert_eq!(
            bot.sink.texts(),
            ["Найдено 1 заправок", messages::TOO_MANY_STATIONS]
        );
    }

    #[tokio::test]
    async fn stations_directory_failure() {
        let bot = Bot::new(broken_directory().await, RecordingSink::default());

        bot.dispatch(9, Command::Stations { query: Some("x".into()) })
            .await;

        assert_eq!(bot.sink.texts(), [messages::STATIONS_UNAVAILABLE]);
    }

    #[tokio::test]
    async fn station_details() {
        let directory = directory_serving(json!([
            {"id": 42, "name": "АЗК", "city": "Київ", "schedule": "24/7"}
        ]))
        .await;
        let bot = Bot::new(directory, RecordingSink::default());

        bot.handle_update(update(3, Some("/station 42"))).await;

        assert_eq!(
            bot.sink.texts(),
            ["Город: Київ\nНазвание: АЗК\nРасписание: 24/7\n"]
        );
    }

    #[tokio::test]
    async fn station_not_found_sends_single_notice() {
        let directory = directory_serving(json!([{"id": 1, "name": "A"}])).await;
        let bot = Bot::new(directory, RecordingSink::default());

        bot.dispatch(
            3,
            Command::Station {
                id: Some("42".into()),
            },
        )
        .await;

        assert_eq!(bot.sink.texts(), [messages::STATION_UNAVAILABLE]);
    }

    #[tokio::test]
    async fn station_without_id_sends_notice() {
        let bot = Bot::new(broken_directory().await, RecordingSink::default());

        bot.dispatch(3, Command::Station { id: None }).await;

        assert_eq!(bot.sink.texts(), [messages::STATION_UNAVAILABLE]);
    }

    #[tokio::test]
    async fn station_without_fields_sends_notice() {
        let directory = directory_serving(json!([{"id": 5}])).await;
        let bot = Bot::new(directory, RecordingSink::default());

        bot.dispatch(3, Command::Station { id: Some("5".into()) })
            .await;

        assert_eq!(bot.sink.texts(), [messages::STATION_UNAVAILABLE]);
    }

    #[tokio::test]
    async fn long_station_details_are_chunked() {
        let description = "я".repeat(MAX_MESSAGE_CHARS + 100);
        let directory =
            directory_serving(json!([{"id": 8, "workDescription": description}])).await;
        let bot = Bot::new(directory, RecordingSink::default());

        bot.dispatch(3, Command::Station { id: Some("8".into()) })
            .await;

        let texts = bot.sink.texts();
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].chars().count(), MAX_MESSAGE_CHARS);
        assert_eq!(
            texts.concat(),
            format!("Описание работ: {description}\n")
        );
    }

    #[tokio::test]
    async fn send_failure_stops_command() {
        let directory = directory_serving(json!([{"id": 1, "name": "A"}])).await;
        let bot = Bot::new(directory, RecordingSink::failing_from(1));

        bot.dispatch(9, Command::Stations { query: None }).await;

        assert_eq!(bot.sink.texts(), [messages::NO_FILTER]);
    }

    #[tokio::test]
    async fn ignores_non_commands_and_other_bots() {
        let bot = Bot::new(broken_directory().await, RecordingSink::default())
            .with_username("fuel_bot");

        bot.handle_update(update(1, Some("hello"))).await;
        bot.handle_update(update(1, None)).await;
        bot.handle_update(update(1, Some("/start@other_bot"))).await;
        bot.handle_update(Update {
            update_id: 2,
            message: None,
        })
        .await;

        assert!(bot.sink.texts().is_empty());
    }
}
