//! User-facing reply texts.

use crate::telegram::BotCommand;

pub const USAGE: &str = "Чтобы получить список заправок - воспользуйтесь /stations\n\
                         Чтобы получить список заправок по городу - воспользуйтесь /stations город\n\
                         Чтобы получить информацию о заправке - воспользуйтесь /station id";

pub const NO_FILTER: &str = "Вы не указали фильтр, проверка всех заправок";
pub const TOO_MANY_STATIONS: &str = "Слишком много заправок для отправки";
pub const STATIONS_UNAVAILABLE: &str = "Список заправок на данный момент недоступен";
pub const STATION_UNAVAILABLE: &str =
    "Информация о запрошенной заправке на данный момент недоступна";

pub fn stations_found(count: usize) -> String {
    format!("Найдено {count} заправок")
}

/// Command menu published via `setMyCommands`.
pub fn command_menu() -> Vec<BotCommand> {
    vec![
        BotCommand::new("start", "Как пользоваться ботом"),
        BotCommand::new("stations", "Список заправок, можно указать город"),
        BotCommand::new("station", "Информация о заправке по id"),
    ]
}
