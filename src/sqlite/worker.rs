// Each store owns one connection, parked on a dedicated thread. Callers talk to
// it over a channel and get replies on oneshots, so the async side never blocks
// on SQLite.

mod channel;
mod dispatcher;
mod manager;

pub(crate) use manager::SqliteWorker;
