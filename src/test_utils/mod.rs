#![allow(missing_docs)]

pub(crate) mod http;

pub(crate) use http::{assert_status, response_json};

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{AppState, db::initialize};

#[track_caller]
pub(crate) fn must_create_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("could not create in-memory SQLite database");
    initialize(&connection).expect("could not initialize test DB");

    connection
}

pub(crate) fn must_create_shared_connection() -> Arc<Mutex<Connection>> {
    Arc::new(Mutex::new(must_create_test_connection()))
}

#[track_caller]
pub(crate) fn must_create_app_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("could not create in-memory SQLite database");

    AppState::new(connection, "Etc/UTC").expect("could not create app state")
}
