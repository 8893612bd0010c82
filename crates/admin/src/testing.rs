//! Scripted [`CarService`] for card and panel tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use rental_client::{ApiOutcome, CarService, ClientError};
use rental_core::car::Car;
use rental_core::form::CarForm;
use rental_core::types::DbId;

type Reply<T> = Result<ApiOutcome<T>, ClientError>;

/// Replies are queued per endpoint and consumed in order. Every call is
/// recorded as `"<op>"` or `"<op>:<id>"`.
#[derive(Default)]
pub struct ScriptedService {
    lists: Mutex<VecDeque<Reply<Vec<Car>>>>,
    adds: Mutex<VecDeque<Reply<String>>>,
    updates: Mutex<VecDeque<Reply<String>>>,
    deletes: Mutex<VecDeque<Reply<String>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedService {
    pub fn on_list(self, reply: Reply<Vec<Car>>) -> Self {
        self.lists.lock().unwrap().push_back(reply);
        self
    }

    pub fn on_add(self, reply: Reply<String>) -> Self {
        self.adds.lock().unwrap().push_back(reply);
        self
    }

    pub fn on_update(self, reply: Reply<String>) -> Self {
        self.updates.lock().unwrap().push_back(reply);
        self
    }

    pub fn on_delete(self, reply: Reply<String>) -> Self {
        self.deletes.lock().unwrap().push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

/// A transport-level failure as the client reports it.
pub fn transport_error() -> ClientError {
    ClientError::Status {
        status: 502,
        body: "bad gateway".to_string(),
    }
}

fn next<T>(queue: &Mutex<VecDeque<Reply<T>>>, op: &str) -> Reply<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| panic!("no scripted reply left for {op}"))
}

#[async_trait]
impl CarService for ScriptedService {
    async fn get_car_list(&self) -> Reply<Vec<Car>> {
        self.record("list".to_string());
        next(&self.lists, "list")
    }

    async fn add_car(&self, form: &CarForm) -> Reply<String> {
        self.record(format!("add:{}", form.model));
        next(&self.adds, "add")
    }

    async fn update_car(&self, id: DbId, _form: &CarForm) -> Reply<String> {
        self.record(format!("update:{id}"));
        next(&self.updates, "update")
    }

    async fn delete_car(&self, id: DbId) -> Reply<String> {
        self.record(format!("delete:{id}"));
        next(&self.deletes, "delete")
    }
}
