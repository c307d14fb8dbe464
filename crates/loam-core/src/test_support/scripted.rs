use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
};

use ulid::Ulid;

use crate::{
    connector::{Connector, ConnectorError, MutationHook, MutationKind, Row},
    sql::Dialect,
};

///
/// ScriptedConnector
///
/// Replays queued query results in order and records every statement it
/// executes. Queries with nothing queued return no rows.
///

pub struct ScriptedConnector {
    dialect: Dialect,
    connected: Cell<bool>,
    results: RefCell<VecDeque<Result<Vec<Row>, ConnectorError>>>,
    executed: RefCell<Vec<String>>,
    mutations: RefCell<Vec<(String, MutationKind)>>,
    hook: RefCell<Option<MutationHook>>,
    last_id: RefCell<crate::value::Value>,
    next_ids: RefCell<VecDeque<String>>,
    affected: Cell<u64>,
    fail_next_mutation: RefCell<Option<ConnectorError>>,
}

impl ScriptedConnector {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            connected: Cell::new(true),
            results: RefCell::new(VecDeque::new()),
            executed: RefCell::new(Vec::new()),
            mutations: RefCell::new(Vec::new()),
            hook: RefCell::new(None),
            last_id: RefCell::new(crate::value::Value::Null),
            next_ids: RefCell::new(VecDeque::new()),
            affected: Cell::new(1),
            fail_next_mutation: RefCell::new(None),
        }
    }

    pub fn push_rows(&self, rows: Vec<Row>) {
        self.results.borrow_mut().push_back(Ok(rows));
    }

    pub fn push_error(&self, err: ConnectorError) {
        self.results.borrow_mut().push_back(Err(err));
    }

    pub fn push_id(&self, id: impl Into<String>) {
        self.next_ids.borrow_mut().push_back(id.into());
    }

    pub fn set_last_insert_id(&self, value: crate::value::Value) {
        *self.last_id.borrow_mut() = value;
    }

    pub fn set_affected(&self, rows: u64) {
        self.affected.set(rows);
    }

    pub fn fail_next_mutation(&self, err: ConnectorError) {
        *self.fail_next_mutation.borrow_mut() = Some(err);
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.borrow().clone()
    }

    pub fn mutations(&self) -> Vec<(String, MutationKind)> {
        self.mutations.borrow().clone()
    }

    fn run_mutation(&self, sql: &str, kind: MutationKind) -> Result<u64, ConnectorError> {
        self.executed.borrow_mut().push(sql.to_string());

        if let Some(err) = self.fail_next_mutation.borrow_mut().take() {
            return Err(err);
        }

        if let Some(hook) = self.hook.borrow().as_ref() {
            hook(sql, kind);
        }
        self.mutations.borrow_mut().push((sql.to_string(), kind));

        Ok(self.affected.get())
    }
}

impl Connector for ScriptedConnector {
    fn connect(&mut self) -> Result<bool, ConnectorError> {
        self.connected.set(true);

        Ok(true)
    }

    fn is_connected(&self) -> bool {
        self.connected.get()
    }

    fn execute_query(&self, sql: &str) -> Result<Vec<Row>, ConnectorError> {
        self.executed.borrow_mut().push(sql.to_string());

        self.results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn execute_insert(&self, sql: &str) -> Result<u64, ConnectorError> {
        self.run_mutation(sql, MutationKind::Insert)
    }

    fn execute_update(&self, sql: &str) -> Result<u64, ConnectorError> {
        self.run_mutation(sql, MutationKind::Update)
    }

    fn execute_delete(&self, sql: &str) -> Result<u64, ConnectorError> {
        self.run_mutation(sql, MutationKind::Delete)
    }

    fn set_mutation_hook(&mut self, hook: Option<MutationHook>) {
        *self.hook.borrow_mut() = hook;
    }

    fn last_insert_id(&self) -> Result<crate::value::Value, ConnectorError> {
        Ok(self.last_id.borrow().clone())
    }

    fn generate_new_id(&self) -> String {
        self.next_ids
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ulid::new().to_string())
    }

    fn database_type(&self) -> Dialect {
        self.dialect
    }

    fn begin_transaction(&self) -> Result<(), ConnectorError> {
        self.executed.borrow_mut().push("<begin>".to_string());

        Ok(())
    }

    fn commit(&self) -> Result<(), ConnectorError> {
        self.executed.borrow_mut().push("<commit>".to_string());

        Ok(())
    }

    fn rollback(&self) -> Result<(), ConnectorError> {
        self.executed.borrow_mut().push("<rollback>".to_string());

        Ok(())
    }
}
