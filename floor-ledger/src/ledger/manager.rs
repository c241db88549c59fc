//! FloorLedger: the single-writer command processor.

use super::actions::CommandAction;
use super::appliers::apply_event;
use super::printing::{split_by_station, TicketJob, TicketPrinter};
use super::selectors;
use super::storage::{LedgerStorage, StorageError};
use super::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use shared::models::{Customer, Table};
use shared::{
    CommandError, CommandErrorCode, CommandResponse, EventPayload, LedgerCommand,
    LedgerCommandPayload, LedgerEvent, LedgerState, Order,
};
use std::path::Path;
use thiserror::Error;
use tokio::sync::broadcast;

/// Manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Print failed: {0}")]
    PrintFailed(String),
}

/// Map a storage failure to an error code (clients localize the message).
fn classify_storage_error(e: &StorageError) -> CommandErrorCode {
    match e {
        StorageError::Serialization(_) => return CommandErrorCode::InternalError,
        StorageError::ChecksumMismatch => return CommandErrorCode::StorageCorrupted,
        _ => {}
    }

    let err_str = e.to_string().to_lowercase();
    if err_str.contains("no space") || err_str.contains("disk full") || err_str.contains("enospc")
    {
        return CommandErrorCode::StorageFull;
    }
    if err_str.contains("out of memory") || err_str.contains("cannot allocate") {
        return CommandErrorCode::OutOfMemory;
    }
    if err_str.contains("corrupt") || err_str.contains("invalid database") {
        return CommandErrorCode::StorageCorrupted;
    }
    CommandErrorCode::SystemBusy
}

impl From<ManagerError> for CommandError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Storage(e) => {
                let code = classify_storage_error(&e);
                tracing::error!(error = %e, error_code = ?code, "Storage error occurred");
                CommandError::new(code, e.to_string())
            }
            ManagerError::Ledger(e) => e.into(),
            ManagerError::PrintFailed(msg) => {
                CommandError::new(CommandErrorCode::InternalError, msg)
            }
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 4096;

/// The floor & order ledger engine.
///
/// Commands are processed strictly one at a time (`&self` methods, but the
/// redb write transaction serializes writers); each command's events and the
/// replacement state snapshot commit atomically.
///
/// The `epoch` is a unique identifier generated on each startup. Clients use
/// it to detect engine restarts and trigger a full resync.
pub struct FloorLedger {
    storage: LedgerStorage,
    event_tx: broadcast::Sender<LedgerEvent>,
    epoch: String,
}

impl std::fmt::Debug for FloorLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloorLedger")
            .field("storage", &"<LedgerStorage>")
            .field("epoch", &self.epoch)
            .finish()
    }
}

impl FloorLedger {
    /// Open the ledger at the given database path.
    pub fn new(db_path: impl AsRef<Path>) -> ManagerResult<Self> {
        let storage = LedgerStorage::open(db_path)?;
        Ok(Self::with_storage(storage))
    }

    /// Build a ledger over existing storage (used with in-memory backends).
    pub fn with_storage(storage: LedgerStorage) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let epoch = uuid::Uuid::new_v4().to_string();
        tracing::info!(epoch = %epoch, "FloorLedger started with new epoch");
        Self {
            storage,
            event_tx,
            epoch,
        }
    }

    /// Engine instance epoch (unique per startup).
    pub fn epoch(&self) -> &str {
        &self.epoch
    }

    /// Subscribe to committed-event broadcasts.
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.event_tx.subscribe()
    }

    /// Get the underlying storage
    pub fn storage(&self) -> &LedgerStorage {
        &self.storage
    }

    /// Execute a command and return the response.
    pub fn execute_command(&self, cmd: LedgerCommand) -> CommandResponse {
        match self.process_command(&cmd) {
            Ok((response, events)) => {
                // Broadcast only after a successful commit.
                for event in events {
                    let _ = self.event_tx.send(event);
                }
                response
            }
            Err(err) => CommandResponse::error(cmd.command_id, err.into()),
        }
    }

    /// Process command and return response with events.
    ///
    /// 1. Idempotency check
    /// 2. Convert command to CommandAction and execute (validate + emit)
    /// 3. Apply events to the state tree via EventApplier
    /// 4. Persist events + state atomically, mark command processed
    fn process_command(
        &self,
        cmd: &LedgerCommand,
    ) -> ManagerResult<(CommandResponse, Vec<LedgerEvent>)> {
        tracing::info!(command_id = %cmd.command_id, payload = ?cmd.payload, "Processing command");

        // Idempotency check (before transaction)
        if self.storage.is_command_processed(&cmd.command_id)? {
            tracing::warn!(command_id = %cmd.command_id, "Duplicate command");
            return Ok((CommandResponse::duplicate(cmd.command_id), vec![]));
        }

        let txn = self.storage.begin_write()?;

        // Double-check idempotency within the transaction
        if self.storage.is_command_processed_txn(&txn, &cmd.command_id)? {
            return Ok((CommandResponse::duplicate(cmd.command_id), vec![]));
        }

        let mut state = self.storage.load_state_txn(&txn)?;
        let current_sequence = state.last_sequence;

        let metadata = CommandMetadata {
            command_id: cmd.command_id,
            timestamp: cmd.timestamp,
        };
        let action: CommandAction = cmd.into();
        let events = {
            let mut ctx = CommandContext::new(&state, current_sequence);
            action.execute(&mut ctx, &metadata)?
        };

        // Fold events into the state tree.
        for event in &events {
            apply_event(&mut state, event);
        }
        if let Some(max_sequence) = events.iter().map(|e| e.sequence).max() {
            state.last_sequence = max_sequence;
        }
        state.update_checksum();

        for event in &events {
            self.storage.store_event(&txn, event)?;
        }
        self.storage.store_state(&txn, &state)?;
        self.storage.mark_command_processed(&txn, &cmd.command_id)?;
        txn.commit().map_err(StorageError::from)?;

        let entity_id = entity_id(&events);
        tracing::info!(
            command_id = %cmd.command_id,
            entity_id = ?entity_id,
            event_count = events.len(),
            "Command processed successfully"
        );
        Ok((CommandResponse::success(cmd.command_id, entity_id), events))
    }

    // ========== Public Query Methods ==========

    /// The full current state.
    pub fn state(&self) -> ManagerResult<LedgerState> {
        Ok(self.storage.load_state()?)
    }

    pub fn table(&self, table_id: &str) -> ManagerResult<Option<Table>> {
        Ok(self.state()?.tables.get(table_id).cloned())
    }

    /// All tables in display order.
    pub fn all_tables(&self) -> ManagerResult<Vec<Table>> {
        let state = self.state()?;
        Ok(selectors::all_tables(&state).into_iter().cloned().collect())
    }

    pub fn active_tables(&self) -> ManagerResult<Vec<Table>> {
        let state = self.state()?;
        Ok(selectors::active_tables(&state)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Tables free for a booking at `now` (reservation expiry applied).
    pub fn bookable_tables(&self, now: i64) -> ManagerResult<Vec<Table>> {
        let state = self.state()?;
        Ok(selectors::bookable_tables(&state, now)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn merged_tables(&self) -> ManagerResult<Vec<Table>> {
        let state = self.state()?;
        Ok(selectors::merged_tables(&state)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn order(&self, order_id: &str) -> ManagerResult<Option<Order>> {
        Ok(self.state()?.orders.get(order_id).cloned())
    }

    pub fn ongoing_orders(&self) -> ManagerResult<Vec<Order>> {
        let state = self.state()?;
        Ok(selectors::ongoing_orders(&state)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn completed_orders(&self) -> ManagerResult<Vec<Order>> {
        let state = self.state()?;
        Ok(selectors::completed_orders(&state)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Subtotal, discount amount and payable total of an order.
    pub fn order_totals(&self, order_id: &str) -> ManagerResult<super::money::OrderTotals> {
        let state = self.state()?;
        let order = state
            .orders
            .get(order_id)
            .ok_or_else(|| LedgerError::OrderNotFound(order_id.to_string()))?;
        Ok(super::money::compute_totals(order))
    }

    /// Lines added since the last save, as print quantities.
    pub fn print_delta(&self, order_id: &str) -> ManagerResult<Vec<shared::OrderItem>> {
        let state = self.state()?;
        let order = state
            .orders
            .get(order_id)
            .ok_or_else(|| LedgerError::OrderNotFound(order_id.to_string()))?;
        Ok(selectors::print_delta(order))
    }

    pub fn customer(&self, customer_id: &str) -> ManagerResult<Option<Customer>> {
        Ok(self.state()?.customers.get(customer_id).cloned())
    }

    pub fn customers(&self) -> ManagerResult<Vec<Customer>> {
        Ok(self.state()?.customers.into_values().collect())
    }

    pub fn customer_by_phone(&self, phone: &str) -> ManagerResult<Option<Customer>> {
        let state = self.state()?;
        Ok(super::customers::find_by_phone(&state, phone).cloned())
    }

    pub fn current_sequence(&self) -> ManagerResult<u64> {
        Ok(self.state()?.last_sequence)
    }

    /// Events with sequence greater than `after` (client catch-up).
    pub fn events_since(&self, after: u64) -> ManagerResult<Vec<LedgerEvent>> {
        Ok(self.storage.get_events_since(after)?)
    }

    /// Rebuild state purely from the event stream. Used to verify that the
    /// stored snapshot and the stream agree.
    pub fn replay_state(&self) -> ManagerResult<LedgerState> {
        let events = self.storage.get_events_since(0)?;
        let mut state = LedgerState::default();
        for event in &events {
            apply_event(&mut state, event);
        }
        if let Some(max_sequence) = events.iter().map(|e| e.sequence).max() {
            state.last_sequence = max_sequence;
        }
        state.update_checksum();
        Ok(state)
    }

    // ========== Compound Operations ==========

    /// First-run seeding: create `count` numbered tables on an empty floor.
    ///
    /// Does nothing when any table already exists, so restarts never
    /// duplicate the floor plan.
    pub fn seed_default_tables(&self, count: usize) -> ManagerResult<usize> {
        if !self.state()?.tables.is_empty() {
            return Ok(0);
        }
        for i in 1..=count {
            let cmd = LedgerCommand::new(LedgerCommandPayload::AddTable {
                name: format!("Table {i}"),
                seats: Some(4),
                description: None,
            });
            let response = self.execute_command(cmd);
            if !response.success {
                return Err(ManagerError::Ledger(LedgerError::InvalidOperation(
                    format!("seeding failed at table {i}"),
                )));
            }
        }
        tracing::info!(count, "Seeded default floor plan");
        Ok(count)
    }

    /// Print the unsent delta of an order and mark it saved.
    ///
    /// The order stays unsaved when any ticket fails, so the same delta is
    /// retried on the next attempt. An empty delta just marks the order
    /// saved. Returns the jobs that were printed.
    pub fn save_and_print(
        &self,
        order_id: &str,
        printer: &dyn TicketPrinter,
    ) -> ManagerResult<Vec<TicketJob>> {
        let state = self.state()?;
        let order = state
            .orders
            .get(order_id)
            .ok_or_else(|| LedgerError::OrderNotFound(order_id.to_string()))?;
        let table_name = state
            .tables
            .get(&order.table_id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| order.table_id.clone());

        let delta = selectors::print_delta(order);
        let jobs = split_by_station(order_id, &table_name, delta, order.created_at);
        for job in &jobs {
            let outcome = printer.print(job);
            if !outcome.success {
                let message = outcome
                    .message
                    .unwrap_or_else(|| "printer rejected ticket".to_string());
                tracing::warn!(order_id, ticket = ?job.ticket_type, error = %message, "Ticket print failed; order stays unsaved");
                return Err(ManagerError::PrintFailed(message));
            }
        }

        let cmd = LedgerCommand::new(LedgerCommandPayload::MarkOrderSaved {
            order_id: order_id.to_string(),
        });
        let response = self.execute_command(cmd);
        if !response.success {
            let message = response
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| "mark-saved declined".to_string());
            return Err(ManagerError::Ledger(LedgerError::InvalidOperation(message)));
        }
        Ok(jobs)
    }
}

/// Id of the entity a successful command created or targeted.
fn entity_id(events: &[LedgerEvent]) -> Option<String> {
    let first = events.first()?;
    match &first.payload {
        EventPayload::TableAdded { table } => Some(table.id.clone()),
        EventPayload::TablesMerged { merged_table, .. } => Some(merged_table.id.clone()),
        EventPayload::TablesUnmerged {
            merged_table_id, ..
        } => Some(merged_table_id.clone()),
        EventPayload::TableUpdated { table_id, .. }
        | EventPayload::TableRemoved { table_id }
        | EventPayload::TableStatusToggled { table_id, .. }
        | EventPayload::TableReserved { table_id, .. }
        | EventPayload::TableUnreserved { table_id } => Some(table_id.clone()),
        EventPayload::OrderOpened { order } => Some(order.id.clone()),
        EventPayload::ItemsAdded { order_id, .. }
        | EventPayload::ItemRemoved { order_id, .. }
        | EventPayload::ItemQuantityUpdated { order_id, .. }
        | EventPayload::DiscountApplied { order_id, .. }
        | EventPayload::OrderCustomerSet { order_id, .. }
        | EventPayload::OrderSaved { order_id, .. }
        | EventPayload::OrderTableChanged { order_id, .. }
        | EventPayload::OrderCancelled { order_id }
        | EventPayload::OrderCompleted { order_id, .. }
        | EventPayload::PaymentSettled { order_id, .. } => Some(order_id.clone()),
        EventPayload::OrdersConsolidated {
            surviving_order_id, ..
        } => Some(surviving_order_id.clone()),
        EventPayload::CustomerVisited { customer_id, .. } => Some(customer_id.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::printing::{NullPrinter, PrintOutcome};
    use shared::{OrderItem, PaymentMethod, SplitPortion, TicketType};

    fn ledger() -> FloorLedger {
        FloorLedger::with_storage(LedgerStorage::open_in_memory().unwrap())
    }

    fn run(ledger: &FloorLedger, payload: LedgerCommandPayload) -> CommandResponse {
        ledger.execute_command(LedgerCommand::new(payload))
    }

    fn must(ledger: &FloorLedger, payload: LedgerCommandPayload) -> String {
        let response = run(ledger, payload);
        assert!(response.success, "command declined: {:?}", response.error);
        response.entity_id.unwrap_or_default()
    }

    fn add_table(ledger: &FloorLedger, name: &str) -> String {
        must(
            ledger,
            LedgerCommandPayload::AddTable {
                name: name.to_string(),
                seats: Some(4),
                description: None,
            },
        )
    }

    fn item(id: &str, price: f64, qty: i32) -> OrderItem {
        OrderItem {
            menu_item_id: id.to_string(),
            name: id.to_string(),
            price,
            quantity: qty,
            modifiers: vec![],
            ticket_type: TicketType::Kot,
        }
    }

    fn open_order(ledger: &FloorLedger, table_id: &str, items: Vec<OrderItem>) -> String {
        must(
            ledger,
            LedgerCommandPayload::OpenOrder {
                table_id: table_id.to_string(),
                items,
            },
        )
    }

    struct FailingPrinter;
    impl TicketPrinter for FailingPrinter {
        fn print(&self, _job: &TicketJob) -> PrintOutcome {
            PrintOutcome::failed("out of paper")
        }
    }

    #[test]
    fn test_add_table_persists_and_queries() {
        let ledger = ledger();
        let id = add_table(&ledger, "Window 1");

        let table = ledger.table(&id).unwrap().unwrap();
        assert_eq!(table.name, "Window 1");
        assert_eq!(ledger.all_tables().unwrap().len(), 1);
        assert_eq!(ledger.current_sequence().unwrap(), 1);
    }

    #[test]
    fn test_one_ongoing_order_per_table() {
        let ledger = ledger();
        let t1 = add_table(&ledger, "T1");
        open_order(&ledger, &t1, vec![item("momo", 6.0, 1)]);

        let response = run(
            &ledger,
            LedgerCommandPayload::OpenOrder {
                table_id: t1.clone(),
                items: vec![],
            },
        );
        assert!(!response.success);
        assert_eq!(
            response.error.unwrap().code,
            CommandErrorCode::TableOccupied
        );

        // After settling, the table frees up.
        let order_id = ledger.ongoing_orders().unwrap()[0].id.clone();
        must(
            &ledger,
            LedgerCommandPayload::SettlePayment {
                order_id,
                method: PaymentMethod::Cash,
                amount_paid: 6.0,
                customer_name: None,
                customer_phone: None,
            },
        );
        open_order(&ledger, &t1, vec![]);
    }

    #[test]
    fn test_duplicate_command_acknowledged_once() {
        let ledger = ledger();
        let cmd = LedgerCommand::new(LedgerCommandPayload::AddTable {
            name: "T1".to_string(),
            seats: None,
            description: None,
        });

        let first = ledger.execute_command(cmd.clone());
        let second = ledger.execute_command(cmd);
        assert!(first.success);
        assert!(second.success);
        assert!(second.entity_id.is_none());
        // Replay did not create a second table.
        assert_eq!(ledger.all_tables().unwrap().len(), 1);
        assert_eq!(ledger.current_sequence().unwrap(), 1);
    }

    #[test]
    fn test_declined_command_leaves_no_trace() {
        let ledger = ledger();
        let before = ledger.current_sequence().unwrap();

        let response = run(
            &ledger,
            LedgerCommandPayload::OpenOrder {
                table_id: "ghost".to_string(),
                items: vec![],
            },
        );
        assert!(!response.success);
        assert_eq!(
            response.error.unwrap().code,
            CommandErrorCode::TableNotFound
        );
        assert_eq!(ledger.current_sequence().unwrap(), before);
        assert!(ledger.events_since(0).unwrap().is_empty());
    }

    #[test]
    fn test_merge_is_atomic_and_consolidates_orders() {
        let ledger = ledger();
        let t1 = add_table(&ledger, "T1");
        let t2 = add_table(&ledger, "T2");
        let o1 = open_order(&ledger, &t1, vec![item("momo", 6.0, 2)]);
        std::thread::sleep(std::time::Duration::from_millis(5));
        let o2 = open_order(&ledger, &t2, vec![item("momo", 6.0, 1), item("chow", 8.0, 1)]);

        let merged_id = must(
            &ledger,
            LedgerCommandPayload::MergeTables {
                table_ids: vec![t1.clone(), t2.clone()],
                merged_name: "T1+T2".to_string(),
                merged_table_id: None,
            },
        );

        let state = ledger.state().unwrap();
        assert!(state.tables[&merged_id].is_merged);
        assert_eq!(state.tables[&merged_id].total_seats, Some(8));
        assert!(!state.tables[&t1].is_active);
        assert!(!state.tables[&t2].is_active);

        // o1 opened first, so it survives with the combined items.
        assert!(!state.orders.contains_key(&o2));
        let survivor = &state.orders[&o1];
        assert_eq!(survivor.table_id, merged_id);
        assert_eq!(survivor.item("momo").unwrap().quantity, 3);
        assert_eq!(survivor.item("chow").unwrap().quantity, 1);
        assert_eq!(ledger.ongoing_orders().unwrap().len(), 1);
    }

    #[test]
    fn test_unmerge_restores_members() {
        let ledger = ledger();
        let t1 = add_table(&ledger, "T1");
        let t2 = add_table(&ledger, "T2");
        let merged_id = must(
            &ledger,
            LedgerCommandPayload::MergeTables {
                table_ids: vec![t1.clone(), t2.clone()],
                merged_name: "Big".to_string(),
                merged_table_id: None,
            },
        );

        // Occupied merged table refuses to unmerge.
        open_order(&ledger, &merged_id, vec![item("momo", 6.0, 1)]);
        let response = run(
            &ledger,
            LedgerCommandPayload::UnmergeTables {
                merged_table_id: merged_id.clone(),
            },
        );
        assert_eq!(
            response.error.unwrap().code,
            CommandErrorCode::TableOccupied
        );

        let order_id = ledger.ongoing_orders().unwrap()[0].id.clone();
        must(&ledger, LedgerCommandPayload::CancelOrder { order_id });
        must(
            &ledger,
            LedgerCommandPayload::UnmergeTables {
                merged_table_id: merged_id.clone(),
            },
        );

        let state = ledger.state().unwrap();
        assert!(!state.tables.contains_key(&merged_id));
        assert!(state.tables[&t1].is_active);
        assert!(state.tables[&t2].is_active);
    }

    #[test]
    fn test_cancel_removes_order_and_frees_table() {
        let ledger = ledger();
        let t1 = add_table(&ledger, "T1");
        let order_id = open_order(&ledger, &t1, vec![item("momo", 6.0, 1)]);

        must(
            &ledger,
            LedgerCommandPayload::CancelOrder {
                order_id: order_id.clone(),
            },
        );
        assert!(ledger.order(&order_id).unwrap().is_none());
        assert!(ledger.ongoing_orders().unwrap().is_empty());
        open_order(&ledger, &t1, vec![]);
    }

    #[test]
    fn test_discount_changes_totals() {
        let ledger = ledger();
        let t1 = add_table(&ledger, "T1");
        let order_id = open_order(&ledger, &t1, vec![item("thali", 100.0, 2)]);

        must(
            &ledger,
            LedgerCommandPayload::ApplyDiscount {
                order_id: order_id.clone(),
                discount_percentage: 15.0,
            },
        );
        let totals = ledger.order_totals(&order_id).unwrap();
        assert_eq!(totals.subtotal, 200.0);
        assert_eq!(totals.discount_amount, 30.0);
        assert_eq!(totals.total, 170.0);
    }

    #[test]
    fn test_credit_settlement_accrues_customer_balance() {
        let ledger = ledger();
        let t1 = add_table(&ledger, "T1");
        let order_id = open_order(&ledger, &t1, vec![item("thali", 250.0, 1)]);

        must(
            &ledger,
            LedgerCommandPayload::SettlePayment {
                order_id: order_id.clone(),
                method: PaymentMethod::Credit,
                amount_paid: 250.0,
                customer_name: Some("Asha".to_string()),
                customer_phone: Some("555-0101".to_string()),
            },
        );

        let customer = ledger.customer_by_phone("555-0101").unwrap().unwrap();
        assert_eq!(customer.credit_amount, 250.0);
        assert_eq!(customer.visit_count, 1);

        let order = ledger.order(&order_id).unwrap().unwrap();
        let payment = order.payment.unwrap();
        assert_eq!(payment.method, PaymentMethod::Credit);
        assert_eq!(payment.credit_amount, 250.0);
        assert_eq!(ledger.completed_orders().unwrap().len(), 1);
    }

    #[test]
    fn test_split_settlement_with_credit_portion() {
        let ledger = ledger();
        let t1 = add_table(&ledger, "T1");
        let order_id = open_order(&ledger, &t1, vec![item("thali", 100.0, 1)]);

        must(
            &ledger,
            LedgerCommandPayload::SettleSplitPayment {
                order_id: order_id.clone(),
                splits: vec![
                    SplitPortion {
                        method: PaymentMethod::Cash,
                        amount: 70.0,
                    },
                    SplitPortion {
                        method: PaymentMethod::Credit,
                        amount: 30.0,
                    },
                ],
                customer_name: Some("Bikram".to_string()),
                customer_phone: Some("555-9".to_string()),
            },
        );

        let customer = ledger.customer_by_phone("555-9").unwrap().unwrap();
        assert_eq!(customer.credit_amount, 30.0);

        let payment = ledger.order(&order_id).unwrap().unwrap().payment.unwrap();
        assert_eq!(payment.amount_paid, 70.0);
        assert_eq!(payment.change, 0.0);
        assert_eq!(payment.split_payments.len(), 2);
    }

    #[test]
    fn test_repeat_customer_matched_by_phone() {
        let ledger = ledger();
        let t1 = add_table(&ledger, "T1");

        for _ in 0..2 {
            let order_id = open_order(&ledger, &t1, vec![item("momo", 50.0, 1)]);
            must(
                &ledger,
                LedgerCommandPayload::SettlePayment {
                    order_id,
                    method: PaymentMethod::Credit,
                    amount_paid: 50.0,
                    customer_name: Some("Asha".to_string()),
                    customer_phone: Some("555-0101".to_string()),
                },
            );
        }

        assert_eq!(ledger.customers().unwrap().len(), 1);
        let customer = ledger.customer_by_phone("555-0101").unwrap().unwrap();
        assert_eq!(customer.credit_amount, 100.0);
        assert_eq!(customer.visit_count, 2);
    }

    #[test]
    fn test_reservation_expiry_is_lazy() {
        let ledger = ledger();
        let t1 = add_table(&ledger, "T1");

        let now = shared::util::now_millis();
        must(
            &ledger,
            LedgerCommandPayload::ReserveTable {
                table_id: t1.clone(),
                reserved_by: Some("Maya".to_string()),
                reserved_until: Some(now + 60_000),
                reserved_note: None,
            },
        );
        assert!(ledger.bookable_tables(now).unwrap().is_empty());
        // Past the end time the same stored state reads as free.
        assert_eq!(ledger.bookable_tables(now + 120_000).unwrap().len(), 1);

        // Open after expiry succeeds without an unreserve command.
        let mut cmd = LedgerCommand::new(LedgerCommandPayload::OpenOrder {
            table_id: t1.clone(),
            items: vec![],
        });
        cmd.timestamp = now + 120_000;
        assert!(ledger.execute_command(cmd).success);
    }

    #[test]
    fn test_save_and_print_marks_saved_and_deltas() {
        let ledger = ledger();
        let t1 = add_table(&ledger, "T1");
        let order_id = open_order(&ledger, &t1, vec![item("momo", 6.0, 2)]);

        let jobs = ledger.save_and_print(&order_id, &NullPrinter).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].items[0].quantity, 2);
        assert!(ledger.order(&order_id).unwrap().unwrap().is_saved);
        assert!(ledger.print_delta(&order_id).unwrap().is_empty());

        // Add one more momo: only the delta prints next time.
        must(
            &ledger,
            LedgerCommandPayload::AddItems {
                order_id: order_id.clone(),
                items: vec![item("momo", 6.0, 1)],
            },
        );
        let jobs = ledger.save_and_print(&order_id, &NullPrinter).unwrap();
        assert_eq!(jobs[0].items[0].quantity, 1);
    }

    #[test]
    fn test_failed_print_keeps_order_unsaved() {
        let ledger = ledger();
        let t1 = add_table(&ledger, "T1");
        let order_id = open_order(&ledger, &t1, vec![item("momo", 6.0, 2)]);

        let result = ledger.save_and_print(&order_id, &FailingPrinter);
        assert!(matches!(result, Err(ManagerError::PrintFailed(_))));
        assert!(!ledger.order(&order_id).unwrap().unwrap().is_saved);
        // The delta is still pending for the retry.
        assert_eq!(ledger.print_delta(&order_id).unwrap().len(), 1);
    }

    #[test]
    fn test_replay_matches_stored_state() {
        let ledger = ledger();
        let t1 = add_table(&ledger, "T1");
        let t2 = add_table(&ledger, "T2");
        let order_id = open_order(&ledger, &t1, vec![item("momo", 6.0, 2)]);
        must(
            &ledger,
            LedgerCommandPayload::AddItems {
                order_id: order_id.clone(),
                items: vec![item("chow", 8.0, 1)],
            },
        );
        must(
            &ledger,
            LedgerCommandPayload::MergeTables {
                table_ids: vec![t1, t2],
                merged_name: "Big".to_string(),
                merged_table_id: None,
            },
        );
        must(
            &ledger,
            LedgerCommandPayload::SettlePayment {
                order_id,
                method: PaymentMethod::Cash,
                amount_paid: 20.0,
                customer_name: None,
                customer_phone: None,
            },
        );

        let stored = ledger.state().unwrap();
        let replayed = ledger.replay_state().unwrap();
        assert_eq!(stored.state_checksum, replayed.state_checksum);
        assert_eq!(stored.last_sequence, replayed.last_sequence);
        assert_eq!(stored.tables.len(), replayed.tables.len());
        assert_eq!(stored.orders.len(), replayed.orders.len());
    }

    #[test]
    fn test_seed_default_tables_runs_once() {
        let ledger = ledger();
        assert_eq!(ledger.seed_default_tables(5).unwrap(), 5);
        assert_eq!(ledger.seed_default_tables(5).unwrap(), 0);
        assert_eq!(ledger.all_tables().unwrap().len(), 5);
    }

    #[test]
    fn test_events_since_supports_catch_up() {
        let ledger = ledger();
        add_table(&ledger, "T1");
        let checkpoint = ledger.current_sequence().unwrap();
        add_table(&ledger, "T2");
        add_table(&ledger, "T3");

        let missed = ledger.events_since(checkpoint).unwrap();
        assert_eq!(missed.len(), 2);
        assert!(missed.iter().all(|e| e.sequence > checkpoint));
    }

    #[test]
    fn test_broadcast_after_commit() {
        let ledger = ledger();
        let mut rx = ledger.subscribe();
        add_table(&ledger, "T1");

        let event = rx.try_recv().unwrap();
        assert!(matches!(event.payload, EventPayload::TableAdded { .. }));
    }

    #[test]
    fn test_move_order_between_tables() {
        let ledger = ledger();
        let t1 = add_table(&ledger, "T1");
        let t2 = add_table(&ledger, "T2");
        let order_id = open_order(&ledger, &t1, vec![item("momo", 6.0, 1)]);

        must(
            &ledger,
            LedgerCommandPayload::ChangeOrderTable {
                order_id: order_id.clone(),
                new_table_id: t2.clone(),
            },
        );
        assert_eq!(ledger.order(&order_id).unwrap().unwrap().table_id, t2);
        // The source table is free again.
        open_order(&ledger, &t1, vec![]);
    }
}
