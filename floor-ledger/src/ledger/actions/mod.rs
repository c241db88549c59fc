//! Command action implementations.
//!
//! Each action implements the `CommandHandler` trait and handles one
//! specific command type: validate against current state, emit events.

use crate::ledger::traits::{CommandContext, CommandHandler, CommandMetadata, LedgerError};
use shared::{LedgerCommand, LedgerCommandPayload, LedgerEvent};

mod add_items;
mod add_table;
mod apply_discount;
mod cancel_order;
mod change_order_table;
mod mark_order_saved;
mod merge_tables;
mod open_order;
mod remove_item;
mod remove_table;
mod reserve_table;
mod set_order_customer;
mod settle_payment;
mod settle_split_payment;
mod toggle_table_status;
mod unmerge_tables;
mod update_item_quantity;
mod update_table;

pub use add_items::AddItemsAction;
pub use add_table::AddTableAction;
pub use apply_discount::ApplyDiscountAction;
pub use cancel_order::CancelOrderAction;
pub use change_order_table::ChangeOrderTableAction;
pub use mark_order_saved::MarkOrderSavedAction;
pub use merge_tables::MergeTablesAction;
pub use open_order::OpenOrderAction;
pub use remove_item::RemoveItemAction;
pub use remove_table::RemoveTableAction;
pub use reserve_table::{ReserveTableAction, UnreserveTableAction};
pub use set_order_customer::SetOrderCustomerAction;
pub use settle_payment::SettlePaymentAction;
pub use settle_split_payment::SettleSplitPaymentAction;
pub use toggle_table_status::ToggleTableStatusAction;
pub use unmerge_tables::UnmergeTablesAction;
pub use update_item_quantity::UpdateItemQuantityAction;
pub use update_table::UpdateTableAction;

/// CommandAction enum - dispatches to concrete action implementations
pub enum CommandAction {
    AddTable(AddTableAction),
    UpdateTable(UpdateTableAction),
    RemoveTable(RemoveTableAction),
    ToggleTableStatus(ToggleTableStatusAction),
    ReserveTable(ReserveTableAction),
    UnreserveTable(UnreserveTableAction),
    OpenOrder(OpenOrderAction),
    AddItems(AddItemsAction),
    RemoveItem(RemoveItemAction),
    UpdateItemQuantity(UpdateItemQuantityAction),
    ApplyDiscount(ApplyDiscountAction),
    SetOrderCustomer(SetOrderCustomerAction),
    MarkOrderSaved(MarkOrderSavedAction),
    CancelOrder(CancelOrderAction),
    ChangeOrderTable(ChangeOrderTableAction),
    MergeTables(MergeTablesAction),
    UnmergeTables(UnmergeTablesAction),
    SettlePayment(SettlePaymentAction),
    SettleSplitPayment(SettleSplitPaymentAction),
}

impl CommandHandler for CommandAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        match self {
            CommandAction::AddTable(action) => action.execute(ctx, metadata),
            CommandAction::UpdateTable(action) => action.execute(ctx, metadata),
            CommandAction::RemoveTable(action) => action.execute(ctx, metadata),
            CommandAction::ToggleTableStatus(action) => action.execute(ctx, metadata),
            CommandAction::ReserveTable(action) => action.execute(ctx, metadata),
            CommandAction::UnreserveTable(action) => action.execute(ctx, metadata),
            CommandAction::OpenOrder(action) => action.execute(ctx, metadata),
            CommandAction::AddItems(action) => action.execute(ctx, metadata),
            CommandAction::RemoveItem(action) => action.execute(ctx, metadata),
            CommandAction::UpdateItemQuantity(action) => action.execute(ctx, metadata),
            CommandAction::ApplyDiscount(action) => action.execute(ctx, metadata),
            CommandAction::SetOrderCustomer(action) => action.execute(ctx, metadata),
            CommandAction::MarkOrderSaved(action) => action.execute(ctx, metadata),
            CommandAction::CancelOrder(action) => action.execute(ctx, metadata),
            CommandAction::ChangeOrderTable(action) => action.execute(ctx, metadata),
            CommandAction::MergeTables(action) => action.execute(ctx, metadata),
            CommandAction::UnmergeTables(action) => action.execute(ctx, metadata),
            CommandAction::SettlePayment(action) => action.execute(ctx, metadata),
            CommandAction::SettleSplitPayment(action) => action.execute(ctx, metadata),
        }
    }
}

/// Convert LedgerCommand to CommandAction
///
/// This is the ONLY place with a match on LedgerCommandPayload.
impl From<&LedgerCommand> for CommandAction {
    fn from(cmd: &LedgerCommand) -> Self {
        match &cmd.payload {
            LedgerCommandPayload::AddTable {
                name,
                seats,
                description,
            } => CommandAction::AddTable(AddTableAction {
                name: name.clone(),
                seats: *seats,
                description: description.clone(),
            }),
            LedgerCommandPayload::UpdateTable {
                table_id,
                name,
                seats,
                description,
            } => CommandAction::UpdateTable(UpdateTableAction {
                table_id: table_id.clone(),
                name: name.clone(),
                seats: *seats,
                description: description.clone(),
            }),
            LedgerCommandPayload::RemoveTable { table_id } => {
                CommandAction::RemoveTable(RemoveTableAction {
                    table_id: table_id.clone(),
                })
            }
            LedgerCommandPayload::ToggleTableStatus { table_id } => {
                CommandAction::ToggleTableStatus(ToggleTableStatusAction {
                    table_id: table_id.clone(),
                })
            }
            LedgerCommandPayload::ReserveTable {
                table_id,
                reserved_by,
                reserved_until,
                reserved_note,
            } => CommandAction::ReserveTable(ReserveTableAction {
                table_id: table_id.clone(),
                reserved_by: reserved_by.clone(),
                reserved_until: *reserved_until,
                reserved_note: reserved_note.clone(),
            }),
            LedgerCommandPayload::UnreserveTable { table_id } => {
                CommandAction::UnreserveTable(UnreserveTableAction {
                    table_id: table_id.clone(),
                })
            }
            LedgerCommandPayload::OpenOrder { table_id, items } => {
                CommandAction::OpenOrder(OpenOrderAction {
                    table_id: table_id.clone(),
                    items: items.clone(),
                })
            }
            LedgerCommandPayload::AddItems { order_id, items } => {
                CommandAction::AddItems(AddItemsAction {
                    order_id: order_id.clone(),
                    items: items.clone(),
                })
            }
            LedgerCommandPayload::RemoveItem {
                order_id,
                menu_item_id,
            } => CommandAction::RemoveItem(RemoveItemAction {
                order_id: order_id.clone(),
                menu_item_id: menu_item_id.clone(),
            }),
            LedgerCommandPayload::UpdateItemQuantity {
                order_id,
                menu_item_id,
                quantity,
            } => CommandAction::UpdateItemQuantity(UpdateItemQuantityAction {
                order_id: order_id.clone(),
                menu_item_id: menu_item_id.clone(),
                quantity: *quantity,
            }),
            LedgerCommandPayload::ApplyDiscount {
                order_id,
                discount_percentage,
            } => CommandAction::ApplyDiscount(ApplyDiscountAction {
                order_id: order_id.clone(),
                discount_percentage: *discount_percentage,
            }),
            LedgerCommandPayload::SetOrderCustomer {
                order_id,
                customer_name,
                customer_phone,
            } => CommandAction::SetOrderCustomer(SetOrderCustomerAction {
                order_id: order_id.clone(),
                customer_name: customer_name.clone(),
                customer_phone: customer_phone.clone(),
            }),
            LedgerCommandPayload::MarkOrderSaved { order_id } => {
                CommandAction::MarkOrderSaved(MarkOrderSavedAction {
                    order_id: order_id.clone(),
                })
            }
            LedgerCommandPayload::CancelOrder { order_id } => {
                CommandAction::CancelOrder(CancelOrderAction {
                    order_id: order_id.clone(),
                })
            }
            LedgerCommandPayload::ChangeOrderTable {
                order_id,
                new_table_id,
            } => CommandAction::ChangeOrderTable(ChangeOrderTableAction {
                order_id: order_id.clone(),
                new_table_id: new_table_id.clone(),
            }),
            LedgerCommandPayload::MergeTables {
                table_ids,
                merged_name,
                merged_table_id,
            } => CommandAction::MergeTables(MergeTablesAction {
                table_ids: table_ids.clone(),
                merged_name: merged_name.clone(),
                merged_table_id: merged_table_id.clone(),
            }),
            LedgerCommandPayload::UnmergeTables { merged_table_id } => {
                CommandAction::UnmergeTables(UnmergeTablesAction {
                    merged_table_id: merged_table_id.clone(),
                })
            }
            LedgerCommandPayload::SettlePayment {
                order_id,
                method,
                amount_paid,
                customer_name,
                customer_phone,
            } => CommandAction::SettlePayment(SettlePaymentAction {
                order_id: order_id.clone(),
                method: *method,
                amount_paid: *amount_paid,
                customer_name: customer_name.clone(),
                customer_phone: customer_phone.clone(),
            }),
            LedgerCommandPayload::SettleSplitPayment {
                order_id,
                splits,
                customer_name,
                customer_phone,
            } => CommandAction::SettleSplitPayment(SettleSplitPaymentAction {
                order_id: order_id.clone(),
                splits: splits.clone(),
                customer_name: customer_name.clone(),
                customer_phone: customer_phone.clone(),
            }),
        }
    }
}
