//! Kitchen ticket printing boundary.
//!
//! The engine only computes what needs printing; actual output goes through
//! the [`TicketPrinter`] trait so callers can plug in ESC/POS drivers,
//! spoolers, or a no-op. A failed print keeps the order unsaved so the
//! delta is retried on the next attempt.

use shared::{OrderItem, TicketType};

/// One ticket to send to a station.
#[derive(Debug, Clone)]
pub struct TicketJob {
    pub order_id: String,
    pub table_name: String,
    pub ticket_type: TicketType,
    /// Delta quantities only, never the full order.
    pub items: Vec<OrderItem>,
    pub created_at: i64,
}

/// Result of a print attempt.
#[derive(Debug, Clone)]
pub struct PrintOutcome {
    pub success: bool,
    pub message: Option<String>,
}

impl PrintOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Sink for kitchen/bar tickets.
pub trait TicketPrinter: Send + Sync {
    fn print(&self, job: &TicketJob) -> PrintOutcome;
}

/// Printer that discards every ticket. Default when no hardware is wired up.
#[derive(Debug, Default)]
pub struct NullPrinter;

impl TicketPrinter for NullPrinter {
    fn print(&self, _job: &TicketJob) -> PrintOutcome {
        PrintOutcome::ok()
    }
}

/// Split delta items into per-station jobs (KOT and BOT print separately).
pub fn split_by_station(
    order_id: &str,
    table_name: &str,
    items: Vec<OrderItem>,
    created_at: i64,
) -> Vec<TicketJob> {
    let (kot, bot): (Vec<OrderItem>, Vec<OrderItem>) = items
        .into_iter()
        .partition(|i| i.ticket_type == TicketType::Kot);

    let mut jobs = Vec::new();
    for (ticket_type, items) in [(TicketType::Kot, kot), (TicketType::Bot, bot)] {
        if !items.is_empty() {
            jobs.push(TicketJob {
                order_id: order_id.to_string(),
                table_name: table_name.to_string(),
                ticket_type,
                items,
                created_at,
            });
        }
    }
    jobs
}
