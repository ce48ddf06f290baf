//! Background maintenance tasks spawned at server start.

pub mod overdue_bills;
