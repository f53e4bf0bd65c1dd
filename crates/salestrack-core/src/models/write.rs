use rust_decimal::Decimal;

use super::{Record, RecordError};

/// Unvalidated input for a new sales entry, as collected by a form or a
/// command line. Month and year stay wide so that out-of-range input reaches
/// validation instead of failing to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRecordCommand {
    pub name: String,
    pub area: String,
    pub sales: Decimal,
    pub month: i64,
    pub year: i64,
}

impl TryFrom<CreateRecordCommand> for Record {
    type Error = RecordError;

    fn try_from(command: CreateRecordCommand) -> Result<Self, Self::Error> {
        Record::new(command.name, command.area, command.sales, command.month, command.year)
    }
}
