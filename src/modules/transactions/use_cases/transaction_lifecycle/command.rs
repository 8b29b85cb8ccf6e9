/// Intent of an operation issued against a transaction. Payloads travel separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionCommand {
    Write,
    Commit,
    Rollback,
}

impl TransactionCommand {
    pub fn name(self) -> &'static str {
        match self {
            TransactionCommand::Write => "write",
            TransactionCommand::Commit => "commit",
            TransactionCommand::Rollback => "rollback",
        }
    }
}
