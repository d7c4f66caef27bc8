use crate::domain::commands::transactions::{CreateTransactionCommand, CreateTransactionResult, TransactionListQuery};
use crate::domain::models::{Transaction as DomainTransaction, TransactionKind as DomainTransactionKind};
use shared::{
    CreateTransactionRequest, CreateTransactionResponse, Transaction as SharedTransaction,
    TransactionKind as SharedTransactionKind, TransactionListRequest,
};

pub struct TransactionMapper;

impl TransactionMapper {
    pub fn to_dto(domain: DomainTransaction) -> SharedTransaction {
        SharedTransaction {
            id: domain.id,
            amount: domain.amount,
            label: domain.label,
            kind: Self::to_dto_kind(domain.kind),
            category: domain.category,
            date: domain.date,
        }
    }

    pub fn to_create_command(request: CreateTransactionRequest) -> CreateTransactionCommand {
        CreateTransactionCommand {
            amount: request.amount,
            label: request.label,
            kind: Self::to_domain_kind(request.kind),
            category: request.category,
            date: request.date,
        }
    }

    pub fn to_list_query(request: TransactionListRequest) -> TransactionListQuery {
        TransactionListQuery {
            category: request.category,
            start_date: request.start_date,
            end_date: request.end_date,
        }
    }

    pub fn to_create_response(result: CreateTransactionResult) -> CreateTransactionResponse {
        CreateTransactionResponse {
            transaction: Self::to_dto(result.transaction),
            overspend_alert: result.overspend.exceeded,
            alert_message: result.overspend.alert_message,
        }
    }

    fn to_domain_kind(dto_kind: SharedTransactionKind) -> DomainTransactionKind {
        match dto_kind {
            SharedTransactionKind::Income => DomainTransactionKind::Income,
            SharedTransactionKind::Expense => DomainTransactionKind::Expense,
        }
    }

    fn to_dto_kind(domain_kind: DomainTransactionKind) -> SharedTransactionKind {
        match domain_kind {
            DomainTransactionKind::Income => SharedTransactionKind::Income,
            DomainTransactionKind::Expense => SharedTransactionKind::Expense,
        }
    }
}
