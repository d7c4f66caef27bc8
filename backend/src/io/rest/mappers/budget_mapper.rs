use crate::domain::commands::budgets::{BudgetListQuery, CreateBudgetCommand, UpdateBudgetCommand};
use crate::domain::models::Budget as DomainBudget;
use crate::domain::{BudgetStatistics as DomainBudgetStatistics, OverspendCheck as DomainOverspendCheck};
use shared::{
    Budget as SharedBudget, BudgetListRequest, BudgetStatistics as SharedBudgetStatistics, CreateBudgetRequest,
    OverspendCheck as SharedOverspendCheck, UpdateBudgetRequest,
};

pub struct BudgetMapper;

impl BudgetMapper {
    pub fn to_dto(domain: DomainBudget) -> SharedBudget {
        SharedBudget {
            id: domain.id,
            category: domain.category,
            cap_amount: domain.cap_amount,
            month: domain.month,
            year: domain.year,
        }
    }

    pub fn to_create_command(request: CreateBudgetRequest) -> CreateBudgetCommand {
        CreateBudgetCommand {
            category: request.category,
            cap_amount: request.cap_amount,
            month: request.month,
            year: request.year,
        }
    }

    pub fn to_update_command(budget_id: i64, request: UpdateBudgetRequest) -> UpdateBudgetCommand {
        UpdateBudgetCommand {
            budget_id,
            category: request.category,
            cap_amount: request.cap_amount,
            month: request.month,
            year: request.year,
        }
    }

    pub fn to_list_query(request: BudgetListRequest) -> BudgetListQuery {
        BudgetListQuery {
            category: request.category,
            month: request.month,
            year: request.year,
        }
    }

    pub fn statistics_to_dto(domain: DomainBudgetStatistics) -> SharedBudgetStatistics {
        SharedBudgetStatistics {
            category: domain.category,
            period: domain.period,
            total_spent: domain.total_spent,
            cap_amount: domain.cap_amount,
            remaining: domain.remaining,
            percent_consumed: domain.percent_consumed,
        }
    }

    pub fn overspend_to_dto(domain: DomainOverspendCheck) -> SharedOverspendCheck {
        SharedOverspendCheck {
            exceeded: domain.exceeded,
            alert_message: domain.alert_message,
            remaining_before: domain.remaining_before,
            cap_amount: domain.cap_amount,
            total_after: domain.total_after,
        }
    }
}
