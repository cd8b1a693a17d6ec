use chrono::NaiveDate;
use pforge_core::format::format_currency;
use pforge_core::mapping::{DtoBase, HistorizableDto};
use pforge_db::models::order::{OrderEntity, OrderPosition};
use pforge_db::models::status::OrderStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::refs::{CustomerDto, ProjectDto};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    #[serde(flatten)]
    pub base: DtoBase,
    pub number: Option<i32>,
    pub title: Option<String>,
    pub status: Option<OrderStatus>,
    pub order_date: Option<NaiveDate>,
    pub customer: Option<CustomerDto>,
    pub project: Option<ProjectDto>,
    pub net_sum: Option<Decimal>,
    pub invoiced_sum: Option<Decimal>,
    pub formatted_net_sum: Option<String>,
    pub formatted_invoiced_sum: Option<String>,
    pub positions: Option<Vec<OrderPosition>>,
    /// Position count as `#n`.
    pub pos: Option<String>,
}
pforge_core::impl_record!(
    OrderDto,
    dto "Order",
    [
        number, title, status, order_date, customer, project, net_sum, invoiced_sum,
        formatted_net_sum, formatted_invoiced_sum, positions, pos,
    ]
);

impl HistorizableDto for OrderDto {
    type Entity = OrderEntity;

    fn enrich_from(&mut self, src: &OrderEntity) {
        self.customer = src.customer.as_ref().map(CustomerDto::from_entity);
        self.project = src.project.as_ref().map(ProjectDto::from_entity);
        self.formatted_net_sum = format_currency(src.net_sum);
        self.formatted_invoiced_sum = format_currency(src.invoiced_sum);
        self.positions = src.positions.clone();
        self.pos = src
            .positions
            .as_ref()
            .map(|positions| format!("#{}", positions.len()));
    }
}
