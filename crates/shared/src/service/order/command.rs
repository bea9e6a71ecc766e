use crate::{
    abstract_trait::{
        DynMedicineQueryRepository, DynOrderCommandRepository, DynOrderQueryRepository,
        OrderCommandServiceTrait,
    },
    domain::{
        requests::{CreateOrderRequest, NewOrder, NewOrderItem, UpdateOrderStatusRequest},
        responses::{ApiResponse, OrderResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Medicine,
    utils::{Method, ServiceTracer},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{error, info, warn};

pub struct OrderCommandService {
    medicine_query: DynMedicineQueryRepository,
    command: DynOrderCommandRepository,
    query: DynOrderQueryRepository,
    tracer: ServiceTracer,
}

/// Result of the validation phase: priced lines plus the catalog snapshot
/// they were priced against.
struct PricedOrder {
    items: Vec<NewOrderItem>,
    total: Decimal,
    snapshot: HashMap<i32, Medicine>,
    requested: HashMap<i32, i32>,
}

impl OrderCommandService {
    pub fn new(
        medicine_query: DynMedicineQueryRepository,
        command: DynOrderCommandRepository,
        query: DynOrderQueryRepository,
        tracer: ServiceTracer,
    ) -> Self {
        Self {
            medicine_query,
            command,
            query,
            tracer,
        }
    }

    /// Validates every line against the catalog without writing anything.
    ///
    /// Lines are checked in request order; quantities for a medicine listed
    /// more than once are summed before comparing against its stock.
    async fn price_lines(&self, req: &CreateOrderRequest) -> Result<PricedOrder, ServiceError> {
        let mut snapshot: HashMap<i32, Medicine> = HashMap::new();
        let mut requested: HashMap<i32, i32> = HashMap::new();
        let mut items = Vec::with_capacity(req.items.len());
        let mut total = Decimal::ZERO;

        for line in &req.items {
            if !snapshot.contains_key(&line.medicine) {
                let medicine = self
                    .medicine_query
                    .find_by_id(line.medicine)
                    .await?
                    .ok_or(ServiceError::LineItemNotFound(line.medicine))?;
                snapshot.insert(line.medicine, medicine);
            }

            let Some(medicine) = snapshot.get(&line.medicine) else {
                return Err(ServiceError::LineItemNotFound(line.medicine));
            };

            let wanted = requested.entry(line.medicine).or_insert(0);
            // A sum past i32::MAX can never be covered by stock.
            let summed = wanted.checked_add(line.quantity);
            *wanted = summed.unwrap_or(i32::MAX);

            if summed.is_none() || *wanted > medicine.stock {
                return Err(ServiceError::InsufficientStock {
                    medicine_id: medicine.medicine_id,
                    name: medicine.name.clone(),
                    requested: *wanted,
                    available: medicine.stock,
                });
            }

            total += medicine.price * Decimal::from(line.quantity);
            items.push(NewOrderItem {
                medicine_id: medicine.medicine_id,
                medicine_name: medicine.name.clone(),
                quantity: line.quantity,
                price: medicine.price,
            });
        }

        Ok(PricedOrder {
            items,
            total,
            snapshot,
            requested,
        })
    }
}

/// Translates a commit-time rejection into the same failures the validation
/// phase reports.
fn commit_failure(err: RepositoryError, priced: &PricedOrder) -> ServiceError {
    match err {
        RepositoryError::MissingMedicine(id) => ServiceError::LineItemNotFound(id),
        RepositoryError::InsufficientStock {
            medicine_id,
            available,
        } => ServiceError::InsufficientStock {
            medicine_id,
            name: priced
                .snapshot
                .get(&medicine_id)
                .map(|m| m.name.clone())
                .unwrap_or_else(|| format!("medicine {medicine_id}")),
            requested: priced.requested.get(&medicine_id).copied().unwrap_or(0),
            available,
        },
        other => ServiceError::Repo(other),
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create_order(
        &self,
        user_id: i32,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!(
            "🏗️ Placing order for user {user_id} with {} lines",
            req.items.len()
        );

        let method = Method::Post;
        let tracing_ctx = self.tracer.start_tracing(
            "CreateOrder",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("operation", "create"),
                KeyValue::new("user.id", user_id.to_string()),
                KeyValue::new("order.lines", req.items.len() as i64),
            ],
        );

        if req.items.is_empty() {
            self.tracer
                .complete_tracing_error(&tracing_ctx, method, "Order has no items")
                .await;
            return Err(ServiceError::validation(
                "Order must contain at least one item",
            ));
        }

        if let Some(line) = req.items.iter().find(|line| line.quantity < 1) {
            self.tracer
                .complete_tracing_error(&tracing_ctx, method, "Quantity below one")
                .await;
            return Err(ServiceError::validation(format!(
                "Quantity for medicine {} must be at least 1",
                line.medicine
            )));
        }

        let priced = match self.price_lines(req).await {
            Ok(priced) => priced,
            Err(err) => {
                warn!("⚠️ Order for user {user_id} rejected during validation: {err}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, &err.to_string())
                    .await;
                return Err(err);
            }
        };

        let new_order = NewOrder {
            user_id,
            items: priced.items.clone(),
            total: priced.total,
            delivery_details: req.delivery_details.clone(),
            payment_details: req.payment_details.clone(),
        };

        match self.command.create_order(&new_order).await {
            Ok(order) => {
                info!(
                    "✅ Order ID {} placed for user {user_id}, total {}",
                    order.order_id, order.total
                );

                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Order placed")
                    .await;

                Ok(ApiResponse::success(
                    "Order created successfully",
                    OrderResponse::from(order),
                ))
            }
            Err(err) => {
                error!("❌ Failed to commit order for user {user_id}: {err:?}");
                let err = commit_failure(err, &priced);
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, &err.to_string())
                    .await;
                Err(err)
            }
        }
    }

    async fn update_status(
        &self,
        id: i32,
        req: &UpdateOrderStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🔄 Setting status of order ID {id} to {}", req.status);

        let method = Method::Patch;
        let tracing_ctx = self.tracer.start_tracing(
            "UpdateOrderStatus",
            vec![
                KeyValue::new("component", "order"),
                KeyValue::new("order.id", id.to_string()),
                KeyValue::new("order.status", req.status.as_str()),
            ],
        );

        let current = match self.query.find_by_id(id).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Order not found")
                    .await;
                return Err(ServiceError::NotFound("Order".into()));
            }
            Err(err) => {
                error!("❌ Failed to fetch order {id}: {err:?}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to fetch order")
                    .await;
                return Err(ServiceError::Repo(err));
            }
        };

        if !current.status.can_transition_to(req.status) {
            let err = ServiceError::InvalidTransition {
                from: current.status,
                to: req.status,
            };
            self.tracer
                .complete_tracing_error(&tracing_ctx, method, &err.to_string())
                .await;
            return Err(err);
        }

        if current.status == req.status {
            self.tracer
                .complete_tracing_success(&tracing_ctx, method, "Status unchanged")
                .await;
            return Ok(ApiResponse::success(
                "Order status updated",
                OrderResponse::from(current),
            ));
        }

        match self
            .command
            .update_status(id, current.status, req.status)
            .await
        {
            Ok(order) => {
                self.tracer
                    .complete_tracing_success(&tracing_ctx, method, "Order status updated")
                    .await;

                Ok(ApiResponse::success(
                    "Order status updated",
                    OrderResponse::from(order),
                ))
            }
            Err(err) => {
                error!("❌ Failed to update status of order {id}: {err:?}");
                self.tracer
                    .complete_tracing_error(&tracing_ctx, method, "Failed to update status")
                    .await;

                Err(match err {
                    RepositoryError::NotFound => ServiceError::NotFound("Order".into()),
                    other => ServiceError::Repo(other),
                })
            }
        }
    }
}
