use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::catalog::repository::CatalogRepository;
use crate::dispatch::service::{DispatchOrder, DispatchService};
use crate::geo::cache::CoordinateCache;
use crate::orders::{
    CreateOrderRequest, NewOrder, Order, OrderError, OrderItemResponse, OrderItemsRepository,
    OrderResponse, OrderStatus, OrderSummaryResponse, OrdersRepository, PriceCalculator,
    StatusMachine,
};
use crate::validation;

/// Service for order intake, listing and lifecycle operations
#[derive(Clone)]
pub struct OrderService {
    orders_repo: OrdersRepository,
    items_repo: OrderItemsRepository,
    catalog: CatalogRepository,
    coordinates: CoordinateCache,
    dispatch: DispatchService,
}

impl OrderService {
    /// Create a new OrderService
    pub fn new(
        orders_repo: OrdersRepository,
        items_repo: OrderItemsRepository,
        catalog: CatalogRepository,
        coordinates: CoordinateCache,
        dispatch: DispatchService,
    ) -> Self {
        Self {
            orders_repo,
            items_repo,
            catalog,
            coordinates,
            dispatch,
        }
    }

    /// Create a new order from a validated submission.
    ///
    /// # Validation
    /// - Request fields pass the DTO validation rules
    /// - Phone number is normalized to E.164 before persistence
    /// - All quantities must be positive
    /// - Every referenced product must exist; price snapshots are captured
    ///   from the current product prices
    /// - The order starts in "new" status
    ///
    /// The order row and its line items commit in one transaction; resolving
    /// the delivery-address coordinates afterwards is best-effort and never
    /// fails the submission.
    pub async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<OrderResponse, OrderError> {
        request.validate()?;

        let phone = validation::normalize_phone(&request.phonenumber)
            .map_err(|_| OrderError::InvalidPhone(request.phonenumber.clone()))?;

        let product_ids: Vec<i32> = request
            .products
            .iter()
            .map(|item| {
                if item.quantity <= 0 {
                    return Err(OrderError::InvalidQuantity(format!(
                        "Quantity must be positive, got {}",
                        item.quantity
                    )));
                }
                Ok(item.product)
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Fetch the referenced products to confirm they exist and freeze
        // their current prices as the snapshots.
        let products = self.catalog.find_products_by_ids(&product_ids).await?;
        let price_map: HashMap<i32, Decimal> = products
            .into_iter()
            .map(|product| (product.id, product.price))
            .collect();

        let mut items = Vec::new();
        for item_request in &request.products {
            let price_snapshot = price_map
                .get(&item_request.product)
                .ok_or(OrderError::ProductNotFound(item_request.product))?;

            items.push((item_request.product, item_request.quantity, *price_snapshot));
        }

        let new_order = NewOrder {
            firstname: request.firstname,
            lastname: request.lastname,
            phone,
            address: request.address,
            comment: request.comment.unwrap_or_default(),
            payment: request.payment.unwrap_or_default(),
        };

        let order = self.orders_repo.create(new_order, items).await?;

        // Best-effort: warm the coordinate cache for the delivery address so
        // the manager view finds it resolved. Must never abort the order.
        if let Err(err) = self.coordinates.resolve(&order.address).await {
            tracing::warn!(
                "Could not cache coordinates for order {} address: {}",
                order.id,
                err
            );
        }

        let stored_items = self.items_repo.find_by_order_id(order.id).await?;
        Ok(Self::build_response(order, stored_items))
    }

    /// All orders for the manager view, each with its computed total and the
    /// ranked list of restaurants able to fulfill it.
    pub async fn list_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderSummaryResponse>, OrderError> {
        let orders = self.orders_repo.list_with_totals(status).await?;

        let order_ids: Vec<Uuid> = orders.iter().map(|order| order.id).collect();
        let items = self.items_repo.find_by_order_ids(&order_ids).await?;

        let mut products_by_order: HashMap<Uuid, HashSet<i32>> = HashMap::new();
        for item in items {
            products_by_order
                .entry(item.order_id)
                .or_default()
                .insert(item.product_id);
        }

        let dispatch_orders: Vec<DispatchOrder> = orders
            .iter()
            .map(|order| DispatchOrder {
                order_id: order.id,
                address: order.address.clone(),
                product_ids: products_by_order.remove(&order.id).unwrap_or_default(),
            })
            .collect();

        let mut rankings = self.dispatch.annotate_orders(&dispatch_orders).await?;

        Ok(orders
            .into_iter()
            .map(|order| OrderSummaryResponse {
                available_restaurants: rankings.remove(&order.id).unwrap_or_default(),
                id: order.id,
                firstname: order.firstname,
                lastname: order.lastname,
                phonenumber: order.phone,
                address: order.address,
                status: order.status,
                payment: order.payment,
                comment: order.comment,
                total_price: order.total_price,
                restaurant: order.restaurant_name,
                registered_at: order.registered_at,
            })
            .collect())
    }

    /// Advance an order through the status machine.
    pub async fn update_order_status(
        &self,
        order_id: Uuid,
        new_status: OrderStatus,
    ) -> Result<Order, OrderError> {
        let order = self
            .orders_repo
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;

        StatusMachine::transition(order.status, new_status)
            .map_err(OrderError::InvalidTransition)?;

        let updated_order = self.orders_repo.update_status(order_id, new_status).await?;

        Ok(updated_order)
    }

    /// Assign the restaurant that will fulfill an order.
    pub async fn assign_restaurant(
        &self,
        order_id: Uuid,
        restaurant_id: i32,
    ) -> Result<Order, OrderError> {
        if !self.catalog.restaurant_exists(restaurant_id).await? {
            return Err(OrderError::RestaurantNotFound(restaurant_id));
        }

        let updated_order = self
            .orders_repo
            .assign_restaurant(order_id, restaurant_id)
            .await?;

        Ok(updated_order)
    }

    fn build_response(order: Order, items: Vec<crate::orders::OrderItem>) -> OrderResponse {
        let subtotals: Vec<Decimal> = items
            .iter()
            .map(|item| PriceCalculator::calculate_subtotal(item.quantity, item.price))
            .collect();
        let total_price = PriceCalculator::calculate_total(&subtotals);

        OrderResponse {
            id: order.id,
            firstname: order.firstname,
            lastname: order.lastname,
            phonenumber: order.phone,
            address: order.address,
            status: order.status,
            payment: order.payment,
            comment: order.comment,
            total_price,
            items: items.into_iter().map(OrderItemResponse::from).collect(),
            registered_at: order.registered_at,
        }
    }
}
