mod catalog;
mod db;
mod dispatch;
mod error;
mod geo;
mod orders;
mod validation;

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use catalog::repository::CatalogRepository;
use catalog::{CategoryResponse, ProductResponse, Restaurant};
use dispatch::ranking::RankedRestaurant;
use dispatch::service::DispatchService;
use geo::cache::CoordinateCache;
use geo::client::{GeocoderClient, GeocoderConfig};
use geo::repository::CoordinateRepository;
use orders::service::OrderService;
use orders::{
    AssignRestaurantRequest, CreateOrderRequest, OrderItemRequest, OrderItemResponse,
    OrderItemsRepository, OrderResponse, OrderStatus, OrderSummaryResponse, OrdersRepository,
    PaymentMethod, UpdateStatusRequest,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        orders::handlers::create_order_handler,
        orders::handlers::list_orders_handler,
        orders::handlers::update_order_status_handler,
        orders::handlers::assign_restaurant_handler,
        catalog::handlers::list_products_handler,
        catalog::handlers::list_restaurants_handler,
    ),
    components(
        schemas(
            CreateOrderRequest, OrderItemRequest, OrderResponse, OrderItemResponse,
            OrderSummaryResponse, UpdateStatusRequest, AssignRestaurantRequest,
            OrderStatus, PaymentMethod, RankedRestaurant,
            ProductResponse, CategoryResponse, Restaurant,
        )
    ),
    tags(
        (name = "orders", description = "Order intake and back-office endpoints"),
        (name = "catalog", description = "Product and restaurant listings")
    ),
    info(
        title = "FoodCart API",
        version = "1.0.0",
        description = "Restaurant food-ordering back office: order intake, \
                       geocoding and restaurant distance ranking"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    catalog: CatalogRepository,
    orders: OrderService,
}

/// Wire repositories and services around a database pool and geocoder client.
fn build_app_state(pool: PgPool, geocoder: GeocoderClient) -> AppState {
    let coordinates = CoordinateCache::new(
        CoordinateRepository::new(pool.clone()),
        Arc::new(geocoder),
    );
    let catalog = CatalogRepository::new(pool.clone());
    let dispatch = DispatchService::new(catalog.clone(), coordinates.clone());
    let orders = OrderService::new(
        OrdersRepository::new(pool.clone()),
        OrderItemsRepository::new(pool),
        catalog.clone(),
        coordinates,
        dispatch,
    );

    AppState { catalog, orders }
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
fn create_router(state: AppState) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // API routes
        .route("/api/orders", post(orders::handlers::create_order_handler))
        .route("/api/orders", get(orders::handlers::list_orders_handler))
        .route(
            "/api/orders/:order_id/status",
            patch(orders::handlers::update_order_status_handler),
        )
        .route(
            "/api/orders/:order_id/restaurant",
            patch(orders::handlers::assign_restaurant_handler),
        )
        .route("/api/products", get(catalog::handlers::list_products_handler))
        .route(
            "/api/restaurants",
            get(catalog::handlers::list_restaurants_handler),
        )
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("FoodCart API - Starting...");

    // Get configuration from environment variables
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    // A missing geocoder credential must fail loudly at startup, not on the
    // first order.
    let geocoder_config =
        GeocoderConfig::from_env().expect("Geocoder configuration is incomplete");
    let geocoder =
        GeocoderClient::new(geocoder_config).expect("Failed to build geocoder client");

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Create the application router
    let app = create_router(build_app_state(db_pool, geocoder));

    // Start the Axum server
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("FoodCart API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests;
