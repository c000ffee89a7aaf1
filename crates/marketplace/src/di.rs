use crate::{
    abstract_trait::{
        auth::DynAuthService,
        cart::{DynCartRepository, DynCartService},
        order::{DynOrderPlacementService, DynOrderQueryRepository, DynOrderQueryService},
        order_placement::DynOrderPlacementStore,
        product::{
            DynCatalogService, DynProductCommandRepository, DynProductQueryRepository,
            DynSellerProductService,
        },
        seller::{DynSellerOrderService, DynSellerRepository},
        user::DynUserRepository,
    },
    config::myconfig::OrderPlacementConfig,
    repository::{
        cart::CartRepository, order::OrderQueryRepository,
        order_placement::PostgresOrderPlacementStore,
        product::{ProductCommandRepository, ProductQueryRepository},
        seller::SellerRepository,
        user::UserRepository,
    },
    service::{
        auth::{AuthService, AuthServiceDeps},
        cart::{CartService, CartServiceDeps},
        catalog::CatalogService,
        order::{
            OrderPlacementService, OrderPlacementServiceDeps, OrderQueryService,
            OrderQueryServiceDeps,
        },
        seller::{
            SellerOrderService, SellerOrderServiceDeps, SellerProductService,
            SellerProductServiceDeps,
        },
    },
};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynHashing, DynJwtService},
    config::{ConnectionPool, Hashing},
};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: DynAuthService,
    pub catalog_service: DynCatalogService,
    pub cart_service: DynCartService,
    pub order_placement_service: DynOrderPlacementService,
    pub order_query_service: DynOrderQueryService,
    pub seller_product_service: DynSellerProductService,
    pub seller_order_service: DynSellerOrderService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"DynAuthService")
            .field("catalog_service", &"DynCatalogService")
            .field("cart_service", &"DynCartService")
            .field("order_placement_service", &"DynOrderPlacementService")
            .field("order_query_service", &"DynOrderQueryService")
            .field("seller_product_service", &"DynSellerProductService")
            .field("seller_order_service", &"DynSellerOrderService")
            .finish()
    }
}

impl DependenciesInject {
    pub async fn new(
        pool: ConnectionPool,
        jwt: DynJwtService,
        placement: &OrderPlacementConfig,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let users: DynUserRepository = Arc::new(UserRepository::new(pool.clone()));
        let product_query: DynProductQueryRepository =
            Arc::new(ProductQueryRepository::new(pool.clone()));
        let product_command: DynProductCommandRepository =
            Arc::new(ProductCommandRepository::new(pool.clone()));
        let cart: DynCartRepository = Arc::new(CartRepository::new(pool.clone()));
        let order_query: DynOrderQueryRepository =
            Arc::new(OrderQueryRepository::new(pool.clone()));
        let seller: DynSellerRepository = Arc::new(SellerRepository::new(pool.clone()));
        let placement_store: DynOrderPlacementStore =
            Arc::new(PostgresOrderPlacementStore::new(pool));
        let hashing: DynHashing = Arc::new(Hashing::new());

        let auth_service: DynAuthService = Arc::new(
            AuthService::new(AuthServiceDeps {
                users,
                hashing,
                jwt,
                registry: registry.clone(),
            })
            .await,
        );

        let catalog_service: DynCatalogService =
            Arc::new(CatalogService::new(product_query.clone(), registry.clone()).await);

        let cart_service: DynCartService = Arc::new(
            CartService::new(CartServiceDeps {
                cart,
                products: product_query.clone(),
                registry: registry.clone(),
            })
            .await,
        );

        let order_placement_service: DynOrderPlacementService = Arc::new(
            OrderPlacementService::new(OrderPlacementServiceDeps {
                store: placement_store,
                registry: registry.clone(),
                timeout: placement.timeout,
                conflict_retries: placement.conflict_retries,
            })
            .await,
        );

        let order_query_service: DynOrderQueryService = Arc::new(
            OrderQueryService::new(OrderQueryServiceDeps {
                query: order_query,
                registry: registry.clone(),
            })
            .await,
        );

        let seller_product_service: DynSellerProductService = Arc::new(
            SellerProductService::new(SellerProductServiceDeps {
                query: product_query,
                command: product_command,
                registry: registry.clone(),
            })
            .await,
        );

        let seller_order_service: DynSellerOrderService = Arc::new(
            SellerOrderService::new(SellerOrderServiceDeps {
                repository: seller,
                registry,
            })
            .await,
        );

        Self {
            auth_service,
            catalog_service,
            cart_service,
            order_placement_service,
            order_query_service,
            seller_product_service,
            seller_order_service,
        }
    }
}
