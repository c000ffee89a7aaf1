use crate::{
    abstract_trait::order_placement::{OrderPlacementSession, OrderPlacementStoreTrait},
    domain::placement::{OrderDraft, OrderItemDraft},
    model::{cart_item::CartSnapshotRow, order::Order, order_item::OrderItem},
};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use shared::errors::RepositoryError;
use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Step at which a session reports a storage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    InsertOrderItem,
    ClearCart,
    Commit,
}

#[derive(Debug, Clone)]
struct StoredProduct {
    name: String,
    price: Decimal,
    stock: i32,
    seller_id: i32,
    deleted: bool,
}

#[derive(Debug, Clone)]
struct StoredCartLine {
    user_id: i32,
    product_id: i32,
    quantity: i32,
}

#[derive(Debug, Default)]
struct MemoryState {
    products: BTreeMap<i32, StoredProduct>,
    cart: BTreeMap<i32, StoredCartLine>,
    orders: Vec<Order>,
    order_items: Vec<OrderItem>,
    next_cart_id: i32,
    next_order_id: i32,
    next_order_item_id: i32,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process store with the same visibility rules as the Postgres one:
/// cart rows are locked per buyer for the session, stock decrements are
/// conditional, and anything not committed is undone when the session drops.
#[derive(Clone, Default)]
pub struct MemoryOrderPlacementStore {
    state: Arc<Mutex<MemoryState>>,
    cart_locks: Arc<Mutex<HashMap<i32, Arc<AsyncMutex<()>>>>>,
    fail_point: Arc<Mutex<Option<FailPoint>>>,
}

impl MemoryOrderPlacementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_product(&self, id: i32, name: &str, price: Decimal, stock: i32) {
        lock(&self.state).products.insert(
            id,
            StoredProduct {
                name: name.to_string(),
                price,
                stock,
                seller_id: 1,
                deleted: false,
            },
        );
    }

    /// Adds to the buyer's line for the product, creating it when missing.
    pub fn add_to_cart(&self, user_id: i32, product_id: i32, quantity: i32) -> i32 {
        let mut state = lock(&self.state);
        let existing = state
            .cart
            .iter_mut()
            .find(|(_, line)| line.user_id == user_id && line.product_id == product_id);

        if let Some((id, line)) = existing {
            line.quantity += quantity;
            return *id;
        }

        state.next_cart_id += 1;
        let id = state.next_cart_id;
        state.cart.insert(
            id,
            StoredCartLine {
                user_id,
                product_id,
                quantity,
            },
        );
        id
    }

    pub fn set_price(&self, product_id: i32, price: Decimal) {
        if let Some(product) = lock(&self.state).products.get_mut(&product_id) {
            product.price = price;
        }
    }

    /// Overwrites stock as a concurrent writer would. Returns the previous value.
    pub fn set_stock(&self, product_id: i32, stock: i32) -> Option<i32> {
        lock(&self.state)
            .products
            .get_mut(&product_id)
            .map(|product| std::mem::replace(&mut product.stock, stock))
    }

    pub fn remove_product(&self, product_id: i32) {
        if let Some(product) = lock(&self.state).products.get_mut(&product_id) {
            product.deleted = true;
        }
    }

    pub fn stock(&self, product_id: i32) -> Option<i32> {
        lock(&self.state)
            .products
            .get(&product_id)
            .map(|product| product.stock)
    }

    /// `(product_id, quantity)` for each of the buyer's lines.
    pub fn cart(&self, user_id: i32) -> Vec<(i32, i32)> {
        lock(&self.state)
            .cart
            .values()
            .filter(|line| line.user_id == user_id)
            .map(|line| (line.product_id, line.quantity))
            .collect()
    }

    pub fn orders(&self) -> Vec<Order> {
        lock(&self.state).orders.clone()
    }

    pub fn order_items(&self, order_id: i32) -> Vec<OrderItem> {
        lock(&self.state)
            .order_items
            .iter()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect()
    }

    pub fn fail_at(&self, point: FailPoint) {
        *lock(&self.fail_point) = Some(point);
    }
}

#[async_trait]
impl OrderPlacementStoreTrait for MemoryOrderPlacementStore {
    async fn begin(&self) -> Result<Box<dyn OrderPlacementSession>, RepositoryError> {
        Ok(Box::new(MemoryOrderPlacementSession {
            state: self.state.clone(),
            cart_locks: self.cart_locks.clone(),
            fail_point: *lock(&self.fail_point),
            cart_guard: None,
            stock_undo: Vec::new(),
            removed_cart: Vec::new(),
            staged_orders: Vec::new(),
            staged_items: Vec::new(),
            committed: false,
        }))
    }
}

pub struct MemoryOrderPlacementSession {
    state: Arc<Mutex<MemoryState>>,
    cart_locks: Arc<Mutex<HashMap<i32, Arc<AsyncMutex<()>>>>>,
    fail_point: Option<FailPoint>,
    cart_guard: Option<OwnedMutexGuard<()>>,
    stock_undo: Vec<(i32, i32)>,
    removed_cart: Vec<(i32, StoredCartLine)>,
    staged_orders: Vec<Order>,
    staged_items: Vec<OrderItem>,
    committed: bool,
}

impl MemoryOrderPlacementSession {
    fn check(&self, point: FailPoint) -> Result<(), RepositoryError> {
        if self.fail_point == Some(point) {
            Err(RepositoryError::Custom(format!("injected failure at {point:?}")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl OrderPlacementSession for MemoryOrderPlacementSession {
    async fn cart_snapshot(
        &mut self,
        user_id: i32,
    ) -> Result<Vec<CartSnapshotRow>, RepositoryError> {
        let cart_lock = lock(&self.cart_locks).entry(user_id).or_default().clone();
        self.cart_guard = Some(cart_lock.lock_owned().await);

        let state = lock(&self.state);
        let mut rows: Vec<CartSnapshotRow> = state
            .cart
            .iter()
            .filter(|(_, line)| line.user_id == user_id)
            .map(|(id, line)| {
                let product = state
                    .products
                    .get(&line.product_id)
                    .filter(|product| !product.deleted);

                CartSnapshotRow {
                    cart_item_id: *id,
                    product_id: line.product_id,
                    quantity: line.quantity,
                    product_name: product.map(|p| p.name.clone()),
                    price: product.map(|p| p.price),
                    stock: product.map(|p| p.stock),
                    seller_id: product.map(|p| p.seller_id),
                }
            })
            .collect();

        rows.sort_by_key(|row| (row.product_id, row.cart_item_id));
        Ok(rows)
    }

    async fn insert_order(&mut self, draft: &OrderDraft) -> Result<Order, RepositoryError> {
        let mut state = lock(&self.state);
        state.next_order_id += 1;

        let order = Order {
            id: state.next_order_id,
            user_id: draft.user_id,
            total: draft.total,
            status: draft.status.as_str().to_string(),
            created_at: Utc::now(),
        };
        self.staged_orders.push(order.clone());
        Ok(order)
    }

    async fn insert_order_item(
        &mut self,
        order_id: i32,
        item: &OrderItemDraft,
    ) -> Result<OrderItem, RepositoryError> {
        self.check(FailPoint::InsertOrderItem)?;

        let mut state = lock(&self.state);
        state.next_order_item_id += 1;

        let row = OrderItem {
            id: state.next_order_item_id,
            order_id,
            product_id: item.product.id,
            quantity: item.quantity,
            price: item.price,
            status: item.status.as_str().to_string(),
        };
        self.staged_items.push(row.clone());
        Ok(row)
    }

    async fn decrement_stock(
        &mut self,
        product_id: i32,
        quantity: i32,
    ) -> Result<bool, RepositoryError> {
        let mut state = lock(&self.state);
        match state.products.get_mut(&product_id) {
            Some(product) if !product.deleted && product.stock >= quantity => {
                product.stock -= quantity;
                self.stock_undo.push((product_id, quantity));
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn clear_cart(
        &mut self,
        user_id: i32,
        cart_item_ids: &[i32],
    ) -> Result<u64, RepositoryError> {
        self.check(FailPoint::ClearCart)?;

        let mut state = lock(&self.state);
        let mut removed = 0;
        for id in cart_item_ids {
            if !state.cart.get(id).is_some_and(|line| line.user_id == user_id) {
                continue;
            }
            if let Some(line) = state.cart.remove(id) {
                self.removed_cart.push((*id, line));
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        self.check(FailPoint::Commit)?;

        let mut session = self;
        let orders = std::mem::take(&mut session.staged_orders);
        let items = std::mem::take(&mut session.staged_items);
        {
            let mut state = lock(&session.state);
            state.orders.extend(orders);
            state.order_items.extend(items);
        }
        session.committed = true;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError> {
        Ok(())
    }
}

impl Drop for MemoryOrderPlacementSession {
    fn drop(&mut self) {
        if self.committed {
            return;
        }

        let mut state = lock(&self.state);
        for (product_id, quantity) in self.stock_undo.drain(..) {
            if let Some(product) = state.products.get_mut(&product_id) {
                product.stock += quantity;
            }
        }
        for (id, line) in self.removed_cart.drain(..) {
            state.cart.insert(id, line);
        }
    }
}
