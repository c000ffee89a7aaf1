//! Pure steps of order placement: turning the locked cart rows into a
//! validated plan, and the plan into the rows to insert.

use super::OrderPlacementError;
use crate::{
    domain::{
        placement::{CartSnapshotLine, OrderDraft, OrderItemDraft, OrderPlan, PlanLine},
        response::order::ProductSummary,
        status::{FulfillmentStatus, OrderStatus},
    },
    model::cart_item::CartSnapshotRow,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Fails with `NotFound` for the first line whose product is gone.
pub fn read_snapshot(
    rows: Vec<CartSnapshotRow>,
) -> Result<Vec<CartSnapshotLine>, OrderPlacementError> {
    rows.into_iter()
        .map(|row| match (row.product_name, row.price, row.stock, row.seller_id) {
            (Some(product_name), Some(price), Some(stock), Some(seller_id)) => {
                Ok(CartSnapshotLine {
                    cart_item_id: row.cart_item_id,
                    product_id: row.product_id,
                    quantity: row.quantity,
                    product_name,
                    price,
                    stock,
                    seller_id,
                })
            }
            _ => Err(OrderPlacementError::NotFound(row.product_id)),
        })
        .collect()
}

/// Checks every product in ascending id order against the stock seen in the
/// snapshot. This is a fast reject only; the conditional decrement decides.
pub fn validate(lines: &[CartSnapshotLine]) -> Result<OrderPlan, OrderPlacementError> {
    if lines.is_empty() {
        return Err(OrderPlacementError::Invalid("Cart is empty".to_string()));
    }

    let mut grouped: BTreeMap<i32, (PlanLine, i32)> = BTreeMap::new();
    let mut cart_item_ids = Vec::with_capacity(lines.len());

    for line in lines {
        if line.quantity <= 0 {
            return Err(OrderPlacementError::Invalid(format!(
                "Invalid quantity {} for {}",
                line.quantity, line.product_name
            )));
        }

        cart_item_ids.push(line.cart_item_id);
        grouped
            .entry(line.product_id)
            .and_modify(|(plan_line, _)| plan_line.quantity += line.quantity)
            .or_insert_with(|| {
                let plan_line = PlanLine {
                    product: ProductSummary {
                        id: line.product_id,
                        name: line.product_name.clone(),
                        seller_id: line.seller_id,
                    },
                    quantity: line.quantity,
                    price: line.price,
                };
                (plan_line, line.stock)
            });
    }

    let mut plan_lines = Vec::with_capacity(grouped.len());
    for (plan_line, available) in grouped.into_values() {
        if plan_line.quantity > available {
            return Err(OrderPlacementError::InsufficientStock {
                product_id: plan_line.product.id,
                product_name: plan_line.product.name,
                requested: plan_line.quantity,
                available,
            });
        }
        plan_lines.push(plan_line);
    }

    let total: Decimal = plan_lines
        .iter()
        .map(|line| line.price * Decimal::from(line.quantity))
        .sum();

    cart_item_ids.sort_unstable();

    Ok(OrderPlan {
        lines: plan_lines,
        cart_item_ids,
        total,
    })
}

/// Freezes the snapshot price on every line.
pub fn assemble(user_id: i32, plan: &OrderPlan) -> OrderDraft {
    let items = plan
        .lines
        .iter()
        .map(|line| OrderItemDraft {
            product: line.product.clone(),
            quantity: line.quantity,
            price: line.price,
            status: FulfillmentStatus::Pending,
        })
        .collect();

    OrderDraft {
        user_id,
        status: OrderStatus::Pending,
        total: plan.total,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(
        cart_item_id: i32,
        product_id: i32,
        quantity: i32,
        price: Decimal,
        stock: i32,
    ) -> CartSnapshotLine {
        CartSnapshotLine {
            cart_item_id,
            product_id,
            quantity,
            product_name: format!("product-{product_id}"),
            price,
            stock,
            seller_id: 9,
        }
    }

    #[test]
    fn empty_cart_is_invalid() {
        assert!(matches!(
            validate(&[]),
            Err(OrderPlacementError::Invalid(msg)) if msg == "Cart is empty"
        ));
    }

    #[test]
    fn first_short_product_in_id_order_is_reported() {
        let lines = vec![
            line(1, 30, 5, dec!(1.00), 1),
            line(2, 10, 2, dec!(10.00), 5),
            line(3, 20, 1, dec!(20.00), 0),
        ];

        match validate(&lines) {
            Err(OrderPlacementError::InsufficientStock {
                product_id,
                product_name,
                requested,
                available,
            }) => {
                assert_eq!(product_id, 20);
                assert_eq!(product_name, "product-20");
                assert_eq!((requested, available), (1, 0));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn lines_for_same_product_are_checked_together() {
        let lines = vec![line(1, 7, 2, dec!(3.50), 3), line(2, 7, 2, dec!(3.50), 3)];

        assert!(matches!(
            validate(&lines),
            Err(OrderPlacementError::InsufficientStock { requested: 4, available: 3, .. })
        ));
    }

    #[test]
    fn plan_is_sorted_and_totals_exactly() {
        let lines = vec![
            line(4, 12, 3, dec!(0.10), 10),
            line(2, 3, 1, dec!(19.99), 1),
            line(9, 12, 1, dec!(0.10), 10),
        ];

        let plan = validate(&lines).expect("plan");

        let ids: Vec<i32> = plan.lines.iter().map(|l| l.product.id).collect();
        assert_eq!(ids, vec![3, 12]);
        assert_eq!(plan.lines[1].quantity, 4);
        assert_eq!(plan.cart_item_ids, vec![2, 4, 9]);
        assert_eq!(plan.total, dec!(20.39));
    }

    #[test]
    fn assembled_order_is_pending_with_frozen_prices() {
        let plan = validate(&[line(1, 1, 3, dec!(10.00), 5)]).expect("plan");
        let draft = assemble(42, &plan);

        assert_eq!(draft.user_id, 42);
        assert_eq!(draft.status, OrderStatus::Pending);
        assert_eq!(draft.total, dec!(30.00));
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].price, dec!(10.00));
        assert_eq!(draft.items[0].status, FulfillmentStatus::Pending);
    }

    #[test]
    fn missing_product_in_snapshot_is_not_found() {
        let rows = vec![
            CartSnapshotRow {
                cart_item_id: 1,
                product_id: 5,
                quantity: 1,
                product_name: Some("Lamp".into()),
                price: Some(dec!(12.00)),
                stock: Some(3),
                seller_id: Some(2),
            },
            CartSnapshotRow {
                cart_item_id: 2,
                product_id: 6,
                quantity: 1,
                product_name: None,
                price: None,
                stock: None,
                seller_id: None,
            },
        ];

        assert!(matches!(
            read_snapshot(rows),
            Err(OrderPlacementError::NotFound(6))
        ));
    }
}
