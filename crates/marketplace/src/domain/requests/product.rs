use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

fn validate_positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_positive() && !price.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("price").with_message("Price must be greater than 0".into()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_positive_price"))]
    pub price: Decimal,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(custom(function = "validate_positive_price"))]
    pub price: Option<Decimal>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateStockRequest {
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn create_product_requires_positive_price_and_stock() {
        let valid = CreateProductRequest {
            name: "Desk lamp".into(),
            description: None,
            price: dec!(19.99),
            stock: 0,
        };
        assert!(valid.validate().is_ok());

        let free = CreateProductRequest {
            price: dec!(0),
            ..valid.clone()
        };
        assert!(free.validate().is_err());

        let negative_stock = CreateProductRequest {
            stock: -1,
            ..valid
        };
        assert!(negative_stock.validate().is_err());
    }

    #[test]
    fn partial_update_only_validates_present_fields() {
        assert!(UpdateProductRequest::default().validate().is_ok());

        let bad_price = UpdateProductRequest {
            price: Some(dec!(-5)),
            ..Default::default()
        };
        assert!(bad_price.validate().is_err());
    }
}
