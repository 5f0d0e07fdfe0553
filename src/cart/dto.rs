use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::repo::CartLine;

/// Quantities arrive from form-style clients as numbers or numeric
/// strings. Mirror an integer cast: numbers truncate, numeric strings
/// parse, anything else coerces to 0 and is then caught by the
/// positive-quantity check.
pub(crate) fn coerce_quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Int(n) => n,
        Raw::Float(f) => f as i64,
        Raw::Text(s) => s.trim().parse::<i64>().unwrap_or(0),
    })
}

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: Uuid,
    #[serde(deserialize_with = "coerce_quantity")]
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCartQuantityRequest {
    pub cart_item_id: Uuid,
    #[serde(deserialize_with = "coerce_quantity")]
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub cart_item_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CartItemsPayload {
    pub cart_items: Vec<CartLine>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quantity_of(value: serde_json::Value) -> i64 {
        let req: AddToCartRequest = serde_json::from_value(json!({
            "product_id": Uuid::new_v4(),
            "quantity": value,
        }))
        .unwrap();
        req.quantity
    }

    #[test]
    fn numbers_pass_through() {
        assert_eq!(quantity_of(json!(3)), 3);
        assert_eq!(quantity_of(json!(-2)), -2);
        assert_eq!(quantity_of(json!(2.9)), 2);
    }

    #[test]
    fn numeric_strings_parse() {
        assert_eq!(quantity_of(json!("4")), 4);
        assert_eq!(quantity_of(json!(" 7 ")), 7);
        assert_eq!(quantity_of(json!("-1")), -1);
    }

    #[test]
    fn garbage_strings_coerce_to_zero() {
        assert_eq!(quantity_of(json!("lots")), 0);
        assert_eq!(quantity_of(json!("")), 0);
    }
}
