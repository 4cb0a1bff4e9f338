//! Order totals derived from the cart and checkout selections.

use covercraft_core::PaymentMethod;
use rust_decimal::Decimal;

use crate::cart::LineItem;
use crate::coupon::AppliedCoupon;

/// The priced breakdown of a checkout: what the customer pays and why.
///
/// Shipping is always free in this design; the only additions and
/// subtractions are the coupon discount and the COD surcharge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderQuote {
    pub subtotal: Decimal,
    pub coupon_discount: Decimal,
    pub cod_surcharge: Decimal,
    pub total: Decimal,
}

impl OrderQuote {
    /// Price the given items under the selected payment method.
    #[must_use]
    pub fn build(
        items: &[LineItem],
        coupon: Option<&AppliedCoupon>,
        method: PaymentMethod,
        cod_surcharge: Decimal,
    ) -> Self {
        let subtotal: Decimal = items.iter().map(LineItem::line_total).sum();

        let coupon_discount = coupon
            .map(|applied| applied.discount_for(subtotal))
            .unwrap_or_default();

        let cod_surcharge = match method {
            PaymentMethod::CashOnDelivery => cod_surcharge,
            PaymentMethod::Online => Decimal::ZERO,
        };

        let total = subtotal - coupon_discount + cod_surcharge;

        Self {
            subtotal,
            coupon_discount,
            cod_surcharge,
            total,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::coupon::{CouponBook, CouponRule};
    use covercraft_core::ProductId;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn item(product_id: i64, price: &str, quantity: u32) -> LineItem {
        LineItem {
            product_id: ProductId::new(product_id),
            variation_id: None,
            name: format!("Case {product_id}"),
            unit_price: dec(price),
            regular_price: dec(price),
            images: vec![],
            attributes: vec![],
            quantity,
        }
    }

    #[test]
    fn test_online_no_coupon() {
        let quote = OrderQuote::build(
            &[item(1, "500", 2)],
            None,
            PaymentMethod::Online,
            dec("50"),
        );
        assert_eq!(quote.subtotal, dec("1000"));
        assert_eq!(quote.coupon_discount, Decimal::ZERO);
        assert_eq!(quote.cod_surcharge, Decimal::ZERO);
        assert_eq!(quote.total, dec("1000"));
    }

    #[test]
    fn test_cod_adds_surcharge() {
        let quote = OrderQuote::build(
            &[item(1, "500", 2)],
            None,
            PaymentMethod::CashOnDelivery,
            dec("50"),
        );
        assert_eq!(quote.total, dec("1050"));
        assert_eq!(quote.cod_surcharge, dec("50"));
    }

    #[test]
    fn test_coupon_discount_applies() {
        let book = CouponBook::new(vec![CouponRule {
            code: "CASE10".to_owned(),
            rate: dec("0.10"),
            min_subtotal: dec("499"),
        }]);
        let applied = book.apply("CASE10", dec("1000"), None).unwrap();

        let quote = OrderQuote::build(
            &[item(1, "500", 2)],
            Some(&applied),
            PaymentMethod::Online,
            dec("50"),
        );
        assert_eq!(quote.coupon_discount, dec("100"));
        assert_eq!(quote.total, dec("900"));
    }

    #[test]
    fn test_subtotal_independent_of_item_order() {
        let a = [item(1, "499.50", 1), item(2, "999", 2)];
        let b = [item(2, "999", 2), item(1, "499.50", 1)];
        let qa = OrderQuote::build(&a, None, PaymentMethod::Online, dec("50"));
        let qb = OrderQuote::build(&b, None, PaymentMethod::Online, dec("50"));
        assert_eq!(qa.subtotal, dec("2497.50"));
        assert_eq!(qa.subtotal, qb.subtotal);
    }
}
