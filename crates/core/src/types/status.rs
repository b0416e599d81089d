//! Status enums used as list filters.
//!
//! Values match the Dokan / `WooCommerce` REST vocabulary exactly, so the wire
//! string of each variant can be dropped into a query string as-is.

wire_enum! {
    /// Publication status of a catalog record.
    ///
    /// Product statuses come first; the `wc-` prefixed variants are order
    /// statuses.
    ItemStatus: "status" {
        /// Matches every status.
        Any => "any",
        Publish => "publish",
        Draft => "draft",
        Pending => "pending",
        Private => "private",
        OrderPending => "wc-pending",
        OrderProcessing => "wc-processing",
        OrderOnHold => "wc-on-hold",
        OrderCompleted => "wc-completed",
        OrderCancelled => "wc-cancelled",
        OrderRefunded => "wc-refunded",
        OrderFailed => "wc-failed",
    }
}

wire_enum! {
    /// Inventory state of a product.
    StockStatus: "stock status" {
        InStock => "instock",
        OutOfStock => "outofstock",
        OnBackorder => "onbackorder",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_item_status_wire_strings() {
        assert_eq!(ItemStatus::Publish.as_str(), "publish");
        assert_eq!(ItemStatus::OrderOnHold.to_string(), "wc-on-hold");
        assert_eq!("draft".parse::<ItemStatus>().unwrap(), ItemStatus::Draft);
    }

    #[test]
    fn test_item_status_rejects_unknown() {
        let err = "archived".parse::<ItemStatus>().unwrap_err();
        assert_eq!(err.to_string(), "invalid status: archived");
    }

    #[test]
    fn test_stock_status_serde() {
        let json = serde_json::to_string(&StockStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"outofstock\"");
        let parsed: StockStatus = serde_json::from_str("\"onbackorder\"").unwrap();
        assert_eq!(parsed, StockStatus::OnBackorder);
    }

    #[test]
    fn test_all_variants_parse_back() {
        for status in ItemStatus::ALL {
            assert_eq!(status.as_str().parse::<ItemStatus>().unwrap(), *status);
        }
        for status in StockStatus::ALL {
            assert_eq!(status.as_str().parse::<StockStatus>().unwrap(), *status);
        }
    }
}
