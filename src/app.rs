//! The application route table.
//!
//! | Path          | Name         | View            |
//! |---------------|--------------|-----------------|
//! | `/`           | `Home`       | QR scanner      |
//! | `/device/:id` | `DeviceInfo` | Device info     |
//!
//! The two patterns do not overlap, so their order does not matter today.
//! New routes are matched in declaration order; put specific ones first.

use crate::config::RoutingConfig;
use crate::routing::{RouteTable, RouteTableError, Router, RouterOptions};
use crate::views::{DeviceInfoView, QrScannerView};

pub const HOME: &str = "Home";
pub const DEVICE_INFO: &str = "DeviceInfo";

/// Build the route table.
pub fn route_table() -> Result<RouteTable, RouteTableError> {
    RouteTable::builder()
        .route("/", HOME, QrScannerView)
        .route("/device/:id", DEVICE_INFO, DeviceInfoView)
        .build()
}

/// Build the application router over [`route_table`].
pub fn build_router(config: &RoutingConfig) -> Result<Router, RouteTableError> {
    let options = RouterOptions {
        max_history: config.max_history,
        ..RouterOptions::default()
    };
    Ok(Router::new(route_table()?, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::View;

    #[test]
    fn test_route_table_is_valid() {
        let table = route_table().unwrap();
        let declared: Vec<_> = table
            .routes()
            .iter()
            .map(|r| (r.path(), r.name(), r.view().name()))
            .collect();
        assert_eq!(
            declared,
            vec![
                ("/", HOME, "qr-scanner"),
                ("/device/:id", DEVICE_INFO, "device-info"),
            ]
        );
    }

    #[test]
    fn test_build_router_uses_history_limit() {
        let config = RoutingConfig {
            max_history: 2,
            ..RoutingConfig::default()
        };
        let mut router = build_router(&config).unwrap();
        router.push("/").unwrap();
        router.push("/device/1").unwrap();
        router.push("/device/2").unwrap();
        assert_eq!(router.history().len(), 2);
    }
}
