pub mod driver_config;

pub use driver_config::DriverConfig;
