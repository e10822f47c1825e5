pub mod backend_config;
