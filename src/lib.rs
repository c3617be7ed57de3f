//! Restaurant digital menu: a live public menu with a saved-items cart, and
//! an admin panel for categories, menu items and site settings, over a
//! realtime key-value store.

pub mod admin;
pub mod app_system;
pub mod auth;
pub mod cart;
pub mod clients;
pub mod config;
pub mod domain;
pub mod image_host;
pub mod menu_data;
pub mod store;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;
