//! Iced screens for the poex client.

pub mod screens;
