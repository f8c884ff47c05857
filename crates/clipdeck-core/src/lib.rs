pub mod collision;
pub mod commands;
pub mod error;
pub mod geometry;
pub mod ripple;
pub mod selection;
pub mod settings;
pub mod snap;
pub mod timeline;
pub mod zoom;
