pub mod warn;
pub mod dotpath;
pub mod scope;
pub mod markers;
pub mod config;
pub mod binder;
pub mod repeats;
pub mod sections;
pub mod theme;
pub mod title;
pub mod links;
pub mod pipeline;
pub mod check;
