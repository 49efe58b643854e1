pub mod highlight;
pub mod models;
pub mod notification;
pub mod search;
pub mod share;
pub mod theme_pref;
pub mod ui;
