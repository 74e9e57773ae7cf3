pub mod service;
pub mod view;

pub use service::{AlertSnapshot, FetchOutcome, StatusAlertService};
pub use view::AlertView;
