#![doc = include_str!("../README.md")]

mod error;

pub mod capture;
pub mod catalog;
pub mod frame;
pub mod integrity;
pub mod report;
pub mod summary;

pub use capture::Capture;
pub use error::{Error, Result};
pub use frame::{scan, Frame, Header, ScanOpts, Scanner};
pub use report::{analyze, Report};
pub use summary::Summary;
