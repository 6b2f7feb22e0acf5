pub mod qualify;
pub mod scan;

pub use qualify::PoolQualifier;
pub use scan::PoolScanner;
