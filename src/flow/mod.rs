pub mod conversion;
pub mod definition;
pub mod diagnostics;
pub mod normalize;
pub mod raw;

pub use conversion::*;
pub use definition::*;
pub use diagnostics::*;
pub use normalize::*;
pub use raw::*;
