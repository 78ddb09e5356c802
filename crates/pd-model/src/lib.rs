mod constants;
pub use constants::{FLAG_SEPARATOR, OP_MAX, UNKNOWN_KIND};

mod error;
pub use error::{ModelError, ModelResult};

mod kind;
pub use kind::OpKind;
