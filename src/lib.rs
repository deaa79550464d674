pub mod traits {
    pub mod item_codec;
    pub mod wire_sink;
}

pub mod models {

    pub mod windows {
        pub mod adjustable;
        pub mod splittable;
    }
    pub mod encoders {
        pub mod batch;
    }
    pub mod sinks {
        pub mod message_sink;
    }
    pub mod writers {
        pub mod message_writer;
    }
    pub mod payload;
}

pub mod constants;
pub mod enums;
pub mod error;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use crate::enums::SplitDecision;
pub use crate::error::BatchError;
pub use crate::models::encoders::batch::{BatchLimits, SizeBoundedEncoder};
pub use crate::models::windows::adjustable::AdjustableWindow;
