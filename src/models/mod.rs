//! Models contains all structures that cross the boundary between the caller
//! and the gateway wire format

pub mod attributes;
pub mod cheque;
pub mod notification;
pub mod order;
pub mod session;
pub mod widget;

pub use self::attributes::*;
pub use self::cheque::*;
pub use self::notification::*;
pub use self::order::*;
pub use self::session::*;
pub use self::widget::*;
