//! Embassy tasks

mod console_rx;
mod console_tx;
mod radio;

pub use console_rx::console_rx_task;
pub use console_tx::console_tx_task;
pub use radio::{radio_task, Radio};
