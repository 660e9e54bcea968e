//! Built-in pipeline passes, in execution order.

mod assets;
mod imports;
mod raw;
mod slots;

pub use assets::AssetPass;
pub use imports::ImportPass;
pub use raw::{ProtectRawPass, RestoreRawPass};
pub use slots::SlotPass;
