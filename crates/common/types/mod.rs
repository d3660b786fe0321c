mod account;
mod block_tag;
mod call;
mod contract;
mod hex;
mod mine;
mod simulate;
mod transaction_intent;

pub use account::*;
pub use block_tag::*;
pub use call::*;
pub use contract::*;
pub use self::hex::*;
pub use mine::*;
pub use simulate::*;
pub use transaction_intent::*;
