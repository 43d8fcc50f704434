pub mod gate;

pub use self::gate::{
    can_send, Denial, GateState, LastSendPolicy, SendKind, Verdict, DEFAULT_COOLDOWN,
};
