pub mod broadcaster;
pub mod clock;
pub mod fetcher;
pub mod locker;
pub mod media_policy;
pub mod resolver;

pub use self::{
    broadcaster::Broadcaster,
    clock::{Clock, SystemClock},
    fetcher::Fetcher,
    locker::{LockToken, Locker},
    media_policy::MediaPolicy,
    resolver::AccountResolver,
};
