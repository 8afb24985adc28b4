use std::fmt;

/// Identifies one conversation. Each key owns its own dialog context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Console,
    Channel { channel_id: u64, user_id: u64 },
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionKey::Console => write!(f, "console"),
            SessionKey::Channel {
                channel_id,
                user_id,
            } => write!(f, "channel:{}/user:{}", channel_id, user_id),
        }
    }
}
