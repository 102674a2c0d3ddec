//! Bus event types: what the socket listener hands to the bot loop.

use crate::types::{MessageEvent, NewMember};

/// An inbound event from the chat platform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundEvent {
    /// A message in a channel, group, or DM.
    Message(MessageEvent),
    /// A new member joined the workspace.
    TeamJoin(NewMember),
}

impl InboundEvent {
    /// Short event kind used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            InboundEvent::Message(_) => "message",
            InboundEvent::TeamJoin(_) => "team_join",
        }
    }
}

impl From<MessageEvent> for InboundEvent {
    fn from(msg: MessageEvent) -> Self {
        InboundEvent::Message(msg)
    }
}

impl From<NewMember> for InboundEvent {
    fn from(member: NewMember) -> Self {
        InboundEvent::TeamJoin(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        let msg: InboundEvent = MessageEvent::new("C1", "U1", "hi").into();
        assert_eq!(msg.kind(), "message");

        let join: InboundEvent = NewMember {
            id: "U2".into(),
            name: "newbie".into(),
        }
        .into();
        assert_eq!(join.kind(), "team_join");
    }
}
