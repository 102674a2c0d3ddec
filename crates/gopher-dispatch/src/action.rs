//! Actions: the single externally observable effect chosen for an event.

use std::fmt;

use gopher_core::types::MessageEvent;

/// Who receives a posted reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Audience {
    /// The channel the message came from.
    Channel,
    /// A direct message to the sender.
    Sender,
}

/// What the bot does in response to an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Post a plain message.
    Post {
        text: String,
        audience: Audience,
        unfurl_links: bool,
        link_names: bool,
    },
    /// Post a message with a single text attachment.
    PostAttachment {
        text: String,
        attachment: String,
        audience: Audience,
    },
    /// Add one or more emoji reactions to the message.
    React { emojis: Vec<String> },
    /// Share an uploaded file with the paste service and post the link.
    /// `link_template` contains `{id}`.
    Forward {
        file_id: String,
        link_template: String,
    },
}

impl Action {
    /// Plain post without link unfurling.
    pub fn post(text: impl Into<String>, audience: Audience) -> Self {
        Action::Post {
            text: text.into(),
            audience,
            unfurl_links: false,
            link_names: false,
        }
    }

    /// Post that asks the platform to unfurl links.
    pub fn post_unfurled(text: impl Into<String>, audience: Audience) -> Self {
        Action::Post {
            text: text.into(),
            audience,
            unfurl_links: true,
            link_names: false,
        }
    }

    pub fn attachment(
        text: impl Into<String>,
        attachment: impl Into<String>,
        audience: Audience,
    ) -> Self {
        Action::PostAttachment {
            text: text.into(),
            attachment: attachment.into(),
            audience,
        }
    }

    pub fn react(emojis: &[&str]) -> Self {
        Action::React {
            emojis: emojis.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Post { text, audience, .. } => write!(f, "post to {audience:?}: {text}"),
            Action::PostAttachment {
                text,
                attachment,
                audience,
            } => write!(f, "post to {audience:?}: {text}\n{attachment}"),
            Action::React { emojis } => {
                let names: Vec<String> = emojis.iter().map(|e| format!(":{e}:")).collect();
                write!(f, "react {}", names.join(" "))
            }
            Action::Forward { file_id, .. } => write!(f, "forward file {file_id} to playground"),
        }
    }
}

/// Where an action lands: the originating channel, sender, and message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Origin {
    pub channel: String,
    pub user: String,
    /// Timestamp of the triggering message (empty when there is none).
    pub ts: String,
}

impl Origin {
    /// Origin for events that only know a user (e.g. a new member).
    pub fn direct(user: impl Into<String>) -> Self {
        Origin {
            channel: String::new(),
            user: user.into(),
            ts: String::new(),
        }
    }

    /// Resolve an audience to a concrete destination ID.
    pub fn destination(&self, audience: Audience) -> &str {
        match audience {
            Audience::Channel => &self.channel,
            Audience::Sender => &self.user,
        }
    }
}

impl From<&MessageEvent> for Origin {
    fn from(event: &MessageEvent) -> Self {
        Origin {
            channel: event.channel.clone(),
            user: event.user.clone(),
            ts: event.ts.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination() {
        let origin = Origin::from(&MessageEvent::new("C1", "U1", "hi").with_ts("1.2"));
        assert_eq!(origin.destination(Audience::Channel), "C1");
        assert_eq!(origin.destination(Audience::Sender), "U1");
        assert_eq!(origin.ts, "1.2");
    }

    #[test]
    fn test_direct_origin_has_no_channel() {
        let origin = Origin::direct("U9");
        assert_eq!(origin.destination(Audience::Sender), "U9");
        assert!(origin.channel.is_empty());
    }

    #[test]
    fn test_display_react() {
        assert_eq!(Action::react(&["beer", "beers"]).to_string(), "react :beer: :beers:");
    }

    #[test]
    fn test_post_constructors() {
        match Action::post_unfurled("https://xkcd.com/927/", Audience::Channel) {
            Action::Post { unfurl_links, .. } => assert!(unfurl_links),
            other => panic!("unexpected action: {other:?}"),
        }
    }
}
