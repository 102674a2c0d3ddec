//! Bot loop: consumes inbound events, dispatches, executes.
//!
//! Each event is handled on its own. Failures are logged and dropped; the
//! loop only exits when the bus closes.

use std::sync::Arc;

use tracing::{debug, error, info};

use gopher_core::bus::{EventBus, InboundEvent};

use crate::action::{Action, Origin};
use crate::dispatcher::Dispatcher;
use crate::executor::ActionExecutor;

pub struct GopherBot {
    bus: Arc<EventBus>,
    dispatcher: Dispatcher,
    executor: ActionExecutor,
}

impl GopherBot {
    pub fn new(bus: Arc<EventBus>, dispatcher: Dispatcher, executor: ActionExecutor) -> Self {
        Self {
            bus,
            dispatcher,
            executor,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Run until the inbound channel is closed.
    pub async fn run(&self) {
        info!(
            bot = %self.dispatcher.context().identity.name,
            rules = self.dispatcher.rules().len(),
            "bot loop started, waiting for events"
        );
        while let Some(event) = self.bus.consume().await {
            self.handle(event).await;
        }
        info!("inbound channel closed, bot loop exiting");
    }

    /// Handle one event. Returns the action taken, if any.
    pub async fn handle(&self, event: InboundEvent) -> Option<Action> {
        let kind = event.kind();
        let (action, origin) = match &event {
            InboundEvent::Message(msg) => {
                let routed = self.dispatcher.route(msg)?;
                debug!(rule = routed.rule.name, channel = %msg.channel, "dispatching");
                (routed.action, Origin::from(msg))
            }
            InboundEvent::TeamJoin(member) => {
                info!(user = %member.id, name = %member.name, "new member joined");
                (self.dispatcher.welcome(member)?, Origin::direct(&member.id))
            }
        };

        if let Err(e) = self.executor.execute(&action, &origin).await {
            error!(
                event = kind,
                action = %action,
                channel = %origin.channel,
                user = %origin.user,
                error = %format!("{e:#}"),
                "action failed"
            );
        }
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gopher_core::config::schema::{default_channels, PlaygroundConfig};
    use gopher_core::context::{BotContext, BotIdentity};
    use gopher_core::registry::ChannelRegistry;
    use gopher_core::types::{MessageEvent, NewMember};

    use crate::executor::tests::{MockPaste, MockPlatform};
    use crate::rules::RuleTable;

    fn bot(platform: Arc<MockPlatform>, bus: Arc<EventBus>) -> GopherBot {
        let identity = BotIdentity {
            user_id: "UBOT".into(),
            name: "gopher".into(),
        };
        let ctx = BotContext::new(identity, "0.9.0")
            .with_channels(ChannelRegistry::unresolved(&default_channels()));
        let dispatcher = Dispatcher::new(
            Arc::new(ctx),
            RuleTable::standard(&PlaygroundConfig::default()),
        );
        let executor = ActionExecutor::new(platform, Arc::new(MockPaste::returning("id")), 6);
        GopherBot::new(bus, dispatcher, executor)
    }

    #[tokio::test]
    async fn test_handle_message() {
        let platform = Arc::new(MockPlatform::default());
        let bot = bot(platform.clone(), Arc::new(EventBus::new(8)));

        let action = bot
            .handle(MessageEvent::new("C1", "U1", "gopher version").into())
            .await;
        assert!(action.is_some());

        let posts = platform.posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].to, "U1");
        assert_eq!(posts[0].text, "My version is: 0.9.0");
    }

    #[tokio::test]
    async fn test_handle_unmatched_does_nothing() {
        let platform = Arc::new(MockPlatform::default());
        let bot = bot(platform.clone(), Arc::new(EventBus::new(8)));

        let action = bot
            .handle(MessageEvent::new("C1", "U1", "lunch anyone?").into())
            .await;
        assert!(action.is_none());
        assert!(platform.posts().is_empty());
    }

    #[tokio::test]
    async fn test_handle_team_join_sends_welcome_dm() {
        let platform = Arc::new(MockPlatform::default());
        let bot = bot(platform.clone(), Arc::new(EventBus::new(8)));

        let member = NewMember {
            id: "U42".into(),
            name: "ada".into(),
        };
        bot.handle(member.into()).await;

        let posts = platform.posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].to, "U42");
        assert!(posts[0].text.starts_with("Hello ada,"));
        assert!(posts[0].link_names);
    }

    #[tokio::test]
    async fn test_failed_action_is_swallowed() {
        let platform = Arc::new(MockPlatform {
            fail_reactions: true,
            ..Default::default()
        });
        let bot = bot(platform, Arc::new(EventBus::new(8)));

        let action = bot
            .handle(MessageEvent::new("C1", "U1", "bbq tonight").into())
            .await;
        assert_eq!(action, Some(Action::react(&["bbqgopher"])));
    }

    #[tokio::test]
    async fn test_run_handles_queued_events() {
        let platform = Arc::new(MockPlatform::default());
        let bus = Arc::new(EventBus::new(8));
        let bot = Arc::new(bot(platform.clone(), bus.clone()));

        let sender = bus.sender();
        let runner = {
            let bot = bot.clone();
            tokio::spawn(async move { bot.run().await })
        };

        sender
            .send(MessageEvent::new("D1", "U1", "help").into())
            .await
            .unwrap();
        sender
            .send(MessageEvent::new("C1", "U1", "beer me").into())
            .await
            .unwrap();

        // Wait until both events are handled, then stop the loop
        for _ in 0..50 {
            if platform.posts().len() == 1 && platform.reactions.lock().unwrap().len() == 2 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        runner.abort();

        assert_eq!(platform.posts()[0].to, "U1");
        assert_eq!(platform.reactions.lock().unwrap().len(), 2);
    }
}
