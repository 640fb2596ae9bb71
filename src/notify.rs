//! Telegram notification.
//!
//! A fresh bot session is built for every message: the token is checked with
//! `getMe` first, so a bad token surfaces as [`Error::BotSetup`] rather than
//! as a send failure. Messages are plain text.

use crate::error::{Error, Result};
use crate::models::Recipient;
use crate::utils::title_case;
use reqwest::Url;
use teloxide::prelude::*;
use tracing::{info, instrument};

/// Sends one plain-text message to one recipient.
pub trait Notifier {
    async fn notify(&self, recipient: &Recipient, message: &str) -> Result<()>;
}

/// The message sent once `world` stops being listed as congested.
pub fn resolved_message(world: &str) -> String {
    format!("{} is no longer congested", title_case(world))
}

/// [`Notifier`] backed by the Telegram bot API.
pub struct TelegramNotifier {
    token: String,
    /// `None` talks to `https://api.telegram.org`.
    api_url: Option<Url>,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_url: None,
        }
    }

    /// Send to a different bot API server, such as a self-hosted one.
    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = Some(api_url);
        self
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Notifier for TelegramNotifier {
    #[instrument(level = "info", skip_all, fields(%recipient))]
    async fn notify(&self, recipient: &Recipient, message: &str) -> Result<()> {
        let mut bot = Bot::new(&self.token);
        if let Some(api_url) = &self.api_url {
            bot = bot.set_api_url(api_url.clone());
        }
        let me = bot.get_me().await.map_err(Error::BotSetup)?;
        info!(bot = %me.username(), "Bot session ready");

        bot.send_message(recipient, message)
            .await
            .map_err(Error::Send)?;
        info!(%message, "Sent notification");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const TOKEN: &str = "123:ABC";

    const GET_ME_OK: &str = r#"{
        "ok": true,
        "result": {
            "id": 123,
            "is_bot": true,
            "first_name": "Lodestone Watch",
            "username": "lodestone_watch_bot",
            "can_join_groups": true,
            "can_read_all_group_messages": false,
            "supports_inline_queries": false,
            "can_connect_to_business": false,
            "has_main_web_app": false
        }
    }"#;

    const SEND_MESSAGE_OK: &str = r#"{
        "ok": true,
        "result": {
            "message_id": 7,
            "date": 1700000000,
            "from": {
                "id": 123,
                "is_bot": true,
                "first_name": "Lodestone Watch",
                "username": "lodestone_watch_bot"
            },
            "chat": {
                "id": 123456789,
                "type": "private",
                "first_name": "Player"
            },
            "text": "Tonberry is no longer congested"
        }
    }"#;

    // teloxide spells method names in PascalCase; Telegram ignores case.
    fn method_path(method: &str) -> Matcher {
        Matcher::Regex(format!("(?i)^/bot{TOKEN}/{method}$"))
    }

    fn notifier_for(server: &mockito::Server) -> TelegramNotifier {
        let api_url = Url::parse(&server.url()).unwrap();
        TelegramNotifier::new(TOKEN).with_api_url(api_url)
    }

    #[tokio::test]
    async fn test_notify_sends_to_numeric_chat_id() {
        let mut server = mockito::Server::new_async().await;
        let get_me = server
            .mock("POST", method_path("getme"))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(GET_ME_OK)
            .create_async()
            .await;
        let send = server
            .mock("POST", method_path("sendmessage"))
            .match_body(Matcher::PartialJsonString(
                r#"{"chat_id": 123456789, "text": "Tonberry is no longer congested"}"#
                    .to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SEND_MESSAGE_OK)
            .create_async()
            .await;

        let recipient = Recipient::new("123456789").unwrap();
        notifier_for(&server)
            .notify(&recipient, &resolved_message("tonberry"))
            .await
            .unwrap();

        get_me.assert_async().await;
        send.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_token_is_bot_setup_error() {
        let mut server = mockito::Server::new_async().await;
        let _get_me = server
            .mock("POST", method_path("getme"))
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#)
            .create_async()
            .await;
        let send = server
            .mock("POST", method_path("sendmessage"))
            .expect(0)
            .create_async()
            .await;

        let recipient = Recipient::new("123456789").unwrap();
        let err = notifier_for(&server)
            .notify(&recipient, "hello")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::BotSetup(_)), "got {err:?}");
        send.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_send_is_send_error() {
        let mut server = mockito::Server::new_async().await;
        let _get_me = server
            .mock("POST", method_path("getme"))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(GET_ME_OK)
            .create_async()
            .await;
        let _send = server
            .mock("POST", method_path("sendmessage"))
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#)
            .create_async()
            .await;

        let recipient = Recipient::new("@no_such_channel").unwrap();
        let err = notifier_for(&server)
            .notify(&recipient, "hello")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Send(_)), "got {err:?}");
    }

    #[test]
    fn test_resolved_message_title_cases_world() {
        assert_eq!(resolved_message("tonberry"), "Tonberry is no longer congested");
        assert_eq!(resolved_message("Kujata"), "Kujata is no longer congested");
    }

    #[test]
    fn test_debug_hides_token() {
        let notifier = TelegramNotifier::new("123:SECRET");
        let shown = format!("{notifier:?}");
        assert!(!shown.contains("SECRET"));
    }
}
