#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::BubbleList;
use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::OVERLAY_TRIGGER;
use crate::domain::models::RelayReply;

const WELCOME_MESSAGE: &str = "Hello! I'm Aura, your empathetic AI companion. Feel free to share what's on your mind. How are you doing today?";
const FALLBACK_MESSAGE: &str = "I'm not sure how to respond to that. Could you try rephrasing?";

pub struct AppState<'a> {
    pub bubble_list: BubbleList<'a>,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub messages: Vec<Message>,
    pub overlay_visible: bool,
    pub scroll: Scroll,
    pub waiting_for_relay: bool,
}

impl<'a> AppState<'a> {
    pub fn new() -> AppState<'a> {
        let mut app_state = AppState {
            bubble_list: BubbleList::new(),
            last_known_height: 0,
            last_known_width: 0,
            messages: vec![],
            overlay_visible: false,
            scroll: Scroll::default(),
            waiting_for_relay: false,
        };

        app_state
            .messages
            .push(Message::new(Author::Model, WELCOME_MESSAGE));

        return app_state;
    }

    pub fn handle_submit(
        &mut self,
        input: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<bool> {
        if input.trim().is_empty() || self.waiting_for_relay || self.overlay_visible {
            return Ok(false);
        }

        if input.trim().to_lowercase() == OVERLAY_TRIGGER {
            self.overlay_visible = true;
            tx.send(Action::OverlayTimer())?;
            return Ok(true);
        }

        self.add_message(Message::new(Author::User, input));
        self.waiting_for_relay = true;
        tx.send(Action::RelayRequest(input.to_string()))?;

        return Ok(true);
    }

    pub fn handle_relay_response(&mut self, reply: RelayReply) {
        let mut text = reply.response;
        if text.is_empty() {
            text = FALLBACK_MESSAGE.to_string();
        }

        self.add_message(Message::new(Author::Model, &text));
        self.waiting_for_relay = false;
    }

    pub fn handle_relay_failure(&mut self, error: &str) {
        self.add_message(Message::new_with_type(
            Author::Model,
            MessageType::Error,
            &format!("Sorry, something went wrong: {error}"),
        ));
        self.waiting_for_relay = false;
    }

    pub fn handle_overlay_expired(&mut self) {
        self.overlay_visible = false;
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.sync_dependants();
        self.scroll.last();
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_messages(&self.messages, self.last_known_width as usize);

        self.scroll
            .set_state(self.bubble_list.len() as u16, self.last_known_height);

        if self.waiting_for_relay {
            self.scroll.last();
        }
    }
}
