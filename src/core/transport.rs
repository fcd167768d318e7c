//! Typed mailboxes connecting the debate tasks.
//!
//! Every task owns exactly one [`Inbox`], so its messages are handled one at
//! a time. Any number of [`Address`] handles can send into it. Sends never
//! wait; delivery order is only kept per sender.

use crate::utils::error::{DebateError, Result};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Send handle for a component's mailbox.
pub struct Address<M> {
    name: Arc<str>,
    sender: mpsc::UnboundedSender<M>,
}

impl<M> Address<M> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fire-and-forget delivery. Fails only once the receiving task is gone.
    pub fn send(&self, message: M) -> Result<()> {
        self.sender
            .send(message)
            .map_err(|_| DebateError::MailboxClosed {
                address: self.name.to_string(),
            })
    }
}

impl<M> Clone for Address<M> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            sender: self.sender.clone(),
        }
    }
}

impl<M> fmt::Debug for Address<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Address").field(&self.name).finish()
    }
}

/// Receiving end of a mailbox.
pub struct Inbox<M> {
    name: Arc<str>,
    receiver: mpsc::UnboundedReceiver<M>,
}

impl<M> Inbox<M> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Next message, or `None` once every [`Address`] has been dropped.
    pub async fn recv(&mut self) -> Option<M> {
        self.receiver.recv().await
    }
}

pub fn mailbox<M>(name: &str) -> (Address<M>, Inbox<M>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    let name: Arc<str> = Arc::from(name);
    (
        Address {
            name: Arc::clone(&name),
            sender,
        },
        Inbox { name, receiver },
    )
}
