//! Channel-backed mail queue and its background listener.
//!
//! Request handlers push [`MailData`] onto an unbounded channel and return
//! immediately; a single listener task drains the channel. Delivery itself
//! is out of scope, so the listener records each message in the log.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::ports::{MailData, MailError, Mailer};

/// `Mailer` that enqueues onto a tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelMailer {
    tx: mpsc::UnboundedSender<MailData>,
}

impl ChannelMailer {
    /// Creates the mailer and the receiving end for the listener.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<MailData>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Mailer for ChannelMailer {
    fn send(&self, mail: MailData) -> Result<(), MailError> {
        self.tx.send(mail).map_err(|_| MailError::QueueClosed)
    }
}

/// Drains the mail channel until every sender is dropped.
pub fn spawn_mail_listener(mut rx: mpsc::UnboundedReceiver<MailData>) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut delivered = 0;
        while let Some(mail) = rx.recv().await {
            tracing::info!(
                to = %mail.to,
                from = %mail.from,
                subject = %mail.subject,
                template = mail.template.as_deref().unwrap_or("none"),
                "Mail dispatched"
            );
            delivered += 1;
        }
        tracing::info!(delivered, "Mail listener stopped");
        delivered
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail(to: &str) -> MailData {
        MailData {
            to: to.to_string(),
            from: "me@here.com".to_string(),
            subject: "Reservation Confirmation".to_string(),
            content: "<p>Hello</p>".to_string(),
            template: Some("basic.html".to_string()),
        }
    }

    #[tokio::test]
    async fn queued_mail_reaches_receiver() {
        let (mailer, mut rx) = ChannelMailer::channel();
        mailer.send(mail("john@gmail.com")).unwrap();
        assert_eq!(rx.recv().await.unwrap().to, "john@gmail.com");
    }

    #[tokio::test]
    async fn send_after_receiver_dropped_reports_closed_queue() {
        let (mailer, rx) = ChannelMailer::channel();
        drop(rx);
        assert_eq!(mailer.send(mail("a@b.com")), Err(MailError::QueueClosed));
    }

    #[tokio::test]
    async fn listener_drains_until_senders_drop() {
        let (mailer, rx) = ChannelMailer::channel();
        let handle = spawn_mail_listener(rx);

        mailer.send(mail("a@b.com")).unwrap();
        mailer.send(mail("c@d.com")).unwrap();
        drop(mailer);

        assert_eq!(handle.await.unwrap(), 2);
    }
}
