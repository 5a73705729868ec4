use std::time::Duration;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::FutureProducer;
use rdkafka::producer::FutureRecord;
use rdkafka::util::Timeout;
use thiserror::Error;

use crate::account::errors::NotifierError;
use crate::account::events::Notification;
use crate::account::ports::Notifier;
use crate::config::NotificationConfig;
use crate::outbound::notifications::messages::NotificationMessage;

#[derive(Debug, Error)]
pub enum KafkaProducerError {
    #[error("Failed to send message to Kafka: {0}")]
    SendError(String),

    #[error("Failed to serialize message: {0}")]
    SerializationError(String),
}

impl From<KafkaProducerError> for NotifierError {
    fn from(err: KafkaProducerError) -> Self {
        match err {
            KafkaProducerError::SerializationError(msg) => NotifierError::SerializationFailed(msg),
            KafkaProducerError::SendError(msg) => NotifierError::PublishFailed(msg),
        }
    }
}

/// Publishes rendered notifications to a Kafka topic consumed by the mail relay.
pub struct KafkaNotifier {
    producer: FutureProducer,
    topic: String,
    timeout: Duration,
}

impl KafkaNotifier {
    /// Create a Kafka notifier with "at most once" delivery semantics
    ///
    /// # Notes:
    /// - `acks=1`: Leader acknowledgement is enough
    /// - `retries=0`: A failed send is dropped, never duplicated
    /// - `message.timeout.ms=5000`: Bounded attempt, nobody waits on it
    pub fn new(config: &NotificationConfig) -> Result<Self, anyhow::Error> {
        tracing::info!(
            brokers = %config.brokers,
            topic = %config.topic,
            "Initializing Kafka producer for account notifications"
        );

        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("message.timeout.ms", "5000")
            .set("queue.buffering.max.messages", "10000")
            .set("compression.type", "gzip")
            .set("enable.idempotence", "false")
            .set("acks", "1")
            .set("retries", "0")
            .create()?;

        tracing::info!("Kafka producer initialized successfully");

        Ok(Self {
            producer,
            topic: config.topic.to_string(),
            timeout: Duration::from_secs(5),
        })
    }

    /// Publish one message, keyed by account ID.
    async fn publish(
        &self,
        account_id: &str,
        message: &NotificationMessage,
    ) -> Result<(), KafkaProducerError> {
        let payload = serde_json::to_string(message)
            .map_err(|e| KafkaProducerError::SerializationError(e.to_string()))?;

        let record = FutureRecord::to(&self.topic)
            .key(account_id)
            .payload(&payload);

        self.producer
            .send(record, Timeout::After(self.timeout))
            .await
            .map(|_| {
                tracing::debug!(
                    topic = %self.topic,
                    account_id,
                    "Notification published"
                );
            })
            .map_err(|(err, _)| KafkaProducerError::SendError(err.to_string()))
    }
}

#[async_trait]
impl Notifier for KafkaNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifierError> {
        let message = NotificationMessage::from(notification);

        self.publish(&notification.account_id, &message)
            .await
            .map_err(NotifierError::from)
    }
}
