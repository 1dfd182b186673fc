mod error;

pub use error::TransportError;
pub use inner::{
    DisconnectHandler, DisconnectKey, MessageHandler, MessageSender, MessageSenderClone, Transport,
};

mod inner {

    use super::TransportError;
    use crate::{HostType, PeerId};

    /// Invoked with the sending peer and the payload of a named message
    pub type MessageHandler = Box<dyn FnMut(PeerId, &[u8]) + Send>;

    /// Invoked with the id of a client that left the session
    pub type DisconnectHandler = Box<dyn FnMut(PeerId) + Send>;

    /// Returned by [`Transport::subscribe_disconnect`], used to unsubscribe
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DisconnectKey(pub u64);

    /// The session substrate: named, addressed messages between one host and
    /// any number of clients, delivered in order per peer.
    ///
    /// Handlers may be called from whatever thread the transport's event loop
    /// runs on, and are scoped to the current session.
    pub trait Transport {
        fn host_type(&self) -> HostType;

        fn is_host(&self) -> bool {
            self.host_type() == HostType::Host
        }

        fn is_client(&self) -> bool {
            self.host_type() == HostType::Client
        }

        /// Identity of the session's host
        fn host_id(&self) -> PeerId;

        /// Identity of this peer
        fn local_id(&self) -> PeerId;

        /// A sending handle that can outlive the borrow of the transport
        fn sender_cloned(&self) -> Box<dyn MessageSender>;

        /// Replaces any handler already registered under `name`
        fn register_handler(&mut self, name: &str, handler: MessageHandler);

        fn unregister_handler(&mut self, name: &str);

        fn subscribe_disconnect(&mut self, handler: DisconnectHandler) -> DisconnectKey;

        fn unsubscribe_disconnect(&mut self, key: DisconnectKey);
    }

    pub trait MessageSender: MessageSenderClone + Send + Sync {
        /// Sends a named message to each of `targets`
        fn send(&self, name: &str, targets: &[PeerId], payload: &[u8])
            -> Result<(), TransportError>;
    }

    /// Used to clone Box<dyn MessageSender>
    pub trait MessageSenderClone {
        /// Clone the boxed MessageSender
        fn clone_box(&self) -> Box<dyn MessageSender>;
    }

    impl<T: 'static + MessageSender + Clone> MessageSenderClone for T {
        fn clone_box(&self) -> Box<dyn MessageSender> {
            Box::new(self.clone())
        }
    }

    impl Clone for Box<dyn MessageSender> {
        fn clone(&self) -> Box<dyn MessageSender> {
            MessageSenderClone::clone_box(self.as_ref())
        }
    }
}
