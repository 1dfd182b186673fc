/// Stable identity the transport assigns to the host and to each client
pub type PeerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostType {
    Host,
    Client,
}

impl HostType {
    pub fn is_host(self) -> bool {
        self == HostType::Host
    }
}
