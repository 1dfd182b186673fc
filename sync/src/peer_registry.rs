use cruiser_sync_shared::PeerId;

/// Clients that completed the contact step, in the order they contacted.
///
/// This is narrower than the transport's connection list: peers without the
/// protocol never contact the host and so never show up here.
#[derive(Debug, Default, Clone)]
pub struct PeerRegistry {
    peers: Vec<PeerId>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self { peers: Vec::new() }
    }

    /// Returns false if the peer was already registered
    pub fn insert(&mut self, peer: PeerId) -> bool {
        if self.contains(&peer) {
            return false;
        }
        self.peers.push(peer);
        true
    }

    /// Returns false if the peer was not registered
    pub fn remove(&mut self, peer: &PeerId) -> bool {
        let Some(index) = self.peers.iter().position(|p| p == peer) else {
            return false;
        };
        self.peers.remove(index);
        true
    }

    pub fn contains(&self, peer: &PeerId) -> bool {
        self.peers.contains(peer)
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PeerId> {
        self.peers.iter()
    }

    pub fn to_vec(&self) -> Vec<PeerId> {
        self.peers.clone()
    }
}
