use crate::packet::Packet;

/// The narrow seam to the transport collaborator.
///
/// Sends are fire-and-forget from the core's point of view: a change-set read
/// from a tracker is already committed to the dirty-clear side effect, so the
/// sink must deliver it or the observer silently misses that tick's delta.
/// There is no re-send/ack layer in the core.
pub trait PacketSink {
    fn send(&mut self, bytes: Vec<u8>);

    fn send_packet(&mut self, packet: &Packet) {
        self.send(packet.to_bytes());
    }
}

/// In-memory sink buffering serialized packets; the loopback transport used
/// by tests and integrated (single-process) setups
pub struct BufferSink {
    packets: Vec<Vec<u8>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self {
            packets: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// Takes every buffered packet, oldest first
    pub fn drain(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.packets)
    }
}

impl Default for BufferSink {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketSink for BufferSink {
    fn send(&mut self, bytes: Vec<u8>) {
        self.packets.push(bytes);
    }
}
